//! Binary sprite asset codec.
//!
//! Layout (little-endian):
//!
//! | Offset | Type | Field |
//! |--------|------|-------|
//! | 0 | `i32` | image width |
//! | 4 | `i32` | image height |
//! | 8 | `i16 * width * height` | palette indices, row-major |
//!
//! Frame partitioning is not stored in the file; it is supplied at load time.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Color;

const HEADER_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read sprite asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sprite asset is {len} bytes, shorter than the 8-byte header")]
    TruncatedHeader { len: usize },
    #[error("sprite asset has invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("sprite asset payload is {actual} bytes, expected {expected}")]
    PayloadLength { expected: usize, actual: usize },
    #[error("sprite asset pixel {index} has color {value} outside the palette")]
    InvalidColor { index: usize, value: i16 },
}

/// A decoded palette image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<Color>,
}

/// Decode an asset from memory.
pub fn decode(bytes: &[u8]) -> Result<SpriteImage, AssetError> {
    if bytes.len() < HEADER_LEN {
        return Err(AssetError::TruncatedHeader { len: bytes.len() });
    }

    let width = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let height = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(AssetError::InvalidDimensions { width, height }),
    };

    let count = w as usize * h as usize;
    let payload = &bytes[HEADER_LEN..];
    let expected = count * 2;
    if payload.len() != expected {
        return Err(AssetError::PayloadLength {
            expected,
            actual: payload.len(),
        });
    }

    let pixels = payload
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| {
            let value = i16::from_le_bytes([pair[0], pair[1]]);
            Color::from_index(value as i32).ok_or(AssetError::InvalidColor { index, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SpriteImage {
        width: w,
        height: h,
        pixels,
    })
}

/// Encode an image into the asset layout.
pub fn encode(image: &SpriteImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + image.pixels.len() * 2);
    out.extend_from_slice(&(image.width as i32).to_le_bytes());
    out.extend_from_slice(&(image.height as i32).to_le_bytes());
    for color in &image.pixels {
        out.extend_from_slice(&(color.index() as i16).to_le_bytes());
    }
    out
}

/// Read and decode an asset file.
pub fn read_file(path: &Path) -> Result<SpriteImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}
