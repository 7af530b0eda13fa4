//! The display seam: anything that can show a window buffer.

use anyhow::Result;

use crate::types::{Color, Configuration};
use crate::window::WindowBuffer;

/// A cell-grid display device.
pub trait CellSink {
    /// Ask the device to adopt a font and a `width x height` cell window.
    fn apply_configuration(&mut self, config: &Configuration, width: u16, height: u16)
        -> Result<()>;

    /// Write one composited frame. This is the only per-frame device write.
    fn present(&mut self, window: &WindowBuffer) -> Result<()>;

    fn set_title(&mut self, _title: &str) -> Result<()> {
        Ok(())
    }
}

/// Cell attribute for a palette color: `index * offset`.
///
/// With the default offset of 16 the color lands in the background nibble.
pub fn encode_attribute(color: Color, offset: u16) -> u16 {
    (color.index() as u16).wrapping_mul(offset)
}

/// Split an attribute into `(foreground, background)` palette colors.
pub fn decode_attribute(attr: u16) -> (Color, Color) {
    let fg = Color::ALL[(attr & 0x0f) as usize];
    let bg = Color::ALL[((attr >> 4) & 0x0f) as usize];
    (fg, bg)
}

/// In-memory surface for headless runs: keeps the attributes of the last
/// presented frame and a record of every device request.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    back_color_offset: u16,
    width: u16,
    height: u16,
    attributes: Vec<u16>,
    frames: u64,
    configurations: Vec<(Configuration, u16, u16)>,
    title: String,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new(crate::types::BACK_COLOR_OFFSET)
    }
}

impl MemorySurface {
    pub fn new(back_color_offset: u16) -> Self {
        Self {
            back_color_offset,
            width: 0,
            height: 0,
            attributes: Vec::new(),
            frames: 0,
            configurations: Vec::new(),
            title: String::new(),
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn attributes(&self) -> &[u16] {
        &self.attributes
    }

    pub fn attribute(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.attributes
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn configurations(&self) -> &[(Configuration, u16, u16)] {
        &self.configurations
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl CellSink for MemorySurface {
    fn apply_configuration(
        &mut self,
        config: &Configuration,
        width: u16,
        height: u16,
    ) -> Result<()> {
        self.configurations.push((config.clone(), width, height));
        Ok(())
    }

    fn present(&mut self, window: &WindowBuffer) -> Result<()> {
        self.width = window.width();
        self.height = window.height();
        let offset = self.back_color_offset;
        self.attributes.clear();
        self.attributes
            .extend(window.cells().iter().map(|&c| encode_attribute(c, offset)));
        self.frames += 1;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title.clear();
        self.title.push_str(title);
        Ok(())
    }
}
