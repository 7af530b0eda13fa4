//! Window buffer: the canvas blown up by the current zoom factors.

use crate::core::PixelCanvas;
use crate::types::Color;

/// Row-major grid of palette colors, `canvas * zoom` cells in size.
///
/// Rebuilt from the canvas every frame. The allocation is kept across frames
/// and only changes when the zoom (or canvas) size does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowBuffer {
    width: u16,
    height: u16,
    cells: Vec<Color>,
}

impl Default for WindowBuffer {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl WindowBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Color::Black; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Resize, preserving the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Color::Black);
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Color> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Fill from `canvas`: cell `(wx, wy)` takes canvas pixel
    /// `(wx / zoom_x, wy / zoom_y)`. Zero zoom factors are treated as 1.
    pub fn composite(&mut self, canvas: &PixelCanvas, zoom_x: u16, zoom_y: u16) {
        let zx = zoom_x.max(1);
        let zy = zoom_y.max(1);
        let w = canvas.width().saturating_mul(zx);
        let h = canvas.height().saturating_mul(zy);
        self.resize(w, h);
        if w == 0 || h == 0 {
            return;
        }

        let src = canvas.pixels();
        let cw = canvas.width() as usize;
        let (zx, zy) = (zx as usize, zy as usize);
        for (wy, row) in self.cells.chunks_exact_mut(w as usize).enumerate() {
            let src_row = &src[(wy / zy) * cw..(wy / zy + 1) * cw];
            if zx == 1 {
                row.copy_from_slice(src_row);
                continue;
            }
            for (block, &color) in row.chunks_exact_mut(zx).zip(src_row) {
                block.fill(color);
            }
        }
    }
}
