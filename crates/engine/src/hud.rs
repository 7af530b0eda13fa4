//! Title bar, status bar and pause dialog drawn on the canvas.
//!
//! Text goes through the engine's text renderer, so without a font only the
//! bars and the dialog frame appear.

use crate::engine::Engine;
use crate::types::{Align, Color};

pub const BAR_HEIGHT: i32 = 9;

/// What the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusInfo {
    /// Live display configuration and the keys that edit it.
    #[default]
    Configuration,
    /// Frame rate and frame time.
    Timing,
}

impl Engine {
    fn glyph_height(&self) -> i32 {
        self.text
            .properties()
            .font
            .as_ref()
            .map_or(0, |f| f.frame_size().1 as i32)
    }

    pub fn draw_title_bar(&mut self, height: i32, color: Color) {
        let w = self.canvas_width();
        self.canvas.rectangle(0, 0, w, height, color);
    }

    pub fn draw_status_bar(&mut self, height: i32, color: Color) {
        let (w, h) = (self.canvas_width(), self.canvas_height());
        self.canvas.rectangle(0, h - height, w, height, color);
    }

    /// Text at both ends of the title bar, on the bar color.
    pub fn draw_title_bar_info(
        &mut self,
        left: &str,
        right: &str,
        bar_color: Color,
        dx: i32,
        dy: i32,
    ) {
        let fg = self.text.properties().fg;
        let w = self.canvas_width();
        self.draw_text_with(left, 1 + dx, 1 + dy, Align::Left, fg, Some(bar_color));
        self.draw_text_with(right, w - 1 - dx, 1 + dy, Align::Right, fg, Some(bar_color));
    }

    pub fn draw_status_bar_info(&mut self, info: StatusInfo, bar_color: Color, dx: i32, dy: i32) {
        let text = match info {
            StatusInfo::Configuration => {
                let c = self.registry.current();
                format!(
                    "F7 {}  F1 {}  F3 {}  F4 {}  F5/F6 {}x{}",
                    c.name, c.font_name, c.font_size, c.font_weight, c.zoom_x, c.zoom_y
                )
            }
            StatusInfo::Timing => format!(
                "FPS {:.0}  FRAME {:.1} MS",
                self.fps(),
                self.elapsed_time() * 1000.0
            ),
        };
        let fg = self.text.properties().fg;
        let y = self.canvas_height() - self.glyph_height() - 1 + dy;
        self.draw_text_with(&text, 1 + dx, y, Align::Left, fg, Some(bar_color));
    }

    /// Default pause screen: a centered box listing the live configuration.
    pub fn draw_pause_dialog(&mut self, fill: Color, stroke: Option<Color>, stroke_size: i32) {
        let c = self.registry.current();
        let lines = [
            "PAUSED".to_string(),
            String::new(),
            format!("CONFIG {}", c.name),
            format!("FONT {}", c.font_name),
            format!("SIZE {}  WEIGHT {}", c.font_size, c.font_weight),
            format!("ZOOM {}x{}", c.zoom_x, c.zoom_y),
            String::new(),
            "P RESUME  ESC QUIT".to_string(),
        ];

        let glyph_h = self.glyph_height();
        let pad = 4 + stroke_size.max(0);
        let text_w = lines.iter().map(|l| self.text.text_width(l)).max().unwrap_or(0);
        let text_h = lines.len() as i32 * (glyph_h + 1);
        let (box_w, box_h) = if glyph_h == 0 {
            (self.canvas_width() / 2, self.canvas_height() / 3)
        } else {
            (text_w + 2 * pad, text_h + 2 * pad)
        };

        let x = self.center_x() - box_w / 2;
        let y = self.center_y() - box_h / 2;
        self.canvas
            .rectangle_bordered(x, y, box_w, box_h, Some(fill), stroke, stroke_size);

        let fg = self.text.properties().fg;
        let cx = self.center_x();
        for (i, line) in lines.iter().enumerate() {
            let ly = y + pad + i as i32 * (glyph_h + 1);
            self.draw_text_with(line, cx, ly, Align::Center, fg, None);
        }
    }
}
