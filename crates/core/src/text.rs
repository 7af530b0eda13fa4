//! Bitmap-font text rendering.
//!
//! A font is an ordinary [`Sprite`] whose frames are glyphs laid out in
//! character order starting at the space character (code 32). Glyphs are
//! drawn unscaled, one frame width apart plus the configured spacing.

use crate::canvas::PixelCanvas;
use crate::sprite::Sprite;
use crate::types::{Align, Color};

/// First character code present in a font sheet.
pub const FIRST_GLYPH: u32 = 32;

/// Persistent text defaults.
#[derive(Debug, Clone)]
pub struct TextProperties {
    pub font: Option<Sprite>,
    pub align: Align,
    /// Extra pixels between glyphs; negative values tighten the text.
    pub spacing: i32,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            font: None,
            align: Align::Left,
            spacing: 0,
            fg: Some(Color::White),
            bg: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    props: TextProperties,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &TextProperties {
        &self.props
    }

    /// Replace every default at once.
    pub fn set_properties(
        &mut self,
        font: Sprite,
        align: Align,
        spacing: i32,
        fg: Option<Color>,
        bg: Option<Color>,
    ) {
        self.props = TextProperties {
            font: Some(font),
            align,
            spacing,
            fg,
            bg,
        };
    }

    pub fn set_font(&mut self, font: Sprite) {
        self.props.font = Some(font);
    }

    pub fn set_align(&mut self, align: Align) {
        self.props.align = align;
    }

    pub fn set_spacing(&mut self, spacing: i32) {
        self.props.spacing = spacing;
    }

    pub fn set_color(&mut self, fg: Option<Color>, bg: Option<Color>) {
        self.props.fg = fg;
        self.props.bg = bg;
    }

    pub fn set_fore_color(&mut self, fg: Option<Color>) {
        self.props.fg = fg;
    }

    pub fn set_back_color(&mut self, bg: Option<Color>) {
        self.props.bg = bg;
    }

    /// Width in pixels of `text` with the current font and spacing.
    pub fn text_width(&self, text: &str) -> i32 {
        let Some(font) = self.props.font.as_ref() else {
            return 0;
        };
        let n = text.chars().count() as i32;
        if n == 0 {
            return 0;
        }
        let glyph_w = font.frame_size().0 as i32;
        n * glyph_w + (n - 1) * self.props.spacing
    }

    /// Draw with the persistent defaults.
    pub fn draw_text(&self, canvas: &mut PixelCanvas, text: &str, x: i32, y: i32) {
        self.draw_text_with(canvas, text, x, y, self.props.align, self.props.fg, self.props.bg);
    }

    /// Draw with per-call alignment and colors; font and spacing come from
    /// the defaults. Without a font this is a no-op.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_with(
        &self,
        canvas: &mut PixelCanvas,
        text: &str,
        x: i32,
        y: i32,
        align: Align,
        fg: Option<Color>,
        bg: Option<Color>,
    ) {
        let Some(font) = self.props.font.as_ref() else {
            return;
        };

        let width = self.text_width(text);
        let mut cx = match align {
            Align::Left => x,
            Align::Center => x - width / 2,
            Align::Right => x - width,
        };

        let (glyph_w, glyph_h) = font.frame_size();
        let glyph_count = font.total_frames() as u32;
        let advance = glyph_w as i32 + self.props.spacing;

        for ch in text.chars() {
            let code = ch as u32;
            if (FIRST_GLYPH..FIRST_GLYPH + glyph_count).contains(&code) {
                canvas.draw_frame(font, (code - FIRST_GLYPH) as i32, cx, y, fg, bg);
            } else if let Some(bg) = bg {
                canvas.rectangle(cx, y, glyph_w as i32, glyph_h as i32, bg);
            }
            cx += advance;
        }
    }
}
