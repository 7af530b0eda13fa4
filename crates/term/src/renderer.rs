//! TerminalSurface: flushes the window buffer to a real terminal.
//!
//! Each window cell becomes one terminal character. The cell's palette color
//! goes through the attribute encoding (see [`encode_attribute`]): cells with
//! a background color print a space on that background, cells with only a
//! foreground print a full block in the foreground color.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use tracing::{debug, warn};

use crate::surface::{decode_attribute, encode_attribute, CellSink};
use crate::types::{Color, Configuration, BACK_COLOR_OFFSET};
use crate::window::WindowBuffer;

const BLOCK: char = '\u{2588}';

pub struct TerminalSurface {
    stdout: io::Stdout,
    last: Option<WindowBuffer>,
    buf: Vec<u8>,
    back_color_offset: u16,
    keyboard_enhanced: bool,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new(BACK_COLOR_OFFSET)
    }
}

impl TerminalSurface {
    pub fn new(back_color_offset: u16) -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            back_color_offset,
            keyboard_enhanced: false,
        }
    }

    pub fn back_color_offset(&self) -> u16 {
        self.back_color_offset
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        // Key release events, where the terminal supports them.
        self.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(EnableFocusChange)?;
        if self.keyboard_enhanced {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        debug!(keyboard_enhanced = self.keyboard_enhanced, "terminal_enter");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.keyboard_enhanced {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(DisableFocusChange)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl CellSink for TerminalSurface {
    fn apply_configuration(
        &mut self,
        config: &Configuration,
        width: u16,
        height: u16,
    ) -> Result<()> {
        // Terminals pick their own font; only the geometry can be requested.
        debug!(
            config = %config.name,
            font = %config.font_name,
            font_size = config.font_size,
            font_weight = config.font_weight,
            width,
            height,
            "apply_configuration"
        );
        self.buf.clear();
        self.buf.queue(terminal::SetSize(width, height))?;
        self.flush_buf()?;

        let (cols, rows) = terminal::size()?;
        if cols < width || rows < height {
            warn!(cols, rows, width, height, "terminal_smaller_than_window");
        }
        self.invalidate();
        Ok(())
    }

    fn present(&mut self, window: &WindowBuffer) -> Result<()> {
        let offset = self.back_color_offset;
        self.buf.clear();
        match self.last.as_mut() {
            Some(prev) => {
                encode_diff_into(prev, window, offset, &mut self.buf)?;
                prev.clone_from(window);
            }
            None => {
                encode_full_into(window, offset, &mut self.buf)?;
                self.last = Some(window.clone());
            }
        }
        self.flush_buf()
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::SetTitle(title))?;
        self.flush_buf()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(window: &WindowBuffer, offset: u16, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<u16> = None;
    for y in 0..window.height() {
        for x in 0..window.width() {
            let attr = encode_attribute(window.get(x, y).unwrap_or(Color::Black), offset);
            put_cell(out, attr, &mut current)?;
        }
        if y + 1 < window.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`. Frames of different
/// sizes fall back to a full redraw.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(
    prev: &WindowBuffer,
    next: &WindowBuffer,
    offset: u16,
    out: &mut Vec<u8>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, offset, out);
    }

    let mut current: Option<u16> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let attr = encode_attribute(next.get(x + dx, y).unwrap_or(Color::Black), offset);
            put_cell(out, attr, &mut current)?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn put_cell(out: &mut Vec<u8>, attr: u16, current: &mut Option<u16>) -> Result<()> {
    let (fg, bg) = decode_attribute(attr);
    if *current != Some(attr) {
        out.queue(SetForegroundColor(palette_to_color(fg)))?;
        out.queue(SetBackgroundColor(palette_to_color(bg)))?;
        *current = Some(attr);
    }
    let ch = if attr >= 16 { ' ' } else { BLOCK };
    out.queue(Print(ch))?;
    Ok(())
}

fn palette_to_color(color: Color) -> TermColor {
    let (r, g, b) = color.rgb();
    TermColor::Rgb { r, g, b }
}

/// Both buffers must have the same size.
fn for_each_changed_run(
    prev: &WindowBuffer,
    next: &WindowBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
