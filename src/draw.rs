// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the composed card frame.
// 2) Mouse sampling for scratching and for the button.
// 3) A tiny 5x7 bitmap font (scalable) for the heading, joke, label and toasts.

use crate::error::Error;
use crate::types::{FrameBuffer, PixelTarget, Rect};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a fixed-size window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        log::debug!("window {width}x{height} opened");
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window coordinates; None when outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    /// Visual: when true and the pointer moves over the card, the overlay is scratched.
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/* ---------- Software drawing: pixels, rects, tiny bitmap font ---------- */

/// Put a pixel on the target if (x,y) is inside bounds.
#[inline]
pub fn put_pixel<T: PixelTarget + ?Sized>(fb: &mut T, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    let (w, h) = fb.dimensions();
    if x >= w || y >= h {
        return;
    }
    fb.set(x, y, color);
}

/// Solid rectangle, clipped to the target.
pub fn fill_rect<T: PixelTarget + ?Sized>(fb: &mut T, rect: Rect, color: u32) {
    for y in rect.y..rect.y + rect.h {
        for x in rect.x..rect.x + rect.w {
            put_pixel(fb, x, y, color);
        }
    }
}

/// 1-pixel outline.
pub fn stroke_rect<T: PixelTarget + ?Sized>(fb: &mut T, rect: Rect, color: u32) {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.w - 1, rect.y + rect.h - 1);
    for x in x0..=x1 {
        put_pixel(fb, x, y0, color);
        put_pixel(fb, x, y1, color);
    }
    for y in y0..=y1 {
        put_pixel(fb, x0, y, color);
        put_pixel(fb, x1, y, color);
    }
}

/* ---------- 5x7 bitmap font (uppercase ASCII; lowercase is folded) ---------- */

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;
/// Horizontal advance per glyph at scale 1 (5 pixels + 1 spacing).
pub const ADVANCE: i32 = 6;
/// Vertical advance per text line at scale 1.
pub const LINE_H: i32 = 9;

/// Return a 5x7 glyph bitmap.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b10001,0b01010,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b01100,0b00100,0b01000),
        ';' => g!(0b00000,0b01100,0b01100,0b00000,0b01100,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '\'' => g!(0b01100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '"' => g!(0b01010,0b01010,0b01010,0b00000,0b00000,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '*' => g!(0b00000,0b00100,0b10101,0b01110,0b10101,0b00100,0b00000),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '[' => g!(0b01110,0b01000,0b01000,0b01000,0b01000,0b01000,0b01110),
        ']' => g!(0b01110,0b00010,0b00010,0b00010,0b00010,0b00010,0b01110),
        '<' => g!(0b00010,0b00100,0b01000,0b10000,0b01000,0b00100,0b00010),
        '>' => g!(0b01000,0b00100,0b00010,0b00001,0b00010,0b00100,0b01000),
        '&' => g!(0b01100,0b10010,0b10100,0b01000,0b10101,0b10010,0b01101),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '$' => g!(0b00100,0b01111,0b10100,0b01110,0b00101,0b11110,0b00100),
        '@' => g!(0b01110,0b10001,0b00001,0b01101,0b10101,0b10101,0b01110),

        // Typographic quotes show up in joke text now and then.
        '\u{2018}' | '\u{2019}' => glyph5x7('\''),
        '\u{201C}' | '\u{201D}' => glyph5x7('"'),
        '\u{2013}' | '\u{2014}' => glyph5x7('-'),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel as a `scale`x`scale` block.
fn draw_char_5x7<T: PixelTarget + ?Sized>(fb: &mut T, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_W {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            let px = x + rx * scale;
            let py = y + ry as i32 * scale;
            for sy in 0..scale {
                for sx in 0..scale {
                    put_pixel(fb, px + sx, py + sy, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
pub fn draw_text<T: PixelTarget + ?Sized>(fb: &mut T, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += ADVANCE * scale;
    }
}

/// Same as `draw_text`, with a 1-block dark shadow for contrast.
pub fn draw_text_shadowed<T: PixelTarget + ?Sized>(fb: &mut T, x: i32, y: i32, text: &str, color: u32, scale: i32) {
    draw_text(fb, x + scale, y + scale, text, 0x00_00_00_00, scale);
    draw_text(fb, x, y, text, color, scale);
}

/// Pixel width of `text` at `scale` (no trailing spacing).
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { (n * ADVANCE - 1) * scale }
}

/// Draw `text` centered on (cx, cy).
pub fn draw_text_centered<T: PixelTarget + ?Sized>(fb: &mut T, cx: i32, cy: i32, text: &str, color: u32, scale: i32) {
    let x = cx - text_width(text, scale) / 2;
    let y = cy - GLYPH_H * scale / 2;
    draw_text(fb, x, y, text, color, scale);
}

/// Greedy word wrap to at most `max_cols` characters per line.
/// Words longer than a line are hard-split.
pub fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    let max_cols = max_cols.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_cols {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(max_cols);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let line_len = line.chars().count();
            let needed = if line.is_empty() { word.len() } else { line_len + 1 + word.len() };
            if needed > max_cols {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// Largest scale in `scales` at which `text` wraps into `area`.
/// Returns the chosen scale with its wrapped lines; the last scale wins if none fit.
pub fn fit_text(text: &str, area: Rect, scales: &[i32]) -> (i32, Vec<String>) {
    let mut best = (1, Vec::new());
    for &scale in scales {
        let cols = ((area.w + scale) / (ADVANCE * scale)).max(1) as usize;
        let lines = wrap_text(text, cols);
        let fits = lines.len() as i32 * LINE_H * scale <= area.h;
        best = (scale, lines);
        if fits {
            break;
        }
    }
    best
}

/// Draw wrapped lines centered horizontally and vertically inside `area`.
pub fn draw_text_block<T: PixelTarget + ?Sized>(fb: &mut T, area: Rect, lines: &[String], color: u32, scale: i32) {
    let block_h = lines.len() as i32 * LINE_H * scale - (LINE_H - GLYPH_H) * scale;
    let mut y = area.y + (area.h - block_h).max(0) / 2;
    let cx = area.x + area.w / 2;
    for line in lines {
        draw_text(fb, cx - text_width(line, scale) / 2, y, line, color, scale);
        y += LINE_H * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_column_limit() {
        let lines = wrap_text("Why do programmers prefer dark mode? Because light attracts bugs.", 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" "), "Why do programmers prefer dark mode? Because light attracts bugs.");
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap_text("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn wrap_keeps_explicit_line_breaks() {
        assert_eq!(wrap_text("one\ntwo", 40), vec!["one", "two"]);
    }

    #[test]
    fn text_width_matches_advance() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 3), 33);
    }

    #[test]
    fn fit_text_falls_back_to_smaller_scale() {
        let area = Rect::new(0, 0, 120, 20);
        let (scale, lines) = fit_text("short", area, &[2, 1]);
        assert_eq!(scale, 2);
        assert_eq!(lines, vec!["short"]);

        let long = "a much longer sentence that cannot fit in two rows at scale two";
        let (scale, _) = fit_text(long, area, &[2, 1]);
        assert_eq!(scale, 1);
    }

    #[test]
    fn glyphs_fold_lowercase_and_draw_pixels() {
        let mut fb = FrameBuffer::new(20, 10);
        draw_text(&mut fb, 0, 0, "a", 0x00_FF_FF_FF, 1);
        assert!(fb.pixels.iter().any(|&p| p == 0x00_FF_FF_FF));
    }

    #[test]
    fn put_pixel_clips_out_of_bounds() {
        let mut fb = FrameBuffer::new(4, 4);
        put_pixel(&mut fb, -1, 0, 1);
        put_pixel(&mut fb, 4, 0, 1);
        put_pixel(&mut fb, 0, 4, 1);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }
}
