// Core types shared by the window, the card and the FX.

use image::{Rgba, RgbaImage};

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}

/// Axis-aligned rectangle in window pixels.
/// Visual: where the card, the button and the toasts sit on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && py >= self.y as f32
            && px < (self.x + self.w) as f32
            && py < (self.y + self.h) as f32
    }
}

/// Anything the software drawing helpers can put a pixel on.
pub trait PixelTarget {
    fn dimensions(&self) -> (usize, usize);
    /// Write an opaque 0x00RRGGBB color; callers already bounds-checked.
    fn set(&mut self, x: usize, y: usize, color: u32);
}

impl PixelTarget for FrameBuffer {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn set(&mut self, x: usize, y: usize, color: u32) {
        self.pixels[y * self.width + x] = color;
    }
}

impl PixelTarget for RgbaImage {
    fn dimensions(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }

    fn set(&mut self, x: usize, y: usize, color: u32) {
        self.put_pixel(x as u32, y as u32, rgba_from_u32(color));
    }
}

#[inline]
pub fn rgba_from_u32(color: u32) -> Rgba<u8> {
    Rgba([(color >> 16) as u8, (color >> 8) as u8, color as u8, 0xFF])
}

#[inline]
pub fn rgb_channels(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Straight-alpha "src over dst" for one pixel.
#[inline]
pub fn blend_over(dst: u32, src: Rgba<u8>) -> u32 {
    let a = src[3] as u32;
    if a == 0xFF { return pack_rgb(src[0], src[1], src[2]); }
    if a == 0 { return dst; }
    let (dr, dg, db) = rgb_channels(dst);
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
    pack_rgb(mix(src[0], dr), mix(src[1], dg), mix(src[2], db))
}

/// Linear interpolation between two 0x00RRGGBB colors, `t` in [0,1].
#[inline]
pub fn lerp_rgb(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let (ar, ag, ab) = rgb_channels(a);
    let (br, bg, bb) = rgb_channels(b);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    pack_rgb(mix(ar, br), mix(ag, bg), mix(ab, bb))
}
