// The scratchable overlay: an RGBA buffer that starts opaque and gets punctured.
// Visual: the gold card you rub away to see the joke underneath.

use crate::draw::{draw_text_centered, GLYPH_H};
use crate::types::{lerp_rgb, Rect};
use image::RgbaImage;

pub const GOLD: u32 = 0x00_FF_D7_00;
pub const CREAM: u32 = 0x00_FF_F8_DC;
pub const LABEL_COLOR: u32 = 0x00_8B_5C_F6;
pub const LABEL: &str = "Scratch here!";
/// 7 rows * 3 = 21 px glyphs, close to a 20px UI font.
const LABEL_SCALE: i32 = 3;
/// Subsamples per axis used to estimate how much of a pixel the brush covers.
const SUBSAMPLES: u32 = 4;

/// What the card needs from a drawable overlay.
/// Real windows and synthetic test buffers both implement this.
pub trait ScratchSurface {
    /// Repaint the full opaque cover.
    fn paint(&mut self);
    /// Erase a disc centered at surface-local (x, y).
    fn erase_disc(&mut self, x: f32, y: f32, radius: f32);
    /// Authoritative pixel buffer (alpha 0 = scratched through).
    fn buffer(&self) -> &RgbaImage;
}

/// Software overlay: gradient + centered label, erased with destination-out.
pub struct OverlaySurface {
    image: RgbaImage,
}

impl OverlaySurface {
    /// Create a surface; it stays fully transparent until `paint` is called.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }
}

impl ScratchSurface for OverlaySurface {
    fn paint(&mut self) {
        paint_overlay(&mut self.image);
    }

    fn erase_disc(&mut self, x: f32, y: f32, radius: f32) {
        erase_disc(&mut self.image, x, y, radius);
    }

    fn buffer(&self) -> &RgbaImage {
        &self.image
    }
}

/// Gold → cream → gold, left to right, then the prompt label in the middle.
/// Visual: the whole card turns opaque again, no matter how much was scratched.
pub fn paint_overlay(image: &mut RgbaImage) {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let span = (w.max(2) - 1) as f32;
    for x in 0..w {
        let t = x as f32 / span;
        let color = if t <= 0.5 {
            lerp_rgb(GOLD, CREAM, t * 2.0)
        } else {
            lerp_rgb(CREAM, GOLD, (t - 0.5) * 2.0)
        };
        let px = crate::types::rgba_from_u32(color);
        for y in 0..h {
            image.put_pixel(x, y, px);
        }
    }

    let bounds = Rect::new(0, 0, w as i32, h as i32);
    let cy = bounds.h / 2;
    // Keep the label inside short surfaces.
    let cy = cy.max(GLYPH_H * LABEL_SCALE / 2);
    draw_text_centered(image, bounds.w / 2, cy, LABEL, LABEL_COLOR, LABEL_SCALE);
}

/// Destination-out disc: each pixel keeps `1 - coverage` of its alpha.
/// Pixels fully inside the disc end up with alpha exactly 0; the rim is soft.
pub fn erase_disc(image: &mut RgbaImage, cx: f32, cy: f32, radius: f32) {
    if radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
        return;
    }
    let (w, h) = image.dimensions();
    let r2 = radius * radius;

    // Scan just the bounding box
    let x0 = (cx - radius).floor().max(0.0) as u32;
    let y0 = (cy - radius).floor().max(0.0) as u32;
    let x1 = ((cx + radius).ceil().max(0.0) as u32).min(w);
    let y1 = ((cy + radius).ceil().max(0.0) as u32).min(h);

    let total = SUBSAMPLES * SUBSAMPLES;
    for y in y0..y1 {
        for x in x0..x1 {
            let mut inside = 0u32;
            for sy in 0..SUBSAMPLES {
                for sx in 0..SUBSAMPLES {
                    let px = x as f32 + (sx as f32 + 0.5) / SUBSAMPLES as f32;
                    let py = y as f32 + (sy as f32 + 0.5) / SUBSAMPLES as f32;
                    let dx = px - cx;
                    let dy = py - cy;
                    if dx * dx + dy * dy <= r2 {
                        inside += 1;
                    }
                }
            }
            if inside == 0 {
                continue;
            }
            let pixel = image.get_pixel_mut(x, y);
            pixel[3] = if inside == total {
                0
            } else {
                let keep = (total - inside) as f32 / total as f32;
                (pixel[3] as f32 * keep).round() as u8
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(w: u32, h: u32) -> OverlaySurface {
        let mut s = OverlaySurface::new(w, h);
        s.paint();
        s
    }

    fn transparent(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p[3] == 0).count()
    }

    #[test]
    fn new_surface_is_transparent_until_painted() {
        let s = OverlaySurface::new(10, 10);
        assert_eq!(transparent(s.buffer()), 100);
    }

    #[test]
    fn paint_is_fully_opaque_with_gold_edges() {
        let s = painted(350, 200);
        assert!(s.buffer().pixels().all(|p| p[3] == 0xFF));
        assert_eq!(s.buffer().get_pixel(0, 0).0, [0xFF, 0xD7, 0x00, 0xFF]);
        assert_eq!(s.buffer().get_pixel(349, 0).0, [0xFF, 0xD7, 0x00, 0xFF]);
    }

    #[test]
    fn paint_draws_label_in_the_middle() {
        let s = painted(350, 200);
        let label = s
            .buffer()
            .pixels()
            .filter(|p| p.0 == [0x8B, 0x5C, 0xF6, 0xFF])
            .count();
        assert!(label > 0);
    }

    #[test]
    fn paint_restores_a_scratched_surface() {
        let mut s = painted(350, 200);
        s.erase_disc(100.0, 100.0, 20.0);
        assert!(transparent(s.buffer()) > 0);
        s.paint();
        assert_eq!(transparent(s.buffer()), 0);
    }

    #[test]
    fn centered_disc_clears_at_most_its_area() {
        let mut s = painted(350, 200);
        s.erase_disc(175.0, 100.0, 20.0);
        let cleared = transparent(s.buffer());
        let area = std::f32::consts::PI * 20.0 * 20.0;
        assert!(cleared > 1000);
        assert!((cleared as f32) <= area);
    }

    #[test]
    fn disc_rim_is_partially_transparent() {
        let mut s = painted(100, 100);
        s.erase_disc(50.0, 50.0, 20.0);
        let soft = s.buffer().pixels().filter(|p| p[3] > 0 && p[3] < 0xFF).count();
        assert!(soft > 0);
    }

    #[test]
    fn disc_at_corner_is_clipped() {
        let mut s = painted(50, 50);
        s.erase_disc(0.0, 0.0, 20.0);
        s.erase_disc(-100.0, -100.0, 20.0);
        s.erase_disc(500.0, 500.0, 20.0);
        let cleared = transparent(s.buffer());
        assert!(cleared > 0);
        assert!((cleared as f32) < std::f32::consts::PI * 400.0 / 4.0);
    }

    #[test]
    fn zero_sized_surface_is_harmless() {
        let mut s = OverlaySurface::new(0, 0);
        s.paint();
        s.erase_disc(0.0, 0.0, 20.0);
        assert_eq!(s.buffer().len(), 0);
    }
}
