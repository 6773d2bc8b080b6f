// How much of the overlay is gone, and whether that is enough to call it revealed.

use image::RgbaImage;

pub const DEFAULT_THRESHOLD: f32 = 50.0;

/// Percentage [0,100] of pixels whose alpha is exactly 0.
/// Full scan every time; the buffer is the only source of truth.
pub fn scratched_percent(buffer: &RgbaImage) -> f32 {
    let total = buffer.width() as usize * buffer.height() as usize;
    if total == 0 {
        return 0.0;
    }
    let cleared = buffer.pixels().filter(|p| p[3] == 0).count();
    cleared as f32 / total as f32 * 100.0
}

/// One-way latch for a single round.
#[derive(Debug, Clone, Copy)]
pub struct RevealDetector {
    threshold: f32,
    revealed: bool,
}

impl RevealDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold, revealed: false }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Feed a fresh percentage. Returns true only on the sample that crosses the
    /// threshold; every later sample returns false until `rearm`.
    pub fn observe(&mut self, percent: f32) -> bool {
        if self.revealed || percent <= self.threshold {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn rearm(&mut self) {
        self.revealed = false;
    }
}

impl Default for RevealDetector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn opaque(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([0xFF, 0xD7, 0x00, 0xFF]))
    }

    fn clear_first(img: &mut RgbaImage, n: usize) {
        for p in img.pixels_mut().take(n) {
            p[3] = 0;
        }
    }

    #[test]
    fn opaque_buffer_is_zero_percent() {
        assert_eq!(scratched_percent(&opaque(350, 200)), 0.0);
    }

    #[test]
    fn empty_buffer_is_zero_percent() {
        assert_eq!(scratched_percent(&RgbaImage::new(0, 0)), 0.0);
    }

    #[test]
    fn partially_transparent_pixels_do_not_count() {
        let mut img = opaque(10, 10);
        for p in img.pixels_mut() {
            p[3] = 1;
        }
        assert_eq!(scratched_percent(&img), 0.0);
    }

    #[test]
    fn just_over_half_is_above_threshold() {
        let mut img = opaque(350, 200);
        clear_first(&mut img, 35_001);
        let pct = scratched_percent(&img);
        assert!(pct > 50.0, "{pct}");

        let mut det = RevealDetector::default();
        assert!(det.observe(pct));
    }

    #[test]
    fn exactly_half_does_not_reveal() {
        let mut img = opaque(350, 200);
        clear_first(&mut img, 35_000);
        let pct = scratched_percent(&img);
        assert_eq!(pct, 50.0);
        assert!(!RevealDetector::default().observe(pct));
    }

    #[test]
    fn latch_fires_once_until_rearmed() {
        let mut det = RevealDetector::new(50.0);
        assert!(!det.observe(10.0));
        assert!(det.observe(60.0));
        assert!(!det.observe(70.0));
        assert!(!det.observe(100.0));
        assert!(det.is_revealed());

        det.rearm();
        assert!(!det.is_revealed());
        assert!(det.observe(51.0));
    }
}
