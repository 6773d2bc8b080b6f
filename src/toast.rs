// Transient notifications drawn at the bottom of the window.
// Visual: a red box with a title and a short message that disappears after a few seconds.

use crate::draw::{draw_text, fill_rect, stroke_rect, wrap_text, ADVANCE, LINE_H};
use crate::types::{FrameBuffer, Rect};

const TOAST_TTL: f32 = 4.0;
const MAX_VISIBLE: usize = 3;

const TOAST_BG: u32 = 0x00_DC_26_26;
const TOAST_FG: u32 = 0x00_FF_FF_FF;

/// Error-styled notification: red box, white text.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into() }
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

struct Live {
    toast: Toast,
    ttl: f32,
}

#[derive(Default)]
pub struct ToastStack {
    live: Vec<Live>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Age toasts and drop expired ones.
    pub fn update(&mut self, dt: f32) {
        for t in &mut self.live {
            t.ttl -= dt;
        }
        self.live.retain(|t| t.ttl > 0.0);
    }

    /// Newest toast at the bottom of `area`, older ones stacked above it.
    pub fn render(&self, fb: &mut FrameBuffer, area: Rect) {
        let pad = 6;
        let cols = ((area.w - 2 * pad) / ADVANCE).max(1) as usize;
        let mut bottom = area.y + area.h;
        for live in self.live.iter().rev().take(MAX_VISIBLE) {
            let lines = wrap_text(&live.toast.description, cols);
            let h = pad * 2 + LINE_H * (1 + lines.len() as i32);
            let rect = Rect::new(area.x, bottom - h, area.w, h);
            if rect.y < area.y {
                break;
            }
            let (bg, fg) = (TOAST_BG, TOAST_FG);
            fill_rect(fb, rect, bg);
            stroke_rect(fb, rect, 0x00_00_00_00);
            draw_text(fb, rect.x + pad, rect.y + pad, &live.toast.title, fg, 1);
            for (i, line) in lines.iter().enumerate() {
                draw_text(fb, rect.x + pad, rect.y + pad + LINE_H * (i as i32 + 1), line, fg, 1);
            }
            bottom = rect.y - 4;
        }
    }
}

impl Notifier for ToastStack {
    fn notify(&mut self, toast: Toast) {
        log::debug!("toast: {}: {}", toast.title, toast.description);
        self.live.push(Live { toast, ttl: TOAST_TTL });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_their_ttl() {
        let mut stack = ToastStack::new();
        stack.notify(Toast::destructive("Error", "boom"));
        stack.update(TOAST_TTL - 0.5);
        assert_eq!(stack.len(), 1);
        stack.update(1.0);
        assert!(stack.is_empty());
    }

    #[test]
    fn destructive_toast_renders_red() {
        let mut stack = ToastStack::new();
        stack.notify(Toast::destructive("Error", "Failed to fetch joke. Please try again."));
        let mut fb = FrameBuffer::new(400, 100);
        stack.render(&mut fb, Rect::new(10, 0, 380, 100));
        assert!(fb.pixels.iter().any(|&p| p == TOAST_BG));
    }

    #[test]
    fn render_skips_toasts_that_do_not_fit() {
        let mut stack = ToastStack::new();
        stack.notify(Toast::destructive("Error", "x"));
        let mut fb = FrameBuffer::new(100, 10);
        stack.render(&mut fb, Rect::new(0, 0, 100, 10));
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }
}
