// Pointer and touch samples, and how they land on the scratch surface.

use crate::types::Rect;

/// One move sample, in window (viewport) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Mouse { x: f32, y: f32 },
    /// Active touch points; only the first one scratches.
    Touch { touches: Vec<(f32, f32)> },
}

impl PointerEvent {
    /// The viewport point this sample scratches at, if any.
    pub fn client_point(&self) -> Option<(f32, f32)> {
        match self {
            PointerEvent::Mouse { x, y } => Some((*x, *y)),
            PointerEvent::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Map a viewport point into surface pixels through the surface's on-screen rect.
/// A rect that is displayed larger or smaller than the buffer is scaled accordingly.
pub fn to_surface_local(point: (f32, f32), bounds: Rect, surface: (u32, u32)) -> (f32, f32) {
    let sx = if bounds.w > 0 { surface.0 as f32 / bounds.w as f32 } else { 1.0 };
    let sy = if bounds.h > 0 { surface.1 as f32 / bounds.h as f32 } else { 1.0 };
    ((point.0 - bounds.x as f32) * sx, (point.1 - bounds.y as f32) * sy)
}
