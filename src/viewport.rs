#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport transform for pan/zoom on the infinite canvas.
///
/// `offset_x` / `offset_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom), clamped to
/// [`MIN_ZOOM`, `MAX_ZOOM`] by every mutation.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, zoom: 1.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point (device pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.zoom,
            y: (screen.y - self.offset_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen coordinates (device pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.offset_x,
            y: canvas.y * self.zoom + self.offset_y,
        }
    }

    /// Apply one discrete wheel notch to the zoom factor.
    ///
    /// A positive `delta_y` (wheel toward the user) zooms out by
    /// [`ZOOM_STEP`]; zero or negative zooms in. The result clamps to
    /// [`MIN_ZOOM`, `MAX_ZOOM`]. The offset is left alone, so zoom is
    /// anchored at the canvas origin rather than the pointer.
    ///
    /// Returns `true` if the zoom factor actually changed.
    pub fn apply_wheel(&mut self, delta_y: f64) -> bool {
        let step = if delta_y > 0.0 { -ZOOM_STEP } else { ZOOM_STEP };
        let next = (self.zoom + step).clamp(MIN_ZOOM, MAX_ZOOM);
        let changed = (next - self.zoom).abs() > f64::EPSILON;
        self.zoom = next;
        changed
    }

    /// Restore the home view: offset (0, 0), zoom 1.0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
