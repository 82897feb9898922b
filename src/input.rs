//! Input model: pointer samples, wheel deltas, and the drag session machine.
//!
//! `DragState` is the single gesture being tracked between pointer-down and
//! pointer-up, carrying all context needed to compute deltas and emit a final
//! persistence request on release. At most one session exists at a time; a
//! pointer-down while a session is active is ignored.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::artifact::ArtifactId;

/// A pointer sample in screen pixels.
///
/// Pointer hardware reports integer device pixels, and artifact placement is
/// integral, so drag deltas telescope exactly with no float drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPos {
    pub x: i32,
    pub y: i32,
}

impl PointerPos {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Raw wheel deltas from a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// What a pointer-down landed on, as reported by the renderer's hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Empty canvas: the gesture pans the viewport.
    Canvas,
    /// An artifact card: the gesture moves that artifact.
    Artifact(ArtifactId),
}

/// The active drag session, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Panning the viewport by dragging empty canvas.
    ///
    /// The anchor never moves during the pan: every sample recomputes the
    /// offset from scratch as `origin + (sample - anchor)`, so a dropped
    /// sample cannot skew the result.
    Panning {
        /// Pointer position at pointer-down.
        anchor: PointerPos,
        /// Viewport offset x at pointer-down.
        origin_x: f64,
        /// Viewport offset y at pointer-down.
        origin_y: f64,
    },
    /// Moving one artifact across the canvas.
    ///
    /// Advances incrementally: each sample applies `sample - last` to the
    /// artifact and then becomes the new `last`. With no dropped samples the
    /// deltas telescope to `final - first`.
    Moving {
        /// Artifact being moved.
        id: ArtifactId,
        /// Pointer position at the previous sample.
        last: PointerPos,
        /// Artifact x at the start of the drag.
        origin_x: i32,
        /// Artifact y at the start of the drag.
        origin_y: i32,
    },
}

impl DragState {
    /// Whether no session is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a pan session is active.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    /// Whether an artifact-move session is active.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Moving { .. })
    }

    /// The artifact a move session is targeting, if any.
    #[must_use]
    pub fn moving_artifact(&self) -> Option<ArtifactId> {
        match self {
            Self::Moving { id, .. } => Some(*id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }

    /// Clear the session unconditionally.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
