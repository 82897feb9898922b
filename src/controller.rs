//! Canvas state controller: one value owning placement, transform, and the
//! drag session, driven by plain method calls and returning [`Action`]s for
//! the host to process. No rendering dependencies, so the full event surface
//! is testable headless.

use tracing::{debug, trace};

use crate::artifact::{Artifact, ArtifactId, ArtifactPatch, ArtifactSet};
use crate::input::{DragState, DragTarget, PointerPos, WheelDelta};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing changed.
    None,
    /// Placement or transform changed; redraw.
    Render,
    /// An artifact move finished at (x, y); save it. Fire-and-forget: the
    /// local position above is already final regardless of the save's fate.
    PersistPosition { id: ArtifactId, x: i32, y: i32 },
}

/// Core canvas state for one open project.
pub struct CanvasController {
    artifacts: ArtifactSet,
    viewport: Viewport,
    drag: DragState,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CanvasController {
    /// Build a controller over a starting artifact list.
    #[must_use]
    pub fn new(initial: Vec<Artifact>) -> Self {
        let mut artifacts = ArtifactSet::new();
        for artifact in initial {
            artifacts.insert(artifact);
        }
        Self { artifacts, viewport: Viewport::default(), drag: DragState::Idle }
    }

    // --- Pointer events ---

    /// Begin a drag session. Ignored if a session is already active or the
    /// target artifact is unknown (hit-testing is the renderer's job; a
    /// stale id is not an error here).
    pub fn pointer_down(&mut self, target: DragTarget, at: PointerPos) -> Action {
        if !self.drag.is_idle() {
            trace!(?target, "pointer down ignored, session active");
            return Action::None;
        }
        match target {
            DragTarget::Canvas => {
                self.drag = DragState::Panning {
                    anchor: at,
                    origin_x: self.viewport.offset_x,
                    origin_y: self.viewport.offset_y,
                };
            }
            DragTarget::Artifact(id) => {
                let Some(artifact) = self.artifacts.get(id) else {
                    trace!(artifact = id, "pointer down on unknown artifact");
                    return Action::None;
                };
                self.drag = DragState::Moving {
                    id,
                    last: at,
                    origin_x: artifact.x,
                    origin_y: artifact.y,
                };
            }
        }
        Action::None
    }

    /// Feed one pointer sample into the active session.
    ///
    /// A pan recomputes the offset from the fixed anchor; an artifact move
    /// advances by the delta from the previous sample. Move deltas are raw
    /// screen pixels, not divided by zoom, so a zoomed-out canvas sees the
    /// card travel faster than the pointer.
    pub fn pointer_move(&mut self, at: PointerPos) -> Action {
        match self.drag {
            DragState::Idle => Action::None,
            DragState::Panning { anchor, origin_x, origin_y } => {
                self.viewport.offset_x = origin_x + f64::from(at.x - anchor.x);
                self.viewport.offset_y = origin_y + f64::from(at.y - anchor.y);
                Action::Render
            }
            DragState::Moving { id, last, origin_x, origin_y } => {
                if !self.artifacts.translate(id, at.x - last.x, at.y - last.y) {
                    self.drag.reset();
                    return Action::None;
                }
                self.drag = DragState::Moving { id, last: at, origin_x, origin_y };
                Action::Render
            }
        }
    }

    /// End the active session. The session record is cleared before anything
    /// else happens, so a failed lookup still leaves the controller idle.
    /// Ending an artifact move yields the position save to fire; ending a
    /// pan persists nothing (the viewport is local-only state).
    pub fn pointer_up(&mut self) -> Action {
        let ended = self.drag;
        self.drag.reset();
        match ended {
            DragState::Idle | DragState::Panning { .. } => Action::None,
            DragState::Moving { id, origin_x, origin_y, .. } => {
                let Some(artifact) = self.artifacts.get(id) else {
                    return Action::None;
                };
                debug!(
                    artifact = id,
                    from_x = origin_x,
                    from_y = origin_y,
                    to_x = artifact.x,
                    to_y = artifact.y,
                    "drag finished"
                );
                Action::PersistPosition { id, x: artifact.x, y: artifact.y }
            }
        }
    }

    /// Apply one wheel notch of zoom. `at` is the pointer position, carried
    /// as a pivot hint but not used: zoom stays anchored at the canvas
    /// origin, so content drifts relative to the pointer.
    pub fn wheel(&mut self, delta: WheelDelta, at: PointerPos) -> Action {
        trace!(dy = delta.dy, pivot_x = at.x, pivot_y = at.y, "wheel");
        if self.viewport.apply_wheel(delta.dy) {
            Action::Render
        } else {
            Action::None
        }
    }

    /// Snap back to the home view. Never touches artifact placement and
    /// leaves any active drag session running.
    pub fn reset_view(&mut self) -> Action {
        self.viewport.reset();
        Action::Render
    }

    // --- Data inputs ---

    /// Hydrate the canvas from a store snapshot. A move session whose
    /// artifact did not survive the reload is cleared.
    pub fn load_snapshot(&mut self, artifacts: Vec<Artifact>) {
        self.artifacts.load_snapshot(artifacts);
        if let Some(id) = self.drag.moving_artifact() {
            if !self.artifacts.contains(id) {
                self.drag.reset();
            }
        }
    }

    /// Place a newly generated artifact on the canvas.
    pub fn insert_artifact(&mut self, artifact: Artifact) {
        self.artifacts.insert(artifact);
    }

    /// Drop an artifact, e.g. when a collaborator destroys it. A move
    /// session targeting it dies with it.
    pub fn remove_artifact(&mut self, id: ArtifactId) -> Option<Artifact> {
        if self.drag.moving_artifact() == Some(id) {
            self.drag.reset();
        }
        self.artifacts.remove(id)
    }

    /// Apply a sparse update to one artifact. Returns false if unknown.
    pub fn apply_patch(&mut self, id: ArtifactId, patch: &ArtifactPatch) -> bool {
        self.artifacts.apply_patch(id, patch)
    }

    // --- Queries ---

    /// The current viewport transform.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The current drag session state.
    #[must_use]
    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Look up an artifact by id.
    #[must_use]
    pub fn artifact(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.get(id)
    }

    /// The live artifact collection.
    #[must_use]
    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Owned, sorted copy of the artifact list for publication.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Artifact> {
        self.artifacts.snapshot()
    }
}
