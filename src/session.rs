//! Session layer: async host glue around [`CanvasController`].
//!
//! DESIGN
//! ======
//! The controller is synchronous and pure; this module owns everything that
//! touches a runtime. Render actions publish an owned snapshot through a
//! `watch` channel, position saves run as spawned fire-and-forget tasks
//! against the store, and every save reports a [`PersistOutcome`] on a
//! bounded `mpsc` channel tagged with a uuid correlation id.
//!
//! Saves are optimistic. A failed save is logged and reported but never
//! rolled back, and nothing serializes saves for the same artifact: two
//! rapid drags can land in the store in either order, and the later write
//! wins. The outcome channel lets a host observe that ordering; it does not
//! correct it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use rand::Rng;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::artifact::{Artifact, ArtifactId, ArtifactKind, ArtifactPatch};
use crate::consts::SPAWN_RANGE;
use crate::controller::{Action, CanvasController};
use crate::input::{DragState, DragTarget, PointerPos, WheelDelta};
use crate::store::{ArtifactStore, StoreError};
use crate::team::ProjectId;
use crate::viewport::Viewport;

const DEFAULT_SAVE_QUEUE_CAPACITY: usize = 64;

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or(default),
        Err(_) => default,
    }
}

/// Environment-derived session tuning.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Bound of the persistence outcome channel. `SAVE_QUEUE_CAPACITY`.
    pub save_queue_capacity: usize,
}

impl SessionConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            save_queue_capacity: env_parse("SAVE_QUEUE_CAPACITY", DEFAULT_SAVE_QUEUE_CAPACITY),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { save_queue_capacity: DEFAULT_SAVE_QUEUE_CAPACITY }
    }
}

/// Result of one fire-and-forget position save.
#[derive(Debug)]
pub struct PersistOutcome {
    /// Correlation id, also present in the save's log lines.
    pub request_id: Uuid,
    /// The artifact whose position was saved.
    pub artifact_id: ArtifactId,
    /// Canvas-space x the save carried.
    pub x: i32,
    /// Canvas-space y the save carried.
    pub y: i32,
    /// What the store said. An error means the local placement is ahead of
    /// the stored one until some later save lands.
    pub result: Result<(), StoreError>,
}

/// Snapshot receiver handed to the renderer side.
pub type SnapshotRx = watch::Receiver<Vec<Artifact>>;
/// Outcome receiver handed to whatever audits persistence.
pub type OutcomeRx = mpsc::Receiver<PersistOutcome>;

/// One open canvas over one project.
pub struct CanvasSession {
    project_id: ProjectId,
    controller: CanvasController,
    store: Arc<dyn ArtifactStore>,
    snapshot_tx: watch::Sender<Vec<Artifact>>,
    outcome_tx: mpsc::Sender<PersistOutcome>,
}

impl CanvasSession {
    /// Open a session on a project, hydrating the canvas from the store.
    ///
    /// # Errors
    ///
    /// Returns the store's failure if the artifact list cannot be loaded.
    pub async fn open(
        store: Arc<dyn ArtifactStore>,
        project_id: ProjectId,
    ) -> Result<(Self, SnapshotRx, OutcomeRx), StoreError> {
        let artifacts = store.project_artifacts(project_id).await?;
        Ok(Self::with_artifacts(store, project_id, artifacts))
    }

    /// Open a session over an already-loaded artifact list.
    #[must_use]
    pub fn with_artifacts(
        store: Arc<dyn ArtifactStore>,
        project_id: ProjectId,
        artifacts: Vec<Artifact>,
    ) -> (Self, SnapshotRx, OutcomeRx) {
        Self::with_config(store, project_id, artifacts, SessionConfig::from_env())
    }

    /// Full constructor with explicit tuning.
    #[must_use]
    pub fn with_config(
        store: Arc<dyn ArtifactStore>,
        project_id: ProjectId,
        artifacts: Vec<Artifact>,
        config: SessionConfig,
    ) -> (Self, SnapshotRx, OutcomeRx) {
        let controller = CanvasController::new(artifacts);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let (outcome_tx, outcome_rx) = mpsc::channel(config.save_queue_capacity.max(1));
        let session = Self { project_id, controller, store, snapshot_tx, outcome_tx };
        (session, snapshot_rx, outcome_rx)
    }

    // --- Pointer events ---

    /// Pointer pressed on the canvas background or an artifact card.
    pub fn pointer_down(&mut self, target: DragTarget, at: PointerPos) {
        let action = self.controller.pointer_down(target, at);
        self.handle(action);
    }

    /// Pointer sample during an active drag.
    pub fn pointer_move(&mut self, at: PointerPos) {
        let action = self.controller.pointer_move(at);
        self.handle(action);
    }

    /// Pointer released. Ending an artifact move fires its position save.
    pub fn pointer_up(&mut self) {
        let action = self.controller.pointer_up();
        self.handle(action);
    }

    /// One wheel notch of zoom at the given pointer position.
    pub fn wheel(&mut self, delta: WheelDelta, at: PointerPos) {
        let action = self.controller.wheel(delta, at);
        self.handle(action);
    }

    /// Snap back to the home view.
    pub fn reset_view(&mut self) {
        let action = self.controller.reset_view();
        self.handle(action);
    }

    // --- Artifact lifecycle ---

    /// Generate a fresh artifact card for this project at a random spawn
    /// position, insert it locally, and publish.
    ///
    /// # Errors
    ///
    /// Returns the store's failure unchanged; nothing is inserted locally.
    pub async fn generate_artifact(&mut self, kind: ArtifactKind) -> Result<Artifact, StoreError> {
        let mut rng = rand::rng();
        let x = rng.random_range(0..SPAWN_RANGE);
        let y = rng.random_range(0..SPAWN_RANGE);
        let artifact = self
            .store
            .generate_artifact(self.project_id, kind, Some(x), Some(y))
            .await?;
        debug!(artifact = artifact.id, kind = kind.as_str(), x, y, "artifact generated");
        self.controller.insert_artifact(artifact.clone());
        self.publish();
        Ok(artifact)
    }

    /// Update an artifact through the store and reconcile the local copy
    /// from the authoritative response.
    ///
    /// # Errors
    ///
    /// Returns the store's failure unchanged; the local copy is untouched.
    pub async fn update_artifact(
        &mut self,
        id: ArtifactId,
        patch: ArtifactPatch,
    ) -> Result<Artifact, StoreError> {
        let updated = self.store.update_artifact(id, patch).await?;
        self.controller.insert_artifact(updated.clone());
        self.publish();
        Ok(updated)
    }

    /// Drop an artifact from the local canvas. Deletion is owned by external
    /// collaborators; the store is not consulted.
    pub fn remove_artifact(&mut self, id: ArtifactId) -> Option<Artifact> {
        let removed = self.controller.remove_artifact(id)?;
        self.publish();
        Some(removed)
    }

    // --- Queries ---

    /// The project this session is open on.
    #[must_use]
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// The current viewport transform.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.controller.viewport()
    }

    /// The current drag session state.
    #[must_use]
    pub fn drag(&self) -> DragState {
        self.controller.drag()
    }

    /// Look up an artifact by id.
    #[must_use]
    pub fn artifact(&self, id: ArtifactId) -> Option<&Artifact> {
        self.controller.artifact(id)
    }

    /// Owned, sorted copy of the current artifact list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Artifact> {
        self.controller.snapshot()
    }

    // --- Internals ---

    fn handle(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Render => self.publish(),
            Action::PersistPosition { id, x, y } => self.spawn_save(id, x, y),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.controller.snapshot());
    }

    fn spawn_save(&self, id: ArtifactId, x: i32, y: i32) {
        let request_id = Uuid::new_v4();
        let store = Arc::clone(&self.store);
        let outcomes = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = store.persist_position(id, x, y).await;
            match &result {
                Ok(()) => debug!(%request_id, artifact = id, x, y, "position saved"),
                Err(error) => warn!(
                    %request_id,
                    artifact = id,
                    x,
                    y,
                    %error,
                    "position save failed, keeping optimistic placement"
                ),
            }
            let outcome = PersistOutcome { request_id, artifact_id: id, x, y, result };
            if outcomes.send(outcome).await.is_err() {
                debug!(%request_id, "persist outcome receiver gone");
            }
        });
    }
}
