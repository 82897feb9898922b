//! Artifact model: templated project documents placed on the canvas.
//!
//! This module defines the document record itself (`Artifact`, `ArtifactKind`,
//! `ArtifactStatus`), a sparse-update type for incremental edits
//! (`ArtifactPatch`), and the collection the controller owns at runtime
//! (`ArtifactSet`).
//!
//! Data flows into this layer from the store (hydration and authoritative
//! update responses) and from the controller (drag mutations). A renderer
//! reads the set via `sorted` to determine draw order, clamping card sizes
//! with `display_width` / `display_height`.

#[cfg(test)]
#[path = "artifact_test.rs"]
mod artifact_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_CARD_HEIGHT, MIN_CARD_WIDTH};
use crate::team::ProjectId;

/// Unique identifier for an artifact. Sequential, assigned by the store.
pub type ArtifactId = i64;

/// The template a document artifact was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// High-level goals and scope statement.
    ProjectBrief,
    /// Product requirements document.
    Prd,
    /// Task workflow board.
    KanbanBoard,
    /// One-page business model canvas.
    LeanCanvas,
    /// Visual/interaction design architecture.
    DesignArchitecture,
    /// Technical system architecture.
    SystemArchitecture,
    /// Interface specification.
    UiUxSpec,
    /// End-to-end user journey maps.
    UserFlows,
    /// Component and style reference.
    DesignSystem,
}

impl ArtifactKind {
    /// Every kind, in template-catalog order.
    pub const ALL: [Self; 9] = [
        Self::ProjectBrief,
        Self::Prd,
        Self::KanbanBoard,
        Self::LeanCanvas,
        Self::DesignArchitecture,
        Self::SystemArchitecture,
        Self::UiUxSpec,
        Self::UserFlows,
        Self::DesignSystem,
    ];

    /// Stable snake_case form, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectBrief => "project_brief",
            Self::Prd => "prd",
            Self::KanbanBoard => "kanban_board",
            Self::LeanCanvas => "lean_canvas",
            Self::DesignArchitecture => "design_architecture",
            Self::SystemArchitecture => "system_architecture",
            Self::UiUxSpec => "ui_ux_spec",
            Self::UserFlows => "user_flows",
            Self::DesignSystem => "design_system",
        }
    }

    /// Parse the snake_case form back into a kind.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Display title given to a freshly generated artifact of this kind.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::ProjectBrief => "Project Brief",
            Self::Prd => "Product Requirements Document",
            Self::KanbanBoard => "Kanban Board",
            Self::LeanCanvas => "Lean Canvas",
            Self::DesignArchitecture => "Design Architecture",
            Self::SystemArchitecture => "System Architecture",
            Self::UiUxSpec => "UI/UX Specification",
            Self::UserFlows => "User Flows",
            Self::DesignSystem => "Design System",
        }
    }
}

/// Review lifecycle of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactStatus {
    /// Freshly generated, not yet worked on.
    #[default]
    Draft,
    /// Actively being edited.
    InProgress,
    /// Finished by its author.
    Completed,
    /// Signed off by a reviewer.
    Reviewed,
}

impl ArtifactStatus {
    /// Stable snake_case form, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Reviewed => "reviewed",
        }
    }

    /// Parse the snake_case form back into a status.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "reviewed" => Some(Self::Reviewed),
            _ => None,
        }
    }
}

/// A document artifact as stored and as placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique identifier for this artifact.
    pub id: ArtifactId,
    /// The project this artifact belongs to.
    pub project_id: ProjectId,
    /// Template the artifact was generated from.
    pub kind: ArtifactKind,
    /// Display title shown on the card header.
    pub title: String,
    /// Document body. Starts empty at generation time.
    pub content: String,
    /// Review lifecycle state.
    pub status: ArtifactStatus,
    /// Left edge of the card in canvas coordinates.
    pub x: i32,
    /// Top edge of the card in canvas coordinates.
    pub y: i32,
    /// Stored card width in canvas pixels.
    pub width: i32,
    /// Stored card height in canvas pixels.
    pub height: i32,
    /// Ids of artifacts this one builds on. Written by no operation here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<ArtifactId>>,
    /// Open-ended annotations. Written by no operation here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Creation time, unix milliseconds.
    pub created_at: i64,
    /// Last update time, unix milliseconds.
    pub updated_at: i64,
}

impl Artifact {
    /// Width a renderer should draw this card at. The stored width is kept
    /// as-is; only the drawn size is clamped.
    #[must_use]
    pub fn display_width(&self) -> i32 {
        self.width.max(MIN_CARD_WIDTH)
    }

    /// Height a renderer should draw this card at.
    #[must_use]
    pub fn display_height(&self) -> i32 {
        self.height.max(MIN_CARD_HEIGHT)
    }

    /// Apply a sparse update in place. Timestamps are the caller's concern.
    pub fn apply(&mut self, patch: &ArtifactPatch) {
        if let Some(ref title) = patch.title {
            self.title.clone_from(title);
        }
        if let Some(ref content) = patch.content {
            self.content.clone_from(content);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
    }
}

/// Sparse update for an artifact. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPatch {
    /// New title, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New document body, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New lifecycle status, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArtifactStatus>,
    /// New left edge, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// New top edge, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    /// New stored width, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    /// New stored height, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
}

impl ArtifactPatch {
    /// The two-field patch an end-of-drag position save carries.
    #[must_use]
    pub fn position(x: i32, y: i32) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }
}

/// In-memory collection of the artifacts placed on one project's canvas.
pub struct ArtifactSet {
    artifacts: HashMap<ArtifactId, Artifact>,
}

impl ArtifactSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { artifacts: HashMap::new() }
    }

    /// Insert or replace an artifact. An existing artifact with the same
    /// `id` is overwritten (authoritative store responses land this way).
    pub fn insert(&mut self, artifact: Artifact) {
        self.artifacts.insert(artifact.id, artifact);
    }

    /// Remove an artifact by id, returning it if it was present.
    pub fn remove(&mut self, id: ArtifactId) -> Option<Artifact> {
        self.artifacts.remove(&id)
    }

    /// Return a reference to an artifact by id.
    #[must_use]
    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.get(&id)
    }

    /// Whether an artifact with this id is present.
    #[must_use]
    pub fn contains(&self, id: ArtifactId) -> bool {
        self.artifacts.contains_key(&id)
    }

    /// Shift an artifact's position by a pixel delta. Returns false if the
    /// artifact doesn't exist.
    pub fn translate(&mut self, id: ArtifactId, dx: i32, dy: i32) -> bool {
        let Some(artifact) = self.artifacts.get_mut(&id) else {
            return false;
        };
        artifact.x += dx;
        artifact.y += dy;
        true
    }

    /// Apply a sparse update to an existing artifact. Returns false if the
    /// artifact doesn't exist.
    pub fn apply_patch(&mut self, id: ArtifactId, patch: &ArtifactPatch) -> bool {
        let Some(artifact) = self.artifacts.get_mut(&id) else {
            return false;
        };
        artifact.apply(patch);
        true
    }

    /// Replace all artifacts with a full snapshot.
    pub fn load_snapshot(&mut self, artifacts: Vec<Artifact>) {
        self.artifacts.clear();
        for artifact in artifacts {
            self.artifacts.insert(artifact.id, artifact);
        }
    }

    /// Return all artifacts sorted by id, i.e. creation order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Artifact> {
        let mut artifacts: Vec<&Artifact> = self.artifacts.values().collect();
        artifacts.sort_by_key(|a| a.id);
        artifacts
    }

    /// Owned copy of the sorted artifact list, for publication to renderers.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Artifact> {
        self.sorted().into_iter().cloned().collect()
    }

    /// Number of artifacts currently in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns `true` if the set contains no artifacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl Default for ArtifactSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Create a dummy `Artifact` with the given id at (0, 0).
    #[must_use]
    pub fn dummy_artifact(id: ArtifactId) -> Artifact {
        Artifact {
            id,
            project_id: 1,
            kind: ArtifactKind::ProjectBrief,
            title: ArtifactKind::ProjectBrief.title().to_string(),
            content: String::new(),
            status: ArtifactStatus::Draft,
            x: 0,
            y: 0,
            width: 400,
            height: 300,
            dependencies: None,
            metadata: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Create a dummy `Artifact` with an explicit position.
    #[must_use]
    pub fn dummy_artifact_at(id: ArtifactId, x: i32, y: i32) -> Artifact {
        let mut artifact = dummy_artifact(id);
        artifact.x = x;
        artifact.y = y;
        artifact
    }
}
