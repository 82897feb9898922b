//! Store layer — the async boundary canvas sessions persist through.
//!
//! DESIGN
//! ======
//! `ArtifactStore` is the black box behind position saves and artifact
//! generation. Updates are plain last-write-wins: there are no version
//! stamps, so two saves completing out of order land in completion order
//! and the later one sticks. Callers that care can watch completion order
//! through the session's outcome channel; nothing here reorders or rejects.
//!
//! Two backends: `MemoryStore` (maps behind an async lock, the demo and
//! test workhorse) and `PgStore` (sqlx, embedded migrations).

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

pub mod memory;
pub mod postgres;

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::artifact::{Artifact, ArtifactId, ArtifactKind, ArtifactPatch};
use crate::team::{Project, ProjectId, Team, TeamId, TeamMember, TeamRole};

pub use memory::MemoryStore;
pub use postgres::PgStore;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    #[error("artifact not found: {0}")]
    ArtifactNotFound(ArtifactId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Backend-neutral async store for teams, projects, and artifacts.
/// Enables mocking in tests and swapping Postgres for memory in the demo.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Create a team.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `name` is empty.
    async fn create_team(&self, name: &str, description: Option<&str>)
        -> Result<Team, StoreError>;

    /// All teams in creation order.
    ///
    /// # Errors
    ///
    /// Returns `Database` if the backend fails.
    async fn teams(&self) -> Result<Vec<Team>, StoreError>;

    /// Add a member to an existing team.
    ///
    /// # Errors
    ///
    /// Returns `TeamNotFound` if the team doesn't exist, `InvalidInput` if
    /// the user name is empty or the email is structurally invalid.
    async fn add_team_member(
        &self,
        team_id: TeamId,
        user_name: &str,
        user_email: &str,
        role: TeamRole,
    ) -> Result<TeamMember, StoreError>;

    /// Create a project under a team. The team id is recorded but not
    /// verified; only the membership path checks team existence.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `name` is empty.
    async fn create_project(
        &self,
        team_id: TeamId,
        name: &str,
        description: Option<&str>,
        brief: Option<&str>,
    ) -> Result<Project, StoreError>;

    /// All projects under a team, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `Database` if the backend fails.
    async fn team_projects(&self, team_id: TeamId) -> Result<Vec<Project>, StoreError>;

    /// Replace a project's brief.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project doesn't exist.
    async fn update_project_brief(
        &self,
        project_id: ProjectId,
        brief: &str,
    ) -> Result<Project, StoreError>;

    /// Generate an artifact from a template kind and place it on the
    /// project's canvas. Title comes from the kind, content starts empty,
    /// status starts `Draft`, size starts 400x300. A missing position
    /// defaults to (0, 0); the session layer rolls a spawn position before
    /// calling, so the default only shows up for direct store callers.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project doesn't exist.
    async fn generate_artifact(
        &self,
        project_id: ProjectId,
        kind: ArtifactKind,
        x: Option<i32>,
        y: Option<i32>,
    ) -> Result<Artifact, StoreError>;

    /// Apply a sparse update and return the full updated record.
    /// Last-write-wins; `updated_at` is bumped.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactNotFound` if the artifact doesn't exist.
    async fn update_artifact(
        &self,
        id: ArtifactId,
        patch: ArtifactPatch,
    ) -> Result<Artifact, StoreError>;

    /// All artifacts on a project's canvas, in creation order. This is the
    /// hydration list a session loads at open.
    ///
    /// # Errors
    ///
    /// Returns `Database` if the backend fails.
    async fn project_artifacts(&self, project_id: ProjectId)
        -> Result<Vec<Artifact>, StoreError>;

    /// Save an artifact's final position after a drag. Just a position
    /// patch through [`ArtifactStore::update_artifact`]; named separately
    /// because it is the one operation the canvas fires on its own.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactNotFound` if the artifact doesn't exist.
    async fn persist_position(
        &self,
        id: ArtifactId,
        x: i32,
        y: i32,
    ) -> Result<(), StoreError> {
        self.update_artifact(id, ArtifactPatch::position(x, y))
            .await
            .map(|_| ())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Stands in for the original schema-level validator.
pub(crate) fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

