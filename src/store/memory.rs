//! In-memory store backend.
//!
//! Maps behind one async lock, sequential ids per table. Backs the demo
//! when no database is configured and most of the async test surface.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::artifact::{Artifact, ArtifactId, ArtifactKind, ArtifactPatch, ArtifactStatus};
use crate::consts::{DEFAULT_CARD_HEIGHT, DEFAULT_CARD_WIDTH};
use crate::team::{Project, ProjectId, Team, TeamId, TeamMember, TeamRole};

use super::{ArtifactStore, StoreError, is_valid_email, now_ms};

#[derive(Default)]
struct Inner {
    teams: HashMap<TeamId, Team>,
    members: HashMap<i64, TeamMember>,
    projects: HashMap<ProjectId, Project>,
    artifacts: HashMap<ArtifactId, Artifact>,
    next_team_id: i64,
    next_member_id: i64,
    next_project_id: i64,
    next_artifact_id: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Store backend holding everything in process memory.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store. Ids start at 1 in each table.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner::default()) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn create_team(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Team, StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidInput("team name must not be empty".to_string()));
        }
        let mut inner = self.inner.write().await;
        let id = next(&mut inner.next_team_id);
        let now = now_ms();
        let team = Team {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        inner.teams.insert(id, team.clone());
        Ok(team)
    }

    async fn teams(&self) -> Result<Vec<Team>, StoreError> {
        let inner = self.inner.read().await;
        let mut teams: Vec<Team> = inner.teams.values().cloned().collect();
        teams.sort_by_key(|t| t.id);
        Ok(teams)
    }

    async fn add_team_member(
        &self,
        team_id: TeamId,
        user_name: &str,
        user_email: &str,
        role: TeamRole,
    ) -> Result<TeamMember, StoreError> {
        if user_name.is_empty() {
            return Err(StoreError::InvalidInput("user name must not be empty".to_string()));
        }
        if !is_valid_email(user_email) {
            return Err(StoreError::InvalidInput(format!("invalid email: {user_email}")));
        }
        let mut inner = self.inner.write().await;
        if !inner.teams.contains_key(&team_id) {
            return Err(StoreError::TeamNotFound(team_id));
        }
        let id = next(&mut inner.next_member_id);
        let member = TeamMember {
            id,
            team_id,
            user_name: user_name.to_string(),
            user_email: user_email.to_string(),
            role,
            joined_at: now_ms(),
        };
        inner.members.insert(id, member.clone());
        Ok(member)
    }

    async fn create_project(
        &self,
        team_id: TeamId,
        name: &str,
        description: Option<&str>,
        brief: Option<&str>,
    ) -> Result<Project, StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidInput("project name must not be empty".to_string()));
        }
        let mut inner = self.inner.write().await;
        let id = next(&mut inner.next_project_id);
        let now = now_ms();
        let project = Project {
            id,
            team_id,
            name: name.to_string(),
            description: description.map(str::to_string),
            brief: brief.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        inner.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn team_projects(&self, team_id: TeamId) -> Result<Vec<Project>, StoreError> {
        let inner = self.inner.read().await;
        let mut projects: Vec<Project> = inner
            .projects
            .values()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    async fn update_project_brief(
        &self,
        project_id: ProjectId,
        brief: &str,
    ) -> Result<Project, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(project) = inner.projects.get_mut(&project_id) else {
            return Err(StoreError::ProjectNotFound(project_id));
        };
        project.brief = Some(brief.to_string());
        project.updated_at = now_ms();
        Ok(project.clone())
    }

    async fn generate_artifact(
        &self,
        project_id: ProjectId,
        kind: ArtifactKind,
        x: Option<i32>,
        y: Option<i32>,
    ) -> Result<Artifact, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&project_id) {
            return Err(StoreError::ProjectNotFound(project_id));
        }
        let id = next(&mut inner.next_artifact_id);
        let now = now_ms();
        let artifact = Artifact {
            id,
            project_id,
            kind,
            title: kind.title().to_string(),
            content: String::new(),
            status: ArtifactStatus::Draft,
            x: x.unwrap_or(0),
            y: y.unwrap_or(0),
            width: DEFAULT_CARD_WIDTH,
            height: DEFAULT_CARD_HEIGHT,
            dependencies: None,
            metadata: None,
            created_at: now,
            updated_at: now,
        };
        inner.artifacts.insert(id, artifact.clone());
        Ok(artifact)
    }

    async fn update_artifact(
        &self,
        id: ArtifactId,
        patch: ArtifactPatch,
    ) -> Result<Artifact, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(artifact) = inner.artifacts.get_mut(&id) else {
            return Err(StoreError::ArtifactNotFound(id));
        };
        artifact.apply(&patch);
        artifact.updated_at = now_ms();
        Ok(artifact.clone())
    }

    async fn project_artifacts(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Artifact>, StoreError> {
        let inner = self.inner.read().await;
        let mut artifacts: Vec<Artifact> = inner
            .artifacts
            .values()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect();
        artifacts.sort_by_key(|a| a.id);
        Ok(artifacts)
    }
}
