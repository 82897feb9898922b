//! Postgres store backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses [`PgStore::connect`] to create the SQLx pool and enforce
//! schema migrations before any session opens. Queries are runtime-checked
//! `query_as` tuples; enum columns are text, parsed at this boundary.

#[cfg(test)]
#[path = "postgres_test.rs"]
mod postgres_test;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use crate::artifact::{Artifact, ArtifactId, ArtifactKind, ArtifactPatch, ArtifactStatus};
use crate::team::{Project, ProjectId, Team, TeamId, TeamMember, TeamRole};

use super::{ArtifactStore, StoreError, is_valid_email, now_ms};

use async_trait::async_trait;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

fn db_max_connections() -> u32 {
    match std::env::var("DB_MAX_CONNECTIONS") {
        Ok(raw) => raw.parse().unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
        Err(_) => DEFAULT_DB_MAX_CONNECTIONS,
    }
}

type ProjectRow = (i64, i64, String, Option<String>, Option<String>, i64, i64);
type ArtifactRow = (
    i64,
    i64,
    String,
    String,
    String,
    String,
    i32,
    i32,
    i32,
    i32,
    Option<Json<Vec<ArtifactId>>>,
    Option<serde_json::Value>,
    i64,
    i64,
);

const ARTIFACT_COLUMNS: &str = "id, project_id, kind, title, content, status, \
     x, y, width, height, dependencies, metadata, created_at, updated_at";

fn decode_error(msg: String) -> StoreError {
    StoreError::Database(sqlx::Error::Decode(msg.into()))
}

fn project_from_row(row: ProjectRow) -> Project {
    let (id, team_id, name, description, brief, created_at, updated_at) = row;
    Project { id, team_id, name, description, brief, created_at, updated_at }
}

fn artifact_from_row(row: ArtifactRow) -> Result<Artifact, StoreError> {
    let (
        id,
        project_id,
        kind,
        title,
        content,
        status,
        x,
        y,
        width,
        height,
        dependencies,
        metadata,
        created_at,
        updated_at,
    ) = row;
    let kind = ArtifactKind::parse(&kind)
        .ok_or_else(|| decode_error(format!("unknown artifact kind: {kind}")))?;
    let status = ArtifactStatus::parse(&status)
        .ok_or_else(|| decode_error(format!("unknown artifact status: {status}")))?;
    Ok(Artifact {
        id,
        project_id,
        kind,
        title,
        content,
        status,
        x,
        y,
        width,
        height,
        dependencies: dependencies.map(|json| json.0),
        metadata,
        created_at,
        updated_at,
    })
}

/// Store backend over a Postgres pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool. Migrations are the caller's concern.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to Postgres and run migrations. Pool size comes from
    /// `DB_MAX_CONNECTIONS` (default 5).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(db_max_connections())
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl ArtifactStore for PgStore {
    async fn create_team(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Team, StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidInput("team name must not be empty".to_string()));
        }
        let now = now_ms();
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO teams (name, description, created_at, updated_at)
             VALUES ($1, $2, $3, $3)
             RETURNING id",
        )
        .bind(name)
        .bind(description)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(Team {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: now,
            updated_at: now,
        })
    }

    async fn teams(&self) -> Result<Vec<Team>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String, Option<String>, i64, i64)>(
            "SELECT id, name, description, created_at, updated_at
             FROM teams
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, description, created_at, updated_at)| Team {
                id,
                name,
                description,
                created_at,
                updated_at,
            })
            .collect())
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
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teams WHERE id = $1)",
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;
        if !exists {
            return Err(StoreError::TeamNotFound(team_id));
        }
        let now = now_ms();
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO team_members (team_id, user_name, user_email, role, joined_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(team_id)
        .bind(user_name)
        .bind(user_email)
        .bind(role.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(TeamMember {
            id,
            team_id,
            user_name: user_name.to_string(),
            user_email: user_email.to_string(),
            role,
            joined_at: now,
        })
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
        let now = now_ms();
        // No team lookup here; the foreign key is the only guard.
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO projects (team_id, name, description, brief, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING id",
        )
        .bind(team_id)
        .bind(name)
        .bind(description)
        .bind(brief)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(Project {
            id,
            team_id,
            name: name.to_string(),
            description: description.map(str::to_string),
            brief: brief.map(str::to_string),
            created_at: now,
            updated_at: now,
        })
    }

    async fn team_projects(&self, team_id: TeamId) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, team_id, name, description, brief, created_at, updated_at
             FROM projects
             WHERE team_id = $1
             ORDER BY id",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(project_from_row).collect())
    }

    async fn update_project_brief(
        &self,
        project_id: ProjectId,
        brief: &str,
    ) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "UPDATE projects
             SET brief = $2, updated_at = $3
             WHERE id = $1
             RETURNING id, team_id, name, description, brief, created_at, updated_at",
        )
        .bind(project_id)
        .bind(brief)
        .bind(now_ms())
        .fetch_optional(&self.pool)
        .await?;
        row.map(project_from_row)
            .ok_or(StoreError::ProjectNotFound(project_id))
    }

    async fn generate_artifact(
        &self,
        project_id: ProjectId,
        kind: ArtifactKind,
        x: Option<i32>,
        y: Option<i32>,
    ) -> Result<Artifact, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        if !exists {
            return Err(StoreError::ProjectNotFound(project_id));
        }
        let row = sqlx::query_as::<_, ArtifactRow>(&format!(
            "INSERT INTO artifacts
                 (project_id, kind, title, content, status, x, y, created_at, updated_at)
             VALUES ($1, $2, $3, '', 'draft', $4, $5, $6, $6)
             RETURNING {ARTIFACT_COLUMNS}",
        ))
        .bind(project_id)
        .bind(kind.as_str())
        .bind(kind.title())
        .bind(x.unwrap_or(0))
        .bind(y.unwrap_or(0))
        .bind(now_ms())
        .fetch_one(&self.pool)
        .await?;
        artifact_from_row(row)
    }

    async fn update_artifact(
        &self,
        id: ArtifactId,
        patch: ArtifactPatch,
    ) -> Result<Artifact, StoreError> {
        let row = sqlx::query_as::<_, ArtifactRow>(&format!(
            "UPDATE artifacts SET
                 title = COALESCE($2, title),
                 content = COALESCE($3, content),
                 status = COALESCE($4, status),
                 x = COALESCE($5, x),
                 y = COALESCE($6, y),
                 width = COALESCE($7, width),
                 height = COALESCE($8, height),
                 updated_at = $9
             WHERE id = $1
             RETURNING {ARTIFACT_COLUMNS}",
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.status.map(ArtifactStatus::as_str))
        .bind(patch.x)
        .bind(patch.y)
        .bind(patch.width)
        .bind(patch.height)
        .bind(now_ms())
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => artifact_from_row(row),
            None => Err(StoreError::ArtifactNotFound(id)),
        }
    }

    async fn project_artifacts(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Artifact>, StoreError> {
        let rows = sqlx::query_as::<_, ArtifactRow>(&format!(
            "SELECT {ARTIFACT_COLUMNS}
             FROM artifacts
             WHERE project_id = $1
             ORDER BY id",
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(artifact_from_row).collect()
    }
}
