//! Team model: teams, their members, and the projects they own.
//!
//! These records mirror the store's tables. A project is the unit a canvas
//! session opens; its artifacts live in [`crate::artifact`].

#[cfg(test)]
#[path = "team_test.rs"]
mod team_test;

use serde::{Deserialize, Serialize};

/// Unique identifier for a team. Sequential, assigned by the store.
pub type TeamId = i64;

/// Unique identifier for a project. Sequential, assigned by the store.
pub type ProjectId = i64;

/// A member's role within a team. Recorded but not enforced anywhere;
/// access control is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Created the team.
    Owner,
    /// Can manage members.
    Admin,
    /// Regular contributor.
    #[default]
    Member,
    /// Read-only access.
    Viewer,
}

impl TeamRole {
    /// Stable snake_case form, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }

    /// Parse the snake_case form back into a role.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

/// A team owning projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier for this team.
    pub id: TeamId,
    /// Display name. Never empty.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Creation time, unix milliseconds.
    pub created_at: i64,
    /// Last update time, unix milliseconds.
    pub updated_at: i64,
}

/// One person's membership in a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique identifier for this membership row.
    pub id: i64,
    /// The team joined.
    pub team_id: TeamId,
    /// Member's display name. Never empty.
    pub user_name: String,
    /// Member's email address.
    pub user_email: String,
    /// Role within the team.
    pub role: TeamRole,
    /// Join time, unix milliseconds.
    pub joined_at: i64,
}

/// A project under a team. Opening a canvas session targets one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for this project.
    pub id: ProjectId,
    /// The owning team.
    pub team_id: TeamId,
    /// Display name. Never empty.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// The brief artifacts are generated against, once written.
    pub brief: Option<String>,
    /// Creation time, unix milliseconds.
    pub created_at: i64,
    /// Last update time, unix milliseconds.
    pub updated_at: i64,
}
