//! Team role models

use serde::{Deserialize, Serialize};

/// How a team or role is addressed in a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    #[default]
    Id,
    Name,
}

impl IdentifierType {
    /// Query-string value expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Id => "id",
            IdentifierType::Name => "name",
        }
    }
}

/// A single permission flag on a team role
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Right {
    /// Permission name, e.g. `edit-schedules`
    pub right: String,

    /// Whether the permission is granted
    #[serde(default)]
    pub granted: bool,
}

impl Right {
    pub fn new(right: impl Into<String>, granted: bool) -> Self {
        Self {
            right: right.into(),
            granted,
        }
    }
}

/// Team role as returned by the get endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRole {
    /// Role ID
    pub id: String,

    /// Role name
    pub name: String,

    /// Rights attached to the role
    #[serde(default)]
    pub rights: Vec<Right>,
}

/// Team role as returned by create, update and list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRoleSummary {
    /// Role ID
    pub id: String,

    /// Role name
    #[serde(default)]
    pub name: String,
}

/// Request to create a role under a team
#[derive(Debug, Clone)]
pub struct CreateTeamRoleRequest {
    pub team_identifier_type: IdentifierType,
    pub team_identifier_value: String,
    pub name: String,
    pub rights: Vec<Right>,
}

/// Request to fetch a single role.
///
/// The role is addressed by `role_id` when set, otherwise by `role_name`.
#[derive(Debug, Clone, Default)]
pub struct GetTeamRoleRequest {
    pub team_id: String,
    pub role_id: String,
    pub role_name: String,
}

/// Request to replace a role's name and rights
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamRoleRequest {
    pub team_id: String,
    pub role_id: String,
    pub role_name: String,
    pub rights: Vec<Right>,
}

/// Request to delete a role
#[derive(Debug, Clone, Default)]
pub struct DeleteTeamRoleRequest {
    pub team_id: String,
    pub role_id: String,
    pub role_name: String,
}

/// Request to list every role of a team
#[derive(Debug, Clone, Default)]
pub struct ListTeamRoleRequest {
    pub team_identifier_type: IdentifierType,
    pub team_identifier_value: String,
}

/// Pick the path segment and identifier type for a role.
///
/// Prefers the ID; falls back to the name when no ID is known.
pub fn role_identifier<'a>(role_id: &'a str, role_name: &'a str) -> (&'a str, IdentifierType) {
    if role_id.is_empty() {
        (role_name, IdentifierType::Name)
    } else {
        (role_id, IdentifierType::Id)
    }
}

/// Body sent on create and update
#[derive(Debug, Serialize)]
pub(crate) struct TeamRoleBody<'a> {
    pub name: &'a str,
    pub rights: &'a [Right],
}

/// Standard response envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Error body returned on non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
