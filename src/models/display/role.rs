//! Team role display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Right, TeamRole, TeamRoleSummary};
use crate::resource::RoleState;

/// One row per role, as listed from a team
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RoleDisplay {
    #[tabled(rename = "ROLE ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<TeamRoleSummary> for RoleDisplay {
    fn from(role: TeamRoleSummary) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

/// One row per right of a single role
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RightDisplay {
    #[tabled(rename = "RIGHT")]
    pub right: String,

    #[tabled(rename = "GRANTED")]
    pub granted: bool,
}

impl From<Right> for RightDisplay {
    fn from(right: Right) -> Self {
        Self {
            right: right.right,
            granted: right.granted,
        }
    }
}

/// Rights of a fetched role, in display order
pub fn role_rights(role: &TeamRole) -> Vec<RightDisplay> {
    let mut rights: Vec<RightDisplay> = role.rights.iter().cloned().map(Into::into).collect();
    rights.sort_by(|a, b| a.right.cmp(&b.right));
    rights
}

/// One row per tracked resource in the state file
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TrackedRoleDisplay {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "ROLE ID")]
    pub id: String,

    #[tabled(rename = "TEAM ID")]
    pub team_id: String,

    #[tabled(rename = "NAME")]
    pub role_name: String,

    #[tabled(rename = "GRANTED")]
    pub granted: usize,

    #[tabled(rename = "DENIED")]
    pub denied: usize,
}

impl TrackedRoleDisplay {
    pub fn new(address: &str, state: &RoleState) -> Self {
        let granted = state.rights.iter().filter(|r| r.granted).count();
        Self {
            address: address.to_string(),
            id: state.id.clone(),
            team_id: state.team_id.clone(),
            role_name: state.role_name.clone(),
            granted,
            denied: state.rights.len() - granted,
        }
    }
}
