//! Opsgenie API data models

mod team_role;

pub use team_role::{
    CreateTeamRoleRequest, DeleteTeamRoleRequest, GetTeamRoleRequest, IdentifierType,
    ListTeamRoleRequest, Right, TeamRole, TeamRoleSummary, UpdateTeamRoleRequest,
    role_identifier,
};
pub(crate) use team_role::{Envelope, ErrorBody, TeamRoleBody};
