//! The fixed allow-list of team role rights

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A permission that can be granted or denied on a team role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeamRight {
    ManageMembers,
    EditTeamRoles,
    DeleteTeamRoles,
    AccessMemberProfiles,
    EditMemberProfiles,
    EditRoutingRules,
    DeleteRoutingRules,
    EditEscalations,
    DeleteEscalations,
    EditSchedules,
    DeleteSchedules,
    EditIntegrations,
    DeleteIntegrations,
    EditHeartbeats,
    DeleteHeartbeats,
    AccessReports,
    EditServices,
    DeleteServices,
    EditRooms,
    DeleteRooms,
    SendServiceStatusUpdate,
}

impl TeamRight {
    /// Every right, in the order the API documents them
    pub const ALL: [TeamRight; 21] = [
        TeamRight::ManageMembers,
        TeamRight::EditTeamRoles,
        TeamRight::DeleteTeamRoles,
        TeamRight::AccessMemberProfiles,
        TeamRight::EditMemberProfiles,
        TeamRight::EditRoutingRules,
        TeamRight::DeleteRoutingRules,
        TeamRight::EditEscalations,
        TeamRight::DeleteEscalations,
        TeamRight::EditSchedules,
        TeamRight::DeleteSchedules,
        TeamRight::EditIntegrations,
        TeamRight::DeleteIntegrations,
        TeamRight::EditHeartbeats,
        TeamRight::DeleteHeartbeats,
        TeamRight::AccessReports,
        TeamRight::EditServices,
        TeamRight::DeleteServices,
        TeamRight::EditRooms,
        TeamRight::DeleteRooms,
        TeamRight::SendServiceStatusUpdate,
    ];

    /// Wire name of the right
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRight::ManageMembers => "manage-members",
            TeamRight::EditTeamRoles => "edit-team-roles",
            TeamRight::DeleteTeamRoles => "delete-team-roles",
            TeamRight::AccessMemberProfiles => "access-member-profiles",
            TeamRight::EditMemberProfiles => "edit-member-profiles",
            TeamRight::EditRoutingRules => "edit-routing-rules",
            TeamRight::DeleteRoutingRules => "delete-routing-rules",
            TeamRight::EditEscalations => "edit-escalations",
            TeamRight::DeleteEscalations => "delete-escalations",
            TeamRight::EditSchedules => "edit-schedules",
            TeamRight::DeleteSchedules => "delete-schedules",
            TeamRight::EditIntegrations => "edit-integrations",
            TeamRight::DeleteIntegrations => "delete-integrations",
            TeamRight::EditHeartbeats => "edit-heartbeats",
            TeamRight::DeleteHeartbeats => "delete-heartbeats",
            TeamRight::AccessReports => "access-reports",
            TeamRight::EditServices => "edit-services",
            TeamRight::DeleteServices => "delete-services",
            TeamRight::EditRooms => "edit-rooms",
            TeamRight::DeleteRooms => "delete-rooms",
            TeamRight::SendServiceStatusUpdate => "send-service-status-update",
        }
    }

    /// The allow-list rendered as `[a b c]`, as used in validation messages
    pub fn allow_list() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(TeamRight::as_str).collect();
        format!("[{}]", names.join(" "))
    }
}

impl fmt::Display for TeamRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known rights
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of {}, got {0}", TeamRight::allow_list())]
pub struct UnknownRight(pub String);

impl FromStr for TeamRight {
    type Err = UnknownRight;

    // Case-sensitive, like the API
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRight(s.to_string()))
    }
}
