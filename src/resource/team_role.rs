//! Team role resource: create, read, update, delete and import
//!
//! Each operation maps a [`TeamRoleConfig`] or [`RoleState`] onto one API
//! request and copies the response back into state. API errors are passed
//! up unchanged.

use chrono::Utc;
use log::{debug, info};

use super::schema::{TeamRoleConfig, normalize_rights};
use super::state::RoleState;
use crate::client::TeamRoleApi;
use crate::client::models::{
    CreateTeamRoleRequest, DeleteTeamRoleRequest, GetTeamRoleRequest, IdentifierType, TeamRole,
    UpdateTeamRoleRequest,
};
use crate::error::{ApiError, Result};

/// Drives the team role lifecycle against an API backend
pub struct TeamRoleResource<C> {
    client: C,
}

impl<C: TeamRoleApi> TeamRoleResource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying API client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create the role, then read it back to populate state.
    ///
    /// The config must already be validated.
    pub async fn create(&self, config: &TeamRoleConfig) -> Result<RoleState> {
        let request = CreateTeamRoleRequest {
            team_identifier_type: IdentifierType::Id,
            team_identifier_value: config.team_id.clone(),
            name: config.role_name.clone(),
            rights: config.api_rights(),
        };

        info!("Creating Opsgenie team role '{}'", config.role_name);
        let created = self.client.create_role(&request).await?;
        debug!("Created team role '{}' with ID {}", created.name, created.id);

        // Errors from the read-back are returned as the API reported them
        let role = self
            .client
            .get_role(&GetTeamRoleRequest {
                team_id: config.team_id.clone(),
                role_id: created.id.clone(),
                role_name: config.role_name.clone(),
            })
            .await?;

        Ok(to_state(role, &created.id, &config.team_id))
    }

    /// Refresh a tracked role from the API.
    ///
    /// Returns `None` when the API reports the role missing, meaning it was
    /// deleted outside ogrole and should be dropped from state.
    pub async fn read(&self, state: &RoleState) -> Result<Option<RoleState>> {
        let request = GetTeamRoleRequest {
            team_id: state.team_id.clone(),
            role_id: state.id.clone(),
            role_name: state.role_name.clone(),
        };

        match self.client.get_role(&request).await {
            Ok(role) => Ok(Some(to_state(role, &state.id, &state.team_id))),
            Err(e) if e.is_not_found() => {
                info!(
                    "Team role '{}' ({}) no longer exists",
                    state.role_name, state.id
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the rights (and send the name) of an existing role.
    ///
    /// The returned state reflects the config; the role is not re-read.
    pub async fn update(&self, state: &RoleState, config: &TeamRoleConfig) -> Result<RoleState> {
        let request = UpdateTeamRoleRequest {
            team_id: config.team_id.clone(),
            role_id: state.id.clone(),
            role_name: config.role_name.clone(),
            rights: config.api_rights(),
        };

        info!(
            "Updating Opsgenie team role '{}' ({})",
            config.role_name, state.id
        );
        self.client.update_role(&request).await?;

        Ok(RoleState {
            id: state.id.clone(),
            team_id: request.team_id,
            role_name: request.role_name,
            rights: request.rights,
            updated_at: Utc::now(),
        })
    }

    /// Delete a tracked role.
    pub async fn delete(&self, state: &RoleState) -> Result<()> {
        let request = DeleteTeamRoleRequest {
            team_id: state.team_id.clone(),
            role_id: state.id.clone(),
            role_name: state.role_name.clone(),
        };

        info!(
            "Deleting Opsgenie team role '{}' ({})",
            state.role_name, state.id
        );
        self.client.delete_role(&request).await
    }

    /// Bring an existing role under management by ID.
    pub async fn import(&self, team_id: &str, role_id: &str) -> Result<RoleState> {
        let probe = RoleState {
            id: role_id.to_string(),
            team_id: team_id.to_string(),
            role_name: String::new(),
            rights: Vec::new(),
            updated_at: Utc::now(),
        };

        info!("Importing Opsgenie team role {} from team {}", role_id, team_id);
        self.read(&probe).await?.ok_or_else(|| {
            ApiError::NotFound(format!(
                "Cannot import non-existent team role {} on team {}",
                role_id, team_id
            ))
            .into()
        })
    }
}

/// State for a role fetched from the API; `known_id` covers responses without an ID
fn to_state(role: TeamRole, known_id: &str, team_id: &str) -> RoleState {
    RoleState {
        id: if role.id.is_empty() {
            known_id.to_string()
        } else {
            role.id
        },
        team_id: team_id.to_string(),
        role_name: role.name,
        rights: normalize_rights(role.rights),
        updated_at: Utc::now(),
    }
}
