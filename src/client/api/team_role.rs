//! Team role API trait for CRUD operations

use async_trait::async_trait;

use crate::client::models::{
    CreateTeamRoleRequest, DeleteTeamRoleRequest, GetTeamRoleRequest, ListTeamRoleRequest,
    TeamRole, TeamRoleSummary, UpdateTeamRoleRequest,
};
use crate::error::Result;

/// Team role operations for the Opsgenie API
///
/// Each method issues exactly one request. Errors come back as the client
/// produced them; nothing here retries.
#[async_trait]
pub trait TeamRoleApi: Send + Sync {
    /// Create a role under a team. Returns the new role's ID and name.
    async fn create_role(&self, request: &CreateTeamRoleRequest) -> Result<TeamRoleSummary>;

    /// Fetch a role with its rights.
    async fn get_role(&self, request: &GetTeamRoleRequest) -> Result<TeamRole>;

    /// Replace a role's name and rights.
    ///
    /// The rights list is a complete replacement, not incremental.
    async fn update_role(&self, request: &UpdateTeamRoleRequest) -> Result<TeamRoleSummary>;

    /// Delete a role.
    async fn delete_role(&self, request: &DeleteTeamRoleRequest) -> Result<()>;

    /// List every role defined on a team (without rights).
    async fn list_roles(&self, request: &ListTeamRoleRequest) -> Result<Vec<TeamRoleSummary>>;
}
