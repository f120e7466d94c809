//! Mock Opsgenie API client for testing
//!
//! Provides an in-memory implementation of [`TeamRoleApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::TeamRoleApi;
use super::models::{
    CreateTeamRoleRequest, DeleteTeamRoleRequest, GetTeamRoleRequest, ListTeamRoleRequest, Right,
    TeamRole, TeamRoleSummary, UpdateTeamRoleRequest,
};
use crate::error::{ApiError, Result};

/// A role held by the mock, keyed by the team it belongs to
#[derive(Debug, Clone)]
pub struct StoredRole {
    pub team_id: String,
    pub role: TeamRole,
}

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockOpsgenieClient::new()
///     .with_role("team-1", TeamRole { id: "r-1".into(), name: "ops".into(), rights: vec![] })
///     .await;
/// ```
#[derive(Default)]
pub struct MockOpsgenieClient {
    /// Roles currently "on the server"
    roles: Arc<Mutex<Vec<StoredRole>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Error returned by the next get_role only
    get_role_error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    /// Next ID suffix handed out by create_role
    next_id: Arc<Mutex<usize>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub create_role: usize,
    pub get_role: usize,
    pub update_role: usize,
    pub delete_role: usize,
    pub list_roles: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.create_role + self.get_role + self.update_role + self.delete_role + self.list_roles
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "create_role")
    pub method: String,
    pub team_id: String,
    /// Role ID or name used to address the role, if any
    pub role: Option<String>,
    pub name: Option<String>,
    pub rights: Option<Vec<Right>>,
}

impl MockOpsgenieClient {
    /// Create a new mock client with no roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a role on the given team.
    pub async fn with_role(self, team_id: &str, role: TeamRole) -> Self {
        self.roles.lock().await.push(StoredRole {
            team_id: team_id.to_string(),
            role,
        });
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next `get_role` call, leaving other
    /// methods unaffected.
    pub async fn with_get_role_error(self, error: ApiError) -> Self {
        *self.get_role_error.lock().await = Some(error);
        self
    }

    /// Inject an error into an already-built mock.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Remove a role behind the caller's back, simulating out-of-band deletion.
    pub async fn remove_role(&self, role_id: &str) {
        self.roles.lock().await.retain(|r| r.role.id != role_id);
    }

    /// Snapshot of the roles currently held.
    pub async fn roles(&self) -> Vec<StoredRole> {
        self.roles.lock().await.clone()
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }

    fn matches(stored: &StoredRole, team_id: &str, role_id: &str, role_name: &str) -> bool {
        stored.team_id == team_id
            && if role_id.is_empty() {
                stored.role.name == role_name
            } else {
                stored.role.id == role_id
            }
    }

    fn not_found(role_id: &str, role_name: &str) -> ApiError {
        let ident = if role_id.is_empty() { role_name } else { role_id };
        ApiError::NotFound(format!("Team role [{}] not found", ident))
    }
}

#[async_trait]
impl TeamRoleApi for MockOpsgenieClient {
    async fn create_role(&self, request: &CreateTeamRoleRequest) -> Result<TeamRoleSummary> {
        self.capture(CapturedRequest {
            method: "create_role".to_string(),
            team_id: request.team_identifier_value.clone(),
            role: None,
            name: Some(request.name.clone()),
            rights: Some(request.rights.clone()),
        })
        .await;
        self.check_error().await?;
        self.call_count.lock().await.create_role += 1;

        let mut roles = self.roles.lock().await;
        if roles
            .iter()
            .any(|r| r.team_id == request.team_identifier_value && r.role.name == request.name)
        {
            return Err(ApiError::BadRequest(format!(
                "Role with name [{}] already exists",
                request.name
            ))
            .into());
        }

        let id = {
            let mut next = self.next_id.lock().await;
            *next += 1;
            format!("mock-role-{}", *next)
        };

        roles.push(StoredRole {
            team_id: request.team_identifier_value.clone(),
            role: TeamRole {
                id: id.clone(),
                name: request.name.clone(),
                rights: request.rights.clone(),
            },
        });

        Ok(TeamRoleSummary {
            id,
            name: request.name.clone(),
        })
    }

    async fn get_role(&self, request: &GetTeamRoleRequest) -> Result<TeamRole> {
        self.capture(CapturedRequest {
            method: "get_role".to_string(),
            team_id: request.team_id.clone(),
            role: Some(if request.role_id.is_empty() {
                request.role_name.clone()
            } else {
                request.role_id.clone()
            }),
            name: None,
            rights: None,
        })
        .await;
        self.check_error().await?;
        self.call_count.lock().await.get_role += 1;
        if let Some(e) = self.get_role_error.lock().await.take() {
            return Err(e.into());
        }

        self.roles
            .lock()
            .await
            .iter()
            .find(|r| Self::matches(r, &request.team_id, &request.role_id, &request.role_name))
            .map(|r| r.role.clone())
            .ok_or_else(|| Self::not_found(&request.role_id, &request.role_name).into())
    }

    async fn update_role(&self, request: &UpdateTeamRoleRequest) -> Result<TeamRoleSummary> {
        self.capture(CapturedRequest {
            method: "update_role".to_string(),
            team_id: request.team_id.clone(),
            role: Some(request.role_id.clone()),
            name: Some(request.role_name.clone()),
            rights: Some(request.rights.clone()),
        })
        .await;
        self.check_error().await?;
        self.call_count.lock().await.update_role += 1;

        let mut roles = self.roles.lock().await;
        let stored = roles
            .iter_mut()
            .find(|r| Self::matches(r, &request.team_id, &request.role_id, &request.role_name))
            .ok_or_else(|| Self::not_found(&request.role_id, &request.role_name))?;

        stored.role.name = request.role_name.clone();
        stored.role.rights = request.rights.clone();

        Ok(TeamRoleSummary {
            id: stored.role.id.clone(),
            name: stored.role.name.clone(),
        })
    }

    async fn delete_role(&self, request: &DeleteTeamRoleRequest) -> Result<()> {
        self.capture(CapturedRequest {
            method: "delete_role".to_string(),
            team_id: request.team_id.clone(),
            role: Some(request.role_id.clone()),
            name: Some(request.role_name.clone()),
            rights: None,
        })
        .await;
        self.check_error().await?;
        self.call_count.lock().await.delete_role += 1;

        let mut roles = self.roles.lock().await;
        let before = roles.len();
        roles.retain(|r| !Self::matches(r, &request.team_id, &request.role_id, &request.role_name));
        if roles.len() == before {
            return Err(Self::not_found(&request.role_id, &request.role_name).into());
        }
        Ok(())
    }

    async fn list_roles(&self, request: &ListTeamRoleRequest) -> Result<Vec<TeamRoleSummary>> {
        self.capture(CapturedRequest {
            method: "list_roles".to_string(),
            team_id: request.team_identifier_value.clone(),
            role: None,
            name: None,
            rights: None,
        })
        .await;
        self.check_error().await?;
        self.call_count.lock().await.list_roles += 1;

        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|r| r.team_id == request.team_identifier_value)
            .map(|r| TeamRoleSummary {
                id: r.role.id.clone(),
                name: r.role.name.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::IdentifierType;

    fn create_request(name: &str) -> CreateTeamRoleRequest {
        CreateTeamRoleRequest {
            team_identifier_type: IdentifierType::Id,
            team_identifier_value: "team-1".to_string(),
            name: name.to_string(),
            rights: vec![Right::new("access-reports", true)],
        }
    }

    #[tokio::test]
    async fn test_mock_create_then_get() {
        let mock = MockOpsgenieClient::new();
        let created = mock.create_role(&create_request("ops")).await.unwrap();

        let role = mock
            .get_role(&GetTeamRoleRequest {
                team_id: "team-1".to_string(),
                role_id: created.id.clone(),
                role_name: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(role.name, "ops");
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_duplicate_name_rejected() {
        let mock = MockOpsgenieClient::new();
        mock.create_role(&create_request("ops")).await.unwrap();
        let err = mock.create_role(&create_request("ops")).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_mock_get_role_error_skips_other_methods() {
        let mock = MockOpsgenieClient::new()
            .with_get_role_error(ApiError::Forbidden)
            .await;

        let created = mock.create_role(&create_request("ops")).await.unwrap();
        let request = GetTeamRoleRequest {
            team_id: "team-1".to_string(),
            role_id: created.id,
            role_name: String::new(),
        };
        assert!(mock.get_role(&request).await.is_err());
        assert!(mock.get_role(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed() {
        let mock = MockOpsgenieClient::new()
            .with_error(ApiError::ServerError("boom".into()))
            .await;

        assert!(mock.create_role(&create_request("ops")).await.is_err());
        assert!(mock.create_role(&create_request("ops")).await.is_ok());
    }
}
