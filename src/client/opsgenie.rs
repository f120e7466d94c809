//! Opsgenie API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::TeamRoleApi;
use super::models::{
    CreateTeamRoleRequest, DeleteTeamRoleRequest, Envelope, ErrorBody, GetTeamRoleRequest,
    IdentifierType, ListTeamRoleRequest, TeamRole, TeamRoleBody, TeamRoleSummary,
    UpdateTeamRoleRequest, role_identifier,
};
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Opsgenie API client
pub struct OpsgenieClient {
    http: HttpClient,
    base_url: Url,
    api_key: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl OpsgenieClient {
    /// Create a client from resolved configuration.
    ///
    /// The caller is expected to have run `Config::validate_auth` first.
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = Url::parse(&config.api_base())
            .map_err(|e| crate::error::ConfigError::Invalid(format!("api_url: {}", e)))?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone().unwrap_or_default(),
            rate_limiter,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build `<base>/v2/teams/<team>/roles[/<role>]` with percent-encoded segments
    fn roles_url(&self, team: &str, role: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidResponse(format!("API URL cannot be a base: {}", self.base_url))
            })?;
            segments.pop_if_empty().extend(["v2", "teams", team, "roles"]);
            if let Some(role) = role {
                segments.push(role);
            }
        }
        Ok(url)
    }

    /// Send a request and return the raw body of a successful response
    async fn send(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<String> {
        self.rate_limiter.until_ready().await;

        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .query(query)
            .header("Authorization", format!("GenieKey {}", self.api_key));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;
            return Ok(text);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| raw.clone());

        debug!("Request failed with {}: {}", status, message);

        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(if message.is_empty() {
                "Resource not found".to_string()
            } else {
                message
            }),
            StatusCode::TOO_MANY_REQUESTS => {
                ApiError::RateLimited(Duration::from_secs(retry_after))
            }
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(message)
            }
            status if status.is_server_error() => ApiError::ServerError(if message.is_empty() {
                format!("Server error: {}", status)
            } else {
                message
            }),
            _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        };
        Err(err.into())
    }

    /// Send a request and decode the `data` field of the envelope
    async fn send_data<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let text = self.send(method, url, query, body).await?;
        let envelope: Envelope<T> = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}. Body was: {}", e, text))
        })?;
        if let Some(ref id) = envelope.request_id {
            debug!("requestId={}", id);
        }
        Ok(envelope.data)
    }
}

fn role_body(name: &str, rights: &[super::models::Right]) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(TeamRoleBody { name, rights })?)
}

#[async_trait]
impl TeamRoleApi for OpsgenieClient {
    async fn create_role(&self, request: &CreateTeamRoleRequest) -> Result<TeamRoleSummary> {
        let url = self.roles_url(&request.team_identifier_value, None)?;
        let query = [("teamIdentifierType", request.team_identifier_type.as_str())];
        let body = role_body(&request.name, &request.rights)?;
        self.send_data(Method::POST, url, &query, Some(body)).await
    }

    async fn get_role(&self, request: &GetTeamRoleRequest) -> Result<TeamRole> {
        let (role, kind) = role_identifier(&request.role_id, &request.role_name);
        let url = self.roles_url(&request.team_id, Some(role))?;
        let query = [
            ("teamIdentifierType", IdentifierType::Id.as_str()),
            ("identifierType", kind.as_str()),
        ];
        self.send_data(Method::GET, url, &query, None).await
    }

    async fn update_role(&self, request: &UpdateTeamRoleRequest) -> Result<TeamRoleSummary> {
        let (role, kind) = role_identifier(&request.role_id, &request.role_name);
        let url = self.roles_url(&request.team_id, Some(role))?;
        let query = [
            ("teamIdentifierType", IdentifierType::Id.as_str()),
            ("identifierType", kind.as_str()),
        ];
        let body = role_body(&request.role_name, &request.rights)?;
        self.send_data(Method::PATCH, url, &query, Some(body)).await
    }

    async fn delete_role(&self, request: &DeleteTeamRoleRequest) -> Result<()> {
        let (role, kind) = role_identifier(&request.role_id, &request.role_name);
        let url = self.roles_url(&request.team_id, Some(role))?;
        let query = [
            ("teamIdentifierType", IdentifierType::Id.as_str()),
            ("identifierType", kind.as_str()),
        ];
        self.send(Method::DELETE, url, &query, None).await?;
        Ok(())
    }

    async fn list_roles(&self, request: &ListTeamRoleRequest) -> Result<Vec<TeamRoleSummary>> {
        let url = self.roles_url(&request.team_identifier_value, None)?;
        let query = [("teamIdentifierType", request.team_identifier_type.as_str())];
        self.send_data(Method::GET, url, &query, None).await
    }
}
