//! Opsgenie API client
//!
//! - [`api`] - the [`TeamRoleApi`] trait every backend implements
//! - [`models`] - request and response types
//! - [`opsgenie`] - the reqwest-backed implementation

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod opsgenie;

pub use api::TeamRoleApi;
#[cfg(test)]
pub use mock::MockOpsgenieClient;
pub use opsgenie::OpsgenieClient;
