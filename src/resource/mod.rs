//! The team role resource
//!
//! - [`rights`] - the fixed allow-list of permissions
//! - [`schema`] - manifest types and validation
//! - [`state`] - the local state file
//! - [`team_role`] - CRUD against the API
//! - [`plan`] - diffing manifest against state
//! - [`apply`] - executing plans and refreshing state

pub mod apply;
pub mod plan;
pub mod rights;
pub mod schema;
pub mod state;
pub mod team_role;

pub use apply::{Outcome, apply_plan, refresh_state};
pub use plan::{Action, ActionKind, Plan};
pub use rights::TeamRight;
pub use schema::Manifest;
pub use state::{RoleState, StateFile};
pub use team_role::TeamRoleResource;
