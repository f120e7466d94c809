//! Display models for table and JSON output

mod plan;
mod role;

pub use plan::ActionDisplay;
pub use role::{RoleDisplay, TrackedRoleDisplay, role_rights};
