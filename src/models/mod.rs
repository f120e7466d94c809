//! Display models for CLI output

pub mod display;

pub use display::{ActionDisplay, RoleDisplay, TrackedRoleDisplay, role_rights};
