//! API trait definitions

mod team_role;

pub use team_role::TeamRoleApi;
