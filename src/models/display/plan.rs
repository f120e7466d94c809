//! Plan display model

use serde::Serialize;
use tabled::Tabled;

use crate::resource::Action;

/// One row per planned change
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ActionDisplay {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "ACTION")]
    pub action: String,

    #[tabled(rename = "ROLE")]
    pub role_name: String,

    #[tabled(rename = "CHANGES")]
    pub changes: String,
}

impl From<&Action> for ActionDisplay {
    fn from(action: &Action) -> Self {
        let role_name = action
            .desired
            .as_ref()
            .map(|d| d.role_name.clone())
            .or_else(|| action.current.as_ref().map(|c| c.role_name.clone()))
            .unwrap_or_default();

        Self {
            address: action.address.clone(),
            action: action.kind.to_string(),
            role_name,
            changes: action.changes.join(", "),
        }
    }
}
