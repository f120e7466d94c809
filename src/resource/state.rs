//! Local state file recording the roles ogrole manages

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::models::Right;
use crate::error::{Result, StateError};

/// Default state file name, relative to the working directory
pub const DEFAULT_STATE_FILE: &str = "ogrole.state.json";

/// Current on-disk format version
pub const STATE_VERSION: u32 = 1;

/// Tracked attributes of one team role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleState {
    /// Role ID assigned by Opsgenie
    pub id: String,
    pub team_id: String,
    pub role_name: String,
    pub rights: Vec<Right>,
    /// When this entry was last written
    pub updated_at: DateTime<Utc>,
}

/// The whole state file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    #[serde(default)]
    pub resources: BTreeMap<String, RoleState>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            resources: BTreeMap::new(),
        }
    }
}

impl StateFile {
    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> PathBuf {
        PathBuf::from(path.unwrap_or(DEFAULT_STATE_FILE))
    }

    /// Load state; a missing file is an empty state
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No state file at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let state: StateFile =
            serde_json::from_str(&contents).map_err(|e| StateError::Corrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if state.version != STATE_VERSION {
            return Err(StateError::UnsupportedVersion(state.version).into());
        }

        Ok(state)
    }

    /// Write the whole file through a temporary sibling and rename it into place
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)?;

        debug!(
            "Saved {} resources to {}",
            self.resources.len(),
            path.display()
        );
        Ok(())
    }

    pub fn get(&self, address: &str) -> Option<&RoleState> {
        self.resources.get(address)
    }

    pub fn insert(&mut self, address: impl Into<String>, role: RoleState) {
        self.resources.insert(address.into(), role);
    }

    pub fn remove(&mut self, address: &str) -> Option<RoleState> {
        self.resources.remove(address)
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
