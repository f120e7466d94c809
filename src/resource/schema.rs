//! Declarative manifest: the desired set of team roles

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::rights::TeamRight;
use crate::client::models::Right;
use crate::error::{ManifestError, Result, ValidationError};

/// Top-level manifest document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Team roles keyed by address
    #[serde(default)]
    pub roles: BTreeMap<String, TeamRoleConfig>,
}

/// Desired configuration of a single team role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamRoleConfig {
    /// Owning team's ID
    pub team_id: String,

    /// Role name; changing it replaces the role
    pub role_name: String,

    /// Rights, treated as a set
    pub rights: Vec<RightConfig>,
}

/// One `right`/`granted` entry as written in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RightConfig {
    pub right: String,
    pub granted: bool,
}

impl Manifest {
    /// Read and parse a manifest file. Does not validate.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse manifest YAML; `source` names the input in error messages.
    pub fn parse(contents: &str, source: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| {
            ManifestError::Parse {
                path: source.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Check every role, collecting all problems.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let problems: Vec<String> = self
            .roles
            .iter()
            .flat_map(|(address, role)| {
                role.problems()
                    .into_iter()
                    .map(move |p| format!("{}: {}", address, p))
            })
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(problems))
        }
    }
}

impl TeamRoleConfig {
    /// Validation problems for this role, empty when valid
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.team_id.trim().is_empty() {
            problems.push("team_id must not be empty".to_string());
        }
        if self.role_name.trim().is_empty() {
            problems.push("role_name must not be empty".to_string());
        }
        if self.rights.is_empty() {
            problems.push("rights must contain at least one entry".to_string());
        }

        for (i, entry) in self.rights.iter().enumerate() {
            if entry.right.parse::<TeamRight>().is_err() {
                problems.push(format!(
                    "expected rights.{}.right to be one of {}, got {}",
                    i,
                    TeamRight::allow_list(),
                    entry.right
                ));
            }
        }

        problems
    }

    /// Rights in request form, deduplicated and in a stable order
    pub fn api_rights(&self) -> Vec<Right> {
        normalize_rights(
            self.rights
                .iter()
                .map(|r| Right::new(r.right.clone(), r.granted)),
        )
    }
}

/// Collapse identical pairs and sort, giving rights set semantics
pub fn normalize_rights(rights: impl IntoIterator<Item = Right>) -> Vec<Right> {
    rights
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// True when both lists hold the same set of pairs
pub fn same_rights(a: &[Right], b: &[Right]) -> bool {
    let a: BTreeSet<&Right> = a.iter().collect();
    let b: BTreeSet<&Right> = b.iter().collect();
    a == b
}
