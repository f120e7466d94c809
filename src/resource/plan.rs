//! Reconciliation plan between a manifest and the state file

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::schema::{Manifest, TeamRoleConfig, same_rights};
use super::state::{RoleState, StateFile};

/// What needs to happen to one address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Update,
    /// `role_name` changed; delete and create again
    Replace,
    Delete,
    #[serde(rename = "no-op")]
    NoOp,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Create => "create",
            ActionKind::Update => "update",
            ActionKind::Replace => "replace",
            ActionKind::Delete => "delete",
            ActionKind::NoOp => "no-op",
        };
        f.write_str(s)
    }
}

/// A planned change for one address
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    pub address: String,
    pub kind: ActionKind,
    /// Attributes that differ, for display
    pub changes: Vec<String>,
    #[serde(skip)]
    pub desired: Option<TeamRoleConfig>,
    #[serde(skip)]
    pub current: Option<RoleState>,
}

/// Ordered list of actions
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub actions: Vec<Action>,
}

impl Plan {
    /// Diff desired roles against tracked state.
    ///
    /// Actions come out in address order. The manifest should be validated
    /// before planning.
    pub fn build(manifest: &Manifest, state: &StateFile) -> Self {
        let addresses: BTreeSet<&String> = manifest
            .roles
            .keys()
            .chain(state.resources.keys())
            .collect();

        let actions = addresses
            .into_iter()
            .map(|address| {
                let desired = manifest.roles.get(address);
                let current = state.get(address);
                let (kind, changes) = classify(desired, current);
                Action {
                    address: address.clone(),
                    kind,
                    changes,
                    desired: desired.cloned(),
                    current: current.cloned(),
                }
            })
            .collect();

        Self { actions }
    }

    /// Plan that deletes everything tracked
    pub fn destroy(state: &StateFile) -> Self {
        Self::build(&Manifest::default(), state)
    }

    /// Actions that change something
    pub fn changes(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| a.kind != ActionKind::NoOp)
    }

    pub fn has_changes(&self) -> bool {
        self.changes().next().is_some()
    }

    /// Count of actions of the given kind
    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind == kind).count()
    }

    /// One-line summary, e.g. `Plan: 1 to create, 0 to update, 0 to replace, 2 to delete.`
    pub fn summary(&self) -> String {
        format!(
            "Plan: {} to create, {} to update, {} to replace, {} to delete.",
            self.count(ActionKind::Create),
            self.count(ActionKind::Update),
            self.count(ActionKind::Replace),
            self.count(ActionKind::Delete)
        )
    }
}

fn classify(
    desired: Option<&TeamRoleConfig>,
    current: Option<&RoleState>,
) -> (ActionKind, Vec<String>) {
    match (desired, current) {
        (Some(_), None) => (ActionKind::Create, Vec::new()),
        (None, Some(_)) => (ActionKind::Delete, Vec::new()),
        (None, None) => (ActionKind::NoOp, Vec::new()),
        (Some(desired), Some(current)) => {
            let mut changes = Vec::new();
            if desired.role_name != current.role_name {
                changes.push(format!(
                    "role_name: {} -> {} (forces replacement)",
                    current.role_name, desired.role_name
                ));
            }
            if desired.team_id != current.team_id {
                changes.push(format!(
                    "team_id: {} -> {}",
                    current.team_id, desired.team_id
                ));
            }
            if !same_rights(&desired.api_rights(), &current.rights) {
                changes.push("rights".to_string());
            }

            let kind = if desired.role_name != current.role_name {
                ActionKind::Replace
            } else if changes.is_empty() {
                ActionKind::NoOp
            } else {
                ActionKind::Update
            };
            (kind, changes)
        }
    }
}
