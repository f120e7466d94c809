//! Executing plans and refreshing state against the API

use log::{debug, info};
use serde::Serialize;

use super::plan::{Action, ActionKind, Plan};
use super::state::StateFile;
use super::team_role::TeamRoleResource;
use crate::client::TeamRoleApi;
use crate::error::{Error, Result};

/// What happened to one address during apply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub address: String,
    pub kind: ActionKind,
    /// Role ID after the change; the deleted ID for deletions
    pub id: String,
}

/// Result of a refresh pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshReport {
    /// Addresses whose role still exists
    pub refreshed: Vec<String>,
    /// Addresses dropped because their role is gone
    pub removed: Vec<String>,
}

/// Run every changing action of `plan` in order, updating `state` as it goes.
///
/// `persist` is called after each successful change so that a failure part
/// way through leaves state matching what was actually done. The first error
/// stops the run and is returned as-is.
pub async fn apply_plan<C, F>(
    resource: &TeamRoleResource<C>,
    plan: &Plan,
    state: &mut StateFile,
    mut persist: F,
) -> Result<Vec<Outcome>>
where
    C: TeamRoleApi,
    F: FnMut(&StateFile) -> Result<()>,
{
    let mut outcomes = Vec::new();

    for action in plan.changes() {
        debug!("Applying {} to {}", action.kind, action.address);
        let id = apply_action(resource, action, state, &mut persist).await?;
        outcomes.push(Outcome {
            address: action.address.clone(),
            kind: action.kind,
            id,
        });
    }

    Ok(outcomes)
}

async fn apply_action<C, F>(
    resource: &TeamRoleResource<C>,
    action: &Action,
    state: &mut StateFile,
    persist: &mut F,
) -> Result<String>
where
    C: TeamRoleApi,
    F: FnMut(&StateFile) -> Result<()>,
{
    let address = action.address.as_str();

    match action.kind {
        ActionKind::NoOp => Ok(action
            .current
            .as_ref()
            .map(|c| c.id.clone())
            .unwrap_or_default()),
        ActionKind::Create => {
            let desired = require(action.desired.as_ref(), action)?;
            let created = resource.create(desired).await?;
            let id = created.id.clone();
            state.insert(address, created);
            persist(state)?;
            Ok(id)
        }
        ActionKind::Update => {
            let desired = require(action.desired.as_ref(), action)?;
            let current = require(action.current.as_ref(), action)?;
            let updated = resource.update(current, desired).await?;
            let id = updated.id.clone();
            state.insert(address, updated);
            persist(state)?;
            Ok(id)
        }
        ActionKind::Replace => {
            let desired = require(action.desired.as_ref(), action)?;
            let current = require(action.current.as_ref(), action)?;
            resource.delete(current).await?;
            state.remove(address);
            persist(state)?;

            let created = resource.create(desired).await?;
            let id = created.id.clone();
            state.insert(address, created);
            persist(state)?;
            Ok(id)
        }
        ActionKind::Delete => {
            let current = require(action.current.as_ref(), action)?;
            resource.delete(current).await?;
            state.remove(address);
            persist(state)?;
            Ok(current.id.clone())
        }
    }
}

fn require<'a, T>(value: Option<&'a T>, action: &Action) -> Result<&'a T> {
    value.ok_or_else(|| {
        Error::Other(format!(
            "plan for {} is missing data needed to {}",
            action.address, action.kind
        ))
    })
}

/// Re-read every tracked role, replacing its entry or dropping it when gone.
pub async fn refresh_state<C: TeamRoleApi>(
    resource: &TeamRoleResource<C>,
    state: &mut StateFile,
) -> Result<RefreshReport> {
    let mut report = RefreshReport::default();
    let addresses: Vec<String> = state.resources.keys().cloned().collect();

    for address in addresses {
        let Some(tracked) = state.get(&address).cloned() else {
            continue;
        };

        match resource.read(&tracked).await? {
            Some(fresh) => {
                state.insert(address.clone(), fresh);
                report.refreshed.push(address);
            }
            None => {
                info!("Removing {} from state; its role no longer exists", address);
                state.remove(&address);
                report.removed.push(address);
            }
        }
    }

    Ok(report)
}
