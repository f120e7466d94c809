//! Direct team role commands: get, list, delete, sweep

use colored::Colorize;
use dialoguer::Confirm;
use log::{debug, info};
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::TeamRoleApi;
use crate::client::models::{
    DeleteTeamRoleRequest, GetTeamRoleRequest, IdentifierType, ListTeamRoleRequest,
    TeamRoleSummary,
};
use crate::error::Result;
use crate::models::{RoleDisplay, role_rights};
use crate::output::{Formattable, print_json};

/// Split a ROLE argument into (id, name) for request structs
fn role_ref(role: &str, by_name: bool) -> (String, String) {
    if by_name {
        (String::new(), role.to_string())
    } else {
        (role.to_string(), String::new())
    }
}

/// Show one role with its rights
pub async fn get(opts: &GlobalOptions, team_id: &str, role: &str, by_name: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let (role_id, role_name) = role_ref(role, by_name);

    let team_role = ctx
        .client()
        .get_role(&GetTeamRoleRequest {
            team_id: team_id.to_string(),
            role_id,
            role_name,
        })
        .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&team_role),
        OutputFormat::Table => {
            println!("{} {}", "Role:".bold(), team_role.name);
            println!("{} {}", "ID:".bold(), team_role.id);
            println!("{} {}", "Team:".bold(), team_id);
            println!();
            role_rights(&team_role).print(ctx.format)
        }
    }
}

/// List a team's roles
pub async fn list(opts: &GlobalOptions, team_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let roles = list_team_roles(&ctx, team_id).await?;
    debug!("Team {} has {} roles", team_id, roles.len());

    let rows: Vec<RoleDisplay> = roles.into_iter().map(RoleDisplay::from).collect();
    rows.print(ctx.format)
}

async fn list_team_roles(ctx: &CommandContext, team_id: &str) -> Result<Vec<TeamRoleSummary>> {
    ctx.client()
        .list_roles(&ListTeamRoleRequest {
            team_identifier_type: IdentifierType::Id,
            team_identifier_value: team_id.to_string(),
        })
        .await
}

/// Delete one live role, whether or not it is tracked
pub async fn delete(
    opts: &GlobalOptions,
    team_id: &str,
    role: &str,
    by_name: bool,
    yes: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let (role_id, role_name) = role_ref(role, by_name);

    if !yes {
        eprintln!(
            "{} Delete team role \"{}\" from team {}? This cannot be undone.",
            "⚠".yellow(),
            role,
            team_id
        );
        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;
        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    ctx.client()
        .delete_role(&DeleteTeamRoleRequest {
            team_id: team_id.to_string(),
            role_id,
            role_name,
        })
        .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "deleted": true,
            "team_id": team_id,
            "role": role,
        })),
        OutputFormat::Table => {
            eprintln!("{} Team role \"{}\" deleted", "✓".green(), role);
            Ok(())
        }
    }
}

#[derive(Debug, Serialize)]
struct SweepResult {
    prefix: String,
    matched: Vec<RoleDisplay>,
    deleted: usize,
    dry_run: bool,
}

/// Delete every role on a team whose name starts with `prefix`
pub async fn sweep(
    opts: &GlobalOptions,
    team_id: &str,
    prefix: &str,
    yes: bool,
    dry_run: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let matched: Vec<TeamRoleSummary> = list_team_roles(&ctx, team_id)
        .await?
        .into_iter()
        .filter(|r| r.name.starts_with(prefix))
        .collect();

    let mut result = SweepResult {
        prefix: prefix.to_string(),
        matched: matched.iter().cloned().map(RoleDisplay::from).collect(),
        deleted: 0,
        dry_run,
    };

    if matched.is_empty() {
        return match ctx.format {
            OutputFormat::Json => print_json(&result),
            OutputFormat::Table => {
                eprintln!("No team roles starting with \"{}\" on team {}", prefix, team_id);
                Ok(())
            }
        };
    }

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        return match ctx.format {
            OutputFormat::Json => print_json(&result),
            OutputFormat::Table => result.matched.print(ctx.format),
        };
    }

    if !yes {
        result.matched.print(OutputFormat::Table)?;
        let confirm = Confirm::new()
            .with_prompt(format!("Delete {} team roles?", matched.len()))
            .default(false)
            .interact()?;
        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    for role in &matched {
        info!("Destroying team role {}", role.name);
        ctx.client()
            .delete_role(&DeleteTeamRoleRequest {
                team_id: team_id.to_string(),
                role_id: role.id.clone(),
                role_name: role.name.clone(),
            })
            .await?;
        result.deleted += 1;
        if ctx.format == OutputFormat::Table {
            eprintln!("{} Deleted {} ({})", "✓".green(), role.name, role.id);
        }
    }

    match ctx.format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Table => {
            eprintln!("Swept {} team roles.", result.deleted);
            Ok(())
        }
    }
}
