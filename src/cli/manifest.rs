//! Manifest-driven commands: validate, plan, apply, refresh, import, destroy

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;
use log::debug;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{Result, StateError};
use crate::models::{ActionDisplay, TrackedRoleDisplay};
use crate::output::{Formattable, print_json};
use crate::resource::{
    ActionKind, Manifest, Outcome, Plan, StateFile, apply_plan, refresh_state,
};

/// Load a manifest and fail on any validation problem
fn load_valid_manifest(file: &Path) -> Result<Manifest> {
    let manifest = Manifest::load(file)?;
    manifest.validate()?;
    debug!(
        "Manifest {} declares {} roles",
        file.display(),
        manifest.roles.len()
    );
    Ok(manifest)
}

fn print_plan(plan: &Plan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(plan),
        OutputFormat::Table => {
            let rows: Vec<ActionDisplay> = plan.changes().map(ActionDisplay::from).collect();
            if rows.is_empty() {
                println!("No changes. Team roles match the manifest.");
            } else {
                rows.print(format)?;
                println!("{}", plan.summary().bold());
            }
            Ok(())
        }
    }
}

fn print_outcomes(outcomes: &[Outcome], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(outcomes),
        OutputFormat::Table => {
            for outcome in outcomes {
                let verb = match outcome.kind {
                    ActionKind::Create => "created",
                    ActionKind::Update => "updated",
                    ActionKind::Replace => "replaced",
                    ActionKind::Delete => "deleted",
                    ActionKind::NoOp => continue,
                };
                eprintln!(
                    "{} {} {} (ID: {})",
                    "✓".green(),
                    outcome.address,
                    verb,
                    outcome.id
                );
            }
            Ok(())
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

// ============================================================================
// Validate
// ============================================================================

/// Validate a manifest offline
pub fn validate(opts: &GlobalOptions, file: &Path) -> Result<()> {
    let manifest = load_valid_manifest(file)?;

    match opts.format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Validated<'a> {
                valid: bool,
                roles: Vec<&'a String>,
            }
            print_json(&Validated {
                valid: true,
                roles: manifest.roles.keys().collect(),
            })
        }
        OutputFormat::Table => {
            println!(
                "{} {} is valid ({} team roles)",
                "✓".green(),
                file.display(),
                manifest.roles.len()
            );
            Ok(())
        }
    }
}

// ============================================================================
// Plan
// ============================================================================

/// Print the changes apply would make
pub async fn plan(opts: &GlobalOptions, file: &Path, refresh: bool) -> Result<()> {
    let manifest = load_valid_manifest(file)?;

    let state = if refresh {
        let ctx = CommandContext::new(opts)?;
        let mut state = ctx.load_state()?;
        refresh_state(&ctx.resource, &mut state).await?;
        state
    } else {
        StateFile::load(&opts.state_path())?
    };

    print_plan(&Plan::build(&manifest, &state), opts.format)
}

// ============================================================================
// Apply
// ============================================================================

/// Converge live roles on the manifest
pub async fn apply(opts: &GlobalOptions, file: &Path, yes: bool, dry_run: bool) -> Result<()> {
    let manifest = load_valid_manifest(file)?;
    let mut state = StateFile::load(&opts.state_path())?;
    let plan = Plan::build(&manifest, &state);

    if !plan.has_changes() {
        return print_plan(&plan, opts.format);
    }

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        return print_plan(&plan, opts.format);
    }

    if opts.format == OutputFormat::Table {
        print_plan(&plan, opts.format)?;
    }

    if !yes && !confirm("Apply these changes?")? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let outcomes = apply_plan(&ctx.resource, &plan, &mut state, |s| ctx.save_state(s)).await?;

    print_outcomes(&outcomes, opts.format)?;
    if opts.format == OutputFormat::Table {
        eprintln!("Apply complete. {} changes.", outcomes.len());
    }
    Ok(())
}

// ============================================================================
// Refresh
// ============================================================================

/// Re-read tracked roles into state
pub async fn refresh(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut state = ctx.load_state()?;

    let report = refresh_state(&ctx.resource, &mut state).await?;
    ctx.save_state(&state)?;

    match ctx.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            for address in &report.removed {
                eprintln!(
                    "{} {} no longer exists; removed from state",
                    "⚠".yellow(),
                    address
                );
            }
            let rows: Vec<TrackedRoleDisplay> = state
                .resources
                .iter()
                .map(|(address, role)| TrackedRoleDisplay::new(address, role))
                .collect();
            rows.print(ctx.format)
        }
    }
}

// ============================================================================
// Import
// ============================================================================

/// Read an existing role into state under `address`
pub async fn import(opts: &GlobalOptions, address: &str, team_id: &str, role_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut state = ctx.load_state()?;

    if state.get(address).is_some() {
        return Err(StateError::AlreadyTracked(address.to_string()).into());
    }

    let role = ctx.resource.import(team_id, role_id).await?;
    let row = TrackedRoleDisplay::new(address, &role);
    state.insert(address, role);
    ctx.save_state(&state)?;

    match ctx.format {
        OutputFormat::Json => print_json(&row),
        OutputFormat::Table => {
            eprintln!(
                "{} Imported team role \"{}\" as {}",
                "✓".green(),
                row.role_name,
                address
            );
            Ok(())
        }
    }
}

// ============================================================================
// Destroy
// ============================================================================

/// Delete every tracked role
pub async fn destroy(opts: &GlobalOptions, yes: bool, dry_run: bool) -> Result<()> {
    let mut state = StateFile::load(&opts.state_path())?;
    if state.is_empty() {
        eprintln!("Nothing to destroy. No team roles are tracked.");
        return Ok(());
    }

    let plan = Plan::destroy(&state);

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        return print_plan(&plan, opts.format);
    }

    if !yes {
        print_plan(&plan, OutputFormat::Table)?;
        eprintln!(
            "{} Delete {} team roles? This cannot be undone.",
            "⚠".yellow(),
            plan.count(ActionKind::Delete)
        );
        if !confirm("Confirm deletion?")? {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let ctx = CommandContext::new(opts)?;
    let outcomes = apply_plan(&ctx.resource, &plan, &mut state, |s| ctx.save_state(s)).await?;

    print_outcomes(&outcomes, opts.format)?;
    if opts.format == OutputFormat::Table {
        eprintln!("Destroy complete. {} team roles deleted.", outcomes.len());
    }
    Ok(())
}
