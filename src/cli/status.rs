//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::output::print_json;
use crate::resource::StateFile;

#[derive(Debug, Serialize)]
struct Status {
    config_path: String,
    config_found: bool,
    api_key_configured: bool,
    api_url: String,
    state_path: String,
    tracked_roles: usize,
}

/// Show configuration and state status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_at(opts.config_ref())?;
    if let Some(ref url) = opts.api_url {
        config.api_url = Some(url.clone());
    }

    let state_path = opts.state_path();
    let state = StateFile::load(&state_path)?;

    let status = Status {
        config_path: config_path.display().to_string(),
        config_found: config_path.exists(),
        api_key_configured: config.validate_auth().is_ok(),
        api_url: config.api_base(),
        state_path: state_path.display().to_string(),
        tracked_roles: state.resources.len(),
    };

    if opts.format == OutputFormat::Json {
        return print_json(&status);
    }

    println!("{}\n", "ogrole status".bold());

    if status.config_found {
        println!("Config file: {}", status.config_path.cyan());
    } else {
        println!(
            "{} No config file at {}",
            "○".dimmed(),
            status.config_path.dimmed()
        );
    }

    if status.api_key_configured {
        println!("{} API key configured", "✓".green());
    } else {
        println!("{} API key not configured", "✗".red());
        println!("  → Run 'ogrole init' or set OPSGENIE_API_KEY");
    }

    println!("{} API: {}", "○".dimmed(), status.api_url.cyan());
    println!(
        "{} State: {} ({} team roles tracked)",
        "○".dimmed(),
        status.state_path,
        status.tracked_roles
    );
    println!();

    Ok(())
}
