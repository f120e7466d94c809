//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, Select, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::{Config, DEFAULT_API_URL, EU_API_URL};
use crate::error::Result;

/// Prompt for an API key and region, then save the config file.
///
/// Existing settings other than key and host are kept.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to ogrole!".bold().green());
    println!("Let's set up your Opsgenie configuration.\n");

    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Opsgenie API key")
        .interact()?;

    let regions = ["US (api.opsgenie.com)", "EU (api.eu.opsgenie.com)"];
    let region = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select your Opsgenie region")
        .items(&regions)
        .default(0)
        .interact()?;

    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_from(path.clone()).unwrap_or_default();
    config.api_key = Some(api_key);
    config.api_url = Some(if region == 1 { EU_API_URL } else { DEFAULT_API_URL }.to_string());
    config.save_to(path.clone())?;

    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        path.display()
    );
    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "ogrole status".cyan());
    println!("  {} - List a team's roles", "ogrole role list <TEAM_ID>".cyan());

    Ok(())
}
