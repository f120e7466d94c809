//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod init;
pub mod manifest;
pub mod rights;
pub mod role;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// Default role-name prefix removed by `sweep`
pub const DEFAULT_SWEEP_PREFIX: &str = "genietest-";

/// ogrole - declarative management of Opsgenie team roles
#[derive(Parser, Debug)]
#[command(name = "ogrole")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "OGROLE_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "OGROLE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// State file location
    #[arg(long, global = true, env = "OGROLE_STATE", hide_env = true)]
    pub state: Option<String>,

    /// Opsgenie API host (e.g. api.eu.opsgenie.com)
    #[arg(long, global = true, env = "OPSGENIE_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "OGROLE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save an API key and region to the config file
    Init,

    /// Show configuration and state status
    Status,

    /// Display version information
    Version,

    /// List the rights a team role can carry
    Rights,

    /// Check a manifest without contacting the API
    Validate {
        /// Manifest file
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Show what apply would change
    Plan {
        /// Manifest file
        #[arg(long, short = 'f')]
        file: PathBuf,

        /// Refresh tracked roles from the API before planning
        #[arg(long)]
        refresh: bool,
    },

    /// Create, update and delete roles to match the manifest
    Apply {
        /// Manifest file
        #[arg(long, short = 'f')]
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Show what would change without changing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Re-read every tracked role and drop the ones deleted elsewhere
    Refresh,

    /// Bring an existing role under management
    Import {
        /// Manifest address to record the role under
        address: String,

        /// Owning team ID
        team_id: String,

        /// Role ID
        role_id: String,
    },

    /// Delete every tracked role
    Destroy {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect and delete live roles directly
    #[command(subcommand)]
    Role(RoleCommands),

    /// Delete leftover roles whose names start with a prefix
    Sweep {
        /// Team whose roles are swept
        team_id: String,

        /// Role-name prefix to match
        #[arg(long, default_value = DEFAULT_SWEEP_PREFIX)]
        prefix: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// List matches without deleting
        #[arg(long)]
        dry_run: bool,
    },
}

/// Direct role subcommands
#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// Show a role and its rights
    Get {
        /// Owning team ID
        team_id: String,

        /// Role ID (or name with --by-name)
        role: String,

        /// Treat ROLE as a role name
        #[arg(long)]
        by_name: bool,
    },

    /// List a team's roles
    List {
        /// Owning team ID
        team_id: String,
    },

    /// Delete a single role
    Delete {
        /// Owning team ID
        team_id: String,

        /// Role ID (or name with --by-name)
        role: String,

        /// Treat ROLE as a role name
        #[arg(long)]
        by_name: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
