//! Global CLI options shared across all commands

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::resource::StateFile;

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.ogrole/config.yaml)
    pub config: Option<String>,

    /// State file path (defaults to ./ogrole.state.json)
    pub state: Option<String>,

    /// API host override
    pub api_url: Option<String>,
}

impl GlobalOptions {
    /// Build from the parsed CLI; called once in main.rs.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            state: cli.state.clone(),
            api_url: cli.api_url.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Resolved state file location
    pub fn state_path(&self) -> PathBuf {
        StateFile::resolve_path(self.state.as_deref())
    }
}
