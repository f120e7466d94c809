//! Command execution context
//!
//! Loads configuration, builds the API client and locates the state file so
//! handlers don't repeat that setup.

use std::path::PathBuf;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::OpsgenieClient;
use crate::config::Config;
use crate::error::Result;
use crate::resource::{StateFile, TeamRoleResource};

/// Context for commands that talk to the API.
pub struct CommandContext {
    /// Team role resource backed by the live client
    pub resource: TeamRoleResource<OpsgenieClient>,
    /// Output format preference
    pub format: OutputFormat,
    /// Where state is read from and written to
    pub state_path: PathBuf,
}

impl CommandContext {
    /// Create a context, failing if no API key is configured.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;

        if let Some(ref url) = opts.api_url {
            config.api_url = Some(url.clone());
        }
        config.validate_auth()?;

        let client = OpsgenieClient::new(&config)?;
        debug!("Using Opsgenie API at {}", client.base_url());

        Ok(Self {
            resource: TeamRoleResource::new(client),
            format: opts.format,
            state_path: opts.state_path(),
        })
    }

    /// The raw API client
    pub fn client(&self) -> &OpsgenieClient {
        self.resource.client()
    }

    pub fn load_state(&self) -> Result<StateFile> {
        StateFile::load(&self.state_path)
    }

    pub fn save_state(&self, state: &StateFile) -> Result<()> {
        state.save(&self.state_path)
    }
}
