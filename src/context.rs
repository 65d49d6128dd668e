use std::time::Duration;

use anyhow::Result;

use crate::configuration::{self, Configuration};

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let cfg = Configuration {
            database_path: configuration::database_path(&cli.database_url)?,
            api_listen: cli.api_listen,
            storage_timeout: Duration::from_millis(cli.storage_timeout_ms),
            log_file: cli.log_file.clone(),
            reset: cli.reset,
        };
        Ok(Self { config: cfg })
    }
}
