//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::JobConfig;
use crate::error::{Error, Result, ResultExt};
use crate::pipeline::{ActivityPipeline, CatalogPipeline};
use crate::storage::StorageLocation;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        config.apply_credentials()?;

        let input = StorageLocation::parse(&config.input_url)?;
        let output = StorageLocation::parse(&config.output_url)?;

        match &self.cli.command {
            Commands::Run => {
                let catalog = CatalogPipeline::new(&input, &output).run().await?;
                let activity = ActivityPipeline::new(&input, &output, config.timezone)
                    .run()
                    .await?;
                info!(
                    songs = catalog.songs_rows,
                    artists = catalog.artists_rows,
                    users = activity.users_rows,
                    time = activity.time_rows,
                    songplays = activity.songplays_rows,
                    "job complete"
                );
            }
            Commands::Catalog => {
                let catalog = CatalogPipeline::new(&input, &output).run().await?;
                info!(
                    songs = catalog.songs_rows,
                    artists = catalog.artists_rows,
                    "catalog pipeline complete"
                );
            }
            Commands::Activity => {
                let activity = ActivityPipeline::new(&input, &output, config.timezone)
                    .run()
                    .await?;
                info!(
                    users = activity.users_rows,
                    time = activity.time_rows,
                    songplays = activity.songplays_rows,
                    "activity pipeline complete"
                );
            }
        }

        Ok(())
    }

    /// Build the job configuration from file and flags
    ///
    /// The config file is optional when both locations are given as flags;
    /// flags always win over file values.
    fn load_config(&self) -> Result<JobConfig> {
        let mut config = match &self.cli.config {
            Some(path) => JobConfig::from_file(path)
                .with_context(|| format!("Failed to load job config {}", path.display()))?,
            None => {
                let input = self
                    .cli
                    .input
                    .clone()
                    .ok_or_else(|| Error::config("No config file given; --input is required"))?;
                let output = self
                    .cli
                    .output
                    .clone()
                    .ok_or_else(|| Error::config("No config file given; --output is required"))?;
                JobConfig::new(input, output)
            }
        };

        if let Some(input) = &self.cli.input {
            config.input_url = input.clone();
        }
        if let Some(output) = &self.cli.output {
            config.output_url = output.clone();
        }
        if let Some(timezone) = self.cli.timezone {
            config.timezone = timezone;
        }

        Ok(config)
    }
}
