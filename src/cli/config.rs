use std::path::Path;

use tracing::instrument;
use weekplan::Day;

use crate::cli::{open_initialised, parse_day, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Print the current configuration
    Show,

    /// Set the default day for new plans
    DefaultDay {
        /// The day to use
        #[arg(value_parser = parse_day)]
        day: Day,
    },

    /// Set the default duration (minutes) for new plans
    DefaultDuration {
        /// Duration in minutes
        minutes: u32,
    },

    /// Allow or forbid unrecognised markdown files in the plans directory
    AllowUnrecognised {
        /// "true" to skip foreign files, "false" to reject them
        value: bool,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut directory = open_initialised(root)?;

        match self.action {
            Action::Show => {
                let config = directory.config();
                println!(
                    "default_duration_minutes = {}",
                    config.default_duration_minutes()
                );
                println!("default_day = \"{}\"", config.default_day());
                println!("allow_unrecognised = {}", config.allow_unrecognised);
                return Ok(());
            }
            Action::DefaultDay { day } => directory.config_mut().set_default_day(day),
            Action::DefaultDuration { minutes } => {
                anyhow::ensure!(minutes > 0, "duration must be a positive number of minutes");
                directory.config_mut().set_default_duration_minutes(minutes);
            }
            Action::AllowUnrecognised { value } => {
                directory.config_mut().allow_unrecognised = value;
            }
        }

        directory
            .save_config()
            .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;

        println!("{}", "✅ Updated config.toml".success());

        Ok(())
    }
}
