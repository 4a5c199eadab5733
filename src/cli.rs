use std::path::PathBuf;

mod add;
mod config;
mod delete;
mod edit;
mod init;
mod list;
mod r#move;
mod reorder;
mod show;
mod terminal;
mod week;

use clap::ArgAction;
use weekplan::Day;

/// Parse a day of the week from a string.
///
/// This is a CLI boundary function that accepts full names and three-letter
/// abbreviations in any case.
fn parse_day(s: &str) -> Result<Day, String> {
    s.parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the plans directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Week(week::Command::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show the week at a glance (default)
    Week(week::Command),

    /// Initialize a new plans directory
    Init(init::Command),

    /// Create a new lesson plan
    Add(add::Command),

    /// Edit an existing lesson plan
    Edit(edit::Command),

    /// Delete a lesson plan
    Delete(delete::Command),

    /// Move a lesson plan to a different day
    Move(r#move::Command),

    /// Reorder a lesson plan within its day
    Reorder(reorder::Command),

    /// Show detailed information about a lesson plan
    Show(show::Command),

    /// List lesson plans with filters
    List(list::Command),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Week(cmd) => cmd.run(&root),
            Self::Init(cmd) => cmd.run(&root),
            Self::Add(cmd) => cmd.run(&root),
            Self::Edit(cmd) => cmd.run(&root),
            Self::Delete(cmd) => cmd.run(&root),
            Self::Move(cmd) => cmd.run(&root),
            Self::Reorder(cmd) => cmd.run(&root),
            Self::Show(cmd) => cmd.run(&root),
            Self::List(cmd) => cmd.run(&root),
            Self::Config(cmd) => cmd.run(&root),
        }
    }
}

/// Opens the plans directory, refusing to proceed when it has never been
/// initialised. Mutating commands go through this so a typo'd `--root`
/// cannot silently scatter files.
fn open_initialised(root: &std::path::Path) -> anyhow::Result<weekplan::Directory> {
    let directory = weekplan::Directory::open(root.to_path_buf());
    anyhow::ensure!(
        directory.is_initialised(),
        "{} is not a plans directory (run `wplan init` first)",
        root.display()
    );
    Ok(directory)
}
