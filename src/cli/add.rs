use std::path::Path;

use tracing::instrument;
use weekplan::{Day, PlanData, Session};

use crate::cli::{open_initialised, parse_day, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Title of the lesson
    title: String,

    /// Subject taught
    #[arg(short, long)]
    subject: String,

    /// Day of the week (defaults to the configured default day)
    #[arg(short, long, value_parser = parse_day)]
    day: Option<Day>,

    /// Duration in minutes (defaults to the configured default duration)
    #[arg(long)]
    duration: Option<u32>,

    /// Free-text description
    #[arg(long, default_value = "")]
    description: String,

    /// Learning objectives
    #[arg(long, default_value = "")]
    objectives: String,

    /// Materials needed
    #[arg(long, default_value = "")]
    materials: String,

    /// Display time slot, e.g. "9:00 AM - 10:30 AM"
    #[arg(long)]
    time_slot: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let directory = open_initialised(root)?;
        let config = directory.config().clone();

        let data = PlanData {
            title: self.title,
            subject: self.subject,
            description: self.description,
            duration_minutes: self.duration.unwrap_or(config.default_duration_minutes()),
            objectives: self.objectives,
            materials: self.materials,
            day: self.day.unwrap_or(config.default_day()),
            time_slot: self.time_slot,
        };
        let day = data.day;

        let mut session = Session::open(directory);
        let id = session.create(data)?;
        anyhow::ensure!(
            session.is_ready(),
            "created locally but failed to write the plan file; check permissions on {}",
            root.display()
        );

        let title = session
            .board()
            .get(&id)
            .map_or_else(String::new, |plan| plan.title().to_string());
        println!("{}", format!("✅ Added {title} ({id}) to {day}").success());

        Ok(())
    }
}
