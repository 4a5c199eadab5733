use std::path::Path;

use tracing::instrument;
use weekplan::{Day, PlanId, Session};

use crate::cli::{open_initialised, parse_day, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The id of the lesson plan to edit
    id: String,

    /// New title
    #[arg(long)]
    title: Option<String>,

    /// New subject
    #[arg(short, long)]
    subject: Option<String>,

    /// New day of the week
    #[arg(short, long, value_parser = parse_day)]
    day: Option<Day>,

    /// New duration in minutes
    #[arg(long)]
    duration: Option<u32>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New learning objectives
    #[arg(long)]
    objectives: Option<String>,

    /// New materials
    #[arg(long)]
    materials: Option<String>,

    /// New display time slot (pass an empty string to clear)
    #[arg(long)]
    time_slot: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let directory = open_initialised(root)?;
        let mut session = Session::open(directory);

        let id = PlanId::from(self.id.as_str());
        let Some(plan) = session.board().get(&id) else {
            anyhow::bail!("Lesson plan {id} not found");
        };

        // Start from the stored content; only the provided flags change.
        let mut data = plan.to_data();
        if let Some(title) = self.title {
            data.title = title;
        }
        if let Some(subject) = self.subject {
            data.subject = subject;
        }
        if let Some(day) = self.day {
            data.day = day;
        }
        if let Some(duration) = self.duration {
            data.duration_minutes = duration;
        }
        if let Some(description) = self.description {
            data.description = description;
        }
        if let Some(objectives) = self.objectives {
            data.objectives = objectives;
        }
        if let Some(time_slot) = self.time_slot {
            data.time_slot = if time_slot.is_empty() {
                None
            } else {
                Some(time_slot)
            };
        }
        if let Some(materials) = self.materials {
            data.materials = materials;
        }

        session.update(&id, data)?;
        anyhow::ensure!(
            session.is_ready(),
            "updated locally but failed to write the plan file; check permissions on {}",
            root.display()
        );

        println!("{}", format!("✅ Updated {id}").success());

        Ok(())
    }
}
