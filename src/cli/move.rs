use std::path::Path;

use tracing::instrument;
use weekplan::{Day, PlanId, Session};

use crate::cli::{open_initialised, parse_day, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The id of the lesson plan to move
    id: String,

    /// The day to move it to
    #[clap(value_parser = parse_day)]
    day: Day,
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

        if plan.day() == self.day {
            println!(
                "{}",
                format!("{} is already on {}", plan.title(), self.day).dim()
            );
            return Ok(());
        }

        let title = plan.title().to_string();
        session.move_to_day(&id, self.day);
        anyhow::ensure!(
            session.is_ready(),
            "moved locally but failed to write the plan file; check permissions on {}",
            root.display()
        );

        println!(
            "{}",
            format!("✅ Moved {title} to {}", self.day).success()
        );

        Ok(())
    }
}
