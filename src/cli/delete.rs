use std::path::Path;

use tracing::instrument;
use weekplan::{PlanId, Session};

use crate::cli::{open_initialised, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The id of the lesson plan to delete
    id: String,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let directory = open_initialised(root)?;
        let mut session = Session::open(directory);

        let id = PlanId::from(self.id.as_str());

        // Deleting an id that is already gone is a success, not an error.
        let Some(plan) = session.board().get(&id) else {
            println!("{}", format!("Lesson plan {id} is already gone").dim());
            return Ok(());
        };

        if !self.yes {
            let prompt = format!("Delete \"{}\" ({})?", plan.title(), plan.subject());
            let confirmed = dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Cancelled");
                return Ok(());
            }
        }

        session.delete(&id);
        anyhow::ensure!(
            session.is_ready(),
            "deleted locally but failed to remove the plan file; check permissions on {}",
            root.display()
        );

        println!("{}", format!("✅ Deleted {id}").success());

        Ok(())
    }
}
