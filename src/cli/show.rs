use std::path::Path;

use tracing::instrument;
use weekplan::{Directory, PlanId, Session};

use crate::cli::terminal::{Colorize, day_colored};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The id of the lesson plan to show
    id: String,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = Session::open(Directory::open(root.to_path_buf()));
        if !session.is_ready() {
            println!("{}", "(demo mode: showing sample data)".warning());
        }

        let id = PlanId::from(self.id.as_str());
        let Some(plan) = session.board().get(&id) else {
            anyhow::bail!("Lesson plan {id} not found");
        };

        let info = plan.day().info();
        println!("{}", plan.title());
        println!("  {} {}", "id:".dim(), plan.id());
        println!("  {} {}", "subject:".dim(), plan.subject());
        println!("  {} {}", "day:".dim(), day_colored(info.name, info.color));
        println!("  {} {} min", "duration:".dim(), plan.duration_minutes());
        if let Some(slot) = plan.time_slot() {
            println!("  {} {slot}", "time slot:".dim());
        }
        if !plan.objectives().is_empty() {
            println!("  {} {}", "objectives:".dim(), plan.objectives());
        }
        if !plan.materials().is_empty() {
            println!("  {} {}", "materials:".dim(), plan.materials());
        }
        if !plan.description().is_empty() {
            println!();
            println!("{}", plan.description());
        }

        Ok(())
    }
}
