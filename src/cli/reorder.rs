use std::path::Path;

use tracing::instrument;
use weekplan::{Board, PlanId};

use crate::cli::{open_initialised, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The id of the lesson plan to reposition
    id: String,

    /// The id of the plan it should sit before; both must share a day
    before: String,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let directory = open_initialised(root)?;
        let plans = directory
            .load_all()
            .map_err(|e| anyhow::anyhow!("Failed to load plans: {e}"))?;
        let mut board = Board::from_plans(plans);

        let id = PlanId::from(self.id.as_str());
        let before = PlanId::from(self.before.as_str());

        for wanted in [&id, &before] {
            anyhow::ensure!(
                board.contains(wanted),
                "Lesson plan {wanted} not found"
            );
        }

        let same_day = board.get(&id).map(weekplan::LessonPlan::day)
            == board.get(&before).map(weekplan::LessonPlan::day);
        anyhow::ensure!(
            same_day,
            "Plans {id} and {before} are on different days; use `wplan move` instead"
        );

        if !board.reorder(&id, &before) {
            println!("{}", "Nothing to do".dim());
            return Ok(());
        }

        // Record order is a board-level concern; make it durable by
        // rewriting the recorded positions.
        directory.flush_board(&board)?;

        println!("{}", format!("✅ Reordered {id} before {before}").success());

        Ok(())
    }
}
