use std::path::Path;

use chrono::Local;
use tracing::instrument;
use weekplan::{Directory, Session, domain::day::DAYS_OF_WEEK};

use crate::cli::terminal::{Colorize, day_colored, is_narrow};

#[derive(Debug, Default, clap::Parser)]
pub struct Command {
    /// Hide days with no lesson plans
    #[arg(long)]
    skip_empty: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = Session::open(Directory::open(root.to_path_buf()));
        if !session.is_ready() {
            println!("{}", "(demo mode: showing sample data)".warning());
        }

        let today = Local::now().date_naive();

        for info in DAYS_OF_WEEK {
            let plans: Vec<_> = session.board().plans_for(info.day).collect();
            if self.skip_empty && plans.is_empty() {
                continue;
            }

            let date = info.day.short_date_in_week_of(today);
            let count = plans.len();
            println!(
                "{} {}  {}",
                day_colored(info.name, info.color),
                date.dim(),
                format!("({count})").dim()
            );

            for plan in plans {
                let duration = format!("{} min", plan.duration_minutes());
                let slot = plan.time_slot().unwrap_or(&duration);
                if is_narrow() {
                    println!("  {}", plan.title());
                } else {
                    println!(
                        "  {}  {} {}",
                        plan.title(),
                        format!("({})", plan.subject()).dim(),
                        slot.dim()
                    );
                }
            }

            if count == 0 {
                println!("{}", "  —".dim());
            }
        }

        Ok(())
    }
}
