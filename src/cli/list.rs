use std::path::Path;

use tracing::instrument;
use weekplan::{Day, Directory, LessonPlan, Session};

use crate::cli::{parse_day, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Only list plans on this day
    #[arg(short, long, value_parser = parse_day)]
    day: Option<Day>,

    /// Only list plans whose subject matches (case-insensitive)
    #[arg(short, long)]
    subject: Option<String>,

    /// Emit machine-readable JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = Session::open(Directory::open(root.to_path_buf()));

        let subject = self.subject.map(|s| s.to_lowercase());
        let plans: Vec<&LessonPlan> = session
            .board()
            .plans()
            .iter()
            .filter(|plan| self.day.is_none_or(|day| plan.day() == day))
            .filter(|plan| {
                subject
                    .as_ref()
                    .is_none_or(|subject| plan.subject().to_lowercase() == *subject)
            })
            .collect();

        if self.json {
            let records: Vec<_> = plans.iter().copied().map(to_json).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        if !session.is_ready() {
            println!("{}", "(demo mode: listing sample data)".warning());
        }

        if plans.is_empty() {
            println!("{}", "No lesson plans match".dim());
            return Ok(());
        }

        for plan in plans {
            let slot = plan
                .time_slot()
                .map_or_else(String::new, |slot| format!("  {slot}").dim());
            println!(
                "{}  {:<9} {} ({}, {} min){slot}",
                plan.id().to_string().dim(),
                plan.day().to_string(),
                plan.title(),
                plan.subject(),
                plan.duration_minutes(),
            );
        }

        Ok(())
    }
}

fn to_json(plan: &LessonPlan) -> serde_json::Value {
    serde_json::json!({
        "id": plan.id().as_str(),
        "title": plan.title(),
        "subject": plan.subject(),
        "description": plan.description(),
        "duration_minutes": plan.duration_minutes(),
        "objectives": plan.objectives(),
        "materials": plan.materials(),
        "day": plan.day(),
        "time_slot": plan.time_slot(),
    })
}
