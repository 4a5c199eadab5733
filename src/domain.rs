//! Domain models for the weekly lesson-plan board.
//!
//! This module contains the core domain types: lesson-plan records, the
//! seven day buckets they are assigned to, and configuration.

/// Lesson-plan record, form data, and validation.
pub mod plan;
pub use plan::{LessonPlan, PlanData, PlanId, ValidationError};

/// Day-of-week buckets and their display metadata.
pub mod day;
pub use day::{Day, DayInfo, ParseDayError};

mod config;
pub use config::Config;
