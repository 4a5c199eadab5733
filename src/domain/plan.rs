//! Lesson-plan records and their validation.

use std::fmt;

use chrono::Utc;
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::domain::Day;

/// Unique identifier of a lesson plan.
///
/// Identifiers are strings derived from the creation time in milliseconds.
/// The generation scheme alone does not guarantee uniqueness; the record
/// store enforces the uniqueness invariant by bumping colliding values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// Generates an identifier from the current unix time in milliseconds.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    /// Builds an identifier from a millisecond timestamp.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier reinterpreted as a millisecond timestamp, when it is
    /// one. Used by the store to bump colliding generated ids.
    pub(crate) fn as_millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<String> for PlanId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlanId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lesson plan assigned to one day of the weekly board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPlan {
    id: PlanId,
    title: NonEmptyString,
    subject: NonEmptyString,
    description: String,
    duration_minutes: u32,
    objectives: String,
    materials: String,
    day: Day,
    time_slot: Option<String>,
}

/// The mutable content of a lesson plan, without its identity.
///
/// This is the shape produced by the edit form: the same fields as
/// [`LessonPlan`] minus the identifier, with plain strings that have not
/// been validated yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanData {
    /// Title of the lesson (required).
    pub title: String,
    /// Subject taught (required).
    pub subject: String,
    /// Free-text description.
    pub description: String,
    /// Duration in minutes (must be positive).
    pub duration_minutes: u32,
    /// Learning objectives, free text.
    pub objectives: String,
    /// Materials needed, free text.
    pub materials: String,
    /// Day bucket the plan is assigned to.
    pub day: Day,
    /// Optional display time slot, e.g. "9:00 AM - 10:30 AM".
    pub time_slot: Option<String>,
}

impl Default for PlanData {
    fn default() -> Self {
        Self {
            title: String::new(),
            subject: String::new(),
            description: String::new(),
            duration_minutes: 60,
            objectives: String::new(),
            materials: String::new(),
            day: Day::Monday,
            time_slot: None,
        }
    }
}

/// A required field is missing or out of range.
///
/// Surfaced synchronously from `create`/`update` for user-facing
/// correction; never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The title is empty or whitespace.
    #[error("a lesson plan requires a title")]
    EmptyTitle,
    /// The subject is empty or whitespace.
    #[error("a lesson plan requires a subject")]
    EmptySubject,
    /// The duration is zero minutes.
    #[error("duration must be a positive number of minutes")]
    ZeroDuration,
}

impl LessonPlan {
    /// Builds a validated lesson plan from form data.
    ///
    /// Title and subject are trimmed before the emptiness check; an empty
    /// `time_slot` is normalised to `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the title or subject is empty or
    /// the duration is zero.
    pub fn new(id: PlanId, data: PlanData) -> Result<Self, ValidationError> {
        let title = NonEmptyString::new(data.title.trim().to_string())
            .map_err(|_| ValidationError::EmptyTitle)?;
        let subject = NonEmptyString::new(data.subject.trim().to_string())
            .map_err(|_| ValidationError::EmptySubject)?;

        if data.duration_minutes == 0 {
            return Err(ValidationError::ZeroDuration);
        }

        let time_slot = data.time_slot.filter(|slot| !slot.trim().is_empty());

        Ok(Self {
            id,
            title,
            subject,
            description: data.description,
            duration_minutes: data.duration_minutes,
            objectives: data.objectives,
            materials: data.materials,
            day: data.day,
            time_slot,
        })
    }

    /// The unique identifier of this plan.
    #[must_use]
    pub const fn id(&self) -> &PlanId {
        &self.id
    }

    /// The lesson title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// The subject taught.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// The free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The duration in minutes. Always positive.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Learning objectives.
    #[must_use]
    pub fn objectives(&self) -> &str {
        &self.objectives
    }

    /// Materials needed.
    #[must_use]
    pub fn materials(&self) -> &str {
        &self.materials
    }

    /// The day bucket this plan is assigned to.
    #[must_use]
    pub const fn day(&self) -> Day {
        self.day
    }

    /// Optional display time slot.
    #[must_use]
    pub fn time_slot(&self) -> Option<&str> {
        self.time_slot.as_deref()
    }

    /// Reassigns the day bucket. The store is the only caller; everything
    /// else mutates through its operations.
    pub(crate) const fn set_day(&mut self, day: Day) {
        self.day = day;
    }

    /// The plan's content as form data, for pre-filling an edit form.
    #[must_use]
    pub fn to_data(&self) -> PlanData {
        PlanData {
            title: self.title.as_str().to_string(),
            subject: self.subject.as_str().to_string(),
            description: self.description.clone(),
            duration_minutes: self.duration_minutes,
            objectives: self.objectives.clone(),
            materials: self.materials.clone(),
            day: self.day,
            time_slot: self.time_slot.clone(),
        }
    }
}
