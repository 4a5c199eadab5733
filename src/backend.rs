//! Persistence collaborators for the board.
//!
//! A [`Backend`] mirrors board mutations to durable storage and can push
//! authoritative snapshots back over a channel. The board never blocks on
//! a backend: failures are caught at the [`Session`] boundary, logged, and
//! demoted to demo mode.

use std::sync::mpsc;

use crate::domain::{LessonPlan, PlanData, PlanId};

/// Markdown file format for a single lesson plan.
pub mod markdown;
pub use markdown::{LoadError, MarkdownPlan};

mod directory;
pub use directory::{Directory, DirectoryLoadError, FlushError};

mod demo;
pub use demo::demo_plans;

mod session;
pub use session::Session;

/// A persistence-collaborator failure.
///
/// Never propagated to the board's callers; the session logs it and falls
/// back to local-only mutation.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backing storage could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A stored record could not be parsed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The backend is not usable at all (missing directory, bad root).
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// A persistence collaborator.
///
/// The session calls these as a best-effort mirror of board operations.
/// Record order within a day is a view concern and is not part of this
/// interface; only record content and day assignment are persisted.
pub trait Backend {
    /// Lists all stored lesson plans.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the store cannot be read.
    fn list(&self) -> Result<Vec<LessonPlan>, BackendError>;

    /// Subscribes to pushed snapshots of the full record set.
    ///
    /// Each received snapshot is an authoritative full replacement of the
    /// collection. Backends without a push feed return `None`.
    fn subscribe(&mut self) -> Option<mpsc::Receiver<Vec<LessonPlan>>> {
        None
    }

    /// Stores a newly created plan.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the plan cannot be written.
    fn create(&mut self, plan: &LessonPlan) -> Result<(), BackendError>;

    /// Replaces the stored content of the plan matching `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the plan cannot be written.
    fn update(&mut self, id: &PlanId, data: &PlanData) -> Result<(), BackendError>;

    /// Deletes the stored plan matching `id`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the store cannot be written.
    fn delete(&mut self, id: &PlanId) -> Result<(), BackendError>;
}
