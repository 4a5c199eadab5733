//! Weekly lesson-plan board
//!
//! Lesson plans are records assigned to one of seven day buckets. The board
//! owns the ordered collection; drag gestures move plans between days and
//! reorder them within a day. Plans are optionally persisted as markdown
//! documents in a directory.

pub mod domain;
pub use domain::{Config, Day, DayInfo, LessonPlan, PlanData, PlanId, ValidationError};

/// The in-memory board, gesture tracking, and placement resolution.
pub mod board;
pub use board::{Board, DropOutcome, DropTarget, GestureTracker, UpdateError};

/// Persistence collaborators and the board session.
pub mod backend;
pub use backend::{Backend, BackendError, Directory, Session};
