//! The in-memory board: record store, gesture tracking, and placement.
//!
//! The [`Board`] exclusively owns the ordered collection of lesson plans;
//! every other component reads through its accessors and mutates through
//! its operations. The [`GestureTracker`] and the resolver functions in
//! [`resolver`] turn drag gestures into board operations.

mod store;
pub use store::{Board, UpdateError};

mod gesture;
pub use gesture::{DropTarget, GestureTracker};

/// Drag-gesture placement resolution.
pub mod resolver;
pub use resolver::DropOutcome;
