//! Tracking of the record being dragged across one gesture.

use crate::{
    board::Board,
    domain::{Day, LessonPlan, PlanId},
};

/// What the pointer is currently over during a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Another lesson plan's card.
    Plan(PlanId),
    /// A day column as a whole.
    Day(Day),
}

/// Tracks the identifier of the record being dragged and the drop target
/// under the pointer, for the lifetime of one gesture.
///
/// Two states: **Idle** (no active id) and **Dragging** (active id set,
/// hover target possibly set). Every gesture ends back in Idle, whatever
/// its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureTracker {
    active: Option<PlanId>,
    hover: Option<DropTarget>,
}

impl GestureTracker {
    /// Creates a tracker in the Idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: None,
            hover: None,
        }
    }

    /// Starts a gesture on the given record.
    ///
    /// Input drivers guarantee a gesture ends before the next begins; if a
    /// begin arrives while already Dragging, the previous gesture is
    /// overwritten with a warning rather than treated as an error.
    pub fn begin(&mut self, id: PlanId) {
        if let Some(previous) = self.active.take() {
            tracing::warn!("drag of {id} began while {previous} was still active");
        }
        self.active = Some(id);
        self.hover = None;
    }

    /// Updates the drop target under the pointer.
    ///
    /// A no-op while Idle: hover events with no active gesture are stray
    /// input and are ignored.
    pub fn hover(&mut self, target: Option<DropTarget>) {
        if self.active.is_none() {
            tracing::debug!("hover with no active gesture ignored");
            return;
        }
        self.hover = target;
    }

    /// Ends the gesture, returning the final `(active, hover)` pair.
    ///
    /// Always succeeds and always returns to Idle. Idempotent: a pointer-up
    /// with no matching pointer-down returns `None` without complaint.
    pub fn end(&mut self) -> Option<(PlanId, Option<DropTarget>)> {
        let active = self.active.take()?;
        Some((active, self.hover.take()))
    }

    /// The identifier of the record being dragged, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&PlanId> {
        self.active.as_ref()
    }

    /// The current drop target under the pointer, if any.
    #[must_use]
    pub const fn hover_target(&self) -> Option<&DropTarget> {
        self.hover.as_ref()
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The record being dragged, for drag-overlay feedback.
    ///
    /// `None` when Idle, and also when the record was deleted mid-gesture
    /// by another collaborator.
    #[must_use]
    pub fn active_plan<'a>(&self, board: &'a Board) -> Option<&'a LessonPlan> {
        board.get(self.active.as_ref()?)
    }
}
