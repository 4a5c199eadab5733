//! Turns gesture events into board operations.
//!
//! Cross-day moves are applied **eagerly**, while the pointer hovers a day
//! column, so the visual grouping updates live during the drag. Same-day
//! reordering is deferred to the drop. This asymmetry is an explicit
//! contract of the board's observable behaviour, not an accident.

use crate::{
    board::{Board, DropTarget, GestureTracker},
    domain::PlanId,
};

/// What a completed gesture did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drop changed nothing: no gesture was active, the plan was
    /// dropped on itself or on empty space, or any cross-day move had
    /// already been applied while hovering.
    None,
    /// The plan was repositioned within its day.
    Reordered,
}

/// Starts a gesture on the given record.
pub fn drag_start(tracker: &mut GestureTracker, id: PlanId) {
    tracker.begin(id);
}

/// Handles a hover update during a drag.
///
/// Records the target, and applies an eager cross-day move when the pointer
/// is over a day column that differs from the dragged plan's current day.
/// Hovering another plan's card defers all resolution to the drop.
///
/// Degrades to a no-op if the dragged record was deleted mid-gesture:
/// deletions always win.
pub fn drag_over(tracker: &mut GestureTracker, board: &mut Board, target: Option<DropTarget>) {
    tracker.hover(target);

    let Some(active) = tracker.active().cloned() else {
        return;
    };
    let Some(DropTarget::Day(day)) = tracker.hover_target() else {
        return;
    };

    let day = *day;
    if board.get(&active).is_some_and(|plan| plan.day() != day) {
        board.move_to_day(&active, day);
    }
}

/// Finalises the gesture on pointer-up.
///
/// A drop onto another plan in the same day reorders; everything else is a
/// no-op (self-drops, drops over empty space, day targets already resolved
/// eagerly, cross-day plan targets whose bucket move already happened, and
/// records deleted mid-gesture). The tracker always returns to Idle.
pub fn drag_end(tracker: &mut GestureTracker, board: &mut Board) -> DropOutcome {
    let Some((active, hover)) = tracker.end() else {
        return DropOutcome::None;
    };

    let Some(DropTarget::Plan(over)) = hover else {
        return DropOutcome::None;
    };

    if active == over {
        return DropOutcome::None;
    }

    let same_day = match (board.get(&active), board.get(&over)) {
        (Some(dragged), Some(target)) => dragged.day() == target.day(),
        // One of the records is gone; a concurrent delete wins.
        _ => false,
    };

    if same_day && board.reorder(&active, &over) {
        DropOutcome::Reordered
    } else {
        DropOutcome::None
    }
}

/// Cancels a gesture (escape key, pointer-capture loss).
///
/// Equivalent to a drop over empty space: the tracker is cleared with no
/// structural mutation.
pub fn drag_cancel(tracker: &mut GestureTracker) {
    if tracker.end().is_some() {
        tracing::debug!("drag cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::{DropOutcome, drag_cancel, drag_end, drag_over, drag_start};
    use crate::{
        board::{Board, DropTarget, GestureTracker},
        domain::{Day, LessonPlan, PlanData, PlanId},
    };

    fn data(title: &str, day: Day) -> PlanData {
        PlanData {
            title: title.to_string(),
            subject: "Math".to_string(),
            day,
            ..PlanData::default()
        }
    }

    fn board_with(titles: &[(&str, Day)]) -> (Board, Vec<PlanId>) {
        let mut board = Board::new();
        let ids = titles
            .iter()
            .map(|&(title, day)| board.create(data(title, day)).unwrap().id().clone())
            .collect();
        (board, ids)
    }

    #[test]
    fn hovering_a_different_day_moves_eagerly() {
        let (mut board, ids) = board_with(&[("X", Day::Monday)]);
        let mut tracker = GestureTracker::new();

        drag_start(&mut tracker, ids[0].clone());
        drag_over(&mut tracker, &mut board, Some(DropTarget::Day(Day::Friday)));

        // The move happened during the hover, before any drop.
        assert_eq!(board.get(&ids[0]).unwrap().day(), Day::Friday);

        // Dropping over empty space afterwards changes nothing more.
        drag_over(&mut tracker, &mut board, None);
        assert_eq!(drag_end(&mut tracker, &mut board), DropOutcome::None);
        assert_eq!(board.get(&ids[0]).unwrap().day(), Day::Friday);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn hovering_the_current_day_changes_nothing() {
        let (mut board, ids) = board_with(&[("X", Day::Monday)]);
        let before = board.clone();
        let mut tracker = GestureTracker::new();

        drag_start(&mut tracker, ids[0].clone());
        drag_over(&mut tracker, &mut board, Some(DropTarget::Day(Day::Monday)));

        assert_eq!(board, before);
    }

    #[test]
    fn hovering_a_plan_defers_to_the_drop() {
        let (mut board, ids) = board_with(&[("A", Day::Monday), ("B", Day::Monday)]);
        let before = board.clone();
        let mut tracker = GestureTracker::new();

        drag_start(&mut tracker, ids[1].clone());
        drag_over(
            &mut tracker,
            &mut board,
            Some(DropTarget::Plan(ids[0].clone())),
        );

        // Nothing moved yet.
        assert_eq!(board, before);

        assert_eq!(drag_end(&mut tracker, &mut board), DropOutcome::Reordered);
        let monday: Vec<_> = board.plans_for(Day::Monday).map(LessonPlan::title).collect();
        assert_eq!(monday, ["B", "A"]);
    }

    #[test]
    fn dropping_on_itself_changes_nothing() {
        let (mut board, ids) = board_with(&[("A", Day::Monday)]);
        let before = board.clone();
        let mut tracker = GestureTracker::new();

        drag_start(&mut tracker, ids[0].clone());
        drag_over(
            &mut tracker,
            &mut board,
            Some(DropTarget::Plan(ids[0].clone())),
        );

        assert_eq!(drag_end(&mut tracker, &mut board), DropOutcome::None);
        assert_eq!(board, before);
    }

    #[test]
    fn cross_day_plan_target_does_not_reorder() {
        let (mut board, ids) = board_with(&[("A", Day::Monday), ("B", Day::Tuesday)]);
        let before = board.clone();
        let mut tracker = GestureTracker::new();

        drag_start(&mut tracker, ids[0].clone());
        drag_over(
            &mut tracker,
            &mut board,
            Some(DropTarget::Plan(ids[1].clone())),
        );

        assert_eq!(drag_end(&mut tracker, &mut board), DropOutcome::None);
        assert_eq!(board, before);
    }

    #[test]
    fn deleted_record_degrades_every_step_to_a_no_op() {
        let (mut board, ids) = board_with(&[("A", Day::Monday), ("B", Day::Monday)]);
        let mut tracker = GestureTracker::new();

        drag_start(&mut tracker, ids[0].clone());
        board.delete(&ids[0]);

        drag_over(&mut tracker, &mut board, Some(DropTarget::Day(Day::Friday)));
        drag_over(
            &mut tracker,
            &mut board,
            Some(DropTarget::Plan(ids[1].clone())),
        );
        assert_eq!(drag_end(&mut tracker, &mut board), DropOutcome::None);

        assert_eq!(board.len(), 1);
        assert_eq!(board.get(&ids[1]).unwrap().day(), Day::Monday);
    }

    #[test]
    fn cancel_leaves_the_board_untouched() {
        let (mut board, ids) = board_with(&[("A", Day::Monday), ("B", Day::Monday)]);
        let before = board.clone();
        let mut tracker = GestureTracker::new();

        drag_start(&mut tracker, ids[1].clone());
        drag_over(
            &mut tracker,
            &mut board,
            Some(DropTarget::Plan(ids[0].clone())),
        );
        drag_cancel(&mut tracker);

        assert_eq!(board, before);
        assert!(!tracker.is_dragging());
        // A stray pointer-up after the cancel is harmless.
        assert_eq!(drag_end(&mut tracker, &mut board), DropOutcome::None);
    }
}
