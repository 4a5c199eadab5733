//! The record store owning the ordered collection of lesson plans.

use crate::domain::{Day, LessonPlan, PlanData, PlanId, ValidationError};

/// The ordered collection of lesson plans.
///
/// Storage order is a single flat list; a day's display order is the
/// relative order of its plans within that list. Insertion order is display
/// order within a bucket at creation time.
///
/// Mutations that target a missing identifier (`delete`, `move_to_day`,
/// `reorder`) are deliberately silent no-ops: the input layer may deliver
/// duplicate events, and a collaborator may have deleted the record after a
/// slow round trip. `update` against a missing identifier is a logic error
/// in the caller and fails loudly instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    plans: Vec<LessonPlan>,
}

/// Errors that can occur when updating a lesson plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// No plan with the given identifier exists.
    #[error("lesson plan {0} not found")]
    NotFound(PlanId),
    /// The replacement data failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self { plans: Vec::new() }
    }

    /// Creates a board from an existing collection, keeping the first
    /// occurrence of any duplicated identifier.
    #[must_use]
    pub fn from_plans(plans: Vec<LessonPlan>) -> Self {
        let mut board = Self::new();
        board.replace_all(plans);
        board
    }

    /// Creates a new lesson plan from form data and appends it.
    ///
    /// A fresh identifier is minted from the current time; if that value is
    /// already taken (several creates within one millisecond) it is bumped
    /// until unique.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the title or subject is empty or
    /// the duration is zero. Nothing is inserted on failure.
    pub fn create(&mut self, data: PlanData) -> Result<&LessonPlan, ValidationError> {
        let id = self.mint_id();
        let plan = LessonPlan::new(id, data)?;

        tracing::info!("created lesson plan {} ({})", plan.id(), plan.title());

        let index = self.plans.len();
        self.plans.push(plan);
        Ok(&self.plans[index])
    }

    /// Replaces the plan matching `id` in place, preserving its position in
    /// the ordered collection.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::NotFound`] if no plan matches `id`, or
    /// [`UpdateError::Invalid`] if the replacement data fails validation.
    pub fn update(&mut self, id: &PlanId, data: PlanData) -> Result<&LessonPlan, UpdateError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| UpdateError::NotFound(id.clone()))?;

        let plan = LessonPlan::new(id.clone(), data)?;
        self.plans[index] = plan;

        tracing::info!("updated lesson plan {id}");

        Ok(&self.plans[index])
    }

    /// Removes the plan matching `id`.
    ///
    /// Idempotent: deleting an absent identifier is a no-op, since a
    /// collaborator may issue a duplicate delete after a slow round trip.
    /// Returns whether a plan was removed.
    pub fn delete(&mut self, id: &PlanId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!("delete of missing lesson plan {id} ignored");
            return false;
        };

        self.plans.remove(index);
        tracing::info!("deleted lesson plan {id}");
        true
    }

    /// Reassigns the day bucket of the plan matching `id`.
    ///
    /// The plan's position in the flat list is unchanged, so it joins its
    /// new day's view wherever that position falls. A no-op returning
    /// `false` when the id is absent or the plan is already on `day`, so a
    /// repeated move never emits a spurious change.
    pub fn move_to_day(&mut self, id: &PlanId, day: Day) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!("move of missing lesson plan {id} ignored");
            return false;
        };

        if self.plans[index].day() == day {
            return false;
        }

        self.plans[index].set_day(day);
        tracing::info!("moved lesson plan {id} to {day}");
        true
    }

    /// Repositions the plan matching `id` to the position previously
    /// occupied by `before_id`, shifting others accordingly.
    ///
    /// Only valid when both plans share a day bucket; a no-op returning
    /// `false` when either id is missing, the ids are equal, or the buckets
    /// differ.
    pub fn reorder(&mut self, id: &PlanId, before_id: &PlanId) -> bool {
        if id == before_id {
            return false;
        }

        let (Some(from), Some(to)) = (self.index_of(id), self.index_of(before_id)) else {
            tracing::debug!("reorder involving missing lesson plan ignored");
            return false;
        };

        if self.plans[from].day() != self.plans[to].day() {
            tracing::debug!("reorder across day buckets ignored");
            return false;
        }

        // Stable splice-and-reinsert: the insertion index is the target's
        // position before removal, so a forward move lands exactly in the
        // slot the target occupied.
        let plan = self.plans.remove(from);
        self.plans.insert(to, plan);

        tracing::info!("reordered lesson plan {id} before {before_id}");
        true
    }

    /// Replaces the whole collection with an authoritative snapshot.
    ///
    /// Pushed snapshots from the persistence feed are full replacements;
    /// nothing is merged or re-validated. The uniqueness invariant is
    /// re-established by keeping the first occurrence of a duplicated id.
    pub fn replace_all(&mut self, snapshot: Vec<LessonPlan>) {
        self.plans.clear();
        for plan in snapshot {
            if self.contains(plan.id()) {
                tracing::warn!("snapshot repeats lesson plan {}; keeping first", plan.id());
            } else {
                self.plans.push(plan);
            }
        }
    }

    /// The full ordered collection.
    #[must_use]
    pub fn plans(&self) -> &[LessonPlan] {
        &self.plans
    }

    /// The plan matching `id`, if present.
    #[must_use]
    pub fn get(&self, id: &PlanId) -> Option<&LessonPlan> {
        self.index_of(id).map(|index| &self.plans[index])
    }

    /// Whether a plan with this identifier exists.
    #[must_use]
    pub fn contains(&self, id: &PlanId) -> bool {
        self.index_of(id).is_some()
    }

    /// The plans assigned to `day`, in display order.
    pub fn plans_for(&self, day: Day) -> impl Iterator<Item = &LessonPlan> {
        self.plans.iter().filter(move |plan| plan.day() == day)
    }

    /// Number of plans on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether the board holds no plans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    fn index_of(&self, id: &PlanId) -> Option<usize> {
        self.plans.iter().position(|plan| plan.id() == id)
    }

    fn mint_id(&self) -> PlanId {
        let mut id = PlanId::generate();
        while self.contains(&id) {
            let millis = id.as_millis().expect("generated ids are numeric");
            id = PlanId::from_millis(millis + 1);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Board, UpdateError};
    use crate::domain::{Day, LessonPlan, PlanData, PlanId, ValidationError};

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
    fn create_assigns_unique_ids() {
        let mut board = Board::new();
        // Tight loop: several creates land within the same millisecond.
        for i in 0..50 {
            board.create(data(&format!("Lesson {i}"), Day::Monday)).unwrap();
        }

        let ids: HashSet<_> = board.plans().iter().map(LessonPlan::id).collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(board.len(), 50);
    }

    #[test]
    fn create_rejects_invalid_data_without_inserting() {
        let mut board = Board::new();
        let invalid = PlanData {
            subject: String::new(),
            ..data("Algebra", Day::Monday)
        };
        assert_eq!(board.create(invalid), Err(ValidationError::EmptySubject));
        assert!(board.is_empty());
    }

    #[test]
    fn update_replaces_in_place() {
        let (mut board, ids) = board_with(&[("A", Day::Monday), ("B", Day::Monday)]);

        board.update(&ids[0], data("A2", Day::Monday)).unwrap();

        // Position preserved.
        assert_eq!(board.plans()[0].title(), "A2");
        assert_eq!(board.plans()[0].id(), &ids[0]);
        assert_eq!(board.plans()[1].title(), "B");
    }

    #[test]
    fn update_missing_id_is_an_error() {
        let mut board = Board::new();
        let missing = PlanId::from("0");
        assert!(matches!(
            board.update(&missing, data("A", Day::Monday)),
            Err(UpdateError::NotFound(_))
        ));
    }

    #[test]
    fn delete_is_idempotent() {
        let (mut board, ids) = board_with(&[("A", Day::Monday)]);

        assert!(board.delete(&ids[0]));
        let after_first = board.clone();
        assert!(!board.delete(&ids[0]));

        assert_eq!(board, after_first);
        assert!(board.is_empty());
    }

    #[test]
    fn end_to_end_move_preserves_content() {
        let mut board = Board::new();
        let id = board
            .create(data("Algebra", Day::Monday))
            .unwrap()
            .id()
            .clone();

        assert!(board.move_to_day(&id, Day::Tuesday));

        let plan = board.get(&id).unwrap();
        assert_eq!(plan.day(), Day::Tuesday);
        assert_eq!(plan.title(), "Algebra");
        assert_eq!(plan.subject(), "Math");
    }

    #[test]
    fn repeated_move_to_same_day_is_a_no_op() {
        let (mut board, ids) = board_with(&[("A", Day::Monday)]);

        assert!(board.move_to_day(&ids[0], Day::Tuesday));
        assert!(!board.move_to_day(&ids[0], Day::Tuesday));
    }

    #[test]
    fn move_of_missing_id_is_a_no_op() {
        let (mut board, _) = board_with(&[("A", Day::Monday)]);
        let before = board.clone();

        assert!(!board.move_to_day(&PlanId::from("0"), Day::Friday));
        assert_eq!(board, before);
    }

    #[test]
    fn reorder_places_plan_before_target() {
        let (mut board, ids) = board_with(&[("A", Day::Monday), ("B", Day::Monday)]);

        // B takes A's position; Monday's view reads [B, A].
        assert!(board.reorder(&ids[1], &ids[0]));

        let monday: Vec<_> = board.plans_for(Day::Monday).map(LessonPlan::title).collect();
        assert_eq!(monday, ["B", "A"]);
    }

    #[test]
    fn reorder_forward_takes_targets_slot() {
        let (mut board, ids) = board_with(&[
            ("A", Day::Monday),
            ("B", Day::Monday),
            ("C", Day::Monday),
        ]);

        // Moving A onto C: A lands where C sat.
        assert!(board.reorder(&ids[0], &ids[2]));

        let monday: Vec<_> = board.plans_for(Day::Monday).map(LessonPlan::title).collect();
        assert_eq!(monday, ["B", "C", "A"]);
    }

    #[test]
    fn reorder_across_buckets_leaves_board_unchanged() {
        let (mut board, ids) = board_with(&[("A", Day::Monday), ("B", Day::Tuesday)]);
        let before = board.clone();

        assert!(!board.reorder(&ids[0], &ids[1]));
        assert_eq!(board, before);
    }

    #[test]
    fn reorder_onto_self_is_a_no_op() {
        let (mut board, ids) = board_with(&[("A", Day::Monday)]);
        let before = board.clone();

        assert!(!board.reorder(&ids[0], &ids[0]));
        assert_eq!(board, before);
    }

    #[test]
    fn reorder_with_missing_target_is_a_no_op() {
        let (mut board, ids) = board_with(&[("A", Day::Monday)]);
        let before = board.clone();

        assert!(!board.reorder(&ids[0], &PlanId::from("0")));
        assert_eq!(board, before);
    }

    #[test]
    fn plans_for_partitions_by_day() {
        let (board, _) = board_with(&[
            ("A", Day::Monday),
            ("B", Day::Tuesday),
            ("C", Day::Monday),
        ]);

        let monday: Vec<_> = board.plans_for(Day::Monday).map(LessonPlan::title).collect();
        assert_eq!(monday, ["A", "C"]);
        assert_eq!(board.plans_for(Day::Friday).count(), 0);
    }

    #[test]
    fn replace_all_keeps_first_occurrence_of_duplicate_ids() {
        let (source, ids) = board_with(&[("A", Day::Monday), ("B", Day::Tuesday)]);
        let mut duplicated = source.plans().to_vec();
        duplicated.push(source.get(&ids[0]).unwrap().clone());

        let mut board = Board::new();
        board.replace_all(duplicated);

        assert_eq!(board.len(), 2);
        assert_eq!(board.get(&ids[0]).unwrap().title(), "A");
    }
}
