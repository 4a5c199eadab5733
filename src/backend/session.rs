//! Glue between the in-memory board and an optional persistence backend.

use std::sync::mpsc;

use crate::{
    backend::{Backend, demo_plans},
    board::Board,
    domain::{Day, LessonPlan, PlanData, PlanId, ValidationError},
};

use super::BackendError;

/// A board wired to an optional persistence collaborator.
///
/// Mutations apply to the local board first and are mirrored to the
/// backend best-effort: a backend failure is logged and demotes the
/// session to not-ready, never surfaces to the caller, and never touches
/// the local result. Without a usable backend the session runs against
/// seeded sample data ("demo mode").
#[derive(Debug)]
pub struct Session<B> {
    board: Board,
    backend: Option<B>,
    snapshots: Option<mpsc::Receiver<Vec<LessonPlan>>>,
    ready: bool,
}

impl<B: Backend> Session<B> {
    /// Creates a session with no backend, seeded with the demo plans.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            board: Board::from_plans(demo_plans()),
            backend: None,
            snapshots: None,
            ready: false,
        }
    }

    /// Creates a session over a backend.
    ///
    /// A successful `list()` seeds the board and marks the session ready;
    /// a failing one is logged and the session falls back to demo mode.
    pub fn open(mut backend: B) -> Self {
        match backend.list() {
            Ok(plans) => {
                let snapshots = backend.subscribe();
                Self {
                    board: Board::from_plans(plans),
                    backend: Some(backend),
                    snapshots,
                    ready: true,
                }
            }
            Err(e) => {
                tracing::warn!("backend not available, running in demo mode: {e}");
                Self {
                    board: Board::from_plans(demo_plans()),
                    backend: None,
                    snapshots: None,
                    ready: false,
                }
            }
        }
    }

    /// Creates a lesson plan locally and mirrors it to the backend.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the form data is invalid; backend
    /// failures are not errors.
    pub fn create(&mut self, data: PlanData) -> Result<PlanId, ValidationError> {
        let plan = self.board.create(data)?.clone();
        let id = plan.id().clone();
        self.mirror(|backend| backend.create(&plan));
        Ok(id)
    }

    /// Updates a lesson plan locally and mirrors it to the backend.
    ///
    /// # Errors
    ///
    /// Returns the board's [`crate::board::UpdateError`]; backend failures
    /// are not errors.
    pub fn update(&mut self, id: &PlanId, data: PlanData) -> Result<(), crate::board::UpdateError> {
        self.board.update(id, data.clone())?;
        self.mirror(|backend| backend.update(id, &data));
        Ok(())
    }

    /// Deletes a lesson plan locally and mirrors the delete. Idempotent.
    pub fn delete(&mut self, id: &PlanId) {
        self.board.delete(id);
        self.mirror(|backend| backend.delete(id));
    }

    /// Reassigns a plan's day locally and mirrors it as a content update.
    ///
    /// A no-op (nothing mirrored) when the id is absent or the day is
    /// unchanged.
    pub fn move_to_day(&mut self, id: &PlanId, day: Day) {
        if !self.board.move_to_day(id, day) {
            return;
        }
        let Some(data) = self.board.get(id).map(LessonPlan::to_data) else {
            return;
        };
        self.mirror(|backend| backend.update(id, &data));
    }

    /// Repositions a plan within its day.
    ///
    /// Ordering is a local view concern; it is not mirrored through the
    /// backend interface.
    pub fn reorder(&mut self, id: &PlanId, before_id: &PlanId) -> bool {
        self.board.reorder(id, before_id)
    }

    /// Drains pushed snapshots, applying each as an authoritative full
    /// replacement of the collection. Returns how many were applied.
    pub fn drain_snapshots(&mut self) -> usize {
        let Some(receiver) = &self.snapshots else {
            return 0;
        };

        let mut applied = 0;
        while let Ok(snapshot) = receiver.try_recv() {
            self.board.replace_all(snapshot);
            applied += 1;
        }
        if applied > 0 {
            tracing::debug!("applied {applied} snapshot(s) from the backend feed");
        }
        applied
    }

    fn mirror(&mut self, op: impl FnOnce(&mut B) -> Result<(), BackendError>) {
        let Some(backend) = &mut self.backend else {
            return;
        };
        if let Err(e) = op(backend) {
            tracing::warn!("backend write failed, continuing locally: {e}");
            self.ready = false;
        }
    }
}

impl<B> Session<B> {
    /// The local board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the board, for gesture-driven resolution.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Whether the persistence backend is connected and healthy.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::Session;
    use crate::{
        backend::{Backend, BackendError},
        domain::{Day, LessonPlan, PlanData, PlanId},
    };

    /// In-memory backend with a failure switch and a snapshot feed.
    #[derive(Default)]
    struct FakeBackend {
        plans: Vec<LessonPlan>,
        fail_list: bool,
        fail_writes: bool,
        snapshot_tx: Option<mpsc::Sender<Vec<LessonPlan>>>,
        writes: usize,
    }

    impl Backend for FakeBackend {
        fn list(&self) -> Result<Vec<LessonPlan>, BackendError> {
            if self.fail_list {
                return Err(BackendError::Unavailable("down".to_string()));
            }
            Ok(self.plans.clone())
        }

        fn subscribe(&mut self) -> Option<mpsc::Receiver<Vec<LessonPlan>>> {
            let (tx, rx) = mpsc::channel();
            self.snapshot_tx = Some(tx);
            Some(rx)
        }

        fn create(&mut self, plan: &LessonPlan) -> Result<(), BackendError> {
            if self.fail_writes {
                return Err(BackendError::Unavailable("down".to_string()));
            }
            self.writes += 1;
            self.plans.push(plan.clone());
            Ok(())
        }

        fn update(&mut self, id: &PlanId, data: &PlanData) -> Result<(), BackendError> {
            if self.fail_writes {
                return Err(BackendError::Unavailable("down".to_string()));
            }
            self.writes += 1;
            if let Some(plan) = self.plans.iter_mut().find(|plan| plan.id() == id) {
                *plan = LessonPlan::new(id.clone(), data.clone()).unwrap();
            }
            Ok(())
        }

        fn delete(&mut self, id: &PlanId) -> Result<(), BackendError> {
            if self.fail_writes {
                return Err(BackendError::Unavailable("down".to_string()));
            }
            self.writes += 1;
            self.plans.retain(|plan| plan.id() != id);
            Ok(())
        }
    }

    fn data(title: &str, day: Day) -> PlanData {
        PlanData {
            title: title.to_string(),
            subject: "Math".to_string(),
            day,
            ..PlanData::default()
        }
    }

    #[test]
    fn failing_backend_falls_back_to_demo_mode() {
        let backend = FakeBackend {
            fail_list: true,
            ..FakeBackend::default()
        };
        let session = Session::open(backend);

        assert!(!session.is_ready());
        assert!(!session.board().is_empty());
    }

    #[test]
    fn healthy_backend_seeds_the_board_and_is_ready() {
        let session = Session::open(FakeBackend::default());
        assert!(session.is_ready());
        assert!(session.board().is_empty());
    }

    #[test]
    fn mutations_are_mirrored() {
        let mut session = Session::open(FakeBackend::default());

        let id = session.create(data("A", Day::Monday)).unwrap();
        session.move_to_day(&id, Day::Friday);
        session.delete(&id);

        assert!(session.is_ready());
        assert!(session.board().is_empty());
    }

    #[test]
    fn write_failure_demotes_to_not_ready_but_keeps_local_state() {
        let backend = FakeBackend {
            fail_writes: true,
            ..FakeBackend::default()
        };
        let mut session = Session::open(backend);

        let id = session.create(data("A", Day::Monday)).unwrap();

        assert!(!session.is_ready());
        assert_eq!(session.board().get(&id).unwrap().title(), "A");
    }

    #[test]
    fn repeated_move_is_not_mirrored_twice() {
        let mut session = Session::open(FakeBackend::default());
        let id = session.create(data("A", Day::Monday)).unwrap();

        session.move_to_day(&id, Day::Friday);
        session.move_to_day(&id, Day::Friday);

        // One create + one update; the second move was a no-op.
        assert_eq!(
            session.backend.as_ref().unwrap().writes,
            2,
            "no spurious update for a repeated move"
        );
    }

    #[test]
    fn snapshots_replace_the_whole_board() {
        let mut session = Session::open(FakeBackend::default());
        session.create(data("Local", Day::Monday)).unwrap();

        let replacement = vec![
            LessonPlan::new(PlanId::from("10"), data("Pushed", Day::Tuesday)).unwrap(),
        ];
        session
            .backend
            .as_ref()
            .unwrap()
            .snapshot_tx
            .as_ref()
            .unwrap()
            .send(replacement)
            .unwrap();

        assert_eq!(session.drain_snapshots(), 1);
        assert_eq!(session.board().len(), 1);
        assert_eq!(session.board().plans()[0].title(), "Pushed");
    }

    #[test]
    fn demo_session_mutates_locally() {
        let mut session: Session<FakeBackend> = Session::demo();
        let before = session.board().len();

        let id = session.create(data("Extra", Day::Sunday)).unwrap();
        assert_eq!(session.board().len(), before + 1);

        session.delete(&id);
        assert_eq!(session.board().len(), before);
        assert!(!session.is_ready());
    }
}
