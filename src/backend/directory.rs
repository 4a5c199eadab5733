//! A filesystem backed store of lesson plans.
//!
//! One markdown file per plan under a root directory, with a `config.toml`
//! alongside. The directory is the reference [`Backend`] implementation.

use std::{
    ffi::OsStr,
    fmt, io,
    path::{Path, PathBuf},
};

use nonempty::NonEmpty;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

use crate::{
    backend::{Backend, BackendError, MarkdownPlan, markdown::LoadError},
    board::Board,
    domain::{Config, LessonPlan, PlanData, PlanId},
};

/// A filesystem backed store of lesson plans.
#[derive(Debug)]
pub struct Directory {
    /// The root of the directory plans are stored in.
    root: PathBuf,
    config: Config,
}

/// Errors that can occur when loading a plans directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryLoadError {
    /// The directory contains markdown files that are not lesson plans and
    /// the configuration does not allow skipping them.
    UnrecognisedFiles(Vec<PathBuf>),
}

impl fmt::Display for DirectoryLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognisedFiles(paths) => {
                write!(f, "Unrecognised files: ")?;
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", path.display())?;
                }
                Ok(())
            }
        }
    }
}

impl Directory {
    /// Opens a plans directory at the given path.
    ///
    /// The configuration is read from `config.toml` in the root; a missing
    /// or unreadable config falls back to defaults with a debug trace.
    #[must_use]
    pub fn open(root: PathBuf) -> Self {
        let config = load_config(&root);
        Self { root, config }
    }

    /// Initialises a new plans directory: creates the root and writes a
    /// default `config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is already initialised or cannot
    /// be written to.
    pub fn init(root: PathBuf) -> Result<Self, io::Error> {
        let config_path = root.join("config.toml");
        if config_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "directory already initialised (found existing config.toml)",
            ));
        }

        std::fs::create_dir_all(&root)?;
        let config = Config::default();
        config
            .save(&config_path)
            .map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Self { root, config })
    }

    /// Whether this root has been initialised (a `config.toml` exists).
    #[must_use]
    pub fn is_initialised(&self) -> bool {
        self.root.join("config.toml").exists()
    }

    /// The root path of the directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory's configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Saves the directory's configuration back to `config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_config(&self) -> Result<(), io::Error> {
        self.config
            .save(&self.root.join("config.toml"))
            .map_err(|e| io::Error::other(e.to_string()))
    }

    /// Mutable access to the configuration, for the `config` command.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Loads all plans from disk, in board order.
    ///
    /// Plans are ordered by their recorded flat-board position; plans
    /// without one (written singly, never flushed) sort after, by id, which
    /// for generated ids is creation order.
    ///
    /// If `allow_unrecognised` is `false` (the default), any markdown file
    /// in the directory that cannot be parsed as a lesson plan is an
    /// error; if `true`, such files are skipped with a debug trace.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryLoadError::UnrecognisedFiles`] listing the files
    /// that could not be parsed.
    pub fn load_all(&self) -> Result<Vec<LessonPlan>, DirectoryLoadError> {
        let md_paths = collect_markdown_paths(&self.root);

        let (loaded, unrecognised_paths): (Vec<_>, Vec<_>) = md_paths
            .par_iter()
            .map(|path| try_load_plan(path))
            .partition(Result::is_ok);

        let mut loaded: Vec<_> = loaded.into_iter().map(Result::unwrap).collect();
        let unrecognised_paths: Vec<_> = unrecognised_paths
            .into_iter()
            .map(Result::unwrap_err)
            .collect();

        if !self.config.allow_unrecognised && !unrecognised_paths.is_empty() {
            return Err(DirectoryLoadError::UnrecognisedFiles(unrecognised_paths));
        }

        loaded.sort_by(|(a_pos, a), (b_pos, b)| {
            let a_key = a_pos.unwrap_or(u64::MAX);
            let b_key = b_pos.unwrap_or(u64::MAX);
            a_key.cmp(&b_key).then_with(|| a.id().cmp(b.id()))
        });

        Ok(loaded.into_iter().map(|(_, plan)| plan).collect())
    }

    /// Rewrites every plan file, recording the board's flat order.
    ///
    /// This is how same-day reordering becomes durable. Does *not* fail
    /// fast: all plans are attempted before an error is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`FlushError`] listing the files that could not be
    /// written.
    pub fn flush_board(&self, board: &Board) -> Result<(), FlushError> {
        let failures: Vec<_> = board
            .plans()
            .iter()
            .enumerate()
            .filter_map(|(position, plan)| {
                let path = self.path_for(plan.id());
                let position = u64::try_from(position).unwrap_or(u64::MAX);
                MarkdownPlan::from_plan(plan, Some(position))
                    .save_to_path(&path)
                    .err()
                    .map(|e| (path, e))
            })
            .collect();

        NonEmpty::from_vec(failures).map_or(Ok(()), |failures| Err(FlushError { failures }))
    }

    /// The file path a plan with this identifier is stored at.
    #[must_use]
    pub fn path_for(&self, id: &PlanId) -> PathBuf {
        self.root.join(format!("{id}.md"))
    }
}

impl Backend for Directory {
    fn list(&self) -> Result<Vec<LessonPlan>, BackendError> {
        if !self.is_initialised() {
            return Err(BackendError::Unavailable(format!(
                "{} is not a plans directory",
                self.root.display()
            )));
        }
        self.load_all()
            .map_err(|e| BackendError::Unavailable(e.to_string()))
    }

    fn create(&mut self, plan: &LessonPlan) -> Result<(), BackendError> {
        MarkdownPlan::from_plan(plan, None).save_to_path(&self.path_for(plan.id()))?;
        Ok(())
    }

    fn update(&mut self, id: &PlanId, data: &PlanData) -> Result<(), BackendError> {
        // Preserve the recorded position across content updates.
        let position = MarkdownPlan::load_from_path(&self.path_for(id), id.clone())
            .ok()
            .and_then(|stored| stored.position());

        let plan = LessonPlan::new(id.clone(), data.clone())
            .map_err(|e| BackendError::Load(LoadError::Invalid(e)))?;
        MarkdownPlan::from_plan(&plan, position).save_to_path(&self.path_for(id))?;
        Ok(())
    }

    fn delete(&mut self, id: &PlanId) -> Result<(), BackendError> {
        match std::fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            // Idempotent: a duplicate delete after a slow round trip is fine.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// A non-fail-fast flush failed for some of the plan files.
#[derive(Debug, thiserror::Error)]
pub struct FlushError {
    failures: NonEmpty<(PathBuf, io::Error)>,
}

impl fmt::Display for FlushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAY: usize = 5;

        write!(f, "failed to write plan files: ")?;

        let total = self.failures.len();

        let displayed_paths: Vec<String> = self
            .failures
            .iter()
            .take(MAX_DISPLAY)
            .map(|(p, _e)| p.display().to_string())
            .collect();

        let msg = displayed_paths.join(", ");

        if total <= MAX_DISPLAY {
            write!(f, "{msg}")
        } else {
            write!(f, "{msg}... (and {} more)", total - MAX_DISPLAY)
        }
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join("config.toml");
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

fn collect_markdown_paths(root: &PathBuf) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension() == Some(OsStr::new("md")))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn try_load_plan(path: &Path) -> Result<(Option<u64>, LessonPlan), PathBuf> {
    let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
        return Err(path.to_path_buf());
    };
    let id = PlanId::from(stem);

    let stored = MarkdownPlan::load_from_path(path, id).map_err(|e| {
        tracing::debug!("Failed to load plan from {}: {:?}", path.display(), e);
        path.to_path_buf()
    })?;

    let position = stored.position();
    let plan = stored.into_plan().map_err(|e| {
        tracing::debug!("Invalid plan at {}: {:?}", path.display(), e);
        path.to_path_buf()
    })?;

    Ok((position, plan))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{Backend, Directory};
    use crate::{
        board::Board,
        domain::{Day, LessonPlan, PlanData},
    };

    fn data(title: &str, day: Day) -> PlanData {
        PlanData {
            title: title.to_string(),
            subject: "Math".to_string(),
            day,
            ..PlanData::default()
        }
    }

    fn setup() -> (TempDir, Directory) {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let dir = Directory::init(tmp.path().to_path_buf()).unwrap();
        (tmp, dir)
    }

    #[test]
    fn init_writes_a_config_and_refuses_to_repeat() {
        let (tmp, dir) = setup();
        assert!(dir.is_initialised());
        assert!(Directory::init(tmp.path().to_path_buf()).is_err());
    }

    #[test]
    fn roundtrips_plans_through_disk() {
        let (_tmp, mut dir) = setup();
        let mut board = Board::new();
        let id_a = board.create(data("A", Day::Monday)).unwrap().id().clone();
        let id_b = board.create(data("B", Day::Tuesday)).unwrap().id().clone();

        dir.create(&board.get(&id_a).unwrap().clone()).unwrap();
        dir.create(&board.get(&id_b).unwrap().clone()).unwrap();

        let loaded = dir.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        // Unpositioned plans sort by id, which is creation order.
        assert_eq!(loaded[0].title(), "A");
        assert_eq!(loaded[1].title(), "B");
    }

    #[test]
    fn flush_board_makes_reordering_durable() {
        let (_tmp, dir) = setup();
        let mut board = Board::new();
        let id_a = board.create(data("A", Day::Monday)).unwrap().id().clone();
        let id_b = board.create(data("B", Day::Monday)).unwrap().id().clone();

        assert!(board.reorder(&id_b, &id_a));
        dir.flush_board(&board).unwrap();

        let loaded = dir.load_all().unwrap();
        let titles: Vec<_> = loaded.iter().map(LessonPlan::title).collect();
        assert_eq!(titles, ["B", "A"]);
    }

    #[test]
    fn update_preserves_recorded_position() {
        let (_tmp, mut dir) = setup();
        let mut board = Board::new();
        let id_a = board.create(data("A", Day::Monday)).unwrap().id().clone();
        let id_b = board.create(data("B", Day::Monday)).unwrap().id().clone();
        board.reorder(&id_b, &id_a);
        dir.flush_board(&board).unwrap();

        dir.update(&id_b, &data("B2", Day::Monday)).unwrap();

        let loaded = dir.load_all().unwrap();
        let titles: Vec<_> = loaded.iter().map(LessonPlan::title).collect();
        assert_eq!(titles, ["B2", "A"]);
    }

    #[test]
    fn delete_is_idempotent_on_disk() {
        let (_tmp, mut dir) = setup();
        let mut board = Board::new();
        let id = board.create(data("A", Day::Monday)).unwrap().id().clone();
        dir.create(&board.get(&id).unwrap().clone()).unwrap();

        dir.delete(&id).unwrap();
        dir.delete(&id).unwrap();
        assert!(dir.load_all().unwrap().is_empty());
    }

    #[test]
    fn foreign_markdown_is_rejected_by_default() {
        let (tmp, dir) = setup();
        std::fs::write(tmp.path().join("notes.md"), "just some notes\n").unwrap();

        assert!(dir.load_all().is_err());
    }

    #[test]
    fn foreign_markdown_is_skipped_when_allowed() {
        let (tmp, mut dir) = setup();
        dir.config_mut().allow_unrecognised = true;
        dir.save_config().unwrap();
        std::fs::write(tmp.path().join("notes.md"), "just some notes\n").unwrap();

        let mut board = Board::new();
        let id = board.create(data("A", Day::Monday)).unwrap().id().clone();
        dir.create(&board.get(&id).unwrap().clone()).unwrap();

        let reopened = Directory::open(tmp.path().to_path_buf());
        let loaded = reopened.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title(), "A");
    }

    #[test]
    fn uninitialised_root_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let dir = Directory::open(tmp.path().to_path_buf());
        assert!(dir.list().is_err());
    }
}
