//! Lesson plans serialized as markdown files with YAML frontmatter.
//!
//! One file per plan, named `<id>.md`. The frontmatter holds everything
//! except the title (the markdown heading) and the description (the body).

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::domain::{Day, LessonPlan, PlanData, PlanId, ValidationError};

/// A lesson plan in its on-disk markdown representation.
#[derive(Debug, Clone)]
pub struct MarkdownPlan {
    frontmatter: FrontMatter,
    id: PlanId,
    title: String,
    body: String,
}

/// Errors that can occur when loading a plan file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The plan file does not exist.
    #[error("lesson plan file not found")]
    NotFound,
    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The YAML frontmatter is malformed.
    #[error("malformed frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The stored content fails domain validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl MarkdownPlan {
    /// Builds the on-disk representation of a plan.
    ///
    /// `position` is the plan's index in the board's flat order, recorded
    /// when the whole board is flushed; single-record writes leave it unset
    /// and the plan sorts after positioned ones by id (creation time).
    #[must_use]
    pub fn from_plan(plan: &LessonPlan, position: Option<u64>) -> Self {
        Self {
            frontmatter: FrontMatter::V1 {
                subject: plan.subject().to_string(),
                duration_minutes: plan.duration_minutes(),
                day: plan.day(),
                objectives: plan.objectives().to_string(),
                materials: plan.materials().to_string(),
                time_slot: plan.time_slot().map(ToString::to_string),
                position,
            },
            id: plan.id().clone(),
            title: plan.title().to_string(),
            body: plan.description().to_string(),
        }
    }

    /// The identifier this file belongs to (taken from the filename).
    #[must_use]
    pub const fn id(&self) -> &PlanId {
        &self.id
    }

    /// The recorded flat-order position, if any.
    #[must_use]
    pub const fn position(&self) -> Option<u64> {
        let FrontMatter::V1 { position, .. } = &self.frontmatter;
        *position
    }

    /// Converts back into a validated domain record.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Invalid`] if the stored content fails domain
    /// validation (an empty title, a zero duration).
    pub fn into_plan(self) -> Result<LessonPlan, LoadError> {
        let FrontMatter::V1 {
            subject,
            duration_minutes,
            day,
            objectives,
            materials,
            time_slot,
            position: _,
        } = self.frontmatter;

        let data = PlanData {
            title: self.title,
            subject,
            description: self.body,
            duration_minutes,
            objectives,
            materials,
            day,
            time_slot,
        };

        Ok(LessonPlan::new(self.id, data)?)
    }

    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let frontmatter = serde_yaml::to_string(&self.frontmatter).expect("this must never fail");

        let heading = format!("# {}", self.title);

        let result = if self.body.is_empty() {
            format!("---\n{frontmatter}---\n{heading}\n")
        } else {
            format!("---\n{frontmatter}---\n{heading}\n\n{}\n", self.body)
        };

        writer.write_all(result.as_bytes())
    }

    pub(crate) fn read<R: BufRead>(reader: &mut R, id: PlanId) -> Result<Self, LoadError> {
        let mut lines = reader.lines();

        // Ensure frontmatter starts correctly
        let first_line = lines
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "Empty input"))?
            .map_err(LoadError::from)?;

        if first_line.trim() != "---" {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Expected frontmatter starting with '---'",
            )
            .into());
        }

        // Collect lines until next '---'
        let frontmatter = lines
            .by_ref()
            .map_while(|line| match line {
                Ok(content) if content.trim() == "---" => None,
                Ok(content) => Some(Ok(content)),
                Err(e) => Some(Err(e)),
            })
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");

        // The rest of the lines are markdown content
        let content = lines.collect::<Result<Vec<_>, _>>()?.join("\n");

        let front: FrontMatter = serde_yaml::from_str(&frontmatter)?;
        let (title, body) = parse_content(&content);

        Ok(Self {
            frontmatter: front,
            id,
            title,
            body,
        })
    }

    /// Writes the plan to a specific file path.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_path(&self, file_path: &Path) -> io::Result<()> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(file_path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)
    }

    /// Reads a plan from a specific file path, taking the identifier from
    /// the caller (the filename stem, in directory scans).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the file does not exist, or
    /// another [`LoadError`] if it cannot be read or parsed.
    pub fn load_from_path(file_path: &Path, id: PlanId) -> Result<Self, LoadError> {
        let file = File::open(file_path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;

        let mut reader = BufReader::new(file);
        Self::read(&mut reader, id)
    }
}

/// Extracts the title (heading line) and the body from the markdown
/// content after the frontmatter.
fn parse_content(content: &str) -> (String, String) {
    let mut lines = content.lines();

    let heading = lines
        .by_ref()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    let title = heading.strip_prefix("# ").map_or_else(
        || heading.trim().to_string(),
        |stripped| stripped.trim().to_string(),
    );

    let body = lines.collect::<Vec<_>>().join("\n");
    // Leading blank separator and trailing newline are layout, not content.
    (title, body.trim().to_string())
}

/// The serialized versions of the plan frontmatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum FrontMatter {
    #[serde(rename = "1")]
    V1 {
        subject: String,
        duration_minutes: u32,
        day: Day,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        objectives: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        materials: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_slot: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<u64>,
    },
}
