//! Todo entity.
//!
//! # Responsibility
//! - Hold one actionable item scoped to a project.
//! - Apply whitelisted, validated updates.
//!
//! # Invariants
//! - `id` and `project_id` never change after construction.
//! - `title` is never empty.
//! - `completed` only changes through `toggle_complete`.

use super::{normalize_optional, normalize_required, EntityId, ModelValidationError, ProjectId};
use chrono::{DateTime, NaiveDate};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable identifier for a todo.
pub type TodoId = EntityId;

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Enumerated urgency of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Canonical wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ModelValidationError;

    /// Accepts any casing and surrounding whitespace (`" high "`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ModelValidationError::InvalidPriority(value.to_string())),
        }
    }
}

/// Field set for creating a todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    /// Raw due-date text as entered; parsed lazily by `Todo::due_date_value`.
    pub due_date: Option<String>,
    pub priority: Priority,
}

impl NewTodo {
    /// Shorthand for a todo with only a title and priority.
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            priority,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Partial update restricted to the mutable todo fields.
///
/// `None` leaves a field untouched. For the optional fields,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<String>>,
    pub priority: Option<Priority>,
}

impl TodoPatch {
    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
    }
}

/// One task inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    priority: Priority,
    completed: bool,
    project_id: ProjectId,
}

impl Todo {
    /// Creates a new, incomplete todo with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank.
    pub fn create(fields: NewTodo, project_id: ProjectId) -> Result<Self, ModelValidationError> {
        Self::restore(EntityId::generate(), fields, false, project_id)
    }

    /// Rebuilds a todo whose identity already exists (snapshot restore).
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank.
    pub fn restore(
        id: TodoId,
        fields: NewTodo,
        completed: bool,
        project_id: ProjectId,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self {
            id,
            title: normalize_required(&fields.title, ModelValidationError::EmptyTitle)?,
            description: normalize_optional(fields.description.as_deref()),
            due_date: normalize_optional(fields.due_date.as_deref()),
            priority: fields.priority,
            completed,
            project_id,
        })
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Raw due-date text exactly as stored.
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    /// Parses the stored due date as a calendar date.
    ///
    /// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Returns `None` for an
    /// absent or unparsable value; the raw text is kept either way.
    pub fn due_date_value(&self) -> Option<NaiveDate> {
        let raw = self.due_date.as_deref()?;
        NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|value| value.date_naive())
            })
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Flips the completion flag.
    pub fn toggle_complete(&mut self) {
        self.completed = !self.completed;
    }

    /// Replaces the priority.
    pub fn update_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Applies a whitelisted partial update.
    ///
    /// The whole patch is validated before any field is written, so a
    /// rejected patch leaves the todo unchanged.
    ///
    /// # Errors
    /// - `EmptyTitle` when the patch sets a blank title.
    pub fn update_details(&mut self, patch: TodoPatch) -> Result<(), ModelValidationError> {
        let title = patch
            .title
            .as_deref()
            .map(|value| normalize_required(value, ModelValidationError::EmptyTitle))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = normalize_optional(description.as_deref());
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = normalize_optional(due_date.as_deref());
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        Ok(())
    }

    /// Re-checks construction invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::EmptyTitle);
        }
        Ok(())
    }
}
