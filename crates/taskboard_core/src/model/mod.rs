//! Entity model for projects and their todos.
//!
//! # Responsibility
//! - Define the typed entities the state controller mutates.
//! - Own every field-level invariant (required text, enumerated priority,
//!   immutable identity).
//!
//! # Invariants
//! - Every entity is identified by a non-blank opaque id assigned once.
//! - A todo id is unique within its owning project.
//! - A todo's `project_id` always names the project that holds it.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board;
pub mod id;
pub mod project;
pub mod todo;

pub use board::BoardState;
pub use id::EntityId;
pub use project::{Project, ProjectId, DEFAULT_PROJECT_NAME};
pub use todo::{NewTodo, Priority, Todo, TodoId, TodoPatch};

/// Validation failures raised by entity constructors and mutators.
///
/// A failed validation never leaves a partially mutated entity behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Todo title is empty after trimming.
    EmptyTitle,
    /// Project name is empty after trimming.
    EmptyProjectName,
    /// Priority text is not one of `Low|Medium|High`.
    InvalidPriority(String),
    /// A blank string was supplied as an entity id.
    EmptyId,
    /// Restored todo points at a different project than the one holding it.
    ProjectMismatch {
        todo_id: TodoId,
        expected: ProjectId,
        actual: ProjectId,
    },
    /// Two todos in the same project share one id.
    DuplicateTodoId(TodoId),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "todo title must not be empty"),
            Self::EmptyProjectName => write!(f, "project name must not be empty"),
            Self::InvalidPriority(value) => write!(
                f,
                "invalid priority `{value}`; expected Low|Medium|High"
            ),
            Self::EmptyId => write!(f, "entity id must not be empty"),
            Self::ProjectMismatch {
                todo_id,
                expected,
                actual,
            } => write!(
                f,
                "todo {todo_id} belongs to project {actual} but is stored under {expected}"
            ),
            Self::DuplicateTodoId(id) => write!(f, "duplicate todo id in project: {id}"),
        }
    }
}

impl Error for ModelValidationError {}

/// Trims required text and rejects blank input with `error`.
pub(crate) fn normalize_required(
    value: &str,
    error: ModelValidationError,
) -> Result<String, ModelValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_string())
}

/// Trims optional text; blank collapses to `None`.
pub(crate) fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
