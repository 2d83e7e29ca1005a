//! Render and input boundary.
//!
//! # Responsibility
//! - Define the redraw contract the controller's state is pushed through.
//! - Validate raw form input before it reaches the controller.
//! - Provide a plain-text renderer and due-date labels.
//!
//! # Invariants
//! - Nothing in this module mutates entities.

use crate::model::{Project, ProjectId};

pub mod due;
pub mod form;
pub mod text;

pub use due::{due_label, DueClass, DueLabel};
pub use form::{ProjectForm, TodoForm};
pub use text::TextRenderer;

/// Presentation collaborator redrawn after every state change.
pub trait RenderBoundary {
    type Error;

    /// Redraws the project list, marking `selected`.
    fn render_projects(
        &mut self,
        projects: &[Project],
        selected: Option<&ProjectId>,
    ) -> Result<(), Self::Error>;

    /// Redraws the todo list for `project`, or a placeholder when `None`.
    fn render_todos(&mut self, project: Option<&Project>) -> Result<(), Self::Error>;
}
