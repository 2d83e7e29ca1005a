//! Project entity.
//!
//! # Responsibility
//! - Own an ordered todo collection (insertion order is display order).
//! - Bind every todo it creates to its own id.
//!
//! # Invariants
//! - `id` never changes after construction.
//! - `name` is never empty.
//! - Todo ids are unique inside `todos`.

use super::todo::{NewTodo, Todo, TodoId};
use super::{normalize_required, EntityId, ModelValidationError};
use std::collections::HashSet;

/// Stable identifier for a project.
pub type ProjectId = EntityId;

/// Name of the project seeded into fresh storage.
pub const DEFAULT_PROJECT_NAME: &str = "Default Project";

/// Named, ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: String,
    todos: Vec<Todo>,
}

impl Project {
    /// Creates an empty project with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyProjectName` when the name is blank.
    pub fn create(name: &str) -> Result<Self, ModelValidationError> {
        Self::restore(EntityId::generate(), name, Vec::new())
    }

    /// Creates the empty project seeded into fresh storage.
    pub fn default_project() -> Self {
        Self {
            id: EntityId::generate(),
            name: DEFAULT_PROJECT_NAME.to_string(),
            todos: Vec::new(),
        }
    }

    /// Rebuilds a project and its todos from persisted identity.
    ///
    /// # Errors
    /// - `EmptyProjectName` for the project itself.
    /// - `ProjectMismatch` when a todo names another project.
    /// - `DuplicateTodoId` when two todos share an id.
    pub fn restore(
        id: ProjectId,
        name: &str,
        todos: Vec<Todo>,
    ) -> Result<Self, ModelValidationError> {
        let project = Self {
            id,
            name: normalize_required(name, ModelValidationError::EmptyProjectName)?,
            todos,
        };
        project.validate()?;
        Ok(project)
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Todos in display order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Creates a todo bound to this project and appends it.
    pub fn add_todo(&mut self, fields: NewTodo) -> Result<&Todo, ModelValidationError> {
        let mut todo = Todo::create(fields.clone(), self.id.clone())?;
        // Todo ids stay unique within a project even on a v4 collision.
        while self.get_todo_by_id(todo.id()).is_some() {
            todo = Todo::create(fields.clone(), self.id.clone())?;
        }

        let index = self.todos.len();
        self.todos.push(todo);
        Ok(&self.todos[index])
    }

    /// Removes the todo with `todo_id`; returns whether anything was removed.
    pub fn remove_todo(&mut self, todo_id: &TodoId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id() != todo_id);
        self.todos.len() != before
    }

    pub fn get_todo_by_id(&self, todo_id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id() == todo_id)
    }

    pub fn get_todo_by_id_mut(&mut self, todo_id: &TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id() == todo_id)
    }

    /// Re-checks construction invariants across the whole todo collection.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::EmptyProjectName);
        }

        let mut seen = HashSet::with_capacity(self.todos.len());
        for todo in &self.todos {
            todo.validate()?;
            if todo.project_id() != &self.id {
                return Err(ModelValidationError::ProjectMismatch {
                    todo_id: todo.id().clone(),
                    expected: self.id.clone(),
                    actual: todo.project_id().clone(),
                });
            }
            if !seen.insert(todo.id()) {
                return Err(ModelValidationError::DuplicateTodoId(todo.id().clone()));
            }
        }
        Ok(())
    }
}
