//! Board use-case service (application state controller).
//!
//! # Responsibility
//! - Hold the live project list and current selection.
//! - Route every user intent through the entity model.
//! - Commit each mutation to the snapshot repository before returning.
//!
//! # Invariants
//! - Memory and storage never diverge: a failed save rolls the in-memory
//!   mutation back.
//! - Validation failures mutate nothing and write nothing.
//! - The service never touches presentation; renderers pull state.

use crate::model::{
    BoardState, ModelValidationError, NewTodo, Priority, Project, ProjectId, Todo, TodoId,
    TodoPatch,
};
use crate::repo::snapshot_repo::{RepoError, RepoResult, SnapshotRepository};
use crate::ui::RenderBoundary;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from board use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected by the entity model.
    Validation(ModelValidationError),
    /// Operation needs a selected project and none is selected.
    NoActiveProject,
    /// Target todo is not in the current project.
    TodoNotFound(TodoId),
    /// Snapshot could not be committed.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoActiveProject => write!(f, "no project is selected"),
            Self::TodoNotFound(id) => write!(f, "todo not found in current project: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NoActiveProject | Self::TodoNotFound(_) => None,
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// State controller over a snapshot repository.
pub struct BoardService<R: SnapshotRepository> {
    repo: R,
    state: BoardState,
}

impl<R: SnapshotRepository> BoardService<R> {
    /// Initializes the controller from persisted state.
    ///
    /// # Errors
    /// Returns the repository error unchanged; startup must abort rather
    /// than continue with default data over an unreadable snapshot.
    pub fn load(repo: R) -> RepoResult<Self> {
        let state = repo.load()?;
        Ok(Self { repo, state })
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        self.state.projects()
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.state.project(id)
    }

    pub fn current_project_id(&self) -> Option<&ProjectId> {
        self.state.current_project_id()
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.state.current_project()
    }

    /// Creates a project, appends it, selects it and persists.
    pub fn create_project(&mut self, name: &str) -> ServiceResult<Project> {
        let project = Project::create(name)?;
        let created = project.clone();

        self.commit("project_create", |state| {
            let id = project.id().clone();
            state.push_project(project);
            state.select(Some(id));
            Ok(())
        })?;

        info!(
            "event=project_create module=service status=ok project_id={}",
            created.id()
        );
        Ok(created)
    }

    /// Selects `project_id`; an unknown id clears the selection.
    ///
    /// Returns whether a project is selected afterwards.
    pub fn select_project(&mut self, project_id: &ProjectId) -> ServiceResult<bool> {
        let selected = self.commit("project_select", |state| {
            Ok(state.select(Some(project_id.clone())))
        })?;

        debug!(
            "event=project_select module=service status=ok project_id={project_id} resolved={selected}"
        );
        Ok(selected)
    }

    /// Adds a todo to the current project and persists.
    ///
    /// # Errors
    /// - `NoActiveProject` when nothing is selected.
    /// - `Validation` when the title is blank.
    pub fn add_todo_to_current(&mut self, fields: NewTodo) -> ServiceResult<Todo> {
        let todo = self.commit("todo_add", |state| {
            let project = state
                .current_project_mut()
                .ok_or(ServiceError::NoActiveProject)?;
            Ok(project.add_todo(fields)?.clone())
        })?;

        info!(
            "event=todo_add module=service status=ok project_id={} todo_id={}",
            todo.project_id(),
            todo.id()
        );
        Ok(todo)
    }

    /// Removes a todo from the current project and persists.
    ///
    /// No-op without a selected project. Returns whether a todo was removed.
    pub fn delete_todo(&mut self, todo_id: &TodoId) -> ServiceResult<bool> {
        if self.state.current_project().is_none() {
            return Ok(false);
        }

        let removed = self.commit("todo_delete", |state| {
            Ok(state
                .current_project_mut()
                .is_some_and(|project| project.remove_todo(todo_id)))
        })?;

        debug!("event=todo_delete module=service status=ok todo_id={todo_id} removed={removed}");
        Ok(removed)
    }

    /// Flips completion of a todo in the current project and persists.
    ///
    /// No-op when nothing is selected or the todo is absent. Returns the new
    /// completion flag when a todo was toggled.
    pub fn toggle_todo_complete(&mut self, todo_id: &TodoId) -> ServiceResult<Option<bool>> {
        let exists = self
            .state
            .current_project()
            .is_some_and(|project| project.get_todo_by_id(todo_id).is_some());
        if !exists {
            return Ok(None);
        }

        let completed = self.commit("todo_toggle", |state| {
            let todo = state
                .current_project_mut()
                .and_then(|project| project.get_todo_by_id_mut(todo_id))
                .ok_or_else(|| ServiceError::TodoNotFound(todo_id.clone()))?;
            todo.toggle_complete();
            Ok(todo.is_completed())
        })?;

        debug!(
            "event=todo_toggle module=service status=ok todo_id={todo_id} completed={completed}"
        );
        Ok(Some(completed))
    }

    /// Applies a whitelisted patch to a todo in the current project.
    ///
    /// An empty patch returns the todo as it is without writing.
    ///
    /// # Errors
    /// - `TodoNotFound` when the todo is not in the current project.
    /// - `Validation` when the patch sets a blank title.
    pub fn update_todo(&mut self, todo_id: &TodoId, patch: TodoPatch) -> ServiceResult<Todo> {
        if patch.is_empty() {
            return self
                .state
                .current_project()
                .and_then(|project| project.get_todo_by_id(todo_id))
                .cloned()
                .ok_or_else(|| ServiceError::TodoNotFound(todo_id.clone()));
        }

        let todo = self.commit("todo_update", |state| {
            let todo = state
                .current_project_mut()
                .and_then(|project| project.get_todo_by_id_mut(todo_id))
                .ok_or_else(|| ServiceError::TodoNotFound(todo_id.clone()))?;
            todo.update_details(patch)?;
            Ok(todo.clone())
        })?;

        debug!("event=todo_update module=service status=ok todo_id={todo_id}");
        Ok(todo)
    }

    /// Replaces the priority of a todo in the current project.
    pub fn update_todo_priority(
        &mut self,
        todo_id: &TodoId,
        priority: Priority,
    ) -> ServiceResult<Todo> {
        self.update_todo(
            todo_id,
            TodoPatch {
                priority: Some(priority),
                ..TodoPatch::default()
            },
        )
    }

    /// Redraws `boundary` from the current state.
    pub fn render<B: RenderBoundary>(&self, boundary: &mut B) -> Result<(), B::Error> {
        boundary.render_projects(self.state.projects(), self.state.current_project_id())?;
        boundary.render_todos(self.state.current_project())
    }

    /// Runs `mutate` and persists; restores the prior state on any failure.
    fn commit<T>(
        &mut self,
        operation: &'static str,
        mutate: impl FnOnce(&mut BoardState) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let previous = self.state.clone();

        let value = match mutate(&mut self.state) {
            Ok(value) => value,
            Err(err) => {
                self.state = previous;
                return Err(err);
            }
        };

        if let Err(err) = self.repo.save(&self.state) {
            error!(
                "event={operation} module=service status=error error_code=commit_failed error={err}"
            );
            self.state = previous;
            return Err(err.into());
        }
        Ok(value)
    }
}
