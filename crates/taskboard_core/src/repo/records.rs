//! Raw snapshot records matching the persisted JSON layout.
//!
//! ```text
//! { "projects": [ { "id", "name", "todos": [ { "id", "title",
//!   "description", "dueDate", "priority", "completed", "projectId" } ] } ],
//!   "currentProjectId": string | null }
//! ```
//!
//! Ids are opaque strings. Boards written by the earlier page, a bare array
//! of projects whose todos carry `complete` and no `projectId`, are read too.

use super::snapshot_repo::{RepoError, RepoResult};
use crate::model::{BoardState, EntityId, NewTodo, Project, Todo};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whole-board snapshot as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub current_project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub todos: Vec<TodoRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    pub priority: String,
    /// Older blobs spell this flag `complete`.
    #[serde(default, alias = "complete")]
    pub completed: bool,
    /// Older blobs omit the back-reference; it then defaults to the owner.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl SnapshotRecord {
    /// Captures every project, todo and the selection.
    pub fn from_state(state: &BoardState) -> Self {
        Self {
            projects: state.projects().iter().map(ProjectRecord::from).collect(),
            current_project_id: state.current_project_id().map(|id| id.to_string()),
        }
    }

    /// Parses a stored blob in either layout.
    ///
    /// A bare project array has no stored selection; its first project is
    /// selected, matching how the earlier page opened such a board.
    pub fn from_json(blob: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(blob)?;
        if !value.is_array() {
            return serde_json::from_value(value);
        }

        let projects: Vec<ProjectRecord> = serde_json::from_value(value)?;
        let current_project_id = projects.first().map(|project| project.id.clone());
        Ok(Self {
            projects,
            current_project_id,
        })
    }

    /// Rebuilds typed entities, validating every invariant on the way.
    ///
    /// A `currentProjectId` that does not resolve becomes no selection.
    ///
    /// # Errors
    /// - `RepoError::Validation` when an entity invariant is violated.
    /// - `RepoError::InvalidData` when two projects share an id.
    pub fn into_state(self) -> RepoResult<BoardState> {
        let mut seen = HashSet::with_capacity(self.projects.len());
        let mut projects = Vec::with_capacity(self.projects.len());

        for record in self.projects {
            if !seen.insert(record.id.clone()) {
                return Err(RepoError::InvalidData(format!(
                    "duplicate project id `{}` in snapshot",
                    record.id
                )));
            }
            projects.push(record.into_project()?);
        }

        let requested = self.current_project_id.and_then(|id| EntityId::parse(id).ok());
        let state = BoardState::new(projects, requested.clone());
        if let Some(requested) = requested {
            if state.current_project_id().is_none() {
                warn!(
                    "event=snapshot_restore module=repo status=degraded reason=dangling_selection project_id={requested}"
                );
            }
        }
        Ok(state)
    }
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            name: project.name().to_string(),
            todos: project.todos().iter().map(TodoRecord::from).collect(),
        }
    }
}

impl ProjectRecord {
    fn into_project(self) -> RepoResult<Project> {
        let owner = EntityId::parse(self.id)?;
        let todos = self
            .todos
            .into_iter()
            .map(|record| record.into_todo(&owner))
            .collect::<RepoResult<Vec<_>>>()?;
        Ok(Project::restore(owner, &self.name, todos)?)
    }
}

impl From<&Todo> for TodoRecord {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id().to_string(),
            title: todo.title().to_string(),
            description: todo.description().map(str::to_string),
            due_date: todo.due_date().map(str::to_string),
            priority: todo.priority().as_str().to_string(),
            completed: todo.is_completed(),
            project_id: Some(todo.project_id().to_string()),
        }
    }
}

impl TodoRecord {
    fn into_todo(self, owner: &EntityId) -> RepoResult<Todo> {
        let fields = NewTodo {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority.parse()?,
        };
        let project_id = match self.project_id {
            Some(raw) => EntityId::parse(raw)?,
            None => owner.clone(),
        };
        Ok(Todo::restore(
            EntityId::parse(self.id)?,
            fields,
            self.completed,
            project_id,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotRecord;
    use crate::model::ModelValidationError;
    use crate::repo::snapshot_repo::RepoError;
    use serde_json::json;

    #[test]
    fn timestamp_ids_are_kept_verbatim() {
        let blob = json!({
            "projects": [{
                "id": "1700000000000",
                "name": "Inbox",
                "todos": [{
                    "id": "1700000000001",
                    "title": "old todo",
                    "description": "",
                    "dueDate": "",
                    "priority": "low",
                    "completed": true,
                    "projectId": "1700000000000"
                }]
            }],
            "currentProjectId": "1700000000000"
        })
        .to_string();

        let state = SnapshotRecord::from_json(&blob).unwrap().into_state().unwrap();
        let project = &state.projects()[0];
        let todo = &project.todos()[0];
        assert_eq!(project.id().as_str(), "1700000000000");
        assert_eq!(todo.id().as_str(), "1700000000001");
        assert!(todo.is_completed());
        assert_eq!(todo.description(), None);
        assert_eq!(todo.due_date(), None);
        assert_eq!(state.current_project_id(), Some(project.id()));
    }

    #[test]
    fn bare_project_array_selects_first_project() {
        let blob = json!([
            {
                "id": "project-1700000000000",
                "name": "Default Project",
                "todos": [{
                    "id": "todo-1700000000500",
                    "title": "Buy milk",
                    "description": "2 litres",
                    "dueDate": "2024-01-05",
                    "priority": "high",
                    "complete": true
                }]
            },
            { "id": "project-1700000009999", "name": "Garden", "todos": [] }
        ])
        .to_string();

        let record = SnapshotRecord::from_json(&blob).unwrap();
        assert_eq!(record.current_project_id.as_deref(), Some("project-1700000000000"));

        let state = record.into_state().unwrap();
        let current = state.current_project().unwrap();
        assert_eq!(current.name(), "Default Project");
        let todo = current.get_todo_by_id(&"todo-1700000000500".parse().unwrap()).unwrap();
        assert!(todo.is_completed());
        assert_eq!(todo.project_id(), current.id());
        assert_eq!(state.projects().len(), 2);
    }

    #[test]
    fn empty_bare_array_has_no_selection() {
        let state = SnapshotRecord::from_json("[]").unwrap().into_state().unwrap();
        assert!(state.projects().is_empty());
        assert_eq!(state.current_project_id(), None);
    }

    #[test]
    fn blank_id_is_a_validation_error() {
        let blob = json!({ "projects": [{ "id": "  ", "name": "Inbox" }] }).to_string();
        let err = SnapshotRecord::from_json(&blob).unwrap().into_state().unwrap_err();
        assert!(matches!(err, RepoError::Validation(ModelValidationError::EmptyId)));
    }

    #[test]
    fn unknown_priority_is_a_validation_error() {
        let value = json!({
            "projects": [{
                "id": "11111111-2222-4333-8444-555555555555",
                "name": "Inbox",
                "todos": [{
                    "id": "aaaaaaaa-2222-4333-8444-555555555555",
                    "title": "t",
                    "priority": "Urgent",
                    "completed": false,
                    "projectId": "11111111-2222-4333-8444-555555555555"
                }]
            }],
            "currentProjectId": null
        });

        let record: SnapshotRecord = serde_json::from_value(value).unwrap();
        let err = record.into_state().unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ModelValidationError::InvalidPriority(ref p)) if p == "Urgent"
        ));
    }
}
