//! Application state: every project plus the current selection.

use super::project::{Project, ProjectId};

/// Complete in-memory board, persisted as one snapshot.
///
/// # Invariants
/// - `current_project_id`, when set, names a member of `projects`.
/// - Project ids are unique in `projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    projects: Vec<Project>,
    current_project_id: Option<ProjectId>,
}

impl BoardState {
    /// Builds a state, dropping a selection that does not resolve.
    pub fn new(projects: Vec<Project>, current_project_id: Option<ProjectId>) -> Self {
        let mut state = Self {
            projects,
            current_project_id: None,
        };
        state.select(current_project_id);
        state
    }

    /// State for fresh storage: one empty default project, selected.
    pub fn initial() -> Self {
        let project = Project::default_project();
        let id = project.id().clone();
        Self {
            projects: vec![project],
            current_project_id: Some(id),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn current_project_id(&self) -> Option<&ProjectId> {
        self.current_project_id.as_ref()
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id() == id)
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project_id.as_ref().and_then(|id| self.project(id))
    }

    pub fn current_project_mut(&mut self) -> Option<&mut Project> {
        let id = self.current_project_id.as_ref()?;
        self.projects.iter_mut().find(|project| project.id() == id)
    }

    /// Appends a project; insertion order is display order.
    pub fn push_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    /// Selects `id` if it resolves; otherwise clears the selection.
    ///
    /// Returns whether a project is selected afterwards.
    pub fn select(&mut self, id: Option<ProjectId>) -> bool {
        self.current_project_id = id.filter(|id| self.project(id).is_some());
        self.current_project_id.is_some()
    }

    /// Total number of todos across all projects.
    pub fn todo_count(&self) -> usize {
        self.projects.iter().map(|project| project.todos().len()).sum()
    }
}
