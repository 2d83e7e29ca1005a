//! Raw form input and its validation.
//!
//! Forms hold exactly what the input surface submitted. `validate*` turns
//! them into model inputs or rejects them before any controller call.

use crate::model::{normalize_required, ModelValidationError, NewTodo, Priority, Todo, TodoPatch};

/// Project creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
}

impl ProjectForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the trimmed project name.
    pub fn validate(&self) -> Result<String, ModelValidationError> {
        normalize_required(&self.name, ModelValidationError::EmptyProjectName)
    }
}

/// Todo create/edit form.
///
/// `title` and `priority` are required; `description` and `due_date` may be
/// left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
}

impl TodoForm {
    /// Pre-fills the form with a todo's current values for editing.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title().to_string(),
            description: todo.description().unwrap_or_default().to_string(),
            due_date: todo.due_date().unwrap_or_default().to_string(),
            priority: todo.priority().as_str().to_string(),
        }
    }

    /// Validates the form as a new todo.
    pub fn validate(&self) -> Result<NewTodo, ModelValidationError> {
        Ok(NewTodo {
            title: normalize_required(&self.title, ModelValidationError::EmptyTitle)?,
            description: Some(self.description.clone()),
            due_date: Some(self.due_date.clone()),
            priority: self.priority.parse::<Priority>()?,
        })
    }

    /// Validates the form as a full replacement of a todo's editable fields.
    pub fn validate_patch(&self) -> Result<TodoPatch, ModelValidationError> {
        let fields = self.validate()?;
        Ok(TodoPatch {
            title: Some(fields.title),
            description: Some(fields.description),
            due_date: Some(fields.due_date),
            priority: Some(fields.priority),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ProjectForm, TodoForm};
    use crate::model::{ModelValidationError, Priority};

    fn form(title: &str, priority: &str) -> TodoForm {
        TodoForm {
            title: title.to_string(),
            priority: priority.to_string(),
            ..TodoForm::default()
        }
    }

    #[test]
    fn required_fields_are_enforced() {
        assert_eq!(
            form("  ", "High").validate().unwrap_err(),
            ModelValidationError::EmptyTitle
        );
        assert!(matches!(
            form("Ship", "").validate().unwrap_err(),
            ModelValidationError::InvalidPriority(_)
        ));
        assert_eq!(
            ProjectForm::new(" ").validate().unwrap_err(),
            ModelValidationError::EmptyProjectName
        );
    }

    #[test]
    fn valid_form_produces_trimmed_fields() {
        let fields = form(" Ship spec ", "high").validate().unwrap();
        assert_eq!(fields.title, "Ship spec");
        assert_eq!(fields.priority, Priority::High);
    }
}
