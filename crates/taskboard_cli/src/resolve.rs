//! Resolution of user-typed ids (exact id, full UUID or unambiguous prefix).

use anyhow::{bail, Result};
use taskboard_core::{EntityId, Project, Todo};
use uuid::Uuid;

const MIN_PREFIX_CHARS: usize = 4;

pub fn project_id(projects: &[Project], raw: &str) -> Result<EntityId> {
    resolve(raw, "project", projects.iter().map(Project::id))
}

pub fn todo_id(todos: &[Todo], raw: &str) -> Result<EntityId> {
    resolve(raw, "todo", todos.iter().map(Todo::id))
}

fn resolve<'a>(
    raw: &str,
    kind: &str,
    ids: impl Iterator<Item = &'a EntityId> + Clone,
) -> Result<EntityId> {
    let needle = raw.trim().trim_start_matches('#');
    if let Some(id) = ids.clone().find(|id| id.as_str() == needle) {
        return Ok(id.clone());
    }
    if let Ok(id) = Uuid::parse_str(needle) {
        // Unknown full ids pass through; the controller decides what a miss means.
        return Ok(EntityId::parse(id.to_string())?);
    }
    if needle.chars().count() < MIN_PREFIX_CHARS {
        bail!("{kind} id `{raw}` is too short; give at least {MIN_PREFIX_CHARS} characters");
    }

    let needle = needle.to_ascii_lowercase();
    let matches: Vec<&EntityId> = ids
        .filter(|id| id.as_str().to_ascii_lowercase().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => bail!("no {kind} matches `{raw}`"),
        _ => bail!("{kind} id `{raw}` is ambiguous ({} matches)", matches.len()),
    }
}
