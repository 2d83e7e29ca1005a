//! Plain-text renderer.

use super::due::{due_label, DueClass};
use super::RenderBoundary;
use crate::model::{Project, ProjectId, Todo};
use chrono::{Local, NaiveDate};
use std::io::{self, Write};

/// Writes the board as plain text into any `io::Write`.
pub struct TextRenderer<W: Write> {
    out: W,
    today: NaiveDate,
}

impl<W: Write> TextRenderer<W> {
    /// Renderer using the local calendar date for due labels.
    pub fn new(out: W) -> Self {
        Self::with_today(out, Local::now().date_naive())
    }

    /// Renderer with a fixed reference date.
    pub fn with_today(out: W, today: NaiveDate) -> Self {
        Self { out, today }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_todo(&mut self, todo: &Todo) -> io::Result<()> {
        let mark = if todo.is_completed() { 'x' } else { ' ' };
        let due = due_label(todo, self.today);
        let flag = match due.class {
            DueClass::Overdue => " !",
            DueClass::DueToday | DueClass::DueSoon => " *",
            DueClass::None => "",
        };

        writeln!(
            self.out,
            "  [{mark}] {}  ({})  {}{flag}  #{}",
            todo.title(),
            todo.priority(),
            due.text,
            todo.id().short()
        )?;
        writeln!(
            self.out,
            "      {}",
            todo.description().unwrap_or("No description")
        )
    }
}

impl<W: Write> RenderBoundary for TextRenderer<W> {
    type Error = io::Error;

    fn render_projects(
        &mut self,
        projects: &[Project],
        selected: Option<&ProjectId>,
    ) -> io::Result<()> {
        writeln!(self.out, "Projects")?;
        if projects.is_empty() {
            writeln!(self.out, "  (none)")?;
        }
        for project in projects {
            let marker = if Some(project.id()) == selected { '>' } else { ' ' };
            writeln!(
                self.out,
                "{marker} {}  #{}",
                project.name(),
                project.id().short()
            )?;
        }
        writeln!(self.out)
    }

    fn render_todos(&mut self, project: Option<&Project>) -> io::Result<()> {
        let Some(project) = project else {
            return writeln!(self.out, "No project selected.");
        };

        let done = project
            .todos()
            .iter()
            .filter(|todo| todo.is_completed())
            .count();
        writeln!(
            self.out,
            "{} ({} todos, {done} done)",
            project.name(),
            project.todos().len()
        )?;
        if project.todos().is_empty() {
            writeln!(self.out, "  No todos yet.")?;
        }
        for todo in project.todos() {
            self.write_todo(todo)?;
        }
        self.out.flush()
    }
}
