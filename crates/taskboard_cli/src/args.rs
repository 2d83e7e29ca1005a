//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Projects and todos in your terminal")]
pub struct Cli {
    /// SQLite store file (overrides TASKBOARD_STORE_PATH).
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides TASKBOARD_LOG_LEVEL).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show projects and the todos of the selected project.
    Show,
    /// Manage projects.
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Manage todos in the selected project.
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// List projects with their full ids.
    List,
    /// Create a project and select it.
    Add { name: String },
    /// Select a project by id or unambiguous id prefix.
    Select { id: String },
}

#[derive(Debug, Subcommand)]
pub enum TodoCommand {
    /// Add a todo to the selected project.
    Add(TodoFields),
    /// Edit a todo; omitted fields keep their value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: TodoFields,
    },
    /// Toggle completion of a todo.
    Toggle { id: String },
    /// Delete a todo.
    Delete { id: String },
}

#[derive(Debug, Default, Args)]
pub struct TodoFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Due date, `YYYY-MM-DD`; pass an empty string to clear.
    #[arg(long)]
    pub due: Option<String>,
    /// Low|Medium|High.
    #[arg(long)]
    pub priority: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, TodoCommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn edit_parses_partial_fields() {
        let cli = Cli::parse_from(["taskboard", "todo", "edit", "ab12", "--priority", "high"]);
        match cli.command {
            Some(Command::Todo {
                command: TodoCommand::Edit { id, fields },
            }) => {
                assert_eq!(id, "ab12");
                assert_eq!(fields.priority.as_deref(), Some("high"));
                assert!(fields.title.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
