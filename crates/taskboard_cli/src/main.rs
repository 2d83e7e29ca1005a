//! Taskboard command-line front end.
//!
//! # Responsibility
//! - Load the board, forward one user intent to the controller, redraw.
//! - Abort without writing when the stored snapshot cannot be read.

mod args;
mod resolve;

use anyhow::{bail, Context, Result};
use args::{Cli, Command, ProjectCommand, TodoCommand, TodoFields};
use clap::Parser;
use log::warn;
use std::io;
use std::process::ExitCode;
use taskboard_core::store::open_store;
use taskboard_core::{
    init_logging, AppConfig, BoardService, EntityId, KvSnapshotRepository, ProjectForm,
    SqliteStore, TextRenderer, TodoForm,
};

type Service = BoardService<KvSnapshotRepository<SqliteStore>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    if let Some(parent) = config.store_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create store directory {}", parent.display()))?;
    }
    let store = open_store(&config.store_path)
        .with_context(|| format!("cannot open store {}", config.store_path.display()))?;
    let repo = KvSnapshotRepository::new(store, config.storage_key.clone());

    let mut service = BoardService::load(repo).with_context(|| {
        format!(
            "stored board under key `{}` in {} could not be read; it was left untouched",
            config.storage_key,
            config.store_path.display()
        )
    })?;

    let command = cli.command.unwrap_or(Command::Show);
    let redraw = dispatch(&mut service, command)?;
    if redraw {
        let mut renderer = TextRenderer::new(io::stdout().lock());
        service.render(&mut renderer).context("failed to render board")?;
    }
    Ok(())
}

/// Flags override the environment; the merged result is validated once.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env();
    if let Some(path) = &cli.store {
        config = config.with_store_path(path);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level);
    }
    config.validate().context("invalid configuration")
}

/// Applies one intent; returns whether the board should be redrawn.
fn dispatch(service: &mut Service, command: Command) -> Result<bool> {
    match command {
        Command::Show => Ok(true),
        Command::Project { command } => dispatch_project(service, command),
        Command::Todo { command } => dispatch_todo(service, command),
    }
}

fn dispatch_project(service: &mut Service, command: ProjectCommand) -> Result<bool> {
    match command {
        ProjectCommand::List => {
            for project in service.projects() {
                let marker = if Some(project.id()) == service.current_project_id() {
                    '>'
                } else {
                    ' '
                };
                println!("{marker} {}  {}", project.id(), project.name());
            }
            Ok(false)
        }
        ProjectCommand::Add { name } => {
            let name = ProjectForm::new(name).validate()?;
            service.create_project(&name)?;
            Ok(true)
        }
        ProjectCommand::Select { id } => {
            let project_id = resolve::project_id(service.projects(), &id)?;
            service.select_project(&project_id)?;
            Ok(true)
        }
    }
}

fn dispatch_todo(service: &mut Service, command: TodoCommand) -> Result<bool> {
    match command {
        TodoCommand::Add(fields) => {
            let form = TodoForm {
                title: fields.title.unwrap_or_default(),
                description: fields.description.unwrap_or_default(),
                due_date: fields.due.unwrap_or_default(),
                priority: fields.priority.unwrap_or_else(|| "Medium".to_string()),
            };
            service.add_todo_to_current(form.validate()?)?;
            Ok(true)
        }
        TodoCommand::Edit { id, fields } => {
            let todo_id = current_todo_id(service, &id)?;
            let Some(existing) = service
                .current_project()
                .and_then(|project| project.get_todo_by_id(&todo_id))
            else {
                bail!("todo `{id}` is not in the current project");
            };
            let patch = overlay(TodoForm::from_todo(existing), fields).validate_patch()?;
            service.update_todo(&todo_id, patch)?;
            Ok(true)
        }
        TodoCommand::Toggle { id } => {
            let todo_id = current_todo_id(service, &id)?;
            if service.toggle_todo_complete(&todo_id)?.is_none() {
                warn!("event=cli_toggle module=cli status=noop todo_id={todo_id}");
            }
            Ok(true)
        }
        TodoCommand::Delete { id } => {
            let todo_id = current_todo_id(service, &id)?;
            service.delete_todo(&todo_id)?;
            Ok(true)
        }
    }
}

fn current_todo_id(service: &Service, raw: &str) -> Result<EntityId> {
    let Some(project) = service.current_project() else {
        bail!("no project is selected; run `taskboard project select <ID>` first");
    };
    resolve::todo_id(project.todos(), raw)
}

fn overlay(mut form: TodoForm, fields: TodoFields) -> TodoForm {
    if let Some(title) = fields.title {
        form.title = title;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    if let Some(due) = fields.due {
        form.due_date = due;
    }
    if let Some(priority) = fields.priority {
        form.priority = priority;
    }
    form
}
