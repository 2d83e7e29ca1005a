//! Core domain logic for Taskboard.
//! This crate is the single source of truth for project/todo invariants,
//! snapshot persistence and the state controller.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod ui;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::{
    BoardState, EntityId, ModelValidationError, NewTodo, Priority, Project, ProjectId, Todo,
    TodoId, TodoPatch, DEFAULT_PROJECT_NAME,
};
pub use repo::records::{ProjectRecord, SnapshotRecord, TodoRecord};
pub use repo::snapshot_repo::{
    KvSnapshotRepository, RepoError, RepoResult, SnapshotRepository, DEFAULT_STORAGE_KEY,
};
pub use service::board_service::{BoardService, ServiceError, ServiceResult};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};
pub use ui::{DueClass, DueLabel, ProjectForm, RenderBoundary, TextRenderer, TodoForm};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
