//! Snapshot repository contract and key-value implementation.
//!
//! # Responsibility
//! - Load the whole board from one key, seeding fresh storage.
//! - Save the whole board to one key in a single write.
//!
//! # Invariants
//! - Read paths reject malformed or invalid blobs instead of masking them.
//! - Read paths never write; a rejected blob stays in place for recovery.

use super::records::SnapshotRecord;
use crate::model::{BoardState, ModelValidationError};
use crate::store::{KeyValueStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Storage key used when configuration does not override it.
pub const DEFAULT_STORAGE_KEY: &str = "todoProjects";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure while loading or saving a snapshot.
#[derive(Debug)]
pub enum RepoError {
    /// The storage medium failed.
    Store(StoreError),
    /// The stored blob is not a parsable snapshot.
    Malformed(serde_json::Error),
    /// The snapshot could not be encoded.
    Encode(serde_json::Error),
    /// A restored entity violates a model invariant.
    Validation(ModelValidationError),
    /// The snapshot is structurally inconsistent.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Malformed(err) => write!(f, "stored snapshot is malformed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Validation(err) => write!(f, "invalid persisted entity: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted snapshot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Malformed(err) | Self::Encode(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Whole-board persistence contract.
pub trait SnapshotRepository {
    /// Loads the board; fresh storage yields `BoardState::initial()`.
    fn load(&self) -> RepoResult<BoardState>;
    /// Overwrites the stored board with `state`.
    fn save(&self, state: &BoardState) -> RepoResult<()>;
}

/// Snapshot repository writing JSON under one key of a key-value store.
pub struct KvSnapshotRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvSnapshotRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Repository on `DEFAULT_STORAGE_KEY`.
    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn decode(&self, blob: &str) -> RepoResult<BoardState> {
        let record = SnapshotRecord::from_json(blob).map_err(RepoError::Malformed)?;
        record.into_state()
    }
}

impl<S: KeyValueStore> SnapshotRepository for KvSnapshotRepository<S> {
    fn load(&self) -> RepoResult<BoardState> {
        let started_at = Instant::now();

        let Some(blob) = self.store.get(&self.key)? else {
            info!(
                "event=snapshot_load module=repo status=ok source=initial key={} duration_ms={}",
                self.key,
                started_at.elapsed().as_millis()
            );
            return Ok(BoardState::initial());
        };

        match self.decode(&blob) {
            Ok(state) => {
                info!(
                    "event=snapshot_load module=repo status=ok source=store key={} projects={} todos={} duration_ms={}",
                    self.key,
                    state.projects().len(),
                    state.todo_count(),
                    started_at.elapsed().as_millis()
                );
                Ok(state)
            }
            Err(err) => {
                error!(
                    "event=snapshot_load module=repo status=error key={} blob_bytes={} duration_ms={} error={}",
                    self.key,
                    blob.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, state: &BoardState) -> RepoResult<()> {
        let started_at = Instant::now();
        let blob = serde_json::to_string(&SnapshotRecord::from_state(state))
            .map_err(RepoError::Encode)?;

        if let Err(err) = self.store.set(&self.key, &blob) {
            error!(
                "event=snapshot_save module=repo status=error key={} error={}",
                self.key, err
            );
            return Err(err.into());
        }

        info!(
            "event=snapshot_save module=repo status=ok key={} projects={} todos={} blob_bytes={} duration_ms={}",
            self.key,
            state.projects().len(),
            state.todo_count(),
            blob.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}
