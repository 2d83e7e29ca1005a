//! Persistence adapter between the in-memory board and a key-value medium.
//!
//! # Responsibility
//! - Serialize the complete board into one text blob under a fixed key.
//! - Rebuild typed entities from that blob, rejecting invalid data.
//!
//! # Invariants
//! - Raw records and entities are separate types joined by one conversion.
//! - A failed load never writes to the medium.
//! - `load(save(state))` reproduces ids, fields and selection exactly.

pub mod records;
pub mod snapshot_repo;
