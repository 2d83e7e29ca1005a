//! Opaque entity identity.
//!
//! New entities get a hyphenated UUID v4. Ids read back from storage are
//! kept verbatim, so boards written with other id schemes (`"1700000000000"`,
//! `"project-1700000000000"`) keep their identity.

use super::ModelValidationError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Non-blank, immutable identifier shared by projects and todos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    /// Fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id; the text is kept exactly as given.
    ///
    /// # Errors
    /// - `EmptyId` when `raw` is blank.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ModelValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ModelValidationError::EmptyId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Abbreviated form for display: the first UUID group, or the whole id
    /// when it is not a UUID.
    pub fn short(&self) -> &str {
        match Uuid::parse_str(&self.0) {
            Ok(_) => &self.0[..8],
            Err(_) => &self.0,
        }
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = ModelValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
