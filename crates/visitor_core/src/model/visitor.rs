//! Visitor record.
//!
//! # Responsibility
//! - Define the persisted visitor shape and its wire format.
//! - Provide constructors that refuse structurally invalid records.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes.
//! - Renaming produces a new value; stored and displayed copies never alias.

use crate::name::{check_characters, ParsedName};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a visitor record.
pub type VisitorId = Uuid;

/// Structural validation failures for visitor records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitorValidationError {
    NilId,
    EmptyFirstName,
    EmptyFamilyName,
    InvalidCharacters,
}

impl Display for VisitorValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "visitor id must not be nil"),
            Self::EmptyFirstName => write!(f, "first_name must not be empty"),
            Self::EmptyFamilyName => write!(f, "family_name must not be empty"),
            Self::InvalidCharacters => write!(f, "visitor name contains invalid characters"),
        }
    }
}

impl Error for VisitorValidationError {}

/// One registered visitor.
///
/// Serialized as `{ "id", "firstName", "familyName" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: VisitorId,
    pub first_name: String,
    /// May contain spaces, e.g. `van der Waals`.
    pub family_name: String,
}

impl Visitor {
    /// Creates a visitor with a freshly generated id.
    pub fn new(
        first_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Result<Self, VisitorValidationError> {
        Self::with_id(Uuid::new_v4(), first_name, family_name)
    }

    /// Creates a visitor with a caller-provided id.
    ///
    /// Used when identity already exists, e.g. records sent back by a client.
    pub fn with_id(
        id: VisitorId,
        first_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Result<Self, VisitorValidationError> {
        let visitor = Self {
            id,
            first_name: first_name.into(),
            family_name: family_name.into(),
        };
        visitor.validate()?;
        Ok(visitor)
    }

    /// Creates a visitor with a fresh id from an accepted full name.
    pub fn from_parsed(parsed: ParsedName) -> Result<Self, VisitorValidationError> {
        Self::new(parsed.first_name, parsed.family_name)
    }

    /// Returns a new value carrying this visitor's id and the given names.
    pub fn renamed(
        &self,
        first_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Result<Self, VisitorValidationError> {
        Self::with_id(self.id, first_name, family_name)
    }

    /// Checks structural invariants.
    ///
    /// Token rules (particles, token counts) are not re-checked here; they
    /// belong to the name parser and run before construction.
    pub fn validate(&self) -> Result<(), VisitorValidationError> {
        if self.id.is_nil() {
            return Err(VisitorValidationError::NilId);
        }
        if self.first_name.trim().is_empty() {
            return Err(VisitorValidationError::EmptyFirstName);
        }
        if self.family_name.trim().is_empty() {
            return Err(VisitorValidationError::EmptyFamilyName);
        }
        if !check_characters(&self.first_name) || !check_characters(&self.family_name) {
            return Err(VisitorValidationError::InvalidCharacters);
        }
        Ok(())
    }

    /// Display form, `first family`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }
}
