//! Visitor use-case service.
//!
//! # Responsibility
//! - Turn raw full-name input into persisted visitors.
//! - Map failures onto user-facing messages.
//!
//! # Invariants
//! - Every name reaching the repository passed the name parser or, for
//!   records supplied whole, `Visitor::validate()`.
//! - Name rejections are ordinary outcomes and are logged at debug level.
//! - The service never retries a failed persistence call.

use crate::model::visitor::{Visitor, VisitorId, VisitorValidationError};
use crate::name::{parse_full_name, NameRejection};
use crate::repo::visitor_repo::{RepoError, VisitorRepository};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of visitors the registry holds.
pub const MAX_VISITORS: usize = 1000;

const TABLE_FULL_MESSAGE: &str = "The table is full. Delete rows and try again.";
const RETRYABLE_MESSAGE: &str = "Something went wrong while saving. Please try again.";

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Full-name input was rejected by the name parser.
    Rejected(NameRejection),
    /// A whole record failed structural validation.
    Invalid(VisitorValidationError),
    /// The registry already holds `MAX_VISITORS` records.
    TableFull,
    Repo(RepoError),
}

impl ServiceError {
    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Rejected(rejection) => rejection.prompt(),
            Self::Invalid(VisitorValidationError::InvalidCharacters) => {
                NameRejection::InvalidCharacters.prompt()
            }
            Self::Invalid(_) => NameRejection::NeedTwoNames.prompt(),
            Self::TableFull => TABLE_FULL_MESSAGE,
            Self::Repo(_) => RETRYABLE_MESSAGE,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(rejection) => write!(f, "name rejected: {}", rejection.code()),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::TableFull => write!(f, "visitor table is full ({MAX_VISITORS} records)"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Invalid(err) => Some(err),
            Self::TableFull => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NameRejection> for ServiceError {
    fn from(value: NameRejection) -> Self {
        Self::Rejected(value)
    }
}

impl From<VisitorValidationError> for ServiceError {
    fn from(value: VisitorValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service over a visitor repository.
pub struct VisitorService<R: VisitorRepository> {
    repo: R,
}

impl<R: VisitorRepository> VisitorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Parses `full_name` and registers a new visitor with a fresh id.
    ///
    /// # Errors
    /// - `Rejected` when the name fails the character or token rules.
    /// - `TableFull` when the registry is at capacity.
    /// - `Repo` when the write is not committed.
    pub fn register(&self, full_name: &str) -> ServiceResult<Visitor> {
        let parsed = parse_full_name(full_name)
            .inspect_err(|rejection| log_rejection("register", *rejection))?;
        let visitor = Visitor::from_parsed(parsed)?;
        self.add(visitor)
    }

    /// Persists a client-built visitor after structural validation.
    pub fn add(&self, visitor: Visitor) -> ServiceResult<Visitor> {
        visitor.validate()?;
        self.ensure_capacity()?;
        self.repo.create(&visitor)?;
        Ok(visitor)
    }

    /// Parses `full_name` and stores it under the existing `id`.
    ///
    /// Upsert semantics: a missing id is written, not rejected.
    pub fn rename(&self, id: VisitorId, full_name: &str) -> ServiceResult<Visitor> {
        let parsed = parse_full_name(full_name)
            .inspect_err(|rejection| log_rejection("rename", *rejection))?;
        let visitor = Visitor::with_id(id, parsed.first_name, parsed.family_name)?;
        Ok(self.repo.update(visitor)?)
    }

    /// Stores a whole record under its id after structural validation.
    pub fn save(&self, visitor: Visitor) -> ServiceResult<Visitor> {
        visitor.validate()?;
        Ok(self.repo.update(visitor)?)
    }

    pub fn remove(&self, id: VisitorId) -> ServiceResult<()> {
        Ok(self.repo.delete(id)?)
    }

    /// Lists all visitors ordered by family name.
    pub fn list(&self) -> ServiceResult<Vec<Visitor>> {
        Ok(self.repo.list_all()?)
    }

    /// Removes every visitor; returns how many were deleted.
    pub fn clear(&self) -> ServiceResult<usize> {
        Ok(self.repo.delete_all()?)
    }

    fn ensure_capacity(&self) -> ServiceResult<()> {
        let count = self.repo.count()?;
        if count >= MAX_VISITORS {
            debug!(
                "event=visitor_register module=service status=rejected reason=table_full count={count}"
            );
            return Err(ServiceError::TableFull);
        }
        Ok(())
    }
}

fn log_rejection(op: &str, rejection: NameRejection) {
    debug!(
        "event=visitor_{op} module=service status=rejected reason={}",
        rejection.code()
    );
}

#[cfg(test)]
mod tests {
    use super::{ServiceError, TABLE_FULL_MESSAGE};
    use crate::model::visitor::VisitorValidationError;
    use crate::name::NameRejection;

    #[test]
    fn user_messages_follow_failure_kind() {
        assert_eq!(
            ServiceError::Rejected(NameRejection::NeedTwoNames).user_message(),
            "Please enter a first name and a family name."
        );
        assert_eq!(
            ServiceError::Invalid(VisitorValidationError::InvalidCharacters).user_message(),
            "Invalid characters in name."
        );
        assert_eq!(ServiceError::TableFull.user_message(), TABLE_FULL_MESSAGE);
    }
}
