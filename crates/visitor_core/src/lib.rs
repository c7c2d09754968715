//! Core domain logic for the visitor registry.
//! Name parsing, visitor records and their persistence live here.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod name;
pub mod repo;
pub mod seed;
pub mod service;

pub use kv::{KvEntry, KvError, KvKey, KvResult, KvStore, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::visitor::{Visitor, VisitorId, VisitorValidationError};
pub use name::{check_characters, parse_full_name, validate_name, NameRejection, ParsedName};
pub use repo::visitor_repo::{
    RepoError, RepoResult, VisitorRepository, VisitorStore, VISITOR_NAMESPACE,
};
pub use service::visitor_service::{ServiceError, ServiceResult, VisitorService, MAX_VISITORS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
