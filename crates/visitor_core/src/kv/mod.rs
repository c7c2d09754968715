//! Ordered key-value substrate contract.
//!
//! # Responsibility
//! - Define the atomic single-key set/delete and prefix scan used by stores.
//! - Provide an in-memory and a SQLite-backed implementation.
//!
//! # Invariants
//! - `set` and `delete` either apply fully or report an error.
//! - `list(prefix)` returns entries whose key strictly extends `prefix`,
//!   ordered by key.
//! - Implementations never cache reads across calls.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Failure reported by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    Sqlite(rusqlite::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    InvalidKey(String),
    Poisoned,
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::InvalidKey(key) => write!(f, "invalid stored key `{key}`"),
            Self::Poisoned => write!(f, "key-value store lock poisoned"),
            Self::Unavailable(message) => write!(f, "key-value store unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Hierarchical key made of string segments, e.g. `["visitor", "<id>"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KvKey(Vec<String>);

impl KvKey {
    /// Empty key; as a prefix it matches every entry.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns a new key with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// True when `prefix` is a proper prefix of this key.
    pub fn extends(&self, prefix: &KvKey) -> bool {
        self.0.len() > prefix.0.len() && self.0.starts_with(&prefix.0)
    }
}

impl Display for KvKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// One key/value pair yielded by a prefix scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    pub key: KvKey,
    pub value: String,
}

/// Generic ordered key-value substrate.
pub trait KvStore {
    /// Atomically writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &KvKey, value: &str) -> KvResult<()>;
    /// Atomically removes `key`. Removing an absent key succeeds.
    fn delete(&self, key: &KvKey) -> KvResult<()>;
    /// Returns all entries strictly under `prefix`, ordered by key.
    fn list(&self, prefix: &KvKey) -> KvResult<Vec<KvEntry>>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn set(&self, key: &KvKey, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &KvKey) -> KvResult<()> {
        (**self).delete(key)
    }

    fn list(&self, prefix: &KvKey) -> KvResult<Vec<KvEntry>> {
        (**self).list(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::KvKey;

    #[test]
    fn extends_requires_proper_prefix() {
        let namespace = KvKey::from_segments(["visitor"]);
        let key = namespace.child("abc");

        assert!(key.extends(&namespace));
        assert!(key.extends(&KvKey::root()));
        assert!(!namespace.extends(&namespace));
        assert!(!KvKey::from_segments(["visitors", "abc"]).extends(&namespace));
    }

    #[test]
    fn display_joins_segments() {
        let key = KvKey::from_segments(["visitor", "42"]);
        assert_eq!(key.to_string(), "[visitor, 42]");
        assert_eq!(key.last(), Some("42"));
    }
}
