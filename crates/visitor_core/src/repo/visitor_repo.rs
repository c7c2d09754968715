//! Visitor repository contract and key-value implementation.
//!
//! # Responsibility
//! - Provide create/update/delete/list over visitor records.
//! - Keep key layout and JSON encoding inside the persistence boundary.
//!
//! # Invariants
//! - Every record lives under `["visitor", <id>]`; one key per id.
//! - Names are neither re-parsed nor re-validated here, on write or read;
//!   callers parse before constructing.
//! - Single-key writes are delegated to the substrate's atomic primitives
//!   and are never retried.
//! - Read paths reject records that do not decode or whose embedded id
//!   disagrees with their key.

use crate::kv::{KvError, KvKey, KvStore};
use crate::model::visitor::{Visitor, VisitorId};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed namespace segment for visitor keys.
pub const VISITOR_NAMESPACE: &str = "visitor";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for visitor persistence and listing.
#[derive(Debug)]
pub enum RepoError {
    /// The substrate did not commit the operation.
    PersistenceFailure(KvError),
    /// A stored record could not be turned back into a `Visitor`.
    InvalidData(String),
    /// A bulk wipe removed `deleted` records but `failed` deletes did not
    /// commit; `first_error` is the earliest substrate failure.
    PartialWipe {
        deleted: usize,
        failed: usize,
        first_error: KvError,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersistenceFailure(err) => write!(f, "persistence failure: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted visitor data: {message}"),
            Self::PartialWipe {
                deleted,
                failed,
                first_error,
            } => write!(
                f,
                "bulk delete removed {deleted} record(s), {failed} failed: {first_error}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PersistenceFailure(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::PartialWipe { first_error, .. } => Some(first_error),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::PersistenceFailure(value)
    }
}

/// Repository interface for visitor records.
pub trait VisitorRepository {
    /// Persists a new record and returns its id.
    fn create(&self, visitor: &Visitor) -> RepoResult<VisitorId>;
    /// Upserts `visitor` under its id and returns the stored value.
    fn update(&self, visitor: Visitor) -> RepoResult<Visitor>;
    /// Removes the record with `id`; absent ids succeed.
    fn delete(&self, id: VisitorId) -> RepoResult<()>;
    /// Fresh scan of every record, ordered by family name.
    fn list_all(&self) -> RepoResult<Vec<Visitor>>;
    /// Number of stored records; values are not decoded.
    fn count(&self) -> RepoResult<usize>;
    /// Best-effort wipe of the namespace; attempts every key and returns
    /// the number of deletes.
    fn delete_all(&self) -> RepoResult<usize>;
}

/// Visitor repository over any key-value substrate.
pub struct VisitorStore<K: KvStore> {
    kv: K,
    namespace: KvKey,
}

impl<K: KvStore> VisitorStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            namespace: KvKey::from_segments([VISITOR_NAMESPACE]),
        }
    }

    /// Key under which the record with `id` is stored.
    pub fn key_for(&self, id: VisitorId) -> KvKey {
        self.namespace.child(id.to_string())
    }

    fn put(&self, op: &str, visitor: &Visitor) -> RepoResult<()> {
        let value = serde_json::to_string(visitor)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;

        match self.kv.set(&self.key_for(visitor.id), &value) {
            Ok(()) => {
                info!("event=visitor_{op} module=repo status=ok id={}", visitor.id);
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=visitor_{op} module=repo status=error id={} error_code=kv_set_failed error={err}",
                    visitor.id
                );
                Err(err.into())
            }
        }
    }
}

impl<K: KvStore> VisitorRepository for VisitorStore<K> {
    fn create(&self, visitor: &Visitor) -> RepoResult<VisitorId> {
        self.put("create", visitor)?;
        Ok(visitor.id)
    }

    fn update(&self, visitor: Visitor) -> RepoResult<Visitor> {
        self.put("update", &visitor)?;
        Ok(visitor)
    }

    fn delete(&self, id: VisitorId) -> RepoResult<()> {
        match self.kv.delete(&self.key_for(id)) {
            Ok(()) => {
                info!("event=visitor_delete module=repo status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=visitor_delete module=repo status=error id={id} error_code=kv_delete_failed error={err}"
                );
                Err(err.into())
            }
        }
    }

    fn list_all(&self) -> RepoResult<Vec<Visitor>> {
        let entries = self.kv.list(&self.namespace)?;
        let mut visitors = Vec::with_capacity(entries.len());

        for entry in entries {
            let visitor: Visitor = serde_json::from_str(&entry.value).map_err(|err| {
                RepoError::InvalidData(format!("record at {} does not decode: {err}", entry.key))
            })?;

            let expected = visitor.id.to_string();
            if entry.key.last() != Some(expected.as_str()) {
                return Err(RepoError::InvalidData(format!(
                    "record at {} carries id {expected}",
                    entry.key
                )));
            }
            visitors.push(visitor);
        }

        visitors.sort_by(compare_family_names);
        debug!(
            "event=visitor_list module=repo status=ok count={}",
            visitors.len()
        );
        Ok(visitors)
    }

    fn count(&self) -> RepoResult<usize> {
        Ok(self.kv.list(&self.namespace)?.len())
    }

    fn delete_all(&self) -> RepoResult<usize> {
        let entries = self.kv.list(&self.namespace)?;
        let mut deleted = 0;
        let mut failed = 0;
        let mut first_error = None;

        for entry in entries {
            match self.kv.delete(&entry.key) {
                Ok(()) => deleted += 1,
                Err(err) => {
                    warn!(
                        "event=visitor_delete_all module=repo status=error key={} error={err}",
                        entry.key
                    );
                    failed += 1;
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            None => {
                info!("event=visitor_delete_all module=repo status=ok deleted={deleted}");
                Ok(deleted)
            }
            Some(first_error) => {
                error!(
                    "event=visitor_delete_all module=repo status=error deleted={deleted} failed={failed}"
                );
                Err(RepoError::PartialWipe {
                    deleted,
                    failed,
                    first_error,
                })
            }
        }
    }
}

/// Three-way comparison on `family_name` only; ties keep scan order.
pub fn compare_family_names(a: &Visitor, b: &Visitor) -> std::cmp::Ordering {
    a.family_name.cmp(&b.family_name)
}
