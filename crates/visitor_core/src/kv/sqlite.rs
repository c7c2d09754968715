//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist key-value pairs in the `kv_entries` table.
//! - Commit every single-key write in its own transaction.
//!
//! # Invariants
//! - Keys are stored as JSON arrays of segments, so a prefix scan is a
//!   textual prefix match on the encoded key.
//! - The connection must have all migrations applied (checked in `try_new`).

use super::{KvEntry, KvError, KvKey, KvResult, KvStore};
use crate::db::migrations::latest_version;
use rusqlite::{params, Connection};

const KV_TABLE: &str = "kv_entries";

/// Key-value store over a migrated SQLite connection.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection after checking it carries the expected schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when `kv_entries` is absent.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(KvError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [KV_TABLE],
            |row| row.get(0),
        )?;
        if has_table == 0 {
            return Err(KvError::MissingRequiredTable(KV_TABLE));
        }

        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn set(&self, key: &KvKey, value: &str) -> KvResult<()> {
        let encoded = encode_key(key)?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![encoded, value],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete(&self, key: &KvKey) -> KvResult<()> {
        let encoded = encode_key(key)?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM kv_entries WHERE key = ?1;", [encoded])?;
        tx.commit()?;
        Ok(())
    }

    fn list(&self, prefix: &KvKey) -> KvResult<Vec<KvEntry>> {
        let pattern = encode_prefix(prefix)?;
        let mut stmt = self.conn.prepare(
            "SELECT key, value
             FROM kv_entries
             WHERE substr(key, 1, length(?1)) = ?1;",
        )?;
        let mut rows = stmt.query([pattern])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            let raw_key: String = row.get(0)?;
            let key = decode_key(&raw_key)?;
            if !key.extends(prefix) {
                continue;
            }
            entries.push(KvEntry {
                key,
                value: row.get(1)?,
            });
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}

fn encode_key(key: &KvKey) -> KvResult<String> {
    serde_json::to_string(key.segments()).map_err(|err| KvError::InvalidKey(err.to_string()))
}

// `["visitor"]` scans as `["visitor",`; the root prefix scans as `[`.
fn encode_prefix(prefix: &KvKey) -> KvResult<String> {
    if prefix.segments().is_empty() {
        return Ok("[".to_string());
    }
    let mut encoded = encode_key(prefix)?;
    encoded.pop();
    encoded.push(',');
    Ok(encoded)
}

fn decode_key(raw: &str) -> KvResult<KvKey> {
    let segments: Vec<String> =
        serde_json::from_str(raw).map_err(|_| KvError::InvalidKey(raw.to_string()))?;
    Ok(KvKey::from_segments(segments))
}
