//! Verb handlers over the visitor service.
//!
//! # Responsibility
//! - Decode JSON payloads, call the service, encode the affected records.
//! - Map service failures onto status codes and user-facing messages.
//!
//! # Invariants
//! - Handlers never panic; every outcome is an `ApiResponse`.
//! - Name rejections are client errors and are not logged as faults.
//! - Persistence failures return a generic retryable message; the handler
//!   does not retry.

use crate::response::{
    ApiResponse, STATUS_BAD_REQUEST, STATUS_CONFLICT, STATUS_INTERNAL_ERROR,
    STATUS_METHOD_NOT_ALLOWED,
};
use log::{debug, error};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;
use visitor_core::db::open_db;
use visitor_core::{
    ServiceError, SqliteKvStore, Visitor, VisitorRepository, VisitorService, VisitorStore,
};

const DB_PATH_ENV: &str = "VISITORS_DB_PATH";
const DB_FILE_NAME: &str = "visitors.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Handlers for the `/visitors` resource.
pub struct VisitorApi<R: VisitorRepository> {
    service: VisitorService<R>,
}

impl<R: VisitorRepository> VisitorApi<R> {
    pub fn new(service: VisitorService<R>) -> Self {
        Self { service }
    }

    pub fn from_repo(repo: R) -> Self {
        Self::new(VisitorService::new(repo))
    }

    /// Routes `method` to its handler; unknown verbs get 405.
    pub fn dispatch(&self, method: &str, body: &str) -> ApiResponse {
        match method.trim().to_ascii_uppercase().as_str() {
            "GET" => self.get(),
            "POST" => self.post(body),
            "PUT" => self.put(body),
            "DELETE" => self.delete(body),
            other => ApiResponse::error(
                STATUS_METHOD_NOT_ALLOWED,
                "method_not_allowed",
                &format!("unsupported method `{other}`"),
            ),
        }
    }

    /// GET: every visitor, ordered by family name.
    pub fn get(&self) -> ApiResponse {
        match self.service.list() {
            Ok(visitors) => ApiResponse::ok(&visitors),
            Err(err) => failure("get", &err),
        }
    }

    /// POST: body is a visitor record; responds with the stored record.
    pub fn post(&self, body: &str) -> ApiResponse {
        let visitor = match decode_visitor(body) {
            Ok(visitor) => visitor,
            Err(response) => return response,
        };
        match self.service.add(visitor) {
            Ok(created) => ApiResponse::ok(&created),
            Err(err) => failure("post", &err),
        }
    }

    /// PUT: body is a visitor record; upserts under its id.
    pub fn put(&self, body: &str) -> ApiResponse {
        let visitor = match decode_visitor(body) {
            Ok(visitor) => visitor,
            Err(response) => return response,
        };
        match self.service.save(visitor) {
            Ok(saved) => ApiResponse::ok(&saved),
            Err(err) => failure("put", &err),
        }
    }

    /// DELETE: body is the bare id as a JSON string; echoes the id.
    pub fn delete(&self, body: &str) -> ApiResponse {
        let id = match decode_id(body) {
            Ok(id) => id,
            Err(response) => return response,
        };
        match self.service.remove(id) {
            Ok(()) => ApiResponse::ok(&id.to_string()),
            Err(err) => failure("delete", &err),
        }
    }

    /// Free-text entry: parses a full name and registers a new visitor.
    pub fn submit_entry(&self, full_name: &str) -> ApiResponse {
        match self.service.register(full_name) {
            Ok(created) => ApiResponse::ok(&created),
            Err(err) => failure("entry", &err),
        }
    }
}

/// Opens the registry database and dispatches one request.
///
/// A fresh connection is opened per call; nothing is cached between calls.
pub fn handle_request(method: &str, body: &str) -> ApiResponse {
    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=api_request module=api status=error error_code=db_open_failed error={err}");
            return retryable();
        }
    };
    let kv = match SqliteKvStore::try_new(&conn) {
        Ok(kv) => kv,
        Err(err) => {
            error!("event=api_request module=api status=error error_code=kv_init_failed error={err}");
            return retryable();
        }
    };

    VisitorApi::from_repo(VisitorStore::new(kv)).dispatch(method, body)
}

/// Database path from `VISITORS_DB_PATH`, else a file in the temp dir.
///
/// Resolved once per process.
pub fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn decode_visitor(body: &str) -> Result<Visitor, ApiResponse> {
    serde_json::from_str(body).map_err(|err| {
        debug!("event=api_decode module=api status=rejected target=visitor error={err}");
        ApiResponse::error(
            STATUS_BAD_REQUEST,
            "malformed_body",
            "Expected a visitor record { id, firstName, familyName }.",
        )
    })
}

fn decode_id(body: &str) -> Result<Uuid, ApiResponse> {
    let malformed = || {
        ApiResponse::error(
            STATUS_BAD_REQUEST,
            "malformed_body",
            "Expected a visitor id as a JSON string.",
        )
    };
    let raw: String = serde_json::from_str(body).map_err(|_| malformed())?;
    Uuid::parse_str(raw.trim()).map_err(|_| malformed())
}

fn failure(op: &str, err: &ServiceError) -> ApiResponse {
    match err {
        ServiceError::Rejected(rejection) => {
            debug!("event=api_{op} module=api status=rejected reason={}", rejection.code());
            ApiResponse::error(STATUS_BAD_REQUEST, rejection.code(), err.user_message())
        }
        ServiceError::Invalid(invalid) => {
            debug!("event=api_{op} module=api status=rejected reason={invalid}");
            ApiResponse::error(STATUS_BAD_REQUEST, "invalid_record", err.user_message())
        }
        ServiceError::TableFull => {
            ApiResponse::error(STATUS_CONFLICT, "table_full", err.user_message())
        }
        ServiceError::Repo(repo_err) => {
            error!("event=api_{op} module=api status=error error={repo_err}");
            ApiResponse::error(STATUS_INTERNAL_ERROR, "persistence_failure", err.user_message())
        }
    }
}

fn retryable() -> ApiResponse {
    ApiResponse::error(
        STATUS_INTERNAL_ERROR,
        "persistence_failure",
        "Something went wrong while saving. Please try again.",
    )
}

#[cfg(test)]
mod tests {
    use super::{decode_id, handle_request};
    use uuid::Uuid;

    #[test]
    fn decode_id_accepts_json_string_only() {
        let id = Uuid::new_v4();
        assert_eq!(decode_id(&format!("\"{id}\"")).unwrap(), id);
        assert_eq!(decode_id(&id.to_string()).unwrap_err().status, 400);
        assert_eq!(decode_id("\"not-a-uuid\"").unwrap_err().status, 400);
    }

    #[test]
    fn handle_request_round_trips_through_default_database() {
        let visitor = visitor_core::Visitor::new("Søren", "Kierkegaard").unwrap();
        let body = serde_json::to_string(&visitor).unwrap();

        let created = handle_request("POST", &body);
        assert_eq!(created.status, 200, "{}", created.body);

        let listed = handle_request("GET", "");
        assert!(listed.body.contains(&visitor.id.to_string()));

        let deleted = handle_request("DELETE", &format!("\"{}\"", visitor.id));
        assert_eq!(deleted.status, 200);
        assert!(!handle_request("GET", "").body.contains(&visitor.id.to_string()));
    }
}
