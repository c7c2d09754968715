//! Status/body envelope returned by every handler.

use serde::Serialize;
use serde_json::json;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_METHOD_NOT_ALLOWED: u16 = 405;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Serialized handler outcome.
///
/// Success bodies hold the affected record(s) in wire shape; error bodies
/// are `{ "error": <code>, "message": <text> }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub(crate) fn ok(payload: &impl Serialize) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self {
                status: STATUS_OK,
                body,
            },
            Err(err) => Self::error(STATUS_INTERNAL_ERROR, "encode_failed", &err.to_string()),
        }
    }

    pub(crate) fn error(status: u16, code: &str, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": code, "message": message }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
