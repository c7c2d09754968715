//! Request-handler layer for the visitor registry.
//!
//! Maps GET/POST/PUT/DELETE with JSON payloads onto `visitor_core` and
//! returns status/body envelopes. Transport framing is left to the caller.

pub mod api;
mod response;

pub use api::{handle_request, resolve_db_path, VisitorApi};
pub use response::ApiResponse;
