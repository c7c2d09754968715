//! Visitor domain model.
//!
//! # Invariants
//! - Every visitor is identified by a stable, non-nil `VisitorId`.
//! - Name fields are non-empty and hold name characters only.

pub mod visitor;
