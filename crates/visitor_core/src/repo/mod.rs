//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the visitor data access contract.
//! - Isolate key layout and encoding from service orchestration.
//!
//! # Invariants
//! - Repository APIs surface substrate failures as `PersistenceFailure`
//!   values and never retry.

pub mod visitor_repo;
