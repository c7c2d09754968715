//! Free-form visitor name parsing.
//!
//! # Responsibility
//! - Decide whether raw input is made of name characters only.
//! - Split a full name into a given name and a family name.
//!
//! # Invariants
//! - Parsing never fails with a system fault; rejection is a value.
//! - The nobiliary particle table is closed and fixed at compile time.

mod parser;
mod particles;

pub use parser::{check_characters, parse_full_name, validate_name, NameRejection, ParsedName};
pub use particles::is_nobiliary_particle;
