//! Random visitor generation for demos and tests.
//!
//! # Invariants
//! - Name tables are embedded at build time and parsed once per process.
//! - Every table entry passes `check_characters`.

use crate::model::visitor::{Visitor, VisitorValidationError};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

static FIRST_NAMES: Lazy<Vec<&'static str>> =
    Lazy::new(|| parse_table(include_str!("first_names.txt")));
static FAMILY_NAMES: Lazy<Vec<&'static str>> =
    Lazy::new(|| parse_table(include_str!("family_names.txt")));

/// Given names available to the generator.
pub fn first_names() -> &'static [&'static str] {
    FIRST_NAMES.as_slice()
}

/// Family names available to the generator, particles included.
pub fn family_names() -> &'static [&'static str] {
    FAMILY_NAMES.as_slice()
}

/// Builds one visitor with a fresh id from uniformly chosen names.
pub fn random_visitor<R: Rng + ?Sized>(rng: &mut R) -> Result<Visitor, VisitorValidationError> {
    let first = first_names().choose(rng).copied().unwrap_or_default();
    let family = family_names().choose(rng).copied().unwrap_or_default();
    Visitor::new(first, family)
}

/// Builds `count` random visitors using the thread-local generator.
pub fn random_visitors(count: usize) -> Result<Vec<Visitor>, VisitorValidationError> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| random_visitor(&mut rng)).collect()
}

fn parse_table(raw: &'static str) -> Vec<&'static str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
