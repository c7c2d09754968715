//! Closed table of nobiliary particles (`van`, `de`, `von`, ...).
//!
//! # Invariants
//! - Lookups are case-insensitive; entries are stored lowercased.
//! - Entries are whole tokens; multi-token compounds live in the parser.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const NOBILIARY_PARTICLES: &[&str] = &[
    // Germanic
    "van", "von", "zu", "zum", "zur", "auf", "der",
    // French
    "de", "du", "des",
    // Italian
    "di", "del", "della", "dei", "dal", "dalla", "dai",
    // Portuguese
    "do", "dos", "da", "das",
    // Arabic
    "al", "el",
    // Saints
    "saint", "sainte", "san", "santa", "são", "sao", "santo", "st", "ste", "sta", "st.", "ste.",
    "sta.",
];

static PARTICLE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NOBILIARY_PARTICLES.iter().copied().collect());

/// Returns whether `token` is a known nobiliary particle, ignoring case.
pub fn is_nobiliary_particle(token: &str) -> bool {
    PARTICLE_SET.contains(token.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::{is_nobiliary_particle, NOBILIARY_PARTICLES};

    #[test]
    fn table_entries_are_lowercase() {
        for particle in NOBILIARY_PARTICLES {
            assert_eq!(particle.to_lowercase(), *particle);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(is_nobiliary_particle("VAN"));
        assert!(is_nobiliary_particle("Della"));
        assert!(is_nobiliary_particle("SÃO"));
        assert!(is_nobiliary_particle("St."));
    }

    #[test]
    fn lookup_rejects_given_names_and_compounds() {
        assert!(!is_nobiliary_particle("Luc"));
        assert!(!is_nobiliary_particle("de la"));
        assert!(!is_nobiliary_particle(""));
    }
}
