//! Character check and token-structure rules for full names.
//!
//! # Responsibility
//! - Accept letters, combining marks, whitespace, apostrophes and hyphens.
//! - Split 2-4 token names into `(first_name, family_name)`.
//!
//! # Invariants
//! - `validate_name` assumes `check_characters` already passed.
//! - Three-token names need a particle in the middle slot; four-token names
//!   only accept the `van de/der/den`, `von der/dem` and `de la` compounds.

use super::particles::is_nobiliary_particle;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NAME_CHARACTERS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s'’\p{Letter}\p{Mark}-]+$").expect("valid name characters regex")
});

/// Reason a full name was not accepted.
///
/// Both variants are user-correctable; neither indicates a system fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRejection {
    /// Input holds digits, punctuation, symbols, or is empty.
    InvalidCharacters,
    /// Input does not split into a first name and a family name.
    NeedTwoNames,
}

impl NameRejection {
    /// Correction prompt shown to the person typing the name.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::InvalidCharacters => "Invalid characters in name.",
            Self::NeedTwoNames => "Please enter a first name and a family name.",
        }
    }

    /// Stable machine-readable code for logs and API bodies.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidCharacters => "invalid_characters",
            Self::NeedTwoNames => "need_two_names",
        }
    }
}

impl Display for NameRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prompt())
    }
}

impl Error for NameRejection {}

/// A successfully split full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub first_name: String,
    pub family_name: String,
}

/// Returns whether `text` contains only name characters.
///
/// Accepted: Unicode letters and combining marks, whitespace, `'`, `’`, `-`.
/// Empty input is rejected.
pub fn check_characters(text: &str) -> bool {
    NAME_CHARACTERS_RE.is_match(text)
}

/// Splits a full name into `(first_name, family_name)`.
///
/// Returns `None` for single tokens, five or more tokens, and three/four
/// token names whose middle tokens are not a recognised particle pattern.
pub fn validate_name(text: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    match tokens.as_slice() {
        [first, family] => Some(((*first).to_string(), (*family).to_string())),
        [first, particle, family] => {
            if is_nobiliary_particle(particle) {
                Some(((*first).to_string(), format!("{particle} {family}")))
            } else {
                None
            }
        }
        [first, particle, link, family] => {
            if is_compound_particle(particle, link) {
                Some(((*first).to_string(), format!("{particle} {link} {family}")))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Runs the character check and the token rules in the order callers need.
pub fn parse_full_name(text: &str) -> Result<ParsedName, NameRejection> {
    if !check_characters(text) {
        return Err(NameRejection::InvalidCharacters);
    }

    let (first_name, family_name) = validate_name(text).ok_or(NameRejection::NeedTwoNames)?;
    Ok(ParsedName {
        first_name,
        family_name,
    })
}

fn is_compound_particle(particle: &str, link: &str) -> bool {
    let particle = particle.to_lowercase();
    let link = link.to_lowercase();

    match particle.as_str() {
        "van" => matches!(link.as_str(), "de" | "der" | "den"),
        "von" => matches!(link.as_str(), "der" | "dem"),
        "de" => link == "la",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_compound_particle, NameRejection};

    #[test]
    fn compound_particles_match_case_insensitively() {
        assert!(is_compound_particle("Van", "Der"));
        assert!(is_compound_particle("VON", "dem"));
        assert!(is_compound_particle("De", "La"));
    }

    #[test]
    fn compound_particles_reject_unknown_pairs() {
        assert!(!is_compound_particle("von", "den"));
        assert!(!is_compound_particle("de", "los"));
        assert!(!is_compound_particle("da", "la"));
    }

    #[test]
    fn rejection_codes_are_stable() {
        assert_eq!(NameRejection::InvalidCharacters.code(), "invalid_characters");
        assert_eq!(NameRejection::NeedTwoNames.code(), "need_two_names");
    }
}
