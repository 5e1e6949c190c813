//! Name decomposition.
//!
//! Turns a raw full name into ordered first/middle/last components via a
//! fixed, non-reversible cleanup pipeline. The decomposition is pure: the
//! same input always produces the same components, and the result is
//! immutable once built.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize;
use crate::tables::{REMOVABLE_TOKENS, SURNAME_PARTICLES};

/// Punctuation stripped repeatedly from the end of a cleaned name.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '}', ']'];

/// Characters removed anywhere in the string (copy-paste artifacts).
const PASTE_NOISE: &[char] = &['"', '\'', '<', '>'];

static SPACE_RUNS: OnceLock<Regex> = OnceLock::new();

/// Matches runs of two or more whitespace characters.
fn space_runs() -> &'static Regex {
    SPACE_RUNS.get_or_init(|| Regex::new(r"\s{2,}").expect("static pattern compiles"))
}

/// Structural decomposition of a full name.
///
/// Each sequence is insertion-order significant and may contain duplicate
/// entries. An unparseable or empty input yields three empty sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameComponents {
    first_names: Vec<String>,
    middle_names: Vec<String>,
    last_names: Vec<String>,
}

impl NameComponents {
    /// Decomposes a raw full name into first/middle/last components.
    #[must_use]
    pub fn decompose(full_name: &str) -> Self {
        let cleaned = clean_full_name(full_name);
        if cleaned.is_empty() {
            return Self::default();
        }

        let parts: Vec<&str> = cleaned.split(' ').filter(|t| !t.is_empty()).collect();
        if parts.is_empty() {
            return Self::default();
        }

        let mut components = Self::default();

        // Hyphenated first token yields multiple first names.
        if parts[0].contains('-') {
            components.first_names.extend(
                parts[0]
                    .split('-')
                    .filter(|f| !f.is_empty())
                    .map(str::to_string),
            );
        } else {
            components.first_names.push(parts[0].to_string());
        }

        let n = parts.len();
        for i in 1..n {
            // First surname particle captures itself and everything after it.
            if SURNAME_PARTICLES.contains(&parts[i]) {
                components
                    .last_names
                    .extend(parts[i..].iter().map(|p| (*p).to_string()));
                break;
            }

            if i < n - 1 {
                components.middle_names.push(parts[i].to_string());
            } else {
                components.last_names.push(parts[i].to_string());
            }
        }

        components
    }

    /// Parsed first name components.
    #[must_use]
    pub fn first_names(&self) -> &[String] {
        &self.first_names
    }

    /// Parsed middle name components.
    #[must_use]
    pub fn middle_names(&self) -> &[String] {
        &self.middle_names
    }

    /// Parsed last name components.
    #[must_use]
    pub fn last_names(&self) -> &[String] {
        &self.last_names
    }

    /// True if any middle name is present.
    #[must_use]
    pub fn has_middle_name(&self) -> bool {
        !self.middle_names.is_empty()
    }

    /// True if more than one first name is present.
    #[must_use]
    pub fn has_multiple_first_names(&self) -> bool {
        self.first_names.len() > 1
    }

    /// True if more than one middle name is present.
    #[must_use]
    pub fn has_multiple_middle_names(&self) -> bool {
        self.middle_names.len() > 1
    }

    /// True if more than one last name is present.
    #[must_use]
    pub fn has_multiple_last_names(&self) -> bool {
        self.last_names.len() > 1
    }

    /// True if every component sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_names.is_empty() && self.middle_names.is_empty() && self.last_names.is_empty()
    }
}

/// Runs the full cleanup pipeline over a raw name.
///
/// Steps, in order: trim, ASCII lowercase, Germanic transliteration, NFKD
/// folding, trailing punctuation strip, paste-noise removal, whitespace
/// collapse, honorific/suffix strip from both ends of the token list.
fn clean_full_name(raw_input: &str) -> String {
    let trimmed = raw_input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut result = normalize::to_lower(trimmed);
    result = normalize::replace_german_chars(&result);
    result = normalize::nfkd_normalize(&result);

    while result.ends_with(TRAILING_PUNCTUATION) {
        result.pop();
    }

    result.retain(|c| !PASTE_NOISE.contains(&c));

    let result = space_runs().replace_all(&result, " ").into_owned();

    let mut tokens: Vec<&str> = result.split(' ').filter(|t| !t.is_empty()).collect();

    while tokens
        .first()
        .is_some_and(|t| REMOVABLE_TOKENS.contains(t))
    {
        tokens.remove(0);
    }
    while tokens.last().is_some_and(|t| REMOVABLE_TOKENS.contains(t)) {
        tokens.pop();
    }

    tokens.join(" ")
}
