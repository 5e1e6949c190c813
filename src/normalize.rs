//! String normalization primitives.
//!
//! Every transformation here is lossy by design: the goal is a stable ASCII
//! form for template matching, not a faithful rendering of the input. The
//! same routines feed both the name decomposer and the feature extractor, so
//! changing any of them shifts model features.

use unicode_normalization::UnicodeNormalization;

use crate::tables::GERMAN_ASCII_MAPPINGS;

/// Lowercases a string using ASCII rules only.
///
/// Non-ASCII characters pass through unchanged; Unicode case folding is
/// deliberately not applied.
#[must_use]
pub fn to_lower(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Replaces Germanic special characters with their ASCII equivalents.
///
/// Scans left to right; at each character the ordered mapping table is tested
/// in table order and the first match is consumed. Only whole-character
/// matches count, so decomposed sequences (base letter plus combining mark)
/// are left alone.
#[must_use]
pub fn replace_german_chars(lower_name: &str) -> String {
    let mut output = String::with_capacity(lower_name.len());

    for c in lower_name.chars() {
        let mut matched = false;
        for mapping in &GERMAN_ASCII_MAPPINGS {
            if c == mapping.from {
                output.push_str(mapping.to);
                matched = true;
                break;
            }
        }
        if !matched {
            output.push(c);
        }
    }

    output
}

/// Strips every non-ASCII character from the input.
#[must_use]
pub fn strip_to_ascii(input: &str) -> String {
    input.chars().filter(char::is_ascii).collect()
}

/// Applies Unicode NFKD decomposition and folds the result to ASCII.
///
/// Code points whose decomposition yields nothing in the ASCII range are
/// silently dropped (e.g. `ø`, `ł`). This is intentional lossy behavior:
/// the trained model saw exactly this folding. Never fails; the
/// decomposition itself is total over valid strings.
#[must_use]
pub fn nfkd_normalize(lower_name: &str) -> String {
    let decomposed: String = lower_name.nfkd().collect();
    strip_to_ascii(&decomposed)
}
