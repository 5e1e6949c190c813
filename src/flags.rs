//! Semantic feature flags for investor names.
//!
//! Flags are computed from the *raw* name, not the decomposed form, because
//! the decomposition pipeline has already destroyed the evidence (a
//! transliterated name no longer contains its German characters).

use serde::{Deserialize, Serialize};

use crate::normalize;
use crate::tables::find_nicknames;

/// High-level semantic flags extracted from a raw name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFlags {
    /// A Germanic special character is present.
    pub has_german_char: bool,
    /// NFKD normalization changes the lowercased name.
    pub has_nfkd_normalized: bool,
    /// The first name token is a known nickname source.
    pub has_nickname: bool,
}

impl NameFlags {
    /// Extracts semantic flags from a raw full name.
    ///
    /// Empty input yields all-false flags.
    #[must_use]
    pub fn extract(full_name: &str) -> Self {
        if full_name.is_empty() {
            return Self::default();
        }

        let lower = normalize::to_lower(full_name);

        // Per-character check: transliterating any single code point must
        // change it. Distinct from the whole-string NFKD check below; a name
        // can trip either one independently.
        let has_german_char = lower.chars().any(|c| {
            let single = c.to_string();
            normalize::replace_german_chars(&single) != single
        });

        let has_nfkd_normalized = normalize::nfkd_normalize(&lower) != lower;

        let has_nickname = first_token(&lower)
            .is_some_and(|token| !find_nicknames(token).is_empty());

        Self {
            has_german_char,
            has_nfkd_normalized,
            has_nickname,
        }
    }

    /// True if any flag is set.
    #[must_use]
    pub fn any(self) -> bool {
        self.has_german_char || self.has_nfkd_normalized || self.has_nickname
    }
}

/// First space-delimited token of the name, if any.
///
/// Splits on the space character only; other whitespace stays part of the
/// token and defeats the nickname lookup.
fn first_token(lower_name: &str) -> Option<&str> {
    lower_name.split(' ').find(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_all_false() {
        // "xavier" is not in the nickname table, so every flag stays clear.
        let flags = NameFlags::extract("Xavier Smith");
        assert!(!flags.has_german_char);
        assert!(!flags.has_nfkd_normalized);
        assert!(!flags.has_nickname);
        assert!(!flags.any());
    }

    #[test]
    fn test_nickname_source_first_name() {
        // "john" maps to jack/johnny, so the flag is set even without any
        // character-level normalization.
        let flags = NameFlags::extract("John Smith");
        assert!(!flags.has_german_char);
        assert!(!flags.has_nfkd_normalized);
        assert!(flags.has_nickname);
        assert!(flags.any());
    }

    #[test]
    fn test_german_char_sets_both() {
        // ü is caught by the per-character check and also changes under NFKD.
        let flags = NameFlags::extract("Jürgen Müller");
        assert!(flags.has_german_char);
        assert!(flags.has_nfkd_normalized);
    }

    #[test]
    fn test_accent_sets_nfkd_only() {
        // é has an ASCII-compatible decomposition but is not in the German
        // table.
        let flags = NameFlags::extract("René Dupont");
        assert!(!flags.has_german_char);
        assert!(flags.has_nfkd_normalized);
    }

    #[test]
    fn test_nickname_first_token_only() {
        let flags = NameFlags::extract("William Gates");
        assert!(flags.has_nickname);

        // Nickname sources beyond the first token are ignored.
        let flags = NameFlags::extract("Gates William");
        assert!(!flags.has_nickname);
    }

    #[test]
    fn test_first_token_splits_on_space_only() {
        // A tab is not a token boundary here: the whole string is the first
        // token and misses the nickname table.
        let flags = NameFlags::extract("John\tSmith");
        assert!(!flags.has_nickname);

        // Leading spaces are skipped before the first token.
        let flags = NameFlags::extract("  John Smith");
        assert!(flags.has_nickname);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(NameFlags::extract(""), NameFlags::default());
    }
}
