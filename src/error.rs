//! Error types for mailpart.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! specific conditions. Template grammar violations are fatal for the whole
//! sequence being parsed; a template that merely does not fit a given name
//! is not an error (the resolver signals that with `None`).

use thiserror::Error;

/// Fatal template grammar violations.
///
/// Each variant carries the offending token and its zero-based position in
/// the sequence being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateParseError {
    /// Token is neither a separator nor a group/flags/index compound.
    #[error("invalid template token format: '{token}' at position {position}")]
    BadTokenFormat {
        /// Offending token string.
        token: String,
        /// Zero-based position in the token sequence.
        position: usize,
    },

    /// The trailing index part is missing or contains non-digit characters.
    #[error("invalid index in template token: '{token}' at position {position}")]
    InvalidIndex {
        /// Offending token string.
        token: String,
        /// Zero-based position in the token sequence.
        position: usize,
    },

    /// The leading part is not a recognized name group.
    #[error("unknown group '{group}' in template token: '{token}' at position {position}")]
    UnknownGroup {
        /// Unrecognized group string.
        group: String,
        /// Offending token string.
        token: String,
        /// Zero-based position in the token sequence.
        position: usize,
    },

    /// A middle part is not a recognized normalization flag.
    #[error("unknown flag '{flag}' in template token: '{token}' at position {position}")]
    UnknownFlag {
        /// Unrecognized flag string.
        flag: String,
        /// Offending token string.
        token: String,
        /// Zero-based position in the token sequence.
        position: usize,
    },
}

/// Errors from firm-domain resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Fuzzy search was attempted with no canonical firms loaded.
    #[error("fuzzy search over an empty canonical firm set")]
    EmptyCanonicalSet,

    /// The memoization cache lock was poisoned by a panicking thread.
    #[error("firm match cache lock poisoned")]
    CachePoisoned,
}

/// Errors from the prediction engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Neither an explicit domain nor a domain resolver is available.
    #[error("no domain provided and no domain resolver configured")]
    MissingDomain,

    /// Domain resolution failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
