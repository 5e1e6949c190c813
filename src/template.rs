//! Template token grammar: parsing, serialization, and candidate metadata.
//!
//! A template describes how an email local-part is assembled from name
//! components. Its compact string grammar is:
//!
//! ```text
//! ^(f|m|l|first|middle|last)(_(original|nfkd|nickname|translit|surp))*_[0-9]+$
//! ```
//!
//! or exactly one of the separator characters `.`, `_`, `-`. Single-letter
//! groups select an initial; full words select the whole component.
//! Parsing a sequence is all-or-nothing: one malformed token invalidates the
//! entire template.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TemplateParseError;

/// Which part of a decomposed name a token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameGroup {
    /// First name sequence.
    First,
    /// Middle name sequence.
    Middle,
    /// Last name sequence.
    Last,
}

/// A reference to one name component with transformation flags.
///
/// The normalization flags (`use_original` through `use_surname_particle`)
/// are retired metadata from the training pipeline: they are parsed, stored,
/// and serialized, but resolution applies no differentiated behavior for
/// them. See `resolve_local_part`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameRef {
    /// Which component sequence to read from.
    pub group: NameGroup,
    /// Index into the component sequence.
    pub index: usize,
    /// Emit only the first character of the component.
    pub use_initial: bool,
    /// Use the original, untransformed string.
    pub use_original: bool,
    /// Apply NFKD normalization.
    pub use_nfkd: bool,
    /// Apply Germanic transliteration.
    pub use_translit: bool,
    /// Substitute a known nickname variant.
    pub use_nickname: bool,
    /// Join a surname particle with the following token.
    pub use_surname_particle: bool,
}

impl NameRef {
    /// Creates a reference to a full component with all flags clear.
    #[must_use]
    pub fn full(group: NameGroup, index: usize) -> Self {
        Self {
            group,
            index,
            use_initial: false,
            use_original: false,
            use_nfkd: false,
            use_translit: false,
            use_nickname: false,
            use_surname_particle: false,
        }
    }

    /// Creates an initial-only reference with all flags clear.
    #[must_use]
    pub fn initial(group: NameGroup, index: usize) -> Self {
        Self {
            use_initial: true,
            ..Self::full(group, index)
        }
    }
}

/// One parsed unit of a local-part template.
///
/// A separator carries nothing but its literal character; the "separator
/// implies no other fields" invariant is enforced by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateToken {
    /// A literal separator character (`.`, `_`, or `-`) emitted verbatim.
    Separator(char),
    /// A reference to a name component.
    NameRef(NameRef),
}

impl fmt::Display for TemplateToken {
    /// Writes the token back in its canonical grammar form.
    ///
    /// Flags are emitted in a fixed order, so `Display` output of a parsed
    /// token always re-parses to the same token.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Separator(c) => write!(f, "{c}"),
            Self::NameRef(nref) => {
                let group = match (nref.group, nref.use_initial) {
                    (NameGroup::First, true) => "f",
                    (NameGroup::Middle, true) => "m",
                    (NameGroup::Last, true) => "l",
                    (NameGroup::First, false) => "first",
                    (NameGroup::Middle, false) => "middle",
                    (NameGroup::Last, false) => "last",
                };
                write!(f, "{group}")?;
                if nref.use_original {
                    write!(f, "_original")?;
                }
                if nref.use_nfkd {
                    write!(f, "_nfkd")?;
                }
                if nref.use_nickname {
                    write!(f, "_nickname")?;
                }
                if nref.use_translit {
                    write!(f, "_translit")?;
                }
                if nref.use_surname_particle {
                    write!(f, "_surp")?;
                }
                write!(f, "_{}", nref.index)
            }
        }
    }
}

/// Parses a single template token string.
///
/// # Errors
///
/// Returns a [`TemplateParseError`] describing the grammar violation. The
/// reported position is 0; use [`parse_token_sequence`] for positioned
/// errors.
pub fn parse_token(token: &str) -> Result<TemplateToken, TemplateParseError> {
    parse_token_at(token, 0)
}

/// Parses an entire template token sequence, all-or-nothing.
///
/// # Errors
///
/// Fails fast on the first malformed token, reporting the offending token
/// and its position in the sequence. No partial token list is produced.
pub fn parse_token_sequence<S: AsRef<str>>(
    tokens: &[S],
) -> Result<Vec<TemplateToken>, TemplateParseError> {
    let mut parsed = Vec::with_capacity(tokens.len());
    for (position, token) in tokens.iter().enumerate() {
        parsed.push(parse_token_at(token.as_ref(), position)?);
    }
    Ok(parsed)
}

fn parse_token_at(token: &str, position: usize) -> Result<TemplateToken, TemplateParseError> {
    // Separator fast path.
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if matches!(c, '.' | '_' | '-') {
            return Ok(TemplateToken::Separator(c));
        }
    }

    let parts: Vec<&str> = token.split('_').filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 {
        return Err(TemplateParseError::BadTokenFormat {
            token: token.to_string(),
            position,
        });
    }

    // Last part is the component index, digits only.
    let index_part = parts[parts.len() - 1];
    if !index_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(TemplateParseError::InvalidIndex {
            token: token.to_string(),
            position,
        });
    }
    let index: usize =
        index_part
            .parse()
            .map_err(|_| TemplateParseError::InvalidIndex {
                token: token.to_string(),
                position,
            })?;

    // First part selects group and initial-mode.
    let (group, use_initial) = match parts[0] {
        "f" => (NameGroup::First, true),
        "m" => (NameGroup::Middle, true),
        "l" => (NameGroup::Last, true),
        "first" => (NameGroup::First, false),
        "middle" => (NameGroup::Middle, false),
        "last" => (NameGroup::Last, false),
        other => {
            return Err(TemplateParseError::UnknownGroup {
                group: other.to_string(),
                token: token.to_string(),
                position,
            })
        }
    };

    let mut nref = NameRef {
        group,
        index,
        use_initial,
        use_original: false,
        use_nfkd: false,
        use_translit: false,
        use_nickname: false,
        use_surname_particle: false,
    };

    // Everything strictly between group and index is a flag. Duplicates are
    // idempotent.
    for flag in &parts[1..parts.len() - 1] {
        match *flag {
            "original" => nref.use_original = true,
            "nfkd" => nref.use_nfkd = true,
            "nickname" => nref.use_nickname = true,
            "translit" => nref.use_translit = true,
            "surp" => nref.use_surname_particle = true,
            other => {
                return Err(TemplateParseError::UnknownFlag {
                    flag: other.to_string(),
                    token: token.to_string(),
                    position,
                })
            }
        }
    }

    Ok(TemplateToken::NameRef(nref))
}

/// A candidate local-part template with its structural and statistical
/// metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTemplate {
    /// Unique template identifier.
    pub template_id: i32,
    /// Ordered token sequence describing the local-part structure.
    pub token_seq: Vec<TemplateToken>,
    /// Global usage count across all investors.
    pub support_count: i32,
    /// Global percentage coverage of this template.
    pub coverage_pct: f32,
    /// True if the template appeared in mined rules.
    pub in_mined_rules: bool,
    /// Highest rule confidence supporting this template.
    pub max_rule_confidence: f32,
    /// Average rule confidence across supporting rules.
    pub avg_rule_confidence: f32,
    /// The template includes a middle name token.
    pub uses_middle_name: bool,
    /// The template requires multiple first names.
    pub uses_multiple_firsts: bool,
    /// The template requires multiple middle names.
    pub uses_multiple_middles: bool,
    /// The template requires multiple last names.
    pub uses_multiple_lasts: bool,
}

/// Sorts templates ascending by `template_id`.
///
/// Feature rows and model scores are positional; this ordering is the
/// cross-component contract with the trained ranking model and must be
/// applied before any template list reaches the feature builder.
pub fn sort_by_template_id(templates: &mut [CandidateTemplate]) {
    templates.sort_by_key(|t| t.template_id);
}
