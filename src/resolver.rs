//! Local-part resolution.
//!
//! Evaluates a parsed template token sequence against a decomposed name.
//! Failure here is soft: `None` means "this template does not apply to this
//! name" and the caller moves on to the next candidate.

use crate::name::NameComponents;
use crate::normalize;
use crate::template::{NameGroup, TemplateToken};

/// Resolves a template token sequence into a concrete local-part.
///
/// Walks the tokens in order, appending separator literals and extracted
/// name fragments. Returns `None` when the name is incompatible with the
/// template: a referenced index is out of bounds for its component sequence,
/// or an initial is requested from an empty component.
///
/// The normalization flags on a name reference are retired metadata and have
/// no effect here; every emitted fragment is ASCII-lowercased.
#[must_use]
pub fn resolve_local_part(name: &NameComponents, token_seq: &[TemplateToken]) -> Option<String> {
    let mut local_part = String::new();

    for token in token_seq {
        match token {
            TemplateToken::Separator(c) => local_part.push(*c),
            TemplateToken::NameRef(nref) => {
                let components = match nref.group {
                    NameGroup::First => name.first_names(),
                    NameGroup::Middle => name.middle_names(),
                    NameGroup::Last => name.last_names(),
                };

                let raw = components.get(nref.index)?;

                if nref.use_initial {
                    let initial = raw.chars().next()?;
                    local_part.push(if initial.is_ascii() {
                        initial.to_ascii_lowercase()
                    } else {
                        initial
                    });
                } else {
                    local_part.push_str(&normalize::to_lower(raw));
                }
            }
        }
    }

    Some(local_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_token_sequence;

    fn resolve(name: &str, tokens: &[&str]) -> Option<String> {
        let components = NameComponents::decompose(name);
        let seq = parse_token_sequence(tokens).unwrap();
        resolve_local_part(&components, &seq)
    }

    #[test]
    fn test_initial_dot_last() {
        assert_eq!(
            resolve("John Smith", &["f_0", ".", "last_original_0"]),
            Some("j.smith".to_string())
        );
    }

    #[test]
    fn test_full_first_last() {
        assert_eq!(
            resolve("John Smith", &["first_0", "last_0"]),
            Some("johnsmith".to_string())
        );
    }

    #[test]
    fn test_separator_variants() {
        assert_eq!(
            resolve("John Smith", &["first_0", "_", "last_0"]),
            Some("john_smith".to_string())
        );
        assert_eq!(
            resolve("John Smith", &["first_0", "-", "last_0"]),
            Some("john-smith".to_string())
        );
    }

    #[test]
    fn test_middle_name_template_rejected_without_middle() {
        assert_eq!(resolve("John Smith", &["f_0", "m_0", "last_0"]), None);
    }

    #[test]
    fn test_middle_name_template_accepted_with_middle() {
        assert_eq!(
            resolve("John Michael Smith", &["f_0", "m_0", "last_0"]),
            Some("jmsmith".to_string())
        );
    }

    #[test]
    fn test_second_first_name_index() {
        assert_eq!(
            resolve("Mary-Jane Watson", &["first_1", ".", "last_0"]),
            Some("jane.watson".to_string())
        );
        assert_eq!(resolve("Mary Watson", &["first_1", ".", "last_0"]), None);
    }

    #[test]
    fn test_particle_surname_indexing() {
        assert_eq!(
            resolve("Maria von Trapp", &["f_0", "last_0", "last_1"]),
            Some("mvontrapp".to_string())
        );
    }

    #[test]
    fn test_empty_name_rejects_everything() {
        assert_eq!(resolve("", &["f_0"]), None);
        assert_eq!(resolve("", &["first_0"]), None);
    }

    #[test]
    fn test_empty_token_sequence_yields_empty_local_part() {
        assert_eq!(resolve("John Smith", &[]), Some(String::new()));
    }
}
