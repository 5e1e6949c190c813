//! End-to-end candidate email prediction.
//!
//! Wires the text/structure core together: decompose the name, extract
//! flags, encode feature rows, hand them to an external ranking model, and
//! turn the top-ranked templates into concrete addresses. The ranking model
//! itself is a black box behind the [`TemplateRanker`] trait.

use std::collections::HashMap;

use tracing::info;

use crate::domain::DomainResolver;
use crate::error::EngineError;
use crate::features::build_feature_rows;
use crate::firm::{FirmStats, FirmTemplateUsage};
use crate::flags::NameFlags;
use crate::name::NameComponents;
use crate::resolver::resolve_local_part;
use crate::template::{sort_by_template_id, CandidateTemplate};

/// External ranking model contract.
///
/// Consumes a flat row-major feature buffer (27 values per template, rows in
/// ascending `template_id` order) and returns one score per row, in the same
/// order.
pub trait TemplateRanker {
    /// Scores every feature row.
    fn rank(&self, feature_rows: &[f32], num_templates: usize) -> Vec<f64>;
}

/// One predicted email address candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailPrediction {
    /// Full candidate address (`local-part@domain`).
    pub email: String,
    /// Model score for the underlying template.
    pub score: f64,
    /// Identifier of the template that produced the local-part.
    pub template_id: i32,
}

/// Candidate email prediction engine.
///
/// Holds two pretrained rankers and their template sets: one for standard
/// names and one for complex names (middle names, multiple first/last names,
/// or normalization-sensitive characters). Template lists are sorted
/// ascending by `template_id` at construction; both they and the firm maps
/// are read-only afterward.
pub struct EmailPredictionEngine<R> {
    std_ranker: R,
    complex_ranker: R,
    std_templates: Vec<CandidateTemplate>,
    complex_templates: Vec<CandidateTemplate>,
    firm_stats: HashMap<String, FirmStats>,
    firm_usage: HashMap<String, HashMap<i32, FirmTemplateUsage>>,
    domain_resolver: Option<DomainResolver>,
}

impl<R: TemplateRanker> EmailPredictionEngine<R> {
    /// Creates an engine from pretrained rankers and upstream metadata.
    ///
    /// Both template lists are sorted ascending by `template_id` here so the
    /// feature-row ordering contract holds no matter how the store delivered
    /// them.
    #[must_use]
    pub fn new(
        std_ranker: R,
        complex_ranker: R,
        mut std_templates: Vec<CandidateTemplate>,
        mut complex_templates: Vec<CandidateTemplate>,
        firm_stats: HashMap<String, FirmStats>,
        firm_usage: HashMap<String, HashMap<i32, FirmTemplateUsage>>,
    ) -> Self {
        sort_by_template_id(&mut std_templates);
        sort_by_template_id(&mut complex_templates);
        Self {
            std_ranker,
            complex_ranker,
            std_templates,
            complex_templates,
            firm_stats,
            firm_usage,
            domain_resolver: None,
        }
    }

    /// Attaches a domain resolver for firms without an explicit domain.
    #[must_use]
    pub fn with_domain_resolver(mut self, resolver: DomainResolver) -> Self {
        self.domain_resolver = Some(resolver);
        self
    }

    /// Predicts up to `top_k` candidate addresses for an investor at a firm.
    ///
    /// When `domain` is given it is used verbatim; otherwise the configured
    /// domain resolver supplies one. Templates incompatible with the name
    /// (missing middle name, too few components) are skipped, so fewer than
    /// `top_k` candidates may come back.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingDomain`] when neither a domain nor a resolver is
    /// available, or a [`crate::error::DomainError`] from resolution.
    pub fn predict(
        &self,
        investor_name: &str,
        firm_name: &str,
        top_k: usize,
        domain: Option<&str>,
    ) -> Result<Vec<EmailPrediction>, EngineError> {
        let domain = match (domain, &self.domain_resolver) {
            (Some(d), _) => d.to_string(),
            (None, Some(resolver)) => {
                let matched = resolver.resolve(firm_name)?;
                info!(
                    firm = firm_name,
                    matched = %matched.canonical_firm,
                    score = matched.score,
                    "resolved firm domain"
                );
                matched.domain
            }
            (None, None) => return Err(EngineError::MissingDomain),
        };

        let name = NameComponents::decompose(investor_name);
        let flags = NameFlags::extract(investor_name);

        let complex = is_complex_name(&name, flags);
        let (templates, ranker) = if complex {
            (&self.complex_templates, &self.complex_ranker)
        } else {
            (&self.std_templates, &self.std_ranker)
        };

        let feature_rows = build_feature_rows(
            &name,
            flags,
            firm_name,
            templates,
            &self.firm_stats,
            &self.firm_usage,
        );
        let scores = ranker.rank(&feature_rows, templates.len());

        // Rank rows by descending score; positions map back to templates.
        let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut results = Vec::with_capacity(top_k.min(ranked.len()));
        for (index, score) in ranked.into_iter().take(top_k) {
            let Some(template) = templates.get(index) else {
                continue;
            };
            // Incompatible templates are skipped, not errors.
            let Some(local_part) = resolve_local_part(&name, &template.token_seq) else {
                continue;
            };
            results.push(EmailPrediction {
                email: format!("{local_part}@{domain}"),
                score,
                template_id: template.template_id,
            });
        }

        info!(
            investor = investor_name,
            firm = firm_name,
            complex,
            candidates = results.len(),
            "predicted candidate addresses"
        );

        Ok(results)
    }
}

/// A name is complex when its structure or characters fall outside the
/// standard model's training distribution.
fn is_complex_name(name: &NameComponents, flags: NameFlags) -> bool {
    name.has_middle_name()
        || name.has_multiple_first_names()
        || name.has_multiple_last_names()
        || flags.has_german_char
        || flags.has_nfkd_normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_token_sequence;

    /// Deterministic stand-in for the external model: scores each row by its
    /// global support-count slot.
    struct SupportCountRanker;

    impl TemplateRanker for SupportCountRanker {
        fn rank(&self, feature_rows: &[f32], num_templates: usize) -> Vec<f64> {
            (0..num_templates)
                .map(|i| f64::from(feature_rows[i * crate::features::FEATURES_PER_ROW + 10]))
                .collect()
        }
    }

    fn template(template_id: i32, support_count: i32, tokens: &[&str]) -> CandidateTemplate {
        CandidateTemplate {
            template_id,
            token_seq: parse_token_sequence(tokens).unwrap(),
            support_count,
            coverage_pct: 0.1,
            in_mined_rules: false,
            max_rule_confidence: 0.0,
            avg_rule_confidence: 0.0,
            uses_middle_name: tokens
                .iter()
                .any(|t| t.starts_with("m_") || t.starts_with("middle")),
            uses_multiple_firsts: false,
            uses_multiple_middles: false,
            uses_multiple_lasts: false,
        }
    }

    fn engine() -> EmailPredictionEngine<SupportCountRanker> {
        let std_templates = vec![
            template(1, 50, &["f_0", ".", "last_0"]),
            template(2, 90, &["first_0", ".", "last_0"]),
            template(3, 10, &["first_0"]),
        ];
        let complex_templates = vec![
            template(4, 80, &["f_0", "m_0", ".", "last_0"]),
            template(5, 60, &["first_0", ".", "last_0"]),
        ];
        EmailPredictionEngine::new(
            SupportCountRanker,
            SupportCountRanker,
            std_templates,
            complex_templates,
            HashMap::new(),
            HashMap::new(),
        )
    }

    #[test]
    fn test_predict_with_explicit_domain() {
        let results = engine()
            .predict("John Smith", "Acme", 2, Some("acme.com"))
            .unwrap();
        assert_eq!(results.len(), 2);
        // Highest support wins under the stub ranker.
        assert_eq!(results[0].email, "john.smith@acme.com");
        assert_eq!(results[0].template_id, 2);
        assert_eq!(results[1].email, "j.smith@acme.com");
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_complex_name_routed_to_complex_templates() {
        let results = engine()
            .predict("John Michael Smith", "Acme", 2, Some("acme.com"))
            .unwrap();
        // Template 4 (middle-initial form) exists only in the complex set.
        assert_eq!(results[0].email, "jm.smith@acme.com");
        assert_eq!(results[0].template_id, 4);
    }

    #[test]
    fn test_all_std_templates_fit_plain_name() {
        let results = engine()
            .predict("John Smith", "Acme", 10, Some("acme.com"))
            .unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_missing_domain_is_an_error() {
        assert_eq!(
            engine().predict("John Smith", "Acme", 3, None).unwrap_err(),
            EngineError::MissingDomain
        );
    }

    #[test]
    fn test_domain_resolver_used_when_no_override() {
        let resolver = DomainResolver::new([("Acme".to_string(), "acme.com".to_string())]);
        let engine = engine().with_domain_resolver(resolver);
        let results = engine.predict("John Smith", "Acme", 1, None).unwrap();
        assert_eq!(results[0].email, "john.smith@acme.com");
    }
}
