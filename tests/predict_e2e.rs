//! End-to-end prediction pipeline tests.
//!
//! Exercises the full flow with in-memory metadata and a deterministic stub
//! ranker: raw name -> decomposition + flags -> feature rows -> ranking ->
//! local-part resolution -> domain resolution -> assembled addresses.

use std::collections::HashMap;

use mailpart::{
    build_feature_rows, parse_token_sequence, usage_from_template_ids, CandidateTemplate,
    DomainResolver, EmailPredictionEngine, FirmStats, NameComponents, NameFlags, TemplateRanker,
    FEATURES_PER_ROW,
};

/// Scores each row by firm support count, then global support count.
///
/// Stands in for the trained model: firms' observed templates outrank
/// global priors, which is roughly what the real ranker learns.
struct FirmFirstRanker;

impl TemplateRanker for FirmFirstRanker {
    fn rank(&self, feature_rows: &[f32], num_templates: usize) -> Vec<f64> {
        (0..num_templates)
            .map(|i| {
                let row = &feature_rows[i * FEATURES_PER_ROW..(i + 1) * FEATURES_PER_ROW];
                f64::from(row[19]) * 1000.0 + f64::from(row[10])
            })
            .collect()
    }
}

fn template(template_id: i32, support_count: i32, tokens: &[&str]) -> CandidateTemplate {
    let token_seq = parse_token_sequence(tokens).unwrap();
    CandidateTemplate {
        template_id,
        token_seq,
        support_count,
        coverage_pct: 0.1,
        in_mined_rules: true,
        max_rule_confidence: 0.8,
        avg_rule_confidence: 0.5,
        uses_middle_name: tokens
            .iter()
            .any(|t| t.starts_with("m_") || t.starts_with("middle")),
        uses_multiple_firsts: false,
        uses_multiple_middles: false,
        uses_multiple_lasts: false,
    }
}

fn build_engine() -> EmailPredictionEngine<FirmFirstRanker> {
    // Deliberately unsorted; the engine must sort by template_id.
    let std_templates = vec![
        template(3, 10, &["first_0"]),
        template(1, 50, &["f_0", ".", "last_0"]),
        template(2, 90, &["first_0", ".", "last_0"]),
        template(6, 30, &["first_0", "_", "last_0"]),
    ];
    let complex_templates = vec![
        template(5, 60, &["first_0", ".", "last_0"]),
        template(4, 80, &["f_0", "m_0", ".", "last_0"]),
    ];

    let mut firm_stats = HashMap::new();
    firm_stats.insert(
        "blackstone".to_string(),
        FirmStats {
            num_templates: 2,
            num_investors: 40,
            diversity_ratio: 0.05,
            is_single_template: false,
            is_shared_infra: false,
            firm_is_multi_domain: false,
        },
    );

    // Blackstone mostly uses first.last (template 2), occasionally f.last.
    let mut firm_usage = HashMap::new();
    firm_usage.insert(
        "blackstone".to_string(),
        usage_from_template_ids(&[2, 2, 2, 1]),
    );

    let resolver = DomainResolver::new([
        ("Blackstone".to_string(), "blackstone.com".to_string()),
        ("Sequoia Capital".to_string(), "sequoiacap.com".to_string()),
    ]);

    EmailPredictionEngine::new(
        FirmFirstRanker,
        FirmFirstRanker,
        std_templates,
        complex_templates,
        firm_stats,
        firm_usage,
    )
    .with_domain_resolver(resolver)
}

#[test]
fn predicts_firm_preferred_template_first() {
    let engine = build_engine();
    let results = engine.predict("John Smith", "blackstone", 3, None).unwrap();

    assert_eq!(results[0].email, "john.smith@blackstone.com");
    assert_eq!(results[0].template_id, 2);
    assert_eq!(results[1].email, "j.smith@blackstone.com");
    assert_eq!(results[1].template_id, 1);

    // Scores arrive in descending order.
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn resolves_domain_fuzzily_for_unknown_firm_spelling() {
    let engine = build_engine();
    let results = engine
        .predict("Jane Doe", "Sequoia Captial", 1, None)
        .unwrap();
    assert!(results[0].email.ends_with("@sequoiacap.com"));
}

#[test]
fn explicit_domain_overrides_resolver() {
    let engine = build_engine();
    let results = engine
        .predict("Jane Doe", "blackstone", 1, Some("override.example"))
        .unwrap();
    assert!(results[0].email.ends_with("@override.example"));
}

#[test]
fn complex_name_uses_middle_initial_template() {
    let engine = build_engine();
    let results = engine
        .predict("John Michael Smith", "blackstone", 2, None)
        .unwrap();

    let emails: Vec<&str> = results.iter().map(|r| r.email.as_str()).collect();
    assert!(emails.contains(&"jm.smith@blackstone.com"));
}

#[test]
fn german_name_is_transliterated_end_to_end() {
    let engine = build_engine();
    // German character routes to the complex set and is transliterated in
    // the local-part.
    let results = engine
        .predict("Jürgen Müller", "blackstone", 2, None)
        .unwrap();

    let emails: Vec<&str> = results.iter().map(|r| r.email.as_str()).collect();
    assert!(emails.contains(&"juergen.mueller@blackstone.com"));
}

#[test]
fn incompatible_templates_are_skipped_not_fatal() {
    let engine = build_engine();
    // No middle name: the complex set's middle-initial template must be
    // skipped while the rest still resolve.
    let results = engine.predict("José García", "blackstone", 5, None).unwrap();
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.template_id != 4));
    assert!(results
        .iter()
        .any(|r| r.email == "jose.garcia@blackstone.com"));
}

#[test]
fn feature_rows_line_up_with_engine_inputs() {
    // The buffer the engine hands the ranker has the same shape callers get
    // from build_feature_rows directly.
    let name = NameComponents::decompose("John Smith");
    let flags = NameFlags::extract("John Smith");
    let templates = vec![
        template(1, 50, &["f_0", ".", "last_0"]),
        template(2, 90, &["first_0", ".", "last_0"]),
    ];

    let rows = build_feature_rows(
        &name,
        flags,
        "blackstone",
        &templates,
        &HashMap::new(),
        &HashMap::new(),
    );
    assert_eq!(rows.len(), templates.len() * FEATURES_PER_ROW);
}
