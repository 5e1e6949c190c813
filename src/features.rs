//! Fixed-width feature row encoding for the external ranking model.
//!
//! The 27-slot row layout below is an external contract: the ranking model
//! was trained against exactly this field order with rows sorted ascending by
//! `template_id`. Reordering anything here is a breaking change that requires
//! model retraining.

use std::collections::HashMap;

use crate::firm::{FirmStats, FirmTemplateUsage};
use crate::flags::NameFlags;
use crate::name::NameComponents;
use crate::template::CandidateTemplate;

/// Number of feature values per template row.
pub const FEATURES_PER_ROW: usize = 27;

/// Encodes a boolean feature.
fn feat(b: bool) -> f32 {
    f32::from(u8::from(b))
}

/// Builds one 27-value feature row per candidate template.
///
/// Returns a flat row-major buffer of length `templates.len() * 27`, one row
/// per template in input order. The template list must already be sorted
/// ascending by `template_id` (see [`crate::template::sort_by_template_id`]).
///
/// Missing firm stats or usage entries default to zero-valued records: the
/// row is still produced, just with neutral firm-level features.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_feature_rows(
    name: &NameComponents,
    flags: NameFlags,
    firm_name: &str,
    templates: &[CandidateTemplate],
    firm_stats: &HashMap<String, FirmStats>,
    firm_template_usage: &HashMap<String, HashMap<i32, FirmTemplateUsage>>,
) -> Vec<f32> {
    let mut flat_matrix = Vec::with_capacity(templates.len() * FEATURES_PER_ROW);

    let name_has_middle = name.has_middle_name();
    let name_has_multiple_firsts = name.has_multiple_first_names();
    let name_has_multiple_middles = name.has_multiple_middle_names();
    let name_has_multiple_lasts = name.has_multiple_last_names();

    let stats = firm_stats.get(firm_name).copied().unwrap_or_default();

    let usage_map = firm_template_usage.get(firm_name);

    for tmpl in templates {
        let usage = usage_map.and_then(|m| m.get(&tmpl.template_id));
        let in_firm_templates = usage.is_some();
        let usage = usage.copied().unwrap_or_default();

        // Clash: template requires a structural feature the name lacks.
        let clash = (tmpl.uses_middle_name && !name_has_middle)
            || (tmpl.uses_multiple_firsts && !name_has_multiple_firsts)
            || (tmpl.uses_multiple_middles && !name_has_multiple_middles)
            || (tmpl.uses_multiple_lasts && !name_has_multiple_lasts);

        // Slot order matches the training matrices.
        flat_matrix.push(feat(in_firm_templates));
        flat_matrix.push(feat(stats.is_shared_infra));
        flat_matrix.push(feat(stats.firm_is_multi_domain));
        flat_matrix.push(feat(flags.has_german_char));
        flat_matrix.push(feat(flags.has_nfkd_normalized));
        flat_matrix.push(feat(flags.has_nickname));
        flat_matrix.push(feat(name_has_multiple_firsts));
        flat_matrix.push(feat(name_has_middle));
        flat_matrix.push(feat(name_has_multiple_middles));
        flat_matrix.push(feat(name_has_multiple_lasts));
        flat_matrix.push(tmpl.support_count as f32);
        flat_matrix.push(tmpl.coverage_pct);
        flat_matrix.push(feat(tmpl.in_mined_rules));
        flat_matrix.push(tmpl.max_rule_confidence);
        flat_matrix.push(tmpl.avg_rule_confidence);
        flat_matrix.push(feat(tmpl.uses_middle_name));
        flat_matrix.push(feat(tmpl.uses_multiple_firsts));
        flat_matrix.push(feat(tmpl.uses_multiple_middles));
        flat_matrix.push(feat(tmpl.uses_multiple_lasts));
        flat_matrix.push(usage.support_count as f32);
        flat_matrix.push(usage.coverage_pct);
        flat_matrix.push(feat(usage.is_top_template));
        flat_matrix.push(feat(clash));
        flat_matrix.push(stats.num_templates as f32);
        flat_matrix.push(stats.num_investors as f32);
        flat_matrix.push(stats.diversity_ratio);
        flat_matrix.push(feat(stats.is_single_template));
    }

    flat_matrix
}
