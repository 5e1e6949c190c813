//! Per-firm aggregate statistics and template usage.
//!
//! These records arrive pre-deserialized from the upstream metadata store
//! and are treated as read-only for the process lifetime. The zero-valued
//! [`FirmStats::default`] stands in for firms the store has never seen;
//! "firm unknown" is an expected case, not an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Summary of a firm's template usage patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FirmStats {
    /// Total number of unique templates used by the firm.
    pub num_templates: i32,
    /// Number of investors associated with the firm.
    pub num_investors: i32,
    /// Ratio of templates to investors.
    pub diversity_ratio: f32,
    /// The firm uses only one template.
    pub is_single_template: bool,
    /// The firm uses shared email infrastructure.
    pub is_shared_infra: bool,
    /// The firm uses multiple email domains.
    pub firm_is_multi_domain: bool,
}

/// How one template is used within one firm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FirmTemplateUsage {
    /// Raw count of uses in this firm.
    pub support_count: i32,
    /// Share of the firm's total template uses.
    pub coverage_pct: f32,
    /// True for every template tied at the firm's maximum support count.
    pub is_top_template: bool,
}

/// Derives per-template usage records from a firm's raw template-id list.
///
/// The input is one entry per observed use (duplicates expected). Coverage is
/// each template's share of the total list; every template tied at the
/// maximum count is flagged as a top template. An empty list yields an empty
/// map.
#[must_use]
pub fn usage_from_template_ids(template_ids: &[i32]) -> HashMap<i32, FirmTemplateUsage> {
    if template_ids.is_empty() {
        return HashMap::new();
    }

    let mut support_counts: HashMap<i32, i32> = HashMap::with_capacity(template_ids.len() / 2);
    let mut max_support = 0;
    for &tid in template_ids {
        let count = support_counts.entry(tid).or_insert(0);
        *count += 1;
        max_support = max_support.max(*count);
    }

    #[allow(clippy::cast_precision_loss)]
    let total_inv = 1.0_f32 / template_ids.len() as f32;

    support_counts
        .into_iter()
        .map(|(tid, count)| {
            #[allow(clippy::cast_precision_loss)]
            let coverage_pct = count as f32 * total_inv;
            (
                tid,
                FirmTemplateUsage {
                    support_count: count,
                    coverage_pct,
                    is_top_template: count == max_support,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_counts_and_coverage() {
        let usage = usage_from_template_ids(&[3, 1, 3, 3, 1]);
        assert_eq!(usage.len(), 2);

        let top = &usage[&3];
        assert_eq!(top.support_count, 3);
        assert!((top.coverage_pct - 0.6).abs() < 1e-6);
        assert!(top.is_top_template);

        let other = &usage[&1];
        assert_eq!(other.support_count, 2);
        assert!((other.coverage_pct - 0.4).abs() < 1e-6);
        assert!(!other.is_top_template);
    }

    #[test]
    fn test_tied_top_templates() {
        let usage = usage_from_template_ids(&[1, 2, 1, 2]);
        assert!(usage[&1].is_top_template);
        assert!(usage[&2].is_top_template);
    }

    #[test]
    fn test_empty_list() {
        assert!(usage_from_template_ids(&[]).is_empty());
    }

    #[test]
    fn test_default_stats_are_zero() {
        let stats = FirmStats::default();
        assert_eq!(stats.num_templates, 0);
        assert_eq!(stats.num_investors, 0);
        assert!(!stats.is_shared_infra);
    }
}
