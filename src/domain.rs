//! Firm-to-domain resolution with fuzzy matching and memoization.
//!
//! Resolution ladder: exact canonical match, then memoized fuzzy match, then
//! a live fuzzy scan over every canonical firm. The canonical map is a
//! `BTreeMap`, so the scan order is ascending by key; combined with the
//! `>=` best-score comparison this makes tie-breaking deterministic (the
//! lexicographically greatest canonical key wins among equal scores).
//!
//! The cache grows monotonically for the process lifetime with no eviction.
//! It sits behind a mutex so a resolver shared across threads stays sound;
//! single-threaded callers pay one uncontended lock per resolve.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DomainError;
use crate::normalize;

/// A memoized fuzzy-match result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The canonical firm the query matched to.
    pub canonical_firm: String,
    /// Fuzzy match score in `[0, 100]`.
    pub match_score: f64,
}

/// Outcome of resolving a raw firm name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMatch {
    /// Resolved email domain.
    pub domain: String,
    /// Canonical firm the input matched to.
    pub canonical_firm: String,
    /// Match confidence in `[0, 100]`; 100 for exact canonical hits.
    pub score: f64,
}

/// Resolves organization names to their email domains.
#[derive(Debug)]
pub struct DomainResolver {
    /// Canonical firm (normalized, lowercase) to domain. Immutable after
    /// construction; iteration order is the fuzzy scan order.
    firm_to_domain: BTreeMap<String, String>,
    /// Memoized fuzzy matches keyed by normalized query, paired with the
    /// resolved domain.
    firm_cache: Mutex<HashMap<String, (String, CacheEntry)>>,
}

impl DomainResolver {
    /// Builds a resolver from a canonical firm-to-domain mapping.
    ///
    /// Keys are normalized on the way in.
    #[must_use]
    pub fn new(canonical: impl IntoIterator<Item = (String, String)>) -> Self {
        let firm_to_domain = canonical
            .into_iter()
            .map(|(firm, domain)| (normalize_firm_name(&firm), domain))
            .collect();
        Self {
            firm_to_domain,
            firm_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Seeds the memoization cache with persisted fuzzy-match results.
    ///
    /// Keys and matched firm names are normalized; last write wins on
    /// duplicate keys.
    #[must_use]
    pub fn with_persisted_cache(
        self,
        cache: impl IntoIterator<Item = (String, (String, CacheEntry))>,
    ) -> Self {
        let seeded: HashMap<String, (String, CacheEntry)> = cache
            .into_iter()
            .map(|(raw_firm, (domain, entry))| {
                (
                    normalize_firm_name(&raw_firm),
                    (
                        domain,
                        CacheEntry {
                            canonical_firm: normalize_firm_name(&entry.canonical_firm),
                            match_score: entry.match_score,
                        },
                    ),
                )
            })
            .collect();
        Self {
            firm_cache: Mutex::new(seeded),
            ..self
        }
    }

    /// Number of canonical firms loaded.
    #[must_use]
    pub fn canonical_count(&self) -> usize {
        self.firm_to_domain.len()
    }

    /// Resolves the email domain for a raw firm name.
    ///
    /// Exact canonical matches return with confidence 100. Cached fuzzy
    /// matches are returned unchanged without rescanning. Otherwise a linear
    /// fuzzy scan over every canonical firm picks the best match, memoizes
    /// it, and returns it. The scan is O(canonical firms) and only runs on a
    /// cache miss.
    ///
    /// # Errors
    ///
    /// [`DomainError::EmptyCanonicalSet`] when a fuzzy scan would run over
    /// zero canonical firms, and [`DomainError::CachePoisoned`] when the
    /// cache lock was poisoned.
    pub fn resolve(&self, raw_firm_name: &str) -> Result<DomainMatch, DomainError> {
        let normalized = normalize_firm_name(raw_firm_name);

        if let Some(domain) = self.firm_to_domain.get(&normalized) {
            return Ok(DomainMatch {
                domain: domain.clone(),
                canonical_firm: normalized,
                score: 100.0,
            });
        }

        let mut cache = self
            .firm_cache
            .lock()
            .map_err(|_| DomainError::CachePoisoned)?;

        if let Some((domain, entry)) = cache.get(&normalized) {
            return Ok(DomainMatch {
                domain: domain.clone(),
                canonical_firm: entry.canonical_firm.clone(),
                score: entry.match_score,
            });
        }

        let (domain, entry) = self.find_best_match(&normalized)?;
        debug!(
            firm = %normalized,
            matched = %entry.canonical_firm,
            score = entry.match_score,
            "fuzzy-matched firm"
        );

        let result = DomainMatch {
            domain: domain.clone(),
            canonical_firm: entry.canonical_firm.clone(),
            score: entry.match_score,
        };
        cache.insert(normalized, (domain, entry));

        Ok(result)
    }

    /// Scans every canonical firm for the best fuzzy match.
    fn find_best_match(&self, query: &str) -> Result<(String, CacheEntry), DomainError> {
        let mut best: Option<(&str, &str, f64)> = None;

        for (firm, domain) in &self.firm_to_domain {
            let score = similarity_ratio(query, firm);
            // >= keeps the later entry on ties; scan order is ascending key.
            if best.map_or(true, |(_, _, best_score)| score >= best_score) {
                best = Some((firm.as_str(), domain.as_str(), score));
            }
        }

        let (firm, domain, score) = best.ok_or(DomainError::EmptyCanonicalSet)?;
        Ok((
            domain.to_string(),
            CacheEntry {
                canonical_firm: firm.to_string(),
                match_score: score,
            },
        ))
    }
}

/// Normalizes a firm name for lookup: ASCII lowercasing only, preserving
/// spaces and punctuation.
#[must_use]
pub fn normalize_firm_name(firm_name: &str) -> String {
    normalize::to_lower(firm_name)
}

/// String similarity ratio in `[0, 100]`.
fn similarity_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}
