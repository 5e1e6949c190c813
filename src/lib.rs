//! # mailpart - Candidate email address prediction core
//!
//! Generates and ranks candidate email-address local-parts for a person at
//! an organization by decomposing a raw name into structural components,
//! matching those components against a compact template grammar, and
//! resolving the organization to its canonical email domain.
//!
//! ## Core Concepts
//!
//! - **NameComponents**: ordered first/middle/last sequences parsed from a raw name
//! - **TemplateToken**: one grammar unit - a literal separator or a name-component reference
//! - **CandidateTemplate**: a token sequence plus the statistics the ranking model consumes
//! - **DomainResolver**: firm-to-domain lookup with memoized fuzzy matching
//! - **EmailPredictionEngine**: orchestrates the above around a black-box ranker
//!
//! ## Usage
//!
//! ```rust
//! use mailpart::{resolve_local_part, parse_token_sequence, NameComponents};
//!
//! let name = NameComponents::decompose("John Smith");
//! let tokens = parse_token_sequence(&["f_0", ".", "last_original_0"])?;
//! assert_eq!(resolve_local_part(&name, &tokens).as_deref(), Some("j.smith"));
//! # Ok::<(), mailpart::TemplateParseError>(())
//! ```
//!
//! The two gradient-boosting scorers, template/firm metadata deserialization,
//! and third-party verification clients are external collaborators; this
//! crate only defines the contracts they plug into.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod engine;
pub mod error;
pub mod features;
pub mod firm;
pub mod flags;
pub mod name;
pub mod normalize;
pub mod resolver;
pub mod tables;
pub mod template;

// Re-export primary types at crate root for convenience
pub use domain::{CacheEntry, DomainMatch, DomainResolver};
pub use engine::{EmailPrediction, EmailPredictionEngine, TemplateRanker};
pub use error::{DomainError, EngineError, TemplateParseError};
pub use features::{build_feature_rows, FEATURES_PER_ROW};
pub use firm::{usage_from_template_ids, FirmStats, FirmTemplateUsage};
pub use flags::NameFlags;
pub use name::NameComponents;
pub use resolver::resolve_local_part;
pub use template::{
    parse_token, parse_token_sequence, sort_by_template_id, CandidateTemplate, NameGroup, NameRef,
    TemplateToken,
};
