//! `txmatch` — duplicate-matching engine for imported financial
//! transactions.
//!
//! Pure engine crate: receives caller-supplied candidates, returns match
//! decisions. No CLI or IO dependencies. Given a batch of newly-imported
//! transactions and the transactions already on record, decides per import
//! whether it is a duplicate, a probable duplicate, or genuinely new, and
//! can likewise cluster duplicates within a single batch.
//!
//! All thresholds are fixed constants of the algorithm (tuned together as
//! one scoring function); there is no configuration surface. The engine is
//! stateless and side-effect-free per call.

pub mod matcher;
pub mod model;
pub mod report;
pub mod score;
pub mod similarity;

pub use matcher::{find_internal_duplicates, find_matches, suggest_keep};
pub use model::{
    Candidate, Confidence, ConfidenceCounts, MatchResult, Origin, ReconciliationReport,
};
pub use report::compute_report;
pub use score::{DUPLICATE_SCORE, MIN_MATCH_SCORE};
