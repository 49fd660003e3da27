use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which pool a candidate came from. Informational only; scoring never
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Existing,
    Imported,
}

/// One transaction record entering the matcher, from either pool.
///
/// Amounts are compared by magnitude only; callers that care about
/// income-vs-expense direction must pre-filter by sign. Dates are compared
/// at day granularity.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub origin: Origin,
}

// ---------------------------------------------------------------------------
// Match output
// ---------------------------------------------------------------------------

/// Three-level triage tier, a pure function of the raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Decision for one imported candidate against the whole existing pool.
///
/// `score` is the best raw pair score found, reported even when it falls
/// below the match threshold and `matched` is `None`; `reasons` explain
/// that score in signal evaluation order.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub imported: Candidate,
    pub matched: Option<Candidate>,
    pub score: f64,
    pub reasons: Vec<String>,
    pub likely_duplicate: bool,
    pub confidence: Confidence,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Histogram over confidence tiers. Buckets always sum to the report total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfidenceCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Aggregate summary over a batch of match results. Derived and stateless;
/// recomputed on demand, never updated incrementally.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub total: usize,
    /// Results whose score reached exactly 1.0.
    pub exact_matches: usize,
    pub likely_duplicates: usize,
    /// Results with no qualifying existing-transaction match.
    pub new_transactions: usize,
    /// Matched results at medium confidence. High-confidence matches are
    /// presumed acceptable; unmatched results have nothing to review.
    pub needs_review: usize,
    pub confidence_counts: ConfidenceCounts,
}
