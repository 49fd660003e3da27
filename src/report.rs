use crate::model::{Confidence, ConfidenceCounts, MatchResult, ReconciliationReport};

/// Compute an aggregate reconciliation report over a batch of results.
///
/// Single pass, no side effects; safe to recompute at any time from the
/// same input. The confidence histogram covers every result, so its
/// buckets always sum to `total`.
pub fn compute_report(results: &[MatchResult]) -> ReconciliationReport {
    let mut confidence_counts = ConfidenceCounts::default();
    let mut exact_matches = 0;
    let mut likely_duplicates = 0;
    let mut new_transactions = 0;
    let mut needs_review = 0;

    for r in results {
        match r.confidence {
            Confidence::High => confidence_counts.high += 1,
            Confidence::Medium => confidence_counts.medium += 1,
            Confidence::Low => confidence_counts.low += 1,
        }

        if r.score >= 1.0 {
            exact_matches += 1;
        }
        if r.likely_duplicate {
            likely_duplicates += 1;
        }
        if r.matched.is_none() {
            new_transactions += 1;
        } else if r.confidence == Confidence::Medium {
            needs_review += 1;
        }
    }

    ReconciliationReport {
        total: results.len(),
        exact_matches,
        likely_duplicates,
        new_transactions,
        needs_review,
        confidence_counts,
    }
}
