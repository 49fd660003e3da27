use crate::model::{Candidate, Confidence};
use crate::similarity::{jaro_winkler, normalize};

/// Minimum score for an existing candidate to be reported as a match.
pub const MIN_MATCH_SCORE: f64 = 0.6;
/// Score at and above which a match is flagged a likely duplicate.
pub const DUPLICATE_SCORE: f64 = 0.8;

const EXACT_AMOUNT_WEIGHT: f64 = 0.4;
const SIMILAR_AMOUNT_WEIGHT: f64 = 0.3;
/// Relative amount difference still considered "similar".
const SIMILAR_AMOUNT_RATIO: f64 = 0.01;
const DATE_WEIGHT: f64 = 0.3;
/// Date signal decays linearly to zero at this many days apart.
const DATE_WINDOW_DAYS: i64 = 3;
const DESCRIPTION_WEIGHT: f64 = 0.2;
/// Similarity at which the description signal earns full weight.
const DESCRIPTION_FULL_SIMILARITY: f64 = 0.8;
/// Below this similarity the description signal contributes nothing.
const DESCRIPTION_MIN_SIMILARITY: f64 = 0.5;

/// Score and audit trail for one imported-vs-existing pair.
#[derive(Debug, Clone)]
pub struct PairScore {
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Score one pair of candidates. Returns a score in [0, 1] plus one reason
/// string per signal that fired, in evaluation order (amount, date,
/// description).
///
/// Weighted sum of four signals, capped at 1.0. An exact amount also sits
/// inside the 1% similar-amount band, so both amount signals fire on exact
/// equality; the uncapped maximum of 1.2 is deliberate headroom letting
/// partial-credit combinations still clear the duplicate bar. Amounts are
/// compared by magnitude, the similar-amount band is relative to the
/// existing side's magnitude, and non-finite amounts simply fail both
/// comparisons and contribute nothing.
pub fn score_pair(imported: &Candidate, existing: &Candidate) -> PairScore {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    let amount_diff = (imported.amount.abs() - existing.amount.abs()).abs();
    if amount_diff == 0.0 {
        score += EXACT_AMOUNT_WEIGHT;
        reasons.push("exact amount".to_string());
    }
    // Multiplicative form: two zero amounts are within the band (0 <= 0),
    // while a NaN on either side fails the comparison and contributes
    // nothing.
    if amount_diff <= SIMILAR_AMOUNT_RATIO * existing.amount.abs() {
        score += SIMILAR_AMOUNT_WEIGHT;
        reasons.push("similar amount".to_string());
    }

    let day_diff = (imported.date - existing.date).num_days().abs();
    if day_diff < DATE_WINDOW_DAYS {
        score += DATE_WEIGHT * (1.0 - day_diff as f64 / DATE_WINDOW_DAYS as f64);
        if day_diff == 0 {
            reasons.push("exact date".to_string());
        } else if day_diff == 1 {
            reasons.push("date within 1 day".to_string());
        } else {
            reasons.push(format!("date within {day_diff} days"));
        }
    }

    let similarity = jaro_winkler(
        &normalize(&imported.description),
        &normalize(&existing.description),
    );
    if similarity >= DESCRIPTION_FULL_SIMILARITY {
        score += DESCRIPTION_WEIGHT;
        reasons.push("similar description".to_string());
    } else if similarity >= DESCRIPTION_MIN_SIMILARITY {
        score += DESCRIPTION_WEIGHT * similarity;
        reasons.push("partially similar description".to_string());
    }

    PairScore {
        score: score.min(1.0),
        reasons,
    }
}

/// Confidence tier for a raw score. Pure and total: defined for every
/// score, including scores below the match threshold.
pub fn confidence_for(score: f64) -> Confidence {
    if score >= DUPLICATE_SCORE {
        Confidence::High
    } else if score >= MIN_MATCH_SCORE {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
