use log::{debug, trace};

use crate::model::{Candidate, Confidence, MatchResult};
use crate::score::{confidence_for, score_pair, PairScore, DUPLICATE_SCORE, MIN_MATCH_SCORE};

/// Classify every imported candidate against the existing pool.
///
/// Full cross product: each imported candidate is scored against every
/// existing candidate and the single best-scoring one is retained, first
/// encountered winning ties. The best candidate is reported as the match
/// only when its score reaches [`MIN_MATCH_SCORE`]; the raw best score and
/// its reasons are reported either way. Output order follows the imported
/// input order; evaluations are independent per imported candidate.
pub fn find_matches(imported: &[Candidate], existing: &[Candidate]) -> Vec<MatchResult> {
    let results: Vec<MatchResult> = imported
        .iter()
        .map(|candidate| best_match(candidate, existing))
        .collect();

    debug!(
        "matched {}/{} imported candidates against {} existing (threshold {})",
        results.iter().filter(|r| r.matched.is_some()).count(),
        imported.len(),
        existing.len(),
        MIN_MATCH_SCORE
    );

    results
}

fn best_match(imported: &Candidate, existing: &[Candidate]) -> MatchResult {
    let mut best: Option<(&Candidate, PairScore)> = None;

    for candidate in existing {
        let pair = score_pair(imported, candidate);
        trace!(
            "pair {} vs {}: score {:.3}",
            imported.id,
            candidate.id,
            pair.score
        );
        // Strict comparison: first candidate reaching the maximum wins.
        if best.as_ref().map_or(true, |(_, b)| pair.score > b.score) {
            best = Some((candidate, pair));
        }
    }

    match best {
        Some((candidate, PairScore { score, reasons })) => MatchResult {
            imported: imported.clone(),
            matched: (score >= MIN_MATCH_SCORE).then(|| candidate.clone()),
            score,
            reasons,
            likely_duplicate: score >= DUPLICATE_SCORE,
            confidence: confidence_for(score),
        },
        None => MatchResult {
            imported: imported.clone(),
            matched: None,
            score: 0.0,
            reasons: Vec::new(),
            likely_duplicate: false,
            confidence: Confidence::Low,
        },
    }
}

/// Partition one pool into groups of likely duplicates.
///
/// Single pass with a claimed-marker set: each unclaimed candidate seeds a
/// group and claims every later unclaimed candidate scoring at least
/// [`DUPLICATE_SCORE`] against the seed. Clusters are star-shaped around
/// the seed, not transitive closures, so two members of a group need not
/// match each other directly. Singleton groups are dropped; candidate and
/// group order both follow first encounter in the input.
pub fn find_internal_duplicates(transactions: &[Candidate]) -> Vec<Vec<Candidate>> {
    let mut claimed = vec![false; transactions.len()];
    let mut groups = Vec::new();

    for (i, seed) in transactions.iter().enumerate() {
        if claimed[i] {
            continue;
        }
        claimed[i] = true;
        let mut group = vec![seed.clone()];

        for (j, other) in transactions.iter().enumerate().skip(i + 1) {
            if claimed[j] {
                continue;
            }
            if score_pair(other, seed).score >= DUPLICATE_SCORE {
                claimed[j] = true;
                group.push(other.clone());
            }
        }

        if group.len() >= 2 {
            groups.push(group);
        }
    }

    debug!(
        "found {} duplicate group(s) across {} candidates",
        groups.len(),
        transactions.len()
    );

    groups
}

/// Suggest which member of a duplicate group to keep: the one with the
/// longest description, first encountered winning ties. A completeness
/// heuristic only; callers wanting provenance-based selection layer their
/// own policy on top. `None` only for an empty slice.
pub fn suggest_keep(group: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in group {
        let longer = best.map_or(true, |b| {
            candidate.description.chars().count() > b.description.chars().count()
        });
        if longer {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Origin;
    use chrono::NaiveDate;

    fn cand(id: &str, date: &str, amount: f64, description: &str) -> Candidate {
        Candidate {
            id: id.into(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            description: description.into(),
            origin: Origin::Imported,
        }
    }

    #[test]
    fn empty_imported_yields_empty() {
        let existing = vec![cand("e_1", "2024-03-01", 150.0, "Pagamento Pix Joao")];
        assert!(find_matches(&[], &existing).is_empty());
    }

    #[test]
    fn empty_existing_yields_unmatched_per_import() {
        let imported = vec![
            cand("i_1", "2024-03-01", 150.0, "Pagamento Pix Joao"),
            cand("i_2", "2024-03-02", 45.9, "Uber trip"),
        ];
        let results = find_matches(&imported, &[]);
        assert_eq!(results.len(), 2);
        for r in &results {
            assert!(r.matched.is_none());
            assert_eq!(r.score, 0.0);
            assert!(r.reasons.is_empty());
            assert!(!r.likely_duplicate);
            assert_eq!(r.confidence, Confidence::Low);
        }
    }

    #[test]
    fn exact_copy_is_high_confidence_duplicate() {
        let imported = vec![cand("i_1", "2024-03-01", 150.0, "PAGAMENTO PIX JOAO")];
        let existing = vec![cand("e_1", "2024-03-01", 150.0, "Pagamento Pix Joao")];
        let results = find_matches(&imported, &existing);
        let r = &results[0];
        assert_eq!(r.score, 1.0);
        assert_eq!(r.matched.as_ref().unwrap().id, "e_1");
        assert!(r.likely_duplicate);
        assert_eq!(r.confidence, Confidence::High);
        assert!(r.reasons.iter().any(|s| s == "exact amount"));
        assert!(r.reasons.iter().any(|s| s == "exact date"));
        assert!(r.reasons.iter().any(|s| s == "similar description"));
    }

    #[test]
    fn best_candidate_wins_over_weaker_ones() {
        let imported = vec![cand("i_1", "2024-03-01", 150.0, "Pagamento Pix Joao")];
        let existing = vec![
            cand("e_1", "2024-03-15", 80.0, "Farmacia"),
            cand("e_2", "2024-03-02", 151.2, "pagamento pix joao"),
            cand("e_3", "2024-03-01", 150.0, "Pagamento Pix Joao"),
        ];
        let results = find_matches(&imported, &existing);
        assert_eq!(results[0].matched.as_ref().unwrap().id, "e_3");
    }

    #[test]
    fn first_of_equal_scores_wins() {
        let imported = vec![cand("i_1", "2024-03-01", 150.0, "Pagamento Pix Joao")];
        let existing = vec![
            cand("e_1", "2024-03-01", 150.0, "Pagamento Pix Joao"),
            cand("e_2", "2024-03-01", 150.0, "Pagamento Pix Joao"),
        ];
        let results = find_matches(&imported, &existing);
        assert_eq!(results[0].matched.as_ref().unwrap().id, "e_1");
    }

    #[test]
    fn below_threshold_best_reports_no_match_but_raw_score() {
        // Similar amount (0.3) + full description (0.2) = 0.5, under 0.6.
        let imported = vec![cand("i_1", "2024-03-01", 150.0, "Uber trip")];
        let existing = vec![cand("e_1", "2024-03-04", 151.2, "UBER *TRIP 887")];
        let results = find_matches(&imported, &existing);
        let r = &results[0];
        assert!(r.matched.is_none());
        assert!(r.score > 0.0 && r.score < MIN_MATCH_SCORE);
        assert!(!r.likely_duplicate);
        assert_eq!(r.confidence, Confidence::Low);
        assert!(r.reasons.iter().any(|s| s == "similar amount"));
    }

    #[test]
    fn internal_duplicates_cluster_near_identical_pair() {
        let a = cand("t_1", "2024-03-01", 150.0, "Pagamento Pix Joao");
        let b = cand("t_2", "2024-03-01", 150.0, "PAGAMENTO PIX JOAO");
        let c = cand("t_3", "2024-03-20", 9.99, "Spotify");
        let groups = find_internal_duplicates(&[a, b, c]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][0].id, "t_1");
        assert_eq!(groups[0][1].id, "t_2");
    }

    #[test]
    fn internal_duplicates_never_return_singletons() {
        let unrelated = vec![
            cand("t_1", "2024-03-01", 150.0, "Pagamento Pix Joao"),
            cand("t_2", "2024-03-20", 9.99, "Spotify"),
            cand("t_3", "2024-02-11", 1234.0, "Aluguel"),
        ];
        assert!(find_internal_duplicates(&unrelated).is_empty());
        assert!(find_internal_duplicates(&[]).is_empty());
    }

    #[test]
    fn star_clustering_claims_members_for_the_first_seed() {
        // All three mutually similar: one group seeded by the first.
        let group = vec![
            cand("t_1", "2024-03-01", 150.0, "Pagamento Pix Joao"),
            cand("t_2", "2024-03-01", 150.0, "pagamento pix joao"),
            cand("t_3", "2024-03-02", 150.0, "PAGAMENTO PIX JOAO"),
        ];
        let groups = find_internal_duplicates(&group);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn suggest_keep_prefers_longest_description() {
        let group = vec![
            cand("t_1", "2024-03-01", 150.0, "Pix Joao"),
            cand("t_2", "2024-03-01", 150.0, "Pagamento Pix Joao aluguel marco 0803"),
            cand("t_3", "2024-03-01", 150.0, "Pagamento Pix"),
        ];
        assert_eq!(suggest_keep(&group).unwrap().id, "t_2");
        assert!(suggest_keep(&[]).is_none());
    }

    #[test]
    fn suggest_keep_first_wins_ties() {
        let group = vec![
            cand("t_1", "2024-03-01", 150.0, "same len"),
            cand("t_2", "2024-03-01", 150.0, "len same"),
        ];
        assert_eq!(suggest_keep(&group).unwrap().id, "t_1");
    }
}
