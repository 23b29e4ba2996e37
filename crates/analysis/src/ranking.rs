//! Related-paper ranking

use crate::similarity::similarity;
use literatus_common::model::Paper;

/// Titles of the papers most similar to `target`, best first.
///
/// The target itself is excluded by id. The sort is stable, so candidates
/// with equal scores keep their input order. At most `limit` titles are
/// returned; zero-score candidates are kept if nothing better fills the
/// slots.
pub fn rank_related(target: &Paper, candidates: &[Paper], limit: usize) -> Vec<String> {
    let mut scored: Vec<(f64, &Paper)> = candidates
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .map(|candidate| (similarity(target, candidate), candidate))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, paper)| paper.title.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, keywords: &[&str]) -> Paper {
        let mut p = Paper::new(title);
        p.keywords = keywords.iter().map(|s| s.to_string()).collect();
        p
    }

    #[test]
    fn test_ranks_by_similarity_descending() {
        let target = paper("Target", &["alpha", "beta", "gamma"]);
        let far = paper("Far", &["alpha", "x1", "x2", "x3", "x4"]);
        let near = paper("Near", &["alpha", "beta", "gamma"]);

        let titles = rank_related(&target, &[far, near], 3);
        assert_eq!(titles, vec!["Near", "Far"]);
    }

    #[test]
    fn test_excludes_target_by_id() {
        let target = paper("Target", &["alpha"]);
        let other = paper("Other", &["alpha"]);

        let titles = rank_related(&target, &[target.clone(), other], 3);
        assert_eq!(titles, vec!["Other"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let target = paper("Target", &["alpha"]);
        let candidates: Vec<Paper> = (0..5)
            .map(|i| paper(&format!("C{i}"), &["alpha"]))
            .collect();

        let titles = rank_related(&target, &candidates, 3);
        assert_eq!(titles.len(), 3);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let target = paper("Target", &["alpha"]);
        let candidates: Vec<Paper> = ["First", "Second", "Third"]
            .iter()
            .map(|t| paper(t, &["alpha"]))
            .collect();

        let titles = rank_related(&target, &candidates, 3);
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_zero_score_candidates_still_fill_slots() {
        let target = paper("Target", &["alpha"]);
        let unrelated = paper("Unrelated", &["omega"]);

        let titles = rank_related(&target, &[unrelated], 3);
        assert_eq!(titles, vec!["Unrelated"]);
    }

    #[test]
    fn test_empty_candidates() {
        let target = paper("Target", &[]);
        assert!(rank_related(&target, &[], 3).is_empty());
    }
}
