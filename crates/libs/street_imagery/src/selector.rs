use crate::candidate::ImageCandidate;
use crate::config::ScoreWeights;
use crate::scoring::composite_score;
use fastrand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: ImageCandidate,
    pub score: f64,
}

/// Scores every candidate and sorts them best first. The sort is stable, so
/// equal scores keep their input order.
#[must_use]
pub fn rank(candidates: Vec<ImageCandidate>, weights: &ScoreWeights) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let score = composite_score(&candidate.signals, weights);
            ScoredCandidate { candidate, score }
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Picks uniformly among the `top_k` best of an already ranked batch, so the
/// same city does not always yield the identical image. A `top_k` of 0 is
/// treated as 1.
pub fn select<'a>(
    ranked: &'a [ScoredCandidate],
    top_k: usize,
    rng: &mut Rng,
) -> Option<&'a ScoredCandidate> {
    if ranked.is_empty() {
        return None;
    }
    let pool = top_k.clamp(1, ranked.len());
    ranked.get(rng.usize(..pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn with_education(id: &str, educational_score: f64) -> ImageCandidate {
        let mut candidate = ImageCandidate::new(id, format!("https://img/{id}.jpg"));
        candidate.signals.educational_score = educational_score;
        candidate
    }

    #[test]
    fn rank_sorts_descending() {
        let ranked = rank(
            vec![
                with_education("low", 0.1),
                with_education("high", 0.9),
                with_education("mid", 0.5),
            ],
            &ScoreWeights::default(),
        );
        let ids: Vec<&str> = ranked.iter().map(|s| s.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn empty_batch_selects_nothing() {
        let mut rng = Rng::with_seed(7);
        assert!(select(&[], 5, &mut rng).is_none());
    }

    #[test]
    fn selection_never_leaves_the_top_k() {
        let candidates: Vec<ImageCandidate> = (0..20)
            .map(|i| with_education(&format!("c{i}"), f64::from(i) / 20.0))
            .collect();
        let ranked = rank(candidates, &ScoreWeights::default());
        let top: HashSet<&str> = ranked[..3].iter().map(|s| s.candidate.id.as_str()).collect();

        let mut rng = Rng::with_seed(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let picked = select(&ranked, 3, &mut rng).expect("non-empty batch");
            assert!(top.contains(picked.candidate.id.as_str()));
            seen.insert(picked.candidate.id.clone());
        }
        assert_eq!(seen.len(), 3, "every top candidate should be reachable");
    }

    #[test]
    fn top_k_larger_than_batch_uses_whole_batch() {
        let ranked = rank(
            vec![with_education("a", 0.2), with_education("b", 0.4)],
            &ScoreWeights::default(),
        );
        let mut rng = Rng::with_seed(1);
        for _ in 0..50 {
            assert!(select(&ranked, 10, &mut rng).is_some());
        }
    }

    #[test]
    fn zero_top_k_returns_the_best() {
        let ranked = rank(
            vec![with_education("a", 0.2), with_education("b", 0.4)],
            &ScoreWeights::default(),
        );
        let mut rng = Rng::with_seed(3);
        let picked = select(&ranked, 0, &mut rng).expect("non-empty batch");
        assert_eq!(picked.candidate.id, "b");
    }
}
