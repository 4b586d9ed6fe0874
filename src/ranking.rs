//! Bounded top-K ranking of class probabilities.
//!
//! The network hands back one score per class, index-aligned with the label
//! table. Callers only ever want the handful of best labels, so a full sort
//! of the thousand-entry vector is wasted work: a fixed-capacity
//! shift-insert buffer keeps the cost at O(n·k) for the small k (≤ 10) this
//! crate is used with.

use crate::errors::{LabelingError, LabelingResult};

/// One entry of a ranking: a class name and its probability.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedLabel {
    pub label: String,
    pub score: f32,
}

/// Whether `candidate` should be placed before `incumbent`.
///
/// NaN scores rank below every real score: a NaN candidate never displaces
/// anything, and any real candidate displaces a buffered NaN.
fn outranks(candidate: f32, incumbent: f32) -> bool {
    if candidate.is_nan() {
        false
    } else if incumbent.is_nan() {
        true
    } else {
        candidate > incumbent
    }
}

/// Returns the `min(k, scores.len())` highest-scored labels, best first.
///
/// `scores` and `labels` must be index-aligned and of equal length. Entries
/// sharing a score keep their input order (the earlier index wins), so two
/// calls with identical inputs produce identically ordered output.
///
/// Fails with [`LabelingError::InvalidArgument`] when the two slices differ
/// in length. An empty `scores` or `k == 0` yields an empty ranking.
pub fn rank<S: AsRef<str>>(
    scores: &[f32],
    labels: &[S],
    k: usize,
) -> LabelingResult<Vec<RankedLabel>> {
    if scores.len() != labels.len() {
        return Err(LabelingError::InvalidArgument(format!(
            "got {} scores for {} labels",
            scores.len(),
            labels.len()
        )));
    }
    let k = k.min(scores.len());
    let mut best: Vec<(f32, usize)> = Vec::with_capacity(k);
    for (ix, &score) in scores.iter().enumerate() {
        match best.iter().position(|&(held, _)| outranks(score, held)) {
            Some(slot) => {
                best.insert(slot, (score, ix));
                best.truncate(k);
            }
            None if best.len() < k => best.push((score, ix)),
            None => (),
        }
    }
    Ok(best
        .into_iter()
        .map(|(score, ix)| RankedLabel { label: labels[ix].as_ref().to_string(), score })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|ix| format!("class_{ix}")).collect()
    }

    fn index_of(label: &str) -> usize {
        label.trim_start_matches("class_").parse().unwrap()
    }

    #[test]
    fn picks_the_best_three() {
        let scores = [0.1, 0.7, 0.7, 0.05, 0.15];
        let labels = ["cat", "dog", "fox", "ant", "bee"];
        let ranked = rank(&scores, &labels, 3).unwrap();
        assert_eq!(
            ranked,
            vec![
                RankedLabel { label: "dog".to_string(), score: 0.7 },
                RankedLabel { label: "fox".to_string(), score: 0.7 },
                RankedLabel { label: "bee".to_string(), score: 0.15 },
            ]
        );
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let scores = [0.1, 0.2, 0.3, 0.4, 0.5];
        let labels = ["cat", "dog", "fox", "ant"];
        let err = rank(&scores, &labels, 3).unwrap_err();
        assert!(matches!(err, LabelingError::InvalidArgument(_)));
    }

    #[test]
    fn k_zero_yields_nothing() {
        let labels = names(3);
        assert!(rank(&[0.1, 0.2, 0.3], &labels, 0).unwrap().is_empty());
    }

    #[test]
    fn empty_scores_yield_nothing() {
        let labels: Vec<String> = vec![];
        assert!(rank(&[], &labels, 7).unwrap().is_empty());
    }

    #[test]
    fn oversized_k_yields_a_full_sort() {
        let scores = [0.3, 0.1, 0.2];
        let labels = names(3);
        let ranked = rank(&scores, &labels, 10).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].label, "class_0");
        assert_eq!(ranked[1].label, "class_2");
        assert_eq!(ranked[2].label, "class_1");
    }

    #[test]
    fn ties_keep_input_order() {
        let scores = [0.5, 0.9, 0.5, 0.9, 0.5];
        let labels = names(5);
        let ranked = rank(&scores, &labels, 5).unwrap();
        let order: Vec<&str> = ranked.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(order, ["class_1", "class_3", "class_0", "class_2", "class_4"]);
    }

    #[test]
    fn identical_calls_rank_identically() {
        let scores = [0.2, 0.2, 0.8, 0.2, 0.8];
        let labels = names(5);
        let first = rank(&scores, &labels, 4).unwrap();
        let second = rank(&scores, &labels, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nan_ranks_below_everything() {
        let scores = [f32::NAN, 0.1, f32::NAN, 0.9];
        let labels = names(4);
        let ranked = rank(&scores, &labels, 2).unwrap();
        assert_eq!(ranked[0].label, "class_3");
        assert_eq!(ranked[1].label, "class_1");

        // with room to spare the NaN entries trail, in input order
        let ranked = rank(&scores, &labels, 4).unwrap();
        let order: Vec<&str> = ranked.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(order, ["class_3", "class_1", "class_0", "class_2"]);
        assert!(ranked[2].score.is_nan());
    }

    proptest! {
        #[test]
        fn result_length_is_min_of_k_and_n(
            scores in vec(0f32..1.0, 0..40usize),
            k in 0usize..12,
        ) {
            let labels = names(scores.len());
            let ranked = rank(&scores, &labels, k).unwrap();
            prop_assert_eq!(ranked.len(), k.min(scores.len()));
        }

        #[test]
        fn scores_are_non_increasing(
            scores in vec(0f32..1.0, 0..40usize),
            k in 0usize..12,
        ) {
            let labels = names(scores.len());
            let ranked = rank(&scores, &labels, k).unwrap();
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }

        #[test]
        fn kept_scores_dominate_dropped_ones(
            scores in vec(0f32..1.0, 1..40usize),
            k in 1usize..12,
        ) {
            let labels = names(scores.len());
            let ranked = rank(&scores, &labels, k).unwrap();
            let kept: Vec<usize> = ranked.iter().map(|r| index_of(&r.label)).collect();
            let floor = ranked.last().unwrap().score;
            for (ix, &score) in scores.iter().enumerate() {
                if !kept.contains(&ix) {
                    prop_assert!(score <= floor);
                }
            }
        }

        #[test]
        fn equal_scores_stay_in_input_order(
            // few distinct values, so ties are common
            quantized in vec(0u8..4, 0..30usize),
            k in 0usize..32,
        ) {
            let scores: Vec<f32> = quantized.iter().map(|&q| q as f32).collect();
            let labels = names(scores.len());
            let ranked = rank(&scores, &labels, k).unwrap();
            for pair in ranked.windows(2) {
                if pair[0].score == pair[1].score {
                    prop_assert!(index_of(&pair[0].label) < index_of(&pair[1].label));
                }
            }
        }
    }
}
