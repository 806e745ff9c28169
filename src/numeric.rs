//! Vector helpers shared by the empire and engine code.
//!
//! Index lookups return the FIRST extreme element and never select a NaN
//! over a real number.

use rand::seq::SliceRandom;
use rand::Rng;

/// Sum of the elements.
#[must_use]
pub fn sum(x: &[f64]) -> f64 {
    x.iter().sum()
}

/// Arithmetic mean; `0.0` for an empty slice.
#[must_use]
pub fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        0.0
    } else {
        sum(x) / x.len() as f64
    }
}

/// Euclidean norm.
#[must_use]
pub fn norm(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum::<f64>().sqrt()
}

/// Euclidean distance between two points of equal length.
#[must_use]
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(ai, bi)| (ai - bi) * (ai - bi))
        .sum::<f64>()
        .sqrt()
}

/// Index of the first minimum, `None` for an empty slice.
#[must_use]
pub fn argmin(x: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in x.iter().enumerate() {
        match best {
            None => best = Some((i, v)),
            Some((_, b)) if v < b || (b.is_nan() && !v.is_nan()) => best = Some((i, v)),
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first maximum, `None` for an empty slice.
#[must_use]
pub fn argmax(x: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in x.iter().enumerate() {
        match best {
            None => best = Some((i, v)),
            Some((_, b)) if v > b || (b.is_nan() && !v.is_nan()) => best = Some((i, v)),
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}

/// Random permutation of `0..n`.
pub fn randperm<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);
    indices
}

/// Sort `costs` ascending and reorder `rows` to match.
///
/// The sort is stable: equal costs keep their relative order.
pub fn sort_by_cost<T>(costs: &mut Vec<f64>, rows: &mut Vec<T>) {
    debug_assert_eq!(costs.len(), rows.len());
    let mut order: Vec<usize> = (0..costs.len()).collect();
    order.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));

    let mut slots: Vec<Option<T>> = rows.drain(..).map(Some).collect();
    let sorted_costs: Vec<f64> = order.iter().map(|&i| costs[i]).collect();
    rows.extend(order.iter().filter_map(|&i| slots[i].take()));
    *costs = sorted_costs;
}

/// Round a non-negative real to the nearest count, saturating at zero.
#[must_use]
pub fn round_count(x: f64) -> usize {
    if x.is_finite() && x > 0.0 {
        x.round() as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mean_and_sum() {
        assert!((sum(&[1.0, 2.0, 3.0]) - 6.0).abs() < 1e-12);
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
        assert!(mean(&[]).abs() < 1e-12);
    }

    #[test]
    fn test_norm_and_distance() {
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((distance(&[1.0, 1.0], &[4.0, 5.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_argmin_first_occurrence() {
        assert_eq!(argmin(&[3.0, 1.0, 1.0, 2.0]), Some(1));
        assert_eq!(argmin(&[]), None);
    }

    #[test]
    fn test_argmax_handles_non_positive_values() {
        // all values negative: the true maximum must still win
        assert_eq!(argmax(&[-5.0, -1.0, -3.0]), Some(1));
        assert_eq!(argmax(&[0.0, 0.0]), Some(0));
    }

    #[test]
    fn test_arg_skips_nan() {
        assert_eq!(argmin(&[f64::NAN, 2.0, 1.0]), Some(2));
        assert_eq!(argmax(&[f64::NAN, 2.0, 1.0]), Some(1));
    }

    #[test]
    fn test_sort_by_cost_jointly() {
        let mut costs = vec![3.0, 1.0, 2.0];
        let mut rows = vec![vec![30.0], vec![10.0], vec![20.0]];
        sort_by_cost(&mut costs, &mut rows);
        assert_eq!(costs, vec![1.0, 2.0, 3.0]);
        assert_eq!(rows, vec![vec![10.0], vec![20.0], vec![30.0]]);
    }

    #[test]
    fn test_sort_by_cost_is_stable() {
        let mut costs = vec![1.0, 0.0, 1.0, 0.0];
        let mut rows = vec!["a", "b", "c", "d"];
        sort_by_cost(&mut costs, &mut rows);
        assert_eq!(rows, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_round_count() {
        assert_eq!(round_count(2.5), 3);
        assert_eq!(round_count(2.49), 2);
        assert_eq!(round_count(-1.0), 0);
        assert_eq!(round_count(f64::NAN), 0);
    }

    proptest! {
        #[test]
        fn prop_randperm_is_permutation(n in 0usize..200, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut perm = randperm(n, &mut rng);
            perm.sort_unstable();
            prop_assert_eq!(perm, (0..n).collect::<Vec<_>>());
        }

        #[test]
        fn prop_sort_by_cost_ascending(costs in prop::collection::vec(-1e6f64..1e6, 0..64)) {
            let mut sorted = costs.clone();
            let mut rows: Vec<usize> = (0..costs.len()).collect();
            sort_by_cost(&mut sorted, &mut rows);
            prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
            for (c, &row) in sorted.iter().zip(rows.iter()) {
                prop_assert_eq!(*c, costs[row]);
            }
        }
    }
}
