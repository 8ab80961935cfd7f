//! Clustering quality measures.
//!
//! | Metric | Range | Best | Use |
//! |--------|-------|------|-----|
//! | [`inertia`] | [0, ∞) | 0 | Within-cluster sum of squares (the k-means objective) |
//! | [`cluster_sizes`] | - | - | Members per cluster id, spots empty clusters |
//! | [`ari`] | [-1, 1] | 1 | Agreement of two labelings, invariant to label permutation |
//!
//! # Example
//!
//! ```rust
//! use dkmeans::cluster::kmeans_lloyd;
//! use dkmeans::metrics::{ari, cluster_sizes, inertia};
//!
//! let data = [[0.0f64], [1.0], [10.0], [11.0]];
//! let (means, labels) = kmeans_lloyd(&data, 2, 100, Some(3), 0.0).unwrap();
//!
//! assert!((inertia(&data, &means, &labels) - 1.0).abs() < 1e-12);
//! assert_eq!(cluster_sizes(&labels, 2), vec![2, 2]);
//! assert!((ari(&labels, &[0, 0, 1, 1]) - 1.0).abs() < 1e-12);
//! ```
//!
//! # References
//!
//! - Hubert & Arabie (1985). "Comparing partitions" (ARI)

use crate::cluster::{distance_squared, Scalar};
use std::collections::HashMap;

/// Within-cluster sum of squares.
///
/// ```text
/// WCSS = Σᵢ ||xᵢ - μ(labelᵢ)||²
/// ```
///
/// Pairs beyond the shorter of `data`/`labels`, and labels with no mean, are
/// skipped.
pub fn inertia<T: Scalar, const N: usize>(
    data: &[[T; N]],
    means: &[[T; N]],
    labels: &[usize],
) -> f64 {
    data.iter()
        .zip(labels)
        .filter_map(|(p, &l)| means.get(l).map(|m| distance_squared(p, m)))
        .map(|d| d.to_f64().unwrap_or(f64::INFINITY))
        .sum()
}

/// Number of points carrying each label in `[0, k)`.
///
/// Labels `>= k` are not counted.
pub fn cluster_sizes(labels: &[usize], k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for &l in labels {
        if let Some(s) = sizes.get_mut(l) {
            *s += 1;
        }
    }
    sizes
}

/// Adjusted Rand Index between two labelings.
///
/// ARI = (RI - Expected_RI) / (max(RI) - Expected_RI)
///
/// 1.0 means the same partition (label ids may differ), around 0.0 is
/// chance-level agreement. Returns 0.0 when the lengths differ or the input
/// is empty.
///
/// ```rust
/// use dkmeans::metrics::ari;
///
/// let a = [1, 1, 0, 0];
/// let b = [0, 0, 1, 1];
/// assert!((ari(&a, &b) - 1.0).abs() < 0.01);
/// ```
pub fn ari(a: &[usize], b: &[usize]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (joint, n) = build_contingency_table(a, b);

    let mut row_sums = HashMap::new();
    let mut col_sums = HashMap::new();
    for (&(p, t), &count) in &joint {
        *row_sums.entry(p).or_insert(0usize) += count;
        *col_sums.entry(t).or_insert(0usize) += count;
    }

    let sum_comb_ij: f64 = joint.values().map(|&c| comb2(c) as f64).sum();
    let sum_comb_a: f64 = row_sums.values().map(|&c| comb2(c) as f64).sum();
    let sum_comb_b: f64 = col_sums.values().map(|&c| comb2(c) as f64).sum();

    let comb_n = comb2(n) as f64;
    if comb_n == 0.0 {
        // A single point: both labelings are trivially the same partition.
        return 1.0;
    }

    let expected = sum_comb_a * sum_comb_b / comb_n;
    let max_index = (sum_comb_a + sum_comb_b) / 2.0;

    let denom = max_index - expected;
    if denom.abs() < 1e-10 {
        return 1.0;
    }

    (sum_comb_ij - expected) / denom
}

fn build_contingency_table(a: &[usize], b: &[usize]) -> (HashMap<(usize, usize), usize>, usize) {
    let mut table = HashMap::new();
    for (&p, &t) in a.iter().zip(b.iter()) {
        *table.entry((p, t)).or_insert(0) += 1;
    }
    (table, a.len())
}

fn comb2(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inertia_zero_when_points_are_means() {
        let data = [[1.0f64, 2.0], [3.0, 4.0]];
        assert_eq!(inertia(&data, &data, &[0, 1]), 0.0);
    }

    #[test]
    fn test_inertia_sums_squared_distances() {
        let data = [[0i32], [2], [10]];
        let means = [[1i32], [10]];
        assert_eq!(inertia(&data, &means, &[0, 0, 1]), 2.0);
    }

    #[test]
    fn test_inertia_skips_unknown_labels() {
        let data = [[0.0f64], [5.0]];
        let means = [[0.0f64]];
        assert_eq!(inertia(&data, &means, &[0, 3]), 0.0);
    }

    #[test]
    fn test_cluster_sizes() {
        assert_eq!(cluster_sizes(&[0, 2, 2, 0, 2], 4), vec![2, 0, 3, 0]);
        assert_eq!(cluster_sizes(&[5], 2), vec![0, 0]);
    }

    #[test]
    fn test_ari_perfect() {
        let a = [0, 0, 1, 1];
        assert!((ari(&a, &a) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_ari_permuted() {
        let a = [2, 2, 0, 0, 1, 1];
        let b = [0, 0, 1, 1, 2, 2];
        assert!((ari(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ari_disagreement_is_low() {
        let a = [0, 1, 0, 1];
        let b = [0, 0, 1, 1];
        assert!(ari(&a, &b) < 0.5);
    }

    #[test]
    fn test_ari_edge_cases() {
        assert_eq!(ari(&[], &[]), 0.0);
        assert_eq!(ari(&[0, 1], &[0]), 0.0);
        assert_eq!(ari(&[3], &[0]), 1.0);
    }
}
