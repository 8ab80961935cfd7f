//! Clustering traits.

use super::point::Scalar;
use crate::error::Result;

/// Trait for hard clustering of fixed-dimension points.
pub trait Clustering<T: Scalar, const N: usize> {
    /// Fit the model to data and return cluster assignments.
    ///
    /// Returns a vector of cluster labels, one per input point, each in
    /// `[0, n_clusters())`.
    fn fit_predict(&self, data: &[[T; N]]) -> Result<Vec<usize>>;

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;
}
