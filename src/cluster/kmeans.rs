//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS). The foundational clustering algorithm, dating to 1957 (Lloyd).
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k means via k-means++
//! 2. **Assign**: Each point → nearest mean
//! 3. **Update**: Each mean → average of assigned points
//! 4. Repeat until the mean shift drops to epsilon or the iteration bound is hit
//!
//! ## K-means++ Initialization
//!
//! Spreads the initial means across the data:
//! 1. Choose the first mean uniformly at random
//! 2. Choose each next mean with probability proportional to D(x)²
//!    (squared distance to the nearest mean chosen so far)
//!
//! Means are always copies of data points at this stage.
//!
//! # Convergence
//!
//! The stopping scalar is the distance between the centroid of the previous
//! mean set and the centroid of the updated one:
//!
//! ```text
//! shift = ‖ avg(old means) − avg(new means) ‖
//! ```
//!
//! This is one number for the whole configuration. Two means drifting in
//! opposite directions partially cancel.
//!
//! # Returned labels
//!
//! Within an iteration the labels are computed first, then the means are
//! updated from them. The labels handed back therefore belong to the means
//! as they stood *before* the final update.
//!
//! # Empty clusters
//!
//! A cluster that receives no points keeps its previous mean. There is no
//! reseeding.

use super::point::{centroid, count_as, distance, distance_squared, Scalar};
use super::sampling::{IndexSampler, LcgSampler};
use super::traits::Clustering;
use crate::error::{Error, Result};
use log::{debug, info, warn};

/// K-means clustering (Lloyd's algorithm, k-means++ seeding).
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence threshold on the mean shift.
    epsilon: f64,
    /// Random seed; `None` draws from system entropy.
    seed: Option<u64>,
}

/// Outcome of [`Kmeans::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit<T, const N: usize> {
    /// Final means, indexed by cluster id.
    pub means: Vec<[T; N]>,
    /// Cluster id per input point, from the last assignment pass.
    pub labels: Vec<usize>,
    /// Assignment/update passes executed.
    pub iterations: usize,
    /// Mean shift measured after the last update.
    pub shift: f64,
    /// Whether the loop stopped on `shift <= epsilon` rather than the bound.
    pub converged: bool,
}

impl<T, const N: usize> KmeansFit<T, N> {
    /// `(means, labels)`.
    pub fn into_parts(self) -> (Vec<[T; N]>, Vec<usize>) {
        (self.means, self.labels)
    }
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            epsilon: 0.0,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self, n_items: usize) -> Result<()> {
        if self.k == 0 || self.k > n_items {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be greater than zero",
            });
        }
        // Written this way round so NaN is rejected too.
        if !(self.epsilon >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be a non-negative number",
            });
        }
        Ok(())
    }

    /// Cluster `data`, seeding k-means++ from the configured seed or entropy.
    pub fn fit<T: Scalar, const N: usize>(&self, data: &[[T; N]]) -> Result<KmeansFit<T, N>> {
        self.validate(data.len())?;
        let mut sampler = match self.seed {
            Some(seed) => LcgSampler::from_seed(seed),
            None => LcgSampler::from_entropy(),
        };
        self.fit_with(data, &mut sampler)
    }

    /// Cluster `data` drawing k-means++ indices from `sampler`.
    ///
    /// The configured seed is ignored.
    pub fn fit_with<T, const N: usize, S>(
        &self,
        data: &[[T; N]],
        sampler: &mut S,
    ) -> Result<KmeansFit<T, N>>
    where
        T: Scalar,
        S: IndexSampler + ?Sized,
    {
        self.validate(data.len())?;

        let mut means = init_plusplus(data, self.k, sampler)?;
        let mut iterations = 0;

        loop {
            let labels = assign_clusters(data, &means);
            let updated = update_means(data, &labels, &means)?;
            let shift = mean_shift(&means, &updated)?;
            means = updated;
            iterations += 1;
            debug!("k-means iteration {iterations}: mean shift {shift}");

            let converged = shift <= self.epsilon;
            if converged || iterations >= self.max_iter {
                info!(
                    "k-means finished: k={}, n={}, iterations={iterations}, shift={shift}, converged={converged}",
                    self.k,
                    data.len()
                );
                return Ok(KmeansFit {
                    means,
                    labels,
                    iterations,
                    shift,
                    converged,
                });
            }
        }
    }
}

impl<T: Scalar, const N: usize> Clustering<T, N> for Kmeans {
    fn fit_predict(&self, data: &[[T; N]]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Lloyd's k-means with k-means++ seeding.
///
/// Returns `(means, labels)`. `seed: None` draws seed material from system
/// entropy; an explicit seed makes the result reproducible bit-for-bit.
pub fn kmeans_lloyd<T: Scalar, const N: usize>(
    data: &[[T; N]],
    k: usize,
    max_iter: usize,
    seed: Option<u64>,
    epsilon: f64,
) -> Result<(Vec<[T; N]>, Vec<usize>)> {
    let mut model = Kmeans::new(k).with_max_iter(max_iter).with_epsilon(epsilon);
    if let Some(seed) = seed {
        model = model.with_seed(seed);
    }
    Ok(model.fit(data)?.into_parts())
}

/// Pick k initial means from `data` with k-means++.
///
/// When the sampler cannot make a weighted choice (all weights zero, or
/// rounding past the last bucket) the first data point is taken.
pub fn init_plusplus<T, const N: usize, S>(
    data: &[[T; N]],
    k: usize,
    sampler: &mut S,
) -> Result<Vec<[T; N]>>
where
    T: Scalar,
    S: IndexSampler + ?Sized,
{
    if k == 0 || data.is_empty() {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: data.len(),
        });
    }

    let mut means = Vec::with_capacity(k);
    let first = data[sampler.uniform_index(data.len())];
    means.push(first);

    // Squared distance from each point to its nearest chosen mean.
    let mut closest: Vec<T> = data.iter().map(|p| distance_squared(p, &first)).collect();

    while means.len() < k {
        let weights: Vec<f64> = closest.iter().map(|d| d.to_f64().unwrap_or(0.0)).collect();
        let mut index = sampler.weighted_index(&weights);
        if index >= data.len() {
            warn!("k-means++ weighted draw degenerate at mean {}, using point 0", means.len());
            index = 0;
        }

        let chosen = data[index];
        means.push(chosen);
        for (c, p) in closest.iter_mut().zip(data) {
            let d = distance_squared(p, &chosen);
            if d < *c {
                *c = d;
            }
        }
    }

    debug!("k-means++ selected {k} initial means from {} points", data.len());
    Ok(means)
}

/// Index of the nearest mean for every point. Ties go to the lower index.
pub fn assign_clusters<T: Scalar, const N: usize>(data: &[[T; N]], means: &[[T; N]]) -> Vec<usize> {
    data.iter().map(|p| closest_mean(p, means)).collect()
}

fn closest_mean<T: Scalar, const N: usize>(point: &[T; N], means: &[[T; N]]) -> usize {
    let Some(first) = means.first() else {
        return 0;
    };

    let mut best_cluster = 0;
    let mut best_dist = distance_squared(point, first);
    for (c, mean) in means.iter().enumerate().skip(1) {
        let dist = distance_squared(point, mean);
        if dist < best_dist {
            best_dist = dist;
            best_cluster = c;
        }
    }
    best_cluster
}

/// New means from the current labels.
///
/// Only the overlapping prefix of `data` and `labels` is read, and labels
/// outside `[0, old_means.len())` are ignored. A cluster with no members keeps
/// its entry from `old_means`.
pub fn update_means<T: Scalar, const N: usize>(
    data: &[[T; N]],
    labels: &[usize],
    old_means: &[[T; N]],
) -> Result<Vec<[T; N]>> {
    let k = old_means.len();
    let mut sums = vec![[T::zero(); N]; k];
    let mut counts = vec![0usize; k];

    for (point, &label) in data.iter().zip(labels) {
        let Some(sum) = sums.get_mut(label) else {
            continue;
        };
        for (s, &x) in sum.iter_mut().zip(point) {
            *s = *s + x;
        }
        counts[label] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .zip(old_means)
        .map(|((mut sum, count), old)| -> Result<[T; N]> {
            if count == 0 {
                return Ok(*old);
            }
            let n: T = count_as(count)?;
            for s in sum.iter_mut() {
                *s = *s / n;
            }
            Ok(sum)
        })
        .collect()
}

/// Distance between the centroid of `old` and the centroid of `new`.
pub fn mean_shift<T: Scalar, const N: usize>(old: &[[T; N]], new: &[[T; N]]) -> Result<f64> {
    Ok(distance(&centroid(old)?, &centroid(new)?))
}
