//! K-means clustering over fixed-dimension points.
//!
//! ## Pieces
//!
//! | Module | Role |
//! |--------|------|
//! | `point` | [`Scalar`] bound, squared/plain Euclidean distance, centroid |
//! | `sampling` | [`IndexSampler`] and the portable [`Lcg64`] engine |
//! | `kmeans` | k-means++ seeding, assignment, mean update, mean shift, driver |
//!
//! Each step is exposed on its own so callers can run a single pass or plug
//! in a scripted sampler.
//!
//! ## Usage
//!
//! ```rust
//! use dkmeans::cluster::{Clustering, Kmeans};
//!
//! let data = vec![[0.0, 0.0], [0.1, 0.1], [10.0, 10.0], [10.1, 10.1]];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);  // First two together
//! assert_ne!(labels[0], labels[2]);  // Separate from last two
//! ```
//!
//! The free function mirrors the plain call contract:
//!
//! ```rust
//! use dkmeans::cluster::kmeans_lloyd;
//!
//! let data = [[0.0f64], [1.0], [10.0], [11.0]];
//! let (means, labels) = kmeans_lloyd(&data, 2, 100, Some(7), 0.0).unwrap();
//! assert_eq!(means.len(), 2);
//! assert_eq!(labels.len(), 4);
//! ```

mod kmeans;
mod point;
mod sampling;
mod traits;

pub use kmeans::{
    assign_clusters, init_plusplus, kmeans_lloyd, mean_shift, update_means, Kmeans, KmeansFit,
};
pub use point::{centroid, distance, distance_squared, points_from_rows, Scalar};
pub use sampling::{
    IndexSampler, Lcg64, LcgSampler, LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER,
};
pub use traits::Clustering;
