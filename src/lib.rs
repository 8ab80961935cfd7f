//! # dkmeans
//!
//! K-means clustering generic over the scalar type and the point dimension.
//!
//! Points are `[T; N]` for any signed numeric `T`. Means are seeded with
//! k-means++ and refined with Lloyd's algorithm. Seeding randomness comes from
//! a fully specified linear congruential engine, so a seeded run returns the
//! same means and labels on every platform.
//!
//! ```rust
//! use dkmeans::kmeans_lloyd;
//!
//! let data = [[1.0f32, 1.0], [1.5, 2.0], [8.0, 8.0], [9.0, 8.5], [8.5, 9.0]];
//! let (means, labels) = kmeans_lloyd(&data, 2, 100, Some(42), 0.0)?;
//!
//! assert_eq!(means.len(), 2);
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! # Ok::<(), dkmeans::Error>(())
//! ```

pub mod cluster;
/// Error types used across `dkmeans`.
pub mod error;
pub mod metrics;

pub use cluster::{
    assign_clusters, init_plusplus, kmeans_lloyd, mean_shift, points_from_rows, update_means,
    Clustering, IndexSampler, Kmeans, KmeansFit, Lcg64, LcgSampler, Scalar,
};
pub use error::{Error, Result};
pub use metrics::{ari, cluster_sizes, inertia};
