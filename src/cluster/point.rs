//! Point model and Euclidean geometry.
//!
//! A point is a plain `[T; N]`: the dimension lives in the type, so every
//! point and mean of one clustering run has the same length by construction.
//! The scalar must have signed arithmetic semantics (`i32`, `i64`, `f32`,
//! `f64`, ...). Unsigned types are rejected at compile time because
//! `a - b` on them is not a difference.

use crate::error::{Error, Result};
use core::fmt::Debug;
use num_traits::{NumCast, Signed};

/// Scalar type a point is made of.
///
/// Blanket-implemented for every signed numeric primitive.
pub trait Scalar: Signed + NumCast + Copy + PartialOrd + Debug {}

impl<T> Scalar for T where T: Signed + NumCast + Copy + PartialOrd + Debug {}

/// Squared Euclidean distance: `Σ (aᵢ - bᵢ)²`.
///
/// Computed in `T`; overflow behaves as the scalar type does natively.
pub fn distance_squared<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> T {
    a.iter().zip(b.iter()).fold(T::zero(), |acc, (&x, &y)| {
        let delta = x - y;
        acc + delta * delta
    })
}

/// Euclidean distance, as `f64`.
pub fn distance<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> f64 {
    distance_squared(a, b)
        .to_f64()
        .map_or(f64::INFINITY, f64::sqrt)
}

/// Component-wise average of `points`, computed in `T`.
///
/// Integer scalars truncate. An empty slice yields the origin.
pub fn centroid<T: Scalar, const N: usize>(points: &[[T; N]]) -> Result<[T; N]> {
    let mut out = [T::zero(); N];
    if points.is_empty() {
        return Ok(out);
    }

    for p in points {
        for (o, &x) in out.iter_mut().zip(p.iter()) {
            *o = *o + x;
        }
    }

    let n: T = count_as(points.len())?;
    for o in out.iter_mut() {
        *o = *o / n;
    }

    Ok(out)
}

/// Converts rows of runtime length into fixed-dimension points.
///
/// Fails on the first row whose length differs from `N`.
pub fn points_from_rows<T: Scalar, const N: usize>(rows: &[Vec<T>]) -> Result<Vec<[T; N]>> {
    rows.iter()
        .map(|row| {
            <[T; N]>::try_from(row.as_slice()).map_err(|_| Error::DimensionMismatch {
                expected: N,
                found: row.len(),
            })
        })
        .collect()
}

/// A member count as a scalar divisor.
pub(crate) fn count_as<T: Scalar>(count: usize) -> Result<T> {
    <T as NumCast>::from(count).ok_or(Error::ScalarOverflow { count })
}
