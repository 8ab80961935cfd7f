use core::fmt;

/// Result alias for `dkmeans`.
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-contract violations reported by the clustering routines.
///
/// Every variant is raised before (or instead of) producing a result; there is
/// no transient failure category.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Requested cluster count is zero or exceeds the number of points.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of points supplied.
        n_items: usize,
    },

    /// A row handed to [`points_from_rows`](crate::points_from_rows) had the wrong length.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A member count could not be represented in the scalar type.
    ScalarOverflow {
        /// The count that failed to convert.
        count: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::ScalarOverflow { count } => {
                write!(f, "count {count} is not representable in the scalar type")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
