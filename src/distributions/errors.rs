//! Errors for distribution construction and evaluation.
//!
//! This module defines the crate-wide error type, [`DistError`], and the
//! result alias [`DistResult`]. Every failure is detected eagerly at the
//! boundary where inputs enter (construction, binding of deferred
//! parameters, density evaluation) and is returned to the caller; nothing
//! is recovered silently.
//!
//! ## Conventions
//! - Shapes are reported as `Vec<usize>` in row-major order (NumPy
//!   convention), statically-known shapes via [`StaticShape`].
//! - Indices are 0-based flat offsets into the broadcast parameter array.
//! - [`DistError::kind`] groups variants into the three failure families of
//!   the public contract: configuration, type and value errors.
//! - With the `python-bindings` feature, type errors surface as Python
//!   `TypeError` and everything else as `ValueError`.
#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyTypeError, PyValueError},
};

use crate::distributions::core::{dtype::DType, shape::StaticShape};

/// Crate-wide result alias for operations that may produce [`DistError`].
pub type DistResult<T> = Result<T, DistError>;

/// Coarse classification of a [`DistError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied an incomplete or contradictory configuration.
    Configuration,
    /// A parameter or observation has a non-real element type.
    Type,
    /// Shapes or values violate a precondition.
    Value,
}

/// Unified error type for distribution construction and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum DistError {
    // ---- Configuration ----
    /// Neither `stddev` nor `logstd` was supplied.
    MissingScale,

    /// Both `stddev` and `logstd` were supplied in the same call.
    ConflictingScale,

    // ---- Types ----
    /// A parameter (or observation) is not a real floating-point array.
    InvalidDType { param: &'static str, dtype: DType },

    // ---- Shapes ----
    /// Two shapes cannot be broadcast against each other.
    ShapeMismatch { context: &'static str, left: Vec<usize>, right: Vec<usize> },

    /// Two statically-known shapes cannot be broadcast against each other.
    StaticShapeMismatch { context: &'static str, left: StaticShape, right: StaticShape },

    /// Event grouping asks for more trailing dimensions than exist.
    InvalidEventNdims { requested: usize, ndim: usize },

    // ---- Numerics (only with `check_numerics`) ----
    /// A `stddev` entry is not strictly positive.
    NonPositiveScale { index: usize, value: f64 },

    /// A parameter entry is NaN/±inf.
    NonFiniteParam { param: &'static str, index: usize, value: f64 },

    // ---- Deferred parameters ----
    /// A placeholder was not present in the feed.
    UnboundPlaceholder { name: String },

    /// A fed value does not match the placeholder's static shape.
    FeedShapeMismatch { name: String, expected: StaticShape, actual: Vec<usize> },
}

impl DistError {
    /// Classify this error into the configuration/type/value families.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DistError::MissingScale | DistError::ConflictingScale => ErrorKind::Configuration,
            DistError::InvalidDType { .. } => ErrorKind::Type,
            DistError::ShapeMismatch { .. }
            | DistError::StaticShapeMismatch { .. }
            | DistError::InvalidEventNdims { .. }
            | DistError::NonPositiveScale { .. }
            | DistError::NonFiniteParam { .. }
            | DistError::UnboundPlaceholder { .. }
            | DistError::FeedShapeMismatch { .. } => ErrorKind::Value,
        }
    }
}

impl std::error::Error for DistError {}

impl std::fmt::Display for DistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            DistError::MissingScale => {
                write!(f, "At least one of `stddev`, `logstd` should be specified.")
            }
            DistError::ConflictingScale => {
                write!(f, "Only one of `stddev`, `logstd` may be specified, not both.")
            }
            // ---- Types ----
            DistError::InvalidDType { param, dtype } => {
                write!(
                    f,
                    "Normal distribution parameters must be real numbers; `{param}` has dtype {dtype}."
                )
            }
            // ---- Shapes ----
            DistError::ShapeMismatch { context, left, right } => {
                write!(f, "{context} should be broadcastable; got shapes {left:?} and {right:?}.")
            }
            DistError::StaticShapeMismatch { context, left, right } => {
                write!(f, "{context} should be broadcastable; got shapes {left} and {right}.")
            }
            DistError::InvalidEventNdims { requested, ndim } => {
                write!(
                    f,
                    "group_event_ndims ({requested}) exceeds the rank of the log-density ({ndim})."
                )
            }
            // ---- Numerics ----
            DistError::NonPositiveScale { index, value } => {
                write!(f, "`stddev` must be strictly positive; index {index} has value {value}.")
            }
            DistError::NonFiniteParam { param, index, value } => {
                write!(f, "`{param}` must be finite; index {index} has value {value}.")
            }
            // ---- Deferred parameters ----
            DistError::UnboundPlaceholder { name } => {
                write!(f, "No value was fed for placeholder `{name}`.")
            }
            DistError::FeedShapeMismatch { name, expected, actual } => {
                write!(
                    f,
                    "Value fed for placeholder `{name}` has shape {actual:?}, incompatible with {expected}."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DistError> for PyErr {
    fn from(err: DistError) -> PyErr {
        match err.kind() {
            ErrorKind::Type => PyTypeError::new_err(err.to_string()),
            ErrorKind::Configuration | ErrorKind::Value => PyValueError::new_err(err.to_string()),
        }
    }
}
