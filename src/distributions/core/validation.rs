//! Input guards for distribution construction and evaluation.
//!
//! Purpose
//! -------
//! Centralize the checks performed at the boundary where parameters and
//! observations enter a distribution, so that every constructor reports
//! failures with the same [`DistError`] variants and messages.
//!
//! Key behaviors
//! -------------
//! - Reject non-real dtypes ([`validate_real_dtype`]).
//! - Check broadcast compatibility of concrete and static shapes and return
//!   the broadcast shape ([`validate_broadcastable`],
//!   [`validate_static_broadcastable`]).
//! - Optional numeric checks on parameter values ([`validate_finite`],
//!   [`validate_positive_scale`]).
//! - Bound the event grouping by the available rank
//!   ([`validate_event_ndims`]).
//!
//! Conventions
//! -----------
//! - Validation is side-effect free and performs no allocation beyond the
//!   returned shape and error payloads.
//! - Numeric checks report the first offending flat index.
use ndarray::ArrayD;

use crate::distributions::{
    core::{
        dtype::DType,
        shape::{StaticShape, broadcast_shapes, broadcast_static_shapes},
    },
    errors::{DistError, DistResult},
};

/// Context used in broadcast errors between the location and scale parameters.
pub const PARAM_CONTEXT: &str = "`mean` and `stddev`/`logstd`";

/// Ensure `dtype` is a floating-point type.
///
/// # Errors
/// [`DistError::InvalidDType`] naming `param` when `dtype` is integer or
/// boolean.
pub fn validate_real_dtype(param: &'static str, dtype: DType) -> DistResult<()> {
    if dtype.is_real() { Ok(()) } else { Err(DistError::InvalidDType { param, dtype }) }
}

/// Broadcast two concrete shapes or fail with a [`DistError::ShapeMismatch`]
/// tagged with `context`.
pub fn validate_broadcastable(
    context: &'static str, left: &[usize], right: &[usize],
) -> DistResult<Vec<usize>> {
    broadcast_shapes(left, right).ok_or_else(|| DistError::ShapeMismatch {
        context,
        left: left.to_vec(),
        right: right.to_vec(),
    })
}

/// Static counterpart of [`validate_broadcastable`].
pub fn validate_static_broadcastable(
    context: &'static str, left: &StaticShape, right: &StaticShape,
) -> DistResult<StaticShape> {
    broadcast_static_shapes(left, right).ok_or_else(|| DistError::StaticShapeMismatch {
        context,
        left: left.clone(),
        right: right.clone(),
    })
}

/// Ensure every entry of `values` is finite.
pub fn validate_finite(param: &'static str, values: &ArrayD<f64>) -> DistResult<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(DistError::NonFiniteParam { param, index, value }),
        None => Ok(()),
    }
}

/// Ensure every `stddev` entry is finite and strictly positive.
pub fn validate_positive_scale(values: &ArrayD<f64>) -> DistResult<()> {
    validate_finite("stddev", values)?;
    match values.iter().enumerate().find(|(_, v)| **v <= 0.0) {
        Some((index, &value)) => Err(DistError::NonPositiveScale { index, value }),
        None => Ok(()),
    }
}

/// Ensure `requested` trailing dims exist in an array of rank `ndim`.
pub fn validate_event_ndims(requested: usize, ndim: usize) -> DistResult<()> {
    if requested > ndim {
        return Err(DistError::InvalidEventNdims { requested, ndim });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover every error branch of the guards and one success
    // path each.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Integer and boolean dtypes are rejected, floats accepted.
    fn validate_real_dtype_rejects_integers_and_bools() {
        assert!(validate_real_dtype("mean", DType::Float32).is_ok());
        assert_eq!(
            validate_real_dtype("stddev", DType::Int32),
            Err(DistError::InvalidDType { param: "stddev", dtype: DType::Int32 })
        );
        assert!(validate_real_dtype("mean", DType::Bool).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Broadcast failures keep both shapes and the context.
    fn validate_broadcastable_reports_both_shapes() {
        assert_eq!(validate_broadcastable(PARAM_CONTEXT, &[4, 1], &[3]), Ok(vec![4, 3]));
        assert_eq!(
            validate_broadcastable(PARAM_CONTEXT, &[2], &[3]),
            Err(DistError::ShapeMismatch { context: PARAM_CONTEXT, left: vec![2], right: vec![3] })
        );
    }

    #[test]
    // Purpose
    // -------
    // Static broadcasting keeps unknown dims and rejects known conflicts.
    fn validate_static_broadcastable_handles_unknown_dims() {
        let partial = StaticShape::new(vec![None, Some(2)]);
        assert_eq!(
            validate_static_broadcastable(PARAM_CONTEXT, &partial, &StaticShape::scalar()),
            Ok(partial.clone())
        );
        assert!(
            validate_static_broadcastable(PARAM_CONTEXT, &partial, &StaticShape::known(&[3]))
                .is_err()
        );
    }

    #[test]
    // Purpose
    // -------
    // Numeric checks report the first offending entry.
    //
    // Given
    // -----
    // - A stddev array with a zero at index 1 and a NaN mean at index 2.
    //
    // Expect
    // ------
    // - `NonPositiveScale { index: 1 }` and `NonFiniteParam { index: 2 }`.
    fn numeric_checks_report_first_offender() {
        let stddev = array![1.0, 0.0, -1.0].into_dyn();
        assert_eq!(
            validate_positive_scale(&stddev),
            Err(DistError::NonPositiveScale { index: 1, value: 0.0 })
        );

        let mean = array![0.0, 1.0, f64::NAN].into_dyn();
        assert!(matches!(
            validate_finite("mean", &mean),
            Err(DistError::NonFiniteParam { param: "mean", index: 2, .. })
        ));

        assert!(validate_positive_scale(&array![0.5, 2.0].into_dyn()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Grouping may cover all dims but not more.
    fn validate_event_ndims_bounds_by_rank() {
        assert!(validate_event_ndims(0, 0).is_ok());
        assert!(validate_event_ndims(2, 2).is_ok());
        assert_eq!(
            validate_event_ndims(3, 2),
            Err(DistError::InvalidEventNdims { requested: 3, ndim: 2 })
        );
    }
}
