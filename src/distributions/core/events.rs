//! Event grouping: reduce trailing dimensions into one joint event.
//!
//! A distribution over a batch of independent coordinates can treat its
//! last `k` dimensions as a single event. Log-densities of the grouped
//! coordinates are summed, densities are multiplied.
use ndarray::{ArrayD, Axis};

use crate::distributions::{core::validation::validate_event_ndims, errors::DistResult};

/// How grouped entries are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventReducer {
    Sum,
    Product,
}

/// Reduce the trailing `event_ndims` axes of `values`.
///
/// `event_ndims = 0` returns the input unchanged; `event_ndims = ndim`
/// produces a rank-0 array.
///
/// # Errors
/// [`DistError::InvalidEventNdims`](crate::distributions::errors::DistError::InvalidEventNdims)
/// when `event_ndims > values.ndim()`.
pub fn reduce_event_dims(
    values: ArrayD<f64>, event_ndims: usize, reducer: EventReducer,
) -> DistResult<ArrayD<f64>> {
    validate_event_ndims(event_ndims, values.ndim())?;
    let mut out = values;
    for _ in 0..event_ndims {
        let last = Axis(out.ndim() - 1);
        out = match reducer {
            EventReducer::Sum => out.sum_axis(last),
            EventReducer::Product => out.fold_axis(last, 1.0, |acc, &v| acc * v),
        };
    }
    Ok(out)
}
