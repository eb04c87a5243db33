//! The `Distribution` trait: shape and density contract shared by families.
//!
//! Purpose
//! -------
//! Define the operations callers rely on regardless of the distribution
//! family: shape introspection, sampling and (grouped) density evaluation.
//! Implementors provide the elementwise log-density; event grouping and the
//! density/log-density relationship are implemented once here.
//!
//! Key behaviors
//! -------------
//! - [`Distribution::log_prob`] sums the elementwise log-density over the
//!   trailing `group_event_ndims` dimensions.
//! - [`Distribution::prob`] multiplies the elementwise densities over the
//!   same dimensions, so `prob == exp(log_prob)` for every grouping.
//! - `None` for the grouping falls back to
//!   [`Distribution::group_event_ndims`].
//!
//! Conventions
//! -----------
//! - Batch shape: independent, separately parameterised copies.
//! - Value shape: the shape of one atomic draw; empty for univariate
//!   families.
use ndarray::{ArrayD, ArrayViewD};
use rand::Rng;

use crate::distributions::{
    core::{
        dtype::DType,
        events::{EventReducer, reduce_event_dims},
        shape::StaticShape,
    },
    errors::DistResult,
};

pub trait Distribution {
    /// Element type of the (promoted) parameters.
    fn dtype(&self) -> DType;

    fn is_continuous(&self) -> bool;

    /// Whether samples are a differentiable transform of parameter-free noise.
    fn is_reparameterized(&self) -> bool;

    /// Default grouping used when a density call passes `None`.
    fn group_event_ndims(&self) -> usize;

    fn static_value_shape(&self) -> StaticShape;

    fn dynamic_value_shape(&self) -> Vec<usize>;

    fn static_batch_shape(&self) -> StaticShape;

    fn dynamic_batch_shape(&self) -> Vec<usize>;

    /// Draw an array of shape `sample_shape ++ batch_shape ++ value_shape`.
    fn sample<R: Rng + ?Sized>(&self, sample_shape: &[usize], rng: &mut R) -> ArrayD<f64>;

    /// Log-density of every coordinate of `given`, before any grouping.
    ///
    /// `given` must broadcast against the batch shape; the result has the
    /// broadcast shape.
    fn elementwise_log_prob(&self, given: ArrayViewD<'_, f64>) -> DistResult<ArrayD<f64>>;

    /// Log-density with the trailing `group_event_ndims` dims summed.
    fn log_prob(
        &self, given: ArrayViewD<'_, f64>, group_event_ndims: Option<usize>,
    ) -> DistResult<ArrayD<f64>> {
        let k = group_event_ndims.unwrap_or_else(|| self.group_event_ndims());
        reduce_event_dims(self.elementwise_log_prob(given)?, k, EventReducer::Sum)
    }

    /// Density with the trailing `group_event_ndims` dims multiplied.
    fn prob(
        &self, given: ArrayViewD<'_, f64>, group_event_ndims: Option<usize>,
    ) -> DistResult<ArrayD<f64>> {
        let k = group_event_ndims.unwrap_or_else(|| self.group_event_ndims());
        let densities = self.elementwise_log_prob(given)?.mapv_into(f64::exp);
        reduce_event_dims(densities, k, EventReducer::Product)
    }
}
