//! Densities and entropy of the Normal distribution.
//!
//! For a coordinate with location `μ` and scale `σ`:
//!
//! `log p(x) = -½ ln(2π) - ln σ - ½ (x - μ)² / σ²`
//!
//! Grouping over trailing dims and `prob = exp(log_prob)` are provided by
//! the [`Distribution`](crate::distributions::traits::Distribution) trait on
//! top of [`Normal::coordinate_log_prob`].
use ndarray::{ArrayD, ArrayViewD, IxDyn, Zip};
use statrs::consts::{LN_SQRT_2PI, LN_SQRT_2PIE};

use crate::distributions::{
    core::validation::validate_broadcastable, errors::DistResult, normal::Normal,
};

impl Normal {
    /// Elementwise log-density of `given` broadcast against the batch shape.
    ///
    /// `given` may carry extra leading sample dims, match the batch shape, or
    /// have lower rank than the batch; the result has the broadcast shape.
    ///
    /// # Errors
    /// [`DistError::ShapeMismatch`](crate::distributions::errors::DistError::ShapeMismatch)
    /// if `given` does not broadcast against the batch shape.
    pub(super) fn coordinate_log_prob(
        &self, given: ArrayViewD<'_, f64>,
    ) -> DistResult<ArrayD<f64>> {
        let shape = validate_broadcastable(
            "`given` and the batch shape",
            given.shape(),
            &self.batch_shape,
        )?;
        let mut out = ArrayD::<f64>::zeros(IxDyn(&shape));
        Zip::from(&mut out)
            .and_broadcast(&given)
            .and_broadcast(self.mean())
            .and_broadcast(self.logstd())
            .and_broadcast(self.precision())
            .for_each(|o, &x, &mu, &logstd, &precision| {
                let diff = x - mu;
                *o = -LN_SQRT_2PI - logstd - 0.5 * precision * diff * diff;
            });
        Ok(out)
    }

    /// Differential entropy per coordinate, `½ ln(2πe) + logstd`.
    pub fn entropy(&self) -> ArrayD<f64> {
        self.logstd().mapv(|l| LN_SQRT_2PIE + l)
    }
}
