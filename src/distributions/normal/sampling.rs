//! Sampling from the Normal distribution.
//!
//! Draws use the reparameterisation `x = mean + stddev · z` with
//! `z ~ N(0, 1)` i.i.d., so the output is a deterministic function of the
//! parameters and parameter-free noise. The output shape is
//! `sample_shape ++ batch_shape`.
//!
//! Randomness always comes from a caller-supplied generator, or from one
//! built out of [`SampleOpts`]; there is no hidden global random state.
use ndarray::{ArrayD, IxDyn, Zip};
use rand::Rng;
use rand_distr::{Distribution as RandDistribution, StandardNormal};

use crate::distributions::{
    core::options::SampleOpts, errors::DistResult, normal::Normal, traits::Distribution,
};

/// Samples drawn together with their log-density.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalSamples {
    /// Draws of shape `sample_shape ++ batch_shape`.
    pub samples: ArrayD<f64>,
    /// Log-density of `samples`, grouped as requested.
    pub log_prob: ArrayD<f64>,
}

impl Normal {
    pub(super) fn reparameterized_draw<R: Rng + ?Sized>(
        &self, sample_shape: &[usize], rng: &mut R,
    ) -> ArrayD<f64> {
        let full: Vec<usize> = sample_shape.iter().chain(&self.batch_shape).copied().collect();
        let mut out = ArrayD::<f64>::from_shape_simple_fn(IxDyn(&full), || -> f64 {
            StandardNormal.sample(&mut *rng)
        });
        Zip::from(&mut out)
            .and_broadcast(self.mean())
            .and_broadcast(self.stddev())
            .for_each(|z, &mu, &sigma| *z = mu + sigma * *z);
        out
    }

    /// Draw `n` independent batches: shape `[n] ++ batch_shape`.
    pub fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> ArrayD<f64> {
        self.sample(&[n], rng)
    }

    /// Draw with a generator built from `opts` (seeded or OS entropy).
    pub fn sample_with_opts(&self, sample_shape: &[usize], opts: &SampleOpts) -> ArrayD<f64> {
        log::debug!(
            "sampling Normal: sample_shape={sample_shape:?}, batch_shape={:?}, seed={:?}",
            self.batch_shape,
            opts.seed
        );
        let mut rng = opts.rng();
        self.sample(sample_shape, &mut rng)
    }

    /// Draw and evaluate the log-density of the draws in one call.
    ///
    /// `group_event_ndims = None` uses the configured default grouping.
    pub fn sample_and_log_prob<R: Rng + ?Sized>(
        &self, sample_shape: &[usize], group_event_ndims: Option<usize>, rng: &mut R,
    ) -> DistResult<NormalSamples> {
        let samples = self.sample(sample_shape, rng);
        let log_prob = self.log_prob(samples.view(), group_event_ndims)?;
        Ok(NormalSamples { samples, log_prob })
    }
}
