//! normal — the univariate Normal distribution with broadcastable parameters.
//!
//! Purpose
//! -------
//! Provide [`Normal`], a batch of independent univariate Gaussians whose
//! location (`mean`) and scale (`stddev`, or its logarithm `logstd`) are
//! arrays broadcast against each other. Every coordinate `i` of the batch is
//! `N(mean_i, stddev_i²)`; the value shape is empty.
//!
//! Key behaviors
//! -------------
//! - Construction validates everything eagerly: a scale must be supplied
//!   (exactly one of `stddev`/`logstd`), every parameter must be real, and
//!   shapes must broadcast. No partially built value is observable.
//! - Attributes (`mean`, `stddev`, `logstd`, `var`, `logvar`, `precision`,
//!   `log_precision`) are broadcast to the batch shape. The scale that was not
//!   supplied and the derived statistics are computed on first access and
//!   memoized.
//! - Sampling, densities, entropy and the analytic KL-divergence live in the
//!   [`sampling`], [`density`] and [`kl`] submodules; [`deferred`] covers
//!   parameters whose values arrive later.
//!
//! Invariants & assumptions
//! ------------------------
//! - `stddev == exp(logstd)` to floating-point tolerance, whichever was given.
//! - `stddev > 0` is a caller obligation; it is enforced only when
//!   [`NormalOptions::check_numerics`] is set.
//! - A constructed `Normal` is immutable. Memoization goes through
//!   `OnceLock`, so instances are `Send + Sync` and may be shared freely.
//!
//! Conventions
//! -----------
//! - Arithmetic is `f64`; [`Normal::dtype`] reports the promoted input dtype.
//! - Broadcasting follows NumPy rules (see `core::shape`).
use std::sync::OnceLock;

use ndarray::ArrayD;

use crate::distributions::{
    core::{
        dtype::DType,
        options::NormalOptions,
        shape::StaticShape,
        tensor::Tensor,
        validation::{
            PARAM_CONTEXT, validate_broadcastable, validate_finite, validate_positive_scale,
            validate_real_dtype,
        },
    },
    errors::{DistError, DistResult},
    traits::Distribution,
};

pub mod deferred;
pub mod density;
pub mod kl;
pub mod sampling;

pub use self::deferred::DeferredNormal;
pub use self::sampling::NormalSamples;

/// Which scale parameterisation a distribution was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Stddev,
    LogStd,
}

impl ScaleKind {
    pub const fn name(self) -> &'static str {
        match self {
            ScaleKind::Stddev => "stddev",
            ScaleKind::LogStd => "logstd",
        }
    }
}

/// Scale — the scale parameter in one of its two parameterisations.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale<T> {
    /// Standard deviation, `> 0` elementwise.
    Stddev(T),
    /// Natural log of the standard deviation, any real.
    LogStd(T),
}

impl<T> Scale<T> {
    /// Pick the parameterisation from two optional inputs.
    ///
    /// # Errors
    /// - [`DistError::MissingScale`] if both are `None`.
    /// - [`DistError::ConflictingScale`] if both are `Some`.
    pub fn from_options(stddev: Option<T>, logstd: Option<T>) -> DistResult<Scale<T>> {
        match (stddev, logstd) {
            (Some(s), None) => Ok(Scale::Stddev(s)),
            (None, Some(l)) => Ok(Scale::LogStd(l)),
            (None, None) => Err(DistError::MissingScale),
            (Some(_), Some(_)) => Err(DistError::ConflictingScale),
        }
    }

    pub fn kind(&self) -> ScaleKind {
        match self {
            Scale::Stddev(_) => ScaleKind::Stddev,
            Scale::LogStd(_) => ScaleKind::LogStd,
        }
    }

    pub fn into_parts(self) -> (ScaleKind, T) {
        match self {
            Scale::Stddev(v) => (ScaleKind::Stddev, v),
            Scale::LogStd(v) => (ScaleKind::LogStd, v),
        }
    }

    pub fn as_inner(&self) -> &T {
        match self {
            Scale::Stddev(v) | Scale::LogStd(v) => v,
        }
    }
}

/// Normal — a batch of independent univariate Gaussian distributions.
///
/// Fields
/// ------
/// - `mean`: location, broadcast to `batch_shape`.
/// - `stddev` / `logstd`: exactly one is filled at construction, the other on
///   first access.
/// - `var`, `logvar`, `precision`, `log_precision`: filled on first access.
/// - `scale_kind`: which scale the caller supplied.
/// - `batch_shape`: broadcast of the parameter shapes.
/// - `dtype`: promoted dtype of the inputs.
/// - `opts`: default grouping and numeric-check configuration.
#[derive(Debug, Clone)]
pub struct Normal {
    mean: ArrayD<f64>,
    stddev: OnceLock<ArrayD<f64>>,
    logstd: OnceLock<ArrayD<f64>>,
    var: OnceLock<ArrayD<f64>>,
    logvar: OnceLock<ArrayD<f64>>,
    precision: OnceLock<ArrayD<f64>>,
    log_precision: OnceLock<ArrayD<f64>>,
    scale_kind: ScaleKind,
    batch_shape: Vec<usize>,
    dtype: DType,
    opts: NormalOptions,
}

impl Normal {
    /// `N(mean, stddev²)` with default options.
    ///
    /// ```rust
    /// # use rust_distributions::distributions::prelude::*;
    /// # use ndarray::array;
    /// let dist = Normal::new(array![0.0, 1.0, -2.0], array![1.0, 2.0, 5.0]).unwrap();
    /// assert_eq!(dist.dynamic_batch_shape(), vec![3]);
    ///
    /// // Integer parameters are rejected.
    /// assert!(Normal::new(1_i32, 2_i32).is_err());
    /// ```
    pub fn new(mean: impl Into<Tensor>, stddev: impl Into<Tensor>) -> DistResult<Normal> {
        Normal::with_scale(mean, Scale::Stddev(stddev.into()), NormalOptions::default())
    }

    /// `N(mean, exp(logstd)²)` with default options.
    pub fn with_logstd(mean: impl Into<Tensor>, logstd: impl Into<Tensor>) -> DistResult<Normal> {
        Normal::with_scale(mean, Scale::LogStd(logstd.into()), NormalOptions::default())
    }

    /// Construct from optional scale inputs; exactly one must be `Some`.
    ///
    /// # Errors
    /// - [`DistError::MissingScale`] / [`DistError::ConflictingScale`] for the
    ///   scale selection.
    /// - Everything [`Normal::with_scale`] reports.
    pub fn from_parts(
        mean: impl Into<Tensor>, stddev: Option<Tensor>, logstd: Option<Tensor>,
        opts: NormalOptions,
    ) -> DistResult<Normal> {
        Normal::with_scale(mean, Scale::from_options(stddev, logstd)?, opts)
    }

    /// Construct from an explicit scale parameterisation.
    ///
    /// # Errors
    /// - [`DistError::InvalidDType`] if `mean` or the scale is not real.
    /// - [`DistError::ShapeMismatch`] if their shapes do not broadcast.
    /// - With `opts.check_numerics`: [`DistError::NonFiniteParam`],
    ///   [`DistError::NonPositiveScale`].
    pub fn with_scale(
        mean: impl Into<Tensor>, scale: Scale<Tensor>, opts: NormalOptions,
    ) -> DistResult<Normal> {
        let mean = mean.into();
        let (kind, scale) = scale.into_parts();
        validate_real_dtype("mean", mean.dtype())?;
        validate_real_dtype(kind.name(), scale.dtype())?;
        let dtype = mean.dtype().promote(scale.dtype());
        Normal::from_arrays(mean.to_f64(), kind, scale.to_f64(), dtype, opts)
    }

    /// Shared tail of every constructor, once dtypes are known to be real.
    pub(crate) fn from_arrays(
        mean: ArrayD<f64>, kind: ScaleKind, scale: ArrayD<f64>, dtype: DType, opts: NormalOptions,
    ) -> DistResult<Normal> {
        let batch_shape = validate_broadcastable(PARAM_CONTEXT, mean.shape(), scale.shape())?;
        if opts.check_numerics {
            validate_finite("mean", &mean)?;
            match kind {
                ScaleKind::Stddev => validate_positive_scale(&scale)?,
                ScaleKind::LogStd => validate_finite("logstd", &scale)?,
            }
        }

        let mean = broadcast_to(&mean, &batch_shape)?;
        let scale = broadcast_to(&scale, &batch_shape)?;
        let (stddev, logstd) = match kind {
            ScaleKind::Stddev => (OnceLock::from(scale), OnceLock::new()),
            ScaleKind::LogStd => (OnceLock::new(), OnceLock::from(scale)),
        };

        log::debug!(
            "constructed Normal: batch_shape={batch_shape:?}, scale={}, dtype={dtype}",
            kind.name()
        );

        Ok(Normal {
            mean,
            stddev,
            logstd,
            var: OnceLock::new(),
            logvar: OnceLock::new(),
            precision: OnceLock::new(),
            log_precision: OnceLock::new(),
            scale_kind: kind,
            batch_shape,
            dtype,
            opts,
        })
    }

    pub fn mean(&self) -> &ArrayD<f64> {
        &self.mean
    }

    pub fn stddev(&self) -> &ArrayD<f64> {
        self.stddev.get_or_init(|| self.logstd().mapv(f64::exp))
    }

    pub fn logstd(&self) -> &ArrayD<f64> {
        self.logstd.get_or_init(|| self.stddev().mapv(f64::ln))
    }

    /// Variance, `stddev²`.
    pub fn var(&self) -> &ArrayD<f64> {
        self.var.get_or_init(|| self.stddev().mapv(|s| s * s))
    }

    /// Log-variance, `2 logstd`.
    pub fn logvar(&self) -> &ArrayD<f64> {
        self.logvar.get_or_init(|| self.logstd().mapv(|l| 2.0 * l))
    }

    /// Precision, `1 / var`.
    pub fn precision(&self) -> &ArrayD<f64> {
        self.precision.get_or_init(|| self.var().mapv(f64::recip))
    }

    /// Log-precision, `-logvar`.
    pub fn log_precision(&self) -> &ArrayD<f64> {
        self.log_precision.get_or_init(|| self.logvar().mapv(|l| -l))
    }

    pub fn scale_kind(&self) -> ScaleKind {
        self.scale_kind
    }

    pub fn options(&self) -> NormalOptions {
        self.opts
    }
}

impl Distribution for Normal {
    fn dtype(&self) -> DType {
        self.dtype
    }

    fn is_continuous(&self) -> bool {
        true
    }

    fn is_reparameterized(&self) -> bool {
        true
    }

    fn group_event_ndims(&self) -> usize {
        self.opts.group_event_ndims
    }

    fn static_value_shape(&self) -> StaticShape {
        StaticShape::scalar()
    }

    fn dynamic_value_shape(&self) -> Vec<usize> {
        Vec::new()
    }

    fn static_batch_shape(&self) -> StaticShape {
        StaticShape::known(&self.batch_shape)
    }

    fn dynamic_batch_shape(&self) -> Vec<usize> {
        self.batch_shape.clone()
    }

    fn sample<R: rand::Rng + ?Sized>(&self, sample_shape: &[usize], rng: &mut R) -> ArrayD<f64> {
        self.reparameterized_draw(sample_shape, rng)
    }

    fn elementwise_log_prob(&self, given: ndarray::ArrayViewD<'_, f64>) -> DistResult<ArrayD<f64>> {
        self.coordinate_log_prob(given)
    }
}

/// Materialize `values` at `shape`; `shape` must be a broadcast target of it.
fn broadcast_to(values: &ArrayD<f64>, shape: &[usize]) -> DistResult<ArrayD<f64>> {
    values.broadcast(shape).map(|view| view.to_owned()).ok_or_else(|| DistError::ShapeMismatch {
        context: PARAM_CONTEXT,
        left: values.shape().to_vec(),
        right: shape.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction errors (missing/conflicting scale, dtype, shapes,
    //   numeric checks).
    // - Attribute values under both parameterisations and their broadcast
    //   shapes.
    // - Shape introspection of concrete distributions.
    //
    // They intentionally DO NOT cover:
    // - Sampling, densities and KL; see the submodules.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    fn mean() -> Array1<f64> {
        array![0.0, 1.0, -2.0]
    }

    fn stddev() -> Array1<f64> {
        array![1.0, 2.0, 5.0]
    }

    fn assert_all_close(actual: &ArrayD<f64>, expected: &ArrayD<f64>) {
        assert_eq!(actual.shape(), expected.shape());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = TOL, max_relative = TOL);
        }
    }

    #[test]
    // Purpose
    // -------
    // Missing and conflicting scales are configuration errors.
    //
    // Given
    // -----
    // - `from_parts` with no scale, then with both scales.
    //
    // Expect
    // ------
    // - `MissingScale` and `ConflictingScale` respectively.
    fn from_parts_requires_exactly_one_scale() {
        let opts = NormalOptions::default();

        let missing = Normal::from_parts(1.0, None, None, opts).unwrap_err();
        assert_eq!(missing, DistError::MissingScale);
        assert!(
            missing.to_string().contains("At least one of `stddev`, `logstd` should be specified")
        );

        let both =
            Normal::from_parts(1.0, Some(Tensor::from(1.0)), Some(Tensor::from(0.0)), opts);
        assert_eq!(both.unwrap_err(), DistError::ConflictingScale);
    }

    #[test]
    // Purpose
    // -------
    // Integer parameters are type errors.
    fn integer_parameters_are_rejected() {
        let err = Normal::new(1_i32, 2_i32).unwrap_err();
        assert!(matches!(err, DistError::InvalidDType { param: "mean", .. }));
        assert!(err.to_string().contains("Normal distribution parameters must be real numbers"));

        let err = Normal::new(1.0, 2_i64).unwrap_err();
        assert!(matches!(err, DistError::InvalidDType { param: "stddev", .. }));

        let err = Normal::with_logstd(1.0, true).unwrap_err();
        assert!(matches!(err, DistError::InvalidDType { param: "logstd", .. }));
    }

    #[test]
    // Purpose
    // -------
    // Non-broadcastable parameter shapes are rejected.
    fn mismatched_shapes_are_rejected() {
        let mean = Array1::range(0.0_f32, 2.0, 1.0);
        let stddev = Array1::range(0.0_f32, 3.0, 1.0);

        let err = Normal::new(mean, stddev).unwrap_err();

        assert!(matches!(err, DistError::ShapeMismatch { .. }));
        assert!(err.to_string().contains("`mean` and `stddev`/`logstd` should be broadcastable"));
    }

    #[test]
    // Purpose
    // -------
    // Numeric checks only run when requested.
    fn check_numerics_rejects_non_positive_stddev() {
        let scale = Scale::Stddev(Tensor::from(array![1.0, 0.0]));

        assert!(Normal::with_scale(0.0, scale.clone(), NormalOptions::default()).is_ok());

        let err = Normal::with_scale(0.0, scale, NormalOptions::new(0, true)).unwrap_err();
        assert_eq!(err, DistError::NonPositiveScale { index: 1, value: 0.0 });

        let logstd = Scale::LogStd(Tensor::from(array![0.0, f64::INFINITY]));
        let err = Normal::with_scale(0.0, logstd, NormalOptions::new(0, true)).unwrap_err();
        assert!(matches!(err, DistError::NonFiniteParam { param: "logstd", index: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Attributes agree under both parameterisations.
    //
    // Given
    // -----
    // - mean = [0, 1, -2], stddev = [1, 2, 5], and the same via logstd.
    //
    // Expect
    // ------
    // - stddev, logstd, var, logvar, precision, log_precision match their
    //   closed forms in both cases.
    fn attributes_match_closed_forms_for_both_scales() {
        let by_std = Normal::new(mean(), stddev()).unwrap();
        let by_log = Normal::with_logstd(mean(), stddev().mapv(f64::ln)).unwrap();

        for dist in [&by_std, &by_log] {
            let s = stddev().into_dyn();
            assert_all_close(dist.mean(), &mean().into_dyn());
            assert_all_close(dist.stddev(), &s);
            assert_all_close(dist.logstd(), &s.mapv(f64::ln));
            assert_all_close(dist.var(), &s.mapv(|v| v * v));
            assert_all_close(dist.logvar(), &s.mapv(|v| 2.0 * v.ln()));
            assert_all_close(dist.precision(), &s.mapv(|v| 1.0 / (v * v)));
            assert_all_close(dist.log_precision(), &s.mapv(|v| -2.0 * v.ln()));
        }
        assert_eq!(by_std.scale_kind(), ScaleKind::Stddev);
        assert_eq!(by_log.scale_kind(), ScaleKind::LogStd);
    }

    #[test]
    // Purpose
    // -------
    // Attributes are broadcast to the batch shape and shapes are reported.
    //
    // Given
    // -----
    // - mean of shape [4, 1] with stddev of shape [3].
    //
    // Expect
    // ------
    // - batch shape [4, 3]; every attribute has that shape; value shape empty.
    fn attributes_are_broadcast_to_batch_shape() {
        let mean = array![[0.0], [3.0], [6.0], [9.0]];
        let dist = Normal::new(mean, stddev()).unwrap();

        assert_eq!(dist.dynamic_batch_shape(), vec![4, 3]);
        assert_eq!(dist.static_batch_shape().as_list(), vec![Some(4), Some(3)]);
        assert_eq!(dist.static_value_shape().as_list(), Vec::<Option<usize>>::new());
        assert!(dist.dynamic_value_shape().is_empty());
        assert_eq!(dist.mean().shape(), &[4, 3]);
        assert_eq!(dist.stddev().shape(), &[4, 3]);
        assert_eq!(dist.precision().shape(), &[4, 3]);
        assert_relative_eq!(dist.mean()[[2, 1]], 6.0);
        assert_relative_eq!(dist.stddev()[[2, 1]], 2.0);
    }

    #[test]
    // Purpose
    // -------
    // Mixed float inputs promote; the family metadata is fixed.
    fn dtype_promotes_and_metadata_is_constant() {
        let dist = Normal::new(array![0.0_f32], 1.0_f64).unwrap();
        assert_eq!(dist.dtype(), DType::Float64);
        assert!(dist.is_continuous());
        assert!(dist.is_reparameterized());

        let dist = Normal::new(0.0_f32, 1.0_f32).unwrap();
        assert_eq!(dist.dtype(), DType::Float32);
        assert!(dist.dynamic_batch_shape().is_empty());
    }
}
