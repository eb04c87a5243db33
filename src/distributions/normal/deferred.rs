//! Normal distributions over deferred (placeholder-backed) parameters.
//!
//! Purpose
//! -------
//! Describe a Normal whose parameters may not have values yet, e.g. a
//! location whose leading (batch-size) dimension is only known when data
//! arrives. The description is validated as far as the static information
//! allows, reports a static batch shape with unknown dims, and is turned into
//! a concrete [`Normal`] by binding a [`Feed`].
//!
//! Key behaviors
//! -------------
//! - Construction checks dtypes and *static* broadcast compatibility with
//!   the same error taxonomy as [`Normal`].
//! - [`DeferredNormal::static_batch_shape`] keeps unknown dims unknown.
//! - [`DeferredNormal::dynamic_batch_shape`] and [`DeferredNormal::bind`]
//!   resolve the parameters from a feed; everything else (sampling,
//!   densities, KL) happens on the bound [`Normal`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Binding re-runs full (dynamic) validation, so a fed value that is
//!   compatible with the placeholder but not with the other parameter is
//!   still rejected.
//! - Fed values are cast to their placeholder's declared dtype. The bound
//!   [`Normal`] therefore reports the dtype promoted from the declarations
//!   (e.g. `float32` for a `float32` placeholder fed `float64` or `int64`
//!   data), never one derived from the fed values.
use crate::distributions::{
    core::{
        dtype::DType,
        options::NormalOptions,
        param::{Feed, Param},
        shape::StaticShape,
        validation::{
            PARAM_CONTEXT, validate_broadcastable, validate_real_dtype,
            validate_static_broadcastable,
        },
    },
    errors::DistResult,
    normal::{Normal, Scale},
};

/// DeferredNormal — a Normal description whose parameters may be placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredNormal {
    mean: Param,
    scale: Scale<Param>,
    batch_shape: StaticShape,
    dtype: DType,
    opts: NormalOptions,
}

impl DeferredNormal {
    /// Describe `N(mean, scale)`.
    ///
    /// # Errors
    /// - [`DistError::InvalidDType`](crate::distributions::errors::DistError::InvalidDType)
    ///   for non-real parameters (declared dtype for placeholders).
    /// - [`DistError::StaticShapeMismatch`] if the static shapes cannot
    ///   broadcast.
    ///
    /// [`DistError::StaticShapeMismatch`]: crate::distributions::errors::DistError::StaticShapeMismatch
    pub fn new(
        mean: impl Into<Param>, scale: Scale<Param>, opts: NormalOptions,
    ) -> DistResult<DeferredNormal> {
        let mean = mean.into();
        let kind = scale.kind();
        validate_real_dtype("mean", mean.dtype())?;
        validate_real_dtype(kind.name(), scale.as_inner().dtype())?;
        let batch_shape = validate_static_broadcastable(
            PARAM_CONTEXT,
            &mean.static_shape(),
            &scale.as_inner().static_shape(),
        )?;
        let dtype = mean.dtype().promote(scale.as_inner().dtype());
        Ok(DeferredNormal { mean, scale, batch_shape, dtype, opts })
    }

    /// Describe from optional scale inputs; exactly one must be `Some`.
    pub fn from_parts(
        mean: impl Into<Param>, stddev: Option<Param>, logstd: Option<Param>,
        opts: NormalOptions,
    ) -> DistResult<DeferredNormal> {
        DeferredNormal::new(mean, Scale::from_options(stddev, logstd)?, opts)
    }

    pub fn mean(&self) -> &Param {
        &self.mean
    }

    pub fn scale(&self) -> &Scale<Param> {
        &self.scale
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn static_value_shape(&self) -> StaticShape {
        StaticShape::scalar()
    }

    pub fn dynamic_value_shape(&self) -> Vec<usize> {
        Vec::new()
    }

    /// Broadcast of the parameters' static shapes; unknown dims stay `None`.
    pub fn static_batch_shape(&self) -> StaticShape {
        self.batch_shape.clone()
    }

    /// Batch shape with every dim resolved from `feed`.
    pub fn dynamic_batch_shape(&self, feed: &Feed) -> DistResult<Vec<usize>> {
        let mean = self.mean.resolve(feed)?;
        let scale = self.scale.as_inner().resolve(feed)?;
        validate_broadcastable(PARAM_CONTEXT, mean.shape(), scale.shape())
    }

    /// Resolve every parameter from `feed` and build the concrete [`Normal`].
    pub fn bind(&self, feed: &Feed) -> DistResult<Normal> {
        let mean = self.mean.resolve(feed)?;
        let kind = self.scale.kind();
        let scale = self.scale.as_inner().resolve(feed)?;
        log::debug!(
            "binding deferred Normal: static_batch_shape={}, mean={:?}, {}={:?}",
            self.batch_shape,
            mean.shape(),
            kind.name(),
            scale.shape()
        );
        Normal::from_arrays(mean, kind, scale, self.dtype, self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{
        core::param::Placeholder, errors::DistError, traits::Distribution,
    };
    use ndarray::{Array2, array};
    use rand::{SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Static batch shapes with an unknown leading dimension.
    // - Dynamic resolution through a feed and binding to a `Normal`.
    // - Construction and binding errors.
    // -------------------------------------------------------------------------

    fn batch_mean() -> Placeholder {
        Placeholder::new("mean", DType::Float32, vec![None, Some(2)])
    }

    #[test]
    // Purpose
    // -------
    // The unknown batch dim is unknown statically and resolved by the feed.
    //
    // Given
    // -----
    // - mean: placeholder `[?, 2]`, stddev: scalar 1.0.
    // - A feed with a 3×2 mean.
    //
    // Expect
    // ------
    // - static batch shape `[?, 2]`, value shapes empty.
    // - dynamic batch shape `[3, 2]`.
    fn static_and_dynamic_batch_shapes() {
        // Arrange
        let dist =
            DeferredNormal::new(batch_mean(), Scale::Stddev(Param::from(1.0)), Default::default())
                .unwrap();
        let fed = Array2::from_shape_fn((3, 2), |(i, j)| (2 * i + j) as f64);
        let feed = Feed::new().with("mean", fed);

        // Act
        let dynamic = dist.dynamic_batch_shape(&feed).unwrap();

        // Assert
        assert_eq!(dist.static_batch_shape().as_list(), vec![None, Some(2)]);
        assert!(dist.static_value_shape().as_list().is_empty());
        assert!(dist.dynamic_value_shape().is_empty());
        assert_eq!(dynamic, vec![3, 2]);
        assert_eq!(dist.dtype(), DType::Float64);
    }

    #[test]
    // Purpose
    // -------
    // A bound distribution samples at the fed batch size.
    fn bound_distribution_samples_at_fed_batch_shape() {
        let dist =
            DeferredNormal::new(batch_mean(), Scale::LogStd(Param::from(0.0)), Default::default())
                .unwrap();
        let feed = Feed::new().with("mean", Array2::<f32>::zeros((5, 2)));
        let mut rng = StdRng::seed_from_u64(5);

        let normal = dist.bind(&feed).unwrap();
        let samples = normal.sample(&[4], &mut rng);

        assert_eq!(normal.dynamic_batch_shape(), vec![5, 2]);
        assert_eq!(samples.shape(), &[4, 5, 2]);
        assert!(normal.stddev().iter().all(|&s| (s - 1.0).abs() < 1e-15));
    }

    #[test]
    // Purpose
    // -------
    // The bound distribution keeps the declared dtype, whatever is fed.
    //
    // Given
    // -----
    // - float32 mean placeholder `[?, 2]` and float32 logstd 0.
    // - Feeds of int64 and of float64 data.
    //
    // Expect
    // ------
    // - Both bind; the bound dtype is float32 in both cases.
    fn bound_dtype_follows_declarations() {
        let dist = DeferredNormal::new(
            batch_mean(),
            Scale::LogStd(Param::from(0.0_f32)),
            Default::default(),
        )
        .unwrap();
        let ints = Feed::new().with("mean", Array2::<i64>::ones((3, 2)));
        let doubles = Feed::new().with("mean", Array2::<f64>::ones((4, 2)));

        let from_ints = dist.bind(&ints).unwrap();
        let from_doubles = dist.bind(&doubles).unwrap();

        assert_eq!(dist.dtype(), DType::Float32);
        assert_eq!(from_ints.dtype(), DType::Float32);
        assert_eq!(from_doubles.dtype(), DType::Float32);
        assert_eq!(from_ints.dynamic_batch_shape(), vec![3, 2]);
        assert!(from_ints.mean().iter().all(|&m| m == 1.0));
    }

    #[test]
    // Purpose
    // -------
    // Construction errors mirror the concrete constructor.
    fn construction_errors_mirror_normal() {
        let opts = NormalOptions::default();

        assert_eq!(
            DeferredNormal::from_parts(batch_mean(), None, None, opts).unwrap_err(),
            DistError::MissingScale
        );

        let int_mean = Placeholder::new("mean", DType::Int32, vec![None]);
        assert!(matches!(
            DeferredNormal::new(int_mean, Scale::Stddev(Param::from(1.0)), opts),
            Err(DistError::InvalidDType { param: "mean", .. })
        ));

        assert!(matches!(
            DeferredNormal::new(
                batch_mean(),
                Scale::Stddev(Param::from(array![1.0, 2.0, 3.0])),
                opts
            ),
            Err(DistError::StaticShapeMismatch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Binding fails for missing or inconsistent feeds.
    fn bind_rejects_missing_and_inconsistent_feeds() {
        let stddev = Placeholder::new("stddev", DType::Float64, vec![None]);
        let dist = DeferredNormal::new(
            batch_mean(),
            Scale::Stddev(Param::from(stddev)),
            Default::default(),
        )
        .unwrap();
        assert_eq!(dist.static_batch_shape().as_list(), vec![None, Some(2)]);

        let partial = Feed::new().with("mean", Array2::<f64>::zeros((3, 2)));
        assert_eq!(
            dist.bind(&partial).unwrap_err(),
            DistError::UnboundPlaceholder { name: "stddev".into() }
        );

        let inconsistent = partial.with("stddev", array![1.0, 2.0, 3.0]);
        assert!(matches!(dist.bind(&inconsistent), Err(DistError::ShapeMismatch { .. })));
    }
}
