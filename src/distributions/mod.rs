//! distributions — parametric probability distributions over `ndarray`.
//!
//! Purpose
//! -------
//! Provide the Normal distribution with NumPy-style broadcasting of its
//! parameters, together with the shared machinery it is built on: typed
//! inputs, static/dynamic shapes, deferred parameters, configuration and a
//! family-independent [`Distribution`] trait.
//!
//! Key behaviors
//! -------------
//! - [`Normal`] validates its parameters once at construction and is
//!   immutable afterwards; derived statistics are memoized on first use.
//! - [`DeferredNormal`] describes a Normal whose parameters are fed later and
//!   reports a static batch shape with unknown dims.
//! - Sampling takes an explicit random generator (or [`SampleOpts`]),
//!   densities support grouping trailing dims into joint events, and the
//!   KL-divergence between two Normals is computed in closed form.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters must be real (float32/float64) arrays; integer and boolean
//!   inputs are rejected with [`DistError::InvalidDType`].
//! - Exactly one of `stddev`/`logstd` is supplied per distribution.
//! - Value shapes are empty: every batch coordinate is a univariate Normal.
//!
//! Conventions
//! -----------
//! - Shapes are row-major `Vec<usize>`; broadcasting aligns trailing dims.
//! - Errors are returned as [`DistResult`]; nothing here panics on bad input.
//! - The only logging is `log::debug!` on construction, binding and seeded
//!   sampling.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/integration_normal_pipeline.rs`
//!   exercises the public surface end to end.

pub mod core;
pub mod errors;
pub mod normal;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    DType, Feed, NormalOptions, Param, Placeholder, SampleOpts, StaticShape, Tensor,
};

pub use self::errors::{DistError, DistResult, ErrorKind};

pub use self::normal::{DeferredNormal, Normal, NormalSamples, Scale, ScaleKind};

pub use self::traits::Distribution;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_distributions::distributions::prelude::*;
//
// to import the Normal surface and the `Distribution` trait in one line.

pub mod prelude {
    pub use super::{
        DType, DeferredNormal, DistError, DistResult, Distribution, ErrorKind, Feed, Normal,
        NormalOptions, NormalSamples, Param, Placeholder, SampleOpts, Scale, ScaleKind,
        StaticShape, Tensor,
    };
}
