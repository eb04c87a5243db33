//! core — shared building blocks for distributions.
//!
//! Purpose
//! -------
//! Collect the pieces every distribution needs independently of its family:
//! dtype tags, dtype-tagged input arrays, static/dynamic shape handling,
//! deferred (placeholder-backed) parameters, configuration, validation and
//! event grouping.
//!
//! Key behaviors
//! -------------
//! - [`Tensor`] and [`DType`] carry element types to the construction
//!   boundary so non-real inputs are rejected rather than cast.
//! - [`StaticShape`] with [`broadcast_shapes`] / [`broadcast_static_shapes`]
//!   implement NumPy broadcasting, including unknown dimensions.
//! - [`Param`], [`Placeholder`] and [`Feed`] describe parameters whose
//!   values arrive later.
//! - [`NormalOptions`] and [`SampleOpts`] hold configuration.
//! - [`reduce_event_dims`] groups trailing dimensions into joint events.
//!
//! Conventions
//! -----------
//! - All numeric work is done in `f64` on `ndarray::ArrayD`.
//! - This module performs no I/O and no logging; failures are reported as
//!   [`DistError`](crate::distributions::errors::DistError).

pub mod dtype;
pub mod events;
pub mod options;
pub mod param;
pub mod shape;
pub mod tensor;
pub mod validation;

pub use self::dtype::DType;
pub use self::events::{EventReducer, reduce_event_dims};
pub use self::options::{NormalOptions, SampleOpts};
pub use self::param::{Feed, Param, Placeholder};
pub use self::shape::{StaticShape, broadcast_shapes, broadcast_static_shapes};
pub use self::tensor::Tensor;
