//! Deferred parameters: placeholders and feeds.
//!
//! Purpose
//! -------
//! Let a distribution be *described* before all of its parameter values are
//! known. A [`Placeholder`] declares a named input with a dtype and a
//! possibly partial static shape; a [`Feed`] supplies the concrete values
//! when the description is evaluated.
//!
//! Key behaviors
//! -------------
//! - [`Param`] is either a concrete [`Tensor`] or a [`Placeholder`] and
//!   reports its static shape and dtype without evaluation.
//! - [`Param::resolve`] looks the value up in a [`Feed`], checks it against
//!   the declared shape, and casts it to the placeholder's declared dtype
//!   (held in `f64` storage).
//!
//! Invariants & assumptions
//! ------------------------
//! - A fed value must have the placeholder's rank and agree with every
//!   statically-known dimension. Its own dtype is irrelevant: integer, bool
//!   and float values are all cast to the declared dtype, so a `float32`
//!   placeholder fed `float64` data is rounded to `float32` precision.
//! - Feeds are plain maps; a name that no placeholder refers to is ignored.
use std::collections::HashMap;

use ndarray::{Array, ArrayD, Dimension};

use crate::distributions::{
    core::{dtype::DType, shape::StaticShape, tensor::Tensor},
    errors::{DistError, DistResult},
};

/// Placeholder — a named parameter whose value is fed at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub name: String,
    pub dtype: DType,
    pub shape: StaticShape,
}

impl Placeholder {
    /// Declare a placeholder. `shape` entries set to `None` are unknown
    /// until a value is fed.
    pub fn new(name: impl Into<String>, dtype: DType, shape: Vec<Option<usize>>) -> Placeholder {
        Placeholder { name: name.into(), dtype, shape: StaticShape::new(shape) }
    }
}

/// Param — a concrete value or a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Value(Tensor),
    Placeholder(Placeholder),
}

impl Param {
    pub fn dtype(&self) -> DType {
        match self {
            Param::Value(t) => t.dtype(),
            Param::Placeholder(p) => p.dtype,
        }
    }

    pub fn static_shape(&self) -> StaticShape {
        match self {
            Param::Value(t) => StaticShape::known(t.shape()),
            Param::Placeholder(p) => p.shape.clone(),
        }
    }

    /// Resolve to a concrete `f64` array, consulting `feed` for placeholders.
    ///
    /// # Errors
    /// - [`DistError::UnboundPlaceholder`] if the placeholder is not fed.
    /// - [`DistError::FeedShapeMismatch`] if the fed shape contradicts the
    ///   declared static shape.
    pub fn resolve(&self, feed: &Feed) -> DistResult<ArrayD<f64>> {
        match self {
            Param::Value(t) => Ok(t.to_f64()),
            Param::Placeholder(p) => {
                let value = feed
                    .get(&p.name)
                    .ok_or_else(|| DistError::UnboundPlaceholder { name: p.name.clone() })?;
                if !p.shape.is_compatible_with(value.shape()) {
                    return Err(DistError::FeedShapeMismatch {
                        name: p.name.clone(),
                        expected: p.shape.clone(),
                        actual: value.shape().to_vec(),
                    });
                }
                Ok(cast_to(value.to_f64(), p.dtype))
            }
        }
    }
}

/// Round `values` to the precision of `dtype`.
fn cast_to(values: ArrayD<f64>, dtype: DType) -> ArrayD<f64> {
    match dtype {
        DType::Float32 => values.mapv_into(|v| v as f32 as f64),
        _ => values,
    }
}

impl From<Tensor> for Param {
    fn from(value: Tensor) -> Self {
        Param::Value(value)
    }
}

macro_rules! impl_param_from {
    ($($elem:ty),*) => {
        $(
            impl From<$elem> for Param {
                fn from(value: $elem) -> Self {
                    Param::Value(value.into())
                }
            }

            impl<D: Dimension> From<Array<$elem, D>> for Param {
                fn from(value: Array<$elem, D>) -> Self {
                    Param::Value(value.into())
                }
            }

            impl From<Vec<$elem>> for Param {
                fn from(value: Vec<$elem>) -> Self {
                    Param::Value(value.into())
                }
            }
        )*
    };
}

impl_param_from!(f32, f64, i32, i64, bool);

impl From<Placeholder> for Param {
    fn from(value: Placeholder) -> Self {
        Param::Placeholder(value)
    }
}

/// Feed — values for placeholders, keyed by placeholder name.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    values: HashMap<String, Tensor>,
}

impl Feed {
    pub fn new() -> Feed {
        Feed::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Tensor>) -> Feed {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Tensor>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.values.get(name)
    }
}
