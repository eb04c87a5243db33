//! Dtype-tagged dynamic-rank arrays.
//!
//! [`Tensor`] is the input currency of the crate: parameters and fed values
//! arrive as a `Tensor` so that the element type can be checked at the
//! construction boundary. `From` impls cover scalars and `ndarray` arrays of
//! every supported element type.
use ndarray::{Array, Array1, ArrayD, Dimension, arr0};

use crate::distributions::core::dtype::DType;

/// Tensor — an `ndarray` array of dynamic rank tagged with its element type.
#[derive(Debug, Clone, PartialEq)]
pub enum Tensor {
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    Bool(ArrayD<bool>),
}

impl Tensor {
    pub fn dtype(&self) -> DType {
        match self {
            Tensor::F32(_) => DType::Float32,
            Tensor::F64(_) => DType::Float64,
            Tensor::I32(_) => DType::Int32,
            Tensor::I64(_) => DType::Int64,
            Tensor::Bool(_) => DType::Bool,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Tensor::F32(a) => a.shape(),
            Tensor::F64(a) => a.shape(),
            Tensor::I32(a) => a.shape(),
            Tensor::I64(a) => a.shape(),
            Tensor::Bool(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Widen to `f64`.
    ///
    /// Defined for every dtype so the conversion itself never fails; the
    /// distribution constructors reject non-real dtypes before calling it.
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            Tensor::F32(a) => a.mapv(f64::from),
            Tensor::F64(a) => a.clone(),
            Tensor::I32(a) => a.mapv(f64::from),
            Tensor::I64(a) => a.mapv(|v| v as f64),
            Tensor::Bool(a) => a.mapv(|v| if v { 1.0 } else { 0.0 }),
        }
    }
}

macro_rules! impl_tensor_from {
    ($elem:ty, $variant:ident) => {
        impl From<$elem> for Tensor {
            fn from(value: $elem) -> Self {
                Tensor::$variant(arr0(value).into_dyn())
            }
        }

        impl<D: Dimension> From<Array<$elem, D>> for Tensor {
            fn from(value: Array<$elem, D>) -> Self {
                Tensor::$variant(value.into_dyn())
            }
        }

        impl From<Vec<$elem>> for Tensor {
            fn from(value: Vec<$elem>) -> Self {
                Tensor::$variant(Array1::from_vec(value).into_dyn())
            }
        }
    };
}

impl_tensor_from!(f32, F32);
impl_tensor_from!(f64, F64);
impl_tensor_from!(i32, I32);
impl_tensor_from!(i64, I64);
impl_tensor_from!(bool, Bool);

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Scalars become rank-0 tensors of the matching dtype.
    fn scalar_conversion_produces_rank_zero() {
        let t = Tensor::from(1.5_f64);
        assert_eq!(t.dtype(), DType::Float64);
        assert_eq!(t.ndim(), 0);

        let t = Tensor::from(2_i32);
        assert_eq!(t.dtype(), DType::Int32);
        assert_eq!(t.to_f64().sum(), 2.0);
    }

    #[test]
    // Purpose
    // -------
    // Arrays keep their shape; f32 data widens exactly to f64.
    fn array_conversion_keeps_shape_and_widens() {
        let t = Tensor::from(array![[1.0_f32, 2.0], [3.0, 4.5]]);
        assert_eq!(t.dtype(), DType::Float32);
        assert_eq!(t.shape(), &[2, 2]);
        assert_eq!(t.to_f64()[[1, 1]], 4.5);
    }

    #[test]
    // Purpose
    // -------
    // Vectors become 1-D tensors.
    fn vec_conversion_is_one_dimensional() {
        let t = Tensor::from(vec![true, false, true]);
        assert_eq!(t.dtype(), DType::Bool);
        assert_eq!(t.shape(), &[3]);
        assert_eq!(t.to_f64().sum(), 2.0);
    }
}
