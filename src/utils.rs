#[cfg(feature = "python-bindings")]
use ndarray::ArrayD;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyAny, PyBool, PyFloat, PyInt},
};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArrayDyn;

#[cfg(feature = "python-bindings")]
use crate::distributions::Tensor;

/// Convert a Python value into a dtype-tagged [`Tensor`].
///
/// Accepts NumPy arrays of float64/float32/int64/int32/bool, Python scalars,
/// and anything `numpy.asarray` understands (lists, pandas objects). The
/// dtype is preserved so that integer and boolean parameters can be rejected
/// downstream with a `TypeError`.
#[cfg(feature = "python-bindings")]
pub fn extract_tensor<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Tensor> {
    if let Some(tensor) = extract_ndarray(raw_data) {
        return Ok(tensor);
    }

    // `bool` is a subclass of `int`, so it must be checked first.
    if raw_data.is_instance_of::<PyBool>() {
        return Ok(Tensor::from(raw_data.extract::<bool>()?));
    }
    if raw_data.is_instance_of::<PyInt>() {
        return Ok(Tensor::from(raw_data.extract::<i64>()?));
    }
    if raw_data.is_instance_of::<PyFloat>() {
        return Ok(Tensor::from(raw_data.extract::<f64>()?));
    }

    let converted = raw_data
        .py()
        .import("numpy")?
        .call_method1("asarray", (raw_data,))
        .map_err(|_| type_error())?;
    extract_ndarray(&converted).ok_or_else(type_error)
}

/// Convert a Python value into a float64 array, casting real and integer
/// inputs. Used for evaluation points, which are not dtype-checked.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<ArrayD<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArrayDyn<'py, f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }
    Ok(extract_tensor(raw_data)?.to_f64())
}

#[cfg(feature = "python-bindings")]
fn extract_ndarray(raw_data: &Bound<'_, PyAny>) -> Option<Tensor> {
    if let Ok(arr) = raw_data.extract::<PyReadonlyArrayDyn<'_, f64>>() {
        return Some(Tensor::F64(arr.as_array().to_owned()));
    }
    if let Ok(arr) = raw_data.extract::<PyReadonlyArrayDyn<'_, f32>>() {
        return Some(Tensor::F32(arr.as_array().to_owned()));
    }
    if let Ok(arr) = raw_data.extract::<PyReadonlyArrayDyn<'_, i64>>() {
        return Some(Tensor::I64(arr.as_array().to_owned()));
    }
    if let Ok(arr) = raw_data.extract::<PyReadonlyArrayDyn<'_, i32>>() {
        return Some(Tensor::I32(arr.as_array().to_owned()));
    }
    if let Ok(arr) = raw_data.extract::<PyReadonlyArrayDyn<'_, bool>>() {
        return Some(Tensor::Bool(arr.as_array().to_owned()));
    }
    None
}

#[cfg(feature = "python-bindings")]
fn type_error() -> PyErr {
    PyTypeError::new_err(
        "expected a numpy.ndarray, a sequence of numbers, or a Python scalar",
    )
}
