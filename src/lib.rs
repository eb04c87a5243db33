//! rust_distributions — broadcastable probability distributions with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Normal distribution to Python via the `_rust_distributions`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing class and submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`distributions`) as the public crate
//!   surface.
//! - Define a `#[pyclass]` wrapper around [`Normal`] and the `#[pymodule]`
//!   initializer for the `_rust_distributions` extension.
//! - Register the `distributions` submodule in `sys.modules` so dotted
//!   imports work from Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in [`distributions`]; this file only
//!   performs FFI glue, input conversion, and error mapping.
//! - Python inputs are converted to dtype-tagged tensors before construction,
//!   so integer or boolean parameters raise `TypeError` exactly as they fail
//!   on the Rust side.
//!
//! Conventions
//! -----------
//! - Arrays cross the boundary as `float64` NumPy arrays of dynamic rank.
//! - Errors from core Rust code are converted to `PyErr` via
//!   `From<DistError> for PyErr` (type errors → `TypeError`, everything else
//!   → `ValueError`).
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`distributions`] directly and can
//!   ignore the items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_normal_pipeline.rs`; the bindings are exercised from
//!   Python.

pub mod distributions;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    distributions::{Distribution, Normal, NormalOptions, SampleOpts},
    utils::{extract_f64_array, extract_tensor},
};

/// Normal — Python-facing wrapper for [`Normal`].
///
/// Purpose
/// -------
/// Expose construction, attributes, sampling, densities and the analytic
/// KL-divergence of [`Normal`] to Python callers.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Normal(mean, stddev=None, logstd=None, group_event_ndims=0, check_numerics=False)`:
/// - `mean`: array-like or scalar of floats.
/// - `stddev` / `logstd`: exactly one must be given.
/// - `group_event_ndims`: default grouping for `log_prob` / `prob`.
/// - `check_numerics`: reject non-finite parameters and non-positive `stddev`.
///
/// Notes
/// -----
/// - Native Rust callers should use [`Normal`] directly; this type exists
///   solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "Normal", module = "rust_distributions.distributions", frozen)]
pub struct PyNormal {
    inner: Normal,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyNormal {
    #[new]
    #[pyo3(
        signature = (mean, stddev = None, logstd = None, group_event_ndims = 0, check_numerics = false),
        text_signature = "(mean, /, stddev=None, logstd=None, group_event_ndims=0, check_numerics=False)"
    )]
    pub fn new<'py>(
        mean: &Bound<'py, PyAny>, stddev: Option<&Bound<'py, PyAny>>,
        logstd: Option<&Bound<'py, PyAny>>, group_event_ndims: usize, check_numerics: bool,
    ) -> PyResult<Self> {
        let mean = extract_tensor(mean)?;
        let stddev = stddev.map(extract_tensor).transpose()?;
        let logstd = logstd.map(extract_tensor).transpose()?;
        let opts = NormalOptions::new(group_event_ndims, check_numerics);
        let inner = Normal::from_parts(mean, stddev, logstd, opts)?;
        Ok(PyNormal { inner })
    }

    #[getter]
    pub fn mean<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.mean().clone().into_pyarray(py)
    }

    #[getter]
    pub fn stddev<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.stddev().clone().into_pyarray(py)
    }

    #[getter]
    pub fn logstd<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.logstd().clone().into_pyarray(py)
    }

    #[getter]
    pub fn var<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.var().clone().into_pyarray(py)
    }

    #[getter]
    pub fn logvar<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.logvar().clone().into_pyarray(py)
    }

    #[getter]
    pub fn precision<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.precision().clone().into_pyarray(py)
    }

    #[getter]
    pub fn log_precision<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.log_precision().clone().into_pyarray(py)
    }

    #[getter]
    pub fn batch_shape(&self) -> Vec<usize> {
        self.inner.dynamic_batch_shape()
    }

    #[getter]
    pub fn value_shape(&self) -> Vec<usize> {
        self.inner.dynamic_value_shape()
    }

    #[getter]
    pub fn dtype(&self) -> String {
        self.inner.dtype().to_string()
    }

    /// Draw samples of shape `sample_shape + batch_shape`.
    #[pyo3(signature = (sample_shape = Vec::new(), seed = None))]
    pub fn sample<'py>(
        &self, py: Python<'py>, sample_shape: Vec<usize>, seed: Option<u64>,
    ) -> Bound<'py, PyArrayDyn<f64>> {
        let opts = SampleOpts::new(seed);
        self.inner.sample_with_opts(&sample_shape, &opts).into_pyarray(py)
    }

    #[pyo3(signature = (given, group_event_ndims = None))]
    pub fn log_prob<'py>(
        &self, py: Python<'py>, given: &Bound<'py, PyAny>, group_event_ndims: Option<usize>,
    ) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
        let given = extract_f64_array(given)?;
        Ok(self.inner.log_prob(given.view(), group_event_ndims)?.into_pyarray(py))
    }

    #[pyo3(signature = (given, group_event_ndims = None))]
    pub fn prob<'py>(
        &self, py: Python<'py>, given: &Bound<'py, PyAny>, group_event_ndims: Option<usize>,
    ) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
        let given = extract_f64_array(given)?;
        Ok(self.inner.prob(given.view(), group_event_ndims)?.into_pyarray(py))
    }

    /// Analytic `KL(self || other)`.
    pub fn kl_divergence<'py>(
        &self, py: Python<'py>, other: PyRef<'py, PyNormal>,
    ) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
        Ok(self.inner.kl_divergence(&other.inner)?.into_pyarray(py))
    }

    pub fn entropy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.entropy().into_pyarray(py)
    }
}

/// _rust_distributions — PyO3 module initializer for the Python extension.
///
/// Creates the `distributions` submodule, attaches it to the parent module,
/// and registers it in `sys.modules` so `rust_distributions.distributions`
/// is importable via dotted paths.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_distributions<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let distributions_mod = PyModule::new(_py, "distributions")?;
    distributions(_py, m, &distributions_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_distributions.distributions", distributions_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn distributions<'py>(
    _py: Python, rust_distributions: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyNormal>()?;
    rust_distributions.add_submodule(m)?;
    Ok(())
}
