use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::batch::{self, BatchError, ItemError, first_failure};
use crate::error::Error;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<BatchError> for PyErr {
    fn from(err: BatchError) -> PyErr {
        PyRuntimeError::new_err(err.to_string())
    }
}

impl From<ItemError> for PyErr {
    fn from(err: ItemError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pyfunction]
fn encode<'py>(py: Python<'py>, code_points: Vec<u32>) -> PyResult<Bound<'py, PyBytes>> {
    let bytes = crate::encode(&code_points)?;
    Ok(PyBytes::new(py, &bytes))
}

#[pyfunction]
fn decode(data: &[u8]) -> PyResult<Vec<u32>> {
    Ok(crate::decode(data)?)
}

#[pyfunction]
fn decode_strict(data: &[u8]) -> PyResult<Vec<u32>> {
    Ok(crate::decode_strict(data)?)
}

#[pyfunction]
#[pyo3(signature = (items, jobs = 1))]
fn encode_many<'py>(
    py: Python<'py>,
    items: Vec<Vec<u32>>,
    jobs: usize,
) -> PyResult<Vec<Bound<'py, PyBytes>>> {
    debug_println!("encode_many: {} items, jobs {}", items.len(), jobs);

    let results = py.allow_threads(|| batch::encode_many(&items, jobs))?;
    Ok(first_failure(results)?
        .iter()
        .map(|bytes| PyBytes::new(py, bytes))
        .collect())
}

#[pyfunction]
#[pyo3(signature = (items, jobs = 1))]
fn decode_many(py: Python<'_>, items: Vec<Vec<u8>>, jobs: usize) -> PyResult<Vec<Vec<u32>>> {
    debug_println!("decode_many: {} items, jobs {}", items.len(), jobs);

    let results = py.allow_threads(|| batch::decode_many(&items, jobs))?;
    Ok(first_failure(results)?)
}

#[pymodule]
fn utf32(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__doc__", "UTF-8 <-> UTF-32 conversion")?;
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(decode_strict, m)?)?;
    m.add_function(wrap_pyfunction!(encode_many, m)?)?;
    m.add_function(wrap_pyfunction!(decode_many, m)?)?;
    Ok(())
}
