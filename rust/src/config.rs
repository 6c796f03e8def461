//! Configuration types for the scheduling passes.

use pyo3::prelude::*;

use crate::models::TimeUnit;

/// Shared scheduling context.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct ScheduleConfig {
    /// Unit used when a pass is not given one explicitly.
    #[pyo3(get, set)]
    pub time_unit: Option<TimeUnit>,
    /// Logging verbosity (0 silent, 1 changes, 2 checks, 3 debug).
    #[pyo3(get, set)]
    pub verbosity: u8,
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (time_unit=None, verbosity=None))]
    fn new(time_unit: Option<TimeUnit>, verbosity: Option<u8>) -> Self {
        Self {
            time_unit,
            verbosity: verbosity.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(time_unit={:?}, verbosity={})",
            self.time_unit, self.verbosity
        )
    }
}
