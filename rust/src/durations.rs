//! Instruction duration lookup.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rustc_hash::FxHashMap;

use crate::models::{Instruction, TimeUnit, Wire};
use crate::scheduling::ScheduleError;

/// Pure lookup from (instruction, qubits, unit) to a duration.
///
/// Implementations must surface an unresolvable combination as an error,
/// never as a silent default.
pub trait DurationProvider {
    fn get(
        &self,
        op: &Instruction,
        qargs: &[Wire],
        unit: TimeUnit,
    ) -> Result<f64, ScheduleError>;
}

/// Convert a duration between units.
///
/// Continuous units convert freely; dt conversion needs the sample period
/// (`dt` in seconds). Returns None when the conversion is not possible.
fn convert(value: f64, from: TimeUnit, to: TimeUnit, dt: Option<f64>) -> Option<f64> {
    if from == to {
        return Some(value);
    }
    let seconds = match from.seconds_factor() {
        Some(factor) => value * factor,
        None => value * dt?,
    };
    match to.seconds_factor() {
        Some(factor) => Some(seconds / factor),
        None => Some(seconds / dt?),
    }
}

/// Duration table keyed by instruction name with optional per-qubit entries.
///
/// Qubit-specific entries take precedence over generic ones. Delays resolve
/// to the duration they carry themselves.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct InstructionDurations {
    entries: FxHashMap<(String, Option<Vec<u32>>), (f64, TimeUnit)>,
    /// Sample period in seconds, required for dt conversions.
    dt: Option<f64>,
}

impl InstructionDurations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dt(dt: f64) -> Self {
        Self {
            entries: FxHashMap::default(),
            dt: Some(dt),
        }
    }

    /// Register a duration for an instruction name, optionally pinned to a
    /// concrete qubit tuple.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        qubits: Option<Vec<u32>>,
        duration: f64,
        unit: TimeUnit,
    ) {
        self.entries.insert((name.into(), qubits), (duration, unit));
    }

    fn lookup(&self, name: &str, qubits: &[u32]) -> Option<(f64, TimeUnit)> {
        self.entries
            .get(&(name.to_string(), Some(qubits.to_vec())))
            .or_else(|| self.entries.get(&(name.to_string(), None)))
            .copied()
    }
}

impl DurationProvider for InstructionDurations {
    fn get(
        &self,
        op: &Instruction,
        qargs: &[Wire],
        unit: TimeUnit,
    ) -> Result<f64, ScheduleError> {
        let qubits: Vec<u32> = qargs.iter().map(|w| w.index()).collect();
        let unresolved = || ScheduleError::UnknownDuration {
            name: op.name.clone(),
            qubits: qubits.clone(),
            unit,
        };

        if op.is_delay() {
            let carried = op.duration.ok_or_else(unresolved)?;
            return convert(carried, op.unit, unit, self.dt).ok_or_else(unresolved);
        }

        let (value, entry_unit) = self.lookup(&op.name, &qubits).ok_or_else(unresolved)?;
        convert(value, entry_unit, unit, self.dt).ok_or_else(unresolved)
    }
}

#[pymethods]
impl InstructionDurations {
    #[new]
    #[pyo3(signature = (dt=None))]
    fn py_new(dt: Option<f64>) -> Self {
        Self {
            entries: FxHashMap::default(),
            dt,
        }
    }

    #[pyo3(name = "add", signature = (name, qubits, duration, unit))]
    fn py_add(&mut self, name: String, qubits: Option<Vec<u32>>, duration: f64, unit: TimeUnit) {
        self.add(name, qubits, duration, unit);
    }

    #[pyo3(name = "get", signature = (op, qargs, unit))]
    fn py_get(&self, op: Instruction, qargs: Vec<Wire>, unit: TimeUnit) -> PyResult<f64> {
        DurationProvider::get(self, &op, &qargs, unit)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "InstructionDurations(entries={}, dt={:?})",
            self.entries.len(),
            self.dt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_lookup() {
        let mut durations = InstructionDurations::new();
        durations.add("x", None, 160.0, TimeUnit::Dt);

        let got = durations
            .get(&Instruction::gate("x"), &[Wire::Qubit(3)], TimeUnit::Dt)
            .unwrap();
        assert_eq!(got, 160.0);
    }

    #[test]
    fn test_qubit_specific_entry_wins() {
        let mut durations = InstructionDurations::new();
        durations.add("cx", None, 800.0, TimeUnit::Dt);
        durations.add("cx", Some(vec![0, 1]), 720.0, TimeUnit::Dt);

        let on_0_1 = durations
            .get(
                &Instruction::gate("cx"),
                &[Wire::Qubit(0), Wire::Qubit(1)],
                TimeUnit::Dt,
            )
            .unwrap();
        let on_1_2 = durations
            .get(
                &Instruction::gate("cx"),
                &[Wire::Qubit(1), Wire::Qubit(2)],
                TimeUnit::Dt,
            )
            .unwrap();
        assert_eq!(on_0_1, 720.0);
        assert_eq!(on_1_2, 800.0);
    }

    #[test]
    fn test_unknown_instruction_is_an_error() {
        let durations = InstructionDurations::new();
        let err = durations
            .get(&Instruction::gate("rz"), &[Wire::Qubit(0)], TimeUnit::Dt)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownDuration { .. }));
    }

    #[test]
    fn test_delay_resolves_to_carried_duration() {
        let durations = InstructionDurations::new();
        let got = durations
            .get(
                &Instruction::delay(300.0, TimeUnit::Dt),
                &[Wire::Qubit(0)],
                TimeUnit::Dt,
            )
            .unwrap();
        assert_eq!(got, 300.0);
    }

    #[test]
    fn test_continuous_unit_conversion() {
        let mut durations = InstructionDurations::new();
        durations.add("x", None, 35.5, TimeUnit::Ns);

        let in_us = durations
            .get(&Instruction::gate("x"), &[Wire::Qubit(0)], TimeUnit::Us)
            .unwrap();
        assert!((in_us - 0.0355).abs() < 1e-12);
    }

    #[test]
    fn test_dt_conversion_requires_sample_period() {
        let mut without_dt = InstructionDurations::new();
        without_dt.add("x", None, 35.5, TimeUnit::Ns);
        let err = without_dt
            .get(&Instruction::gate("x"), &[Wire::Qubit(0)], TimeUnit::Dt)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownDuration { .. }));

        let mut with_dt = InstructionDurations::with_dt(0.5e-9);
        with_dt.add("x", None, 35.5, TimeUnit::Ns);
        let in_dt = with_dt
            .get(&Instruction::gate("x"), &[Wire::Qubit(0)], TimeUnit::Dt)
            .unwrap();
        assert!((in_dt - 71.0).abs() < 1e-9);
    }
}
