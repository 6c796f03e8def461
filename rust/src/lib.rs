//! Rust implementation of the qsched circuit-scheduling data types and passes.
//!
//! This module provides the wire-level operation graph, duration lookup, and
//! the scheduling passes (ASAP placement and idle-wire removal) for the
//! scheduling system.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod config;
pub mod dag;
pub mod durations;
pub mod logging;
mod models;
pub mod scheduling;

pub use config::ScheduleConfig;
pub use dag::{CircuitDag, DagError, NodeId};
pub use durations::{DurationProvider, InstructionDurations};
pub use models::{Condition, Instruction, OpNode, Register, TimeUnit, Wire};
pub use scheduling::{AsapScheduler, RemoveIdleWires, ScheduleError, WireTimeline};

/// Run the ASAP scheduling pass.
///
/// Produces a new, fully timed circuit: every operation starts as soon as
/// all wires it touches are free, idle gaps are filled with delays, and the
/// total duration is recorded on the result. The input circuit is not
/// modified.
///
/// # Arguments
/// * `dag` - Physical circuit to schedule
/// * `durations` - Duration table for instruction lookup
/// * `config` - Scheduling context (default unit, verbosity)
/// * `time_unit` - Unit override for this run
///
/// # Raises
/// * ValueError if the circuit is not mapped to physical qubits or a
///   duration cannot be resolved
#[pyfunction]
#[pyo3(signature = (dag, durations, config=None, time_unit=None))]
fn schedule_asap(
    dag: CircuitDag,
    durations: InstructionDurations,
    config: Option<ScheduleConfig>,
    time_unit: Option<TimeUnit>,
) -> PyResult<CircuitDag> {
    let scheduler = AsapScheduler::with_config(&durations, config.unwrap_or_default());
    scheduler
        .run(&dag, time_unit)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Remove wires that carry nothing but delays from a scheduled circuit and
/// recompute its total duration.
///
/// # Raises
/// * ValueError if the circuit has not been scheduled
#[pyfunction]
#[pyo3(signature = (dag, verbosity=0))]
fn remove_idle_wires(mut dag: CircuitDag, verbosity: u8) -> PyResult<CircuitDag> {
    RemoveIdleWires::with_verbosity(verbosity)
        .run(&mut dag)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(dag)
}

/// The qsched.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Wire>()?;
    m.add_class::<TimeUnit>()?;
    m.add_class::<Register>()?;
    m.add_class::<Instruction>()?;
    m.add_class::<Condition>()?;
    m.add_class::<OpNode>()?;
    m.add_class::<CircuitDag>()?;
    m.add_class::<InstructionDurations>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;

    // Passes
    m.add_function(wrap_pyfunction!(schedule_asap, m)?)?;
    m.add_function(wrap_pyfunction!(remove_idle_wires, m)?)?;

    Ok(())
}
