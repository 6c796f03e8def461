//! Core data types for the circuit scheduling system.

use pyo3::prelude::*;

/// One physical wire of a circuit, quantum or classical.
///
/// A wire is identified by its kind and index only; it is the key into the
/// scheduler's availability map and is never compared by payload.
#[pyclass(eq)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wire {
    Qubit(u32),
    Clbit(u32),
}

impl Wire {
    /// Index of the wire within its kind.
    pub fn index(self) -> u32 {
        match self {
            Wire::Qubit(i) | Wire::Clbit(i) => i,
        }
    }

    pub fn is_qubit(self) -> bool {
        matches!(self, Wire::Qubit(_))
    }
}

#[pymethods]
impl Wire {
    #[pyo3(name = "index")]
    fn py_index(&self) -> u32 {
        self.index()
    }

    #[pyo3(name = "is_qubit")]
    fn py_is_qubit(&self) -> bool {
        self.is_qubit()
    }

    fn __repr__(&self) -> String {
        match self {
            Wire::Qubit(i) => format!("Qubit({})", i),
            Wire::Clbit(i) => format!("Clbit({})", i),
        }
    }
}

/// Measurement basis for instruction durations.
///
/// `Dt` counts discrete hardware steps; durations expressed in it are
/// expected to be integral, which is enforced by whoever constructs the
/// instruction, not by the scheduler. The remaining units are continuous.
#[pyclass(eq)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    #[default]
    Dt,
    S,
    Ms,
    Us,
    Ns,
    Ps,
}

impl TimeUnit {
    /// Scale to seconds, or None for the discrete-step unit.
    pub fn seconds_factor(self) -> Option<f64> {
        match self {
            TimeUnit::Dt => None,
            TimeUnit::S => Some(1.0),
            TimeUnit::Ms => Some(1e-3),
            TimeUnit::Us => Some(1e-6),
            TimeUnit::Ns => Some(1e-9),
            TimeUnit::Ps => Some(1e-12),
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TimeUnit::Dt => "dt",
            TimeUnit::S => "s",
            TimeUnit::Ms => "ms",
            TimeUnit::Us => "us",
            TimeUnit::Ns => "ns",
            TimeUnit::Ps => "ps",
        };
        write!(f, "{}", s)
    }
}

#[pymethods]
impl TimeUnit {
    fn __repr__(&self) -> String {
        format!("TimeUnit.{:?}", self)
    }
}

/// A named group of wires.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub size: u32,
}

#[pymethods]
impl Register {
    #[new]
    fn new(name: String, size: u32) -> Self {
        Self { name, size }
    }

    fn __repr__(&self) -> String {
        format!("Register(name={:?}, size={})", self.name, self.size)
    }
}

/// An instruction payload with optional timing.
///
/// `duration` is None until a scheduling pass resolves it; scheduled graphs
/// only ever contain fully timed instructions.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: Option<f64>,
    #[pyo3(get, set)]
    pub unit: TimeUnit,
}

impl Instruction {
    /// Instruction name reserved for idle fill.
    pub const DELAY: &'static str = "delay";

    /// An untimed gate-style instruction.
    pub fn gate(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: None,
            unit: TimeUnit::Dt,
        }
    }

    /// An idle-fill instruction of the given duration.
    ///
    /// Delays carry their duration themselves rather than looking it up in a
    /// duration table.
    pub fn delay(duration: f64, unit: TimeUnit) -> Self {
        Self {
            name: Self::DELAY.to_string(),
            duration: Some(duration),
            unit,
        }
    }

    /// Whether this instruction represents idle time.
    ///
    /// Idleness is a property of the instruction kind alone; user-authored
    /// waits and scheduler-inserted padding are indistinguishable here.
    pub fn is_delay(&self) -> bool {
        self.name == Self::DELAY
    }
}

#[pymethods]
impl Instruction {
    #[new]
    #[pyo3(signature = (name, duration=None, unit=None))]
    fn new(name: String, duration: Option<f64>, unit: Option<TimeUnit>) -> Self {
        Self {
            name,
            duration,
            unit: unit.unwrap_or_default(),
        }
    }

    #[staticmethod]
    #[pyo3(name = "delay")]
    fn py_delay(duration: f64, unit: TimeUnit) -> Self {
        Self::delay(duration, unit)
    }

    #[pyo3(name = "is_delay")]
    fn py_is_delay(&self) -> bool {
        self.is_delay()
    }

    fn __repr__(&self) -> String {
        format!(
            "Instruction(name={:?}, duration={:?}, unit={})",
            self.name, self.duration, self.unit
        )
    }
}

/// A classical condition gating an operation.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    #[pyo3(get, set)]
    pub clbit: Wire,
    #[pyo3(get, set)]
    pub value: bool,
}

#[pymethods]
impl Condition {
    #[new]
    fn new(clbit: Wire, value: bool) -> Self {
        Self { clbit, value }
    }

    fn __repr__(&self) -> String {
        format!("Condition(clbit={:?}, value={})", self.clbit, self.value)
    }
}

/// One operation of a circuit: a payload bound to its operand wires.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct OpNode {
    #[pyo3(get)]
    pub op: Instruction,
    #[pyo3(get)]
    pub qargs: Vec<Wire>,
    #[pyo3(get)]
    pub cargs: Vec<Wire>,
    #[pyo3(get)]
    pub condition: Option<Condition>,
}

impl OpNode {
    /// All wires this node touches, deduplicated, operands first.
    ///
    /// The condition clbit counts as a touched wire: the operation cannot
    /// start before the condition value is settled.
    pub fn wires(&self) -> Vec<Wire> {
        let mut wires: Vec<Wire> = Vec::with_capacity(self.qargs.len() + self.cargs.len() + 1);
        wires.extend(self.qargs.iter().copied());
        wires.extend(self.cargs.iter().copied());
        if let Some(cond) = &self.condition {
            if !wires.contains(&cond.clbit) {
                wires.push(cond.clbit);
            }
        }
        wires
    }
}

#[pymethods]
impl OpNode {
    #[pyo3(name = "wires")]
    fn py_wires(&self) -> Vec<Wire> {
        self.wires()
    }

    fn __repr__(&self) -> String {
        format!(
            "OpNode(op={:?}, qargs={}, cargs={}, conditioned={})",
            self.op.name,
            self.qargs.len(),
            self.cargs.len(),
            self.condition.is_some()
        )
    }
}
