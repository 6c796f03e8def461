//! Per-wire availability bookkeeping shared by the scheduling directions.

use rustc_hash::FxHashMap;

use crate::dag::{CircuitDag, DagError};
use crate::models::{Instruction, TimeUnit, Wire};

/// Tracks the next available time of every wire touched so far.
///
/// State is owned by exactly one scheduling run; an untouched wire is
/// available from time 0.
#[derive(Clone, Debug, Default)]
pub struct WireTimeline {
    available: FxHashMap<Wire, f64>,
}

impl WireTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time from which `wire` is free.
    pub fn available_from(&self, wire: Wire) -> f64 {
        self.available.get(&wire).copied().unwrap_or(0.0)
    }

    /// Earliest common start over a set of wires: the max of their
    /// availabilities.
    pub fn ready_time(&self, wires: &[Wire]) -> f64 {
        wires
            .iter()
            .map(|&w| self.available_from(w))
            .fold(0.0, f64::max)
    }

    /// Mark `wire` busy up to `until`.
    pub fn occupy(&mut self, wire: Wire, until: f64) {
        self.available.insert(wire, until);
    }

    /// Latest availability over all touched wires, 0 if none were touched.
    pub fn finish_time(&self) -> f64 {
        self.available.values().copied().fold(0.0, f64::max)
    }

    /// Fill each wire's gap up to `until` with a single delay appended to
    /// `dag`, advancing the wire's availability.
    ///
    /// Emits one delay per wire per call; adjacent idle spans from separate
    /// calls are not coalesced. Wires already at or past `until` are left
    /// alone, so padding never spans wires it does not need to fill.
    pub fn pad_until(
        &mut self,
        dag: &mut CircuitDag,
        wires: &[Wire],
        until: f64,
        unit: TimeUnit,
    ) -> Result<(), DagError> {
        for &wire in wires {
            let available = self.available_from(wire);
            if available < until {
                let idle = Instruction::delay(until - available, unit);
                match wire {
                    Wire::Qubit(_) => dag.apply_operation_back(idle, vec![wire], vec![], None)?,
                    Wire::Clbit(_) => dag.apply_operation_back(idle, vec![], vec![wire], None)?,
                };
                self.occupy(wire, until);
            }
        }
        Ok(())
    }
}
