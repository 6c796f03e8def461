//! Pass removing wires that carry nothing but idle fill.

use crate::dag::CircuitDag;
use crate::log_changes;

use super::ScheduleError;

/// Deletes every wire whose operation sequence is all delays and recomputes
/// the total schedule duration from what remains.
///
/// Runs on scheduled circuits only and mutates the graph in place. Delays
/// are single-wire by construction, so removing an all-idle wire never gates
/// an operation on another wire. Idempotent.
#[derive(Debug, Default)]
pub struct RemoveIdleWires {
    verbosity: u8,
}

impl RemoveIdleWires {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(verbosity: u8) -> Self {
        Self { verbosity }
    }

    pub fn run(&self, dag: &mut CircuitDag) -> Result<(), ScheduleError> {
        if dag.duration.is_none() {
            return Err(ScheduleError::NotScheduled);
        }

        let wires: Vec<_> = dag.wires().collect();
        let mut removed = false;

        for &wire in &wires {
            let ids = dag.nodes_on_wire(wire).to_vec();
            if ids.is_empty() {
                continue;
            }
            let idling = ids
                .iter()
                .all(|&id| dag.node(id).is_some_and(|n| n.op.is_delay()));
            if !idling {
                continue;
            }
            for id in ids {
                dag.remove_op_node(id)?;
            }
            removed = true;
            log_changes!(self.verbosity, "  Removed idle wire {:?}", wire);
        }

        // duration must be recomputed once any delay is gone
        if removed {
            let mut circuit_duration = 0.0_f64;
            for &wire in &wires {
                let wire_total: f64 = dag
                    .ops_on_wire(wire)
                    .map(|n| n.op.duration.unwrap_or(0.0))
                    .sum();
                circuit_duration = circuit_duration.max(wire_total);
            }
            dag.duration = Some(circuit_duration);
            log_changes!(
                self.verbosity,
                "Recomputed circuit duration: {} {}",
                circuit_duration,
                dag.unit
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::durations::InstructionDurations;
    use crate::models::{Instruction, Register, TimeUnit, Wire};
    use crate::scheduling::AsapScheduler;

    fn physical_dag(qubits: u32, clbits: u32) -> CircuitDag {
        let mut dag = CircuitDag::new();
        dag.add_qreg(Register {
            name: "q".to_string(),
            size: qubits,
        });
        if clbits > 0 {
            dag.add_creg(Register {
                name: "c".to_string(),
                size: clbits,
            });
        }
        dag
    }

    fn schedule(dag: &CircuitDag, durations: &InstructionDurations) -> CircuitDag {
        AsapScheduler::new(durations).run(dag, None).unwrap()
    }

    #[test]
    fn test_unscheduled_circuit_is_rejected() {
        let mut dag = physical_dag(1, 0);
        let err = RemoveIdleWires::new().run(&mut dag).unwrap_err();
        assert_eq!(err, ScheduleError::NotScheduled);
    }

    #[test]
    fn test_padded_idle_wire_is_removed() {
        // q0 carries one real op (4); q1 is untouched and gets a pad(0-4)
        let mut dag = physical_dag(2, 0);
        dag.apply_operation_back(Instruction::gate("x"), vec![Wire::Qubit(0)], vec![], None)
            .unwrap();
        let mut durations = InstructionDurations::new();
        durations.add("x", None, 4.0, TimeUnit::Dt);

        let mut scheduled = schedule(&dag, &durations);
        assert_eq!(scheduled.ops_on_wire(Wire::Qubit(1)).count(), 1);

        RemoveIdleWires::new().run(&mut scheduled).unwrap();

        assert_eq!(scheduled.ops_on_wire(Wire::Qubit(1)).count(), 0);
        assert_eq!(scheduled.ops_on_wire(Wire::Qubit(0)).count(), 1);
        assert_eq!(scheduled.duration, Some(4.0));
    }

    #[test]
    fn test_all_idle_circuit_collapses_to_zero() {
        // q0 = wait(100)+wait(100), q1 = wait(200)
        let mut dag = physical_dag(2, 0);
        for _ in 0..2 {
            dag.apply_operation_back(
                Instruction::delay(100.0, TimeUnit::Dt),
                vec![Wire::Qubit(0)],
                vec![],
                None,
            )
            .unwrap();
        }
        dag.apply_operation_back(
            Instruction::delay(200.0, TimeUnit::Dt),
            vec![Wire::Qubit(1)],
            vec![],
            None,
        )
        .unwrap();

        let mut scheduled = schedule(&dag, &InstructionDurations::new());
        assert_eq!(scheduled.duration, Some(200.0));

        RemoveIdleWires::new().run(&mut scheduled).unwrap();

        assert_eq!(scheduled.num_ops(), 0);
        assert_eq!(scheduled.duration, Some(0.0));
    }

    #[test]
    fn test_mixed_wire_is_left_untouched() {
        // q0 = wait(100) + real op (200); q1, q2 = wait(300)
        let mut dag = physical_dag(3, 0);
        dag.apply_operation_back(
            Instruction::delay(100.0, TimeUnit::Dt),
            vec![Wire::Qubit(0)],
            vec![],
            None,
        )
        .unwrap();
        dag.apply_operation_back(Instruction::gate("x"), vec![Wire::Qubit(0)], vec![], None)
            .unwrap();
        for q in [1u32, 2] {
            dag.apply_operation_back(
                Instruction::delay(300.0, TimeUnit::Dt),
                vec![Wire::Qubit(q)],
                vec![],
                None,
            )
            .unwrap();
        }
        let mut durations = InstructionDurations::new();
        durations.add("x", None, 200.0, TimeUnit::Dt);

        let mut scheduled = schedule(&dag, &durations);
        assert_eq!(scheduled.duration, Some(300.0));

        RemoveIdleWires::new().run(&mut scheduled).unwrap();

        // q1 and q2 vanish; q0 keeps its user-authored wait and the real op
        assert_eq!(scheduled.ops_on_wire(Wire::Qubit(1)).count(), 0);
        assert_eq!(scheduled.ops_on_wire(Wire::Qubit(2)).count(), 0);
        let q0_names: Vec<&str> = scheduled
            .ops_on_wire(Wire::Qubit(0))
            .map(|n| n.op.name.as_str())
            .collect();
        assert_eq!(q0_names, vec!["delay", "x"]);
        assert_eq!(scheduled.duration, Some(300.0));
    }

    #[test]
    fn test_idle_clbit_wire_is_removed_too() {
        let mut dag = physical_dag(1, 1);
        dag.apply_operation_back(Instruction::gate("x"), vec![Wire::Qubit(0)], vec![], None)
            .unwrap();
        let mut durations = InstructionDurations::new();
        durations.add("x", None, 4.0, TimeUnit::Dt);

        let mut scheduled = schedule(&dag, &durations);
        assert_eq!(scheduled.ops_on_wire(Wire::Clbit(0)).count(), 1);

        RemoveIdleWires::new().run(&mut scheduled).unwrap();
        assert_eq!(scheduled.ops_on_wire(Wire::Clbit(0)).count(), 0);
        assert_eq!(scheduled.duration, Some(4.0));
    }

    #[test]
    fn test_idempotent() {
        let mut dag = physical_dag(2, 0);
        dag.apply_operation_back(Instruction::gate("x"), vec![Wire::Qubit(0)], vec![], None)
            .unwrap();
        let mut durations = InstructionDurations::new();
        durations.add("x", None, 4.0, TimeUnit::Dt);

        let mut scheduled = schedule(&dag, &durations);
        let pass = RemoveIdleWires::new();
        pass.run(&mut scheduled).unwrap();
        let once = scheduled.clone();
        pass.run(&mut scheduled).unwrap();
        assert_eq!(scheduled, once);
    }
}
