//! ASAP scheduling pass.

use crate::config::ScheduleConfig;
use crate::dag::CircuitDag;
use crate::durations::DurationProvider;
use crate::models::TimeUnit;
use crate::{log_changes, log_checks};

use super::timeline::WireTimeline;
use super::ScheduleError;

/// Earliest-start list scheduler.
///
/// Consumes a physical circuit and a duration provider, produces a new,
/// fully timed circuit: every operation starts as soon as all the wires it
/// touches are free, gaps are closed with delays, and the total duration is
/// recorded on the output. The input is never mutated and operations are
/// never reordered.
pub struct AsapScheduler<'a, D: DurationProvider> {
    durations: &'a D,
    config: ScheduleConfig,
}

impl<'a, D: DurationProvider> AsapScheduler<'a, D> {
    pub fn new(durations: &'a D) -> Self {
        Self {
            durations,
            config: ScheduleConfig::default(),
        }
    }

    pub fn with_config(durations: &'a D, config: ScheduleConfig) -> Self {
        Self { durations, config }
    }

    /// Schedule `dag`, taking the unit from `time_unit`, then the config,
    /// then defaulting to dt.
    ///
    /// Fails with [`ScheduleError::NotPhysical`] on unmapped circuits and
    /// [`ScheduleError::UnknownDuration`] when the provider cannot resolve
    /// an instruction. Nothing is returned on failure.
    pub fn run(
        &self,
        dag: &CircuitDag,
        time_unit: Option<TimeUnit>,
    ) -> Result<CircuitDag, ScheduleError> {
        if !dag.is_physical() {
            return Err(ScheduleError::NotPhysical);
        }
        let unit = time_unit
            .or(self.config.time_unit)
            .unwrap_or(TimeUnit::Dt);
        let verbosity = self.config.verbosity;

        let mut out = dag.copy_empty();
        let mut timeline = WireTimeline::new();

        for node in dag.topological_op_nodes() {
            let wires = node.wires();
            let start = timeline.ready_time(&wires);
            log_checks!(
                verbosity,
                "  Padding {} wire(s) of {} up to t={}",
                wires.len(),
                node.op.name,
                start
            );
            timeline.pad_until(&mut out, &wires, start, unit)?;

            let duration = self.durations.get(&node.op, &node.qargs, unit)?;

            // The instruction is fully timed before it enters the graph
            let mut op = node.op.clone();
            op.duration = Some(duration);
            op.unit = unit;
            out.apply_operation_back(
                op,
                node.qargs.clone(),
                node.cargs.clone(),
                node.condition.clone(),
            )?;

            let stop = start + duration;
            for &wire in &wires {
                timeline.occupy(wire, stop);
            }
            log_changes!(
                verbosity,
                "  Scheduled {} on {:?} from {} to {} {}",
                node.op.name,
                wires,
                start,
                stop,
                unit
            );
        }

        // Every wire, touched or not, is padded out to the full schedule
        let circuit_duration = timeline.finish_time();
        let all_wires: Vec<_> = out.wires().collect();
        timeline.pad_until(&mut out, &all_wires, circuit_duration, unit)?;

        out.duration = Some(circuit_duration);
        out.unit = unit;
        log_changes!(
            verbosity,
            "Circuit scheduled: duration={} {}",
            circuit_duration,
            unit
        );
        Ok(out)
    }
}
