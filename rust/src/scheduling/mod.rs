//! Circuit scheduling passes.
//!
//! [`AsapScheduler`] assigns earliest-possible start times to every operation
//! of a physical circuit, filling gaps with delays. [`RemoveIdleWires`]
//! post-processes a scheduled circuit, deleting wires that do nothing but
//! wait. Both share the per-wire availability bookkeeping in
//! [`WireTimeline`].

mod asap;
mod remove_idle;
mod timeline;

pub use asap::AsapScheduler;
pub use remove_idle::RemoveIdleWires;
pub use timeline::WireTimeline;

use thiserror::Error;

use crate::dag::DagError;
use crate::models::TimeUnit;

/// Errors that can occur during scheduling.
///
/// Every variant is fatal: a failing pass returns nothing and leaves its
/// input untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("ASAP scheduling runs on physical circuits only (a single quantum register named \"q\")")]
    NotPhysical,
    #[error("circuit has no recorded duration; run a scheduling pass first")]
    NotScheduled,
    #[error("no duration for instruction {name:?} on qubits {qubits:?} in unit {unit}")]
    UnknownDuration {
        name: String,
        qubits: Vec<u32>,
        unit: TimeUnit,
    },
    #[error(transparent)]
    Dag(#[from] DagError),
}
