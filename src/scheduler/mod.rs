pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

use crate::{
    core::{
        Ticks,
        state::{ProcIdx, SimCtx},
    },
    error::SimResult,
    sim::Process,
};
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::{SjfOrder, SjfScheduler};
pub use srtf::SrtfScheduler;

pub const DEFAULT_QUANTUM: Ticks = 2;

/// How long a dispatched process keeps the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    // Non-preemptive: run the whole remaining burst
    ToCompletion,
    Quantum(Ticks),
    // Re-arbitrate after every tick; idle time also advances one tick at a time
    Unit,
}

/// Order of the results in the finished schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrder {
    Completion,
    Pid,
}

/// A ready-queue arbiter.
///
/// The engine calls `enqueue` whenever a process becomes ready (on arrival,
/// and again after a preempted slice) and `dispatch` whenever the CPU is
/// free. `dispatch` removes the chosen process from the ready set; returning
/// `None` means the CPU idles.
pub trait Scheduler {
    const NAME: &'static str;

    fn slice(&self) -> Slice;

    fn result_order(&self) -> ResultOrder {
        ResultOrder::Completion
    }

    // Reject input this discipline cannot schedule, before the run starts
    fn validate(&self, _process: &Process) -> SimResult<()> {
        Ok(())
    }

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx);

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<ProcIdx>;
}
