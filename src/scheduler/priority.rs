use super::{ProcIdx, Scheduler, SimCtx, Slice};
use crate::{
    core::{RankedQueue, Ticks},
    error::{SimError, SimResult},
    sim::Process,
};

/// Static priority, non-preemptive. Lower value runs first; ties go to the
/// earlier arrival, then to input order.
#[derive(Debug, Default)]
pub struct PriorityScheduler {
    ready: RankedQueue<(i64, Ticks, ProcIdx)>,
}

impl PriorityScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority";

    fn slice(&self) -> Slice {
        Slice::ToCompletion
    }

    fn validate(&self, process: &Process) -> SimResult<()> {
        match process.priority {
            Some(_) => Ok(()),
            None => Err(SimError::MissingPriority { pid: process.pid }),
        }
    }

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx) {
        let process = ctx.process(proc);
        debug_assert!(
            process.priority.is_some(),
            "Process {} enqueued without a priority",
            process.pid
        );
        let priority = process.priority.unwrap_or(i64::MAX);
        self.ready.push(proc, (priority, process.arrival, proc));
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop()
    }
}
