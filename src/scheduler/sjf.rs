use serde::{Deserialize, Serialize};

use super::{ProcIdx, Scheduler, SimCtx, Slice};
use crate::core::{RankedQueue, Ticks};

/// Key used to rank ready processes for non-preemptive SJF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SjfOrder {
    /// `(arrival, burst)`: earliest arrival first, shorter burst breaks ties.
    #[default]
    ArrivalThenBurst,
    /// `(burst, arrival)`: shortest burst among everything that has arrived.
    ShortestBurst,
}

/// Shortest-job-first, non-preemptive.
#[derive(Debug)]
pub struct SjfScheduler {
    order: SjfOrder,
    ready: RankedQueue<(Ticks, Ticks, ProcIdx)>,
}

impl SjfScheduler {
    pub fn new(order: SjfOrder) -> Self {
        Self {
            order,
            ready: RankedQueue::new(),
        }
    }
}

impl Default for SjfScheduler {
    fn default() -> Self {
        Self::new(SjfOrder::default())
    }
}

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "SJF";

    fn slice(&self) -> Slice {
        Slice::ToCompletion
    }

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx) {
        let process = ctx.process(proc);
        let key = match self.order {
            SjfOrder::ArrivalThenBurst => (process.arrival, process.burst, proc),
            SjfOrder::ShortestBurst => (process.burst, process.arrival, proc),
        };
        self.ready.push(proc, key);
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop()
    }
}
