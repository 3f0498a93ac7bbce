use super::{ProcIdx, ResultOrder, Scheduler, SimCtx, Slice};
use crate::{
    core::{FifoQueue, Ticks},
    error::{SimError, SimResult},
};

/// Round robin with a fixed quantum.
///
/// The engine admits processes that arrived during a slice before it hands
/// the preempted process back, so newcomers queue ahead of it.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    ready: FifoQueue,
    quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> SimResult<Self> {
        if quantum == 0 {
            return Err(SimError::InvalidQuantum { quantum });
        }
        Ok(Self {
            ready: FifoQueue::new(),
            quantum,
        })
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";

    fn slice(&self) -> Slice {
        Slice::Quantum(self.quantum)
    }

    fn result_order(&self) -> ResultOrder {
        ResultOrder::Pid
    }

    fn enqueue(&mut self, _ctx: &SimCtx, proc: ProcIdx) {
        self.ready.push_back(proc);
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::SimEvent,
        sim::{Process, Sim},
    };

    fn completions(processes: &[Process], quantum: Ticks) -> Vec<(u64, u64)> {
        let scheduler = RoundRobinScheduler::new(quantum).unwrap();
        Sim::new(processes, scheduler)
            .and_then(Sim::run)
            .unwrap()
            .results
            .iter()
            .map(|r| (r.pid, r.completion))
            .collect()
    }

    #[test]
    fn zero_quantum_is_rejected() {
        assert_eq!(
            RoundRobinScheduler::new(0).unwrap_err(),
            SimError::InvalidQuantum { quantum: 0 }
        );
    }

    #[test]
    fn quantum_slicing() {
        let processes = [
            Process::new(1, 0, 5),
            Process::new(2, 1, 3),
            Process::new(3, 2, 1),
            Process::new(4, 3, 2),
        ];
        assert_eq!(
            completions(&processes, 2),
            vec![(1, 11), (2, 10), (3, 5), (4, 9)]
        );
    }

    #[test]
    fn newcomers_queue_ahead_of_preempted_process() {
        // p2 arrives exactly when p1's first slice ends
        let processes = [Process::new(1, 0, 4), Process::new(2, 2, 2)];
        let mut sim = Sim::new(&processes, RoundRobinScheduler::new(2).unwrap()).unwrap();

        let first = sim.step().unwrap();
        assert_eq!(
            first,
            vec![
                SimEvent::Arrived { pid: 1 },
                SimEvent::Dispatched { pid: 1, slice: 2 },
                SimEvent::Arrived { pid: 2 },
                SimEvent::Preempted {
                    pid: 1,
                    at: 2,
                    remaining: 2
                },
            ]
        );

        let second = sim.step().unwrap();
        assert_eq!(second[0], SimEvent::Dispatched { pid: 2, slice: 2 });
    }

    #[test]
    fn quantum_larger_than_bursts_behaves_like_fcfs() {
        let processes = [
            Process::new(1, 0, 5),
            Process::new(2, 2, 3),
            Process::new(3, 4, 1),
            Process::new(4, 6, 2),
        ];
        assert_eq!(
            completions(&processes, 100),
            vec![(1, 5), (2, 8), (3, 9), (4, 11)]
        );
    }

    #[test]
    fn idle_jump_to_next_arrival() {
        let processes = [Process::new(1, 0, 1), Process::new(2, 7, 3)];
        assert_eq!(completions(&processes, 2), vec![(1, 1), (2, 10)]);
    }
}
