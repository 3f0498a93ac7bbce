use super::{ProcIdx, Scheduler, SimCtx, Slice};
use crate::core::FifoQueue;

/// First-come first-serve. Arrivals are admitted in (arrival, input order),
/// so a plain FIFO is the whole policy.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    ready: FifoQueue,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS";

    fn slice(&self) -> Slice {
        Slice::ToCompletion
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
    use crate::sim::{Process, Sim};

    fn completions(processes: &[Process]) -> Vec<(u64, u64)> {
        let schedule = Sim::new(processes, FcfsScheduler::new())
            .and_then(Sim::run)
            .unwrap();
        schedule
            .results
            .iter()
            .map(|r| (r.pid, r.completion))
            .collect()
    }

    #[test]
    fn runs_in_arrival_order() {
        let processes = [
            Process::new(1, 0, 5),
            Process::new(2, 2, 3),
            Process::new(3, 4, 1),
            Process::new(4, 6, 2),
        ];
        assert_eq!(completions(&processes), vec![(1, 5), (2, 8), (3, 9), (4, 11)]);
    }

    #[test]
    fn unsorted_input_is_served_by_arrival() {
        let processes = [
            Process::new(1, 4, 2),
            Process::new(2, 0, 3),
            Process::new(3, 1, 1),
        ];
        assert_eq!(completions(&processes), vec![(2, 3), (3, 4), (1, 6)]);
    }

    #[test]
    fn simultaneous_arrivals_keep_input_order() {
        let processes = [
            Process::new(9, 0, 1),
            Process::new(3, 0, 1),
            Process::new(5, 0, 1),
        ];
        assert_eq!(completions(&processes), vec![(9, 1), (3, 2), (5, 3)]);
    }

    #[test]
    fn idles_until_next_arrival() {
        let processes = [Process::new(1, 0, 2), Process::new(2, 10, 2)];
        let schedule = Sim::new(&processes, FcfsScheduler::new())
            .and_then(Sim::run)
            .unwrap();

        let second = schedule.result(2).unwrap();
        assert_eq!(second.start, 10);
        assert_eq!(second.waiting, 0);
    }
}
