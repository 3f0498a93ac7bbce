use super::{ProcIdx, ResultOrder, Scheduler, SimCtx, Slice};
use crate::core::{RankedQueue, Ticks};

/// Shortest remaining time first. Runs one tick at a time; the running
/// process goes back into the ready set after every tick, re-keyed by what
/// it has left, so a newcomer with less remaining work takes over.
#[derive(Debug, Default)]
pub struct SrtfScheduler {
    ready: RankedQueue<(Ticks, Ticks, ProcIdx)>,
}

impl SrtfScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SrtfScheduler {
    const NAME: &'static str = "SRTF";

    fn slice(&self) -> Slice {
        Slice::Unit
    }

    fn result_order(&self) -> ResultOrder {
        ResultOrder::Pid
    }

    fn enqueue(&mut self, ctx: &SimCtx, proc: ProcIdx) {
        let run = ctx.run(proc);
        self.ready.push(proc, (run.remaining, run.process.arrival, proc));
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<ProcIdx> {
        self.ready.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Process, Schedule, Sim};

    fn run(processes: &[Process]) -> Schedule {
        Sim::new(processes, SrtfScheduler::new())
            .and_then(Sim::run)
            .unwrap()
    }

    #[test]
    fn shorter_newcomers_preempt() {
        let schedule = run(&[
            Process::new(1, 0, 8),
            Process::new(2, 1, 4),
            Process::new(3, 2, 2),
            Process::new(4, 3, 1),
        ]);
        let completions: Vec<_> = schedule
            .results
            .iter()
            .map(|r| (r.pid, r.completion))
            .collect();
        assert_eq!(completions, vec![(1, 15), (2, 8), (3, 4), (4, 5)]);

        // p1 ran first, so its start stays at 0 despite the preemption
        assert_eq!(schedule.result(1).unwrap().start, 0);
        assert_eq!(schedule.result(2).unwrap().start, 1);
    }

    #[test]
    fn equal_remaining_prefers_earlier_arrival() {
        let schedule = run(&[Process::new(1, 1, 2), Process::new(2, 0, 3)]);
        // At t=1 p2 has 2 left and p1 has 2: p2 arrived first and keeps going
        assert_eq!(schedule.result(2).unwrap().completion, 3);
        assert_eq!(schedule.result(1).unwrap().completion, 5);
    }

    #[test]
    fn equal_remaining_and_arrival_prefers_input_order() {
        let schedule = run(&[Process::new(5, 0, 2), Process::new(3, 0, 2)]);
        let p5 = schedule.result(5).unwrap();
        let p3 = schedule.result(3).unwrap();
        assert_eq!((p5.start, p5.completion), (0, 2));
        assert_eq!((p3.start, p3.completion), (2, 4));
    }

    #[test]
    fn results_are_sorted_by_pid() {
        let schedule = run(&[
            Process::new(30, 0, 5),
            Process::new(10, 1, 1),
            Process::new(20, 2, 1),
        ]);
        let pids: Vec<_> = schedule.results.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![10, 20, 30]);
    }

    #[test]
    fn idle_gaps_advance_one_tick_at_a_time() {
        let schedule = run(&[Process::new(1, 3, 2)]);
        let p1 = schedule.result(1).unwrap();
        assert_eq!((p1.start, p1.completion, p1.waiting), (3, 5, 0));
        assert_eq!(schedule.busy_time(), 2);
    }
}
