use super::{
    event::SimEvent,
    observer::Observer,
    state::{Pid, ProcIdx, SimCtx, Ticks},
};
use crate::{
    scheduler::{Scheduler, Slice},
    sim::{Process, Segment},
};

/// A slice handed to the CPU by `run_next()`, still on the CPU until
/// `stop_running()` settles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningSlice {
    pub proc: ProcIdx,
    pub ticks: Ticks,
}

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
    timeline: Vec<Segment>,
    completion_order: Vec<ProcIdx>,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(processes: &[Process], scheduler: S) -> Self {
        Self {
            ctx: SimCtx::new(processes),
            scheduler,
            observer: Observer::new(),
            timeline: Vec::new(),
            completion_order: Vec::with_capacity(processes.len()),
        }
    }

    // Arrival: hand the process to the scheduler's ready set
    pub fn wake(&mut self, proc: ProcIdx) -> SimEvent {
        self.ctx.mark_ready(proc);
        self.scheduler.enqueue(&self.ctx, proc);
        SimEvent::Arrived {
            pid: self.ctx.process(proc).pid,
        }
    }

    /// Ask the scheduler for the next process and run it for one slice.
    /// Returns `None` if nothing is ready.
    pub fn run_next(&mut self, events: &mut Vec<SimEvent>) -> Option<RunningSlice> {
        debug_assert!(self.ctx.cpu_is_idle(), "run_next() with a busy CPU");

        let proc = self.scheduler.dispatch(&self.ctx)?;
        let remaining = self.ctx.run(proc).remaining;
        let ticks = match self.scheduler.slice() {
            Slice::ToCompletion => remaining,
            Slice::Quantum(quantum) => quantum.min(remaining),
            Slice::Unit => 1,
        };

        let start = self.ctx.now;
        self.ctx.set_running(proc);
        self.ctx.consume(ticks);

        let pid = self.ctx.process(proc).pid;
        self.record_segment(start, self.ctx.now, Some(pid));
        events.push(SimEvent::Dispatched { pid, slice: ticks });

        Some(RunningSlice { proc, ticks })
    }

    /// Take the slice's process off the CPU: complete it, or give it back to
    /// the scheduler if it still has work.
    pub fn stop_running(&mut self, slice: RunningSlice) -> SimEvent {
        let proc = slice.proc;
        let cleared = self.ctx.clear_cpu();
        debug_assert_eq!(cleared, Some(proc), "Stopped process was not on the CPU");

        let now = self.ctx.now;
        let run = self.ctx.run(proc);
        let pid = run.process.pid;
        let remaining = run.remaining;

        if remaining == 0 {
            self.ctx.mark_completed(proc);
            self.completion_order.push(proc);
            SimEvent::Completed { pid, at: now }
        } else {
            self.ctx.mark_ready(proc);
            self.scheduler.enqueue(&self.ctx, proc);
            SimEvent::Preempted {
                pid,
                at: now,
                remaining,
            }
        }
    }

    pub fn idle_until(&mut self, until: Ticks) -> SimEvent {
        let start = self.ctx.now;
        debug_assert!(until > start, "Idle period must move the clock forward");
        self.ctx.advance_time(until - start);
        self.record_segment(start, until, None);
        SimEvent::Idle { until }
    }

    // Extend the last segment when the same pid (or idle) keeps the CPU
    fn record_segment(&mut self, start: Ticks, end: Ticks, pid: Option<Pid>) {
        match self.timeline.last_mut() {
            Some(last) if last.pid == pid && last.end == start => last.end = end,
            _ => self.timeline.push(Segment { start, end, pid }),
        }
    }

    pub fn observe(&mut self, events: &[SimEvent]) {
        self.observer.observe(&self.ctx, events);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn timeline(&self) -> &[Segment] {
        &self.timeline
    }

    pub fn completion_order(&self) -> &[ProcIdx] {
        &self.completion_order
    }
}
