use crate::sim::Process;

// Index into the caller's process slice; doubles as the input-order tie-break
pub type ProcIdx = usize;
pub type Pid = u64;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    // Not yet arrived
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct RunState {
    pub process: Process,
    pub state: ProcState,
    pub remaining: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl RunState {
    fn new(process: Process) -> Self {
        Self {
            process,
            state: ProcState::Pending,
            remaining: process.burst,
            start_time: None,
            completion_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcState::Completed
    }
}

/// Mutable simulation state shared between the engine and the scheduler.
///
/// Schedulers only ever see this through `&SimCtx`; every transition goes
/// through the engine.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub runs: Vec<RunState>,
    pub current: Option<ProcIdx>,
}

impl SimCtx {
    pub fn new(processes: &[Process]) -> Self {
        Self {
            now: 0,
            runs: processes.iter().copied().map(RunState::new).collect(),
            current: None,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now += delta;
    }

    pub fn run(&self, proc: ProcIdx) -> &RunState {
        &self.runs[proc]
    }

    fn run_mut(&mut self, proc: ProcIdx) -> &mut RunState {
        &mut self.runs[proc]
    }

    pub fn process(&self, proc: ProcIdx) -> &Process {
        &self.runs[proc].process
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn all_completed(&self) -> bool {
        self.runs.iter().all(RunState::is_completed)
    }

    pub fn unfinished(&self) -> usize {
        self.runs.iter().filter(|run| !run.is_completed()).count()
    }

    pub fn mark_ready(&mut self, proc: ProcIdx) {
        let now = self.now;
        let run = self.run_mut(proc);
        debug_assert!(
            run.state != ProcState::Completed,
            "Completed process {} cannot be ready",
            run.process.pid
        );
        debug_assert!(
            run.process.arrival <= now,
            "Process {} readied before its arrival",
            run.process.pid
        );
        run.state = ProcState::Ready;
    }

    // Return previous state
    pub fn set_running(&mut self, proc: ProcIdx) -> ProcState {
        debug_assert!(
            self.current.is_none(),
            "CPU already running process {:?}",
            self.current
        );

        let now = self.now;
        self.current = Some(proc);
        let run = self.run_mut(proc);
        let prev_state = run.state;
        run.state = ProcState::Running;
        run.start_time.get_or_insert(now);
        prev_state
    }

    /// Charge `ticks` of service to the running process and move the clock.
    pub fn consume(&mut self, ticks: Ticks) {
        let Some(proc) = self.current else {
            debug_assert!(false, "consume() with an idle CPU");
            return;
        };

        let run = self.run_mut(proc);
        debug_assert!(
            ticks <= run.remaining,
            "Process {} over-served: {ticks} > {}",
            run.process.pid,
            run.remaining
        );
        run.remaining = run.remaining.saturating_sub(ticks);
        self.advance_time(ticks);
    }

    pub fn mark_completed(&mut self, proc: ProcIdx) {
        let now = self.now;
        let run = self.run_mut(proc);
        debug_assert!(
            run.state == ProcState::Running,
            "Process {} must have been running before marked complete",
            run.process.pid
        );
        debug_assert_eq!(run.remaining, 0);

        run.state = ProcState::Completed;
        run.completion_time = Some(now);
    }

    pub fn clear_cpu(&mut self) -> Option<ProcIdx> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SimCtx {
        SimCtx::new(&[Process::new(7, 0, 3), Process::new(8, 2, 1)])
    }

    #[test]
    fn start_time_is_set_once() {
        let mut ctx = ctx();
        ctx.mark_ready(0);
        assert_eq!(ctx.set_running(0), ProcState::Ready);
        ctx.consume(1);
        ctx.clear_cpu();
        ctx.mark_ready(0);

        ctx.set_running(0);
        ctx.consume(2);
        assert_eq!(ctx.run(0).start_time, Some(0));
        assert_eq!(ctx.run(0).remaining, 0);
        assert_eq!(ctx.now, 3);
    }

    #[test]
    fn completion_records_current_time() {
        let mut ctx = ctx();
        ctx.advance_time(2);
        ctx.mark_ready(1);
        ctx.set_running(1);
        ctx.consume(1);
        ctx.clear_cpu();
        ctx.mark_completed(1);

        assert_eq!(ctx.run(1).completion_time, Some(3));
        assert_eq!(ctx.unfinished(), 1);
        assert!(!ctx.all_completed());
        assert!(ctx.cpu_is_idle());
    }
}
