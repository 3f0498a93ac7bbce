use tracing::trace;

use super::{
    event::SimEvent,
    state::{ProcState, SimCtx},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx, events: &[SimEvent]) {
        self.step += 1;

        for event in events {
            trace!(step = self.step, now = ctx.now, ?event, "sim event");
        }

        debug_assert!(
            ctx.current.is_none(),
            "CPU must be released between steps, still running {:?}",
            ctx.current
        );

        for run in &ctx.runs {
            let pid = run.process.pid;
            debug_assert!(
                run.remaining <= run.process.burst,
                "Process {pid} has more remaining work than its burst"
            );
            debug_assert_ne!(
                run.state,
                ProcState::Running,
                "Process {pid} still marked Running between steps"
            );

            if let Some(start) = run.start_time {
                debug_assert!(
                    start >= run.process.arrival,
                    "Process {pid} started at {start} before arriving at {}",
                    run.process.arrival
                );
            }

            match run.state {
                ProcState::Completed => {
                    debug_assert_eq!(run.remaining, 0, "Completed process {pid} has work left");
                    debug_assert!(
                        run.completion_time.is_some_and(|completion| {
                            completion >= run.process.arrival + run.process.burst
                        }),
                        "Process {pid} completed earlier than arrival + burst"
                    );
                }
                ProcState::Pending => {
                    debug_assert!(
                        run.process.arrival > ctx.now,
                        "Process {pid} arrived at {} but was never admitted by t={}",
                        run.process.arrival,
                        ctx.now
                    );
                }
                ProcState::Ready | ProcState::Running => {
                    debug_assert!(run.completion_time.is_none());
                }
            }
        }
    }
}
