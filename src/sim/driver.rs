use rustc_hash::FxHashSet;
use tracing::{debug, debug_span};

use super::{
    process::Process,
    report::{ProcessResult, Schedule},
};
use crate::{
    core::{
        SimEvent,
        driver::SchedCore,
        state::{ProcIdx, Ticks},
    },
    error::{SimError, SimResult},
    scheduler::{ResultOrder, Scheduler, Slice},
};

/// Step-wise driver: feeds arrivals into a `SchedCore` and advances it one
/// dispatch (or one idle period) per `step()`.
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Process indices sorted by (arrival, input order)
    arrivals: Vec<ProcIdx>,
    arrival_cursor: usize,
    // No well-formed run can still have work at max(arrival) + sum(burst)
    max_time: Ticks,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(processes: &[Process], scheduler: S) -> SimResult<Self> {
        let max_time = validate(processes, &scheduler)?;

        let mut arrivals: Vec<ProcIdx> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&proc| (processes[proc].arrival, proc));

        Ok(Self {
            core: SchedCore::new(processes, scheduler),
            arrivals,
            arrival_cursor: 0,
            max_time,
        })
    }

    pub fn step(&mut self) -> SimResult<Vec<SimEvent>> {
        if self.all_processes_completed() {
            return Ok(Vec::new());
        }

        let now = self.core.now();
        if now >= self.max_time {
            return Err(self.non_terminating());
        }

        let mut events = Vec::new();
        self.handle_arrivals(&mut events);

        match self.core.run_next(&mut events) {
            Some(slice) => {
                // Anything that arrived during the slice queues ahead of the
                // process being taken off the CPU
                self.handle_arrivals(&mut events);
                events.push(self.core.stop_running(slice));
            }
            None => {
                let Some(next_arrival) = self.next_arrival() else {
                    // Nothing ready and nothing left to arrive, yet work remains
                    return Err(self.non_terminating());
                };
                let until = match self.core.scheduler.slice() {
                    Slice::Unit => now + 1,
                    Slice::ToCompletion | Slice::Quantum(_) => next_arrival,
                };
                events.push(self.core.idle_until(until));
                self.handle_arrivals(&mut events);
            }
        }

        self.core.observe(&events);
        Ok(events)
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SimEvent>) {
        let now = self.core.now();
        while let Some(&proc) = self.arrivals.get(self.arrival_cursor) {
            // Contiguous, since arrivals are sorted
            if self.core.ctx.process(proc).arrival > now {
                break;
            }
            events.push(self.core.wake(proc));
            self.arrival_cursor += 1;
        }
    }

    fn next_arrival(&self) -> Option<Ticks> {
        self.arrivals
            .get(self.arrival_cursor)
            .map(|&proc| self.core.ctx.process(proc).arrival)
    }

    fn non_terminating(&self) -> SimError {
        SimError::NonTerminatingSimulation {
            max_time: self.max_time,
            unfinished: self.core.ctx.unfinished(),
        }
    }

    pub fn all_processes_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    pub fn max_time(&self) -> Ticks {
        self.max_time
    }

    /// Drive the simulation to the end and collect the schedule.
    pub fn run(mut self) -> SimResult<Schedule> {
        let span = debug_span!(
            "simulate",
            discipline = S::NAME,
            processes = self.core.ctx.runs.len()
        );
        let _enter = span.enter();

        while !self.all_processes_completed() {
            self.step()?;
        }

        let schedule = self.schedule();
        debug!(
            steps = self.core.observer().steps(),
            makespan = schedule.makespan(),
            avg_turnaround = ?schedule.average_turnaround(),
            avg_waiting = ?schedule.average_waiting(),
            "simulation finished"
        );
        Ok(schedule)
    }

    /// Results for every process completed so far, in the scheduler's
    /// result order.
    pub fn schedule(&self) -> Schedule {
        let ctx = &self.core.ctx;
        let mut results: Vec<ProcessResult> = self
            .core
            .completion_order()
            .iter()
            .filter_map(|&proc| ProcessResult::from_run(ctx.run(proc)))
            .collect();

        if self.core.scheduler.result_order() == ResultOrder::Pid {
            results.sort_by_key(|r| r.pid);
        }

        Schedule::new(results, self.core.timeline().to_vec())
    }
}

// Returns the safety bound max(arrival) + sum(burst). Every timestamp of a
// valid run stays at or below it, so the clock cannot overflow once it fits.
fn validate<S: Scheduler>(processes: &[Process], scheduler: &S) -> SimResult<Ticks> {
    let mut seen = FxHashSet::default();
    for process in processes {
        if !seen.insert(process.pid) {
            return Err(SimError::DuplicatePid { pid: process.pid });
        }
        if process.burst == 0 {
            return Err(SimError::ZeroBurst { pid: process.pid });
        }
        scheduler.validate(process)?;
    }

    let last_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    processes.iter().try_fold(last_arrival, |acc, p| {
        acc.checked_add(p.burst)
            .ok_or(SimError::TimeOverflow { pid: p.pid })
    })
}
