use average::{Estimate, Mean};
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        RunState,
        state::{Pid, Ticks},
    },
    error::{SimError, SimResult},
};

/// Timing metrics for one finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    pub start: Ticks,
    pub completion: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
}

impl ProcessResult {
    // None until the run has both started and completed
    pub fn from_run(run: &RunState) -> Option<Self> {
        let process = run.process;
        let start = run.start_time?;
        let completion = run.completion_time?;
        let turnaround = completion - process.arrival;

        Some(Self {
            pid: process.pid,
            arrival: process.arrival,
            burst: process.burst,
            priority: process.priority,
            start,
            completion,
            turnaround,
            waiting: turnaround - process.burst,
        })
    }
}

/// One stretch of the CPU timeline; `pid == None` is idle time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Ticks,
    pub end: Ticks,
    pub pid: Option<Pid>,
}

impl Segment {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub turnaround: f64,
    pub waiting: f64,
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub results: Vec<ProcessResult>,
    pub timeline: Vec<Segment>,
    averages: Option<Averages>,
}

impl Schedule {
    pub fn new(results: Vec<ProcessResult>, timeline: Vec<Segment>) -> Self {
        let averages = (!results.is_empty()).then(|| Averages {
            turnaround: mean(results.iter().map(|r| r.turnaround)),
            waiting: mean(results.iter().map(|r| r.waiting)),
        });

        Self {
            results,
            timeline,
            averages,
        }
    }

    /// Mean turnaround and waiting time. An empty run has no averages and
    /// yields `SimError::EmptyInput` rather than zeros.
    pub fn averages(&self) -> SimResult<Averages> {
        self.averages.ok_or(SimError::EmptyInput)
    }

    pub fn average_turnaround(&self) -> Option<f64> {
        self.averages.map(|a| a.turnaround)
    }

    pub fn average_waiting(&self) -> Option<f64> {
        self.averages.map(|a| a.waiting)
    }

    pub fn result(&self, pid: Pid) -> Option<&ProcessResult> {
        self.results.iter().find(|r| r.pid == pid)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn makespan(&self) -> Ticks {
        self.timeline.last().map_or(0, |segment| segment.end)
    }

    pub fn busy_time(&self) -> Ticks {
        self.timeline
            .iter()
            .filter(|segment| !segment.is_idle())
            .map(Segment::duration)
            .sum()
    }

    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }

    pub fn longest_idle(&self) -> Ticks {
        self.timeline
            .iter()
            .filter(|segment| segment.is_idle())
            .map(Segment::duration)
            .max()
            .unwrap_or(0)
    }
}

fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    values.map(|v| v as f64).collect::<Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(pid: Pid, turnaround: Ticks, waiting: Ticks) -> ProcessResult {
        ProcessResult {
            pid,
            arrival: 0,
            burst: turnaround - waiting,
            priority: None,
            start: waiting,
            completion: turnaround,
            turnaround,
            waiting,
        }
    }

    #[test]
    fn empty_schedule_has_no_averages() {
        let schedule = Schedule::new(Vec::new(), Vec::new());
        assert_eq!(schedule.averages(), Err(SimError::EmptyInput));
        assert_eq!(schedule.average_waiting(), None);
        assert_eq!(schedule.makespan(), 0);
    }

    #[test]
    fn averages_are_unrounded_means() {
        let results = vec![result(1, 3, 0), result(2, 4, 1), result(3, 4, 1)];
        let schedule = Schedule::new(results, Vec::new());
        let averages = schedule.averages().unwrap();
        assert!((averages.turnaround - 11.0 / 3.0).abs() < 1e-12);
        assert!((averages.waiting - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn timeline_accounting() {
        let timeline = [
            (0, 2, Some(1)),
            (2, 5, None),
            (5, 6, Some(2)),
            (6, 7, None),
            (7, 9, Some(3)),
        ]
        .into_iter()
        .map(|(start, end, pid)| Segment { start, end, pid })
        .collect();
        let schedule = Schedule::new(Vec::new(), timeline);
        assert_eq!(schedule.makespan(), 9);
        assert_eq!(schedule.busy_time(), 5);
        assert_eq!(schedule.idle_time(), 4);
        assert_eq!(schedule.longest_idle(), 3);
    }
}
