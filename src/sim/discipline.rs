use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Process, Schedule, Sim};
use crate::{
    core::Ticks,
    error::SimResult,
    scheduler::{
        DEFAULT_QUANTUM, FcfsScheduler, PriorityScheduler, RoundRobinScheduler, Scheduler,
        SjfOrder, SjfScheduler, SrtfScheduler,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "discipline")]
pub enum Discipline {
    Fcfs,
    Sjf { order: SjfOrder },
    Srtf,
    Priority,
    RoundRobin { quantum: Ticks },
}

impl Discipline {
    /// Every discipline with its default configuration.
    pub fn all(quantum: Ticks) -> [Discipline; 5] {
        [
            Discipline::Fcfs,
            Discipline::Sjf {
                order: SjfOrder::default(),
            },
            Discipline::Srtf,
            Discipline::Priority,
            Discipline::RoundRobin { quantum },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Discipline::Fcfs => FcfsScheduler::NAME,
            Discipline::Sjf { .. } => SjfScheduler::NAME,
            Discipline::Srtf => SrtfScheduler::NAME,
            Discipline::Priority => PriorityScheduler::NAME,
            Discipline::RoundRobin { .. } => RoundRobinScheduler::NAME,
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, Discipline::Srtf | Discipline::RoundRobin { .. })
    }
}

impl Default for Discipline {
    fn default() -> Self {
        Discipline::RoundRobin {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::RoundRobin { quantum } => write!(f, "{} (q={quantum})", self.name()),
            Discipline::Sjf {
                order: SjfOrder::ShortestBurst,
            } => write!(f, "{} (shortest burst)", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

pub fn simulate(processes: &[Process], discipline: Discipline) -> SimResult<Schedule> {
    match discipline {
        Discipline::Fcfs => fcfs(processes),
        Discipline::Sjf { order } => Sim::new(processes, SjfScheduler::new(order))?.run(),
        Discipline::Srtf => srtf(processes),
        Discipline::Priority => priority(processes),
        Discipline::RoundRobin { quantum } => round_robin(processes, quantum),
    }
}

pub fn fcfs(processes: &[Process]) -> SimResult<Schedule> {
    Sim::new(processes, FcfsScheduler::new())?.run()
}

pub fn sjf(processes: &[Process]) -> SimResult<Schedule> {
    Sim::new(processes, SjfScheduler::default())?.run()
}

pub fn srtf(processes: &[Process]) -> SimResult<Schedule> {
    Sim::new(processes, SrtfScheduler::new())?.run()
}

pub fn priority(processes: &[Process]) -> SimResult<Schedule> {
    Sim::new(processes, PriorityScheduler::new())?.run()
}

pub fn round_robin(processes: &[Process], quantum: Ticks) -> SimResult<Schedule> {
    Sim::new(processes, RoundRobinScheduler::new(quantum)?)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn invalid_quantum_wins_over_empty_input() {
        assert_eq!(
            simulate(&[], Discipline::RoundRobin { quantum: 0 }),
            Err(SimError::InvalidQuantum { quantum: 0 })
        );
    }

    #[test]
    fn discipline_serializes_with_a_tag() {
        let json = serde_json::to_string(&Discipline::RoundRobin { quantum: 3 }).unwrap();
        assert_eq!(json, r#"{"discipline":"round_robin","quantum":3}"#);

        let sjf: Discipline =
            serde_json::from_str(r#"{"discipline":"sjf","order":"shortest_burst"}"#).unwrap();
        assert_eq!(
            sjf,
            Discipline::Sjf {
                order: SjfOrder::ShortestBurst
            }
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Discipline::Fcfs.to_string(), "FCFS");
        assert_eq!(Discipline::default().to_string(), "Round Robin (q=2)");
        assert!(Discipline::Srtf.is_preemptive());
        assert!(!Discipline::Priority.is_preemptive());
    }
}
