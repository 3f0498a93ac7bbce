use thiserror::Error;

use crate::core::{Pid, Ticks};

pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// No processes were simulated, so averages have no value.
    #[error("no processes supplied; averages are undefined")]
    EmptyInput,

    #[error("invalid round robin quantum {quantum}: must be positive")]
    InvalidQuantum { quantum: Ticks },

    #[error("duplicate pid {pid}")]
    DuplicatePid { pid: Pid },

    #[error("process {pid} has a zero burst")]
    ZeroBurst { pid: Pid },

    #[error("process {pid} has no priority")]
    MissingPriority { pid: Pid },

    /// `max(arrival) + sum(burst)` does not fit in `Ticks`; `pid` is the
    /// process whose burst pushed it over.
    #[error("process {pid} pushes the schedule past the end of time")]
    TimeOverflow { pid: Pid },

    /// Work remained when the clock hit `max(arrival) + sum(burst)`.
    #[error("simulation did not terminate by t={max_time} ({unfinished} unfinished)")]
    NonTerminatingSimulation { max_time: Ticks, unfinished: usize },
}
