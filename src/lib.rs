pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::SimEvent;
pub use error::{SimError, SimResult};
pub use scheduler::{Scheduler, SjfOrder};
pub use sim::{
    Averages, Discipline, Process, ProcessResult, Schedule, Segment, Sim, fcfs, priority,
    round_robin, simulate, sjf, srtf,
};
