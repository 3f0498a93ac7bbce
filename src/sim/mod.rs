pub mod discipline;
pub mod driver;
pub mod process;
pub mod report;

pub use discipline::{Discipline, fcfs, priority, round_robin, simulate, sjf, srtf};
pub use driver::Sim;
pub use process::Process;
pub use report::{Averages, ProcessResult, Schedule, Segment};
