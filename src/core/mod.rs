pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;
pub mod state;

pub use driver::{RunningSlice, SchedCore};
pub use event::SimEvent;
pub use queue::{FifoQueue, Rank, RankedQueue};
pub use state::{Pid, ProcIdx, ProcState, RunState, SimCtx, Ticks};
