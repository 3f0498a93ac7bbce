use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Arrived {
        pid: Pid,
    },
    Dispatched {
        pid: Pid,
        slice: Ticks,
    },
    // Slice ended with work left; the process went back to the ready set
    Preempted {
        pid: Pid,
        at: Ticks,
        remaining: Ticks,
    },
    Completed {
        pid: Pid,
        at: Ticks,
    },
    // Nothing ready; the clock moved to `until` without running anything
    Idle {
        until: Ticks,
    },
}
