use serde::{Deserialize, Serialize};

use crate::core::state::{Pid, Ticks};

/// Input record for one process. The engine copies it and never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    // Lower is more urgent; only the priority discipline reads it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl Process {
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority: None,
        }
    }

    pub fn with_priority(pid: Pid, arrival: Ticks, burst: Ticks, priority: i64) -> Self {
        Self {
            priority: Some(priority),
            ..Self::new(pid, arrival, burst)
        }
    }
}
