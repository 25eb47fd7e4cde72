use crate::error::Result;
use crate::task_list::TaskListMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Successful,
    Failed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Successful => "successful",
            TaskStatus::Failed => "failed",
        }
    }

    /// Status glyph shown in the task list message.
    pub fn glyph(self) -> &'static str {
        match self {
            TaskStatus::Pending => "●",
            TaskStatus::Successful => "✓",
            TaskStatus::Failed => "✗",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// One named unit of orchestrated work.
///
/// `register` is called once when the task is added to a runner, before any
/// execution, and must only add entries to the list (header plus sub-steps,
/// keys from [`crate::names::unique_name`] so multiple instances of one task
/// type never collide). `execute` performs the work, marking its own entries
/// successful as they complete; `Ok(false)` is a handled domain failure,
/// `Err` an unexpected fault.
#[async_trait]
pub trait Task<C: Send>: Send + Sync {
    fn register(&mut self, list: &mut TaskListMessage);

    async fn execute(&self, ctx: &mut C, list: &mut TaskListMessage) -> Result<bool>;
}
