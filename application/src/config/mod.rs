//! Application configuration
//!
//! Static parameters that control use case execution. These are
//! application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Execution control parameters for a case run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Deadline for each individual generation call. Exceeding it surfaces
    /// as a timeout failure for that task. `None` disables the deadline.
    pub task_deadline: Option<Duration>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            task_deadline: Some(Duration::from_secs(180)),
        }
    }
}

impl ExecutionParams {
    pub fn with_task_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.task_deadline = deadline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.task_deadline, Some(Duration::from_secs(180)));
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default().with_task_deadline(None);
        assert!(params.task_deadline.is_none());
    }
}
