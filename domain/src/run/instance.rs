//! Per-run task execution state

use crate::panel::TaskId;
use serde::{Deserialize, Serialize};

/// Lifecycle of a [`TaskInstance`]
///
/// Transitions are strictly Pending → Running → Done | Failed, driven by
/// the scheduler that owns the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Pending,
    Running,
    Done,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Done | TaskState::Failed)
    }
}

/// One concrete execution of a [`TaskSpec`](crate::panel::TaskSpec)
/// against a single case submission.
///
/// Instances are created fresh per case run and owned exclusively by that
/// run; the shared spec is never written. This is what keeps two
/// concurrent submissions from corrupting each other's prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInstance {
    spec_id: TaskId,
    state: TaskState,
    resolved_prompt: Option<String>,
    output: Option<String>,
    error: Option<String>,
}

impl TaskInstance {
    pub fn new(spec_id: TaskId) -> Self {
        Self {
            spec_id,
            state: TaskState::Pending,
            resolved_prompt: None,
            output: None,
            error: None,
        }
    }

    pub fn spec_id(&self) -> &TaskId {
        &self.spec_id
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn resolved_prompt(&self) -> Option<&str> {
        self.resolved_prompt.as_deref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mark dispatched, recording the prompt this instance was sent with
    pub fn start(&mut self, resolved_prompt: String) {
        debug_assert_eq!(self.state, TaskState::Pending);
        self.resolved_prompt = Some(resolved_prompt);
        self.state = TaskState::Running;
    }

    pub fn complete(&mut self, output: String) {
        debug_assert_eq!(self.state, TaskState::Running);
        self.output = Some(output);
        self.state = TaskState::Done;
    }

    pub fn fail(&mut self, error: String) {
        debug_assert_eq!(self.state, TaskState::Running);
        self.error = Some(error);
        self.state = TaskState::Failed;
    }
}
