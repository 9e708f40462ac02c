//! Task template types
//!
//! A [`TaskSpec`] is the immutable description of one unit of panel work:
//! the prompt template, the output contract the worker must honor, the
//! worker assigned to it, and the tasks whose outputs feed its context.
//! Specs are created once at startup and never mutated afterwards; each
//! case submission resolves them into fresh per-run instances instead
//! (see [`crate::run::TaskInstance`]).

use crate::panel::worker::Worker;
use serde::{Deserialize, Serialize};

/// Identifier of a task spec within a panel (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Create a new task id
    ///
    /// # Panics
    /// Panics if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "Task id cannot be empty");
        Self(id)
    }

    /// Try to create a new task id, returning None if invalid
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::new(s)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::new(s)
    }
}

/// Immutable template for one unit of panel work
///
/// `depends_on` order is load-bearing: upstream outputs are folded into
/// the resolved prompt in this declaration order, never completion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    id: TaskId,
    prompt_template: String,
    expected_output: String,
    worker: Worker,
    depends_on: Vec<TaskId>,
}

impl TaskSpec {
    pub fn new(
        id: impl Into<TaskId>,
        prompt_template: impl Into<String>,
        expected_output: impl Into<String>,
        worker: Worker,
    ) -> Self {
        Self {
            id: id.into(),
            prompt_template: prompt_template.into(),
            expected_output: expected_output.into(),
            worker,
            depends_on: Vec::new(),
        }
    }

    /// Declare the tasks whose outputs feed this task's context
    pub fn with_depends_on(mut self, deps: Vec<TaskId>) -> Self {
        self.depends_on = deps;
        self
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    pub fn worker(&self) -> &Worker {
        &self.worker
    }

    pub fn depends_on(&self) -> &[TaskId] {
        &self.depends_on
    }

    /// A leaf task has no dependencies and can run in the first layer
    pub fn is_leaf(&self) -> bool {
        self.depends_on.is_empty()
    }
}
