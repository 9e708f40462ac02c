//! Worker identity value object

use serde::{Deserialize, Serialize};

/// A specialist identity bound to a generation capability (Value Object)
///
/// A worker is nothing more than its identity: who it is, what it is
/// trying to achieve, and the background that frames its answers. It is
/// immutable once constructed and shared read-only across concurrent
/// case runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    role: String,
    goal: String,
    backstory: String,
}

impl Worker {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }
}

impl std::fmt::Display for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.role)
    }
}
