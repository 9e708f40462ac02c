//! Run result value objects - immutable outputs of a completed case run.
//!
//! - [`Opinion`] - one specialist's answer from an evaluation layer
//! - [`Decision`] - the decision task's synthesized ruling
//! - [`CaseReport`] - complete result for one case submission

use serde::{Deserialize, Serialize};

/// One specialist's opinion on the case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opinion {
    /// Id of the task that produced this opinion
    pub task_id: String,
    /// Role of the worker that produced it
    pub role: String,
    /// The opinion text
    pub content: String,
}

impl Opinion {
    pub fn new(
        task_id: impl Into<String>,
        role: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            role: role.into(),
            content: content.into(),
        }
    }
}

/// The final ruling from the decision task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Role of the decision-maker worker
    pub role: String,
    /// The synthesized final text - this is the overall run result
    pub content: String,
}

impl Decision {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Complete result of one case run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    /// The submitted case description
    pub case: String,
    /// Opinions from every non-decision task, in panel declaration order
    pub opinions: Vec<Opinion>,
    /// The final decision
    pub decision: Decision,
}

impl CaseReport {
    pub fn new(case: impl Into<String>, opinions: Vec<Opinion>, decision: Decision) -> Self {
        Self {
            case: case.into(),
            opinions,
            decision,
        }
    }

    /// The terminal output of the run
    pub fn final_text(&self) -> &str {
        &self.decision.content
    }
}
