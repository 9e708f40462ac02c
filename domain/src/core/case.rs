//! Case input value object

use serde::{Deserialize, Serialize};

/// The case description submitted to the panel (Value Object)
///
/// Represents the free-text input that every specialist task evaluates
/// and the decision task ultimately rules on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInput {
    content: String,
}

impl CaseInput {
    /// Create a new case input
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Case input cannot be empty");
        Self { content }
    }

    /// Try to create a new case input, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the case content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for CaseInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for CaseInput {
    fn from(s: &str) -> Self {
        CaseInput::new(s)
    }
}

impl From<String> for CaseInput {
    fn from(s: String) -> Self {
        CaseInput::new(s)
    }
}
