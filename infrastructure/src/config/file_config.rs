//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into validated domain
//! types before use.

use consilium_domain::{ConfigurationError, PanelGraph, TaskSpec, Worker};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("generator model name cannot be empty")]
    EmptyModelName,

    #[error("task id cannot be empty")]
    EmptyTaskId,

    #[error("task {0}: role cannot be empty")]
    EmptyRole(String),

    #[error(transparent)]
    Panel(#[from] ConfigurationError),
}

/// Raw generator configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// Model identifier sent to the OpenRouter API
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// API key - usually supplied via `OPENROUTER_API_KEY`
    pub api_key: Option<String>,
    /// Deadline in seconds for each generation call (0 is invalid)
    pub timeout_seconds: Option<u64>,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            model: "meta-llama/codellama-34b-instruct".to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key: None,
            timeout_seconds: Some(180),
        }
    }
}

impl FileGeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format name (full, decision, json)
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// One task entry of a custom panel from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTaskConfig {
    pub id: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// Prompt template; `{case}` is substituted with the case input
    pub prompt: String,
    pub expected_output: String,
    pub depends_on: Vec<String>,
}

/// Raw panel configuration from TOML
///
/// An empty task list means "use the built-in panel".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePanelConfig {
    pub tasks: Vec<FileTaskConfig>,
}

impl FilePanelConfig {
    pub fn is_configured(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Convert the raw task list into a validated panel graph.
    ///
    /// Graph-level problems (cycles, unknown dependencies, wrong sink
    /// count) surface as [`ConfigurationError`] and are fatal at startup.
    pub fn to_panel(&self) -> Result<PanelGraph, ConfigValidationError> {
        let mut specs = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if task.id.trim().is_empty() {
                return Err(ConfigValidationError::EmptyTaskId);
            }
            if task.role.trim().is_empty() {
                return Err(ConfigValidationError::EmptyRole(task.id.clone()));
            }
            let spec = TaskSpec::new(
                task.id.as_str(),
                task.prompt.as_str(),
                task.expected_output.as_str(),
                Worker::new(&task.role, &task.goal, &task.backstory),
            )
            .with_depends_on(task.depends_on.iter().map(|d| d.as_str().into()).collect());
            specs.push(spec);
        }
        Ok(PanelGraph::new(specs)?)
    }
}

/// Complete raw configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub generator: FileGeneratorConfig,
    pub output: FileOutputConfig,
    pub panel: FilePanelConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.generator.validate()?;
        if self.panel.is_configured() {
            self.panel.to_panel()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.generator.model, "meta-llama/codellama-34b-instruct");
        assert_eq!(config.generator.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.generator.timeout_seconds, Some(180));
        assert!(config.output.color);
        assert!(!config.panel.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = FileConfig::default();
        config.generator.timeout_seconds = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_panel_from_toml() {
        let config: FileConfig = toml::from_str(
            r#"
            [[panel.tasks]]
            id = "triage"
            role = "Triage Nurse"
            goal = "Classify urgency"
            backstory = "Years of ED triage."
            prompt = "Triage the case: {case}"
            expected_output = "An urgency grade"

            [[panel.tasks]]
            id = "lead"
            role = "Lead Clinician"
            goal = "Decide"
            backstory = "Senior attending."
            prompt = "Decide on {case}"
            expected_output = "A decision"
            depends_on = ["triage"]
            "#,
        )
        .unwrap();

        assert!(config.panel.is_configured());
        let panel = config.panel.to_panel().unwrap();
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.decision_task().as_str(), "lead");
    }

    #[test]
    fn test_panel_with_cycle_rejected() {
        let config: FileConfig = toml::from_str(
            r#"
            [[panel.tasks]]
            id = "a"
            role = "A"
            prompt = "p"
            expected_output = "o"
            depends_on = ["b"]

            [[panel.tasks]]
            id = "b"
            role = "B"
            prompt = "p"
            expected_output = "o"
            depends_on = ["a"]
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.panel.to_panel(),
            Err(ConfigValidationError::Panel(
                ConfigurationError::CyclicDependency(_)
            ))
        ));
    }

    #[test]
    fn test_empty_task_id_rejected() {
        let panel = FilePanelConfig {
            tasks: vec![FileTaskConfig {
                id: "  ".to_string(),
                role: "A".to_string(),
                ..Default::default()
            }],
        };
        assert!(matches!(
            panel.to_panel(),
            Err(ConfigValidationError::EmptyTaskId)
        ));
    }
}
