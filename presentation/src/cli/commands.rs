//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for case reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every specialist opinion
    Full,
    /// Only the final decision
    Decision,
    /// JSON output
    Json,
}

/// CLI arguments for consilium
#[derive(Parser, Debug)]
#[command(name = "consilium")]
#[command(author, version, about = "Specialist panel - concurrent expert opinions, one decision")]
#[command(long_about = r#"
Consilium submits a case to a fixed panel of specialist workers and returns
one synthesized decision.

The run has two kinds of steps:
1. Evaluation: every independent specialist assesses the case concurrently
2. Decision: once all opinions are in, the decision maker synthesizes them

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./consilium.toml    Project-level config
3. ~/.config/consilium/config.toml   Global config

The OpenRouter credential is read from OPENROUTER_API_KEY.

Example:
  consilium "34yo female, acute abdominal pain, BP 90/60"
  consilium --output full --timeout 120 "fever of unknown origin, 3 weeks"
"#)]
pub struct Cli {
    /// The case description to submit to the panel
    pub case: Option<String>,

    /// Model to use for generation (overrides config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Per-task deadline in seconds (0 disables the deadline)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "decision")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
