//! Domain layer for consilium
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Panel
//!
//! A fixed, ordered set of task specs, each binding a worker identity to a
//! prompt template and an expected-output contract. The `depends_on`
//! declarations form a DAG whose single sink is the decision task.
//!
//! ## Case run
//!
//! One submission instantiates fresh per-run task instances, executes them
//! layer by layer, and produces a [`CaseReport`] whose decision text is
//! the overall result. Specs and workers stay immutable and shared;
//! instances never outlive their run.

pub mod core;
pub mod panel;
pub mod prompt;
pub mod run;

// Re-export commonly used types
pub use crate::core::{case::CaseInput, error::DomainError};
pub use panel::{
    medical_board, ConfigurationError, PanelGraph, TaskId, TaskSpec, Worker,
};
pub use prompt::{identity_preamble, resolve_prompt};
pub use run::{CaseReport, Decision, Opinion, TaskInstance, TaskState};
