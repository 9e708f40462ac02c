//! Application layer for consilium
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    generator::{GenerationError, Generator},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_case::{RunCaseError, RunCaseUseCase};
