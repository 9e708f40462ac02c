//! Per-run execution state and results.
//!
//! Everything in this module is scoped to a single case submission and
//! owned by the scheduler running it. Nothing here is shared between
//! concurrent runs.

pub mod instance;
pub mod report;

pub use instance::{TaskInstance, TaskState};
pub use report::{CaseReport, Decision, Opinion};
