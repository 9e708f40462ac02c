//! Panel definition - workers, task specs, and the dependency graph.
//!
//! The panel is fixed at startup: an ordered set of [`TaskSpec`]s, each
//! binding a [`Worker`] identity to a prompt template and an
//! expected-output contract. [`PanelGraph`] validates the set once and
//! derives the topological execution plan the scheduler runs from.

pub mod graph;
pub mod presets;
pub mod task_spec;
pub mod worker;

pub use graph::{ConfigurationError, PanelGraph};
pub use presets::medical_board;
pub use task_spec::{TaskId, TaskSpec};
pub use worker::Worker;
