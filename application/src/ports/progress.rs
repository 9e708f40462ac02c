//! Progress notification port
//!
//! Defines the interface for reporting progress during a case run.

/// Callback for progress updates while a case run executes
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a dependency layer starts dispatching
    fn on_layer_start(&self, layer: usize, total_tasks: usize);

    /// Called when a task in the current layer reaches a terminal state
    fn on_task_complete(&self, layer: usize, role: &str, success: bool);

    /// Called when every task in a layer is terminal
    fn on_layer_complete(&self, layer: usize);

    /// Called once at the end of the run
    fn on_run_complete(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_layer_start(&self, _layer: usize, _total_tasks: usize) {}
    fn on_task_complete(&self, _layer: usize, _role: &str, _success: bool) {}
    fn on_layer_complete(&self, _layer: usize) {}
}
