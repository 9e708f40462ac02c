//! Progress reporting for case runs

use colored::Colorize;
use consilium_application::ports::progress::ProgressNotifier;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a case run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    layer_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            layer_bar: Mutex::new(None),
        }
    }

    fn layer_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn layer_display_name(layer: usize) -> String {
        // Layer 0 is always the independent specialists; the last layer
        // is the decision task. Intermediate layers only appear in
        // deeper panels.
        format!("Layer {}", layer + 1)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_layer_start(&self, layer: usize, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::layer_style());
        pb.set_prefix(Self::layer_display_name(layer));
        pb.set_message("Starting...");

        *self.layer_bar.lock().unwrap() = Some(pb);
    }

    fn on_task_complete(&self, _layer: usize, role: &str, success: bool) {
        if let Some(pb) = self.layer_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), role)
            } else {
                format!("{} {}", "x".red(), role)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_layer_complete(&self, layer: usize) {
        if let Some(pb) = self.layer_bar.lock().unwrap().take() {
            pb.finish_with_message(format!(
                "{} complete",
                Self::layer_display_name(layer).green()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_layer_start(&self, layer: usize, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::layer_display_name(layer).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _layer: usize, role: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), role);
        } else {
            println!("  {} {} (failed)", "x".red(), role);
        }
    }

    fn on_layer_complete(&self, _layer: usize) {
        println!();
    }
}
