/// Trait for reporting run progress.
///
/// CLI implements with indicatif bars. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self) {}
    fn on_scan_complete(&self, _total_files: usize, _duration_secs: f64) {}
    fn on_plan_complete(&self, _operations: usize, _collisions: usize) {}
    fn on_execute_start(&self, _total_operations: usize) {}
    fn on_execute_progress(&self, _done: usize, _total: usize) {}
    fn on_execute_complete(&self, _applied: usize, _failed: usize, _duration_secs: f64) {}
    fn on_restructure_start(&self, _directories: usize) {}
    fn on_restructure_progress(&self, _done: usize, _total: usize) {}
    fn on_restructure_complete(&self, _renamed: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
