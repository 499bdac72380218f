use indicatif::{ProgressBar, ProgressStyle};
use slugfiles_core::ProgressReporter;
use std::sync::Mutex;
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif progress bars.
///
/// - Scan phase: spinner (unknown total files upfront)
/// - Execute and directory phases: progress bars (totals known from the plan)
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
    dry_run: bool,
}

impl CliReporter {
    pub fn new(dry_run: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            dry_run,
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn update(&self, done: usize, total: usize) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                if pb.length() != Some(total as u64) {
                    pb.set_length(total as u64);
                }
                pb.set_position(done as u64);
            }
        }
    }

    fn bar(&self, total: usize, label: &str) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        let template = format!("  {{spinner:.cyan}} {label} [{{bar:30.cyan/dim}}] {{pos}}/{{len}}");
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸─")
            .tick_chars(TICK_CHARS);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    fn verb(&self) -> &'static str {
        if self.dry_run {
            "Simulated"
        } else {
            "Applied"
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self) {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS);
        pb.set_style(style);
        pb.set_message("Scanning files...");
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_scan_complete(&self, total_files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} files in {:.2}s",
            total_files, duration_secs
        );
    }

    fn on_plan_complete(&self, operations: usize, collisions: usize) {
        if collisions > 0 {
            eprintln!(
                "  \x1b[33m!\x1b[0m {} operations planned, {} target names collide",
                operations, collisions
            );
        } else {
            eprintln!("  \x1b[32m✓\x1b[0m {} operations planned", operations);
        }
    }

    fn on_execute_start(&self, total_operations: usize) {
        self.set_bar(self.bar(total_operations, "Renaming"));
    }

    fn on_execute_progress(&self, done: usize, total: usize) {
        self.update(done, total);
    }

    fn on_execute_complete(&self, applied: usize, failed: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m {} {} file operations ({} failed) in {:.2}s",
            self.verb(),
            applied,
            failed,
            duration_secs
        );
    }

    fn on_restructure_start(&self, directories: usize) {
        self.set_bar(self.bar(directories, "Directories"));
    }

    fn on_restructure_progress(&self, done: usize, total: usize) {
        self.update(done, total);
    }

    fn on_restructure_complete(&self, renamed: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m {} {} directory renames in {:.2}s",
            self.verb(),
            renamed,
            duration_secs
        );
    }
}
