use crate::config::RunOptions;
use crate::descriptor::FileDescriptor;
use crate::error::Error;
use crate::executor::{DiskOps, DryRunOps, FileOps};
use crate::planner::{self, OperationKind, PlannedOperation};
use crate::progress::ProgressReporter;
use crate::report::RunReport;
use crate::restructure;
use crate::scanner;
use crate::slug::{SlugOracle, Slugger};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct RenameEngine {
    options: RunOptions,
    oracle: Box<dyn SlugOracle>,
}

impl RenameEngine {
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            oracle: Box::new(Slugger),
        }
    }

    pub fn with_oracle(mut self, oracle: impl SlugOracle + 'static) -> Self {
        self.oracle = Box::new(oracle);
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Enumerate the source tree. Fails before anything is touched when the
    /// source root is missing or not a directory.
    pub fn scan(&self) -> Result<Vec<FileDescriptor>, Error> {
        scanner::scan(
            &self.options.source_root,
            self.options.recursive,
            &self.options.ignore_patterns,
        )
    }

    pub fn plan(&self, files: &[FileDescriptor]) -> Vec<PlannedOperation> {
        planner::plan(files, &self.options, self.oracle.as_ref())
    }

    /// Run the full pipeline:
    /// 1. Scan the source tree
    /// 2. Plan and apply file renames or copies
    /// 3. Rename directories deepest first (recursive in-place runs only)
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunReport, Error> {
        reporter.on_scan_start();
        let scan_start = Instant::now();
        let files = self.scan()?;
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(files.len(), scan_duration.as_secs_f64());

        let mut report = self.run_files(files, reporter);
        report.scan_duration = scan_duration;
        Ok(report)
    }

    /// Plan and apply against an already-scanned inventory, using disk or
    /// dry-run operations according to the options.
    pub fn run_files(
        &self,
        files: Vec<FileDescriptor>,
        reporter: &dyn ProgressReporter,
    ) -> RunReport {
        if self.options.dry_run {
            self.run_with(files, &mut DryRunOps, reporter)
        } else {
            self.run_with(files, &mut DiskOps, reporter)
        }
    }

    pub fn run_with(
        &self,
        files: Vec<FileDescriptor>,
        ops: &mut dyn FileOps,
        reporter: &dyn ProgressReporter,
    ) -> RunReport {
        let mut report = RunReport {
            dry_run: ops.is_dry_run(),
            files_scanned: files.len(),
            ..RunReport::default()
        };

        let planned = self.plan(&files);
        let collisions = planner::find_collisions(&planned);
        for (target, sources) in &collisions {
            warn!(
                "{} sources map to {}, the last one wins: {:?}",
                sources.len(),
                target.display(),
                sources
            );
        }
        report.operations_planned = planned.len();
        report.collisions = collisions.len();
        reporter.on_plan_complete(planned.len(), collisions.len());
        info!(
            "Planned {} operations for {} files",
            planned.len(),
            files.len()
        );

        reporter.on_execute_start(planned.len());
        let execute_start = Instant::now();
        let mut inventory: Vec<PathBuf> =
            files.iter().map(|f| f.full_path().to_path_buf()).collect();
        let slots: HashMap<PathBuf, usize> = inventory
            .iter()
            .enumerate()
            .map(|(idx, path)| (path.clone(), idx))
            .collect();
        let mut applied = 0;
        for (done, op) in planned.iter().enumerate() {
            if report.apply(ops, op.action()) {
                applied += 1;
                if op.kind == OperationKind::Move {
                    if let Some(&idx) = slots.get(op.source.full_path()) {
                        inventory[idx] = op.target.full_path().to_path_buf();
                    }
                }
            }
            reporter.on_execute_progress(done + 1, planned.len());
        }
        report.execute_duration = execute_start.elapsed();
        reporter.on_execute_complete(
            applied,
            planned.len() - applied,
            report.execute_duration.as_secs_f64(),
        );

        if self.options.restructures_directories() {
            let dirs = restructure::collect_directories(&files, &self.options.source_root);
            debug!("{} directories to consider for renaming", dirs.len());
            reporter.on_restructure_start(dirs.len());
            let restructure_start = Instant::now();
            restructure::restructure(
                &dirs,
                &mut inventory,
                &self.options,
                self.oracle.as_ref(),
                ops,
                &mut report,
                reporter,
            );
            report.restructure_duration = restructure_start.elapsed();
            reporter.on_restructure_complete(
                report.directories_renamed,
                report.restructure_duration.as_secs_f64(),
            );
        }

        report
    }
}
