use crate::executor::{Action, FileOps};
use std::io;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    pub action: Action,
    pub message: String,
}

/// Outcome of one run. `actions` lists, in order, every action that was
/// applied (or would have been, in a dry run).
#[derive(Debug, Default)]
pub struct RunReport {
    pub dry_run: bool,
    pub files_scanned: usize,
    pub operations_planned: usize,
    pub collisions: usize,
    pub directories_renamed: usize,
    pub actions: Vec<Action>,
    pub failures: Vec<OperationFailure>,
    pub scan_duration: Duration,
    pub execute_duration: Duration,
    pub restructure_duration: Duration,
}

impl RunReport {
    /// Apply `action` through `ops`, recording the result. Failures are logged
    /// and kept; they never abort the run.
    pub(crate) fn apply(&mut self, ops: &mut dyn FileOps, action: Action) -> bool {
        match ops.apply(&action) {
            Ok(()) => {
                debug!("{}", action);
                self.actions.push(action);
                true
            }
            Err(err) => {
                self.fail(action, err);
                false
            }
        }
    }

    fn fail(&mut self, action: Action, err: io::Error) {
        error!("Failed to {}: {}", action, err);
        self.failures.push(OperationFailure {
            action,
            message: err.to_string(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
