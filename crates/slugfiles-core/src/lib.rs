pub mod config;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod executor;
pub mod planner;
pub mod progress;
pub mod report;
pub mod restructure;
pub mod scanner;
pub mod slug;

pub use config::{AppConfig, RunOptions};
pub use descriptor::FileDescriptor;
pub use engine::RenameEngine;
pub use error::Error;
pub use executor::{Action, DiskOps, DryRunOps, FileOps};
pub use planner::{OperationKind, PlannedOperation};
pub use progress::{ProgressReporter, SilentReporter};
pub use report::{OperationFailure, RunReport};
pub use slug::{SlugOracle, Slugger};
