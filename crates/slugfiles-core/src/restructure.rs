use crate::config::RunOptions;
use crate::descriptor::FileDescriptor;
use crate::executor::{Action, FileOps};
use crate::planner::slug_segment;
use crate::progress::ProgressReporter;
use crate::report::RunReport;
use crate::slug::SlugOracle;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A directory scheduled for the rename pass.
///
/// Ordering is deepest first, ties broken by reverse order of the path
/// string (not of its components), so sorting a
/// list of these yields a safe processing order: every descendant comes
/// before its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub depth: usize,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        // rebuilt from components so equal paths also have equal strings
        let path: PathBuf = path.into().components().collect();
        Self {
            depth: path.components().count(),
            path,
        }
    }
}

impl Ord for DirectoryEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .depth
            .cmp(&self.depth)
            .then_with(|| other.path.as_os_str().cmp(self.path.as_os_str()))
    }
}

impl PartialOrd for DirectoryEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Every directory strictly below `root` that holds a scanned file, directly or
/// through a sub-directory, in processing order.
pub fn collect_directories(files: &[FileDescriptor], root: &Path) -> Vec<DirectoryEntry> {
    let mut dirs = BTreeSet::new();
    for file in files {
        for ancestor in file.folder().ancestors() {
            if ancestor == root || !ancestor.starts_with(root) {
                break;
            }
            dirs.insert(DirectoryEntry::new(ancestor));
        }
    }
    dirs.into_iter().collect()
}

/// Rename directories in place, deepest first.
///
/// `inventory` holds the current path of every known file and is kept up to
/// date as files are relocated, so a dry run makes exactly the same decisions
/// as a real one. Failures are recorded in `report` and the pass moves on.
pub fn restructure(
    dirs: &[DirectoryEntry],
    inventory: &mut [PathBuf],
    options: &RunOptions,
    oracle: &dyn SlugOracle,
    ops: &mut dyn FileOps,
    report: &mut RunReport,
    reporter: &dyn ProgressReporter,
) {
    for (done, dir) in dirs.iter().enumerate() {
        if rename_directory(&dir.path, inventory, options, oracle, ops, report) {
            report.directories_renamed += 1;
        }
        reporter.on_restructure_progress(done + 1, dirs.len());
    }
    info!("Renamed {} of {} directories", report.directories_renamed, dirs.len());
}

fn rename_directory(
    old_dir: &Path,
    inventory: &mut [PathBuf],
    options: &RunOptions,
    oracle: &dyn SlugOracle,
    ops: &mut dyn FileOps,
    report: &mut RunReport,
) -> bool {
    let (Some(parent), Some(name)) = (old_dir.parent(), old_dir.file_name()) else {
        return false;
    };
    let name = name.to_string_lossy();
    let new_name = slug_segment(&name, oracle, options.case_sensitive);
    if new_name == name {
        debug!("Directory {} already canonical", old_dir.display());
        return false;
    }
    if new_name.is_empty() || new_name == "." {
        warn!(
            "Directory name '{}' slugs to nothing, leaving {} in place",
            name,
            old_dir.display()
        );
        return false;
    }

    let new_dir = parent.join(&new_name);
    if !report.apply(ops, Action::MakeDir(new_dir.clone())) {
        return false;
    }

    for current in inventory.iter_mut() {
        let Ok(relative) = current.strip_prefix(old_dir) else {
            continue;
        };
        let destination = new_dir.join(relative);
        let action = Action::Move {
            from: current.clone(),
            to: destination.clone(),
        };
        if report.apply(ops, action) {
            *current = destination;
        }
    }

    // Files that failed to move stay behind and make this fail; nothing is
    // rolled back.
    report.apply(ops, Action::RemoveDir(old_dir.to_path_buf()));
    true
}
