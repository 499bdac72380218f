use crate::config::RunOptions;
use crate::descriptor::FileDescriptor;
use crate::executor::Action;
use crate::slug::{normalize_ext, SlugOracle};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Move,
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOperation {
    pub source: FileDescriptor,
    pub target: FileDescriptor,
    pub kind: OperationKind,
    /// False only for copies that relocate an already-canonical name.
    pub needs_rename: bool,
}

impl PlannedOperation {
    pub fn action(&self) -> Action {
        let from = self.source.full_path().to_path_buf();
        let to = self.target.full_path().to_path_buf();
        match self.kind {
            OperationKind::Move => Action::Move { from, to },
            OperationKind::Copy => Action::Copy { from, to },
        }
    }
}

/// Compute the slugified target of every file.
///
/// In-place runs emit a `Move` only for names that change. Runs with an output
/// root emit a `Copy` for every file; when recursive, each directory segment
/// between the source root and the file is slugified on the way.
///
/// Operations come back sorted by source path. Two sources that slug to the
/// same target are both kept, so the later one overwrites the earlier.
pub fn plan(
    files: &[FileDescriptor],
    options: &RunOptions,
    oracle: &dyn SlugOracle,
) -> Vec<PlannedOperation> {
    let mut ordered: Vec<&FileDescriptor> = files.iter().collect();
    ordered.sort_by(|a, b| a.full_path().cmp(b.full_path()));

    ordered
        .into_iter()
        .filter_map(|file| plan_file(file, options, oracle))
        .collect()
}

fn plan_file(
    file: &FileDescriptor,
    options: &RunOptions,
    oracle: &dyn SlugOracle,
) -> Option<PlannedOperation> {
    let new_name = format!(
        "{}{}",
        oracle.slug(file.stem(), options.case_sensitive),
        normalize_ext(file.ext(), options.case_sensitive)
    );
    let needs_rename = new_name != file.name();

    let Some(output_root) = options.output_root.as_deref() else {
        if !needs_rename {
            return None;
        }
        return Some(PlannedOperation {
            source: file.clone(),
            target: file.with_name(&new_name),
            kind: OperationKind::Move,
            needs_rename,
        });
    };

    let target_folder = if options.recursive {
        match file.folder().strip_prefix(&options.source_root) {
            Ok(relative) => output_root.join(slugify_relative(
                relative,
                oracle,
                options.case_sensitive,
            )),
            Err(_) => {
                warn!(
                    "{} is outside {}, copying to the output root",
                    file,
                    options.source_root.display()
                );
                output_root.to_path_buf()
            }
        }
    } else {
        output_root.to_path_buf()
    };

    Some(PlannedOperation {
        source: file.clone(),
        target: FileDescriptor::from_parts(target_folder, &new_name),
        kind: OperationKind::Copy,
        needs_rename,
    })
}

/// Slugify every segment of a relative path independently.
pub fn slugify_relative(
    relative: &Path,
    oracle: &dyn SlugOracle,
    case_sensitive: bool,
) -> PathBuf {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => {
                Some(slug_segment(&segment.to_string_lossy(), oracle, case_sensitive))
            }
            _ => None,
        })
        .collect()
}

/// Slug a directory name. A leading dot is kept so hidden directories stay
/// hidden.
pub fn slug_segment(name: &str, oracle: &dyn SlugOracle, case_sensitive: bool) -> String {
    match name.strip_prefix('.') {
        Some(rest) => format!(".{}", oracle.slug(rest, case_sensitive)),
        None => oracle.slug(name, case_sensitive),
    }
}

/// Target paths claimed by more than one operation, with their sources in
/// plan order. The last source listed is the one that survives.
pub fn find_collisions(ops: &[PlannedOperation]) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut by_target: BTreeMap<&Path, Vec<PathBuf>> = BTreeMap::new();
    for op in ops {
        by_target
            .entry(op.target.full_path())
            .or_default()
            .push(op.source.full_path().to_path_buf());
    }
    by_target
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(target, sources)| (target.to_path_buf(), sources))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::Slugger;

    fn file(path: &str) -> FileDescriptor {
        FileDescriptor::from_path(Path::new(path)).unwrap()
    }

    #[test]
    fn test_in_place_skips_canonical_names() {
        let files = vec![file("/root/already-fine.txt"), file("/root/My Photo.JPG")];
        let options = RunOptions::new("/root");

        let ops = plan(&files, &options, &Slugger);

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OperationKind::Move);
        assert!(ops[0].needs_rename);
        assert_eq!(ops[0].target.full_path(), Path::new("/root/my-photo.jpg"));
    }

    #[test]
    fn test_copy_mode_keeps_unchanged_names() {
        let files = vec![file("/root/already-fine.txt")];
        let options = RunOptions::new("/root").with_output(Some(PathBuf::from("/out")));

        let ops = plan(&files, &options, &Slugger);

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OperationKind::Copy);
        assert!(!ops[0].needs_rename);
        assert_eq!(ops[0].target.full_path(), Path::new("/out/already-fine.txt"));
    }

    #[test]
    fn test_flat_copy_targets_output_root() {
        let files = vec![file("/root/Sub Dir/File One.txt")];
        let options = RunOptions::new("/root").with_output(Some(PathBuf::from("/out")));

        let ops = plan(&files, &options, &Slugger);
        assert_eq!(ops[0].target.full_path(), Path::new("/out/file-one.txt"));
    }

    #[test]
    fn test_recursive_copy_slugifies_every_segment() {
        let files = vec![
            file("/root/Sub Dir/Deeper One/File One.txt"),
            file("/root/plain/ok/file-two.txt"),
        ];
        let options = RunOptions::new("/root")
            .recursive(true)
            .with_output(Some(PathBuf::from("/out")));

        let ops = plan(&files, &options, &Slugger);

        let targets: Vec<&Path> = ops.iter().map(|op| op.target.full_path()).collect();
        assert_eq!(
            targets,
            vec![
                Path::new("/out/sub-dir/deeper-one/file-one.txt"),
                Path::new("/out/plain/ok/file-two.txt"),
            ]
        );
    }

    #[test]
    fn test_in_place_recursive_keeps_folder() {
        let files = vec![file("/root/Sub Dir/File One.txt")];
        let options = RunOptions::new("/root").recursive(true);

        let ops = plan(&files, &options, &Slugger);
        assert_eq!(
            ops[0].target.full_path(),
            Path::new("/root/Sub Dir/file-one.txt")
        );
    }

    #[test]
    fn test_case_sensitive_passes_through() {
        let files = vec![file("/root/My Photo.JPG")];
        let options = RunOptions::new("/root").case_sensitive(true);

        let ops = plan(&files, &options, &Slugger);
        assert_eq!(ops[0].target.name(), "My-Photo.JPG");
    }

    #[test]
    fn test_collisions_are_reported_not_resolved() {
        let files = vec![
            file("/root/My File.txt"),
            file("/root/my_file?.txt"),
            file("/root/MY FILE.txt"),
        ];
        let options = RunOptions::new("/root");

        let ops = plan(&files, &options, &Slugger);
        assert_eq!(ops.len(), 3);

        let collisions = find_collisions(&ops);
        assert_eq!(collisions.len(), 1);
        let (target, sources) = &collisions[0];
        assert_eq!(target, Path::new("/root/my-file.txt"));
        // byte order puts "MY" before "My", so "My File.txt" wins
        assert_eq!(
            sources,
            &vec![
                PathBuf::from("/root/MY FILE.txt"),
                PathBuf::from("/root/My File.txt"),
            ]
        );
    }

    #[test]
    fn test_slugify_relative() {
        let rel = slugify_relative(Path::new("Sub Dir/Second Level"), &Slugger, false);
        assert_eq!(rel, PathBuf::from("sub-dir/second-level"));
        assert_eq!(slugify_relative(Path::new(""), &Slugger, false), PathBuf::new());
    }

    #[test]
    fn test_hidden_segments_stay_hidden() {
        assert_eq!(slug_segment(".Config Files", &Slugger, false), ".config-files");
        assert_eq!(slug_segment(".git", &Slugger, false), ".git");
        let rel = slugify_relative(Path::new(".Hidden/Sub Dir"), &Slugger, false);
        assert_eq!(rel, PathBuf::from(".hidden/sub-dir"));
    }

    #[test]
    fn test_dotfiles_need_no_rename() {
        let files = vec![file("/root/.env"), file("/root/.gitignore")];
        assert!(plan(&files, &RunOptions::new("/root"), &Slugger).is_empty());
    }
}
