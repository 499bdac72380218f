use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// A single filesystem mutation, real or simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move { from: PathBuf, to: PathBuf },
    Copy { from: PathBuf, to: PathBuf },
    MakeDir(PathBuf),
    RemoveDir(PathBuf),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { from, to } => {
                write!(f, "rename {} -> {}", from.display(), to.display())
            }
            Action::Copy { from, to } => {
                write!(f, "copy {} -> {}", from.display(), to.display())
            }
            Action::MakeDir(path) => write!(f, "create directory {}", path.display()),
            Action::RemoveDir(path) => write!(f, "remove directory {}", path.display()),
        }
    }
}

/// The capability set the planner's output is applied through. `DiskOps`
/// touches the filesystem, `DryRunOps` only reports.
pub trait FileOps {
    fn move_file(&mut self, from: &Path, to: &Path) -> io::Result<()>;
    fn copy_file(&mut self, from: &Path, to: &Path) -> io::Result<()>;
    fn make_dir(&mut self, path: &Path) -> io::Result<()>;
    fn remove_dir(&mut self, path: &Path) -> io::Result<()>;

    fn is_dry_run(&self) -> bool {
        false
    }

    fn apply(&mut self, action: &Action) -> io::Result<()> {
        match action {
            Action::Move { from, to } => self.move_file(from, to),
            Action::Copy { from, to } => self.copy_file(from, to),
            Action::MakeDir(path) => self.make_dir(path),
            Action::RemoveDir(path) => self.remove_dir(path),
        }
    }
}

/// Applies actions to the real filesystem.
#[derive(Debug, Default)]
pub struct DiskOps;

impl FileOps for DiskOps {
    fn move_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        ensure_parent(to)?;
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!(
                    "Rename {} -> {} failed ({}), falling back to copy and delete",
                    from.display(),
                    to.display(),
                    err
                );
                copy_then_remove(from, to)
            }
        }
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        refuse_self_copy(from, to)?;
        ensure_parent(to)?;
        stream_copy(from, to).map(|_| ())
    }

    fn make_dir(&mut self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    /// Removes a vacated directory tree bottom-up. Any file still inside makes
    /// this fail without deleting it.
    fn remove_dir(&mut self, path: &Path) -> io::Result<()> {
        for entry in WalkDir::new(path).contents_first(true) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                fs::remove_dir(entry.path())?;
            } else {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!(
                        "directory {} is not empty: {} remains",
                        path.display(),
                        entry.path().display()
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Reports what would happen and never mutates anything.
#[derive(Debug, Default)]
pub struct DryRunOps;

impl FileOps for DryRunOps {
    fn move_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        info!("[dry-run] would rename {} -> {}", from.display(), to.display());
        Ok(())
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        info!("[dry-run] would copy {} -> {}", from.display(), to.display());
        Ok(())
    }

    fn make_dir(&mut self, path: &Path) -> io::Result<()> {
        info!("[dry-run] would create directory {}", path.display());
        Ok(())
    }

    fn remove_dir(&mut self, path: &Path) -> io::Result<()> {
        info!("[dry-run] would remove directory {}", path.display());
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Move by copying: the new file gets the original's permission bits before
/// the original is deleted.
pub(crate) fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    refuse_self_copy(from, to)?;
    ensure_parent(to)?;
    let permissions = fs::metadata(from)?.permissions();
    stream_copy(from, to)?;
    fs::set_permissions(to, permissions)?;
    fs::remove_file(from)
}

/// Creating the target would truncate the source when both name the same file.
fn refuse_self_copy(from: &Path, to: &Path) -> io::Result<()> {
    if to.exists() && fs::canonicalize(from)? == fs::canonicalize(to)? {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} and {} are the same file", from.display(), to.display()),
        ));
    }
    Ok(())
}

fn stream_copy(from: &Path, to: &Path) -> io::Result<u64> {
    let mut src = File::open(from)?;
    let mut dst = File::create(to)?;
    io::copy(&mut src, &mut dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_move_creates_missing_target_folder() {
        let tmp = tempdir().unwrap();
        let from = tmp.path().join("Old.txt");
        let to = tmp.path().join("deep/er/new.txt");
        fs::write(&from, "payload").unwrap();

        DiskOps.move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "payload");
    }

    #[test]
    fn test_copy_leaves_source_untouched() {
        let tmp = tempdir().unwrap();
        let from = tmp.path().join("Source File.txt");
        let to = tmp.path().join("out/source-file.txt");
        fs::write(&from, "keep me").unwrap();

        DiskOps.copy_file(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(&from).unwrap(), "keep me");
        assert_eq!(fs::read_to_string(&to).unwrap(), "keep me");
    }

    #[test]
    fn test_remove_dir_removes_empty_tree() {
        let tmp = tempdir().unwrap();
        let old = tmp.path().join("Old");
        fs::create_dir_all(old.join("nested/empty")).unwrap();

        DiskOps.remove_dir(&old).unwrap();
        assert!(!old.exists());
    }

    #[test]
    fn test_remove_dir_refuses_when_files_remain() {
        let tmp = tempdir().unwrap();
        let old = tmp.path().join("Old");
        fs::create_dir_all(old.join("nested")).unwrap();
        fs::write(old.join("nested/left.txt"), "still here").unwrap();

        assert!(DiskOps.remove_dir(&old).is_err());
        assert!(old.join("nested/left.txt").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let tmp = tempdir().unwrap();
        let from = tmp.path().join("A File.txt");
        fs::write(&from, "x").unwrap();
        let mut ops = DryRunOps;

        ops.apply(&Action::Move {
            from: from.clone(),
            to: tmp.path().join("sub/a-file.txt"),
        })
        .unwrap();
        ops.apply(&Action::MakeDir(tmp.path().join("made"))).unwrap();
        ops.apply(&Action::RemoveDir(tmp.path().to_path_buf())).unwrap();

        assert!(from.exists());
        assert!(!tmp.path().join("sub").exists());
        assert!(!tmp.path().join("made").exists());
        assert!(ops.is_dry_run());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_then_remove_keeps_permissions_and_drops_source() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let from = tmp.path().join("Script.sh");
        fs::write(&from, "#!/bin/sh\necho hi\n").unwrap();
        fs::set_permissions(&from, fs::Permissions::from_mode(0o750)).unwrap();
        let to = tmp.path().join("elsewhere/script.sh");

        copy_then_remove(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "#!/bin/sh\necho hi\n");
        let mode = fs::metadata(&to).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }

    #[test]
    fn test_copy_then_remove_refuses_same_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("only.txt");
        fs::write(&path, "only copy").unwrap();

        assert!(copy_then_remove(&path, &path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "only copy");
    }

    #[test]
    fn test_copy_onto_itself_fails_without_truncating() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("precious.txt");
        fs::write(&path, "precious data").unwrap();
        let same = tmp.path().join(".").join("precious.txt");

        let err = DiskOps.copy_file(&path, &same).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "precious data");
    }

    #[test]
    fn test_action_display() {
        let action = Action::Move {
            from: PathBuf::from("a/B.txt"),
            to: PathBuf::from("a/b.txt"),
        };
        assert_eq!(action.to_string(), "rename a/B.txt -> a/b.txt");
    }
}
