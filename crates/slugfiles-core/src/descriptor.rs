use std::fmt;
use std::path::{Path, PathBuf};

/// One file on disk, split into the pieces the planner works with.
///
/// `full_path == folder.join(name)` and `name == stem + ext` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileDescriptor {
    full_path: PathBuf,
    folder: PathBuf,
    name: String,
    stem: String,
    ext: String,
}

impl FileDescriptor {
    /// Build from a full path. Returns `None` when the path has no file name
    /// or the name is not valid UTF-8.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let folder = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Some(Self::from_parts(folder, name))
    }

    pub fn from_parts(folder: impl Into<PathBuf>, name: &str) -> Self {
        let folder = folder.into();
        let (stem, ext) = split_name(name);
        Self {
            full_path: folder.join(name),
            folder,
            name: name.to_string(),
            stem: stem.to_string(),
            ext: ext.to_string(),
        }
    }

    /// Same folder, different name.
    pub fn with_name(&self, name: &str) -> Self {
        Self::from_parts(self.folder.clone(), name)
    }

    /// Same name, different folder.
    pub fn with_folder(&self, folder: impl Into<PathBuf>) -> Self {
        Self::from_parts(folder, &self.name)
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Final extension including the leading dot, or empty.
    pub fn ext(&self) -> &str {
        &self.ext
    }
}

impl fmt::Display for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path.display())
    }
}

/// Split on the last dot. A name whose only dot leads it is all extension,
/// so `.env` has an empty stem and slugging leaves it alone.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        None => (name, ""),
        Some(idx) => name.split_at(idx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_splits_parts() {
        let desc = FileDescriptor::from_path(Path::new("/data/My Photos/Beach Day.JPG")).unwrap();
        assert_eq!(desc.folder(), Path::new("/data/My Photos"));
        assert_eq!(desc.name(), "Beach Day.JPG");
        assert_eq!(desc.stem(), "Beach Day");
        assert_eq!(desc.ext(), ".JPG");
        assert_eq!(desc.full_path(), desc.folder().join(desc.name()));
    }

    #[test]
    fn test_only_final_extension_is_split() {
        let desc = FileDescriptor::from_parts("/data", "archive.tar.gz");
        assert_eq!(desc.stem(), "archive.tar");
        assert_eq!(desc.ext(), ".gz");
        assert_eq!(format!("{}{}", desc.stem(), desc.ext()), desc.name());
    }

    #[test]
    fn test_dotfiles_are_all_extension() {
        let dotfile = FileDescriptor::from_parts("/home", ".bashrc");
        assert_eq!(dotfile.stem(), "");
        assert_eq!(dotfile.ext(), ".bashrc");

        let dotted = FileDescriptor::from_parts("/home", ".config.bak");
        assert_eq!(dotted.stem(), ".config");
        assert_eq!(dotted.ext(), ".bak");

        let bare = FileDescriptor::from_parts("/home", "Makefile");
        assert_eq!(bare.stem(), "Makefile");
        assert_eq!(bare.ext(), "");
    }

    #[test]
    fn test_with_name_and_folder_keep_invariants() {
        let desc = FileDescriptor::from_parts("/a", "Old Name.txt");
        let renamed = desc.with_name("old-name.txt");
        assert_eq!(renamed.full_path(), Path::new("/a/old-name.txt"));
        assert_eq!(renamed.stem(), "old-name");

        let moved = renamed.with_folder("/b/c");
        assert_eq!(moved.full_path(), Path::new("/b/c/old-name.txt"));
        assert_eq!(moved.name(), "old-name.txt");
    }
}
