use colored::*;
use slugfiles_core::FileDescriptor;
use std::collections::BTreeMap;
use std::path::Path;

/// Render the scanned files grouped by directory, relative to `root`.
pub fn render_tree(files: &[FileDescriptor], root: &Path) -> String {
    let mut by_dir: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for file in files {
        let rel_dir = file
            .folder()
            .strip_prefix(root)
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_else(|_| file.folder().to_string_lossy().into_owned());
        by_dir.entry(rel_dir).or_default().push(file.name());
    }

    let mut lines = Vec::new();
    for (i, (dir, names)) in by_dir.iter_mut().enumerate() {
        names.sort_unstable();
        if i > 0 {
            lines.push(String::new());
        }
        let indent = if dir.is_empty() {
            ""
        } else {
            lines.push(format!("{}/", dir).bold().to_string());
            "  "
        };
        for (j, name) in names.iter().enumerate() {
            let prefix = if j == names.len() - 1 { "└── " } else { "├── " };
            lines.push(format!("{}{}{}", indent, prefix, name));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_directory() {
        colored::control::set_override(false);
        let files = vec![
            FileDescriptor::from_parts("/r/Sub Dir", "Two.txt"),
            FileDescriptor::from_parts("/r", "b.txt"),
            FileDescriptor::from_parts("/r", "a.txt"),
            FileDescriptor::from_parts("/r/Sub Dir", "One.txt"),
        ];

        let rendered = render_tree(&files, Path::new("/r"));

        assert_eq!(
            rendered,
            "├── a.txt\n└── b.txt\n\nSub Dir/\n  ├── One.txt\n  └── Two.txt"
        );
    }

    #[test]
    fn test_empty_inventory_renders_nothing() {
        assert_eq!(render_tree(&[], Path::new("/r")), "");
    }
}
