use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

pub const DEFAULT_METADATA_DIR: &str = ".git";

/// Stats `root/path` and reports whether it is a directory.
pub fn is_directory(root: &Path, path: &str) -> Result<bool> {
    let full_path = root.join(path);
    let metadata = fs::metadata(&full_path).map_err(|source| Error::PathUnreadable {
        path: full_path,
        source,
    })?;
    Ok(metadata.is_dir())
}

/// Lists every regular file beneath `root/dir`, depth first.
///
/// Directories named `metadata_dir` are not descended into. Returned paths are
/// relative to `root` and use `/` as the separator. Any error during the walk
/// aborts it.
pub fn list_files_recursive(root: &Path, dir: &str, metadata_dir: &str) -> Result<Vec<String>> {
    let start = root.join(dir);
    debug!("walking {}", start.display());

    let walker = WalkDir::new(&start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !(entry.file_type().is_dir() && entry.file_name() == metadata_dir));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start.clone());
            Error::PathUnreadable {
                path,
                source: err.into(),
            }
        })?;

        if entry.file_type().is_dir() {
            continue;
        }
        files.push(relative_entry(root, entry.path()));
    }

    Ok(files)
}

fn relative_entry(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, path: &str, content: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    #[test]
    fn test_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "pkg/a.go", "package pkg");

        assert!(is_directory(temp_dir.path(), "pkg").unwrap());
        assert!(!is_directory(temp_dir.path(), "pkg/a.go").unwrap());
    }

    #[test]
    fn test_is_directory_missing_path() {
        let temp_dir = TempDir::new().unwrap();

        let err = is_directory(temp_dir.path(), "gone.txt").unwrap_err();
        assert!(matches!(err, Error::PathUnreadable { .. }));
    }

    #[test]
    fn test_list_files_prunes_metadata_dir() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "pkg/a.go", "a");
        write(temp_dir.path(), "pkg/sub/b.go", "b");
        write(temp_dir.path(), "pkg/.git/ignored", "x");
        write(temp_dir.path(), "pkg/sub/.git/HEAD", "ref");

        let files = list_files_recursive(temp_dir.path(), "pkg/", DEFAULT_METADATA_DIR).unwrap();

        assert_eq!(files, vec!["pkg/a.go", "pkg/sub/b.go"]);
    }

    #[test]
    fn test_list_files_excludes_directories() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "docs/guide.md", "guide");
        fs::create_dir_all(temp_dir.path().join("docs/empty")).unwrap();

        let files = list_files_recursive(temp_dir.path(), "docs", DEFAULT_METADATA_DIR).unwrap();

        assert_eq!(files, vec!["docs/guide.md"]);
    }

    #[test]
    fn test_list_files_keeps_files_named_like_metadata_dir() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "vendor/.git", "gitdir: ../.git/modules/vendor");

        let files = list_files_recursive(temp_dir.path(), "vendor", DEFAULT_METADATA_DIR).unwrap();

        assert_eq!(files, vec!["vendor/.git"]);
    }

    #[test]
    fn test_list_files_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();

        let err = list_files_recursive(temp_dir.path(), "nope", DEFAULT_METADATA_DIR).unwrap_err();
        assert!(matches!(err, Error::PathUnreadable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_files_aborts_on_unreadable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "pkg/a.go", "a");
        write(temp_dir.path(), "pkg/locked/b.go", "b");
        let locked = temp_dir.path().join("pkg/locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users ignore permission bits.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = list_files_recursive(temp_dir.path(), "pkg", DEFAULT_METADATA_DIR);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(Error::PathUnreadable { .. })));
    }
}
