use crate::error::{Error, Result};
use crate::models::RevisionRef;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Read-only access to the version-control system backing a working tree.
pub trait VersionControl {
    /// Unified diff between the working tree and `reference`.
    fn diff(&self, reference: &RevisionRef) -> Result<String>;

    /// Paths that differ between the working tree and `reference`.
    fn changed_paths(&self, reference: &RevisionRef) -> Result<Vec<String>>;

    /// Paths not under version control and not excluded by ignore rules.
    fn untracked_paths(&self) -> Result<Vec<String>>;

    /// Content of `path` as it existed at `reference`.
    ///
    /// Returns [`Error::NotFoundAtRevision`] when the path is absent from
    /// that revision.
    fn content_at(&self, reference: &RevisionRef, path: &str) -> Result<String>;
}

/// [`VersionControl`] backed by the `git` command line tool.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new<P: AsRef<Path>>(repo_root: P) -> Self {
        Self {
            repo_root: repo_root.as_ref().to_path_buf(),
        }
    }

    /// Opens the repository containing `path`, rooted at its top level so
    /// that listed paths and local reads agree.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let toplevel = Self::new(path).run_git(&["rev-parse", "--show-toplevel"])?;
        Ok(Self::new(toplevel.trim()))
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(Error::ExternalTool {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl VersionControl for GitCli {
    fn diff(&self, reference: &RevisionRef) -> Result<String> {
        self.run_git(&["diff", reference.as_str()])
    }

    fn changed_paths(&self, reference: &RevisionRef) -> Result<Vec<String>> {
        let output = self.run_git(&["diff", "--name-only", "-z", reference.as_str()])?;
        Ok(split_paths(&output))
    }

    fn untracked_paths(&self) -> Result<Vec<String>> {
        let output = self.run_git(&["ls-files", "--others", "--exclude-standard", "-z"])?;
        Ok(split_paths(&output))
    }

    fn content_at(&self, reference: &RevisionRef, path: &str) -> Result<String> {
        let spec = format!("{}:{}", reference, path);
        self.run_git(&["show", &spec]).map_err(|err| match err {
            Error::ExternalTool { ref stderr, .. } if is_missing_path(stderr) => {
                Error::NotFoundAtRevision {
                    reference: reference.to_string(),
                    path: path.to_string(),
                }
            }
            other => other,
        })
    }
}

/// Splits NUL-terminated (`-z`) listing output into paths.
///
/// Paths are taken verbatim, unquoted. Blank segments are dropped, so output
/// consisting of nothing but whitespace yields no entries.
pub fn split_paths(output: &str) -> Vec<String> {
    output
        .split('\0')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| segment.to_string())
        .collect()
}

fn is_missing_path(stderr: &str) -> bool {
    stderr.contains("does not exist in") || stderr.contains("exists on disk, but not in")
}
