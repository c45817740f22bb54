use crate::config::Config;
use crate::error::Result;
use crate::models::{Diagnostic, ResolvedChanges, ReviewRequest, RevisionRef};
use crate::resolver::ContentResolver;
use crate::vcs::VersionControl;
use crate::walker;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Working tree root; relative paths and local reads are resolved here.
    pub root: PathBuf,
    pub reference: RevisionRef,
    pub include_untracked: bool,
    pub metadata_dir: String,
}

impl BuildOptions {
    pub fn new(root: impl Into<PathBuf>, reference: RevisionRef) -> Self {
        Self {
            root: root.into(),
            reference,
            include_untracked: true,
            metadata_dir: walker::DEFAULT_METADATA_DIR.to_string(),
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            reference: config.reference.clone(),
            include_untracked: config.include_untracked,
            metadata_dir: config.metadata_dir.clone(),
        }
    }

    pub fn with_untracked(mut self, include_untracked: bool) -> Self {
        self.include_untracked = include_untracked;
        self
    }
}

/// Collects the changed paths and resolves the original content of every
/// file they cover.
///
/// Only failures to list changed or untracked paths are returned as errors.
/// Problems with individual entries are recorded as diagnostics and the
/// entry is skipped.
pub fn build_change_set<V: VersionControl + ?Sized>(
    vcs: &V,
    options: &BuildOptions,
) -> Result<ResolvedChanges> {
    let mut paths = vcs.changed_paths(&options.reference)?;
    if options.include_untracked {
        paths.extend(vcs.untracked_paths()?);
    }
    debug!("{} candidate paths", paths.len());

    let resolver = ContentResolver::new(vcs, &options.root);
    let mut changes = ResolvedChanges::default();

    for path in paths {
        if path.trim().is_empty() {
            continue;
        }

        let is_dir = match walker::is_directory(&options.root, &path) {
            Ok(is_dir) => is_dir,
            Err(err) => {
                warn!("Could not determine if {} is a directory: {}", path, err);
                changes.diagnostics.push(Diagnostic::new(
                    &path,
                    format!("could not determine if path is a directory: {}", err),
                ));
                continue;
            }
        };

        let files = if is_dir {
            match walker::list_files_recursive(&options.root, &path, &options.metadata_dir) {
                Ok(files) => files,
                Err(err) => {
                    warn!("Could not read directory {}: {}", path, err);
                    changes
                        .diagnostics
                        .push(Diagnostic::new(&path, format!("could not read directory: {}", err)));
                    continue;
                }
            }
        } else {
            vec![path.clone()]
        };

        for file in files {
            let (content, source) =
                resolver.resolve_with_source(&options.reference, &file, &mut changes.diagnostics);
            changes.insert(file, content, source);
        }
        changes.change_set.push(path);
    }

    Ok(changes)
}

/// Runs the whole pipeline: the overall diff followed by the change set.
pub fn collect_review<V: VersionControl + ?Sized>(
    vcs: &V,
    options: &BuildOptions,
) -> Result<ReviewRequest> {
    let diff = vcs.diff(&options.reference)?;
    let changes = build_change_set(vcs, options)?;

    info!(
        "Resolved {} files from {} changed paths against {}",
        changes.contents.len(),
        changes.change_set.len(),
        options.reference
    );

    Ok(ReviewRequest {
        reference: options.reference.clone(),
        diff,
        changes,
    })
}
