use crate::models::{ContentSource, Diagnostic, RevisionRef};
use crate::vcs::VersionControl;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Text stored for a file when neither the revision nor the working tree can
/// provide it.
pub const PLACEHOLDER_CONTENT: &str = "Error retrieving file content.";

/// Resolves the "original" content of a changed file.
///
/// The revision is consulted first. Files absent from it (new files) or
/// otherwise unreadable through version control fall back to the working
/// tree, and if that fails too the placeholder is returned and a
/// [`Diagnostic`] is recorded. Resolution itself never fails.
pub struct ContentResolver<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
    root: &'a Path,
}

impl<'a, V: VersionControl + ?Sized> ContentResolver<'a, V> {
    pub fn new(vcs: &'a V, root: &'a Path) -> Self {
        Self { vcs, root }
    }

    pub fn resolve(
        &self,
        reference: &RevisionRef,
        path: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> String {
        self.resolve_with_source(reference, path, diagnostics).0
    }

    pub fn resolve_with_source(
        &self,
        reference: &RevisionRef,
        path: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (String, ContentSource) {
        let revision_err = match self.vcs.content_at(reference, path) {
            Ok(content) => return (content, ContentSource::Revision),
            Err(err) => err,
        };

        if !revision_err.is_not_found_at_revision() {
            debug!("{} unavailable at {}: {}", path, reference, revision_err);
        }

        match fs::read(self.root.join(path)) {
            Ok(bytes) => (
                String::from_utf8_lossy(&bytes).into_owned(),
                ContentSource::WorkingTree,
            ),
            Err(err) => {
                warn!("Cannot retrieve content for {}: {}", path, err);
                diagnostics.push(Diagnostic::new(
                    path,
                    format!("cannot retrieve content: {}", err),
                ));
                (PLACEHOLDER_CONTENT.to_string(), ContentSource::Placeholder)
            }
        }
    }
}
