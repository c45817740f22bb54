use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A branch, tag or commit the working tree is compared against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionRef(String);

impl RevisionRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RevisionRef {
    fn default() -> Self {
        Self("main".to_string())
    }
}

impl fmt::Display for RevisionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RevisionRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Changed paths in listing order: tracked first, then untracked.
pub type ChangeSet = Vec<String>;

/// Resolved file content keyed by repository-relative path.
pub type ContentMap = BTreeMap<String, String>;

/// Where the text stored for a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Revision,
    WorkingTree,
    Placeholder,
}

impl ContentSource {
    pub fn as_str(&self) -> &str {
        match self {
            ContentSource::Revision => "revision",
            ContentSource::WorkingTree => "working-tree",
            ContentSource::Placeholder => "placeholder",
        }
    }
}

/// A non-fatal problem with a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedChanges {
    pub change_set: ChangeSet,
    pub contents: ContentMap,
    pub sources: BTreeMap<String, ContentSource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedChanges {
    pub(crate) fn insert(&mut self, path: String, content: String, source: ContentSource) {
        self.sources.insert(path.clone(), source);
        self.contents.insert(path, content);
    }
}

/// Everything the prompt formatter needs for one run.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub reference: RevisionRef,
    pub diff: String,
    pub changes: ResolvedChanges,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_ref_defaults_to_main() {
        assert_eq!(RevisionRef::default().as_str(), "main");
    }

    #[test]
    fn test_revision_ref_deserializes_from_plain_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            reference: RevisionRef,
        }

        let parsed: Wrapper = toml::from_str("reference = \"origin/develop\"").unwrap();
        assert_eq!(parsed.reference, RevisionRef::new("origin/develop"));
    }

    #[test]
    fn test_insert_overwrites_previous_entry() {
        let mut changes = ResolvedChanges::default();
        changes.insert("a.txt".into(), "first".into(), ContentSource::Revision);
        changes.insert("a.txt".into(), "second".into(), ContentSource::WorkingTree);

        assert_eq!(changes.contents.len(), 1);
        assert_eq!(changes.contents["a.txt"], "second");
        assert_eq!(changes.sources["a.txt"], ContentSource::WorkingTree);
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::new("src/lib.rs", "missing");
        assert_eq!(diagnostic.to_string(), "src/lib.rs: missing");
    }
}
