//! # lmdiff-core
//!
//! Core library for lmdiff - packages pending git changes into an LLM review
//! prompt.
//!
//! The pipeline lists changed and untracked paths through a [`VersionControl`]
//! implementation, expands directories, resolves each file's original content
//! (reference revision first, working tree second, placeholder last) and hands
//! the result to [`prompt::render`].

pub mod builder;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod resolver;
pub mod vcs;
pub mod walker;

pub use builder::{build_change_set, collect_review, BuildOptions};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{
    ChangeSet, ContentMap, ContentSource, Diagnostic, ResolvedChanges, ReviewRequest, RevisionRef,
};
pub use resolver::{ContentResolver, PLACEHOLDER_CONTENT};
pub use vcs::{GitCli, VersionControl};
