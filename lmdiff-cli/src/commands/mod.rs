pub mod clipboard;
pub mod prompt;
pub mod status;

use anyhow::{Context, Result};
use clap::Args;
use lmdiff_core::{BuildOptions, Config, GitCli, RevisionRef};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Branch, tag or commit to compare against (default: main)
    #[arg(short, long, global = true)]
    pub branch: Option<String>,

    /// Include untracked files (default: true); use --include-untracked=false to skip them
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub include_untracked: Option<bool>,

    /// Copy the prompt to the clipboard
    #[arg(short, long, global = true)]
    pub copy: bool,

    /// Any path inside the repository
    #[arg(long, global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Config file (defaults to .lmdiff.toml in the repository root)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Everything a command needs to run the pipeline.
pub struct Session {
    pub git: GitCli,
    pub config: Config,
    pub options: BuildOptions,
}

impl ReviewArgs {
    pub fn open(&self) -> Result<Session> {
        let git = GitCli::discover(&self.repo)
            .with_context(|| format!("{} is not inside a git repository", self.repo.display()))?;

        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::discover(git.repo_root()).context("Failed to load .lmdiff.toml")?,
        };
        if let Some(branch) = &self.branch {
            config.reference = RevisionRef::new(branch.as_str());
        }
        if let Some(include_untracked) = self.include_untracked {
            config.include_untracked = include_untracked;
        }

        let options = BuildOptions::from_config(git.repo_root(), &config);
        Ok(Session {
            git,
            config,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        review: ReviewArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["lmdiff"]);
        assert!(cli.review.branch.is_none());
        assert!(cli.review.include_untracked.is_none());
        assert!(!cli.review.copy);
        assert_eq!(cli.review.repo, PathBuf::from("."));
    }

    #[test]
    fn test_include_untracked_forms() {
        let cli = TestCli::parse_from(["lmdiff", "--include-untracked"]);
        assert_eq!(cli.review.include_untracked, Some(true));

        assert!(TestCli::try_parse_from(["lmdiff", "--include-untracked", "false"]).is_err());

        let cli = TestCli::parse_from(["lmdiff", "--include-untracked=false"]);
        assert_eq!(cli.review.include_untracked, Some(false));
    }

    #[test]
    fn test_short_flags() {
        let cli = TestCli::parse_from(["lmdiff", "-b", "develop", "-c"]);
        assert_eq!(cli.review.branch.as_deref(), Some("develop"));
        assert!(cli.review.copy);
    }
}
