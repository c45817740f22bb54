use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{clipboard, prompt, status, ReviewArgs};

#[derive(Parser)]
#[command(name = "lmdiff")]
#[command(
    version,
    about = "Package pending git changes into an LLM code review prompt",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    review: ReviewArgs,

    /// Log git invocations and file resolution to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which files would be included and where their content comes from
    Status,

    /// Keep serving a copied prompt to the clipboard
    #[command(name = "serve-clipboard", hide = true)]
    ServeClipboard,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the prompt, so logs go to stderr.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        None => prompt::run(&cli.review)?,
        Some(Commands::Status) => status::run(&cli.review)?,
        Some(Commands::ServeClipboard) => {
            clipboard::serve(std::io::stdin().lock(), std::io::stdout())?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_before_subcommand() {
        let cli = Cli::try_parse_from(["lmdiff", "--include-untracked", "status"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status)));
        assert_eq!(cli.review.include_untracked, Some(true));
    }

    #[test]
    fn test_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["lmdiff", "status", "--include-untracked=false", "-b", "dev"])
                .unwrap();
        assert!(matches!(cli.command, Some(Commands::Status)));
        assert_eq!(cli.review.include_untracked, Some(false));
        assert_eq!(cli.review.branch.as_deref(), Some("dev"));
    }

    #[test]
    fn test_no_subcommand_renders_prompt() {
        let cli = Cli::try_parse_from(["lmdiff", "-c"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.review.copy);
    }

    #[test]
    fn test_hidden_clipboard_command() {
        let cli = Cli::try_parse_from(["lmdiff", clipboard::SERVE_COMMAND]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ServeClipboard)));
    }
}
