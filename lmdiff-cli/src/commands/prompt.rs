use super::{clipboard, ReviewArgs};
use anyhow::{Context, Result};
use colored::Colorize;
use lmdiff_core::{collect_review, prompt};

pub fn run(args: &ReviewArgs) -> Result<()> {
    let session = args.open()?;
    let reference = &session.options.reference;

    let review = collect_review(&session.git, &session.options)
        .with_context(|| format!("Failed to collect changes against {}", reference))?;
    let document = prompt::render(&review, session.config.instructions.as_deref());

    println!("{}", document);

    let diagnostics = &review.changes.diagnostics;
    if !diagnostics.is_empty() {
        eprintln!(
            "{} {} path(s) could not be fully resolved:",
            "warning:".yellow().bold(),
            diagnostics.len()
        );
        for diagnostic in diagnostics {
            eprintln!("  {}", diagnostic);
        }
    }

    if args.copy {
        clipboard::copy(&document)?;
        eprintln!("{}", "Prompt copied to clipboard.".green());
    }

    Ok(())
}
