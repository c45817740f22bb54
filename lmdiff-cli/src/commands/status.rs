use super::ReviewArgs;
use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use lmdiff_core::{build_change_set, ContentSource};

pub fn run(args: &ReviewArgs) -> Result<()> {
    let session = args.open()?;
    let options = &session.options;

    let changes = build_change_set(&session.git, options)
        .with_context(|| format!("Failed to list changes against {}", options.reference))?;

    println!("{}", "Review Status".bold().cyan());
    println!("  {}: {}", "Repository".bold(), options.root.display());
    println!("  {}: {}", "Reference".bold(), options.reference);
    println!(
        "  {}: {}",
        "Untracked".bold(),
        if options.include_untracked {
            "included"
        } else {
            "excluded"
        }
    );
    println!();

    if changes.contents.is_empty() {
        println!("{}", "No changes against the reference".green());
    } else {
        println!(
            "{} {}",
            "Files:".bold(),
            format!("({})", changes.contents.len()).yellow()
        );
        for path in changes.contents.keys() {
            let source = changes
                .sources
                .get(path)
                .copied()
                .unwrap_or(ContentSource::Placeholder);
            println!("  {} {}", marker(source), path);
        }
        println!();
        println!("  {}", legend());
    }

    if !changes.diagnostics.is_empty() {
        println!();
        println!("{}", "Warnings:".red().bold());
        for diagnostic in &changes.diagnostics {
            println!("  {}", diagnostic);
        }
    }

    println!();
    println!("Run {} to print the review prompt", "lmdiff".cyan());

    Ok(())
}

fn marker(source: ContentSource) -> ColoredString {
    match source {
        ContentSource::Revision => "~".yellow(),
        ContentSource::WorkingTree => "+".green(),
        ContentSource::Placeholder => "!".red(),
    }
}

fn legend() -> String {
    [
        ContentSource::Revision,
        ContentSource::WorkingTree,
        ContentSource::Placeholder,
    ]
    .into_iter()
    .map(|source| format!("{} {}", marker(source), source.as_str()))
    .collect::<Vec<_>>()
    .join("   ")
}
