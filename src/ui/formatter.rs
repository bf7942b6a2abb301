//! Pure formatting functions for UI output.
//!
//! Display functions print; the `format_*` helpers build the strings and are
//! what the tests check.

use console::style;

use crate::domain::Commit;
use crate::version::VersionBump;
use crate::warning::ReleaseWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a release warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One line per commit: short hash, subject, and labels in brackets.
pub fn format_commit_line(commit: &Commit) -> String {
    let short_hash = commit.hash.get(..7).unwrap_or(&commit.hash);
    let subject = commit.subject();
    let subject = match subject.char_indices().nth(72) {
        Some((idx, _)) => format!("{}...", &subject[..idx]),
        None => subject.to_string(),
    };

    if commit.labels.is_empty() {
        format!("{} {}", short_hash, subject)
    } else {
        format!("{} {} [{}]", short_hash, subject, commit.labels.join(", "))
    }
}

/// Display the retained commits of a log parse.
pub fn display_labeled_commits(commits: &[Commit], dropped: usize) {
    println!("\n{}", style("Retained commits").bold());
    for commit in commits {
        let line = format_commit_line(commit);
        if commit.has_labels() {
            println!("  {}", style(line).green());
        } else {
            println!("  {}", line);
        }
    }

    if dropped > 0 {
        println!(
            "  {}",
            style(format!("{} head commit(s) absorbed into their pull requests", dropped)).dim()
        );
    }
}

/// Format the proposed version change (or initial version).
pub fn format_next_version(
    current: Option<&semver::Version>,
    bump: VersionBump,
    next: &semver::Version,
) -> String {
    match current {
        Some(current) => format!("{} -> {} ({})", current, next, bump),
        None => format!("{} (initial, {})", next, bump),
    }
}

/// Display the proposed version change.
pub fn display_next_version(
    current: Option<&semver::Version>,
    bump: VersionBump,
    next: &semver::Version,
) {
    println!("\n{}", style("Next version:").bold());
    println!("  {}", style(format_next_version(current, bump, next)).green());
}
