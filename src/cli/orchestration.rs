//! Release workflows behind the CLI
//!
//! Each subcommand maps to one function here. The functions take plain
//! argument structs so they can run without clap, against any repository
//! path and any Slack transport.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::Commit;
use crate::error::Result;
use crate::git::{CommitSource, Git2CommitSource};
use crate::hooks::{HookRunner, ReleaseContext};
use crate::plugins::{ConventionalCommitsPlugin, SlackPlugin, SlackTransport};
use crate::version::{bump_version, calculate_bump, parse_version_from_tag, VersionBump};
use crate::warning::ReleaseWarning;

/// Arguments shared by every release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Path inside the repository to release
    pub repo_path: PathBuf,

    /// Start of the range (exclusive); latest reachable tag when absent
    pub from: Option<String>,

    /// End of the range (inclusive)
    pub to: String,
}

impl Default for ReleaseWorkflowArgs {
    fn default() -> Self {
        ReleaseWorkflowArgs {
            repo_path: PathBuf::from("."),
            from: None,
            to: "HEAD".to_string(),
        }
    }
}

/// Commits retained by a log parse
#[derive(Debug, Clone, PartialEq)]
pub struct LogParseResult {
    /// Ref the range started from
    pub from: Option<String>,

    /// Retained commits, oldest first
    pub commits: Vec<Commit>,

    /// Number of commits the normalizers dropped
    pub dropped: usize,
}

/// Outcome of the version workflow
#[derive(Debug, Clone, PartialEq)]
pub struct VersionResult {
    pub current: Option<semver::Version>,
    pub bump: Option<VersionBump>,
    pub next: Option<semver::Version>,
    pub warnings: Vec<ReleaseWarning>,
}

/// Parse and normalize the commit log of a range
pub async fn run_log_parse(args: &ReleaseWorkflowArgs, config: &Config) -> Result<LogParseResult> {
    let source = Git2CommitSource::open(&args.repo_path)?.until(args.to.clone());
    let from = match &args.from {
        Some(from) => Some(from.clone()),
        None => source.latest_tag()?,
    };
    let source = Arc::new(source.since(from.clone()));

    let mut runner = HookRunner::new();
    runner.register(Arc::new(ConventionalCommitsPlugin::from_config(
        config,
        source.clone(),
    )?));

    let log = source.get_git_log().await?;
    let total = log.len();
    let commits = runner.create_log_parse().normalize_commits(log).await?;
    tracing::info!(total, retained = commits.len(), "parsed commit log");

    Ok(LogParseResult {
        from,
        dropped: total - commits.len(),
        commits,
    })
}

/// Compute the next version from the labels of the retained commits
///
/// Without a parsable starting tag the next version is `0.1.0`.
pub async fn run_version(args: &ReleaseWorkflowArgs, config: &Config) -> Result<VersionResult> {
    let parsed = run_log_parse(args, config).await?;
    let mut warnings = Vec::new();

    let current = match parsed.from.as_deref() {
        Some(tag) => {
            let version = parse_version_from_tag(tag);
            if version.is_none() {
                warnings.push(ReleaseWarning::UnparsableTag {
                    tag: tag.to_string(),
                });
            }
            if parsed.commits.is_empty() {
                warnings.push(ReleaseWarning::NoNewCommits {
                    latest_tag: tag.to_string(),
                });
            }
            version
        }
        None => None,
    };

    let bump = calculate_bump(&parsed.commits, &config.labels);
    if bump.is_none() && !parsed.commits.is_empty() {
        warnings.push(ReleaseWarning::NoVersionLabels {
            commit_count: parsed.commits.len(),
        });
    }

    let next = bump.map(|bump| match &current {
        Some(current) => bump_version(current, bump),
        None => semver::Version::new(0, 1, 0),
    });

    Ok(VersionResult {
        current,
        bump,
        next,
        warnings,
    })
}

/// Run the after-release hooks for a released version
pub async fn run_notify(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    release: ReleaseContextArgs,
    transport: Arc<dyn SlackTransport>,
) -> Result<()> {
    let parsed = run_log_parse(args, config).await?;

    let mut runner = HookRunner::new();
    runner.register(Arc::new(SlackPlugin::from_config(
        config,
        release.slack_token,
        transport,
    )));

    let context = ReleaseContext::new(release.version, parsed.commits, release.release_notes)
        .dry_run(release.dry_run);
    runner.after_release(&context).await
}

/// Release details supplied to the notify workflow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseContextArgs {
    pub version: Option<String>,
    pub release_notes: String,
    pub slack_token: Option<String>,
    pub dry_run: bool,
}
