use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use release_hooks::cli::orchestration::{
    run_log_parse, run_notify, run_version, ReleaseContextArgs, ReleaseWorkflowArgs,
};
use release_hooks::plugins::ReqwestTransport;
use release_hooks::warning::ReleaseWarning;
use release_hooks::{config, logger, ui};

#[derive(Parser)]
#[command(
    name = "release-hooks",
    version,
    about = "Label commits from conventional commit messages and announce releases"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the commits that drive the next release, with their labels
    Labels(RangeArgs),

    /// Compute the next version from commit labels
    Version(RangeArgs),

    /// Run after-release notifications for a released version
    Notify {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, help = "Version that was released")]
        release_version: String,

        #[arg(long, help = "Markdown file with the release notes")]
        notes_file: Option<PathBuf>,

        #[arg(long, env = "SLACK_TOKEN", hide_env_values = true, help = "Slack access token")]
        slack_token: Option<String>,

        #[arg(long, help = "Preview what would happen without posting")]
        dry_run: bool,

        #[arg(short, long, help = "Skip confirmation prompts")]
        force: bool,
    },
}

#[derive(clap::Args)]
struct RangeArgs {
    #[arg(long, help = "Start of the range (exclusive); defaults to the latest tag")]
    from: Option<String>,

    #[arg(long, default_value = "HEAD", help = "End of the range (inclusive)")]
    to: String,

    #[arg(long, default_value = ".", help = "Path inside the repository")]
    repo: PathBuf,
}

impl From<RangeArgs> for ReleaseWorkflowArgs {
    fn from(range: RangeArgs) -> Self {
        ReleaseWorkflowArgs {
            repo_path: range.repo,
            from: range.from,
            to: range.to,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Labels(range) => {
            let parsed = run_log_parse(&range.into(), &config).await?;
            ui::display_labeled_commits(&parsed.commits, parsed.dropped);
        }
        Command::Version(range) => {
            let result = run_version(&range.into(), &config).await?;
            for warning in &result.warnings {
                ui::display_warning(warning);
            }
            match (result.bump, result.next) {
                (Some(bump), Some(next)) => {
                    ui::display_next_version(result.current.as_ref(), bump, &next);
                }
                _ => ui::display_status("No release needed"),
            }
        }
        Command::Notify {
            range,
            release_version,
            notes_file,
            slack_token,
            dry_run,
            force,
        } => {
            let release_notes = match notes_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read release notes {}", path.display()))?,
                None => String::new(),
            };

            if slack_token.as_deref().map_or(true, str::is_empty) {
                ui::display_warning(&ReleaseWarning::MissingSlackToken);
            }

            if !force
                && !dry_run
                && !ui::confirm_action(&format!("Announce release {}?", release_version))?
            {
                println!("Operation cancelled by user.");
                return Ok(());
            }

            let release = ReleaseContextArgs {
                version: Some(release_version.clone()),
                release_notes,
                slack_token,
                dry_run,
            };
            run_notify(
                &range.into(),
                &config,
                release,
                Arc::new(ReqwestTransport::new()),
            )
            .await?;

            if dry_run {
                ui::display_status(&format!("Dry run: release {} was not announced", release_version));
            } else {
                ui::display_success(&format!("After-release hooks finished for {}", release_version));
            }
        }
    }

    Ok(())
}
