//! semlog - CLI entry point.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use semlog::changelog::{EntryPosition, RenderOptions, TimestampFormat};
use semlog::github::{GitHubClient, GitHubConfig, detect_repository, parse_repository_slug};
use semlog::release::{
    CommitAuthor, DEFAULT_COMMIT_MESSAGE, PullRequestState, RunConfig, RunOutcome, run_release,
};
use semlog::version::format_version_tag;

/// Generate a changelog entry and semver release from merged PRs and commits.
#[derive(Parser, Debug)]
#[command(name = "semlog")]
#[command(about = "Generate a changelog entry and semver release from merged PRs and commits")]
#[command(version)]
struct Cli {
    /// Target repository as OWNER/NAME (defaults to the origin remote)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,

    /// Branch the changelog lives on and releases target
    #[arg(short = 'b', long, default_value = "main")]
    branch: String,

    /// Path to the changelog inside the repository
    #[arg(short = 'f', long, default_value = "CHANGELOG.md")]
    file_name: String,

    /// Skip commit collection
    #[arg(long)]
    no_commits: bool,

    /// Skip pull request collection
    #[arg(long)]
    no_prs: bool,

    /// Pull request state to query; only merged PRs are ever collected
    #[arg(long, value_enum, default_value_t = PrStateArg::Closed)]
    pr_state: PrStateArg,

    /// Where to insert the new entry: top, bottom, above-previous, below-previous
    #[arg(long, default_value = "above-previous", value_parser = parse_position)]
    insert_position: EntryPosition,

    /// Commit message for the changelog update; `{version}` is replaced
    #[arg(long, default_value = DEFAULT_COMMIT_MESSAGE)]
    commit_message: String,

    /// Create a GitHub release for the new version
    #[arg(short = 'r', long)]
    release: bool,

    /// Mark the release as a draft
    #[arg(long, requires = "release")]
    draft: bool,

    /// Mark the release as a prerelease
    #[arg(long, requires = "release")]
    prerelease: bool,

    /// Compute the new entry without publishing anything
    #[arg(long)]
    dry_run: bool,

    /// Truncate commit lines longer than this (0 disables truncation)
    #[arg(long, default_value_t = 100)]
    max_commit_length: usize,

    /// Append short commit ids to commit lines
    #[arg(long)]
    commit_ids: bool,

    /// Append (#N) to pull request lines
    #[arg(long)]
    pr_numbers: bool,

    /// Write header timestamps as YYYY-MM-DD
    #[arg(long)]
    date_only: bool,

    /// Keep changes that carry no fix/feature/breaking signal
    #[arg(long)]
    include_unclassified: bool,

    /// Author name for the changelog commit
    #[arg(long)]
    author_name: Option<String>,

    /// Author email for the changelog commit
    #[arg(long)]
    author_email: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PrStateArg {
    Open,
    Closed,
    All,
}

impl From<PrStateArg> for PullRequestState {
    fn from(arg: PrStateArg) -> Self {
        match arg {
            PrStateArg::Open => PullRequestState::Open,
            PrStateArg::Closed => PullRequestState::Closed,
            PrStateArg::All => PullRequestState::All,
        }
    }
}

fn parse_position(value: &str) -> Result<EntryPosition, String> {
    value.parse().map_err(|e: semlog::ChangelogError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Resolve repository
    let (owner, repo) = match cli.repo.as_deref() {
        Some(slug) => parse_repository_slug(slug)
            .with_context(|| format!("Invalid repository '{}'. Expected OWNER/NAME", slug))?,
        None => detect_repository(Path::new("."))
            .context("Could not detect repository. Pass --repo OWNER/NAME")?,
    };

    // Step 2: Connect to GitHub
    let config = GitHubConfig::from_env(&owner, &repo)
        .context("GitHub authentication required")?;
    let client = GitHubClient::new(&config).context("Failed to create GitHub client")?;

    println!(
        "Updating {} in {}/{} on {}...",
        cli.file_name,
        client.owner(),
        client.repo(),
        cli.branch
    );

    // Step 3: Run
    let run_config = build_run_config(&cli);
    let outcome = run_release(&client, &run_config)
        .await
        .context("Changelog update failed")?;

    // Step 4: Report
    print!("{}", format_outcome(&outcome, &run_config));

    Ok(())
}

fn build_run_config(cli: &Cli) -> RunConfig {
    let default_author = CommitAuthor::default();
    let author = CommitAuthor {
        name: cli.author_name.clone().unwrap_or(default_author.name),
        email: cli.author_email.clone().unwrap_or(default_author.email),
    };

    RunConfig {
        git_ref: cli.branch.clone(),
        changelog_path: cli.file_name.clone(),
        use_commits: !cli.no_commits,
        use_pull_requests: !cli.no_prs,
        include_unclassified: cli.include_unclassified,
        pull_request_state: cli.pr_state.into(),
        release: cli.release,
        draft: cli.draft,
        prerelease: cli.prerelease,
        position: cli.insert_position,
        commit_message: cli.commit_message.clone(),
        author,
        render: RenderOptions {
            max_commit_length: (cli.max_commit_length > 0).then_some(cli.max_commit_length),
            commit_ids: cli.commit_ids,
            pr_numbers: cli.pr_numbers,
            timestamp_format: if cli.date_only {
                TimestampFormat::Date
            } else {
                TimestampFormat::DateTime
            },
        },
        dry_run: cli.dry_run,
    }
}

/// Human-readable summary of a run for stdout.
fn format_outcome(outcome: &RunOutcome, config: &RunConfig) -> String {
    let mut out = String::new();

    match outcome {
        RunOutcome::Bootstrapped { changelog, published } => {
            if *published {
                out.push_str(&format!(
                    "✓ Created {} with an initial release header\n",
                    config.changelog_path
                ));
            } else {
                out.push_str("\n--- Dry Run Output ---\n\n");
                out.push_str(changelog);
            }
        }
        RunOutcome::NoChanges { since } => {
            out.push_str(&format!("No changes found since {}. Nothing to add.\n", since));
        }
        RunOutcome::Released(plan) => {
            out.push_str(&format!(
                "Version: {} -> {}\n",
                format_version_tag(&plan.previous_version),
                plan.tag()
            ));
            out.push_str(&format!("Found {} changes\n", plan.items.len()));

            if config.dry_run {
                out.push_str("\n--- Dry Run Output ---\n\n");
                out.push_str(&format!("{}\n", plan.entry));
                out.push_str(&format!("\n--- Updated {} ---\n\n", config.changelog_path));
                out.push_str(&plan.changelog);
                return out;
            }

            if plan.published {
                out.push_str(&format!("✓ Updated {}\n", config.changelog_path));
            }
            if plan.release_created {
                out.push_str(&format!("✓ Created release {}\n", plan.tag()));
            }
        }
    }

    out
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "info".to_string(),
            1 => "info,semlog=debug".to_string(),
            _ => "debug,semlog=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose > 0)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
