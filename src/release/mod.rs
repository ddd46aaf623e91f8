//! Release run: turn commit and PR history into a changelog entry and release.
//!
//! Orchestrates changelog fetch, release marker lookup, change collection,
//! version bump, entry rendering, merge, publish, and release creation.

pub mod host;

use chrono::{DateTime, Utc};
use semver::Version;
use tracing::{debug, error, info, warn};

use crate::change::{BumpCategory, ChangeItem, classify, has_signal};
use crate::changelog::{
    EntryPosition, RenderOptions, RenderedEntry, find_release_marker, initial_document,
    merge_entry, render_entry,
};
use crate::error::{ChangelogError, ReleaseError};
use crate::version::{bump_version, format_version_tag};

pub use host::{
    CollectionWindow, CommitAuthor, PublishRequest, PullRequestState, ReleaseRequest,
    RemoteDocument, SourceHost,
};

/// Default commit message for the changelog update.
pub const DEFAULT_COMMIT_MESSAGE: &str =
    "chore(changelog): update changelog and create release [skip ci]";

/// Placeholder substituted with the new version in commit messages.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Configuration for a release run, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub git_ref: String,
    pub changelog_path: String,
    pub use_commits: bool,
    pub use_pull_requests: bool,
    /// Keep items that carry no signal word.
    pub include_unclassified: bool,
    pub pull_request_state: PullRequestState,
    pub release: bool,
    pub draft: bool,
    pub prerelease: bool,
    pub position: EntryPosition,
    pub commit_message: String,
    pub author: CommitAuthor,
    pub render: RenderOptions,
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            git_ref: "main".to_string(),
            changelog_path: "CHANGELOG.md".to_string(),
            use_commits: true,
            use_pull_requests: true,
            include_unclassified: false,
            pull_request_state: PullRequestState::default(),
            release: false,
            draft: false,
            prerelease: false,
            position: EntryPosition::default(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            author: CommitAuthor::default(),
            render: RenderOptions::default(),
            dry_run: false,
        }
    }
}

impl RunConfig {
    /// Commit message with `{version}` replaced.
    pub fn commit_message_for(&self, version: &str) -> String {
        self.commit_message.replace(VERSION_PLACEHOLDER, version)
    }
}

/// Everything computed for a new changelog entry.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    pub previous_version: Version,
    pub next_version: Version,
    /// Category that drove the bump; `None` if the version is unchanged.
    pub bump: Option<BumpCategory>,
    pub items: Vec<ChangeItem>,
    pub entry: RenderedEntry,
    pub changelog: String,
    pub published: bool,
    pub release_created: bool,
}

impl ReleasePlan {
    pub fn tag(&self) -> String {
        format_version_tag(&self.next_version)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// No changelog existed; a new one with an initial release header was
    /// created (or, in a dry run, would have been).
    Bootstrapped { changelog: String, published: bool },
    /// Dry run with nothing collected since the previous release.
    NoChanges { since: DateTime<Utc> },
    /// A new entry was generated.
    Released(ReleasePlan),
}

/// Run a release against `host` using the current time.
pub async fn run_release<H: SourceHost + ?Sized>(
    host: &H,
    config: &RunConfig,
) -> Result<RunOutcome, ReleaseError> {
    run_release_at(host, config, Utc::now()).await
}

/// Run a release against `host` as of `now`.
pub async fn run_release_at<H: SourceHost + ?Sized>(
    host: &H,
    config: &RunConfig,
    now: DateTime<Utc>,
) -> Result<RunOutcome, ReleaseError> {
    // ── Stage 1: Fetch changelog ──
    let document = host
        .fetch_changelog_document(&config.changelog_path, &config.git_ref)
        .await
        .map_err(ReleaseError::FetchFailed)?;

    let Some(document) = document else {
        warn!(path = %config.changelog_path, "Changelog not found, creating a new one");
        return bootstrap(host, config, now).await;
    };

    // ── Stage 2: Previous release ──
    let marker = find_release_marker(&document.text)
        .map_err(|e| match e {
            ChangelogError::Version(e) => ReleaseError::Version(e),
            other => ReleaseError::Changelog(other),
        })?
        .ok_or_else(|| ReleaseError::NoMarkerFound {
            path: config.changelog_path.clone(),
        })?;

    let window = CollectionWindow {
        since: marker.timestamp.and_utc(),
        until: now,
        git_ref: config.git_ref.clone(),
    };

    // ── Stage 3: Collect changes ──
    let items = collect_changes(host, config, &window).await?;

    if items.is_empty() {
        if config.dry_run {
            info!(since = %window.since, "No changes found (dry run)");
            return Ok(RunOutcome::NoChanges {
                since: window.since,
            });
        }
        error!(since = %window.since, "No changes found, nothing to publish");
        return Err(ReleaseError::NoChangesFound {
            since: window.since.to_rfc3339(),
        });
    }

    // ── Stage 4: Version bump ──
    let categories: Vec<BumpCategory> = items.iter().map(classify).collect();
    let outcome = bump_version(&marker.version, &categories);

    match outcome.applied {
        Some(category) => info!(
            from = %format_version_tag(&marker.version),
            to = %format_version_tag(&outcome.version),
            bump = category.as_str(),
            "Version bumped"
        ),
        None => warn!(
            version = %format_version_tag(&marker.version),
            "No bump detected, keeping version"
        ),
    }

    // ── Stage 5: Render and merge ──
    let entry = render_entry(&outcome.version, &now.naive_utc(), &items, &config.render);
    let changelog = merge_entry(&document.text, &entry, config.position);

    let mut plan = ReleasePlan {
        previous_version: marker.version,
        next_version: outcome.version,
        bump: outcome.applied,
        items,
        entry,
        changelog,
        published: false,
        release_created: false,
    };

    if config.dry_run {
        info!(version = %plan.tag(), "Dry run enabled, skipping publish");
        info!(entry = %plan.entry, "New entry");
        info!("Updated changelog:\n{}", plan.changelog);
        return Ok(RunOutcome::Released(plan));
    }

    // ── Stage 6: Publish ──
    let tag = plan.tag();
    host.publish_changelog_document(&PublishRequest {
        path: config.changelog_path.clone(),
        text: plan.changelog.clone(),
        revision: Some(document.revision),
        git_ref: config.git_ref.clone(),
        commit_message: config.commit_message_for(&tag),
        author: config.author.clone(),
    })
    .await
    .map_err(ReleaseError::PublishFailed)?;
    plan.published = true;
    info!(path = %config.changelog_path, "Changelog updated");

    // ── Stage 7: Release ──
    if config.release {
        if plan.bump.is_none() {
            warn!(version = %tag, "Version unchanged, skipping release creation");
        } else {
            host.create_release(&ReleaseRequest {
                tag: tag.clone(),
                git_ref: config.git_ref.clone(),
                body: format!("Release {}", tag),
                draft: config.draft,
                prerelease: config.prerelease,
            })
            .await
            .map_err(|source| ReleaseError::ReleaseCreationFailed {
                version: tag.clone(),
                source,
            })?;
            plan.release_created = true;
            info!(version = %tag, "Release created");
        }
    }

    Ok(RunOutcome::Released(plan))
}

/// Create a new changelog holding only an initial release header.
async fn bootstrap<H: SourceHost + ?Sized>(
    host: &H,
    config: &RunConfig,
    now: DateTime<Utc>,
) -> Result<RunOutcome, ReleaseError> {
    let changelog = initial_document(&now.naive_utc(), config.render.timestamp_format);

    if config.dry_run {
        info!("Dry run enabled, skipping changelog creation");
        return Ok(RunOutcome::Bootstrapped {
            changelog,
            published: false,
        });
    }

    host.publish_changelog_document(&PublishRequest {
        path: config.changelog_path.clone(),
        text: changelog.clone(),
        revision: None,
        git_ref: config.git_ref.clone(),
        commit_message: config.commit_message_for("initial release"),
        author: config.author.clone(),
    })
    .await
    .map_err(ReleaseError::PublishFailed)?;

    info!(path = %config.changelog_path, "Changelog created");

    Ok(RunOutcome::Bootstrapped {
        changelog,
        published: true,
    })
}

/// Collect commits, then pull requests, keeping those with a signal word
/// unless unclassified items are requested.
async fn collect_changes<H: SourceHost + ?Sized>(
    host: &H,
    config: &RunConfig,
    window: &CollectionWindow,
) -> Result<Vec<ChangeItem>, ReleaseError> {
    let mut items: Vec<ChangeItem> = Vec::new();

    if config.use_commits {
        let commits = host
            .collect_commits(window)
            .await
            .map_err(ReleaseError::CollectFailed)?;
        debug!(count = commits.len(), "Fetched commits");
        items.extend(commits.into_iter().map(ChangeItem::from));
    }

    if config.use_pull_requests {
        let prs = host
            .collect_pull_requests(window, config.pull_request_state)
            .await
            .map_err(ReleaseError::CollectFailed)?;
        debug!(count = prs.len(), "Fetched pull requests");
        items.extend(prs.into_iter().map(ChangeItem::from));
    }

    if !config.include_unclassified {
        items.retain(has_signal);
    }

    info!(count = items.len(), "Collected changes");
    Ok(items)
}
