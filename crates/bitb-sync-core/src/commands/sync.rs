//! Sync command implementation.
//!
//! Loads the repository listing, picks a clone URL per repository and
//! clones or pulls each one under the project directory.

use std::path::PathBuf;

use anyhow::Context;

use crate::collect::{EligibilityPolicy, GitUrls, collect_git_urls};
use crate::listing::decode_listing;
use crate::reconcile::{GitExecutor, ReconcileReport, Reconciler, SystemGit};
use crate::source::PayloadSource;

/// Options for the sync command
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Where the listing comes from
    pub source: PayloadSource,
    /// Root directory holding one checkout per repository
    pub project_dir: PathBuf,
    /// Log git commands instead of running them
    pub dry_run: bool,
    /// Handling of repositories that are not AVAILABLE git repositories
    pub eligibility: EligibilityPolicy,
}

impl SyncOptions {
    /// Create options syncing into the current working directory.
    pub fn new(source: PayloadSource) -> anyhow::Result<Self> {
        let project_dir =
            std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self::with_project_dir(source, project_dir))
    }

    pub fn with_project_dir(source: PayloadSource, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            project_dir: project_dir.into(),
            dry_run: false,
            eligibility: EligibilityPolicy::default(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_eligibility(mut self, eligibility: EligibilityPolicy) -> Self {
        self.eligibility = eligibility;
        self
    }
}

/// Report from a sync run
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Repositories considered, with the URL chosen for each
    pub urls: GitUrls,
    /// Per-repository outcome of the clone or pull
    pub reconcile: ReconcileReport,
}

/// Sync command orchestrator
pub struct SyncCommand<E: GitExecutor = SystemGit> {
    executor: E,
}

impl SyncCommand<SystemGit> {
    /// Create a sync command running the system git.
    pub fn new() -> Self {
        Self {
            executor: SystemGit,
        }
    }
}

impl Default for SyncCommand<SystemGit> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GitExecutor> SyncCommand<E> {
    /// Create a sync command running git through `executor`.
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run the sync.
    ///
    /// Failing to obtain or decode the listing is an error. Failing git
    /// commands are not: they are logged and show up in the report.
    pub fn execute(&self, options: &SyncOptions) -> anyhow::Result<SyncReport> {
        let reader = options.source.open()?;
        let listing = decode_listing(reader)?;
        tracing::debug!("Listing holds {} repositories", listing.values.len());

        let urls = collect_git_urls(&listing, options.eligibility);
        tracing::debug!("Collected {} clone URLs", urls.len());

        let reconcile = Reconciler::new(&options.project_dir)
            .with_dry_run(options.dry_run)
            .run(&urls, &self.executor);

        tracing::debug!(
            "Processed {} repositories ({} clone, {} pull, {} failed)",
            reconcile.repos.len(),
            reconcile.clones(),
            reconcile.pulls(),
            reconcile.failures().count()
        );

        Ok(SyncReport { urls, reconcile })
    }
}
