//! Converge the project directory with the collected clone URLs.
//!
//! Every repository is handled on its own: a failed clone or pull is logged
//! and recorded, and the next repository is processed regardless.

mod action;
mod executor;

pub use action::{GIT, GitInvocation, SyncAction};
pub use executor::{GitExecutor, GitOutput, SystemGit};

use std::path::{Path, PathBuf};

use crate::collect::GitUrls;

/// How a single repository fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Dry run: the command was logged, not run.
    Planned,
    Succeeded,
    Failed(String),
}

/// Outcome of one repository.
#[derive(Debug, Clone)]
pub struct RepoReport {
    pub name: String,
    pub action: SyncAction,
    pub invocation: Option<GitInvocation>,
    pub outcome: RepoOutcome,
}

/// Outcome of a reconciliation run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    pub repos: Vec<RepoReport>,
}

impl ReconcileReport {
    pub fn failures(&self) -> impl Iterator<Item = &RepoReport> {
        self.repos
            .iter()
            .filter(|r| matches!(r.outcome, RepoOutcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn clones(&self) -> usize {
        self.repos.iter().filter(|r| r.action.is_clone()).count()
    }

    pub fn pulls(&self) -> usize {
        self.repos.len() - self.clones()
    }
}

/// Clones missing repositories and pulls existing ones under `project_dir`.
#[derive(Debug, Clone)]
pub struct Reconciler {
    project_dir: PathBuf,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            dry_run: false,
        }
    }

    /// Log the commands instead of running them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Clone or pull every repository in `urls`, one after the other.
    ///
    /// A relative project dir is resolved against the current directory
    /// first: pulls run git from inside the checkout, where the relative
    /// `--git-dir` would no longer point at it.
    pub fn run(&self, urls: &GitUrls, executor: &dyn GitExecutor) -> ReconcileReport {
        let project_dir = match std::path::absolute(&self.project_dir) {
            Ok(absolute) => absolute,
            Err(err) => {
                tracing::warn!(
                    "Failed to resolve project dir {}: {}",
                    self.project_dir.display(),
                    err
                );
                self.project_dir.clone()
            }
        };
        tracing::debug!("Using project dir : {}", project_dir.display());

        let mut report = ReconcileReport::default();
        for (name, url) in urls {
            report
                .repos
                .push(self.reconcile_one(&project_dir, name, url, executor));
        }
        report
    }

    fn reconcile_one(
        &self,
        project_dir: &Path,
        name: &str,
        url: &str,
        executor: &dyn GitExecutor,
    ) -> RepoReport {
        let action = SyncAction::plan(project_dir, name, url);

        let invocation = match action.invocation() {
            Ok(invocation) => invocation,
            Err(err) => {
                tracing::error!("{}: {:#}", name, err);
                return RepoReport {
                    name: name.to_string(),
                    action,
                    invocation: None,
                    outcome: RepoOutcome::Failed(format!("{:#}", err)),
                };
            }
        };

        let outcome = if self.dry_run {
            tracing::info!("{}", invocation);
            RepoOutcome::Planned
        } else {
            tracing::debug!("{}", invocation);
            Self::execute(name, &invocation, executor)
        };

        RepoReport {
            name: name.to_string(),
            action,
            invocation: Some(invocation),
            outcome,
        }
    }

    fn execute(name: &str, invocation: &GitInvocation, executor: &dyn GitExecutor) -> RepoOutcome {
        match executor.execute(invocation) {
            Ok(output) => {
                let text = output.output.trim_end();
                if !text.is_empty() {
                    tracing::info!("{}", text);
                }
                if output.success {
                    RepoOutcome::Succeeded
                } else {
                    let message = match output.code {
                        Some(code) => format!("{} exited with status {}", invocation, code),
                        None => format!("{} was terminated by a signal", invocation),
                    };
                    tracing::error!("{}: {}", name, message);
                    RepoOutcome::Failed(message)
                }
            }
            Err(err) => {
                tracing::error!("{}: {:#}", name, err);
                RepoOutcome::Failed(format!("{:#}", err))
            }
        }
    }
}
