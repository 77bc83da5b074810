//! bitb-project-sync core library
//!
//! Keeps a directory of git checkouts in step with the repositories of a
//! Bitbucket project: the listing is fetched from the project repos API (or
//! read from a saved copy), one clone URL is picked per repository, and each
//! repository is cloned when missing or pulled with rebase when present.

pub mod collect;
pub mod commands;
pub mod listing;
pub mod reconcile;
pub mod source;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::collect::{EligibilityPolicy, GitUrls, collect_git_urls};
    pub use crate::commands::{SyncCommand, SyncOptions, SyncReport};
    pub use crate::listing::{Link, Project, Repository, RepositoryListing, decode_listing};
    pub use crate::reconcile::{
        GitExecutor, GitInvocation, GitOutput, ReconcileReport, Reconciler, RepoOutcome,
        SyncAction, SystemGit,
    };
    pub use crate::source::{PayloadSource, SourceError};
}
