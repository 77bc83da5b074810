//! Collect one clone URL per repository from a decoded listing.

use std::collections::BTreeMap;

use crate::listing::RepositoryListing;

/// Clone protocols accepted for synchronization.
const GIT_PROTOCOLS: [&str; 2] = ["ssh", "git"];

/// What to do when the listing contains a repository that is not an
/// AVAILABLE git repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EligibilityPolicy {
    /// Stop at the first ineligible repository; it and every repository
    /// after it are left out.
    #[default]
    StopAtFirstIneligible,
    /// Leave out the ineligible repository and keep going.
    SkipIneligible,
}

/// Repository name to clone URL, ordered by name.
pub type GitUrls = BTreeMap<String, String>;

/// Map each eligible repository to its `ssh` or `git` clone URL.
///
/// When several matching clone links exist, the last one in payload order
/// wins. Repositories without a matching link are omitted.
pub fn collect_git_urls(listing: &RepositoryListing, policy: EligibilityPolicy) -> GitUrls {
    let mut urls = GitUrls::new();

    for repo in &listing.values {
        if !repo.is_eligible() {
            match policy {
                EligibilityPolicy::StopAtFirstIneligible => {
                    tracing::debug!(
                        "Stopping at {} (scmId={}, state={})",
                        repo.name,
                        repo.scm_id,
                        repo.state
                    );
                    break;
                }
                EligibilityPolicy::SkipIneligible => {
                    tracing::debug!(
                        "Skipping {} (scmId={}, state={})",
                        repo.name,
                        repo.scm_id,
                        repo.state
                    );
                    continue;
                }
            }
        }

        for link in repo.clone_links() {
            if GIT_PROTOCOLS.contains(&link.name.as_str()) {
                urls.insert(repo.name.clone(), link.href.clone());
            }
        }

        if !urls.contains_key(&repo.name) {
            tracing::debug!("No ssh or git clone link for {}", repo.name);
        }
    }

    urls
}
