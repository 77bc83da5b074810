//! Serde schema for the Bitbucket `projects/{key}/repos` payload.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Link category holding the clone URLs of a repository.
pub const CLONE_CATEGORY: &str = "clone";

/// SCM identifier of git-backed repositories.
pub const GIT_SCM_ID: &str = "git";

/// Repository state reported once a repository is ready to be cloned.
pub const AVAILABLE_STATE: &str = "AVAILABLE";

/// One page of the repository listing.
///
/// Only `values` drives synchronization. The paging fields are kept so a
/// snapshot round-trips, but no follow-up page is ever requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryListing {
    pub size: u32,
    pub limit: u32,
    pub is_last_page: bool,
    pub start: u32,
    pub next_page_start: Option<u32>,
    pub values: Vec<Repository>,
}

/// A repository entry of the listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Repository {
    pub id: u64,
    /// Used verbatim as the local directory name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub scm_id: String,
    pub state: String,
    pub project: Project,
    pub links: HashMap<String, Vec<Link>>,
}

impl Repository {
    /// A repository takes part in synchronization only when it is a git
    /// repository in the `AVAILABLE` state.
    pub fn is_eligible(&self) -> bool {
        self.scm_id == GIT_SCM_ID && self.state == AVAILABLE_STATE
    }

    /// Links of the `clone` category, in payload order.
    pub fn clone_links(&self) -> &[Link] {
        self.links
            .get(CLONE_CATEGORY)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Project owning a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
    pub links: HashMap<String, Vec<Link>>,
}

/// A hyperlink. `name` carries the protocol label for clone links
/// (`ssh`, `http`, `git`) and is absent on `self` links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    pub name: String,
}

impl Link {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: name.into(),
        }
    }
}
