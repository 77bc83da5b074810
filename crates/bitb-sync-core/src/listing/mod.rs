//! Repository listing: the decoded payload of the project repos API.

mod schema;

pub use schema::{
    AVAILABLE_STATE, CLONE_CATEGORY, GIT_SCM_ID, Link, Project, Repository, RepositoryListing,
};

use std::io::Read;

use anyhow::Context;

/// Read the whole payload into memory, release the reader and decode it.
pub fn decode_listing<R: Read>(mut reader: R) -> anyhow::Result<RepositoryListing> {
    let mut payload = Vec::new();
    reader
        .read_to_end(&mut payload)
        .context("Failed to read repository listing")?;
    drop(reader);

    tracing::debug!("Reading JSON document ({} bytes)", payload.len());
    serde_json::from_slice(&payload).context("Failed to parse repository listing")
}
