#![allow(dead_code)]

pub mod git;
pub mod recorder;

use std::path::Path;

/// A repository entry in the shape returned by the project repos API.
pub fn repo_json(
    id: u64,
    name: &str,
    scm_id: &str,
    state: &str,
    clone: &[(&str, &str)],
) -> serde_json::Value {
    let clone: Vec<serde_json::Value> = clone
        .iter()
        .map(|(protocol, href)| serde_json::json!({ "href": href, "name": protocol }))
        .collect();

    serde_json::json!({
        "slug": name,
        "id": id,
        "name": name,
        "scmId": scm_id,
        "state": state,
        "statusMessage": "Available",
        "forkable": true,
        "project": { "key": "PRJ", "id": 7, "name": "Project", "public": false },
        "public": false,
        "links": {
            "clone": clone,
            "self": [ { "href": format!("https://host/projects/PRJ/repos/{name}/browse") } ]
        }
    })
}

/// An available git repository with a single ssh clone link.
pub fn git_repo_json(id: u64, name: &str, href: &str) -> serde_json::Value {
    repo_json(id, name, "git", "AVAILABLE", &[("ssh", href)])
}

/// A single, last page of `/rest/api/1.0/projects/{key}/repos`.
pub fn listing_json(values: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "size": values.len(),
        "limit": 25,
        "isLastPage": true,
        "start": 0,
        "values": values,
    })
    .to_string()
}

pub fn write_listing(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("repos.json");
    std::fs::write(&path, json).unwrap();
    path
}
