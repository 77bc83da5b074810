//! Listing fetched from a mock project repos endpoint.

mod support;

use std::io::Read;

use mockito::Matcher;
use tempfile::TempDir;
use url::Url;

use bitb_sync_core::commands::{SyncCommand, SyncOptions};
use bitb_sync_core::source::{PayloadSource, SourceError};

use support::recorder::RecordingGit;
use support::{git_repo_json, listing_json};

const REPOS_PATH: &str = "/rest/api/1.0/projects/PRJ/repos";

fn repos_url(server: &mockito::Server) -> Url {
    Url::parse(&format!("{}{}", server.url(), REPOS_PATH)).unwrap()
}

fn read_all(source: &PayloadSource) -> anyhow::Result<String> {
    let mut body = String::new();
    source.open()?.read_to_string(&mut body)?;
    Ok(body)
}

#[test]
fn sends_trimmed_bearer_token() {
    let temp = TempDir::new().unwrap();
    let token_file = temp.path().join("token");
    std::fs::write(&token_file, "  abc123\n").unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", REPOS_PATH)
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing_json(vec![]))
        .create();

    let body = read_all(&PayloadSource::http(repos_url(&server), Some(token_file))).unwrap();

    mock.assert();
    assert!(body.contains("\"values\":[]"));
}

#[test]
fn missing_token_file_sends_no_authorization() {
    let temp = TempDir::new().unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", REPOS_PATH)
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(listing_json(vec![]))
        .create();

    let source = PayloadSource::http(repos_url(&server), Some(temp.path().join("token")));
    read_all(&source).unwrap();

    mock.assert();
}

#[test]
fn non_ok_status_is_fatal() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", REPOS_PATH).with_status(404).create();

    let err = read_all(&PayloadSource::http(repos_url(&server), None)).unwrap_err();

    mock.assert();
    assert_eq!(err.to_string(), "Bad status : 404 Not Found");
    assert!(matches!(
        err.downcast_ref::<SourceError>(),
        Some(SourceError::BadStatus(status)) if status.as_u16() == 404
    ));
}

#[test]
fn other_success_codes_are_rejected_too() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", REPOS_PATH)
        .with_status(204)
        .create();

    let err = read_all(&PayloadSource::http(repos_url(&server), None)).unwrap_err();

    assert!(err.to_string().contains("204"));
}

#[test]
fn unreachable_host_is_fatal() {
    // Nothing listens on the discard port of the loopback interface.
    let url = Url::parse("http://127.0.0.1:9/rest/api/1.0/projects/PRJ/repos").unwrap();

    let err = read_all(&PayloadSource::http(url, None)).unwrap_err();

    assert!(err.to_string().contains("Failed to fetch"));
}

#[test]
fn sync_from_endpoint_plans_clones() {
    let temp = TempDir::new().unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", REPOS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing_json(vec![
            git_repo_json(1, "api", "ssh://git@host/api.git"),
            git_repo_json(2, "svc", "ssh://git@host/svc.git"),
        ]))
        .create();

    let options =
        SyncOptions::with_project_dir(PayloadSource::http(repos_url(&server), None), temp.path());
    let command = SyncCommand::with_executor(RecordingGit::default());
    let report = command.execute(&options).unwrap();

    mock.assert();
    assert_eq!(report.reconcile.clones(), 2);
    assert_eq!(
        command.executor().command_lines(),
        vec![
            format!(
                "git clone ssh://git@host/api.git {}",
                temp.path().join("api").display()
            ),
            format!(
                "git clone ssh://git@host/svc.git {}",
                temp.path().join("svc").display()
            ),
        ]
    );
}
