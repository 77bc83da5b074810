//! Where the repository listing comes from: the project repos API or a
//! JSON snapshot of it on disk.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use url::Url;

/// Client timeout for the listing request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(2);

const USER_AGENT: &str = concat!("bitb-project-sync/", env!("CARGO_PKG_VERSION"));

/// Failures of the listing source worth telling apart from plain I/O.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Bad status : {0}")]
    BadStatus(StatusCode),
    #[error("Failed to read token file {}", path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Origin of the listing payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    /// GET the listing, optionally with a bearer token read from `token_file`.
    Http {
        url: Url,
        token_file: Option<PathBuf>,
    },
    /// Read a previously saved listing.
    File(PathBuf),
}

impl PayloadSource {
    pub fn http(url: Url, token_file: Option<PathBuf>) -> Self {
        Self::Http { url, token_file }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Open the payload as a byte stream.
    pub fn open(&self) -> anyhow::Result<Box<dyn Read>> {
        match self {
            Self::Http { url, token_file } => {
                let body = fetch_listing(url, token_file.as_deref())?;
                Ok(Box::new(Cursor::new(body)))
            }
            Self::File(path) => {
                tracing::debug!("Reading project repositories json document");
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Read and trim the bearer token.
///
/// A missing file means unauthenticated access and yields `None`, as does a
/// file that holds only whitespace.
pub fn read_token(path: &Path) -> Result<Option<String>, SourceError> {
    tracing::debug!("Read token file : {}", path.display());
    if !path.exists() {
        tracing::debug!("No token file");
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path).map_err(|source| SourceError::TokenFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Token file content has been read");

    let token = raw.trim();
    if token.is_empty() {
        Ok(None)
    } else {
        Ok(Some(token.to_string()))
    }
}

/// HTTP client used for the listing request.
pub fn http_client() -> anyhow::Result<reqwest::Client> {
    tracing::debug!("Configuring HTTP client");
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Build the GET request for the listing, with a bearer token if one is set.
pub fn build_request(
    client: &reqwest::Client,
    url: &Url,
    token: Option<&str>,
) -> anyhow::Result<reqwest::Request> {
    let mut request = client.get(url.clone()).timeout(HTTP_TIMEOUT);
    if let Some(token) = token {
        tracing::debug!("Assigning authorization header");
        request = request.bearer_auth(token);
    }
    request
        .build()
        .with_context(|| format!("Failed to build request for {}", url))
}

/// Fetch the listing body. Anything but `200 OK` is an error.
pub fn fetch_listing(url: &Url, token_file: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    let token = match token_file {
        Some(path) => read_token(path)?,
        None => None,
    };

    let client = http_client()?;
    let request = build_request(&client, url, token.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))?;

    runtime.block_on(async {
        tracing::debug!("Executing HTTP request");
        let response = client
            .execute(request)
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::BadStatus(status).into());
        }

        tracing::debug!("Returning response body");
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;
        Ok::<_, anyhow::Error>(body.to_vec())
    })
}
