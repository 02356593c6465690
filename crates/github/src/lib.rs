//! IssueLens GitHub infrastructure adapter.
//!
//! Implements the lookup traits defined in the [`pipeline`] crate
//! ([`RepositoryLookup`], [`IssueLookup`], [`RepositoryListing`]) against the
//! public GitHub REST API using `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. URL
//! construction, headers, status handling, and payload decoding live here;
//! the [`pipeline`] crate never sees them.
//!
//! ## Endpoints
//!
//! | Trait method | Request | Not found |
//! |--------------|---------|-----------|
//! | `lookup_repository` | `GET /repos/{owner}/{repo}` | `404` → `RepositoryRef::NotFound` |
//! | `lookup_issues` | `GET /repos/{owner}/{repo}/issues` | error status |
//! | `list_repositories` | `GET /users/{login}/repos` | `404` → empty list |
//!
//! Requests are unauthenticated, fetch only the first page, and are never
//! retried.

mod payloads;

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{
    CommittedQuery, ConfigurationError, Issue, IssueLookup, LookupError, OwnerLogin, Repository,
    RepositoryFullName, RepositoryListing, RepositoryLookup, RepositoryRef,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::payloads::{IssuePayload, RepositoryPayload};

/// Public GitHub REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LOOKUP_REPOSITORY: &str = "lookup repository";
const LOOKUP_ISSUES: &str = "lookup issues";
const LIST_REPOSITORIES: &str = "list repositories";

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    /// API root; overridden in tests and for GitHub Enterprise.
    pub api_base: String,
    pub request_timeout: Duration,
    /// Sent as `User-Agent`; GitHub rejects requests without one.
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: concat!("issuelens/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP implementation of the lookup traits.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: Url,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self, ConfigurationError> {
        let api_base = Url::parse(config.api_base.trim_end_matches('/')).map_err(|err| {
            ConfigurationError::new(format!("invalid GitHub API base '{}': {err}", config.api_base))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(ConfigurationError::new(format!(
                "GitHub API base '{}' cannot carry a path",
                config.api_base
            )));
        }
        if config.request_timeout.is_zero() {
            return Err(ConfigurationError::new("request timeout must be greater than zero"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|err| ConfigurationError::new(format!("invalid user agent: {err}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ConfigurationError::new(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { http, api_base })
    }

    /// Appends percent-encoded path segments to the API root.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a GET and returns the status with the raw body.
    async fn get(&self, operation: &str, url: Url) -> Result<(StatusCode, Vec<u8>), LookupError> {
        debug!(operation, url = %url, "GitHub request");
        let transport = |err: reqwest::Error| LookupError::Transport {
            operation: operation.to_string(),
            message: err.to_string(),
        };

        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        debug!(operation, status = status.as_u16(), bytes = body.len(), "GitHub response");
        Ok((status, body.to_vec()))
    }
}

fn decode<T: DeserializeOwned>(operation: &str, body: &[u8]) -> Result<T, LookupError> {
    serde_json::from_slice(body).map_err(|err| LookupError::Deserialization {
        operation: operation.to_string(),
        message: err.to_string(),
    })
}

fn status_error(operation: &str, status: StatusCode) -> LookupError {
    LookupError::Status {
        operation: operation.to_string(),
        status: status.as_u16(),
    }
}

/// Splits `"owner/repo"`; anything else cannot name a repository.
fn owner_and_repo(name: &str) -> Option<(&str, &str)> {
    let (owner, repo) = name.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}

#[async_trait]
impl RepositoryLookup for GithubClient {
    async fn lookup_repository(&self, name: &CommittedQuery) -> Result<RepositoryRef, LookupError> {
        let Some((owner, repo)) = owner_and_repo(name.as_str()) else {
            debug!(query = %name, "Query is not an owner/repo name");
            return Ok(RepositoryRef::NotFound);
        };

        let url = self.endpoint(&["repos", owner, repo]);
        let (status, body) = self.get(LOOKUP_REPOSITORY, url).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(RepositoryRef::NotFound);
        }
        if !status.is_success() {
            return Err(status_error(LOOKUP_REPOSITORY, status));
        }

        let payload: RepositoryPayload = decode(LOOKUP_REPOSITORY, &body)?;
        payload.into_repository(LOOKUP_REPOSITORY).map(RepositoryRef::Found)
    }
}

#[async_trait]
impl IssueLookup for GithubClient {
    async fn lookup_issues(&self, repository: &RepositoryFullName) -> Result<Vec<Issue>, LookupError> {
        let (owner, repo) =
            owner_and_repo(repository.as_str()).ok_or_else(|| LookupError::InvalidName {
                name: repository.to_string(),
            })?;

        let url = self.endpoint(&["repos", owner, repo, "issues"]);
        let (status, body) = self.get(LOOKUP_ISSUES, url).await?;
        if !status.is_success() {
            return Err(status_error(LOOKUP_ISSUES, status));
        }

        let payloads: Vec<IssuePayload> = decode(LOOKUP_ISSUES, &body)?;
        Ok(payloads.into_iter().map(Issue::from).collect())
    }
}

#[async_trait]
impl RepositoryListing for GithubClient {
    async fn list_repositories(&self, owner: &OwnerLogin) -> Result<Vec<Repository>, LookupError> {
        if owner.as_str().contains('/') {
            return Err(LookupError::InvalidName {
                name: owner.to_string(),
            });
        }

        let url = self.endpoint(&["users", owner.as_str(), "repos"]);
        let (status, body) = self.get(LIST_REPOSITORIES, url).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(status_error(LIST_REPOSITORIES, status));
        }

        let payloads: Vec<RepositoryPayload> = decode(LIST_REPOSITORIES, &body)?;
        payloads
            .into_iter()
            .map(|payload| payload.into_repository(LIST_REPOSITORIES))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_and_repo_requires_exactly_two_segments() {
        assert_eq!(owner_and_repo("octocat/Hello-World"), Some(("octocat", "Hello-World")));
        assert_eq!(owner_and_repo("react"), None);
        assert_eq!(owner_and_repo("octocat/"), None);
        assert_eq!(owner_and_repo("/Hello-World"), None);
        assert_eq!(owner_and_repo("a/b/c"), None);
    }

    #[test]
    fn test_endpoint_encodes_segments_under_base_path() {
        let client = GithubClient::new(GithubConfig {
            api_base: "https://ghe.example.com/api/v3/".into(),
            ..GithubConfig::default()
        })
        .unwrap();
        let url = client.endpoint(&["repos", "octo cat", "hello"]);
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/octo%20cat/hello");
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let bad_base = GithubConfig {
            api_base: "not a url".into(),
            ..GithubConfig::default()
        };
        assert!(GithubClient::new(bad_base).is_err());

        let zero_timeout = GithubConfig {
            request_timeout: Duration::ZERO,
            ..GithubConfig::default()
        };
        assert!(GithubClient::new(zero_timeout).is_err());
    }
}
