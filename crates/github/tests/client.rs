//! GithubClient against a mock GitHub API.

use std::time::Duration;

use github::{GithubClient, GithubConfig};
use httpmock::prelude::*;
use pipeline::{
    CommittedQuery, IssueLookup, IssueState, OwnerLogin, RepositoryFullName, RepositoryListing,
    RepositoryLookup, RepositoryRef,
};
use serde_json::json;

fn client_for(server: &MockServer) -> GithubClient {
    GithubClient::new(GithubConfig {
        api_base: server.base_url(),
        request_timeout: Duration::from_secs(5),
        user_agent: "issuelens-tests".into(),
    })
    .unwrap()
}

fn query(text: &str) -> CommittedQuery {
    CommittedQuery::new(text).unwrap()
}

#[tokio::test]
async fn test_lookup_repository_resolves_canonical_name() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/octocat/hello-world")
                .header("user-agent", "issuelens-tests")
                .header("accept", "application/vnd.github+json");
            then.status(200).json_body(json!({
                "id": 1296269,
                "name": "Hello-World",
                "full_name": "octocat/Hello-World",
                "description": "This your first repo!",
                "html_url": "https://github.com/octocat/Hello-World",
                "open_issues_count": 3,
                "private": false
            }));
        })
        .await;

    let outcome = client_for(&server)
        .lookup_repository(&query("octocat/hello-world"))
        .await
        .unwrap();

    mock.assert_async().await;
    let RepositoryRef::Found(repository) = outcome else {
        panic!("expected a repository, got {outcome:?}");
    };
    assert_eq!(repository.full_name.as_str(), "octocat/Hello-World");
    assert_eq!(repository.open_issues_count, 3);
}

#[tokio::test]
async fn test_lookup_repository_maps_404_to_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/doesnotexist123");
            then.status(404).json_body(json!({ "message": "Not Found" }));
        })
        .await;

    let outcome = client_for(&server)
        .lookup_repository(&query("octocat/doesnotexist123"))
        .await
        .unwrap();

    assert_eq!(outcome, RepositoryRef::NotFound);
}

#[tokio::test]
async fn test_lookup_repository_without_owner_is_not_found_without_request() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500);
        })
        .await;

    let outcome = client_for(&server)
        .lookup_repository(&query("doesnotexist123"))
        .await
        .unwrap();

    // A request would have answered 500 and surfaced as an error.
    assert_eq!(outcome, RepositoryRef::NotFound);
}

#[tokio::test]
async fn test_lookup_repository_server_error_is_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/Hello-World");
            then.status(502);
        })
        .await;

    let err = client_for(&server)
        .lookup_repository(&query("octocat/Hello-World"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "status");
}

#[tokio::test]
async fn test_lookup_repository_malformed_body_is_deserialization_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/Hello-World");
            then.status(200).body("<html>rate limited</html>");
        })
        .await;

    let err = client_for(&server)
        .lookup_repository(&query("octocat/Hello-World"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "deserialization");
}

#[tokio::test]
async fn test_lookup_issues_preserves_returned_order() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/Hello-World/issues");
            then.status(200).json_body(json!([
                { "number": 3, "title": "third", "state": "open", "user": { "login": "a" } },
                { "number": 1, "title": "first", "state": "closed", "user": null },
                { "number": 2, "title": "second", "state": "open" }
            ]));
        })
        .await;

    let full_name = RepositoryFullName::new("octocat/Hello-World").unwrap();
    let issues = client_for(&server).lookup_issues(&full_name).await.unwrap();

    let titles: Vec<&str> = issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "first", "second"]);
    assert_eq!(issues[1].state, IssueState::Closed);
    assert!(issues[1].author.is_none());
}

#[tokio::test]
async fn test_lookup_issues_for_disabled_tracker_is_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/Hello-World/issues");
            then.status(410).json_body(json!({ "message": "Issues are disabled for this repo" }));
        })
        .await;

    let full_name = RepositoryFullName::new("octocat/Hello-World").unwrap();
    let err = client_for(&server).lookup_issues(&full_name).await.unwrap_err();

    assert_eq!(err.kind(), "status");
}

#[tokio::test]
async fn test_list_repositories_for_owner() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octocat/repos");
            then.status(200).json_body(json!([
                { "id": 1, "name": "Hello-World", "full_name": "octocat/Hello-World" },
                { "id": 2, "name": "Spoon-Knife", "full_name": "octocat/Spoon-Knife" }
            ]));
        })
        .await;

    let owner = OwnerLogin::new("octocat").unwrap();
    let repositories = client_for(&server).list_repositories(&owner).await.unwrap();

    let names: Vec<&str> = repositories.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Hello-World", "Spoon-Knife"]);
}

#[tokio::test]
async fn test_list_repositories_for_unknown_owner_is_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/nobody-here/repos");
            then.status(404);
        })
        .await;

    let owner = OwnerLogin::new("nobody-here").unwrap();
    let repositories = client_for(&server).list_repositories(&owner).await.unwrap();

    assert!(repositories.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = GithubClient::new(GithubConfig {
        api_base: "http://127.0.0.1:1".into(),
        request_timeout: Duration::from_secs(2),
        user_agent: "issuelens-tests".into(),
    })
    .unwrap();

    let err = client
        .lookup_repository(&query("octocat/Hello-World"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "transport");
}
