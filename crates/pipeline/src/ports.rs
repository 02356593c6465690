//! Collaborator traits the pipeline depends on and exposes.
//!
//! Infrastructure crates implement the lookup traits; the composition root
//! implements [`OutputSink`]. The pipeline sees nothing else of transport,
//! wire formats, or rendering.

use async_trait::async_trait;

use crate::{
    CommittedQuery, Issue, LookupError, OwnerLogin, Repository, RepositoryFullName, RepositoryRef,
    ResultSet,
};

/// Stage 1: resolves a committed query to a repository.
///
/// Idempotent and free of side effects on the remote system.
#[async_trait]
pub trait RepositoryLookup: Send + Sync {
    /// Returns [`RepositoryRef::NotFound`] when the lookup completed but no
    /// repository matches; `Err` only when no answer could be obtained.
    async fn lookup_repository(&self, name: &CommittedQuery) -> Result<RepositoryRef, LookupError>;
}

/// Stage 2: lists the issues of a resolved repository.
#[async_trait]
pub trait IssueLookup: Send + Sync {
    /// Issues are returned in the order the remote system lists them.
    async fn lookup_issues(&self, repository: &RepositoryFullName) -> Result<Vec<Issue>, LookupError>;
}

/// Lists the public repositories owned by a user or organisation.
#[async_trait]
pub trait RepositoryListing: Send + Sync {
    async fn list_repositories(&self, owner: &OwnerLogin) -> Result<Vec<Repository>, LookupError>;
}

/// The output boundary.
///
/// Receives exactly one result set per committed query that was not
/// superseded, in commit order. Calls arrive from the dispatcher task only,
/// never concurrently.
pub trait OutputSink<T>: Send + Sync {
    /// Accepts the result set for the latest query. May be empty.
    fn deliver(&self, results: ResultSet<T>);

    /// Fired right after an empty set was delivered. Never fired for
    /// superseded queries.
    fn no_results(&self) {}
}
