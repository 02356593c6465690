//! The lookup chains run per committed query.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::normalize::{repository_or_none, results_or_empty};
use pipeline::{
    CommittedQuery, Issue, IssueLookup, IssueSet, OwnerLogin, Repository, RepositoryListing,
    RepositoryLookup, RepositorySet,
};
use tracing::{debug, info};

use crate::latest::{Chain, ChainContext};

/// Repository lookup followed by issue lookup.
///
/// Stage 2 runs only for a found repository, and is skipped when the chain
/// was superseded while stage 1 was in flight.
pub struct IssueChain {
    repositories: Arc<dyn RepositoryLookup>,
    issues: Arc<dyn IssueLookup>,
}

impl IssueChain {
    pub fn new(repositories: Arc<dyn RepositoryLookup>, issues: Arc<dyn IssueLookup>) -> Self {
        Self {
            repositories,
            issues,
        }
    }
}

#[async_trait]
impl Chain<Issue> for IssueChain {
    async fn run(&self, query: CommittedQuery, ctx: ChainContext) -> IssueSet {
        let outcome = self.repositories.lookup_repository(&query).await;
        let Some(repository) = repository_or_none(&query, outcome) else {
            return IssueSet::empty();
        };

        if ctx.is_superseded() {
            debug!(repository = %repository.full_name, "Superseded before issue lookup");
            return IssueSet::empty();
        }

        info!(repository = %repository.full_name, "Looking up issues");
        let outcome = self.issues.lookup_issues(&repository.full_name).await;
        results_or_empty("lookup issues", outcome)
    }
}

/// Lists the repositories owned by the committed login.
pub struct RepositoryListingChain {
    listing: Arc<dyn RepositoryListing>,
}

impl RepositoryListingChain {
    pub fn new(listing: Arc<dyn RepositoryListing>) -> Self {
        Self { listing }
    }
}

#[async_trait]
impl Chain<Repository> for RepositoryListingChain {
    async fn run(&self, query: CommittedQuery, _ctx: ChainContext) -> RepositorySet {
        let owner = OwnerLogin::from(query);
        info!(owner = %owner, "Listing repositories");
        let outcome = self.listing.list_repositories(&owner).await;
        results_or_empty("list repositories", outcome)
    }
}
