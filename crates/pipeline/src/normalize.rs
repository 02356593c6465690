//! Stage-boundary normalisation.
//!
//! Every fallible stage ends here. Absence and failure both collapse to the
//! "nothing" value of the stage (no repository, empty result set), so errors
//! never travel past the chain that produced them.

use tracing::{debug, warn};

use crate::{CommittedQuery, LookupError, Repository, RepositoryRef, ResultSet};

/// Collapses a stage 1 outcome to the repository to continue with, if any.
///
/// `NotFound` and every [`LookupError`] yield `None`. The distinction between
/// "no such repository" and "lookup failed" is only visible in the logs.
pub fn repository_or_none(
    query: &CommittedQuery,
    outcome: Result<RepositoryRef, LookupError>,
) -> Option<Repository> {
    match outcome {
        Ok(RepositoryRef::Found(repository)) => {
            debug!(query = %query, repository = %repository.full_name, "Repository resolved");
            Some(repository)
        }
        Ok(RepositoryRef::NotFound) => {
            debug!(query = %query, "Repository not found");
            None
        }
        Err(err) => {
            warn!(query = %query, error.kind = err.kind(), error = %err, "Repository lookup failed");
            None
        }
    }
}

/// Collapses a listing outcome to a result set; failures become empty.
pub fn results_or_empty<T>(
    operation: &'static str,
    outcome: Result<Vec<T>, LookupError>,
) -> ResultSet<T> {
    match outcome {
        Ok(items) => ResultSet::new(items),
        Err(err) => {
            warn!(operation, error.kind = err.kind(), error = %err, "Lookup failed; using empty result");
            ResultSet::empty()
        }
    }
}
