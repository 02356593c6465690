//! In-memory fakes for the collaborator traits (testing only).
//!
//! [`ScriptedGithub`] answers lookups from a script with per-name delays on
//! the tokio clock, so tests running with paused time can place every
//! completion at an exact virtual instant. [`RecordingSink`] records what
//! reached the output boundary.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{IssueLookup, OutputSink, RepositoryListing, RepositoryLookup};
use crate::{
    CommittedQuery, Issue, IssueNumber, IssueState, LookupError, OwnerLogin, Repository,
    RepositoryFullName, RepositoryNumericId, RepositoryRef, ResultSet,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Builds a repository record whose short name is the part after the slash.
pub fn repository(full_name: &str) -> Repository {
    let name = full_name.rsplit('/').next().unwrap_or(full_name).to_string();
    Repository {
        id: RepositoryNumericId::new(full_name.len() as u64),
        full_name: RepositoryFullName::new(full_name)
            .unwrap_or_else(|| panic!("fixture repository name must not be empty")),
        name,
        description: None,
        html_url: None,
        open_issues_count: 0,
    }
}

/// Builds an open issue with the given number and title.
pub fn issue(number: u64, title: &str) -> Issue {
    Issue {
        number: IssueNumber::new(number),
        title: title.to_string(),
        state: IssueState::Open,
        html_url: None,
        author: None,
        created_at: None,
    }
}

// ---------------------------------------------------------------------------
// ScriptedGithub
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Scripted<T> {
    delay: Duration,
    outcome: Result<T, LookupError>,
}

/// Scripted implementation of every lookup trait.
///
/// Names without a script resolve to `NotFound` (repository lookup) or an
/// empty list (issue and repository listings) immediately.
#[derive(Debug, Default)]
pub struct ScriptedGithub {
    repositories: Mutex<HashMap<String, Scripted<RepositoryRef>>>,
    issues: Mutex<HashMap<String, Scripted<Vec<Issue>>>>,
    owners: Mutex<HashMap<String, Scripted<Vec<Repository>>>>,
    repository_calls: Mutex<Vec<String>>,
    issue_calls: Mutex<Vec<String>>,
    listing_calls: Mutex<Vec<String>>,
}

impl ScriptedGithub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query `name` resolves to `repository` after `delay`.
    pub fn with_repository(self, name: &str, repository: Repository, delay: Duration) -> Self {
        self.script_repository(name, delay, Ok(RepositoryRef::Found(repository)))
    }

    /// Query `name` resolves to `NotFound` after `delay`.
    pub fn with_missing_repository(self, name: &str, delay: Duration) -> Self {
        self.script_repository(name, delay, Ok(RepositoryRef::NotFound))
    }

    /// Query `name` fails with `error` after `delay`.
    pub fn with_repository_failure(self, name: &str, error: LookupError, delay: Duration) -> Self {
        self.script_repository(name, delay, Err(error))
    }

    /// Repository `full_name` lists `issues` after `delay`.
    pub fn with_issues(self, full_name: &str, issues: Vec<Issue>, delay: Duration) -> Self {
        lock(&self.issues).insert(
            full_name.to_string(),
            Scripted {
                delay,
                outcome: Ok(issues),
            },
        );
        self
    }

    /// Issue listing of `full_name` fails with `error` after `delay`.
    pub fn with_issue_failure(self, full_name: &str, error: LookupError, delay: Duration) -> Self {
        lock(&self.issues).insert(
            full_name.to_string(),
            Scripted {
                delay,
                outcome: Err(error),
            },
        );
        self
    }

    /// Owner `login` lists `repositories` after `delay`.
    pub fn with_owner_repositories(
        self,
        login: &str,
        repositories: Vec<Repository>,
        delay: Duration,
    ) -> Self {
        lock(&self.owners).insert(
            login.to_string(),
            Scripted {
                delay,
                outcome: Ok(repositories),
            },
        );
        self
    }

    /// Names passed to the repository lookup, in call order.
    pub fn repository_calls(&self) -> Vec<String> {
        lock(&self.repository_calls).clone()
    }

    /// Full names passed to the issue lookup, in call order.
    pub fn issue_calls(&self) -> Vec<String> {
        lock(&self.issue_calls).clone()
    }

    /// Logins passed to the repository listing, in call order.
    pub fn listing_calls(&self) -> Vec<String> {
        lock(&self.listing_calls).clone()
    }

    fn script_repository(
        self,
        name: &str,
        delay: Duration,
        outcome: Result<RepositoryRef, LookupError>,
    ) -> Self {
        lock(&self.repositories).insert(name.to_string(), Scripted { delay, outcome });
        self
    }
}

async fn play<T: Clone>(script: Option<Scripted<T>>, fallback: T) -> Result<T, LookupError> {
    match script {
        Some(script) => {
            if !script.delay.is_zero() {
                tokio::time::sleep(script.delay).await;
            }
            script.outcome
        }
        None => Ok(fallback),
    }
}

#[async_trait]
impl RepositoryLookup for ScriptedGithub {
    async fn lookup_repository(&self, name: &CommittedQuery) -> Result<RepositoryRef, LookupError> {
        lock(&self.repository_calls).push(name.to_string());
        let script = lock(&self.repositories).get(name.as_str()).cloned();
        play(script, RepositoryRef::NotFound).await
    }
}

#[async_trait]
impl IssueLookup for ScriptedGithub {
    async fn lookup_issues(&self, repository: &RepositoryFullName) -> Result<Vec<Issue>, LookupError> {
        lock(&self.issue_calls).push(repository.to_string());
        let script = lock(&self.issues).get(repository.as_str()).cloned();
        play(script, Vec::new()).await
    }
}

#[async_trait]
impl RepositoryListing for ScriptedGithub {
    async fn list_repositories(&self, owner: &OwnerLogin) -> Result<Vec<Repository>, LookupError> {
        lock(&self.listing_calls).push(owner.to_string());
        let script = lock(&self.owners).get(owner.as_str()).cloned();
        play(script, Vec::new()).await
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// Output boundary that keeps every delivered result set.
#[derive(Debug)]
pub struct RecordingSink<T> {
    delivered: Mutex<Vec<ResultSet<T>>>,
    no_results: Mutex<usize>,
}

impl<T> Default for RecordingSink<T> {
    fn default() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            no_results: Mutex::new(0),
        }
    }
}

impl<T: Clone> RecordingSink<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delivered result set, in delivery order.
    pub fn delivered(&self) -> Vec<ResultSet<T>> {
        lock(&self.delivered).clone()
    }

    /// Number of times the empty-result signal fired.
    pub fn no_results_count(&self) -> usize {
        *lock(&self.no_results)
    }
}

impl<T: Send> OutputSink<T> for RecordingSink<T> {
    fn deliver(&self, results: ResultSet<T>) {
        lock(&self.delivered).push(results);
    }

    fn no_results(&self) {
        *lock(&self.no_results) += 1;
    }
}
