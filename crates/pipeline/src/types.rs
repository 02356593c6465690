//! Shared value types for the IssueLens search domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the records the remote lookups produce and the result sets delivered to the
//! output boundary. None of them are persisted; each lives for one query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{IssueNumber, OwnerLogin, RepositoryFullName, RepositoryNumericId};

// ---------------------------------------------------------------------------
// Remote records
// ---------------------------------------------------------------------------

/// A repository resolved by the repository lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// GitHub's numeric identifier for the repository.
    pub id: RepositoryNumericId,

    /// Canonical `"owner/repo"` name. Stage 2 is always invoked with this value,
    /// never with the text the user typed.
    pub full_name: RepositoryFullName,

    /// Short repository name without the owner prefix.
    pub name: String,

    /// Free-form description, if the owner set one.
    pub description: Option<String>,

    /// Browser URL of the repository.
    pub html_url: Option<String>,

    /// Open issue count as reported alongside the repository.
    pub open_issues_count: u64,
}

/// Whether an issue is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Open,
    Closed,
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
        }
    }
}

/// An issue belonging to a resolved repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Per-repository issue number.
    pub number: IssueNumber,

    /// Issue title; the only field every consumer is guaranteed to render.
    pub title: String,

    pub state: IssueState,

    /// Browser URL of the issue.
    pub html_url: Option<String>,

    /// Login of the user who opened the issue.
    pub author: Option<OwnerLogin>,

    pub created_at: Option<Timestamp>,
}

/// Outcome of resolving a committed query against the remote system.
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryRef {
    /// The query named an existing repository.
    Found(Repository),
    /// The lookup completed and reported that no such repository exists.
    NotFound,
}

// ---------------------------------------------------------------------------
// Result sets
// ---------------------------------------------------------------------------

/// An ordered, possibly empty sequence of records delivered for one query.
///
/// An empty set is a meaningful value: it tells the output boundary that the
/// settled query produced nothing, which is distinct from "no update".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet<T>(Vec<T>);

/// Issues delivered for one committed query.
pub type IssueSet = ResultSet<Issue>;

/// Repositories delivered for one committed owner login.
pub type RepositorySet = ResultSet<Repository>;

impl<T> ResultSet<T> {
    /// Wraps records in the order the remote system returned them.
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    /// The empty result, used for every not-found and failure path.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for ResultSet<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> IntoIterator for ResultSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResultSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
