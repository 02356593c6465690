//! Newtype domain identifiers.
//!
//! Every value that has an identity in the search pipeline is a distinct
//! newtype wrapping a primitive. This keeps a [`CommittedQuery`] (text the
//! user settled on) from being passed where a [`RepositoryFullName`] (text the
//! remote system resolved) is expected, even though both are strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new value, returning `None` if the text is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers, counters).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// The per-repository issue number assigned by GitHub (`#42`).
    IssueNumber
}

u64_id! {
    /// The global numeric repository identifier assigned by GitHub.
    RepositoryNumericId
}

u64_id! {
    /// Position of an accepted query in the order queries were accepted.
    ///
    /// Generation `0` is the initial state before anything was accepted; every
    /// accepted query gets the next integer. A chain may publish only while
    /// its generation is still the latest one.
    QueryGeneration
}

impl QueryGeneration {
    /// The generation in effect before any query has been accepted.
    pub const INITIAL: Self = Self(0);

    /// Returns the generation that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one process run.
///
/// Generated fresh for every CLI invocation and attached to the root span so
/// every commit, lookup, and delivery from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a new random session identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Search text that survived the quiet-period and change filters.
    ///
    /// Never empty. Compared by exact text; `"React"` and `"react"` are
    /// different queries.
    CommittedQuery
}

string_id! {
    /// Canonical `"owner/repo"` name of a repository as reported by GitHub.
    RepositoryFullName
}

string_id! {
    /// A GitHub user or organisation login.
    OwnerLogin
}

impl From<CommittedQuery> for OwnerLogin {
    fn from(query: CommittedQuery) -> Self {
        Self(query.0)
    }
}
