//! Core search domain for IssueLens.
//!
//! This crate contains every domain concept, newtype identifier, value type,
//! and error type used throughout the search pipeline, plus the traits the
//! remote collaborators and the output boundary implement. Infrastructure
//! crates implement the traits defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate performs no network I/O.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`CommittedQuery`, `RepositoryFullName`, `QueryGeneration`, etc.) |
//! | [`types`] | Value types (`Repository`, `Issue`, `ResultSet`, `Timestamp`) |
//! | [`errors`] | `LookupError` and `ConfigurationError` |
//! | [`ports`] | Collaborator traits and the output boundary |
//! | [`conditioner`] | Change filter and quiet-window configuration |
//! | [`generation`] | Single-writer "latest accepted query" clock |
//! | [`normalize`] | Failure-to-empty collapse at each stage boundary |
//! | [`fakes`] | Scripted in-memory collaborators for tests |

pub mod conditioner;
pub mod errors;
pub mod fakes;
pub mod generation;
pub mod identifiers;
pub mod normalize;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use conditioner::{ChangeFilter, ConditionerConfig, DEFAULT_QUIET_WINDOW};
pub use errors::{ConfigurationError, LookupError};
pub use generation::{GenerationClock, GenerationWatch};
pub use identifiers::{
    CommittedQuery, IssueNumber, OwnerLogin, QueryGeneration, RepositoryFullName,
    RepositoryNumericId, SessionId,
};
pub use ports::{IssueLookup, OutputSink, RepositoryListing, RepositoryLookup};
pub use types::{
    Issue, IssueSet, IssueState, Repository, RepositoryRef, RepositorySet, ResultSet, Timestamp,
};
