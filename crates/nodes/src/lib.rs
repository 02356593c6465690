//! IssueLens orchestration layer.
//!
//! This crate turns the pure pieces of the [`pipeline`] crate into running
//! tasks: the [`InputConditioner`] waits out the quiet window and commits
//! queries, [`LatestOnly`] runs one lookup chain per committed query and lets
//! only the latest one publish, and [`IssueTracker`] / [`RepositoryBrowser`]
//! wire the two together over channels.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Nodes sequence calls between the domain logic in
//! [`pipeline`] and the collaborator traits (repository lookup, issue lookup,
//! output sink). They contain no domain rules of their own.
//!
//! ## Task Layout
//!
//! ```text
//! raw text ──mpsc──▶ InputConditioner ──mpsc──▶ LatestOnly ──▶ OutputSink
//!                    (owns ChangeFilter)        (owns GenerationClock)
//!                                                   │ spawn per query
//!                                                   ▼
//!                                             Chain (stage 1 → stage 2)
//! ```

pub mod chains;
pub mod conditioner;
pub mod latest;
pub mod tracker;

pub use chains::{IssueChain, RepositoryListingChain};
pub use conditioner::InputConditioner;
pub use latest::{Chain, ChainContext, DispatchConfig, DispatchSummary, LatestOnly};
pub use tracker::{IssueTracker, RepositoryBrowser, TrackerConfig, DEFAULT_CHANNEL_CAPACITY};
