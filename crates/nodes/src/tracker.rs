//! Facades that wire the conditioner and the dispatcher together.

use std::sync::Arc;

use pipeline::{
    ConditionerConfig, ConfigurationError, Issue, IssueLookup, OutputSink, Repository,
    RepositoryListing, RepositoryLookup,
};
use tokio::sync::mpsc;
use tracing::error;

use crate::chains::{IssueChain, RepositoryListingChain};
use crate::conditioner::InputConditioner;
use crate::latest::{Chain, DispatchConfig, DispatchSummary, LatestOnly};

/// Default capacity of the channel between conditioner and dispatcher.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Settings shared by [`IssueTracker`] and [`RepositoryBrowser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    pub conditioner: ConditionerConfig,
    pub dispatch: DispatchConfig,
    /// Capacity of the committed-query channel.
    pub channel_capacity: usize,
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.conditioner.validate()?;
        if self.channel_capacity == 0 {
            return Err(ConfigurationError::new("channel capacity must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            conditioner: ConditionerConfig::default(),
            dispatch: DispatchConfig::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Raw repository names in, issue sets out.
pub struct IssueTracker {
    chain: Arc<IssueChain>,
    config: TrackerConfig,
}

impl IssueTracker {
    pub fn new(
        repositories: Arc<dyn RepositoryLookup>,
        issues: Arc<dyn IssueLookup>,
        config: TrackerConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            chain: Arc::new(IssueChain::new(repositories, issues)),
            config,
        })
    }

    /// Tracks issues for the text arriving on `raw` until it closes and the
    /// last accepted query has been answered.
    pub async fn track(
        &self,
        raw: mpsc::Receiver<String>,
        sink: Arc<dyn OutputSink<Issue>>,
    ) -> DispatchSummary {
        drive(Arc::clone(&self.chain), self.config, raw, sink).await
    }
}

/// Raw owner logins in, repository sets out.
pub struct RepositoryBrowser {
    chain: Arc<RepositoryListingChain>,
    config: TrackerConfig,
}

impl RepositoryBrowser {
    pub fn new(
        listing: Arc<dyn RepositoryListing>,
        config: TrackerConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            chain: Arc::new(RepositoryListingChain::new(listing)),
            config,
        })
    }

    pub async fn browse(
        &self,
        raw: mpsc::Receiver<String>,
        sink: Arc<dyn OutputSink<Repository>>,
    ) -> DispatchSummary {
        drive(Arc::clone(&self.chain), self.config, raw, sink).await
    }
}

async fn drive<C, T>(
    chain: Arc<C>,
    config: TrackerConfig,
    raw: mpsc::Receiver<String>,
    sink: Arc<dyn OutputSink<T>>,
) -> DispatchSummary
where
    C: Chain<T>,
    T: Send + 'static,
{
    let (committed_tx, committed_rx) = mpsc::channel(config.channel_capacity);
    let conditioner =
        tokio::spawn(InputConditioner::new(config.conditioner).run(raw, committed_tx));

    let summary = LatestOnly::new(chain, config.dispatch)
        .run(committed_rx, sink)
        .await;

    if let Err(err) = conditioner.await {
        error!(error = %err, "Input conditioner task failed");
    }
    summary
}
