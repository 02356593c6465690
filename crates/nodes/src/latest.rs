//! Switch-to-latest dispatch of lookup chains.
//!
//! [`LatestOnly`] accepts committed queries, starts one chain task per query,
//! and publishes a result only for the chain whose query is still the latest
//! accepted one. Older chains are detached (or aborted, if configured) the
//! moment a newer query is accepted; whatever they eventually produce is
//! never observed.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{
    CommittedQuery, GenerationClock, GenerationWatch, OutputSink, QueryGeneration, ResultSet,
};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, info_span, Instrument};

/// What a chain can see of the dispatcher's state.
#[derive(Debug, Clone)]
pub struct ChainContext {
    generation: QueryGeneration,
    latest: GenerationWatch,
}

impl ChainContext {
    /// The generation assigned to this chain's query.
    pub fn generation(&self) -> QueryGeneration {
        self.generation
    }

    /// `true` once a newer query has been accepted.
    ///
    /// Read at the moment of the call, not when the chain started.
    pub fn is_superseded(&self) -> bool {
        !self.latest.is_current(self.generation)
    }
}

/// One lookup chain: committed query in, result set out.
///
/// Implementations normalise every failure to an empty set themselves; the
/// dispatcher only decides whether the result is still wanted.
#[async_trait]
pub trait Chain<T>: Send + Sync + 'static {
    async fn run(&self, query: CommittedQuery, ctx: ChainContext) -> ResultSet<T>;
}

/// Settings for [`LatestOnly`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Abort the task of a superseded chain instead of letting it finish.
    ///
    /// Off by default: superseded chains run to completion and their results
    /// are dropped.
    pub abort_superseded: bool,
}

/// Counts reported when the dispatcher stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Committed queries accepted.
    pub accepted: u64,
    /// Result sets handed to the output boundary.
    pub delivered: u64,
    /// Chains discarded because a newer query arrived first.
    pub superseded: u64,
}

struct LiveChain<T> {
    generation: QueryGeneration,
    query: CommittedQuery,
    handle: JoinHandle<ResultSet<T>>,
}

/// Resolves with the live chain's output, or never if nothing is live.
async fn join_live<T>(
    live: &mut Option<LiveChain<T>>,
) -> (QueryGeneration, Result<ResultSet<T>, JoinError>) {
    match live {
        Some(chain) => (chain.generation, (&mut chain.handle).await),
        None => std::future::pending().await,
    }
}

/// Dispatches committed queries to chains with switch-to-latest semantics.
pub struct LatestOnly<C> {
    chain: Arc<C>,
    config: DispatchConfig,
}

impl<C> LatestOnly<C> {
    pub fn new(chain: Arc<C>, config: DispatchConfig) -> Self {
        Self { chain, config }
    }

    /// Runs until `committed` closes and the live chain, if any, has finished.
    ///
    /// This task is the only writer of the generation clock and the only
    /// caller of `sink`, so "is this result still the latest" is decided in
    /// the same order queries were accepted.
    pub async fn run<T>(
        self,
        mut committed: mpsc::Receiver<CommittedQuery>,
        sink: Arc<dyn OutputSink<T>>,
    ) -> DispatchSummary
    where
        C: Chain<T>,
        T: Send + 'static,
    {
        let mut clock = GenerationClock::new();
        let mut live: Option<LiveChain<T>> = None;
        let mut input_open = true;
        let mut summary = DispatchSummary::default();

        while input_open || live.is_some() {
            tokio::select! {
                query = committed.recv(), if input_open => {
                    let Some(query) = query else {
                        debug!("Committed query stream closed");
                        input_open = false;
                        continue;
                    };

                    let generation = clock.advance();
                    summary.accepted += 1;
                    if let Some(previous) = live.take() {
                        summary.superseded += 1;
                        debug!(
                            generation = %previous.generation,
                            query = %previous.query,
                            "Chain superseded"
                        );
                        if self.config.abort_superseded {
                            previous.handle.abort();
                        }
                    }

                    info!(%generation, query = %query, "Query accepted");
                    let span = info_span!("chain", %generation, query = %query);
                    let ctx = ChainContext { generation, latest: clock.watch() };
                    let chain = Arc::clone(&self.chain);
                    let task_query = query.clone();
                    let handle = tokio::spawn(
                        async move { chain.run(task_query, ctx).await }.instrument(span),
                    );
                    live = Some(LiveChain { generation, query, handle });
                }

                (generation, joined) = join_live(&mut live) => {
                    let finished = live.take();
                    if !clock.is_current(generation) {
                        debug!(%generation, "Discarding result of superseded chain");
                        continue;
                    }

                    let results = match joined {
                        Ok(results) => results,
                        Err(err) => {
                            error!(
                                %generation,
                                query = finished.as_ref().map(|c| c.query.as_str()).unwrap_or_default(),
                                error = %err,
                                "Chain task failed; delivering empty result"
                            );
                            ResultSet::empty()
                        }
                    };

                    let empty = results.is_empty();
                    info!(%generation, count = results.len(), "Delivering results");
                    sink.deliver(results);
                    if empty {
                        sink.no_results();
                    }
                    summary.delivered += 1;
                }
            }
        }

        summary
    }
}
