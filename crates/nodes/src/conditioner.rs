//! The input conditioner: raw text in, committed queries out.

use pipeline::{ChangeFilter, CommittedQuery, ConditionerConfig};
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, trace};

/// Turns a burst-prone stream of raw text into committed queries.
///
/// A value commits only after it has stayed the latest non-empty input for
/// the whole quiet window, and only if it differs from the previous commit.
/// Empty values are dropped on arrival: they neither commit nor restart the
/// quiet window.
#[derive(Debug, Clone)]
pub struct InputConditioner {
    config: ConditionerConfig,
}

impl InputConditioner {
    pub fn new(config: ConditionerConfig) -> Self {
        Self { config }
    }

    /// Runs until `raw` is closed or `committed` has no receiver.
    ///
    /// The task owns the [`ChangeFilter`] outright, so every commit decision
    /// happens on this one task. A value still inside its quiet window when
    /// `raw` closes is flushed through the change filter before returning.
    pub async fn run(
        self,
        mut raw: mpsc::Receiver<String>,
        committed: mpsc::Sender<CommittedQuery>,
    ) {
        let window = self.config.quiet_window;
        let mut filter = ChangeFilter::new();
        let mut pending: Option<String> = None;

        let quiet = sleep(window);
        tokio::pin!(quiet);

        loop {
            tokio::select! {
                biased;

                value = raw.recv() => match value {
                    Some(value) if value.is_empty() => {
                        trace!("Dropping empty input");
                    }
                    Some(value) => {
                        if let Some(abandoned) = pending.replace(value) {
                            trace!(abandoned = %abandoned, "Input replaced inside quiet window");
                        }
                        quiet.as_mut().reset(Instant::now() + window);
                    }
                    None => break,
                },

                () = &mut quiet, if pending.is_some() => {
                    if let Some(value) = pending.take() {
                        if !commit(&mut filter, &value, &committed).await {
                            return;
                        }
                    }
                }
            }
        }

        if let Some(value) = pending.take() {
            commit(&mut filter, &value, &committed).await;
        }
        debug!("Input source closed; conditioner stopped");
    }
}

/// Returns `false` once the downstream receiver is gone.
async fn commit(
    filter: &mut ChangeFilter,
    value: &str,
    committed: &mpsc::Sender<CommittedQuery>,
) -> bool {
    match filter.admit(value) {
        Some(query) => {
            info!(query = %query, "Query committed");
            committed.send(query).await.is_ok()
        }
        None => {
            debug!(query = value, "Unchanged query suppressed");
            true
        }
    }
}
