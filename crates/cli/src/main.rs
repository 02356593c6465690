//! IssueLens CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: command-line flags with `ISSUELENS_*`
//!    environment fallbacks, validated before any task starts.
//! 2. **Wire observability**: configure `tracing-subscriber` (pretty or JSON,
//!    on stderr) and, when `--otlp-endpoint` is set, an OpenTelemetry OTLP
//!    exporter. All spans and events emitted by every crate flow through it.
//! 3. **Construct infrastructure**: create the [`github::GithubClient`], the
//!    input source (stdin lines or a replay script), and the console sink.
//! 4. **Select mode**: `issues` runs the two-stage [`nodes::IssueTracker`];
//!    `repositories` runs the one-stage [`nodes::RepositoryBrowser`].

mod config;
mod sink;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use github::GithubClient;
use listener::{InputSource, LineSource, ReplaySource};
use nodes::{IssueTracker, RepositoryBrowser};
use pipeline::{Issue, OutputSink, Repository, SessionId};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{error, info, info_span, Instrument};

use crate::config::{Args, Mode};
use crate::sink::ConsoleSink;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let telemetry = telemetry::init(args.log_format, &args.log_level, args.otlp_endpoint.as_deref())?;

    let result = run(args).await;
    if let Err(err) = &result {
        error!(error = %format!("{err:#}"), "issuelens stopped with an error");
    }

    telemetry.shutdown();
    result
}

async fn run(args: Args) -> Result<()> {
    let session = SessionId::new_random();
    let span = info_span!("session", %session, mode = ?args.mode);

    async move {
        let tracker_config = args.tracker_config();
        tracker_config.validate().context("invalid configuration")?;

        let github = Arc::new(
            GithubClient::new(args.github_config()).context("failed to construct GitHub client")?,
        );

        let source: Box<dyn InputSource> = match &args.replay {
            Some(path) => Box::new(ReplaySource::from_file(path).await?),
            None => Box::new(LineSource::new(BufReader::new(tokio::io::stdin()))),
        };
        let (raw_tx, raw_rx) = mpsc::channel(args.channel_capacity);
        let input = tokio::spawn(source.pump(raw_tx));

        info!(api_base = %args.api_base, "Listening for search input");
        let summary = match args.mode {
            Mode::Issues => {
                let tracker = IssueTracker::new(github.clone(), github, tracker_config)?;
                let sink: Arc<dyn OutputSink<Issue>> =
                    Arc::new(ConsoleSink::new(std::io::stdout(), args.output));
                tracker.track(raw_rx, sink).await
            }
            Mode::Repositories => {
                let browser = RepositoryBrowser::new(github, tracker_config)?;
                let sink: Arc<dyn OutputSink<Repository>> =
                    Arc::new(ConsoleSink::new(std::io::stdout(), args.output));
                browser.browse(raw_rx, sink).await
            }
        };

        input
            .await
            .context("input task panicked")?
            .context("input source failed")?;

        info!(
            accepted = summary.accepted,
            delivered = summary.delivered,
            superseded = summary.superseded,
            "Input finished"
        );
        Ok(())
    }
    .instrument(span)
    .await
}
