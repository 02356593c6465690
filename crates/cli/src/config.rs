//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use github::GithubConfig;
use nodes::{DispatchConfig, TrackerConfig, DEFAULT_CHANNEL_CAPACITY};
use pipeline::ConditionerConfig;

/// What the search text names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// `owner/repo` names; lists the repository's issues.
    Issues,
    /// User or organisation logins; lists their repositories.
    Repositories,
}

/// How result sets are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    /// One JSON array per delivered result set.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Search GitHub as you type: one line of stdin per change of the search box.
#[derive(Debug, Parser)]
#[command(name = "issuelens", version, about)]
pub struct Args {
    #[arg(long, value_enum, default_value_t = Mode::Issues, env = "ISSUELENS_MODE")]
    pub mode: Mode,

    /// GitHub REST API root.
    #[arg(long, default_value = github::DEFAULT_API_BASE, env = "ISSUELENS_API_BASE")]
    pub api_base: String,

    /// Time a value must stay unchanged before it is looked up.
    #[arg(long, default_value_t = 500, env = "ISSUELENS_QUIET_WINDOW_MS")]
    pub quiet_window_ms: u64,

    #[arg(long, default_value_t = 10_000, env = "ISSUELENS_REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: u64,

    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY, env = "ISSUELENS_CHANNEL_CAPACITY")]
    pub channel_capacity: usize,

    /// Abort superseded lookups instead of letting them finish unseen.
    #[arg(long, env = "ISSUELENS_ABORT_SUPERSEDED")]
    pub abort_superseded: bool,

    /// Replay a `<delay_ms>\t<text>` typing script instead of reading stdin.
    #[arg(long, env = "ISSUELENS_REPLAY")]
    pub replay: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "ISSUELENS_OUTPUT")]
    pub output: OutputFormat,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "ISSUELENS_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, default_value = "info", env = "ISSUELENS_LOG_LEVEL")]
    pub log_level: String,

    /// Export spans to this OTLP/gRPC collector (e.g. `http://localhost:4317`).
    #[arg(long, env = "ISSUELENS_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Args {
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            conditioner: ConditionerConfig::new(Duration::from_millis(self.quiet_window_ms)),
            dispatch: DispatchConfig {
                abort_superseded: self.abort_superseded,
            },
            channel_capacity: self.channel_capacity,
        }
    }

    pub fn github_config(&self) -> GithubConfig {
        GithubConfig {
            api_base: self.api_base.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            ..GithubConfig::default()
        }
    }
}
