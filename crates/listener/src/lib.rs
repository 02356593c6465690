//! IssueLens input sources.
//!
//! Implements [`InputSource`] with two backends:
//!
//! - [`LineSource`]: reads any async line reader (stdin in the CLI) and
//!   pushes each line as one raw input value. Suited to piping or interactive
//!   use where every line stands for the current contents of the search box.
//!
//! - [`ReplaySource`]: plays back a typing script with explicit timing, so a
//!   burst of keystrokes can be reproduced exactly.
//!
//! ## Replay Script Format
//!
//! ```text
//! # delay before the value (ms) <TAB> value
//! 0	r
//! 100	re
//! 100	react
//! 600
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. A line holding only
//! a delay emits the empty value (a cleared search box).
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Reading, decoding, and pacing input all live here; the
//! orchestration layer only sees an `mpsc::Receiver<String>`.

mod replay;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

pub use replay::{ReplaySource, ReplayStep};

/// Errors raised while reading or parsing input.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// A replay script line could not be parsed.
    #[error("Malformed replay script at line {line}: {reason}")]
    MalformedScript { line: usize, reason: String },

    /// The replay script file could not be read.
    #[error("Could not read replay script '{path}'")]
    ReadScript {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying reader failed.
    #[error("Input read failed")]
    Io(#[from] std::io::Error),
}

/// A push-style source of raw text values.
#[async_trait]
pub trait InputSource: Send {
    /// Pushes values into `raw` until the source is exhausted or the receiver
    /// is dropped. Dropping `raw` on return signals end of input downstream.
    async fn pump(self: Box<Self>, raw: mpsc::Sender<String>) -> Result<(), ListenerError>;
}

/// Emits one raw value per line of an async reader.
pub struct LineSource<R> {
    reader: R,
}

impl<R> LineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl<R> InputSource for LineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn pump(self: Box<Self>, raw: mpsc::Sender<String>) -> Result<(), ListenerError> {
        let mut lines = self.reader.lines();
        while let Some(line) = lines.next_line().await? {
            let value = line.strip_suffix('\r').map(str::to_string).unwrap_or(line);
            if raw.send(value).await.is_err() {
                debug!("Raw input receiver dropped; stopping line source");
                break;
            }
        }
        Ok(())
    }
}
