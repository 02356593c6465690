//! Console output boundary.

use std::io::Write;
use std::sync::Mutex;

use pipeline::{Issue, OutputSink, Repository, ResultSet};
use serde::Serialize;
use tracing::warn;

use crate::config::OutputFormat;

/// One line of text output per record.
pub trait RenderLine {
    fn render_line(&self) -> String;
}

impl RenderLine for Issue {
    fn render_line(&self) -> String {
        format!("#{} [{}] {}", self.number, self.state, self.title)
    }
}

impl RenderLine for Repository {
    fn render_line(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => {
                format!("{} - {}", self.full_name, description)
            }
            _ => self.full_name.to_string(),
        }
    }
}

/// Writes every delivered result set to a writer (stdout in the binary).
///
/// In text mode consecutive result sets are separated by a blank line.
pub struct ConsoleSink<W> {
    out: Mutex<Console<W>>,
    format: OutputFormat,
}

struct Console<W> {
    writer: W,
    delivered: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out: Mutex::new(Console {
                writer: out,
                delivered: false,
            }),
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .writer
    }

    fn write(&self, text: &str, starts_result_set: bool) {
        let mut console = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let separate = starts_result_set && console.delivered && self.format == OutputFormat::Text;
        if starts_result_set {
            console.delivered = true;
        }

        if let Err(err) = write_text(&mut console.writer, text, separate) {
            warn!(error = %err, "Failed to write results");
        }
    }
}

fn write_text<W: Write>(out: &mut W, text: &str, separate: bool) -> std::io::Result<()> {
    if separate {
        out.write_all(b"\n")?;
    }
    out.write_all(text.as_bytes())?;
    out.flush()
}

impl<T, W> OutputSink<T> for ConsoleSink<W>
where
    T: RenderLine + Serialize,
    W: Write + Send,
{
    fn deliver(&self, results: ResultSet<T>) {
        let text = match self.format {
            OutputFormat::Text => {
                let mut text = String::new();
                for record in &results {
                    text.push_str(&record.render_line());
                    text.push('\n');
                }
                text
            }
            OutputFormat::Json => match serde_json::to_string(results.as_slice()) {
                Ok(json) => json + "\n",
                Err(err) => {
                    warn!(error = %err, "Failed to encode results");
                    return;
                }
            },
        };
        self.write(&text, true);
    }

    fn no_results(&self) {
        if self.format == OutputFormat::Text {
            self.write("No results.\n", false);
        }
    }
}
