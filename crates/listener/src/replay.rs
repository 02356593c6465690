//! Timed playback of typing scripts.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::{InputSource, ListenerError};

/// One scripted keystroke: wait `delay`, then emit `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub delay: Duration,
    pub text: String,
}

/// Plays back a parsed typing script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySource {
    steps: Vec<ReplayStep>,
}

impl ReplaySource {
    /// Parses the `<delay_ms>\t<text>` script format.
    pub fn parse(script: &str) -> Result<Self, ListenerError> {
        let mut steps = Vec::new();
        for (index, raw_line) in script.lines().enumerate() {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let (delay, text) = line.split_once('\t').unwrap_or((line, ""));
            let delay_ms: u64 = delay.trim().parse().map_err(|_| ListenerError::MalformedScript {
                line: index + 1,
                reason: format!("'{}' is not a delay in milliseconds", delay.trim()),
            })?;
            steps.push(ReplayStep {
                delay: Duration::from_millis(delay_ms),
                text: text.to_string(),
            });
        }
        Ok(Self { steps })
    }

    /// Reads and parses a script file.
    pub async fn from_file(path: &Path) -> Result<Self, ListenerError> {
        let script =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ListenerError::ReadScript {
                    path: path.display().to_string(),
                    source,
                })?;
        Self::parse(&script)
    }

    pub fn steps(&self) -> &[ReplayStep] {
        &self.steps
    }
}

#[async_trait]
impl InputSource for ReplaySource {
    async fn pump(self: Box<Self>, raw: mpsc::Sender<String>) -> Result<(), ListenerError> {
        debug!(steps = self.steps.len(), "Replaying typing script");
        for step in self.steps {
            if !step.delay.is_zero() {
                sleep(step.delay).await;
            }
            trace!(text = %step.text, "Replay keystroke");
            if raw.send(step.text).await.is_err() {
                debug!("Raw input receiver dropped; stopping replay");
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let script = "# burst\n0\tr\n\n100\tre\r\n100\treact\n600\n";
        let source = ReplaySource::parse(script).unwrap();
        let texts: Vec<&str> = source.steps().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["r", "re", "react", ""]);
        assert_eq!(source.steps()[3].delay, Duration::from_millis(600));
    }

    #[test]
    fn test_parse_keeps_text_after_first_tab() {
        let source = ReplaySource::parse("5\ta\tb").unwrap();
        assert_eq!(source.steps()[0].text, "a\tb");
    }

    #[test]
    fn test_parse_reports_line_of_bad_delay() {
        let err = ReplaySource::parse("0\tr\nsoon\treact\n").unwrap_err();
        match err {
            ListenerError::MalformedScript { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pump_paces_values_by_delay() {
        let source = ReplaySource::parse("100\tr\n100\tre\n").unwrap();
        let (tx, mut rx) = mpsc::channel(8);
        let started = Instant::now();
        let task = tokio::spawn(Box::new(source).pump(tx));

        assert_eq!(rx.recv().await.as_deref(), Some("r"));
        assert!(started.elapsed() >= Duration::from_millis(100));
        assert_eq!(rx.recv().await.as_deref(), Some("re"));
        assert!(started.elapsed() >= Duration::from_millis(200));
        assert_eq!(rx.recv().await, None);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_names_the_path() {
        let err = ReplaySource::from_file(Path::new("/nonexistent/typing.script"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/typing.script"));
    }
}
