//! Commit decisions for raw search text.
//!
//! The quiet-period wait itself is asynchronous and lives in the `nodes`
//! crate; this module holds the parts that are plain state: the change filter
//! and the conditioner configuration.

use std::time::Duration;

use crate::{CommittedQuery, ConfigurationError};

/// Default time a value must stay the latest raw input before it may commit.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Settings for the input conditioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionerConfig {
    /// Minimum quiet period after a raw value before it becomes eligible.
    pub quiet_window: Duration,
}

impl ConditionerConfig {
    pub fn new(quiet_window: Duration) -> Self {
        Self { quiet_window }
    }

    /// Rejects a zero quiet window, which would commit every keystroke.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.quiet_window.is_zero() {
            return Err(ConfigurationError::new("quiet window must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for ConditionerConfig {
    fn default() -> Self {
        Self {
            quiet_window: DEFAULT_QUIET_WINDOW,
        }
    }
}

/// Suppresses empty values and consecutive duplicates.
///
/// Owned by exactly one task; the notion of "most recently committed" is
/// never shared, so it cannot race.
#[derive(Debug, Default)]
pub struct ChangeFilter {
    last: Option<CommittedQuery>,
}

impl ChangeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value to commit, or `None` if it is empty or equal to the
    /// last committed value.
    pub fn admit(&mut self, raw: &str) -> Option<CommittedQuery> {
        let candidate = CommittedQuery::new(raw)?;
        if self.last.as_ref() == Some(&candidate) {
            return None;
        }
        self.last = Some(candidate.clone());
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_never_admitted() {
        let mut filter = ChangeFilter::new();
        assert!(filter.admit("").is_none());
        assert!(filter.admit("react").is_some());
    }

    #[test]
    fn test_consecutive_duplicate_is_suppressed() {
        let mut filter = ChangeFilter::new();
        assert!(filter.admit("react").is_some());
        assert!(filter.admit("react").is_none());
    }

    #[test]
    fn test_non_consecutive_repeat_is_admitted() {
        let mut filter = ChangeFilter::new();
        assert!(filter.admit("react").is_some());
        assert!(filter.admit("vue").is_some());
        assert_eq!(filter.admit("react").map(|q| q.to_string()), Some("react".into()));
    }

    #[test]
    fn test_empty_does_not_reset_last_committed() {
        let mut filter = ChangeFilter::new();
        filter.admit("react");
        assert!(filter.admit("").is_none());
        assert!(filter.admit("react").is_none());
    }

    #[test]
    fn test_zero_quiet_window_is_rejected() {
        let config = ConditionerConfig::new(Duration::ZERO);
        assert!(config.validate().is_err());
        assert!(ConditionerConfig::default().validate().is_ok());
    }
}
