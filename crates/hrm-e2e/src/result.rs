//! Result and error types for the suite.

use thiserror::Error;

/// Result type for suite operations
pub type HrmResult<T> = Result<T, HrmError>;

/// Errors that can occur while driving a scenario.
///
/// Only two kinds are meaningful to a scenario author: [`HrmError::Timeout`]
/// (a bounded wait was not satisfied) and [`HrmError::AssertionFailed`]
/// (an expected UI condition was false). The remaining variants are
/// infrastructure failures; all of them are fatal to the current scenario
/// and none are retried.
#[derive(Debug, Error)]
pub enum HrmError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A bounded wait was not satisfied
    #[error("Timed out after {ms}ms waiting for {condition}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Human-readable description of the awaited condition
        condition: String,
    },

    /// An expected UI condition was false
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HrmError {
    /// Shorthand for a timeout error.
    #[must_use]
    pub fn timeout(ms: u64, condition: impl Into<String>) -> Self {
        Self::Timeout {
            ms,
            condition: condition.into(),
        }
    }

    /// Shorthand for an assertion failure.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Whether this error is timeout-kind.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether this error is assertion-kind.
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_assertion_are_distinct_kinds() {
        let t = HrmError::timeout(5000, "visible: button");
        let a = HrmError::assertion("expected 'Disabled'");

        assert!(t.is_timeout());
        assert!(!t.is_assertion());
        assert!(a.is_assertion());
        assert!(!a.is_timeout());
    }

    #[test]
    fn timeout_message_names_the_condition() {
        let e = HrmError::timeout(5000, "url matching **/dashboard/index");
        let msg = e.to_string();
        assert!(msg.contains("5000ms"));
        assert!(msg.contains("**/dashboard/index"));
    }

    #[test]
    fn infrastructure_errors_are_neither_kind() {
        let e = HrmError::BrowserLaunch {
            message: "no chromium".to_string(),
        };
        assert!(!e.is_timeout());
        assert!(!e.is_assertion());
    }
}
