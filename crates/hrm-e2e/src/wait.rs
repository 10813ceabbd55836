//! Wait bounds and URL matching.
//!
//! Every interaction in the suite is preceded by an explicit bounded wait;
//! the bounds live here so each call site stays tunable. The fixed settle
//! delays are a deliberate substitute for event-based waiting on
//! asynchronous UI settling (table refresh, dropdown animation); they are
//! a known fragility point of the suite, not a design strength.

use std::time::Duration;

/// Default timeout for element visibility waits (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval for visibility and URL waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Timeout for the post-login dashboard navigation (10 seconds)
pub const LOGIN_TIMEOUT_MS: u64 = 10_000;

/// Fixed settle delay after search/save while the results table refreshes
pub const TABLE_SETTLE_MS: u64 = 2_000;

/// Fixed settle delay for the confirm-dialog open animation
pub const DIALOG_SETTLE_MS: u64 = 1_000;

/// Fixed settle delay for the custom-dropdown open animation
pub const DROPDOWN_SETTLE_MS: u64 = 500;

/// Options for a bounded wait
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Number of polls that fit in the timeout (at least one).
    #[must_use]
    pub const fn max_polls(&self) -> u64 {
        let polls = self.timeout_ms / self.poll_interval_ms;
        if polls == 0 {
            1
        } else {
            polls
        }
    }
}

/// Glob pattern over URLs, in the style of `waitForURL`.
///
/// `*` matches within a segment boundary or across it; patterns like
/// `**/dashboard/index` and `**/admin/saveSystemUser/**` match any URL
/// containing those path chunks in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    pattern: String,
}

impl UrlPattern {
    /// Create a pattern from a glob string.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Get the original pattern string.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Check whether a URL matches this pattern.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        // Normalize ** to * first; both mean "any run of characters" here.
        let normalized = self.pattern.replace("**", "*");
        Self::glob_matches(&normalized, url)
    }

    fn glob_matches(pattern: &str, url: &str) -> bool {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.len() == 1 {
            return url == pattern;
        }

        let mut pos = 0;
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            match url[pos..].find(part) {
                Some(found) => {
                    if i == 0 && found != 0 {
                        return false;
                    }
                    pos += found + part.len();
                }
                None => return false,
            }
        }

        // A pattern not ending in a wildcard must consume the whole URL.
        if let Some(last) = parts.last() {
            if !last.is_empty() && pos != url.len() {
                return false;
            }
        }
        true
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
