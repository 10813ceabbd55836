//! Suite configuration.
//!
//! Everything the scenarios need to reach the application under test:
//! base URL, admin credentials, and browser launch options. Values come
//! from [`SuiteConfig::default`], builder methods, or the environment.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::result::HrmResult;

/// Environment variable for the application base URL.
pub const ENV_BASE_URL: &str = "HRM_BASE_URL";
/// Environment variable for the admin username.
pub const ENV_USERNAME: &str = "HRM_USERNAME";
/// Environment variable for the admin password.
pub const ENV_PASSWORD: &str = "HRM_PASSWORD";
/// Environment variable for headless mode ("0" or "false" disables it).
pub const ENV_HEADLESS: &str = "HRM_HEADLESS";
/// Environment variable for the chromium binary path.
pub const ENV_CHROMIUM_PATH: &str = "CHROMIUM_PATH";

/// Suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the application under test
    pub base_url: String,
    /// Admin login username
    pub username: String,
    /// Admin login password
    pub password: String,
    /// Run the browser in headless mode
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opensource-demo.orangehrmlive.com".to_string(),
            username: "Admin".to_string(),
            password: "admin123".to_string(),
            headless: true,
            chromium_path: None,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl SuiteConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Ok(user) = std::env::var(ENV_USERNAME) {
            config.username = user;
        }
        if let Ok(pass) = std::env::var(ENV_PASSWORD) {
            config.password = pass;
        }
        if let Ok(headless) = std::env::var(ENV_HEADLESS) {
            config.headless = !matches!(headless.as_str(), "0" | "false" | "no");
        }
        if let Ok(path) = std::env::var(ENV_CHROMIUM_PATH) {
            config.chromium_path = Some(path);
        }
        config
    }

    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> HrmResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the login credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set headless mode.
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the chromium binary path.
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set viewport dimensions.
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Resolve a route against the base URL.
    ///
    /// The base URL never keeps a trailing slash, routes always start
    /// with one, so joining is plain concatenation.
    #[must_use]
    pub fn url_for(&self, route: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}{route}")
    }
}
