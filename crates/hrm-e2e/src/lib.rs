//! End-to-end browser test suite for the HRM user-management module.
//!
//! The suite automates a real browser (Chrome DevTools Protocol via
//! chromiumoxide, behind the `browser` feature) against a running HRM
//! instance and validates the CRUD workflows of the system-user screen:
//! login, navigate to the admin module, create / search / edit / delete
//! user records, and assert the resulting UI state.
//!
//! Two layers, in dependency order:
//!
//! 1. [`Interactor`] — wait-guarded element primitives over one page
//!    handle (`wait_for_visible`, `click`, `fill`, `get_text`,
//!    `assert_visible`, `select_option`, `wait_for_url`).
//! 2. [`run_scenario`] and [`Session`] — the per-scenario lifecycle:
//!    fresh authenticated page, linear body, assertions, page-close
//!    teardown that runs exactly once regardless of outcome.
//!
//! Without the `browser` feature the same API is backed by a scriptable
//! mock DOM, which is what the unit tests drive.
//!
//! # Example
//!
//! ```ignore
//! use hrm_e2e::{run_scenario, Browser, Selector, SuiteConfig};
//!
//! let config = SuiteConfig::from_env();
//! let browser = Browser::launch(&config).await?;
//!
//! run_scenario("TC-001", &browser, &config, |s| async move {
//!     s.goto_admin_module().await?;
//!     let ix = s.interactor();
//!     ix.assert_visible(&s.admin().heading).await?;
//!     ix.assert_visible(&s.admin().add_button).await
//! })
//! .await?;
//! ```

pub mod browser;
pub mod config;
pub mod interact;
pub mod pages;
pub mod result;
pub mod scenario;
pub mod selector;
pub mod wait;

pub use browser::{Browser, Page};
pub use config::SuiteConfig;
pub use interact::Interactor;
pub use pages::{routes, AdminPage, LoginPage, PageObject, UserFormPage};
pub use result::{HrmError, HrmResult};
pub use scenario::{run_scenario, ScenarioPhase, Session};
pub use selector::Selector;
pub use wait::{UrlPattern, WaitOptions, DEFAULT_TIMEOUT_MS, LOGIN_TIMEOUT_MS};

#[cfg(not(feature = "browser"))]
pub use browser::MockElement;

/// Initialize a tracing subscriber honoring `RUST_LOG`.
///
/// Call once at the start of a test binary; repeated calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
