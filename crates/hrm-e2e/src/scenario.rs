//! Scenario lifecycle: login setup, shared body steps, teardown.
//!
//! Each scenario owns one authenticated page, created fresh at scenario
//! start and closed at scenario end. The lifecycle is strictly linear:
//! `NotStarted → LoggedIn → Navigated → ActionPerformed → Asserted →
//! Closed`. Any failed wait or assertion terminates the scenario
//! immediately; nothing downstream in that scenario runs, but the page
//! close still executes.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::browser::{Browser, Page};
use crate::config::SuiteConfig;
use crate::interact::Interactor;
use crate::pages::{routes, AdminPage, LoginPage, PageObject, UserFormPage};
use crate::result::HrmResult;
use crate::wait::{UrlPattern, DEFAULT_TIMEOUT_MS, DIALOG_SETTLE_MS, TABLE_SETTLE_MS};

/// Phase of a scenario's linear lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScenarioPhase {
    /// Page opened, nothing done yet
    NotStarted,
    /// Login completed, dashboard reached
    LoggedIn,
    /// Body navigation performed
    Navigated,
    /// Body action (fill/select/click/save) performed
    ActionPerformed,
    /// Final assertions passed
    Asserted,
    /// Page closed
    Closed,
}

impl ScenarioPhase {
    /// The next phase in the linear lifecycle, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::NotStarted => Some(Self::LoggedIn),
            Self::LoggedIn => Some(Self::Navigated),
            Self::Navigated => Some(Self::ActionPerformed),
            Self::ActionPerformed => Some(Self::Asserted),
            Self::Asserted => Some(Self::Closed),
            Self::Closed => None,
        }
    }

    /// Phase name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::LoggedIn => "logged_in",
            Self::Navigated => "navigated",
            Self::ActionPerformed => "action_performed",
            Self::Asserted => "asserted",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ScenarioPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One authenticated browser page, alive for exactly one scenario.
///
/// Not shared across scenarios; every scenario re-authenticates and
/// re-navigates. The only state that survives a scenario is whatever the
/// application under test persisted server-side.
#[derive(Debug)]
pub struct Session {
    page: Page,
    config: SuiteConfig,
    login: LoginPage,
    admin: AdminPage,
    form: UserFormPage,
    phase: Mutex<ScenarioPhase>,
}

impl Session {
    /// Open a fresh, not-yet-authenticated session.
    pub async fn open(browser: &Browser, config: &SuiteConfig) -> HrmResult<Self> {
        let page = browser.new_page().await?;
        Ok(Self {
            page,
            config: config.clone(),
            login: LoginPage::new(),
            admin: AdminPage::new(),
            form: UserFormPage::new(),
            phase: Mutex::new(ScenarioPhase::NotStarted),
        })
    }

    /// The underlying page handle.
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// An interaction helper over this session's page.
    #[must_use]
    pub const fn interactor(&self) -> Interactor<'_> {
        Interactor::new(&self.page)
    }

    /// The admin screen's selectors.
    #[must_use]
    pub const fn admin(&self) -> &AdminPage {
        &self.admin
    }

    /// The user form's selectors.
    #[must_use]
    pub const fn form(&self) -> &UserFormPage {
        &self.form
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ScenarioPhase {
        self.phase
            .lock()
            .map_or(ScenarioPhase::NotStarted, |phase| *phase)
    }

    /// Advance the lifecycle; phases never move backwards.
    fn advance(&self, to: ScenarioPhase) {
        if let Ok(mut phase) = self.phase.lock() {
            if to > *phase {
                *phase = to;
            }
        }
    }

    /// Shared setup: navigate to the login route, submit the fixed
    /// credentials, and wait for the dashboard within 10 seconds.
    ///
    /// A failure here fails the scenario at setup, before any body step.
    pub async fn login(&self) -> HrmResult<()> {
        let ix = self.interactor();
        self.page.goto(&self.config.url_for(routes::LOGIN)).await?;
        ix.fill(&self.login.username_input, &self.config.username)
            .await?;
        ix.fill(&self.login.password_input, &self.config.password)
            .await?;
        ix.click(&self.login.submit_button).await?;
        ix.wait_for_url(
            &UrlPattern::new(routes::DASHBOARD),
            self.login.load_timeout_ms(),
        )
        .await?;
        self.advance(ScenarioPhase::LoggedIn);
        info!(phase = %self.phase(), "login complete");
        Ok(())
    }

    /// Navigate from the dashboard into the admin module.
    pub async fn goto_admin_module(&self) -> HrmResult<()> {
        let ix = self.interactor();
        ix.click(&self.admin.admin_link).await?;
        ix.wait_for_url(&UrlPattern::new(routes::ADMIN_MODULE), DEFAULT_TIMEOUT_MS)
            .await?;
        self.advance(ScenarioPhase::Navigated);
        Ok(())
    }

    /// Filter the user list by username and wait for the table to settle.
    pub async fn search_user(&self, username: &str) -> HrmResult<()> {
        let ix = self.interactor();
        ix.fill(&self.admin.search_username, username).await?;
        ix.click(&self.admin.search_button).await?;
        self.page.wait_ms(TABLE_SETTLE_MS).await?;
        self.advance(ScenarioPhase::ActionPerformed);
        Ok(())
    }

    /// Open the edit form of the first result row.
    pub async fn open_first_edit(&self) -> HrmResult<()> {
        let ix = self.interactor();
        ix.click(&self.admin.edit_button).await?;
        ix.wait_for_url(&UrlPattern::new(routes::EDIT_SYSTEM_USER), DEFAULT_TIMEOUT_MS)
            .await?;
        self.advance(ScenarioPhase::ActionPerformed);
        Ok(())
    }

    /// Save the user form and wait for the list to settle.
    pub async fn save_and_settle(&self) -> HrmResult<()> {
        let ix = self.interactor();
        ix.click(&self.form.save_button).await?;
        self.page.wait_ms(TABLE_SETTLE_MS).await?;
        self.advance(ScenarioPhase::ActionPerformed);
        Ok(())
    }

    /// Delete the first result row, confirming the dialog.
    pub async fn delete_first_row(&self) -> HrmResult<()> {
        let ix = self.interactor();
        ix.click(&self.admin.delete_button).await?;
        self.page.wait_ms(DIALOG_SETTLE_MS).await?;
        ix.click(&self.admin.confirm_delete).await?;
        self.page.wait_ms(TABLE_SETTLE_MS).await?;
        self.advance(ScenarioPhase::ActionPerformed);
        Ok(())
    }

    /// Mark the body's assertions as passed.
    fn mark_asserted(&self) {
        self.advance(ScenarioPhase::Asserted);
    }

    /// Shared teardown: close the page.
    pub async fn close(&self) -> HrmResult<()> {
        let result = self.page.close().await;
        self.advance(ScenarioPhase::Closed);
        result
    }
}

/// Run one scenario: login setup, body, assertions, page-close teardown.
///
/// Teardown executes exactly once regardless of body outcome. A login
/// failure fails the scenario at setup and the body never runs. On body
/// failure a best-effort screenshot lands in the temp dir; the body's
/// error is always the one propagated.
pub async fn run_scenario<F, Fut>(
    name: &str,
    browser: &Browser,
    config: &SuiteConfig,
    body: F,
) -> HrmResult<()>
where
    F: FnOnce(Arc<Session>) -> Fut,
    Fut: Future<Output = HrmResult<()>>,
{
    info!(scenario = name, "starting");
    let session = Arc::new(Session::open(browser, config).await?);

    let result = match session.login().await {
        Ok(()) => body(Arc::clone(&session)).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => session.mark_asserted(),
        Err(ref err) => {
            warn!(scenario = name, phase = %session.phase(), error = %err, "scenario failed");
            write_failure_screenshot(name, session.page()).await;
        }
    }

    let closed = session.close().await;
    info!(scenario = name, phase = %session.phase(), ok = result.is_ok(), "finished");
    result.and(closed)
}

/// Best effort; never masks the scenario's own error.
async fn write_failure_screenshot(name: &str, page: &Page) {
    match page.screenshot().await {
        Ok(bytes) if !bytes.is_empty() => {
            let path = std::env::temp_dir().join(format!("{name}-failure.png"));
            match std::fs::write(&path, bytes) {
                Ok(()) => {
                    warn!(scenario = name, path = %path.display(), "failure screenshot written");
                }
                Err(err) => {
                    warn!(scenario = name, error = %err, "failure screenshot not written");
                }
            }
        }
        _ => {}
    }
}
