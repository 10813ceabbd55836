//! Wait-guarded interaction primitives.
//!
//! [`Interactor`] wraps a page handle so scenario code never touches raw
//! timing. Every interaction is preceded by an explicit visibility wait
//! rather than relying on implicit auto-waiting; that keeps flakiness
//! sources explicit and tunable per call site.
//!
//! Failed waits surface as [`HrmError::Timeout`], failed expectations as
//! [`HrmError::AssertionFailed`]; both are fatal to the scenario.

use tracing::debug;

use crate::browser::Page;
use crate::result::{HrmError, HrmResult};
use crate::selector::Selector;
use crate::wait::{UrlPattern, WaitOptions, DEFAULT_TIMEOUT_MS, DROPDOWN_SETTLE_MS};

/// Element-level operations over one page handle.
///
/// Holds nothing but the page reference; all state lives in the browser.
#[derive(Debug)]
pub struct Interactor<'a> {
    page: &'a Page,
}

impl<'a> Interactor<'a> {
    /// Wrap a page handle.
    #[must_use]
    pub const fn new(page: &'a Page) -> Self {
        Self { page }
    }

    /// The wrapped page.
    #[must_use]
    pub const fn page(&self) -> &Page {
        self.page
    }

    /// Suspend until the element is present and visible, or time out.
    pub async fn wait_for_visible(&self, selector: &Selector, timeout_ms: u64) -> HrmResult<()> {
        let opts = WaitOptions::new().with_timeout(timeout_ms);
        for _ in 0..opts.max_polls() {
            if self.page.is_visible(selector).await? {
                return Ok(());
            }
            self.page.wait_ms(opts.poll_interval_ms).await?;
        }
        Err(HrmError::timeout(timeout_ms, format!("visible: {selector}")))
    }

    /// Wait up to the default bound for visibility, then click.
    ///
    /// May trigger navigation or UI mutation in the application.
    pub async fn click(&self, selector: &Selector) -> HrmResult<()> {
        debug!(%selector, "click");
        self.wait_for_visible(selector, DEFAULT_TIMEOUT_MS).await?;
        self.page.click(selector).await
    }

    /// Wait up to the default bound for visibility, then replace the
    /// element's input value with `text`.
    pub async fn fill(&self, selector: &Selector, text: &str) -> HrmResult<()> {
        debug!(%selector, "fill");
        self.wait_for_visible(selector, DEFAULT_TIMEOUT_MS).await?;
        self.page.fill(selector, text).await
    }

    /// Wait for visibility, then return the element's text content.
    /// Returns the empty string when the element has no textual content.
    pub async fn get_text(&self, selector: &Selector) -> HrmResult<String> {
        self.wait_for_visible(selector, DEFAULT_TIMEOUT_MS).await?;
        self.page.text_content(selector).await
    }

    /// Fail the scenario with an assertion-kind error if the element does
    /// not become visible within the default polling window.
    pub async fn assert_visible(&self, selector: &Selector) -> HrmResult<()> {
        match self.wait_for_visible(selector, DEFAULT_TIMEOUT_MS).await {
            Ok(()) => Ok(()),
            Err(HrmError::Timeout { .. }) => Err(HrmError::assertion(format!(
                "expected {selector} to be visible"
            ))),
            Err(other) => Err(other),
        }
    }

    /// Assert that the element's text contains `expected`.
    pub async fn assert_contains_text(
        &self,
        selector: &Selector,
        expected: &str,
    ) -> HrmResult<()> {
        let actual = self.get_text(selector).await?;
        if actual.contains(expected) {
            Ok(())
        } else {
            Err(HrmError::assertion(format!(
                "expected {selector} to contain {expected:?}, got {actual:?}"
            )))
        }
    }

    /// Select an option from a custom (non-native) dropdown widget.
    ///
    /// Clicks the trigger to open the widget, waits a fixed 500ms for the
    /// open animation (no event-based signal is available), then polls for
    /// the first element whose visible text exactly equals `option_text`
    /// and clicks it. A missing option is a timeout, not an assertion.
    pub async fn select_option(&self, trigger: &Selector, option_text: &str) -> HrmResult<()> {
        debug!(%trigger, option_text, "select_option");
        self.click(trigger).await?;
        self.page.wait_ms(DROPDOWN_SETTLE_MS).await?;

        let option = Selector::exact_text(option_text);
        self.wait_for_visible(&option, DEFAULT_TIMEOUT_MS).await?;
        self.page.click(&option).await
    }

    /// Suspend until the page URL matches `pattern`, or time out.
    pub async fn wait_for_url(&self, pattern: &UrlPattern, timeout_ms: u64) -> HrmResult<()> {
        let opts = WaitOptions::new().with_timeout(timeout_ms);
        for _ in 0..opts.max_polls() {
            if pattern.matches(&self.page.current_url().await?) {
                return Ok(());
            }
            self.page.wait_ms(opts.poll_interval_ms).await?;
        }
        Err(HrmError::timeout(
            timeout_ms,
            format!("url matching {pattern}"),
        ))
    }
}

#[cfg(all(test, not(feature = "browser")))]
mod tests {
    use super::*;
    use crate::browser::{Browser, MockElement};
    use crate::config::SuiteConfig;

    async fn page_with(seed: impl FnOnce(&Browser)) -> (Browser, Page) {
        let browser = Browser::launch(&SuiteConfig::new().with_base_url("http://hrm.test"))
            .await
            .unwrap();
        seed(&browser);
        let page = browser.new_page().await.unwrap();
        (browser, page)
    }

    #[tokio::test]
    async fn wait_for_visible_times_out_on_missing_element() {
        let (_browser, page) = page_with(|_| {}).await;
        let interactor = Interactor::new(&page);

        let err = interactor
            .wait_for_visible(&Selector::css("h6.missing"), 5000)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn wait_for_visible_succeeds_on_seeded_element() {
        let (_browser, page) = page_with(|b| {
            b.seed_element("h6.title", MockElement::visible_with_text("User Management"));
        })
        .await;
        let interactor = Interactor::new(&page);

        interactor
            .wait_for_visible(&Selector::css("h6.title"), 5000)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn assert_visible_failure_is_assertion_kind() {
        let (_browser, page) = page_with(|_| {}).await;
        let interactor = Interactor::new(&page);

        let err = interactor
            .assert_visible(&Selector::text("No records"))
            .await
            .unwrap_err();
        assert!(err.is_assertion());
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn get_text_returns_empty_string_for_textless_element() {
        let (_browser, page) = page_with(|b| {
            b.seed_element("input.search", MockElement::visible());
        })
        .await;
        let interactor = Interactor::new(&page);

        let text = interactor
            .get_text(&Selector::css("input.search"))
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn assert_contains_text_reports_actual_text() {
        let (_browser, page) = page_with(|b| {
            b.seed_element("div.status", MockElement::visible_with_text("Enabled"));
        })
        .await;
        let interactor = Interactor::new(&page);

        let err = interactor
            .assert_contains_text(&Selector::css("div.status"), "Disabled")
            .await
            .unwrap_err();
        assert!(err.is_assertion());
        assert!(err.to_string().contains("Enabled"));
    }

    #[tokio::test]
    async fn select_option_clicks_exact_text_match() {
        let (_browser, page) = page_with(|b| {
            b.seed_element("[data-testid=\"userRole\"]", MockElement::visible());
            b.seed_element("span.option-admin", MockElement::hidden_with_text("Admin"));
            b.seed_element(
                "span.option-ess",
                MockElement::hidden_with_text("ESS Supervisor"),
            );
            b.seed_click_reveals(
                "[data-testid=\"userRole\"]",
                vec![
                    "span.option-admin".to_string(),
                    "span.option-ess".to_string(),
                ],
            );
            b.seed_click_navigates("span.option-admin", "http://hrm.test/selected/admin");
        })
        .await;
        let interactor = Interactor::new(&page);

        interactor
            .select_option(&Selector::test_id("userRole"), "Admin")
            .await
            .unwrap();
        // The exact-text match must hit the "Admin" option, not the one
        // merely containing "Admin"-adjacent text.
        assert_eq!(
            page.current_url().await.unwrap(),
            "http://hrm.test/selected/admin"
        );
    }

    #[tokio::test]
    async fn select_option_times_out_when_option_absent() {
        let (_browser, page) = page_with(|b| {
            b.seed_element("[data-testid=\"status\"]", MockElement::visible());
        })
        .await;
        let interactor = Interactor::new(&page);

        let err = interactor
            .select_option(&Selector::test_id("status"), "Disabled")
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn wait_for_url_matches_after_navigation_click() {
        let (_browser, page) = page_with(|b| {
            b.seed_element("a.admin", MockElement::visible_with_text("Admin"));
            b.seed_click_navigates(
                "a.admin",
                "http://hrm.test/web/index.php/admin/viewAdminModule",
            );
        })
        .await;
        let interactor = Interactor::new(&page);

        interactor
            .click(&Selector::css_with_text("a", "Admin"))
            .await
            .unwrap();
        interactor
            .wait_for_url(&UrlPattern::new("**/admin/viewAdminModule"), 5000)
            .await
            .unwrap();

        let err = interactor
            .wait_for_url(&UrlPattern::new("**/admin/saveSystemUser"), 1000)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
