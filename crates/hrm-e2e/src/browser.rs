//! Browser and page control.
//!
//! With the `browser` feature enabled this drives a real chromium via the
//! Chrome DevTools Protocol (chromiumoxide). Without it, a scriptable mock
//! with the same surface backs the unit tests: elements are seeded by the
//! test, clicking can reveal other elements (dropdown options, dialogs) or
//! change the page URL (navigation).
//!
//! Both implementations expose the same async API so the interaction layer
//! and the scenario runner compile identically either way.

use crate::config::SuiteConfig;
use crate::result::{HrmError, HrmResult};
use crate::selector::Selector;

// ============================================================================
// Real CDP implementation (`browser` feature)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{HrmError, HrmResult, Selector, SuiteConfig};
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Browser instance with a live CDP connection
    #[derive(Debug)]
    pub struct Browser {
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a chromium instance configured from the suite config.
        ///
        /// # Errors
        ///
        /// Returns [`HrmError::BrowserLaunch`] if chromium cannot be started.
        pub async fn launch(config: &SuiteConfig) -> HrmResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .no_sandbox();

            if !config.headless {
                builder = builder.with_head();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| HrmError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| HrmError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a fresh page.
        ///
        /// # Errors
        ///
        /// Returns [`HrmError::Page`] if the page cannot be created.
        pub async fn new_page(&self) -> HrmResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| HrmError::Page {
                    message: e.to_string(),
                })?;

            Ok(Page {
                inner: Arc::new(Mutex::new(cdp_page)),
                closed: Arc::new(AtomicBool::new(false)),
            })
        }

        /// Shut the browser down.
        pub async fn close(self) -> HrmResult<()> {
            let mut browser = self.inner.lock().await;
            browser.close().await.map_err(|e| HrmError::BrowserLaunch {
                message: e.to_string(),
            })?;
            Ok(())
        }
    }

    /// One browser tab, alive for exactly one scenario
    #[derive(Debug, Clone)]
    pub struct Page {
        inner: Arc<Mutex<CdpPage>>,
        closed: Arc<AtomicBool>,
    }

    impl Page {
        /// Navigate to a URL and wait for the load event.
        pub async fn goto(&self, url: &str) -> HrmResult<()> {
            let page = self.inner.lock().await;
            page.goto(url).await.map_err(|e| HrmError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            Ok(())
        }

        /// Current URL as the browser reports it.
        pub async fn current_url(&self) -> HrmResult<String> {
            let page = self.inner.lock().await;
            let url = page.url().await.map_err(|e| HrmError::Page {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_else(|| "about:blank".to_string()))
        }

        /// Whether the selector resolves to a visible element right now.
        pub async fn is_visible(&self, selector: &Selector) -> HrmResult<bool> {
            let expr = format!(
                "(() => {{ const el = {query}; if (!el) return false; \
                 const style = window.getComputedStyle(el); \
                 return style.display !== 'none' && style.visibility !== 'hidden' \
                 && el.getClientRects().length > 0; }})()",
                query = selector.to_query()
            );
            self.eval_bool(&expr).await
        }

        /// Click the element the selector resolves to.
        pub async fn click(&self, selector: &Selector) -> HrmResult<()> {
            let expr = format!(
                "(() => {{ const el = {query}; if (!el) return false; \
                 el.scrollIntoView({{ block: 'center' }}); el.click(); return true; }})()",
                query = selector.to_query()
            );
            if self.eval_bool(&expr).await? {
                Ok(())
            } else {
                Err(HrmError::Page {
                    message: format!("click target not found: {selector}"),
                })
            }
        }

        /// Replace the element's input value with `text`.
        ///
        /// Uses the native value setter and dispatches `input`/`change` so
        /// framework-bound inputs observe the mutation.
        pub async fn fill(&self, selector: &Selector, text: &str) -> HrmResult<()> {
            let expr = format!(
                "(() => {{ const el = {query}; if (!el) return false; el.focus(); \
                 const proto = el.tagName === 'TEXTAREA' \
                   ? window.HTMLTextAreaElement.prototype \
                   : window.HTMLInputElement.prototype; \
                 Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {text:?}); \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return true; }})()",
                query = selector.to_query()
            );
            if self.eval_bool(&expr).await? {
                Ok(())
            } else {
                Err(HrmError::Page {
                    message: format!("fill target not found: {selector}"),
                })
            }
        }

        /// Text content of the element, or empty string if absent.
        pub async fn text_content(&self, selector: &Selector) -> HrmResult<String> {
            let expr = format!(
                "(() => {{ const el = {query}; \
                 return el && el.textContent ? el.textContent : ''; }})()",
                query = selector.to_query()
            );
            let page = self.inner.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| HrmError::Page {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| HrmError::Page {
                message: e.to_string(),
            })
        }

        /// Suspend for a fixed number of milliseconds.
        pub async fn wait_ms(&self, ms: u64) -> HrmResult<()> {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
            Ok(())
        }

        /// Capture a PNG screenshot of the current viewport.
        pub async fn screenshot(&self) -> HrmResult<Vec<u8>> {
            let page = self.inner.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let shot = page.execute(params).await.map_err(|e| HrmError::Screenshot {
                message: e.to_string(),
            })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(|e| HrmError::Screenshot {
                    message: e.to_string(),
                })
        }

        /// Close the page. Safe to call once per scenario teardown.
        pub async fn close(&self) -> HrmResult<()> {
            let page = self.inner.lock().await.clone();
            page.close().await.map_err(|e| HrmError::Page {
                message: e.to_string(),
            })?;
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }

        /// Whether the page has been closed.
        pub fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }

        async fn eval_bool(&self, expr: &str) -> HrmResult<bool> {
            let page = self.inner.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| HrmError::Page {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| HrmError::Page {
                message: e.to_string(),
            })
        }
    }
}

// ============================================================================
// Mock implementation (unit tests, no chromium required)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::{HrmError, HrmResult, Selector, SuiteConfig};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    /// A seeded element in the mock DOM
    #[derive(Debug, Clone, Default)]
    pub struct MockElement {
        /// Whether the element is currently visible
        pub visible: bool,
        /// Visible text content
        pub text: String,
        /// Current input value
        pub value: String,
    }

    impl MockElement {
        /// A visible element with the given text.
        #[must_use]
        pub fn visible_with_text(text: impl Into<String>) -> Self {
            Self {
                visible: true,
                text: text.into(),
                value: String::new(),
            }
        }

        /// A visible element with no text (inputs, buttons without labels).
        #[must_use]
        pub fn visible() -> Self {
            Self {
                visible: true,
                ..Self::default()
            }
        }

        /// A hidden element (revealed later via `click_reveals`).
        #[must_use]
        pub fn hidden_with_text(text: impl Into<String>) -> Self {
            Self {
                visible: false,
                text: text.into(),
                value: String::new(),
            }
        }
    }

    #[derive(Debug, Clone, Default)]
    struct MockState {
        url: String,
        closed: bool,
        elements: BTreeMap<String, MockElement>,
        click_reveals: BTreeMap<String, Vec<String>>,
        click_navigates: BTreeMap<String, String>,
    }

    impl MockState {
        /// Resolve a selector to a seeded element key.
        ///
        /// CSS and test-id selectors match by exact key; text selectors
        /// scan element texts; `CssWithText` matches by key prefix plus
        /// contained text, which is close enough for seeded keys like
        /// `button#save`.
        fn resolve(&self, selector: &Selector) -> Option<String> {
            match selector {
                Selector::Css(css) => self.elements.contains_key(css).then(|| css.clone()),
                Selector::TestId(id) => {
                    let key = format!("[data-testid=\"{id}\"]");
                    self.elements.contains_key(&key).then_some(key)
                }
                Selector::Text(t) => self
                    .elements
                    .iter()
                    .find(|(_, el)| el.text.contains(t.as_str()))
                    .map(|(k, _)| k.clone()),
                Selector::ExactText(t) => self
                    .elements
                    .iter()
                    .find(|(_, el)| el.text.trim() == t)
                    .map(|(k, _)| k.clone()),
                Selector::CssWithText { css, text } => self
                    .elements
                    .iter()
                    .find(|(k, el)| k.starts_with(css.as_str()) && el.text.contains(text.as_str()))
                    .map(|(k, _)| k.clone()),
            }
        }
    }

    /// Mock browser holding a DOM template cloned into every new page
    #[derive(Debug, Default)]
    pub struct Browser {
        template: Mutex<MockState>,
        pages: Mutex<Vec<Page>>,
    }

    impl Browser {
        /// Launch a mock browser.
        pub async fn launch(config: &SuiteConfig) -> HrmResult<Self> {
            let browser = Self::default();
            browser
                .template
                .lock()
                .map_err(|_| poisoned())?
                .url
                .clone_from(&config.base_url);
            Ok(browser)
        }

        /// Open a fresh page seeded from the template DOM.
        pub async fn new_page(&self) -> HrmResult<Page> {
            let state = self.template.lock().map_err(|_| poisoned())?.clone();
            let page = Page {
                state: Arc::new(Mutex::new(state)),
            };
            self.pages.lock().map_err(|_| poisoned())?.push(page.clone());
            Ok(page)
        }

        /// Shut the mock browser down.
        pub async fn close(self) -> HrmResult<()> {
            Ok(())
        }

        /// Seed an element into the template DOM.
        pub fn seed_element(&self, key: impl Into<String>, element: MockElement) {
            if let Ok(mut template) = self.template.lock() {
                let _ = template.elements.insert(key.into(), element);
            }
        }

        /// Clicking `key` marks the listed element keys visible.
        pub fn seed_click_reveals(&self, key: impl Into<String>, reveals: Vec<String>) {
            if let Ok(mut template) = self.template.lock() {
                let _ = template.click_reveals.insert(key.into(), reveals);
            }
        }

        /// Clicking `key` sets the page URL (simulated navigation).
        pub fn seed_click_navigates(&self, key: impl Into<String>, url: impl Into<String>) {
            if let Ok(mut template) = self.template.lock() {
                let _ = template.click_navigates.insert(key.into(), url.into());
            }
        }

        /// Handles to every page this browser has opened.
        pub fn pages(&self) -> Vec<Page> {
            self.pages.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    /// One mock page, alive for exactly one scenario
    #[derive(Debug, Clone, Default)]
    pub struct Page {
        state: Arc<Mutex<MockState>>,
    }

    impl Page {
        /// Navigate to a URL.
        pub async fn goto(&self, url: &str) -> HrmResult<()> {
            self.state.lock().map_err(|_| poisoned())?.url = url.to_string();
            Ok(())
        }

        /// Current URL.
        pub async fn current_url(&self) -> HrmResult<String> {
            Ok(self.state.lock().map_err(|_| poisoned())?.url.clone())
        }

        /// Whether the selector resolves to a visible element right now.
        pub async fn is_visible(&self, selector: &Selector) -> HrmResult<bool> {
            let state = self.state.lock().map_err(|_| poisoned())?;
            Ok(state
                .resolve(selector)
                .and_then(|key| state.elements.get(&key))
                .is_some_and(|el| el.visible))
        }

        /// Click the element, applying any scripted reveal/navigation.
        pub async fn click(&self, selector: &Selector) -> HrmResult<()> {
            let mut state = self.state.lock().map_err(|_| poisoned())?;
            let Some(key) = state.resolve(selector) else {
                return Err(HrmError::Page {
                    message: format!("click target not found: {selector}"),
                });
            };
            if let Some(reveals) = state.click_reveals.get(&key).cloned() {
                for reveal_key in reveals {
                    if let Some(el) = state.elements.get_mut(&reveal_key) {
                        el.visible = true;
                    }
                }
            }
            if let Some(url) = state.click_navigates.get(&key).cloned() {
                state.url = url;
            }
            Ok(())
        }

        /// Replace the element's input value with `text`.
        pub async fn fill(&self, selector: &Selector, text: &str) -> HrmResult<()> {
            let mut state = self.state.lock().map_err(|_| poisoned())?;
            let Some(key) = state.resolve(selector) else {
                return Err(HrmError::Page {
                    message: format!("fill target not found: {selector}"),
                });
            };
            if let Some(el) = state.elements.get_mut(&key) {
                el.value = text.to_string();
            }
            Ok(())
        }

        /// Text content of the element, or empty string if absent.
        pub async fn text_content(&self, selector: &Selector) -> HrmResult<String> {
            let state = self.state.lock().map_err(|_| poisoned())?;
            Ok(state
                .resolve(selector)
                .and_then(|key| state.elements.get(&key))
                .map(|el| el.text.clone())
                .unwrap_or_default())
        }

        /// Fixed delays resolve instantly in mock mode.
        pub async fn wait_ms(&self, _ms: u64) -> HrmResult<()> {
            Ok(())
        }

        /// Screenshots are empty in mock mode.
        pub async fn screenshot(&self) -> HrmResult<Vec<u8>> {
            Ok(vec![])
        }

        /// Close the page.
        pub async fn close(&self) -> HrmResult<()> {
            self.state.lock().map_err(|_| poisoned())?.closed = true;
            Ok(())
        }

        /// Whether the page has been closed.
        pub fn is_closed(&self) -> bool {
            self.state.lock().map(|s| s.closed).unwrap_or(false)
        }

        /// Current value of a seeded input (test support).
        pub fn value_of(&self, key: &str) -> Option<String> {
            self.state
                .lock()
                .ok()?
                .elements
                .get(key)
                .map(|el| el.value.clone())
        }
    }

    fn poisoned() -> HrmError {
        HrmError::Page {
            message: "mock state lock poisoned".to_string(),
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};

#[cfg(not(feature = "browser"))]
pub use mock::{Browser, MockElement, Page};
