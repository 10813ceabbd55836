//! Element addressing.
//!
//! A [`Selector`] is the suite's contract with the application's DOM
//! (selectors like `[name="username"]` or `[data-testid="userRole"]`).
//! Each variant compiles to a JavaScript query expression evaluated in the
//! page; there is no structural validation beyond what the DOM answers.

use serde::{Deserialize, Serialize};

/// Selector for locating a single element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., `button[type="submit"]`)
    Css(String),
    /// Test ID selector (`data-testid` attribute)
    TestId(String),
    /// Substring text match over visible elements
    Text(String),
    /// Whole-text match (trimmed) over visible elements; used for
    /// custom-dropdown options where the requested option text must
    /// equal the element's visible text
    ExactText(String),
    /// CSS selector filtered by contained text (the `:has-text()` cases)
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Create a substring text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a whole-text selector
    #[must_use]
    pub fn exact_text(text: impl Into<String>) -> Self {
        Self::ExactText(text.into())
    }

    /// Create a CSS selector filtered by contained text
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Convert to a JavaScript expression yielding the first match or null.
    ///
    /// Text-based variants pick the last (deepest in tree order) matching
    /// element so a leaf node wins over its containers.
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::TestId(id) => {
                let attr = format!("[data-testid=\"{id}\"]");
                format!("document.querySelector({attr:?})")
            }
            Self::Text(t) => format!(
                "Array.from(document.querySelectorAll('*'))\
                 .filter(el => el.children.length === 0 && el.textContent.includes({t:?}))\
                 .pop() || null"
            ),
            Self::ExactText(t) => format!(
                "Array.from(document.querySelectorAll('*'))\
                 .filter(el => el.textContent.trim() === {t:?})\
                 .pop() || null"
            ),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({css:?}))\
                 .find(el => el.textContent.includes({text:?})) || null"
            ),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "{s}"),
            Self::TestId(id) => write!(f, "[data-testid=\"{id}\"]"),
            Self::Text(t) => write!(f, "text={t}"),
            Self::ExactText(t) => write!(f, "text=\"{t}\""),
            Self::CssWithText { css, text } => write!(f, "{css}:has-text(\"{text}\")"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_query_quotes_the_selector() {
        let sel = Selector::css("button[type=\"submit\"]");
        let query = sel.to_query();
        assert!(query.starts_with("document.querySelector("));
        assert!(query.contains("button[type="));
    }

    #[test]
    fn test_id_expands_to_data_testid_attribute() {
        let sel = Selector::test_id("userRole");
        assert!(sel.to_query().contains("data-testid=\\\"userRole\\\""));
        assert_eq!(sel.to_string(), "[data-testid=\"userRole\"]");
    }

    #[test]
    fn exact_text_compares_trimmed_whole_text() {
        let sel = Selector::exact_text("Enabled");
        let query = sel.to_query();
        assert!(query.contains("textContent.trim() === \"Enabled\""));
    }

    #[test]
    fn substring_text_uses_includes() {
        let sel = Selector::text("No records");
        assert!(sel.to_query().contains("includes(\"No records\")"));
    }

    #[test]
    fn css_with_text_filters_by_contained_text() {
        let sel = Selector::css_with_text("button", "Add");
        let query = sel.to_query();
        assert!(query.contains("querySelectorAll(\"button\")"));
        assert!(query.contains("includes(\"Add\")"));
        assert_eq!(sel.to_string(), "button:has-text(\"Add\")");
    }
}
