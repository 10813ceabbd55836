//! Routes, selectors, and page objects for the application under test.
//!
//! These are the suite's external contract with the application (routes
//! and DOM selectors); nothing here is validated structurally. Page objects
//! group the selectors per screen in the Page Object Model style.

use crate::selector::Selector;
use crate::wait::{DEFAULT_TIMEOUT_MS, LOGIN_TIMEOUT_MS};

/// Routes exposed by the application under test.
pub mod routes {
    /// Login form
    pub const LOGIN: &str = "/web/index.php/auth/login";
    /// Dashboard, reached after a successful login
    pub const DASHBOARD: &str = "**/dashboard/index";
    /// Admin module landing page (user management)
    pub const ADMIN_MODULE: &str = "**/admin/viewAdminModule";
    /// Add-user form (also `…/saveSystemUser/{id}` when editing)
    pub const SAVE_SYSTEM_USER: &str = "**/admin/saveSystemUser";
    /// Edit-user form for an existing record
    pub const EDIT_SYSTEM_USER: &str = "**/admin/saveSystemUser/**";
    /// System-user list after a save
    pub const VIEW_SYSTEM_USERS: &str = "**/admin/viewSystemUsers";
}

/// A page or component of the application UI.
pub trait PageObject {
    /// URL glob pattern that matches this page
    fn url_pattern(&self) -> &str;

    /// Bound for waiting on this page to load
    fn load_timeout_ms(&self) -> u64 {
        DEFAULT_TIMEOUT_MS
    }

    /// Page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// The login form
#[derive(Debug, Clone)]
pub struct LoginPage {
    /// Username input
    pub username_input: Selector,
    /// Password input
    pub password_input: Selector,
    /// Submit button
    pub submit_button: Selector,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self {
            username_input: Selector::css("[name=\"username\"]"),
            password_input: Selector::css("[name=\"password\"]"),
            submit_button: Selector::css("button[type=\"submit\"]"),
        }
    }
}

impl LoginPage {
    /// Create the login page object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageObject for LoginPage {
    fn url_pattern(&self) -> &str {
        "**/auth/login"
    }

    fn load_timeout_ms(&self) -> u64 {
        LOGIN_TIMEOUT_MS
    }
}

/// The admin module's user-management screen
#[derive(Debug, Clone)]
pub struct AdminPage {
    /// Top-bar navigation link into the admin module
    pub admin_link: Selector,
    /// "User Management" heading
    pub heading: Selector,
    /// "Add" button opening the user form
    pub add_button: Selector,
    /// Username filter field
    pub search_username: Selector,
    /// "Search" button
    pub search_button: Selector,
    /// Edit button of the first result row
    pub edit_button: Selector,
    /// Delete button of the first result row
    pub delete_button: Selector,
    /// Confirm button of the delete dialog
    pub confirm_delete: Selector,
    /// Empty-result indicator
    pub no_records: Selector,
}

impl Default for AdminPage {
    fn default() -> Self {
        Self {
            admin_link: Selector::css_with_text("a", "Admin"),
            heading: Selector::css_with_text("h6", "User Management"),
            add_button: Selector::css_with_text("button", "Add"),
            search_username: Selector::test_id("username"),
            search_button: Selector::css_with_text("button", "Search"),
            edit_button: Selector::test_id("editButton"),
            delete_button: Selector::test_id("deleteButton"),
            // The dialog's confirm button reads "Yes, Delete"; substring
            // match covers both wordings the application has shipped.
            confirm_delete: Selector::css_with_text("button", "Yes"),
            no_records: Selector::text("No records"),
        }
    }
}

impl AdminPage {
    /// Create the admin page object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Row presence indicator for a given username.
    #[must_use]
    pub fn row_for(username: &str) -> Selector {
        Selector::text(username)
    }
}

impl PageObject for AdminPage {
    fn url_pattern(&self) -> &str {
        "**/admin/viewAdminModule"
    }
}

/// The add/edit system-user form
#[derive(Debug, Clone)]
pub struct UserFormPage {
    /// User role custom dropdown trigger
    pub role_dropdown: Selector,
    /// Status custom dropdown trigger
    pub status_dropdown: Selector,
    /// Username field
    pub username_input: Selector,
    /// Password field
    pub password_input: Selector,
    /// Password confirmation field
    pub confirm_password_input: Selector,
    /// "Change password" toggle shown when editing
    pub change_password_toggle: Selector,
    /// "Save" button
    pub save_button: Selector,
}

impl Default for UserFormPage {
    fn default() -> Self {
        Self {
            role_dropdown: Selector::test_id("userRole"),
            status_dropdown: Selector::test_id("status"),
            username_input: Selector::test_id("username"),
            password_input: Selector::test_id("password"),
            confirm_password_input: Selector::test_id("confirmPassword"),
            change_password_toggle: Selector::test_id("changePassword"),
            save_button: Selector::css_with_text("button", "Save"),
        }
    }
}

impl UserFormPage {
    /// Create the user form page object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageObject for UserFormPage {
    fn url_pattern(&self) -> &str {
        "**/admin/saveSystemUser/**"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wait::UrlPattern;

    #[test]
    fn login_page_uses_name_attribute_selectors() {
        let page = LoginPage::new();
        assert_eq!(page.username_input.to_string(), "[name=\"username\"]");
        assert_eq!(page.load_timeout_ms(), 10_000);
        assert!(UrlPattern::new(page.url_pattern())
            .matches("http://x/web/index.php/auth/login"));
    }

    #[test]
    fn admin_page_pattern_matches_admin_module_route() {
        let page = AdminPage::new();
        let pattern = UrlPattern::new(page.url_pattern());
        assert!(pattern.matches("http://x/web/index.php/admin/viewAdminModule"));
        assert!(!pattern.matches("http://x/web/index.php/dashboard/index"));
        assert_eq!(page.load_timeout_ms(), 5_000);
    }

    #[test]
    fn user_form_selectors_are_test_ids() {
        let form = UserFormPage::new();
        assert_eq!(form.role_dropdown.to_string(), "[data-testid=\"userRole\"]");
        assert_eq!(form.status_dropdown.to_string(), "[data-testid=\"status\"]");
    }

    #[test]
    fn row_for_is_a_substring_text_selector() {
        assert_eq!(
            AdminPage::row_for("testuser_001"),
            Selector::text("testuser_001")
        );
    }
}
