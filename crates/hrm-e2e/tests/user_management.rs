//! User-management CRUD scenarios (TC-001..TC-009).
//!
//! Runs against a live HRM instance reached via `HRM_BASE_URL` with the
//! fixed admin credentials, driving a real chromium (`browser` feature).
//!
//! The scenarios share fixture data inside the application under test:
//! TC-002 creates `testuser_001`, which TC-003..TC-007 and TC-009 operate
//! on. They must therefore run in order on a single thread against one
//! application instance:
//!
//! ```text
//! cargo test --features browser -- --ignored --test-threads=1
//! ```

#![cfg(feature = "browser")]

use hrm_e2e::{init_tracing, routes, run_scenario, Browser, HrmResult, SuiteConfig, UrlPattern};

const USER_ONE: &str = "testuser_001";
const USER_TWO: &str = "testuser_002";
const PASSWORD: &str = "TestPass123!";
const NEW_PASSWORD: &str = "NewPass456!";

async fn suite() -> HrmResult<(Browser, SuiteConfig)> {
    init_tracing();
    let config = SuiteConfig::from_env();
    let browser = Browser::launch(&config).await?;
    Ok((browser, config))
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_001_navigate_to_admin_module() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-001", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        let ix = s.interactor();
        ix.assert_visible(&s.admin().heading).await?;
        ix.assert_visible(&s.admin().add_button).await
    })
    .await?;
    browser.close().await
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_002_add_new_user() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-002", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        let ix = s.interactor();
        ix.click(&s.admin().add_button).await?;
        ix.wait_for_url(&UrlPattern::new(routes::SAVE_SYSTEM_USER), 5000)
            .await?;
        ix.select_option(&s.form().role_dropdown, "Admin").await?;
        ix.select_option(&s.form().status_dropdown, "Enabled").await?;
        ix.fill(&s.form().username_input, USER_ONE).await?;
        ix.fill(&s.form().password_input, PASSWORD).await?;
        ix.fill(&s.form().confirm_password_input, PASSWORD).await?;
        s.save_and_settle().await?;
        ix.wait_for_url(&UrlPattern::new(routes::VIEW_SYSTEM_USERS), 5000)
            .await
    })
    .await?;
    browser.close().await
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_003_search_user() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-003", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        s.search_user(USER_ONE).await?;
        s.interactor()
            .assert_visible(&hrm_e2e::AdminPage::row_for(USER_ONE))
            .await
    })
    .await?;
    browser.close().await
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_004_edit_user_status() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-004", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        s.search_user(USER_ONE).await?;
        s.open_first_edit().await?;
        s.interactor()
            .select_option(&s.form().status_dropdown, "Disabled")
            .await?;
        s.save_and_settle().await
    })
    .await?;
    browser.close().await
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_005_verify_status_update() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-005", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        s.search_user(USER_ONE).await?;
        s.open_first_edit().await?;
        s.interactor()
            .assert_contains_text(&s.form().status_dropdown, "Disabled")
            .await
    })
    .await?;
    browser.close().await
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_006_edit_password() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-006", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        s.search_user(USER_ONE).await?;
        s.open_first_edit().await?;
        let ix = s.interactor();
        ix.click(&s.form().change_password_toggle).await?;
        ix.fill(&s.form().password_input, NEW_PASSWORD).await?;
        ix.fill(&s.form().confirm_password_input, NEW_PASSWORD).await?;
        s.save_and_settle().await
    })
    .await?;
    browser.close().await
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_007_edit_user_role() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-007", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        s.search_user(USER_ONE).await?;
        s.open_first_edit().await?;
        s.interactor()
            .select_option(&s.form().role_dropdown, "ESS")
            .await?;
        s.save_and_settle().await
    })
    .await?;
    browser.close().await
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_008_add_user_without_employee_name() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-008", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        let ix = s.interactor();
        ix.click(&s.admin().add_button).await?;
        ix.wait_for_url(&UrlPattern::new(routes::SAVE_SYSTEM_USER), 5000)
            .await?;
        ix.select_option(&s.form().role_dropdown, "Admin").await?;
        ix.select_option(&s.form().status_dropdown, "Enabled").await?;
        ix.fill(&s.form().username_input, USER_TWO).await?;
        ix.fill(&s.form().password_input, PASSWORD).await?;
        ix.fill(&s.form().confirm_password_input, PASSWORD).await?;
        s.save_and_settle().await?;
        ix.wait_for_url(&UrlPattern::new(routes::VIEW_SYSTEM_USERS), 5000)
            .await
    })
    .await?;
    browser.close().await
}

#[tokio::test]
#[ignore = "requires chromium and a seeded HRM instance"]
async fn tc_009_delete_user() -> HrmResult<()> {
    let (browser, config) = suite().await?;
    run_scenario("TC-009", &browser, &config, |s| async move {
        s.goto_admin_module().await?;
        s.search_user(USER_ONE).await?;
        s.delete_first_row().await?;
        // Deletion must be observable: a re-search for the same username
        // shows the empty-result indicator.
        s.search_user(USER_ONE).await?;
        s.interactor().assert_visible(&s.admin().no_records).await
    })
    .await?;
    browser.close().await
}
