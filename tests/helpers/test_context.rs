//! Test context for unified test setup
//!
//! Builds a page or a console session wired to the in-memory service and an
//! in-memory clipboard, with the bundled translations loaded.

use std::sync::Arc;
use std::time::Duration;

use wechat_bot_console::config::Settings;
use wechat_bot_console::handlers::ConsoleSession;
use wechat_bot_console::i18n::I18n;
use wechat_bot_console::services::{MemoryClipboard, ServiceFactory};
use wechat_bot_console::state::{BotConfigPage, PageEvent};

use super::mock_api::MockBotConfigApi;

/// Upper bound for waiting on a background result
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Unified test context that manages all test components
pub struct TestContext {
    pub api: Arc<MockBotConfigApi>,
    pub clipboard: MemoryClipboard,
    pub settings: Settings,
    pub i18n: Arc<I18n>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Context with an empty service
    pub fn new() -> Self {
        Self::with_api(MockBotConfigApi::new())
    }

    pub fn with_api(api: MockBotConfigApi) -> Self {
        let settings = Settings::default();
        let i18n = I18n::with_bundled(&settings.i18n).expect("bundled translations should load");

        Self {
            api: Arc::new(api),
            clipboard: MemoryClipboard::new(),
            settings,
            i18n: Arc::new(i18n),
        }
    }

    pub fn services(&self) -> ServiceFactory {
        ServiceFactory::from_parts(self.api.clone(), Arc::new(self.clipboard.clone()))
    }

    /// Page in Chinese, the default language
    pub fn page(&self) -> BotConfigPage {
        self.page_in("zh")
    }

    pub fn page_in(&self, lang: &str) -> BotConfigPage {
        BotConfigPage::new(self.services(), self.i18n.clone(), lang, &self.settings.console)
    }

    /// Page whose first listing has completed
    pub async fn loaded_page(&self) -> BotConfigPage {
        let mut page = self.page();
        page.refresh();
        settle(&mut page).await;
        page
    }

    pub fn session(&self) -> ConsoleSession {
        ConsoleSession::new(self.page())
    }
}

/// Drain background results, failing the test instead of hanging
pub async fn settle(page: &mut BotConfigPage) {
    tokio::time::timeout(EVENT_TIMEOUT, page.settle())
        .await
        .expect("background requests should complete");
}

/// Wait for exactly one background result
pub async fn next_event(page: &mut BotConfigPage) -> PageEvent {
    tokio::time::timeout(EVENT_TIMEOUT, page.next_event())
        .await
        .expect("an event should arrive")
        .expect("event channel should stay open")
}

/// Keys of the notifications raised since the last call
pub fn notification_keys(page: &mut BotConfigPage) -> Vec<String> {
    page.take_notifications().into_iter().map(|n| n.key).collect()
}
