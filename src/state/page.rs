//! Bot config console page
//!
//! [`BotConfigPage`] owns all transient UI state of the management screen and
//! implements its workflow: list/refresh, search and pagination, open for
//! create or edit, submit, delete with confirmation and copying a callback
//! URL. Remote calls for the list and for key generation run as spawned tasks
//! whose results come back as [`PageEvent`]s; the owner feeds them to
//! [`BotConfigPage::handle_event`] on its own task, so state is only ever
//! touched from one place.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::ConsoleConfig;
use crate::i18n::I18n;
use crate::models::{BotConfig, PageResponse};
use crate::services::{BotConfigApi, Clipboard, NotificationLevel, NotificationQueue, ServiceFactory};
use crate::utils::errors::{ConsoleError, Result};
use crate::utils::logging;
use super::context::{ApplyOutcome, PageContext, RequestSeq};
use super::form::FormField;
use super::modal::{Modal, ModalState, SessionId};

/// Completion of a background request
#[derive(Debug)]
pub enum PageEvent {
    PageLoaded {
        seq: RequestSeq,
        result: Result<PageResponse<BotConfig>>,
    },
    KeyGenerated {
        session: SessionId,
        result: Result<String>,
    },
}

/// Proof that the user was asked to confirm deleting a record
///
/// Only [`BotConfigPage::request_delete`] creates one, and
/// [`BotConfigPage::confirm_delete`] consumes it, so a delete call can never
/// be issued without the confirmation step.
#[derive(Debug)]
pub struct DeleteConfirmation {
    id: i64,
    question: String,
}

impl DeleteConfirmation {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Question to show the user
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// The management screen
pub struct BotConfigPage {
    api: Arc<dyn BotConfigApi>,
    clipboard: Arc<dyn Clipboard>,
    i18n: Arc<I18n>,
    lang: String,
    page_size_options: Vec<u64>,
    context: PageContext,
    modal: Modal,
    notifications: NotificationQueue,
    pending_keys: usize,
    events_tx: mpsc::UnboundedSender<PageEvent>,
    events_rx: mpsc::UnboundedReceiver<PageEvent>,
}

impl BotConfigPage {
    pub fn new(services: ServiceFactory, i18n: Arc<I18n>, lang: &str, console: &ConsoleConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            api: services.api,
            clipboard: services.clipboard,
            i18n,
            lang: lang.to_string(),
            page_size_options: console.page_size_options.clone(),
            context: PageContext::new(console.default_page_size),
            modal: Modal::new(),
            notifications: NotificationQueue::default(),
            pending_keys: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<crate::services::Notification> {
        self.notifications.drain()
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn page_size_options(&self) -> &[u64] {
        &self.page_size_options
    }

    /// Translate a message key in the page's language
    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key, &self.lang, None)
    }

    fn notify(&mut self, level: NotificationLevel, key: &str) {
        let text = self.t(key);
        self.notifications.push(level, key, text);
    }

    fn notify_with(&mut self, level: NotificationLevel, key: &str, name: &str, value: impl ToString) {
        let text = self.i18n.t1(key, &self.lang, name, value);
        self.notifications.push(level, key, text);
    }

    /// Requests whose results have not been handled yet
    pub fn has_pending(&self) -> bool {
        self.context.is_loading() || self.pending_keys > 0
    }

    // ---- list ----------------------------------------------------------

    /// Request the current page; the result arrives as a `PageLoaded` event
    pub fn refresh(&mut self) -> RequestSeq {
        let ticket = self.context.issue();
        debug!(seq = ticket.seq, current = ticket.params.current, size = ticket.params.size, "Issuing list request");

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let seq = ticket.seq;
        tokio::spawn(async move {
            let result = api.page(&ticket.params).await;
            let _ = tx.send(PageEvent::PageLoaded { seq, result });
        });

        seq
    }

    /// Jump to a page and refetch
    pub fn go_to_page(&mut self, page: u64) -> Result<RequestSeq> {
        self.context.go_to(page)?;
        Ok(self.refresh())
    }

    /// Change the page size and refetch
    pub fn set_page_size(&mut self, size: u64) -> Result<RequestSeq> {
        if !self.page_size_options.contains(&size) {
            return Err(ConsoleError::InvalidInput(format!(
                "page size must be one of {:?}",
                self.page_size_options
            )));
        }
        self.context.resize(size)?;
        Ok(self.refresh())
    }

    /// Filter by keyword from the first page
    pub fn search(&mut self, keyword: &str) -> RequestSeq {
        self.context.search(keyword);
        logging::log_page_action("search", None, Some(&self.context.keyword));
        self.refresh()
    }

    // ---- events --------------------------------------------------------

    /// Wait for the next background completion
    pub async fn next_event(&mut self) -> Option<PageEvent> {
        self.events_rx.recv().await
    }

    /// Apply a background completion to the page state
    pub fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::PageLoaded { seq, result } => self.handle_page_loaded(seq, result),
            PageEvent::KeyGenerated { session, result } => self.handle_key_generated(session, result),
        }
    }

    /// Handle events until no request is outstanding
    pub async fn settle(&mut self) {
        while self.has_pending() {
            match self.next_event().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
    }

    fn handle_page_loaded(&mut self, seq: RequestSeq, result: Result<PageResponse<BotConfig>>) {
        self.context.complete(seq);

        match result {
            Ok(page) => match self.context.apply(seq, page) {
                ApplyOutcome::Applied => {
                    debug!(seq = seq, total = self.context.total, rows = self.context.records.len(), "Page applied");
                }
                ApplyOutcome::Stale { latest } => logging::log_stale_response("page", seq, latest),
            },
            Err(e) => {
                if self.context.is_latest(seq) {
                    warn!(seq = seq, error = %e, kind = ?e.kind(), "Failed to load page");
                    self.notify(NotificationLevel::Error, "notify.fetch_failed");
                } else {
                    logging::log_stale_response("page_error", seq, self.context.latest_seq());
                }
            }
        }
    }

    fn handle_key_generated(&mut self, session: SessionId, result: Result<String>) {
        self.pending_keys = self.pending_keys.saturating_sub(1);

        match result {
            Ok(key) => {
                if self.modal.apply_generated_key(session, &key) {
                    debug!(session = session, "Generated key applied");
                } else {
                    debug!(session = session, "Generated key discarded");
                }
            }
            Err(e) => {
                if self.modal.is_current_create_session(session) {
                    warn!(session = session, error = %e, "Failed to generate bot key");
                    self.notify(NotificationLevel::Error, "notify.key_failed");
                } else {
                    debug!(session = session, error = %e, "Key generation failed for a closed modal");
                }
            }
        }
    }

    // ---- modal ---------------------------------------------------------

    /// Open an empty form and request a generated key in the background
    pub fn open_for_create(&mut self) -> Result<SessionId> {
        let session = match self.modal.open_for_create() {
            Ok(session) => session,
            Err(e) => {
                self.notify(NotificationLevel::Error, "notify.modal_open");
                return Err(e);
            }
        };
        logging::log_page_action("open_for_create", None, None);

        self.pending_keys += 1;
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.generate_key().await;
            let _ = tx.send(PageEvent::KeyGenerated { session, result });
        });

        Ok(session)
    }

    /// Open the form pre-filled from a record of the current page
    pub fn open_for_edit(&mut self, id: i64) -> Result<SessionId> {
        let record = match self.context.find(id) {
            Some(record) => record.clone(),
            None => {
                self.notify_with(NotificationLevel::Error, "notify.not_on_page", "id", id);
                return Err(ConsoleError::NotFound { id });
            }
        };

        let session = match self.modal.open_for_edit(&record) {
            Ok(session) => session,
            Err(e) => {
                self.notify(NotificationLevel::Error, "notify.modal_open");
                return Err(e);
            }
        };
        logging::log_page_action("open_for_edit", Some(id), None);
        Ok(session)
    }

    /// Close the form without saving
    pub fn cancel(&mut self) {
        self.modal.close();
    }

    /// Set a form field from user input
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<()> {
        if !self.modal.is_open() {
            self.notify(NotificationLevel::Error, "notify.no_modal");
            return Err(ConsoleError::InvalidStateTransition {
                from: "closed".to_string(),
                to: "edit_field".to_string(),
            });
        }
        self.modal.form_mut().set(field, value)
    }

    /// Flip the enabled switch of the open form
    pub fn toggle_active(&mut self) -> Result<bool> {
        if !self.modal.is_open() {
            self.notify(NotificationLevel::Error, "notify.no_modal");
            return Err(ConsoleError::InvalidStateTransition {
                from: "closed".to_string(),
                to: "toggle_active".to_string(),
            });
        }
        Ok(self.modal.form_mut().toggle_active())
    }

    /// Validate and save the form
    ///
    /// On success the modal closes and the current page is refetched. On any
    /// failure the modal stays open with the entered values.
    pub async fn submit(&mut self) -> Result<()> {
        let editing = match self.modal.state() {
            ModalState::Closed => {
                self.notify(NotificationLevel::Error, "notify.no_modal");
                return Err(ConsoleError::InvalidStateTransition {
                    from: "closed".to_string(),
                    to: "submit".to_string(),
                });
            }
            _ => self.modal.editing_id(),
        };

        let request = match self.modal.form().validate() {
            Ok(request) => request,
            Err(ConsoleError::Validation(errors)) => {
                if let Some(first) = errors.first() {
                    self.notify(NotificationLevel::Error, first.message_key);
                }
                self.modal.set_field_errors(errors.clone());
                return Err(ConsoleError::Validation(errors));
            }
            Err(e) => return Err(e),
        };
        self.modal.set_field_errors(Vec::new());

        let (result, success_key, failure_key) = match editing {
            Some(id) => (
                self.api.update(&request.with_id(id)).await,
                "notify.update_success",
                "notify.update_failed",
            ),
            None => (
                self.api.create(&request).await,
                "notify.create_success",
                "notify.create_failed",
            ),
        };

        match result {
            Ok(()) => {
                info!(id = ?editing, "Bot config saved");
                self.notify(NotificationLevel::Success, success_key);
                self.modal.close();
                self.refresh();
                Ok(())
            }
            Err(e) => {
                warn!(id = ?editing, error = %e, kind = ?e.kind(), "Failed to save bot config");
                self.notify(NotificationLevel::Error, failure_key);
                Err(e)
            }
        }
    }

    // ---- delete --------------------------------------------------------

    /// First step of deleting a row: returns the confirmation to present
    pub fn request_delete(&mut self, id: i64) -> Result<DeleteConfirmation> {
        if self.context.find(id).is_none() {
            self.notify_with(NotificationLevel::Error, "notify.not_on_page", "id", id);
            return Err(ConsoleError::NotFound { id });
        }

        Ok(DeleteConfirmation {
            id,
            question: self.t("confirm.delete"),
        })
    }

    /// Second step: the user acknowledged the confirmation
    ///
    /// The row stays visible until the refetch that follows a successful
    /// delete replaces the page.
    pub async fn confirm_delete(&mut self, confirmation: DeleteConfirmation) -> Result<()> {
        let id = confirmation.id;
        logging::log_page_action("delete", Some(id), None);

        match self.api.delete(id).await {
            Ok(()) => {
                self.notify(NotificationLevel::Success, "notify.delete_success");
                self.refresh();
                Ok(())
            }
            Err(e) => {
                warn!(id = id, error = %e, kind = ?e.kind(), "Failed to delete bot config");
                self.notify(NotificationLevel::Error, "notify.delete_failed");
                Err(e)
            }
        }
    }

    /// Second step, declined: the row is kept and the user is told so
    pub fn cancel_delete(&mut self, confirmation: DeleteConfirmation) {
        logging::log_page_action("delete_cancelled", Some(confirmation.id), None);
        self.notify(NotificationLevel::Info, "notify.delete_cancelled");
    }

    // ---- misc ----------------------------------------------------------

    /// Copy the callback URL of a row to the clipboard
    pub fn copy_callback_url(&mut self, id: i64) -> Result<()> {
        let url = match self.context.find(id) {
            Some(record) => record.callback_url.clone().filter(|u| !u.is_empty()),
            None => {
                self.notify_with(NotificationLevel::Error, "notify.not_on_page", "id", id);
                return Err(ConsoleError::NotFound { id });
            }
        };

        let Some(url) = url else {
            self.notify(NotificationLevel::Info, "notify.no_callback_url");
            return Err(ConsoleError::InvalidInput(format!("bot config {} has no callback URL", id)));
        };

        match self.clipboard.copy(&url) {
            Ok(()) => {
                self.notify(NotificationLevel::Success, "notify.copied");
                Ok(())
            }
            Err(e) => {
                self.notify(NotificationLevel::Error, "notify.copy_failed");
                Err(e)
            }
        }
    }

    /// Fetch one record by id for the details view
    pub async fn show(&mut self, id: i64) -> Result<BotConfig> {
        match self.api.get(id).await {
            Ok(record) => Ok(record),
            Err(ConsoleError::NotFound { id }) => {
                self.notify_with(NotificationLevel::Error, "notify.not_found", "id", id);
                Err(ConsoleError::NotFound { id })
            }
            Err(e) => {
                warn!(id = id, error = %e, "Failed to load bot config");
                self.notify(NotificationLevel::Error, "notify.detail_failed");
                Err(e)
            }
        }
    }
}
