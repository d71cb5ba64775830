//! Console handlers module
//!
//! This module turns input lines into page operations and page state into
//! text:
//! - Command handlers for console commands
//! - Callback handlers for confirmation answers
//! - Renderers for the table, the form and the details view

pub mod callbacks;
pub mod commands;
pub mod render;

pub use commands::{handle_command, Command, CommandError};

use tracing::{debug, warn};

use crate::state::{BotConfigPage, DeleteConfirmation, PageEvent};
use crate::utils::errors::ConsoleError;

/// What a handler wants shown after it ran
#[derive(Debug)]
pub enum Reply {
    /// Arbitrary text, possibly empty
    Text(String),
    /// The table, with the form when it is open
    Page,
    /// Only the open form
    Form,
    /// Ask the user before deleting
    Confirm(DeleteConfirmation),
    Quit,
}

/// Whether the console should keep reading input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// One interactive console: the page plus a pending delete question
pub struct ConsoleSession {
    page: BotConfigPage,
    pending_delete: Option<DeleteConfirmation>,
}

impl ConsoleSession {
    pub fn new(page: BotConfigPage) -> Self {
        Self {
            page,
            pending_delete: None,
        }
    }

    pub fn page(&self) -> &BotConfigPage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut BotConfigPage {
        &mut self.page
    }

    /// Whether the next line answers a delete confirmation
    pub fn awaiting_confirmation(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Prompt to print before reading the next line
    pub fn prompt(&self) -> String {
        match &self.pending_delete {
            Some(confirmation) => self
                .page
                .i18n()
                .t1("confirm.prompt", self.page.lang(), "question", confirmation.question()),
            None => "> ".to_string(),
        }
    }

    /// Handle one input line
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        let result = match self.pending_delete.take() {
            Some(confirmation) => {
                callbacks::handle_confirmation(&mut self.page, confirmation, line).await
            }
            None => {
                if line.trim().is_empty() {
                    return Flow::Continue(String::new());
                }
                match Command::parse(line) {
                    Ok(cmd) => handle_command(&mut self.page, cmd).await,
                    Err(e) => {
                        debug!(line = line, error = %e, "Unparseable console input");
                        return Flow::Continue(self.describe_command_error(&e));
                    }
                }
            }
        };

        let body = match result {
            Ok(Reply::Quit) => return Flow::Quit,
            Ok(Reply::Confirm(confirmation)) => {
                self.pending_delete = Some(confirmation);
                String::new()
            }
            Ok(reply) => self.render_reply(reply),
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "Console command failed");
                if self.page.notifications().is_empty() {
                    self.describe_error(&e)
                } else {
                    String::new()
                }
            }
        };

        Flow::Continue(self.with_notifications(body))
    }

    /// Apply a background completion and return the refreshed screen
    pub fn handle_event(&mut self, event: PageEvent) -> String {
        let form_only = matches!(event, PageEvent::KeyGenerated { .. });
        self.page.handle_event(event);

        let body = if form_only {
            render::render_form(&self.page).unwrap_or_default()
        } else {
            render::render_page(&self.page)
        };
        self.with_notifications(body)
    }

    fn render_reply(&self, reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Page => render::render_page(&self.page),
            Reply::Form => render::render_form(&self.page).unwrap_or_default(),
            Reply::Confirm(_) | Reply::Quit => String::new(),
        }
    }

    fn with_notifications(&mut self, body: String) -> String {
        let mut out = render::render_notifications(&self.page.take_notifications());
        out.push_str(&body);
        out
    }

    fn describe_command_error(&self, error: &CommandError) -> String {
        let (key, name, value) = match error {
            CommandError::Unknown(command) => ("notify.unknown_command", "command", command),
            CommandError::InvalidArgument(argument) => ("notify.invalid_argument", "argument", argument),
            CommandError::UnknownField(field) => ("notify.unknown_field", "field", field),
        };
        format!("{}\n", self.page.i18n().t1(key, self.page.lang(), name, value))
    }

    fn describe_error(&self, error: &ConsoleError) -> String {
        match error {
            ConsoleError::InvalidInput(message) => format!(
                "{}\n",
                self.page
                    .i18n()
                    .t1("notify.invalid_argument", self.page.lang(), "argument", message)
            ),
            other => format!("{}\n", other),
        }
    }
}
