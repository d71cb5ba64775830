//! State management module
//!
//! This module holds the transient state of the management screen: the list
//! context, the create/edit modal with its form, and the page controller that
//! ties them to the bot config service.

pub mod context;
pub mod form;
pub mod modal;
pub mod page;

// Re-export commonly used state components
pub use context::{ApplyOutcome, ContextSummary, ListTicket, PageContext, RequestSeq};
pub use form::{BotConfigForm, FormField};
pub use modal::{Modal, ModalState, SessionId};
pub use page::{BotConfigPage, DeleteConfirmation, PageEvent};
