//! Create/edit modal state machine
//!
//! States are `Closed`, `OpenForCreate` and `OpenForEdit`. Every opening starts
//! a new session; asynchronous results that belong to an older session are
//! ignored, so a key generated for a modal the user already closed never
//! reaches a later form.

use std::fmt;

use tracing::debug;

use crate::models::BotConfig;
use crate::utils::errors::{ConsoleError, FieldError, Result};
use super::form::BotConfigForm;

/// Identifier of one opening of the modal
pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    OpenForCreate { session: SessionId },
    OpenForEdit { session: SessionId, id: i64 },
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalState::Closed => write!(f, "closed"),
            ModalState::OpenForCreate { .. } => write!(f, "open_for_create"),
            ModalState::OpenForEdit { id, .. } => write!(f, "open_for_edit({})", id),
        }
    }
}

/// The modal together with its form
#[derive(Debug, Clone)]
pub struct Modal {
    state: ModalState,
    last_session: SessionId,
    form: BotConfigForm,
    field_errors: Vec<FieldError>,
}

impl Default for Modal {
    fn default() -> Self {
        Self::new()
    }
}

impl Modal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            last_session: 0,
            form: BotConfigForm::default(),
            field_errors: Vec::new(),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn form(&self) -> &BotConfigForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BotConfigForm {
        &mut self.form
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn set_field_errors(&mut self, errors: Vec<FieldError>) {
        self.field_errors = errors;
    }

    /// Id of the record being edited, kept outside the form
    pub fn editing_id(&self) -> Option<i64> {
        match self.state {
            ModalState::OpenForEdit { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Closed → OpenForCreate with an empty form
    pub fn open_for_create(&mut self) -> Result<SessionId> {
        self.ensure_closed("open_for_create")?;
        let session = self.next_session();
        self.form = BotConfigForm::default();
        self.field_errors.clear();
        self.state = ModalState::OpenForCreate { session };
        debug!(session = session, "Modal opened for create");
        Ok(session)
    }

    /// Closed → OpenForEdit with every field copied from `record`
    pub fn open_for_edit(&mut self, record: &BotConfig) -> Result<SessionId> {
        let id = record
            .id
            .ok_or_else(|| ConsoleError::InvalidInput("cannot edit a record without an id".to_string()))?;
        self.ensure_closed("open_for_edit")?;
        let session = self.next_session();
        self.form = BotConfigForm::from_record(record);
        self.field_errors.clear();
        self.state = ModalState::OpenForEdit { session, id };
        debug!(session = session, id = id, "Modal opened for edit");
        Ok(session)
    }

    /// Open → Closed; the form is reset so nothing leaks into the next opening
    pub fn close(&mut self) {
        if self.is_open() {
            debug!(state = %self.state, "Modal closed");
        }
        self.state = ModalState::Closed;
        self.form = BotConfigForm::default();
        self.field_errors.clear();
    }

    /// Apply a generated key if it belongs to the current create session
    ///
    /// Returns whether the key was applied. A key for an older session, or one
    /// arriving after the user typed a key of their own, is dropped.
    pub fn apply_generated_key(&mut self, session: SessionId, key: &str) -> bool {
        match self.state {
            ModalState::OpenForCreate { session: current } if current == session => {
                if self.form.bot_key.trim().is_empty() {
                    self.form.bot_key = key.to_string();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Whether `session` is the create session currently shown
    pub fn is_current_create_session(&self, session: SessionId) -> bool {
        matches!(self.state, ModalState::OpenForCreate { session: current } if current == session)
    }

    fn next_session(&mut self) -> SessionId {
        self.last_session += 1;
        self.last_session
    }

    fn ensure_closed(&self, to: &str) -> Result<()> {
        if self.is_open() {
            return Err(ConsoleError::InvalidStateTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}
