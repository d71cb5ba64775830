//! Form commands
//!
//! Opening, filling in, submitting and closing the create/edit modal, plus
//! the first step of deleting a row.

use crate::handlers::Reply;
use crate::state::form::FormField;
use crate::state::BotConfigPage;
use crate::utils::errors::{ConsoleError, Result};

/// Handle `add`: open an empty form, the bot key arrives later
pub fn handle_add(page: &mut BotConfigPage) -> Result<Reply> {
    page.open_for_create()?;
    Ok(Reply::Form)
}

/// Handle `edit <id>`
pub fn handle_edit(page: &mut BotConfigPage, id: i64) -> Result<Reply> {
    page.open_for_edit(id)?;
    Ok(Reply::Form)
}

pub fn handle_set(page: &mut BotConfigPage, field: FormField, value: &str) -> Result<Reply> {
    page.set_field(field, value)?;
    Ok(Reply::Form)
}

pub fn handle_toggle(page: &mut BotConfigPage) -> Result<Reply> {
    page.toggle_active()?;
    Ok(Reply::Form)
}

/// Handle `submit`
///
/// A validation failure is not an error for the session: the form is shown
/// again with the offending fields marked.
pub async fn handle_submit(page: &mut BotConfigPage) -> Result<Reply> {
    match page.submit().await {
        Ok(()) => Ok(Reply::Page),
        Err(ConsoleError::Validation(_)) => Ok(Reply::Form),
        Err(e) => Err(e),
    }
}

pub fn handle_cancel(page: &mut BotConfigPage) -> Result<Reply> {
    page.cancel();
    Ok(Reply::Page)
}

/// Handle `delete <id>`: nothing is sent until the user confirms
pub fn handle_delete(page: &mut BotConfigPage, id: i64) -> Result<Reply> {
    let confirmation = page.request_delete(id)?;
    Ok(Reply::Confirm(confirmation))
}
