//! Confirmation answers
//!
//! While a delete confirmation is pending the next input line is treated as
//! the answer to it instead of a command.

use tracing::{debug, info};

use crate::handlers::Reply;
use crate::state::{BotConfigPage, DeleteConfirmation};
use crate::utils::errors::Result;

/// Whether an answer accepts the question
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "ok" | "是" | "确定"
    )
}

/// Handle the answer to a pending delete confirmation
pub async fn handle_confirmation(
    page: &mut BotConfigPage,
    confirmation: DeleteConfirmation,
    answer: &str,
) -> Result<Reply> {
    let id = confirmation.id();

    if !is_affirmative(answer) {
        debug!(id = id, answer = answer, "Delete cancelled");
        page.cancel_delete(confirmation);
        return Ok(Reply::Text(String::new()));
    }

    info!(id = id, "Delete confirmed");
    page.confirm_delete(confirmation).await?;
    Ok(Reply::Page)
}
