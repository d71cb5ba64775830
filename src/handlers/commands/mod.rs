//! Command handlers module
//!
//! This module parses console input lines into commands and dispatches them
//! to the page.

pub mod help;
pub mod list;
pub mod edit;

use thiserror::Error;
use tracing::debug;

use crate::state::form::FormField;
use crate::state::BotConfigPage;
use crate::utils::errors::Result;
use crate::utils::helpers::normalize_whitespace;
use super::Reply;

/// All available console commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reload the current page
    Refresh,
    /// Jump to a page
    Page(u64),
    /// Change the page size
    Size(u64),
    /// Filter by keyword; empty clears the filter
    Search(String),
    /// Show one record fetched by id
    Show(i64),
    /// Open the create form
    Add,
    /// Open the edit form for a row
    Edit(i64),
    /// Fill in a form field
    Set(FormField, String),
    /// Flip the enabled switch
    Toggle,
    /// Submit the form
    Submit,
    /// Close the form
    Cancel,
    /// Delete a row, after confirmation
    Delete(i64),
    /// Copy a row's callback URL
    Copy(i64),
    Help,
    Quit,
}

/// Why an input line is not a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl Command {
    /// Parse one input line
    pub fn parse(line: &str) -> std::result::Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "list" | "refresh" | "r" => Ok(Command::Refresh),
            "page" | "p" => Ok(Command::Page(number(rest)?)),
            "size" => Ok(Command::Size(number(rest)?)),
            "search" | "s" => Ok(Command::Search(normalize_whitespace(rest))),
            "show" | "view" => Ok(Command::Show(number(rest)?)),
            "add" | "new" => Ok(Command::Add),
            "edit" | "e" => Ok(Command::Edit(number(rest)?)),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(CommandError::InvalidArgument(rest.to_string()));
                }
                let field = FormField::parse(field)
                    .ok_or_else(|| CommandError::UnknownField(field.to_string()))?;
                Ok(Command::Set(field, value.to_string()))
            }
            "toggle" => Ok(Command::Toggle),
            "submit" | "ok" | "save" => Ok(Command::Submit),
            "cancel" | "close" => Ok(Command::Cancel),
            "delete" | "del" | "rm" => Ok(Command::Delete(number(rest)?)),
            "copy" | "cp" => Ok(Command::Copy(number(rest)?)),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number<T: std::str::FromStr>(arg: &str) -> std::result::Result<T, CommandError> {
    arg.parse::<T>()
        .map_err(|_| CommandError::InvalidArgument(arg.to_string()))
}

/// Main command dispatcher
pub async fn handle_command(page: &mut BotConfigPage, cmd: Command) -> Result<Reply> {
    debug!(command = ?cmd, "Handling console command");

    match cmd {
        Command::Refresh => list::handle_refresh(page),
        Command::Page(n) => list::handle_page(page, n),
        Command::Size(n) => list::handle_size(page, n),
        Command::Search(keyword) => list::handle_search(page, &keyword),
        Command::Show(id) => list::handle_show(page, id).await,
        Command::Copy(id) => list::handle_copy(page, id),
        Command::Add => edit::handle_add(page),
        Command::Edit(id) => edit::handle_edit(page, id),
        Command::Set(field, value) => edit::handle_set(page, field, &value),
        Command::Toggle => edit::handle_toggle(page),
        Command::Submit => edit::handle_submit(page).await,
        Command::Cancel => edit::handle_cancel(page),
        Command::Delete(id) => edit::handle_delete(page, id),
        Command::Help => help::handle_help(page),
        Command::Quit => Ok(Reply::Quit),
    }
}
