//! Help command handler

use crate::handlers::Reply;
use crate::state::BotConfigPage;
use crate::utils::errors::Result;

const HELP_KEYS: &[&str] = &[
    "help.list",
    "help.page",
    "help.size",
    "help.search",
    "help.show",
    "help.add",
    "help.edit",
    "help.set",
    "help.toggle",
    "help.submit",
    "help.cancel",
    "help.delete",
    "help.copy",
    "help.quit",
];

/// Handle `help`
pub fn handle_help(page: &mut BotConfigPage) -> Result<Reply> {
    let mut text = format!("{}\n", page.t("help.title"));
    for key in HELP_KEYS {
        text.push_str("  ");
        text.push_str(&page.t(key));
        text.push('\n');
    }

    let fields: Vec<&str> = crate::state::form::FormField::ALL
        .iter()
        .map(|f| f.wire_name())
        .collect();
    text.push_str("  ");
    text.push_str(&page.i18n().t1("help.fields", page.lang(), "fields", fields.join(", ")));
    text.push('\n');

    Ok(Reply::Text(text))
}
