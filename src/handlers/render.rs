//! Plain-text views of the page
//!
//! Renders the table, the create/edit form, the details of a single record
//! and pending notifications. Everything is built from page state and
//! translations only; nothing here talks to the service.

use std::fmt::Write;

use crate::models::{BotConfig, Timestamp};
use crate::services::{Notification, NotificationLevel};
use crate::state::form::FormField;
use crate::state::modal::ModalState;
use crate::state::BotConfigPage;
use crate::utils::helpers::{display_width, mask_secret, pad_right, strip_control, truncate_text};

/// Maximum characters of a callback URL shown in the table
const CALLBACK_URL_WIDTH: usize = 32;

/// Header label, translation key
const COLUMNS: &[&str] = &[
    "columns.bot_key",
    "columns.corp_id",
    "columns.agent_id",
    "columns.agent_id_ref",
    "columns.callback_url",
    "columns.status",
    "columns.create_time",
    "columns.action",
];

/// Render the whole screen: table plus the form when the modal is open
pub fn render_page(page: &BotConfigPage) -> String {
    let mut out = render_table(page);
    if let Some(form) = render_form(page) {
        out.push('\n');
        out.push_str(&form);
    }
    out
}

/// Render the list view
pub fn render_table(page: &BotConfigPage) -> String {
    let context = page.context();
    let mut out = String::new();

    let _ = writeln!(out, "{}    [+ {}]", page.t("page.title"), page.t("page.add"));
    if !context.keyword.is_empty() {
        let _ = writeln!(out, "{}", page.i18n().t1("page.keyword", page.lang(), "keyword", &context.keyword));
    }

    let mut header = vec!["ID".to_string()];
    header.extend(COLUMNS.iter().map(|key| page.t(key)));

    let rows: Vec<Vec<String>> = context.records.iter().map(|record| table_row(page, record)).collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| display_width(&row[col]))
                .chain(std::iter::once(display_width(&header[col])))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let _ = writeln!(out, "{}", join_row(&header, &widths));
    let _ = writeln!(out, "{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));

    if rows.is_empty() {
        let _ = writeln!(out, "{}", page.t("page.empty"));
    }
    for row in &rows {
        let _ = writeln!(out, "{}", join_row(row, &widths));
    }

    let mut footer = page.i18n().t1("page.total", page.lang(), "total", context.total);
    if context.total_pages() > 1 {
        let mut params = crate::i18n::TranslationParams::new();
        params.insert("current".to_string(), context.current.to_string());
        params.insert("pages".to_string(), context.total_pages().to_string());
        params.insert("size".to_string(), context.page_size.to_string());
        footer.push_str("  ");
        footer.push_str(&page.i18n().t("page.pager", page.lang(), Some(&params)));
    }
    let _ = writeln!(out, "{}", footer);

    if context.is_loading() {
        let _ = writeln!(out, "{}", page.t("page.loading"));
    }

    out
}

fn table_row(page: &BotConfigPage, record: &BotConfig) -> Vec<String> {
    let id = record.id.map(|id| id.to_string()).unwrap_or_default();
    let callback = record
        .callback_url
        .as_deref()
        .map(|url| truncate_text(&strip_control(url), CALLBACK_URL_WIDTH))
        .unwrap_or_default();
    let actions = format!("{} | {}", page.t("actions.edit"), page.t("actions.delete"));

    vec![
        id,
        strip_control(&record.bot_key),
        strip_control(&record.corp_id),
        strip_control(&record.agent_id),
        strip_control(&record.agent_id_ref),
        callback,
        status_indicator(page, record.is_active),
        timestamp_text(record.create_time.as_ref()),
        actions,
    ]
}

/// Read-only switch shown in the status column
fn status_indicator(page: &BotConfigPage, active: Option<bool>) -> String {
    if active.unwrap_or(false) {
        format!("● {}", page.t("form.is_active.on"))
    } else {
        format!("○ {}", page.t("form.is_active.off"))
    }
}

/// Unparseable timestamps are shown raw, so they are cleaned as well
fn timestamp_text(timestamp: Option<&Timestamp>) -> String {
    timestamp.map(|t| strip_control(&t.to_string())).unwrap_or_default()
}

fn join_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_right(cell, *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Render the create/edit form, if the modal is open
pub fn render_form(page: &BotConfigPage) -> Option<String> {
    let modal = page.modal();
    let title = match modal.state() {
        ModalState::Closed => return None,
        ModalState::OpenForCreate { .. } => page.t("modal.create_title"),
        ModalState::OpenForEdit { id, .. } => format!("{} #{}", page.t("modal.edit_title"), id),
    };

    let form = modal.form();
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", title);

    for field in FormField::ALL {
        let label = page.t(&format!("{}.label", field.translation_key()));
        match form.text(field) {
            Some(value) => {
                let shown = if value.is_empty() {
                    format!("({})", page.t(&format!("{}.placeholder", field.translation_key())))
                } else if field.is_secret() {
                    mask_secret(value)
                } else {
                    strip_control(value)
                };
                let _ = writeln!(out, "  * {} [{}]: {}", label, field.wire_name(), shown);
            }
            None => {
                let _ = writeln!(
                    out,
                    "    {} [{}]: {}",
                    label,
                    field.wire_name(),
                    status_indicator(page, form.is_active)
                );
            }
        }

        for error in modal.field_errors().iter().filter(|e| e.field == field.wire_name()) {
            let _ = writeln!(out, "      ! {}", page.t(error.message_key));
        }
    }

    let _ = writeln!(out, "  [{}: submit]  [{}: cancel]", page.t("modal.ok"), page.t("modal.cancel"));
    Some(out)
}

/// Render every field of a single record
pub fn render_details(page: &BotConfigPage, record: &BotConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", page.t("modal.details_title"));

    let rows = [
        ("ID".to_string(), record.id.map(|id| id.to_string()).unwrap_or_default()),
        (page.t("columns.bot_key"), strip_control(&record.bot_key)),
        (page.t("columns.corp_id"), strip_control(&record.corp_id)),
        (page.t("columns.agent_id"), strip_control(&record.agent_id)),
        (page.t("form.token.label"), mask_secret(&record.token)),
        (page.t("form.encoding_aes_key.label"), mask_secret(&record.encoding_aes_key)),
        (page.t("columns.agent_id_ref"), strip_control(&record.agent_id_ref)),
        (page.t("columns.callback_url"), strip_control(record.callback_url.as_deref().unwrap_or_default())),
        (page.t("columns.status"), status_indicator(page, record.is_active)),
        (page.t("columns.create_time"), timestamp_text(record.create_time.as_ref())),
        (page.t("columns.update_time"), timestamp_text(record.update_time.as_ref())),
    ];

    let width = rows.iter().map(|(label, _)| display_width(label)).max().unwrap_or(0);
    for (label, value) in rows {
        let _ = writeln!(out, "  {}  {}", pad_right(&label, width), value);
    }
    out
}

/// Render notifications, oldest first
pub fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| {
            let icon = match n.level {
                NotificationLevel::Success => "✔",
                NotificationLevel::Info => "ℹ",
                NotificationLevel::Error => "✖",
            };
            format!("{} {}\n", icon, n.text)
        })
        .collect()
}
