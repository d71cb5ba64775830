//! List view commands: refresh, pagination, search, details and copy

use tracing::debug;

use crate::handlers::render;
use crate::handlers::Reply;
use crate::state::BotConfigPage;
use crate::utils::errors::Result;

pub fn handle_refresh(page: &mut BotConfigPage) -> Result<Reply> {
    page.refresh();
    Ok(Reply::Page)
}

pub fn handle_page(page: &mut BotConfigPage, number: u64) -> Result<Reply> {
    page.go_to_page(number)?;
    Ok(Reply::Page)
}

pub fn handle_size(page: &mut BotConfigPage, size: u64) -> Result<Reply> {
    page.set_page_size(size)?;
    Ok(Reply::Page)
}

pub fn handle_search(page: &mut BotConfigPage, keyword: &str) -> Result<Reply> {
    page.search(keyword);
    Ok(Reply::Page)
}

/// Fetch a record by id and show every field
pub async fn handle_show(page: &mut BotConfigPage, id: i64) -> Result<Reply> {
    let record = page.show(id).await?;
    debug!(id = id, "Showing bot config details");
    Ok(Reply::Text(render::render_details(page, &record)))
}

pub fn handle_copy(page: &mut BotConfigPage, id: i64) -> Result<Reply> {
    page.copy_callback_url(id)?;
    Ok(Reply::Text(String::new()))
}
