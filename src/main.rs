//! WeChat-Work bot config console
//!
//! Main application entry point

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use wechat_bot_console::{
    config::Settings,
    handlers::{render, ConsoleSession, Flow},
    i18n::I18n,
    services::ServiceFactory,
    state::{BotConfigPage, PageEvent},
    utils::logging,
};

/// Whatever woke the main loop up
enum Input {
    Line(Option<String>),
    Event(PageEvent),
    Interrupt,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", wechat_bot_console::info());

    // Initialize i18n system
    info!("Loading translations...");
    let mut i18n = I18n::with_bundled(&settings.i18n)?;
    i18n.load_translations_from(Path::new(&settings.i18n.translations_dir))
        .await?;
    let lang = i18n.detect_language(std::env::var("LANG").ok().as_deref());
    info!(language = %lang, "Console language selected");

    // Initialize services
    let services = ServiceFactory::new(&settings)?;
    info!(base_url = %settings.api.base_url, "Bot config service client ready");

    let page = BotConfigPage::new(services, Arc::new(i18n), &lang, &settings.console);
    let mut session = ConsoleSession::new(page);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    session.page_mut().refresh();
    let first = render::render_page(session.page());
    write_screen(&mut stdout, &first, &session.prompt()).await?;

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line?),
            Some(event) = session.page_mut().next_event() => Input::Event(event),
            _ = tokio::signal::ctrl_c() => Input::Interrupt,
        };

        let output = match input {
            Input::Line(None) | Input::Interrupt => break,
            Input::Line(Some(line)) => match session.handle_line(&line).await {
                Flow::Continue(output) => output,
                Flow::Quit => break,
            },
            Input::Event(event) => session.handle_event(event),
        };

        write_screen(&mut stdout, &output, &session.prompt()).await?;
    }

    if session.page().has_pending() {
        warn!("Exiting with requests still in flight");
    }
    info!("Console has been shut down.");

    Ok(())
}

async fn write_screen(stdout: &mut tokio::io::Stdout, body: &str, prompt: &str) -> std::io::Result<()> {
    if !body.is_empty() {
        stdout.write_all(body.as_bytes()).await?;
        if !body.ends_with('\n') {
            stdout.write_all(b"\n").await?;
        }
    }
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await
}
