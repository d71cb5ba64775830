//! Clipboard access
//!
//! The terminal console has no window system clipboard of its own, so the
//! default implementation asks the terminal emulator to set it through the
//! OSC 52 escape sequence. Tests and headless runs use [`MemoryClipboard`].

use std::io::Write;
use std::sync::{Arc, Mutex};

use base64::Engine;
use tracing::debug;

use crate::utils::errors::{ConsoleError, Result};

/// Destination for "copy callback URL"
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Writes an OSC 52 sequence to the wrapped writer (normally stdout)
pub struct Osc52Clipboard<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }
}

/// Build the escape sequence that sets the system clipboard to `text`
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn copy(&self, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| ConsoleError::Clipboard("clipboard writer poisoned".to_string()))?;
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        debug!(bytes = text.len(), "Copied text to clipboard via OSC 52");
        Ok(())
    }
}

/// In-process clipboard that remembers the last copied text
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| ConsoleError::Clipboard("clipboard poisoned".to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}
