//! Terminal handles: the transcript on stdout is the chat log, alerts go to
//! stderr. The input field is a [`MemoryInput`](chatwidget_core::view::memory::MemoryInput)
//! line buffer.

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use chatwidget_core::ChatEntry;
use chatwidget_core::view::{Alerter, ChatLog, ViewError};

/// Writes one `role> text` line per entry.
pub struct TranscriptLog<W> {
    out: Mutex<W>,
}

impl TranscriptLog<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TranscriptLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> ChatLog for TranscriptLog<W> {
    /// The batch goes out in one write, so a failure leaves no partial exchange.
    fn append(&self, entries: &[ChatEntry]) -> Result<(), ViewError> {
        let lines: String = entries.iter().map(|entry| format!("{entry}\n")).collect();
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(lines.as_bytes())
            .map_err(|e| ViewError(e.to_string()))
    }

    /// The newest line is already the last one; flushing makes it visible.
    fn scroll_to_bottom(&self) -> Result<(), ViewError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.flush().map_err(|e| ViewError(e.to_string()))
    }
}

pub struct StderrAlerter;

impl Alerter for StderrAlerter {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}
