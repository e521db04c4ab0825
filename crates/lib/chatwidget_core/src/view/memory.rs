//! Headless handles backed by shared memory.
//!
//! Clones share state, so a caller can keep one clone for inspection and hand
//! the other to the handler.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Alerter, ChatLog, InputField, ViewError};
use crate::entry::ChatEntry;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Default)]
pub struct MemoryInput {
    value: Arc<Mutex<String>>,
}

impl MemoryInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(value.into())),
        }
    }

    /// Simulates the user typing.
    pub fn set(&self, value: impl Into<String>) {
        *lock(&self.value) = value.into();
    }
}

impl InputField for MemoryInput {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }

    fn clear(&self) -> Result<(), ViewError> {
        lock(&self.value).clear();
        Ok(())
    }
}

#[derive(Debug, Default)]
struct LogState {
    entries: Vec<ChatEntry>,
    scroll_top: usize,
}

/// Log with one row per entry and a fixed-height viewport.
#[derive(Debug, Clone)]
pub struct MemoryLog {
    state: Arc<Mutex<LogState>>,
    viewport_rows: usize,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::with_viewport(1)
    }

    pub fn with_viewport(viewport_rows: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(LogState::default())),
            viewport_rows,
        }
    }

    pub fn entries(&self) -> Vec<ChatEntry> {
        lock(&self.state).entries.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn scroll_top(&self) -> usize {
        lock(&self.state).scroll_top
    }

    /// Largest reachable scroll offset for the current content.
    pub fn max_scroll(&self) -> usize {
        lock(&self.state)
            .entries
            .len()
            .saturating_sub(self.viewport_rows)
    }
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatLog for MemoryLog {
    fn append(&self, entries: &[ChatEntry]) -> Result<(), ViewError> {
        lock(&self.state).entries.extend_from_slice(entries);
        Ok(())
    }

    fn scroll_to_bottom(&self) -> Result<(), ViewError> {
        let max = self.max_scroll();
        lock(&self.state).scroll_top = max;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryAlerter {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl MemoryAlerter {
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

impl Alerter for MemoryAlerter {
    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }
}
