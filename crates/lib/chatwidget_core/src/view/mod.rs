//! Element handles the handler drives.
//!
//! A host implements these for its own widgets (DOM elements, a terminal line
//! buffer) and injects them into [`ChatInputHandler`](crate::ChatInputHandler).
//! All methods take `&self`: overlapping submissions share the same handles.

pub mod memory;

use thiserror::Error;

use crate::entry::ChatEntry;

/// A host element rejected a mutation.
#[derive(Debug, Error)]
#[error("View error: {0}")]
pub struct ViewError(pub String);

/// The text input of the chat form.
pub trait InputField {
    /// Current value, untrimmed.
    fn value(&self) -> String;

    fn clear(&self) -> Result<(), ViewError>;
}

/// The append-only log container.
pub trait ChatLog {
    /// Append `entries` in order, all or nothing: on error the log is unchanged.
    fn append(&self, entries: &[ChatEntry]) -> Result<(), ViewError>;

    /// Scroll so the newest entry is visible.
    fn scroll_to_bottom(&self) -> Result<(), ViewError>;
}

/// User-facing alerts (validation errors).
pub trait Alerter {
    fn alert(&self, message: &str);
}
