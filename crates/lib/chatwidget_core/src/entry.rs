//! Chat log entries.

use std::fmt;

/// Who an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// CSS class of the rendered element.
    pub fn css_class(self) -> &'static str {
        match self {
            Role::User => "user-message",
            Role::Bot => "bot-message",
        }
    }

    /// Short label for text transcripts.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Bot => "bot",
        }
    }
}

/// One rendered line of the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: Role,
    pub text: String,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
        }
    }
}

impl fmt::Display for ChatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}> {}", self.role.label(), self.text)
    }
}

/// The pair rendered by one successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageExchange {
    pub user_text: String,
    pub bot_text: String,
}

impl MessageExchange {
    /// Entries in render order: user first, then bot.
    pub fn entries(&self) -> [ChatEntry; 2] {
        [
            ChatEntry::user(self.user_text.clone()),
            ChatEntry::bot(self.bot_text.clone()),
        ]
    }
}
