//! Widget configuration.
//!
//! [`HandlerConfig`] selects how defensive a submission is; [`WidgetConfig`]
//! adds the endpoint the exchange is sent to.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/chat";

/// Path of the chat endpoint relative to the page origin.
pub const CHAT_PATH: &str = "/chat";

/// Bot text rendered when the reply carries no `response`.
pub const DEFAULT_FALLBACK_TEXT: &str = "No response received.";

/// Alert shown when an empty message is submitted.
pub const EMPTY_INPUT_ALERT: &str = "Please enter a message.";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint URL '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid boolean for {key}: '{value}'")]
    InvalidBool { key: String, value: String },

    #[error("Unknown profile: {0} (expected 'defensive' or 'minimal')")]
    UnknownProfile(String),
}

/// Named handler presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Empty-input guard, status check and fallback text.
    #[default]
    Defensive,
    /// Sends whatever is typed and renders any decodable body.
    Minimal,
}

impl Profile {
    /// Name accepted by [`FromStr`] and `CHAT_PROFILE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Defensive => "defensive",
            Profile::Minimal => "minimal",
        }
    }

    pub fn handler_config(self) -> HandlerConfig {
        match self {
            Profile::Defensive => HandlerConfig::defensive(),
            Profile::Minimal => HandlerConfig::minimal(),
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "defensive" => Ok(Profile::Defensive),
            "minimal" => Ok(Profile::Minimal),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}

/// Options recognized by the chat input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Reject input that is empty after trimming.
    pub validate_non_empty: bool,
    /// Treat non-2xx responses as exchange failures.
    pub check_status: bool,
    /// Bot text used when the reply has no `response`.
    pub fallback_text: String,
}

impl HandlerConfig {
    pub fn defensive() -> Self {
        Self {
            validate_non_empty: true,
            check_status: true,
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
        }
    }

    pub fn minimal() -> Self {
        Self {
            validate_non_empty: false,
            check_status: false,
            fallback_text: String::new(),
        }
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::defensive()
    }
}

/// Handler options plus the endpoint the exchange goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub endpoint: Url,
    pub handler: HandlerConfig,
}

impl WidgetConfig {
    pub fn new(endpoint: &str, handler: HandlerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            handler,
        })
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable                  | Default                      |
    /// |---------------------------|------------------------------|
    /// | `CHAT_ENDPOINT`           | `http://127.0.0.1:5000/chat` |
    /// | `CHAT_PROFILE`            | `defensive`                  |
    /// | `CHAT_VALIDATE_NON_EMPTY` | from profile                 |
    /// | `CHAT_CHECK_STATUS`       | from profile                 |
    /// | `CHAT_FALLBACK_TEXT`      | from profile                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match lookup("CHAT_PROFILE") {
            Some(value) => value.parse()?,
            None => Profile::default(),
        };
        let mut handler = profile.handler_config();

        if let Some(value) = lookup("CHAT_VALIDATE_NON_EMPTY") {
            handler.validate_non_empty = parse_bool("CHAT_VALIDATE_NON_EMPTY", &value)?;
        }
        if let Some(value) = lookup("CHAT_CHECK_STATUS") {
            handler.check_status = parse_bool("CHAT_CHECK_STATUS", &value)?;
        }
        if let Some(value) = lookup("CHAT_FALLBACK_TEXT") {
            handler.fallback_text = value;
        }

        let endpoint = lookup("CHAT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Self::new(&endpoint, handler)
    }
}

/// Parse an absolute endpoint URL.
pub fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        value: value.to_string(),
        source,
    })
}

/// Resolve the chat path against a page origin (`https://host:port`).
pub fn endpoint_for_origin(origin: &str) -> Result<Url, ConfigError> {
    parse_endpoint(origin)?
        .join(CHAT_PATH)
        .map_err(|source| ConfigError::InvalidEndpoint {
            value: origin.to_string(),
            source,
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
