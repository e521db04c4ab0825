use std::env;

use chatwidget_core::WidgetConfig;
use chatwidget_core::config::{ConfigError, Profile, parse_endpoint};
use clap::{Args, Parser, Subcommand};

/// Terminal chat widget for a `/chat` endpoint.
#[derive(Parser, Debug)]
#[command(name = "chatwidget", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub widget: WidgetArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print name and version.
    Version,
    /// Submit one message and print the exchange.
    Send {
        /// Message text, sent as typed.
        message: String,
    },
    /// Submit every stdin line; an empty line resends text kept after a failure.
    Repl,
}

/// Overrides on top of `CHAT_*` environment configuration.
#[derive(Args, Debug, Default)]
pub struct WidgetArgs {
    /// Chat endpoint URL.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Handler preset: `defensive` or `minimal`.
    #[arg(long, global = true)]
    pub profile: Option<Profile>,

    /// Send empty or whitespace-only messages.
    #[arg(long, global = true)]
    pub no_validate: bool,

    /// Decode replies whatever their HTTP status.
    #[arg(long, global = true)]
    pub no_status_check: bool,

    /// Bot text used when a reply has no `response`.
    #[arg(long, global = true)]
    pub fallback_text: Option<String>,
}

impl WidgetArgs {
    pub fn resolve(&self) -> Result<WidgetConfig, ConfigError> {
        self.resolve_with(|key| env::var(key).ok())
    }

    /// Lowest layer first: the profile preset (`--profile`, else `CHAT_PROFILE`),
    /// individual `CHAT_*` variables, then the remaining flags.
    fn resolve_with<F>(&self, lookup: F) -> Result<WidgetConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = WidgetConfig::from_lookup(|key: &str| match (key, self.profile) {
            ("CHAT_PROFILE", Some(profile)) => Some(profile.as_str().to_string()),
            _ => lookup(key),
        })?;
        self.apply(&mut config)?;
        Ok(config)
    }

    fn apply(&self, config: &mut WidgetConfig) -> Result<(), ConfigError> {
        if self.no_validate {
            config.handler.validate_non_empty = false;
        }
        if self.no_status_check {
            config.handler.check_status = false;
        }
        if let Some(text) = &self.fallback_text {
            config.handler.fallback_text = text.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = parse_endpoint(endpoint)?;
        }
        Ok(())
    }
}
