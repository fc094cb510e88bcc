use std::{fmt, fs};

use serde::Deserialize;
use twilight_model::id::{ChannelId, GuildId};

use crate::core::{MessageTemplate, Severity};
use crate::Error;

/// Everything a [`DiscordLogging`](crate::DiscordLogging) needs, loadable from a toml file.
///
/// ```toml
/// bot_token = "..."
/// guild_id = "365498559174410241"
/// text_channel_id = "365498559723732993"
/// append_stacktrace_to_error = true
/// refresh_interval_secs = 300
///
/// [templates]
/// error = "{timestamp} {message}"
/// ```
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub bot_token: String,
    pub guild_id: Option<GuildId>,
    pub text_channel_id: Option<ChannelId>,
    pub append_stacktrace_to_error: bool,
    /// How often a connected logger re-reads the bot's guilds and channels, `0` turns it off.
    pub refresh_interval_secs: u64,
    pub templates: Templates,
}

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Custom patterns per severity, the built-in layout is used for any that is left out.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Templates {
    pub info: Option<String>,
    pub warn: Option<String>,
    pub error: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            bot_token: String::new(),
            guild_id: None,
            text_channel_id: None,
            append_stacktrace_to_error: true,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            templates: Templates::default(),
        }
    }
}

// keep the token out of debug output
impl fmt::Debug for LoggingConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LoggingConfig")
            .field("bot_token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .field("text_channel_id", &self.text_channel_id)
            .field("append_stacktrace_to_error", &self.append_stacktrace_to_error)
            .field("refresh_interval_secs", &self.refresh_interval_secs)
            .field("templates", &self.templates)
            .finish()
    }
}

impl LoggingConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        LoggingConfig {
            bot_token: bot_token.into(),
            ..LoggingConfig::default()
        }
    }

    pub fn from_file(filename: &str) -> Result<Self, Error> {
        let config_file = fs::read_to_string(filename)?;
        Self::from_toml(&config_file)
    }

    pub fn from_toml(config: &str) -> Result<Self, Error> {
        Ok(toml::from_str(config)?)
    }

    /// Checks the token and turns the configured patterns into templates, nothing here touches the network.
    pub(crate) fn validate(&self) -> Result<ResolvedTemplates, Error> {
        if self.bot_token.trim().is_empty() {
            return Err(Error::MissingToken);
        }

        Ok(ResolvedTemplates {
            info: template_or_default(&self.templates.info)?,
            warn: template_or_default(&self.templates.warn)?,
            error: template_or_default(&self.templates.error)?,
        })
    }
}

fn template_or_default(pattern: &Option<String>) -> Result<MessageTemplate, Error> {
    match pattern {
        Some(pattern) => MessageTemplate::custom(pattern.as_str()),
        None => Ok(MessageTemplate::default()),
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedTemplates {
    pub info: MessageTemplate,
    pub warn: MessageTemplate,
    pub error: MessageTemplate,
}

impl ResolvedTemplates {
    pub fn get(&self, severity: Severity) -> &MessageTemplate {
        match severity {
            Severity::Info => &self.info,
            Severity::Warn => &self.warn,
            Severity::Error => &self.error,
        }
    }
}
