use std::error::Error as StdError;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use twilight_model::id::{ChannelId, GuildId};

use crate::backend::{Attachment, Channel, MessagingBackend, OutgoingMessage, TwilightBackend};
use crate::core::config::ResolvedTemplates;
use crate::core::{
    placeholder, resolver, stacktrace, LogRequest, LoggingConfig, MessageTemplate, Severity, CONTENT_LIMIT,
};
use crate::Error;

/// Holds the complete message body when it was too long to fit in the message itself.
pub const FULL_MESSAGE_FILE_NAME: &str = "message.txt";

/// Sends info, warning and error messages into a Discord guild.
///
/// The configuration is fixed once built. Every call resolves its channel again, renders the message
/// and hands exactly one message to the backend without waiting for it to arrive.
pub struct DiscordLogging<B> {
    backend: Arc<B>,
    config: LoggingConfig,
    templates: ResolvedTemplates,
}

impl DiscordLogging<TwilightBackend> {
    /// Builds a logger on top of a fresh Discord HTTP session.
    ///
    /// The configuration is validated before any request goes out. The guild snapshot is then
    /// refreshed every `refresh_interval_secs` for as long as the backend lives.
    pub async fn connect(config: LoggingConfig) -> Result<Self, Error> {
        config.validate()?;

        let backend = TwilightBackend::new(&config.bot_token)?;
        backend.refresh().await?;

        let backend = Arc::new(backend);
        if backend
            .refresh_periodically(Duration::from_secs(config.refresh_interval_secs))
            .is_none()
        {
            debug!("Guild snapshot will not be refreshed after connecting");
        }

        DiscordLogging::new(config, backend)
    }
}

impl<B: MessagingBackend> DiscordLogging<B> {
    /// Builds a logger over an existing backend session, several loggers can share the same one.
    pub fn new(config: LoggingConfig, backend: Arc<B>) -> Result<Self, Error> {
        let templates = config.validate()?;

        Ok(DiscordLogging {
            backend,
            config,
            templates,
        })
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    pub fn info(&self, message: &str, args: &[&dyn Display]) -> Result<(), Error> {
        self.send(LogRequest::new(Severity::Info, message).arguments(args))
    }

    pub fn info_in(&self, channel_id: ChannelId, message: &str, args: &[&dyn Display]) -> Result<(), Error> {
        self.send(LogRequest::new(Severity::Info, message).arguments(args).channel(channel_id))
    }

    pub fn warn(&self, message: &str, args: &[&dyn Display]) -> Result<(), Error> {
        self.send(LogRequest::new(Severity::Warn, message).arguments(args))
    }

    pub fn warn_in(&self, channel_id: ChannelId, message: &str, args: &[&dyn Display]) -> Result<(), Error> {
        self.send(LogRequest::new(Severity::Warn, message).arguments(args).channel(channel_id))
    }

    pub fn error(&self, message: &str, args: &[&dyn Display]) -> Result<(), Error> {
        self.send(LogRequest::new(Severity::Error, message).arguments(args))
    }

    pub fn error_in(&self, channel_id: ChannelId, message: &str, args: &[&dyn Display]) -> Result<(), Error> {
        self.send(LogRequest::new(Severity::Error, message).arguments(args).channel(channel_id))
    }

    /// Logs an error and, when enabled, attaches the cause as `stacktrace.txt`.
    pub fn error_with(&self, message: &str, cause: &dyn StdError, args: &[&dyn Display]) -> Result<(), Error> {
        self.send(
            LogRequest::new(Severity::Error, message)
                .arguments(args)
                .cause(Some(cause)),
        )
    }

    pub fn error_with_in(
        &self,
        channel_id: ChannelId,
        message: &str,
        cause: &dyn StdError,
        args: &[&dyn Display],
    ) -> Result<(), Error> {
        self.send(
            LogRequest::new(Severity::Error, message)
                .arguments(args)
                .cause(Some(cause))
                .channel(channel_id),
        )
    }

    /// Logs at the given severity. A cause only matters for errors and is dropped otherwise.
    pub fn log(
        &self,
        message: &str,
        severity: Severity,
        cause: Option<&dyn StdError>,
        channel_id: Option<ChannelId>,
    ) -> Result<(), Error> {
        match severity {
            Severity::Info => self.send(LogRequest::new(Severity::Info, message).channel(channel_id)),
            Severity::Warn => self.send(LogRequest::new(Severity::Warn, message).channel(channel_id)),
            Severity::Error => self.send(
                LogRequest::new(Severity::Error, message)
                    .cause(cause)
                    .channel(channel_id),
            ),
        }
    }

    pub fn send(&self, request: LogRequest<'_>) -> Result<(), Error> {
        let body = placeholder::substitute(request.message, request.arguments);
        let (content, truncated) = self.template(request.severity).render_within(
            request.severity,
            &body,
            Utc::now().timestamp(),
            CONTENT_LIMIT,
        );

        let channel_id = request.channel_id.or(self.config.text_channel_id);
        let channel = match resolver::resolve(self.backend.as_ref(), self.config.guild_id, channel_id) {
            Ok(channel) => channel,
            Err(e) => {
                warn!("Dropping {} log message: {}", request.severity, e);
                return Err(e);
            }
        };

        let mut message = OutgoingMessage::new(content);
        if let (Severity::Error, Some(cause), true) = (
            request.severity,
            request.cause,
            self.config.append_stacktrace_to_error,
        ) {
            message = message.attach(Attachment::new(
                stacktrace::STACKTRACE_FILE_NAME,
                stacktrace::capture(cause),
            ));
        }

        if truncated {
            message = message.attach(Attachment::new(FULL_MESSAGE_FILE_NAME, body.into_bytes()));
        }

        debug!(
            "Sending {} log message to channel {} in guild {} ({} attachments)",
            request.severity,
            channel.id(),
            self.guild_id().map(|id| id.to_string()).unwrap_or_default(),
            message.attachments.len()
        );
        channel.send(message);

        Ok(())
    }

    pub fn template(&self, severity: Severity) -> &MessageTemplate {
        self.templates.get(severity)
    }

    pub fn guild_id(&self) -> Option<GuildId> {
        self.config.guild_id
    }
}

pub fn builder() -> DiscordLoggingBuilder {
    DiscordLoggingBuilder::new()
}

/// Collects the settings for a [`DiscordLogging`], anything left out keeps its default.
#[derive(Debug, Clone, Default)]
pub struct DiscordLoggingBuilder {
    config: LoggingConfig,
}

impl DiscordLoggingBuilder {
    pub fn new() -> Self {
        DiscordLoggingBuilder::default()
    }

    pub fn from_config(config: LoggingConfig) -> Self {
        DiscordLoggingBuilder { config }
    }

    pub fn bot_token(mut self, bot_token: impl Into<String>) -> Self {
        self.config.bot_token = bot_token.into();
        self
    }

    pub fn guild_id(mut self, guild_id: GuildId) -> Self {
        self.config.guild_id = Some(guild_id);
        self
    }

    pub fn text_channel_id(mut self, channel_id: ChannelId) -> Self {
        self.config.text_channel_id = Some(channel_id);
        self
    }

    pub fn append_stacktrace_to_error(mut self, append: bool) -> Self {
        self.config.append_stacktrace_to_error = append;
        self
    }

    pub fn refresh_interval_secs(mut self, secs: u64) -> Self {
        self.config.refresh_interval_secs = secs;
        self
    }

    pub fn info_template(mut self, template: MessageTemplate) -> Self {
        self.config.templates.info = custom_pattern(&template);
        self
    }

    pub fn warn_template(mut self, template: MessageTemplate) -> Self {
        self.config.templates.warn = custom_pattern(&template);
        self
    }

    pub fn error_template(mut self, template: MessageTemplate) -> Self {
        self.config.templates.error = custom_pattern(&template);
        self
    }

    pub fn build<B: MessagingBackend>(self, backend: Arc<B>) -> Result<DiscordLogging<B>, Error> {
        DiscordLogging::new(self.config, backend)
    }

    pub async fn connect(self) -> Result<DiscordLogging<TwilightBackend>, Error> {
        DiscordLogging::connect(self.config).await
    }
}

fn custom_pattern(template: &MessageTemplate) -> Option<String> {
    if template.is_default() {
        None
    } else {
        Some(template.pattern().to_string())
    }
}
