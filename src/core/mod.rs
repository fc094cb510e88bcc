pub use config::{LoggingConfig, Templates, DEFAULT_REFRESH_INTERVAL_SECS};
pub use discord_logging::{builder, DiscordLogging, DiscordLoggingBuilder, FULL_MESSAGE_FILE_NAME};
pub use log_request::LogRequest;
pub use severity::Severity;
pub use template::{MessageTemplate, CONTENT_LIMIT, DEFAULT_MESSAGE_TEMPLATE};

mod config;
mod discord_logging;
mod log_request;
pub mod placeholder;
pub mod resolver;
mod severity;
pub mod stacktrace;
mod template;
