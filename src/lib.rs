//! Forwards info, warning and error messages from an application into a Discord guild.
//!
//! ```no_run
//! # async fn run() -> Result<(), dclogging::Error> {
//! use dclogging::{discord_error, discord_info, LoggingConfig};
//!
//! let logger = dclogging::DiscordLogging::connect(LoggingConfig::from_file("dclogging.toml")?).await?;
//!
//! discord_info!(logger, "Worker {} started", 3)?;
//!
//! if let Err(e) = std::fs::read("report.csv") {
//!     discord_error!(logger, cause: &e, "Unable to read the report")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod core;
mod error;
pub mod logging;

pub use crate::core::{
    builder, DiscordLogging, DiscordLoggingBuilder, LogRequest, LoggingConfig, MessageTemplate, Severity,
};
pub use backend::{Attachment, MessagingBackend, OutgoingMessage, TwilightBackend};
pub use error::Error;
pub use twilight_model::id::{ChannelId, GuildId};
