use std::{error, fmt, io};

use twilight_http::request::channel::message::create_message::CreateMessageError;
use twilight_model::id::{ChannelId, GuildId};

#[derive(Debug)]
pub enum Error {
    // configuration, raised while building a client
    MissingToken,
    NoConfig(io::Error),
    InvalidConfig(toml::de::Error),
    InvalidTemplate(String),
    LoggingSetup(String),

    // dispatch, raised on every logging call that can't be delivered
    GuildNotFound(Option<GuildId>),
    ChannelNotFound {
        guild_id: GuildId,
        guild_name: String,
        channel_id: Option<ChannelId>,
    },

    TwilightHttp(twilight_http::Error),
    CreateMessageError(CreateMessageError),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::NoConfig(e) => Some(e),
            Error::InvalidConfig(e) => Some(e),
            Error::TwilightHttp(e) => Some(e),
            Error::CreateMessageError(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingToken => write!(f, "The bot token is missing or blank, unable to build the logger!"),
            Error::NoConfig(e) => write!(f, "The config file couldn't be read: {}", e),
            Error::InvalidConfig(e) => write!(f, "The config file was not in the correct format: {}", e),
            Error::InvalidTemplate(template) => write!(
                f,
                "The message template ``{}`` needs at least a {{timestamp}} and a {{message}} placeholder",
                template
            ),
            Error::LoggingSetup(e) => write!(f, "Failed to set up the local logger: {}", e),
            Error::GuildNotFound(Some(guild_id)) => write!(f, "Bot is not a member in guild with id '{}'", guild_id),
            Error::GuildNotFound(None) => write!(f, "No guild id was configured, unable to find a guild to log to"),
            Error::ChannelNotFound {
                guild_id,
                guild_name,
                channel_id: Some(channel_id),
            } => write!(
                f,
                "No text channel found with id {} in guild {} ({})",
                channel_id, guild_name, guild_id
            ),
            Error::ChannelNotFound {
                guild_id,
                guild_name,
                channel_id: None,
            } => write!(
                f,
                "No text channel id specified and no system channel set in guild {} ({})",
                guild_name, guild_id
            ),
            Error::TwilightHttp(e) => write!(f, "An error occurred making a Discord request: {}", e),
            Error::CreateMessageError(e) => write!(f, "Error creating message: {}", e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::NoConfig(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::InvalidConfig(e)
    }
}

impl From<twilight_http::Error> for Error {
    fn from(e: twilight_http::Error) -> Self {
        Error::TwilightHttp(e)
    }
}

impl From<CreateMessageError> for Error {
    fn from(e: CreateMessageError) -> Self {
        Error::CreateMessageError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_not_found_names_the_guild() {
        let e = Error::ChannelNotFound {
            guild_id: GuildId(10),
            guild_name: String::from("Logs"),
            channel_id: Some(ChannelId(20)),
        };

        assert_eq!(e.to_string(), "No text channel found with id 20 in guild Logs (10)");
    }

    #[test]
    fn template_error_keeps_braces() {
        let e = Error::InvalidTemplate(String::from("{message}"));

        assert!(e.to_string().contains("{timestamp}"));
    }
}
