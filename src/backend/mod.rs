//! The seam between the logger and whatever actually talks to Discord.
//!
//! Lookups are synchronous and answered from whatever the backend already knows, sending only
//! enqueues: the logger never waits for a delivery confirmation.

use twilight_model::id::{ChannelId, GuildId};

pub use self::twilight::TwilightBackend;

#[cfg(test)]
pub(crate) mod testing;
pub mod twilight;

/// A named file attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Attachment {
            name: name.into(),
            data,
        }
    }
}

/// Everything a single log call puts into a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub content: String,
    pub attachments: Vec<Attachment>,
}

impl OutgoingMessage {
    pub fn new(content: impl Into<String>) -> Self {
        OutgoingMessage {
            content: content.into(),
            attachments: vec![],
        }
    }

    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

pub trait MessagingBackend: Send + Sync {
    type Guild: Guild;

    fn find_guild(&self, guild_id: GuildId) -> Option<Self::Guild>;
}

pub trait Guild {
    type Channel: Channel;

    fn id(&self) -> GuildId;

    fn name(&self) -> &str;

    /// The system channel of the guild, if it has one.
    fn default_channel(&self) -> Option<Self::Channel>;

    fn find_text_channel(&self, channel_id: ChannelId) -> Option<Self::Channel>;
}

pub trait Channel {
    fn id(&self) -> ChannelId;

    /// Queues the message for delivery and returns right away.
    fn send(&self, message: OutgoingMessage);
}
