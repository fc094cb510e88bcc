use twilight_model::id::{ChannelId, GuildId};

use crate::backend::{Guild, MessagingBackend};
use crate::Error;

/// Finds the channel a log message should go to.
///
/// The guild is always looked up first. An explicit channel id has to exist in that guild, without
/// one the guild's system channel is used. Nothing is cached between calls, guilds and channels
/// can come and go while the bot runs.
pub fn resolve<B: MessagingBackend>(
    backend: &B,
    guild_id: Option<GuildId>,
    channel_id: Option<ChannelId>,
) -> Result<<B::Guild as Guild>::Channel, Error> {
    let guild = guild_id
        .and_then(|id| backend.find_guild(id))
        .ok_or(Error::GuildNotFound(guild_id))?;

    let channel = match channel_id {
        Some(channel_id) => guild.find_text_channel(channel_id),
        None => guild.default_channel(),
    };

    channel.ok_or_else(|| Error::ChannelNotFound {
        guild_id: guild.id(),
        guild_name: guild.name().to_string(),
        channel_id,
    })
}
