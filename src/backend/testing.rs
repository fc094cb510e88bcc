//! An in-memory backend that records what gets sent instead of talking to Discord.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use twilight_model::id::{ChannelId, GuildId};

use super::{Channel, Guild, MessagingBackend, OutgoingMessage};

pub const GUILD: GuildId = GuildId(100);
pub const SYSTEM_CHANNEL: ChannelId = ChannelId(200);
pub const LOG_CHANNEL: ChannelId = ChannelId(300);

#[derive(Clone, Default)]
struct GuildState {
    name: String,
    system_channel: Option<ChannelId>,
    text_channels: Vec<ChannelId>,
}

#[derive(Default)]
pub struct RecordingBackend {
    guilds: Mutex<HashMap<GuildId, GuildState>>,
    sent: Arc<Mutex<Vec<(ChannelId, OutgoingMessage)>>>,
    guild_lookups: AtomicUsize,
    channel_lookups: Arc<AtomicUsize>,
}

impl RecordingBackend {
    /// A backend that knows [`GUILD`] with a system channel and one more text channel.
    pub fn with_default_guild() -> Self {
        let backend = RecordingBackend::default();
        backend.add_guild(GUILD, "Test Guild", Some(SYSTEM_CHANNEL), vec![SYSTEM_CHANNEL, LOG_CHANNEL]);
        backend
    }

    pub fn add_guild(
        &self,
        guild_id: GuildId,
        name: &str,
        system_channel: Option<ChannelId>,
        text_channels: Vec<ChannelId>,
    ) {
        self.guilds.lock().unwrap().insert(
            guild_id,
            GuildState {
                name: name.to_string(),
                system_channel,
                text_channels,
            },
        );
    }

    pub fn remove_guild(&self, guild_id: GuildId) {
        self.guilds.lock().unwrap().remove(&guild_id);
    }

    pub fn sent(&self) -> Vec<(ChannelId, OutgoingMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn guild_lookups(&self) -> usize {
        self.guild_lookups.load(Ordering::SeqCst)
    }

    pub fn channel_lookups(&self) -> usize {
        self.channel_lookups.load(Ordering::SeqCst)
    }
}

pub struct RecordingGuild {
    id: GuildId,
    state: GuildState,
    sent: Arc<Mutex<Vec<(ChannelId, OutgoingMessage)>>>,
    channel_lookups: Arc<AtomicUsize>,
}

pub struct RecordingChannel {
    id: ChannelId,
    sent: Arc<Mutex<Vec<(ChannelId, OutgoingMessage)>>>,
}

impl MessagingBackend for RecordingBackend {
    type Guild = RecordingGuild;

    fn find_guild(&self, guild_id: GuildId) -> Option<RecordingGuild> {
        self.guild_lookups.fetch_add(1, Ordering::SeqCst);
        let state = self.guilds.lock().unwrap().get(&guild_id).cloned()?;
        Some(RecordingGuild {
            id: guild_id,
            state,
            sent: Arc::clone(&self.sent),
            channel_lookups: Arc::clone(&self.channel_lookups),
        })
    }
}

impl RecordingGuild {
    fn channel(&self, id: ChannelId) -> RecordingChannel {
        RecordingChannel {
            id,
            sent: Arc::clone(&self.sent),
        }
    }
}

impl Guild for RecordingGuild {
    type Channel = RecordingChannel;

    fn id(&self) -> GuildId {
        self.id
    }

    fn name(&self) -> &str {
        &self.state.name
    }

    fn default_channel(&self) -> Option<RecordingChannel> {
        self.channel_lookups.fetch_add(1, Ordering::SeqCst);
        self.state.system_channel.map(|id| self.channel(id))
    }

    fn find_text_channel(&self, channel_id: ChannelId) -> Option<RecordingChannel> {
        self.channel_lookups.fetch_add(1, Ordering::SeqCst);
        if self.state.text_channels.contains(&channel_id) {
            Some(self.channel(channel_id))
        } else {
            None
        }
    }
}

impl Channel for RecordingChannel {
    fn id(&self) -> ChannelId {
        self.id
    }

    fn send(&self, message: OutgoingMessage) {
        self.sent.lock().unwrap().push((self.id, message));
    }
}
