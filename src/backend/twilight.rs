//! A [`MessagingBackend`] that talks to Discord over its HTTP API.
//!
//! Guild and channel lookups are answered from a local snapshot, [`TwilightBackend::refresh`] fills it
//! and [`TwilightBackend::refresh_periodically`] keeps it current.
//! Sends are spawned onto the tokio runtime and never awaited by the caller.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time;
use twilight_http::Client as HttpClient;
use twilight_model::channel::GuildChannel;
use twilight_model::id::{ChannelId, GuildId};

use super::{Channel, Guild, MessagingBackend, OutgoingMessage};
use crate::Error;

// discord's default (and maximum) page size for the current user's guilds
const GUILD_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone)]
pub struct CachedGuild {
    pub id: GuildId,
    pub name: String,
    pub system_channel_id: Option<ChannelId>,
    pub text_channels: HashMap<ChannelId, String>,
}

pub struct TwilightBackend {
    sender: MessageSender,
    guilds: RwLock<HashMap<GuildId, Arc<CachedGuild>>>,
}

/// What a guild or channel handle needs to push messages out on its own.
#[derive(Clone)]
struct MessageSender {
    http: HttpClient,
    runtime: Option<Handle>,
}

impl MessageSender {
    fn runtime(&self) -> Option<Handle> {
        self.runtime.clone().or_else(|| Handle::try_current().ok())
    }
}

impl TwilightBackend {
    /// Creates the HTTP client, nothing is sent to Discord until [`refresh`](Self::refresh) or a send.
    pub fn new(token: &str) -> Result<Self, Error> {
        if token.trim().is_empty() {
            return Err(Error::MissingToken);
        }

        Ok(TwilightBackend {
            sender: MessageSender {
                http: HttpClient::new(token),
                runtime: Handle::try_current().ok(),
            },
            guilds: RwLock::new(HashMap::new()),
        })
    }

    /// Spawns sends onto this runtime instead of the one that happens to be current.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.sender.runtime = Some(runtime);
        self
    }

    pub fn http(&self) -> &HttpClient {
        &self.sender.http
    }

    /// Validates the token and replaces the snapshot with every guild the bot is in.
    pub async fn refresh(&self) -> Result<(), Error> {
        let user = self.sender.http.current_user().await?;
        info!(
            "Token validated, logging to discord as {}#{}",
            user.name, user.discriminator
        );

        let mut guilds = HashMap::new();
        let mut after = None;
        loop {
            let mut request = self.sender.http.current_user_guilds();
            if let Some(after) = after {
                request = request.after(after);
            }

            let page = request.await?;
            let page_size = page.len();
            after = page.last().map(|partial| partial.id);

            for partial in page {
                if let Some(guild) = self.fetch_guild(partial.id).await? {
                    guilds.insert(guild.id, Arc::new(guild));
                }
            }

            if page_size < GUILD_PAGE_SIZE {
                break;
            }
        }

        debug!("Guild snapshot refreshed, {} guilds known", guilds.len());
        *self.guilds.write().unwrap_or_else(PoisonError::into_inner) = guilds;

        Ok(())
    }

    /// Refreshes the snapshot every `period` in the background, until the backend is dropped.
    ///
    /// A failed refresh keeps the previous snapshot and is retried on the next tick.
    /// Returns `None` without a tokio runtime to run on, or for a zero period.
    pub fn refresh_periodically(self: &Arc<Self>, period: Duration) -> Option<JoinHandle<()>> {
        if period == Duration::from_secs(0) {
            return None;
        }

        let runtime = match self.sender.runtime() {
            Some(runtime) => runtime,
            None => {
                warn!("No tokio runtime to refresh the guild snapshot on, it will not be updated");
                return None;
            }
        };

        let backend = Arc::downgrade(self);
        Some(runtime.spawn(async move {
            let mut interval = time::interval(period);
            // the first tick completes right away
            interval.tick().await;

            loop {
                interval.tick().await;
                let backend = match backend.upgrade() {
                    Some(backend) => backend,
                    None => break,
                };

                if let Err(e) = backend.refresh().await {
                    warn!("Failed to refresh the guild snapshot, keeping the previous one: {}", e);
                }
            }

            debug!("Backend dropped, stopping guild snapshot refreshes");
        }))
    }

    /// Re-fetches a single guild, returns if the bot still has access to it.
    pub async fn refresh_guild(&self, guild_id: GuildId) -> Result<bool, Error> {
        let guild = self.fetch_guild(guild_id).await?;
        let mut guilds = self.guilds.write().unwrap_or_else(PoisonError::into_inner);

        match guild {
            Some(guild) => {
                guilds.insert(guild_id, Arc::new(guild));
                Ok(true)
            }
            None => {
                guilds.remove(&guild_id);
                Ok(false)
            }
        }
    }

    /// Puts a guild into the snapshot directly, for callers that track guilds from gateway events.
    pub fn insert_guild(&self, guild: CachedGuild) {
        self.guilds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(guild.id, Arc::new(guild));
    }

    pub fn remove_guild(&self, guild_id: GuildId) {
        self.guilds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&guild_id);
    }

    async fn fetch_guild(&self, guild_id: GuildId) -> Result<Option<CachedGuild>, Error> {
        let guild = match self.sender.http.guild(guild_id).await? {
            Some(guild) => guild,
            None => return Ok(None),
        };

        let text_channels = self
            .sender
            .http
            .guild_channels(guild_id)
            .await?
            .into_iter()
            .filter_map(|channel| match channel {
                GuildChannel::Text(channel) => Some((channel.id, channel.name)),
                _ => None,
            })
            .collect();

        Ok(Some(CachedGuild {
            id: guild_id,
            name: guild.name,
            system_channel_id: guild.system_channel_id,
            text_channels,
        }))
    }
}

impl MessagingBackend for TwilightBackend {
    type Guild = TwilightGuild;

    fn find_guild(&self, guild_id: GuildId) -> Option<TwilightGuild> {
        let guild = self
            .guilds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&guild_id)
            .cloned()?;

        Some(TwilightGuild {
            guild,
            sender: self.sender.clone(),
        })
    }
}

pub struct TwilightGuild {
    guild: Arc<CachedGuild>,
    sender: MessageSender,
}

impl TwilightGuild {
    fn channel(&self, id: ChannelId) -> TwilightChannel {
        TwilightChannel {
            id,
            sender: self.sender.clone(),
        }
    }
}

impl Guild for TwilightGuild {
    type Channel = TwilightChannel;

    fn id(&self) -> GuildId {
        self.guild.id
    }

    fn name(&self) -> &str {
        &self.guild.name
    }

    fn default_channel(&self) -> Option<TwilightChannel> {
        self.guild.system_channel_id.map(|id| self.channel(id))
    }

    fn find_text_channel(&self, channel_id: ChannelId) -> Option<TwilightChannel> {
        if self.guild.text_channels.contains_key(&channel_id) {
            Some(self.channel(channel_id))
        } else {
            None
        }
    }
}

pub struct TwilightChannel {
    id: ChannelId,
    sender: MessageSender,
}

impl Channel for TwilightChannel {
    fn id(&self) -> ChannelId {
        self.id
    }

    fn send(&self, message: OutgoingMessage) {
        let runtime = match self.sender.runtime() {
            Some(runtime) => runtime,
            None => {
                error!("No tokio runtime to send on, dropping log message for channel {}", self.id);
                return;
            }
        };

        let http = self.sender.http.clone();
        let channel_id = self.id;
        runtime.spawn(async move {
            if let Err(e) = deliver(&http, channel_id, message).await {
                error!("Failed to deliver log message to channel {}: {}", channel_id, e);
            }
        });
    }
}

async fn deliver(http: &HttpClient, channel_id: ChannelId, message: OutgoingMessage) -> Result<(), Error> {
    let mut request = http.create_message(channel_id).content(message.content)?;
    for attachment in message.attachments {
        request = request.attachment(attachment.name, attachment.data);
    }

    request.await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{resolver, LoggingConfig};
    use crate::DiscordLogging;

    fn cached_guild() -> CachedGuild {
        let mut text_channels = HashMap::new();
        text_channels.insert(ChannelId(2), String::from("logs"));

        CachedGuild {
            id: GuildId(1),
            name: String::from("Log Testing"),
            system_channel_id: Some(ChannelId(3)),
            text_channels,
        }
    }

    #[test]
    fn blank_token() {
        assert!(matches!(TwilightBackend::new(""), Err(Error::MissingToken)));
        assert!(matches!(TwilightBackend::new(" \t"), Err(Error::MissingToken)));
    }

    #[tokio::test]
    async fn lookups_use_the_snapshot() {
        let backend = TwilightBackend::new("token").unwrap();
        assert!(backend.find_guild(GuildId(1)).is_none());

        backend.insert_guild(cached_guild());
        let guild = backend.find_guild(GuildId(1)).unwrap();

        assert_eq!(guild.name(), "Log Testing");
        assert_eq!(guild.default_channel().map(|c| c.id()), Some(ChannelId(3)));
        assert_eq!(guild.find_text_channel(ChannelId(2)).map(|c| c.id()), Some(ChannelId(2)));
        assert!(guild.find_text_channel(ChannelId(4)).is_none());

        backend.remove_guild(GuildId(1));
        assert!(backend.find_guild(GuildId(1)).is_none());
    }

    #[tokio::test]
    async fn snapshot_updates_change_the_resolved_channel() {
        let backend = TwilightBackend::new("token").unwrap();
        backend.insert_guild(cached_guild());

        let channel = resolver::resolve(&backend, Some(GuildId(1)), None).unwrap();
        assert_eq!(channel.id(), ChannelId(3));
        assert!(resolver::resolve(&backend, Some(GuildId(1)), Some(ChannelId(5))).is_err());

        let mut moved = cached_guild();
        moved.system_channel_id = Some(ChannelId(4));
        moved.text_channels.insert(ChannelId(5), String::from("new-logs"));
        backend.insert_guild(moved);

        let channel = resolver::resolve(&backend, Some(GuildId(1)), None).unwrap();
        assert_eq!(channel.id(), ChannelId(4));
        let channel = resolver::resolve(&backend, Some(GuildId(1)), Some(ChannelId(5))).unwrap();
        assert_eq!(channel.id(), ChannelId(5));

        backend.remove_guild(GuildId(1));
        assert!(matches!(
            resolver::resolve(&backend, Some(GuildId(1)), None),
            Err(Error::GuildNotFound(Some(_)))
        ));
    }

    #[tokio::test]
    async fn periodic_refresh_stops_with_the_backend() {
        let backend = Arc::new(TwilightBackend::new("token").unwrap());
        assert!(backend.refresh_periodically(Duration::from_secs(0)).is_none());

        let task = backend.refresh_periodically(Duration::from_millis(10)).unwrap();
        drop(backend);

        time::timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn connect_rejects_blank_token_before_any_request() {
        let result = DiscordLogging::connect(LoggingConfig::new("")).await;

        assert!(matches!(result, Err(Error::MissingToken)));
    }
}
