/// Settings for the [`Cache`].
///
/// Each entity kind can be left out of the cache. Events still carry the entities of a disabled
/// kind, but applying their cache effect won't store them, and event accessors looking them up
/// through the cache return `None`.
///
/// # Examples
///
/// Keep at most 10 messages per channel and don't store users:
///
/// ```rust
/// use gateway_model::cache::{Cache, Settings};
///
/// let mut settings = Settings::default();
/// settings.max_messages = 10;
/// settings.cache_users = false;
///
/// let cache = Cache::new_with_settings(settings);
/// assert_eq!(cache.settings().max_messages, 10);
/// ```
///
/// [`Cache`]: super::Cache
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Settings {
    /// Messages kept per channel. Once a channel is full its oldest message is evicted, and `0`
    /// turns message caching off.
    ///
    /// Defaults to 100.
    pub max_messages: usize,
    /// Store guilds along with their roles, emojis and members.
    ///
    /// Defaults to true.
    pub cache_guilds: bool,
    /// Store channels.
    ///
    /// Defaults to true.
    pub cache_channels: bool,
    /// Store users, including the current user sent with `READY`.
    ///
    /// Defaults to true.
    pub cache_users: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_messages: 100,
            cache_guilds: true,
            cache_channels: true,
            cache_users: true,
        }
    }
}
