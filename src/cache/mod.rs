//! A cache containing the entities received through gateway events.
//!
//! Event records never write to a cache themselves. Each record describes its change through
//! [`CacheUpdate`], as a series of [`CacheSink::upsert`] and [`CacheSink::remove`] calls, and
//! reads related entities back through [`CacheQuery`]. Both traits are always available, so a
//! custom store can be plugged in even with the `cache` feature disabled.
//!
//! With the `cache` feature enabled, [`Cache`] is the in-memory store this library provides.
//! Following a policy to never hand out locks, the cache will clone all values when calling its
//! methods.

use std::sync::Arc;

use crate::model::prelude::*;

mod entity;
mod event;
#[cfg(feature = "cache")]
mod settings;
#[cfg(feature = "cache")]
mod wrappers;

pub use self::entity::{Entity, EntityKey, EntityKind};
#[cfg(feature = "cache")]
pub use self::settings::Settings;

/// The write side of a cache.
///
/// Every change an event record makes is expressed as calls on this trait, so any store that
/// implements it can back a dispatcher. Both methods are infallible; a store that cannot keep an
/// entity simply drops it.
pub trait CacheSink {
    /// Stores a snapshot of an entity, replacing any previous snapshot under the same key.
    fn upsert(&self, entity: Entity);

    /// Removes the entity stored under the key, if any.
    fn remove(&self, key: EntityKey);
}

/// The read side of a cache.
///
/// Lookups return owned snapshots, or `None` when the entity isn't stored.
pub trait CacheQuery {
    fn channel(&self, id: ChannelId) -> Option<Channel>;
    fn guild(&self, id: GuildId) -> Option<Guild>;
    fn message(&self, id: MessageId) -> Option<Message>;
    fn user(&self, id: UserId) -> Option<User>;
    fn role(&self, id: RoleId) -> Option<Role>;
    fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<Member>;
    fn emoji(&self, id: EmojiId) -> Option<Emoji>;
}

/// A cache that can be both written and read, and shared between tasks.
///
/// This is what a dispatcher holds on to. It is implemented for every type implementing both
/// halves.
pub trait CacheStore: CacheSink + CacheQuery + Send + Sync {}

impl<T: CacheSink + CacheQuery + Send + Sync + ?Sized> CacheStore for T {}

/// Trait used for updating the cache with a type.
///
/// Implemented by every event record that carries an entity change.
pub trait CacheUpdate {
    /// Writes the record's change into the cache.
    fn update<S: CacheSink + ?Sized>(&self, cache: &S);
}

impl<T: CacheSink + ?Sized> CacheSink for &T {
    fn upsert(&self, entity: Entity) {
        (**self).upsert(entity);
    }

    fn remove(&self, key: EntityKey) {
        (**self).remove(key);
    }
}

impl<T: CacheSink + ?Sized> CacheSink for Arc<T> {
    fn upsert(&self, entity: Entity) {
        (**self).upsert(entity);
    }

    fn remove(&self, key: EntityKey) {
        (**self).remove(key);
    }
}

macro_rules! forward_query {
    ($($ty:ty),*) => {
        $(
            impl<T: CacheQuery + ?Sized> CacheQuery for $ty {
                fn channel(&self, id: ChannelId) -> Option<Channel> {
                    (**self).channel(id)
                }

                fn guild(&self, id: GuildId) -> Option<Guild> {
                    (**self).guild(id)
                }

                fn message(&self, id: MessageId) -> Option<Message> {
                    (**self).message(id)
                }

                fn user(&self, id: UserId) -> Option<User> {
                    (**self).user(id)
                }

                fn role(&self, id: RoleId) -> Option<Role> {
                    (**self).role(id)
                }

                fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<Member> {
                    (**self).member(guild_id, user_id)
                }

                fn emoji(&self, id: EmojiId) -> Option<Emoji> {
                    (**self).emoji(id)
                }
            }
        )*
    };
}

forward_query!(&T, Arc<T>);

#[cfg(feature = "cache")]
pub use self::store::Cache;

#[cfg(feature = "cache")]
mod store {
    use std::collections::VecDeque;

    use dashmap::DashMap;
    use parking_lot::{RwLock, RwLockReadGuard};
    use tracing::{debug, instrument, trace};

    use super::wrappers::{BuildHasher, MaybeMap};
    use super::{CacheQuery, CacheSink, Entity, EntityKey, Settings};
    use crate::model::prelude::*;

    /// A cache containing the entities received through gateway events.
    ///
    /// Guilds are stored together with their nested channels, roles, emojis and members, and
    /// each of those is also indexed on its own so it can be looked up by Id. Writes keep both
    /// views in step.
    ///
    /// The cache will clone all values when calling its methods.
    #[derive(Debug)]
    #[non_exhaustive]
    pub struct Cache {
        /// A map of channels the current user has received data for, in guilds and private.
        ///
        /// When a guild is removed, its channels are removed from this map too.
        pub(crate) channels: MaybeMap<ChannelId, Channel>,
        /// A map of guilds with full data available.
        pub(crate) guilds: MaybeMap<GuildId, Guild>,
        pub(crate) roles: MaybeMap<RoleId, Role>,
        pub(crate) emojis: MaybeMap<EmojiId, Emoji>,
        pub(crate) members: MaybeMap<(GuildId, UserId), Member>,
        /// A map of users that the current user sees.
        ///
        /// Users are not removed from the map when a member leaves, as other structs such as
        /// messages or recipients may still refer to them.
        pub(crate) users: MaybeMap<UserId, User>,
        pub(crate) messages: DashMap<MessageId, Message, BuildHasher>,
        /// Queue of message IDs for each channel.
        ///
        /// This is simply a vecdeque so we can keep track of the order of messages inserted into
        /// the cache. When a maximum number of messages are in a channel's cache, we can pop the
        /// front and remove that ID from the cache.
        pub(crate) message_queue: DashMap<ChannelId, VecDeque<MessageId>, BuildHasher>,
        /// The settings for the cache.
        settings: RwLock<Settings>,
    }

    impl Cache {
        /// Creates a new cache.
        #[inline]
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a new cache instance with settings applied.
        ///
        /// The `cache_*` toggles are read once here; only `max_messages` can be changed later.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use gateway_model::cache::{Cache, Settings};
        ///
        /// let mut settings = Settings::default();
        /// settings.max_messages = 10;
        ///
        /// let cache = Cache::new_with_settings(settings);
        /// ```
        #[instrument]
        #[must_use]
        pub fn new_with_settings(settings: Settings) -> Self {
            Self {
                channels: MaybeMap::enabled(settings.cache_channels),
                guilds: MaybeMap::enabled(settings.cache_guilds),
                roles: MaybeMap::enabled(settings.cache_guilds),
                emojis: MaybeMap::enabled(settings.cache_guilds),
                members: MaybeMap::enabled(settings.cache_guilds),
                users: MaybeMap::enabled(settings.cache_users),
                messages: DashMap::default(),
                message_queue: DashMap::default(),
                settings: RwLock::new(settings),
            }
        }

        /// Returns a read-only reference to the cache's settings.
        pub fn settings(&self) -> RwLockReadGuard<'_, Settings> {
            self.settings.read()
        }

        /// Sets the maximum amount of messages per channel to cache.
        ///
        /// Channels already over the new limit are trimmed on their next message.
        pub fn set_max_messages(&self, max: usize) {
            self.settings.write().max_messages = max;
        }

        /// Fetches the Ids of all [`Guild`]s stored in the cache.
        #[must_use]
        pub fn guilds(&self) -> Vec<GuildId> {
            self.guilds.iter().map(|i| *i.key()).collect()
        }

        /// Fetches the number of [`Member`]s that have not had data received.
        ///
        /// The important detail to note here is that this is the number of _member_s that have
        /// not had data received. A single [`User`] may have multiple associated member objects
        /// that have not been received.
        #[must_use]
        pub fn unknown_members(&self) -> u64 {
            self.guilds
                .iter()
                .filter_map(|guild| {
                    let received = guild.members.len() as u64;
                    guild.member_count.map(|count| count.saturating_sub(received))
                })
                .sum()
        }

        /// Returns the cached messages of a channel, oldest first.
        #[must_use]
        pub fn channel_messages(&self, channel_id: ChannelId) -> Vec<Message> {
            let Some(queue) = self.message_queue.get(&channel_id) else {
                return Vec::new();
            };

            queue.iter().filter_map(|id| self.messages.get(id).map(|m| m.clone())).collect()
        }

        /// Fetches the Ids of all [`User`]s stored in the cache.
        #[must_use]
        pub fn users(&self) -> Vec<UserId> {
            self.users.iter().map(|i| *i.key()).collect()
        }

        fn upsert_channel(&self, channel: Channel) {
            for user in &channel.recipients {
                self.upsert_user(user.clone());
            }

            if let Some(guild_id) = channel.guild_id {
                if let Some(mut guild) = self.guilds.get_mut(&guild_id) {
                    replace_or_push(&mut guild.channels, channel.clone(), |c| c.id == channel.id);
                }
            }

            trace!("Caching channel {}", channel.id);
            self.channels.insert(channel.id, channel);
        }

        fn upsert_guild(&self, mut guild: Guild) {
            // A guild update carries none of the fields only sent on guild creation.
            if let Some(old) = self.guilds.get(&guild.id) {
                if guild.channels.is_empty() {
                    guild.channels.clone_from(&old.channels);
                }
                if guild.members.is_empty() {
                    guild.members.clone_from(&old.members);
                }
                guild.member_count = guild.member_count.or(old.member_count);
                guild.joined_at = guild.joined_at.or(old.joined_at);
            }

            for channel in &guild.channels {
                self.channels.insert(channel.id, channel.clone());
            }
            for role in &guild.roles {
                self.roles.insert(role.id, role.clone());
            }
            for emoji in &guild.emojis {
                self.emojis.insert(emoji.id, emoji.clone());
            }
            for member in &guild.members {
                self.upsert_user(member.user.clone());
                self.members.insert((guild.id, member.user.id), member.clone());
            }

            trace!("Caching guild {}", guild.id);
            self.guilds.insert(guild.id, guild);
        }

        fn upsert_role(&self, role: Role) {
            if let Some(mut guild) = self.guilds.get_mut(&role.guild_id) {
                replace_or_push(&mut guild.roles, role.clone(), |r| r.id == role.id);
            }

            trace!("Caching role {}", role.id);
            self.roles.insert(role.id, role);
        }

        fn upsert_emoji(&self, emoji: Emoji) {
            if let Some(mut guild) = self.guilds.get_mut(&emoji.guild_id) {
                replace_or_push(&mut guild.emojis, emoji.clone(), |e| e.id == emoji.id);
            }

            trace!("Caching emoji {}", emoji.id);
            self.emojis.insert(emoji.id, emoji);
        }

        fn upsert_member(&self, member: Member) {
            self.upsert_user(member.user.clone());

            let user_id = member.user.id;
            if let Some(mut guild) = self.guilds.get_mut(&member.guild_id) {
                replace_or_push(&mut guild.members, member.clone(), |m| m.user.id == user_id);
            }

            trace!("Caching member {} of guild {}", user_id, member.guild_id);
            self.members.insert((member.guild_id, user_id), member);
        }

        fn upsert_message(&self, message: Message) {
            let max_messages = self.settings().max_messages;
            if max_messages == 0 {
                return;
            }

            self.upsert_user(message.author.clone());

            let mut queue = self.message_queue.entry(message.channel_id).or_default();
            if !queue.contains(&message.id) {
                queue.push_back(message.id);
            }
            while queue.len() > max_messages {
                if let Some(evicted) = queue.pop_front() {
                    trace!("Evicting message {} from channel {}", evicted, message.channel_id);
                    self.messages.remove(&evicted);
                }
            }
            drop(queue);

            trace!("Caching message {}", message.id);
            self.messages.insert(message.id, message);
        }

        fn upsert_user(&self, user: User) {
            self.users.insert(user.id, user);
        }

        fn remove_channel(&self, id: ChannelId) -> bool {
            let removed = self.channels.remove(&id);
            self.remove_channel_messages(id);

            let guild_id = removed.as_ref().and_then(|(_, c)| c.guild_id);
            if let Some(mut guild) = guild_id.and_then(|guild_id| self.guilds.get_mut(&guild_id)) {
                guild.channels.retain(|c| c.id != id);
            }

            removed.is_some()
        }

        fn remove_channel_messages(&self, id: ChannelId) {
            if let Some((_, queue)) = self.message_queue.remove(&id) {
                for message_id in queue {
                    self.messages.remove(&message_id);
                }
            }
        }

        fn remove_guild(&self, id: GuildId) -> bool {
            let Some((_, guild)) = self.guilds.remove(&id) else {
                return false;
            };

            for channel in &guild.channels {
                self.channels.remove(&channel.id);
                self.remove_channel_messages(channel.id);
            }
            for role in &guild.roles {
                self.roles.remove(&role.id);
            }
            for emoji in &guild.emojis {
                self.emojis.remove(&emoji.id);
            }
            for member in &guild.members {
                self.members.remove(&(id, member.user.id));
            }

            true
        }

        fn remove_role(&self, id: RoleId) -> bool {
            let Some((_, role)) = self.roles.remove(&id) else {
                return false;
            };

            if let Some(mut guild) = self.guilds.get_mut(&role.guild_id) {
                guild.roles.retain(|r| r.id != id);
            }

            true
        }

        fn remove_emoji(&self, id: EmojiId) -> bool {
            let Some((_, emoji)) = self.emojis.remove(&id) else {
                return false;
            };

            if let Some(mut guild) = self.guilds.get_mut(&emoji.guild_id) {
                guild.emojis.retain(|e| e.id != id);
            }

            true
        }

        fn remove_member(&self, guild_id: GuildId, user_id: UserId) -> bool {
            if let Some(mut guild) = self.guilds.get_mut(&guild_id) {
                guild.members.retain(|m| m.user.id != user_id);
            }

            self.members.remove(&(guild_id, user_id)).is_some()
        }

        fn remove_message(&self, id: MessageId) -> bool {
            let Some((_, message)) = self.messages.remove(&id) else {
                return false;
            };

            if let Some(mut queue) = self.message_queue.get_mut(&message.channel_id) {
                queue.retain(|m| *m != id);
            }

            true
        }
    }

    impl Default for Cache {
        fn default() -> Self {
            Self::new_with_settings(Settings::default())
        }
    }

    impl CacheSink for Cache {
        fn upsert(&self, entity: Entity) {
            match entity {
                Entity::Channel(channel) => self.upsert_channel(channel),
                Entity::Emoji(emoji) => self.upsert_emoji(emoji),
                Entity::Guild(guild) => self.upsert_guild(guild),
                Entity::Member(member) => self.upsert_member(member),
                Entity::Message(message) => self.upsert_message(message),
                Entity::Role(role) => self.upsert_role(role),
                Entity::User(user) => self.upsert_user(user),
            }
        }

        fn remove(&self, key: EntityKey) {
            let removed = match key {
                EntityKey::Channel(id) => self.remove_channel(id),
                EntityKey::Emoji(id) => self.remove_emoji(id),
                EntityKey::Guild(id) => self.remove_guild(id),
                EntityKey::Member(guild_id, user_id) => self.remove_member(guild_id, user_id),
                EntityKey::Message(id) => self.remove_message(id),
                EntityKey::Role(id) => self.remove_role(id),
                EntityKey::User(id) => self.users.remove(&id).is_some(),
            };

            if removed {
                trace!("Removed {key} from the cache");
            } else {
                debug!("Tried to remove {key}, which was not cached");
            }
        }
    }

    impl CacheQuery for Cache {
        fn channel(&self, id: ChannelId) -> Option<Channel> {
            self.channels.get(&id).map(|c| c.clone())
        }

        fn guild(&self, id: GuildId) -> Option<Guild> {
            self.guilds.get(&id).map(|g| g.clone())
        }

        fn message(&self, id: MessageId) -> Option<Message> {
            self.messages.get(&id).map(|m| m.clone())
        }

        fn user(&self, id: UserId) -> Option<User> {
            self.users.get(&id).map(|u| u.clone())
        }

        fn role(&self, id: RoleId) -> Option<Role> {
            self.roles.get(&id).map(|r| r.clone())
        }

        fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<Member> {
            self.members.get(&(guild_id, user_id)).map(|m| m.clone())
        }

        fn emoji(&self, id: EmojiId) -> Option<Emoji> {
            self.emojis.get(&id).map(|e| e.clone())
        }
    }

    fn replace_or_push<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
        match items.iter_mut().find(|existing| same(existing)) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

}
