//! All the events this library handles.
//!
//! Every record keeps the payload it was decoded from in its `raw` field, next to the typed
//! fields. Records are built once per payload by [`Event::decode`] and are not mutated
//! afterwards; the change a record makes to the cache is applied separately, through
//! [`Event::apply_cache_effect`].
//!
//! Accessors that look up related entities, such as [`MessageDeleteEvent::guild`], take the
//! cache to read from as an argument and return `None` when either the Id is absent from the
//! payload or the entity isn't cached.

use std::fmt;

use serde::de::{Error as DeError, Visitor};
use tracing::{debug, warn};

use super::utils::{entity, Fields};
use crate::cache::{CacheQuery, CacheSink, CacheUpdate};
use crate::constants::GATEWAY_VERSION;
use crate::internal::prelude::*;
use crate::model::prelude::*;

/// Whether a ban was added or lifted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BanAction {
    /// Sent as `GUILD_BAN_ADD`.
    Added,
    /// Sent as `GUILD_BAN_REMOVE`.
    Removed,
}

/// What happened to an application command.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandAction {
    Created,
    Updated,
    Deleted,
}

/// An initial set of information given after IDENTIFYing to the gateway.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#ready).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ReadyEvent {
    /// The gateway version, sent as `v`.
    pub version: u8,
    /// The current user.
    pub user: User,
    /// The guilds the current user is in. They arrive as unavailable stubs, each followed by a
    /// guild create once it is available.
    pub guilds: Vec<UnavailableGuild>,
    pub session_id: String,
    pub shard: Option<ShardInfo>,
    pub application: ApplicationInfo,
    pub raw: JsonMap,
}

impl ReadyEvent {
    fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
        let fields = Fields::new(event, &raw);

        let version = fields.required("v")?;
        if version != GATEWAY_VERSION {
            warn!("Gateway version {version} differs from the supported version {GATEWAY_VERSION}");
        }

        Ok(Self {
            version,
            user: fields.required("user")?,
            guilds: fields.required("guilds")?,
            session_id: fields.required("session_id")?,
            shard: fields.optional("shard")?,
            application: fields.required("application")?,
            raw,
        })
    }
}

/// An application command was created, updated or deleted.
///
/// The payload is kept as-is; the typed accessors read the commonly used fields out of it.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ApplicationCommandEvent {
    pub action: CommandAction,
    pub raw: JsonMap,
}

impl ApplicationCommandEvent {
    /// The Id of the command, if the payload carries a valid one.
    #[must_use]
    pub fn id(&self) -> Option<Snowflake> {
        self.raw.get("id").and_then(|id| Snowflake::deserialize(id).ok())
    }

    /// The name of the command.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.raw.get("name").and_then(Value::as_str)
    }

    /// The guild the command is registered in. Global commands have none.
    #[must_use]
    pub fn guild_id(&self) -> Option<GuildId> {
        self.raw.get("guild_id").and_then(|id| GuildId::deserialize(id).ok())
    }
}

/// Defines a record whose payload is one whole entity.
macro_rules! entity_event {
    ($($(#[$attr:meta])* $name:ident { $field:ident: $Entity:ty })*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Debug, PartialEq)]
            #[non_exhaustive]
            pub struct $name {
                pub $field: $Entity,
                pub raw: JsonMap,
            }

            impl $name {
                fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
                    Ok(Self {
                        $field: entity(event, &raw)?,
                        raw,
                    })
                }
            }
        )*
    };
}

entity_event! {
    /// A channel was created.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#channel-create).
    ChannelCreateEvent { channel: Channel }
    /// A channel was updated.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#channel-update).
    ChannelUpdateEvent { channel: Channel }
    /// A channel was deleted.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#channel-delete).
    ChannelDeleteEvent { channel: Channel }
    /// The current user joined a guild, or a guild became available.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-create).
    GuildCreateEvent { guild: Guild }
    /// A guild was updated.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-update).
    GuildUpdateEvent { guild: Guild }
    /// The current user left a guild, or a guild became unavailable.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-delete).
    GuildDeleteEvent { guild: UnavailableGuild }
    /// A user joined a guild.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-member-add).
    GuildMemberAddEvent { member: Member }
    /// A message was sent.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#message-create).
    MessageCreateEvent { message: Message }
    /// A message was edited.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#message-update).
    MessageUpdateEvent { message: Message }
}

impl ChannelUpdateEvent {
    /// The cached channel with the same Id.
    ///
    /// Until the event's cache effect is applied, this is the channel as it was before the
    /// update.
    pub fn original<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Channel> {
        cache.channel(self.channel.id)
    }
}

impl GuildUpdateEvent {
    /// The cached guild with the same Id.
    ///
    /// Until the event's cache effect is applied, this is the guild as it was before the update.
    pub fn original<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        cache.guild(self.guild.id)
    }
}

impl GuildDeleteEvent {
    /// The full cached guild, while it is still cached.
    pub fn full<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        cache.guild(self.guild.id)
    }
}

impl GuildMemberAddEvent {
    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        cache.guild(self.member.guild_id)
    }
}

impl MessageCreateEvent {
    pub fn channel<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Channel> {
        cache.channel(self.message.channel_id)
    }

    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        self.message.guild_id.and_then(|id| cache.guild(id))
    }
}

impl MessageUpdateEvent {
    /// The cached message with the same Id.
    ///
    /// Until the event's cache effect is applied, this is the message as it was before the edit.
    pub fn original<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Message> {
        cache.message(self.message.id)
    }
}

/// A pin was added to or removed from a channel.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#channel-pins-update).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ChannelPinsUpdateEvent {
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    /// The time at which the most recent pinned message was pinned. `None` when the channel has
    /// no pins left.
    pub last_pin_timestamp: Option<Timestamp>,
    pub raw: JsonMap,
}

impl ChannelPinsUpdateEvent {
    fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
        let fields = Fields::new(event, &raw);

        Ok(Self {
            guild_id: fields.optional("guild_id")?,
            channel_id: fields.required("channel_id")?,
            last_pin_timestamp: fields.timestamp("last_pin_timestamp")?,
            raw,
        })
    }

    pub fn channel<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Channel> {
        cache.channel(self.channel_id)
    }

    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        self.guild_id.and_then(|id| cache.guild(id))
    }
}

/// A user was banned from, or unbanned in, a guild.
///
/// Both `GUILD_BAN_ADD` and `GUILD_BAN_REMOVE` decode into this record; [`Self::action`] tells
/// them apart.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-ban-add).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct GuildBanEvent {
    pub action: BanAction,
    pub guild_id: GuildId,
    pub user: User,
    pub raw: JsonMap,
}

impl GuildBanEvent {
    fn decode(event: &EventType, action: BanAction, raw: JsonMap) -> Result<Self> {
        let fields = Fields::new(event, &raw);

        Ok(Self {
            action,
            guild_id: fields.required("guild_id")?,
            user: fields.required("user")?,
            raw,
        })
    }

    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        cache.guild(self.guild_id)
    }
}

/// The emojis of a guild were replaced.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-emojis-update).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct GuildEmojisUpdateEvent {
    pub guild_id: GuildId,
    /// The guild's complete set of emojis, each carrying [`Self::guild_id`].
    pub emojis: Vec<Emoji>,
    pub raw: JsonMap,
}

impl GuildEmojisUpdateEvent {
    fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
        let fields = Fields::new(event, &raw);
        let guild_id = fields.required("guild_id")?;
        let mut emojis: Vec<Emoji> = fields.required("emojis")?;

        for emoji in &mut emojis {
            emoji.guild_id = guild_id;
        }

        Ok(Self {
            guild_id,
            emojis,
            raw,
        })
    }

    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        cache.guild(self.guild_id)
    }
}

/// A guild's integrations were updated.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-integrations-update).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct GuildIntegrationsUpdateEvent {
    pub guild_id: GuildId,
    pub raw: JsonMap,
}

impl GuildIntegrationsUpdateEvent {
    fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
        Ok(Self {
            guild_id: Fields::new(event, &raw).required("guild_id")?,
            raw,
        })
    }

    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        cache.guild(self.guild_id)
    }
}

/// A user left or was removed from a guild.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-member-remove).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct GuildMemberRemoveEvent {
    pub guild_id: GuildId,
    pub user: User,
    pub raw: JsonMap,
}

impl GuildMemberRemoveEvent {
    fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
        let fields = Fields::new(event, &raw);

        Ok(Self {
            guild_id: fields.required("guild_id")?,
            user: fields.required("user")?,
            raw,
        })
    }

    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        cache.guild(self.guild_id)
    }

    /// The member's cached data, while it is still cached.
    pub fn member<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Member> {
        cache.member(self.guild_id, self.user.id)
    }
}

macro_rules! role_event {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Debug, PartialEq)]
            #[non_exhaustive]
            pub struct $name {
                pub guild_id: GuildId,
                /// The role, with [`Role::guild_id`] set to [`Self::guild_id`].
                pub role: Role,
                pub raw: JsonMap,
            }

            impl $name {
                fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
                    let fields = Fields::new(event, &raw);
                    let guild_id = fields.required("guild_id")?;
                    let mut role: Role = fields.required("role")?;
                    role.guild_id = guild_id;

                    Ok(Self {
                        guild_id,
                        role,
                        raw,
                    })
                }

                pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
                    cache.guild(self.guild_id)
                }
            }
        )*
    };
}

role_event! {
    /// A role was created.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-role-create).
    GuildRoleCreateEvent;
    /// A role was updated.
    ///
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-role-update).
    GuildRoleUpdateEvent;
}

impl GuildRoleUpdateEvent {
    /// The cached role with the same Id.
    ///
    /// Until the event's cache effect is applied, this is the role as it was before the update.
    pub fn original<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Role> {
        cache.role(self.role.id)
    }
}

/// A role was deleted.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-role-delete).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct GuildRoleDeleteEvent {
    pub guild_id: GuildId,
    pub role_id: RoleId,
    pub raw: JsonMap,
}

impl GuildRoleDeleteEvent {
    fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
        let fields = Fields::new(event, &raw);

        Ok(Self {
            guild_id: fields.required("guild_id")?,
            role_id: fields.required("role_id")?,
            raw,
        })
    }

    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        cache.guild(self.guild_id)
    }

    /// The deleted role, while it is still cached.
    pub fn role<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Role> {
        cache.role(self.role_id)
    }
}

/// A message was deleted.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#message-delete).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct MessageDeleteEvent {
    pub id: MessageId,
    pub channel_id: ChannelId,
    /// Absent for messages deleted in private channels.
    pub guild_id: Option<GuildId>,
    pub raw: JsonMap,
}

impl MessageDeleteEvent {
    fn decode(event: &EventType, raw: JsonMap) -> Result<Self> {
        let fields = Fields::new(event, &raw);

        Ok(Self {
            id: fields.required("id")?,
            channel_id: fields.required("channel_id")?,
            guild_id: fields.optional("guild_id")?,
            raw,
        })
    }

    /// The deleted message, while it is still cached.
    pub fn message<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Message> {
        cache.message(self.id)
    }

    pub fn channel<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Channel> {
        cache.channel(self.channel_id)
    }

    pub fn guild<C: CacheQuery + ?Sized>(&self, cache: &C) -> Option<Guild> {
        self.guild_id.and_then(|id| cache.guild(id))
    }
}

/// An event this library has no record type for.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct UnknownEvent {
    /// The event name, as sent in the frame's `t` field.
    pub kind: String,
    /// The payload, which isn't guaranteed to be an object.
    pub raw: Value,
}

/// Event received over a websocket connection
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#receive-events).
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Event {
    /// The first event in a connection, containing the initial ready cache.
    Ready(ReadyEvent),
    /// An application command was created.
    ApplicationCommandCreate(ApplicationCommandEvent),
    /// An application command was updated.
    ApplicationCommandUpdate(ApplicationCommandEvent),
    /// An application command was deleted.
    ApplicationCommandDelete(ApplicationCommandEvent),
    /// A [`Channel`] was created.
    ChannelCreate(ChannelCreateEvent),
    /// A [`Channel`] has been updated.
    ChannelUpdate(ChannelUpdateEvent),
    /// A [`Channel`] has been deleted.
    ChannelDelete(ChannelDeleteEvent),
    /// The pins for a [`Channel`] have been updated.
    ChannelPinsUpdate(ChannelPinsUpdateEvent),
    GuildCreate(GuildCreateEvent),
    GuildUpdate(GuildUpdateEvent),
    GuildDelete(GuildDeleteEvent),
    /// A user was banned or unbanned. See [`GuildBanEvent::action`].
    GuildBan(GuildBanEvent),
    GuildEmojisUpdate(GuildEmojisUpdateEvent),
    GuildIntegrationsUpdate(GuildIntegrationsUpdateEvent),
    GuildMemberAdd(GuildMemberAddEvent),
    GuildMemberRemove(GuildMemberRemoveEvent),
    GuildRoleCreate(GuildRoleCreateEvent),
    GuildRoleUpdate(GuildRoleUpdateEvent),
    GuildRoleDelete(GuildRoleDeleteEvent),
    MessageCreate(MessageCreateEvent),
    MessageUpdate(MessageUpdateEvent),
    MessageDelete(MessageDeleteEvent),
    /// An event type not covered by the above
    Unknown(UnknownEvent),
}

impl Event {
    /// Decodes the payload of a dispatch into the record for its event type.
    ///
    /// Unrecognised event types never fail; they become [`Event::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the payload is not an object, misses a required field or has
    /// a field of the wrong shape, and [`Error::Format`] if a field fails a format-specific parse
    /// such as a timestamp.
    pub fn decode(kind: EventType, data: Value) -> Result<Self> {
        let raw = match data {
            Value::Object(raw) => raw,
            raw => {
                return match kind {
                    EventType::Other(kind) => Ok(Event::Unknown(UnknownEvent {
                        kind,
                        raw,
                    })),
                    event => Err(DecodeError::NotAnObject {
                        event,
                    }
                    .into()),
                };
            },
        };

        let kind = &kind;
        Ok(match kind {
            EventType::Ready => Event::Ready(ReadyEvent::decode(kind, raw)?),
            EventType::ApplicationCommandCreate => {
                Event::ApplicationCommandCreate(ApplicationCommandEvent {
                    action: CommandAction::Created,
                    raw,
                })
            },
            EventType::ApplicationCommandUpdate => {
                Event::ApplicationCommandUpdate(ApplicationCommandEvent {
                    action: CommandAction::Updated,
                    raw,
                })
            },
            EventType::ApplicationCommandDelete => {
                Event::ApplicationCommandDelete(ApplicationCommandEvent {
                    action: CommandAction::Deleted,
                    raw,
                })
            },
            EventType::ChannelCreate => Event::ChannelCreate(ChannelCreateEvent::decode(kind, raw)?),
            EventType::ChannelUpdate => Event::ChannelUpdate(ChannelUpdateEvent::decode(kind, raw)?),
            EventType::ChannelDelete => Event::ChannelDelete(ChannelDeleteEvent::decode(kind, raw)?),
            EventType::ChannelPinsUpdate => {
                Event::ChannelPinsUpdate(ChannelPinsUpdateEvent::decode(kind, raw)?)
            },
            EventType::GuildCreate => Event::GuildCreate(GuildCreateEvent::decode(kind, raw)?),
            EventType::GuildUpdate => Event::GuildUpdate(GuildUpdateEvent::decode(kind, raw)?),
            EventType::GuildDelete => Event::GuildDelete(GuildDeleteEvent::decode(kind, raw)?),
            EventType::GuildBanAdd => {
                Event::GuildBan(GuildBanEvent::decode(kind, BanAction::Added, raw)?)
            },
            EventType::GuildBanRemove => {
                Event::GuildBan(GuildBanEvent::decode(kind, BanAction::Removed, raw)?)
            },
            EventType::GuildEmojisUpdate => {
                Event::GuildEmojisUpdate(GuildEmojisUpdateEvent::decode(kind, raw)?)
            },
            EventType::GuildIntegrationsUpdate => {
                Event::GuildIntegrationsUpdate(GuildIntegrationsUpdateEvent::decode(kind, raw)?)
            },
            EventType::GuildMemberAdd => Event::GuildMemberAdd(GuildMemberAddEvent::decode(kind, raw)?),
            EventType::GuildMemberRemove => {
                Event::GuildMemberRemove(GuildMemberRemoveEvent::decode(kind, raw)?)
            },
            EventType::GuildRoleCreate => {
                Event::GuildRoleCreate(GuildRoleCreateEvent::decode(kind, raw)?)
            },
            EventType::GuildRoleUpdate => {
                Event::GuildRoleUpdate(GuildRoleUpdateEvent::decode(kind, raw)?)
            },
            EventType::GuildRoleDelete => {
                Event::GuildRoleDelete(GuildRoleDeleteEvent::decode(kind, raw)?)
            },
            EventType::MessageCreate => Event::MessageCreate(MessageCreateEvent::decode(kind, raw)?),
            EventType::MessageUpdate => Event::MessageUpdate(MessageUpdateEvent::decode(kind, raw)?),
            EventType::MessageDelete => Event::MessageDelete(MessageDeleteEvent::decode(kind, raw)?),
            EventType::Other(name) => {
                debug!("Received unknown event type {name}");

                Event::Unknown(UnknownEvent {
                    kind: name.clone(),
                    raw: Value::Object(raw),
                })
            },
        })
    }

    /// Decodes a payload given the event name as sent in the frame's `t` field.
    ///
    /// # Errors
    ///
    /// See [`Self::decode`].
    pub fn decode_named(name: &str, data: Value) -> Result<Self> {
        Self::decode(EventType::from(name), data)
    }

    /// Return the event type of the event.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Ready(_) => EventType::Ready,
            Self::ApplicationCommandCreate(_) => EventType::ApplicationCommandCreate,
            Self::ApplicationCommandUpdate(_) => EventType::ApplicationCommandUpdate,
            Self::ApplicationCommandDelete(_) => EventType::ApplicationCommandDelete,
            Self::ChannelCreate(_) => EventType::ChannelCreate,
            Self::ChannelUpdate(_) => EventType::ChannelUpdate,
            Self::ChannelDelete(_) => EventType::ChannelDelete,
            Self::ChannelPinsUpdate(_) => EventType::ChannelPinsUpdate,
            Self::GuildCreate(_) => EventType::GuildCreate,
            Self::GuildUpdate(_) => EventType::GuildUpdate,
            Self::GuildDelete(_) => EventType::GuildDelete,
            Self::GuildBan(e) => match e.action {
                BanAction::Added => EventType::GuildBanAdd,
                BanAction::Removed => EventType::GuildBanRemove,
            },
            Self::GuildEmojisUpdate(_) => EventType::GuildEmojisUpdate,
            Self::GuildIntegrationsUpdate(_) => EventType::GuildIntegrationsUpdate,
            Self::GuildMemberAdd(_) => EventType::GuildMemberAdd,
            Self::GuildMemberRemove(_) => EventType::GuildMemberRemove,
            Self::GuildRoleCreate(_) => EventType::GuildRoleCreate,
            Self::GuildRoleUpdate(_) => EventType::GuildRoleUpdate,
            Self::GuildRoleDelete(_) => EventType::GuildRoleDelete,
            Self::MessageCreate(_) => EventType::MessageCreate,
            Self::MessageUpdate(_) => EventType::MessageUpdate,
            Self::MessageDelete(_) => EventType::MessageDelete,
            Self::Unknown(e) => EventType::Other(e.kind.clone()),
        }
    }

    /// Applies the record's change to the cache: an upsert for records that carry a new entity
    /// snapshot, a removal for deletions, and nothing for the rest.
    ///
    /// The dispatcher calls this exactly once per record. Calling it again repeats the same
    /// writes.
    pub fn apply_cache_effect<C: CacheSink + ?Sized>(&self, cache: &C) {
        match self {
            Self::Ready(e) => e.update(cache),
            Self::ChannelCreate(e) => e.update(cache),
            Self::ChannelUpdate(e) => e.update(cache),
            Self::ChannelDelete(e) => e.update(cache),
            Self::GuildCreate(e) => e.update(cache),
            Self::GuildUpdate(e) => e.update(cache),
            Self::GuildDelete(e) => e.update(cache),
            Self::GuildBan(e) => e.update(cache),
            Self::GuildEmojisUpdate(e) => e.update(cache),
            Self::GuildMemberAdd(e) => e.update(cache),
            Self::GuildMemberRemove(e) => e.update(cache),
            Self::GuildRoleCreate(e) => e.update(cache),
            Self::GuildRoleUpdate(e) => e.update(cache),
            Self::GuildRoleDelete(e) => e.update(cache),
            Self::MessageCreate(e) => e.update(cache),
            Self::MessageUpdate(e) => e.update(cache),
            Self::MessageDelete(e) => e.update(cache),
            Self::ApplicationCommandCreate(_)
            | Self::ApplicationCommandUpdate(_)
            | Self::ApplicationCommandDelete(_)
            | Self::ChannelPinsUpdate(_)
            | Self::GuildIntegrationsUpdate(_)
            | Self::Unknown(_) => {},
        }
    }
}

macro_rules! event_types {
    ($($(#[$attr:meta])* $variant:ident => $name:literal,)*) => {
        /// The type of event dispatch received from the gateway.
        ///
        /// This is used to map the `t` field of a dispatch frame to the record it decodes into,
        /// e.g. `"GUILD_BAN_ADD"` to [`EventType::GuildBanAdd`].
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum EventType {
            $(
                $(#[$attr])*
                $variant,
            )*
            /// An unknown event was received over the gateway.
            ///
            /// This should be logged so that support for it can be added in the library.
            Other(String),
        }

        impl EventType {
            /// Return the event name of this event, as sent in a dispatch frame.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)*
                    Self::Other(name) => name,
                }
            }
        }

        impl From<&str> for EventType {
            fn from(name: &str) -> Self {
                match name {
                    $($name => Self::$variant,)*
                    other => Self::Other(other.to_owned()),
                }
            }
        }
    };
}

event_types! {
    Ready => "READY",
    ApplicationCommandCreate => "APPLICATION_COMMAND_CREATE",
    ApplicationCommandUpdate => "APPLICATION_COMMAND_UPDATE",
    ApplicationCommandDelete => "APPLICATION_COMMAND_DELETE",
    ChannelCreate => "CHANNEL_CREATE",
    ChannelUpdate => "CHANNEL_UPDATE",
    ChannelDelete => "CHANNEL_DELETE",
    ChannelPinsUpdate => "CHANNEL_PINS_UPDATE",
    GuildCreate => "GUILD_CREATE",
    GuildUpdate => "GUILD_UPDATE",
    GuildDelete => "GUILD_DELETE",
    GuildBanAdd => "GUILD_BAN_ADD",
    GuildBanRemove => "GUILD_BAN_REMOVE",
    GuildEmojisUpdate => "GUILD_EMOJIS_UPDATE",
    GuildIntegrationsUpdate => "GUILD_INTEGRATIONS_UPDATE",
    GuildMemberAdd => "GUILD_MEMBER_ADD",
    GuildMemberRemove => "GUILD_MEMBER_REMOVE",
    GuildRoleCreate => "GUILD_ROLE_CREATE",
    GuildRoleUpdate => "GUILD_ROLE_UPDATE",
    GuildRoleDelete => "GUILD_ROLE_DELETE",
    MessageCreate => "MESSAGE_CREATE",
    MessageUpdate => "MESSAGE_UPDATE",
    MessageDelete => "MESSAGE_DELETE",
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        struct EventTypeVisitor;

        impl<'de> Visitor<'de> for EventTypeVisitor {
            type Value = EventType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("event type str")
            }

            fn visit_str<E: DeError>(self, v: &str) -> StdResult<Self::Value, E> {
                Ok(EventType::from(v))
            }
        }

        deserializer.deserialize_str(EventTypeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;

    #[test]
    fn wire_names_round_trip() {
        for name in ["READY", "GUILD_BAN_REMOVE", "MESSAGE_DELETE", "TYPING_START"] {
            assert_eq!(EventType::from(name).name(), name);
        }
        assert_eq!(EventType::from("TYPING_START"), EventType::Other("TYPING_START".to_owned()));
    }

    #[test]
    fn ban_events_share_a_decoder() {
        let payload = json!({"guild_id": "10", "user": {"id": "7", "username": "ferris"}});
        let added = Event::decode(EventType::GuildBanAdd, payload.clone()).unwrap();
        let removed = Event::decode(EventType::GuildBanRemove, payload).unwrap();

        let (Event::GuildBan(added_ban), Event::GuildBan(removed_ban)) = (&added, &removed) else {
            panic!("expected ban records");
        };
        assert_eq!(added_ban.action, BanAction::Added);
        assert_eq!(removed_ban.action, BanAction::Removed);
        assert_eq!(added_ban.user, removed_ban.user);
        assert_eq!(removed.event_type(), EventType::GuildBanRemove);
    }

    #[test]
    fn non_object_payload() {
        let err = Event::decode(EventType::MessageDelete, json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::NotAnObject { .. })));

        let unknown = Event::decode_named("TYPING_START", json!(null)).unwrap();
        assert!(matches!(unknown, Event::Unknown(UnknownEvent { ref kind, .. }) if kind == "TYPING_START"));
    }

    #[test]
    fn application_command_fields_come_from_raw() {
        let event = Event::decode_named(
            "APPLICATION_COMMAND_UPDATE",
            json!({"id": "99", "name": "ping", "guild_id": "10"}),
        )
        .unwrap();

        let Event::ApplicationCommandUpdate(command) = event else {
            panic!("expected a command record");
        };
        assert_eq!(command.action, CommandAction::Updated);
        assert_eq!(command.name(), Some("ping"));
        assert_eq!(command.id(), Some(Snowflake::new(99)));
        assert_eq!(command.guild_id(), Some(GuildId::new(10)));
    }

    #[test]
    fn role_events_inject_guild_id() {
        let event = Event::decode_named(
            "GUILD_ROLE_CREATE",
            json!({"guild_id": "10", "role": {"id": "20", "name": "mods"}}),
        )
        .unwrap();

        let Event::GuildRoleCreate(created) = event else {
            panic!("expected a role record");
        };
        assert_eq!(created.role.guild_id, GuildId::new(10));
    }

    #[test]
    fn emojis_update_injects_guild_id() {
        let event = Event::decode_named(
            "GUILD_EMOJIS_UPDATE",
            json!({"guild_id": "10", "emojis": [{"id": "40", "name": "party"}]}),
        )
        .unwrap();

        let Event::GuildEmojisUpdate(update) = event else {
            panic!("expected an emojis record");
        };
        assert_eq!(update.emojis[0].guild_id, GuildId::new(10));
    }

    #[test]
    fn entity_payload_errors_are_entity_errors() {
        let err = Event::decode_named("CHANNEL_CREATE", json!({"id": "2"})).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::Entity { .. })));
    }
}
