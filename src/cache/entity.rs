use std::fmt;

use crate::model::prelude::*;

/// The kinds of entity a cache stores.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum EntityKind {
    Channel,
    Emoji,
    Guild,
    Member,
    Message,
    Role,
    User,
}

impl EntityKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Emoji => "emoji",
            Self::Guild => "guild",
            Self::Member => "member",
            Self::Message => "message",
            Self::Role => "role",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The key an entity is cached under: its kind together with its identifier.
///
/// Members are the one kind without an Id of their own, so they are keyed by guild and user.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum EntityKey {
    Channel(ChannelId),
    Emoji(EmojiId),
    Guild(GuildId),
    Member(GuildId, UserId),
    Message(MessageId),
    Role(RoleId),
    User(UserId),
}

impl EntityKey {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Channel(_) => EntityKind::Channel,
            Self::Emoji(_) => EntityKind::Emoji,
            Self::Guild(_) => EntityKind::Guild,
            Self::Member(..) => EntityKind::Member,
            Self::Message(_) => EntityKind::Message,
            Self::Role(_) => EntityKind::Role,
            Self::User(_) => EntityKind::User,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(id) => write!(f, "channel {id}"),
            Self::Emoji(id) => write!(f, "emoji {id}"),
            Self::Guild(id) => write!(f, "guild {id}"),
            Self::Member(guild_id, user_id) => write!(f, "member {user_id} of guild {guild_id}"),
            Self::Message(id) => write!(f, "message {id}"),
            Self::Role(id) => write!(f, "role {id}"),
            Self::User(id) => write!(f, "user {id}"),
        }
    }
}

/// A snapshot of one entity, as handed to [`CacheSink::upsert`].
///
/// [`CacheSink::upsert`]: super::CacheSink::upsert
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Entity {
    Channel(Channel),
    Emoji(Emoji),
    Guild(Guild),
    Member(Member),
    Message(Message),
    Role(Role),
    User(User),
}

impl Entity {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.key().kind()
    }

    /// The key the snapshot is stored under.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        match self {
            Self::Channel(channel) => EntityKey::Channel(channel.id),
            Self::Emoji(emoji) => EntityKey::Emoji(emoji.id),
            Self::Guild(guild) => EntityKey::Guild(guild.id),
            Self::Member(member) => EntityKey::Member(member.guild_id, member.user.id),
            Self::Message(message) => EntityKey::Message(message.id),
            Self::Role(role) => EntityKey::Role(role.id),
            Self::User(user) => EntityKey::User(user.id),
        }
    }
}

macro_rules! entity_conversions {
    ($($variant:ident($model:ty);)*) => {
        $(
            impl From<$model> for Entity {
                fn from(model: $model) -> Self {
                    Self::$variant(model)
                }
            }

            impl TryFrom<Entity> for $model {
                type Error = ModelError;

                fn try_from(entity: Entity) -> Result<Self, Self::Error> {
                    match entity {
                        Entity::$variant(model) => Ok(model),
                        other => Err(ModelError::EntityKindMismatch {
                            expected: EntityKind::$variant,
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

entity_conversions! {
    Channel(Channel);
    Emoji(Emoji);
    Guild(Guild);
    Member(Member);
    Message(Message);
    Role(Role);
    User(User);
}
