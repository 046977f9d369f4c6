//! Models relating to guilds and types that it owns.

mod emoji;
mod member;
mod role;

pub use self::emoji::*;
pub use self::member::*;
pub use self::role::*;

use crate::internal::prelude::*;
use crate::model::channel::Channel;
use crate::model::id::{ChannelId, EmojiId, GuildId, RoleId, UserId};
use crate::model::Timestamp;

/// Information about a guild.
///
/// Channels, roles, emojis and members nested in the guild payload don't carry the guild's Id on
/// the wire; it is filled in when the guild is deserialized.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(remote = "Self")]
#[non_exhaustive]
pub struct Guild {
    /// The unique Id identifying the guild.
    ///
    /// This is equivalent to the Id of the default role (`@everyone`).
    pub id: GuildId,
    /// The name of the guild.
    pub name: String,
    /// The hash of the icon used by the guild.
    #[serde(default)]
    pub icon: Option<String>,
    /// The Id of the [`User`] who owns the guild.
    ///
    /// [`User`]: crate::model::user::User
    pub owner_id: UserId,
    /// Indicator of whether the guild is unavailable due to an outage.
    #[serde(default)]
    pub unavailable: bool,
    /// The number of members in the guild. Only sent on guild creation.
    #[serde(default)]
    pub member_count: Option<u64>,
    /// The time that the current user joined the guild. Only sent on guild creation.
    #[serde(default)]
    pub joined_at: Option<Timestamp>,
    /// The roles of the guild.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// All of the guild's custom emojis.
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    /// All voice and text channels contained within the guild. Only sent on guild creation.
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Users who are members of the guild. Only sent on guild creation, and possibly
    /// incomplete for large guilds.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Guild {
    /// Returns the formatted URL of the guild's icon, if one exists.
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        self.icon.as_ref().map(|icon| {
            let ext = if icon.starts_with("a_") { "gif" } else { "webp" };

            cdn!("/icons/{}/{}.{}", self.id, icon, ext)
        })
    }

    /// Finds a channel of the guild by Id.
    #[must_use]
    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|channel| channel.id == id)
    }

    /// Finds a role of the guild by Id.
    #[must_use]
    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// Finds a role of the guild by name.
    #[must_use]
    pub fn role_by_name(&self, role_name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.name == role_name)
    }

    /// Finds an emoji of the guild by Id.
    #[must_use]
    pub fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.emojis.iter().find(|emoji| emoji.id == id)
    }

    /// Finds a member of the guild by user Id.
    #[must_use]
    pub fn member(&self, user_id: UserId) -> Option<&Member> {
        self.members.iter().find(|member| member.user.id == user_id)
    }

    /// Whether the given user owns the guild.
    #[must_use]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    fn inject_guild_id(&mut self) {
        let guild_id = self.id;

        for channel in &mut self.channels {
            channel.guild_id = Some(guild_id);
        }
        for role in &mut self.roles {
            role.guild_id = guild_id;
        }
        for emoji in &mut self.emojis {
            emoji.guild_id = guild_id;
        }
        for member in &mut self.members {
            member.guild_id = guild_id;
        }
    }
}

impl<'de> Deserialize<'de> for Guild {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let mut guild = Self::deserialize(deserializer)?; // calls #[serde(remote)]-generated inherent method
        guild.inject_guild_id();
        Ok(guild)
    }
}

impl Serialize for Guild {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        Self::serialize(self, serializer) // calls #[serde(remote)]-generated inherent method
    }
}

/// Data for an unavailable guild.
///
/// The ready payload lists the current user's guilds this way, and a guild delete carries one.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#unavailable-guild-object).
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct UnavailableGuild {
    /// The Id of the [`Guild`] that may be unavailable.
    pub id: GuildId,
    /// Indicator of whether the guild is unavailable. When absent, the current user was removed
    /// from the guild rather than losing it to an outage.
    #[serde(default)]
    pub unavailable: bool,
}
