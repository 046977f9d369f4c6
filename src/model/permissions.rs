//! A set of permissions for a role.
//!
//! The gateway sends permissions as a decimal string, since the bitset no longer fits into the
//! integer range every JSON parser can represent. Bits this crate has no name for are kept as-is,
//! so a role read from a payload and written back yields the same string.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::de::Error as DeError;

use crate::internal::prelude::*;

bitflags::bitflags! {
    /// A set of permissions that can be assigned to [`Role`]s.
    ///
    /// [`Role`]: super::guild::Role
    #[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Permissions: u64 {
        /// Allows for the creation of invites.
        const CREATE_INVITE = 1 << 0;
        /// Allows for the kicking of guild members.
        const KICK_MEMBERS = 1 << 1;
        /// Allows the banning of guild members.
        const BAN_MEMBERS = 1 << 2;
        /// Allows all permissions, bypassing channel permission overwrites.
        const ADMINISTRATOR = 1 << 3;
        /// Allows management and editing of guild channels.
        const MANAGE_CHANNELS = 1 << 4;
        /// Allows management and editing of the guild.
        const MANAGE_GUILD = 1 << 5;
        /// Allows adding reactions to messages.
        const ADD_REACTIONS = 1 << 6;
        /// Allows viewing the guild's audit logs.
        const VIEW_AUDIT_LOG = 1 << 7;
        /// Allows reading messages in a guild channel.
        const VIEW_CHANNEL = 1 << 10;
        /// Allows sending messages in a guild channel.
        const SEND_MESSAGES = 1 << 11;
        /// Allows the deletion of other users' messages and pinning.
        const MANAGE_MESSAGES = 1 << 13;
        /// Allows mentioning `@everyone` and `@here`.
        const MENTION_EVERYONE = 1 << 17;
        /// Allows changing one's own nickname.
        const CHANGE_NICKNAME = 1 << 26;
        /// Allows changing the nicknames of other members.
        const MANAGE_NICKNAMES = 1 << 27;
        /// Allows management and editing of roles below the current user's highest role.
        const MANAGE_ROLES = 1 << 28;
        /// Allows management of webhooks.
        const MANAGE_WEBHOOKS = 1 << 29;
        /// Allows management of emojis and stickers.
        const MANAGE_GUILD_EXPRESSIONS = 1 << 30;
        /// Allows timing out members.
        const MODERATE_MEMBERS = 1 << 40;
    }
}

impl Permissions {
    /// Whether the set includes the [Administrator] permission.
    ///
    /// [Administrator]: Self::ADMINISTRATOR
    #[must_use]
    pub const fn administrator(self) -> bool {
        self.contains(Self::ADMINISTRATOR)
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let str_u64 = String::deserialize(deserializer)?;
        Ok(Permissions::from_bits_retain(str_u64.parse::<u64>().map_err(D::Error::custom)?))
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.collect_str(&self.bits())
    }
}

impl Display for Permissions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        f.write_str(&names.join(", "))
    }
}
