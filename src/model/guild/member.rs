use std::fmt;

use crate::internal::prelude::*;
use crate::model::id::{GuildId, RoleId};
use crate::model::user::User;
use crate::model::Timestamp;

/// Information about a member of a guild.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Member {
    /// The unique Id of the guild that the member is a part of.
    #[serde(default)]
    pub guild_id: GuildId,
    /// Attached User struct.
    pub user: User,
    /// The member's nickname, if present.
    ///
    /// Can't be longer than 32 characters.
    #[serde(default)]
    pub nick: Option<String>,
    /// Vector of Ids of [`Role`]s given to the member.
    ///
    /// [`Role`]: super::Role
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Timestamp representing the date when the member joined.
    #[serde(default)]
    pub joined_at: Option<Timestamp>,
    /// Indicator of whether the member can hear in voice channels.
    #[serde(default)]
    pub deaf: bool,
    /// Indicator of whether the member can speak in voice channels.
    #[serde(default)]
    pub mute: bool,
    /// Indicator that the member hasn't accepted the rules of the guild yet.
    #[serde(default)]
    pub pending: bool,
}

impl Member {
    /// Determines the member's nickname to display, falling back to the user's display name.
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or_else(|| self.user.display_name())
    }

    /// Returns the "tag" for the member, with the nickname taking the place of the username.
    #[must_use]
    pub fn distinct(&self) -> String {
        match self.user.discriminator {
            Some(discriminator) => format!("{}#{:04}", self.display_name(), discriminator),
            None => self.display_name().to_owned(),
        }
    }
}

impl fmt::Display for Member {
    /// Mentions the user so that they receive a notification.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.user, f)
    }
}

/// A partial amount of data for a member.
///
/// This is used in messages sent in a guild, where the author's user data is already present on
/// the message.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct PartialMember {
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default)]
    pub joined_at: Option<Timestamp>,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn display_name_prefers_nick() {
        let mut member: Member = from_value(json!({
            "guild_id": "10",
            "user": {"id": "7", "username": "ferris", "discriminator": "0001"},
            "roles": ["20"],
            "joined_at": "2021-03-04T05:06:07+00:00",
        }))
        .unwrap();

        assert_eq!(member.display_name(), "ferris");
        member.nick = Some("crab".to_owned());
        assert_eq!(member.display_name(), "crab");
        assert_eq!(member.distinct(), "crab#0001");
        assert_eq!(member.guild_id, GuildId::new(10));
    }
}
