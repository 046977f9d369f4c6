//! Models relating to channels and types within channels.

mod message;

pub use self::message::*;

use super::id::{ChannelId, GuildId, MessageId};
use super::user::User;
use super::Timestamp;
use crate::internal::prelude::*;

enum_number! {
    /// The type of a channel.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#channel-object-channel-types).
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum ChannelType {
        /// An indicator that the channel is a text guild channel.
        #[default]
        Text = 0,
        /// An indicator that the channel is a private channel.
        Private = 1,
        /// An indicator that the channel is a voice guild channel.
        Voice = 2,
        /// An indicator that the channel is a group DM.
        GroupDm = 3,
        /// An indicator that the channel is a channel category.
        Category = 4,
        /// An indicator that the channel is a `NewsChannel`.
        News = 5,
        /// An indicator that the channel is a news thread.
        NewsThread = 10,
        /// An indicator that the channel is a public thread.
        PublicThread = 11,
        /// An indicator that the channel is a private thread.
        PrivateThread = 12,
        /// An indicator that the channel is a stage channel.
        Stage = 13,
        /// An indicator that the channel is a forum channel.
        Forum = 15,
        _ => Unknown(u8),
    }
}

impl ChannelType {
    #[must_use]
    pub const fn name(&self) -> &str {
        match *self {
            Self::Private => "private",
            Self::Text => "text",
            Self::Voice => "voice",
            Self::GroupDm => "group_dm",
            Self::Category => "category",
            Self::News => "news",
            Self::NewsThread => "news_thread",
            Self::PublicThread => "public_thread",
            Self::PrivateThread => "private_thread",
            Self::Stage => "stage",
            Self::Forum => "forum",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// A channel, in a guild or between users.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#channel-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Channel {
    /// The unique Id of the channel.
    pub id: ChannelId,
    /// The type of the channel.
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// The Id of the guild the channel is located in. Absent for private channels.
    ///
    /// Channels nested in a guild payload receive the guild's Id when the guild is decoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// The position of the channel.
    #[serde(default)]
    pub position: Option<u16>,
    /// The name of the channel. Private channels have none.
    #[serde(default)]
    pub name: Option<String>,
    /// The channel's topic, if any.
    #[serde(default)]
    pub topic: Option<String>,
    /// Whether the channel is marked as NSFW.
    #[serde(default)]
    pub nsfw: bool,
    /// The Id of the last message sent in the channel.
    #[serde(default)]
    pub last_message_id: Option<MessageId>,
    /// The timestamp of the time a pin was most recently made.
    #[serde(default)]
    pub last_pin_timestamp: Option<Timestamp>,
    /// The Id of the category the channel is nested in, or the parent of a thread.
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
    /// The recipients of a private channel.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<User>,
}

impl Channel {
    /// Whether the channel is a private channel or a group DM.
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self.kind, ChannelType::Private | ChannelType::GroupDm)
    }

    /// The mention string of the channel, e.g. `<#2>`.
    #[must_use]
    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn unknown_channel_type_is_kept() {
        let channel: Channel = from_value(json!({"id": "2", "type": 99})).unwrap();

        assert_eq!(channel.kind, ChannelType::Unknown(99));
        assert_eq!(u8::from(channel.kind), 99);
        assert!(channel.guild_id.is_none());
    }

    #[test]
    fn private_channel() {
        let channel: Channel = from_value(json!({
            "id": "2",
            "type": 1,
            "recipients": [{"id": "7", "username": "ferris"}],
            "last_pin_timestamp": null,
        }))
        .unwrap();

        assert!(channel.is_private());
        assert_eq!(channel.recipients[0].name, "ferris");
        assert_eq!(channel.kind.name(), "private");
    }
}
