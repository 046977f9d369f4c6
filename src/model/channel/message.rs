//! Models relating to messages.

use crate::internal::prelude::*;
use crate::model::guild::PartialMember;
use crate::model::id::{ChannelId, GuildId, MessageId, RoleId, UserId};
use crate::model::user::User;
use crate::model::Timestamp;

/// A representation of a message over a guild's text channel, a group, or a private channel.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Message {
    /// The unique Id of the message. Can be used to calculate the creation date of the message.
    pub id: MessageId,
    /// The Id of the [`Channel`] that the message was sent to.
    ///
    /// [`Channel`]: super::Channel
    pub channel_id: ChannelId,
    /// The Id of the guild that the message was sent in. Absent for private messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// The user that sent the message.
    pub author: User,
    /// The content of the message.
    #[serde(default)]
    pub content: String,
    /// Initial message creation timestamp, calculated from its Id.
    pub timestamp: Timestamp,
    /// The timestamp of the last time the message was updated, if it was.
    #[serde(default)]
    pub edited_timestamp: Option<Timestamp>,
    /// Indicator of whether the command is to be played back via text-to-speech.
    ///
    /// In the client, this is done via the `/tts` slash command.
    #[serde(default)]
    pub tts: bool,
    /// Indicator of whether the message mentions everyone.
    #[serde(default)]
    pub mention_everyone: bool,
    /// Array of users mentioned in the message.
    #[serde(default)]
    pub mentions: Vec<User>,
    /// Array of [`Role`]s' Ids mentioned in the message.
    ///
    /// [`Role`]: crate::model::guild::Role
    #[serde(default)]
    pub mention_roles: Vec<RoleId>,
    /// Indicator of whether the message is pinned.
    #[serde(default)]
    pub pinned: bool,
    /// Indicator of the type of message this is, i.e. whether it is a regular message or a
    /// system message.
    #[serde(rename = "type", default)]
    pub kind: MessageType,
    /// The author's guild member data, for messages sent in a guild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<PartialMember>,
}

impl Message {
    /// Whether the message was sent outside of a guild.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.guild_id.is_none()
    }

    /// Checks whether the message mentions the user with the given Id.
    #[must_use]
    pub fn mentions_user_id(&self, id: impl Into<UserId>) -> bool {
        let id = id.into();
        self.mentions.iter().any(|mentioned_user| mentioned_user.id == id)
    }

    /// Returns the message's content with every user mention replaced by the mentioned user's
    /// name.
    #[must_use]
    pub fn content_safe(&self) -> String {
        let mut result = self.content.clone();

        for user in &self.mentions {
            let at_name = format!("@{}", user.display_name());
            result = result.replace(&format!("<@{}>", user.id), &at_name);
            result = result.replace(&format!("<@!{}>", user.id), &at_name);
        }

        result
    }
}

enum_number! {
    /// Differentiates between regular and system messages.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object-message-types).
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum MessageType {
        /// A regular message.
        #[default]
        Regular = 0,
        /// An indicator that a recipient was added by the author.
        GroupRecipientAddition = 1,
        /// An indicator that a recipient was removed by the author.
        GroupRecipientRemoval = 2,
        /// An indicator that a call was started by the author.
        GroupCallCreation = 3,
        /// An indicator that the group name was modified by the author.
        GroupNameUpdate = 4,
        /// An indicator that the group icon was modified by the author.
        GroupIconUpdate = 5,
        /// An indicator that a message was pinned by the author.
        PinsAdd = 6,
        /// An indicator that a member joined the guild.
        MemberJoin = 7,
        /// A message sent in reply to another.
        InlineReply = 19,
        /// A message created by an application command.
        ChatInputCommand = 20,
        _ => Unknown(u8),
    }
}
