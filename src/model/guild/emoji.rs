use std::fmt;

use crate::internal::prelude::*;
use crate::model::id::{EmojiId, GuildId, RoleId};

/// Represents a custom guild emoji, which can either be created using the API, or via an
/// integration. Emojis created using the API only work within the guild it was created in.
///
/// [Discord docs](https://discord.com/developers/docs/resources/emoji#emoji-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Emoji {
    /// The Id of the emoji.
    pub id: EmojiId,
    /// The name of the emoji. It must be at least 2 characters long and can only contain
    /// alphanumeric characters and underscores.
    pub name: String,
    /// Whether the emoji is animated.
    #[serde(default)]
    pub animated: bool,
    /// Whether the emoji can be used. This may be false when the guild loses boosts.
    #[serde(default = "default_true")]
    pub available: bool,
    /// Whether the emoji is managed via an integration service.
    #[serde(default)]
    pub managed: bool,
    /// Whether the emoji name needs to be surrounded by colons in order to be used by the
    /// client.
    #[serde(default)]
    pub require_colons: bool,
    /// A list of [`Role`]s that are allowed to use the emoji. If there are no roles specified,
    /// then usage is unrestricted.
    ///
    /// [`Role`]: super::Role
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// The Id of the guild the emoji belongs to, filled in from the surrounding payload.
    #[serde(default)]
    pub guild_id: GuildId,
}

fn default_true() -> bool {
    true
}

impl Emoji {
    /// Generates a URL to the emoji's image.
    #[inline]
    #[must_use]
    pub fn url(&self) -> String {
        let extension = if self.animated { "gif" } else { "png" };
        cdn!("/emojis/{}.{}", self.id, extension)
    }
}

impl fmt::Display for Emoji {
    /// Formats the emoji into a string that will cause Discord clients to render the emoji.
    ///
    /// This is in the format of either `<:NAME:EMOJI_ID>` for normal emojis, or
    /// `<a:NAME:EMOJI_ID>` for animated emojis.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.animated {
            f.write_str("<a:")?;
        } else {
            f.write_str("<:")?;
        }
        f.write_str(&self.name)?;
        f.write_str(":")?;
        fmt::Display::fmt(&self.id, f)?;
        f.write_str(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn renders_animated() {
        let emoji: Emoji =
            from_value(json!({"id": "40", "name": "party", "animated": true})).unwrap();

        assert_eq!(emoji.to_string(), "<a:party:40>");
        assert_eq!(emoji.url(), "https://cdn.discordapp.com/emojis/40.gif");
        assert!(emoji.available);
    }
}
