//! User information-related models.

use std::fmt;
use std::num::NonZeroU16;

use super::id::UserId;
use super::Timestamp;
use crate::internal::prelude::*;

/// Information about a user.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct User {
    /// The unique Id of the user. Can be used to calculate the account's creation date.
    pub id: UserId,
    /// The account's username.
    #[serde(rename = "username")]
    pub name: String,
    /// The account's discriminator to differentiate the user from others with the same
    /// [`Self::name`]. Users that migrated to unique usernames have none, which the gateway
    /// sends as `"0"`.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "discriminator")]
    pub discriminator: Option<NonZeroU16>,
    /// The account's display name, if set.
    #[serde(default)]
    pub global_name: Option<String>,
    /// Optional avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Indicator of whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
    /// Whether the user is an official system user.
    #[serde(default, skip_serializing_if = "is_false")]
    pub system: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl User {
    /// Creates a user with only the required fields set.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            discriminator: None,
            global_name: None,
            avatar: None,
            bot: false,
            system: false,
        }
    }

    /// Returns the formatted URL of the user's icon, if one exists.
    ///
    /// This will produce a WEBP image URL, or GIF if the user has a GIF avatar.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_ref().map(|hash| {
            let ext = if hash.starts_with("a_") { "gif" } else { "webp" };

            cdn!("/avatars/{}/{}.{}?size=1024", self.id, hash, ext)
        })
    }

    /// Retrieves the time that this user was created at.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.id.created_at()
    }

    /// Returns the "tag" for the user.
    ///
    /// The "tag" is defined as "username#discriminator", such as "zeyla#5479". Users without a
    /// discriminator are tagged by their username alone.
    #[must_use]
    pub fn tag(&self) -> String {
        match self.discriminator {
            Some(discriminator) => format!("{}#{:04}", self.name, discriminator),
            None => self.name.clone(),
        }
    }

    /// The display name of the user: the global name if set, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.name)
    }

    /// The mention string of the user, e.g. `<@7>`.
    #[must_use]
    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

impl fmt::Display for User {
    /// Formats a string which will mention the user.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mention())
    }
}

mod discriminator {
    use std::fmt;
    use std::num::NonZeroU16;

    use serde::de::{Error as DeError, Visitor};

    use crate::internal::prelude::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> StdResult<Option<NonZeroU16>, D::Error> {
        deserializer.deserialize_any(DiscriminatorVisitor)
    }

    #[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(
        value: &Option<NonZeroU16>,
        serializer: S,
    ) -> StdResult<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.collect_str(&format_args!("{value:04}")),
            None => serializer.serialize_none(),
        }
    }

    struct DiscriminatorVisitor;

    impl<'de> Visitor<'de> for DiscriminatorVisitor {
        type Value = Option<NonZeroU16>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a discriminator, as a numeric string or an integer")
        }

        fn visit_none<E: DeError>(self) -> StdResult<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: DeError>(self) -> StdResult<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E: DeError>(self, v: u64) -> StdResult<Self::Value, E> {
            u16::try_from(v).map(NonZeroU16::new).map_err(E::custom)
        }

        fn visit_str<E: DeError>(self, v: &str) -> StdResult<Self::Value, E> {
            v.parse::<u16>().map(NonZeroU16::new).map_err(E::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{assert_json, from_value, json};

    #[test]
    fn tag_pads_discriminator() {
        let user: User = from_value(json!({
            "id": "7",
            "username": "ferris",
            "discriminator": "0042",
        }))
        .unwrap();

        assert_eq!(user.tag(), "ferris#0042");
        assert_eq!(user.mention(), "<@7>");
    }

    #[test]
    fn zero_discriminator_is_none() {
        let user: User = from_value(json!({
            "id": "7",
            "username": "ferris",
            "global_name": "Ferris",
            "discriminator": "0",
        }))
        .unwrap();

        assert_eq!(user.discriminator, None);
        assert_eq!(user.tag(), "ferris");
        assert_eq!(user.display_name(), "Ferris");
    }

    #[test]
    fn user_serde() {
        let mut user = User::new(UserId::new(7), "ferris");
        user.avatar = Some("a_f00".to_owned());

        assert_json(
            &user,
            json!({"id": "7", "username": "ferris", "global_name": null, "avatar": "a_f00", "bot": false}),
        );
        assert_eq!(
            user.avatar_url().unwrap(),
            "https://cdn.discordapp.com/avatars/7/a_f00.gif?size=1024"
        );
    }
}
