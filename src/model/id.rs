//! A collection of newtypes defining type-strong IDs.

use std::fmt;
use std::str::FromStr;

use serde::de::{Error as DeError, Unexpected, Visitor};

use super::error::Error as ModelError;
use super::Timestamp;
use crate::internal::prelude::*;

macro_rules! id_u64 {
    ($($name:ident;)*) => {
        $(
            impl $name {
                /// Creates a new Id from a u64.
                #[inline]
                #[must_use]
                pub const fn new(id: u64) -> Self {
                    Self(id)
                }

                /// Retrieves the inner `u64` value.
                #[inline]
                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0
                }

                /// Retrieves the time that the Id was created at.
                #[must_use]
                pub fn created_at(&self) -> Timestamp {
                    Timestamp::from_snowflake(self.0)
                }
            }

            impl From<u64> for $name {
                fn from(id: u64) -> $name {
                    $name(id)
                }
            }

            impl From<$name> for u64 {
                fn from(id: $name) -> u64 {
                    id.0
                }
            }

            impl PartialEq<u64> for $name {
                fn eq(&self, u: &u64) -> bool {
                    self.0 == *u
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl FromStr for $name {
                type Err = ModelError;

                fn from_str(s: &str) -> StdResult<Self, Self::Err> {
                    s.parse().map(Self).map_err(|_| ModelError::InvalidSnowflake(s.to_owned()))
                }
            }

            impl Serialize for $name {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
                    serializer.collect_str(&self.0)
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
                    deserializer.deserialize_any(SnowflakeVisitor).map(Self)
                }
            }
        )*
    }
}

macro_rules! typed_id {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
            pub struct $name(u64);

            impl From<Snowflake> for $name {
                fn from(id: Snowflake) -> $name {
                    $name(id.0)
                }
            }

            impl From<$name> for Snowflake {
                fn from(id: $name) -> Snowflake {
                    Snowflake(id.0)
                }
            }

            impl PartialEq<Snowflake> for $name {
                fn eq(&self, other: &Snowflake) -> bool {
                    self.0 == other.0
                }
            }

            impl PartialEq<$name> for Snowflake {
                fn eq(&self, other: &$name) -> bool {
                    self.0 == other.0
                }
            }
        )*

        id_u64! { $($name;)* }
    }
}

/// A 64-bit identifier, unique across the platform.
///
/// The upper 42 bits encode the creation time in milliseconds since the platform epoch. On the
/// wire it is a decimal string, although plain integers are accepted too.
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Snowflake(u64);

id_u64! {
    Snowflake;
}

typed_id! {
    /// An identifier for an Application.
    ApplicationId;
    /// An identifier for a Channel
    ChannelId;
    /// An identifier for an Emoji
    EmojiId;
    /// An identifier for a Guild
    GuildId;
    /// An identifier for a Message
    MessageId;
    /// An identifier for a Role
    RoleId;
    /// An identifier for a User
    UserId;
}

struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a snowflake, as a numeric string or an integer")
    }

    fn visit_i64<E: DeError>(self, v: i64) -> StdResult<Self::Value, E> {
        u64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: DeError>(self, v: u64) -> StdResult<Self::Value, E> {
        Ok(v)
    }

    fn visit_str<E: DeError>(self, v: &str) -> StdResult<Self::Value, E> {
        v.parse().map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

impl UserId {
    /// The mention string of the user, e.g. `<@7>`.
    #[must_use]
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}

impl ChannelId {
    /// The mention string of the channel, e.g. `<#2>`.
    #[must_use]
    pub fn mention(self) -> String {
        format!("<#{}>", self.0)
    }
}

impl RoleId {
    /// The mention string of the role, e.g. `<@&20>`.
    #[must_use]
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{assert_json, from_value, json};

    #[test]
    fn serializes_as_string_and_reads_numbers() {
        assert_json(&GuildId::new(175928847299117063), json!("175928847299117063"));

        let id: ChannelId = from_value(json!(2)).unwrap();
        assert_eq!(id, ChannelId::new(2));
        assert!(from_value::<UserId>(json!("ferris")).is_err());
        assert!(from_value::<UserId>(json!(-1)).is_err());
    }

    #[test]
    fn typed_ids_compare_with_snowflakes() {
        let snowflake: Snowflake = "20".parse().unwrap();
        assert_eq!(RoleId::new(20), snowflake);
        assert_eq!(Snowflake::from(RoleId::new(20)), snowflake);
        assert_eq!(RoleId::from(snowflake).get(), 20);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let err = "abc".parse::<Snowflake>().unwrap_err();
        assert_eq!(err, ModelError::InvalidSnowflake("abc".to_owned()));
    }

    #[test]
    fn created_at() {
        let id = GuildId::new(175928847299117063);
        assert_eq!(id.created_at().to_string(), "2016-04-30T11:18:25.796Z");
        assert_eq!(UserId::new(7).mention(), "<@7>");
    }
}
