//! Error types returned while decoding gateway payloads into models.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::event::EventType;
use super::timestamp::ParseError;
use crate::cache::EntityKind;
use crate::json::JsonError;

/// A payload could not be turned into an event record.
///
/// Every variant names the event kind that was being decoded, so a dispatcher can log which
/// event was dropped.
#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// The event payload was not a JSON object.
    NotAnObject {
        event: EventType,
    },
    /// A required field was absent from the payload.
    MissingField {
        event: EventType,
        field: &'static str,
    },
    /// A field was present, but its value did not have the expected shape.
    InvalidField {
        event: EventType,
        field: &'static str,
        source: JsonError,
    },
    /// The payload is a full entity snapshot, and the entity failed to decode.
    Entity {
        event: EventType,
        source: JsonError,
    },
}

impl DecodeError {
    /// The event kind whose payload failed to decode.
    #[must_use]
    pub fn event(&self) -> &EventType {
        match self {
            Self::NotAnObject {
                event,
            }
            | Self::MissingField {
                event, ..
            }
            | Self::InvalidField {
                event, ..
            }
            | Self::Entity {
                event, ..
            } => event,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NotAnObject {
                event,
            } => write!(f, "{event} payload is not an object"),
            Self::MissingField {
                event,
                field,
            } => write!(f, "{event} payload is missing field `{field}`"),
            Self::InvalidField {
                event,
                field,
                source,
            } => write!(f, "{event} payload has invalid field `{field}`: {source}"),
            Self::Entity {
                event,
                source,
            } => write!(f, "{event} payload is not a valid entity: {source}"),
        }
    }
}

impl StdError for DecodeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidField {
                source, ..
            }
            | Self::Entity {
                source, ..
            } => Some(source),
            Self::NotAnObject {
                ..
            }
            | Self::MissingField {
                ..
            } => None,
        }
    }
}

/// A payload field was present, but failed a format-specific parse.
#[derive(Debug)]
pub struct FormatError {
    pub event: EventType,
    pub field: &'static str,
    pub source: ParseError,
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} payload field `{}` is malformed: {}", self.event, self.field, self.source)
    }
}

impl StdError for FormatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

/// An error returned from the [`model`] module.
///
/// This is always wrapped within the library's [`Error::Model`] variant.
///
/// [`model`]: crate::model
/// [`Error::Model`]: crate::Error::Model
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A string could not be parsed as a [`Snowflake`].
    ///
    /// [`Snowflake`]: super::id::Snowflake
    InvalidSnowflake(String),
    /// An [`Entity`] was converted into a concrete model of a different kind.
    ///
    /// [`Entity`]: crate::cache::Entity
    EntityKindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Error::InvalidSnowflake(s) => write!(f, "Invalid snowflake: {s:?}."),
            Error::EntityKindMismatch {
                expected,
                found,
            } => write!(f, "Expected a {expected} entity, found a {found}."),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_field_names_event_and_field() {
        let err = DecodeError::MissingField {
            event: EventType::GuildBanAdd,
            field: "guild_id",
        };

        assert_eq!(err.to_string(), "GUILD_BAN_ADD payload is missing field `guild_id`");
        assert_eq!(err.event(), &EventType::GuildBanAdd);
    }

    #[test]
    fn format_error_keeps_parse_source() {
        let source = super::super::Timestamp::parse("yesterday").unwrap_err();
        let err = FormatError {
            event: EventType::ChannelPinsUpdate,
            field: "last_pin_timestamp",
            source,
        };

        assert!(err.to_string().starts_with("CHANNEL_PINS_UPDATE payload field `last_pin_timestamp`"));
        assert!(StdError::source(&err).is_some());
    }
}
