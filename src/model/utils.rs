use serde::de::DeserializeOwned;

use super::error::{DecodeError, FormatError};
use super::event::EventType;
use super::Timestamp;
use crate::internal::prelude::*;

/// Typed access to the fields of one event payload.
///
/// Missing fields and fields holding `null` are treated alike: a required one is a
/// [`DecodeError::MissingField`], an optional one is `None`.
pub(crate) struct Fields<'a> {
    event: &'a EventType,
    map: &'a JsonMap,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(event: &'a EventType, map: &'a JsonMap) -> Self {
        Self {
            event,
            map,
        }
    }

    fn present(&self, field: &'static str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    pub(crate) fn required<T: DeserializeOwned>(&self, field: &'static str) -> Result<T, DecodeError> {
        let value = self.present(field).ok_or_else(|| DecodeError::MissingField {
            event: self.event.clone(),
            field,
        })?;

        self.parse(field, value)
    }

    pub(crate) fn optional<T: DeserializeOwned>(
        &self,
        field: &'static str,
    ) -> Result<Option<T>, DecodeError> {
        self.present(field).map(|value| self.parse(field, value)).transpose()
    }

    /// Reads an optional RFC 3339 timestamp. A string that fails to parse is a format error
    /// rather than a decode error.
    pub(crate) fn timestamp(&self, field: &'static str) -> Result<Option<Timestamp>> {
        let Some(raw) = self.optional::<String>(field)? else {
            return Ok(None);
        };

        Timestamp::parse(&raw).map(Some).map_err(|source| {
            Error::Format(FormatError {
                event: self.event.clone(),
                field,
                source,
            })
        })
    }

    fn parse<T: DeserializeOwned>(&self, field: &'static str, value: &Value) -> Result<T, DecodeError> {
        T::deserialize(value).map_err(|source| DecodeError::InvalidField {
            event: self.event.clone(),
            field,
            source,
        })
    }
}

/// Decodes a payload that is a whole entity snapshot.
pub(crate) fn entity<T: DeserializeOwned>(event: &EventType, raw: &JsonMap) -> Result<T, DecodeError> {
    T::deserialize(&Value::Object(raw.clone())).map_err(|source| DecodeError::Entity {
        event: event.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;
    use crate::model::id::GuildId;

    fn map(value: Value) -> JsonMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn null_is_absent() {
        let raw = map(json!({"guild_id": null, "channel_id": "2"}));
        let fields = Fields::new(&EventType::ChannelPinsUpdate, &raw);

        assert_eq!(fields.optional::<GuildId>("guild_id").unwrap(), None);
        assert!(matches!(
            fields.required::<GuildId>("guild_id"),
            Err(DecodeError::MissingField { field: "guild_id", .. })
        ));
        assert!(fields.timestamp("last_pin_timestamp").unwrap().is_none());
    }

    #[test]
    fn wrong_shape_is_invalid_field() {
        let raw = map(json!({"channel_id": {"nope": true}}));
        let fields = Fields::new(&EventType::ChannelPinsUpdate, &raw);

        assert!(matches!(
            fields.required::<GuildId>("channel_id"),
            Err(DecodeError::InvalidField { field: "channel_id", .. })
        ));
    }

    #[test]
    fn unparseable_timestamp_is_format_error() {
        let raw = map(json!({"last_pin_timestamp": "yesterday"}));
        let fields = Fields::new(&EventType::ChannelPinsUpdate, &raw);

        assert!(matches!(fields.timestamp("last_pin_timestamp"), Err(Error::Format(_))));
    }
}
