//! Models pertaining to the gateway.

use std::fmt;

use serde::de::Error as DeError;

use super::event::{Event, EventType};
use super::id::ApplicationId;
use crate::constants::OpCode;
use crate::internal::prelude::*;
use crate::json::JsonError;

/// The shard a session was opened on, read from the ready payload's `[id, total]` pair.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct ShardInfo {
    pub id: u32,
    pub total: u32,
}

impl ShardInfo {
    #[must_use]
    pub const fn new(id: u32, total: u32) -> Self {
        Self {
            id,
            total,
        }
    }
}

impl From<[u32; 2]> for ShardInfo {
    fn from([id, total]: [u32; 2]) -> Self {
        Self::new(id, total)
    }
}

impl From<ShardInfo> for [u32; 2] {
    fn from(info: ShardInfo) -> Self {
        [info.id, info.total]
    }
}

impl fmt::Display for ShardInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id, self.total)
    }
}

/// The application stub sent with the ready payload.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#ready-ready-event-fields).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct ApplicationInfo {
    pub id: ApplicationId,
    #[serde(default)]
    pub flags: Option<u64>,
}

/// A representation of the data retrieved from the gateway.
///
/// Only frames the gateway sends to a client are covered. Decoding a frame never sends or
/// schedules anything.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum GatewayEvent {
    Dispatch(u64, Event),
    Heartbeat(u64),
    Reconnect,
    /// Whether the session can be resumed.
    InvalidateSession(bool),
    /// The heartbeat interval, in milliseconds.
    Hello(u64),
    HeartbeatAck,
}

#[derive(Deserialize)]
struct Frame {
    op: OpCode,
    #[serde(default)]
    s: Option<u64>,
    #[serde(default)]
    t: Option<EventType>,
    #[serde(default)]
    d: Value,
}

#[derive(Deserialize)]
struct HelloData {
    heartbeat_interval: u64,
}

impl GatewayEvent {
    /// Decodes a gateway frame from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the frame is malformed or carries an opcode a client never
    /// receives. A dispatch frame whose payload fails to decode returns the error from
    /// [`Event::decode`].
    pub fn from_json(text: &str) -> Result<Self> {
        let frame: Frame = crate::json::from_str(text)?;
        Self::from_frame(frame)
    }

    /// Decodes an already-parsed gateway frame.
    ///
    /// # Errors
    ///
    /// See [`Self::from_json`].
    pub fn decode(value: Value) -> Result<Self> {
        let frame: Frame = serde_json::from_value(value)?;
        Self::from_frame(frame)
    }

    fn from_frame(frame: Frame) -> Result<Self> {
        Ok(match frame.op {
            OpCode::Dispatch => {
                let seq = frame.s.ok_or_else(|| JsonError::custom("expected gateway event sequence"))?;
                let kind = frame.t.ok_or_else(|| JsonError::custom("expected gateway event type"))?;

                GatewayEvent::Dispatch(seq, Event::decode(kind, frame.d)?)
            },
            OpCode::Heartbeat => {
                let seq = match frame.d {
                    Value::Null => frame.s.unwrap_or_default(),
                    d => serde_json::from_value(d)?,
                };

                GatewayEvent::Heartbeat(seq)
            },
            OpCode::Reconnect => GatewayEvent::Reconnect,
            OpCode::InvalidSession => {
                GatewayEvent::InvalidateSession(serde_json::from_value(frame.d)?)
            },
            OpCode::Hello => {
                let hello: HelloData = serde_json::from_value(frame.d)?;

                GatewayEvent::Hello(hello.heartbeat_interval)
            },
            OpCode::HeartbeatAck => GatewayEvent::HeartbeatAck,
            other => {
                return Err(JsonError::custom(format!("invalid opcode {}", u8::from(other))).into())
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;
    use crate::model::event::GuildIntegrationsUpdateEvent;
    use crate::model::id::GuildId;

    #[test]
    fn dispatch_frame() {
        let frame = json!({
            "op": 0,
            "s": 42,
            "t": "GUILD_INTEGRATIONS_UPDATE",
            "d": {"guild_id": "10"},
        });

        match GatewayEvent::decode(frame).unwrap() {
            GatewayEvent::Dispatch(
                42,
                Event::GuildIntegrationsUpdate(GuildIntegrationsUpdateEvent {
                    guild_id, ..
                }),
            ) => assert_eq!(guild_id, GuildId::new(10)),
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn control_frames() {
        let hello = GatewayEvent::from_json(r#"{"op":10,"d":{"heartbeat_interval":41250}}"#);
        assert!(matches!(hello.unwrap(), GatewayEvent::Hello(41250)));

        let invalid = GatewayEvent::from_json(r#"{"op":9,"d":false}"#);
        assert!(matches!(invalid.unwrap(), GatewayEvent::InvalidateSession(false)));

        let ack = GatewayEvent::from_json(r#"{"op":11}"#);
        assert!(matches!(ack.unwrap(), GatewayEvent::HeartbeatAck));

        assert!(GatewayEvent::from_json(r#"{"op":2,"d":{}}"#).is_err());
    }

    #[test]
    fn shard_info_from_pair() {
        let shard: ShardInfo = serde_json::from_value(json!([1, 4])).unwrap();
        assert_eq!(shard, ShardInfo::new(1, 4));
        assert_eq!(shard.to_string(), "1/4");
    }
}
