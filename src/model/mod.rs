//! Mappings of objects received from the gateway, with helper methods for ease of use.
//!
//! Entities ([`User`], [`Channel`], [`Guild`], ...) are plain data. Event records live in the
//! [`event`] module and are built from dispatch payloads by [`Event::decode`].
//!
//! [`User`]: user::User
//! [`Channel`]: channel::Channel
//! [`Guild`]: guild::Guild
//! [`Event::decode`]: event::Event::decode

mod utils;

pub mod channel;
pub mod event;
pub mod gateway;
pub mod guild;
pub mod id;
pub mod permissions;
pub mod prelude;
pub mod user;

mod error;
mod timestamp;

pub use self::error::{DecodeError, Error as ModelError, FormatError};
pub use self::permissions::Permissions;
pub use self::timestamp::{InvalidTimestamp, ParseError, Timestamp};
