//! Typed bindings for the events a chat platform pushes over its gateway connection, and a cache
//! of the entities those events carry.
//!
//! A dispatch payload arrives as an event name plus a JSON object. [`Event::decode`] turns it into
//! a typed record, such as a [`GuildBanEvent`] or a [`MessageDeleteEvent`], keeping the raw
//! payload next to the typed fields. Records that create, update or delete an entity also know
//! how to apply that change to a cache through [`Event::apply_cache_effect`].
//!
//! The [`Dispatcher`] ties the pieces together: it decodes payloads, hands them to your
//! [`EventHandler`], and applies each record's cache effect exactly once.
//!
//! ```rust,no_run
//! # #[cfg(feature = "client")]
//! # async fn run() -> Result<(), gateway_model::Error> {
//! use std::sync::Arc;
//!
//! use gateway_model::all::*;
//!
//! struct Handler;
//!
//! #[gateway_model::async_trait]
//! impl EventHandler for Handler {
//!     async fn guild_ban(&self, ctx: Context, ban: &GuildBanEvent) {
//!         if let Some(guild) = ban.guild(&*ctx.cache) {
//!             println!("{} was {:?} in {}", ban.user.tag(), ban.action, guild.name);
//!         }
//!     }
//! }
//!
//! let dispatcher = Dispatcher::builder().event_handler(Handler).build();
//! let payload = serde_json::json!({"guild_id": "10", "user": {"id": "7", "username": "ferris"}});
//! dispatcher.dispatch("GUILD_BAN_ADD", payload).await?;
//! #     Ok(())
//! # }
//! ```
//!
//! [`Event::decode`]: crate::model::event::Event::decode
//! [`Event::apply_cache_effect`]: crate::model::event::Event::apply_cache_effect
//! [`GuildBanEvent`]: crate::model::event::GuildBanEvent
//! [`MessageDeleteEvent`]: crate::model::event::MessageDeleteEvent
//! [`Dispatcher`]: crate::client::Dispatcher
//! [`EventHandler`]: crate::client::EventHandler
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    unused,
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::clone_on_ref_ptr,
    clippy::non_ascii_literal,
    clippy::fallible_impl_from,
    clippy::let_underscore_must_use,
    clippy::format_push_string,
    clippy::pedantic
)]
#![allow(
    // Allowed as they are too pedantic
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::unreadable_literal,
    clippy::cast_possible_wrap,
    clippy::wildcard_imports,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::doc_markdown,
    clippy::missing_panics_doc,
    clippy::doc_link_with_quotes
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[macro_use]
extern crate serde;

#[macro_use]
mod internal;

pub mod cache;
pub mod constants;
pub mod json;
pub mod model;
pub mod prelude;

#[cfg(feature = "client")]
pub mod client;

mod error;

pub use crate::error::{Error, Result};

/// Special module that re-exports most public items from this crate.
///
/// Useful, because you don't have to remember the full paths of items.
pub mod all {
    #[doc(no_inline)]
    pub use crate::cache::*;
    #[cfg(feature = "client")]
    #[doc(no_inline)]
    pub use crate::client::*;
    #[doc(no_inline)]
    pub use crate::constants::*;
    #[doc(no_inline)]
    pub use crate::{model::prelude::*, *};
}

// Re-exports of crates used internally which are already publically exposed.
#[cfg(feature = "client")]
pub use async_trait::async_trait;
