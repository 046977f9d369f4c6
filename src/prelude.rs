//! A set of exports which can be helpful to use.
//!
//! Note that the `GatewayModelError` re-export is equivalent to [`gateway_model::Error`],
//! although is re-exported as a separate name to remove likely ambiguity with other crate error
//! enums.
//!
//! # Examples
//!
//! Import all of the exports:
//!
//! ```rust
//! use gateway_model::prelude::*;
//! ```
//!
//! [`gateway_model::Error`]: crate::Error

pub use crate::cache::{CacheQuery, CacheSink, CacheStore, CacheUpdate};
#[cfg(feature = "client")]
pub use crate::client::{Context, Dispatcher, DispatchSettings, EventHandler, RawEventHandler};
pub use crate::error::Error as GatewayModelError;
pub use crate::model::{DecodeError, FormatError, ModelError};
