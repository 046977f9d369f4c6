//! These prelude re-exports are a set of exports that are commonly used from within the library.
//!
//! These are not publicly re-exported to the end user, and must stay as a private module.

pub use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use crate::error::{Error, Result};
pub use crate::json::{JsonMap, Value};

pub type StdResult<T, E> = std::result::Result<T, E>;
