use std::error::Error as StdError;
use std::fmt;

use crate::json::JsonError;
use crate::model::{DecodeError, FormatError, ModelError};

/// The common result type between most library functions.
///
/// The library exposes functions which, for a result type, exposes only one type, rather than the
/// usual 2 (`Result<T, Error>`). This is because all functions that return a result return this
/// crate's [`Error`], so this is implied, and a "simpler" result is used.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A common error enum returned by most of the library's functionality within a custom
/// [`Result`].
///
/// Decoding a gateway payload can fail in two ways: the payload may be missing a field or carry
/// one of the wrong shape ([`Error::Decode`]), or a field may be present but hold a value that
/// fails a format-specific parse, such as a timestamp ([`Error::Format`]).
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A payload could not be decoded into an event record.
    Decode(DecodeError),
    /// A payload field was present but failed to parse.
    Format(FormatError),
    /// An error from the `serde_json` crate.
    Json(JsonError),
    /// An error from the [`model`] module.
    ///
    /// [`model`]: crate::model
    Model(ModelError),
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Error {
        Error::Decode(e)
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Error {
        Error::Format(e)
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Error {
        Error::Json(e)
    }
}

impl From<ModelError> for Error {
    fn from(e: ModelError) -> Error {
        Error::Model(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(inner) => fmt::Display::fmt(&inner, f),
            Self::Format(inner) => fmt::Display::fmt(&inner, f),
            Self::Json(inner) => fmt::Display::fmt(&inner, f),
            Self::Model(inner) => fmt::Display::fmt(&inner, f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Decode(inner) => Some(inner),
            Self::Format(inner) => Some(inner),
            Self::Json(inner) => Some(inner),
            Self::Model(inner) => Some(inner),
        }
    }
}
