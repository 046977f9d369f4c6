//! This module exports the JSON types the rest of the crate works with, along with the few
//! conversion helpers event decoding needs.

use serde::de::DeserializeOwned;
#[cfg(test)]
use serde::ser::Serialize;

use crate::Result;

pub type Value = serde_json::Value;

pub use serde_json::json;
pub use serde_json::Error as JsonError;

pub type JsonMap = serde_json::Map<String, Value>;

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_str(s)?)
}

pub(crate) fn from_value<T>(v: Value) -> std::result::Result<T, JsonError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(v)
}

#[cfg(test)]
pub(crate) fn to_value<T>(value: T) -> Result<Value>
where
    T: Serialize,
{
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
#[track_caller]
pub(crate) fn assert_json<T>(data: &T, json: crate::json::Value)
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    // test serialization
    let serialized = to_value(data).unwrap();
    assert!(
        serialized == json,
        "data->JSON serialization failed\nexpected: {json:?}\n     got: {serialized:?}"
    );

    // test deserialization
    let deserialized = from_value::<T>(json).unwrap();
    assert!(
        &deserialized == data,
        "JSON->data deserialization failed\nexpected: {data:?}\n     got: {deserialized:?}"
    );
}
