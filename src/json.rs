//! Entry points from raw JSON text.
//!
//! These helpers parse bytes, strings or files into a `serde_json::Value`,
//! check the root kind, and hand the tree to a [`SelfDecoding`] type or a
//! [`Schema`]. Parsing failures and wrong roots surface as
//! [`DecodeError::Deserialization`].

use std::path::Path;

use serde_json::Value;

use crate::decode::{decode_array_as, SelfDecoding};
use crate::error::DecodeError;
use crate::properties::Properties;
use crate::schema::Schema;

pub(crate) const NOT_AN_OBJECT: &str =
    "JSON data deserialization failed because result was not of type: object";

const NOT_AN_ARRAY: &str =
    "JSON data deserialization failed because result was not of type: array";

/// Parses bytes and requires the root to be an object.
///
/// ```rust
/// use dragnet::{json, ErrorKind};
///
/// assert!(json::parse_object(br#"{"a": 1}"#).is_ok());
///
/// let error = json::parse_object(b"[1, 2]").unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::Deserialization);
///
/// let error = json::parse_object(b"{oops").unwrap_err();
/// assert!(error.reason().starts_with("JSON data serialization failed with error:"));
/// ```
pub fn parse_object(bytes: &[u8]) -> Result<Value, DecodeError> {
    let value = parse(bytes)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(DecodeError::Deserialization(NOT_AN_OBJECT.to_string()))
    }
}

/// Parses bytes and requires the root to be an array.
pub fn parse_array(bytes: &[u8]) -> Result<Value, DecodeError> {
    let value = parse(bytes)?;
    if value.is_array() {
        Ok(value)
    } else {
        Err(DecodeError::Deserialization(NOT_AN_ARRAY.to_string()))
    }
}

/// Decodes a `T` from JSON bytes whose root is an object.
pub fn decode_slice<T: SelfDecoding>(bytes: &[u8]) -> Result<T, DecodeError> {
    T::decode_self(&parse_object(bytes)?)
}

/// Decodes a `T` from a JSON string whose root is an object.
pub fn decode_str<T: SelfDecoding>(text: &str) -> Result<T, DecodeError> {
    decode_slice(text.as_bytes())
}

/// Decodes every element of a JSON array document as a `T`.
///
/// Element failures are reported with their index, as by
/// [`decode_array`](crate::decode_array).
pub fn decode_array_slice<T: SelfDecoding>(bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
    decode_array_as(&parse_array(bytes)?)
}

/// Reads a file and decodes a `T` from it.
pub fn decode_file<T: SelfDecoding>(path: impl AsRef<Path>) -> Result<T, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        DecodeError::Deserialization(format!(
            "JSON data could not be read from {}: {}",
            path.display(),
            e
        ))
    })?;
    decode_slice(&bytes)
}

impl Schema {
    /// Parses bytes and decodes them with this schema.
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Properties, DecodeError> {
        self.decode(&parse_object(bytes)?)
    }
}

fn parse(bytes: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(bytes).map_err(|e| {
        DecodeError::Deserialization(format!("JSON data serialization failed with error: {}", e))
    })
}
