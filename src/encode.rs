//! Encoding typed values back to JSON.
//!
//! The mirror of decoding, without failure modes: [`Encodable`] turns a
//! value into a `serde_json::Value`, and [`ObjectEncoder`] places values at
//! key paths, creating intermediate objects as needed.

use serde_json::{Map, Number, Value};
use url::Url;

use crate::path::KeyPath;

/// A value that can be written as JSON.
pub trait Encodable {
    /// Converts `self` into a JSON value.
    fn encode(&self) -> Value;
}

macro_rules! encodable_via_from {
    ($($ty:ty),*) => {
        $(
            impl Encodable for $ty {
                fn encode(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )*
    };
}

encodable_via_from!(String, bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Number);

impl Encodable for str {
    fn encode(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Encodable for Url {
    fn encode(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

impl Encodable for Value {
    fn encode(&self) -> Value {
        self.clone()
    }
}

impl Encodable for Map<String, Value> {
    fn encode(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self) -> Value {
        Value::Array(self.iter().map(Encodable::encode).collect())
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self) -> Value {
        self.as_ref().map_or(Value::Null, Encodable::encode)
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode(&self) -> Value {
        (**self).encode()
    }
}

/// Builds a JSON object by key path.
///
/// Writing to `"a.b.c"` creates the objects `a` and `a.b` if needed. An
/// existing non-object value in the way is replaced by an object.
///
/// # Example
///
/// ```rust
/// use dragnet::ObjectEncoder;
/// use serde_json::json;
///
/// let value = ObjectEncoder::new()
///     .set("user.name", "Ada")
///     .set("user.age", 36u64)
///     .set_optional("user.nickname", None::<String>)
///     .finish();
///
/// assert_eq!(value, json!({"user": {"name": "Ada", "age": 36}}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectEncoder {
    root: Map<String, Value>,
}

impl ObjectEncoder {
    /// Creates an encoder with an empty root object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` at `key_path`.
    ///
    /// Writing to the root path merges an encoded object into the root;
    /// other values at the root are ignored.
    pub fn set(mut self, key_path: impl Into<KeyPath>, value: impl Encodable) -> Self {
        let key_path = key_path.into();
        let encoded = value.encode();

        let segments: Vec<&str> = key_path.segments().collect();
        if segments.is_empty() {
            if let Value::Object(map) = encoded {
                self.root.extend(map);
            }
        } else {
            insert_at(&mut self.root, &segments, encoded);
        }
        self
    }

    /// Writes `value` at `key_path` if it is `Some`; leaves the key absent
    /// otherwise.
    pub fn set_optional<T: Encodable>(self, key_path: impl Into<KeyPath>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(key_path, value),
            None => self,
        }
    }

    /// Returns the built object.
    pub fn finish(self) -> Value {
        Value::Object(self.root)
    }
}

fn insert_at(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.to_string(), value);
        }
        [first, rest @ ..] => {
            let slot = map
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = slot {
                insert_at(child, rest, value);
            } else {
                let mut child = Map::new();
                insert_at(&mut child, rest, value);
                *slot = Value::Object(child);
            }
        }
    }
}
