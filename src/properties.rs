//! Decoded property values.
//!
//! A successful engine run yields [`Properties`]: an ordered mapping from the
//! declared key path to a [`PropertyValue`]. The typed accessors
//! [`Properties::required`], [`Properties::optional`] and
//! [`Properties::array_or_empty`] pull native values back out.

use std::any::Any;

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use url::Url;

use crate::decode::Decoded;
use crate::error::{DecodeError, PropertyError, PropertyErrors};

/// One decoded property.
///
/// Primitive variants hold the narrowed value for the declared
/// [`ExpectedType`](crate::ExpectedType). [`PropertyValue::Decoded`] and
/// [`PropertyValue::DecodedArray`] hold the output of a decoding strategy.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    Number(Number),
    Bool(bool),
    Url(Url),
    Array(Vec<Value>),
    Object(Map<String, Value>),
    Decoded(Decoded),
    DecodedArray(Vec<Decoded>),
}

impl PropertyValue {
    /// Borrows the payload as `T`, if it is one.
    ///
    /// For primitive variants `T` is the native type (`String`, `i64`, `Url`,
    /// `Vec<Value>`, ...). For [`PropertyValue::Decoded`] it is the decoder's
    /// output type. [`PropertyValue::DecodedArray`] only downcasts to
    /// `Vec<Decoded>`; use [`PropertyValue::decoded_items`] for its elements.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Borrows every element of a decoded array as `T`.
    ///
    /// Returns `None` if this is not an array or any element is not a `T`.
    /// Raw JSON arrays are accepted when `T` is `Value`.
    pub fn decoded_items<T: Any>(&self) -> Option<Vec<&T>> {
        match self {
            PropertyValue::DecodedArray(items) => {
                items.iter().map(|item| item.downcast_ref::<T>()).collect()
            }
            PropertyValue::Array(items) => items
                .iter()
                .map(|item| (item as &dyn Any).downcast_ref::<T>())
                .collect(),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        match self {
            PropertyValue::String(v) => v,
            PropertyValue::Int(v) => v,
            PropertyValue::UInt(v) => v,
            PropertyValue::Float(v) => v,
            PropertyValue::Double(v) => v,
            PropertyValue::Number(v) => v,
            PropertyValue::Bool(v) => v,
            PropertyValue::Url(v) => v,
            PropertyValue::Array(v) => v,
            PropertyValue::Object(v) => v,
            PropertyValue::Decoded(v) => v.as_any(),
            PropertyValue::DecodedArray(v) => v,
        }
    }
}

/// The result of one successful engine run.
///
/// Keys are the key paths exactly as declared in the schema. An optional
/// property whose value was absent or `null` has no entry at all.
///
/// # Example
///
/// ```rust
/// use dragnet::{ExpectedType, Schema};
/// use serde_json::json;
///
/// let props = Schema::new()
///     .property("name", ExpectedType::String)
///     .optional("nickname", ExpectedType::String)
///     .decode(&json!({"name": "Ada"}))
///     .unwrap();
///
/// let name: String = props.required("name").unwrap();
/// assert_eq!(name, "Ada");
/// assert_eq!(props.optional::<String>("nickname"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: IndexMap<String, PropertyValue>,
}

impl Properties {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key_path: impl Into<String>, value: PropertyValue) {
        self.values.insert(key_path.into(), value);
    }

    /// Returns the raw value stored for a key path.
    pub fn get(&self, key_path: &str) -> Option<&PropertyValue> {
        self.values.get(key_path)
    }

    /// Returns true if the key path has an entry.
    pub fn contains(&self, key_path: &str) -> bool {
        self.values.contains_key(key_path)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over key paths in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the value at `key_path` as `T`.
    ///
    /// Fails with a validation error if the entry is absent or holds a
    /// different type.
    pub fn required<T: Any + Clone>(&self, key_path: &str) -> Result<T, DecodeError> {
        let value = self
            .get(key_path)
            .ok_or_else(|| single(PropertyError::missing(key_path)))?;

        value
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| single(PropertyError::incorrect_type(key_path)))
    }

    /// Returns the value at `key_path` as `T`, or `None` if it is absent or
    /// of another type.
    pub fn optional<T: Any + Clone>(&self, key_path: &str) -> Option<T> {
        self.get(key_path)?.downcast_ref::<T>().cloned()
    }

    /// Returns every element of the array at `key_path` as `T`.
    ///
    /// Fails like [`Properties::required`] if the entry is absent or any
    /// element is not a `T`.
    pub fn required_array<T: Any + Clone>(&self, key_path: &str) -> Result<Vec<T>, DecodeError> {
        let value = self
            .get(key_path)
            .ok_or_else(|| single(PropertyError::missing(key_path)))?;

        value
            .decoded_items::<T>()
            .map(|items| items.into_iter().cloned().collect())
            .ok_or_else(|| single(PropertyError::incorrect_type(key_path)))
    }

    /// Returns every element of the array at `key_path` as `T`, or an empty
    /// vector if the entry is absent or not an array of `T`.
    pub fn array_or_empty<T: Any + Clone>(&self, key_path: &str) -> Vec<T> {
        self.required_array(key_path).unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = indexmap::map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn single(error: PropertyError) -> DecodeError {
    DecodeError::Validation(PropertyErrors::single(error))
}
