//! Schema definitions for decoding.
//!
//! A [`Schema`] is an ordered list of [`SchemaProperty`] expectations built
//! through chained registration calls. Running it against a JSON object
//! evaluates every property independently and accumulates all failures
//! rather than stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use dragnet::{ExpectedType, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .property("sub-object.subUInt", ExpectedType::UInt)
//!     .property("sub-object.subInt", ExpectedType::Int)
//!     .property("sub-object.subString", ExpectedType::String);
//!
//! let props = schema
//!     .decode(&json!({
//!         "sub-object": {"subUInt": 1, "subInt": -1, "subString": "sub test string"}
//!     }))
//!     .unwrap();
//!
//! assert_eq!(props.required::<u64>("sub-object.subUInt").unwrap(), 1);
//! assert_eq!(props.required::<i64>("sub-object.subInt").unwrap(), -1);
//! ```

mod expected_type;
mod property;

pub use expected_type::{value_kind, ExpectedType, ExtractFailure};
pub use property::SchemaProperty;

use serde_json::Value;

use crate::decode::{Decoder, DecodingStrategy, SelfDecoding};
use crate::depth::DEFAULT_MAX_DEPTH;
use crate::engine;
use crate::error::DecodeError;
use crate::path::KeyPath;
use crate::properties::Properties;
use crate::ValidationResult;

/// An ordered set of property expectations driving one decoding run.
///
/// Declaration order does not change what is decoded, only the order in
/// which failure reasons are reported.
#[derive(Debug, Clone)]
pub struct Schema {
    properties: Vec<SchemaProperty>,
    max_depth: usize,
}

impl Schema {
    /// Creates a schema with no properties.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Adds a required property.
    pub fn property(self, key_path: impl Into<KeyPath>, expected_type: ExpectedType) -> Self {
        self.add_property(key_path, expected_type, false)
    }

    /// Adds an optional property.
    ///
    /// An absent or `null` value produces no entry and no error.
    pub fn optional(self, key_path: impl Into<KeyPath>, expected_type: ExpectedType) -> Self {
        self.add_property(key_path, expected_type, true)
    }

    /// Adds a property with no decoding strategy.
    pub fn add_property(
        self,
        key_path: impl Into<KeyPath>,
        expected_type: ExpectedType,
        optional: bool,
    ) -> Self {
        self.add(SchemaProperty::new(key_path, expected_type).optional(optional))
    }

    /// Adds a property decoded by `T`'s [`SelfDecoding`] implementation.
    ///
    /// For [`ExpectedType::Array`] properties every element is decoded as a `T`.
    ///
    /// ```rust
    /// use dragnet::{ExpectedType, Schema};
    /// use serde_json::json;
    ///
    /// let props = Schema::new()
    ///     .add_self_decoding::<String>("tags", ExpectedType::Array, false)
    ///     .decode(&json!({"tags": ["a", "b"]}))
    ///     .unwrap();
    ///
    /// assert_eq!(props.array_or_empty::<String>("tags"), vec!["a", "b"]);
    /// ```
    pub fn add_self_decoding<T: SelfDecoding>(
        self,
        key_path: impl Into<KeyPath>,
        expected_type: ExpectedType,
        optional: bool,
    ) -> Self {
        self.add(
            SchemaProperty::new(key_path, expected_type)
                .optional(optional)
                .with_strategy(DecodingStrategy::self_decoding::<T>()),
        )
    }

    /// Adds a property transformed by a custom [`Decoder`].
    ///
    /// For [`ExpectedType::Array`] properties the decoder runs per element.
    pub fn add_decoder<D: Decoder + 'static>(
        self,
        key_path: impl Into<KeyPath>,
        expected_type: ExpectedType,
        optional: bool,
        decoder: D,
    ) -> Self {
        self.add(
            SchemaProperty::new(key_path, expected_type)
                .optional(optional)
                .with_strategy(DecodingStrategy::decoder(decoder)),
        )
    }

    /// Adds a fully built property.
    pub fn add(mut self, property: SchemaProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Sets the maximum nesting depth of engine runs.
    ///
    /// Nested runs happen when decoding strategies decode with their own
    /// schemas. The default is 100. Exceeding the limit fails the run with a
    /// `max_depth_exceeded` error.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the declared properties in order.
    pub fn properties(&self) -> &[SchemaProperty] {
        &self.properties
    }

    /// Returns the number of declared properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no properties are declared.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Evaluates every property against `root`.
    ///
    /// Returns `Validation::Success` with the complete mapping, or
    /// `Validation::Failure` with every reason collected. A non-object root
    /// resolves every non-empty path to missing.
    pub fn validate(&self, root: &Value) -> ValidationResult<Properties> {
        engine::run(self, root)
    }

    /// Decodes a JSON object.
    ///
    /// Fails with [`DecodeError::Deserialization`] if `root` is not an
    /// object, otherwise with [`DecodeError::Validation`] carrying the
    /// newline-joined reasons of every failed property.
    pub fn decode(&self, root: &Value) -> Result<Properties, DecodeError> {
        if !root.is_object() {
            return Err(DecodeError::Deserialization(
                crate::json::NOT_AN_OBJECT.to_string(),
            ));
        }
        self.validate(root)
            .into_result()
            .map_err(DecodeError::Validation)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_records_properties_in_order() {
        let schema = Schema::new()
            .property("b", ExpectedType::Int)
            .optional("a", ExpectedType::String)
            .add_self_decoding::<String>("c", ExpectedType::Array, true);

        let paths: Vec<_> = schema
            .properties()
            .iter()
            .map(|p| p.key_path().as_str())
            .collect();
        assert_eq!(paths, vec!["b", "a", "c"]);

        assert!(!schema.properties()[0].is_optional());
        assert!(schema.properties()[1].is_optional());
        assert!(schema.properties()[2].strategy().is_some());
        assert_eq!(schema.properties()[2].expected_type(), ExpectedType::Array);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn test_default_max_depth() {
        assert_eq!(Schema::new().max_depth(), DEFAULT_MAX_DEPTH);
        assert_eq!(Schema::new().with_max_depth(3).max_depth(), 3);
    }

    #[test]
    fn test_decode_rejects_non_object_root() {
        let schema = Schema::new().property("a", ExpectedType::Int);

        for root in [json!([1]), json!("a"), json!(null), json!(3)] {
            let error = schema.decode(&root).unwrap_err();
            assert!(matches!(error, DecodeError::Deserialization(_)));
            assert_eq!(
                error.reason(),
                "JSON data deserialization failed because result was not of type: object"
            );
        }
    }

    #[test]
    fn test_empty_schema_accepts_any_object() {
        let props = Schema::new().decode(&json!({"x": 1})).unwrap();
        assert!(props.is_empty());
    }

    #[test]
    fn test_segment_key_path() {
        let schema = Schema::new().property(
            KeyPath::from_segments(["servers", "eu.west"]),
            ExpectedType::String,
        );
        let props = schema
            .decode(&json!({"servers": {"eu.west": "10.0.0.1"}}))
            .unwrap();
        assert_eq!(
            props.required::<String>("servers.eu.west").unwrap(),
            "10.0.0.1"
        );
    }
}
