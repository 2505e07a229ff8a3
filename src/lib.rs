//! # Dragnet
//!
//! Schema-driven JSON decoding that collects ALL validation errors instead of
//! stopping at the first one.
//!
//! ## Overview
//!
//! A caller declares which key paths it expects in a JSON object, what type
//! each should hold, whether it may be absent, and optionally how to decode
//! it further. Running the [`Schema`] against a `serde_json::Value` yields
//! either a complete [`Properties`] mapping or one error listing every
//! problem found. Per-property failures are accumulated through stillwater's
//! `Validation` type.
//!
//! ## Core Types
//!
//! - [`KeyPath`]: Dot-delimited paths into nested objects (e.g., `user.address.city`)
//! - [`ExpectedType`]: The closed set of types a property can be declared as
//! - [`Schema`] / [`SchemaProperty`]: The declared expectations
//! - [`DecodingStrategy`]: Custom [`Decoder`]s or [`SelfDecoding`] types
//! - [`Properties`]: The decoded mapping, keyed by declared key path
//! - [`DecodeError`]: Deserialization or aggregated validation failure
//!
//! ## Example
//!
//! ```rust
//! use dragnet::{ExpectedType, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .property("user.name", ExpectedType::String)
//!     .property("user.age", ExpectedType::UInt)
//!     .optional("user.homepage", ExpectedType::Url);
//!
//! let props = schema
//!     .decode(&json!({"user": {"name": "Ada", "age": 36}}))
//!     .unwrap();
//! assert_eq!(props.required::<String>("user.name").unwrap(), "Ada");
//!
//! // Every failing property is reported
//! let error = schema.decode(&json!({"user": {"age": "old"}})).unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "Required key path [user.name] was missing or null\n\
//!      Value for key path [user.age] is of incorrect type"
//! );
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod json;
pub mod path;
pub mod properties;
pub mod schema;

mod depth;
mod engine;

pub use decode::{
    decode_array, decode_array_as, decoder_fn, Decoded, Decoder, DecodingStrategy, DynDecoder,
    FnDecoder, SelfDecoder, SelfDecoding,
};
pub use depth::DEFAULT_MAX_DEPTH;
pub use encode::{Encodable, ObjectEncoder};
pub use error::{DecodeError, ErrorKind, PropertyError, PropertyErrors};
pub use path::KeyPath;
pub use properties::{Properties, PropertyValue};
pub use schema::{ExpectedType, ExtractFailure, Schema, SchemaProperty};

/// Type alias for validation results using PropertyErrors
pub type ValidationResult<T> = stillwater::Validation<T, PropertyErrors>;
