//! Decoding strategies.
//!
//! A property may carry a [`DecodingStrategy`] that turns its validated JSON
//! value into a richer application value. Two strategies exist:
//!
//! - [`DecodingStrategy::UseDecoder`]: an arbitrary [`Decoder`] object
//! - [`DecodingStrategy::UseSelfDecoding`]: the target type implements
//!   [`SelfDecoding`] and builds itself, usually by running its own
//!   [`Schema`](crate::Schema)
//!
//! Both are erased behind [`DynDecoder`] so schemas can hold heterogeneous
//! strategies. Their outputs come back as [`Decoded`] payloads.

mod array;

pub use array::{decode_array, decode_array_as};

use std::any::{self, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Number, Value};
use url::Url;

use crate::error::DecodeError;
use crate::properties::PropertyValue;
use crate::schema::{value_kind, ExpectedType};

/// An object that converts a JSON value into `Output`.
///
/// # Example
///
/// ```rust
/// use dragnet::{DecodeError, Decoder};
/// use serde_json::{json, Value};
///
/// struct Celsius;
///
/// impl Decoder for Celsius {
///     type Output = f64;
///
///     fn decode(&self, value: &Value) -> Result<f64, DecodeError> {
///         let kelvin = value
///             .as_f64()
///             .ok_or_else(|| DecodeError::custom("temperature must be a number"))?;
///         Ok(kelvin - 273.15)
///     }
/// }
///
/// assert_eq!(Celsius.decode(&json!(273.15)).unwrap(), 0.0);
/// ```
pub trait Decoder: Send + Sync {
    /// The value produced on success.
    type Output: Any + Send + Sync;

    /// Decodes a JSON value.
    fn decode(&self, value: &Value) -> Result<Self::Output, DecodeError>;

    /// Identifier used in array error messages.
    fn name(&self) -> String {
        short_type_name(any::type_name::<Self>())
    }
}

/// A type that knows how to build itself from a JSON value.
///
/// Implementations typically declare a [`Schema`](crate::Schema), decode the
/// value with it and read their fields from the resulting
/// [`Properties`](crate::Properties).
///
/// ```rust
/// use dragnet::{DecodeError, ExpectedType, Schema, SelfDecoding};
/// use serde_json::{json, Value};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl SelfDecoding for Point {
///     fn decode_self(value: &Value) -> Result<Self, DecodeError> {
///         let props = Schema::new()
///             .property("x", ExpectedType::Int)
///             .property("y", ExpectedType::Int)
///             .decode(value)?;
///         Ok(Point {
///             x: props.required("x")?,
///             y: props.required("y")?,
///         })
///     }
/// }
///
/// let point = Point::decode_self(&json!({"x": 1, "y": -2})).unwrap();
/// assert_eq!((point.x, point.y), (1, -2));
/// ```
pub trait SelfDecoding: Sized + Send + Sync + 'static {
    /// Builds `Self` from a JSON value.
    fn decode_self(value: &Value) -> Result<Self, DecodeError>;
}

/// Type-erased decoder used inside schemas.
///
/// Every [`Decoder`] implements this automatically.
pub trait DynDecoder: Send + Sync {
    /// Decodes a value into an erased payload.
    fn decode_dyn(&self, value: &Value) -> Result<Decoded, DecodeError>;

    /// Identifier used in array error messages.
    fn identifier(&self) -> String;
}

impl<D: Decoder> DynDecoder for D {
    fn decode_dyn(&self, value: &Value) -> Result<Decoded, DecodeError> {
        self.decode(value).map(Decoded::new)
    }

    fn identifier(&self) -> String {
        self.name()
    }
}

/// Adapts a [`SelfDecoding`] type to the [`Decoder`] interface.
pub struct SelfDecoder<T>(PhantomData<fn() -> T>);

impl<T> SelfDecoder<T> {
    /// Creates the adapter.
    pub fn new() -> Self {
        SelfDecoder(PhantomData)
    }
}

impl<T> Default for SelfDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SelfDecoding> Decoder for SelfDecoder<T> {
    type Output = T;

    fn decode(&self, value: &Value) -> Result<T, DecodeError> {
        T::decode_self(value)
    }

    fn name(&self) -> String {
        short_type_name(any::type_name::<T>())
    }
}

/// A [`Decoder`] backed by a closure.
///
/// Created with [`decoder_fn`].
pub struct FnDecoder<F, T> {
    name: String,
    f: F,
    _output: PhantomData<fn() -> T>,
}

/// Builds a named decoder from a closure.
///
/// ```rust
/// use dragnet::{decoder_fn, DecodeError, Decoder};
/// use serde_json::json;
///
/// let upper = decoder_fn("Uppercase", |value| {
///     value
///         .as_str()
///         .map(str::to_uppercase)
///         .ok_or_else(|| DecodeError::custom("expected text"))
/// });
///
/// assert_eq!(upper.decode(&json!("abc")).unwrap(), "ABC");
/// assert_eq!(upper.name(), "Uppercase");
/// ```
pub fn decoder_fn<F, T>(name: impl Into<String>, f: F) -> FnDecoder<F, T>
where
    F: Fn(&Value) -> Result<T, DecodeError> + Send + Sync,
    T: Any + Send + Sync,
{
    FnDecoder {
        name: name.into(),
        f,
        _output: PhantomData,
    }
}

impl<F, T> Decoder for FnDecoder<F, T>
where
    F: Fn(&Value) -> Result<T, DecodeError> + Send + Sync,
    T: Any + Send + Sync,
{
    type Output = T;

    fn decode(&self, value: &Value) -> Result<T, DecodeError> {
        (self.f)(value)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// How a property's validated value is turned into its final value.
#[derive(Clone)]
pub enum DecodingStrategy {
    /// Run a custom decoder object.
    UseDecoder(Arc<dyn DynDecoder>),
    /// Let the target type decode itself.
    UseSelfDecoding(Arc<dyn DynDecoder>),
}

impl DecodingStrategy {
    /// Wraps a decoder object.
    pub fn decoder<D: Decoder + 'static>(decoder: D) -> Self {
        DecodingStrategy::UseDecoder(Arc::new(decoder))
    }

    /// Uses `T`'s own [`SelfDecoding`] implementation.
    pub fn self_decoding<T: SelfDecoding>() -> Self {
        DecodingStrategy::UseSelfDecoding(Arc::new(SelfDecoder::<T>::new()))
    }

    /// Applies the strategy to one value.
    pub fn decode(&self, value: &Value) -> Result<Decoded, DecodeError> {
        match self {
            DecodingStrategy::UseDecoder(decoder) | DecodingStrategy::UseSelfDecoding(decoder) => {
                decoder.decode_dyn(value)
            }
        }
    }

    /// The parser name reported in array error blocks.
    pub fn identifier(&self) -> String {
        match self {
            DecodingStrategy::UseDecoder(decoder) | DecodingStrategy::UseSelfDecoding(decoder) => {
                decoder.identifier()
            }
        }
    }
}

impl fmt::Debug for DecodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodingStrategy::UseDecoder(_) => {
                f.debug_tuple("UseDecoder").field(&self.identifier()).finish()
            }
            DecodingStrategy::UseSelfDecoding(_) => f
                .debug_tuple("UseSelfDecoding")
                .field(&self.identifier())
                .finish(),
        }
    }
}

/// The output of a decoding strategy.
///
/// Holds an arbitrary `Send + Sync` value behind an `Arc`, so results can be
/// cloned cheaply. Recover the concrete type with [`Decoded::downcast_ref`].
#[derive(Clone)]
pub struct Decoded {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl Decoded {
    /// Wraps a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Returns the full type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrows the wrapped value as `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Takes the wrapped value as `T` if it is one and this is its only handle.
    pub fn into_inner<T: Any + Send + Sync>(self) -> Option<T> {
        let value = self.value.downcast::<T>().ok()?;
        Arc::try_unwrap(value).ok()
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        &*self.value
    }
}

impl fmt::Debug for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decoded<{}>", self.type_name)
    }
}

/// Strips module paths from a type name (`alloc::string::String` -> `String`).
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        match c {
            ':' => segment.clear(),
            '<' | '>' | ',' | ' ' | '&' | '[' | ']' | '(' | ')' | ';' => {
                out.push_str(&segment);
                segment.clear();
                out.push(c);
            }
            _ => segment.push(c),
        }
    }
    out.push_str(&segment);
    out
}

fn primitive_mismatch(expected: ExpectedType, value: &Value) -> DecodeError {
    DecodeError::custom(format!(
        "Value is of incorrect type, expected {} but found {}",
        expected,
        value_kind(value)
    ))
}

macro_rules! primitive_self_decoding {
    ($($ty:ty => $expected:expr, $variant:ident;)*) => {
        $(
            impl SelfDecoding for $ty {
                fn decode_self(value: &Value) -> Result<Self, DecodeError> {
                    match $expected.extract(value) {
                        Ok(PropertyValue::$variant(inner)) => Ok(inner),
                        _ => Err(primitive_mismatch($expected, value)),
                    }
                }
            }
        )*
    };
}

primitive_self_decoding! {
    String => ExpectedType::String, String;
    bool => ExpectedType::Bool, Bool;
    i64 => ExpectedType::Int, Int;
    u64 => ExpectedType::UInt, UInt;
    f64 => ExpectedType::Double, Double;
    Number => ExpectedType::Number, Number;
    Url => ExpectedType::Url, Url;
    Map<String, Value> => ExpectedType::Object, Object;
}

impl SelfDecoding for Value {
    fn decode_self(value: &Value) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Doubler;

    impl Decoder for Doubler {
        type Output = i64;

        fn decode(&self, value: &Value) -> Result<i64, DecodeError> {
            value
                .as_i64()
                .map(|n| n * 2)
                .ok_or_else(|| DecodeError::custom("not an integer"))
        }
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("alloc::vec::Vec<core::option::Option<my::Thing>>"),
            "Vec<Option<Thing>>"
        );
        assert_eq!(short_type_name("u64"), "u64");
    }

    #[test]
    fn test_default_decoder_name() {
        assert_eq!(Doubler.name(), "Doubler");
        assert_eq!(DecodingStrategy::decoder(Doubler).identifier(), "Doubler");
    }

    #[test]
    fn test_self_decoding_identifier() {
        assert_eq!(DecodingStrategy::self_decoding::<String>().identifier(), "String");
    }

    #[test]
    fn test_strategy_decode_wraps_output() {
        let decoded = DecodingStrategy::decoder(Doubler).decode(&json!(21)).unwrap();
        assert!(decoded.is::<i64>());
        assert_eq!(decoded.downcast_ref::<i64>(), Some(&42));
        assert_eq!(decoded.downcast_ref::<u64>(), None);
    }

    #[test]
    fn test_strategy_decode_propagates_failure() {
        let error = DecodingStrategy::decoder(Doubler)
            .decode(&json!("x"))
            .unwrap_err();
        assert_eq!(error.reason(), "not an integer");
    }

    #[test]
    fn test_primitive_self_decoding() {
        assert_eq!(String::decode_self(&json!("a")).unwrap(), "a");
        assert_eq!(u64::decode_self(&json!(-1)).unwrap(), u64::MAX);
        assert!(bool::decode_self(&json!(1)).is_err());
        assert_eq!(
            Url::decode_self(&json!("https://example.com/")).unwrap().as_str(),
            "https://example.com/"
        );
        assert_eq!(Value::decode_self(&json!(null)).unwrap(), json!(null));
    }

    #[test]
    fn test_primitive_mismatch_message() {
        let error = i64::decode_self(&json!("seven")).unwrap_err();
        assert_eq!(
            error.reason(),
            "Value is of incorrect type, expected int but found string"
        );
    }

    #[test]
    fn test_debug_formats() {
        let strategy = DecodingStrategy::self_decoding::<bool>();
        assert_eq!(format!("{:?}", strategy), "UseSelfDecoding(\"bool\")");

        let decoded = Decoded::new(5u8);
        assert_eq!(format!("{:?}", decoded), "Decoded<u8>");
    }
}
