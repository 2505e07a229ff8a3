//! Expected types, the type validator and value extraction.
//!
//! Validation ([`ExpectedType::matches`]) and narrowing
//! ([`ExpectedType::extract`]) switch over the same closed set of tags and
//! live together here; a new tag needs both arms.

use std::fmt::{self, Display};

use serde_json::{Number, Value};
use url::Url;

use crate::properties::PropertyValue;

/// The type a property is declared to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedType {
    /// A JSON string.
    String,
    /// A number narrowed to `i64`.
    Int,
    /// A number narrowed to `u64`.
    UInt,
    /// A number narrowed to `f32`.
    Float,
    /// A number narrowed to `f64`.
    Double,
    /// A number kept as `serde_json::Number`.
    Number,
    /// A JSON boolean.
    Bool,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// A string that parses as an absolute URL.
    Url,
}

/// Why extraction did not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractFailure {
    /// The value's JSON kind does not match the expected type.
    IncorrectType,
    /// The value is a string but not a valid URL.
    InvalidUrl,
}

impl ExpectedType {
    /// Returns the lowercase name of this type.
    pub fn name(self) -> &'static str {
        match self {
            ExpectedType::String => "string",
            ExpectedType::Int => "int",
            ExpectedType::UInt => "uint",
            ExpectedType::Float => "float",
            ExpectedType::Double => "double",
            ExpectedType::Number => "number",
            ExpectedType::Bool => "bool",
            ExpectedType::Array => "array",
            ExpectedType::Object => "object",
            ExpectedType::Url => "url",
        }
    }

    /// Returns true for the numeric tags.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ExpectedType::Int
                | ExpectedType::UInt
                | ExpectedType::Float
                | ExpectedType::Double
                | ExpectedType::Number
        )
    }

    /// Checks whether a value's runtime shape matches this type.
    ///
    /// Any number matches every numeric tag; range and precision are not
    /// checked here. Booleans match only [`ExpectedType::Bool`], strings
    /// match [`ExpectedType::String`] and [`ExpectedType::Url`] (URL syntax is
    /// checked during extraction).
    ///
    /// ```rust
    /// use dragnet::ExpectedType;
    /// use serde_json::json;
    ///
    /// assert!(ExpectedType::UInt.matches(&json!(-1)));
    /// assert!(ExpectedType::Url.matches(&json!("not a url")));
    /// assert!(!ExpectedType::Int.matches(&json!(true)));
    /// ```
    pub fn matches(self, value: &Value) -> bool {
        match value {
            Value::Number(_) => self.is_numeric(),
            Value::Bool(_) => self == ExpectedType::Bool,
            Value::String(_) => matches!(self, ExpectedType::String | ExpectedType::Url),
            Value::Array(_) => self == ExpectedType::Array,
            Value::Object(_) => self == ExpectedType::Object,
            Value::Null => false,
        }
    }

    /// Narrows a value into its native representation.
    ///
    /// Numeric narrowing follows `as`-cast semantics: integers wrap
    /// (`-1` as `UInt` becomes `u64::MAX`) and fractional numbers truncate
    /// toward zero before wrapping.
    pub fn extract(self, value: &Value) -> Result<PropertyValue, ExtractFailure> {
        if !self.matches(value) {
            return Err(ExtractFailure::IncorrectType);
        }

        let extracted = match (self, value) {
            (ExpectedType::String, Value::String(s)) => PropertyValue::String(s.clone()),
            (ExpectedType::Url, Value::String(s)) => {
                PropertyValue::Url(Url::parse(s).map_err(|_| ExtractFailure::InvalidUrl)?)
            }
            (ExpectedType::Int, Value::Number(n)) => PropertyValue::Int(narrow_i64(n)),
            (ExpectedType::UInt, Value::Number(n)) => PropertyValue::UInt(narrow_u64(n)),
            (ExpectedType::Float, Value::Number(n)) => PropertyValue::Float(as_f64(n) as f32),
            (ExpectedType::Double, Value::Number(n)) => PropertyValue::Double(as_f64(n)),
            (ExpectedType::Number, Value::Number(n)) => PropertyValue::Number(n.clone()),
            (ExpectedType::Bool, Value::Bool(b)) => PropertyValue::Bool(*b),
            (ExpectedType::Array, Value::Array(items)) => PropertyValue::Array(items.clone()),
            (ExpectedType::Object, Value::Object(map)) => PropertyValue::Object(map.clone()),
            _ => return Err(ExtractFailure::IncorrectType),
        };

        Ok(extracted)
    }
}

impl Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or_default()
}

fn narrow_i64(n: &Number) -> i64 {
    n.as_i64()
        .or_else(|| n.as_u64().map(|u| u as i64))
        .unwrap_or_else(|| as_f64(n) as i64)
}

fn narrow_u64(n: &Number) -> u64 {
    n.as_u64()
        .or_else(|| n.as_i64().map(|i| i as u64))
        .unwrap_or_else(|| {
            let f = as_f64(n);
            if f < 0.0 {
                f as i64 as u64
            } else {
                f as u64
            }
        })
}

/// Returns the JSON kind name for a value.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
