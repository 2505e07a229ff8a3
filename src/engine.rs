//! The validation and extraction engine.
//!
//! [`run`] evaluates each declared property of a [`Schema`] against a JSON
//! root, in declaration order:
//!
//! 1. resolve the key path (absent and `null` collapse to missing)
//! 2. missing: skip if optional, otherwise record a `required` failure
//! 3. check the value's kind against the expected type
//! 4. narrow it to its native representation (URLs are parsed here)
//! 5. apply the decoding strategy to the narrowed value, per element for
//!    arrays
//!
//! Failures never stop the run. Every reason is collected, and a run with
//! any failure yields no mapping at all.

use std::borrow::Cow;

use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, trace};

use crate::decode::{decode_array, DecodingStrategy};
use crate::depth::DepthGuard;
use crate::error::{PropertyError, PropertyErrors};
use crate::properties::{Properties, PropertyValue};
use crate::schema::{ExpectedType, ExtractFailure, Schema, SchemaProperty};
use crate::ValidationResult;

/// Runs `schema` against `root`.
pub(crate) fn run(schema: &Schema, root: &Value) -> ValidationResult<Properties> {
    let Some(guard) = DepthGuard::enter(schema.max_depth()) else {
        debug!(max_depth = schema.max_depth(), "maximum decoding depth exceeded");
        return Validation::Failure(PropertyErrors::single(
            PropertyError::new(
                "",
                format!("Maximum decoding depth of {} exceeded", schema.max_depth()),
            )
            .with_code("max_depth_exceeded"),
        ));
    };

    let mut errors = Vec::new();
    let mut properties = Properties::new();

    for property in schema.properties() {
        match evaluate(property, root) {
            Validation::Success(Some(value)) => {
                properties.insert(property.key_path().as_str(), value);
            }
            Validation::Success(None) => {}
            Validation::Failure(e) => errors.extend(e),
        }
    }

    match PropertyErrors::from_vec(errors) {
        None => {
            trace!(
                depth = guard.depth(),
                properties = properties.len(),
                "schema decoded"
            );
            Validation::Success(properties)
        }
        Some(errors) => {
            debug!(
                depth = guard.depth(),
                errors = errors.len(),
                "schema validation failed"
            );
            Validation::Failure(errors)
        }
    }
}

/// Evaluates one property.
///
/// `Success(None)` means an optional property produced no entry.
fn evaluate(property: &SchemaProperty, root: &Value) -> ValidationResult<Option<PropertyValue>> {
    let path = property.key_path().as_str();
    trace!(key_path = path, expected = %property.expected_type(), "evaluating property");

    let Some(value) = property.key_path().resolve(root) else {
        return if property.is_optional() {
            Validation::Success(None)
        } else {
            failure(PropertyError::missing(path))
        };
    };

    let extracted = match property.expected_type().extract(value) {
        Ok(extracted) => extracted,
        Err(ExtractFailure::IncorrectType) => return failure(PropertyError::incorrect_type(path)),
        Err(ExtractFailure::InvalidUrl) if property.is_optional() => {
            return Validation::Success(None)
        }
        Err(ExtractFailure::InvalidUrl) => return failure(PropertyError::invalid_url(path)),
    };

    match property.strategy() {
        None => Validation::Success(Some(extracted)),
        Some(strategy) => {
            let input = strategy_input(&extracted, value);
            apply_strategy(strategy, property.expected_type(), &input, path)
        }
    }
}

/// The JSON a strategy sees: numbers re-encoded after narrowing, anything
/// else as resolved.
fn strategy_input<'a>(extracted: &PropertyValue, resolved: &'a Value) -> Cow<'a, Value> {
    match extracted {
        PropertyValue::Int(n) => Cow::Owned(Value::from(*n)),
        PropertyValue::UInt(n) => Cow::Owned(Value::from(*n)),
        PropertyValue::Float(n) => Cow::Owned(Value::from(*n)),
        PropertyValue::Double(n) => Cow::Owned(Value::from(*n)),
        _ => Cow::Borrowed(resolved),
    }
}

fn apply_strategy(
    strategy: &DecodingStrategy,
    expected_type: ExpectedType,
    value: &Value,
    path: &str,
) -> ValidationResult<Option<PropertyValue>> {
    if expected_type == ExpectedType::Array {
        return match decode_array(value, strategy) {
            Validation::Success(items) => {
                Validation::Success(Some(PropertyValue::DecodedArray(items)))
            }
            Validation::Failure(errors) => Validation::Failure(errors.under(path)),
        };
    }

    match strategy.decode(value) {
        Ok(decoded) => Validation::Success(Some(PropertyValue::Decoded(decoded))),
        Err(e) => Validation::Failure(e.into_errors(path)),
    }
}

fn failure<T>(error: PropertyError) -> ValidationResult<T> {
    Validation::Failure(PropertyErrors::single(error))
}
