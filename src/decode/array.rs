//! Array decoding.
//!
//! Applies one [`DecodingStrategy`] to every element of a JSON array. A
//! failing element does not stop the others; each failure is reported as a
//! block naming its index and the parser used.

use std::any::{self, Any};

use serde_json::Value;
use stillwater::Validation;
use tracing::trace;

use crate::error::{DecodeError, PropertyError, PropertyErrors};
use crate::schema::value_kind;
use crate::ValidationResult;

use super::{short_type_name, Decoded, DecodingStrategy, SelfDecoding};

/// Decodes every element of `value` with `strategy`.
///
/// On success the decoded elements are returned in their original order.
/// Each failing element contributes one error block:
///
/// ```text
/// Error parsing array object at index {i} with parser [{parser}]
/// {reason}
/// --
/// ```
///
/// A non-array `value` fails with an `invalid_type` error.
///
/// # Example
///
/// ```rust
/// use dragnet::{decode_array, DecodingStrategy};
/// use serde_json::json;
///
/// let strategy = DecodingStrategy::self_decoding::<u64>();
///
/// let result = decode_array(&json!([1, 2, 3]), &strategy);
/// assert!(result.is_success());
///
/// let result = decode_array(&json!([1, "two", 3]), &strategy);
/// assert!(result.is_failure());
/// ```
pub fn decode_array(value: &Value, strategy: &DecodingStrategy) -> ValidationResult<Vec<Decoded>> {
    let Some(items) = value.as_array() else {
        return Validation::Failure(PropertyErrors::single(
            PropertyError::new(
                "",
                format!(
                    "Array decoding requires an array value but found {}",
                    value_kind(value)
                ),
            )
            .with_code("invalid_type"),
        ));
    };

    let mut decoded = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match strategy.decode(item) {
            Ok(value) => decoded.push(value),
            Err(e) => {
                let parser = strategy.identifier();
                trace!(index, parser = %parser, "array element failed to decode");
                errors.push(element_error(index, &parser, &e));
            }
        }
    }

    match PropertyErrors::from_vec(errors) {
        None => Validation::Success(decoded),
        Some(errors) => Validation::Failure(errors),
    }
}

/// Decodes a JSON array into a `Vec<T>` using `T`'s [`SelfDecoding`].
///
/// ```rust
/// use dragnet::decode_array_as;
/// use serde_json::json;
///
/// let names: Vec<String> = decode_array_as(&json!(["ann", "bo"])).unwrap();
/// assert_eq!(names, vec!["ann", "bo"]);
/// ```
pub fn decode_array_as<T: SelfDecoding>(value: &Value) -> Result<Vec<T>, DecodeError> {
    let strategy = DecodingStrategy::self_decoding::<T>();
    let decoded = decode_array(value, &strategy)
        .into_result()
        .map_err(DecodeError::Validation)?;

    take_all(decoded)
}

/// Unwraps every payload as a `T`, failing on the first one that is not.
fn take_all<T: Any + Send + Sync>(decoded: Vec<Decoded>) -> Result<Vec<T>, DecodeError> {
    decoded
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let found = item.type_name();
            item.into_inner::<T>().ok_or_else(|| {
                DecodeError::Validation(PropertyErrors::single(
                    PropertyError::new(
                        format!("[{}]", index),
                        format!(
                            "Array element at index {} could not be taken as {}, found {}",
                            index,
                            short_type_name(any::type_name::<T>()),
                            short_type_name(found)
                        ),
                    )
                    .with_code("array_element"),
                ))
            })
        })
        .collect()
}

fn element_error(index: usize, parser: &str, error: &DecodeError) -> PropertyError {
    PropertyError::new(
        format!("[{}]", index),
        format!(
            "Error parsing array object at index {} with parser [{}]\n{}\n--",
            index,
            parser,
            error.reason()
        ),
    )
    .with_code("array_element")
}
