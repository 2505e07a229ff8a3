//! Decoding error types.
//!
//! This module provides [`PropertyError`] for a single failure reason,
//! [`PropertyErrors`] for accumulating reasons across properties, and
//! [`DecodeError`] which is what callers see from one decoding run.

use std::fmt::{self, Display};

use stillwater::prelude::*;

/// A single decoding failure reason.
///
/// `PropertyError` captures one line of an aggregated failure:
/// - **path**: The declared key path (or array position) the reason belongs to
/// - **message**: Human-readable reason, reproduced verbatim in the aggregate
/// - **code**: Machine-readable error code for programmatic handling
///
/// # Example
///
/// ```rust
/// use dragnet::PropertyError;
///
/// let error = PropertyError::missing("user.email");
///
/// assert_eq!(error.code, "required");
/// assert_eq!(error.message, "Required key path [user.email] was missing or null");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyError {
    /// The key path the reason is attributed to.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code (e.g., `required`).
    pub code: String,
}

impl PropertyError {
    /// Creates a new error with the given path and message.
    ///
    /// The error code defaults to "decoder". Use `with_code` to set
    /// a more specific code.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code: "decoder".to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Returns this error with its path re-rooted under `parent`.
    pub fn under(mut self, parent: &str) -> Self {
        self.path = if parent.is_empty() {
            self.path
        } else if self.path.is_empty() {
            parent.to_string()
        } else if self.path.starts_with('[') {
            format!("{}{}", parent, self.path)
        } else {
            format!("{}.{}", parent, self.path)
        };
        self
    }

    /// A required key path resolved to nothing.
    pub fn missing(path: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("Required key path [{}] was missing or null", path);
        Self::new(path, message).with_code("required")
    }

    /// A key path resolved to a value of the wrong JSON kind.
    pub fn incorrect_type(path: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("Value for key path [{}] is of incorrect type", path);
        Self::new(path, message).with_code("invalid_type")
    }

    /// A required `url` property held a string that is not a URL.
    pub fn invalid_url(path: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("Required key path [{}] could not be parsed to valid URL", path);
        Self::new(path, message).with_code("invalid_url")
    }
}

impl Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PropertyError {}

/// A non-empty collection of decoding failure reasons.
///
/// `PropertyErrors` wraps a `NonEmptyVec<PropertyError>` so a failed run always
/// carries at least one reason. It implements `Semigroup`, which is how the
/// engine folds per-property failures into one aggregate:
///
/// ```rust
/// use dragnet::{PropertyError, PropertyErrors};
/// use stillwater::prelude::*;
///
/// let errors = PropertyErrors::single(PropertyError::missing("name"))
///     .combine(PropertyErrors::single(PropertyError::incorrect_type("age")));
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(
///     errors.to_string(),
///     "Required key path [name] was missing or null\nValue for key path [age] is of incorrect type"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyErrors(NonEmptyVec<PropertyError>);

impl PropertyErrors {
    /// Creates a `PropertyErrors` containing a single error.
    pub fn single(error: PropertyError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `PropertyErrors` from a `NonEmptyVec` of errors.
    pub fn from_non_empty(errors: NonEmptyVec<PropertyError>) -> Self {
        Self(errors)
    }

    /// Creates a `PropertyErrors` from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<PropertyError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        Some(errors.fold(Self::single(first), |acc, e| acc.combine(Self::single(e))))
    }

    /// Re-roots every path under `parent`, leaving messages untouched.
    ///
    /// Field paths join with a dot, index paths append directly and empty
    /// paths become `parent`:
    ///
    /// ```rust
    /// use dragnet::{PropertyError, PropertyErrors};
    ///
    /// let errors = PropertyErrors::from_vec(vec![
    ///     PropertyError::new("street", "bad street"),
    ///     PropertyError::new("[2]", "bad element"),
    ///     PropertyError::new("", "bad value"),
    /// ])
    /// .unwrap()
    /// .under("address");
    ///
    /// let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
    /// assert_eq!(paths, vec!["address.street", "address[2]", "address"]);
    /// ```
    pub fn under(self, parent: &str) -> Self {
        let first = self.0.head().clone().under(parent);
        self.0.iter().skip(1).fold(Self::single(first), |acc, e| {
            acc.combine(Self::single(e.clone().under(parent)))
        })
    }

    /// Returns the number of reasons in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyError> {
        self.0.iter()
    }

    /// Returns all errors attributed to the given key path.
    pub fn at_path(&self, path: &str) -> Vec<&PropertyError> {
        self.0.iter().filter(|e| e.path == path).collect()
    }

    /// Returns all errors with the given error code.
    pub fn with_code(&self, code: &str) -> Vec<&PropertyError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &PropertyError {
        self.0.head()
    }

    /// Returns every message in accumulation order.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.message.as_str()).collect()
    }

    /// Converts this collection into a `Vec<PropertyError>`.
    pub fn into_vec(self) -> Vec<PropertyError> {
        self.0.into_vec()
    }
}

impl Semigroup for PropertyErrors {
    fn combine(self, other: Self) -> Self {
        PropertyErrors(self.0.combine(other.0))
    }
}

impl Display for PropertyErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for PropertyErrors {}

impl IntoIterator for PropertyErrors {
    type Item = PropertyError;
    type IntoIter = std::vec::IntoIter<PropertyError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

/// The two ways a decoding run can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be interpreted as the expected JSON root at all.
    Deserialization,
    /// One or more declared properties failed.
    Validation,
}

/// The error returned to callers of a decoding run.
///
/// A run fails either before any property is looked at
/// ([`DecodeError::Deserialization`]) or after every property has been
/// evaluated ([`DecodeError::Validation`]). `Display` renders the
/// newline-joined reason text in both cases.
///
/// Decoders and [`SelfDecoding`](crate::SelfDecoding) implementations return
/// this type too; the engine flattens their reasons into its own aggregate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Raw input was not JSON, or its root was not the expected kind.
    #[error("{0}")]
    Deserialization(String),

    /// Accumulated property failures.
    #[error("{0}")]
    Validation(PropertyErrors),
}

impl DecodeError {
    /// A single-reason validation failure, for use inside custom decoders.
    pub fn custom(message: impl Into<String>) -> Self {
        DecodeError::Validation(PropertyErrors::single(PropertyError::new("", message)))
    }

    /// Returns which kind of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Deserialization(_) => ErrorKind::Deserialization,
            DecodeError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Returns the human-readable, newline-joined failure reason.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Flattens this failure into reason lines.
    ///
    /// Validation failures keep their messages and have their paths
    /// re-rooted under `path`. A deserialization failure becomes one line
    /// attributed to `path`.
    pub fn into_errors(self, path: &str) -> PropertyErrors {
        match self {
            DecodeError::Validation(errors) => errors.under(path),
            DecodeError::Deserialization(message) => PropertyErrors::single(
                PropertyError::new(path, message).with_code("deserialization"),
            ),
        }
    }
}

impl From<PropertyErrors> for DecodeError {
    fn from(errors: PropertyErrors) -> Self {
        DecodeError::Validation(errors)
    }
}

// DecodeError is Send + Sync since it only holds owned strings
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DecodeError>();
    assert_sync::<DecodeError>();
};
