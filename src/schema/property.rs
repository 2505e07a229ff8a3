//! A single declared property expectation.

use crate::decode::DecodingStrategy;
use crate::path::KeyPath;

use super::ExpectedType;

/// One entry of a [`Schema`](super::Schema).
///
/// Immutable once built: a key path, the type expected there, whether the
/// value may be absent, and an optional decoding strategy.
#[derive(Debug, Clone)]
pub struct SchemaProperty {
    key_path: KeyPath,
    expected_type: ExpectedType,
    optional: bool,
    strategy: Option<DecodingStrategy>,
}

impl SchemaProperty {
    /// Creates a required property with no decoding strategy.
    pub fn new(key_path: impl Into<KeyPath>, expected_type: ExpectedType) -> Self {
        Self {
            key_path: key_path.into(),
            expected_type,
            optional: false,
            strategy: None,
        }
    }

    /// Marks the property as optional (or required again with `false`).
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Attaches a decoding strategy.
    pub fn with_strategy(mut self, strategy: DecodingStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Returns the key path, as declared.
    pub fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    /// Returns the type the resolved value must have.
    pub fn expected_type(&self) -> ExpectedType {
        self.expected_type
    }

    /// Returns true if an absent or `null` value is allowed.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns the decoding strategy, if one is attached.
    pub fn strategy(&self) -> Option<&DecodingStrategy> {
        self.strategy.as_ref()
    }
}
