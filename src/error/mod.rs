//! Error types for decoding failures.
//!
//! This module provides types for representing decoding errors: single
//! reason lines, non-empty accumulations of them, and the caller-facing
//! [`DecodeError`] that tags a failure as deserialization or validation.

mod decode_error;

pub use decode_error::{DecodeError, ErrorKind, PropertyError, PropertyErrors};
