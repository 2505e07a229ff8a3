//! Key paths for locating values in nested JSON objects.
//!
//! This module provides [`KeyPath`], a dot-delimited sequence of object keys,
//! and the resolver that walks it through a [`serde_json::Value`] tree.

use std::fmt::{self, Display};

use serde_json::Value;

/// A path to a value inside nested JSON objects.
///
/// A key path is written as dot-separated segments (`"user.address.city"`).
/// Segments may contain any character except `.`; there is no escaping. For
/// keys that contain a literal dot, build the path from segments with
/// [`KeyPath::from_segments`].
///
/// The declared text of a path is kept as written and used as the key of the
/// decoded [`Properties`](crate::Properties) mapping.
///
/// # Example
///
/// ```rust
/// use dragnet::KeyPath;
/// use serde_json::json;
///
/// let path = KeyPath::parse("user.address.city");
/// let doc = json!({"user": {"address": {"city": "Oslo"}}});
///
/// assert_eq!(path.resolve(&doc), Some(&json!("Oslo")));
/// assert_eq!(path.to_string(), "user.address.city");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    declared: String,
    segments: Vec<String>,
}

impl KeyPath {
    /// Creates an empty path representing the root object.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dot-delimited key path.
    ///
    /// An empty string denotes the root object itself.
    pub fn parse(path: impl Into<String>) -> Self {
        let declared = path.into();
        let segments = if declared.is_empty() {
            Vec::new()
        } else {
            declared.split('.').map(str::to_string).collect()
        };
        Self { declared, segments }
    }

    /// Builds a path from explicit segments.
    ///
    /// Segments are taken literally, so a segment may contain `.`. The
    /// declared form is the segments joined with `.`.
    ///
    /// ```rust
    /// use dragnet::KeyPath;
    /// use serde_json::json;
    ///
    /// let path = KeyPath::from_segments(["hosts", "example.com"]);
    /// let doc = json!({"hosts": {"example.com": 443}});
    ///
    /// assert_eq!(path.resolve(&doc), Some(&json!(443)));
    /// assert_eq!(path.as_str(), "hosts.example.com");
    /// ```
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        Self {
            declared: segments.join("."),
            segments,
        }
    }

    /// Returns a new path with a segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self::from_segments(segments)
    }

    /// Returns the path as it was declared.
    pub fn as_str(&self) -> &str {
        &self.declared
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Locates the value this path points to inside `root`.
    ///
    /// Returns `None` (the missing sentinel) when a segment is absent, when
    /// an intermediate value is not an object, or when the final value is
    /// JSON `null`. Absent and `null` are deliberately indistinguishable here.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let found = self
            .segments
            .iter()
            .try_fold(root, |current, segment| current.as_object()?.get(segment))?;

        if found.is_null() {
            None
        } else {
            Some(found)
        }
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declared)
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        KeyPath::parse(path)
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        KeyPath::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_segments() {
        let path = KeyPath::parse("a.b.c");
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec!["a", "b", "c"]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.as_str(), "a.b.c");
    }

    #[test]
    fn test_empty_path_is_root() {
        let path = KeyPath::parse("");
        assert!(path.is_root());
        assert_eq!(path, KeyPath::root());

        let doc = json!({"a": 1});
        assert_eq!(path.resolve(&doc), Some(&doc));
    }

    #[test]
    fn test_resolve_three_levels() {
        let doc = json!({"a": {"b": {"c": "deep"}}});
        assert_eq!(KeyPath::parse("a.b.c").resolve(&doc), Some(&json!("deep")));
    }

    #[test]
    fn test_missing_intermediate_is_sentinel() {
        let doc = json!({"a": {"x": {"c": 1}}});
        assert_eq!(KeyPath::parse("a.b.c").resolve(&doc), None);
    }

    #[test]
    fn test_non_object_intermediate_is_sentinel() {
        let doc = json!({"a": {"b": [1, 2, 3]}});
        assert_eq!(KeyPath::parse("a.b.c").resolve(&doc), None);

        let doc = json!({"a": "string"});
        assert_eq!(KeyPath::parse("a.b").resolve(&doc), None);
    }

    #[test]
    fn test_null_equals_missing() {
        let doc = json!({"a": null});
        assert_eq!(KeyPath::parse("a").resolve(&doc), None);
        assert_eq!(KeyPath::parse("b").resolve(&doc), None);
    }

    #[test]
    fn test_segments_keep_literal_dots() {
        let path = KeyPath::from_segments(["config", "v1.2"]);
        let doc = json!({"config": {"v1.2": true}, "config.v1": {"2": false}});
        assert_eq!(path.resolve(&doc), Some(&json!(true)));
        assert_eq!(path.to_string(), "config.v1.2");
    }

    #[test]
    fn test_unicode_segments() {
        let doc = json!({"名前": {"姓": "山田"}});
        assert_eq!(KeyPath::parse("名前.姓").resolve(&doc), Some(&json!("山田")));
    }

    #[test]
    fn test_push_is_immutable() {
        let base = KeyPath::parse("user");
        let email = base.push("email");

        assert_eq!(base.as_str(), "user");
        assert_eq!(email.as_str(), "user.email");
    }
}
