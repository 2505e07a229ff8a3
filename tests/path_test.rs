//! Tests for key path parsing and resolution.

use dragnet::KeyPath;
use serde_json::json;

#[test]
fn test_root_path() {
    let path = KeyPath::root();
    assert!(path.is_root());
    assert!(path.is_empty());
    assert_eq!(path.to_string(), "");
}

#[test]
fn test_parse_preserves_declared_text() {
    let path = KeyPath::parse("sub-object.subUInt");
    assert_eq!(path.as_str(), "sub-object.subUInt");
    assert_eq!(path.segments().collect::<Vec<_>>(), vec!["sub-object", "subUInt"]);
}

#[test]
fn test_resolve_nested() {
    let doc = json!({
        "body": {
            "data": {"items": [1, 2], "name": "n"}
        }
    });

    assert_eq!(
        KeyPath::parse("body.data.name").resolve(&doc),
        Some(&json!("n"))
    );
    assert_eq!(
        KeyPath::parse("body.data.items").resolve(&doc),
        Some(&json!([1, 2]))
    );
    assert_eq!(KeyPath::parse("body.data.items.0").resolve(&doc), None);
}

#[test]
fn test_resolve_against_non_object_root() {
    assert_eq!(KeyPath::parse("a").resolve(&json!([1])), None);
    assert_eq!(KeyPath::parse("a").resolve(&json!("a")), None);
}

#[test]
fn test_literal_dot_keys_need_segments() {
    let doc = json!({"v1.0": {"status": "ok"}});

    assert_eq!(KeyPath::parse("v1.0.status").resolve(&doc), None);
    assert_eq!(
        KeyPath::from_segments(["v1.0", "status"]).resolve(&doc),
        Some(&json!("ok"))
    );
}

#[test]
fn test_conversions() {
    let from_str: KeyPath = "a.b".into();
    let from_string: KeyPath = String::from("a.b").into();
    assert_eq!(from_str, from_string);
    assert_eq!(from_str, KeyPath::from_segments(["a", "b"]));
}
