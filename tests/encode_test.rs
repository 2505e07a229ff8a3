//! Tests for encoding values back to JSON.

use dragnet::{Encodable, ExpectedType, ObjectEncoder, Schema};
use serde_json::json;
use url::Url;

#[test]
fn test_encoded_object_decodes_with_same_paths() {
    let homepage = Url::parse("https://example.org/").unwrap();
    let encoded = ObjectEncoder::new()
        .set("profile.name", "Ada")
        .set("profile.age", 36u64)
        .set("profile.homepage", &homepage)
        .set("tags", vec!["x".to_string(), "y".to_string()])
        .set_optional("profile.nickname", None::<String>)
        .finish();

    assert_eq!(
        encoded,
        json!({
            "profile": {"name": "Ada", "age": 36, "homepage": "https://example.org/"},
            "tags": ["x", "y"]
        })
    );

    let props = Schema::new()
        .property("profile.name", ExpectedType::String)
        .property("profile.age", ExpectedType::UInt)
        .property("profile.homepage", ExpectedType::Url)
        .add_self_decoding::<String>("tags", ExpectedType::Array, false)
        .optional("profile.nickname", ExpectedType::String)
        .decode(&encoded)
        .unwrap();

    assert_eq!(props.required::<Url>("profile.homepage").unwrap(), homepage);
    assert_eq!(props.array_or_empty::<String>("tags"), vec!["x", "y"]);
    assert!(!props.contains("profile.nickname"));
}

#[test]
fn test_option_encodes_null() {
    assert_eq!(Some(3i32).encode(), json!(3));
    assert_eq!(None::<i32>.encode(), json!(null));
}

#[test]
fn test_later_writes_win() {
    let value = ObjectEncoder::new()
        .set("a.b", 1i64)
        .set("a.b", 2i64)
        .set("a.c", true)
        .finish();
    assert_eq!(value, json!({"a": {"b": 2, "c": true}}));
}
