//! Tests for decoding from raw JSON text.

use std::io::Write;

use dragnet::json::{decode_array_slice, decode_file, decode_slice, decode_str};
use dragnet::{DecodeError, ErrorKind, ExpectedType, Schema, SelfDecoding};
use serde_json::Value;

#[derive(Debug, PartialEq)]
struct Release {
    version: String,
    downloads: u64,
}

impl SelfDecoding for Release {
    fn decode_self(value: &Value) -> Result<Self, DecodeError> {
        let props = Schema::new()
            .property("version", ExpectedType::String)
            .property("stats.downloads", ExpectedType::UInt)
            .decode(value)?;
        Ok(Release {
            version: props.required("version")?,
            downloads: props.required("stats.downloads")?,
        })
    }
}

#[test]
fn test_decode_slice() {
    let release: Release =
        decode_slice(br#"{"version": "1.2.0", "stats": {"downloads": 10}}"#).unwrap();
    assert_eq!(
        release,
        Release {
            version: "1.2.0".to_string(),
            downloads: 10
        }
    );
}

#[test]
fn test_malformed_input_is_deserialization_error() {
    let error = decode_str::<Release>("{\"version\": ").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Deserialization);
    assert!(error
        .to_string()
        .starts_with("JSON data serialization failed with error:"));
}

#[test]
fn test_non_object_root() {
    let error = decode_str::<Release>("[1, 2, 3]").unwrap_err();
    assert_eq!(
        error,
        DecodeError::Deserialization(
            "JSON data deserialization failed because result was not of type: object".to_string()
        )
    );
}

#[test]
fn test_validation_failure_kind() {
    let error = decode_str::<Release>(r#"{"version": 1}"#).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(
        error.to_string(),
        "Value for key path [version] is of incorrect type\n\
         Required key path [stats.downloads] was missing or null"
    );
}

#[test]
fn test_decode_array_slice() {
    let releases: Vec<Release> = decode_array_slice(
        br#"[
            {"version": "1.0.0", "stats": {"downloads": 1}},
            {"version": "1.1.0", "stats": {"downloads": 2}}
        ]"#,
    )
    .unwrap();
    assert_eq!(releases.len(), 2);
    assert_eq!(releases[1].version, "1.1.0");

    let error = decode_array_slice::<Release>(br#"{"version": "1.0.0"}"#).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Deserialization);

    let error = decode_array_slice::<Release>(br#"[{"version": "1.0.0"}]"#).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Error parsing array object at index 0 with parser [Release]\n\
         Required key path [stats.downloads] was missing or null\n--"
    );
}

#[test]
fn test_decode_file() {
    let path = std::env::temp_dir().join(format!("dragnet-release-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(br#"{"version": "2.0.0", "stats": {"downloads": 5}}"#)
        .unwrap();
    drop(file);

    let release: Release = decode_file(&path).unwrap();
    assert_eq!(release.downloads, 5);

    std::fs::remove_file(&path).unwrap();
}
