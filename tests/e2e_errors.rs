//! Error-path tests: malformed primitives abort the object decode, earlier
//! fields stay assigned, and errors carry the failing path.

use odata_model::directory::{DirectoryObject, DirectoryObjectFields, User};
use odata_model::{decode_into, Error, JsonParseNode, Model};
use pretty_assertions::assert_eq;

fn decode(payload: &[u8]) -> odata_model::Result<Box<dyn Model>> {
    odata_model::from_json(payload, DirectoryObject::create_from_discriminator_value)
}

fn malformed_parts(err: Error) -> (String, String, String) {
    match err {
        Error::MalformedValue { path, expected, got } => (path, expected, got),
        other => panic!("expected MalformedValue, got {other}"),
    }
}

// ============================================================================
// 1. Malformed primitives
// ============================================================================

#[test]
fn test_non_boolean_for_boolean_field() {
    let err = decode(br##"{"@odata.type":"#microsoft.graph.user","accountEnabled":"yes"}"##).unwrap_err();
    assert_eq!(
        malformed_parts(err),
        ("$.accountEnabled".to_string(), "boolean".to_string(), "string".to_string())
    );
}

#[test]
fn test_int32_overflow() {
    let err = decode(br##"{"@odata.type":"#microsoft.graph.user","signInCount":2147483648}"##).unwrap_err();
    let (path, expected, got) = malformed_parts(err);
    assert_eq!(path, "$.signInCount");
    assert_eq!(expected, "int32");
    assert!(got.starts_with("out-of-range"));
}

#[test]
fn test_bad_timestamp() {
    let err = decode(br##"{"@odata.type":"#microsoft.graph.user","deletedDateTime":"yesterday"}"##).unwrap_err();
    let (path, _, got) = malformed_parts(err);
    assert_eq!(path, "$.deletedDateTime");
    assert_eq!(got, "\"yesterday\"");
}

#[test]
fn test_error_path_in_nested_object() {
    let err = decode(
        br##"{"@odata.type":"#microsoft.graph.group","members":[{"id":"ok"},{"@odata.type":"#microsoft.graph.user","signInCount":"7"}]}"##,
    )
    .unwrap_err();
    let (path, expected, _) = malformed_parts(err);
    assert_eq!(path, "$.members[1].signInCount");
    assert_eq!(expected, "int32");
}

#[test]
fn test_scalar_where_collection_expected() {
    let err = decode(br##"{"@odata.type":"#microsoft.graph.user","businessPhones":"555"}"##).unwrap_err();
    let (_, expected, got) = malformed_parts(err);
    assert_eq!(expected, "array");
    assert_eq!(got, "string");
}

// ============================================================================
// 2. Partial state is not rolled back
// ============================================================================

#[test]
fn test_partial_state_is_kept() {
    let node: JsonParseNode = r#"{"id":"u1","accountEnabled":1,"displayName":"Ada"}"#.parse().unwrap();
    let mut user = User::new();
    assert!(decode_into(&mut user, &node).is_err());
    assert_eq!(user.id(), Some("u1"));
    assert_eq!(user.account_enabled(), None);
    assert_eq!(user.display_name(), None);
}

#[test]
fn test_change_tracking_resumes_after_failed_decode() {
    let node: JsonParseNode = r#"{"id":"u1","accountEnabled":1}"#.parse().unwrap();
    let mut user = User::new();
    assert!(decode_into(&mut user, &node).is_err());
    assert!(user.store().is_initialization_completed());

    user.set_display_name(Some("Ada")).unwrap();
    assert_eq!(user.store().changed_keys().collect::<Vec<_>>(), vec!["displayName"]);

    user.store_mut().set_return_only_changed_values(true);
    let text = String::from_utf8(odata_model::to_json(&user).unwrap()).unwrap();
    assert_eq!(text, r##"{"@odata.type":"#microsoft.graph.user","displayName":"Ada"}"##);
}

#[test]
fn test_null_document_leaves_tracking_on() {
    let node: JsonParseNode = "null".parse().unwrap();
    let mut user = User::new();
    assert!(decode_into(&mut user, &node).is_err());
    assert!(user.store().is_initialization_completed());
}

// ============================================================================
// 3. Document-level failures
// ============================================================================

#[test]
fn test_root_must_be_an_object() {
    let (path, expected, got) = malformed_parts(decode(b"[1,2]").unwrap_err());
    assert_eq!((path.as_str(), expected.as_str(), got.as_str()), ("$", "object", "array"));

    let (_, expected, got) = malformed_parts(decode(b"null").unwrap_err());
    assert_eq!((expected.as_str(), got.as_str()), ("object", "null"));
}

#[test]
fn test_invalid_json() {
    assert!(matches!(decode(b"{\"id\":"), Err(Error::Json(_))));
}

#[test]
fn test_non_finite_float_fails_encode() {
    let mut user = User::new();
    user.set_risk_score(Some(f64::INFINITY)).unwrap();
    assert!(matches!(odata_model::to_json(&user), Err(Error::SerializationError(_))));
}

#[test]
fn test_empty_key_is_a_store_fault() {
    let mut user = User::new();
    assert!(matches!(user.store_mut().set("", 1), Err(Error::StoreFault(_))));
}
