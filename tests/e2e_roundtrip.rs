//! End-to-end round-trip tests: populate via setters → encode → decode →
//! compare observable values, and check the exact wire shape.

use chrono::{DateTime, NaiveDate, NaiveTime};
use odata_model::directory::{DirectoryObject, DirectoryObjectFields, Group, User};
use odata_model::{JsonConfig, Model};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Helpers
// ============================================================================

fn full_user() -> User {
    let mut manager = User::new();
    manager.set_id(Some("m-1")).unwrap();
    manager.set_display_name(Some("Grace")).unwrap();

    let mut user = User::new();
    user.set_id(Some("u-1")).unwrap();
    user.set_deleted_date_time(Some(DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z").unwrap())).unwrap();
    user.set_display_name(Some("Ada Lovelace")).unwrap();
    user.set_account_enabled(Some(true)).unwrap();
    user.set_business_phones(Some(vec!["+1 555 0100".into(), "+1 555 0101".into()])).unwrap();
    user.set_sign_in_count(Some(17)).unwrap();
    user.set_storage_used(Some(9_007_199_254_740_993)).unwrap();
    user.set_risk_score(Some(0.125)).unwrap();
    user.set_birthday(NaiveDate::from_ymd_opt(1815, 12, 10)).unwrap();
    user.set_preferred_wake_time(NaiveTime::from_hms_opt(6, 45, 0)).unwrap();
    user.set_photo(Some(vec![0xde, 0xad, 0xbe, 0xef])).unwrap();
    user.set_manager(Some(Box::new(manager))).unwrap();
    user
}

fn to_value(model: &dyn Model) -> serde_json::Value {
    serde_json::from_slice(&odata_model::to_json(model).unwrap()).unwrap()
}

// ============================================================================
// 1. Every field kind survives a round trip
// ============================================================================

#[test]
fn test_user_round_trip() {
    let user = full_user();
    let bytes = odata_model::to_json(&user).unwrap();
    let decoded: User = odata_model::from_json_as(&bytes, DirectoryObject::create_from_discriminator_value).unwrap();
    assert_eq!(decoded, user);

    assert_eq!(decoded.storage_used(), Some(9_007_199_254_740_993));
    assert_eq!(decoded.photo(), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
    assert_eq!(decoded.birthday(), NaiveDate::from_ymd_opt(1815, 12, 10));
    let manager = decoded.manager().unwrap().downcast_ref::<User>().unwrap();
    assert_eq!(manager.id(), Some("m-1"));
}

#[test]
fn test_user_wire_shape() {
    assert_eq!(
        to_value(&full_user()),
        json!({
            "@odata.type": "#microsoft.graph.user",
            "id": "u-1",
            "deletedDateTime": "2024-05-01T08:00:00Z",
            "displayName": "Ada Lovelace",
            "accountEnabled": true,
            "businessPhones": ["+1 555 0100", "+1 555 0101"],
            "signInCount": 17,
            "storageUsed": 9_007_199_254_740_993i64,
            "riskScore": 0.125,
            "birthday": "1815-12-10",
            "preferredWakeTime": "06:45:00",
            "photo": "3q2+7w==",
            "manager": {
                "@odata.type": "#microsoft.graph.user",
                "id": "m-1",
                "displayName": "Grace"
            }
        })
    );
}

#[test]
fn test_field_order_follows_tables() {
    let mut user = User::new();
    // Set in reverse declaration order; output order must not care.
    user.set_display_name(Some("Ada")).unwrap();
    user.set_id(Some("u-1")).unwrap();
    let text = String::from_utf8(odata_model::to_json(&user).unwrap()).unwrap();
    assert_eq!(text, r##"{"@odata.type":"#microsoft.graph.user","id":"u-1","displayName":"Ada"}"##);
}

#[test]
fn test_group_round_trip() {
    let mut member = User::new();
    member.set_id(Some("u-2")).unwrap();

    let mut group = Group::new();
    group.set_id(Some("g-1")).unwrap();
    group.set_display_name(Some("Engineers")).unwrap();
    group.set_mail_enabled(Some(false)).unwrap();
    group.set_group_types(Some(vec!["Unified".into()])).unwrap();
    group.set_created_date_time(Some(DateTime::parse_from_rfc3339("2023-01-02T03:04:05.678+02:00").unwrap())).unwrap();
    group.set_quota(Some(0.1)).unwrap();
    group.set_members(Some(vec![Box::new(member)])).unwrap();

    let bytes = odata_model::to_json(&group).unwrap();
    let decoded: Group = odata_model::from_json_as(&bytes, DirectoryObject::create_from_discriminator_value).unwrap();
    assert_eq!(decoded, group);
    assert_eq!(decoded.quota(), Some(0.1));

    let wire = to_value(&group);
    assert_eq!(wire["quota"], json!(0.1));
    assert_eq!(wire["createdDateTime"], json!("2023-01-02T03:04:05.678+02:00"));
}

// ============================================================================
// 2. Writer configuration
// ============================================================================

#[test]
fn test_write_nulls_covers_scalars_only() {
    let config = JsonConfig { write_nulls: true, ..JsonConfig::default() };
    let bytes = odata_model::to_json_with(&User::new(), &config).unwrap();
    let wire: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let object = wire.as_object().unwrap();

    assert_eq!(object["id"], json!(null));
    assert_eq!(object["photo"], json!(null));
    assert_eq!(object["signInCount"], json!(null));
    assert!(!object.contains_key("businessPhones"));
    assert!(!object.contains_key("manager"));
}

#[test]
fn test_pretty_output_decodes_identically() {
    let user = full_user();
    let config = JsonConfig { pretty: true, ..JsonConfig::default() };
    let pretty = odata_model::to_json_with(&user, &config).unwrap();
    assert!(pretty.contains(&b'\n'));

    let decoded: User = odata_model::from_json_as(&pretty, DirectoryObject::create_from_discriminator_value).unwrap();
    assert_eq!(decoded, user);
}

#[test]
fn test_to_writer_appends_newline() {
    let mut user = User::new();
    user.set_id(Some("u-1")).unwrap();
    let mut out = Vec::new();
    odata_model::to_writer(&user, &JsonConfig::default(), &mut out).unwrap();
    assert_eq!(out, b"{\"@odata.type\":\"#microsoft.graph.user\",\"id\":\"u-1\"}\n".to_vec());
}
