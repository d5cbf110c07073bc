//! End-to-end wire scenarios for tri-state PATCH fields.
//!
//! Drives a two-field request body through decode, validation extraction,
//! merge, and re-encode, checking the exact bytes the three field states
//! produce on the way back out.
#![allow(clippy::expect_used)]

use patchfield::{Patch, extract_values};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct UserPatch {
    #[serde(default, skip_serializing_if = "Patch::is_undefined")]
    name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_undefined")]
    email: Patch<String>,
}

fn decode(json: &str) -> UserPatch {
    serde_json::from_str(json).expect("decode")
}

fn encode(patch: &UserPatch) -> String {
    serde_json::to_string(patch).expect("encode")
}

/// Engine-side stand-in for a not-null constraint on the contained type.
fn not_null_violated(field: &Patch<String>) -> bool {
    let mut violated = false;
    extract_values(Some(field), &mut |v: Option<&String>| {
        violated = v.is_none();
    });
    violated
}

#[test]
fn both_fields_with_values() {
    let p = decode(r#"{"name":"John","email":"john@example.com"}"#);
    assert_eq!(p.name, Patch::value("John".to_owned()));
    assert_eq!(p.email, Patch::value("john@example.com".to_owned()));
    assert!(!not_null_violated(&p.email));
}

#[test]
fn explicit_null_survives_a_round_trip() {
    let p = decode(r#"{"name":"John","email":null}"#);
    assert_eq!(p.name, Patch::value("John".to_owned()));
    assert_eq!(p.email, Patch::null());
    assert_eq!(encode(&p), r#"{"name":"John","email":null}"#);
}

#[test]
fn omitted_key_survives_a_round_trip() {
    let p = decode(r#"{"name":"John"}"#);
    assert_eq!(p.name, Patch::value("John".to_owned()));
    assert_eq!(p.email, Patch::undefined());
    assert_eq!(encode(&p), r#"{"name":"John"}"#, "email key must be omitted");
}

#[test]
fn not_null_rejects_explicit_null_but_not_omission() {
    let explicit_null = decode(r#"{"name":"John","email":null}"#);
    assert!(not_null_violated(&explicit_null.email));

    let omitted = decode(r#"{"name":"John"}"#);
    assert!(!not_null_violated(&omitted.email));

    let with_value = decode(r#"{"name":"John","email":"john@example.com"}"#);
    assert!(!not_null_violated(&with_value.email));
}

#[test]
fn empty_body_leaves_every_field_undefined() {
    let p = decode("{}");
    assert_eq!(p.name, Patch::undefined());
    assert_eq!(p.email, Patch::undefined());
    assert_eq!(encode(&p), "{}");
}

#[test]
fn decoded_patch_merges_into_stored_state() {
    let mut name = Some("Old".to_owned());
    let mut email = Some("old@example.com".to_owned());

    let p = decode(r#"{"name":"John","email":null}"#);
    p.name.apply_to(&mut name);
    p.email.apply_to(&mut email);

    assert_eq!(name.as_deref(), Some("John"));
    assert_eq!(email, None, "explicit null clears the stored value");
}

#[test]
fn the_three_states_survive_cbor() {
    let original = UserPatch {
        name: Patch::value("John".to_owned()),
        email: Patch::null(),
    };
    let bytes = cbor4ii::serde::to_vec(Vec::new(), &original).expect("encode");
    let back: UserPatch = cbor4ii::serde::from_slice(&bytes).expect("decode");
    assert_eq!(back, original);

    let sparse = UserPatch {
        name: Patch::undefined(),
        email: Patch::value("john@example.com".to_owned()),
    };
    let bytes = cbor4ii::serde::to_vec(Vec::new(), &sparse).expect("encode");
    let back: UserPatch = cbor4ii::serde::from_slice(&bytes).expect("decode");
    assert_eq!(back, sparse, "undefined must stay undefined through CBOR");
}

#[test]
fn malformed_content_rejects_the_whole_body() {
    #[derive(Debug, Deserialize)]
    struct Typed {
        #[serde(default)]
        #[allow(dead_code)]
        age: Patch<u32>,
    }
    let result = serde_json::from_str::<Typed>(r#"{"age":{"unexpected":true}}"#);
    assert!(result.is_err(), "bad content must not degrade to undefined");
}
