// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::Address;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use siwe_auth::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn wallet_address() -> Address {
    testing::TestWallet::from_seed(1).address()
}

fn browser_payload() -> serde_json::Value {
    json!({
        "domain": "localhost:3000",
        "address": wallet_address().to_checksum(None),
        "statement": "Sign in with Ethereum to the app.",
        "uri": "http://localhost:3000",
        "version": "1",
        "chainId": 1,
        "nonce": "ab12cd34",
        "issuedAt": "2024-01-01T00:00:00.000Z",
        "expirationTime": "2024-01-01T00:05:00.000Z",
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_fields_to_message() {
    let fields: ChallengeMessageFields = serde_json::from_value(browser_payload()).unwrap();
    let message = ChallengeMessage::try_from(fields).unwrap();

    assert_eq!(message.domain, "localhost:3000");
    assert_eq!(message.address, wallet_address());
    assert_eq!(message.chain_id, 1);
    assert_eq!(message.nonce, "ab12cd34");
    assert_eq!(
        message.expiration_time.unwrap().as_datetime(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap()
    );
}

#[test]
fn test_unknown_fields_are_ignored() {
    let mut payload = browser_payload();
    payload["type"] = json!("Personal signature");
    payload["signature"] = json!("0x00");

    let fields: ChallengeMessageFields = serde_json::from_value(payload).unwrap();

    assert!(ChallengeMessage::try_from(fields).is_ok());
}

#[test]
fn test_missing_field_is_malformed() {
    let mut payload = browser_payload();
    payload.as_object_mut().unwrap().remove("nonce");

    let fields: ChallengeMessageFields = serde_json::from_value(payload).unwrap();

    assert_eq!(
        ChallengeMessage::try_from(fields),
        Err(MalformedMessageError::MissingField { field: "nonce" })
    );
}

#[test]
fn test_bad_checksum_is_malformed() {
    let checksummed = wallet_address().to_checksum(None);
    // Flip the case of the first letter to break the checksum while keeping
    // the string mixed-case
    let idx = checksummed[2..]
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap()
        + 2;
    let mut broken = checksummed.clone().into_bytes();
    broken[idx] = if broken[idx].is_ascii_uppercase() {
        broken[idx].to_ascii_lowercase()
    } else {
        broken[idx].to_ascii_uppercase()
    };
    let broken = String::from_utf8(broken).unwrap();

    let mut payload = browser_payload();
    payload["address"] = json!(broken);
    let fields: ChallengeMessageFields = serde_json::from_value(payload).unwrap();

    assert!(matches!(
        ChallengeMessage::try_from(fields),
        Err(MalformedMessageError::InvalidField {
            field: "address",
            ..
        })
    ));
}

#[test]
fn test_lowercase_address_is_accepted_and_rendered_checksummed() {
    let mut payload = browser_payload();
    payload["address"] = json!(wallet_address().to_checksum(None).to_lowercase());
    let fields: ChallengeMessageFields = serde_json::from_value(payload).unwrap();

    let message = ChallengeMessage::try_from(fields).unwrap();

    assert_eq!(message.address, wallet_address());
    assert!(
        message
            .to_canonical_string()
            .contains(&wallet_address().to_checksum(None))
    );
}

#[test]
fn test_input_accepts_text_and_fields() {
    let fields: ChallengeMessageFields = serde_json::from_value(browser_payload()).unwrap();
    let from_fields = ChallengeMessage::try_from(fields).unwrap();

    let text_input: ChallengeMessageInput =
        serde_json::from_value(json!(from_fields.to_canonical_string())).unwrap();
    let fields_input: ChallengeMessageInput = serde_json::from_value(browser_payload()).unwrap();

    assert!(matches!(text_input, ChallengeMessageInput::Text(_)));
    assert!(matches!(fields_input, ChallengeMessageInput::Fields(_)));
    assert_eq!(text_input.into_message().unwrap(), from_fields);
    assert_eq!(fields_input.into_message().unwrap(), from_fields);
}

#[test]
fn test_input_rejects_wrong_types() {
    let mut payload = browser_payload();
    payload["chainId"] = json!("mainnet");

    assert!(serde_json::from_value::<ChallengeMessageInput>(payload).is_err());
    assert!(serde_json::from_value::<ChallengeMessageInput>(json!(42)).is_err());
}

#[test]
fn test_line_breaks_in_uri_and_resources_are_malformed() {
    let mut payload = browser_payload();
    payload["uri"] = json!("http://localhost:3000/\nResources:");
    let fields: ChallengeMessageFields = serde_json::from_value(payload).unwrap();

    assert!(matches!(
        ChallengeMessage::try_from(fields),
        Err(MalformedMessageError::InvalidField { field: "uri", .. })
    ));

    let mut payload = browser_payload();
    payload["resources"] = json!(["https://example.com/a\n-\thttps://evil.example"]);
    let fields: ChallengeMessageFields = serde_json::from_value(payload).unwrap();

    assert!(matches!(
        ChallengeMessage::try_from(fields),
        Err(MalformedMessageError::InvalidField {
            field: "resources",
            ..
        })
    ));

    let mut payload = browser_payload();
    payload["domain"] = json!("localhost:3000\u{0}");
    let fields: ChallengeMessageFields = serde_json::from_value(payload).unwrap();

    assert!(matches!(
        ChallengeMessage::try_from(fields),
        Err(MalformedMessageError::InvalidField {
            field: "domain",
            ..
        })
    ));
}

#[test]
fn test_accepted_fields_survive_canonical_round_trip() {
    let mut payload = browser_payload();
    payload["resources"] = json!([
        "https://example.com/a",
        "ipfs://bafybeiemxf5abjwjbikoz4mc3a3dla6ual3jsgpdr4cjr3oz3evfyavhwq",
    ]);
    payload["requestId"] = json!("req-1");
    let fields: ChallengeMessageFields = serde_json::from_value(payload).unwrap();
    let message = ChallengeMessage::try_from(fields).unwrap();

    let reparsed: ChallengeMessage = message.to_canonical_string().parse().unwrap();

    assert_eq!(reparsed, message);
}

#[test]
fn test_message_to_fields_and_back() {
    let fields: ChallengeMessageFields = serde_json::from_value(browser_payload()).unwrap();
    let message = ChallengeMessage::try_from(fields.clone()).unwrap();

    assert_eq!(ChallengeMessageFields::from(&message), fields);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
