// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;
use pretty_assertions::assert_eq;
use siwe_auth::testing::TestWallet;
use siwe_auth::*;
use time_source::SystemTimeSource;

use super::harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn flip_hex_digit(c: char) -> char {
    let digit = c.to_digit(16).unwrap();
    std::char::from_digit((digit + 1) % 16, 16).unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_valid_signature_is_accepted() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);
    let signature = harness.wallet.sign(&message);

    let identity = harness
        .verifier()
        .verify(&message, &signature, session.nonce())
        .unwrap();

    assert_eq!(identity.address, harness.wallet.address());
    assert_eq!(identity.nonce, PREDEFINED_NONCE);
    assert_eq!(identity.chain_id, 1);
    assert_eq!(identity.domain, DOMAIN);
    assert_eq!(identity.verified_at, harness.time_source.now());
}

#[test_log::test(tokio::test)]
async fn test_signature_without_prefix_is_accepted() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);
    let signature = harness.wallet.sign(&message);

    let result = harness.verifier().verify(
        &message,
        signature.strip_prefix("0x").unwrap(),
        session.nonce(),
    );

    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_any_altered_signature_digit_is_rejected() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);
    let signature = harness.wallet.sign(&message);
    let verifier = harness.verifier();

    // r || s
    for i in 2..130 {
        let mut tampered: Vec<char> = signature.chars().collect();
        tampered[i] = flip_hex_digit(tampered[i]);
        let tampered: String = tampered.into_iter().collect();

        let result = verifier.verify(&message, &tampered, session.nonce());

        assert!(
            matches!(result, Err(VerificationError::SignatureInvalid(_))),
            "Digit {i} altered but got {result:?}"
        );
    }

    // Recovery id
    let (rs, v) = signature.split_at(130);
    let flipped_v = match v {
        "1b" => "1c",
        "1c" => "1b",
        "00" => "01",
        _ => "00",
    };
    let result = verifier.verify(&message, &format!("{rs}{flipped_v}"), session.nonce());
    assert!(matches!(result, Err(VerificationError::SignatureInvalid(_))));
}

#[test_log::test(tokio::test)]
async fn test_altered_message_is_rejected() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);
    let signature = harness.wallet.sign(&message);

    let mut altered = message.clone();
    altered.chain_id = 137;

    assert!(matches!(
        harness.verifier().verify(&altered, &signature, session.nonce()),
        Err(VerificationError::SignatureInvalid(
            SignatureInvalidError::SignerMismatch { .. }
        ))
    ));
}

#[test_log::test(tokio::test)]
async fn test_claimed_address_must_match_signer() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;
    let other = TestWallet::from_seed(2);

    let mut message = harness.message_for(&record);
    message.address = other.address();
    let signature = harness.wallet.sign(&message);

    let result = harness.verifier().verify(&message, &signature, session.nonce());

    assert_eq!(
        result,
        Err(VerificationError::SignatureInvalid(
            SignatureInvalidError::SignerMismatch {
                expected: other.address(),
                recovered: harness.wallet.address(),
            }
        ))
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "Signature does not match address of the message."
    );
}

#[test_log::test(tokio::test)]
async fn test_malformed_signatures_are_rejected() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);

    let too_long = "ab".repeat(66);
    for signature in ["", "0x", "0x1234", "not-hex", too_long.as_str()] {
        assert!(
            matches!(
                harness.verifier().verify(&message, signature, session.nonce()),
                Err(VerificationError::SignatureInvalid(
                    SignatureInvalidError::Malformed { .. }
                ))
            ),
            "Signature {signature:?} should be malformed"
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_nonce_mismatch() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;

    let message = ChallengeMessage::builder(DOMAIN, harness.wallet.address(), URI)
        .nonce("zz99yy88")
        .issued_at(record.issued_at)
        .build()
        .unwrap();
    let signature = harness.wallet.sign(&message);

    let result = harness.verifier().verify(&message, &signature, session.nonce());

    assert_eq!(result, Err(VerificationError::NonceMismatch));
    assert_eq!(result.unwrap_err().to_string(), "Invalid nonce.");
}

#[test_log::test(tokio::test)]
async fn test_missing_session_nonce() {
    let harness = ServicesHarness::new();
    let (_, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);
    let signature = harness.wallet.sign(&message);

    assert_eq!(
        harness.verifier().verify(&message, &signature, None),
        Err(VerificationError::NonceExpiredOrMissing)
    );
}

#[test_log::test(tokio::test)]
async fn test_expired_nonce() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);
    let signature = harness.wallet.sign(&message);

    harness.time_source.advance(Duration::minutes(4));
    assert!(
        harness
            .verifier()
            .verify(&message, &signature, session.nonce())
            .is_ok()
    );

    harness.time_source.advance(Duration::minutes(2));
    assert_eq!(
        harness.verifier().verify(&message, &signature, session.nonce()),
        Err(VerificationError::NonceExpiredOrMissing)
    );
}

#[test_log::test(tokio::test)]
async fn test_time_window_can_be_disabled() {
    let harness = ServicesHarness::with_config(SiweAuthConfig {
        enforce_time_window: false,
        ..Default::default()
    });
    let (session, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);
    let signature = harness.wallet.sign(&message);

    harness.time_source.advance(Duration::days(1));

    assert!(
        harness
            .verifier()
            .verify(&message, &signature, session.nonce())
            .is_ok()
    );
}

#[test_log::test(tokio::test)]
async fn test_message_expiration_and_not_before() {
    let harness = ServicesHarness::new();
    let (session, record) = harness.session_with_nonce().await;
    let now = harness.time_source.now();

    let expired = ChallengeMessage::builder(DOMAIN, harness.wallet.address(), URI)
        .nonce(record.nonce.as_str())
        .issued_at(now - Duration::minutes(2))
        .expiration_time(now - Duration::minutes(1))
        .build()
        .unwrap();
    assert_eq!(
        harness
            .verifier()
            .verify(&expired, &harness.wallet.sign(&expired), session.nonce()),
        Err(VerificationError::MessageExpired)
    );

    let premature = ChallengeMessage::builder(DOMAIN, harness.wallet.address(), URI)
        .nonce(record.nonce.as_str())
        .issued_at(now)
        .not_before(now + Duration::minutes(1))
        .build()
        .unwrap();
    assert_eq!(
        harness
            .verifier()
            .verify(&premature, &harness.wallet.sign(&premature), session.nonce()),
        Err(VerificationError::MessageNotYetValid)
    );
}

#[test_log::test(tokio::test)]
async fn test_expected_domain() {
    let harness = ServicesHarness::with_config(SiweAuthConfig {
        expected_domain: Some("app.example.com".to_string()),
        ..Default::default()
    });
    let (session, record) = harness.session_with_nonce().await;
    let message = harness.message_for(&record);
    let signature = harness.wallet.sign(&message);

    assert_eq!(
        harness.verifier().verify(&message, &signature, session.nonce()),
        Err(VerificationError::DomainMismatch {
            expected: "app.example.com".to_string(),
            actual: DOMAIN.to_string(),
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
