// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use pretty_assertions::assert_eq;
use siwe_auth::*;
use siwe_auth_services::*;
use time_source::{SystemTimeSource, SystemTimeSourceStub};

use super::harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_nonce_sets_window_and_persists() {
    let harness = ServicesHarness::new();
    let now = harness.time_source.now();

    let mut session = harness.session_store().load(None).await.unwrap();
    let record = harness
        .nonce_service()
        .issue_nonce(&mut session)
        .await
        .unwrap();

    assert_eq!(record.nonce.as_str(), PREDEFINED_NONCE);
    assert_eq!(record.issued_at, now);
    assert_eq!(record.expiration_time, now + Duration::minutes(5));
    assert_eq!(session.nonce(), Some(&record));
    assert_eq!(session.auth_state(), SessionAuthState::NonceIssued);

    let SessionCommit::Persisted(token) = session.commit().clone() else {
        panic!("Nonce was not persisted");
    };
    let reloaded = harness
        .session_store()
        .load(Some(token.as_str()))
        .await
        .unwrap();
    assert_eq!(reloaded.nonce(), Some(&record));
}

#[test_log::test(tokio::test)]
async fn test_nonce_ttl_is_configurable() {
    let harness = ServicesHarness::with_config(SiweAuthConfig {
        nonce_ttl: Duration::seconds(30),
        ..Default::default()
    });

    let (_, record) = harness.session_with_nonce().await;

    assert_eq!(
        record.expiration_time - record.issued_at,
        Duration::seconds(30)
    );
}

#[test_log::test(tokio::test)]
async fn test_reissue_replaces_outstanding_nonce() {
    let harness = ServicesHarness::new();
    let (mut session, first) = harness.session_with_nonce().await;

    harness.time_source.advance(Duration::seconds(10));
    let second = harness
        .nonce_service()
        .issue_nonce(&mut session)
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(session.nonce(), Some(&second));

    // Only the live nonce is accepted
    let stale = ChallengeMessage::builder(DOMAIN, harness.wallet.address(), URI)
        .nonce("zz99yy88")
        .issued_at(first.issued_at)
        .build()
        .unwrap();
    let signature = harness.wallet.sign(&stale);

    assert_eq!(
        harness
            .verifier()
            .verify(&stale, &signature, session.nonce()),
        Err(VerificationError::NonceMismatch)
    );
}

#[test_log::test(tokio::test)]
async fn test_default_generator_is_fresh() {
    let generator = NonceGeneratorDefault;

    let nonces: HashSet<String> = (0..1000)
        .map(|_| generator.generate().as_str().to_string())
        .collect();

    assert_eq!(nonces.len(), 1000);
    assert!(nonces.iter().all(|n| SiweNonce::is_valid(n)));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_persistence_failure_is_reported() {
    let catalog = {
        let mut b = dill::CatalogBuilder::new();

        b.add_value(SystemTimeSourceStub::new())
            .bind::<dyn SystemTimeSource, SystemTimeSourceStub>()
            .add_value(FailingSessionStore)
            .bind::<dyn SessionStore, FailingSessionStore>()
            .add::<NonceGeneratorDefault>()
            .add::<NonceServiceImpl>();

        b.build()
    };
    let nonce_service = catalog.get_one::<dyn NonceService>().unwrap();

    let mut session = Session::new_anonymous();
    let result = nonce_service.issue_nonce(&mut session).await;

    assert!(matches!(
        result,
        Err(IssueNonceError::Internal(e))
            if e.reason() == "Internal error: Internal error: disk on fire (context: persisting issued nonce)"
    ));
    assert_eq!(session.commit(), &SessionCommit::Unchanged);
}

#[test_log::test(tokio::test)]
async fn test_store_is_shared_across_resolutions() {
    let harness = ServicesHarness::new();

    let a = harness.session_store();
    let b = harness.session_store();

    assert!(Arc::ptr_eq(&a, &b));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
