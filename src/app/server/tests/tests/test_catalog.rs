// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use siwe_adapter_http::SessionCookieConfig;
use siwe_auth::*;
use siwe_server::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const PASSWORD: &str = "complex_password_at_least_32_characters_long";

#[test_log::test(tokio::test)]
async fn test_all_components_resolve() {
    for store in [SessionStoreKind::Cookie, SessionStoreKind::InMemory] {
        let mut config = ServerConfig::default();
        config.session.store = store;

        let catalog = configure_catalog(&config, Some(PASSWORD.to_string()))
            .unwrap()
            .build();

        catalog.get_one::<dyn NonceService>().unwrap();
        catalog.get_one::<dyn ChallengeVerifier>().unwrap();
        catalog.get_one::<dyn SessionBinder>().unwrap();
        catalog.get_one::<dyn VerifySignInUseCase>().unwrap();

        let store = catalog.get_one::<dyn SessionStore>().unwrap();
        let session = store.load(None).await.unwrap();
        assert_eq!(session.auth_state(), SessionAuthState::Anonymous);
    }
}

#[test]
fn test_in_memory_store_is_shared() {
    let mut config = ServerConfig::default();
    config.session.store = SessionStoreKind::InMemory;
    config.environment = AppEnvironment::Production;

    // No secret needed when state never leaves the process
    let catalog = configure_catalog(&config, None).unwrap().build();

    let a = catalog.get_one::<dyn SessionStore>().unwrap();
    let b = catalog.get_one::<dyn SessionStore>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_cookie_settings() {
    let mut config = ServerConfig::default();
    config.session.cookie_name = "sid".to_string();
    config.session.ttl = "2h".parse().unwrap();

    let catalog = configure_catalog(&config, None).unwrap().build();
    let cookie_config = catalog.get_one::<SessionCookieConfig>().unwrap();

    assert_eq!(cookie_config.name, "sid");
    assert!(!cookie_config.secure);
    assert_eq!(cookie_config.path, "/");
    assert_eq!(cookie_config.max_age, chrono::Duration::hours(2));

    let session_config = catalog.get_one::<SessionConfig>().unwrap();
    assert_eq!(session_config.ttl, chrono::Duration::hours(2));
}

#[test]
fn test_cookie_is_secure_in_production() {
    let mut config = ServerConfig::default();
    config.environment = AppEnvironment::Production;

    let catalog = configure_catalog(&config, Some(PASSWORD.to_string()))
        .unwrap()
        .build();
    assert!(catalog.get_one::<SessionCookieConfig>().unwrap().secure);

    config.session.secure = Some(false);
    let catalog = configure_catalog(&config, Some(PASSWORD.to_string()))
        .unwrap()
        .build();
    assert!(!catalog.get_one::<SessionCookieConfig>().unwrap().secure);
}

#[test]
fn test_auth_settings() {
    let mut config = ServerConfig::default();
    config.auth.nonce_ttl = "10m".parse().unwrap();
    config.auth.enforce_time_window = false;
    config.auth.expected_domain = Some("app.example.com".to_string());

    let catalog = configure_catalog(&config, None).unwrap().build();
    let auth_config = catalog.get_one::<SiweAuthConfig>().unwrap();

    assert_eq!(auth_config.nonce_ttl, chrono::Duration::minutes(10));
    assert!(!auth_config.enforce_time_window);
    assert_eq!(
        auth_config.expected_domain.as_deref(),
        Some("app.example.com")
    );
}

#[test]
fn test_invalid_settings_fail_fast() {
    let mut config = ServerConfig::default();
    config.session.ttl = "0s".parse().unwrap();
    assert!(matches!(
        configure_catalog(&config, None),
        Err(AppError::InvalidConfigValue {
            key: "session.ttl",
            ..
        })
    ));

    let mut config = ServerConfig::default();
    config.session.cookie_name = String::new();
    assert!(matches!(
        configure_catalog(&config, None),
        Err(AppError::InvalidConfigValue {
            key: "session.cookie_name",
            ..
        })
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_production_requires_secret() {
    let mut config = ServerConfig::default();
    config.environment = AppEnvironment::Production;

    assert!(matches!(
        resolve_session_secret(&config, None),
        Err(AppError::MissingSessionSecret)
    ));
    assert!(matches!(
        configure_catalog(&config, None),
        Err(AppError::MissingSessionSecret)
    ));

    assert!(resolve_session_secret(&config, Some(PASSWORD.to_string())).is_ok());

    config.session.password = Some(PASSWORD.to_string());
    assert!(resolve_session_secret(&config, None).is_ok());
}

#[test]
fn test_development_generates_secret() {
    let config = ServerConfig::default();

    assert!(resolve_session_secret(&config, None).is_ok());
}

#[test]
fn test_short_secret_is_rejected() {
    let config = ServerConfig::default();

    assert!(matches!(
        resolve_session_secret(&config, Some("too_short".to_string())),
        Err(AppError::InvalidSessionSecret(
            crypto_utils::ParseEncryptionKey::PassphraseTooShort {
                min_len: 32,
                actual_len: 9,
            }
        ))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
