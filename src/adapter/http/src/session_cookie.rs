// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use http_common::{ApiError, ResultIntoApiError};
use internal_error::ResultIntoInternal;
use siwe_auth::{Session, SessionCommit, SessionStore};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age: chrono::Duration,
}

impl SessionCookieConfig {
    pub const DEFAULT_NAME: &'static str = "siwe";
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age: chrono::Duration::days(siwe_auth::SessionConfig::DEFAULT_TTL_DAYS),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn open_session(
    store: &dyn SessionStore,
    jar: &CookieJar,
    config: &SessionCookieConfig,
) -> Result<Session, ApiError> {
    let token = jar.get(&config.name).map(Cookie::value);

    store.load(token).await.int_err().api_err()
}

/// Reflects the outcome of the session persistence calls in the response
/// cookies
pub fn apply_session_commit(
    jar: CookieJar,
    session: Session,
    config: &SessionCookieConfig,
) -> CookieJar {
    match session.into_commit() {
        SessionCommit::Unchanged => jar,
        SessionCommit::Persisted(token) => {
            let cookie = Cookie::build((config.name.clone(), token.into_inner()))
                .http_only(true)
                .secure(config.secure)
                .same_site(config.same_site)
                .path(config.path.clone())
                .max_age(time::Duration::seconds(config.max_age.num_seconds()));

            jar.add(cookie)
        }
        SessionCommit::Destroyed => {
            jar.remove(Cookie::build((config.name.clone(), "")).path(config.path.clone()))
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
