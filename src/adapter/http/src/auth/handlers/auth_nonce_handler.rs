// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use axum_extra::extract::CookieJar;
use chrono::SecondsFormat;
use dill::Catalog;
use http_common::{ApiError, ResultIntoApiError};
use internal_error::ResultIntoInternal;
use serde::{Deserialize, Serialize};
use siwe_auth::{NonceRecord, NonceService, SessionStore};

use crate::axum_utils::from_catalog_n;
use crate::{SessionCookieConfig, apply_session_commit, open_session};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthNonceResponse {
    pub nonce: String,
    pub issued_at: String,
    pub expiration_time: String,
}

impl From<&NonceRecord> for AuthNonceResponse {
    fn from(record: &NonceRecord) -> Self {
        Self {
            nonce: record.nonce.to_string(),
            issued_at: record.issued_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            expiration_time: record
                .expiration_time
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Issues a fresh challenge nonce for the caller's session
#[tracing::instrument(level = "info", skip_all)]
pub async fn auth_nonce_handler(
    Extension(catalog): Extension<Catalog>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthNonceResponse>), ApiError> {
    let (session_store, nonce_service, cookie_config) = from_catalog_n!(
        catalog,
        dyn SessionStore,
        dyn NonceService,
        SessionCookieConfig
    );

    let mut session = open_session(session_store.as_ref(), &jar, &cookie_config).await?;

    let record = nonce_service
        .issue_nonce(&mut session)
        .await
        .int_err()
        .api_err()?;

    let jar = apply_session_commit(jar, session, &cookie_config);

    Ok((jar, Json(AuthNonceResponse::from(&record))))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
