// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use axum_extra::extract::CookieJar;
use dill::Catalog;
use http_common::{ApiError, IntoApiError};
use serde::{Deserialize, Serialize};
use siwe_auth::{ChallengeMessageInput, SessionStore, VerifySignInError, VerifySignInUseCase};

use crate::axum_utils::from_catalog_n;
use crate::{SessionCookieConfig, apply_session_commit, open_session};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthVerifyRequest {
    /// Either the structured message fields or the canonical message text
    pub message: ChallengeMessageInput,
    pub signature: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthVerifyResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthVerifyResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Verifies a signed challenge and binds the signer to the session.
///
/// A rejected sign-in is a regular outcome and is reported in the body with
/// `ok: false`. Only a request that does not match the expected shape yields a
/// `400`.
#[tracing::instrument(level = "info", skip_all)]
pub async fn auth_verify_handler(
    Extension(catalog): Extension<Catalog>,
    jar: CookieJar,
    request: Result<Json<AuthVerifyRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthVerifyResponse>), ApiError> {
    let Json(request) = request.map_err(ApiError::bad_request)?;

    let (session_store, verify_sign_in, cookie_config) = from_catalog_n!(
        catalog,
        dyn SessionStore,
        dyn VerifySignInUseCase,
        SessionCookieConfig
    );

    let mut session = open_session(session_store.as_ref(), &jar, &cookie_config).await?;

    match verify_sign_in
        .execute(&mut session, request.message, &request.signature)
        .await
    {
        Ok(_) => {
            let jar = apply_session_commit(jar, session, &cookie_config);
            Ok((jar, Json(AuthVerifyResponse::success())))
        }
        Err(VerifySignInError::Rejected(e)) => {
            Ok((jar, Json(AuthVerifyResponse::failure(e.to_string()))))
        }
        Err(VerifySignInError::Internal(e)) => Err(e.api_err()),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
