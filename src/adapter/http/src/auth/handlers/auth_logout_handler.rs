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
use dill::Catalog;
use http_common::{ApiError, ResultIntoApiError};
use internal_error::ResultIntoInternal;
use serde::{Deserialize, Serialize};
use siwe_auth::{SessionBinder, SessionStore};

use crate::axum_utils::from_catalog_n;
use crate::{SessionCookieConfig, apply_session_commit, open_session};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthLogoutResponse {
    pub ok: bool,
}

/// Destroys the caller's session. Succeeds for anonymous callers too.
#[tracing::instrument(level = "info", skip_all)]
pub async fn auth_logout_handler(
    Extension(catalog): Extension<Catalog>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthLogoutResponse>), ApiError> {
    let (session_store, session_binder, cookie_config) = from_catalog_n!(
        catalog,
        dyn SessionStore,
        dyn SessionBinder,
        SessionCookieConfig
    );

    let mut session = open_session(session_store.as_ref(), &jar, &cookie_config).await?;

    session_binder
        .unbind(&mut session)
        .await
        .int_err()
        .api_err()?;

    let jar = apply_session_commit(jar, session, &cookie_config);

    Ok((jar, Json(AuthLogoutResponse { ok: true })))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
