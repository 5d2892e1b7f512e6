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
use http_common::ApiError;
use serde::{Deserialize, Serialize};
use siwe_auth::{SessionBinder, SessionStore};

use crate::axum_utils::from_catalog_n;
use crate::{SessionCookieConfig, open_session};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthMeResponse {
    /// EIP-55 checksummed address of the signed in account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn auth_me_handler(
    Extension(catalog): Extension<Catalog>,
    jar: CookieJar,
) -> Result<Json<AuthMeResponse>, ApiError> {
    let (session_store, session_binder, cookie_config) = from_catalog_n!(
        catalog,
        dyn SessionStore,
        dyn SessionBinder,
        SessionCookieConfig
    );

    let session = open_session(session_store.as_ref(), &jar, &cookie_config).await?;

    let address = session_binder
        .current_identity(&session)
        .map(|address| address.to_checksum(None));

    Ok(Json(AuthMeResponse { address }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
