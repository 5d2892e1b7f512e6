// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::routing::{get, post};

use super::handlers::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Procedures are exposed under their names, e.g. `/authNonce`. Queries accept
/// `GET`, mutations accept `POST`.
pub fn root_router() -> axum::Router {
    axum::Router::new()
        .route("/authNonce", get(auth_nonce_handler))
        .route("/authVerify", post(auth_verify_handler))
        .route("/authMe", get(auth_me_handler))
        .route(
            "/authLogout",
            get(auth_logout_handler).post(auth_logout_handler),
        )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
