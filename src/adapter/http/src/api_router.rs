// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use observability::axum::{health_handler, unknown_fallback_handler};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Assembles the public routes: the auth procedures mounted under
/// `route_prefix` and the liveness probe at `/healthz`.
///
/// Handlers resolve their dependencies from a [`dill::Catalog`], which the
/// caller is expected to provide via an [`axum::Extension`] layer.
pub fn api_router(route_prefix: &str) -> axum::Router {
    let prefix = route_prefix.trim_end_matches('/');

    let router = axum::Router::new().route("/healthz", axum::routing::get(health_handler));

    let router = if prefix.is_empty() {
        router.merge(crate::auth::root_router())
    } else {
        router.nest(prefix, crate::auth::root_router())
    };

    router.fallback(unknown_fallback_handler)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
