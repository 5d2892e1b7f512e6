// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::response::IntoResponse;
use serde_json::json;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Liveness probe for deployment orchestrators
pub async fn health_handler() -> impl IntoResponse {
    axum::Json(json!({ "ok": true }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn unknown_fallback_handler(uri: http::Uri) -> impl IntoResponse {
    tracing::warn!(%uri, "Unknown route");

    (
        http::StatusCode::NOT_FOUND,
        axum::Json(json!({ "message": "Not Found" })),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Opens an `http_request` span per request with method and matched path and
/// records the response status and latency on completion
pub fn http_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&http::Request<axum::body::Body>) -> tracing::Span + Clone,
> {
    TraceLayer::new_for_http().make_span_with(|request: &http::Request<axum::body::Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri().path(),
        )
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
