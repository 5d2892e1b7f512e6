// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// This type is used to simplify error handling in HTTP handler and unify
/// logging of API errors.
///
/// The typical usage pattern is:
///
/// ```
/// async fn handler() -> Result<(), ApiError> {
///     operation().await.int_err().api_err()?;
///     Ok(())
/// }
/// ````
///
/// A conversion between the domain error and [`ApiError`] has to exist. We on
/// purpose avoid [From] and [Into] traits and using [`IntoApiError`] instead as
/// we want this conversion to be explicit - it's too easy to put a question
/// mark operator on a fallible operation without thinking what it will actually
/// do.
///
/// Domain errors that carry a meaning for the client (e.g. a rejected sign-in)
/// are not supposed to end up here at all - handlers turn them into regular
/// response bodies. Only faults the client cannot act upon are reported as
/// [`ApiError`].
#[derive(Debug, Error)]
#[error("api error {status_code:?}")]
pub struct ApiError {
    pub status_code: http::StatusCode,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl ApiError {
    pub fn new(
        source: impl std::error::Error + Send + Sync + 'static,
        status_code: http::StatusCode,
    ) -> Self {
        Self {
            status_code,
            source: source.into(),
        }
    }

    pub fn bad_request(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::new(source, http::StatusCode::BAD_REQUEST)
    }
}

impl From<InternalError> for ApiError {
    fn from(e: InternalError) -> Self {
        e.api_err()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub message: String,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if self.status_code == http::StatusCode::INTERNAL_SERVER_ERROR {
            let error_msg = match self.source.downcast_ref::<InternalError>() {
                Some(e) => e.reason(),
                None => self.source.to_string(),
            };
            tracing::error!(
                error = ?self.source,
                error_msg = %error_msg,
                status_code = %self.status_code,
                "Internal API error",
            );
            (self.status_code, "").into_response()
        } else {
            tracing::warn!(
                error = ?self.source,
                error_msg = %self.source,
                status_code = %self.status_code,
                "API error",
            );

            let response_body = axum::response::Json(ApiErrorResponse {
                message: self.source.to_string(),
            });

            (self.status_code, response_body).into_response()
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Provides explicit conversion into [`ApiError`].
pub trait IntoApiError {
    fn api_err(self) -> ApiError;
}

/// Allows using `.api_err()` method on [Result] types.
pub trait ResultIntoApiError<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError>;
}

impl<K, E> ResultIntoApiError<K, E> for Result<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.api_err()),
        }
    }
}

impl IntoApiError for InternalError {
    fn api_err(self) -> ApiError {
        ApiError::new(self, http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
