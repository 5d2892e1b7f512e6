// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crypto_utils::ParseEncryptionKey;
use internal_error::InternalError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration value of '{key}': {reason}")]
    InvalidConfigValue { key: &'static str, reason: String },

    #[error(
        "Session secret is not configured, set {} or 'session.password'",
        crate::SESSION_PASSWORD_ENV_VAR
    )]
    MissingSessionSecret,

    #[error("Invalid session secret: {0}")]
    InvalidSessionSecret(#[from] ParseEncryptionKey),

    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl AppError {
    pub fn invalid_value(key: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidConfigValue {
            key,
            reason: reason.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
