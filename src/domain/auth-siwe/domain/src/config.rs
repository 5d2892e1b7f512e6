// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct SiweAuthConfig {
    /// How long an issued nonce stays usable
    pub nonce_ttl: Duration,
    /// Reject messages outside of their nonce / expiration / not-before
    /// window
    pub enforce_time_window: bool,
    /// When set, only messages issued for this domain are accepted
    pub expected_domain: Option<String>,
}

impl SiweAuthConfig {
    pub const DEFAULT_NONCE_TTL_MINUTES: i64 = 5;
}

impl Default for SiweAuthConfig {
    fn default() -> Self {
        Self {
            nonce_ttl: Duration::minutes(Self::DEFAULT_NONCE_TTL_MINUTES),
            enforce_time_window: true,
            expected_domain: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Lifetime of a persisted session, refreshed on every save
    pub ttl: Duration,
}

impl SessionConfig {
    pub const DEFAULT_TTL_DAYS: i64 = 14;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::days(Self::DEFAULT_TTL_DAYS),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
