// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::SiweNonce;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The single live challenge of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceRecord {
    pub nonce: SiweNonce,
    pub issued_at: DateTime<Utc>,
    pub expiration_time: DateTime<Utc>,
}

impl NonceRecord {
    pub fn new(nonce: SiweNonce, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            nonce,
            issued_at,
            expiration_time: issued_at + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration_time
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
