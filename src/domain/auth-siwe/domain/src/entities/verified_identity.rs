// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChallengeMessage, MessageTimestamp};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Principal of an authenticated session: the fields of the challenge message
/// whose signature was checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedIdentity {
    pub address: Address,
    pub chain_id: u64,
    pub domain: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    pub nonce: String,
    pub issued_at: MessageTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<MessageTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<MessageTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    pub verified_at: DateTime<Utc>,
}

impl VerifiedIdentity {
    pub fn from_message(message: &ChallengeMessage, verified_at: DateTime<Utc>) -> Self {
        Self {
            address: message.address,
            chain_id: message.chain_id,
            domain: message.domain.clone(),
            uri: message.uri.clone(),
            statement: message.statement.clone(),
            nonce: message.nonce.clone(),
            issued_at: message.issued_at.clone(),
            expiration_time: message.expiration_time.clone(),
            not_before: message.not_before.clone(),
            request_id: message.request_id.clone(),
            resources: message.resources.clone(),
            verified_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
