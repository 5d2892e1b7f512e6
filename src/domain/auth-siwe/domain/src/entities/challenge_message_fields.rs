// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use super::challenge_message::{parse_address, parse_timestamp};
use crate::{ChallengeMessage, MalformedMessageError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Structured form of a challenge message as sent by browser clients.
///
/// Every field is optional at the deserialization level so that an incomplete
/// message is reported as [`MalformedMessageError`] rather than a transport
/// error. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeMessageFields {
    pub domain: Option<String>,
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    pub uri: Option<String>,
    pub version: Option<String>,
    pub chain_id: Option<u64>,
    pub nonce: Option<String>,
    pub issued_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

impl TryFrom<ChallengeMessageFields> for ChallengeMessage {
    type Error = MalformedMessageError;

    fn try_from(fields: ChallengeMessageFields) -> Result<Self, Self::Error> {
        fn required<T>(value: Option<T>, field: &'static str) -> Result<T, MalformedMessageError> {
            value.ok_or(MalformedMessageError::MissingField { field })
        }

        let message = ChallengeMessage {
            domain: required(fields.domain, "domain")?,
            address: parse_address(&required(fields.address, "address")?)?,
            statement: fields.statement.filter(|s| !s.is_empty()),
            uri: required(fields.uri, "uri")?,
            version: required(fields.version, "version")?,
            chain_id: required(fields.chain_id, "chainId")?,
            nonce: required(fields.nonce, "nonce")?,
            issued_at: parse_timestamp("issuedAt", &required(fields.issued_at, "issuedAt")?)?,
            expiration_time: fields
                .expiration_time
                .map(|v| parse_timestamp("expirationTime", &v))
                .transpose()?,
            not_before: fields
                .not_before
                .map(|v| parse_timestamp("notBefore", &v))
                .transpose()?,
            request_id: fields.request_id,
            resources: fields.resources.unwrap_or_default(),
        };
        message.validate()?;

        Ok(message)
    }
}

impl From<&ChallengeMessage> for ChallengeMessageFields {
    fn from(message: &ChallengeMessage) -> Self {
        Self {
            domain: Some(message.domain.clone()),
            address: Some(message.address.to_checksum(None)),
            statement: message.statement.clone(),
            uri: Some(message.uri.clone()),
            version: Some(message.version.clone()),
            chain_id: Some(message.chain_id),
            nonce: Some(message.nonce.clone()),
            issued_at: Some(message.issued_at.to_string()),
            expiration_time: message.expiration_time.as_ref().map(ToString::to_string),
            not_before: message.not_before.as_ref().map(ToString::to_string),
            request_id: message.request_id.clone(),
            resources: (!message.resources.is_empty()).then(|| message.resources.clone()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A challenge message in any of the accepted wire forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChallengeMessageInput {
    /// Canonical EIP-4361 text
    Text(String),
    Fields(ChallengeMessageFields),
}

impl ChallengeMessageInput {
    pub fn into_message(self) -> Result<ChallengeMessage, MalformedMessageError> {
        match self {
            Self::Text(text) => text.parse(),
            Self::Fields(fields) => fields.try_into(),
        }
    }
}

impl From<&ChallengeMessage> for ChallengeMessageInput {
    fn from(message: &ChallengeMessage) -> Self {
        Self::Fields(message.into())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
