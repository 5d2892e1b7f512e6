// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::Address;
use thiserror::Error;

use crate::{ChallengeMessage, MalformedMessageError, NonceRecord, VerifiedIdentity};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Checks a signed challenge against the nonce stored in a session.
///
/// Verification is pure: the session is only read, never written.
pub trait ChallengeVerifier: Send + Sync {
    fn verify(
        &self,
        message: &ChallengeMessage,
        signature: &str,
        session_nonce: Option<&NonceRecord>,
    ) -> Result<VerifiedIdentity, VerificationError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error(transparent)]
    MalformedMessage(#[from] MalformedMessageError),

    #[error(transparent)]
    SignatureInvalid(#[from] SignatureInvalidError),

    #[error("Nonce is missing or expired.")]
    NonceExpiredOrMissing,

    #[error("Invalid nonce.")]
    NonceMismatch,

    #[error("Expired message.")]
    MessageExpired,

    #[error("Message is not yet valid.")]
    MessageNotYetValid,

    #[error("Domain mismatch: expected {expected}, got {actual}.")]
    DomainMismatch { expected: String, actual: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureInvalidError {
    #[error("Malformed signature: {reason}.")]
    Malformed { reason: String },

    #[error("Signature does not match address of the message.")]
    SignerMismatch {
        expected: Address,
        recovered: Address,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
