// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use alloy_primitives::{Address, Signature};
use siwe_auth::*;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const SIGNATURE_LEN: usize = 65;

pub struct ChallengeVerifierImpl {
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<SiweAuthConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn ChallengeVerifier)]
impl ChallengeVerifierImpl {
    fn new(time_source: Arc<dyn SystemTimeSource>, config: Option<Arc<SiweAuthConfig>>) -> Self {
        Self {
            time_source,
            config: config.unwrap_or_default(),
        }
    }
}

impl ChallengeVerifierImpl {
    /// Recovers the EIP-191 `personal_sign` signer of the canonical message
    /// text
    fn recover_signer(
        message: &ChallengeMessage,
        signature: &str,
    ) -> Result<Address, SignatureInvalidError> {
        let malformed = |reason: String| SignatureInvalidError::Malformed { reason };

        let digits = signature.strip_prefix("0x").unwrap_or(signature);
        if digits.is_empty() {
            return Err(malformed("empty signature".to_string()));
        }

        let bytes = hex::decode(digits).map_err(|e| malformed(e.to_string()))?;
        if bytes.len() != SIGNATURE_LEN {
            return Err(malformed(format!(
                "expected {SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let signature = Signature::from_raw(&bytes).map_err(|e| malformed(e.to_string()))?;

        signature
            .recover_address_from_msg(message.to_canonical_string())
            .map_err(|e| malformed(e.to_string()))
    }

    fn check_time_window(
        &self,
        message: &ChallengeMessage,
        record: &NonceRecord,
    ) -> Result<(), VerificationError> {
        let now = self.time_source.now();

        if record.is_expired_at(now) {
            return Err(VerificationError::NonceExpiredOrMissing);
        }
        if message
            .expiration_time
            .as_ref()
            .is_some_and(|t| now >= t.as_datetime())
        {
            return Err(VerificationError::MessageExpired);
        }
        if message
            .not_before
            .as_ref()
            .is_some_and(|t| now < t.as_datetime())
        {
            return Err(VerificationError::MessageNotYetValid);
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl ChallengeVerifier for ChallengeVerifierImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(address = %message.address))]
    fn verify(
        &self,
        message: &ChallengeMessage,
        signature: &str,
        session_nonce: Option<&NonceRecord>,
    ) -> Result<VerifiedIdentity, VerificationError> {
        message.validate()?;

        let recovered = Self::recover_signer(message, signature)?;
        if recovered != message.address {
            return Err(SignatureInvalidError::SignerMismatch {
                expected: message.address,
                recovered,
            }
            .into());
        }

        let Some(record) = session_nonce else {
            return Err(VerificationError::NonceExpiredOrMissing);
        };
        if message.nonce != record.nonce.as_str() {
            return Err(VerificationError::NonceMismatch);
        }

        if self.config.enforce_time_window {
            self.check_time_window(message, record)?;
        }

        if let Some(expected_domain) = self
            .config
            .expected_domain
            .as_ref()
            .filter(|domain| **domain != message.domain)
        {
            return Err(VerificationError::DomainMismatch {
                expected: expected_domain.clone(),
                actual: message.domain.clone(),
            });
        }

        Ok(VerifiedIdentity::from_message(
            message,
            self.time_source.now(),
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
