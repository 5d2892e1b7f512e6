// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use siwe_auth::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn VerifySignInUseCase)]
pub struct VerifySignInUseCaseImpl {
    challenge_verifier: Arc<dyn ChallengeVerifier>,
    session_binder: Arc<dyn SessionBinder>,
}

#[async_trait::async_trait]
impl VerifySignInUseCase for VerifySignInUseCaseImpl {
    #[tracing::instrument(level = "info", skip_all)]
    async fn execute(
        &self,
        session: &mut Session,
        message: ChallengeMessageInput,
        signature: &str,
    ) -> Result<VerifiedIdentity, VerifySignInError> {
        let message = message.into_message().map_err(VerificationError::from)?;

        let identity = match self
            .challenge_verifier
            .verify(&message, signature, session.nonce())
        {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in rejected");
                return Err(e.into());
            }
        };

        self.session_binder
            .bind(session, identity.clone())
            .await
            .map_err(|BindSessionError::Internal(e)| VerifySignInError::Internal(e))?;

        tracing::info!(address = %identity.address, chain_id = identity.chain_id, "Signed in");

        Ok(identity)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
