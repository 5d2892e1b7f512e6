// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{ChallengeMessageInput, Session, VerificationError, VerifiedIdentity};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Verifies a signed challenge against the session and, on success, binds the
/// identity to it. Rejected attempts leave the session untouched.
#[async_trait::async_trait]
pub trait VerifySignInUseCase: Send + Sync {
    async fn execute(
        &self,
        session: &mut Session,
        message: ChallengeMessageInput,
        signature: &str,
    ) -> Result<VerifiedIdentity, VerifySignInError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum VerifySignInError {
    #[error(transparent)]
    Rejected(#[from] VerificationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
