// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::Address;
use internal_error::InternalError;
use thiserror::Error;

use crate::{Session, VerifiedIdentity};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait SessionBinder: Send + Sync {
    /// Stores the identity in the session, replacing a previous one, and
    /// persists it
    async fn bind(
        &self,
        session: &mut Session,
        identity: VerifiedIdentity,
    ) -> Result<(), BindSessionError>;

    fn current_identity(&self, session: &Session) -> Option<Address>;

    /// Destroys the whole session. Calling it on an anonymous session is a
    /// no-op.
    async fn unbind(&self, session: &mut Session) -> Result<(), UnbindSessionError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum BindSessionError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
pub enum UnbindSessionError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
