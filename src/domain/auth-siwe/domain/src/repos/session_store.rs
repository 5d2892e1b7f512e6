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

use crate::Session;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Storage of per-client session records.
///
/// A record is addressed by the token the client presents. Unknown, expired or
/// corrupted tokens resolve to a fresh anonymous session rather than an error.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, token: Option<&str>) -> Result<Session, LoadSessionError>;

    /// Writes the current state and marks the session as persisted
    async fn save(&self, session: &mut Session) -> Result<(), SaveSessionError>;

    /// Drops the record. Destroying an anonymous session is not an error.
    async fn destroy(&self, session: &mut Session) -> Result<(), DestroySessionError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum LoadSessionError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
pub enum SaveSessionError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
pub enum DestroySessionError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
