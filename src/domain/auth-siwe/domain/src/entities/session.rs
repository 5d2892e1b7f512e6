// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{NonceRecord, VerifiedIdentity};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Opaque handle a client presents to resume its session (the cookie value)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens are bearer credentials
        f.write_str("SessionToken(***)")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<NonceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siwe: Option<VerifiedIdentity>,
}

impl SessionState {
    pub fn is_empty(&self) -> bool {
        self.nonce.is_none() && self.siwe.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAuthState {
    Anonymous,
    NonceIssued,
    Authenticated,
}

/// Outcome of the last explicit persistence call on a [`Session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommit {
    Unchanged,
    Persisted(SessionToken),
    Destroyed,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Per-request session handle.
///
/// Loaded from a [`crate::SessionStore`] at the start of a request, mutated by
/// services, and persisted only through explicit store calls. The transport
/// layer inspects [`Session::commit`] afterwards to decide what to send back to
/// the client.
#[derive(Debug)]
pub struct Session {
    token: Option<SessionToken>,
    state: SessionState,
    commit: SessionCommit,
}

impl Session {
    pub fn new_anonymous() -> Self {
        Self {
            token: None,
            state: SessionState::default(),
            commit: SessionCommit::Unchanged,
        }
    }

    pub fn restored(token: SessionToken, state: SessionState) -> Self {
        Self {
            token: Some(token),
            state,
            commit: SessionCommit::Unchanged,
        }
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn nonce(&self) -> Option<&NonceRecord> {
        self.state.nonce.as_ref()
    }

    pub fn identity(&self) -> Option<&VerifiedIdentity> {
        self.state.siwe.as_ref()
    }

    pub fn address(&self) -> Option<Address> {
        self.state.siwe.as_ref().map(|identity| identity.address)
    }

    pub fn auth_state(&self) -> SessionAuthState {
        match (&self.state.nonce, &self.state.siwe) {
            (None, None) => SessionAuthState::Anonymous,
            (Some(record), Some(identity)) if record.nonce.as_str() == identity.nonce => {
                SessionAuthState::Authenticated
            }
            (None, Some(_)) => SessionAuthState::Authenticated,
            // A fresh challenge was requested after signing in
            (Some(_), _) => SessionAuthState::NonceIssued,
        }
    }

    pub fn commit(&self) -> &SessionCommit {
        &self.commit
    }

    pub fn into_commit(self) -> SessionCommit {
        self.commit
    }

    /// Called by stores once the state has been durably written
    pub fn mark_persisted(&mut self, token: SessionToken) {
        self.token = Some(token.clone());
        self.commit = SessionCommit::Persisted(token);
    }

    /// Called by stores once the record is gone
    pub fn mark_destroyed(&mut self) {
        self.token = None;
        self.state = SessionState::default();
        self.commit = SessionCommit::Destroyed;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
