// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use crypto_utils::{AES_GCM_NONCE_LEN, Encryptor};
use internal_error::{InternalError, ResultIntoInternal};
use serde::{Deserialize, Serialize};
use siwe_auth::*;
use thiserror::Error;
use time_source::SystemTimeSource;

use crate::SessionSecret;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Stateless session store: the whole session state travels in the token,
/// sealed with AES-256-GCM. The token layout is
/// `base64url(nonce || ciphertext)` where the plaintext is the JSON encoded
/// session state along with its expiration time.
pub struct SessionStoreCookie {
    secret: Arc<SessionSecret>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<SessionConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CookiePayload {
    state: SessionState,
    expires_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
enum OpenTokenError {
    #[error("token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token is too short")]
    Truncated,

    #[error("token could not be decrypted: {0}")]
    Decryption(#[from] crypto_utils::EncryptionError),

    #[error("token payload is not valid: {0}")]
    Payload(#[from] serde_json::Error),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn SessionStore)]
impl SessionStoreCookie {
    pub fn new(
        secret: Arc<SessionSecret>,
        time_source: Arc<dyn SystemTimeSource>,
        config: Option<Arc<SessionConfig>>,
    ) -> Self {
        Self {
            secret,
            time_source,
            config: config.unwrap_or_default(),
        }
    }
}

impl SessionStoreCookie {
    fn seal(&self, payload: &CookiePayload) -> Result<String, InternalError> {
        let plaintext =
            serde_json::to_vec(payload).context_int_err("serializing session cookie")?;

        let (ciphertext, nonce) = self
            .secret
            .encryptor()
            .encrypt_bytes(&plaintext)
            .context_int_err("sealing session cookie")?;

        let mut sealed = nonce;
        sealed.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    fn open(&self, token: &str) -> Result<CookiePayload, OpenTokenError> {
        let sealed = URL_SAFE_NO_PAD.decode(token)?;
        if sealed.len() <= AES_GCM_NONCE_LEN {
            return Err(OpenTokenError::Truncated);
        }

        let (nonce, ciphertext) = sealed.split_at(AES_GCM_NONCE_LEN);
        let plaintext = self.secret.encryptor().decrypt_bytes(ciphertext, nonce)?;

        Ok(serde_json::from_slice(&plaintext)?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SessionStore for SessionStoreCookie {
    async fn load(&self, token: Option<&str>) -> Result<Session, LoadSessionError> {
        let Some(token) = token else {
            return Ok(Session::new_anonymous());
        };

        match self.open(token) {
            Ok(payload) if payload.expires_at > self.time_source.now() => Ok(Session::restored(
                SessionToken::new(token),
                payload.state,
            )),
            Ok(payload) => {
                tracing::debug!(expires_at = %payload.expires_at, "Session cookie expired");
                Ok(Session::new_anonymous())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting session cookie");
                Ok(Session::new_anonymous())
            }
        }
    }

    async fn save(&self, session: &mut Session) -> Result<(), SaveSessionError> {
        let payload = CookiePayload {
            state: session.state().clone(),
            expires_at: self.time_source.now() + self.config.ttl,
        };

        let token = self.seal(&payload)?;

        session.mark_persisted(SessionToken::new(token));
        Ok(())
    }

    async fn destroy(&self, session: &mut Session) -> Result<(), DestroySessionError> {
        session.mark_destroyed();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
