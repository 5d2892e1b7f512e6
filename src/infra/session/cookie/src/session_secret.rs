// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use crypto_utils::{AesGcmEncryptor, MIN_PASSPHRASE_LEN, ParseEncryptionKey};
use rand::Rng;
use rand::distributions::Alphanumeric;
use secrecy::SecretString;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Key material sealing session cookies. Must be at least
/// [`MIN_PASSPHRASE_LEN`] bytes long.
pub struct SessionSecret {
    encryptor: AesGcmEncryptor,
}

impl SessionSecret {
    const GENERATED_LEN: usize = 64;

    pub fn new(passphrase: &SecretString) -> Result<Self, ParseEncryptionKey> {
        Ok(Self {
            encryptor: AesGcmEncryptor::from_passphrase(passphrase)?,
        })
    }

    /// Random secret for development setups. Sessions sealed with it do not
    /// survive a restart.
    pub fn generate() -> Self {
        let passphrase: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::GENERATED_LEN)
            .map(char::from)
            .collect();

        Self::new(&SecretString::from(passphrase)).expect("Generated secret is long enough")
    }

    pub(crate) fn encryptor(&self) -> &AesGcmEncryptor {
        &self.encryptor
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(***)")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
