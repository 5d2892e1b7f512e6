// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::{EncryptionError, Encryptor, ParseEncryptionKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const AES_GCM_NONCE_LEN: usize = 12;
pub const MIN_PASSPHRASE_LEN: usize = 32;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// AES-256-GCM encryptor keyed by the SHA-256 digest of a passphrase
pub struct AesGcmEncryptor {
    cipher: Aes256Gcm,
}

impl AesGcmEncryptor {
    pub fn from_passphrase(passphrase: &SecretString) -> Result<Self, ParseEncryptionKey> {
        let material = passphrase.expose_secret().as_bytes();
        if material.len() < MIN_PASSPHRASE_LEN {
            return Err(ParseEncryptionKey::PassphraseTooShort {
                min_len: MIN_PASSPHRASE_LEN,
                actual_len: material.len(),
            });
        }

        let key: [u8; 32] = Sha256::digest(material).into();

        Ok(Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key)),
        })
    }
}

impl Encryptor for AesGcmEncryptor {
    fn encrypt_bytes(&self, value: &[u8]) -> Result<(Vec<u8>, Vec<u8>), EncryptionError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(&nonce, value)
            .map_err(|_| EncryptionError::AuthenticationFailed)?;

        Ok((ciphertext, nonce.to_vec()))
    }

    fn decrypt_bytes(&self, value: &[u8], secret_nonce: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        if secret_nonce.len() != AES_GCM_NONCE_LEN {
            return Err(EncryptionError::InvalidNonceLength {
                expected: AES_GCM_NONCE_LEN,
                actual: secret_nonce.len(),
            });
        }

        self.cipher
            .decrypt(Nonce::from_slice(secret_nonce), value)
            .map_err(|_| EncryptionError::AuthenticationFailed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
