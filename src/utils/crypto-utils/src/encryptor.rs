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

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub trait Encryptor: Send + Sync {
    /// Returns the ciphertext and the freshly generated nonce it was sealed with
    fn encrypt_bytes(&self, value: &[u8]) -> Result<(Vec<u8>, Vec<u8>), EncryptionError>;

    fn decrypt_bytes(&self, value: &[u8], secret_nonce: &[u8]) -> Result<Vec<u8>, EncryptionError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("Invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("Ciphertext could not be authenticated")]
    AuthenticationFailed,

    #[error(transparent)]
    InternalError(#[from] InternalError),
}

#[derive(Error, Debug)]
pub enum ParseEncryptionKey {
    #[error("Passphrase must be at least {min_len} bytes long, got {actual_len}")]
    PassphraseTooShort { min_len: usize, actual_len: usize },

    #[error(transparent)]
    InternalError(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
