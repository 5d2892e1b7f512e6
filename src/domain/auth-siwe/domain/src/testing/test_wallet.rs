// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::{Address, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use crate::ChallengeMessage;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Deterministic local key pair standing in for a browser wallet
#[derive(Clone)]
pub struct TestWallet {
    signer: PrivateKeySigner,
}

impl TestWallet {
    /// `seed` must be non-zero
    pub fn from_seed(seed: u8) -> Self {
        let signer = PrivateKeySigner::from_bytes(&B256::from([seed; 32])).unwrap();
        Self { signer }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// EIP-191 `personal_sign` over the canonical message text, hex encoded
    /// with a `0x` prefix
    pub fn sign(&self, message: &ChallengeMessage) -> String {
        self.sign_text(&message.to_canonical_string())
    }

    pub fn sign_text(&self, text: &str) -> String {
        let signature = self.signer.sign_message_sync(text.as_bytes()).unwrap();
        format!("0x{}", hex::encode(signature.as_bytes()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
