// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{NonceGenerator, SiweNonce};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Always hands out the same nonce
pub struct PredefinedNonceGenerator {
    nonce: SiweNonce,
}

impl PredefinedNonceGenerator {
    pub fn new(nonce: &str) -> Self {
        Self {
            nonce: SiweNonce::try_new(nonce).unwrap(),
        }
    }
}

impl NonceGenerator for PredefinedNonceGenerator {
    fn generate(&self) -> SiweNonce {
        self.nonce.clone()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
