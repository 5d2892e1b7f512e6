// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod challenge_verifier;
mod nonce_generator;
mod nonce_service;
mod session_binder;

pub use challenge_verifier::*;
pub use nonce_generator::*;
pub use nonce_service::*;
pub use session_binder::*;
