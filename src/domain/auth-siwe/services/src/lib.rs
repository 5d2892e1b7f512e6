// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod challenge_verifier_impl;
mod dependencies;
mod nonce_generator_default;
mod nonce_service_impl;
mod session_binder_impl;
mod use_cases;

pub use challenge_verifier_impl::*;
pub use dependencies::*;
pub use nonce_generator_default::*;
pub use nonce_service_impl::*;
pub use session_binder_impl::*;
pub use use_cases::*;
