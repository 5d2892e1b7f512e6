// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod auth_logout_handler;
mod auth_me_handler;
mod auth_nonce_handler;
mod auth_verify_handler;

pub use auth_logout_handler::*;
pub use auth_me_handler::*;
pub use auth_nonce_handler::*;
pub use auth_verify_handler::*;
