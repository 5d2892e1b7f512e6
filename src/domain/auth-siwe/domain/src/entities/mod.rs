// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod challenge_message;
mod challenge_message_fields;
mod message_timestamp;
mod nonce_record;
mod session;
mod siwe_nonce;
mod verified_identity;

pub use challenge_message::*;
pub use challenge_message_fields::*;
pub use message_timestamp::*;
pub use nonce_record::*;
pub use session::*;
pub use siwe_nonce::*;
pub use verified_identity::*;
