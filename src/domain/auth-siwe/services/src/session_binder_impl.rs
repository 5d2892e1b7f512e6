// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use alloy_primitives::Address;
use internal_error::ResultIntoInternal;
use siwe_auth::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn SessionBinder)]
pub struct SessionBinderImpl {
    session_store: Arc<dyn SessionStore>,
}

#[async_trait::async_trait]
impl SessionBinder for SessionBinderImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(address = %identity.address))]
    async fn bind(
        &self,
        session: &mut Session,
        identity: VerifiedIdentity,
    ) -> Result<(), BindSessionError> {
        session.state_mut().siwe = Some(identity);

        self.session_store
            .save(session)
            .await
            .context_int_err("persisting bound identity")?;

        Ok(())
    }

    fn current_identity(&self, session: &Session) -> Option<Address> {
        session.address()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn unbind(&self, session: &mut Session) -> Result<(), UnbindSessionError> {
        self.session_store
            .destroy(session)
            .await
            .context_int_err("destroying session")?;

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
