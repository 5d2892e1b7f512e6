// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::ResultIntoInternal;
use siwe_auth::*;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct NonceServiceImpl {
    nonce_generator: Arc<dyn NonceGenerator>,
    session_store: Arc<dyn SessionStore>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<SiweAuthConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn NonceService)]
impl NonceServiceImpl {
    fn new(
        nonce_generator: Arc<dyn NonceGenerator>,
        session_store: Arc<dyn SessionStore>,
        time_source: Arc<dyn SystemTimeSource>,
        config: Option<Arc<SiweAuthConfig>>,
    ) -> Self {
        Self {
            nonce_generator,
            session_store,
            time_source,
            config: config.unwrap_or_default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl NonceService for NonceServiceImpl {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn issue_nonce(&self, session: &mut Session) -> Result<NonceRecord, IssueNonceError> {
        let record = NonceRecord::new(
            self.nonce_generator.generate(),
            self.time_source.now(),
            self.config.nonce_ttl,
        );

        if session.state().nonce.is_some() {
            tracing::debug!("Replacing outstanding nonce");
        }
        session.state_mut().nonce = Some(record.clone());

        self.session_store
            .save(session)
            .await
            .context_int_err("persisting issued nonce")?;

        tracing::debug!(expiration_time = %record.expiration_time, "Nonce issued");

        Ok(record)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
