// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dill::{Singleton, component, interface, scope};
use siwe_auth::*;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Keeps session records in process memory; the client only holds a random
/// token. Records do not survive restarts and are not shared between nodes.
pub struct SessionStoreInMemory {
    state: Arc<Mutex<State>>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<SessionConfig>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    records: HashMap<String, Record>,
}

struct Record {
    state: SessionState,
    expires_at: DateTime<Utc>,
}

impl State {
    fn evict_expired(&mut self, now: DateTime<Utc>) {
        self.records.retain(|_, record| record.expires_at > now);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[scope(Singleton)]
#[interface(dyn SessionStore)]
impl SessionStoreInMemory {
    pub fn new(time_source: Arc<dyn SystemTimeSource>, config: Option<Arc<SessionConfig>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            time_source,
            config: config.unwrap_or_default(),
        }
    }
}

impl SessionStoreInMemory {
    fn new_token() -> SessionToken {
        SessionToken::new(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SessionStore for SessionStoreInMemory {
    async fn load(&self, token: Option<&str>) -> Result<Session, LoadSessionError> {
        let Some(token) = token else {
            return Ok(Session::new_anonymous());
        };

        let now = self.time_source.now();
        let mut guard = self.state.lock().unwrap();
        guard.evict_expired(now);

        match guard.records.get(token) {
            Some(record) => Ok(Session::restored(
                SessionToken::new(token),
                record.state.clone(),
            )),
            None => {
                tracing::debug!("Unknown or expired session token");
                Ok(Session::new_anonymous())
            }
        }
    }

    async fn save(&self, session: &mut Session) -> Result<(), SaveSessionError> {
        let token = session.token().cloned().unwrap_or_else(Self::new_token);
        let expires_at = self.time_source.now() + self.config.ttl;

        {
            let mut guard = self.state.lock().unwrap();
            guard.records.insert(
                token.as_str().to_string(),
                Record {
                    state: session.state().clone(),
                    expires_at,
                },
            );
        }

        session.mark_persisted(token);
        Ok(())
    }

    async fn destroy(&self, session: &mut Session) -> Result<(), DestroySessionError> {
        if let Some(token) = session.token() {
            let mut guard = self.state.lock().unwrap();
            guard.records.remove(token.as_str());
        }

        session.mark_destroyed();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
