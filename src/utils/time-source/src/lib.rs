// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Abstracts away the system clock so that expiry logic can be tested
/// deterministically
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn SystemTimeSource)]
pub struct SystemTimeSourceDefault;

impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Returns a pinned time when one is set and falls back to the real clock
/// otherwise. Clones share the same pinned value.
#[derive(Debug, Clone, Default)]
pub struct SystemTimeSourceStub {
    pinned: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl SystemTimeSourceStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_set(t: DateTime<Utc>) -> Self {
        Self {
            pinned: Arc::new(Mutex::new(Some(t))),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        *self.pinned.lock().unwrap() = Some(t);
    }

    pub fn unset(&self) {
        *self.pinned.lock().unwrap() = None;
    }

    pub fn advance(&self, delta: Duration) {
        let mut pinned = self.pinned.lock().unwrap();
        let current = pinned.unwrap_or_else(Utc::now);
        *pinned = Some(current + delta);
    }
}

impl SystemTimeSource for SystemTimeSourceStub {
    fn now(&self) -> DateTime<Utc> {
        self.pinned.lock().unwrap().unwrap_or_else(Utc::now)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
