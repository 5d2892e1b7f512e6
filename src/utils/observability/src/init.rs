// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::{Config, LogFormat};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Keeps the background log writer alive - dropping it flushes and stops
/// logging
#[must_use]
#[derive(Default)]
pub struct Guard {
    pub appender: Option<WorkerGuard>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Installs the global tracing subscriber.
///
/// Uses `RUST_LOG` when present and falls back to
/// [`Config::default_log_levels`] otherwise.
pub fn auto(cfg: &Config) -> Guard {
    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return Guard::default();
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.default_log_levels));

    let (writer, appender_guard) = tracing_appender::non_blocking(std::io::stderr());

    match cfg.format {
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(writer)
                .pretty()
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .init();
        }
    }

    tracing::debug!(service_name = %cfg.service_name, "Logging initialized");

    Guard {
        appender: Some(appender_guard),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
