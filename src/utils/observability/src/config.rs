// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output, meant for local development
    #[default]
    Pretty,
    /// One JSON object per line, meant for log collectors
    Json,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Config {
    pub service_name: String,
    /// Used when `RUST_LOG` is not set
    pub default_log_levels: String,
    pub format: LogFormat,
}

impl Config {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            default_log_levels: "info".to_string(),
            format: LogFormat::default(),
        }
    }

    pub fn with_default_log_levels(mut self, default_log_levels: impl Into<String>) -> Self {
        self.default_log_levels = default_log_levels.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
