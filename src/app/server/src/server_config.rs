// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;

use duration_string::DurationString;
use serde::Deserialize;

use crate::AppError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Prefix of environment variables overriding the configuration, e.g.
/// `SIWE_CONFIG__SERVER__PORT=8080`
pub const CONFIG_ENV_VAR_PREFIX: &str = "SIWE_CONFIG";
pub const CONFIG_ENV_VAR_SEPARATOR: &str = "__";

/// Secret used to seal session cookies
pub const SESSION_PASSWORD_ENV_VAR: &str = "SIWE_SESSION_PASSWORD";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub environment: AppEnvironment,
    pub session: SessionSection,
    pub auth: AuthSection,
}

impl ServerConfig {
    /// Layers the optional YAML file and the `SIWE_CONFIG__*` environment
    /// variables over the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(CONFIG_ENV_VAR_PREFIX)
                    .separator(CONFIG_ENV_VAR_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_allowed_origins"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Same as [`ServerConfig::load`], but without consulting the process
    /// environment
    pub fn load_from_str(yaml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Mount point of the auth procedures
    pub route_prefix: String,
    /// Origins allowed to call the API with credentials. When empty, the
    /// origin of every request is allowed.
    pub cors_allowed_origins: Vec<String>,
}

impl HttpConfig {
    pub const DEFAULT_PORT: u16 = 5001;
    pub const DEFAULT_ROUTE_PREFIX: &'static str = "/trpc";
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: Self::DEFAULT_PORT,
            route_prefix: Self::DEFAULT_ROUTE_PREFIX.to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStoreKind {
    /// State is sealed into the cookie itself
    #[default]
    Cookie,
    /// State is kept in process memory, the cookie carries an opaque token
    InMemory,
}

#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    pub store: SessionStoreKind,
    pub cookie_name: String,
    pub ttl: DurationString,
    /// Defaults to `true` in production
    pub secure: Option<bool>,
    /// Secret sealing the cookies, at least 32 characters long
    pub password: Option<String>,
}

impl SessionSection {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            store: SessionStoreKind::default(),
            cookie_name: siwe_adapter_http::SessionCookieConfig::DEFAULT_NAME.to_string(),
            ttl: DurationString::new(Self::DEFAULT_TTL),
            secure: None,
            password: None,
        }
    }
}

impl fmt::Debug for SessionSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSection")
            .field("store", &self.store)
            .field("cookie_name", &self.cookie_name)
            .field("ttl", &self.ttl)
            .field("secure", &self.secure)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthSection {
    pub nonce_ttl: DurationString,
    /// Rejects expired nonces and messages outside of their validity window
    pub enforce_time_window: bool,
    /// When set, only messages issued for this domain are accepted
    pub expected_domain: Option<String>,
}

impl AuthSection {
    pub const DEFAULT_NONCE_TTL: Duration = Duration::from_secs(5 * 60);
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            nonce_ttl: DurationString::new(Self::DEFAULT_NONCE_TTL),
            enforce_time_window: true,
            expected_domain: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn to_chrono(
    key: &'static str,
    value: DurationString,
) -> Result<chrono::Duration, AppError> {
    let value: Duration = value.into();

    if value.is_zero() {
        return Err(AppError::invalid_value(key, "must be positive"));
    }

    chrono::Duration::from_std(value).map_err(|e| AppError::invalid_value(key, e))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
