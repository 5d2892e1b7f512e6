// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::CatalogBuilder;
use secrecy::SecretString;
use siwe_adapter_http::SessionCookieConfig;
use siwe_auth::{SessionConfig, SiweAuthConfig};
use siwe_session_cookie::{SessionSecret, SessionStoreCookie};
use siwe_session_inmem::SessionStoreInMemory;
use time_source::SystemTimeSourceDefault;

use crate::server_config::to_chrono;
use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "siwe-server";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOGGING_CONFIG: &str = "info";
const VERBOSE_LOGGING_CONFIG: &str = "debug";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(args: Cli) -> Result<(), AppError> {
    let _guard = configure_logging(&args);

    tracing::info!(
        version = VERSION,
        args = ?std::env::args().collect::<Vec<_>>(),
        "Initializing {BINARY_NAME}"
    );

    let result = serve(args).await;

    match &result {
        Ok(()) => tracing::info!("Server stopped"),
        Err(AppError::Internal(err)) => {
            tracing::error!(error_dbg = ?err, error = %err.reason(), "Server failed");
        }
        Err(err) => tracing::error!(error_dbg = ?err, error = %err, "Server failed"),
    }

    result
}

async fn serve(args: Cli) -> Result<(), AppError> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    apply_cli_overrides(&mut config, &args);

    tracing::info!(?config, "Loaded configuration");

    let catalog = configure_catalog(&config, std::env::var(SESSION_PASSWORD_ENV_VAR).ok())?.build();

    let api_server = ApiServer::new(catalog, &config.server).await?;

    tracing::info!(
        address = %api_server.local_addr(),
        route_prefix = %config.server.route_prefix,
        "HTTP API server is listening",
    );

    api_server.run_until(shutdown_signal()).await
}

pub fn apply_cli_overrides(config: &mut ServerConfig, args: &Cli) {
    if let Some(address) = args.address {
        config.server.address = address;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(environment) = args.environment {
        config.environment = environment;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Catalog
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registers every component serving the API. `session_password` takes
/// precedence over the one in the configuration.
pub fn configure_catalog(
    config: &ServerConfig,
    session_password: Option<String>,
) -> Result<CatalogBuilder, AppError> {
    let session_ttl = to_chrono("session.ttl", config.session.ttl.clone())?;

    if config.session.cookie_name.is_empty() {
        return Err(AppError::invalid_value(
            "session.cookie_name",
            "must not be empty",
        ));
    }

    let mut b = CatalogBuilder::new();

    b.add::<SystemTimeSourceDefault>();

    b.add_value(SiweAuthConfig {
        nonce_ttl: to_chrono("auth.nonce_ttl", config.auth.nonce_ttl.clone())?,
        enforce_time_window: config.auth.enforce_time_window,
        expected_domain: config.auth.expected_domain.clone(),
    });
    b.add_value(SessionConfig { ttl: session_ttl });
    b.add_value(SessionCookieConfig {
        name: config.session.cookie_name.clone(),
        secure: config
            .session
            .secure
            .unwrap_or(config.environment == AppEnvironment::Production),
        max_age: session_ttl,
        ..SessionCookieConfig::default()
    });

    siwe_auth_services::register_dependencies(&mut b);

    match config.session.store {
        SessionStoreKind::Cookie => {
            b.add_value(resolve_session_secret(config, session_password)?);
            b.add::<SessionStoreCookie>();
        }
        SessionStoreKind::InMemory => {
            b.add::<SessionStoreInMemory>();
        }
    }

    Ok(b)
}

/// Production deployments must provide a secret. In development an ephemeral
/// one is generated, so sessions do not survive a restart.
pub fn resolve_session_secret(
    config: &ServerConfig,
    session_password: Option<String>,
) -> Result<SessionSecret, AppError> {
    match session_password.or_else(|| config.session.password.clone()) {
        Some(password) => Ok(SessionSecret::new(&SecretString::from(password))?),
        None if config.environment == AppEnvironment::Production => {
            Err(AppError::MissingSessionSecret)
        }
        None => {
            tracing::warn!(
                "Session secret is not configured, using an ephemeral one. Set \
                 {SESSION_PASSWORD_ENV_VAR} to keep sessions across restarts"
            );
            Ok(SessionSecret::generate())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Logging
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn configure_logging(args: &Cli) -> observability::init::Guard {
    observability::panic_handler::set_hook_trace_panics(true);

    let config = observability::config::Config::new(BINARY_NAME)
        .with_default_log_levels(if args.verbose > 0 {
            VERBOSE_LOGGING_CONFIG
        } else {
            DEFAULT_LOGGING_CONFIG
        })
        .with_format(if args.log_json {
            observability::config::LogFormat::Json
        } else {
            observability::config::LogFormat::Pretty
        });

    observability::init::auto(&config)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
