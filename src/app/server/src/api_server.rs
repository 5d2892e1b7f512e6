// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::Future;
use std::net::SocketAddr;

use axum::Extension;
use dill::Catalog;
use internal_error::ResultIntoInternal;

use crate::{AppError, HttpConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ApiServer {
    listener: tokio::net::TcpListener,
    router: axum::Router,
    local_addr: SocketAddr,
}

impl ApiServer {
    pub async fn new(catalog: Catalog, config: &HttpConfig) -> Result<Self, AppError> {
        let route_prefix = config.route_prefix.as_str();
        if !route_prefix.is_empty() && !route_prefix.starts_with('/') {
            return Err(AppError::invalid_value(
                "server.route_prefix",
                "must start with '/'",
            ));
        }

        let allowed_origins = config
            .cors_allowed_origins
            .iter()
            .map(|origin| {
                http::HeaderValue::from_str(origin)
                    .map_err(|e| AppError::invalid_value("server.cors_allowed_origins", e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let router = siwe_adapter_http::api_router(route_prefix)
            .layer(Extension(catalog))
            .layer(siwe_adapter_http::cors_layer(&allowed_origins))
            .layer(observability::axum::http_trace_layer());

        let address = SocketAddr::new(config.address, config.port);
        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|source| AppError::Bind { address, source })?;
        let local_addr = listener
            .local_addr()
            .context_int_err("resolving listener address")?;

        Ok(Self {
            listener,
            router,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub async fn run(self) -> Result<(), AppError> {
        self.run_until(std::future::pending()).await
    }

    /// Serves requests until `shutdown` resolves, then lets in-flight requests
    /// complete
    pub async fn run_until(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), AppError> {
        axum::serve(self.listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .context_int_err("serving HTTP requests")?;

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
