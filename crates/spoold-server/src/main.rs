// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// spoold — local print-job broker.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use spoold_core::config::ServerConfig;
use spoold_cups::CupsDispatcher;
use spoold_server::{AppState, app, logging};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    logging::init(&config.log_dir);
    tracing::info!(
        host = %config.host,
        port = config.port,
        cups_uri = %config.cups_uri,
        "loaded server configuration"
    );

    let dispatcher = CupsDispatcher::detect(
        &config.cups_uri,
        Duration::from_secs(config.dispatch_timeout_secs),
    )
    .await;

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be a valid IP address"),
        config.port,
    );

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        config: Arc::new(config),
    };

    let app = app(state);

    tracing::info!("print broker listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
