// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct PrintersResponse {
    printers: Vec<String>,
}

/// GET /api/printers
///
/// Enumerate printers known to the OS print subsystem.  Every call
/// re-queries; nothing is cached.
async fn list_printers(State(state): State<AppState>) -> AppResult<Json<PrintersResponse>> {
    let printers = state.dispatcher.list_printers().await.map_err(|e| {
        tracing::error!(error = %e, "printer discovery failed");
        AppError::Internal("unable to list printers".into())
    })?;

    info!(count = printers.len(), "printers listed");
    Ok(Json(PrintersResponse { printers }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/printers", get(list_printers))
}
