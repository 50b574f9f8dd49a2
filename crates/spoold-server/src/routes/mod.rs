// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod logs;
pub mod print;
pub mod printers;

/// All routes mounted under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(printers::router())
        .merge(print::router())
        .nest("/logs", logs::router())
}
