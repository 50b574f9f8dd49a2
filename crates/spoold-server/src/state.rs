// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared application state.

use std::sync::Arc;

use spoold_core::config::ServerConfig;
use spoold_cups::CupsDispatcher;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<CupsDispatcher>,
    pub config: Arc<ServerConfig>,
}
