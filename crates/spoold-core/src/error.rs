// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for spoold.

use thiserror::Error;

/// Top-level error type for all spoold operations.
#[derive(Debug, Error)]
pub enum SpooldError {
    // -- Dispatch errors --
    #[error("printer discovery failed: {0}")]
    Discovery(String),

    #[error("IPP request failed: {0}")]
    IppRequest(String),

    #[error("failed to spawn print command: {0}")]
    CommandSpawn(String),

    /// `lp` produced output with no recognizable job identifier.  The payload
    /// is the raw command output (or a generic message when it was empty) and
    /// is surfaced to the caller verbatim.
    #[error("{0}")]
    JobUnconfirmed(String),

    // -- Endpoint errors --
    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("invalid print options: {0}")]
    InvalidOptions(String),

    // -- I/O / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SpooldError>;
