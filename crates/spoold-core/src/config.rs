// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Server configuration loaded from environment variables.

use std::path::PathBuf;

/// Runtime configuration for the broker.
///
/// All fields have defaults suitable for a single-operator local install.
/// Override via environment variables (a `.env` file is honoured by the
/// server binary).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// URI of the local CUPS daemon for the native IPP path
    /// (default: `ipp://localhost:631`).
    pub cups_uri: String,
    /// Directory uploads are spooled to before submission
    /// (default: the system temp directory).
    pub spool_dir: PathBuf,
    /// Directory daily log files are written to (default: `logs`).
    pub log_dir: PathBuf,
    /// Directory the frontend build is served from (default: `frontend/dist`).
    pub static_dir: PathBuf,
    /// Seconds to wait after a successful submission before deleting the
    /// spooled file, giving the print subsystem time to read it
    /// (default: `5`).
    pub cleanup_delay_secs: u64,
    /// Per-attempt timeout for IPP and command-line dispatch calls in
    /// seconds (default: `30`).
    pub dispatch_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default               |
    /// |-------------------------|-----------------------|
    /// | `HOST`                  | `0.0.0.0`             |
    /// | `PORT`                  | `3000`                |
    /// | `CUPS_URI`              | `ipp://localhost:631` |
    /// | `SPOOL_DIR`             | system temp dir       |
    /// | `LOG_DIR`               | `logs`                |
    /// | `STATIC_DIR`            | `frontend/dist`       |
    /// | `CLEANUP_DELAY_SECS`    | `5`                   |
    /// | `DISPATCH_TIMEOUT_SECS` | `30`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cups_uri =
            std::env::var("CUPS_URI").unwrap_or_else(|_| "ipp://localhost:631".into());

        let spool_dir = std::env::var("SPOOL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        let log_dir = std::env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("frontend/dist"));

        let cleanup_delay_secs: u64 = std::env::var("CLEANUP_DELAY_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("CLEANUP_DELAY_SECS must be a valid u64");

        let dispatch_timeout_secs: u64 = std::env::var("DISPATCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("DISPATCH_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cups_uri,
            spool_dir,
            log_dir,
            static_dir,
            cleanup_delay_secs,
            dispatch_timeout_secs,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cups_uri: "ipp://localhost:631".into(),
            spool_dir: std::env::temp_dir(),
            log_dir: PathBuf::from("logs"),
            static_dir: PathBuf::from("frontend/dist"),
            cleanup_delay_secs: 5,
            dispatch_timeout_secs: 30,
        }
    }
}
