// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The dispatcher: an ordered pair of dispatch paths with silent degradation.
//
// The IPP path is probed once at startup; when present it is tried first
// for every operation, and any failure (including timeout) degrades to the
// command-line path without surfacing.  Command-path failure is terminal
// for that call.  Submission failures are flattened to the
// `SubmissionOutcome` error shape — `submit` never returns an error to its
// caller.

use std::path::Path;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{error, info, warn};

use spoold_core::error::{Result, SpooldError};
use spoold_core::types::{PrintOptions, SubmissionOutcome};

use crate::command::CommandDispatch;
use crate::ipp::IppDispatch;

pub struct CupsDispatcher {
    /// Native path; `None` when the startup probe found no reachable CUPS
    /// daemon.
    ipp: Option<IppDispatch>,
    command: CommandDispatch,
    /// Per-attempt timeout.  An unresponsive path must not stall a request
    /// indefinitely.
    attempt_timeout: Duration,
}

impl CupsDispatcher {
    /// Assemble a dispatcher from explicit paths.
    pub fn new(
        ipp: Option<IppDispatch>,
        command: CommandDispatch,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            ipp,
            command,
            attempt_timeout,
        }
    }

    /// Probe the CUPS daemon at `cups_uri` and assemble the dispatcher.
    ///
    /// The probe is a CUPS-Get-Printers round-trip; on any failure the
    /// native path is disabled for the lifetime of the process and every
    /// operation goes straight to the command-line tools.
    pub async fn detect(cups_uri: &str, attempt_timeout: Duration) -> Self {
        let ipp = match IppDispatch::new(cups_uri) {
            Ok(dispatch) => match timeout(attempt_timeout, dispatch.list_printers()).await {
                Ok(Ok(printers)) => {
                    info!(
                        uri = %cups_uri,
                        printers = printers.len(),
                        "CUPS daemon reachable, native IPP path enabled"
                    );
                    Some(dispatch)
                }
                Ok(Err(e)) => {
                    warn!(uri = %cups_uri, error = %e, "CUPS daemon not reachable, using command-line tools");
                    None
                }
                Err(_) => {
                    warn!(uri = %cups_uri, "CUPS probe timed out, using command-line tools");
                    None
                }
            },
            Err(e) => {
                warn!(uri = %cups_uri, error = %e, "invalid CUPS URI, using command-line tools");
                None
            }
        };

        Self::new(ipp, CommandDispatch::new(), attempt_timeout)
    }

    /// Whether the native IPP path is enabled.
    pub fn ipp_available(&self) -> bool {
        self.ipp.is_some()
    }

    /// Enumerate printers known to the OS print subsystem.
    ///
    /// Fails with `SpooldError::Discovery` only when both paths fail.  No
    /// caching — each call re-queries the OS — and no ordering guarantee
    /// beyond whatever the underlying source returns.
    pub async fn list_printers(&self) -> Result<Vec<String>> {
        if let Some(ipp) = &self.ipp {
            match timeout(self.attempt_timeout, ipp.list_printers()).await {
                Ok(Ok(printers)) => return Ok(printers),
                Ok(Err(e)) => {
                    warn!(error = %e, "IPP enumeration failed, falling back to lpstat");
                }
                Err(_) => {
                    warn!(
                        timeout_secs = self.attempt_timeout.as_secs(),
                        "IPP enumeration timed out, falling back to lpstat"
                    );
                }
            }
        }

        match timeout(self.attempt_timeout, self.command.list_printers()).await {
            Ok(result) => result,
            Err(_) => Err(SpooldError::Discovery(format!(
                "lpstat timed out after {}s",
                self.attempt_timeout.as_secs()
            ))),
        }
    }

    /// Submit a spooled file for printing.
    ///
    /// Triggers a real print job — irreversible from here; cancellation is
    /// not supported.  All failure paths are converted into the outcome's
    /// error shape; the caller always receives exactly one of a job ID or
    /// an error message.
    pub async fn submit(&self, file_path: &Path, options: &PrintOptions) -> SubmissionOutcome {
        if let Some(ipp) = &self.ipp {
            match timeout(self.attempt_timeout, ipp.submit(file_path, options)).await {
                Ok(Ok(job_id)) => {
                    info!(job_id = %job_id, printer = %options.printer, "submitted via IPP");
                    return SubmissionOutcome::Submitted { job_id };
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "IPP submission failed, falling back to lp");
                }
                Err(_) => {
                    warn!(
                        timeout_secs = self.attempt_timeout.as_secs(),
                        "IPP submission timed out, falling back to lp"
                    );
                }
            }
        }

        match timeout(self.attempt_timeout, self.command.submit(file_path, options)).await {
            Ok(Ok(job_id)) => {
                info!(job_id = %job_id, printer = %options.printer, "submitted via lp");
                SubmissionOutcome::Submitted { job_id }
            }
            Ok(Err(e)) => {
                error!(error = %e, printer = %options.printer, "print submission failed");
                SubmissionOutcome::Rejected {
                    error: e.to_string(),
                }
            }
            Err(_) => {
                error!(
                    timeout_secs = self.attempt_timeout.as_secs(),
                    printer = %options.printer,
                    "print command timed out"
                );
                SubmissionOutcome::Rejected {
                    error: format!(
                        "print command timed out after {}s",
                        self.attempt_timeout.as_secs()
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoold_core::types::Orientation;

    fn options() -> PrintOptions {
        PrintOptions {
            printer: "HP1".into(),
            copies: 1,
            duplex: false,
            color: false,
            media: "A4".into(),
            orientation: Orientation::Portrait,
            page_range: None,
        }
    }

    fn command_only(command: CommandDispatch) -> CupsDispatcher {
        CupsDispatcher::new(None, command, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn submit_always_yields_an_outcome() {
        // Both paths unavailable: the failure must still arrive as a
        // Rejected outcome, never a panic or an Err.
        let dispatcher = command_only(CommandDispatch::with_programs(
            "/nonexistent/lpstat",
            "/nonexistent/lp",
        ));

        let outcome = dispatcher
            .submit(Path::new("/tmp/doc.pdf"), &options())
            .await;
        match outcome {
            SubmissionOutcome::Rejected { error } => {
                assert!(!error.is_empty());
            }
            SubmissionOutcome::Submitted { .. } => panic!("nonexistent lp cannot succeed"),
        }
    }

    #[tokio::test]
    async fn list_printers_fails_with_discovery_error_when_all_paths_fail() {
        let dispatcher = command_only(CommandDispatch::with_programs(
            "/nonexistent/lpstat",
            "/nonexistent/lp",
        ));

        let err = dispatcher.list_printers().await.expect_err("no paths");
        assert!(matches!(err, SpooldError::Discovery(_)));
    }
}
