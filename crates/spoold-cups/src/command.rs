// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line dispatch path: `lpstat` for discovery, `lp` for submission.
//
// `lp` reports success on stdout in the host locale; the exit status is not
// authoritative (older CUPS versions exit zero on queue errors), so the
// confirmation message itself is parsed for the job identifier.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, warn};

use spoold_core::error::{Result, SpooldError};
use spoold_core::types::PrintOptions;

use crate::options;
use crate::parse;

/// Fallback error message when `lp` produced no output at all.
const UNKNOWN_PRINT_ERROR: &str = "unknown print error";

/// The command-line dispatch path.
///
/// Program names are injectable so tests can substitute stub scripts for
/// the real CUPS tools.
pub struct CommandDispatch {
    lpstat_program: PathBuf,
    lp_program: PathBuf,
}

impl Default for CommandDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandDispatch {
    /// Dispatch via the `lpstat` and `lp` binaries on `PATH`.
    pub fn new() -> Self {
        Self {
            lpstat_program: PathBuf::from("lpstat"),
            lp_program: PathBuf::from("lp"),
        }
    }

    /// Dispatch via explicit program paths.
    pub fn with_programs(
        lpstat_program: impl Into<PathBuf>,
        lp_program: impl Into<PathBuf>,
    ) -> Self {
        Self {
            lpstat_program: lpstat_program.into(),
            lp_program: lp_program.into(),
        }
    }

    /// Enumerate printers via `lpstat -a`.
    ///
    /// Any failure of the command (spawn error or non-zero exit) is a
    /// discovery failure; there is no further fallback behind this path.
    pub async fn list_printers(&self) -> Result<Vec<String>> {
        debug!(program = %self.lpstat_program.display(), "listing printers via lpstat");

        let output = Command::new(&self.lpstat_program)
            .arg("-a")
            .output()
            .await
            .map_err(|e| {
                SpooldError::Discovery(format!(
                    "failed to run {}: {e}",
                    self.lpstat_program.display()
                ))
            })?;

        if !output.status.success() {
            return Err(SpooldError::Discovery(format!(
                "{} exited with {}: {}",
                self.lpstat_program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let printers = parse::printer_names(&stdout);
        debug!(count = printers.len(), "lpstat reported printers");
        Ok(printers)
    }

    /// Submit a file via `lp`, returning the job identifier parsed from the
    /// confirmation message.
    pub async fn submit(&self, file_path: &Path, options: &PrintOptions) -> Result<String> {
        let args = options::lp_args(options);
        debug!(
            program = %self.lp_program.display(),
            args = %args.join(" "),
            file = %file_path.display(),
            "submitting via lp"
        );

        let output = Command::new(&self.lp_program)
            .args(&args)
            .arg(file_path)
            .output()
            .await
            .map_err(|e| {
                SpooldError::CommandSpawn(format!("{}: {e}", self.lp_program.display()))
            })?;

        if !output.status.success() {
            warn!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "lp exited non-zero"
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        match parse::job_id(&stdout) {
            Some(job_id) => {
                info!(job_id = %job_id, printer = %options.printer, "lp confirmed job");
                Ok(job_id)
            }
            None => Err(SpooldError::JobUnconfirmed(if stdout.is_empty() {
                UNKNOWN_PRINT_ERROR.to_string()
            } else {
                stdout
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use spoold_core::types::Orientation;
    use std::io::Write;

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

    /// Write an executable stub script into `dir`.
    #[cfg(unix)]
    fn stub(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create stub");
        writeln!(file, "#!/bin/sh\n{body}").expect("write stub");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod stub");
        path
    }

    #[tokio::test]
    async fn submit_fails_with_spawn_error_for_missing_program() {
        let dispatch =
            CommandDispatch::with_programs("/nonexistent/lpstat", "/nonexistent/lp");
        let result = dispatch.submit(Path::new("/tmp/nothing.pdf"), &options()).await;
        assert_matches!(result, Err(SpooldError::CommandSpawn(_)));
    }

    #[tokio::test]
    async fn list_fails_with_discovery_error_for_missing_program() {
        let dispatch =
            CommandDispatch::with_programs("/nonexistent/lpstat", "/nonexistent/lp");
        let result = dispatch.list_printers().await;
        assert_matches!(result, Err(SpooldError::Discovery(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn submit_parses_job_id_from_stub_lp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lp = stub(&dir, "lp", r#"echo "request id is HP1-7 (1 file(s))""#);
        let dispatch = CommandDispatch::with_programs("lpstat", lp);

        let job_id = dispatch
            .submit(Path::new("/tmp/doc.pdf"), &options())
            .await
            .expect("stub lp confirms");
        assert_eq!(job_id, "HP1-7");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn submit_surfaces_raw_output_when_unconfirmed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lp = stub(&dir, "lp", r#"echo "lp: Error - unknown media size.""#);
        let dispatch = CommandDispatch::with_programs("lpstat", lp);

        let err = dispatch
            .submit(Path::new("/tmp/doc.pdf"), &options())
            .await
            .expect_err("no marker in output");
        assert_eq!(err.to_string(), "lp: Error - unknown media size.\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn submit_uses_generic_message_for_empty_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lp = stub(&dir, "lp", "true");
        let dispatch = CommandDispatch::with_programs("lpstat", lp);

        let err = dispatch
            .submit(Path::new("/tmp/doc.pdf"), &options())
            .await
            .expect_err("empty output");
        assert_eq!(err.to_string(), UNKNOWN_PRINT_ERROR);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn list_parses_stub_lpstat_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lpstat = stub(
            &dir,
            "lpstat",
            r#"printf 'HP_LaserJet accepting requests since Mon\nOffice_Mono accepting requests since Mon\n'"#,
        );
        let dispatch = CommandDispatch::with_programs(lpstat, "lp");

        let printers = dispatch.list_printers().await.expect("stub lpstat");
        assert_eq!(printers, vec!["HP_LaserJet", "Office_Mono"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn list_fails_on_nonzero_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lpstat = stub(&dir, "lpstat", "echo 'lpstat: broken' >&2; exit 1");
        let dispatch = CommandDispatch::with_programs(lpstat, "lp");

        let err = dispatch.list_printers().await.expect_err("non-zero exit");
        assert_matches!(err, SpooldError::Discovery(message) => {
            assert!(message.contains("lpstat: broken"));
        });
    }
}
