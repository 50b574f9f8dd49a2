// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job submission: multipart upload → spool file → dispatcher → outcome.
//
// The response is always the `SubmissionOutcome` shape (`{"jobId": ..}` or
// `{"error": ..}`) with status 200 — submission failures are part of the
// API, not HTTP errors.  Only request validation failures use 4xx.

use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::{Json, Router, routing::post};
use tracing::{info, warn};
use uuid::Uuid;

use spoold_core::error::SpooldError;
use spoold_core::types::{PrintOptions, SubmissionOutcome};

use crate::cleanup;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// File extensions accepted for printing.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "png", "jpg", "jpeg"];

/// POST /api/print
///
/// Multipart form with a `file` part (the document) and an `options` part
/// (JSON-encoded `PrintOptions`).
async fn submit_job(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<SubmissionOutcome>> {
    let mut upload: Option<(String, axum::body::Bytes)> = None;
    let mut options_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                upload = Some((filename, data));
            }
            "options" => {
                options_raw = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::BadRequest("no file uploaded".into()))?;
    let options_raw =
        options_raw.ok_or_else(|| AppError::BadRequest("missing print options".into()))?;

    let options: PrintOptions = serde_json::from_str(&options_raw)
        .map_err(|e| SpooldError::InvalidOptions(e.to_string()))?;

    if !allowed_extension(&filename) {
        warn!(filename = %filename, "rejected unsupported file type");
        return Err(SpooldError::UnsupportedDocument(filename).into());
    }

    info!(
        filename = %filename,
        printer = %options.printer,
        copies = options.copies,
        "print request received"
    );

    // Spool the upload under a unique name so concurrent uploads of the
    // same file cannot collide.
    let spool_path = state
        .config
        .spool_dir
        .join(format!("{}_{}", Uuid::new_v4(), file_name_component(&filename)));
    tokio::fs::write(&spool_path, &data)
        .await
        .map_err(|e| AppError::Internal(format!("failed to spool upload: {e}")))?;
    info!(path = %spool_path.display(), bytes = data.len(), "upload spooled");

    let outcome = state.dispatcher.submit(&spool_path, &options).await;

    match &outcome {
        SubmissionOutcome::Submitted { job_id } => {
            info!(job_id = %job_id, "print job submitted");
            cleanup::after_delay(
                spool_path,
                Duration::from_secs(state.config.cleanup_delay_secs),
            );
        }
        SubmissionOutcome::Rejected { error } => {
            warn!(error = %error, "print job rejected");
            cleanup::now(spool_path).await;
        }
    }

    Ok(Json(outcome))
}

/// Whether `filename` carries one of the printable extensions
/// (case-insensitive).
fn allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Final path component of a client-supplied file name; browsers may send
/// full paths.
fn file_name_component(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("upload")
}

pub fn router() -> Router<AppState> {
    Router::new().route("/print", post(submit_job))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_accepted_case_insensitively() {
        assert!(allowed_extension("report.pdf"));
        assert!(allowed_extension("report.PDF"));
        assert!(allowed_extension("letter.DocX"));
        assert!(allowed_extension("scan.jpeg"));
    }

    #[test]
    fn unsupported_extensions_rejected() {
        assert!(!allowed_extension("script.exe"));
        assert!(!allowed_extension("notes.txt"));
        assert!(!allowed_extension("no-extension"));
        assert!(!allowed_extension("trailing-dot."));
    }

    #[test]
    fn file_name_component_strips_paths() {
        assert_eq!(file_name_component("report.pdf"), "report.pdf");
        assert_eq!(file_name_component("/home/user/report.pdf"), "report.pdf");
        assert_eq!(file_name_component(r"C:\Users\u\report.pdf"), "report.pdf");
        assert_eq!(file_name_component("dir/"), "upload");
    }
}
