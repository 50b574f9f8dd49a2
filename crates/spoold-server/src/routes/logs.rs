// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Log inspection endpoints over the daily log files written by the file
// tracing layer.

use axum::extract::{Path as UrlPath, State};
use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Cap on lines returned by the read endpoint, to keep responses bounded
/// for long-running installs.
const MAX_RETURNED_LINES: usize = 1000;

#[derive(Serialize)]
pub struct LogFileInfo {
    name: String,
    size: u64,
    created: Option<DateTime<Utc>>,
    modified: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct LogListResponse {
    files: Vec<LogFileInfo>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogContentResponse {
    filename: String,
    content: String,
    total_lines: usize,
    returned_lines: usize,
}

/// GET /api/logs
///
/// List `*.log` files in the log directory, newest first by name (the
/// date-stamped naming makes lexicographic order chronological).
async fn list_logs(State(state): State<AppState>) -> AppResult<Json<LogListResponse>> {
    let mut entries = tokio::fs::read_dir(&state.config.log_dir)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, dir = %state.config.log_dir.display(), "cannot read log directory");
            AppError::Internal("unable to read log directory".into())
        })?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::Internal(format!("failed to read log directory entry: {e}")))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".log") {
            continue;
        }

        let metadata = entry
            .metadata()
            .await
            .map_err(|e| AppError::Internal(format!("failed to stat {name}: {e}")))?;

        files.push(LogFileInfo {
            name,
            size: metadata.len(),
            created: metadata.created().ok().map(DateTime::<Utc>::from),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        });
    }

    files.sort_by(|a, b| b.name.cmp(&a.name));
    Ok(Json(LogListResponse { files }))
}

/// GET /api/logs/{filename}
///
/// Return the tail of one log file (at most `MAX_RETURNED_LINES` lines).
async fn read_log(
    State(state): State<AppState>,
    UrlPath(filename): UrlPath<String>,
) -> AppResult<Json<LogContentResponse>> {
    // The parameter names a file directly inside the log directory.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(AppError::BadRequest("invalid log file name".into()));
    }

    let path = state.config.log_dir.join(&filename);
    let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(format!("log file {filename} not found"))
        } else {
            tracing::error!(error = %e, path = %path.display(), "cannot read log file");
            AppError::Internal("unable to read log file".into())
        }
    })?;

    let lines: Vec<&str> = content.lines().filter(|line| !line.is_empty()).collect();
    let total_lines = lines.len();
    let start = total_lines.saturating_sub(MAX_RETURNED_LINES);
    let recent = &lines[start..];

    Ok(Json(LogContentResponse {
        filename,
        content: recent.join("\n"),
        total_lines,
        returned_lines: recent.len(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logs))
        .route("/{filename}", get(read_log))
}
