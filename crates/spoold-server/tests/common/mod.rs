// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared helpers for the HTTP integration tests.
//
// The dispatcher is assembled with the IPP path disabled and the CUPS
// command-line tools replaced by stub shell scripts, so the full
// request → spool → dispatch → outcome pipeline runs without a print
// subsystem.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use tower::ServiceExt;

use spoold_core::config::ServerConfig;
use spoold_cups::{CommandDispatch, CupsDispatcher};
use spoold_server::AppState;

pub const BOUNDARY: &str = "spoold-test-boundary";

pub struct TestContext {
    pub state: AppState,
    pub spool_dir: PathBuf,
    pub log_dir: PathBuf,
    _dirs: Vec<tempfile::TempDir>,
}

/// Write an executable stub script into `dir`.
pub fn stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create stub");
    writeln!(file, "#!/bin/sh\n{body}").expect("write stub");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod stub");
    path
}

/// Build a test context whose `lpstat` and `lp` are the given shell bodies.
pub fn test_context(lpstat_body: &str, lp_body: &str) -> TestContext {
    let stub_dir = tempfile::tempdir().expect("stub dir");
    let lpstat = stub(stub_dir.path(), "lpstat", lpstat_body);
    let lp = stub(stub_dir.path(), "lp", lp_body);
    context_with_programs(lpstat, lp, stub_dir)
}

/// Build a test context whose CUPS tools do not exist at all.
pub fn test_context_missing_tools() -> TestContext {
    let stub_dir = tempfile::tempdir().expect("stub dir");
    context_with_programs(
        PathBuf::from("/nonexistent/lpstat"),
        PathBuf::from("/nonexistent/lp"),
        stub_dir,
    )
}

fn context_with_programs(
    lpstat: PathBuf,
    lp: PathBuf,
    stub_dir: tempfile::TempDir,
) -> TestContext {
    let spool = tempfile::tempdir().expect("spool dir");
    let logs = tempfile::tempdir().expect("log dir");
    let statics = tempfile::tempdir().expect("static dir");
    std::fs::write(
        statics.path().join("index.html"),
        "<!doctype html><title>spoold</title>",
    )
    .expect("write index.html");

    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cups_uri: "ipp://localhost:631".into(),
        spool_dir: spool.path().to_path_buf(),
        log_dir: logs.path().to_path_buf(),
        static_dir: statics.path().to_path_buf(),
        cleanup_delay_secs: 0,
        dispatch_timeout_secs: 5,
    };

    let dispatcher = CupsDispatcher::new(
        None,
        CommandDispatch::with_programs(lpstat, lp),
        Duration::from_secs(config.dispatch_timeout_secs),
    );

    TestContext {
        state: AppState {
            dispatcher: Arc::new(dispatcher),
            config: Arc::new(config),
        },
        spool_dir: spool.path().to_path_buf(),
        log_dir: logs.path().to_path_buf(),
        _dirs: vec![stub_dir, spool, logs, statics],
    }
}

pub fn build_app(ctx: &TestContext) -> Router {
    spoold_server::app(ctx.state.clone())
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("JSON body")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Build a multipart POST to `/api/print` with optional `file` and
/// `options` parts.
pub fn print_request(file: Option<(&str, &[u8])>, options: Option<&str>) -> Request<Body> {
    let mut body = Vec::new();

    if let Some((filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(options_json) = options {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"options\"\r\n\r\n{options_json}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/print")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

/// Options JSON matching the frontend's wire format.
pub fn options_json() -> &'static str {
    r#"{"printer":"HP1","copies":2,"duplex":true,"color":false,"media":"A4","orientation":"portrait"}"#
}
