// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spool-file cleanup.
//
// After a successful submission the file is kept around briefly so the
// print subsystem can finish reading it, then removed by a one-shot
// deferred task.  Failed submissions clean up immediately.  Removal
// failures are logged and otherwise ignored — the file may leak.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

/// Remove `path` after `delay`, from a detached task.
pub fn after_delay(path: PathBuf, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        remove(&path).await;
    });
}

/// Remove `path` right away.
pub async fn now(path: PathBuf) {
    remove(&path).await;
}

async fn remove(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "spool file removed"),
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove spool file"),
    }
}
