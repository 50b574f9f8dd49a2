// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tracing setup: stdout plus a daily log file.
//
// The file layer appends to `<log-dir>/spoold-YYYY-MM-DD.log`; these files
// are what the `/api/logs` endpoints list and read.  The writer re-resolves
// the file name on every log call, so the date rolls over without any timer
// machinery; a failure to open the file silently drops that line rather
// than taking down the logging path.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// File-name prefix for daily log files.
const LOG_FILE_PREFIX: &str = "spoold";

/// Configure and install the global tracing subscriber.
pub fn init(log_dir: &Path) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "spoold_server=debug,spoold_cups=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(DailyFileWriter::new(log_dir.to_path_buf())),
        )
        .init();
}

/// `MakeWriter` that appends to a date-stamped file in the log directory.
#[derive(Clone)]
pub struct DailyFileWriter {
    dir: PathBuf,
}

impl DailyFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Today's log file path.
    pub fn current_path(&self) -> PathBuf {
        let date = chrono::Utc::now().format("%Y-%m-%d");
        self.dir.join(format!("{LOG_FILE_PREFIX}-{date}.log"))
    }

    fn open(&self) -> io::Result<File> {
        std::fs::create_dir_all(&self.dir)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())
    }
}

impl<'a> MakeWriter<'a> for DailyFileWriter {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter {
            file: self.open().ok(),
        }
    }
}

/// Writer for a single log call.  `file` is `None` when the log file could
/// not be opened, in which case the line is dropped.
pub struct LogFileWriter {
    file: Option<File>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.file {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.file {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}
