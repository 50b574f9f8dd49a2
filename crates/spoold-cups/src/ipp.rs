// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native dispatch path: async IPP against the local CUPS daemon.
//
// Discovery uses the CUPS-Get-Printers extension operation; submission is a
// standard Print-Job (RFC 8011 §4.2.1) addressed to the per-printer queue
// URI `<cups>/printers/<name>`.

use std::io::Cursor;
use std::path::Path;

use ipp::prelude::*;
use tracing::{debug, info, instrument};

use spoold_core::error::{Result, SpooldError};
use spoold_core::types::PrintOptions;

use crate::options;

/// The native IPP dispatch path, bound to one CUPS daemon.
pub struct IppDispatch {
    /// CUPS base URI, e.g. `ipp://localhost:631`.
    base: String,
    uri: Uri,
}

impl IppDispatch {
    /// Create a dispatch path targeting the given CUPS URI.
    pub fn new(cups_uri: &str) -> Result<Self> {
        let base = cups_uri.trim_end_matches('/').to_string();
        let uri: Uri = base
            .parse()
            .map_err(|e| SpooldError::IppRequest(format!("invalid CUPS URI '{base}': {e}")))?;
        Ok(Self { base, uri })
    }

    /// Enumerate printer names via CUPS-Get-Printers.
    #[instrument(skip(self), fields(uri = %self.uri))]
    pub async fn list_printers(&self) -> Result<Vec<String>> {
        let operation = IppOperationBuilder::cups().get_printers();
        let client = AsyncIppClient::new(self.uri.clone());

        debug!("sending CUPS-Get-Printers");
        let response = client
            .send(operation)
            .await
            .map_err(|e| SpooldError::IppRequest(format!("CUPS-Get-Printers: {e}")))?;

        if !response.header().status_code().is_success() {
            let code = response.header().status_code();
            return Err(SpooldError::IppRequest(format!(
                "CUPS-Get-Printers returned status {code:?}"
            )));
        }

        let printers = printer_names(response.attributes());
        debug!(count = printers.len(), "CUPS reported printers");
        Ok(printers)
    }

    /// Submit the file at `file_path` as a Print-Job with translated
    /// attributes.  Returns the daemon-assigned job-id as a string.
    #[instrument(skip(self, options), fields(printer = %options.printer))]
    pub async fn submit(&self, file_path: &Path, options: &PrintOptions) -> Result<String> {
        let document = tokio::fs::read(file_path).await?;
        let payload = IppPayload::new(Cursor::new(document));

        let printer_uri = self.printer_uri(&options.printer)?;
        let job_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".into());

        let operation = IppOperationBuilder::print_job(printer_uri.clone(), payload)
            .job_title(&job_name)
            .attributes(options::ipp_attributes(options))
            .build();

        let client = AsyncIppClient::new(printer_uri);

        info!(job_name = %job_name, "sending Print-Job");
        let response = client
            .send(operation)
            .await
            .map_err(|e| SpooldError::IppRequest(format!("Print-Job: {e}")))?;

        if !response.header().status_code().is_success() {
            let code = response.header().status_code();
            return Err(SpooldError::IppRequest(format!(
                "Print-Job returned status {code:?}"
            )));
        }

        let job_id = extract_job_id(response.attributes()).ok_or_else(|| {
            SpooldError::IppRequest("Print-Job response missing job-id attribute".into())
        })?;

        info!(job_id, "print job accepted by CUPS");
        Ok(job_id.to_string())
    }

    /// Per-printer queue URI under the CUPS base URI.
    fn printer_uri(&self, printer: &str) -> Result<Uri> {
        let raw = format!("{}/printers/{}", self.base, printer);
        raw.parse()
            .map_err(|e| SpooldError::IppRequest(format!("invalid printer URI '{raw}': {e}")))
    }
}

/// Collect the `printer-name` of each printer attribute group, in response
/// order.
fn printer_names(attrs: &IppAttributes) -> Vec<String> {
    attrs
        .groups_of(DelimiterTag::PrinterAttributes)
        .filter_map(|group| group.attributes().get("printer-name"))
        .map(|attr| format!("{}", attr.value()))
        .collect()
}

/// Extract the `job-id` integer from a response's Job Attributes group.
fn extract_job_id(attrs: &IppAttributes) -> Option<i32> {
    for group in attrs.groups_of(DelimiterTag::JobAttributes) {
        if let Some(attr) = group.attributes().get("job-id")
            && let IppValue::Integer(id) = attr.value()
        {
            return Some(*id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_uri() {
        let result = IppDispatch::new("not a valid uri %%%");
        assert!(result.is_err());
    }

    #[test]
    fn new_accepts_cups_uri_and_strips_trailing_slash() {
        let dispatch = IppDispatch::new("ipp://localhost:631/").expect("valid URI");
        let printer_uri = dispatch.printer_uri("HP1").expect("valid printer URI");
        assert_eq!(printer_uri.to_string(), "ipp://localhost:631/printers/HP1");
    }

    #[test]
    fn printer_uri_rejects_unparseable_names() {
        let dispatch = IppDispatch::new("ipp://localhost:631").expect("valid URI");
        assert!(dispatch.printer_uri("no spaces allowed").is_err());
    }
}
