// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the spoold print broker.

use serde::{Deserialize, Serialize};

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// IPP `orientation-requested` enum value (RFC 8011 §5.2.10).
    pub fn ipp_enum_value(&self) -> i32 {
        match self {
            Self::Portrait => 3,
            Self::Landscape => 4,
        }
    }
}

/// Print options as submitted by the client.
///
/// Deserialized from the JSON `options` part of a print request.  Values are
/// checked for parseability only; semantic validation (does the printer
/// exist, is the media size known) is left to the OS print subsystem, whose
/// rejection text becomes the surfaced error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    /// Target printer name, as reported by discovery.  Opaque; not
    /// canonicalized.
    pub printer: String,
    /// Number of copies.
    pub copies: u32,
    /// Double-sided printing (long edge).
    #[serde(default)]
    pub duplex: bool,
    /// Colour output; false means grayscale.
    #[serde(default)]
    pub color: bool,
    /// Media size identifier, e.g. "A4".
    pub media: String,
    pub orientation: Orientation,
    /// Optional page selection, e.g. "1-3,5".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_range: Option<String>,
}

impl PrintOptions {
    /// IPP `sides` keyword (RFC 8011 §5.2.8) for the duplex flag.
    pub fn sides_keyword(&self) -> &'static str {
        if self.duplex {
            "two-sided-long-edge"
        } else {
            "one-sided"
        }
    }

    /// CUPS `ColorModel` value for the colour flag.
    pub fn color_model(&self) -> &'static str {
        if self.color { "Color" } else { "Gray" }
    }
}

/// The result of a single submission attempt.
///
/// Exactly one of the two variants is produced — a job identifier when the
/// print subsystem confirmed the job, or a human-readable error message.
/// Serializes to `{"jobId": ...}` or `{"error": ...}` respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionOutcome {
    Submitted {
        #[serde(rename = "jobId")]
        job_id: String,
    },
    Rejected {
        error: String,
    },
}

impl SubmissionOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}
