// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parsers for the human-readable output of the CUPS command-line tools.
//
// `lp` confirms a submission in the locale of the host, so the job-ID
// parser is keyed on an ordered table of locale marker phrases.  An output
// that matches no marker (or a marker with nothing after it) is explicitly
// unparseable rather than guessed at.

/// Confirmation phrases printed by `lp`, one per supported locale.
/// The job identifier is the first whitespace-delimited token after the
/// phrase.
const JOB_ID_MARKERS: &[&str] = &[
    // English: "request id is HP_LaserJet-32 (1 file(s))"
    "request id is",
    // Chinese: "请求 ID 为 HP_LaserJet-32 (1 个文件)"
    "请求 ID 为",
];

/// Extract the job identifier from `lp` output.
///
/// The first marker present in the output decides the locale; trailing
/// annotations after the identifier (file counts in parentheses) are
/// excluded because the token ends at the first whitespace.  Returns `None`
/// when no marker matches or the marker is not followed by a token.
pub fn job_id(output: &str) -> Option<String> {
    for marker in JOB_ID_MARKERS {
        if let Some(pos) = output.find(marker) {
            let rest = &output[pos + marker.len()..];
            return rest.split_whitespace().next().map(str::to_string);
        }
    }
    None
}

/// Extract printer names from `lpstat -a` output.
///
/// Each non-empty line names one printer as the token preceding the first
/// space ("HP_LaserJet accepting requests since ...").  Line order is
/// preserved.
pub fn printer_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split(' ').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
