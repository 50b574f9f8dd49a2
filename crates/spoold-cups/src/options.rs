// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Translation of `PrintOptions` into the vocabulary of each dispatch path:
// IPP job attributes for the native path, `lp` flags for the command path.
//
// Values are passed through without semantic validation; an unknown media
// size or out-of-range copy count is the print subsystem's to reject.

use ipp::prelude::*;

use spoold_core::types::PrintOptions;

/// Build the IPP job attributes for a Print-Job request.
pub fn ipp_attributes(options: &PrintOptions) -> Vec<IppAttribute> {
    let mut attrs = vec![
        IppAttribute::new("copies", IppValue::Integer(options.copies as i32)),
        IppAttribute::new(
            "sides",
            IppValue::Keyword(options.sides_keyword().to_string()),
        ),
        IppAttribute::new(
            "ColorModel",
            IppValue::Keyword(options.color_model().to_string()),
        ),
        IppAttribute::new("media", IppValue::Keyword(options.media.clone())),
        IppAttribute::new(
            "orientation-requested",
            IppValue::Enum(options.orientation.ipp_enum_value()),
        ),
    ];

    if let Some(range) = &options.page_range {
        attrs.push(IppAttribute::new("page-ranges", page_ranges_value(range)));
    }

    attrs
}

/// Build the `lp` argument list for the command path.
///
/// The spooled file path is appended separately by the caller as the final
/// positional argument.
pub fn lp_args(options: &PrintOptions) -> Vec<String> {
    let mut args = vec![
        "-d".into(),
        options.printer.clone(),
        "-n".into(),
        options.copies.to_string(),
        "-o".into(),
        format!("media={}", options.media),
        "-o".into(),
        format!("sides={}", options.sides_keyword()),
        "-o".into(),
        format!("ColorModel={}", options.color_model()),
        "-o".into(),
        format!(
            "orientation-requested={}",
            options.orientation.ipp_enum_value()
        ),
    ];

    if let Some(range) = &options.page_range {
        args.push("-P".into());
        args.push(range.clone());
    }

    args
}

/// Encode a page-range string for the IPP `page-ranges` attribute.
///
/// The wire format requires rangeOfInteger values, so a cleanly parsing
/// range string ("1-3,5") is converted; anything else is sent verbatim as a
/// keyword and left for the printer to reject.
fn page_ranges_value(raw: &str) -> IppValue {
    match parse_page_ranges(raw) {
        Some(ranges) if ranges.len() == 1 => IppValue::RangeOfInteger {
            min: ranges[0].0,
            max: ranges[0].1,
        },
        Some(ranges) => IppValue::Array(
            ranges
                .into_iter()
                .map(|(start, end)| IppValue::RangeOfInteger { min: start, max: end })
                .collect(),
        ),
        None => IppValue::Keyword(raw.to_string()),
    }
}

/// Parse "1-3,5" into [(1,3), (5,5)].  `None` when any piece fails to parse.
fn parse_page_ranges(raw: &str) -> Option<Vec<(i32, i32)>> {
    let mut ranges = Vec::new();
    for piece in raw.split(',') {
        let piece = piece.trim();
        let (start, end) = match piece.split_once('-') {
            Some((a, b)) => (a.trim().parse().ok()?, b.trim().parse().ok()?),
            None => {
                let page: i32 = piece.parse().ok()?;
                (page, page)
            }
        };
        ranges.push((start, end));
    }
    if ranges.is_empty() { None } else { Some(ranges) }
}
