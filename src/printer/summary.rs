// src/printer/summary.rs

//! CLI option `--summary` printing functions.
//! Only used by `gcsift.rs`.

use crate::common::{Count, Millis};
use crate::data::eventkind::EventKind;
use crate::printer::printers::format_micros;
use crate::readers::summary::{Summary, SummaryGcLogProcessor};

use std::io::{Result, Write};

use ::chrono::SecondsFormat;
#[allow(unused_imports)]
use ::si_trace_print::defñ;

/// Indentation of one level of summary output.
const OPT_SUMMARY_PRINT_INDENT1: &str = "  ";
/// Indentation of two levels of summary output.
const OPT_SUMMARY_PRINT_INDENT2: &str = "    ";

fn print_timestamp<W: Write>(
    out: &mut W,
    label: &str,
    timestamp_ms: Option<Millis>,
) -> Result<()> {
    match timestamp_ms {
        Some(timestamp_ms) => writeln!(
            out,
            "{}{:<22}: {} ({}s)",
            OPT_SUMMARY_PRINT_INDENT1,
            label,
            timestamp_ms,
            format_micros(timestamp_ms).trim_end_matches("ms"),
        ),
        None => writeln!(out, "{}{:<22}: -", OPT_SUMMARY_PRINT_INDENT1, label),
    }
}

/// Print the [`SummaryGcLogProcessor`] of one file.
pub fn print_summary_processor<W: Write>(
    out: &mut W,
    summary: &SummaryGcLogProcessor,
) -> Result<()> {
    defñ!();
    let indent = OPT_SUMMARY_PRINT_INDENT1;
    writeln!(out, "{}{:<22}: {}", indent, "collector", summary.collector_family)?;
    match summary.jdk_version {
        Some(jdk_version) => writeln!(out, "{}{:<22}: {}", indent, "JDK version", jdk_version)?,
        None => writeln!(out, "{}{:<22}: -", indent, "JDK version")?,
    }
    match &summary.jvm_start {
        Some(jvm_start) => writeln!(
            out,
            "{}{:<22}: {}",
            indent,
            "JVM start",
            jvm_start.to_rfc3339_opts(SecondsFormat::Millis, true)
        )?,
        None => writeln!(out, "{}{:<22}: -", indent, "JVM start")?,
    }
    writeln!(out, "{}{:<22}: {}", indent, "raw lines", summary.count_raw_lines)?;
    writeln!(out, "{}{:<22}: {}", indent, "chatter lines", summary.count_chatter)?;
    writeln!(out, "{}{:<22}: {}", indent, "logical lines", summary.count_logical_lines)?;
    writeln!(out, "{}{:<22}: {}", indent, "merged lines", summary.count_merged_lines)?;
    writeln!(out, "{}{:<22}: {}", indent, "records", summary.count_records_total())?;
    writeln!(out, "{}{:<22}: {}", indent, "pauses", summary.count_pauses())?;
    for (kind, count) in summary.count_records.iter() {
        let kind: &EventKind = kind;
        let count: &Count = count;
        writeln!(out, "{}{:<20}: {}", OPT_SUMMARY_PRINT_INDENT2, kind, count)?;
    }
    writeln!(out, "{}{:<22}: {}", indent, "unrecognized", summary.count_unrecognized)?;
    writeln!(out, "{}{:<22}: {}", indent, "incomplete merges", summary.count_incomplete_merges)?;
    writeln!(out, "{}{:<22}: {}", indent, "extraction failures", summary.count_extraction_failures)?;
    writeln!(out, "{}{:<22}: {}", indent, "unresolved timestamps", summary.count_unresolved_timestamps)?;
    print_timestamp(out, "first timestamp (ms)", summary.timestamp_first)?;
    print_timestamp(out, "last timestamp (ms)", summary.timestamp_last)?;

    Ok(())
}

/// Print the [`Summary`] of each file.
pub fn print_summary<W: Write>(
    out: &mut W,
    summaries: &[Summary],
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Files:")?;
    for summary in summaries.iter() {
        writeln!(out, "File: {}", summary.path)?;
        if let Some(error) = &summary.error {
            writeln!(out, "{}{:<22}: {}", OPT_SUMMARY_PRINT_INDENT1, "error", error)?;
            if summary.processor.count_raw_lines == 0 {
                continue;
            }
        }
        print_summary_processor(out, &summary.processor)?;
    }
    out.flush()?;

    Ok(())
}
