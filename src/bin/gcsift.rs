// src/bin/gcsift.rs

//! Driver program _gcsift_ drives the [_gcslib_].
//!
//! Processes user-passed command-line arguments.
//! Then processes each passed path in order, or STDIN for path `-`.
//! Each path is read line by line and driven through one
//! [`GcLogProcessor`]. Each emitted [`EventRecord`] is printed to STDOUT,
//! one per line, colored by collector family.
//!
//! Per-line notifications are counted, and with `--print-unrecognized`
//! printed to STDERR. An error that stops processing of one path
//! (unreadable file, ambiguous catalog match, missing JVM start with
//! `--strict-timestamps`) is printed to STDERR and processing continues
//! with the next path; the process exit code is then non-zero.
//!
//! If passed CLI option `--summary`, a [`Summary`] about each path is
//! printed to STDERR.
//!
//! [_gcslib_]: gcslib
//! [`GcLogProcessor`]: gcslib::readers::gclogprocessor::GcLogProcessor
//! [`EventRecord`]: gcslib::data::eventrecord::EventRecord
//! [`Summary`]: gcslib::readers::summary::Summary

#![allow(non_camel_case_types)]

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::process::ExitCode;

use ::anyhow::{Context, Result};
use ::chrono::DateTime;
use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::gcslib::common::{FPath, JdkVersion, FPATH_STDIN, MERGE_LINES_MAX_DEFAULT};
use ::gcslib::data::decorator::DateTimeL;
use ::gcslib::data::eventrecord::EventRecord;
use ::gcslib::debug::printers::e_err;
use ::gcslib::printer::printers::{
    print_colored_stderr,
    ColorChoice,
    PrinterEventRecord,
    COLOR_ERROR,
};
use ::gcslib::printer::summary::print_summary;
use ::gcslib::readers::gclogprocessor::{
    GcLogProcessor,
    GcLogProcessorConfig,
    Notification,
    NotificationSink,
};
use ::gcslib::readers::summary::Summary;
use ::termcolor::StandardStream;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// --------------------
// command-line parsing

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.1.2/termcolor/enum.ColorChoice.html
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = r#"JVM_START may be RFC 3339, e.g. "2024-01-02T03:04:05.678+00:00",
or the unified logging datestamp form, e.g. "2024-01-02T03:04:05.678+0000".
If JVM_START is not passed it is derived from the first line decorated
with both a datestamp and an uptime.

Records are printed to STDOUT, one per line.
Notifications and the summary are printed to STDERR."#;

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "gcsift",
    // write expanded information for the `--version` output
    version = concatcp!(
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of JVM unified GC log files.
    /// Pass "-" to read the log from STDIN.
    #[clap(required = true, verbatim_doc_comment)]
    paths: Vec<String>,

    /// Wall-clock time the JVM started, for logs decorated with
    /// datestamps only.
    #[clap(
        long = "jvm-start",
        verbatim_doc_comment,
        value_parser = cli_process_jvm_start,
    )]
    jvm_start: Option<DateTimeL>,

    /// JDK major version that wrote the log, e.g. "17".
    /// If not passed it is taken from the "Version:" header line.
    #[clap(long = "jdk-version", verbatim_doc_comment)]
    jdk_version: Option<JdkVersion>,

    /// A datestamp-only line without a known JVM start is an error that
    /// stops processing of that file.
    #[clap(long = "strict-timestamps", verbatim_doc_comment)]
    strict_timestamps: bool,

    /// Try every grammar on every line and stop on an ambiguous match.
    /// Slower. Most useful for developers.
    #[clap(long = "verify-catalog", verbatim_doc_comment)]
    verify_catalog: bool,

    /// Bound on the raw lines of one multi-line event.
    #[clap(
        long = "merge-lines-max",
        verbatim_doc_comment,
        default_value_t = MERGE_LINES_MAX_DEFAULT,
    )]
    merge_lines_max: usize,

    /// Print per-line notifications (unrecognized lines, incomplete
    /// multi-line events, conversion failures) to STDERR.
    #[clap(long = "print-unrecognized", verbatim_doc_comment)]
    print_unrecognized: bool,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Prepend file path to every line.
    #[clap(short = 'p', long = "prepend-filepath", verbatim_doc_comment)]
    prepend_filepath: bool,

    /// Print a summary of files processed to STDERR.
    #[clap(short, long, verbatim_doc_comment)]
    summary: bool,
}

/// `clap` argument processor for `--jvm-start`.
fn cli_process_jvm_start(jvm_start: &str) -> std::result::Result<DateTimeL, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(jvm_start) {
        return Ok(dt);
    }
    match DateTime::parse_from_str(jvm_start, "%Y-%m-%dT%H:%M:%S%.f%z") {
        Ok(dt) => Ok(dt),
        Err(err) => Err(format!("Unable to parse JVM start {:?}: {}", jvm_start, err)),
    }
}

// --------------------
// processing

/// A [`NotificationSink`] printing to STDERR, or only counting.
struct SinkStderr<'p> {
    printer: Option<&'p mut PrinterEventRecord<StandardStream>>,
}

impl NotificationSink for SinkStderr<'_> {
    fn notify(
        &mut self,
        notification: Notification,
    ) {
        if let Some(printer) = self.printer.as_mut() {
            // a failed diagnostic print is not worth stopping for
            let _ = printer.print_notification(&notification);
        }
    }
}

/// Open `path` for reading, STDIN for `-`.
fn open_path(path: &FPath) -> Result<Box<dyn Read>> {
    if path == FPATH_STDIN {
        return Ok(Box::new(std::io::stdin()));
    }
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;

    Ok(Box::new(file))
}

/// Process one path, printing records as they are emitted.
///
/// Returns the path's [`Summary`]. A stopping error is recorded in the
/// summary and returned.
fn process_path(
    path: &FPath,
    config: &GcLogProcessorConfig,
    printer: &mut PrinterEventRecord<StandardStream>,
    printer_notifications: &mut PrinterEventRecord<StandardStream>,
    print_notifications: bool,
) -> (Summary, Result<()>) {
    defn!("({:?})", path);
    let mut processor = GcLogProcessor::new(config.clone());
    let result = process_reader(path, &mut processor, printer, printer_notifications, print_notifications);
    let error: Option<String> = result.as_ref().err().map(|err| format!("{:#}", err));
    let summary = Summary::new(path.clone(), processor.summary(), error);
    defx!("{:?}", summary);

    (summary, result)
}

fn process_reader(
    path: &FPath,
    processor: &mut GcLogProcessor,
    printer: &mut PrinterEventRecord<StandardStream>,
    printer_notifications: &mut PrinterEventRecord<StandardStream>,
    print_notifications: bool,
) -> Result<()> {
    let mut reader = BufReader::new(open_path(path)?);
    let mut sink = SinkStderr {
        printer: if print_notifications { Some(printer_notifications) } else { None },
    };
    let mut records: Vec<EventRecord> = Vec::with_capacity(4);
    let mut buffer: Vec<u8> = Vec::with_capacity(512);
    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .with_context(|| format!("failed to read {:?}", path))?;
        if read == 0 {
            break;
        }
        // GC logs are ASCII in practice, stray bytes are replaced
        let line = String::from_utf8_lossy(&buffer);
        processor
            .push_line(&line, &mut records, &mut sink)
            .with_context(|| format!("failed processing {:?}", path))?;
        for record in records.drain(..) {
            printer
                .print_record(&record)
                .context("failed to print")?;
        }
    }
    processor
        .finish(&mut records, &mut sink)
        .with_context(|| format!("failed processing {:?}", path))?;
    for record in records.drain(..) {
        printer
            .print_record(&record)
            .context("failed to print")?;
    }
    printer.flush().context("failed to flush")?;

    Ok(())
}

/// Process the user-passed command-line arguments.
/// Process each path.
/// Determine a process return code.
pub fn main() -> ExitCode {
    defn!();
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    let config = GcLogProcessorConfig {
        jvm_start: args.jvm_start,
        jdk_version: args.jdk_version,
        require_jvm_start: args.strict_timestamps,
        verify_catalog: args.verify_catalog,
        merge_lines_max: args.merge_lines_max,
    };

    let mut ok: bool = true;
    let mut summaries: Vec<Summary> = Vec::with_capacity(args.paths.len());
    for path in args.paths.iter() {
        let prepend_file: Option<String> = if args.prepend_filepath { Some(path.clone()) } else { None };
        let mut printer = PrinterEventRecord::new_stdout(color_choice, prepend_file.clone());
        let mut printer_notifications = PrinterEventRecord::new(
            StandardStream::stderr(color_choice),
            color_choice != ColorChoice::Never,
            prepend_file,
        );
        let (summary, result) = process_path(
            path,
            &config,
            &mut printer,
            &mut printer_notifications,
            args.print_unrecognized,
        );
        if let Err(err) = result {
            ok = false;
            let message = format!("ERROR: {:#}\n", err);
            if print_colored_stderr(COLOR_ERROR, Some(color_choice), message.as_bytes()).is_err() {
                e_err!("{:#}", err);
            }
        }
        summaries.push(summary);
    }

    if args.summary {
        let mut stderr = std::io::stderr().lock();
        if let Err(err) = print_summary(&mut stderr, &summaries) {
            e_err!("failed to print summary: {}", err);
        }
    }

    let exitcode = if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
