// src/printer/printers.rs

//! Specialized printer struct [`PrinterEventRecord`] and helper functions
//! for printing [`EventRecord`s] and [`Notification`s].
//!
//! [`EventRecord`s]: crate::data::eventrecord::EventRecord
//! [`Notification`s]: crate::readers::gclogprocessor::Notification

use crate::common::{Centis, Micros, KB};
use crate::data::eventrecord::{
    EventRecord,
    HeaderInfo,
    HeapCapacityKind,
    MemorySnapshot,
    MemoryTransition,
};
use crate::data::trigger::CollectorFamily;
use crate::debug::printers::de_err;
use crate::readers::gclogprocessor::Notification;

use std::fmt::Write as FmtWrite;
use std::io::{Result, Write};

#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing prepended data like the file name.
///
/// [`Color`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.Color.html
pub const COLOR_DEFAULT: Color = Color::White;

/// [`Color`] for printing some user-facing error messages.
///
/// [`Color`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.Color.html
pub const COLOR_ERROR: Color = Color::Red;

/// [`Color`] for printing [`Notification`s].
///
/// [`Notification`s]: crate::readers::gclogprocessor::Notification
pub const COLOR_NOTIFICATION: Color = Color::Yellow;

/// The [`Color`] of records of a collector family.
/// Chosen for a dark background console.
///
/// [`Color`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.Color.html
pub const fn color_family(family: CollectorFamily) -> Color {
    match family {
        CollectorFamily::Serial => Color::Rgb(153, 153, 255),
        CollectorFamily::Parallel => Color::Rgb(153, 255, 153),
        CollectorFamily::Cms => Color::Rgb(255, 153, 153),
        CollectorFamily::G1 => Color::Cyan,
        CollectorFamily::Shenandoah => Color::Magenta,
        CollectorFamily::Z => Color::Rgb(230, 230, 127),
        CollectorFamily::Unknown => Color::Rgb(127, 127, 127),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// formatting
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `1815` → `"1.815ms"`
pub fn format_micros(micros: Micros) -> String {
    format!("{}.{:03}ms", micros / 1000, micros % 1000)
}

/// `7` → `"0.07s"`
pub fn format_centis(centis: Centis) -> String {
    format!("{}.{:02}s", centis / 100, centis % 100)
}

fn format_transition(
    buffer: &mut String,
    label: &str,
    transition: &MemoryTransition,
) {
    let _ = write!(buffer, " {}={}K->{}K", label, transition.before, transition.after);
    if let Some(capacity) = transition.capacity {
        let _ = write!(buffer, "({}K)", capacity);
    }
}

fn format_snapshot(
    buffer: &mut String,
    label: &str,
    snapshot: &MemorySnapshot,
) {
    let _ = write!(buffer, " {}={}K({}K)", label, snapshot.used, snapshot.capacity);
}

fn format_kb(
    buffer: &mut String,
    label: &str,
    kb: KB,
) {
    let _ = write!(buffer, " {}={}K", label, kb);
}

fn format_info(
    buffer: &mut String,
    info: &HeaderInfo,
) {
    let _ = match info {
        HeaderInfo::Collector(family) => write!(buffer, " collector={}", family),
        HeaderInfo::Version { text, major } => write!(buffer, " version={:?} major={}", text, major),
        HeaderInfo::Cpus { total, available } => write!(buffer, " cpus={} available={}", total, available),
        HeaderInfo::Memory(kb) => write!(buffer, " memory={}K", kb),
        HeaderInfo::HeapCapacity { which, capacity } => {
            let which: &str = match which {
                HeapCapacityKind::Min => "min",
                HeapCapacityKind::Initial => "initial",
                HeapCapacityKind::Max => "max",
                HeapCapacityKind::SoftMax => "soft_max",
            };
            write!(buffer, " {}_capacity={}K", which, capacity)
        }
        HeaderInfo::HeapAddress { address, size, compressed_oops_mode } => write!(
            buffer,
            " address={} size={}K compressed_oops={:?}",
            address, size, compressed_oops_mode
        ),
        HeaderInfo::Text(text) => write!(buffer, " text={:?}", text),
    };
}

/// One line of text for an [`EventRecord`], only the present fields.
///
/// ```text
/// 18404ms GC(5) G1Young G1 trigger="G1 Evacuation Pause" heap=24576K->6312K(259072K) duration=1.815ms
/// ```
pub fn format_record(record: &EventRecord) -> String {
    let mut buffer = String::with_capacity(128);
    match record.timestamp_ms {
        Some(timestamp_ms) => {
            let _ = write!(buffer, "{}ms", timestamp_ms);
        }
        None => buffer.push('-'),
    }
    if let Some(gc_id) = record.gc_id {
        let _ = write!(buffer, " GC({})", gc_id);
    }
    let _ = write!(buffer, " {} {}", record.kind, record.collector_family);
    if let Some(trigger) = record.trigger {
        let _ = write!(buffer, " trigger={:?}", trigger.as_text());
    }
    if let Some(phase) = &record.phase {
        let _ = write!(buffer, " phase={:?}", phase);
    }
    if let Some(heap) = &record.heap {
        format_transition(&mut buffer, "heap", heap);
    }
    if let Some(young) = &record.young {
        format_transition(&mut buffer, "young", young);
    }
    if let Some(old) = &record.old {
        format_transition(&mut buffer, "old", old);
    }
    if let Some(metaspace) = &record.metaspace {
        format_transition(&mut buffer, "metaspace", metaspace);
    }
    if let Some(class_space) = &record.class_space {
        format_transition(&mut buffer, "class_space", class_space);
    }
    if let Some(reserved) = record.metaspace_reserved {
        format_kb(&mut buffer, "metaspace_reserved", reserved);
    }
    if let Some(snapshot) = &record.heap_snapshot {
        format_snapshot(&mut buffer, "heap_used", snapshot);
    }
    if let Some(snapshot) = &record.metaspace_snapshot {
        format_snapshot(&mut buffer, "metaspace_used", snapshot);
    }
    if let Some(info) = &record.info {
        format_info(&mut buffer, info);
    }
    if record.duration_us != 0 {
        let _ = write!(buffer, " duration={}", format_micros(record.duration_us));
    }
    if let Some(time_to_stop_us) = record.time_to_stop_us {
        let _ = write!(buffer, " time_to_stop={}", format_micros(time_to_stop_us));
    }
    if let Some(times) = &record.thread_times {
        let _ = write!(
            buffer,
            " user={} sys={} real={}",
            format_centis(times.user_cs),
            format_centis(times.sys_cs),
            format_centis(times.real_cs),
        );
    }

    buffer
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterEventRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Aliased [`Result`] returned by [`PrinterEventRecord`] functions, the
/// count of bytes printed.
///
/// [`Result`]: std::io::Result
pub type PrinterEventRecordResult = Result<usize>;

/// A printer of [`EventRecord`s] and [`Notification`s], one per line,
/// colored by collector family.
///
/// [`EventRecord`s]: crate::data::eventrecord::EventRecord
/// [`Notification`s]: crate::readers::gclogprocessor::Notification
pub struct PrinterEventRecord<W: WriteColor> {
    out: W,
    /// should printing be in color?
    do_color: bool,
    /// color settings for prepended text
    color_spec_default: ColorSpec,
    /// the file name or path string prepended to each line
    prepend_file: Option<String>,
    /// last value passed to `self.out.set_color()`
    color_spec_last: ColorSpec,
}

/// Macro to write to the printer output. If there is an error then
/// return it.
macro_rules! write_or_return {
    ($out:expr, $slice_:expr, $printed:expr) => {
        match $out.write_all($slice_) {
            Ok(_) => {
                $printed += $slice_.len();
            }
            Err(err) => {
                // XXX: this will print when stdout is truncated, like when piping
                //      to `head`, e.g. `gcsift gc.log | head`
                //          Broken pipe (os error 32)
                de_err!("{}.write_all(…) (len {}) error {}", stringify!($out), $slice_.len(), err);
                return Err(err);
            }
        }
    };
}

/// Macro that sets output color, only changed if needed.
///
/// Unnecessary changes to `set_color` may cause errant formatting bytes to
/// print to the terminal.
macro_rules! setcolor_or_return {
    ($out:expr, $color_spec:expr, $color_spec_last:expr) => {
        if $color_spec != $color_spec_last {
            if let Err(err) = $out.set_color(&$color_spec) {
                de_err!("{}.set_color({:?}) returned error {}", stringify!($out), $color_spec, err);
                return Err(err);
            };
            $color_spec_last = $color_spec.clone();
        }
    };
}

impl PrinterEventRecord<termcolor::StandardStream> {
    /// Create a new `PrinterEventRecord` writing to stdout.
    pub fn new_stdout(
        color_choice: ColorChoice,
        prepend_file: Option<String>,
    ) -> PrinterEventRecord<termcolor::StandardStream> {
        let out = termcolor::StandardStream::stdout(color_choice);
        let do_color: bool = match color_choice {
            ColorChoice::Never => false,
            ColorChoice::Always | ColorChoice::AlwaysAnsi | ColorChoice::Auto => true,
        };

        PrinterEventRecord::new(out, do_color, prepend_file)
    }
}

impl<W: WriteColor> PrinterEventRecord<W> {
    pub fn new(
        out: W,
        do_color: bool,
        prepend_file: Option<String>,
    ) -> PrinterEventRecord<W> {
        let mut color_spec_default: ColorSpec = ColorSpec::new();
        color_spec_default.set_fg(Some(COLOR_DEFAULT));
        let color_spec_last = color_spec_default.clone();

        PrinterEventRecord {
            out,
            do_color,
            color_spec_default,
            prepend_file,
            color_spec_last,
        }
    }

    /// The underlying writer, e.g. a `termcolor::Buffer` in tests.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_line(
        &mut self,
        color: Color,
        text: &str,
    ) -> PrinterEventRecordResult {
        let mut printed: usize = 0;
        if let Some(prepend_file) = &self.prepend_file {
            if self.do_color {
                setcolor_or_return!(self.out, self.color_spec_default, self.color_spec_last);
            }
            write_or_return!(self.out, prepend_file.as_bytes(), printed);
            write_or_return!(self.out, b": ", printed);
        }
        if self.do_color {
            let mut color_spec = ColorSpec::new();
            color_spec.set_fg(Some(color));
            setcolor_or_return!(self.out, color_spec, self.color_spec_last);
        }
        write_or_return!(self.out, text.as_bytes(), printed);
        if self.do_color {
            if let Err(err) = self.out.reset() {
                de_err!("out.reset() returned error {}", err);
                return Err(err);
            }
            self.color_spec_last = ColorSpec::new();
        }
        write_or_return!(self.out, b"\n", printed);

        Ok(printed)
    }

    /// Prints the [`EventRecord`] in the color of its collector family.
    pub fn print_record(
        &mut self,
        record: &EventRecord,
    ) -> PrinterEventRecordResult {
        let text: String = format_record(record);

        self.print_line(color_family(record.collector_family), text.as_str())
    }

    /// Prints the [`Notification`].
    pub fn print_notification(
        &mut self,
        notification: &Notification,
    ) -> PrinterEventRecordResult {
        let text: String = notification.to_string();

        self.print_line(COLOR_NOTIFICATION, text.as_str())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// other printer functions (no use of PrinterEventRecord)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Print colored output to terminal if possible using passed stream,
/// otherwise, print plain output.
///
/// Caller should take stream locks, e.g. `std::io::stdout().lock()`.
pub fn print_colored<W: WriteColor>(
    color: Color,
    value: &[u8],
    out: &mut W,
) -> Result<()> {
    if let Err(err) = out.set_color(ColorSpec::new().set_fg(Some(color))) {
        de_err!("print_colored: out.set_color({:?}) returned error {}", color, err);
        return Err(err);
    }
    if let Err(err) = out.write_all(value) {
        de_err!("print_colored: out.write_all(…) returned error {}", err);
        return Err(err);
    }
    if let Err(err) = out.reset() {
        de_err!("print_colored: out.reset() returned error {}", err);
        return Err(err);
    }
    out.flush()?;

    Ok(())
}

/// Print colored output to terminal on stderr.
pub fn print_colored_stderr(
    color: Color,
    color_choice_opt: Option<ColorChoice>,
    value: &[u8],
) -> Result<()> {
    let choice: ColorChoice = color_choice_opt.unwrap_or(ColorChoice::Auto);
    let mut stderr = termcolor::StandardStream::stderr(choice);
    let _stdout_lock = std::io::stdout().lock();

    print_colored(color, value, &mut stderr)
}

/// Safely write the `buffer` to stderr.
pub fn write_stderr(buffer: &[u8]) {
    let mut stderr_lock = std::io::stderr().lock();
    if let Err(_err) = stderr_lock.write_all(buffer) {
        // XXX: this will print when stderr is closed early
        de_err!("stderr_lock.write_all(buffer (len {})) error {}", buffer.len(), _err);
    }
    if let Err(_err) = stderr_lock.flush() {
        de_err!("stderr flushing error {}", _err);
    }
}
