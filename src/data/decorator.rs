// src/data/decorator.rs

//! The decorator grammar. A decorator is the bracketed prefix JVM unified
//! logging prepends to every line, e.g. the `[18.406s][info][gc]` of
//!
//! ```text
//! [18.406s][info][gc] GC(1012) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms
//! ```
//!
//! Five stamp shapes are recognized, see [`DecoratorShape`]. Each may be
//! followed by an optional level bracket and an optional tag-set bracket.
//! A line matching none of them is passed through with
//! [`DecoratorStamp::Absent`] and the entire line as payload.
//!
//! The most relevant function is [`split_decorator`].
//! The most relevant constant is [`DECORATOR_PARSE_DATAS`].
//!
//! [`DECORATOR_PARSE_DATAS`]: self::DECORATOR_PARSE_DATAS
//! [`split_decorator`]: self::split_decorator

#![allow(non_camel_case_types)]

use crate::common::Millis;
use crate::data::units::parse_decimal_scaled;

use std::fmt;

#[doc(hidden)]
pub use ::chrono::{DateTime, Duration, FixedOffset, TimeZone};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A regular expression, passed to [`regex::Regex::new`].
///
/// [`regex::Regex::new`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html#method.new
pub type RegexPattern = str;

/// Regular expression capture group name.
pub type CaptureGroupName = str;

/// Regular expression capture group pattern, used within a [`RegexPattern`].
pub type CaptureGroupPattern = str;

/// A chrono [`DateTime`] type used in _gcslib_.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// Crate `chrono` strftime pattern of a unified logging datestamp,
/// e.g. `2023-04-01T09:15:02.123+0000`.
pub const DATESTAMP_STRFTIME: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Log level bracket of a decorator.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn from_text(text: &str) -> Option<LogLevel> {
        match text {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// The shape of the timing brackets at the start of a decorator.
/// The tag of a [`DecoratorParseInstr`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DecoratorShape {
    /// `[2023-04-01T09:15:02.123+0000]`
    DatestampOnly,
    /// `[18.406s]`
    UptimeSeconds,
    /// `[18406ms]`
    UptimeMillis,
    /// `[2023-04-01T09:15:02.123+0000][18.406s]`
    DatestampPlusUptimeSeconds,
    /// `[2023-04-01T09:15:02.123+0000][18406ms]`
    DatestampPlusUptimeMillis,
}

/// The timing part of a [`Decorator`], with the parsed values needed to
/// compute milliseconds since JVM start.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DecoratorStamp {
    /// No decorator matched.
    #[default]
    Absent,
    DatestampOnly {
        datestamp: DateTimeL,
    },
    UptimeSeconds {
        uptime_ms: Millis,
    },
    UptimeMillis {
        uptime_ms: Millis,
    },
    DatestampPlusUptimeSeconds {
        datestamp: DateTimeL,
        uptime_ms: Millis,
    },
    DatestampPlusUptimeMillis {
        datestamp: DateTimeL,
        uptime_ms: Millis,
    },
}

impl DecoratorStamp {
    /// Uptime, if an uptime bracket was present. Always authoritative for
    /// timing when present.
    pub const fn uptime_ms(&self) -> Option<Millis> {
        match self {
            DecoratorStamp::UptimeSeconds { uptime_ms }
            | DecoratorStamp::UptimeMillis { uptime_ms }
            | DecoratorStamp::DatestampPlusUptimeSeconds { uptime_ms, .. }
            | DecoratorStamp::DatestampPlusUptimeMillis { uptime_ms, .. } => Some(*uptime_ms),
            DecoratorStamp::Absent | DecoratorStamp::DatestampOnly { .. } => None,
        }
    }

    pub const fn datestamp(&self) -> Option<&DateTimeL> {
        match self {
            DecoratorStamp::DatestampOnly { datestamp }
            | DecoratorStamp::DatestampPlusUptimeSeconds { datestamp, .. }
            | DecoratorStamp::DatestampPlusUptimeMillis { datestamp, .. } => Some(datestamp),
            _ => None,
        }
    }

    pub const fn is_datestamp_only(&self) -> bool {
        matches!(self, DecoratorStamp::DatestampOnly { .. })
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, DecoratorStamp::Absent)
    }
}

/// A parsed decorator.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Decorator {
    pub stamp: DecoratorStamp,
    pub level: Option<LogLevel>,
    /// The tag set in printed order, e.g. `["gc", "start"]`.
    pub tags: Vec<String>,
    /// Length in bytes of the decorator prefix, including the one space
    /// separating it from the payload.
    pub len: usize,
}

impl fmt::Debug for Decorator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Decorator")
            .field("stamp", &self.stamp)
            .field("level", &self.level)
            .field("tags", &self.tags.join(","))
            .field("len", &self.len)
            .finish()
    }
}

impl Decorator {
    /// Milliseconds since JVM start.
    ///
    /// Uptime is used when present. A datestamp-only decorator needs
    /// `jvm_start`; without it, or if the datestamp precedes `jvm_start`,
    /// returns `None`.
    pub fn timestamp_ms(
        &self,
        jvm_start: Option<&DateTimeL>,
    ) -> Option<Millis> {
        if let Some(uptime_ms) = self.stamp.uptime_ms() {
            return Some(uptime_ms);
        }
        let datestamp = self.stamp.datestamp()?;
        let jvm_start = jvm_start?;
        let elapsed: i64 = datestamp
            .signed_duration_since(*jvm_start)
            .num_milliseconds();

        u64::try_from(elapsed).ok()
    }

    /// The wall-clock JVM start implied by a decorator carrying both a
    /// datestamp and an uptime.
    pub fn jvm_start_reference(&self) -> DateTimeLOpt {
        match self.stamp {
            DecoratorStamp::DatestampPlusUptimeSeconds { datestamp, uptime_ms }
            | DecoratorStamp::DatestampPlusUptimeMillis { datestamp, uptime_ms } => {
                let uptime = Duration::try_milliseconds(i64::try_from(uptime_ms).ok()?)?;
                datestamp.checked_sub_signed(uptime)
            }
            _ => None,
        }
    }

    pub fn has_tag(
        &self,
        tag: &str,
    ) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DecoratorParseInstr and the catalog of decorators
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Capture group name for a datestamp.
pub const CGN_DATESTAMP: &CaptureGroupName = "datestamp";
/// Capture group name for uptime in fractional seconds.
pub const CGN_UPTIME_S: &CaptureGroupName = "uptime_s";
/// Capture group name for uptime in whole milliseconds.
pub const CGN_UPTIME_MS: &CaptureGroupName = "uptime_ms";
/// Capture group name for the log level.
pub const CGN_LEVEL: &CaptureGroupName = "level";
/// Capture group name for the tag set.
pub const CGN_TAGS: &CaptureGroupName = "tags";

/// `[2023-04-01T09:15:02.123+0000]`
pub const CGP_DATESTAMP: &CaptureGroupPattern =
    r"\[(?P<datestamp>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}[+-]\d{4})\]";
/// `[18.406s]`, the JVM may use the process locale decimal separator
pub const CGP_UPTIME_S: &CaptureGroupPattern = r"\[(?P<uptime_s>\d+[.,]\d+)s\]";
/// `[18406ms]`
pub const CGP_UPTIME_MS: &CaptureGroupPattern = r"\[(?P<uptime_ms>\d+)ms\]";
/// optional `[info]`, the JVM pads with trailing spaces when configured
pub const CGP_LEVEL: &CaptureGroupPattern =
    r"(?:\[(?P<level>trace|debug|info|warning|error) *\])?";
/// optional `[gc,heap,exit   ]`
pub const CGP_TAGS: &CaptureGroupPattern = r"(?:\[(?P<tags>[a-z0-9]+(?:,[a-z0-9]+)*) *\])?";
/// start of line
const RP_BOL: &RegexPattern = "^";
/// the one space separating decorator from payload
const RP_SEP: &RegexPattern = "(?: |$)";

/// Instructions for matching one decorator shape.
///
/// Tested in test `test_DECORATOR_PARSE_DATAS_test_cases`.
pub struct DecoratorParseInstr<'a> {
    /// Regex pattern for [`captures`], anchored at line start.
    ///
    /// [`captures`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html#method.captures
    pub regex_pattern: &'a RegexPattern,
    pub shape: DecoratorShape,
    /// Hardcoded self-test cases, a raw line and its expected payload.
    #[cfg(any(debug_assertions, test))]
    pub _test_cases: &'a [(&'a str, &'a str)],
    /// Source code line number of declaration, to aid debugging.
    pub _line_num: u32,
}

impl fmt::Debug for DecoratorParseInstr<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("DecoratorParseInstr:")
            .field("regex_pattern", &self.regex_pattern)
            .field("shape", &self.shape)
            .field("line", &self._line_num)
            .finish()
    }
}

/// Declare a [`DecoratorParseInstr`] more easily.
#[macro_export]
macro_rules! DPD {
    (
        $rp:expr,
        $shape:expr,
        $test_cases:expr,
        $line_num:expr,
    ) => {
        DecoratorParseInstr {
            regex_pattern: $rp,
            shape: $shape,
            #[cfg(any(debug_assertions, test))]
            _test_cases: $test_cases,
            _line_num: $line_num,
        }
    };
}
pub use DPD;

pub const DECORATOR_PARSE_DATAS_LEN: usize = 5;

/// The decorator catalog.
///
/// Order of declaration matters: a datestamp with a following uptime must
/// be tried before datestamp-only, otherwise the uptime bracket would be
/// left in the payload.
pub const DECORATOR_PARSE_DATAS: [DecoratorParseInstr; DECORATOR_PARSE_DATAS_LEN] = [
    DPD!(
        concatcp!(RP_BOL, CGP_DATESTAMP, CGP_UPTIME_MS, CGP_LEVEL, CGP_TAGS, RP_SEP),
        DecoratorShape::DatestampPlusUptimeMillis,
        &[
            ("[2023-04-01T09:15:02.123+0000][18406ms][info][gc] Using G1", "Using G1"),
            ("[2023-04-01T09:15:02.123-0700][0ms][gc,init] Version: 17.0.2+8-86 (release)", "Version: 17.0.2+8-86 (release)"),
        ],
        line!(),
    ),
    DPD!(
        concatcp!(RP_BOL, CGP_DATESTAMP, CGP_UPTIME_S, CGP_LEVEL, CGP_TAGS, RP_SEP),
        DecoratorShape::DatestampPlusUptimeSeconds,
        &[
            ("[2023-04-01T09:15:02.123+0000][18.406s][info][gc,start    ] GC(3) Pause Young (Normal) (G1 Evacuation Pause)", "GC(3) Pause Young (Normal) (G1 Evacuation Pause)"),
            ("[2020-11-30T14:01:22.000+0100][1,250s][info][safepoint] Leaving safepoint region", "Leaving safepoint region"),
        ],
        line!(),
    ),
    DPD!(
        concatcp!(RP_BOL, CGP_UPTIME_MS, CGP_LEVEL, CGP_TAGS, RP_SEP),
        DecoratorShape::UptimeMillis,
        &[
            ("[18406ms][info][gc] GC(0) Pause Full (System.gc()) 10M->3M(64M) 12.345ms", "GC(0) Pause Full (System.gc()) 10M->3M(64M) 12.345ms"),
            ("[5ms][gc,heap,exit]  Metaspace       used 10K", " Metaspace       used 10K"),
        ],
        line!(),
    ),
    DPD!(
        concatcp!(RP_BOL, CGP_UPTIME_S, CGP_LEVEL, CGP_TAGS, RP_SEP),
        DecoratorShape::UptimeSeconds,
        &[
            ("[18.406s][info][gc] GC(1012) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms", "GC(1012) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms"),
            ("[0.011s][warning][gc,alloc] main: Retried waiting for GCLocker too often allocating 256 words", "main: Retried waiting for GCLocker too often allocating 256 words"),
            ("[12.000s] Heap", "Heap"),
        ],
        line!(),
    ),
    DPD!(
        concatcp!(RP_BOL, CGP_DATESTAMP, CGP_LEVEL, CGP_TAGS, RP_SEP),
        DecoratorShape::DatestampOnly,
        &[
            ("[2023-04-01T09:15:02.123+0000][info][safepoint] Application time: 0.1230000 seconds", "Application time: 0.1230000 seconds"),
            ("[2023-04-01T09:15:02.123+0000] GC(2) Pause Remark 20M->20M(64M) 1.000ms", "GC(2) Pause Remark 20M->20M(64M) 1.000ms"),
        ],
        line!(),
    ),
];

lazy_static! {
    /// Run-time compiled [`Regex`] of each [`DECORATOR_PARSE_DATAS`] entry,
    /// same order.
    ///
    /// [`Regex`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html
    pub(crate) static ref DECORATOR_PARSE_DATAS_REGEX_VEC: Vec<Regex> = {
        defñ!("init DECORATOR_PARSE_DATAS_REGEX_VEC");
        DECORATOR_PARSE_DATAS
            .iter()
            .map(|dpd| match Regex::new(dpd.regex_pattern) {
                Ok(regex) => regex,
                Err(err) => panic!(
                    "DECORATOR_PARSE_DATAS entry declared at line {} failed to compile: {}",
                    dpd._line_num, err,
                ),
            })
            .collect()
    };
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Transform the captures of one decorator regex into a [`DecoratorStamp`].
///
/// Returns `None` if a captured value does not convert, e.g. an
/// impossible calendar date.
fn captures_to_stamp(
    shape: DecoratorShape,
    captures: &Captures,
) -> Option<DecoratorStamp> {
    let datestamp = || -> Option<DateTimeL> {
        let text = captures.name(CGN_DATESTAMP)?.as_str();
        DateTime::parse_from_str(text, DATESTAMP_STRFTIME).ok()
    };
    let uptime_s = || -> Option<Millis> {
        parse_decimal_scaled(captures.name(CGN_UPTIME_S)?.as_str(), 3).ok()
    };
    let uptime_ms = || -> Option<Millis> {
        captures.name(CGN_UPTIME_MS)?.as_str().parse::<Millis>().ok()
    };

    let stamp = match shape {
        DecoratorShape::DatestampOnly => DecoratorStamp::DatestampOnly {
            datestamp: datestamp()?,
        },
        DecoratorShape::UptimeSeconds => DecoratorStamp::UptimeSeconds {
            uptime_ms: uptime_s()?,
        },
        DecoratorShape::UptimeMillis => DecoratorStamp::UptimeMillis {
            uptime_ms: uptime_ms()?,
        },
        DecoratorShape::DatestampPlusUptimeSeconds => DecoratorStamp::DatestampPlusUptimeSeconds {
            datestamp: datestamp()?,
            uptime_ms: uptime_s()?,
        },
        DecoratorShape::DatestampPlusUptimeMillis => DecoratorStamp::DatestampPlusUptimeMillis {
            datestamp: datestamp()?,
            uptime_ms: uptime_ms()?,
        },
    };

    Some(stamp)
}

/// Match the decorator at the start of `line`.
///
/// Returns the [`Decorator`] and the remaining payload. A line with no
/// recognizable decorator returns a `Decorator` with
/// [`DecoratorStamp::Absent`] and the entire `line` as payload.
pub fn split_decorator(line: &str) -> (Decorator, &str) {
    defn!("({:?})", line);
    if !line.starts_with('[') {
        defx!("no '['");
        return (Decorator::default(), line);
    }
    for (index, dpd) in DECORATOR_PARSE_DATAS.iter().enumerate() {
        let regex: &Regex = &DECORATOR_PARSE_DATAS_REGEX_VEC[index];
        let captures: Captures = match regex.captures(line) {
            Some(captures) => captures,
            None => continue,
        };
        let stamp: DecoratorStamp = match captures_to_stamp(dpd.shape, &captures) {
            Some(stamp) => stamp,
            None => {
                defo!("shape {:?} captures did not convert", dpd.shape);
                continue;
            }
        };
        let len: usize = match captures.get(0) {
            Some(match_) => match_.end(),
            None => continue,
        };
        let level: Option<LogLevel> = captures
            .name(CGN_LEVEL)
            .and_then(|m| LogLevel::from_text(m.as_str()));
        let tags: Vec<String> = match captures.name(CGN_TAGS) {
            Some(m) => m.as_str().split(',').map(String::from).collect(),
            None => Vec::new(),
        };
        let decorator = Decorator { stamp, level, tags, len };
        defx!("matched {:?}", decorator);

        return (decorator, &line[len..]);
    }
    defx!("no decorator");

    (Decorator::default(), line)
}
