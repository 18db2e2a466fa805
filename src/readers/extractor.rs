// src/readers/extractor.rs

//! Convert the named captures of a [`Classification`] into a populated
//! [`EventRecord`].
//!
//! Fields are retrieved by capture group name. A field whose text does not
//! convert is left `None` and an [`ExtractError`] is collected; the record
//! is still produced.
//!
//! Timestamp and collector family are not set here, see
//! [`reconcile_timestamp`] and [`GcLogProcessor`].
//!
//! [`reconcile_timestamp`]: crate::readers::reconciler::reconcile_timestamp
//! [`GcLogProcessor`]: crate::readers::gclogprocessor::GcLogProcessor

use crate::common::{JdkVersion, Micros, JDK_VERSION_METASPACE_COMMITTED, KB};
use crate::data::eventkind::EventKind;
use crate::data::eventrecord::{
    EventRecord,
    HeaderInfo,
    HeapCapacityKind,
    MemorySnapshot,
    MemoryTransition,
};
use crate::data::logicalline::LogicalLine;
use crate::data::patterns::*;
use crate::data::trigger::{CollectorFamily, Trigger};
use crate::data::units::{
    duration_to_micros,
    memory_to_kb,
    parse_integer,
    DurationUnit,
    ThreadTimes,
    UnitError,
};
use crate::readers::classifier::Classification;

use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::thiserror::Error;

/// A captured field that could not be converted.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ExtractError {
    #[error("field {field}: malformed number {text:?}")]
    MalformedNumber {
        field: &'static str,
        text: String,
    },
    #[error("field {field}: unknown unit {text:?}")]
    UnknownUnit {
        field: &'static str,
        text: String,
    },
    #[error("unknown trigger {0:?}")]
    UnknownTrigger(String),
    #[error("missing field {0}")]
    MissingField(&'static str),
}

impl ExtractError {
    fn from_unit(
        field: &'static str,
        err: UnitError,
    ) -> ExtractError {
        match err {
            UnitError::MalformedNumber(text) | UnitError::Overflow(text) => {
                ExtractError::MalformedNumber { field, text }
            }
            UnitError::UnknownUnit(text) => ExtractError::UnknownUnit { field, text },
        }
    }
}

/// What the extractor needs to know about the rest of the log.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExtractContext {
    /// JDK major version, from configuration or the `Version:` header.
    pub jdk_version: Option<JdkVersion>,
}

lazy_static! {
    /// `1119K->1119K(1056768K)`, the parenthesized figure is reserved
    /// before JDK 16
    static ref REGEX_METASPACE_LEGACY: Regex = Regex::new(concatcp!(
        "^(?P<before>", RP_MEM, ")->(?P<after>", RP_MEM, r")\((?P<third>", RP_MEM, r")\)$",
    )).unwrap();

    /// `1119K(1216K)->1119K(1216K)` with optional `NonClass: … Class: …`
    static ref REGEX_METASPACE_COMMITTED: Regex = Regex::new(concatcp!(
        "^(?P<before>", RP_MEM, r")\(", RP_MEM, r"\)->(?P<after>", RP_MEM, r")\((?P<committed>", RP_MEM, r")\)",
        "(?: NonClass: ", RP_MEM, r"\(", RP_MEM, r"\)->", RP_MEM, r"\(", RP_MEM, r"\)",
        " Class: (?P<class_before>", RP_MEM, r")\(", RP_MEM, r"\)->(?P<class_after>", RP_MEM,
        r")\((?P<class_committed>", RP_MEM, r")\))?$",
    )).unwrap();

    /// `5M used, 5M committed, 1032M reserved`
    static ref REGEX_METASPACE_USAGE: Regex = Regex::new(concatcp!(
        "^(?P<used>", RP_MEM, ") used, (?P<committed>", RP_MEM, ") committed, (?P<reserved>", RP_MEM, ") reserved$",
    )).unwrap();

    /// metaspace line inside a heap dump
    static ref REGEX_HEAP_DUMP_METASPACE: Regex = Regex::new(concatcp!(
        "Metaspace +used (?P<used>", RP_MEM, "), committed (?P<committed>", RP_MEM, "), reserved (?P<reserved>", RP_MEM, ")",
    )).unwrap();
}

/// Collects conversion failures while extracting one record.
struct Extraction<'c, 't> {
    captures: &'c Captures<'t>,
    errors: Vec<ExtractError>,
}

impl<'c, 't> Extraction<'c, 't> {
    fn text(
        &self,
        name: &str,
    ) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    fn kb_of(
        &mut self,
        field: &'static str,
        text: &str,
    ) -> Option<KB> {
        match memory_to_kb(text) {
            Ok(kb) => Some(kb),
            Err(err) => {
                self.errors.push(ExtractError::from_unit(field, err));
                None
            }
        }
    }

    fn kb(
        &mut self,
        name: &'static str,
    ) -> Option<KB> {
        let text = self.text(name)?;
        self.kb_of(name, text)
    }

    fn integer(
        &mut self,
        name: &'static str,
    ) -> Option<u64> {
        let text = self.text(name)?;
        match parse_integer(text) {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(ExtractError::from_unit(name, err));
                None
            }
        }
    }

    fn micros(
        &mut self,
        name: &'static str,
        unit: DurationUnit,
    ) -> Option<Micros> {
        let text = match self.text(name) {
            Some(text) => text,
            None => {
                self.errors.push(ExtractError::MissingField(name));
                return None;
            }
        };
        match duration_to_micros(text, unit) {
            Ok(micros) => Some(micros),
            Err(err) => {
                self.errors.push(ExtractError::from_unit(name, err));
                None
            }
        }
    }

    /// `A->B(C)` of the named groups. `None` unless both `before` and
    /// `after` are present and convert.
    fn transition(
        &mut self,
        before: &'static str,
        after: &'static str,
        capacity: &'static str,
    ) -> Option<MemoryTransition> {
        self.text(before)?;
        let before = self.kb(before);
        let after = self.kb(after);
        let capacity = self.kb(capacity);

        Some(MemoryTransition {
            before: before?,
            after: after?,
            capacity,
        })
    }

    /// The event duration in the generic `duration` and `duration_unit`
    /// groups, zero when absent.
    fn duration(&mut self) -> Micros {
        let unit_text = match self.text(CGN_DURATION_UNIT) {
            Some(unit_text) => unit_text,
            None => return 0,
        };
        let unit = match DurationUnit::from_suffix(unit_text) {
            Ok(unit) => unit,
            Err(err) => {
                self.errors.push(ExtractError::from_unit(CGN_DURATION, err));
                return 0;
            }
        };

        self.micros(CGN_DURATION, unit).unwrap_or(0)
    }

    fn trigger(&mut self) -> Option<Trigger> {
        let text = self
            .text(CGN_TRIGGER)
            .or_else(|| self.text(CGN_TRIGGER2))?;
        match Trigger::from_text(text) {
            Some(trigger) => Some(trigger),
            None => {
                self.errors.push(ExtractError::UnknownTrigger(text.to_string()));
                None
            }
        }
    }

    fn thread_times(&mut self) -> Option<ThreadTimes> {
        let user = self.text(CGN_USER)?;
        let sys = self.text(CGN_SYS)?;
        let real = self.text(CGN_REAL)?;
        match ThreadTimes::parse(user, sys, real) {
            Ok(times) => Some(times),
            Err(err) => {
                self.errors.push(ExtractError::from_unit(CGN_USER, err));
                None
            }
        }
    }
}

/// Kilobytes of group `name` of a metaspace sub-match.
fn capture_kb(
    captures: &Captures,
    errors: &mut Vec<ExtractError>,
    name: &str,
) -> Option<KB> {
    let text = captures.name(name)?.as_str();
    match memory_to_kb(text) {
        Ok(kb) => Some(kb),
        Err(err) => {
            errors.push(ExtractError::from_unit(CGN_METASPACE, err));
            None
        }
    }
}

/// Parse the text after `Metaspace: ` into `record`.
///
/// The legacy form `A->B(C)` prints reserved metaspace in parentheses;
/// from JDK 16 on the parenthesized figure is committed metaspace.
fn extract_metaspace(
    text: &str,
    jdk_version: Option<JdkVersion>,
    record: &mut EventRecord,
    errors: &mut Vec<ExtractError>,
) {
    defn!("({:?}, {:?})", text, jdk_version);
    if let Some(captures) = REGEX_METASPACE_COMMITTED.captures(text) {
        let before = capture_kb(&captures, errors, "before");
        let after = capture_kb(&captures, errors, "after");
        let committed = capture_kb(&captures, errors, "committed");
        if let (Some(before), Some(after)) = (before, after) {
            record.metaspace = Some(MemoryTransition { before, after, capacity: committed });
        }
        let class_before = capture_kb(&captures, errors, "class_before");
        let class_after = capture_kb(&captures, errors, "class_after");
        let class_committed = capture_kb(&captures, errors, "class_committed");
        if let (Some(before), Some(after)) = (class_before, class_after) {
            record.class_space = Some(MemoryTransition { before, after, capacity: class_committed });
        }
    } else if let Some(captures) = REGEX_METASPACE_LEGACY.captures(text) {
        let before = capture_kb(&captures, errors, "before");
        let after = capture_kb(&captures, errors, "after");
        let third = capture_kb(&captures, errors, "third");
        let committed: bool = matches!(jdk_version, Some(v) if v >= JDK_VERSION_METASPACE_COMMITTED);
        if let (Some(before), Some(after)) = (before, after) {
            record.metaspace = Some(MemoryTransition {
                before,
                after,
                capacity: if committed { third } else { None },
            });
        }
        if !committed {
            record.metaspace_reserved = third;
        }
    } else if let Some(captures) = REGEX_METASPACE_USAGE.captures(text) {
        let used = capture_kb(&captures, errors, "used");
        let committed = capture_kb(&captures, errors, "committed");
        record.metaspace_reserved = capture_kb(&captures, errors, "reserved");
        if let (Some(used), Some(capacity)) = (used, committed) {
            record.metaspace_snapshot = Some(MemorySnapshot { used, capacity });
        }
    } else {
        errors.push(ExtractError::MalformedNumber {
            field: CGN_METASPACE,
            text: text.to_string(),
        });
    }
    defx!();
}

/// Metaspace usage printed inside a heap dump payload.
fn extract_heap_dump_metaspace(
    payload: &str,
    record: &mut EventRecord,
) {
    let captures = match REGEX_HEAP_DUMP_METASPACE.captures(payload) {
        Some(captures) => captures,
        None => return,
    };
    let kb = |name: &str| -> Option<KB> { memory_to_kb(captures.name(name)?.as_str()).ok() };
    if let (Some(used), Some(capacity)) = (kb("used"), kb("committed")) {
        record.metaspace_snapshot = Some(MemorySnapshot { used, capacity });
    }
    record.metaspace_reserved = kb("reserved");
}

fn extract_info(
    kind: EventKind,
    payload: &str,
    ex: &mut Extraction,
) -> Option<HeaderInfo> {
    match kind {
        EventKind::UsingCollector => {
            let family = ex
                .text(CGN_COLLECTOR)
                .and_then(CollectorFamily::from_using)
                .unwrap_or(CollectorFamily::Unknown);
            Some(HeaderInfo::Collector(family))
        }
        EventKind::HeaderVersion => {
            let text = ex.text(CGN_VERSION)?.to_string();
            let major = ex.integer(CGN_MAJOR)?;
            Some(HeaderInfo::Version {
                text,
                major: JdkVersion::try_from(major).ok()?,
            })
        }
        EventKind::HeaderCpus => Some(HeaderInfo::Cpus {
            total: ex.integer(CGN_CPUS_TOTAL)?,
            available: ex.integer(CGN_CPUS_AVAILABLE)?,
        }),
        EventKind::HeaderMemory => Some(HeaderInfo::Memory(ex.kb(CGN_MEMORY)?)),
        EventKind::HeaderHeapCapacity => {
            let which = match ex.text(CGN_WHICH)? {
                "Min" => HeapCapacityKind::Min,
                "Initial" => HeapCapacityKind::Initial,
                "Max" => HeapCapacityKind::Max,
                _ => HeapCapacityKind::SoftMax,
            };
            Some(HeaderInfo::HeapCapacity {
                which,
                capacity: ex.kb(CGN_CAPACITY)?,
            })
        }
        EventKind::HeaderHeapAddress => {
            let size_mb = ex.integer(CGN_SIZE_MB)?;
            Some(HeaderInfo::HeapAddress {
                address: ex.text(CGN_ADDRESS)?.to_string(),
                size: size_mb.saturating_mul(1024),
                compressed_oops_mode: ex.text(CGN_OOPS_MODE)?.to_string(),
            })
        }
        EventKind::GcInfo => Some(HeaderInfo::Text(payload.to_string())),
        _ => None,
    }
}

/// Build the [`EventRecord`] of a classified logical line.
///
/// Returns the record and the conversion failures met, if any. The
/// record's `timestamp_ms` and `collector_family` are left unset.
pub fn extract(
    classification: &Classification,
    logical: &LogicalLine,
    context: &ExtractContext,
) -> (EventRecord, Vec<ExtractError>) {
    let kind: EventKind = classification.kind;
    defn!("({:?})", kind);
    let mut record = EventRecord::new(kind, logical.line_number, logical.raw_line_count());
    let mut ex = Extraction {
        captures: &classification.captures,
        errors: Vec::new(),
    };

    record.gc_id = ex.integer(CGN_GC_ID);

    record.duration_us = match kind {
        EventKind::SafepointSession | EventKind::SafepointStopped => {
            // each figure is rounded to microseconds, then summed
            let stopped = ex.micros(CGN_STOPPED, DurationUnit::Seconds);
            let stopping = ex.micros(CGN_STOPPING, DurationUnit::Seconds);
            record.time_to_stop_us = stopping;
            match stopped.unwrap_or(0).checked_add(stopping.unwrap_or(0)) {
                Some(total) => total,
                None => {
                    let text = ex.text(CGN_STOPPED).unwrap_or_default().to_string();
                    ex.errors.push(ExtractError::MalformedNumber {
                        field: CGN_STOPPED,
                        text,
                    });
                    0
                }
            }
        }
        EventKind::Safepoint => {
            record.time_to_stop_us = ex.micros(CGN_REACHING, DurationUnit::Nanos);
            ex.micros(CGN_TOTAL, DurationUnit::Nanos).unwrap_or(0)
        }
        EventKind::ApplicationTime => ex
            .micros(CGN_APP_TIME, DurationUnit::Seconds)
            .unwrap_or(0),
        EventKind::ShenandoahStats => 0,
        _ => ex.duration(),
    };

    record.heap = ex.transition(CGN_HEAP_BEFORE, CGN_HEAP_AFTER, CGN_HEAP_CAP);
    record.young = ex.transition(CGN_YOUNG_BEFORE, CGN_YOUNG_AFTER, CGN_YOUNG_CAP);
    record.old = ex.transition(CGN_OLD_BEFORE, CGN_OLD_AFTER, CGN_OLD_CAP);
    if let Some(text) = ex.text(CGN_METASPACE) {
        extract_metaspace(text, context.jdk_version, &mut record, &mut ex.errors);
    }
    record.trigger = ex.trigger();
    record.thread_times = ex.thread_times();

    match kind {
        EventKind::HeapAtGc | EventKind::FooterHeap => {
            let total = ex.kb(CGN_HEAP_TOTAL).or_else(|| ex.kb(CGN_Z_CAPACITY));
            let used = ex.kb(CGN_HEAP_USED).or_else(|| ex.kb(CGN_Z_USED));
            if let (Some(used), Some(capacity)) = (used, total) {
                record.heap_snapshot = Some(MemorySnapshot { used, capacity });
            }
            extract_heap_dump_metaspace(&logical.payload, &mut record);
        }
        _ => {}
    }

    record.info = extract_info(kind, &logical.payload, &mut ex);
    if record.info.is_none() {
        record.phase = ex
            .text(CGN_PHASE)
            .or_else(|| ex.text(CGN_QUALIFIER))
            .map(String::from);
    }

    defx!("{:?}, errors {}", record, ex.errors.len());

    (record, ex.errors)
}
