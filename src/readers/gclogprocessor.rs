// src/readers/gclogprocessor.rs

//! Implements a [`GcLogProcessor`], the driver of the pipeline
//!
//! ```text
//! raw lines → LinePreprocessor → classify → extract → reconcile_timestamp → EventRecord
//! ```
//!
//! One `GcLogProcessor` is used per input; it holds the per-run state
//! (the preprocessor merge buffer, the JVM start reference, the detected
//! collector family and JDK version). Per-line problems are delivered to
//! a [`NotificationSink`]. Only a catalog defect or a missing JVM start
//! reference in strict mode stop a run, as a [`RunError`].

use crate::common::{Count, JdkVersion, LineNumber, Millis, MERGE_LINES_MAX_DEFAULT};
use crate::data::decorator::{DateTimeL, DateTimeLOpt};
use crate::data::eventkind::EventKind;
use crate::data::eventrecord::{EventRecord, HeaderInfo};
use crate::data::logicalline::LogicalLine;
use crate::data::trigger::CollectorFamily;
use crate::readers::classifier::{classify_in, Catalog, Classification, ClassifyError};
use crate::readers::extractor::{extract, ExtractContext, ExtractError};
use crate::readers::preprocessor::{
    IncompleteMerge,
    IncompleteReason,
    LinePreprocessor,
    PreprocessResult,
};
use crate::readers::reconciler::reconcile_timestamp;
use crate::readers::summary::SummaryGcLogProcessor;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use ::kinded::Kinded;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::thiserror::Error;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// configuration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Caller-supplied context and policy of one run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GcLogProcessorConfig {
    /// Wall-clock JVM start, to relate datestamp-only decorators.
    /// If `None` it is derived from the first decorator carrying both a
    /// datestamp and an uptime.
    pub jvm_start: DateTimeLOpt,
    /// JDK major version. If `None` it is taken from the `Version:` header.
    pub jdk_version: Option<JdkVersion>,
    /// A datestamp-only line with no JVM start reference is a
    /// [`RunError::MissingJvmStart`] instead of a degraded record.
    pub require_jvm_start: bool,
    /// Try every catalog entry for every line, so an ambiguous match is
    /// detected instead of the first match winning.
    pub verify_catalog: bool,
    /// Bound on the raw lines of one merged event.
    pub merge_lines_max: usize,
}

impl Default for GcLogProcessorConfig {
    fn default() -> Self {
        GcLogProcessorConfig {
            jvm_start: None,
            jdk_version: None,
            require_jvm_start: false,
            verify_catalog: cfg!(debug_assertions),
            merge_lines_max: MERGE_LINES_MAX_DEFAULT,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// notifications and errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A recoverable per-line problem. The run continues.
#[derive(Clone, Debug, Kinded, PartialEq)]
#[kinded(derive(Hash))]
pub enum Notification {
    /// A logical line matched no catalog grammar.
    Unrecognized {
        line_number: LineNumber,
        raw_lines: Vec<String>,
    },
    /// Raw lines of a multi-line event that never closed, discarded.
    IncompleteMerge {
        line_number: LineNumber,
        raw_lines: Vec<String>,
        reason: IncompleteReason,
    },
    /// A field of an emitted record could not be converted and was left
    /// unset.
    ExtractionFailure {
        line_number: LineNumber,
        kind: EventKind,
        error: ExtractError,
    },
    /// A datestamp-only record could not be related to JVM start and was
    /// emitted without a timestamp.
    UnresolvableTimestamp {
        line_number: LineNumber,
        kind: EventKind,
    },
}

impl Notification {
    pub const fn line_number(&self) -> LineNumber {
        match self {
            Notification::Unrecognized { line_number, .. }
            | Notification::IncompleteMerge { line_number, .. }
            | Notification::ExtractionFailure { line_number, .. }
            | Notification::UnresolvableTimestamp { line_number, .. } => *line_number,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            Notification::Unrecognized { line_number, raw_lines } => {
                write!(f, "line {}: unrecognized: {}", line_number, raw_lines.join(" ⏎ "))
            }
            Notification::IncompleteMerge { line_number, raw_lines, reason } => {
                write!(
                    f,
                    "line {}: incomplete merge ({}) of {} lines: {}",
                    line_number,
                    reason,
                    raw_lines.len(),
                    raw_lines.join(" ⏎ "),
                )
            }
            Notification::ExtractionFailure { line_number, kind, error } => {
                write!(f, "line {}: {}: {}", line_number, kind, error)
            }
            Notification::UnresolvableTimestamp { line_number, kind } => {
                write!(f, "line {}: {}: timestamp not resolvable without JVM start", line_number, kind)
            }
        }
    }
}

/// Receiver of [`Notification`]s, supplied by the caller.
pub trait NotificationSink {
    fn notify(
        &mut self,
        notification: Notification,
    );
}

impl NotificationSink for Vec<Notification> {
    fn notify(
        &mut self,
        notification: Notification,
    ) {
        self.push(notification);
    }
}

/// A sink that drops everything. The processor still counts.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreNotifications;

impl NotificationSink for IgnoreNotifications {
    fn notify(
        &mut self,
        _notification: Notification,
    ) {
    }
}

/// Errors that stop a run.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RunError {
    /// Two catalog grammars matched one logical line.
    #[error("line {line_number}: payload matched both {first} and {second}: {payload:?}")]
    AmbiguousMatch {
        line_number: LineNumber,
        first: EventKind,
        second: EventKind,
        payload: String,
    },
    /// A datestamp-only line arrived with no JVM start reference and
    /// `require_jvm_start` is set.
    #[error("line {line_number}: datestamp-only decorator and no JVM start reference")]
    MissingJvmStart {
        line_number: LineNumber,
    },
}

pub type RunResult<T> = std::result::Result<T, RunError>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GcLogProcessor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The pipeline driver for one input. See module docs.
pub struct GcLogProcessor {
    config: GcLogProcessorConfig,
    catalog: Catalog<'static>,
    preprocessor: LinePreprocessor,
    /// supplied or derived JVM start
    jvm_start: DateTimeLOpt,
    /// supplied or detected JDK major version
    jdk_version: Option<JdkVersion>,
    /// detected collector family
    collector_family: CollectorFamily,
    /// `collector_family` came from a `Using …` header
    collector_family_from_header: bool,
    /// scratch buffer of preprocessor results
    results: Vec<PreprocessResult>,
    pub(crate) count_records: BTreeMap<EventKind, Count>,
    pub(crate) count_notifications: HashMap<NotificationKind, Count>,
    pub(crate) timestamp_first: Option<Millis>,
    pub(crate) timestamp_last: Option<Millis>,
}

impl fmt::Debug for GcLogProcessor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("GcLogProcessor")
            .field("jvm_start", &self.jvm_start)
            .field("jdk_version", &self.jdk_version)
            .field("collector_family", &self.collector_family)
            .field("preprocessor", &self.preprocessor)
            .finish()
    }
}

impl Default for GcLogProcessor {
    fn default() -> Self {
        GcLogProcessor::new(GcLogProcessorConfig::default())
    }
}

impl GcLogProcessor {
    pub fn new(config: GcLogProcessorConfig) -> GcLogProcessor {
        GcLogProcessor::with_catalog(config, Catalog::builtin())
    }

    /// A processor classifying against `catalog` instead of the built-in
    /// one.
    pub(crate) fn with_catalog(
        config: GcLogProcessorConfig,
        catalog: Catalog<'static>,
    ) -> GcLogProcessor {
        defñ!("{:?}, {:?}", config, catalog);
        let preprocessor = LinePreprocessor::new(config.merge_lines_max);
        let jvm_start = config.jvm_start;
        let jdk_version = config.jdk_version;

        GcLogProcessor {
            config,
            catalog,
            preprocessor,
            jvm_start,
            jdk_version,
            collector_family: CollectorFamily::Unknown,
            collector_family_from_header: false,
            results: Vec::with_capacity(4),
            count_records: BTreeMap::new(),
            count_notifications: HashMap::new(),
            timestamp_first: None,
            timestamp_last: None,
        }
    }

    pub const fn jvm_start(&self) -> Option<&DateTimeL> {
        self.jvm_start.as_ref()
    }

    pub const fn jdk_version(&self) -> Option<JdkVersion> {
        self.jdk_version
    }

    pub const fn collector_family(&self) -> CollectorFamily {
        self.collector_family
    }

    pub const fn config(&self) -> &GcLogProcessorConfig {
        &self.config
    }

    /// Count of raw lines pushed so far.
    pub fn count_raw_lines(&self) -> Count {
        self.preprocessor.count_raw_lines
    }

    fn notify(
        &mut self,
        sink: &mut dyn NotificationSink,
        notification: Notification,
    ) {
        defo!("{}", notification);
        *self
            .count_notifications
            .entry(notification.kind())
            .or_insert(0) += 1;
        sink.notify(notification);
    }

    /// Process the next raw line of input, line numbers counting from 1
    /// in push order.
    ///
    /// Completed records are appended to `records`. A record may be
    /// appended for an earlier line, when this line closes its session.
    pub fn push_line(
        &mut self,
        raw_line: &str,
        records: &mut Vec<EventRecord>,
        sink: &mut dyn NotificationSink,
    ) -> RunResult<()> {
        let line_number: LineNumber = self.preprocessor.count_raw_lines + 1;
        let mut results = std::mem::take(&mut self.results);
        self.preprocessor.push(raw_line, line_number, &mut results);
        let ret = self.process_results(&mut results, records, sink);
        results.clear();
        self.results = results;

        ret
    }

    /// Flush the preprocessor at end of input.
    pub fn finish(
        &mut self,
        records: &mut Vec<EventRecord>,
        sink: &mut dyn NotificationSink,
    ) -> RunResult<()> {
        defn!();
        let mut results = std::mem::take(&mut self.results);
        self.preprocessor.finish(&mut results);
        let ret = self.process_results(&mut results, records, sink);
        results.clear();
        self.results = results;
        defx!();

        ret
    }

    /// Process a complete input and return its records.
    pub fn process_lines<I, S>(
        &mut self,
        lines: I,
        sink: &mut dyn NotificationSink,
    ) -> RunResult<Vec<EventRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records: Vec<EventRecord> = Vec::new();
        for line in lines {
            self.push_line(line.as_ref(), &mut records, sink)?;
        }
        self.finish(&mut records, sink)?;

        Ok(records)
    }

    fn process_results(
        &mut self,
        results: &mut Vec<PreprocessResult>,
        records: &mut Vec<EventRecord>,
        sink: &mut dyn NotificationSink,
    ) -> RunResult<()> {
        for result in results.drain(..) {
            match result {
                PreprocessResult::Line(logical) => {
                    if let Some(record) = self.process_logical_line(&logical, sink)? {
                        records.push(record);
                    }
                }
                PreprocessResult::Incomplete(IncompleteMerge { line_number, raw_lines, reason }) => {
                    self.notify(sink, Notification::IncompleteMerge { line_number, raw_lines, reason });
                }
            }
        }

        Ok(())
    }

    /// Classify, extract, and reconcile one logical line.
    fn process_logical_line(
        &mut self,
        logical: &LogicalLine,
        sink: &mut dyn NotificationSink,
    ) -> RunResult<Option<EventRecord>> {
        defn!("{:?}", logical);
        if self.jvm_start.is_none() {
            if let Some(jvm_start) = logical.decorator.jvm_start_reference() {
                defo!("derived jvm_start {:?}", jvm_start);
                self.jvm_start = Some(jvm_start);
            }
        }

        let classification: Classification = match classify_in(self.catalog, logical, self.config.verify_catalog) {
            Ok(Some(classification)) => classification,
            Ok(None) => {
                self.notify(
                    sink,
                    Notification::Unrecognized {
                        line_number: logical.line_number,
                        raw_lines: logical.raw_lines.clone(),
                    },
                );
                defx!("unrecognized");
                return Ok(None);
            }
            Err(ClassifyError::Ambiguous { first, second }) => {
                defx!("ambiguous");
                return Err(RunError::AmbiguousMatch {
                    line_number: logical.line_number,
                    first,
                    second,
                    payload: logical.payload.clone(),
                });
            }
        };

        let context = ExtractContext {
            jdk_version: self.jdk_version,
        };
        let (mut record, errors) = extract(&classification, logical, &context);
        for error in errors.into_iter() {
            self.notify(
                sink,
                Notification::ExtractionFailure {
                    line_number: logical.line_number,
                    kind: record.kind,
                    error,
                },
            );
        }

        self.update_context(&record);
        record.collector_family = self.family_of(&record);

        record.timestamp_ms = reconcile_timestamp(
            &logical.decorator,
            classification.anchor,
            record.duration_us,
            self.jvm_start.as_ref(),
        );
        if record.timestamp_ms.is_none() && logical.decorator.stamp.datestamp().is_some() {
            if self.config.require_jvm_start && self.jvm_start.is_none() {
                defx!("missing jvm_start");
                return Err(RunError::MissingJvmStart {
                    line_number: logical.line_number,
                });
            }
            self.notify(
                sink,
                Notification::UnresolvableTimestamp {
                    line_number: logical.line_number,
                    kind: record.kind,
                },
            );
        }

        *self.count_records.entry(record.kind).or_insert(0) += 1;
        if let Some(timestamp_ms) = record.timestamp_ms {
            if self.timestamp_first.is_none() {
                self.timestamp_first = Some(timestamp_ms);
            }
            self.timestamp_last = Some(timestamp_ms);
        }
        defx!("{:?}", record);

        Ok(Some(record))
    }

    /// Learn collector family and JDK version from header records and
    /// family-specific kinds.
    fn update_context(
        &mut self,
        record: &EventRecord,
    ) {
        match &record.info {
            Some(HeaderInfo::Collector(family)) if *family != CollectorFamily::Unknown => {
                defo!("collector family {:?} from header", family);
                self.collector_family = *family;
                self.collector_family_from_header = true;
                return;
            }
            Some(HeaderInfo::Version { major, .. }) if self.config.jdk_version.is_none() => {
                defo!("jdk version {} from header", major);
                self.jdk_version = Some(*major);
                return;
            }
            _ => {}
        }
        if self.collector_family_from_header || self.collector_family != CollectorFamily::Unknown {
            return;
        }
        if let Some(family) = record.kind.family() {
            defo!("collector family {:?} from {:?}", family, record.kind);
            self.collector_family = family;
        }
    }

    /// The collector family of `record`: from its kind, else from context,
    /// else `G1` for a G1-only trigger.
    fn family_of(
        &self,
        record: &EventRecord,
    ) -> CollectorFamily {
        if let Some(HeaderInfo::Collector(family)) = &record.info {
            return *family;
        }
        if let Some(family) = record.kind.family() {
            return family;
        }
        if self.collector_family != CollectorFamily::Unknown {
            return self.collector_family;
        }
        match record.trigger {
            Some(trigger) if trigger.is_g1_only() => CollectorFamily::G1,
            _ => CollectorFamily::Unknown,
        }
    }

    /// Statistics of the run so far.
    pub fn summary(&self) -> SummaryGcLogProcessor {
        let count = |kind: NotificationKind| -> Count {
            self.count_notifications
                .get(&kind)
                .copied()
                .unwrap_or(0)
        };

        SummaryGcLogProcessor {
            count_raw_lines: self.preprocessor.count_raw_lines,
            count_logical_lines: self.preprocessor.count_logical_lines,
            count_merged_lines: self.preprocessor.count_merged_lines,
            count_chatter: self.preprocessor.count_chatter,
            count_records: self.count_records.clone(),
            count_unrecognized: count(NotificationKind::Unrecognized),
            count_incomplete_merges: count(NotificationKind::IncompleteMerge),
            count_extraction_failures: count(NotificationKind::ExtractionFailure),
            count_unresolved_timestamps: count(NotificationKind::UnresolvableTimestamp),
            timestamp_first: self.timestamp_first,
            timestamp_last: self.timestamp_last,
            collector_family: self.collector_family,
            jdk_version: self.jdk_version,
            jvm_start: self.jvm_start,
        }
    }
}
