// src/readers/summary.rs

//! Implements `Summary` statistics tracking structs.

use crate::common::{Count, FPath, JdkVersion, Millis};
use crate::data::decorator::DateTimeLOpt;
use crate::data::eventkind::EventKind;
use crate::data::trigger::CollectorFamily;

use std::collections::BTreeMap;
use std::fmt;

use ::more_asserts::debug_assert_le;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SummaryGcLogProcessor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Accumulated statistics of one [`GcLogProcessor`] run.
///
/// For CLI option `--summary`.
///
/// [`GcLogProcessor`]: crate::readers::gclogprocessor::GcLogProcessor
#[derive(Clone, Default, Eq, PartialEq)]
pub struct SummaryGcLogProcessor {
    /// raw lines pushed
    pub count_raw_lines: Count,
    /// logical lines produced by the preprocessor
    pub count_logical_lines: Count,
    /// logical lines merged from more than one raw line
    pub count_merged_lines: Count,
    /// raw lines dropped as chatter
    pub count_chatter: Count,
    /// records emitted per kind
    pub count_records: BTreeMap<EventKind, Count>,
    pub count_unrecognized: Count,
    pub count_incomplete_merges: Count,
    pub count_extraction_failures: Count,
    pub count_unresolved_timestamps: Count,
    /// start timestamp of the first record with one
    pub timestamp_first: Option<Millis>,
    /// start timestamp of the last record with one
    pub timestamp_last: Option<Millis>,
    pub collector_family: CollectorFamily,
    pub jdk_version: Option<JdkVersion>,
    pub jvm_start: DateTimeLOpt,
}

impl SummaryGcLogProcessor {
    /// Total of records over all kinds.
    pub fn count_records_total(&self) -> Count {
        let total: Count = self.count_records.values().sum();
        debug_assert_le!(total, self.count_logical_lines, "more records than logical lines");

        total
    }

    /// Records of `kind`.
    pub fn count_records_of(
        &self,
        kind: EventKind,
    ) -> Count {
        self.count_records
            .get(&kind)
            .copied()
            .unwrap_or(0)
    }

    /// Count of records of pause kinds.
    pub fn count_pauses(&self) -> Count {
        self.count_records
            .iter()
            .filter(|(kind, _)| kind.is_pause())
            .map(|(_, count)| *count)
            .sum()
    }
}

impl fmt::Debug for SummaryGcLogProcessor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("SummaryGcLogProcessor")
            .field("count_raw_lines", &self.count_raw_lines)
            .field("count_logical_lines", &self.count_logical_lines)
            .field("count_merged_lines", &self.count_merged_lines)
            .field("count_chatter", &self.count_chatter)
            .field("count_records", &self.count_records)
            .field("count_unrecognized", &self.count_unrecognized)
            .field("count_incomplete_merges", &self.count_incomplete_merges)
            .field("count_extraction_failures", &self.count_extraction_failures)
            .field("count_unresolved_timestamps", &self.count_unresolved_timestamps)
            .field("timestamp_first", &self.timestamp_first)
            .field("timestamp_last", &self.timestamp_last)
            .field("collector_family", &self.collector_family)
            .field("jdk_version", &self.jdk_version)
            .field("jvm_start", &self.jvm_start)
            .finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Summary
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Statistics of one processed input file.
#[derive(Clone, Debug, Default)]
pub struct Summary {
    /// the processed file, or `-` for stdin
    pub path: FPath,
    pub processor: SummaryGcLogProcessor,
    /// the error that stopped processing this file, if any
    pub error: Option<String>,
}

impl Summary {
    pub fn new(
        path: FPath,
        processor: SummaryGcLogProcessor,
        error: Option<String>,
    ) -> Summary {
        Summary {
            path,
            processor,
            error,
        }
    }

    /// A file that could not be read at all.
    pub fn new_failed(
        path: FPath,
        error: String,
    ) -> Summary {
        Summary {
            path,
            processor: SummaryGcLogProcessor::default(),
            error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
