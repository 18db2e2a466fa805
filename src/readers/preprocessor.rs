// src/readers/preprocessor.rs

//! Implements a [`LinePreprocessor`], the stateful merger turning raw GC
//! log lines into [`LogicalLine`]s.
//!
//! A `LinePreprocessor`:
//! - strips the decorator of every raw line ([`split_decorator`])
//! - drops chatter, lines that carry no event data
//! - merges multi-line constructs into one logical line with a canonical
//!   payload:
//!   - a detailed pause, opened by a `gc,start` line such as
//!     `GC(3) Pause Young (Allocation Failure)` and keyed by its `GC(n)`
//!   - a safepoint session, `Entering safepoint region: …` through
//!     `Total time for which application threads were stopped: …`
//!   - a heap dump, `GC(n) Heap before GC invocations=…` or the exit `Heap`,
//!     followed by its indented lines
//! - passes any other line through as a single-line logical line
//!
//! Lines of other events printed while a session is open are passed
//! through in input order; a session is emitted when it closes.
//!
//! [`split_decorator`]: crate::data::decorator::split_decorator

use crate::common::{Count, GcId, LineNumber, MERGE_LINES_MAX_DEFAULT};
use crate::data::decorator::{split_decorator, Decorator};
use crate::data::eventkind::LineShape;
use crate::data::logicalline::LogicalLine;
use crate::data::patterns::{CGP_DURATION, CGP_HEAP, CGP_TIMES};

use std::fmt;

use ::const_format::concatcp;
use ::itertools::Itertools;
use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// line patterns of the preprocessor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// payload prefix opening a safepoint session
pub const SAFEPOINT_ENTERING: &str = "Entering safepoint region: ";
/// payload continuing a safepoint session
pub const SAFEPOINT_LEAVING: &str = "Leaving safepoint region";
/// payload prefix closing a safepoint session
pub const SAFEPOINT_TOTAL: &str = "Total time for which application threads were stopped: ";
/// payload of the exit heap footer opener
pub const FOOTER_HEAP: &str = "Heap";

/// Generation and metaspace prefixes of the detail lines of a pause,
/// and the slot each fills.
const PAUSE_DETAIL_PREFIXES: [(&str, DetailSlot); 8] = [
    ("DefNew: ", DetailSlot::Young),
    ("PSYoungGen: ", DetailSlot::Young),
    ("ParNew: ", DetailSlot::Young),
    ("Tenured: ", DetailSlot::Old),
    ("ParOldGen: ", DetailSlot::Old),
    ("PSOldGen: ", DetailSlot::Old),
    ("CMS: ", DetailSlot::Old),
    ("Metaspace: ", DetailSlot::Metaspace),
];

lazy_static! {
    /// `GC(12) ` at the start of a payload
    static ref REGEX_GC_ID: Regex = Regex::new(r"^GC\((\d+)\) ").unwrap();

    /// Opener of a detailed pause, the `gc,start` line of a pause without
    /// sizes or duration.
    ///
    /// Young, Full, and Mixed pauses always print a cause here. A bare
    /// `Pause Full` is the Shenandoah start line, which is chatter.
    static ref REGEX_PAUSE_OPENER: Regex = Regex::new(
        r"^GC\((\d+)\) Pause (?:(?:Young|Full|Mixed)(?: \((?:[^()]|\(\))+\))+|Remark|Cleanup|Initial Mark)$"
    ).unwrap();

    /// Tail of the summary line of a pause, `38M->19M(46M) 1.815ms`
    static ref REGEX_PAUSE_SUMMARY_TAIL: Regex = Regex::new(
        concatcp!("^", CGP_HEAP, " ", CGP_DURATION, "$")
    ).unwrap();

    /// `User=0.01s Sys=0.00s Real=0.02s` after the `GC(n) ` prefix
    static ref REGEX_PAUSE_TIMES: Regex = Regex::new(
        concatcp!("^", CGP_TIMES, "$")
    ).unwrap();

    /// opener of a heap dump around a collection
    static ref REGEX_HEAP_AT_GC_OPENER: Regex = Regex::new(
        r"^GC\((\d+)\) Heap (?:before|after) GC invocations="
    ).unwrap();

    /// continuation of a heap dump around a collection, indented after `GC(n)`
    static ref REGEX_HEAP_AT_GC_CONTINUATION: Regex = Regex::new(
        r"^GC\((\d+)\)  +\S"
    ).unwrap();

    /// Lines that carry no event data.
    static ref REGEX_CHATTER: Vec<Regex> = [
        // blank
        r"^\s*$",
        // banners
        r"^\s*-+\s*$",
        r"^\s*=+.*=+\s*$",
        // worker counts
        r"^(?:GC\(\d+\) )?(?:[YO]: )?Using \d+ (?:workers )?of \d+ (?:workers )?for .+$",
        // indented phase timings of a pause
        r"^GC\(\d+\) {2,}\S",
        r"^GC\(\d+\) (?:[YO]: )?Phase \d+: ",
        r"^GC\(\d+\) (?:Marking Phase|Summary Phase|Adjust Roots|Compaction Phase|Post Compact)\b",
        // region transitions
        r"^GC\(\d+\) (?:Eden|Survivor|Old|Archive|Humongous) regions: ",
        // Shenandoah start lines, repeated with a duration at the end
        r"^(?:GC\(\d+\) )?Pause (?:Init|Final) [A-Za-z ]+(?: \([a-z ,]+\))*$",
        r"^(?:GC\(\d+\) )?Concurrent [a-z][a-z ]*(?: \([a-z ,]+\))*$",
        r"^(?:GC\(\d+\) )?Pause Degenerated GC \([^()]+\)$",
        r"^(?:GC\(\d+\) )?Pause Full$",
        // Z generation start lines
        r"^GC\(\d+\) [YO]: (?:Young|Old) Generation$",
        // statistics prose
        r"^\s*(?:GC STATISTICS:|All times are .+)$",
        r#"^\s*"\([A-Z]\)" .+$"#,
    ]
    .iter()
    .map(|rp| Regex::new(rp).unwrap())
    .collect();
}

/// `Some(n)` for a payload starting with `GC(n) `.
pub fn payload_gc_id(payload: &str) -> Option<GcId> {
    let captures = REGEX_GC_ID.captures(payload)?;
    captures.get(1)?.as_str().parse::<GcId>().ok()
}

/// Is `payload` chatter?
pub fn is_chatter(payload: &str) -> bool {
    REGEX_CHATTER
        .iter()
        .any(|regex| regex.is_match(payload))
}

/// Collapse each run of whitespace to one space, trim both ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// results
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Why buffered raw lines were discarded.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IncompleteReason {
    /// Another opener arrived before the session closed.
    Interrupted,
    /// Input ended before the session closed.
    Unterminated,
    /// A continuation line without an open session.
    Orphaned,
    /// The session exceeded the merge buffer bound.
    TooLong,
}

impl fmt::Display for IncompleteReason {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        let text = match self {
            IncompleteReason::Interrupted => "interrupted by another opener",
            IncompleteReason::Unterminated => "input ended before closing line",
            IncompleteReason::Orphaned => "continuation without opener",
            IncompleteReason::TooLong => "too many lines",
        };
        write!(f, "{}", text)
    }
}

/// Raw lines of a session that never closed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IncompleteMerge {
    pub line_number: LineNumber,
    pub raw_lines: Vec<String>,
    pub reason: IncompleteReason,
}

/// Output of a [`LinePreprocessor`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PreprocessResult {
    Line(LogicalLine),
    Incomplete(IncompleteMerge),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// sessions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DetailSlot {
    Young,
    Old,
    Metaspace,
}

/// Raw lines retained by a session and the decorator of the first.
#[derive(Clone, Debug)]
struct Pending {
    decorator: Decorator,
    line_number: LineNumber,
    raw_lines: Vec<String>,
}

impl Pending {
    fn new(
        decorator: Decorator,
        line_number: LineNumber,
        raw_line: &str,
    ) -> Pending {
        Pending {
            decorator,
            line_number,
            raw_lines: vec![raw_line.to_string()],
        }
    }

    fn into_incomplete(
        self,
        reason: IncompleteReason,
    ) -> PreprocessResult {
        PreprocessResult::Incomplete(IncompleteMerge {
            line_number: self.line_number,
            raw_lines: self.raw_lines,
            reason,
        })
    }

    fn into_line(
        self,
        payload: String,
    ) -> PreprocessResult {
        PreprocessResult::Line(LogicalLine {
            payload,
            decorator: self.decorator,
            raw_lines: self.raw_lines,
            line_number: self.line_number,
            shape: LineShape::Merged,
        })
    }
}

/// A detailed pause keyed by its `GC(n)`.
#[derive(Clone, Debug)]
struct PauseSession {
    pending: Pending,
    gc_id: GcId,
    /// payload of the `gc,start` line, e.g. `GC(3) Pause Young (Allocation Failure)`
    opener: String,
    young: Option<String>,
    old: Option<String>,
    metaspace: Option<String>,
    /// `A->B(C) D.DDDms` of the summary line
    summary_tail: Option<String>,
    times: Option<String>,
}

impl PauseSession {
    /// `opener young old Metaspace: … A->B(C) Dms User=… Sys=… Real=…`,
    /// absent parts skipped.
    fn canonical_payload(&self) -> String {
        std::iter::once(&self.opener)
            .chain(self.young.iter())
            .chain(self.old.iter())
            .chain(self.metaspace.iter())
            .chain(self.summary_tail.iter())
            .chain(self.times.iter())
            .join(" ")
    }

    fn into_result(self) -> PreprocessResult {
        if self.summary_tail.is_none() {
            return self.pending.into_incomplete(IncompleteReason::Unterminated);
        }
        let payload = self.canonical_payload();

        self.pending.into_line(payload)
    }
}

/// A JDK 9 to 16 safepoint session.
#[derive(Clone, Debug)]
struct SafepointSession {
    pending: Pending,
    parts: Vec<String>,
}

/// A heap dump, `GC(n) Heap before GC …` or the exit `Heap`, and its
/// indented lines.
#[derive(Clone, Debug)]
struct HeapBlock {
    pending: Pending,
    /// `None` for the exit footer
    gc_id: Option<GcId>,
    parts: Vec<String>,
}

impl HeapBlock {
    fn is_continuation(
        &self,
        decorator: &Decorator,
        payload: &str,
    ) -> bool {
        match self.gc_id {
            Some(gc_id) => match REGEX_HEAP_AT_GC_CONTINUATION.captures(payload) {
                Some(captures) => captures
                    .get(1)
                    .and_then(|m| m.as_str().parse::<GcId>().ok())
                    == Some(gc_id),
                None => false,
            },
            None => {
                payload.starts_with([' ', '\t'])
                    && !payload.trim().is_empty()
                    && decorator.tags == self.pending.decorator.tags
            }
        }
    }

    fn into_result(self) -> PreprocessResult {
        let payload = self.parts.join(" ");

        self.pending.into_line(payload)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LinePreprocessor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Merges raw lines into [`LogicalLine`]s. See module docs.
///
/// Feed raw lines in input order with [`push`], then call [`finish`] once
/// at end of input.
///
/// [`push`]: LinePreprocessor::push
/// [`finish`]: LinePreprocessor::finish
pub struct LinePreprocessor {
    pause: Option<PauseSession>,
    safepoint: Option<SafepointSession>,
    block: Option<HeapBlock>,
    /// A session retaining more raw lines is discarded.
    merge_lines_max: usize,
    /// count of raw lines pushed
    pub(crate) count_raw_lines: Count,
    /// count of raw lines dropped as chatter
    pub(crate) count_chatter: Count,
    /// count of logical lines emitted
    pub(crate) count_logical_lines: Count,
    /// count of merged logical lines emitted
    pub(crate) count_merged_lines: Count,
    /// count of incomplete merges reported
    pub(crate) count_incomplete: Count,
}

impl fmt::Debug for LinePreprocessor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LinePreprocessor")
            .field("pause", &self.pause.as_ref().map(|p| p.gc_id))
            .field("safepoint", &self.safepoint.is_some())
            .field("block", &self.block.as_ref().map(|b| b.gc_id))
            .field("merge_lines_max", &self.merge_lines_max)
            .field("count_raw_lines", &self.count_raw_lines)
            .field("count_chatter", &self.count_chatter)
            .field("count_logical_lines", &self.count_logical_lines)
            .finish()
    }
}

impl Default for LinePreprocessor {
    fn default() -> Self {
        LinePreprocessor::new(MERGE_LINES_MAX_DEFAULT)
    }
}

impl LinePreprocessor {
    pub fn new(merge_lines_max: usize) -> LinePreprocessor {
        LinePreprocessor {
            pause: None,
            safepoint: None,
            block: None,
            merge_lines_max: merge_lines_max.max(2),
            count_raw_lines: 0,
            count_chatter: 0,
            count_logical_lines: 0,
            count_merged_lines: 0,
            count_incomplete: 0,
        }
    }

    /// Is any session or heap dump still buffered?
    pub fn is_pending(&self) -> bool {
        self.pause.is_some() || self.safepoint.is_some() || self.block.is_some()
    }

    fn emit(
        &mut self,
        result: PreprocessResult,
        out: &mut Vec<PreprocessResult>,
    ) {
        match &result {
            PreprocessResult::Line(logical) => {
                self.count_logical_lines += 1;
                if logical.is_merged() {
                    self.count_merged_lines += 1;
                }
            }
            PreprocessResult::Incomplete(_) => self.count_incomplete += 1,
        }
        defo!("emit {:?}", result);
        out.push(result);
    }

    /// Process one raw line, `line_number` counting from 1.
    ///
    /// Zero or more results are appended to `out`.
    pub fn push(
        &mut self,
        raw_line: &str,
        line_number: LineNumber,
        out: &mut Vec<PreprocessResult>,
    ) {
        defn!("({}, {:?})", line_number, raw_line);
        let raw_line: &str = raw_line.trim_end_matches(['\r', '\n']);
        self.count_raw_lines += 1;
        let (decorator, payload) = split_decorator(raw_line);

        // heap dump continuation
        if let Some(mut block) = self.block.take() {
            if block.is_continuation(&decorator, payload) {
                if block.pending.raw_lines.len() >= self.merge_lines_max {
                    defx!("heap dump too long");
                    self.emit(block.pending.into_incomplete(IncompleteReason::TooLong), out);
                    return;
                }
                let part: &str = match block.gc_id {
                    Some(_) => REGEX_GC_ID
                        .find(payload)
                        .map_or(payload, |m| &payload[m.end()..]),
                    None => payload,
                };
                block.parts.push(collapse_whitespace(part));
                block.pending.raw_lines.push(raw_line.to_string());
                self.block = Some(block);
                defx!("heap dump continuation");
                return;
            }
            self.emit(block.into_result(), out);
        }

        // safepoint session
        if payload.starts_with(SAFEPOINT_ENTERING) {
            if let Some(session) = self.safepoint.take() {
                self.emit(session.pending.into_incomplete(IncompleteReason::Interrupted), out);
            }
            self.safepoint = Some(SafepointSession {
                pending: Pending::new(decorator, line_number, raw_line),
                parts: vec![payload.to_string()],
            });
            defx!("safepoint opened");
            return;
        }
        if payload == SAFEPOINT_LEAVING {
            match self.safepoint.take() {
                Some(mut session) => {
                    session.parts.push(payload.to_string());
                    session.pending.raw_lines.push(raw_line.to_string());
                    if session.pending.raw_lines.len() > self.merge_lines_max {
                        self.emit(session.pending.into_incomplete(IncompleteReason::TooLong), out);
                    } else {
                        self.safepoint = Some(session);
                    }
                }
                None => {
                    let pending = Pending::new(decorator, line_number, raw_line);
                    self.emit(pending.into_incomplete(IncompleteReason::Orphaned), out);
                }
            }
            defx!("safepoint leaving");
            return;
        }
        if payload.starts_with(SAFEPOINT_TOTAL) {
            if let Some(mut session) = self.safepoint.take() {
                session.parts.push(payload.to_string());
                session.pending.raw_lines.push(raw_line.to_string());
                let payload = session.parts.join(" ");
                self.emit(session.pending.into_line(payload), out);
                defx!("safepoint closed");
                return;
            }
            // without a session it is a single line
        }

        // pause session
        let opener_gc_id: Option<GcId> = REGEX_PAUSE_OPENER
            .captures(payload)
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse::<GcId>().ok());
        if let Some(gc_id) = opener_gc_id {
            if let Some(session) = self.pause.take() {
                match session.summary_tail {
                    Some(_) => self.emit(session.into_result(), out),
                    None => self.emit(session.pending.into_incomplete(IncompleteReason::Interrupted), out),
                }
            }
            self.pause = Some(PauseSession {
                pending: Pending::new(decorator, line_number, raw_line),
                gc_id,
                opener: payload.to_string(),
                young: None,
                old: None,
                metaspace: None,
                summary_tail: None,
                times: None,
            });
            defx!("pause opened GC({})", gc_id);
            return;
        }
        if let Some(mut session) = self.pause.take() {
            if payload_gc_id(payload) == Some(session.gc_id) {
                match Self::pause_continuation(&mut session, raw_line, payload) {
                    PauseStep::Retained => {
                        if session.pending.raw_lines.len() > self.merge_lines_max {
                            self.emit(session.pending.into_incomplete(IncompleteReason::TooLong), out);
                        } else {
                            self.pause = Some(session);
                        }
                        defx!("pause continuation");
                        return;
                    }
                    PauseStep::Closed => {
                        self.emit(session.into_result(), out);
                        defx!("pause closed");
                        return;
                    }
                    PauseStep::Unrelated => {}
                }
            }
            // Only another opener aborts a session without its summary.
            // Lines of other GC(n) and untagged lines interleave with the
            // session and pass through as lines of their own.
            if session.summary_tail.is_some() {
                // summary seen and the thread times did not follow
                self.emit(session.into_result(), out);
            } else {
                self.pause = Some(session);
            }
        }

        // heap dump openers
        if let Some(captures) = REGEX_HEAP_AT_GC_OPENER.captures(payload) {
            let gc_id: Option<GcId> = captures
                .get(1)
                .and_then(|m| m.as_str().parse::<GcId>().ok());
            self.block = Some(HeapBlock {
                pending: Pending::new(decorator, line_number, raw_line),
                gc_id,
                parts: vec![collapse_whitespace(payload)],
            });
            defx!("heap dump opened");
            return;
        }
        if payload == FOOTER_HEAP {
            self.block = Some(HeapBlock {
                pending: Pending::new(decorator, line_number, raw_line),
                gc_id: None,
                parts: vec![payload.to_string()],
            });
            defx!("heap footer opened");
            return;
        }

        if is_chatter(payload) {
            self.count_chatter += 1;
            defx!("chatter");
            return;
        }

        let logical = LogicalLine::new_single(payload, decorator, raw_line, line_number);
        self.emit(PreprocessResult::Line(logical), out);
        defx!();
    }

    /// A line with the same `GC(n)` as the open pause session.
    fn pause_continuation(
        session: &mut PauseSession,
        raw_line: &str,
        payload: &str,
    ) -> PauseStep {
        let rest: &str = REGEX_GC_ID
            .find(payload)
            .map_or(payload, |m| &payload[m.end()..]);

        if REGEX_PAUSE_TIMES.is_match(rest) {
            session.times = Some(rest.to_string());
            session.pending.raw_lines.push(raw_line.to_string());
            if session.summary_tail.is_some() {
                return PauseStep::Closed;
            }
            return PauseStep::Retained;
        }
        if session.summary_tail.is_some() {
            return PauseStep::Unrelated;
        }
        if let Some(tail) = payload
            .strip_prefix(session.opener.as_str())
            .and_then(|tail| tail.strip_prefix(' '))
        {
            if REGEX_PAUSE_SUMMARY_TAIL.is_match(tail) {
                session.summary_tail = Some(tail.to_string());
                session.pending.raw_lines.push(raw_line.to_string());
                return PauseStep::Retained;
            }
        }
        for (prefix, slot) in PAUSE_DETAIL_PREFIXES.iter() {
            if !rest.starts_with(prefix) {
                continue;
            }
            let field: &mut Option<String> = match slot {
                DetailSlot::Young => &mut session.young,
                DetailSlot::Old => &mut session.old,
                DetailSlot::Metaspace => &mut session.metaspace,
            };
            if field.is_some() {
                return PauseStep::Unrelated;
            }
            *field = Some(rest.to_string());
            session.pending.raw_lines.push(raw_line.to_string());
            return PauseStep::Retained;
        }

        PauseStep::Unrelated
    }

    /// Flush at end of input.
    ///
    /// A buffered heap dump, and a pause whose summary was seen, are
    /// emitted. Any other open session is reported incomplete.
    pub fn finish(
        &mut self,
        out: &mut Vec<PreprocessResult>,
    ) {
        defn!();
        if let Some(block) = self.block.take() {
            self.emit(block.into_result(), out);
        }
        if let Some(session) = self.pause.take() {
            self.emit(session.into_result(), out);
        }
        if let Some(session) = self.safepoint.take() {
            self.emit(session.pending.into_incomplete(IncompleteReason::Unterminated), out);
        }
        defx!();
    }
}

/// What a same-`GC(n)` line did to an open pause session.
enum PauseStep {
    Retained,
    Closed,
    Unrelated,
}
