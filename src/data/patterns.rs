// src/data/patterns.rs

//! The event pattern catalog [`EVENT_PARSE_DATAS`]: one declarative
//! grammar per [`EventKind`].
//!
//! Each grammar is a regular expression over a logical line's payload,
//! anchored at both ends, and assembled with [`concatcp!`] from shared
//! sub-grammars:
//! - the `GC(n) ` sequence marker ([`CGP_GC_ID`])
//! - trigger alternations ([`CGP_TRIGGER_GEN`], [`CGP_TRIGGER_G1`],
//!   [`CGP_TRIGGER_ANY`])
//! - the heap size transition `A->B(C)` ([`CGP_HEAP`])
//! - generation transitions ([`CGP_YOUNG`], [`CGP_OLD`])
//! - the metaspace transition ([`CGP_METASPACE`])
//! - a duration literal ([`CGP_DURATION`])
//! - the `User=… Sys=… Real=…` thread times ([`CGP_TIMES`])
//!
//! Fields are retrieved by capture group name, never by position.
//! The `CGN_` constants are the names, the `CGP_` constants the patterns.
//!
//! Each [`EventParseInstr`] also declares the [`LineShape`] it applies to
//! and the [`TimestampAnchor`] of its logical line's timestamp.
//!
//! No two grammars may match the same logical line. Each entry carries
//! hardcoded self-test payloads; the classifier must return exactly that
//! entry for each of them (test `test_EVENT_PARSE_DATAS_test_cases`).
//!
//! [`concatcp!`]: https://docs.rs/const_format/0.2.34/const_format/macro.concatcp.html
//! [`EVENT_PARSE_DATAS`]: self::EVENT_PARSE_DATAS

#![allow(non_camel_case_types)]

use crate::data::decorator::{CaptureGroupName, CaptureGroupPattern, RegexPattern};
use crate::data::eventkind::{EventKind, LineShape, TimestampAnchor};

use std::fmt;

use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::memchr::memmem;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// capture group names
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const CGN_GC_ID: &CaptureGroupName = "gc_id";
pub const CGN_TRIGGER: &CaptureGroupName = "trigger";
/// second trigger group, for grammars with two trigger alternatives
pub const CGN_TRIGGER2: &CaptureGroupName = "trigger2";
pub const CGN_HEAP_BEFORE: &CaptureGroupName = "heap_before";
pub const CGN_HEAP_AFTER: &CaptureGroupName = "heap_after";
pub const CGN_HEAP_CAP: &CaptureGroupName = "heap_cap";
pub const CGN_YOUNG_BEFORE: &CaptureGroupName = "young_before";
pub const CGN_YOUNG_AFTER: &CaptureGroupName = "young_after";
pub const CGN_YOUNG_CAP: &CaptureGroupName = "young_cap";
pub const CGN_OLD_BEFORE: &CaptureGroupName = "old_before";
pub const CGN_OLD_AFTER: &CaptureGroupName = "old_after";
pub const CGN_OLD_CAP: &CaptureGroupName = "old_cap";
pub const CGN_METASPACE: &CaptureGroupName = "metaspace";
pub const CGN_DURATION: &CaptureGroupName = "duration";
pub const CGN_DURATION_UNIT: &CaptureGroupName = "duration_unit";
pub const CGN_USER: &CaptureGroupName = "user";
pub const CGN_SYS: &CaptureGroupName = "sys";
pub const CGN_REAL: &CaptureGroupName = "real";
pub const CGN_PHASE: &CaptureGroupName = "phase";
pub const CGN_QUALIFIER: &CaptureGroupName = "qualifier";
pub const CGN_STOPPED: &CaptureGroupName = "stopped";
pub const CGN_STOPPING: &CaptureGroupName = "stopping";
pub const CGN_REACHING: &CaptureGroupName = "reaching";
pub const CGN_TOTAL: &CaptureGroupName = "total";
pub const CGN_APP_TIME: &CaptureGroupName = "app_time";
pub const CGN_HEAP_TOTAL: &CaptureGroupName = "heap_total";
pub const CGN_HEAP_USED: &CaptureGroupName = "heap_used";
pub const CGN_Z_USED: &CaptureGroupName = "z_used";
pub const CGN_Z_CAPACITY: &CaptureGroupName = "z_capacity";
pub const CGN_COLLECTOR: &CaptureGroupName = "collector";
pub const CGN_VERSION: &CaptureGroupName = "version";
pub const CGN_MAJOR: &CaptureGroupName = "major";
pub const CGN_CPUS_TOTAL: &CaptureGroupName = "cpus_total";
pub const CGN_CPUS_AVAILABLE: &CaptureGroupName = "cpus_available";
pub const CGN_MEMORY: &CaptureGroupName = "memory";
pub const CGN_WHICH: &CaptureGroupName = "which";
pub const CGN_CAPACITY: &CaptureGroupName = "capacity";
pub const CGN_ADDRESS: &CaptureGroupName = "address";
pub const CGN_SIZE_MB: &CaptureGroupName = "size_mb";
pub const CGN_OOPS_MODE: &CaptureGroupName = "oops_mode";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// shared sub-grammars
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const RP_BOL: &RegexPattern = "^";
const RP_EOL: &RegexPattern = "$";

/// a memory literal, e.g. `38M`
pub const RP_MEM: &RegexPattern = r"\d+[BKMG]";
/// a decimal literal, e.g. `0.0004546`
pub const RP_DECIMAL: &RegexPattern = r"\d+[.,]\d+";

/// `GC(1012) `
pub const CGP_GC_ID: &CaptureGroupPattern = r"GC\((?P<gc_id>\d+)\) ";
/// `GC(1012) ` or nothing; Shenandoah and a few others print without it
pub const CGP_GC_ID_OPT: &CaptureGroupPattern = r"(?:GC\((?P<gc_id>\d+)\) )?";

/// Causes printed by the Serial, Parallel, and CMS collectors, and shared
/// with G1. Disjoint from [`RP_TRIGGERS_G1`].
pub const RP_TRIGGERS_GEN: &RegexPattern = concatcp!(
    r"Allocation Failure|Ergonomics|System\.gc\(\)|GCLocker Initiated GC",
    r"|Metadata GC Threshold|Metadata GC Clear Soft References",
    r"|Heap Dump Initiated GC|Heap Inspection Initiated GC|Last ditch collection",
    r"|JvmtiEnv ForceGarbageCollection|WhiteBox Initiated Young GC",
    r"|WhiteBox Initiated Full GC|Diagnostic Command|CMS Initial Mark",
    r"|CMS Final Remark|FullGCAlot|ScavengeAlot",
);
/// Causes only the G1 collector prints.
pub const RP_TRIGGERS_G1: &RegexPattern = concatcp!(
    r"G1 Evacuation Pause|G1 Humongous Allocation|G1 Compaction Pause",
    r"|G1 Preventive Collection|G1 Periodic Collection",
    r"|WhiteBox Initiated Concurrent Mark",
);
/// Any parenthesized text; an embedded `()` is allowed for `System.gc()`.
pub const RP_TRIGGER_ANY: &RegexPattern = r"(?:[^()]|\(\))+";

pub const CGP_TRIGGER_GEN: &CaptureGroupPattern = concatcp!(r"\((?P<trigger>", RP_TRIGGERS_GEN, r")\)");
pub const CGP_TRIGGER_G1: &CaptureGroupPattern = concatcp!(r"\((?P<trigger>", RP_TRIGGERS_G1, r")\)");
pub const CGP_TRIGGER_ANY: &CaptureGroupPattern = concatcp!(r"\((?P<trigger>", RP_TRIGGER_ANY, r")\)");
pub const CGP_TRIGGER2_G1: &CaptureGroupPattern = concatcp!(r"\((?P<trigger2>", RP_TRIGGERS_G1, r")\)");

/// `38M->19M(46M)`
pub const CGP_HEAP: &CaptureGroupPattern = concatcp!(
    "(?P<heap_before>", RP_MEM, ")->(?P<heap_after>", RP_MEM, r")\((?P<heap_cap>", RP_MEM, r")\)",
);
/// Z prints occupancy percentages, `42M(4%)->26M(3%)`
pub const CGP_ZHEAP: &CaptureGroupPattern = concatcp!(
    "(?P<heap_before>", RP_MEM, r")\(\d+%\)->(?P<heap_after>", RP_MEM, r")\(\d+%\)",
);
/// `4416K->512K(4928K)`, or since JDK 17 with capacity before and eden and
/// survivor detail `2176K(2432K)->256K(2432K) Eden: 2176K(2176K)->0K(2176K) From: 0K(256K)->256K(256K)`
pub const CGP_YOUNG: &CaptureGroupPattern = concatcp!(
    "(?P<young_before>", RP_MEM, r")(?:\(", RP_MEM, r"\))?->(?P<young_after>", RP_MEM,
    r")\((?P<young_cap>", RP_MEM, r")\)(?: Eden: \S+ From: \S+)?",
);
/// `0K->2278K(10944K)` or `0K(5504K)->1700K(5504K)`
pub const CGP_OLD: &CaptureGroupPattern = concatcp!(
    "(?P<old_before>", RP_MEM, r")(?:\(", RP_MEM, r"\))?->(?P<old_after>", RP_MEM,
    r")\((?P<old_cap>", RP_MEM, r")\)",
);
const RP_MEM_TRANS_C: &RegexPattern = concatcp!(RP_MEM, r"\(", RP_MEM, r"\)->", RP_MEM, r"\(", RP_MEM, r"\)");
/// The text after `Metaspace: `, one of
/// - `1119K->1119K(1056768K)` (before JDK 16)
/// - `1119K(1216K)->1119K(1216K) NonClass: 1010K(1088K)->1010K(1088K) Class: 108K(128K)->108K(128K)`
/// - `1119K(1216K)->1119K(1216K)`
/// - `5M used, 5M committed, 1032M reserved` (Z)
///
/// Captured whole, parsed by the extractor.
pub const CGP_METASPACE: &CaptureGroupPattern = concatcp!(
    "(?P<metaspace>",
    RP_MEM, r"(?:\(", RP_MEM, r"\))?->", RP_MEM, r"\(", RP_MEM, r"\)",
    "(?: NonClass: ", RP_MEM_TRANS_C, " Class: ", RP_MEM_TRANS_C, ")?",
    "|", RP_MEM, " used, ", RP_MEM, " committed, ", RP_MEM, " reserved",
    ")",
);
/// optional ` Metaspace: …` slot of a merged pause
const RP_METASPACE_OPT: &RegexPattern = concatcp!("(?: Metaspace: ", CGP_METASPACE, ")?");
/// `1.815ms`, `250us`, `0.123s`
pub const CGP_DURATION: &CaptureGroupPattern =
    r"(?P<duration>\d+(?:[.,]\d+)?)(?P<duration_unit>ms|us|ns|s)";
/// `User=0.01s Sys=0.00s Real=0.02s`
pub const CGP_TIMES: &CaptureGroupPattern = concatcp!(
    "User=(?P<user>", RP_DECIMAL, ")s Sys=(?P<sys>", RP_DECIMAL, ")s Real=(?P<real>", RP_DECIMAL, ")s",
);
/// optional ` User=… Sys=… Real=…` slot of a merged pause
const RP_TIMES_OPT: &RegexPattern = concatcp!("(?: ", CGP_TIMES, ")?");
/// ` 38M->19M(46M) 1.815ms`, the tail of every pause summary
const RP_HEAP_DURATION: &RegexPattern = concatcp!(" ", CGP_HEAP, " ", CGP_DURATION);
/// merged pause tail, metaspace then summary then thread times
const RP_DETAILED_TAIL: &RegexPattern = concatcp!(RP_METASPACE_OPT, RP_HEAP_DURATION, RP_TIMES_OPT);
/// Shenandoah pause qualifier, `(unload classes)`
const CGP_SH_QUALIFIER: &CaptureGroupPattern = r"(?: \((?P<qualifier>[a-z][a-z ,]*)\))?";
/// Z generational prefix, `Y: ` or `O: `
const RP_Z_GENERATION_OPT: &RegexPattern = r"(?:[YO]: )?";
/// concurrent phase name in title case, `Mark From Roots`
const CGP_CONC_PHASE: &CaptureGroupPattern = r"(?P<phase>[A-Z][A-Za-z\-]*(?: [A-Za-z\-]+)*)";
/// `(0.144s)` or `(0.144s, 0.156s)` printed by G1 concurrent mark
const RP_CONC_SECONDS_OPT: &RegexPattern = r"(?: \(\d+[.,]\d+s(?:, \d+[.,]\d+s)?\))?";
const RP_SAFEPOINT_TOTAL: &RegexPattern = concatcp!(
    "Total time for which application threads were stopped: (?P<stopped>", RP_DECIMAL,
    ") seconds, Stopping threads took: (?P<stopping>", RP_DECIMAL, ") seconds",
);
/// heap usage inside a heap dump, `… total 262144K, used 24576K …`
const RP_HEAP_DUMP_BODY: &RegexPattern = concatcp!(
    "(?:.*? total (?P<heap_total>", RP_MEM, "), used (?P<heap_used>", RP_MEM, ").*",
    "|.*? used (?P<z_used>", RP_MEM, "), capacity (?P<z_capacity>", RP_MEM, ").*",
    "|.*)",
);
/// informational header lines with a `Name: value` form
const RP_GC_INFO_NAMES: &RegexPattern = concatcp!(
    r"Heap Region Size|Heap region size|Large Page Support|NUMA Support|Compressed Oops",
    r"|Pre-touch|Parallel Workers|Concurrent Workers|Concurrent Refinement Workers",
    r"|Periodic GC|Alignments|Heap Backing Filesystem|Heap Backing File|Mark Stack Max",
    r"|Runtime Workers|GC Workers|Address Space Type|Address Space Size",
    r"|Initialize Shenandoah heap|Regions|Humongous object threshold|Max TLAB size",
    r"|GC threads|Reference processing|Shenandoah GC mode|Shenandoah heuristics",
    r"|CDS archive\(s\) mapped at|Compressed class space mapped at|Narrow klass base",
    r"|Safepointing mechanism",
);
/// informational header lines without a value
const RP_GC_INFO_BARE: &RegexPattern = concatcp!(
    r"Initializing The Z Garbage Collector|CDS archive\(s\) not mapped",
    r"|Heuristics ergonomically sets .+",
);

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EventParseInstr
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One grammar of the catalog.
///
/// Tested in test `test_EVENT_PARSE_DATAS_test_cases`.
pub struct EventParseInstr<'a> {
    /// Regex pattern for [`captures`], anchored at both ends.
    ///
    /// [`captures`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html#method.captures
    pub regex_pattern: &'a RegexPattern,
    pub kind: EventKind,
    /// Only logical lines of this shape are tried against this grammar.
    pub shape: LineShape,
    /// What the logical line's timestamp denotes for this grammar.
    pub anchor: TimestampAnchor,
    /// A literal every matching payload contains. Checked with `memmem`
    /// before running the regex.
    pub hint: &'a str,
    /// Hardcoded self-test payloads (decorator already stripped).
    #[cfg(any(debug_assertions, test))]
    pub _test_cases: &'a [&'a str],
    /// Source code line number of declaration, to aid debugging.
    pub _line_num: u32,
}

impl fmt::Debug for EventParseInstr<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("EventParseInstr:")
            .field("kind", &self.kind)
            .field("shape", &self.shape)
            .field("anchor", &self.anchor)
            .field("hint", &self.hint)
            .field("line", &self._line_num)
            .finish()
    }
}

/// Declare an [`EventParseInstr`] more easily.
#[macro_export]
macro_rules! EPD {
    (
        $rp:expr,
        $kind:expr,
        $shape:expr,
        $anchor:expr,
        $hint:literal,
        $test_cases:expr,
        $line_num:expr,
    ) => {
        EventParseInstr {
            regex_pattern: $rp,
            kind: $kind,
            shape: $shape,
            anchor: $anchor,
            hint: $hint,
            #[cfg(any(debug_assertions, test))]
            _test_cases: $test_cases,
            _line_num: $line_num,
        }
    };
}
pub use EPD;

use EventKind as EK;
use LineShape::{Merged, Single};
use TimestampAnchor::{End, Start};

pub const EVENT_PARSE_DATAS_LEN: usize = 63;

/// The event grammar catalog.
///
/// Order of declaration is the classification precedence. Grammars are
/// anchored and built from disjoint alternations so order should never
/// decide a match; when catalog verification is enabled every entry is
/// tried and a second match is an error.
///
/// More common events are declared first, as classification stops at
/// the first match when verification is disabled.
pub const EVENT_PARSE_DATAS: [EventParseInstr; EVENT_PARSE_DATAS_LEN] = [
    //
    // ── one-line pause summaries, printed at pause end ──
    //
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Pause Young (?:\(Normal\) ", CGP_TRIGGER_ANY, "|", CGP_TRIGGER2_G1, ")", RP_HEAP_DURATION, RP_EOL),
        EK::G1Young, Single, End, "Pause Young (",
        &[
            "GC(1012) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms",
            "GC(3) Pause Young (Normal) (GCLocker Initiated GC) 100M->20M(256M) 4.000ms",
            "GC(7) Pause Young (G1 Evacuation Pause) 24M->4M(256M) 3.162ms",
            "GC(8) Pause Young (Normal) (System.gc()) 10M->10M(256M) 1.2ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Pause (?:Young \(Mixed\)|Mixed) ", CGP_TRIGGER_ANY, RP_HEAP_DURATION, RP_EOL),
        EK::G1Mixed, Single, End, "Mixed",
        &[
            "GC(21) Pause Young (Mixed) (G1 Evacuation Pause) 150M->90M(256M) 12.456ms",
            "GC(21) Pause Mixed (G1 Evacuation Pause) 150M->90M(256M) 12.456ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Pause (?:Young \(Concurrent Start\)|Initial Mark) ", CGP_TRIGGER_ANY, RP_HEAP_DURATION, RP_EOL),
        EK::G1ConcurrentStart, Single, End, "Pause ",
        &[
            "GC(14) Pause Young (Concurrent Start) (G1 Humongous Allocation) 120M->100M(256M) 5.100ms",
            "GC(14) Pause Initial Mark (G1 Evacuation Pause) 120M->100M(256M) 5.100ms",
            "GC(15) Pause Young (Concurrent Start) (Metadata GC Threshold) 20M->3M(256M) 2.777ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Pause Young \(Prepare Mixed\) ", CGP_TRIGGER_ANY, RP_HEAP_DURATION, RP_EOL),
        EK::G1PrepareMixed, Single, End, "Prepare Mixed",
        &[
            "GC(20) Pause Young (Prepare Mixed) (G1 Evacuation Pause) 160M->110M(256M) 8.000ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Cleanup", RP_HEAP_DURATION, RP_EOL),
        EK::G1Cleanup, Single, End, "Pause Cleanup",
        &[
            "GC(17) Pause Cleanup 130M->130M(256M) 0.123ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Full ", CGP_TRIGGER_G1, RP_HEAP_DURATION, RP_EOL),
        EK::G1Full, Single, End, "Pause Full (G1",
        &[
            "GC(30) Pause Full (G1 Compaction Pause) 255M->200M(256M) 350.123ms",
            "GC(31) Pause Full (G1 Humongous Allocation) 250M->100M(256M) 150.000ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Young ", CGP_TRIGGER_GEN, RP_HEAP_DURATION, RP_EOL),
        EK::UnifiedYoung, Single, End, "Pause Young (",
        &[
            "GC(0) Pause Young (Allocation Failure) 4M->2M(15M) 4.321ms",
            "GC(5) Pause Young (GCLocker Initiated GC) 40M->8M(100M) 2.000ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Full ", CGP_TRIGGER_GEN, RP_HEAP_DURATION, RP_EOL),
        EK::UnifiedFull, Single, End, "Pause Full (",
        &[
            "GC(2) Pause Full (Ergonomics) 20M->12M(60M) 40.000ms",
            "GC(9) Pause Full (System.gc()) 10M->3M(64M) 12.345ms",
            "GC(10) Pause Full (Metadata GC Threshold) 10M->3M(64M) 12.345ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Remark", RP_HEAP_DURATION, RP_EOL),
        EK::UnifiedRemark, Single, End, "Pause Remark",
        &[
            "GC(16) Pause Remark 125M->125M(256M) 2.345ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Initial Mark", RP_HEAP_DURATION, RP_EOL),
        EK::CmsInitialMark, Single, End, "Pause Initial Mark",
        &[
            "GC(4) Pause Initial Mark 10M->10M(15M) 0.200ms",
        ],
        line!(),
    ),
    //
    // ── merged detailed pauses, timestamp of the `gc,start` line ──
    //
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Young ", CGP_TRIGGER_ANY, " DefNew: ", CGP_YOUNG, "(?: Tenured: ", CGP_OLD, ")?", RP_DETAILED_TAIL, RP_EOL),
        EK::DefNew, Merged, Start, " DefNew: ",
        &[
            "GC(0) Pause Young (Allocation Failure) DefNew: 4416K->512K(4928K) Tenured: 0K->2278K(10944K) Metaspace: 1119K->1119K(1056768K) 4M->2M(15M) 4.321ms User=0.00s Sys=0.00s Real=0.01s",
            "GC(3) Pause Young (Allocation Failure) DefNew: 2176K(2432K)->256K(2432K) Eden: 2176K(2176K)->0K(2176K) From: 0K(256K)->256K(256K) Tenured: 0K(5504K)->1700K(5504K) Metaspace: 1119K(1216K)->1119K(1216K) NonClass: 1010K(1088K)->1010K(1088K) Class: 108K(128K)->108K(128K) 2M->1M(7M) 1.525ms User=0.00s Sys=0.00s Real=0.00s",
            "GC(4) Pause Young (Allocation Failure) DefNew: 4416K->512K(4928K) 4M->2M(15M) 4.321ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Full ", CGP_TRIGGER_ANY, " DefNew: ", CGP_YOUNG, " Tenured: ", CGP_OLD, RP_DETAILED_TAIL, RP_EOL),
        EK::SerialFull, Merged, Start, " Tenured: ",
        &[
            "GC(1) Pause Full (Allocation Failure) DefNew: 4928K->0K(4928K) Tenured: 10000K->8000K(10944K) Metaspace: 1119K->1119K(1056768K) 14M->8M(15M) 12.000ms User=0.01s Sys=0.00s Real=0.01s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Young ", CGP_TRIGGER_ANY, " PSYoungGen: ", CGP_YOUNG, "(?: (?:ParOldGen|PSOldGen): ", CGP_OLD, ")?", RP_DETAILED_TAIL, RP_EOL),
        EK::PsYoungGen, Merged, Start, " PSYoungGen: ",
        &[
            "GC(0) Pause Young (Allocation Failure) PSYoungGen: 6144K->1008K(7168K) ParOldGen: 0K->1816K(17408K) Metaspace: 2900K->2900K(1056768K) 6M->2M(24M) 2.100ms User=0.01s Sys=0.00s Real=0.00s",
            "GC(1) Pause Young (Allocation Failure) PSYoungGen: 6144K->1008K(7168K) PSOldGen: 0K->1816K(17408K) 6M->2M(24M) 2.100ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Full ", CGP_TRIGGER_ANY, " PSYoungGen: ", CGP_YOUNG, " ParOldGen: ", CGP_OLD, RP_DETAILED_TAIL, RP_EOL),
        EK::PsFull, Merged, Start, " ParOldGen: ",
        &[
            "GC(2) Pause Full (Ergonomics) PSYoungGen: 1008K->0K(7168K) ParOldGen: 16000K->9000K(17408K) Metaspace: 2900K->2900K(1056768K) 16M->8M(24M) 20.500ms User=0.05s Sys=0.00s Real=0.02s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Full ", CGP_TRIGGER_ANY, " PSYoungGen: ", CGP_YOUNG, " PSOldGen: ", CGP_OLD, RP_DETAILED_TAIL, RP_EOL),
        EK::PsSerialFull, Merged, Start, " PSOldGen: ",
        &[
            "GC(2) Pause Full (Ergonomics) PSYoungGen: 1008K->0K(7168K) PSOldGen: 16000K->9000K(17408K) 16M->8M(24M) 20.500ms User=0.02s Sys=0.00s Real=0.02s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Young ", CGP_TRIGGER_ANY, " ParNew: ", CGP_YOUNG, "(?: CMS: ", CGP_OLD, ")?", RP_DETAILED_TAIL, RP_EOL),
        EK::ParNew, Merged, Start, " ParNew: ",
        &[
            "GC(0) Pause Young (Allocation Failure) ParNew: 4416K->512K(4928K) CMS: 0K->2278K(10944K) Metaspace: 1119K->1119K(1056768K) 4M->2M(15M) 4.321ms User=0.01s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Young ", CGP_TRIGGER_GEN, RP_DETAILED_TAIL, RP_EOL),
        EK::UnifiedYoungDetailed, Merged, Start, "Pause Young (",
        &[
            "GC(5) Pause Young (Allocation Failure) 40M->8M(100M) 2.000ms User=0.01s Sys=0.00s Real=0.00s",
            "GC(6) Pause Young (GCLocker Initiated GC) Metaspace: 2900K->2900K(1056768K) 40M->8M(100M) 2.000ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Full ", CGP_TRIGGER_GEN, RP_DETAILED_TAIL, RP_EOL),
        EK::UnifiedFullDetailed, Merged, Start, "Pause Full (",
        &[
            "GC(9) Pause Full (System.gc()) Metaspace: 3000K(3200K)->3000K(3200K) NonClass: 2700K(2900K)->2700K(2900K) Class: 300K(300K)->300K(300K) 20M->5M(24M) 30.000ms User=0.05s Sys=0.01s Real=0.03s",
            "GC(9) Pause Full (System.gc()) 20M->5M(24M) 30.000ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Remark", RP_DETAILED_TAIL, RP_EOL),
        EK::UnifiedRemarkDetailed, Merged, Start, "Pause Remark",
        &[
            "GC(16) Pause Remark 125M->125M(256M) 2.345ms User=0.01s Sys=0.00s Real=0.00s",
            "GC(16) Pause Remark Metaspace: 3000K->2900K(1056768K) 125M->125M(256M) 2.345ms User=0.01s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Initial Mark", RP_DETAILED_TAIL, RP_EOL),
        EK::CmsInitialMarkDetailed, Merged, Start, "Pause Initial Mark",
        &[
            "GC(4) Pause Initial Mark 10M->10M(15M) 0.200ms User=0.00s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Pause Young (?:\(Normal\) ", CGP_TRIGGER_ANY, "|", CGP_TRIGGER2_G1, ")", RP_DETAILED_TAIL, RP_EOL),
        EK::G1YoungDetailed, Merged, Start, "Pause Young (",
        &[
            "GC(5) Pause Young (Normal) (G1 Evacuation Pause) Metaspace: 2900K(3072K)->2900K(3072K) NonClass: 2600K(2700K)->2600K(2700K) Class: 300K(372K)->300K(372K) 13M->5M(24M) 3.100ms User=0.01s Sys=0.00s Real=0.00s",
            "GC(5) Pause Young (G1 Evacuation Pause) 13M->5M(24M) 3.100ms User=0.01s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Pause (?:Young \(Mixed\)|Mixed) ", CGP_TRIGGER_ANY, RP_DETAILED_TAIL, RP_EOL),
        EK::G1MixedDetailed, Merged, Start, "Mixed",
        &[
            "GC(21) Pause Young (Mixed) (G1 Evacuation Pause) Metaspace: 2900K(3072K)->2900K(3072K) 150M->90M(256M) 12.456ms User=0.04s Sys=0.00s Real=0.01s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Pause (?:Young \(Concurrent Start\)|Initial Mark) ", CGP_TRIGGER_ANY, RP_DETAILED_TAIL, RP_EOL),
        EK::G1ConcurrentStartDetailed, Merged, Start, "Pause ",
        &[
            "GC(14) Pause Young (Concurrent Start) (G1 Humongous Allocation) 120M->100M(256M) 5.100ms User=0.02s Sys=0.00s Real=0.01s",
            "GC(14) Pause Initial Mark (G1 Evacuation Pause) 120M->100M(256M) 5.100ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Pause Young \(Prepare Mixed\) ", CGP_TRIGGER_ANY, RP_DETAILED_TAIL, RP_EOL),
        EK::G1PrepareMixedDetailed, Merged, Start, "Prepare Mixed",
        &[
            "GC(20) Pause Young (Prepare Mixed) (G1 Evacuation Pause) 160M->110M(256M) 8.000ms User=0.03s Sys=0.00s Real=0.01s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Cleanup", RP_DETAILED_TAIL, RP_EOL),
        EK::G1CleanupDetailed, Merged, Start, "Pause Cleanup",
        &[
            "GC(17) Pause Cleanup 130M->130M(256M) 0.123ms User=0.00s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "Pause Full ", CGP_TRIGGER_G1, RP_DETAILED_TAIL, RP_EOL),
        EK::G1FullDetailed, Merged, Start, "Pause Full (G1",
        &[
            "GC(30) Pause Full (G1 Compaction Pause) Metaspace: 3000K(3200K)->3000K(3200K) 255M->200M(256M) 350.123ms User=1.20s Sys=0.01s Real=0.35s",
        ],
        line!(),
    ),
    //
    // ── concurrent phases of G1, CMS, and Z ──
    //
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, RP_Z_GENERATION_OPT, "Concurrent ", CGP_CONC_PHASE, RP_CONC_SECONDS_OPT, RP_EOL),
        EK::ConcurrentPhaseStart, Single, Start, "Concurrent ",
        &[
            "GC(6) Concurrent Cycle",
            "GC(6) Concurrent Mark (0.144s)",
            "GC(6) Concurrent Clear Claimed Marks",
            "GC(1) Concurrent Abortable Preclean",
            "GC(0) Y: Concurrent Mark",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, RP_Z_GENERATION_OPT, "Concurrent ", CGP_CONC_PHASE, RP_CONC_SECONDS_OPT, " ", CGP_DURATION, RP_EOL),
        EK::ConcurrentPhase, Single, End, "Concurrent ",
        &[
            "GC(6) Concurrent Cycle 25.000ms",
            "GC(6) Concurrent Mark (0.144s, 0.156s) 12.300ms",
            "GC(6) Concurrent Mark From Roots 10.000ms",
            "GC(0) Concurrent Process Non-Strong References 1.000ms",
            "GC(1) O: Concurrent Relocate 2.001ms",
        ],
        line!(),
    ),
    //
    // ── Shenandoah ──
    //
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Pause Init Mark", CGP_SH_QUALIFIER, " ", CGP_DURATION, RP_EOL),
        EK::ShenandoahInitMark, Single, End, "Pause Init Mark",
        &[
            "GC(0) Pause Init Mark (unload classes) 0.200ms",
            "Pause Init Mark 0.321ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Pause Final Mark", CGP_SH_QUALIFIER, " ", CGP_DURATION, RP_EOL),
        EK::ShenandoahFinalMark, Single, End, "Pause Final Mark",
        &[
            "GC(0) Pause Final Mark (unload classes) 0.500ms",
            "Pause Final Mark 0.500ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Pause Init Update Refs ", CGP_DURATION, RP_EOL),
        EK::ShenandoahInitUpdateRefs, Single, End, "Pause Init Update Refs",
        &[
            "GC(0) Pause Init Update Refs 0.020ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Pause Final Update Refs ", CGP_DURATION, RP_EOL),
        EK::ShenandoahFinalUpdateRefs, Single, End, "Pause Final Update Refs",
        &[
            "GC(0) Pause Final Update Refs 0.100ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Pause Final Evac ", CGP_DURATION, RP_EOL),
        EK::ShenandoahFinalEvac, Single, End, "Pause Final Evac",
        &[
            "GC(2) Pause Final Evac 0.010ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Pause Final Roots ", CGP_DURATION, RP_EOL),
        EK::ShenandoahFinalRoots, Single, End, "Pause Final Roots",
        &[
            "GC(2) Pause Final Roots 0.020ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Concurrent (?P<phase>[a-z][a-z ]*?)", CGP_SH_QUALIFIER, "(?: ", CGP_HEAP, ")? ", CGP_DURATION, RP_EOL),
        EK::ShenandoahConcurrent, Single, End, "Concurrent ",
        &[
            "GC(0) Concurrent reset 0.123ms",
            "GC(0) Concurrent marking (unload classes) 5M->6M(64M) 2.000ms",
            "GC(0) Concurrent update references 12M->12M(64M) 1.500ms",
            "Concurrent cleanup 15M->10M(64M) 0.050ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, r"Pause Degenerated GC \((?P<phase>[A-Za-z ]+)\)", RP_HEAP_DURATION, RP_EOL),
        EK::ShenandoahDegenerated, Single, End, "Pause Degenerated GC",
        &[
            "GC(1) Pause Degenerated GC (Mark) 60M->30M(64M) 10.000ms",
            "GC(4) Pause Degenerated GC (Outside of Cycle) 60M->30M(64M) 10.000ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Pause Full", RP_HEAP_DURATION, RP_EOL),
        EK::ShenandoahFull, Single, End, "Pause Full ",
        &[
            "GC(2) Pause Full 50M->20M(64M) 30.000ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, r"Trigger(?: \([A-Z]+\))?: (?P<phase>.+)", RP_EOL),
        EK::ShenandoahTrigger, Single, Start, "Trigger",
        &[
            "GC(0) Trigger: Learning 1 of 5. Free (45M) is below initial threshold (45M)",
            "Trigger: Free (6M) is below minimum threshold (6M)",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Cancelling GC: (?P<trigger>.+)", RP_EOL),
        EK::ShenandoahCancelling, Single, Start, "Cancelling GC: ",
        &[
            "GC(1) Cancelling GC: Allocation Failure",
            "Cancelling GC: Stopping VM",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, r"\s*(?P<phase>[A-Z][^=]*?)\s+=\s+(?P<total>", RP_DECIMAL, r") s \(a = +(?P<avg>\d+) us\) \(n = +(?P<count>\d+)\).*", RP_EOL),
        EK::ShenandoahStats, Single, Start, " s (a = ",
        &[
            "Pause Init Mark (G)            =     0.003 s (a =      244 us) (n =    12) (lvls, us =      141,      203,      244,      262,      553)",
            "  Accumulate Stats             =     0.000 s (a =        1 us) (n =    12) (lvls, us =        1,        1,        1,        1,        2)",
        ],
        line!(),
    ),
    //
    // ── Z ──
    //
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, RP_Z_GENERATION_OPT, r"Pause Mark Start(?: \((?P<qualifier>[A-Za-z ]+)\))? ", CGP_DURATION, RP_EOL),
        EK::ZPauseMarkStart, Single, End, "Pause Mark Start",
        &[
            "GC(0) Pause Mark Start 0.010ms",
            "GC(3) Y: Pause Mark Start (Major) 0.012ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, RP_Z_GENERATION_OPT, "Pause Mark End ", CGP_DURATION, RP_EOL),
        EK::ZPauseMarkEnd, Single, End, "Pause Mark End",
        &[
            "GC(0) Pause Mark End 0.020ms",
            "GC(3) O: Pause Mark End 0.022ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, RP_Z_GENERATION_OPT, "Pause Relocate Start ", CGP_DURATION, RP_EOL),
        EK::ZPauseRelocateStart, Single, End, "Pause Relocate Start",
        &[
            "GC(0) Pause Relocate Start 0.008ms",
            "GC(3) Y: Pause Relocate Start 0.009ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "(?P<phase>Garbage|Major|Minor) Collection ", CGP_TRIGGER_ANY, RP_EOL),
        EK::ZCollectionStart, Single, Start, " Collection (",
        &[
            "GC(0) Garbage Collection (Warmup)",
            "GC(3) Major Collection (Proactive)",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, "(?P<phase>Garbage|Major|Minor) Collection ", CGP_TRIGGER_ANY, " ", CGP_ZHEAP, "(?: ", CGP_DURATION, ")?", RP_EOL),
        EK::ZCollection, Single, End, " Collection (",
        &[
            "GC(0) Garbage Collection (Warmup) 42M(4%)->26M(3%)",
            "GC(3) Major Collection (Allocation Rate) 48M(5%)->30M(3%) 0.123s",
            "GC(4) Minor Collection (Allocation Stall) 148M(15%)->60M(6%) 0.050s",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, r"Allocation Stall \((?P<phase>[^()]+)\) ", CGP_DURATION, RP_EOL),
        EK::ZAllocationStall, Single, End, "Allocation Stall (",
        &[
            "Allocation Stall (main) 12.345ms",
            "GC(3) Allocation Stall (ForkJoinPool-1-worker-1) 0.512ms",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, r"\s*(?:Young |Old )?(?:Collector|Contention|Critical|Memory|Phase|Subphase|System|Pause): (?P<phase>.+?)\s{2,}\S.*", RP_EOL),
        EK::ZStats, Single, Start, ": ",
        &[
            "  Collector: Garbage Collection Cycle                    251.305 / 251.305   251.305 / 251.305   251.305 / 251.305   251.305 / 251.305   ms",
            "  Memory: Allocation Rate                                  0 / 0               0 / 0               0 / 0               0 / 0         MB/s",
            "  Old Pause: Pause Mark End                               0.019 / 0.019       0.019 / 0.019       0.019 / 0.019       0.019 / 0.019       ms",
        ],
        line!(),
    ),
    //
    // ── safepoints ──
    //
    EPD!(
        concatcp!(RP_BOL, r"Entering safepoint region: (?P<trigger>\S+) Leaving safepoint region ", RP_SAFEPOINT_TOTAL, RP_EOL),
        EK::SafepointSession, Merged, Start, "Entering safepoint region: ",
        &[
            "Entering safepoint region: CollectForMetadataAllocation Leaving safepoint region Total time for which application threads were stopped: 0.0004546 seconds, Stopping threads took: 0.0002048 seconds",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, RP_SAFEPOINT_TOTAL, RP_EOL),
        EK::SafepointStopped, Single, End, "Total time for which application threads were stopped: ",
        &[
            "Total time for which application threads were stopped: 0.0012700 seconds, Stopping threads took: 0.0000212 seconds",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, r#"Safepoint "(?P<trigger>[A-Za-z0-9_]+)", Time since last: \d+ ns, Reaching safepoint: (?P<reaching>\d+) ns,(?: Cleanup: \d+ ns,)? At safepoint: \d+ ns, Total: (?P<total>\d+) ns"#, RP_EOL),
        EK::Safepoint, Single, End, "Safepoint \"",
        &[
            r#"Safepoint "G1CollectForAllocation", Time since last: 1234567 ns, Reaching safepoint: 12345 ns, At safepoint: 123456 ns, Total: 135801 ns"#,
            r#"Safepoint "ICBufferFull", Time since last: 1000 ns, Reaching safepoint: 500 ns, Cleanup: 100 ns, At safepoint: 200 ns, Total: 800 ns"#,
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, "Application time: (?P<app_time>", RP_DECIMAL, ") seconds", RP_EOL),
        EK::ApplicationTime, Single, End, "Application time: ",
        &[
            "Application time: 0.9990000 seconds",
        ],
        line!(),
    ),
    //
    // ── heap dumps and other conditions ──
    //
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"Heap (?P<phase>before|after) GC invocations=\d+ \(full \d+\):", RP_HEAP_DUMP_BODY, RP_EOL),
        EK::HeapAtGc, Merged, Start, " GC invocations=",
        &[
            "GC(0) Heap before GC invocations=0 (full 0): def new generation total 4928K, used 4416K [0x00000000fec00000, 0x00000000ff150000, 0x00000000ff6a0000) eden space 4416K, 100% used [0x00000000fec00000, 0x00000000ff050000, 0x00000000ff050000) tenured generation total 10944K, used 0K [0x00000000ff6a0000, 0x0000000100150000, 0x0000000100200000) Metaspace used 1119K, committed 1216K, reserved 1056768K class space used 108K, committed 128K, reserved 1048576K",
            "GC(1) Heap after GC invocations=2 (full 1): Shenandoah Heap 524288K max, 524288K soft max, 524288K committed, 12345K used",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, "Heap ", RP_HEAP_DUMP_BODY, RP_EOL),
        EK::FooterHeap, Merged, Start, "Heap ",
        &[
            "Heap garbage-first heap total 262144K, used 20480K [0x00000000f0000000, 0x0000000100000000) region size 1024K, 5 young (5120K), 1 survivors (1024K) Metaspace used 2000K, committed 2200K, reserved 1056768K class space used 200K, committed 256K, reserved 1048576K",
            "Heap ZHeap used 20M, capacity 64M, max capacity 512M Metaspace used 4000K, committed 4200K, reserved 1056768K",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID_OPT, "Metaspace: ", CGP_METASPACE, RP_EOL),
        EK::MetaspaceTransition, Single, End, "Metaspace: ",
        &[
            "GC(0) Metaspace: 2000K(2176K)->2010K(2176K) NonClass: 1800K(1900K)->1810K(1900K) Class: 200K(276K)->200K(276K)",
            "GC(4) Metaspace: 5M used, 5M committed, 1032M reserved",
            "GC(5) Metaspace: 2900K->2900K(1056768K)",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, CGP_GC_ID, r"(?:Desired survivor size \d+ bytes, new threshold \d+ \(max threshold \d+\)|Age table with threshold \d+ \(max threshold \d+\)|- age +\d+: +\d+ bytes, +\d+ total)", RP_EOL),
        EK::TenuringDistribution, Single, Start, "",
        &[
            "GC(0) Desired survivor size 1048576 bytes, new threshold 7 (max threshold 15)",
            "GC(0) Age table with threshold 7 (max threshold 15)",
            "GC(0) - age   1:     123456 bytes,     123456 total",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, r"(?P<phase>.+?): Retried waiting for GCLocker too often allocating \d+ words", RP_EOL),
        EK::GcLockerRetry, Single, Start, "GCLocker",
        &[
            "main: Retried waiting for GCLocker too often allocating 256 words",
        ],
        line!(),
    ),
    //
    // ── header and informational lines ──
    //
    EPD!(
        concatcp!(RP_BOL, "Using (?P<collector>Serial|Parallel|Concurrent Mark Sweep|G1|Shenandoah|The Z Garbage Collector|ZGC)", RP_EOL),
        EK::UsingCollector, Single, Start, "Using ",
        &[
            "Using G1",
            "Using The Z Garbage Collector",
            "Using Concurrent Mark Sweep",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, r"Version: (?P<version>(?P<major>\d+)(?:[.+\-][0-9A-Za-z.+\-]*)?)(?: \([a-z]+\))?", RP_EOL),
        EK::HeaderVersion, Single, Start, "Version: ",
        &[
            "Version: 17.0.2+8-86 (release)",
            "Version: 21+35-2513",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, r"CPUs: (?P<cpus_total>\d+) total, (?P<cpus_available>\d+) available", RP_EOL),
        EK::HeaderCpus, Single, Start, "CPUs: ",
        &[
            "CPUs: 8 total, 8 available",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, "Memory: (?P<memory>", RP_MEM, ")", RP_EOL),
        EK::HeaderMemory, Single, Start, "Memory: ",
        &[
            "Memory: 15884M",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, "(?:Heap )?(?P<which>Min|Initial|Max|Soft Max) Capacity: (?P<capacity>", RP_MEM, ")", RP_EOL),
        EK::HeaderHeapCapacity, Single, Start, " Capacity: ",
        &[
            "Heap Min Capacity: 8M",
            "Heap Initial Capacity: 256M",
            "Max Capacity: 4096M",
            "Soft Max Capacity: 4096M",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, r"Heap address: (?P<address>0x[0-9a-fA-F]+), size: (?P<size_mb>\d+) MB, Compressed Oops mode: (?P<oops_mode>[^,]+)(?:, Oop shift amount: \d+)?", RP_EOL),
        EK::HeaderHeapAddress, Single, Start, "Heap address: ",
        &[
            "Heap address: 0x0000000700000000, size: 4096 MB, Compressed Oops mode: Zero based, Oop shift amount: 3",
        ],
        line!(),
    ),
    EPD!(
        concatcp!(RP_BOL, "(?P<phase>(?:", RP_GC_INFO_NAMES, "): .+|", RP_GC_INFO_BARE, ")", RP_EOL),
        EK::GcInfo, Single, Start, "",
        &[
            "Heap Region Size: 1M",
            "Compressed Oops: Enabled (Zero based)",
            "Initializing The Z Garbage Collector",
            "CDS archive(s) mapped at: [0x0000000800000000-0x0000000800bc0000-0x0000000800bc0000), size 12320768, SharedBaseAddress: 0x0000000800000000, ArchiveRelocationMode: 0.",
            "Heuristics ergonomically sets -XX:+ExplicitGCInvokesConcurrent",
        ],
        line!(),
    ),
];

lazy_static! {
    /// Run-time compiled [`Regex`] of each [`EVENT_PARSE_DATAS`] entry,
    /// same order.
    ///
    /// [`Regex`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html
    pub(crate) static ref EVENT_PARSE_DATAS_REGEX_VEC: Vec<Regex> = {
        defñ!("init EVENT_PARSE_DATAS_REGEX_VEC");
        EVENT_PARSE_DATAS
            .iter()
            .map(|epd| match Regex::new(epd.regex_pattern) {
                Ok(regex) => regex,
                Err(err) => panic!(
                    "EVENT_PARSE_DATAS entry {:?} declared at line {} failed to compile: {}",
                    epd.kind, epd._line_num, err,
                ),
            })
            .collect()
    };

    /// `memmem` pre-filter of each [`EVENT_PARSE_DATAS`] entry `hint`,
    /// same order.
    pub(crate) static ref EVENT_PARSE_DATAS_FINDER_VEC: Vec<memmem::Finder<'static>> = {
        EVENT_PARSE_DATAS
            .iter()
            .map(|epd| memmem::Finder::new(epd.hint))
            .collect()
    };
}

/// Index into [`EVENT_PARSE_DATAS`] of the entry for `kind`.
pub fn event_parse_data_index(kind: EventKind) -> Option<usize> {
    EVENT_PARSE_DATAS
        .iter()
        .position(|epd| epd.kind == kind)
}
