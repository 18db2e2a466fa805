// src/tests/common.rs

//! Sample logs and values shared by tests.

#![allow(dead_code)]

use crate::data::decorator::{DateTime, DateTimeL, FixedOffset, TimeZone};
use crate::data::eventkind::{EventKind, LineShape, TimestampAnchor};
use crate::data::patterns::{EventParseInstr, EPD};
use crate::readers::classifier::Catalog;

use ::lazy_static::lazy_static;
use ::memchr::memmem;
use ::regex::Regex;

lazy_static! {
    pub static ref FO_0: FixedOffset = FixedOffset::east_opt(0).unwrap();
    pub static ref FO_M7: FixedOffset = FixedOffset::west_opt(7 * 3600).unwrap();
    /// JVM start of [`LOG_SAFEPOINT_JDK11`]
    pub static ref JVM_START_SAFEPOINT: DateTimeL =
        DateTime::parse_from_rfc3339("2023-04-01T09:15:01.123+00:00").unwrap();
    /// 2023-04-01T09:15:00.000+00:00
    pub static ref JVM_START_0900: DateTimeL = FO_0
        .with_ymd_and_hms(2023, 4, 1, 9, 15, 0)
        .unwrap();
}

/// A catalog whose two grammars both match a `Pause Remark` summary.
pub static CATALOG_OVERLAPPING_DATAS: [EventParseInstr; 2] = [
    EPD!(
        r"^GC\((?P<gc_id>\d+)\) Pause Remark (?P<heap_before>\d+[BKMG])->.*$",
        EventKind::UnifiedRemark,
        LineShape::Single,
        TimestampAnchor::End,
        "Pause Remark",
        &["GC(16) Pause Remark 125M->125M(256M) 2.345ms"],
        line!(),
    ),
    EPD!(
        r"^GC\((?P<gc_id>\d+)\) Pause [A-Z][a-z]+ .*$",
        EventKind::G1Young,
        LineShape::Single,
        TimestampAnchor::End,
        "Pause ",
        &["GC(16) Pause Young 125M->125M(256M) 2.345ms"],
        line!(),
    ),
];

lazy_static! {
    static ref CATALOG_OVERLAPPING_REGEX_VEC: Vec<Regex> = CATALOG_OVERLAPPING_DATAS
        .iter()
        .map(|epd| Regex::new(epd.regex_pattern).unwrap())
        .collect();
    static ref CATALOG_OVERLAPPING_FINDER_VEC: Vec<memmem::Finder<'static>> = CATALOG_OVERLAPPING_DATAS
        .iter()
        .map(|epd| memmem::Finder::new(epd.hint))
        .collect();
}

/// [`CATALOG_OVERLAPPING_DATAS`] ready for classification.
pub fn catalog_overlapping() -> Catalog<'static> {
    Catalog {
        entries: &CATALOG_OVERLAPPING_DATAS,
        regexes: CATALOG_OVERLAPPING_REGEX_VEC.as_slice(),
        finders: CATALOG_OVERLAPPING_FINDER_VEC.as_slice(),
    }
}

/// G1 with `-Xlog:gc`, one line per event.
pub const LOG_G1_BASIC: &str = "\
[0.004s][info][gc] Using G1
[0.005s][info][gc,init] Version: 17.0.2+8-86 (release)
[18.406s][info][gc] GC(5) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms
[20.001s][info][gc] GC(6) Concurrent Cycle
[20.100s][info][gc] GC(6) Pause Remark 40M->40M(46M) 2.345ms
[20.150s][info][gc] GC(6) Pause Cleanup 40M->40M(46M) 0.123ms
[20.300s][info][gc] GC(6) Concurrent Cycle 299.000ms
[21.000s][info][gc] Something unexpected happened
";
pub const LOG_G1_BASIC_RAW_LINES: u64 = 8;
pub const LOG_G1_BASIC_RECORDS: usize = 7;

/// Serial with `-Xlog:gc*`, a detailed pause spread over several lines
/// and the exit heap footer.
pub const LOG_SERIAL_DETAILED: &str = "\
[0.010s][info][gc] Using Serial
[0.011s][info][gc,init] Version: 17.0.2+8-86 (release)
[0.100s][info][gc,start    ] GC(0) Pause Young (Allocation Failure)
[0.101s][info][gc,task     ] GC(0) Using 1 workers of 1 for evacuation
[0.104s][info][gc,phases   ] GC(0)   Pre Evacuate Collection Set: 0.0ms
[0.104s][info][gc,heap     ] GC(0) DefNew: 4416K->512K(4928K)
[0.104s][info][gc,heap     ] GC(0) Tenured: 0K->2278K(10944K)
[0.104s][info][gc,metaspace] GC(0) Metaspace: 1119K(1216K)->1119K(1216K) NonClass: 1010K(1088K)->1010K(1088K) Class: 108K(128K)->108K(128K)
[0.104s][info][gc          ] GC(0) Pause Young (Allocation Failure) 4M->2M(15M) 4.321ms
[0.104s][info][gc,cpu      ] GC(0) User=0.00s Sys=0.00s Real=0.01s
[0.200s][info][gc,start    ] GC(1) Pause Full (Allocation Failure)
[0.212s][info][gc          ] GC(1) Pause Full (Allocation Failure) 14M->8M(15M) 12.000ms
[1.000s][info][gc,heap,exit] Heap
[1.000s][info][gc,heap,exit]  def new generation   total 4928K, used 1000K [0x00000000fec00000, 0x00000000ff150000, 0x00000000ff6a0000)
[1.000s][info][gc,heap,exit]   eden space 4416K,  20% used [0x00000000fec00000, 0x00000000ff050000, 0x00000000ff050000)
[1.000s][info][gc,heap,exit]  Metaspace       used 1119K, committed 1216K, reserved 1056768K
";
pub const LOG_SERIAL_DETAILED_RAW_LINES: u64 = 16;
pub const LOG_SERIAL_DETAILED_CHATTER: u64 = 2;

/// JDK 11 safepoint logging with datestamp and uptime decorators.
pub const LOG_SAFEPOINT_JDK11: &str = "\
[2023-04-01T09:15:02.123+0000][1.000s][info][safepoint] Application time: 0.9990000 seconds
[2023-04-01T09:15:02.124+0000][1.001s][info][safepoint] Entering safepoint region: CollectForMetadataAllocation
[2023-04-01T09:15:02.125+0000][1.002s][info][safepoint] Leaving safepoint region
[2023-04-01T09:15:02.125+0000][1.002s][info][safepoint] Total time for which application threads were stopped: 0.0004546 seconds, Stopping threads took: 0.0002048 seconds
";

/// Shenandoah, start lines are chatter.
pub const LOG_SHENANDOAH: &str = "\
[0.005s][info][gc] Using Shenandoah
[1.000s][info][gc] Trigger: Learning 1 of 5. Free (45M) is below initial threshold (45M)
[1.001s][info][gc,start] GC(0) Pause Init Mark (unload classes)
[1.002s][info][gc] GC(0) Pause Init Mark (unload classes) 0.200ms
[1.003s][info][gc,start] GC(0) Concurrent marking (unload classes)
[1.005s][info][gc] GC(0) Concurrent marking (unload classes) 5M->6M(64M) 2.000ms
";

/// Z without a `Using` header.
pub const LOG_Z: &str = "\
[0.010s][info][gc,init] Initializing The Z Garbage Collector
[0.011s][info][gc,init] Version: 17.0.2+8-86 (release)
[1.000s][info][gc,start] GC(0) Garbage Collection (Warmup)
[1.000s][info][gc,phases] GC(0) Pause Mark Start 0.010ms
[1.010s][info][gc,phases] GC(0) Concurrent Mark 9.500ms
[1.011s][info][gc,phases] GC(0) Pause Mark End 0.020ms
[1.020s][info][gc,phases] GC(0) Pause Relocate Start 0.008ms
[1.030s][info][gc] GC(0) Garbage Collection (Warmup) 42M(4%)->26M(3%)
";

/// Datestamp-only decorators, JVM start must be supplied.
pub const LOG_DATESTAMP_ONLY: &str = "\
[2023-04-01T09:15:02.123+0000][info][gc] GC(2) Pause Remark 20M->20M(64M) 1.000ms
";

/// Lines of `log` as owned `String`s.
pub fn lines_of(log: &str) -> Vec<String> {
    log.lines().map(String::from).collect()
}
