// src/tests/extractor_tests.rs

//! tests for `src/readers/extractor.rs`

#![allow(non_snake_case)]

use crate::common::JdkVersion;
use crate::data::decorator::Decorator;
use crate::data::eventkind::{EventKind, LineShape};
use crate::data::eventrecord::{
    EventRecord,
    HeaderInfo,
    HeapCapacityKind,
    MemorySnapshot,
    MemoryTransition,
};
use crate::data::logicalline::LogicalLine;
use crate::data::patterns::{CGN_HEAP_BEFORE, CGN_STOPPED};
use crate::data::trigger::{CollectorFamily, Trigger};
use crate::readers::classifier::classify_payload;
use crate::readers::extractor::{extract, ExtractContext, ExtractError};

use ::test_case::test_case;

/// classify and extract `payload` as a logical line of `shape`
fn extract_payload(
    payload: &str,
    shape: LineShape,
    jdk_version: Option<JdkVersion>,
) -> (EventRecord, Vec<ExtractError>) {
    let classification = match classify_payload(payload, shape, true) {
        Ok(Some(classification)) => classification,
        Ok(None) => panic!("not classified {:?}", payload),
        Err(err) => panic!("{} for {:?}", err, payload),
    };
    let logical = LogicalLine {
        payload: payload.to_string(),
        decorator: Decorator::default(),
        raw_lines: vec![payload.to_string()],
        line_number: 7,
        shape,
    };
    let context = ExtractContext { jdk_version };

    extract(&classification, &logical, &context)
}

fn extract_single(payload: &str) -> EventRecord {
    let (record, errors) = extract_payload(payload, LineShape::Single, Some(17));
    assert!(errors.is_empty(), "{:?}", errors);

    record
}

#[test]
fn test_extract_G1Young() {
    let record = extract_single("GC(1012) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms");
    assert_eq!(record.kind, EventKind::G1Young);
    assert_eq!(record.gc_id, Some(1012));
    assert_eq!(record.trigger, Some(Trigger::G1EvacuationPause));
    assert_eq!(
        record.heap,
        Some(MemoryTransition {
            before: 38 * 1024,
            after: 19 * 1024,
            capacity: Some(46 * 1024),
        })
    );
    assert_eq!(record.duration_us, 1815);
    assert_eq!(record.line_number, 7);
    assert_eq!(record.raw_line_count, 1);
    // left for the processor
    assert_eq!(record.timestamp_ms, None);
    assert_eq!(record.collector_family, CollectorFamily::Unknown);
    assert_eq!(record.young, None);
    assert_eq!(record.thread_times, None);
    assert_eq!(record.info, None);
}

#[test]
fn test_extract_DefNew_merged() {
    let payload = "GC(0) Pause Young (Allocation Failure) DefNew: 4416K->512K(4928K) Tenured: 0K->2278K(10944K) \
                   Metaspace: 1119K->1119K(1056768K) 4M->2M(15M) 4.321ms User=0.00s Sys=0.00s Real=0.01s";
    let (record, errors) = extract_payload(payload, LineShape::Merged, Some(11));
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(record.kind, EventKind::DefNew);
    assert_eq!(record.trigger, Some(Trigger::AllocationFailure));
    assert_eq!(
        record.young,
        Some(MemoryTransition {
            before: 4416,
            after: 512,
            capacity: Some(4928),
        })
    );
    assert_eq!(
        record.old,
        Some(MemoryTransition {
            before: 0,
            after: 2278,
            capacity: Some(10944),
        })
    );
    assert_eq!(
        record.metaspace,
        Some(MemoryTransition {
            before: 1119,
            after: 1119,
            capacity: None,
        })
    );
    assert_eq!(record.metaspace_reserved, Some(1056768));
    let times = record.thread_times.unwrap();
    assert_eq!((times.user_cs, times.sys_cs, times.real_cs), (0, 0, 1));
    assert_eq!(record.duration_us, 4321);
}

/// before JDK 16 the parenthesized figure is reserved metaspace
#[test_case(Some(11), None, Some(1056768))]
#[test_case(Some(15), None, Some(1056768))]
#[test_case(None, None, Some(1056768); "version unknown")]
#[test_case(Some(16), Some(1056768), None)]
#[test_case(Some(17), Some(1056768), None)]
fn test_extract_metaspace_legacy(
    jdk_version: Option<JdkVersion>,
    capacity_expect: Option<u64>,
    reserved_expect: Option<u64>,
) {
    let (record, errors) = extract_payload("GC(5) Metaspace: 2900K->2900K(1056768K)", LineShape::Single, jdk_version);
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(record.kind, EventKind::MetaspaceTransition);
    let metaspace = record.metaspace.unwrap();
    assert_eq!(metaspace.before, 2900);
    assert_eq!(metaspace.after, 2900);
    assert_eq!(metaspace.capacity, capacity_expect);
    assert_eq!(record.metaspace_reserved, reserved_expect);
}

/// the compact form always prints committed metaspace
#[test_case(Some(11))]
#[test_case(None)]
#[test_case(Some(17))]
fn test_extract_metaspace_committed(jdk_version: Option<JdkVersion>) {
    let payload = "GC(0) Metaspace: 2000K(2176K)->2010K(2176K) NonClass: 1800K(1900K)->1810K(1900K) Class: 200K(276K)->200K(276K)";
    let (record, errors) = extract_payload(payload, LineShape::Single, jdk_version);
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(
        record.metaspace,
        Some(MemoryTransition {
            before: 2000,
            after: 2010,
            capacity: Some(2176),
        })
    );
    assert_eq!(
        record.class_space,
        Some(MemoryTransition {
            before: 200,
            after: 200,
            capacity: Some(276),
        })
    );
    assert_eq!(record.metaspace_reserved, None);
}

#[test]
fn test_extract_metaspace_usage() {
    let record = extract_single("GC(4) Metaspace: 5M used, 5M committed, 1032M reserved");
    assert_eq!(record.metaspace, None);
    assert_eq!(
        record.metaspace_snapshot,
        Some(MemorySnapshot {
            used: 5 * 1024,
            capacity: 5 * 1024,
        })
    );
    assert_eq!(record.metaspace_reserved, Some(1032 * 1024));
}

/// stopped and stopping are rounded to microseconds each, then summed
#[test]
fn test_extract_SafepointStopped() {
    let record = extract_single(
        "Total time for which application threads were stopped: 0.0012700 seconds, Stopping threads took: 0.0000212 seconds",
    );
    assert_eq!(record.kind, EventKind::SafepointStopped);
    assert_eq!(record.time_to_stop_us, Some(21));
    assert_eq!(record.duration_us, 1270 + 21);
    assert_eq!(record.gc_id, None);
}

/// the sum of stopped and stopping overflows; the failure stays on the field
#[test]
fn test_extract_SafepointStopped_sum_overflow() {
    let (record, errors) = extract_payload(
        "Total time for which application threads were stopped: 18446744073709.551615 seconds, Stopping threads took: 0.0000010 seconds",
        LineShape::Single,
        Some(11),
    );
    assert_eq!(record.kind, EventKind::SafepointStopped);
    assert_eq!(record.duration_us, 0);
    assert_eq!(record.time_to_stop_us, Some(1));
    assert_eq!(
        errors,
        vec![ExtractError::MalformedNumber {
            field: CGN_STOPPED,
            text: String::from("18446744073709.551615"),
        }]
    );
}

#[test]
fn test_extract_SafepointSession() {
    let (record, errors) = extract_payload(
        "Entering safepoint region: CollectForMetadataAllocation Leaving safepoint region \
         Total time for which application threads were stopped: 0.0004546 seconds, Stopping threads took: 0.0002048 seconds",
        LineShape::Merged,
        Some(11),
    );
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(record.trigger, Some(Trigger::CollectForMetadataAllocation));
    assert_eq!(record.time_to_stop_us, Some(205));
    assert_eq!(record.duration_us, 455 + 205);
}

#[test]
fn test_extract_Safepoint_nanos() {
    let record = extract_single(
        r#"Safepoint "G1CollectForAllocation", Time since last: 1234567 ns, Reaching safepoint: 12345 ns, At safepoint: 123456 ns, Total: 135801 ns"#,
    );
    assert_eq!(record.kind, EventKind::Safepoint);
    assert_eq!(record.trigger, Some(Trigger::G1CollectForAllocation));
    assert_eq!(record.time_to_stop_us, Some(12));
    assert_eq!(record.duration_us, 136);
}

#[test]
fn test_extract_ApplicationTime() {
    let record = extract_single("Application time: 0.9990000 seconds");
    assert_eq!(record.duration_us, 999_000);
}

#[test]
fn test_extract_header_version() {
    let record = extract_single("Version: 17.0.2+8-86 (release)");
    assert_eq!(
        record.info,
        Some(HeaderInfo::Version {
            text: String::from("17.0.2+8-86"),
            major: 17,
        })
    );
    assert_eq!(record.phase, None);
}

#[test_case("Using Concurrent Mark Sweep", HeaderInfo::Collector(CollectorFamily::Cms))]
#[test_case("CPUs: 8 total, 4 available", HeaderInfo::Cpus { total: 8, available: 4 })]
#[test_case("Memory: 15884M", HeaderInfo::Memory(15884 * 1024))]
#[test_case("Heap Initial Capacity: 256M", HeaderInfo::HeapCapacity { which: HeapCapacityKind::Initial, capacity: 256 * 1024 })]
#[test_case("Soft Max Capacity: 4096M", HeaderInfo::HeapCapacity { which: HeapCapacityKind::SoftMax, capacity: 4096 * 1024 })]
#[test_case("Heap Region Size: 1M", HeaderInfo::Text(String::from("Heap Region Size: 1M")))]
fn test_extract_header_info(
    payload: &str,
    expect: HeaderInfo,
) {
    let record = extract_single(payload);
    assert_eq!(record.info, Some(expect));
}

#[test]
fn test_extract_header_heap_address() {
    let record = extract_single(
        "Heap address: 0x0000000700000000, size: 4096 MB, Compressed Oops mode: Zero based, Oop shift amount: 3",
    );
    assert_eq!(
        record.info,
        Some(HeaderInfo::HeapAddress {
            address: String::from("0x0000000700000000"),
            size: 4096 * 1024,
            compressed_oops_mode: String::from("Zero based"),
        })
    );
}

#[test]
fn test_extract_phase_from_qualifier() {
    let record = extract_single("GC(0) Pause Init Mark (unload classes) 0.200ms");
    assert_eq!(record.kind, EventKind::ShenandoahInitMark);
    assert_eq!(record.phase.as_deref(), Some("unload classes"));
    assert_eq!(record.duration_us, 200);
}

#[test]
fn test_extract_ShenandoahTrigger_phase() {
    let record = extract_single("GC(0) Trigger: Learning 1 of 5. Free (45M) is below initial threshold (45M)");
    assert_eq!(record.kind, EventKind::ShenandoahTrigger);
    assert_eq!(
        record.phase.as_deref(),
        Some("Learning 1 of 5. Free (45M) is below initial threshold (45M)")
    );
    assert_eq!(record.duration_us, 0);
}

#[test]
fn test_extract_ZCollection() {
    let record = extract_single("GC(3) Major Collection (Allocation Rate) 48M(5%)->30M(3%) 0.123s");
    assert_eq!(record.kind, EventKind::ZCollection);
    assert_eq!(record.phase.as_deref(), Some("Major"));
    assert_eq!(record.trigger, Some(Trigger::AllocationRate));
    assert_eq!(record.duration_us, 123_000);
}

#[test]
fn test_extract_FooterHeap_z() {
    let record = extract_single(
        "Heap ZHeap used 20M, capacity 64M, max capacity 512M Metaspace used 4000K, committed 4200K, reserved 1056768K",
    );
    assert_eq!(record.kind, EventKind::FooterHeap);
    assert_eq!(
        record.heap_snapshot,
        Some(MemorySnapshot {
            used: 20 * 1024,
            capacity: 64 * 1024,
        })
    );
    assert_eq!(
        record.metaspace_snapshot,
        Some(MemorySnapshot {
            used: 4000,
            capacity: 4200,
        })
    );
    assert_eq!(record.metaspace_reserved, Some(1056768));
}

#[test]
fn test_extract_unknown_trigger() {
    let (record, errors) = extract_payload("GC(1) Cancelling GC: Foo bar", LineShape::Single, None);
    assert_eq!(record.kind, EventKind::ShenandoahCancelling);
    assert_eq!(record.trigger, None);
    assert_eq!(record.gc_id, Some(1));
    assert_eq!(errors, vec![ExtractError::UnknownTrigger(String::from("Foo bar"))]);
}

/// a field that does not convert is left empty, the record is kept
#[test]
fn test_extract_overflow() {
    let (record, errors) = extract_payload(
        "GC(5) Pause Young (Normal) (G1 Evacuation Pause) 99999999999999999999999999999999M->19M(46M) 1.815ms",
        LineShape::Single,
        None,
    );
    assert_eq!(record.kind, EventKind::G1Young);
    assert_eq!(record.heap, None);
    assert_eq!(record.duration_us, 1815);
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ExtractError::MalformedNumber { field, .. } => assert_eq!(*field, CGN_HEAP_BEFORE),
        err => panic!("unexpected {:?}", err),
    }
}

#[test]
fn test_ExtractError_display() {
    let err = ExtractError::UnknownUnit {
        field: "duration",
        text: String::from("min"),
    };
    assert_eq!(err.to_string(), "field duration: unknown unit \"min\"");
    assert_eq!(ExtractError::MissingField("stopped").to_string(), "missing field stopped");
}
