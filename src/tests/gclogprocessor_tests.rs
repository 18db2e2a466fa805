// src/tests/gclogprocessor_tests.rs

//! tests for `src/readers/gclogprocessor.rs`

#![allow(non_snake_case)]

use crate::common::Millis;
use crate::data::eventkind::EventKind;
use crate::data::eventrecord::{EventRecord, HeaderInfo, MemorySnapshot, MemoryTransition};
use crate::data::trigger::{CollectorFamily, Trigger};
use crate::readers::gclogprocessor::{
    GcLogProcessor,
    GcLogProcessorConfig,
    IgnoreNotifications,
    Notification,
    NotificationKind,
    RunError,
};
use crate::readers::preprocessor::IncompleteReason;
use crate::tests::common::{
    catalog_overlapping,
    lines_of,
    JVM_START_0900,
    JVM_START_SAFEPOINT,
    LOG_DATESTAMP_ONLY,
    LOG_G1_BASIC,
    LOG_G1_BASIC_RAW_LINES,
    LOG_G1_BASIC_RECORDS,
    LOG_SAFEPOINT_JDK11,
    LOG_SERIAL_DETAILED,
    LOG_SERIAL_DETAILED_CHATTER,
    LOG_SERIAL_DETAILED_RAW_LINES,
    LOG_SHENANDOAH,
    LOG_Z,
};

use ::kinded::Kinded;
use ::si_trace_print::stack::stack_offset_set;
use ::test_case::test_case;

/// process `log` with `config`, verifying the catalog
fn process(
    log: &str,
    config: GcLogProcessorConfig,
) -> (GcLogProcessor, Vec<EventRecord>, Vec<Notification>) {
    let mut processor = GcLogProcessor::new(GcLogProcessorConfig {
        verify_catalog: true,
        ..config
    });
    let mut notifications: Vec<Notification> = Vec::new();
    let records = match processor.process_lines(log.lines(), &mut notifications) {
        Ok(records) => records,
        Err(err) => panic!("process_lines failed: {}", err),
    };
    for record in records.iter() {
        eprintln!("{:?}", record);
    }
    for notification in notifications.iter() {
        eprintln!("{}", notification);
    }

    (processor, records, notifications)
}

fn kinds_of(records: &[EventRecord]) -> Vec<EventKind> {
    records.iter().map(|r| r.kind).collect()
}

fn timestamps_of(records: &[EventRecord]) -> Vec<Option<Millis>> {
    records.iter().map(|r| r.timestamp_ms).collect()
}

#[test]
fn test_GcLogProcessor_G1_basic() {
    stack_offset_set(Some(2));
    let (processor, records, notifications) = process(LOG_G1_BASIC, GcLogProcessorConfig::default());
    assert_eq!(records.len(), LOG_G1_BASIC_RECORDS);
    assert_eq!(
        kinds_of(&records),
        vec![
            EventKind::UsingCollector,
            EventKind::HeaderVersion,
            EventKind::G1Young,
            EventKind::ConcurrentPhaseStart,
            EventKind::UnifiedRemark,
            EventKind::G1Cleanup,
            EventKind::ConcurrentPhase,
        ]
    );
    assert_eq!(
        timestamps_of(&records),
        vec![Some(4), Some(5), Some(18404), Some(20001), Some(20098), Some(20150), Some(20001)]
    );
    for record in records.iter() {
        assert_eq!(record.collector_family, CollectorFamily::G1, "{:?}", record);
    }
    let young = &records[2];
    assert_eq!(young.gc_id, Some(5));
    assert_eq!(young.trigger, Some(Trigger::G1EvacuationPause));
    assert_eq!(young.duration_us, 1815);
    assert_eq!(young.end_timestamp_ms(), Some(18406));
    assert_eq!(records[6].phase.as_deref(), Some("Cycle"));

    assert_eq!(
        notifications,
        vec![Notification::Unrecognized {
            line_number: 8,
            raw_lines: vec![String::from("[21.000s][info][gc] Something unexpected happened")],
        }]
    );

    assert_eq!(processor.jdk_version(), Some(17));
    assert_eq!(processor.collector_family(), CollectorFamily::G1);
    assert_eq!(processor.count_raw_lines(), LOG_G1_BASIC_RAW_LINES);
    // no datestamps
    assert_eq!(processor.jvm_start(), None);
}

#[test]
fn test_GcLogProcessor_serial_detailed() {
    let (processor, records, notifications) = process(LOG_SERIAL_DETAILED, GcLogProcessorConfig::default());
    assert!(notifications.is_empty(), "{:?}", notifications);
    assert_eq!(
        kinds_of(&records),
        vec![
            EventKind::UsingCollector,
            EventKind::HeaderVersion,
            EventKind::DefNew,
            EventKind::UnifiedFullDetailed,
            EventKind::FooterHeap,
        ]
    );
    for record in records.iter() {
        assert_eq!(record.collector_family, CollectorFamily::Serial, "{:?}", record);
    }

    let young = &records[2];
    assert_eq!(young.timestamp_ms, Some(100));
    assert_eq!(young.gc_id, Some(0));
    assert_eq!(young.duration_us, 4321);
    assert_eq!(young.line_number, 3);
    assert_eq!(young.raw_line_count, 6);
    assert_eq!(young.trigger, Some(Trigger::AllocationFailure));
    assert_eq!(
        young.young,
        Some(MemoryTransition { before: 4416, after: 512, capacity: Some(4928) })
    );
    assert_eq!(
        young.old,
        Some(MemoryTransition { before: 0, after: 2278, capacity: Some(10944) })
    );
    assert_eq!(
        young.heap,
        Some(MemoryTransition { before: 4096, after: 2048, capacity: Some(15360) })
    );
    assert_eq!(
        young.metaspace,
        Some(MemoryTransition { before: 1119, after: 1119, capacity: Some(1216) })
    );
    assert_eq!(
        young.class_space,
        Some(MemoryTransition { before: 108, after: 108, capacity: Some(128) })
    );
    let times = young.thread_times.unwrap();
    assert_eq!((times.user_cs, times.sys_cs, times.real_cs), (0, 0, 1));
    assert_eq!(young.parallelism(), Some(0.0));

    let full = &records[3];
    assert_eq!(full.timestamp_ms, Some(200));
    assert_eq!(full.gc_id, Some(1));
    assert_eq!(full.duration_us, 12000);
    assert_eq!(full.raw_line_count, 2);
    assert_eq!(full.thread_times, None);

    let footer = &records[4];
    assert_eq!(footer.timestamp_ms, Some(1000));
    assert_eq!(footer.raw_line_count, 4);
    assert_eq!(footer.heap_snapshot, Some(MemorySnapshot { used: 1000, capacity: 4928 }));
    assert_eq!(footer.metaspace_snapshot, Some(MemorySnapshot { used: 1119, capacity: 1216 }));
    assert_eq!(footer.metaspace_reserved, Some(1056768));

    let summary = processor.summary();
    assert_eq!(summary.count_raw_lines, LOG_SERIAL_DETAILED_RAW_LINES);
    assert_eq!(summary.count_chatter, LOG_SERIAL_DETAILED_CHATTER);
    assert_eq!(summary.count_logical_lines, 5);
    assert_eq!(summary.count_merged_lines, 3);
    assert_eq!(summary.count_records_total(), 5);
    assert_eq!(summary.count_records_of(EventKind::DefNew), 1);
    assert_eq!(summary.count_records_of(EventKind::G1Young), 0);
    assert_eq!(summary.count_pauses(), 2);
    assert_eq!(summary.timestamp_first, Some(10));
    assert_eq!(summary.timestamp_last, Some(1000));
    assert_eq!(summary.collector_family, CollectorFamily::Serial);
    assert_eq!(summary.jdk_version, Some(17));
}

/// a configured JDK version is not overridden by the `Version:` header
#[test]
fn test_GcLogProcessor_jdk_version_configured() {
    let config = GcLogProcessorConfig {
        jdk_version: Some(11),
        ..Default::default()
    };
    let (processor, records, _) = process(LOG_SERIAL_DETAILED, config);
    assert_eq!(processor.jdk_version(), Some(11));
    // the compact metaspace form is read the same on any version
    assert_eq!(records[2].metaspace.and_then(|m| m.capacity), Some(1216));
}

#[test]
fn test_GcLogProcessor_safepoint_jvm_start_derived() {
    let (processor, records, notifications) = process(LOG_SAFEPOINT_JDK11, GcLogProcessorConfig::default());
    assert!(notifications.is_empty(), "{:?}", notifications);
    assert_eq!(processor.jvm_start(), Some(&*JVM_START_SAFEPOINT));
    assert_eq!(kinds_of(&records), vec![EventKind::ApplicationTime, EventKind::SafepointSession]);
    assert_eq!(timestamps_of(&records), vec![Some(1), Some(1001)]);
    let session = &records[1];
    assert_eq!(session.duration_us, 660);
    assert_eq!(session.time_to_stop_us, Some(205));
    assert_eq!(session.trigger, Some(Trigger::CollectForMetadataAllocation));
    assert_eq!(session.raw_line_count, 3);
    assert_eq!(session.collector_family, CollectorFamily::Unknown);
}

#[test]
fn test_GcLogProcessor_shenandoah() {
    let (processor, records, notifications) = process(LOG_SHENANDOAH, GcLogProcessorConfig::default());
    assert!(notifications.is_empty(), "{:?}", notifications);
    assert_eq!(
        kinds_of(&records),
        vec![
            EventKind::UsingCollector,
            EventKind::ShenandoahTrigger,
            EventKind::ShenandoahInitMark,
            EventKind::ShenandoahConcurrent,
        ]
    );
    assert_eq!(timestamps_of(&records), vec![Some(5), Some(1000), Some(1002), Some(1003)]);
    assert_eq!(records[2].phase.as_deref(), Some("unload classes"));
    assert_eq!(
        records[3].heap,
        Some(MemoryTransition { before: 5 * 1024, after: 6 * 1024, capacity: Some(64 * 1024) })
    );
    assert_eq!(processor.summary().count_chatter, 2);
    assert_eq!(processor.collector_family(), CollectorFamily::Shenandoah);
}

/// without a `Using` header the family is learned from the first Z kind
#[test]
fn test_GcLogProcessor_z_family_from_kind() {
    let (processor, records, notifications) = process(LOG_Z, GcLogProcessorConfig::default());
    assert!(notifications.is_empty(), "{:?}", notifications);
    assert_eq!(
        kinds_of(&records),
        vec![
            EventKind::GcInfo,
            EventKind::HeaderVersion,
            EventKind::ZCollectionStart,
            EventKind::ZPauseMarkStart,
            EventKind::ConcurrentPhase,
            EventKind::ZPauseMarkEnd,
            EventKind::ZPauseRelocateStart,
            EventKind::ZCollection,
        ]
    );
    let families: Vec<CollectorFamily> = records.iter().map(|r| r.collector_family).collect();
    assert_eq!(
        families,
        vec![
            CollectorFamily::Unknown,
            CollectorFamily::Unknown,
            CollectorFamily::Z,
            CollectorFamily::Z,
            CollectorFamily::Z,
            CollectorFamily::Z,
            CollectorFamily::Z,
            CollectorFamily::Z,
        ]
    );
    // 9.500ms rounds half to even, to 10ms
    assert_eq!(
        timestamps_of(&records),
        vec![Some(10), Some(11), Some(1000), Some(1000), Some(1000), Some(1011), Some(1020), Some(1030)]
    );
    assert_eq!(records[7].duration_us, 0);
    assert_eq!(records[7].trigger, Some(Trigger::Warmup));
    assert_eq!(
        records[0].info,
        Some(HeaderInfo::Text(String::from("Initializing The Z Garbage Collector")))
    );
    assert_eq!(processor.collector_family(), CollectorFamily::Z);
}

#[test]
fn test_GcLogProcessor_datestamp_only_with_jvm_start() {
    let config = GcLogProcessorConfig {
        jvm_start: Some(*JVM_START_0900),
        ..Default::default()
    };
    let (_, records, notifications) = process(LOG_DATESTAMP_ONLY, config);
    assert!(notifications.is_empty(), "{:?}", notifications);
    assert_eq!(kinds_of(&records), vec![EventKind::UnifiedRemark]);
    assert_eq!(records[0].timestamp_ms, Some(2122));
}

#[test]
fn test_GcLogProcessor_datestamp_only_unresolvable() {
    let (processor, records, notifications) = process(LOG_DATESTAMP_ONLY, GcLogProcessorConfig::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].timestamp_ms, None);
    assert_eq!(
        notifications,
        vec![Notification::UnresolvableTimestamp {
            line_number: 1,
            kind: EventKind::UnifiedRemark,
        }]
    );
    let summary = processor.summary();
    assert_eq!(summary.count_unresolved_timestamps, 1);
    assert_eq!(summary.timestamp_first, None);
}

#[test]
fn test_GcLogProcessor_datestamp_only_strict() {
    let mut processor = GcLogProcessor::new(GcLogProcessorConfig {
        require_jvm_start: true,
        ..Default::default()
    });
    let mut notifications: Vec<Notification> = Vec::new();
    let result = processor.process_lines(lines_of(LOG_DATESTAMP_ONLY), &mut notifications);
    assert_eq!(result, Err(RunError::MissingJvmStart { line_number: 1 }));
    assert!(notifications.is_empty());
}

#[test]
fn test_GcLogProcessor_incomplete_merge() {
    let log = "\
[0.100s][info][gc,start] GC(0) Pause Young (Allocation Failure)
[0.101s][info][gc,heap] GC(0) DefNew: 4416K->512K(4928K)
";
    let (processor, records, notifications) = process(log, GcLogProcessorConfig::default());
    assert!(records.is_empty());
    assert_eq!(notifications.len(), 1);
    match &notifications[0] {
        Notification::IncompleteMerge { line_number, raw_lines, reason } => {
            assert_eq!(*line_number, 1);
            assert_eq!(raw_lines.len(), 2);
            assert_eq!(*reason, IncompleteReason::Unterminated);
        }
        notification => panic!("unexpected {:?}", notification),
    }
    assert_eq!(processor.summary().count_incomplete_merges, 1);
}

#[test]
fn test_GcLogProcessor_extraction_failure() {
    let log = "[1.000s][info][gc] GC(1) Cancelling GC: Foo bar\n";
    let (processor, records, notifications) = process(log, GcLogProcessorConfig::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].trigger, None);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind(), NotificationKind::ExtractionFailure);
    assert_eq!(notifications[0].line_number(), 1);
    assert_eq!(processor.summary().count_extraction_failures, 1);
}

/// an overflowing safepoint sum fails its own line only
#[test]
fn test_GcLogProcessor_safepoint_overflow_continues() {
    let log = "\
[1.000s][info][safepoint] Total time for which application threads were stopped: 18446744073709.551615 seconds, Stopping threads took: 0.0000010 seconds
[2.000s][info][gc] GC(2) Pause Remark 20M->20M(64M) 1.000ms
";
    let (processor, records, notifications) = process(log, GcLogProcessorConfig::default());
    assert_eq!(kinds_of(&records), vec![EventKind::SafepointStopped, EventKind::UnifiedRemark]);
    assert_eq!(records[0].duration_us, 0);
    assert_eq!(records[1].timestamp_ms, Some(1999));
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind(), NotificationKind::ExtractionFailure);
    assert_eq!(notifications[0].line_number(), 1);
    assert_eq!(processor.summary().count_extraction_failures, 1);
}

/// two grammars matching one line stop the run
#[test]
fn test_GcLogProcessor_ambiguous_match() {
    let mut processor = GcLogProcessor::with_catalog(
        GcLogProcessorConfig {
            verify_catalog: true,
            ..Default::default()
        },
        catalog_overlapping(),
    );
    let mut records: Vec<EventRecord> = Vec::new();
    let mut notifications: Vec<Notification> = Vec::new();
    processor
        .push_line("[1.000s][info][gc] GC(1) Pause Young 30M->10M(64M) 2.000ms", &mut records, &mut notifications)
        .unwrap();
    assert_eq!(kinds_of(&records), vec![EventKind::G1Young]);

    let result = processor.push_line(
        "[2.000s][info][gc] GC(2) Pause Remark 20M->20M(64M) 1.000ms",
        &mut records,
        &mut notifications,
    );
    assert_eq!(
        result,
        Err(RunError::AmbiguousMatch {
            line_number: 2,
            first: EventKind::UnifiedRemark,
            second: EventKind::G1Young,
            payload: String::from("GC(2) Pause Remark 20M->20M(64M) 1.000ms"),
        })
    );
    assert_eq!(records.len(), 1);
    assert!(notifications.is_empty(), "{:?}", notifications);
}

/// without verification the first grammar declared wins
#[test]
fn test_GcLogProcessor_ambiguous_match_no_verify() {
    let mut processor = GcLogProcessor::with_catalog(
        GcLogProcessorConfig {
            verify_catalog: false,
            ..Default::default()
        },
        catalog_overlapping(),
    );
    let records = processor
        .process_lines(["[2.000s][info][gc] GC(2) Pause Remark 20M->20M(64M) 1.000ms"], &mut IgnoreNotifications)
        .unwrap();
    assert_eq!(kinds_of(&records), vec![EventKind::UnifiedRemark]);
}

/// records and notifications do not depend on how lines are pushed
#[test]
fn test_GcLogProcessor_push_line_same_as_process_lines() {
    let (_, records_expect, notifications_expect) = process(LOG_SERIAL_DETAILED, GcLogProcessorConfig::default());

    let mut processor = GcLogProcessor::new(GcLogProcessorConfig {
        verify_catalog: true,
        ..Default::default()
    });
    let mut records: Vec<EventRecord> = Vec::new();
    let mut notifications: Vec<Notification> = Vec::new();
    for line in LOG_SERIAL_DETAILED.lines() {
        processor
            .push_line(line, &mut records, &mut notifications)
            .unwrap();
    }
    // the footer is still buffered
    assert_eq!(records.len(), records_expect.len() - 1);
    processor
        .finish(&mut records, &mut notifications)
        .unwrap();
    assert_eq!(records, records_expect);
    assert_eq!(notifications, notifications_expect);
}

/// the catalog is disjoint, so skipping verification changes nothing
#[test_case(LOG_G1_BASIC)]
#[test_case(LOG_SERIAL_DETAILED)]
#[test_case(LOG_SAFEPOINT_JDK11)]
#[test_case(LOG_SHENANDOAH)]
#[test_case(LOG_Z)]
fn test_GcLogProcessor_verify_catalog_same_records(log: &str) {
    let (_, records_expect, _) = process(log, GcLogProcessorConfig::default());
    let mut processor = GcLogProcessor::new(GcLogProcessorConfig {
        verify_catalog: false,
        ..Default::default()
    });
    let records = processor
        .process_lines(log.lines(), &mut IgnoreNotifications)
        .unwrap();
    assert_eq!(records, records_expect);
}

#[test]
fn test_GcLogProcessor_notifications_counted_when_ignored() {
    let mut processor = GcLogProcessor::default();
    let records = processor
        .process_lines(lines_of(LOG_G1_BASIC), &mut IgnoreNotifications)
        .unwrap();
    assert_eq!(records.len(), LOG_G1_BASIC_RECORDS);
    assert_eq!(processor.summary().count_unrecognized, 1);
}

#[test]
fn test_GcLogProcessorConfig_default() {
    let config = GcLogProcessorConfig::default();
    assert_eq!(config.jvm_start, None);
    assert_eq!(config.jdk_version, None);
    assert!(!config.require_jvm_start);
    assert_eq!(config.verify_catalog, cfg!(debug_assertions));
}

#[test]
fn test_Notification_display() {
    let notification = Notification::IncompleteMerge {
        line_number: 3,
        raw_lines: vec![String::from("a"), String::from("b")],
        reason: IncompleteReason::Interrupted,
    };
    assert_eq!(
        notification.to_string(),
        "line 3: incomplete merge (interrupted by another opener) of 2 lines: a ⏎ b"
    );
    let notification = Notification::UnresolvableTimestamp {
        line_number: 9,
        kind: EventKind::UnifiedRemark,
    };
    assert_eq!(notification.line_number(), 9);
    assert_eq!(
        notification.to_string(),
        "line 9: UnifiedRemark: timestamp not resolvable without JVM start"
    );
}

#[test]
fn test_RunError_display() {
    let err = RunError::MissingJvmStart { line_number: 4 };
    assert_eq!(err.to_string(), "line 4: datestamp-only decorator and no JVM start reference");
}
