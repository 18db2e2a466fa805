// src/tests/classifier_tests.rs

//! tests for `src/readers/classifier.rs`

#![allow(non_snake_case)]

use crate::data::decorator::split_decorator;
use crate::data::eventkind::{EventKind, LineShape, TimestampAnchor};
use crate::data::logicalline::LogicalLine;
use crate::data::patterns::{CGN_DURATION, CGN_GC_ID, CGN_HEAP_BEFORE, CGN_TRIGGER};
use crate::readers::classifier::{
    classify,
    classify_kind,
    classify_payload,
    classify_payload_in,
    ClassifyError,
};
use crate::tests::common::catalog_overlapping;

use ::test_case::test_case;

#[test]
fn test_classify_payload_captures() {
    let payload = "GC(1012) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms";
    let classification = classify_payload(payload, LineShape::Single, true)
        .unwrap()
        .unwrap();
    assert_eq!(classification.kind, EventKind::G1Young);
    assert_eq!(classification.anchor, TimestampAnchor::End);
    let captures = &classification.captures;
    assert_eq!(captures.name(CGN_GC_ID).map(|m| m.as_str()), Some("1012"));
    assert_eq!(captures.name(CGN_TRIGGER).map(|m| m.as_str()), Some("G1 Evacuation Pause"));
    assert_eq!(captures.name(CGN_HEAP_BEFORE).map(|m| m.as_str()), Some("38M"));
    assert_eq!(captures.name(CGN_DURATION).map(|m| m.as_str()), Some("1.815"));
}

#[test_case(true)]
#[test_case(false)]
fn test_classify_payload_verify_same_result(verify: bool) {
    let payload = "GC(2) Pause Full (Ergonomics) 20M->12M(60M) 40.000ms";
    let classification = classify_payload(payload, LineShape::Single, verify)
        .unwrap()
        .unwrap();
    assert_eq!(classification.kind, EventKind::UnifiedFull);
}

#[test_case("Something unexpected happened")]
#[test_case("GC(5) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M)"; "missing duration")]
#[test_case("GC(5) Pause Young (Normal) (G1 Evacuation Pause) 38M->19M(46M) 1.815ms trailing"; "trailing text")]
#[test_case("GC(5) Pause Young (Normal) (G1 Evacuation Pause) 38X->19M(46M) 1.815ms"; "unknown memory unit")]
#[test_case("")]
fn test_classify_payload_unrecognized(payload: &str) {
    assert!(matches!(classify_payload(payload, LineShape::Single, true), Ok(None)));
}

/// grammars only apply to logical lines of their own shape
#[test]
fn test_classify_payload_shape() {
    let payload = "GC(0) Pause Young (Allocation Failure) DefNew: 4416K->512K(4928K) 4M->2M(15M) 4.321ms";
    assert_eq!(classify_kind(payload, LineShape::Merged), Some(EventKind::DefNew));
    assert_eq!(classify_kind(payload, LineShape::Single), None);

    let payload = "GC(0) Pause Young (Allocation Failure) 4M->2M(15M) 4.321ms";
    assert_eq!(classify_kind(payload, LineShape::Single), Some(EventKind::UnifiedYoung));
    assert_eq!(classify_kind(payload, LineShape::Merged), Some(EventKind::UnifiedYoungDetailed));
}

#[test]
fn test_classify_LogicalLine() {
    let raw = "[18.406s][info][gc] GC(3) Pause Young (Allocation Failure) 4M->2M(15M) 4.321ms";
    let (decorator, payload) = split_decorator(raw);
    let logical = LogicalLine::new_single(payload, decorator, raw, 1);
    let classification = classify(&logical, true).unwrap().unwrap();
    assert_eq!(classification.kind, EventKind::UnifiedYoung);
}

#[test]
fn test_ClassifyError_display() {
    let err = ClassifyError::Ambiguous {
        first: EventKind::G1Young,
        second: EventKind::UnifiedYoung,
    };
    assert_eq!(err.to_string(), "payload matched both G1Young and UnifiedYoung");
}

/// a payload matched by two grammars
#[test]
fn test_classify_payload_in_ambiguous() {
    let payload = "GC(2) Pause Remark 20M->20M(64M) 1.000ms";
    let result = classify_payload_in(catalog_overlapping(), payload, LineShape::Single, true);
    assert_eq!(
        result.unwrap_err(),
        ClassifyError::Ambiguous {
            first: EventKind::UnifiedRemark,
            second: EventKind::G1Young,
        }
    );
}

/// without verification the first grammar declared wins
#[test]
fn test_classify_payload_in_ambiguous_no_verify() {
    let payload = "GC(2) Pause Remark 20M->20M(64M) 1.000ms";
    let classification = classify_payload_in(catalog_overlapping(), payload, LineShape::Single, false)
        .unwrap()
        .unwrap();
    assert_eq!(classification.kind, EventKind::UnifiedRemark);
    assert_eq!(classification.index, 0);
}

#[test]
fn test_classify_payload_in_one_match() {
    let payload = "GC(3) Pause Young 20M->10M(64M) 1.000ms";
    let classification = classify_payload_in(catalog_overlapping(), payload, LineShape::Single, true)
        .unwrap()
        .unwrap();
    assert_eq!(classification.kind, EventKind::G1Young);
    assert_eq!(classification.index, 1);
}
