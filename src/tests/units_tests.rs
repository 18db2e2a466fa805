// src/tests/units_tests.rs

//! tests for `src/data/units.rs`

#![allow(non_snake_case)]

use crate::common::{KB, Micros};
use crate::data::units::{
    duration_literal_to_micros,
    duration_to_micros,
    memory_to_kb,
    micros_to_millis,
    parse_decimal,
    parse_decimal_scaled,
    parse_integer,
    Decimal,
    DurationUnit,
    Memory,
    MemoryUnit,
    ThreadTimes,
    UnitError,
};

use ::more_asserts::assert_gt;
use ::test_case::test_case;

#[test_case("512K", 512)]
#[test_case("2M", 2048)]
#[test_case("1G", 1048576)]
#[test_case("0K", 0)]
#[test_case("2048B", 2)]
#[test_case("1023B", 0; "bytes truncated")]
#[test_case("1056768K", 1056768)]
fn test_memory_to_kb(
    text: &str,
    expect: KB,
) {
    assert_eq!(memory_to_kb(text), Ok(expect), "memory_to_kb({:?})", text);
}

#[test_case("12", UnitError::UnknownUnit(String::new()))]
#[test_case("5X", UnitError::UnknownUnit(String::from("X")))]
#[test_case("K", UnitError::MalformedNumber(String::new()))]
#[test_case("99999999999999999999K", UnitError::Overflow(String::from("99999999999999999999")))]
fn test_memory_to_kb_err(
    text: &str,
    expect: UnitError,
) {
    assert_eq!(memory_to_kb(text), Err(expect), "memory_to_kb({:?})", text);
}

#[test]
fn test_Memory_parse() {
    let memory = Memory::parse("38M").unwrap();
    assert_eq!(memory.magnitude, 38);
    assert_eq!(memory.unit, MemoryUnit::M);
    assert_eq!(format!("{:?}", memory), "38M");
}

#[test_case(2048, MemoryUnit::M, 2)]
#[test_case(2048, MemoryUnit::K, 2048)]
#[test_case(3, MemoryUnit::B, 3072)]
fn test_Memory_from_kb(
    kb: KB,
    unit: MemoryUnit,
    magnitude: u64,
) {
    let memory = Memory::from_kb(kb, unit);
    assert_eq!(memory.magnitude, magnitude);
    assert_eq!(memory.to_kb(), Ok(kb));
}

#[test_case("18.406", 18406, 3)]
#[test_case("1,250", 1250, 3; "comma separator")]
#[test_case("7", 7, 0)]
#[test_case("0.0004546", 4546, 7)]
fn test_parse_decimal(
    text: &str,
    mantissa: u128,
    scale: u32,
) {
    assert_eq!(parse_decimal(text), Ok(Decimal { mantissa, scale }));
}

#[test_case("")]
#[test_case("1.")]
#[test_case(".5")]
#[test_case("1.2.3")]
#[test_case("-1")]
#[test_case("1e3")]
fn test_parse_decimal_malformed(text: &str) {
    assert_eq!(parse_decimal(text), Err(UnitError::MalformedNumber(text.to_string())));
}

#[test]
fn test_parse_decimal_overflow() {
    let text = "1234567890123456789012345678901";
    assert_eq!(parse_decimal(text), Err(UnitError::Overflow(text.to_string())));
}

#[test_case("18.406", 3, 18406)]
#[test_case("0.07", 2, 7)]
#[test_case("0.005", 2, 0; "half to even down")]
#[test_case("0.015", 2, 2; "half to even up")]
#[test_case("12", 2, 1200)]
fn test_parse_decimal_scaled(
    text: &str,
    shift: i32,
    expect: u64,
) {
    assert_eq!(parse_decimal_scaled(text, shift), Ok(expect));
}

#[test]
fn test_parse_integer() {
    assert_eq!(parse_integer("1012"), Ok(1012));
    assert_eq!(parse_integer(""), Err(UnitError::MalformedNumber(String::new())));
    assert_eq!(parse_integer("+1"), Err(UnitError::MalformedNumber(String::from("+1"))));
    assert_eq!(
        parse_integer("99999999999999999999"),
        Err(UnitError::Overflow(String::from("99999999999999999999")))
    );
}

#[test_case("1.815ms", 1815)]
#[test_case("0.123s", 123000)]
#[test_case("250us", 250)]
#[test_case("1500ns", 2; "nanos half to even")]
#[test_case("2500ns", 2; "nanos half to even down")]
#[test_case("0,5s", 500000; "comma separator")]
fn test_duration_literal_to_micros(
    text: &str,
    expect: Micros,
) {
    assert_eq!(duration_literal_to_micros(text), Ok(expect), "{:?}", text);
}

#[test]
fn test_duration_literal_to_micros_err() {
    assert_eq!(duration_literal_to_micros("12"), Err(UnitError::UnknownUnit(String::new())));
    assert_eq!(duration_literal_to_micros("12min"), Err(UnitError::UnknownUnit(String::from("min"))));
}

#[test_case("0.0004546", DurationUnit::Seconds, 455)]
#[test_case("0.0002048", DurationUnit::Seconds, 205)]
#[test_case("12345", DurationUnit::Nanos, 12)]
#[test_case("135801", DurationUnit::Nanos, 136)]
fn test_duration_to_micros(
    value: &str,
    unit: DurationUnit,
    expect: Micros,
) {
    assert_eq!(duration_to_micros(value, unit), Ok(expect));
}

#[test_case(1815, 2)]
#[test_case(1499, 1)]
#[test_case(1500, 2)]
#[test_case(2500, 2)]
#[test_case(2501, 3)]
#[test_case(0, 0)]
fn test_micros_to_millis(
    micros: Micros,
    expect: u64,
) {
    assert_eq!(micros_to_millis(micros), expect);
}

#[test]
fn test_ThreadTimes() {
    let times = ThreadTimes::parse("0.04", "0.00", "0.01").unwrap();
    assert_eq!(times, ThreadTimes { user_cs: 4, sys_cs: 0, real_cs: 1 });
    assert_eq!(times.parallelism(), Some(4.0));

    let times = ThreadTimes::parse("0.00", "0.00", "0.00").unwrap();
    assert_eq!(times.parallelism(), None);

    assert!(ThreadTimes::parse("0.00", "x", "0.00").is_err());
}

/// user plus sys beyond `u64::MAX` centiseconds
#[test]
fn test_ThreadTimes_parallelism_huge() {
    let times = ThreadTimes::parse("184467440737095516.15", "0.01", "1.00").unwrap();
    assert_eq!(times.user_cs, u64::MAX);
    let parallelism = times.parallelism().unwrap();
    assert_gt!(parallelism, 1.8e17);
    assert!(parallelism.is_finite());
}
