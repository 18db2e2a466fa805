// src/data/units.rs

//! Unit normalization of literals captured from GC log payloads.
//!
//! - memory sizes like `"512K"` or `"38M"` become kilobytes ([`KB`])
//! - durations like `"1.815ms"` or `"0.0004546"` seconds become microseconds
//!   ([`Micros`])
//! - thread times like `"User=0.01s Sys=0.00s Real=0.02s"` become
//!   centiseconds ([`Centis`])
//!
//! Decimal literals are converted with integer arithmetic on their digits.
//! No floating point is involved so `"1.015ms"` is exactly `1015` us.
//! When a conversion drops fractional digits the remainder is rounded
//! half-to-even.
//!
//! [`KB`]: crate::common::KB
//! [`Micros`]: crate::common::Micros
//! [`Centis`]: crate::common::Centis

use crate::common::{Centis, Micros, Millis, KB};

use std::fmt;

use ::thiserror::Error;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A literal that does not parse as the expected quantity.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum UnitError {
    #[error("malformed number {0:?}")]
    MalformedNumber(String),
    #[error("unknown unit suffix {0:?}")]
    UnknownUnit(String),
    #[error("number {0:?} overflows")]
    Overflow(String),
}

pub type UnitResult<T> = std::result::Result<T, UnitError>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// decimal helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A decimal literal as `mantissa * 10^-scale`, e.g. `"18.406"` is
/// `(18406, 3)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Decimal {
    pub mantissa: u128,
    pub scale: u32,
}

/// Most fractional digits ever seen in a GC log literal is 7
/// (safepoint seconds). Anything far beyond is not a GC log number.
const DECIMAL_DIGITS_MAX: usize = 30;

/// Parse an unsigned decimal literal. Either `.` or `,` may separate the
/// fractional digits; the JVM prints uptime using the process locale.
pub fn parse_decimal(text: &str) -> UnitResult<Decimal> {
    let (int_part, frac_part) = match text.find(['.', ',']) {
        Some(at) => (&text[..at], &text[at + 1..]),
        None => (text, ""),
    };
    if int_part.is_empty()
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
        || (text.len() > int_part.len() && frac_part.is_empty())
    {
        return Err(UnitError::MalformedNumber(text.to_string()));
    }
    if int_part.len() + frac_part.len() > DECIMAL_DIGITS_MAX {
        return Err(UnitError::Overflow(text.to_string()));
    }
    let mut mantissa: u128 = 0;
    for b in int_part.bytes().chain(frac_part.bytes()) {
        mantissa = mantissa * 10 + (b - b'0') as u128;
    }

    Ok(Decimal {
        mantissa,
        scale: frac_part.len() as u32,
    })
}

/// Divide rounding half-to-even.
fn div_round_half_even(numerator: u128, denominator: u128) -> u128 {
    debug_assert_ne!(denominator, 0);
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let twice = remainder * 2;
    if twice > denominator || (twice == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

impl Decimal {
    /// Value multiplied by `10^shift`, as an integer, rounded half-to-even.
    /// A negative `shift` divides.
    pub fn scaled(
        &self,
        shift: i32,
    ) -> Option<u64> {
        let exponent: i32 = shift - self.scale as i32;
        let value: u128 = if exponent >= 0 {
            let factor = 10u128.checked_pow(exponent as u32)?;
            self.mantissa.checked_mul(factor)?
        } else {
            let divisor = 10u128.checked_pow(exponent.unsigned_abs())?;
            div_round_half_even(self.mantissa, divisor)
        };

        u64::try_from(value).ok()
    }
}

/// Parse decimal `text` and multiply by `10^shift`, rounded half-to-even.
pub fn parse_decimal_scaled(
    text: &str,
    shift: i32,
) -> UnitResult<u64> {
    let decimal = parse_decimal(text)?;
    decimal
        .scaled(shift)
        .ok_or_else(|| UnitError::Overflow(text.to_string()))
}

/// Parse an unsigned integer literal.
pub fn parse_integer(text: &str) -> UnitResult<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UnitError::MalformedNumber(text.to_string()));
    }
    text.parse::<u64>()
        .map_err(|_| UnitError::Overflow(text.to_string()))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Memory
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Unit suffix of a memory literal. Binary (1024-based) throughout.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MemoryUnit {
    B,
    K,
    M,
    G,
}

impl MemoryUnit {
    /// Bytes per one of this unit.
    pub const fn scale(&self) -> u128 {
        match self {
            MemoryUnit::B => 1,
            MemoryUnit::K => 1 << 10,
            MemoryUnit::M => 1 << 20,
            MemoryUnit::G => 1 << 30,
        }
    }

    pub fn from_suffix(suffix: &str) -> UnitResult<MemoryUnit> {
        match suffix {
            "B" => Ok(MemoryUnit::B),
            "K" => Ok(MemoryUnit::K),
            "M" => Ok(MemoryUnit::M),
            "G" => Ok(MemoryUnit::G),
            _ => Err(UnitError::UnknownUnit(suffix.to_string())),
        }
    }

    pub const fn as_suffix(&self) -> &'static str {
        match self {
            MemoryUnit::B => "B",
            MemoryUnit::K => "K",
            MemoryUnit::M => "M",
            MemoryUnit::G => "G",
        }
    }
}

/// A memory literal, e.g. `"38M"` is `Memory { magnitude: 38, unit: M }`.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Memory {
    pub magnitude: u64,
    pub unit: MemoryUnit,
}

impl fmt::Debug for Memory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.as_suffix())
    }
}

impl Memory {
    /// Parse `<integer><B|K|M|G>`.
    pub fn parse(text: &str) -> UnitResult<Memory> {
        let split_at = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| UnitError::UnknownUnit(String::new()))?;
        let (digits, suffix) = text.split_at(split_at);
        let unit = MemoryUnit::from_suffix(suffix)?;
        let magnitude = parse_integer(digits)?;

        Ok(Memory { magnitude, unit })
    }

    /// Normalize to kilobytes, `magnitude * scale(unit) / 1024`.
    /// Bytes are truncated to whole kilobytes.
    pub fn to_kb(&self) -> UnitResult<KB> {
        let bytes: u128 = (self.magnitude as u128) * self.unit.scale();
        u64::try_from(bytes / MemoryUnit::K.scale())
            .map_err(|_| UnitError::Overflow(format!("{:?}", self)))
    }

    /// Express `kb` in `unit`. Inverse of [`to_kb`] for values that are a
    /// whole multiple of `unit`.
    ///
    /// [`to_kb`]: Memory::to_kb
    pub fn from_kb(
        kb: KB,
        unit: MemoryUnit,
    ) -> Memory {
        let bytes: u128 = (kb as u128) * MemoryUnit::K.scale();
        let magnitude = (bytes / unit.scale()).min(u64::MAX as u128) as u64;

        Memory { magnitude, unit }
    }
}

/// Parse a memory literal and normalize it to kilobytes.
pub fn memory_to_kb(text: &str) -> UnitResult<KB> {
    Memory::parse(text)?.to_kb()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Duration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Unit suffix of a duration literal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DurationUnit {
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl DurationUnit {
    pub fn from_suffix(suffix: &str) -> UnitResult<DurationUnit> {
        match suffix {
            "s" => Ok(DurationUnit::Seconds),
            "ms" => Ok(DurationUnit::Millis),
            "us" => Ok(DurationUnit::Micros),
            "ns" => Ok(DurationUnit::Nanos),
            _ => Err(UnitError::UnknownUnit(suffix.to_string())),
        }
    }

    /// Power of ten taking this unit to microseconds.
    const fn shift_to_micros(&self) -> i32 {
        match self {
            DurationUnit::Seconds => 6,
            DurationUnit::Millis => 3,
            DurationUnit::Micros => 0,
            DurationUnit::Nanos => -3,
        }
    }
}

/// Normalize decimal `value` in `unit` to microseconds, rounded
/// half-to-even.
pub fn duration_to_micros(
    value: &str,
    unit: DurationUnit,
) -> UnitResult<Micros> {
    parse_decimal_scaled(value, unit.shift_to_micros())
}

/// Parse a duration literal with its suffix attached, e.g. `"1.815ms"`,
/// `"250us"`, `"0.123s"`.
pub fn duration_literal_to_micros(text: &str) -> UnitResult<Micros> {
    let split_at = text
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| UnitError::UnknownUnit(String::new()))?;
    let (value, suffix) = text.split_at(split_at);
    let unit = DurationUnit::from_suffix(suffix)?;

    duration_to_micros(value, unit)
}

/// Microseconds to milliseconds, rounded half-to-even.
pub const fn micros_to_millis(micros: Micros) -> Millis {
    let quotient = micros / 1000;
    let remainder = micros % 1000;
    if remainder > 500 || (remainder == 500 && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ThreadTimes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// CPU times reported by a `User=… Sys=… Real=…` suffix.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ThreadTimes {
    pub user_cs: Centis,
    pub sys_cs: Centis,
    pub real_cs: Centis,
}

impl ThreadTimes {
    /// Parse the three seconds values (without the `s` suffix).
    pub fn parse(
        user: &str,
        sys: &str,
        real: &str,
    ) -> UnitResult<ThreadTimes> {
        Ok(ThreadTimes {
            user_cs: parse_decimal_scaled(user, 2)?,
            sys_cs: parse_decimal_scaled(sys, 2)?,
            real_cs: parse_decimal_scaled(real, 2)?,
        })
    }

    /// `(user + sys) / real`, or `None` when `real` is zero.
    pub fn parallelism(&self) -> Option<f64> {
        if self.real_cs == 0 {
            return None;
        }

        Some((self.user_cs as f64 + self.sys_cs as f64) / self.real_cs as f64)
    }
}
