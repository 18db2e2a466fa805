// src/readers/reconciler.rs

//! Derive the start timestamp of an event.
//!
//! A logical line's decorator stamps either the start or the end of the
//! event, as declared by the [`TimestampAnchor`] of its grammar. Records
//! always carry the start.

use crate::common::{Micros, Millis};
use crate::data::decorator::{DateTimeL, Decorator};
use crate::data::eventkind::TimestampAnchor;
use crate::data::units::micros_to_millis;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Start of the event in milliseconds since JVM start.
///
/// - `Start`: the decorator timestamp as is.
/// - `End`: the decorator timestamp minus the duration, rounded to
///   milliseconds half-to-even, saturating at zero.
///
/// `None` when the decorator has no uptime and a datestamp cannot be
/// related to `jvm_start`.
pub fn reconcile_timestamp(
    decorator: &Decorator,
    anchor: TimestampAnchor,
    duration_us: Micros,
    jvm_start: Option<&DateTimeL>,
) -> Option<Millis> {
    let stamp_ms: Millis = decorator.timestamp_ms(jvm_start)?;
    let start_ms: Millis = match anchor {
        TimestampAnchor::Start => stamp_ms,
        TimestampAnchor::End => stamp_ms.saturating_sub(micros_to_millis(duration_us)),
    };
    defñ!("{:?} stamp {} duration_us {} → {}", anchor, stamp_ms, duration_us, start_ms);

    Some(start_ms)
}
