// src/data/eventrecord.rs

//! An [`EventRecord`] is the emitted unit of the engine: one per logical
//! line that classified successfully.
//!
//! Optional capabilities of an event (memory per generation, class space,
//! thread times, …) are `Option` fields; a capability query is a field
//! presence check.

use crate::common::{GcId, JdkVersion, LineNumber, Micros, Millis, KB};
use crate::data::eventkind::EventKind;
use crate::data::trigger::{CollectorFamily, Trigger};
use crate::data::units::{micros_to_millis, ThreadTimes};

use std::fmt;

/// Occupancy of a memory pool before and after an event.
///
/// No ordering of `before` and `after` is implied; occupancy may rise
/// during a concurrent phase.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MemoryTransition {
    pub before: KB,
    pub after: KB,
    /// Committed capacity after the event, when printed.
    pub capacity: Option<KB>,
}

/// Occupancy of a memory pool at one point in time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MemorySnapshot {
    pub used: KB,
    pub capacity: KB,
}

/// Which of `Min`, `Initial`, `Max`, `Soft Max` heap capacity a header
/// line reports.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HeapCapacityKind {
    Min,
    Initial,
    Max,
    SoftMax,
}

/// Values of header and informational lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HeaderInfo {
    Collector(CollectorFamily),
    Version {
        text: String,
        major: JdkVersion,
    },
    Cpus {
        total: u64,
        available: u64,
    },
    Memory(KB),
    HeapCapacity {
        which: HeapCapacityKind,
        capacity: KB,
    },
    HeapAddress {
        address: String,
        size: KB,
        compressed_oops_mode: String,
    },
    /// Any other informational text, kept as printed.
    Text(String),
}

/// A fully populated GC event.
///
/// Fields are populated according to what the matched grammar can produce.
/// Records are never modified after they are emitted.
#[derive(Clone, PartialEq)]
pub struct EventRecord {
    pub kind: EventKind,
    pub collector_family: CollectorFamily,
    pub gc_id: Option<GcId>,
    /// Start of the event in milliseconds since JVM start. `None` if the
    /// decorator could not be resolved to a relative time.
    pub timestamp_ms: Option<Millis>,
    /// Zero for kinds without a duration.
    pub duration_us: Micros,
    pub heap: Option<MemoryTransition>,
    pub young: Option<MemoryTransition>,
    pub old: Option<MemoryTransition>,
    pub metaspace: Option<MemoryTransition>,
    /// Reserved metaspace, printed by legacy metaspace transitions and
    /// metaspace usage lines.
    pub metaspace_reserved: Option<KB>,
    pub class_space: Option<MemoryTransition>,
    /// Heap usage of a heap dump (`Heap before GC`, exit `Heap`) or of a
    /// usage line.
    pub heap_snapshot: Option<MemorySnapshot>,
    pub metaspace_snapshot: Option<MemorySnapshot>,
    pub trigger: Option<Trigger>,
    pub thread_times: Option<ThreadTimes>,
    /// Time for threads to reach a safepoint.
    pub time_to_stop_us: Option<Micros>,
    /// Phase name of a concurrent phase, degenerated point, Z collection
    /// type, stalled thread name, or Shenandoah trigger reason.
    pub phase: Option<String>,
    pub info: Option<HeaderInfo>,
    /// Line number of the first raw line of the event.
    pub line_number: LineNumber,
    pub raw_line_count: usize,
}

impl EventRecord {
    /// An `EventRecord` with only the identifying fields set.
    pub fn new(
        kind: EventKind,
        line_number: LineNumber,
        raw_line_count: usize,
    ) -> EventRecord {
        EventRecord {
            kind,
            collector_family: CollectorFamily::Unknown,
            gc_id: None,
            timestamp_ms: None,
            duration_us: 0,
            heap: None,
            young: None,
            old: None,
            metaspace: None,
            metaspace_reserved: None,
            class_space: None,
            heap_snapshot: None,
            metaspace_snapshot: None,
            trigger: None,
            thread_times: None,
            time_to_stop_us: None,
            phase: None,
            info: None,
            line_number,
            raw_line_count,
        }
    }

    /// End of the event in milliseconds since JVM start.
    pub fn end_timestamp_ms(&self) -> Option<Millis> {
        self.timestamp_ms
            .map(|start| start.saturating_add(micros_to_millis(self.duration_us)))
    }

    /// `(user + sys) / real` of the thread times, when present and
    /// `real` is non-zero.
    pub fn parallelism(&self) -> Option<f64> {
        self.thread_times.as_ref()?.parallelism()
    }
}

impl fmt::Debug for EventRecord {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        let mut ds = f.debug_struct("EventRecord");
        ds.field("kind", &self.kind)
            .field("family", &self.collector_family)
            .field("line", &self.line_number);
        // only fields present, the full struct is too noisy to read
        if let Some(gc_id) = self.gc_id {
            ds.field("gc_id", &gc_id);
        }
        ds.field("timestamp_ms", &self.timestamp_ms)
            .field("duration_us", &self.duration_us);
        if let Some(heap) = &self.heap {
            ds.field("heap", heap);
        }
        if let Some(young) = &self.young {
            ds.field("young", young);
        }
        if let Some(old) = &self.old {
            ds.field("old", old);
        }
        if let Some(metaspace) = &self.metaspace {
            ds.field("metaspace", metaspace);
        }
        if let Some(class_space) = &self.class_space {
            ds.field("class_space", class_space);
        }
        if let Some(heap_snapshot) = &self.heap_snapshot {
            ds.field("heap_snapshot", heap_snapshot);
        }
        if let Some(trigger) = &self.trigger {
            ds.field("trigger", trigger);
        }
        if let Some(thread_times) = &self.thread_times {
            ds.field("thread_times", thread_times);
        }
        if let Some(time_to_stop_us) = &self.time_to_stop_us {
            ds.field("time_to_stop_us", time_to_stop_us);
        }
        if let Some(phase) = &self.phase {
            ds.field("phase", phase);
        }
        if let Some(info) = &self.info {
            ds.field("info", info);
        }
        ds.finish()
    }
}
