// src/data/trigger.rs

//! The closed sets [`Trigger`] and [`CollectorFamily`], and the static
//! tables mapping JVM log text to them.
//!
//! A trigger is the cause of a collection as printed in parentheses,
//! e.g. `"Allocation Failure"` in `Pause Young (Allocation Failure)`. The
//! VM operation name of a safepoint, e.g. `"CollectForMetadataAllocation"`,
//! is the trigger of that safepoint.
//!
//! Unknown text is not silently defaulted; [`Trigger::from_text`] returns
//! `None` and the caller reports an extraction failure.

use std::fmt;

use ::phf::phf_map;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trigger
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Trigger {
    // generational and shared collection causes
    AllocationFailure,
    Ergonomics,
    SystemGc,
    GcLockerInitiatedGc,
    MetadataGcThreshold,
    MetadataGcClearSoftReferences,
    HeapDumpInitiatedGc,
    HeapInspectionInitiatedGc,
    LastDitchCollection,
    JvmtiForceGc,
    WhiteBoxYoungGc,
    WhiteBoxFullGc,
    WhiteBoxConcurrentMark,
    DiagnosticCommand,
    CmsInitialMark,
    CmsFinalRemark,
    FullGcAlot,
    ScavengeAlot,
    // G1-only causes
    G1EvacuationPause,
    G1HumongousAllocation,
    G1CompactionPause,
    G1PreventiveCollection,
    G1PeriodicCollection,
    // Z causes
    Warmup,
    AllocationRate,
    AllocationStall,
    Proactive,
    Timer,
    HighUsage,
    // Shenandoah cancellation causes
    StoppingVm,
    UpgradeToFullGc,
    // safepoint VM operations
    CollectForMetadataAllocation,
    CollectForCodeCacheAllocation,
    G1CollectForAllocation,
    G1CollectFull,
    G1Concurrent,
    G1PauseRemark,
    G1PauseCleanup,
    G1TryInitiateConcMark,
    ParallelGcFailedAllocation,
    ParallelGcSystemGc,
    GenCollectForAllocation,
    GenCollectFull,
    CmsOperation,
    ShenandoahOperation,
    ZOperation,
    Cleanup,
    RevokeBias,
    BulkRevokeBias,
    EnableBiasedLocking,
    Deoptimize,
    HandshakeAllThreads,
    IcBufferFull,
    FindDeadlocks,
    ThreadDump,
    PrintThreads,
    GetAllStackTraces,
    ForceSafepoint,
    HeapDumper,
    GcHeapInspection,
    RedefineClasses,
    Exit,
    None,
}

/// Map the text the JVM prints to a [`Trigger`].
///
/// Entries in the first group appear in `GC(n) Pause …(text)…` lines, the
/// second group are safepoint VM operation names.
static MAP_TEXT_TO_TRIGGER: phf::Map<&'static str, Trigger> = phf_map! {
    "Allocation Failure" => Trigger::AllocationFailure,
    "Ergonomics" => Trigger::Ergonomics,
    "System.gc()" => Trigger::SystemGc,
    "GCLocker Initiated GC" => Trigger::GcLockerInitiatedGc,
    "Metadata GC Threshold" => Trigger::MetadataGcThreshold,
    "Metadata GC Clear Soft References" => Trigger::MetadataGcClearSoftReferences,
    "Heap Dump Initiated GC" => Trigger::HeapDumpInitiatedGc,
    "Heap Inspection Initiated GC" => Trigger::HeapInspectionInitiatedGc,
    "Last ditch collection" => Trigger::LastDitchCollection,
    "JvmtiEnv ForceGarbageCollection" => Trigger::JvmtiForceGc,
    "WhiteBox Initiated Young GC" => Trigger::WhiteBoxYoungGc,
    "WhiteBox Initiated Full GC" => Trigger::WhiteBoxFullGc,
    "WhiteBox Initiated Concurrent Mark" => Trigger::WhiteBoxConcurrentMark,
    "Diagnostic Command" => Trigger::DiagnosticCommand,
    "CMS Initial Mark" => Trigger::CmsInitialMark,
    "CMS Final Remark" => Trigger::CmsFinalRemark,
    "FullGCAlot" => Trigger::FullGcAlot,
    "ScavengeAlot" => Trigger::ScavengeAlot,
    "G1 Evacuation Pause" => Trigger::G1EvacuationPause,
    "G1 Humongous Allocation" => Trigger::G1HumongousAllocation,
    "G1 Compaction Pause" => Trigger::G1CompactionPause,
    "G1 Preventive Collection" => Trigger::G1PreventiveCollection,
    "G1 Periodic Collection" => Trigger::G1PeriodicCollection,
    "Warmup" => Trigger::Warmup,
    "Allocation Rate" => Trigger::AllocationRate,
    "Allocation Stall" => Trigger::AllocationStall,
    "Proactive" => Trigger::Proactive,
    "Timer" => Trigger::Timer,
    "High Usage" => Trigger::HighUsage,
    "Stopping VM" => Trigger::StoppingVm,
    "Upgrade To Full GC" => Trigger::UpgradeToFullGc,
    // VM operations
    "CollectForMetadataAllocation" => Trigger::CollectForMetadataAllocation,
    "CollectForCodeCacheAllocation" => Trigger::CollectForCodeCacheAllocation,
    "G1CollectForAllocation" => Trigger::G1CollectForAllocation,
    "G1CollectFull" => Trigger::G1CollectFull,
    "G1Concurrent" => Trigger::G1Concurrent,
    "G1PauseRemark" => Trigger::G1PauseRemark,
    "G1PauseCleanup" => Trigger::G1PauseCleanup,
    "G1TryInitiateConcMark" => Trigger::G1TryInitiateConcMark,
    "ParallelGCFailedAllocation" => Trigger::ParallelGcFailedAllocation,
    "ParallelGCSystemGC" => Trigger::ParallelGcSystemGc,
    "GenCollectForAllocation" => Trigger::GenCollectForAllocation,
    "GenCollectFull" => Trigger::GenCollectFull,
    "CGC_Operation" => Trigger::CmsOperation,
    "ShenandoahOperation" => Trigger::ShenandoahOperation,
    "ZOperation" => Trigger::ZOperation,
    "Cleanup" => Trigger::Cleanup,
    "RevokeBias" => Trigger::RevokeBias,
    "BulkRevokeBias" => Trigger::BulkRevokeBias,
    "EnableBiasedLocking" => Trigger::EnableBiasedLocking,
    "Deoptimize" => Trigger::Deoptimize,
    "HandshakeAllThreads" => Trigger::HandshakeAllThreads,
    "ICBufferFull" => Trigger::IcBufferFull,
    "FindDeadlocks" => Trigger::FindDeadlocks,
    "ThreadDump" => Trigger::ThreadDump,
    "PrintThreads" => Trigger::PrintThreads,
    "GetAllStackTraces" => Trigger::GetAllStackTraces,
    "ForceSafepoint" => Trigger::ForceSafepoint,
    "HeapDumper" => Trigger::HeapDumper,
    "GC_HeapInspection" => Trigger::GcHeapInspection,
    "RedefineClasses" => Trigger::RedefineClasses,
    "Exit" => Trigger::Exit,
    "None" => Trigger::None,
};

impl Trigger {
    /// The `Trigger` for the exact JVM `text`, or `None` if unknown.
    pub fn from_text(text: &str) -> Option<Trigger> {
        MAP_TEXT_TO_TRIGGER.get(text).copied()
    }

    /// Is this a cause only the G1 collector prints?
    pub const fn is_g1_only(&self) -> bool {
        matches!(
            self,
            Trigger::G1EvacuationPause
                | Trigger::G1HumongousAllocation
                | Trigger::G1CompactionPause
                | Trigger::G1PreventiveCollection
                | Trigger::G1PeriodicCollection
                | Trigger::WhiteBoxConcurrentMark
                | Trigger::G1CollectForAllocation
                | Trigger::G1CollectFull
                | Trigger::G1Concurrent
                | Trigger::G1PauseRemark
                | Trigger::G1PauseCleanup
                | Trigger::G1TryInitiateConcMark
        )
    }

    /// The JVM text of this `Trigger`.
    pub fn as_text(&self) -> &'static str {
        for (text, trigger) in MAP_TEXT_TO_TRIGGER.entries() {
            if trigger == self {
                return text;
            }
        }
        // every variant has an entry, checked in `test_trigger_text_roundtrip`
        "?"
    }
}

impl fmt::Display for Trigger {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CollectorFamily
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Which garbage collector implementation produced a line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CollectorFamily {
    Serial,
    Parallel,
    Cms,
    G1,
    Shenandoah,
    Z,
    #[default]
    Unknown,
}

/// Map the `X` of a `Using X` header line to a [`CollectorFamily`].
static MAP_USING_TO_COLLECTORFAMILY: phf::Map<&'static str, CollectorFamily> = phf_map! {
    "Serial" => CollectorFamily::Serial,
    "Parallel" => CollectorFamily::Parallel,
    "Concurrent Mark Sweep" => CollectorFamily::Cms,
    "G1" => CollectorFamily::G1,
    "Shenandoah" => CollectorFamily::Shenandoah,
    "The Z Garbage Collector" => CollectorFamily::Z,
    "ZGC" => CollectorFamily::Z,
};

impl CollectorFamily {
    /// The family named by a `Using X` header line.
    pub fn from_using(text: &str) -> Option<CollectorFamily> {
        MAP_USING_TO_COLLECTORFAMILY.get(text).copied()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            CollectorFamily::Serial => "Serial",
            CollectorFamily::Parallel => "Parallel",
            CollectorFamily::Cms => "CMS",
            CollectorFamily::G1 => "G1",
            CollectorFamily::Shenandoah => "Shenandoah",
            CollectorFamily::Z => "Z",
            CollectorFamily::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CollectorFamily {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
