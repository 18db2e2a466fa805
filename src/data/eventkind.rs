// src/data/eventkind.rs

//! [`EventKind`], the closed enumeration of recognized event grammars,
//! and the two per-grammar properties [`TimestampAnchor`] and
//! [`LineShape`].
//!
//! Each `EventKind` has exactly one entry in
//! [`EVENT_PARSE_DATAS`].
//!
//! [`EVENT_PARSE_DATAS`]: crate::data::patterns::EVENT_PARSE_DATAS

use crate::data::trigger::CollectorFamily;

use std::fmt;

/// Does the timestamp of a logical line denote the start or the end of
/// the event it describes?
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimestampAnchor {
    /// The line was printed when the event began, e.g. the first line of a
    /// merged multi-line pause (tagged `gc,start`).
    Start,
    /// The line was printed when the event ended, e.g. a one-line pause
    /// summary carrying its duration. The start is back-computed.
    End,
}

/// Was a logical line produced from one raw line, or merged from several?
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LineShape {
    Single,
    Merged,
}

/// All recognized event grammars.
///
/// Names prefixed `Unified` are one-line summaries printed by more than
/// one collector; their family comes from context.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EventKind {
    // ── one-line pause summaries ──
    UnifiedYoung,
    UnifiedFull,
    UnifiedRemark,
    CmsInitialMark,
    G1Young,
    G1Mixed,
    G1ConcurrentStart,
    G1PrepareMixed,
    G1Cleanup,
    G1Full,
    // ── merged detailed pauses ──
    DefNew,
    SerialFull,
    PsYoungGen,
    PsFull,
    PsSerialFull,
    ParNew,
    UnifiedYoungDetailed,
    UnifiedFullDetailed,
    UnifiedRemarkDetailed,
    CmsInitialMarkDetailed,
    G1YoungDetailed,
    G1MixedDetailed,
    G1ConcurrentStartDetailed,
    G1PrepareMixedDetailed,
    G1CleanupDetailed,
    G1FullDetailed,
    // ── concurrent phases ──
    ConcurrentPhaseStart,
    ConcurrentPhase,
    // ── Shenandoah ──
    ShenandoahInitMark,
    ShenandoahFinalMark,
    ShenandoahInitUpdateRefs,
    ShenandoahFinalUpdateRefs,
    ShenandoahFinalEvac,
    ShenandoahFinalRoots,
    ShenandoahConcurrent,
    ShenandoahDegenerated,
    ShenandoahFull,
    ShenandoahTrigger,
    ShenandoahCancelling,
    ShenandoahStats,
    // ── Z ──
    ZPauseMarkStart,
    ZPauseMarkEnd,
    ZPauseRelocateStart,
    ZCollectionStart,
    ZCollection,
    ZAllocationStall,
    ZStats,
    // ── safepoints ──
    SafepointSession,
    SafepointStopped,
    Safepoint,
    ApplicationTime,
    // ── heap dumps and other conditions ──
    HeapAtGc,
    FooterHeap,
    MetaspaceTransition,
    TenuringDistribution,
    GcLockerRetry,
    // ── header and informational lines ──
    UsingCollector,
    HeaderVersion,
    HeaderCpus,
    HeaderMemory,
    HeaderHeapCapacity,
    HeaderHeapAddress,
    GcInfo,
}

impl EventKind {
    /// The collector family implied by matching this kind, if any.
    pub const fn family(&self) -> Option<CollectorFamily> {
        match self {
            EventKind::G1Young
            | EventKind::G1Mixed
            | EventKind::G1ConcurrentStart
            | EventKind::G1PrepareMixed
            | EventKind::G1Cleanup
            | EventKind::G1Full
            | EventKind::G1YoungDetailed
            | EventKind::G1MixedDetailed
            | EventKind::G1ConcurrentStartDetailed
            | EventKind::G1PrepareMixedDetailed
            | EventKind::G1CleanupDetailed
            | EventKind::G1FullDetailed => Some(CollectorFamily::G1),
            EventKind::DefNew | EventKind::SerialFull => Some(CollectorFamily::Serial),
            EventKind::PsYoungGen | EventKind::PsFull | EventKind::PsSerialFull => {
                Some(CollectorFamily::Parallel)
            }
            EventKind::ParNew | EventKind::CmsInitialMark | EventKind::CmsInitialMarkDetailed => {
                Some(CollectorFamily::Cms)
            }
            EventKind::ShenandoahInitMark
            | EventKind::ShenandoahFinalMark
            | EventKind::ShenandoahInitUpdateRefs
            | EventKind::ShenandoahFinalUpdateRefs
            | EventKind::ShenandoahFinalEvac
            | EventKind::ShenandoahFinalRoots
            | EventKind::ShenandoahConcurrent
            | EventKind::ShenandoahDegenerated
            | EventKind::ShenandoahFull
            | EventKind::ShenandoahTrigger
            | EventKind::ShenandoahCancelling
            | EventKind::ShenandoahStats => Some(CollectorFamily::Shenandoah),
            EventKind::ZPauseMarkStart
            | EventKind::ZPauseMarkEnd
            | EventKind::ZPauseRelocateStart
            | EventKind::ZCollectionStart
            | EventKind::ZCollection
            | EventKind::ZAllocationStall
            | EventKind::ZStats => Some(CollectorFamily::Z),
            _ => None,
        }
    }

    /// Does this kind describe a stop-the-world pause?
    pub const fn is_pause(&self) -> bool {
        matches!(
            self,
            EventKind::UnifiedYoung
                | EventKind::UnifiedFull
                | EventKind::UnifiedRemark
                | EventKind::CmsInitialMark
                | EventKind::G1Young
                | EventKind::G1Mixed
                | EventKind::G1ConcurrentStart
                | EventKind::G1PrepareMixed
                | EventKind::G1Cleanup
                | EventKind::G1Full
                | EventKind::DefNew
                | EventKind::SerialFull
                | EventKind::PsYoungGen
                | EventKind::PsFull
                | EventKind::PsSerialFull
                | EventKind::ParNew
                | EventKind::UnifiedYoungDetailed
                | EventKind::UnifiedFullDetailed
                | EventKind::UnifiedRemarkDetailed
                | EventKind::CmsInitialMarkDetailed
                | EventKind::G1YoungDetailed
                | EventKind::G1MixedDetailed
                | EventKind::G1ConcurrentStartDetailed
                | EventKind::G1PrepareMixedDetailed
                | EventKind::G1CleanupDetailed
                | EventKind::G1FullDetailed
                | EventKind::ShenandoahInitMark
                | EventKind::ShenandoahFinalMark
                | EventKind::ShenandoahInitUpdateRefs
                | EventKind::ShenandoahFinalUpdateRefs
                | EventKind::ShenandoahFinalEvac
                | EventKind::ShenandoahFinalRoots
                | EventKind::ShenandoahDegenerated
                | EventKind::ShenandoahFull
                | EventKind::ZPauseMarkStart
                | EventKind::ZPauseMarkEnd
                | EventKind::ZPauseRelocateStart
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
