// src/common.rs

//! Common imports, type aliases, and other globals for _gcslib_
//! (avoids circular imports).

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling, command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `F`ake `Path` or `F`ile `Path`.
///
/// A path passed on the command-line, or `"-"` for stdin.
pub type FPath = String;

/// `FPath` of the standard input stream.
pub const FPATH_STDIN: &str = "-";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// counting and units
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// General purpose counting type, typically used for internal statistics.
pub type Count = u64;

/// One-based line number of a raw line within one input.
pub type LineNumber = u64;

/// The `n` of a `GC(n)` marker. The JVM's per-run GC sequence number.
pub type GcId = u64;

/// Memory in kilobytes (1024 bytes).
pub type KB = u64;

/// Duration in microseconds.
pub type Micros = u64;

/// Time in milliseconds. A timestamp relative to JVM start, or a
/// duration.
pub type Millis = u64;

/// Duration in centiseconds (hundredths of a second).
pub type Centis = u64;

/// The major version of a JDK, e.g. `17` for `"17.0.2+8-86"`.
pub type JdkVersion = u32;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// misc.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The first JDK release printing committed, not reserved, metaspace as
/// the parenthesized figure of a transition `A->B(C)`.
pub const JDK_VERSION_METASPACE_COMMITTED: JdkVersion = 16;

/// Default bound on the number of raw lines one merged event may span.
///
/// Generous for a detailed G1 pause with every sub-phase printed
/// (`-Xlog:gc*=debug`) yet small enough to bound memory.
pub const MERGE_LINES_MAX_DEFAULT: usize = 64;
