// src/data/mod.rs

//! The `data` module is specialized data containers and grammars for
//! JVM unified GC logs.
//!
//! ## Definitions of data
//!
//! #### Raw line
//!
//! A "raw line" is one newline-terminated line of a GC log, decorator
//! included.
//!
//! #### Decorator
//!
//! A "decorator" is the bracketed prefix unified logging prepends to every
//! raw line, e.g. `[18.406s][info][gc]`. It is parsed into a
//! [`Decorator`] by [`split_decorator`]. The rest of the raw line is the
//! "payload".
//!
//! #### Logical line
//!
//! A "logical line" is one or more raw lines describing a single event,
//! decorators stripped. Multi-line constructs (a detailed pause, a
//! safepoint session, a heap dump) are merged into one canonical payload.
//! A logical line is represented by a [`LogicalLine`] and produced by a
//! [`LinePreprocessor`].
//!
//! #### Event
//!
//! An "event" is a logical line matched by exactly one grammar of the
//! catalog [`EVENT_PARSE_DATAS`], identified by its [`EventKind`], and
//! converted to an [`EventRecord`].
//!
//! [`Decorator`]: crate::data::decorator::Decorator
//! [`split_decorator`]: crate::data::decorator::split_decorator
//! [`LogicalLine`]: crate::data::logicalline::LogicalLine
//! [`LinePreprocessor`]: crate::readers::preprocessor::LinePreprocessor
//! [`EVENT_PARSE_DATAS`]: crate::data::patterns::EVENT_PARSE_DATAS
//! [`EventKind`]: crate::data::eventkind::EventKind
//! [`EventRecord`]: crate::data::eventrecord::EventRecord

pub mod decorator;
pub mod eventkind;
pub mod eventrecord;
pub mod logicalline;
pub mod patterns;
pub mod trigger;
pub mod units;
