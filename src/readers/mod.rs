// src/readers/mod.rs

//! "Readers" for _gcslib_.
//!
//! ## Overview of readers
//!
//! * A [`GcLogProcessor`] drives a [`LinePreprocessor`] to derive
//!   [`LogicalLine`s] from raw lines.
//! * Each `LogicalLine` is matched by [`classify`] against the catalog of
//!   event grammars.
//! * A matched line is converted to an [`EventRecord`] by [`extract`].
//! * The record's start timestamp is derived by [`reconcile_timestamp`].
//!
//! <br/>
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! ---
//!
//! The _gcsift_ binary program uses a [`GcLogProcessor`] instance, one per
//! file, to drive processing for a file.
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`LogicalLine`s]: crate::data::logicalline::LogicalLine
//! [`EventRecord`]: crate::data::eventrecord::EventRecord
//! [`LinePreprocessor`]: crate::readers::preprocessor::LinePreprocessor
//! [`GcLogProcessor`]: crate::readers::gclogprocessor::GcLogProcessor
//! [`classify`]: crate::readers::classifier::classify
//! [`extract`]: crate::readers::extractor::extract
//! [`reconcile_timestamp`]: crate::readers::reconciler::reconcile_timestamp

pub mod classifier;
pub mod extractor;
pub mod gclogprocessor;
pub mod preprocessor;
pub mod reconciler;
pub mod summary;
