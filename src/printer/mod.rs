// src/printer/mod.rs

//! The `printer` module is for printing user-facing [`EventRecord`s] and
//! [`Notification`s] with color per collector family, and the `--summary`
//! statistics.
//!
//! [`EventRecord`s]: crate::data::eventrecord::EventRecord
//! [`Notification`s]: crate::readers::gclogprocessor::Notification

pub mod printers;
pub mod summary;
