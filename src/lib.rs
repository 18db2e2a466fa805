// src/lib.rs

//! _gcslib_ recognizes the lines of JVM unified garbage-collection logs
//! (`-Xlog:gc*`) and normalizes them into typed [`EventRecord`s].
//!
//! Logs of the Serial, Parallel, CMS, G1, Shenandoah, and Z collectors are
//! supported, JDK 9 and later.
//!
//! The most relevant struct is [`GcLogProcessor`].
//!
//! [`EventRecord`s]: crate::data::eventrecord::EventRecord
//! [`GcLogProcessor`]: crate::readers::gclogprocessor::GcLogProcessor

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
