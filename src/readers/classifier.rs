// src/readers/classifier.rs

//! Match a [`LogicalLine`] against the catalog [`EVENT_PARSE_DATAS`].
//!
//! Grammars are tried in declaration order, restricted to entries of the
//! line's [`LineShape`], each behind a `memmem` literal pre-filter.
//! With verification enabled every remaining entry is also tried and a
//! second match is a [`ClassifyError::Ambiguous`].
//!
//! [`EVENT_PARSE_DATAS`]: crate::data::patterns::EVENT_PARSE_DATAS

use std::fmt;

use crate::data::eventkind::{EventKind, LineShape, TimestampAnchor};
use crate::data::logicalline::LogicalLine;
use crate::data::patterns::{
    EventParseInstr,
    EVENT_PARSE_DATAS,
    EVENT_PARSE_DATAS_FINDER_VEC,
    EVENT_PARSE_DATAS_REGEX_VEC,
};

use ::memchr::memmem;
use ::regex::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::thiserror::Error;

/// The catalog entry matching a payload, with its captures.
#[derive(Debug)]
pub struct Classification<'a> {
    /// index into the catalog, [`EVENT_PARSE_DATAS`] unless a test
    /// catalog was given
    pub index: usize,
    pub kind: EventKind,
    pub anchor: TimestampAnchor,
    pub captures: Captures<'a>,
}

/// Two catalog entries matched the same payload. This is a defect of the
/// catalog, not of the input.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ClassifyError {
    #[error("payload matched both {first} and {second}")]
    Ambiguous {
        first: EventKind,
        second: EventKind,
    },
}

pub type ClassifyResult<'a> = std::result::Result<Option<Classification<'a>>, ClassifyError>;

/// A grammar catalog with its compiled regexes and pre-filters. The three
/// slices are index aligned.
#[derive(Clone, Copy)]
pub(crate) struct Catalog<'c> {
    pub(crate) entries: &'c [EventParseInstr<'c>],
    pub(crate) regexes: &'c [Regex],
    pub(crate) finders: &'c [memmem::Finder<'c>],
}

impl Catalog<'static> {
    /// The built-in [`EVENT_PARSE_DATAS`].
    pub(crate) fn builtin() -> Catalog<'static> {
        Catalog {
            entries: &EVENT_PARSE_DATAS,
            regexes: EVENT_PARSE_DATAS_REGEX_VEC.as_slice(),
            finders: EVENT_PARSE_DATAS_FINDER_VEC.as_slice(),
        }
    }
}

impl fmt::Debug for Catalog<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Classify `payload` of a logical line of `shape`.
///
/// Returns `Ok(None)` if no entry matches. If `verify` then all entries
/// are tried and two matches return `Err(ClassifyError::Ambiguous)`.
pub fn classify_payload<'a>(
    payload: &'a str,
    shape: LineShape,
    verify: bool,
) -> ClassifyResult<'a> {
    classify_payload_in(Catalog::builtin(), payload, shape, verify)
}

/// [`classify_payload`] against `catalog`.
pub(crate) fn classify_payload_in<'a>(
    catalog: Catalog<'_>,
    payload: &'a str,
    shape: LineShape,
    verify: bool,
) -> ClassifyResult<'a> {
    defn!("({:?}, {:?}, {:?})", catalog, shape, payload);
    let mut found: Option<Classification<'a>> = None;
    for (index, epd) in catalog.entries.iter().enumerate() {
        if epd.shape != shape {
            continue;
        }
        if catalog.finders[index]
            .find(payload.as_bytes())
            .is_none()
        {
            continue;
        }
        let captures: Captures<'a> = match catalog.regexes[index].captures(payload) {
            Some(captures) => captures,
            None => continue,
        };
        match &found {
            Some(first) => {
                defx!("ambiguous {:?} {:?}", first.kind, epd.kind);
                return Err(ClassifyError::Ambiguous {
                    first: first.kind,
                    second: epd.kind,
                });
            }
            None => {
                defo!("matched {:?} index {}", epd.kind, index);
                found = Some(Classification {
                    index,
                    kind: epd.kind,
                    anchor: epd.anchor,
                    captures,
                });
                if !verify {
                    break;
                }
            }
        }
    }
    defx!("found {:?}", found.as_ref().map(|c| c.kind));

    Ok(found)
}

/// Classify a [`LogicalLine`]. See [`classify_payload`].
pub fn classify(
    logical: &LogicalLine,
    verify: bool,
) -> ClassifyResult<'_> {
    classify_in(Catalog::builtin(), logical, verify)
}

/// [`classify`] against `catalog`.
pub(crate) fn classify_in<'a>(
    catalog: Catalog<'_>,
    logical: &'a LogicalLine,
    verify: bool,
) -> ClassifyResult<'a> {
    classify_payload_in(catalog, logical.payload.as_str(), logical.shape, verify)
}

/// The [`EventKind`] of `payload`, all entries verified. Ambiguity is
/// reported as `None`.
pub fn classify_kind(
    payload: &str,
    shape: LineShape,
) -> Option<EventKind> {
    match classify_payload(payload, shape, true) {
        Ok(found) => found.map(|c| c.kind),
        Err(_) => None,
    }
}
