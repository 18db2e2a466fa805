// src/data/logicalline.rs

//! A [`LogicalLine`] is one or more raw lines describing a single event,
//! after decorator stripping and merging by the [`LinePreprocessor`].
//!
//! [`LinePreprocessor`]: crate::readers::preprocessor::LinePreprocessor

use crate::common::LineNumber;
use crate::data::decorator::Decorator;
use crate::data::eventkind::LineShape;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::fmt;

/// A logical line, ready for classification.
///
/// Constructed by the `LinePreprocessor` and consumed immediately by the
/// classifier.
#[derive(Clone, Eq, PartialEq)]
pub struct LogicalLine {
    /// Payload text without decorator. For merged lines, the canonical
    /// concatenation of the retained parts separated by single spaces.
    pub payload: String,
    /// Decorator of the first constituent raw line.
    pub decorator: Decorator,
    /// Constituent raw lines in input order, decorators included.
    pub raw_lines: Vec<String>,
    /// Line number of the first constituent raw line.
    pub line_number: LineNumber,
    pub shape: LineShape,
}

impl LogicalLine {
    /// A logical line from one raw line.
    pub fn new_single(
        payload: &str,
        decorator: Decorator,
        raw_line: &str,
        line_number: LineNumber,
    ) -> LogicalLine {
        LogicalLine {
            payload: payload.to_string(),
            decorator,
            raw_lines: vec![raw_line.to_string()],
            line_number,
            shape: LineShape::Single,
        }
    }

    /// Number of raw lines this logical line was built from.
    #[inline(always)]
    pub fn raw_line_count(&self) -> usize {
        self.raw_lines.len()
    }

    #[inline(always)]
    pub const fn is_merged(&self) -> bool {
        matches!(self.shape, LineShape::Merged)
    }
}

impl fmt::Debug for LogicalLine {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        #[cfg(any(debug_assertions, test))]
        let payload = str_to_String_noraw(&self.payload);
        #[cfg(not(any(debug_assertions, test)))]
        let payload = &self.payload;
        f.debug_struct("LogicalLine")
            .field("line_number", &self.line_number)
            .field("shape", &self.shape)
            .field("raw_lines", &self.raw_lines.len())
            .field("decorator", &self.decorator)
            .field("payload", &payload)
            .finish()
    }
}
