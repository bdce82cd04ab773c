//! Source location types
//!
//! A `Span` is the line/column interval a range vertex carries; the byte
//! `offset` of a declaration or use site is what registries key on.

use serde::{Deserialize, Serialize};

/// Span in source code (half-open on columns, inclusive on lines)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}

/// A position key inside one file: the byte offset of a token
///
/// `(file, offset)` identifies at most one range vertex for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilePos {
    pub file: String,
    pub offset: usize,
}

impl FilePos {
    pub fn new(file: impl Into<String>, offset: usize) -> Self {
        Self {
            file: file.into(),
            offset,
        }
    }
}
