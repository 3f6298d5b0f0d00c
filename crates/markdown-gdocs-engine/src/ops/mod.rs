//! Position-addressed edit operations and their API request shapes.

pub mod request;
pub mod style;

use serde::Serialize;

pub use request::{BatchUpdate, Request};
pub use style::{BulletPreset, CodeFont, NamedStyleType, ParagraphStyle, RgbColor, TextStyle};

/// Half-open range of document indices, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRange {
    #[serde(rename = "startIndex")]
    pub start: usize,
    #[serde(rename = "endIndex")]
    pub end: usize,
}

impl IndexRange {
    /// Returns `None` for an empty range; empty ranges are never emitted.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }
}

/// One edit against the destination document.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    InsertText { offset: usize, text: String },
    SetParagraphStyle { range: IndexRange, style: ParagraphStyle },
    SetTextStyle { range: IndexRange, style: TextStyle },
    SetListBullets { range: IndexRange, preset: BulletPreset },
}

impl Operation {
    pub fn is_insert(&self) -> bool {
        matches!(self, Operation::InsertText { .. })
    }

    /// Range styled by this operation; `None` for inserts.
    pub fn range(&self) -> Option<IndexRange> {
        match self {
            Operation::InsertText { .. } => None,
            Operation::SetParagraphStyle { range, .. }
            | Operation::SetTextStyle { range, .. }
            | Operation::SetListBullets { range, .. } => Some(*range),
        }
    }
}

/// Length of `text` in the destination's index unit (UTF-16 code units).
pub fn index_len(text: &str) -> usize {
    text.encode_utf16().count()
}
