use serde::Serialize;

use super::{BulletPreset, IndexRange, Operation, ParagraphStyle, TextStyle};

/// A single request of a Google Docs `documents.batchUpdate` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    InsertText {
        location: Location,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTextStyle {
        range: IndexRange,
        text_style: TextStyle,
        fields: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateParagraphStyle {
        range: IndexRange,
        paragraph_style: ParagraphStyle,
        fields: String,
    },
    #[serde(rename_all = "camelCase")]
    CreateParagraphBullets {
        range: IndexRange,
        bullet_preset: BulletPreset,
    },
    DeleteContentRange {
        range: IndexRange,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub index: usize,
}

impl From<Operation> for Request {
    fn from(op: Operation) -> Self {
        match op {
            Operation::InsertText { offset, text } => Request::InsertText {
                location: Location { index: offset },
                text,
            },
            Operation::SetTextStyle { range, style } => Request::UpdateTextStyle {
                range,
                fields: style.fields(),
                text_style: style,
            },
            Operation::SetParagraphStyle { range, style } => Request::UpdateParagraphStyle {
                range,
                fields: style.fields(),
                paragraph_style: style,
            },
            Operation::SetListBullets { range, preset } => Request::CreateParagraphBullets {
                range,
                bullet_preset: preset,
            },
        }
    }
}

/// Body of a `documents.batchUpdate` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchUpdate {
    pub requests: Vec<Request>,
}

impl BatchUpdate {
    pub fn from_operations(ops: Vec<Operation>) -> Self {
        Self {
            requests: ops.into_iter().map(Request::from).collect(),
        }
    }
}
