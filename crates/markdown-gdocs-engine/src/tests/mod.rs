use crate::convert::{ConvertOptions, markdown_to_operations};
use crate::ops::Operation;

/// Convert markdown with default options, panicking on failure
pub fn convert_md(markdown: &str) -> Vec<Operation> {
    markdown_to_operations(markdown, &ConvertOptions::default()).unwrap()
}

/// Offset and text of every insert, in list order
pub fn inserts(ops: &[Operation]) -> Vec<(usize, String)> {
    ops.iter()
        .filter_map(|op| match op {
            Operation::InsertText { offset, text } => Some((*offset, text.clone())),
            _ => None,
        })
        .collect()
}

/// Every non-insert operation, in list order
pub fn styles(ops: &[Operation]) -> Vec<Operation> {
    ops.iter().filter(|op| !op.is_insert()).cloned().collect()
}

/// Text of the resulting document: inserts concatenated in offset order
pub fn document_text(ops: &[Operation]) -> String {
    let mut inserts = inserts(ops);
    inserts.sort_by_key(|(offset, _)| *offset);
    inserts.into_iter().map(|(_, text)| text).collect()
}
