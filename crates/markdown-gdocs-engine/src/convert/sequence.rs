use crate::ops::Operation;

/// Stable reorder so every insert precedes every styling operation.
///
/// Inserts end up in ascending offset order; styling operations keep their
/// emission order relative to each other.
pub fn sequence(mut ops: Vec<Operation>) -> Vec<Operation> {
    ops.sort_by_key(|op| match op {
        Operation::InsertText { offset, .. } => (0, *offset),
        _ => (1, 0),
    });
    ops
}
