use crate::tree::NodeKind;

/// Why a Markdown document could not be converted.
///
/// Every variant aborts the whole conversion; no partial operation list is
/// ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Unsupported node kind `{kind}` at byte {offset}")]
    UnsupportedNodeKind { kind: NodeKind, offset: usize },

    #[error("Nested inline styles are not supported: `{inner}` inside `{outer}` at byte {offset}")]
    UnsupportedNesting {
        outer: NodeKind,
        inner: NodeKind,
        offset: usize,
    },

    #[error("Malformed `{kind}` node: {reason}")]
    MalformedAttributes { kind: NodeKind, reason: &'static str },

    #[error("No open {0} context to close")]
    UnbalancedContext(&'static str),
}
