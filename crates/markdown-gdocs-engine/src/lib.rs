//! Compile Markdown into Google Docs `batchUpdate` requests.
//!
//! ```rust
//! use markdown_gdocs_engine::{BatchUpdate, ConvertOptions, markdown_to_operations};
//!
//! let ops = markdown_to_operations("# Title\n\nBody text", &ConvertOptions::default()).unwrap();
//! let batch = BatchUpdate::from_operations(ops);
//! assert_eq!(batch.requests.len(), 3);
//! ```

pub mod convert;
pub mod error;
pub mod ops;
pub mod service;
pub mod tree;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use convert::{ConvertOptions, convert, markdown_to_operations};
pub use error::ConvertError;
pub use ops::{BatchUpdate, CodeFont, IndexRange, Operation, Request, RgbColor};
pub use service::{DocumentService, DocumentTarget, PublishError, WriteMode, publish};
pub use tree::{DocumentTree, NodeKind, ParsedNode, parse_markdown};
