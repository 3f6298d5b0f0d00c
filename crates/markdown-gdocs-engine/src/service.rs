//! Submission pipeline: parse, convert, then hand one atomic batch to a
//! document service.
//!
//! The engine never performs network I/O itself. Callers supply a
//! [`DocumentService`] that talks to the remote API.

use log::info;

use crate::convert::{ConvertOptions, FIRST_INDEX, markdown_to_operations};
use crate::error::ConvertError;
use crate::ops::{BatchUpdate, IndexRange, Request};

/// The remote document API, as seen by the pipeline.
pub trait DocumentService {
    type Error: std::error::Error + 'static;

    /// Id of the document titled `title` in `folder_id`, created if absent.
    fn find_or_create(&mut self, title: &str, folder_id: &str) -> Result<String, Self::Error>;

    /// End index of the document body, including its terminal newline.
    fn content_end_index(&mut self, document_id: &str) -> Result<usize, Self::Error>;

    fn has_open_comments(&mut self, document_id: &str) -> Result<bool, Self::Error>;

    /// Applies every request atomically, in order.
    fn batch_update(&mut self, document_id: &str, batch: BatchUpdate) -> Result<(), Self::Error>;
}

/// Which document receives the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTarget {
    Id(String),
    /// Find-or-create by title within a folder.
    Titled { title: String, folder_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Delete the existing body first. Refused while review comments are open.
    #[default]
    Replace,
    /// Insert ahead of whatever the document already holds.
    Prepend,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError<E: std::error::Error + 'static> {
    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),

    #[error("Document {document_id} has open comments; refusing to replace its content")]
    OpenComments { document_id: String },

    #[error("Document service error: {0}")]
    Service(#[source] E),
}

/// Convert `markdown` and submit it to the target document as one batch.
///
/// Conversion runs before the service is touched, so a document that fails
/// to convert never creates, reads or modifies anything remotely. Returns
/// the id of the document written.
pub fn publish<S: DocumentService>(
    service: &mut S,
    target: &DocumentTarget,
    markdown: &str,
    options: &ConvertOptions,
    mode: WriteMode,
) -> Result<String, PublishError<S::Error>> {
    let ops = markdown_to_operations(markdown, options)?;

    let document_id = match target {
        DocumentTarget::Id(id) => id.clone(),
        DocumentTarget::Titled { title, folder_id } => service
            .find_or_create(title, folder_id)
            .map_err(PublishError::Service)?,
    };

    let mut requests = Vec::with_capacity(ops.len() + 1);
    if mode == WriteMode::Replace {
        if service
            .has_open_comments(&document_id)
            .map_err(PublishError::Service)?
        {
            return Err(PublishError::OpenComments { document_id });
        }
        let end = service
            .content_end_index(&document_id)
            .map_err(PublishError::Service)?;
        if let Some(range) = existing_content(end) {
            requests.push(Request::DeleteContentRange { range });
        }
    }
    requests.extend(ops.into_iter().map(Request::from));

    info!(
        "Submitting {} requests to document {document_id}",
        requests.len()
    );
    service
        .batch_update(&document_id, BatchUpdate { requests })
        .map_err(PublishError::Service)?;

    Ok(document_id)
}

/// Range holding existing body text. The terminal newline cannot be
/// deleted, so a body ending at index 2 or earlier has nothing to remove.
fn existing_content(end_index: usize) -> Option<IndexRange> {
    if end_index <= 2 {
        return None;
    }
    IndexRange::new(FIRST_INDEX, end_index - 1)
}
