use crate::error::ConvertError;
use crate::ops::{BulletPreset, NamedStyleType, TextStyle};
use crate::tree::{NodeKind, ParsedNode};

use super::ConvertOptions;

/// Structural role of an open block context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    Paragraph,
    Heading(NamedStyleType),
    /// Rendered as a plain paragraph break.
    Blockquote,
    List(BulletPreset),
    /// Delimits one list entry; carries no style of its own.
    Item,
}

impl BlockRole {
    /// Containers stay open while the walk is still inside them.
    pub fn is_container(&self) -> bool {
        matches!(self, BlockRole::List(_) | BlockRole::Blockquote)
    }
}

/// What the walker does with one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Treatment<'a> {
    Ignore,
    OpenBlock(BlockRole),
    /// Opens an inline context; `text` is inserted straight away for nodes
    /// that carry their own content (inline code).
    OpenInline {
        style: TextStyle,
        text: Option<&'a str>,
    },
    EmitText(&'a str),
}

/// Map a node to its treatment and style payload.
///
/// Fails with [`ConvertError::UnsupportedNodeKind`] for kinds outside the
/// mapping table and [`ConvertError::MalformedAttributes`] when a node's
/// attributes do not match its kind.
pub fn classify<'a>(
    node: &'a ParsedNode,
    options: &ConvertOptions,
) -> Result<Treatment<'a>, ConvertError> {
    let treatment = match &node.kind {
        NodeKind::Comment
        | NodeKind::SoftBreak
        | NodeKind::HorizontalRule
        | NodeKind::Image
        | NodeKind::Inline => Treatment::Ignore,

        NodeKind::Text => Treatment::EmitText(content(node)?),
        NodeKind::Code => Treatment::OpenInline {
            style: TextStyle::code(&options.code_font),
            text: Some(content(node)?),
        },

        NodeKind::Heading => {
            no_content(node)?;
            let style = node
                .attributes
                .level
                .and_then(NamedStyleType::heading)
                .ok_or_else(|| malformed(node, "heading level must be between 1 and 6"))?;
            Treatment::OpenBlock(BlockRole::Heading(style))
        }
        NodeKind::Paragraph => {
            no_content(node)?;
            Treatment::OpenBlock(BlockRole::Paragraph)
        }
        NodeKind::Blockquote => {
            no_content(node)?;
            Treatment::OpenBlock(BlockRole::Blockquote)
        }
        NodeKind::List => {
            no_content(node)?;
            let preset = BulletPreset::for_list(node.attributes.ordered);
            Treatment::OpenBlock(BlockRole::List(preset))
        }
        NodeKind::Item => {
            no_content(node)?;
            Treatment::OpenBlock(BlockRole::Item)
        }

        NodeKind::Strong => {
            no_content(node)?;
            Treatment::OpenInline {
                style: TextStyle::bold(),
                text: None,
            }
        }
        NodeKind::Emphasis => {
            no_content(node)?;
            Treatment::OpenInline {
                style: TextStyle::italic(),
                text: None,
            }
        }
        NodeKind::Link => {
            no_content(node)?;
            let href = node
                .attributes
                .href
                .as_deref()
                .ok_or_else(|| malformed(node, "link has no target"))?;
            Treatment::OpenInline {
                style: TextStyle::link(href),
                text: None,
            }
        }

        NodeKind::Document | NodeKind::Other(_) => {
            return Err(ConvertError::UnsupportedNodeKind {
                kind: node.kind.clone(),
                offset: node.location.start,
            });
        }
    };

    Ok(treatment)
}

fn content(node: &ParsedNode) -> Result<&str, ConvertError> {
    node.attributes
        .content
        .as_deref()
        .ok_or_else(|| malformed(node, "expected literal content"))
}

fn no_content(node: &ParsedNode) -> Result<(), ConvertError> {
    match node.attributes.content {
        Some(_) => Err(malformed(node, "unexpected literal content")),
        None => Ok(()),
    }
}

fn malformed(node: &ParsedNode, reason: &'static str) -> ConvertError {
    ConvertError::MalformedAttributes {
        kind: node.kind.clone(),
        reason,
    }
}
