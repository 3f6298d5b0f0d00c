//! Annotated Markdown tree consumed by the converter.
//!
//! The tree is stored as a pre-order arena: node `0` is the synthetic
//! document root and every other node follows its parent. Each node records
//! the index of the last node in its own subtree, which turns ancestry
//! checks into an interval test.

mod builder;

use std::fmt;
use std::ops::Range;

pub use builder::parse_markdown;

/// Index of a node inside a [`DocumentTree`].
pub type NodeId = usize;

/// The kind of a parsed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Synthetic root holding the top-level blocks.
    Document,
    Text,
    Paragraph,
    Heading,
    Strong,
    Emphasis,
    /// Inline code span.
    Code,
    Link,
    List,
    Item,
    Blockquote,
    /// HTML comment, tokenized so its content never reaches the output.
    Comment,
    SoftBreak,
    HorizontalRule,
    Image,
    /// Wrapper around a run of inline children of a block.
    Inline,
    /// Anything the parser produced that has no dedicated kind.
    Other(String),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "document",
            NodeKind::Text => "text",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Strong => "strong",
            NodeKind::Emphasis => "em",
            NodeKind::Code => "code",
            NodeKind::Link => "link",
            NodeKind::List => "list",
            NodeKind::Item => "item",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Comment => "comment",
            NodeKind::SoftBreak => "softbreak",
            NodeKind::HorizontalRule => "hr",
            NodeKind::Image => "image",
            NodeKind::Inline => "inline",
            NodeKind::Other(name) => name,
        };
        f.write_str(name)
    }
}

/// Kind-specific attributes carried by a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Heading level, 1 through 6.
    pub level: Option<u8>,
    /// Link target.
    pub href: Option<String>,
    /// Literal content of text and inline code nodes.
    pub content: Option<String>,
    /// Whether a list is numbered.
    pub ordered: bool,
}

/// A single node of the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNode {
    pub kind: NodeKind,
    /// Whether the node flows inline with surrounding text.
    pub inline: bool,
    pub attributes: Attributes,
    /// Byte range of the node in the source Markdown.
    pub location: Range<usize>,
    pub parent: Option<NodeId>,
    /// Index of the last node in this node's subtree (itself for leaves).
    pub last_descendant: NodeId,
}

impl ParsedNode {
    pub fn new(kind: NodeKind, inline: bool, location: Range<usize>) -> Self {
        Self {
            kind,
            inline,
            attributes: Attributes::default(),
            location,
            parent: None,
            last_descendant: 0,
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A parsed document in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTree {
    nodes: Vec<ParsedNode>,
}

impl DocumentTree {
    pub const ROOT: NodeId = 0;

    /// Assembles a tree from nodes already in pre-order with parent and
    /// subtree links filled in. Used by the parser adapter and by tests that
    /// need hand-built trees.
    pub fn from_nodes(nodes: Vec<ParsedNode>) -> Self {
        Self { nodes }
    }

    pub fn node(&self, id: NodeId) -> &ParsedNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Every node except the root, in pre-order.
    pub fn walk(&self) -> impl Iterator<Item = (NodeId, &ParsedNode)> {
        self.nodes.iter().enumerate().skip(1)
    }

    /// True when `id` lies strictly inside the subtree of `ancestor`.
    pub fn is_descendant(&self, ancestor: NodeId, id: NodeId) -> bool {
        id > ancestor && id <= self.nodes[ancestor].last_descendant
    }

    /// True when some proper ancestor of `id` has the given kind.
    pub fn has_ancestor(&self, id: NodeId, kind: &NodeKind) -> bool {
        let mut current = self.nodes[id].parent;
        while let Some(p) = current {
            if &self.nodes[p].kind == kind {
                return true;
            }
            current = self.nodes[p].parent;
        }
        false
    }
}
