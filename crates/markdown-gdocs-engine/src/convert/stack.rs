use crate::error::ConvertError;
use crate::ops::TextStyle;
use crate::tree::{DocumentTree, NodeId};

use super::classify::BlockRole;

/// An open context: the node that owns it and the cursor where it opened.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFrame<P> {
    pub open_offset: usize,
    pub node: NodeId,
    pub payload: P,
}

pub type BlockFrame = ContextFrame<BlockRole>;
pub type InlineFrame = ContextFrame<TextStyle>;

/// Block and inline contexts, kept apart because they close on different
/// triggers. At most one inline context is open at a time.
#[derive(Debug, Default)]
pub struct ContextStacks {
    blocks: Vec<BlockFrame>,
    inline: Vec<InlineFrame>,
}

impl ContextStacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_block(&mut self, node: NodeId, open_offset: usize, role: BlockRole) {
        self.blocks.push(ContextFrame {
            open_offset,
            node,
            payload: role,
        });
    }

    /// Opens an inline context, failing if one is already open.
    pub fn open_inline(
        &mut self,
        tree: &DocumentTree,
        node: NodeId,
        open_offset: usize,
        style: TextStyle,
    ) -> Result<(), ConvertError> {
        if let Some(outer) = self.inline.last() {
            return Err(ConvertError::UnsupportedNesting {
                outer: tree.node(outer.node).kind.clone(),
                inner: tree.node(node).kind.clone(),
                offset: tree.node(node).location.start,
            });
        }
        self.inline.push(ContextFrame {
            open_offset,
            node,
            payload: style,
        });
        Ok(())
    }

    /// Pops the top block frame, which the caller expects to exist.
    pub fn close_top_block(&mut self) -> Result<BlockFrame, ConvertError> {
        self.blocks
            .pop()
            .ok_or(ConvertError::UnbalancedContext("block"))
    }

    /// Pops the top inline frame, which the caller expects to exist.
    pub fn close_top_inline(&mut self) -> Result<InlineFrame, ConvertError> {
        self.inline
            .pop()
            .ok_or(ConvertError::UnbalancedContext("inline"))
    }

    /// Pops the open inline frame if there is one.
    pub fn take_inline(&mut self) -> Option<InlineFrame> {
        self.inline.pop()
    }

    /// The innermost open block frame.
    pub fn top_block(&self) -> Option<&BlockFrame> {
        self.blocks.last()
    }

    /// The open inline frame, if any.
    pub fn top_inline(&self) -> Option<&InlineFrame> {
        self.inline.last()
    }
}
