use log::{debug, trace};

use crate::error::ConvertError;
use crate::ops::{IndexRange, Operation, ParagraphStyle, index_len};
use crate::tree::{DocumentTree, NodeId, NodeKind, ParsedNode};

use super::classify::{BlockRole, Treatment, classify};
use super::stack::{BlockFrame, ContextStacks, InlineFrame};
use super::{ConvertOptions, FIRST_INDEX};

/// Single pre-order pass over a [`DocumentTree`] that emits operations in
/// the order their content becomes known.
///
/// The cursor always equals `FIRST_INDEX` plus the length of every insert
/// emitted so far. Newlines that terminate blocks are appended to the most
/// recent insert, so the inserts stay contiguous.
pub struct Walker<'t> {
    tree: &'t DocumentTree,
    options: &'t ConvertOptions,
    cursor: usize,
    stacks: ContextStacks,
    ops: Vec<Operation>,
    last_insert: Option<usize>,
    /// Consecutive newlines at the end of the text scheduled so far.
    trailing_newlines: usize,
}

impl<'t> Walker<'t> {
    pub fn new(tree: &'t DocumentTree, options: &'t ConvertOptions) -> Self {
        Self {
            tree,
            options,
            cursor: FIRST_INDEX,
            stacks: ContextStacks::new(),
            ops: Vec::new(),
            last_insert: None,
            trailing_newlines: 0,
        }
    }

    /// Walks the whole tree and returns operations in emission order.
    pub fn run(mut self) -> Result<Vec<Operation>, ConvertError> {
        let tree = self.tree;
        for (id, node) in tree.walk() {
            self.visit(id, node)?;
        }

        self.close_inline();
        self.close_blocks(None)?;

        debug!(
            "converted {} nodes into {} operations, document end index {}",
            tree.len() - 1,
            self.ops.len(),
            self.cursor
        );
        Ok(self.ops)
    }

    fn visit(&mut self, id: NodeId, node: &'t ParsedNode) -> Result<(), ConvertError> {
        let treatment = classify(node, self.options)?;
        trace!("visit #{id} {} at cursor {}", node.kind, self.cursor);

        if matches!(treatment, Treatment::Ignore) {
            return Ok(());
        }

        if node.inline {
            self.close_inline_outside(id);
        } else {
            self.close_inline();
            self.close_blocks(Some(id))?;
        }

        match treatment {
            Treatment::Ignore => {}
            Treatment::EmitText(text) => {
                self.insert(text);
                // a text run ends the inline context wrapping it
                self.close_inline();
            }
            Treatment::OpenBlock(role) => self.open_block(id, role),
            Treatment::OpenInline { style, text } => {
                self.stacks.open_inline(self.tree, id, self.cursor, style)?;
                if let Some(text) = text {
                    self.insert(text);
                    let frame = self.stacks.close_top_inline()?;
                    self.finish_inline(frame);
                }
            }
        }

        Ok(())
    }

    fn open_block(&mut self, id: NodeId, role: BlockRole) {
        let top_level = self.tree.node(id).parent == Some(DocumentTree::ROOT);
        if matches!(role, BlockRole::Paragraph | BlockRole::Blockquote)
            && top_level
            && self.cursor > FIRST_INDEX
            && self.trailing_newlines < 2
        {
            self.newline();
        }
        self.stacks.open_block(id, self.cursor, role);
    }

    fn close_inline(&mut self) {
        if let Some(frame) = self.stacks.take_inline() {
            self.finish_inline(frame);
        }
    }

    /// Closes the open inline context unless `id` lies inside its node. A
    /// context whose node held no text run closes empty and emits nothing.
    fn close_inline_outside(&mut self, id: NodeId) {
        let inside = self
            .stacks
            .top_inline()
            .is_some_and(|frame| self.tree.is_descendant(frame.node, id));
        if !inside {
            self.close_inline();
        }
    }

    fn finish_inline(&mut self, frame: InlineFrame) {
        if let Some(range) = IndexRange::new(frame.open_offset, self.cursor) {
            self.ops.push(Operation::SetTextStyle {
                range,
                style: frame.payload,
            });
        }
    }

    /// Closes block frames from the top. A container frame stays open, along
    /// with everything beneath it, while `incoming` lies inside it.
    fn close_blocks(&mut self, incoming: Option<NodeId>) -> Result<(), ConvertError> {
        let tree = self.tree;
        while let Some(top) = self.stacks.top_block() {
            let keep = top.payload.is_container()
                && incoming.is_some_and(|id| tree.is_descendant(top.node, id));
            if keep {
                break;
            }
            let frame = self.stacks.close_top_block()?;
            self.finish_block(frame);
        }
        Ok(())
    }

    fn finish_block(&mut self, frame: BlockFrame) {
        let range = IndexRange::new(frame.open_offset, self.cursor);
        match frame.payload {
            BlockRole::Paragraph | BlockRole::Blockquote => self.newline(),
            BlockRole::Heading(named) => {
                if let Some(range) = range {
                    self.ops.push(Operation::SetParagraphStyle {
                        range,
                        style: ParagraphStyle::named(named),
                    });
                }
                self.newline();
            }
            BlockRole::Item => {
                // an empty item still takes a bullet line of its own
                let empty = self.cursor == frame.open_offset;
                if empty || (self.cursor > FIRST_INDEX && self.trailing_newlines == 0) {
                    self.newline();
                }
            }
            BlockRole::List(preset) => {
                if let Some(range) = range {
                    self.ops.push(Operation::SetListBullets { range, preset });
                }
                if !self.tree.has_ancestor(frame.node, &NodeKind::List) {
                    self.newline();
                }
            }
        }
    }

    fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        self.ops.push(Operation::InsertText {
            offset: self.cursor,
            text: text.to_string(),
        });
        self.last_insert = Some(self.ops.len() - 1);
        self.cursor += index_len(text);

        let trailing = text.chars().rev().take_while(|c| *c == '\n').count();
        self.trailing_newlines = if trailing == text.chars().count() {
            self.trailing_newlines + trailing
        } else {
            trailing
        };
    }

    fn newline(&mut self) {
        match self.last_insert.and_then(|i| self.ops.get_mut(i)) {
            Some(Operation::InsertText { text, .. }) => text.push('\n'),
            _ => {
                self.ops.push(Operation::InsertText {
                    offset: self.cursor,
                    text: "\n".to_string(),
                });
                self.last_insert = Some(self.ops.len() - 1);
            }
        }
        self.cursor += 1;
        self.trailing_newlines += 1;
    }
}
