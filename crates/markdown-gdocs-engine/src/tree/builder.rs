use std::ops::Range;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};

use super::{Attributes, DocumentTree, NodeId, NodeKind, ParsedNode};

/// Parse Markdown into an annotated [`DocumentTree`].
///
/// Every construct produces a node: anything without a dedicated
/// [`NodeKind`] becomes [`NodeKind::Other`] carrying the parser's tag name,
/// so rejecting it is left to the converter.
///
/// # Pulldown-cmark event flow
///
/// Containers arrive as `Start(tag)` / `End(tag)` pairs and their content in
/// between, so a nested list appears between the parent item's text and the
/// parent's `End(Item)`:
///
/// ```markdown
/// - Parent
///   - Child
/// ```
///
/// `Start(List)`, `Start(Item)`, `Text("Parent")`, `Start(List)`,
/// `Start(Item)`, `Text("Child")`, `End(Item)`, `End(List)`, `End(Item)`,
/// `End(List)`.
///
/// The builder keeps a stack of open node ids mirroring that nesting.
pub fn parse_markdown(markdown: &str) -> DocumentTree {
    let mut builder = TreeBuilder::new(markdown.len());

    for (event, range) in Parser::new_ext(markdown, Options::empty()).into_offset_iter() {
        builder.push(event, range);
    }

    builder.finish()
}

struct TreeBuilder {
    nodes: Vec<ParsedNode>,
    /// Ids of nodes whose `End` has not arrived yet. The root is always first.
    open: Vec<NodeId>,
    /// Nesting depth inside an image; alt text events are dropped.
    image_depth: usize,
    /// Set while an inline HTML comment continues across events.
    in_comment: bool,
    /// Raw HTML of the block currently being collected.
    html_block: Option<(Range<usize>, String)>,
}

impl TreeBuilder {
    fn new(source_len: usize) -> Self {
        let mut root = ParsedNode::new(NodeKind::Document, false, 0..source_len);
        root.last_descendant = DocumentTree::ROOT;
        Self {
            nodes: vec![root],
            open: vec![DocumentTree::ROOT],
            image_depth: 0,
            in_comment: false,
            html_block: None,
        }
    }

    fn push(&mut self, event: Event<'_>, range: Range<usize>) {
        if self.image_depth > 0 {
            self.skip_image_content(&event);
            return;
        }

        if self.in_comment {
            if let Event::InlineHtml(html) | Event::Html(html) = &event
                && html.contains("-->")
            {
                self.in_comment = false;
            }
            return;
        }

        match event {
            Event::Start(Tag::HtmlBlock) => {
                self.html_block = Some((range, String::new()));
            }
            Event::Html(html) => {
                if let Some((_, buf)) = &mut self.html_block {
                    buf.push_str(&html);
                }
            }
            Event::End(_) if self.html_block.is_some() => self.finish_html_block(),
            Event::Start(tag) => self.start(tag, range),
            Event::End(_) => self.end(),
            Event::Text(text) => self.text(text, range),
            Event::Code(code) => {
                let attributes = Attributes {
                    content: Some(code.to_string()),
                    ..Attributes::default()
                };
                self.leaf(
                    ParsedNode::new(NodeKind::Code, true, range).with_attributes(attributes),
                );
            }
            Event::InlineHtml(html) => {
                if html.trim_start().starts_with("<!--") {
                    self.in_comment = !html.contains("-->");
                    self.leaf(ParsedNode::new(NodeKind::Comment, true, range));
                } else {
                    self.leaf(ParsedNode::new(
                        NodeKind::Other("InlineHtml".into()),
                        true,
                        range,
                    ));
                }
            }
            Event::SoftBreak => self.leaf(ParsedNode::new(NodeKind::SoftBreak, true, range)),
            Event::Rule => self.leaf(ParsedNode::new(NodeKind::HorizontalRule, false, range)),
            other => {
                let kind = NodeKind::Other(label(&other));
                self.leaf(ParsedNode::new(kind, true, range));
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>, range: Range<usize>) {
        let mut attributes = Attributes::default();
        let (kind, inline) = match tag {
            Tag::Paragraph => (NodeKind::Paragraph, false),
            Tag::Heading { level, .. } => {
                attributes.level = Some(level as u8);
                (NodeKind::Heading, false)
            }
            Tag::BlockQuote(_) => (NodeKind::Blockquote, false),
            Tag::List(first_number) => {
                attributes.ordered = first_number.is_some();
                (NodeKind::List, false)
            }
            Tag::Item => (NodeKind::Item, false),
            Tag::Emphasis => (NodeKind::Emphasis, true),
            Tag::Strong => (NodeKind::Strong, true),
            Tag::Link { dest_url, .. } => {
                attributes.href = Some(dest_url.to_string());
                (NodeKind::Link, true)
            }
            Tag::Image { .. } => {
                self.open(ParsedNode::new(NodeKind::Image, true, range));
                self.image_depth = 1;
                return;
            }
            other @ Tag::Strikethrough => (NodeKind::Other(label(&other)), true),
            other => (NodeKind::Other(label(&other)), false),
        };

        self.open(ParsedNode::new(kind, inline, range).with_attributes(attributes));
    }

    fn end(&mut self) {
        self.close_inline_wrapper();
        self.close();
    }

    fn text(&mut self, text: CowStr<'_>, range: Range<usize>) {
        self.ensure_inline_wrapper(range.start);
        let parent = self.current();

        // The parser may split one run into several events; keep it whole.
        if let Some(last) = self.nodes.last_mut()
            && last.kind == NodeKind::Text
            && last.parent == Some(parent)
            && let Some(content) = &mut last.attributes.content
        {
            content.push_str(&text);
            last.location.end = range.end;
            return;
        }

        let attributes = Attributes {
            content: Some(text.to_string()),
            ..Attributes::default()
        };
        self.leaf(ParsedNode::new(NodeKind::Text, true, range).with_attributes(attributes));
    }

    fn skip_image_content(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(_) => self.image_depth += 1,
            Event::End(_) => {
                self.image_depth -= 1;
                if self.image_depth == 0 {
                    self.close();
                }
            }
            _ => {}
        }
    }

    fn finish_html_block(&mut self) {
        let Some((range, html)) = self.html_block.take() else {
            return;
        };
        let trimmed = html.trim();
        let kind = if trimmed.starts_with("<!--") && trimmed.ends_with("-->") {
            NodeKind::Comment
        } else {
            NodeKind::Other("HtmlBlock".into())
        };
        self.leaf(ParsedNode::new(kind, false, range));
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(DocumentTree::ROOT)
    }

    fn open(&mut self, node: ParsedNode) {
        let id = self.append(node);
        self.open.push(id);
    }

    fn leaf(&mut self, node: ParsedNode) {
        self.append(node);
    }

    /// Adds `node` under the current parent, first opening or closing the
    /// inline wrapper so inline runs are grouped under one `Inline` node.
    fn append(&mut self, mut node: ParsedNode) -> NodeId {
        if node.inline {
            self.ensure_inline_wrapper(node.location.start);
        } else {
            self.close_inline_wrapper();
        }

        let id = self.nodes.len();
        node.parent = Some(self.current());
        node.last_descendant = id;
        self.nodes.push(node);
        id
    }

    fn ensure_inline_wrapper(&mut self, start: usize) {
        let parent = &self.nodes[self.current()];
        if parent.inline {
            return;
        }
        let id = self.nodes.len();
        let mut wrapper = ParsedNode::new(NodeKind::Inline, true, start..start);
        wrapper.parent = Some(self.current());
        wrapper.last_descendant = id;
        self.nodes.push(wrapper);
        self.open.push(id);
    }

    fn close_inline_wrapper(&mut self) {
        if self.nodes[self.current()].kind == NodeKind::Inline {
            self.close();
        }
    }

    fn close(&mut self) {
        if self.open.len() <= 1 {
            return;
        }
        let Some(id) = self.open.pop() else {
            return;
        };
        let last = self.nodes.len() - 1;
        let last_end = self.nodes[last].location.end;
        let node = &mut self.nodes[id];
        node.last_descendant = last;
        if node.kind == NodeKind::Inline {
            node.location.end = last_end;
        }
    }

    fn finish(mut self) -> DocumentTree {
        while self.open.len() > 1 {
            self.close();
        }
        let last = self.nodes.len() - 1;
        self.nodes[DocumentTree::ROOT].last_descendant = last;
        DocumentTree::from_nodes(self.nodes)
    }
}

/// Variant name of a parser value, e.g. `CodeBlock` for
/// `Tag::CodeBlock(Fenced("rust"))`.
fn label(value: &impl std::fmt::Debug) -> String {
    let debug = format!("{value:?}");
    debug
        .split(['(', ' ', '{'])
        .next()
        .unwrap_or_default()
        .to_string()
}
