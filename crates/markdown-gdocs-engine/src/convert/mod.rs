//! Markdown tree to operation list compiler.
//!
//! Data flows one way: each node is classified ([`classify`]), the
//! [`Walker`] drives the block and inline context stacks while advancing the
//! cursor, and [`sequence`] puts the finished list into submission order.

pub mod classify;
pub mod sequence;
pub mod stack;
pub mod walker;

use crate::error::ConvertError;
use crate::ops::{CodeFont, Operation};
use crate::tree::{DocumentTree, parse_markdown};

pub use classify::{BlockRole, Treatment, classify};
pub use sequence::sequence;
pub use walker::Walker;

/// Index of the first character of a document body.
pub const FIRST_INDEX: usize = 1;

/// Style choices that are not dictated by the Markdown itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    pub code_font: CodeFont,
}

/// Convert a parsed tree into a submission-ordered operation list.
///
/// On error nothing is returned; a half-converted document is never handed
/// to the caller.
pub fn convert(
    tree: &DocumentTree,
    options: &ConvertOptions,
) -> Result<Vec<Operation>, ConvertError> {
    let ops = Walker::new(tree, options).run()?;
    Ok(sequence(ops))
}

/// Parse and convert in one step.
pub fn markdown_to_operations(
    markdown: &str,
    options: &ConvertOptions,
) -> Result<Vec<Operation>, ConvertError> {
    convert(&parse_markdown(markdown), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{BulletPreset, IndexRange, NamedStyleType, ParagraphStyle, TextStyle};
    use crate::tests::{convert_md, document_text, inserts, styles};
    use crate::tree::NodeKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn range(start: usize, end: usize) -> IndexRange {
        IndexRange { start, end }
    }

    #[test]
    fn heading_then_body() {
        let ops = convert_md("# Title\n\nBody text");
        assert_eq!(
            inserts(&ops),
            vec![(1, "Title\n\n".to_string()), (8, "Body text\n".to_string())]
        );
        assert_eq!(
            styles(&ops),
            vec![Operation::SetParagraphStyle {
                range: range(1, 6),
                style: ParagraphStyle::named(NamedStyleType::Heading1),
            }]
        );
    }

    #[test]
    fn plain_paragraphs_are_separated_by_blank_lines() {
        let ops = convert_md("One\n\nTwo\n\nThree");
        let offsets: Vec<usize> = inserts(&ops).into_iter().map(|(o, _)| o).collect();
        assert_eq!(offsets, vec![1, 6, 11]);
        assert_eq!(document_text(&ops), "One\n\nTwo\n\nThree\n");
        assert!(styles(&ops).is_empty());
    }

    #[rstest]
    #[case("Some **bold** text", TextStyle::bold())]
    #[case("Some *slanted* text", TextStyle::italic())]
    #[case("Some [site](https://example.com) text", TextStyle::link("https://example.com"))]
    fn inline_span_styles_its_own_run(#[case] markdown: &str, #[case] style: TextStyle) {
        let ops = convert_md(markdown);
        let text = document_text(&ops);
        let start = text.find(" text").unwrap();
        assert_eq!(
            styles(&ops),
            vec![Operation::SetTextStyle {
                range: range(6, start + 1),
                style,
            }]
        );
    }

    #[test]
    fn heading_with_inline_code_keeps_style_order() {
        let ops = convert_md("## Use `cargo`");
        assert_eq!(
            inserts(&ops),
            vec![(1, "Use ".to_string()), (5, "cargo\n".to_string())]
        );
        let styles = styles(&ops);
        assert_eq!(styles.len(), 2);
        assert!(matches!(
            &styles[0],
            Operation::SetTextStyle { range: r, style } if *r == range(5, 10)
                && style.weighted_font_family.is_some()
        ));
        assert_eq!(
            styles[1],
            Operation::SetParagraphStyle {
                range: range(1, 10),
                style: ParagraphStyle::named(NamedStyleType::Heading2),
            }
        );
    }

    #[test]
    fn two_level_list_emits_one_bullet_range_per_level() {
        let ops = convert_md("- a\n  - b\n- c\n");
        assert_eq!(document_text(&ops), "a\nb\nc\n\n");
        assert_eq!(
            styles(&ops),
            vec![
                Operation::SetListBullets {
                    range: range(3, 5),
                    preset: BulletPreset::BulletDiscCircleSquare,
                },
                Operation::SetListBullets {
                    range: range(1, 7),
                    preset: BulletPreset::BulletDiscCircleSquare,
                },
            ]
        );
    }

    #[test]
    fn three_level_list_closes_levels_innermost_first() {
        let ops = convert_md("- a\n  - b\n    - c\n- d\n");
        assert_eq!(document_text(&ops), "a\nb\nc\nd\n\n");
        let ranges: Vec<IndexRange> = styles(&ops).iter().filter_map(Operation::range).collect();
        assert_eq!(ranges, vec![range(5, 7), range(3, 7), range(1, 9)]);
    }

    #[test]
    fn ordered_list_uses_numbered_preset() {
        let ops = convert_md("1. one\n2. two\n");
        assert_eq!(
            inserts(&ops),
            vec![(1, "one\n".to_string()), (5, "two\n\n".to_string())]
        );
        assert_eq!(
            styles(&ops),
            vec![Operation::SetListBullets {
                range: range(1, 9),
                preset: BulletPreset::NumberedDecimalAlphaRoman,
            }]
        );
    }

    #[test]
    fn mixed_nesting_keeps_a_preset_per_level() {
        let ops = convert_md("1. one\n   - inner\n2. two\n");
        let presets: Vec<BulletPreset> = styles(&ops)
            .iter()
            .filter_map(|op| match op {
                Operation::SetListBullets { preset, .. } => Some(*preset),
                _ => None,
            })
            .collect();
        assert_eq!(
            presets,
            vec![
                BulletPreset::BulletDiscCircleSquare,
                BulletPreset::NumberedDecimalAlphaRoman
            ]
        );
    }

    #[test]
    fn loose_and_tight_lists_convert_alike() {
        assert_eq!(convert_md("- a\n\n- b\n"), convert_md("- a\n- b\n"));
    }

    #[test]
    fn list_after_paragraph_needs_no_separator() {
        let ops = convert_md("Intro\n\n- x\n");
        assert_eq!(
            inserts(&ops),
            vec![(1, "Intro\n".to_string()), (7, "x\n\n".to_string())]
        );
        assert_eq!(
            styles(&ops),
            vec![Operation::SetListBullets {
                range: range(7, 9),
                preset: BulletPreset::BulletDiscCircleSquare,
            }]
        );
    }

    #[test]
    fn paragraph_after_list_reuses_trailing_blank_line() {
        let ops = convert_md("- x\n\nAfter\n");
        assert_eq!(document_text(&ops), "x\n\nAfter\n");
    }

    #[test]
    fn empty_middle_item_keeps_its_bullet_line() {
        let ops = convert_md("- a\n-\n- c\n");
        assert_eq!(
            inserts(&ops),
            vec![(1, "a\n\n".to_string()), (4, "c\n\n".to_string())]
        );
        assert_eq!(
            styles(&ops),
            vec![Operation::SetListBullets {
                range: range(1, 6),
                preset: BulletPreset::BulletDiscCircleSquare,
            }]
        );
    }

    #[test]
    fn badge_link_does_not_style_following_text() {
        let ops = convert_md("[![badge](b.svg)](https://ci.example) plain text");
        assert_eq!(inserts(&ops), vec![(1, " plain text\n".to_string())]);
        assert!(styles(&ops).is_empty());
    }

    #[test]
    fn adjacent_badge_links_convert() {
        let ops = convert_md("[![a](a.svg)](https://a.example)[![b](b.svg)](https://b.example)");
        assert_eq!(
            ops,
            vec![Operation::InsertText {
                offset: 1,
                text: "\n".to_string(),
            }]
        );
    }

    #[test]
    fn empty_link_then_real_link_styles_only_the_second() {
        let ops = convert_md("[](https://a.example)[site](https://b.example)");
        assert_eq!(
            styles(&ops),
            vec![Operation::SetTextStyle {
                range: range(1, 5),
                style: TextStyle::link("https://b.example"),
            }]
        );
    }

    #[test]
    fn blockquote_renders_as_paragraph_break() {
        let ops = convert_md("> quoted\n\nAfter");
        assert_eq!(
            inserts(&ops),
            vec![(1, "quoted\n\n".to_string()), (9, "After\n".to_string())]
        );
        assert!(styles(&ops).is_empty());
    }

    #[test]
    fn rules_images_and_comments_are_dropped() {
        let ops = convert_md("Above\n\n---\n\nBelow ![pic](p.png) <!-- note -->end");
        let text = document_text(&ops);
        assert_eq!(text, "Above\n\nBelow  end\n");
        assert!(!text.contains("note"));
    }

    #[test]
    fn html_block_comment_leaves_surrounding_text_verbatim() {
        let ops = convert_md(
            "This is a file with a comment.\n\n<!-- This is a comment -->\n\nBut this is not removed.\n",
        );
        let text = document_text(&ops);
        assert!(!text.contains("This is a comment"));
        assert_eq!(
            text,
            "This is a file with a comment.\n\nBut this is not removed.\n"
        );
    }

    #[test]
    fn offsets_count_utf16_units() {
        let ops = convert_md("😀 ok\n\nNext");
        assert_eq!(
            inserts(&ops),
            vec![(1, "😀 ok\n\n".to_string()), (8, "Next\n".to_string())]
        );
    }

    #[test]
    fn empty_document_has_no_operations() {
        assert!(convert_md("").is_empty());
        assert!(convert_md("<!-- only a comment -->\n").is_empty());
    }

    #[test]
    fn unsupported_kind_fails_whole_conversion() {
        let result = markdown_to_operations("Intro\n\n```\ncode\n```\n", &ConvertOptions::default());
        assert_eq!(
            result,
            Err(ConvertError::UnsupportedNodeKind {
                kind: NodeKind::Other("CodeBlock".into()),
                offset: 7,
            })
        );
    }

    #[test]
    fn stacked_inline_styles_fail() {
        let result = markdown_to_operations("***both***", &ConvertOptions::default());
        assert!(matches!(
            result,
            Err(ConvertError::UnsupportedNesting { .. })
        ));
    }

    #[test]
    fn inline_style_ends_with_first_text_run() {
        let ops = convert_md("**bold `code` more**");
        // bold covers only "bold "; the code span opens its own context
        let styles = styles(&ops);
        assert_eq!(
            styles[0],
            Operation::SetTextStyle {
                range: range(1, 6),
                style: TextStyle::bold(),
            }
        );
        assert_eq!(document_text(&ops), "bold code more\n");
    }
}
