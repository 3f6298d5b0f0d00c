use serde::Serialize;

/// Character-level style payload of an `updateTextStyle` request.
///
/// Only populated members are serialized, and [`TextStyle::fields`] names
/// exactly those members.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl TextStyle {
    pub fn bold() -> Self {
        Self {
            bold: Some(true),
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: Some(true),
            ..Self::default()
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self {
            link: Some(Link { url: url.into() }),
            ..Self::default()
        }
    }

    pub fn code(font: &CodeFont) -> Self {
        Self {
            weighted_font_family: Some(WeightedFontFamily {
                font_family: font.family.clone(),
                weight: font.weight,
            }),
            background_color: Some(OptionalColor {
                color: Color {
                    rgb_color: font.background,
                },
            }),
            ..Self::default()
        }
    }

    /// Field mask naming every populated member, in declaration order.
    pub fn fields(&self) -> String {
        let populated = [
            ("bold", self.bold.is_some()),
            ("italic", self.italic.is_some()),
            ("weightedFontFamily", self.weighted_font_family.is_some()),
            ("backgroundColor", self.background_color.is_some()),
            ("link", self.link.is_some()),
        ];
        populated
            .iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    pub font_family: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionalColor {
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
}

/// How inline code spans are rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeFont {
    pub family: String,
    pub weight: u32,
    pub background: RgbColor,
}

impl Default for CodeFont {
    fn default() -> Self {
        Self {
            family: "Consolas".to_string(),
            weight: 400,
            background: RgbColor {
                red: 0.97,
                green: 0.97,
                blue: 0.97,
            },
        }
    }
}

/// Paragraph-level style payload of an `updateParagraphStyle` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<NamedStyleType>,
}

impl ParagraphStyle {
    pub fn named(style: NamedStyleType) -> Self {
        Self {
            named_style_type: Some(style),
        }
    }

    pub fn fields(&self) -> String {
        match self.named_style_type {
            Some(_) => "namedStyleType".to_string(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NamedStyleType {
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
    #[serde(rename = "HEADING_3")]
    Heading3,
    #[serde(rename = "HEADING_4")]
    Heading4,
    #[serde(rename = "HEADING_5")]
    Heading5,
    #[serde(rename = "HEADING_6")]
    Heading6,
}

impl NamedStyleType {
    /// Named style for a Markdown heading level, if the level exists.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            5 => Some(Self::Heading5),
            6 => Some(Self::Heading6),
            _ => None,
        }
    }
}

/// Bullet glyph preset of a `createParagraphBullets` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulletPreset {
    BulletDiscCircleSquare,
    NumberedDecimalAlphaRoman,
}

impl BulletPreset {
    pub fn for_list(ordered: bool) -> Self {
        if ordered {
            Self::NumberedDecimalAlphaRoman
        } else {
            Self::BulletDiscCircleSquare
        }
    }
}
