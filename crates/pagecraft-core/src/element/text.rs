//! Text element properties and layout measurement.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
    Handwritten,
}

impl FontFamily {
    /// Get the font family name as used by the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Inter",
            FontFamily::Serif => "Merriweather",
            FontFamily::Mono => "JetBrains Mono",
            FontFamily::Handwritten => "Caveat",
        }
    }

    /// Average glyph advance as a fraction of the font size.
    fn char_width_factor(&self, bold: bool) -> f64 {
        let base = match self {
            FontFamily::Sans => 0.52,
            FontFamily::Serif => 0.55,
            FontFamily::Mono => 0.60,
            FontFamily::Handwritten => 0.48,
        };
        if bold { base + 0.04 } else { base }
    }
}

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Type-specific fields of a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    pub content: String,
    /// Font size in logical pixels.
    pub font_size: f64,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default = "SerializableColor::black")]
    pub color: SerializableColor,
}

impl TextProps {
    /// Default font size for new text elements.
    pub const DEFAULT_FONT_SIZE: f64 = 24.0;

    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: FontFamily::default(),
            text_align: TextAlign::default(),
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            color: SerializableColor::black(),
        }
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }
}

/// A partial update to a text element's formatting.
///
/// `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormat {
    pub content: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<FontFamily>,
    pub text_align: Option<TextAlign>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub color: Option<SerializableColor>,
}

impl TextFormat {
    /// Apply this patch. Returns true if anything affecting layout changed.
    pub fn apply(&self, props: &mut TextProps, min_font_size: f64) -> bool {
        let before = (
            props.content.clone(),
            props.font_size,
            props.font_family,
            props.bold,
            props.italic,
        );

        if let Some(content) = &self.content {
            props.content.clone_from(content);
        }
        if let Some(size) = self.font_size.filter(|s| s.is_finite()) {
            props.font_size = size.max(min_font_size);
        }
        if let Some(family) = self.font_family {
            props.font_family = family;
        }
        if let Some(align) = self.text_align {
            props.text_align = align;
        }
        if let Some(bold) = self.bold {
            props.bold = bold;
        }
        if let Some(italic) = self.italic {
            props.italic = italic;
        }
        if let Some(underline) = self.underline {
            props.underline = underline;
        }
        if let Some(strikethrough) = self.strikethrough {
            props.strikethrough = strikethrough;
        }
        if let Some(color) = self.color {
            props.color = color;
        }

        before
            != (
                props.content.clone(),
                props.font_size,
                props.font_family,
                props.bold,
                props.italic,
            )
    }
}

/// Reports the rendered height of a text block laid out at a given width.
///
/// Hosts with a real text shaper plug it in here; layout always wins over the
/// geometric height a resize computed.
pub trait TextMeasurer {
    fn measure_height(&self, props: &TextProps, width: f64) -> f64;
}

/// Character-count based estimate used when no shaper is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateTextMeasurer;

impl ApproximateTextMeasurer {
    /// Line height as a multiple of font size.
    pub const LINE_HEIGHT: f64 = 1.2;
}

impl TextMeasurer for ApproximateTextMeasurer {
    fn measure_height(&self, props: &TextProps, width: f64) -> f64 {
        let char_width = props.font_size * props.font_family.char_width_factor(props.bold);
        let chars_per_line = if char_width > 0.0 && width.is_finite() && width > 0.0 {
            (width / char_width).floor().max(1.0)
        } else {
            1.0
        };

        // Wrapped line count per hard line; an empty line still takes one row
        let mut lines: f64 = props
            .content
            .lines()
            .map(|line| (line.chars().count() as f64 / chars_per_line).ceil().max(1.0))
            .sum();
        if props.content.ends_with('\n') {
            lines += 1.0;
        }
        lines.max(1.0) * props.font_size * Self::LINE_HEIGHT
    }
}
