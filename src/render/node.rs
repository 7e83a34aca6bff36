//! Node content: the collaborator that turns a value into a measurable block.

use std::fmt::Display;

use crate::types::{Color, Length, NumericError, Size, SizeLen};

use super::defaults;

/// The rendered content of one node: a measured box with optional text.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBlock {
    pub size: SizeLen,
    /// Text lines drawn centered in the box, top to bottom.
    pub lines: Vec<String>,
    pub font_size: Length,
    /// Background fill. `None` uses the SVG default node fill.
    pub fill: Option<Color>,
}

impl NodeBlock {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(Length(width), Length(height)),
            lines: Vec::new(),
            font_size: Length(defaults::FONT_SIZE),
            fill: None,
        }
    }

    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.lines = text.as_ref().lines().map(str::to_string).collect();
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Length(size);
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), NumericError> {
        self.size.validate()?;
        Ok(())
    }
}

/// Maps a node's value to its content block.
///
/// Any `Fn(&T) -> NodeBlock` is a renderer:
///
/// ```rust
/// use treeline::{Diagram, LayoutConfig, NodeBlock, Tree};
///
/// let tree = Tree::new(3_u32);
/// let renderer = |v: &u32| NodeBlock::new(20.0 * f64::from(*v), 30.0);
/// let diagram = Diagram::layout(&tree, &renderer, &LayoutConfig::default()).unwrap();
/// assert_eq!(diagram.size().w.raw(), 60.0);
/// ```
pub trait NodeRenderer<T: ?Sized> {
    fn render(&self, value: &T) -> NodeBlock;
}

impl<T: ?Sized, F> NodeRenderer<T> for F
where
    F: Fn(&T) -> NodeBlock,
{
    fn render(&self, value: &T) -> NodeBlock {
        self(value)
    }
}

/// Proportional character widths in hundredths of the base character width,
/// for printable ASCII starting at space.
#[rustfmt::skip]
const CHAR_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Base character width as a fraction of the font size.
const CHAR_WIDTH_PER_EM: f64 = 0.08 / 0.14;

/// Estimated advance of `text` in hundredths of a base character.
fn text_units(text: &str) -> u32 {
    text.chars()
        .map(|c| match c {
            ' '..='~' => u32::from(CHAR_WIDTHS[c as usize - 0x20]),
            _ => 100,
        })
        .sum()
}

/// Estimated width of one line of text at `font_size`.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    f64::from(text_units(text)) * 0.01 * CHAR_WIDTH_PER_EM * font_size
}

/// Renders any `Display` value as padded text on a filled box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRenderer {
    pub font_size: f64,
    pub padding: f64,
    pub fill: Option<Color>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            font_size: defaults::FONT_SIZE,
            padding: defaults::TEXT_PADDING,
            fill: None,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Size of the padded box around `text`.
    pub fn measure(&self, text: &str) -> SizeLen {
        let line_count = text.lines().count().max(1);
        let widest = text
            .lines()
            .map(|line| text_width(line, self.font_size))
            .fold(0.0, f64::max);
        let text_height = line_count as f64 * self.font_size * defaults::LINE_HEIGHT;
        Size::new(
            Length(widest + 2.0 * self.padding),
            Length(text_height + 2.0 * self.padding),
        )
    }
}

impl<T: Display + ?Sized> NodeRenderer<T> for TextRenderer {
    fn render(&self, value: &T) -> NodeBlock {
        let text = value.to_string();
        NodeBlock {
            size: self.measure(&text),
            lines: text.lines().map(str::to_string).collect(),
            font_size: Length(self.font_size),
            fill: self.fill.clone(),
        }
    }
}
