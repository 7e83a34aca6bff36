//! Default sizes and settings (all in diagram units)

use crate::types::{Color, Length};

/// Horizontal gap between adjacent sibling subtrees.
pub const SIBLING_SPACING: Length = Length::units(20.0);
/// Vertical gap between a node and its row of children.
pub const LEVEL_SPACING: Length = Length::units(20.0);

pub const FONT_SIZE: f64 = 14.0;
/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.25;
/// Padding on every side of a text block.
pub const TEXT_PADDING: f64 = 16.0;

pub const STROKE_WIDTH: f64 = 1.0;
pub const MARGIN: f64 = 16.0;
pub const FONT_FAMILY: &str = "sans-serif";

/// Name of the diagram's local coordinate space; prefixes element ids in SVG.
pub const COORDINATE_SPACE: &str = "treeline";

pub fn node_fill() -> Color {
    Color::Rgb(230, 230, 230)
}

pub fn stroke() -> Color {
    Color::named("black")
}

pub fn text_color() -> Color {
    Color::named("black")
}
