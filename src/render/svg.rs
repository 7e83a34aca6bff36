//! SVG generation

use std::fmt::Write;

use crate::errors::SvgError;
use crate::log::debug;
use crate::types::{Color, Length, Offset, OffsetLen, Scaler};

use super::Diagram;
use super::defaults;
use super::shapes::Primitive;

/// Presentation settings for [`Diagram::to_svg`].
#[derive(Clone, Debug, PartialEq)]
pub struct SvgOptions {
    /// Blank space around the diagram.
    pub margin: f64,
    pub stroke_width: f64,
    /// Display scale. At 1.0 no explicit `width`/`height` is emitted.
    pub scale: f64,
    /// Connector color.
    pub stroke: Color,
    /// Fill for node blocks that do not pick their own.
    pub node_fill: Color,
    pub text_color: Color,
    pub font_family: String,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            margin: defaults::MARGIN,
            stroke_width: defaults::STROKE_WIDTH,
            scale: 1.0,
            stroke: defaults::stroke(),
            node_fill: defaults::node_fill(),
            text_color: defaults::text_color(),
            font_family: defaults::FONT_FAMILY.to_string(),
        }
    }
}

impl SvgOptions {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_stroke(mut self, stroke: Color, width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = width;
        self
    }

    pub fn with_node_fill(mut self, fill: Color) -> Self {
        self.node_fill = fill;
        self
    }
}

/// Everything a primitive needs to place itself in the output document.
#[derive(Debug)]
pub struct SvgContext<'a> {
    /// Translation from diagram space to document space (the margin).
    pub(crate) offset: OffsetLen,
    pub(crate) options: &'a SvgOptions,
    /// Escaped coordinate-space name, used as the id prefix.
    pub(crate) space: String,
}

/// Serialize a laid-out diagram.
pub fn generate_svg(diagram: &Diagram, options: &SvgOptions) -> Result<String, SvgError> {
    let scaler = Scaler::try_new(options.scale).map_err(|source| SvgError::InvalidScale {
        value: options.scale,
        source,
    })?;
    let margin = Length::try_non_negative(options.margin)
        .map_err(|source| SvgError::InvalidOption { name: "margin", source })?;
    Length::try_non_negative(options.stroke_width).map_err(|source| SvgError::InvalidOption {
        name: "stroke_width",
        source,
    })?;

    let size = diagram.size();
    let view_width = size.w + margin * 2.0;
    let view_height = size.h + margin * 2.0;

    debug!(
        width = view_width.raw(),
        height = view_height.raw(),
        nodes = diagram.rects().len(),
        connectors = diagram.connectors().len(),
        "generate_svg viewBox"
    );

    let mut out = String::new();
    write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}""#,
        fmt_num(view_width.raw()),
        fmt_num(view_height.raw())
    )?;
    if !scaler.is_identity() {
        write!(
            out,
            r#" width="{}" height="{}""#,
            fmt_num(scaler.display(view_width)),
            fmt_num(scaler.display(view_height))
        )?;
    }
    out.push_str(">\n");

    let ctx = SvgContext {
        offset: Offset::new(margin, margin),
        options,
        space: escape_xml(diagram.coordinate_space()),
    };
    writeln!(out, r#"<g id="{}">"#, ctx.space)?;
    for element in diagram.scene() {
        element.write_svg(&mut out, &ctx)?;
    }
    out.push_str("</g>\n</svg>\n");
    Ok(out)
}

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Escape text for use in element content and attribute values, dropping
/// characters XML cannot carry.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_valid_xml_char(c)) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let sig_figs = 6;
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
