//! Drawable primitives of a laid-out diagram.
//!
//! A diagram's scene is a flat list of [`Element`]s in paint order. Each
//! element knows its bounds and how to write itself as SVG.

use std::fmt::{self, Write};

use enum_dispatch::enum_dispatch;

use crate::tree::NodeId;
use crate::types::{Length, MeasuredRect, UnitPoint};

use super::defaults;
use super::geometry::Connector;
use super::node::NodeBlock;
use super::svg::{SvgContext, escape_xml, fmt_num};

/// Common behavior for everything drawn in a diagram
#[enum_dispatch]
pub trait Primitive {
    /// Bounding box in diagram space.
    fn bounds(&self) -> MeasuredRect;

    /// Append this primitive's SVG markup to `out`.
    fn write_svg(&self, out: &mut String, ctx: &SvgContext<'_>) -> fmt::Result;
}

/// A node's content block at its final position.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
    pub id: NodeId,
    pub rect: MeasuredRect,
    pub block: NodeBlock,
}

impl NodeBox {
    /// Baseline positions of the text lines, centered as a group.
    fn line_centers(&self, rect: MeasuredRect) -> impl Iterator<Item = Length> + '_ {
        let line_height = self.block.font_size * defaults::LINE_HEIGHT;
        let count = self.block.lines.len();
        let spread = line_height * (count.saturating_sub(1) as f64 / 2.0);
        let first = rect.anchor(UnitPoint::CENTER).y - spread;
        (0..count).map(move |i| first + line_height * i as f64)
    }
}

impl Primitive for NodeBox {
    fn bounds(&self) -> MeasuredRect {
        self.rect
    }

    fn write_svg(&self, out: &mut String, ctx: &SvgContext<'_>) -> fmt::Result {
        let rect = self.rect.translate(ctx.offset);
        let fill = self.block.fill.as_ref().unwrap_or(&ctx.options.node_fill);
        writeln!(
            out,
            r#"<rect id="{}-node-{}" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            ctx.space,
            self.id.index(),
            fmt_num(rect.min_x().raw()),
            fmt_num(rect.min_y().raw()),
            fmt_num(rect.width().raw()),
            fmt_num(rect.height().raw()),
            fill,
        )?;
        let cx = fmt_num(rect.center_x().raw());
        for (line, y) in self.block.lines.iter().zip(self.line_centers(rect)) {
            writeln!(
                out,
                r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
                cx,
                fmt_num(y.raw()),
                escape_xml(&ctx.options.font_family),
                fmt_num(self.block.font_size.raw()),
                ctx.options.text_color,
                escape_xml(line),
            )?;
        }
        Ok(())
    }
}

impl Primitive for Connector {
    fn bounds(&self) -> MeasuredRect {
        Connector::bounds(self)
    }

    fn write_svg(&self, out: &mut String, ctx: &SvgContext<'_>) -> fmt::Result {
        let line = self.translate(ctx.offset);
        writeln!(
            out,
            r#"<line id="{}-edge-{}-{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            ctx.space,
            self.parent.index(),
            self.child.index(),
            fmt_num(line.from.x.raw()),
            fmt_num(line.from.y.raw()),
            fmt_num(line.to.x.raw()),
            fmt_num(line.to.y.raw()),
            ctx.options.stroke,
            fmt_num(ctx.options.stroke_width),
        )
    }
}

/// A drawable element of a diagram's scene.
#[enum_dispatch(Primitive)]
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    NodeBox,
    Connector,
}

impl Element {
    pub fn as_node(&self) -> Option<&NodeBox> {
        match self {
            Element::NodeBox(node) => Some(node),
            Element::Connector(_) => None,
        }
    }

    pub fn as_connector(&self) -> Option<&Connector> {
        match self {
            Element::Connector(line) => Some(line),
            Element::NodeBox(_) => None,
        }
    }
}
