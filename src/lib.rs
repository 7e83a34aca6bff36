//! Tree diagrams: labeled boxes, children laid out in a row beneath their
//! parent, straight connectors from each parent's bottom edge to its
//! children's top edges.
//!
//! A parent is centered over its *guide* children rather than over the full
//! width of its row: the middle child for an odd number of children, the
//! midpoint between the two middle children for an even number. Node content
//! can be any size; connectors are computed from the measured rectangles.
//!
//! ```rust
//! use treeline::{Tree, TreeNode};
//!
//! let tree: Tree<&str> = TreeNode::new("Root")
//!     .child(TreeNode::new("First Child With Some More Text"))
//!     .child(TreeNode::new("Second"))
//!     .child(TreeNode::new("Third"))
//!     .into();
//! let svg = treeline::render_svg(&tree)?;
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), miette::Report>(())
//! ```
//!
//! For control over sizes, connector policy and output, use
//! [`Diagram::layout`] with a [`NodeRenderer`] and a [`LayoutConfig`], then
//! [`Diagram::to_svg`].

use std::fmt::Display;

pub mod errors;
pub mod log;
pub mod render;
pub mod tree;
pub mod types;

pub use errors::{LayoutError, SvgError, TreeError};
pub use render::{
    Alignment, Connector, ConnectorPolicy, Diagram, Element, GuideAnchor, GuideSet, LayoutConfig,
    NodeBlock, NodeBox, NodeRenderer, Primitive, RectMap, SvgOptions, TextRenderer,
    connector_points,
};
pub use tree::{NodeId, Tree, TreeNode};
pub use types::{Color, Length, MeasuredRect, Offset, Point, Size, UnitPoint};

/// Lay out a tree of displayable values with default settings and render it
/// to SVG.
pub fn render_svg<T: Display>(tree: &Tree<T>) -> Result<String, miette::Report> {
    let diagram = Diagram::layout(tree, &TextRenderer::default(), &LayoutConfig::default())?;
    Ok(diagram.to_svg(&SvgOptions::default())?)
}
