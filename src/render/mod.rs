//! Diagram layout and rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `config`: Layout configuration and policies
//! - `align`: Guide children and the shared centerline
//! - `measure`: Per-pass map of measured rectangles
//! - `geometry`: Connector endpoints
//! - `node`: The node renderer collaborator
//! - `shapes`: Drawable primitives
//! - `svg`: SVG generation
//!
//! Layout runs in two walks over the arena, both with explicit stacks. A
//! post-order walk lays out each subtree in its own local space (top-left at
//! the origin) once all of its children are done, recording its size, its
//! centerline and where each child's subtree sits. A pre-order walk then
//! accumulates those offsets into diagram space, fills the [`RectMap`], and
//! only then draws connectors, so no connector reads an unfinished map.

pub mod align;
pub mod config;
pub mod defaults;
pub mod geometry;
pub mod measure;
pub mod node;
pub mod shapes;
pub mod svg;

pub use align::{Alignment, GuideSet};
pub use config::{ConnectorPolicy, GuideAnchor, LayoutConfig};
pub use geometry::{Connector, connector_points, connectors_for};
pub use measure::RectMap;
pub use node::{NodeBlock, NodeRenderer, TextRenderer, text_width};
pub use shapes::{Element, NodeBox, Primitive};
pub use svg::{SvgOptions, generate_svg};

use crate::errors::{LayoutError, SvgError};
use crate::log::{debug, trace};
use crate::tree::{NodeId, Tree};
use crate::types::{Length, MeasuredRect, Offset, OffsetLen, Point, PtLen, Size, SizeLen};

/// One subtree laid out in its own local space.
#[derive(Clone, Copy, Debug, Default)]
struct SubtreeLayout {
    size: SizeLen,
    /// Horizontal center of this subtree's own node block.
    centerline: Length,
    /// The node's own block, relative to the subtree origin.
    content: MeasuredRect,
}

enum Visit {
    Enter(NodeId),
    Exit(NodeId),
}

/// State shared by one layout pass. Everything is indexed by node id.
struct LayoutPass<'a, T, R: ?Sized> {
    tree: &'a Tree<T>,
    renderer: &'a R,
    config: &'a LayoutConfig,
    blocks: Vec<Option<NodeBlock>>,
    subtrees: Vec<Option<SubtreeLayout>>,
    /// Origin of each subtree in its parent's subtree space.
    offsets: Vec<OffsetLen>,
}

impl<'a, T, R: NodeRenderer<T> + ?Sized> LayoutPass<'a, T, R> {
    fn new(tree: &'a Tree<T>, renderer: &'a R, config: &'a LayoutConfig) -> Self {
        let len = tree.len();
        Self {
            tree,
            renderer,
            config,
            blocks: vec![None; len],
            subtrees: vec![None; len],
            offsets: vec![Offset::default(); len],
        }
    }

    /// Post-order over the whole tree. Blocks are rendered in pre-order.
    fn run(&mut self) -> Result<(), LayoutError> {
        let tree = self.tree;
        let mut stack = vec![Visit::Enter(tree.root())];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    self.render_block(id)?;
                    stack.push(Visit::Exit(id));
                    stack.extend(tree.children(id).iter().rev().map(|&c| Visit::Enter(c)));
                }
                Visit::Exit(id) => self.compose(id),
            }
        }
        Ok(())
    }

    fn render_block(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let Some(value) = self.tree.value(id) else {
            return Ok(());
        };
        let block = self.renderer.render(value);
        block
            .validate()
            .map_err(|source| LayoutError::InvalidBlock { id, source })?;
        self.blocks[id.index()] = Some(block);
        Ok(())
    }

    /// Lay out the subtree at `id`; every child subtree is already done.
    fn compose(&mut self, id: NodeId) {
        let tree = self.tree;
        let content = self.blocks[id.index()]
            .as_ref()
            .map_or(Size::ZERO, |block| block.size);

        let children = tree.children(id);
        let Some(guides) = GuideSet::for_count(children.len()) else {
            trace!(node = %id, w = content.w.raw(), h = content.h.raw(), "leaf");
            self.subtrees[id.index()] = Some(SubtreeLayout {
                size: content,
                centerline: content.w / 2.0,
                content: MeasuredRect::new(Point::default(), content),
            });
            return;
        };

        // Children row, left to right, top-aligned.
        let spacing = self.config.sibling_spacing;
        let mut cells = Vec::with_capacity(children.len());
        let mut cursor = Length::ZERO;
        let mut row_height = Length::ZERO;
        for (index, &child) in children.iter().enumerate() {
            if index > 0 {
                cursor += spacing;
            }
            let sub = self.subtrees[child.index()].unwrap_or_default();
            cells.push((cursor, sub));
            cursor += sub.size.w;
            row_height = row_height.max(sub.size.h);
        }
        let row_width = cursor;

        let anchors: Vec<Length> = cells
            .iter()
            .enumerate()
            .map(|(index, (x, sub))| match guides.alignment_for(index) {
                Alignment::Centerline => match self.config.guide_anchor {
                    GuideAnchor::SubtreeCenter => *x + sub.size.w / 2.0,
                    GuideAnchor::NodeCenter => *x + sub.centerline,
                },
                Alignment::Center => *x + sub.size.w / 2.0,
            })
            .collect();
        let row_centerline = guides
            .centerline(&anchors)
            .unwrap_or(row_width / 2.0);
        debug!(node = %id, ?guides, centerline = row_centerline.raw(), "children row");

        // Stack the node over the row, both aligned on the centerline. If the
        // node is wider than the row's left half, the row shifts right.
        let half = content.w / 2.0;
        let shift = (half - row_centerline).max(Length::ZERO);
        let centerline = row_centerline + shift;
        let node_left = centerline - half;
        let row_top = content.h + self.config.level_spacing;
        let width = (shift + row_width).max(node_left + content.w);
        let height = row_top + row_height;

        for (&child, (x, _)) in children.iter().zip(&cells) {
            self.offsets[child.index()] = Offset::new(shift + *x, row_top);
        }
        trace!(node = %id, w = width.raw(), h = height.raw(), "subtree");
        self.subtrees[id.index()] = Some(SubtreeLayout {
            size: Size::new(width, height),
            centerline,
            content: MeasuredRect::new(Point::new(node_left, Length::ZERO), content),
        });
    }

    /// Pre-order: move every subtree into diagram space.
    fn place(&self) -> (RectMap, RectMap) {
        let tree = self.tree;
        let mut origins: Vec<PtLen> = vec![Point::default(); tree.len()];
        let mut rects = RectMap::new();
        let mut frames = RectMap::new();
        for (id, _) in tree.iter() {
            let origin = match tree.parent_of(id) {
                Some(parent) => origins[parent.index()] + self.offsets[id.index()],
                None => Point::default(),
            };
            origins[id.index()] = origin;
            let Some(sub) = self.subtrees[id.index()] else {
                continue;
            };
            rects.insert(id, sub.content.translate(Offset::new(origin.x, origin.y)));
            frames.insert(id, MeasuredRect::new(origin, sub.size));
        }
        (rects, frames)
    }
}

/// Connectors for every node with children, in pre-order of the source node.
fn draw_connectors<T>(
    tree: &Tree<T>,
    rects: &RectMap,
    policy: ConnectorPolicy,
) -> Vec<Connector> {
    let mut connectors = Vec::with_capacity(tree.edge_count());
    for (id, _) in tree.iter() {
        if tree.children(id).is_empty() {
            continue;
        }
        match policy {
            ConnectorPolicy::DirectChildren => {
                connectors.extend(connectors_for(id, rects, tree.children(id).iter().copied()));
            }
            ConnectorPolicy::AllDescendants => {
                connectors.extend(connectors_for(id, rects, tree.descendants(id)));
            }
        }
    }
    connectors
}

/// A laid-out tree: measured node rectangles plus connector segments.
///
/// ```rust
/// use treeline::{Diagram, LayoutConfig, TextRenderer, Tree, TreeNode};
///
/// let tree: Tree<&str> = TreeNode::new("Root")
///     .child(TreeNode::new("Left"))
///     .child(TreeNode::new("Right"))
///     .into();
/// let diagram = Diagram::layout(&tree, &TextRenderer::default(), &LayoutConfig::default())?;
/// assert_eq!(diagram.rects().len(), 3);
/// assert_eq!(diagram.connectors().len(), 2);
/// # Ok::<(), treeline::LayoutError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Diagram {
    rects: RectMap,
    frames: RectMap,
    blocks: Vec<Option<NodeBlock>>,
    connectors: Vec<Connector>,
    size: SizeLen,
    centerline: Length,
    coordinate_space: String,
}

impl Diagram {
    /// Lay out `tree`, rendering each node's content with `renderer`.
    pub fn layout<T, R>(
        tree: &Tree<T>,
        renderer: &R,
        config: &LayoutConfig,
    ) -> Result<Self, LayoutError>
    where
        R: NodeRenderer<T> + ?Sized,
    {
        config.validate()?;
        let mut pass = LayoutPass::new(tree, renderer, config);
        pass.run()?;
        let root = pass.subtrees[tree.root().index()].unwrap_or_default();
        let (rects, frames) = pass.place();
        let connectors = draw_connectors(tree, &rects, config.connectors);
        debug!(
            nodes = rects.len(),
            connectors = connectors.len(),
            w = root.size.w.raw(),
            h = root.size.h.raw(),
            "diagram laid out"
        );
        Ok(Diagram {
            rects,
            frames,
            blocks: pass.blocks,
            connectors,
            size: root.size,
            centerline: root.centerline,
            coordinate_space: config.coordinate_space.clone(),
        })
    }

    /// Content rectangle of every node, in diagram space.
    pub fn rects(&self) -> &RectMap {
        &self.rects
    }

    pub fn rect(&self, id: NodeId) -> Option<MeasuredRect> {
        self.rects.get(id)
    }

    /// Frame of the whole subtree rooted at `id`.
    pub fn subtree_frame(&self, id: NodeId) -> Option<MeasuredRect> {
        self.frames.get(id)
    }

    pub fn block(&self, id: NodeId) -> Option<&NodeBlock> {
        self.blocks.get(id.index()).and_then(Option::as_ref)
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn size(&self) -> SizeLen {
        self.size
    }

    /// Horizontal position of the root's centerline.
    pub fn centerline(&self) -> Length {
        self.centerline
    }

    pub fn coordinate_space(&self) -> &str {
        &self.coordinate_space
    }

    /// Drawable elements in paint order: connectors first, then node boxes.
    pub fn scene(&self) -> Vec<Element> {
        let lines = self.connectors.iter().copied().map(Element::from);
        let boxes = self.rects.iter().filter_map(|(id, rect)| {
            let block = self.block(id)?.clone();
            Some(Element::from(NodeBox { id, rect, block }))
        });
        lines.chain(boxes).collect()
    }

    pub fn to_svg(&self, options: &SvgOptions) -> Result<String, SvgError> {
        generate_svg(self, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeNode;

    fn fixed(w: f64, h: f64) -> impl Fn(&&str) -> NodeBlock {
        move |v: &&str| NodeBlock::new(w, h).with_text(*v)
    }

    fn layout(tree: &Tree<&str>, config: &LayoutConfig) -> Diagram {
        Diagram::layout(tree, &fixed(40.0, 20.0), config).unwrap()
    }

    #[test]
    fn leaf_root_is_just_its_block() {
        let tree = Tree::new("only");
        let diagram = layout(&tree, &LayoutConfig::default());
        assert_eq!(diagram.rects().len(), 1);
        assert!(diagram.connectors().is_empty());
        assert_eq!(diagram.size(), Size::new(Length(40.0), Length(20.0)));
        assert_eq!(diagram.centerline(), Length(20.0));
        assert_eq!(
            diagram.rect(tree.root()),
            Some(MeasuredRect::from_xywh(0.0, 0.0, 40.0, 20.0))
        );
    }

    #[test]
    fn two_children_center_parent_on_their_midpoint() {
        let tree: Tree<&str> = TreeNode::new("p")
            .child(TreeNode::new("a"))
            .child(TreeNode::new("b"))
            .into();
        let diagram = layout(&tree, &LayoutConfig::default());
        // Row: a at 0..40, b at 60..100. Centerline at 50.
        assert_eq!(
            diagram.rect(NodeId(1)),
            Some(MeasuredRect::from_xywh(0.0, 40.0, 40.0, 20.0))
        );
        assert_eq!(
            diagram.rect(NodeId(2)),
            Some(MeasuredRect::from_xywh(60.0, 40.0, 40.0, 20.0))
        );
        assert_eq!(
            diagram.rect(NodeId(0)),
            Some(MeasuredRect::from_xywh(30.0, 0.0, 40.0, 20.0))
        );
        assert_eq!(diagram.size(), Size::new(Length(100.0), Length(60.0)));
    }

    #[test]
    fn wide_parent_shifts_the_row() {
        let tree: Tree<&str> = TreeNode::new("wide").child(TreeNode::new("c")).into();
        let renderer = |v: &&str| {
            if *v == "wide" {
                NodeBlock::new(100.0, 20.0)
            } else {
                NodeBlock::new(20.0, 20.0)
            }
        };
        let diagram = Diagram::layout(&tree, &renderer, &LayoutConfig::default()).unwrap();
        assert_eq!(
            diagram.rect(NodeId(0)),
            Some(MeasuredRect::from_xywh(0.0, 0.0, 100.0, 20.0))
        );
        assert_eq!(
            diagram.rect(NodeId(1)),
            Some(MeasuredRect::from_xywh(40.0, 40.0, 20.0, 20.0))
        );
        assert_eq!(diagram.size().w, Length(100.0));
        assert_eq!(diagram.centerline(), Length(50.0));
    }

    #[test]
    fn subtree_frames_cover_their_nodes() {
        let tree: Tree<&str> = TreeNode::new("r")
            .child(TreeNode::new("a").child(TreeNode::new("a1")).child(TreeNode::new("a2")))
            .child(TreeNode::new("b"))
            .into();
        let diagram = layout(&tree, &LayoutConfig::default());
        let a = NodeId(1);
        let frame = diagram.subtree_frame(a).unwrap();
        for id in std::iter::once(a).chain(tree.descendants(a)) {
            let rect = diagram.rect(id).unwrap();
            assert_eq!(frame.union(rect), frame, "{id} escapes its subtree frame");
        }
        assert_eq!(
            diagram.subtree_frame(tree.root()),
            Some(MeasuredRect::new(Point::default(), diagram.size()))
        );
    }

    #[test]
    fn invalid_block_is_reported_with_its_node() {
        let tree: Tree<&str> = TreeNode::new("ok").child(TreeNode::new("bad")).into();
        let renderer = |v: &&str| {
            if *v == "bad" {
                NodeBlock::new(f64::INFINITY, 1.0)
            } else {
                NodeBlock::new(1.0, 1.0)
            }
        };
        let err = Diagram::layout(&tree, &renderer, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidBlock { id, .. } if id == NodeId(1)));
    }

    #[test]
    fn scene_paints_connectors_before_boxes() {
        let tree: Tree<&str> = TreeNode::new("p").child(TreeNode::new("c")).into();
        let scene = layout(&tree, &LayoutConfig::default()).scene();
        assert_eq!(scene.len(), 3);
        assert!(scene[0].as_connector().is_some());
        assert!(scene[1].as_node().is_some());
        assert!(scene[2].as_node().is_some());
    }
}
