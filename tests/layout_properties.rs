//! Layout properties of whole diagrams.
//!
//! Run with `cargo test --features tracing -- --nocapture` and `RUST_LOG=treeline=trace`
//! to see the layout log.

use treeline::{
    ConnectorPolicy, Diagram, GuideAnchor, GuideSet, LayoutConfig, Length, MeasuredRect,
    NodeBlock, NodeId, Point, TextRenderer, Tree, TreeNode, UnitPoint,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Width taken from the label: "w<N>" is N units wide, anything else 40.
fn sized(label: &&str) -> NodeBlock {
    let width = label
        .strip_prefix('w')
        .and_then(|n| n.parse::<f64>().ok())
        .unwrap_or(40.0);
    NodeBlock::new(width, 20.0).with_text(*label)
}

fn layout(tree: &Tree<&str>, config: &LayoutConfig) -> Diagram {
    init_tracing();
    Diagram::layout(tree, &sized, config).expect("layout failed")
}

fn sample() -> Tree<&'static str> {
    TreeNode::with_children(
        "Root",
        vec![
            TreeNode::new("First Child With Some More Text"),
            TreeNode::new("Second"),
            TreeNode::new("Third"),
            TreeNode::with_children(
                "A forth child",
                vec![
                    TreeNode::new("Level 3 One"),
                    TreeNode::new("Level 3 Two"),
                    TreeNode::new("Level 3 Two"),
                    TreeNode::new("Level 3 Two"),
                ],
            ),
        ],
    )
    .into()
}

/// Root with children [A, B, C]; B has [B1, B2]; C has [C1].
fn three_levels() -> Tree<&'static str> {
    TreeNode::new("R")
        .child(TreeNode::new("A"))
        .child(TreeNode::new("B").child(TreeNode::new("B1")).child(TreeNode::new("B2")))
        .child(TreeNode::new("C").child(TreeNode::new("C1")))
        .into()
}

fn rect(diagram: &Diagram, id: NodeId) -> MeasuredRect {
    diagram.rect(id).expect("node was not measured")
}

const EPSILON: f64 = 1e-9;

fn assert_close(a: Length, b: Length) {
    assert!((a.raw() - b.raw()).abs() < EPSILON, "{a} != {b}");
}

fn assert_point_close(a: Point<Length>, b: Point<Length>) {
    assert_close(a.x, b.x);
    assert_close(a.y, b.y);
}

#[test]
fn guide_set_sizes_follow_parity() {
    for n in 1..=6 {
        let guides = GuideSet::for_count(n).unwrap();
        assert_eq!(guides.len(), if n % 2 == 0 { 2 } else { 1 }, "n = {n}");
        assert!(guides.contains(n / 2));
        if n % 2 == 0 {
            assert!(guides.contains(n / 2 - 1));
        }
    }
}

#[test]
fn single_node_has_one_rect_and_no_connectors() {
    let tree = Tree::new("alone");
    let diagram = layout(&tree, &LayoutConfig::default());
    assert_eq!(diagram.rects().len(), 1);
    assert!(diagram.connectors().is_empty());
}

#[test]
fn odd_children_center_parent_over_middle_child() {
    let tree: Tree<&str> = TreeNode::new("w30")
        .child(TreeNode::new("w100"))
        .child(TreeNode::new("w30"))
        .child(TreeNode::new("w60"))
        .into();
    let diagram = layout(&tree, &LayoutConfig::default());
    let root = tree.root();
    let c2 = tree.children(root)[1];

    assert_eq!(GuideSet::for_count(3), Some(GuideSet::Single(1)));
    assert_eq!(rect(&diagram, root).center_x(), rect(&diagram, c2).center_x());
    assert_eq!(diagram.centerline(), rect(&diagram, c2).center_x());
    // Not the center of the whole row.
    assert_ne!(rect(&diagram, root).center_x(), diagram.size().w / 2.0);
}

#[test]
fn even_children_center_parent_between_middle_children() {
    let tree: Tree<&str> = TreeNode::new("w30")
        .child(TreeNode::new("w100"))
        .child(TreeNode::new("w20"))
        .child(TreeNode::new("w60"))
        .child(TreeNode::new("w10"))
        .into();
    let diagram = layout(&tree, &LayoutConfig::default());
    let root = tree.root();
    let kids = tree.children(root);

    assert_eq!(GuideSet::for_count(4), Some(GuideSet::Pair(2, 1)));
    let c2 = rect(&diagram, kids[1]).center_x();
    let c3 = rect(&diagram, kids[2]).center_x();
    assert_eq!(rect(&diagram, root).center_x(), (c2 + c3) / 2.0);
}

#[test]
fn guide_anchor_picks_subtree_or_node_center() {
    // X's own box sits right of its subtree center because its wide first
    // child pulls the subtree frame left.
    let tree: Tree<&str> = TreeNode::new("R")
        .child(TreeNode::new("X").child(TreeNode::new("w100")).child(TreeNode::new("w20")))
        .into();
    let x = tree.children(tree.root())[0];

    let by_subtree = layout(&tree, &LayoutConfig::default());
    let frame = by_subtree.subtree_frame(x).unwrap();
    assert_eq!(rect(&by_subtree, tree.root()).center_x(), frame.center_x());
    assert_ne!(rect(&by_subtree, x).center_x(), frame.center_x());

    let by_node = layout(
        &tree,
        &LayoutConfig::default().with_guide_anchor(GuideAnchor::NodeCenter),
    );
    assert_eq!(
        rect(&by_node, tree.root()).center_x(),
        rect(&by_node, x).center_x()
    );
}

#[test]
fn connectors_run_bottom_center_to_top_center() {
    let tree = sample();
    let diagram = Diagram::layout(&tree, &TextRenderer::default(), &LayoutConfig::default())
        .expect("layout failed");
    for line in diagram.connectors() {
        let parent = rect(&diagram, line.parent);
        let child = rect(&diagram, line.child);
        assert_point_close(line.from, parent.anchor(UnitPoint::BOTTOM));
        assert_point_close(line.to, child.anchor(UnitPoint::TOP));
        assert!(line.to.y > line.from.y);
    }
}

#[test]
fn direct_children_policy_draws_one_line_per_edge() {
    let tree = three_levels();
    let diagram = layout(&tree, &LayoutConfig::default());
    assert_eq!(tree.edge_count(), 6);
    assert_eq!(diagram.connectors().len(), 6);
    for line in diagram.connectors() {
        assert_eq!(tree.parent_of(line.child), Some(line.parent));
    }
}

#[test]
fn all_descendants_policy_draws_one_line_per_ancestor_pair() {
    let tree = three_levels();
    let config = LayoutConfig::default().with_connectors(ConnectorPolicy::AllDescendants);
    let diagram = layout(&tree, &config);
    // R reaches 6 nodes, B reaches 2, C reaches 1.
    assert_eq!(tree.descendant_count(), 9);
    assert_eq!(diagram.connectors().len(), 9);
    let from_root = diagram
        .connectors()
        .iter()
        .filter(|line| line.parent == tree.root())
        .count();
    assert_eq!(from_root, 6);
}

#[test]
fn layout_is_idempotent() {
    let tree = sample();
    let renderer = TextRenderer::default();
    let config = LayoutConfig::default();
    let first = Diagram::layout(&tree, &renderer, &config).unwrap();
    let second = Diagram::layout(&tree, &renderer, &config).unwrap();
    assert_eq!(first.rects(), second.rects());
    assert_eq!(first.connectors(), second.connectors());
    assert_eq!(first, second);
}

#[test]
fn siblings_are_spaced_and_never_overlap() {
    let tree = sample();
    let config = LayoutConfig::default().with_sibling_spacing(12.0);
    let diagram = Diagram::layout(&tree, &TextRenderer::default(), &config).unwrap();
    for (id, _) in tree.iter() {
        for pair in tree.children(id).windows(2) {
            let left = diagram.subtree_frame(pair[0]).unwrap();
            let right = diagram.subtree_frame(pair[1]).unwrap();
            assert_close(right.min_x() - left.max_x(), Length(12.0));
            assert!(rect(&diagram, pair[0]).max_x() < rect(&diagram, pair[1]).min_x());
        }
    }
}

#[test]
fn children_sit_one_level_gap_below_parent() {
    let tree = three_levels();
    let config = LayoutConfig::default().with_level_spacing(35.0);
    let diagram = layout(&tree, &config);
    for (id, _) in tree.iter() {
        let parent = rect(&diagram, id);
        for &child in tree.children(id) {
            assert_eq!(rect(&diagram, child).min_y(), parent.max_y() + Length(35.0));
        }
    }
}

#[test]
fn every_node_fits_inside_the_diagram() {
    let tree = sample();
    let diagram = Diagram::layout(&tree, &TextRenderer::default(), &LayoutConfig::default())
        .unwrap();
    let bounds = diagram.rects().bounds().unwrap();
    assert!(bounds.min_x().raw() > -EPSILON);
    assert!(bounds.min_y().raw() > -EPSILON);
    assert!(bounds.max_x().raw() < diagram.size().w.raw() + EPSILON);
    assert!(bounds.max_y().raw() < diagram.size().h.raw() + EPSILON);
    assert_eq!(diagram.rects().len(), tree.len());
}

#[test]
fn edited_tree_gets_a_fresh_measurement() {
    let mut tree = three_levels();
    let before = layout(&tree, &LayoutConfig::default());
    let a = tree.children(tree.root())[0];
    let added = tree.push_child(a, "A1").unwrap();
    let after = layout(&tree, &LayoutConfig::default());

    assert!(before.rect(added).is_none());
    assert!(after.rect(added).is_some());
    assert_eq!(after.rects().len(), before.rects().len() + 1);
    assert_eq!(after.connectors().len(), before.connectors().len() + 1);
}

#[test]
fn invalid_spacing_is_rejected() {
    let tree = three_levels();
    let config = LayoutConfig::default().with_sibling_spacing(-4.0);
    let err = Diagram::layout(&tree, &sized, &config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid sibling_spacing: value is negative"
    );
}

#[test]
fn connectors_end_on_the_child_box_not_its_subtree_frame() {
    // X's box sits 20 units right of its subtree center.
    let tree: Tree<&str> = TreeNode::new("R")
        .child(TreeNode::new("X").child(TreeNode::new("w100")).child(TreeNode::new("w20")))
        .into();
    let x = tree.children(tree.root())[0];
    let diagram = layout(&tree, &LayoutConfig::default());
    let line = diagram.connectors().iter().find(|l| l.child == x).unwrap();
    let frame = diagram.subtree_frame(x).unwrap();

    assert_eq!(line.to, rect(&diagram, x).anchor(UnitPoint::TOP));
    assert_eq!(line.to.x - frame.center_x(), Length(20.0));
}

#[test]
fn wide_star_lays_out_every_leaf() {
    let leaves = 20_000;
    let mut tree = Tree::new("root");
    for _ in 0..leaves {
        tree.push_child(tree.root(), "leaf").unwrap();
    }
    let diagram = layout(&tree, &LayoutConfig::default());

    assert_eq!(diagram.rects().len(), leaves + 1);
    assert_eq!(diagram.connectors().len(), leaves);
    // 40 wide, 20 apart.
    let last = *tree.children(tree.root()).last().unwrap();
    assert_eq!(rect(&diagram, last).min_x(), Length(60.0 * (leaves - 1) as f64));
    assert_eq!(diagram.size().w, Length(60.0 * leaves as f64 - 20.0));
}

#[test]
fn deep_chain_lays_out_every_level() {
    let depth = 10_000;
    let mut tree = Tree::new("n");
    let mut tip = tree.root();
    for _ in 1..depth {
        tip = tree.push_child(tip, "n").unwrap();
    }
    let diagram = layout(&tree, &LayoutConfig::default());

    assert_eq!(diagram.rects().len(), depth);
    assert_eq!(diagram.connectors().len(), depth - 1);
    // 20 high, 20 apart, all stacked on one centerline.
    let bottom = rect(&diagram, tip);
    assert_eq!(bottom.min_y(), Length(40.0 * (depth - 1) as f64));
    assert_eq!(bottom.min_x(), Length::ZERO);
    assert_eq!(diagram.size().h, Length(40.0 * depth as f64 - 20.0));
}
