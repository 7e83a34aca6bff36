//! Arena-backed tree model.
//!
//! Trees are usually written as nested [`TreeNode`] values and flattened into a
//! [`Tree`], which assigns every node a [`NodeId`] in pre-order. Ids are plain
//! indices into the arena: they are unique within a tree and never reused.

use std::fmt;

use crate::errors::TreeError;
use crate::log::warn;

/// Identifier of a node within one [`Tree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The arena index of this node.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// `None` at or past [`Tree::CAPACITY`].
    pub(crate) fn try_from_index(idx: usize) -> Option<Self> {
        u32::try_from(idx)
            .ok()
            .filter(|&raw| raw != u32::MAX)
            .map(NodeId)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Nested, owned form of a tree: a value and its ordered children.
///
/// ```rust
/// use treeline::{Tree, TreeNode};
///
/// let tree: Tree<&str> = TreeNode::new("Root")
///     .child(TreeNode::new("First"))
///     .child(TreeNode::with_children("Second", vec![TreeNode::new("Leaf")]))
///     .into();
/// assert_eq!(tree.len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode<T> {
    pub value: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// A node without children.
    pub fn new(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub fn with_children(value: T, children: Vec<TreeNode<T>>) -> Self {
        Self { value, children }
    }

    /// Append a child, builder style.
    pub fn child(mut self, child: TreeNode<T>) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    value: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A rooted tree stored in a flat arena.
///
/// The root always exists and is [`Tree::root`]. Children keep their insertion
/// order, which is the left-to-right order in a diagram.
#[derive(Clone, Debug)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Tree<T> {
    /// Most nodes a tree can hold. Ids are 32-bit and `u32::MAX` is never
    /// issued.
    pub const CAPACITY: usize = u32::MAX as usize;

    /// A tree holding only a root.
    pub fn new(root: T) -> Self {
        Self {
            slots: vec![Slot {
                value: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.slots.len()
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.index()).map(|s| &s.value)
    }

    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.index()).map(|s| &mut s.value)
    }

    /// Children of `id` in order. Empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.index())
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.index()).and_then(|s| s.parent)
    }

    /// Append a new last child under `parent`, returning its fresh id.
    pub fn push_child(&mut self, parent: NodeId, value: T) -> Result<NodeId, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownNode { id: parent });
        }
        let id = NodeId::try_from_index(self.slots.len()).ok_or(TreeError::Full {
            capacity: Tree::<T>::CAPACITY,
        })?;
        self.slots.push(Slot {
            value,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.index()].children.push(id);
        Ok(id)
    }

    /// All descendants of `id` in pre-order, `id` itself excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Pre-order traversal from the root.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .map(move |id| (id, &self.slots[id.index()].value))
    }

    /// Number of parent-child edges.
    pub fn edge_count(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    /// Sum over every node of the size of its subtree below it.
    ///
    /// Equivalently, the number of (ancestor, descendant) pairs, which is the
    /// sum of all depths.
    pub fn descendant_count(&self) -> usize {
        let mut depth = vec![0usize; self.slots.len()];
        let mut total = 0;
        for id in self.descendants(self.root()) {
            if let Some(parent) = self.parent_of(id) {
                depth[id.index()] = depth[parent.index()] + 1;
                total += depth[id.index()];
            }
        }
        total
    }

    /// A tree of the same shape and ids with every value transformed.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Tree<U> {
        Tree {
            slots: self
                .slots
                .iter()
                .map(|s| Slot {
                    value: f(&s.value),
                    parent: s.parent,
                    children: s.children.clone(),
                })
                .collect(),
        }
    }
}

impl<T> From<TreeNode<T>> for Tree<T> {
    /// Flatten in pre-order. Nodes past [`Tree::CAPACITY`] are dropped.
    fn from(node: TreeNode<T>) -> Self {
        let TreeNode { value, children } = node;
        let mut tree = Tree::new(value);
        let root = tree.root();
        let mut stack: Vec<(NodeId, TreeNode<T>)> =
            children.into_iter().rev().map(|c| (root, c)).collect();
        while let Some((parent, TreeNode { value, children })) = stack.pop() {
            let Ok(id) = tree.push_child(parent, value) else {
                warn!(parent = %parent, "tree is full, dropping subtree");
                continue;
            };
            stack.extend(children.into_iter().rev().map(|c| (id, c)));
        }
        tree
    }
}
