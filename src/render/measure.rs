//! Measurement service: per-pass map from node id to measured rectangle.
//!
//! Every layout call returns the [`RectMap`] of its subtree to the caller,
//! which merges the maps of all its children into its own. Ids are arena
//! indices, so the map is a vector of optional slots.

use crate::tree::NodeId;
use crate::types::{MeasuredRect, OffsetLen};

/// Measured rectangles keyed by [`NodeId`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RectMap {
    slots: Vec<Option<MeasuredRect>>,
}

impl RectMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding exactly one measurement.
    pub fn singleton(id: NodeId, rect: MeasuredRect) -> Self {
        let mut map = Self::new();
        map.insert(id, rect);
        map
    }

    /// Record a measurement, returning the one it replaced.
    pub fn insert(&mut self, id: NodeId, rect: MeasuredRect) -> Option<MeasuredRect> {
        let idx = id.index();
        if idx >= self.slots.len() {
            self.slots.resize(idx + 1, None);
        }
        self.slots[idx].replace(rect)
    }

    pub fn get(&self, id: NodeId) -> Option<MeasuredRect> {
        self.slots.get(id.index()).copied().flatten()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Merge `other` into `self`. On a collision `other` wins.
    pub fn merge(&mut self, other: RectMap) {
        if other.slots.len() > self.slots.len() {
            self.slots.resize(other.slots.len(), None);
        }
        for (slot, incoming) in self.slots.iter_mut().zip(other.slots) {
            if incoming.is_some() {
                *slot = incoming;
            }
        }
    }

    /// Move every rectangle by `by`, e.g. from a child's local space into its
    /// parent's.
    pub fn translate(&mut self, by: OffsetLen) {
        for rect in self.slots.iter_mut().flatten() {
            *rect = rect.translate(by);
        }
    }

    /// Measurements in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, MeasuredRect)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| Some((NodeId::try_from_index(idx)?, (*slot)?)))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    /// Number of measured nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Union of all measured rectangles.
    pub fn bounds(&self) -> Option<MeasuredRect> {
        self.iter().map(|(_, r)| r).reduce(MeasuredRect::union)
    }
}

impl FromIterator<(NodeId, MeasuredRect)> for RectMap {
    fn from_iter<I: IntoIterator<Item = (NodeId, MeasuredRect)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, rect) in iter {
            map.insert(id, rect);
        }
        map
    }
}
