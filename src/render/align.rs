//! Alignment engine: which children a parent centers over.
//!
//! For a sibling group of `n` children the parent aligns to the middle child
//! (`n` odd) or to the midpoint between the two middle children (`n` even).
//! Those children form the [`GuideSet`]; every child in the row is told
//! whether it defines the shared centerline ([`Alignment::Centerline`]) or is
//! simply placed in its cell ([`Alignment::Center`]).

use crate::types::Length;

/// The guide children of one sibling group, by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuideSet {
    /// Odd sibling count: the middle child.
    Single(usize),
    /// Even sibling count: `mid` and `mid - 1`.
    Pair(usize, usize),
}

impl GuideSet {
    /// Guide set for a sibling group of `count` children, `None` for leaves.
    pub fn for_count(count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let mid = count / 2;
        if count % 2 == 1 {
            Some(GuideSet::Single(mid))
        } else {
            Some(GuideSet::Pair(mid, mid - 1))
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        match *self {
            GuideSet::Single(i) => i == index,
            GuideSet::Pair(a, b) => a == index || b == index,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GuideSet::Single(_) => 1,
            GuideSet::Pair(..) => 2,
        }
    }

    /// Never true; present for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Guide indices, `mid` first.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let (first, second) = match *self {
            GuideSet::Single(i) => (i, None),
            GuideSet::Pair(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    /// How the child at `index` participates in the row.
    pub fn alignment_for(&self, index: usize) -> Alignment {
        if self.contains(index) {
            Alignment::Centerline
        } else {
            Alignment::Center
        }
    }

    /// The row's centerline given each child's anchor position.
    ///
    /// `anchors[i]` is the horizontal anchor of child `i` in row coordinates.
    /// Returns `None` when a guide index is out of range.
    pub fn centerline(&self, anchors: &[Length]) -> Option<Length> {
        let mut sum = Length::ZERO;
        for i in self.indices() {
            sum += *anchors.get(i)?;
        }
        Some(sum / self.len() as f64)
    }
}

/// Horizontal alignment of one child within its parent's row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// The child's anchor defines (part of) the shared centerline.
    Centerline,
    /// Ordinary centering within the child's cell.
    Center,
}
