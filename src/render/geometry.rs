//! Connector geometry: where parent-to-child lines start and end.

use glam::DVec2;

use crate::log::{debug, warn};
use crate::tree::NodeId;
use crate::types::{Length, MeasuredRect, OffsetLen, PtLen, UnitPoint};

use super::measure::RectMap;

/// Start and end of a connector between two rectangles.
///
/// The line leaves `from` at the center of its bottom edge and enters `to` at
/// the center of its top edge.
pub fn connector_points(from: MeasuredRect, to: MeasuredRect) -> (PtLen, PtLen) {
    (from.anchor(UnitPoint::BOTTOM), to.anchor(UnitPoint::TOP))
}

/// A straight line from a parent node to a node below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    pub parent: NodeId,
    pub child: NodeId,
    pub from: PtLen,
    pub to: PtLen,
}

impl Connector {
    pub fn between(
        parent: NodeId,
        parent_rect: MeasuredRect,
        child: NodeId,
        child_rect: MeasuredRect,
    ) -> Self {
        let (from, to) = connector_points(parent_rect, child_rect);
        Connector {
            parent,
            child,
            from,
            to,
        }
    }

    pub fn translate(self, by: OffsetLen) -> Self {
        Connector {
            from: self.from + by,
            to: self.to + by,
            ..self
        }
    }

    pub fn vector(&self) -> DVec2 {
        self.to.to_dvec2() - self.from.to_dvec2()
    }

    pub fn length(&self) -> Length {
        Length(self.vector().length())
    }

    pub fn is_vertical(&self) -> bool {
        self.vector().x.abs() < 1e-9
    }

    pub fn midpoint(&self) -> PtLen {
        self.from.midpoint(self.to)
    }

    /// Tight bounding box of the segment.
    pub fn bounds(&self) -> MeasuredRect {
        let a = self.from.to_dvec2();
        let b = self.to.to_dvec2();
        let min = a.min(b);
        let extent = a.max(b) - min;
        MeasuredRect::from_xywh(min.x, min.y, extent.x, extent.y)
    }
}

/// Connectors from `source` to each of `targets`, using measured rectangles.
///
/// A missing measurement for `source` skips all of its connectors; a missing
/// target skips just that line. Neither is fatal.
pub fn connectors_for(
    source: NodeId,
    rects: &RectMap,
    targets: impl IntoIterator<Item = NodeId>,
) -> Vec<Connector> {
    let Some(source_rect) = rects.get(source) else {
        warn!(node = %source, "no measured rect for connector source, skipping its connectors");
        return Vec::new();
    };
    targets
        .into_iter()
        .filter_map(|target| match rects.get(target) {
            Some(rect) => Some(Connector::between(source, source_rect, target, rect)),
            None => {
                debug!(node = %source, target = %target, "no measured rect for connector target");
                None
            }
        })
        .collect()
}
