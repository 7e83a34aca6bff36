//! Layout configuration

use crate::errors::LayoutError;
use crate::types::Length;

use super::defaults;

/// Which nodes a parent draws connectors to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectorPolicy {
    /// One connector per parent-child edge.
    #[default]
    DirectChildren,
    /// A connector from every node to every node below it, as the unpartitioned
    /// measurement map would produce. Lines to deeper nodes overlap the
    /// intermediate levels.
    AllDescendants,
}

/// What a guide child contributes to its parent's centerline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuideAnchor {
    /// Horizontal center of the child's whole subtree frame.
    #[default]
    SubtreeCenter,
    /// The child's own centerline, i.e. the center of its node box.
    NodeCenter,
}

/// Settings for [`Diagram::layout`](super::Diagram::layout).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub sibling_spacing: Length,
    pub level_spacing: Length,
    pub connectors: ConnectorPolicy,
    pub guide_anchor: GuideAnchor,
    pub coordinate_space: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sibling_spacing: defaults::SIBLING_SPACING,
            level_spacing: defaults::LEVEL_SPACING,
            connectors: ConnectorPolicy::default(),
            guide_anchor: GuideAnchor::default(),
            coordinate_space: defaults::COORDINATE_SPACE.to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sibling_spacing(mut self, spacing: f64) -> Self {
        self.sibling_spacing = Length(spacing);
        self
    }

    pub fn with_level_spacing(mut self, spacing: f64) -> Self {
        self.level_spacing = Length(spacing);
        self
    }

    pub fn with_connectors(mut self, policy: ConnectorPolicy) -> Self {
        self.connectors = policy;
        self
    }

    pub fn with_guide_anchor(mut self, anchor: GuideAnchor) -> Self {
        self.guide_anchor = anchor;
        self
    }

    pub fn with_coordinate_space(mut self, name: impl Into<String>) -> Self {
        self.coordinate_space = name.into();
        self
    }

    /// Reject spacings that are NaN, infinite or negative.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("sibling_spacing", self.sibling_spacing),
            ("level_spacing", self.level_spacing),
        ] {
            Length::try_non_negative(value.raw())
                .map_err(|source| LayoutError::InvalidSpacing { name, source })?;
        }
        Ok(())
    }
}
