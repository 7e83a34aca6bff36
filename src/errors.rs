//! Error types with diagnostics using miette

use miette::Diagnostic;
use thiserror::Error;

use crate::tree::NodeId;
use crate::types::NumericError;

// ============================================================================
// Tree Errors
// ============================================================================

/// Errors from structural edits of a [`Tree`](crate::Tree).
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("unknown node {id}")]
    #[diagnostic(
        code(treeline::tree::unknown_node),
        help("node ids are only valid for the tree that issued them")
    )]
    UnknownNode { id: NodeId },

    #[error("tree is full ({capacity} nodes)")]
    #[diagnostic(code(treeline::tree::full))]
    Full { capacity: usize },
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors that occur while laying out a diagram
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("invalid {name}: {source}")]
    #[diagnostic(
        code(treeline::layout::invalid_spacing),
        help("spacing must be a finite, non-negative number")
    )]
    InvalidSpacing {
        name: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("node {id} rendered a block with an invalid size: {source}")]
    #[diagnostic(
        code(treeline::layout::invalid_block),
        help("node renderers must return finite, non-negative sizes")
    )]
    InvalidBlock {
        id: NodeId,
        #[source]
        source: NumericError,
    },
}

// ============================================================================
// SVG Errors
// ============================================================================

/// Errors that occur while serializing a diagram to SVG
#[derive(Error, Diagnostic, Debug)]
pub enum SvgError {
    #[error("invalid scale value {value}: {source}")]
    #[diagnostic(code(treeline::svg::invalid_scale))]
    InvalidScale {
        value: f64,
        #[source]
        source: NumericError,
    },

    #[error("invalid {name}: {source}")]
    #[diagnostic(code(treeline::svg::invalid_option))]
    InvalidOption {
        name: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("failed to write SVG")]
    #[diagnostic(code(treeline::svg::format))]
    Format(#[from] std::fmt::Error),
}
