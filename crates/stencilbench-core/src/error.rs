//! Error types for stencil operations.

use thiserror::Error;

/// Result type for stencil operations.
pub type Result<T> = std::result::Result<T, StencilError>;

/// Errors that can occur when constructing or stepping a stencil grid.
///
/// All variants are detected eagerly at construction or step entry and
/// propagated to the caller unrecovered; a stencil pass is deterministic,
/// so there is nothing to retry.
#[derive(Error, Debug)]
pub enum StencilError {
    /// Grid dimensions are degenerate or inconsistent with the data.
    #[error("Invalid grid shape: {0}")]
    InvalidGridShape(String),

    /// Neighbor offset set is empty, contains the zero vector, or repeats
    /// an offset.
    #[error("Invalid offset set: {0}")]
    InvalidOffsetSet(String),

    /// A discrete rule table is missing an entry for a reachable
    /// (state, neighbor count) pair, or maps outside the state space.
    #[error("Invalid rule table: {0}")]
    InvalidRuleTable(String),
}

impl StencilError {
    /// Create an invalid grid shape error.
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidGridShape(msg.into())
    }

    /// Create an invalid offset set error.
    pub fn invalid_offsets(msg: impl Into<String>) -> Self {
        Self::InvalidOffsetSet(msg.into())
    }

    /// Create an invalid rule table error.
    pub fn invalid_rule(msg: impl Into<String>) -> Self {
        Self::InvalidRuleTable(msg.into())
    }
}
