//! Error types for clip operations.

use geo::Rect;
use thiserror::Error;

/// Errors raised by [`crate::clip`] and the table-level entry points.
#[derive(Error, Debug)]
pub enum ClipError {
    /// An argument is not a usable spatial feature collection: a table with no
    /// geometry column, undecodable geometry, or a clip boundary that is not polygonal.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Both inputs are well formed but their extents do not overlap.
    #[error("Extents do not overlap: target {target:?}, boundary {boundary:?}")]
    DisjointExtent {
        target: Option<Rect<f64>>,
        boundary: Option<Rect<f64>>,
    },

    /// Failure inside the attribute container, propagated unmodified.
    #[error(transparent)]
    Frame(#[from] anyhow::Error),
}

impl ClipError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns `true` for [`ClipError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool { matches!(self, Self::InvalidInput(_)) }

    /// Returns `true` for [`ClipError::DisjointExtent`].
    pub fn is_disjoint_extent(&self) -> bool { matches!(self, Self::DisjointExtent { .. }) }
}

/// Result type alias for clip operations.
pub type Result<T> = std::result::Result<T, ClipError>;
