//! Neighbor offset sets.

use crate::error::{Result, StencilError};

/// A fixed, ordered set of relative coordinate deltas defining adjacency.
///
/// Offsets are validated at construction: the set must be non-empty, must
/// not contain the zero vector (a cell is not its own neighbor), and must
/// not repeat an offset.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborOffsets<const N: usize> {
    offsets: Vec<[isize; N]>,
}

impl<const N: usize> NeighborOffsets<N> {
    /// Create a validated offset set.
    ///
    /// Empty and degenerate sets are rejected rather than clamped, so a
    /// misconfigured stencil fails at construction instead of silently
    /// computing a no-op pass.
    pub fn new(offsets: Vec<[isize; N]>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(StencilError::invalid_offsets("offset set is empty"));
        }
        for (i, off) in offsets.iter().enumerate() {
            if off.iter().all(|&d| d == 0) {
                return Err(StencilError::invalid_offsets(
                    "offset set contains the zero vector",
                ));
            }
            if offsets[..i].contains(off) {
                return Err(StencilError::invalid_offsets(format!(
                    "duplicate offset {:?}",
                    off
                )));
            }
        }
        Ok(Self { offsets })
    }

    /// Number of offsets in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Never true for a constructed set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Iterate over the offsets in order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &[isize; N]> {
        self.offsets.iter()
    }

    /// The offsets as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[[isize; N]] {
        &self.offsets
    }
}

impl NeighborOffsets<2> {
    /// 8-connected Moore neighborhood: the Game of Life adjacency.
    pub fn moore_2d() -> Self {
        Self {
            offsets: vec![
                [-1, -1],
                [-1, 0],
                [-1, 1],
                [0, -1],
                [0, 1],
                [1, -1],
                [1, 0],
                [1, 1],
            ],
        }
    }
}

impl NeighborOffsets<3> {
    /// 6-connected von Neumann neighborhood: face-adjacent cells only,
    /// the 3D diffusion adjacency.
    pub fn von_neumann_3d() -> Self {
        Self {
            offsets: vec![
                [-1, 0, 0],
                [1, 0, 0],
                [0, -1, 0],
                [0, 1, 0],
                [0, 0, -1],
                [0, 0, 1],
            ],
        }
    }
}
