//! Boundary policies for neighbor lookups at the grid edge.

/// How a neighbor offset that lands outside the grid is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Toroidal topology: edges wrap around, neighbor lookups use modulo
    /// index arithmetic.
    #[default]
    Periodic,
    /// Validity-masked grid: invalid cells (e.g. NaN land points) are
    /// excluded from neighbor sums and counts, and neither invalid cells
    /// nor the outermost grid layer are ever updated.
    Masked,
    /// Open boundary: edge cells simply have fewer neighbors, with no
    /// wraparound. Every cell is still updated.
    Open,
}

impl BoundaryPolicy {
    /// Resolve the coordinates of one neighbor.
    ///
    /// Returns `None` when the neighbor falls outside the grid under a
    /// non-periodic policy; the caller excludes it from both sum and count.
    #[inline]
    pub fn resolve<const N: usize>(
        &self,
        coords: [usize; N],
        offset: [isize; N],
        shape: [usize; N],
    ) -> Option<[usize; N]> {
        let mut neighbor = [0usize; N];
        for axis in 0..N {
            let extent = shape[axis] as isize;
            let c = coords[axis] as isize + offset[axis];
            neighbor[axis] = match self {
                BoundaryPolicy::Periodic => c.rem_euclid(extent) as usize,
                BoundaryPolicy::Masked | BoundaryPolicy::Open => {
                    if c < 0 || c >= extent {
                        return None;
                    }
                    c as usize
                }
            };
        }
        Some(neighbor)
    }

    /// Whether cells on the outermost grid layer are frozen (returned
    /// unmodified by a step). Only true for the masked policy.
    #[inline]
    pub fn freezes_outer_layer(&self) -> bool {
        matches!(self, BoundaryPolicy::Masked)
    }
}
