//! Cell update rules.
//!
//! The updater is generic over a [`LocalRule`]; the discrete Game of Life
//! table and the continuous diffusion rule are two implementations of the
//! same seam, so the stencil pass itself exists exactly once.

use crate::error::{Result, StencilError};

/// A rule mapping (center cell, neighbor sum, valid neighbor count) to the
/// cell's next value.
///
/// The rule sees only local data; it carries no state between cells or
/// between steps.
pub trait LocalRule {
    /// Cell value type.
    type Cell: Copy + Default + std::ops::AddAssign + Send + Sync;

    /// Whether a cell participates in neighbor sums and receives updates.
    ///
    /// Only consulted under [`BoundaryPolicy::Masked`]; the default marks
    /// every cell valid.
    ///
    /// [`BoundaryPolicy::Masked`]: crate::BoundaryPolicy::Masked
    #[inline]
    fn is_valid(&self, cell: Self::Cell) -> bool {
        let _ = cell;
        true
    }

    /// Compute the next value of a cell from its current value, the sum of
    /// its counted neighbors, and how many neighbors were counted.
    fn apply(&self, center: Self::Cell, neighbor_sum: Self::Cell, neighbor_count: u32)
        -> Self::Cell;
}

/// Number of cell states a [`RuleTable`] covers.
const STATES: usize = 2;
/// Neighbor counts 0..=8 for the Moore neighborhood.
const COUNTS: usize = 9;

/// A deterministic, total map from (state, live neighbor count) to next
/// state for binary cellular automata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    next: [[u8; COUNTS]; STATES],
}

impl RuleTable {
    /// The canonical Game of Life rule.
    ///
    /// Birth on exactly 3 live neighbors; survival on 2 or 3; every other
    /// combination dies.
    pub fn conway() -> Self {
        let mut next = [[0u8; COUNTS]; STATES];
        next[0][3] = 1;
        next[1][2] = 1;
        next[1][3] = 1;
        Self { next }
    }

    /// Build a table from explicit `(state, count, next_state)` entries.
    ///
    /// Fails with `InvalidRuleTable` when any reachable (state, count) pair
    /// is missing, or when an entry maps outside the binary state space.
    pub fn from_entries(entries: &[(u8, u8, u8)]) -> Result<Self> {
        let mut next = [[0u8; COUNTS]; STATES];
        let mut seen = [[false; COUNTS]; STATES];

        for &(state, count, out) in entries {
            if state as usize >= STATES || count as usize >= COUNTS || out as usize >= STATES {
                return Err(StencilError::invalid_rule(format!(
                    "entry ({state}, {count}) -> {out} outside {{0,1}} x {{0..=8}} -> {{0,1}}"
                )));
            }
            next[state as usize][count as usize] = out;
            seen[state as usize][count as usize] = true;
        }

        for state in 0..STATES {
            for count in 0..COUNTS {
                if !seen[state][count] {
                    return Err(StencilError::invalid_rule(format!(
                        "missing entry for state {state} with {count} neighbors"
                    )));
                }
            }
        }

        Ok(Self { next })
    }

    /// Look up the next state for a cell.
    ///
    /// Counts above 8 saturate; they are unreachable with the Moore
    /// neighborhood but a larger custom offset set may produce them.
    #[inline]
    pub fn next_state(&self, state: u8, count: u8) -> u8 {
        let state = (state as usize).min(STATES - 1);
        let count = (count as usize).min(COUNTS - 1);
        self.next[state][count]
    }
}

impl LocalRule for RuleTable {
    type Cell = u8;

    /// With binary cells the neighbor sum is the live neighbor count.
    #[inline]
    fn apply(&self, center: u8, neighbor_sum: u8, _neighbor_count: u32) -> u8 {
        self.next_state(center, neighbor_sum)
    }
}
