//! Classic seed patterns.

use crate::grid::LifeGrid;

/// A small well-known Life pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// 2x2 still life.
    Block,
    /// Period-2 oscillator, seeded horizontal.
    Blinker,
    /// The lightweight diagonal spaceship.
    Glider,
    /// 3x3 fully-alive square.
    SolidSquare,
}

impl Pattern {
    /// Live cells as (x, y) relative to the pattern origin.
    pub fn cells(&self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::Blinker => &[(0, 0), (1, 0), (2, 0)],
            Pattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Pattern::SolidSquare => &[
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2),
            ],
        }
    }

    /// Pattern extent as (width, height).
    pub fn size(&self) -> (usize, usize) {
        let cells = self.cells();
        let w = cells.iter().map(|&(x, _)| x).max().unwrap_or(0) + 1;
        let h = cells.iter().map(|&(_, y)| y).max().unwrap_or(0) + 1;
        (w, h)
    }
}

/// Stamp a pattern onto the board with its origin at (x0, y0), wrapping
/// toroidally.
pub fn stamp(grid: &mut LifeGrid, pattern: Pattern, x0: usize, y0: usize) {
    let (w, h) = (grid.width(), grid.height());
    for &(dx, dy) in pattern.cells() {
        grid.set((x0 + dx) % w, (y0 + dy) % h, true);
    }
}
