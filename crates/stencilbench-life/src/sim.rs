//! Life simulation driver.

use stencilbench_core::{
    BoundaryPolicy, ExecutionMode, Grid, NeighborOffsets, Result, RuleTable, StencilUpdater,
};

use crate::grid::LifeGrid;

/// A running Game of Life simulation.
///
/// Owns the board plus a scratch buffer; `step` computes the next
/// generation into the scratch and swaps, so a step never reads its own
/// output.
pub struct LifeSimulation {
    grid: Grid<u8, 2>,
    scratch: Grid<u8, 2>,
    updater: StencilUpdater<2>,
    rule: RuleTable,
    generation: u64,
}

impl LifeSimulation {
    /// Create a simulation with the canonical rule on a toroidal board.
    pub fn new(grid: LifeGrid) -> Self {
        Self::with_rule(grid, RuleTable::conway())
    }

    /// Create a simulation with a custom rule table.
    pub fn with_rule(grid: LifeGrid, rule: RuleTable) -> Self {
        let grid = grid.into_grid();
        let scratch = grid.clone();
        Self {
            grid,
            scratch,
            updater: StencilUpdater::new(NeighborOffsets::moore_2d(), BoundaryPolicy::Periodic),
            rule,
            generation: 0,
        }
    }

    /// Select a fixed execution mode for the cell loop.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.updater = self.updater.with_mode(mode);
        self
    }

    /// Advance one generation.
    pub fn step(&mut self) -> Result<()> {
        self.updater
            .step_into(&self.grid, &mut self.scratch, &self.rule)?;
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;
        Ok(())
    }

    /// Advance `steps` generations.
    pub fn run(&mut self, steps: usize) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Advance `steps` generations, recording the board before each step.
    pub fn run_recorded(&mut self, steps: usize) -> Result<Vec<LifeGrid>> {
        let mut history = Vec::with_capacity(steps);
        for _ in 0..steps {
            history.push(LifeGrid::from_grid(self.grid.clone()));
            self.step()?;
        }
        Ok(history)
    }

    /// The current board.
    pub fn grid(&self) -> LifeGrid {
        LifeGrid::from_grid(self.grid.clone())
    }

    /// Number of generations advanced so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Live cell count of the current board.
    pub fn population(&self) -> usize {
        self.grid.as_slice().iter().map(|&c| c as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{stamp, Pattern};

    #[test]
    fn test_all_dead_is_a_fixed_point() {
        let mut sim = LifeSimulation::new(LifeGrid::dead(8, 8).unwrap());
        sim.run(5).unwrap();
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.generation(), 5);
    }

    #[test]
    fn test_lone_cell_dies() {
        let mut grid = LifeGrid::dead(8, 8).unwrap();
        grid.set(0, 0, true);
        let mut sim = LifeSimulation::new(grid);
        sim.step().unwrap();
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = LifeGrid::dead(8, 8).unwrap();
        stamp(&mut grid, Pattern::Blinker, 2, 3);
        let initial = grid.clone();

        let mut sim = LifeSimulation::new(grid);
        sim.step().unwrap();
        // Horizontal blinker becomes vertical.
        assert_eq!(sim.population(), 3);
        assert_eq!(sim.grid().get(3, 2), 1);
        assert_eq!(sim.grid().get(3, 3), 1);
        assert_eq!(sim.grid().get(3, 4), 1);

        sim.step().unwrap();
        assert_eq!(sim.grid(), initial);
    }

    #[test]
    fn test_solid_square_generation_one() {
        // 3x3 fully-alive block on a 6x6 torus: block corners survive on 3
        // neighbors, edge-midpoints die on 5, the center dies on 8, and the
        // four cells orthogonally outside the edge-midpoints are born on 3.
        let mut grid = LifeGrid::dead(6, 6).unwrap();
        stamp(&mut grid, Pattern::SolidSquare, 1, 1);

        let mut sim = LifeSimulation::new(grid);
        sim.step().unwrap();

        let expected = LifeGrid::from_rows(&[
            vec![0, 0, 1, 0, 0, 0],
            vec![0, 1, 0, 1, 0, 0],
            vec![1, 0, 0, 0, 1, 0],
            vec![0, 1, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
        ])
        .unwrap();
        assert_eq!(sim.grid(), expected);
    }

    #[test]
    fn test_glider_returns_translated() {
        // After 4 generations a glider reappears shifted by (1, 1).
        let mut grid = LifeGrid::dead(8, 8).unwrap();
        stamp(&mut grid, Pattern::Glider, 1, 1);
        let mut sim = LifeSimulation::new(grid);
        sim.run(4).unwrap();

        let mut expected = LifeGrid::dead(8, 8).unwrap();
        stamp(&mut expected, Pattern::Glider, 2, 2);
        assert_eq!(sim.grid(), expected);
    }

    #[test]
    fn test_run_recorded_matches_run() {
        let grid = LifeGrid::random(16, 16, 0.3, Some(7)).unwrap();

        let mut recorded = LifeSimulation::new(grid.clone());
        let history = recorded.run_recorded(5).unwrap();

        let mut plain = LifeSimulation::new(grid.clone());
        plain.run(5).unwrap();

        assert_eq!(history.len(), 5);
        assert_eq!(history[0], grid);
        assert_eq!(recorded.grid(), plain.grid());
    }
}
