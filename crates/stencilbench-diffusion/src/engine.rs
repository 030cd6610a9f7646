//! The diffusion engine.
//!
//! Masked 6-connected diffusion over the temperature volume:
//!
//! `next = t + coeff * (neighbor_sum - count * t) / max(count, 1)`
//!
//! where `count` is the number of valid (non-NaN, in-bounds) neighbors.
//! NaN cells and the outermost grid layer keep their input values
//! bit-identical; the loop bounds of the reference model never touch the
//! domain edge, and that is preserved here as a deliberate invariant.

use stencilbench_core::{
    BoundaryPolicy, ExecutionMode, Grid, LocalRule, NeighborOffsets, Result, StencilUpdater,
};

use crate::field::TemperatureField;

/// Diffusion coefficient used by the reference model.
pub const DEFAULT_DIFFUSION_COEFF: f64 = 0.1;

/// The continuous diffusion rule.
///
/// No value clamping is performed: a coefficient large enough to push a
/// cell outside the physical temperature range is the caller's problem.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionRule {
    /// Fraction of the neighbor-average delta applied per step.
    pub coeff: f64,
}

impl LocalRule for DiffusionRule {
    type Cell = f64;

    /// NaN marks land; land never participates.
    #[inline]
    fn is_valid(&self, cell: f64) -> bool {
        !cell.is_nan()
    }

    #[inline]
    fn apply(&self, center: f64, neighbor_sum: f64, neighbor_count: u32) -> f64 {
        let count = f64::from(neighbor_count);
        center + self.coeff * (neighbor_sum - count * center) / count.max(1.0)
    }
}

/// A running temperature diffusion simulation.
pub struct DiffusionEngine {
    field: Grid<f64, 3>,
    scratch: Grid<f64, 3>,
    updater: StencilUpdater<3>,
    rule: DiffusionRule,
    steps_done: u64,
}

impl DiffusionEngine {
    /// Create an engine over a field with the given diffusion coefficient.
    pub fn new(field: TemperatureField, coeff: f64) -> Self {
        let field = field.into_grid();
        let scratch = field.clone();
        Self {
            field,
            scratch,
            updater: StencilUpdater::new(
                NeighborOffsets::von_neumann_3d(),
                BoundaryPolicy::Masked,
            ),
            rule: DiffusionRule { coeff },
            steps_done: 0,
        }
    }

    /// Select a fixed execution mode for the cell loop.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.updater = self.updater.with_mode(mode);
        self
    }

    /// Advance one timestep.
    pub fn step(&mut self) -> Result<()> {
        self.updater
            .step_into(&self.field, &mut self.scratch, &self.rule)?;
        std::mem::swap(&mut self.field, &mut self.scratch);
        self.steps_done += 1;
        Ok(())
    }

    /// Advance `steps` timesteps.
    pub fn run(&mut self, steps: usize) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Advance `steps` timesteps, recording the field before each step.
    ///
    /// The recorded trajectory is the time x depth x lat x lon output of
    /// the reference model.
    pub fn run_recorded(&mut self, steps: usize) -> Result<Vec<TemperatureField>> {
        let mut history = Vec::with_capacity(steps);
        for _ in 0..steps {
            history.push(TemperatureField::from_grid(self.field.clone()));
            self.step()?;
        }
        Ok(history)
    }

    /// The current field.
    pub fn field(&self) -> TemperatureField {
        TemperatureField::from_grid(self.field.clone())
    }

    /// Number of timesteps advanced so far.
    pub fn steps_done(&self) -> u64 {
        self.steps_done
    }

    /// The diffusion coefficient.
    pub fn coeff(&self) -> f64 {
        self.rule.coeff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x5x5 all-ocean field with a hot spot in the middle.
    fn hot_spot_field() -> TemperatureField {
        let mut field =
            TemperatureField::from_snapshot(5, 5, 5, vec![4.0; 125]).unwrap();
        field.set(2, 2, 2, 10.0);
        field
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let field = TemperatureField::synthetic_basin(6, 8, 8).unwrap();
        let before = field.as_grid().clone();
        let mut engine = DiffusionEngine::new(field, 0.5);
        engine.run(0).unwrap();
        assert_eq!(engine.field().as_grid().as_slice().len(), before.len());
        for (a, b) in engine
            .field()
            .as_grid()
            .as_slice()
            .iter()
            .zip(before.as_slice())
        {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_zero_coefficient_is_a_fixed_point() {
        let field = hot_spot_field();
        let before = field.clone();
        let mut engine = DiffusionEngine::new(field, 0.0);
        engine.run(10).unwrap();
        for d in 0..5 {
            for i in 0..5 {
                for j in 0..5 {
                    assert_eq!(engine.field().get(d, i, j), before.get(d, i, j));
                }
            }
        }
    }

    #[test]
    fn test_uniform_field_is_a_fixed_point() {
        let field = TemperatureField::from_snapshot(4, 4, 4, vec![7.5; 64]).unwrap();
        let mut engine = DiffusionEngine::new(field, 0.3);
        engine.run(5).unwrap();
        for v in engine.field().as_grid().as_slice() {
            assert_eq!(*v, 7.5);
        }
    }

    #[test]
    fn test_boundary_layer_bit_identical() {
        let field = TemperatureField::synthetic_basin(6, 10, 10).unwrap();
        let before = field.clone();
        let mut engine = DiffusionEngine::new(field, 0.8);
        engine.run(3).unwrap();

        let after = engine.field();
        let (depth, lat, lon) = (before.depth(), before.lat(), before.lon());
        for d in 0..depth {
            for i in 0..lat {
                for j in 0..lon {
                    let edge = d == 0
                        || d == depth - 1
                        || i == 0
                        || i == lat - 1
                        || j == 0
                        || j == lon - 1;
                    if edge {
                        assert_eq!(
                            after.get(d, i, j).to_bits(),
                            before.get(d, i, j).to_bits(),
                            "boundary cell ({d}, {i}, {j}) changed"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_nan_cells_never_updated() {
        let mut field = TemperatureField::from_snapshot(5, 5, 5, vec![4.0; 125]).unwrap();
        field.set(2, 2, 1, f64::NAN);
        field.set(2, 3, 3, f64::NAN);
        let mut engine = DiffusionEngine::new(field, 0.4);
        engine.run(4).unwrap();

        assert!(engine.field().get(2, 2, 1).is_nan());
        assert!(engine.field().get(2, 3, 3).is_nan());
    }

    #[test]
    fn test_interior_update_all_neighbors_valid() {
        // Only the center of a 3x3x3 volume is interior; its six face
        // neighbors are all 4.0, the center 10.0.
        let mut field = TemperatureField::from_snapshot(3, 3, 3, vec![4.0; 27]).unwrap();
        field.set(1, 1, 1, 10.0);
        let mut engine = DiffusionEngine::new(field, 0.1);
        engine.step().unwrap();

        // next = 10 + 0.1 * (24 - 6 * 10) / 6 = 10 - 0.6
        let got = engine.field().get(1, 1, 1);
        assert!((got - 9.4).abs() < 1e-12, "got {got}");
    }

    #[test]
    fn test_interior_update_with_masked_neighbor() {
        // One face neighbor is land: sum and count both shrink.
        let mut field = TemperatureField::from_snapshot(3, 3, 3, vec![4.0; 27]).unwrap();
        field.set(1, 1, 1, 10.0);
        field.set(0, 1, 1, f64::NAN);
        let mut engine = DiffusionEngine::new(field, 0.1);
        engine.step().unwrap();

        // next = 10 + 0.1 * (20 - 5 * 10) / 5 = 10 - 0.6
        let got = engine.field().get(1, 1, 1);
        assert!((got - 9.4).abs() < 1e-12, "got {got}");
        assert!(engine.field().get(0, 1, 1).is_nan());
    }

    #[test]
    fn test_diffusion_pulls_toward_neighbors() {
        let field = hot_spot_field();
        let mut engine = DiffusionEngine::new(field, 0.1);
        engine.run(20).unwrap();

        let center = engine.field().get(2, 2, 2);
        assert!(center < 10.0 && center > 4.0);
        // An interior neighbor of the hot spot has warmed.
        assert!(engine.field().get(2, 2, 3) > 4.0);
    }

    #[test]
    fn test_run_recorded_trajectory() {
        let field = hot_spot_field();
        let mut engine = DiffusionEngine::new(field.clone(), 0.1);
        let history = engine.run_recorded(4).unwrap();

        assert_eq!(history.len(), 4);
        assert_eq!(history[0].get(2, 2, 2), field.get(2, 2, 2));
        assert_eq!(engine.steps_done(), 4);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let field = TemperatureField::synthetic_basin(8, 16, 16).unwrap();

        let mut sequential =
            DiffusionEngine::new(field.clone(), 0.2).with_mode(ExecutionMode::Sequential);
        sequential.run(6).unwrap();

        let mut parallel =
            DiffusionEngine::new(field, 0.2).with_mode(ExecutionMode::Parallel);
        parallel.run(6).unwrap();

        for (a, b) in sequential
            .field()
            .as_grid()
            .as_slice()
            .iter()
            .zip(parallel.field().as_grid().as_slice())
        {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
