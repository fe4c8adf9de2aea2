// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Solution Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spatio-temporal interpolation of the solved layers.
//!
//! A query `(point, time)` is answered with the bilinear basis of the
//! element containing `point`, evaluated on the two layers bracketing
//! `time`, then combined linearly in time. No extrapolation: points
//! outside the grid and times outside `[t_0, t_last]` are errors.

use boiling_math::basis::BilinearBasis;
use boiling_types::error::{BoilingError, BoilingResult};
use boiling_types::state::{uniform_axis, Grid, Point};

use crate::context::check_time_layers;

#[derive(Debug, Clone)]
pub struct SolutionField {
    grid: Grid,
    time_layers: Vec<f64>,
    time_solutions: Vec<Vec<f64>>,
}

impl SolutionField {
    /// Wrap one nodal solution per time layer.
    pub fn new(grid: Grid, time_layers: Vec<f64>, time_solutions: Vec<Vec<f64>>) -> BoilingResult<Self> {
        check_time_layers(&time_layers)?;
        if time_solutions.len() != time_layers.len() {
            return Err(BoilingError::DimensionMismatch {
                expected: time_layers.len(),
                actual: time_solutions.len(),
            });
        }
        if let Some(bad) = time_solutions.iter().find(|s| s.len() != grid.nodes_count()) {
            return Err(BoilingError::DimensionMismatch {
                expected: grid.nodes_count(),
                actual: bad.len(),
            });
        }
        Ok(SolutionField {
            grid,
            time_layers,
            time_solutions,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn time_layers(&self) -> &[f64] {
        &self.time_layers
    }

    pub fn time_solutions(&self) -> &[Vec<f64>] {
        &self.time_solutions
    }

    /// Value at `point` and `time`.
    pub fn calculate(&self, point: Point, time: f64) -> BoilingResult<f64> {
        let k = self.bracket(time)?;
        let element = self
            .grid
            .locate(point)
            .ok_or(BoilingError::PointOutsideDomain {
                r: point.r,
                z: point.z,
            })?;
        let nodes = self.grid.elements[element].node_indexes;
        let basis = BilinearBasis::new(self.grid.nodes[nodes[0]], self.grid.nodes[nodes[3]]);
        let phi = basis.values(point);

        let spatial = |layer: &[f64]| -> f64 { (0..4).map(|i| phi[i] * layer[nodes[i]]).sum() };
        let previous = spatial(&self.time_solutions[k - 1]);
        let current = spatial(&self.time_solutions[k]);

        let (t0, t1) = (self.time_layers[k - 1], self.time_layers[k]);
        let span = t1 - t0;
        Ok(previous * ((t1 - time) / span) + current * ((time - t0) / span))
    }

    /// First `k ≥ 1` with `t_k ≥ time`.
    fn bracket(&self, time: f64) -> BoilingResult<usize> {
        let first = self.time_layers[0];
        let last = self.time_layers[self.time_layers.len() - 1];
        if !(time >= first && time <= last) {
            return Err(BoilingError::TimeOutOfRange { time, first, last });
        }
        let k = self.time_layers.partition_point(|&t| t < time);
        Ok(k.max(1))
    }

    /// Values on a regular `samples_r × samples_z` lattice covering the
    /// grid, as `(r, z, value)` rows with R varying fastest.
    pub fn sample(&self, time: f64, samples_r: usize, samples_z: usize) -> BoilingResult<Vec<(f64, f64, f64)>> {
        if samples_r < 2 || samples_z < 2 {
            return Err(BoilingError::ConfigError(format!(
                "sampling needs at least 2 points per axis, got {samples_r} x {samples_z}"
            )));
        }
        let (r, z) = (&self.grid.r, &self.grid.z);
        let rs = uniform_axis(r[0], r[r.len() - 1], samples_r - 1);
        let zs = uniform_axis(z[0], z[z.len() - 1], samples_z - 1);

        let mut rows = Vec::with_capacity(samples_r * samples_z);
        for &zv in zs.iter() {
            for &rv in rs.iter() {
                let value = self.calculate(Point::new(rv, zv), time)?;
                rows.push((rv, zv, value));
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> SolutionField {
        let grid = Grid::uniform(2, 1, 1.0, 3.0, 0.0, 2.0).unwrap();
        let n = grid.nodes_count();
        let layer = |scale: f64| (0..n).map(|i| scale * (i as f64 + 1.0)).collect::<Vec<_>>();
        SolutionField::new(grid, vec![0.0, 1.0, 3.0], vec![layer(1.0), layer(2.0), layer(4.0)]).unwrap()
    }

    #[test]
    fn test_reproduces_nodal_values_at_layers() {
        let f = field();
        for (k, &t) in f.time_layers().iter().enumerate() {
            for (i, &p) in f.grid().nodes.iter().enumerate() {
                assert_eq!(f.calculate(p, t).unwrap(), f.time_solutions()[k][i]);
            }
        }
    }

    #[test]
    fn test_linear_in_time_between_layers() {
        let f = field();
        let p = f.grid().nodes[4];
        // Node 4 holds 5, 10, 20 on the three layers
        assert!((f.calculate(p, 0.5).unwrap() - 7.5).abs() < 1e-12);
        assert!((f.calculate(p, 2.0).unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_bilinear_in_space() {
        let f = field();
        // Element 0 centre averages nodes 0, 1, 3, 4 -> (1 + 2 + 4 + 5) / 4
        let v = f.calculate(Point::new(1.5, 1.0), 0.0).unwrap();
        assert!((v - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let f = field();
        assert!(matches!(
            f.calculate(Point::new(2.0, 1.0), 3.5),
            Err(BoilingError::TimeOutOfRange { .. })
        ));
        assert!(matches!(
            f.calculate(Point::new(2.0, 1.0), -0.1),
            Err(BoilingError::TimeOutOfRange { .. })
        ));
        assert!(matches!(
            f.calculate(Point::new(0.5, 1.0), 1.0),
            Err(BoilingError::PointOutsideDomain { .. })
        ));
    }

    #[test]
    fn test_new_validates_shapes() {
        let grid = Grid::uniform(1, 1, 0.0, 1.0, 0.0, 1.0).unwrap();
        assert!(SolutionField::new(grid.clone(), vec![0.0, 1.0], vec![vec![0.0; 4]]).is_err());
        assert!(SolutionField::new(grid.clone(), vec![1.0, 0.0], vec![vec![0.0; 4]; 2]).is_err());
        assert!(SolutionField::new(grid, vec![0.0, 1.0], vec![vec![0.0; 4], vec![0.0; 3]]).is_err());
    }

    #[test]
    fn test_sample_lattice() {
        let f = field();
        let rows = f.sample(3.0, 3, 2).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!((rows[0].0, rows[0].1), (1.0, 0.0));
        assert_eq!((rows[5].0, rows[5].1), (3.0, 2.0));
        assert_eq!(rows[5].2, 24.0);
        assert!(f.sample(3.0, 1, 4).is_err());
    }
}
