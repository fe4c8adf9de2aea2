// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Two-Layer Implicit Scheme
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Backward-Euler time discretization.
//!
//! ```text
//! (K + M/Δt) u_n = (M/Δt) u_{n-1}
//! ```
//!
//! `K` is the combined stiffness + convection operator and `M` the mass
//! operator. Both share one portrait, so the scheme keeps a single operator
//! buffer and rhs vector that are overwritten every step.

use std::sync::Arc;

use boiling_math::sparse::{SparseMatrix, SparsePortrait};
use boiling_types::error::{BoilingError, BoilingResult};

/// One linear system `matrix · solution = rhs`.
///
/// `matrix` and `rhs` borrow the scheme's buffers; `solution` is a fresh
/// vector seeded with the previous layer as initial guess and overwritten
/// by the linear solver.
#[derive(Debug)]
pub struct Equation<'a> {
    pub matrix: &'a mut SparseMatrix,
    pub rhs: &'a mut [f64],
    pub solution: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct TwoLayerImplicitScheme {
    buffer: SparseMatrix,
    rhs: Vec<f64>,
}

impl TwoLayerImplicitScheme {
    /// Buffers on the portrait shared by the spatial operators.
    pub fn new(portrait: Arc<SparsePortrait>) -> Self {
        let n = portrait.size();
        TwoLayerImplicitScheme {
            buffer: SparseMatrix::new(portrait),
            rhs: vec![0.0; n],
        }
    }

    pub fn size(&self) -> usize {
        self.rhs.len()
    }

    /// Build the step equation for `Δt = dt` from the previous layer.
    ///
    /// # Panics
    ///
    /// Panics if `stiffness_velocity` or `mass` use a different portrait.
    pub fn build(
        &mut self,
        stiffness_velocity: &SparseMatrix,
        mass: &SparseMatrix,
        dt: f64,
        previous: &[f64],
    ) -> BoilingResult<Equation<'_>> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(BoilingError::InvalidTimeLayers(format!(
                "time step must be positive, got {dt}"
            )));
        }
        if previous.len() != self.size() {
            return Err(BoilingError::DimensionMismatch {
                expected: self.size(),
                actual: previous.len(),
            });
        }

        self.buffer.assign_scaled(1.0 / dt, mass);
        self.buffer.multiply(previous, &mut self.rhs);
        self.buffer.add_assign(stiffness_velocity);

        Ok(Equation {
            matrix: &mut self.buffer,
            rhs: &mut self.rhs,
            solution: previous.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boiling_math::gmres::{gmres_solve, GmresConfig};

    #[test]
    fn test_identity_mass_zero_operator_holds_solution() {
        let portrait = Arc::new(SparsePortrait::diagonal(3));
        let mut mass = SparseMatrix::new(Arc::clone(&portrait));
        mass.diagonal.fill(1.0);
        let k = SparseMatrix::new(Arc::clone(&portrait));
        let mut scheme = TwoLayerImplicitScheme::new(portrait);

        let previous = [3.0, -1.0, 7.5];
        let eq = scheme.build(&k, &mass, 1.0, &previous).unwrap();
        assert_eq!(eq.rhs, &previous[..]);

        let mut x = vec![0.0; 3];
        let result = gmres_solve(eq.matrix, eq.rhs, &mut x, &GmresConfig::default());
        assert!(result.converged);
        for i in 0..3 {
            assert!((x[i] - previous[i]).abs() < 1e-14);
        }
    }

    #[test]
    fn test_buffers_overwritten_each_step() {
        let portrait = Arc::new(SparsePortrait::diagonal(2));
        let mut mass = SparseMatrix::new(Arc::clone(&portrait));
        mass.diagonal.copy_from_slice(&[2.0, 4.0]);
        let mut k = SparseMatrix::new(Arc::clone(&portrait));
        k.diagonal.copy_from_slice(&[1.0, 1.0]);
        let mut scheme = TwoLayerImplicitScheme::new(portrait);

        {
            let eq = scheme.build(&k, &mass, 0.5, &[1.0, 1.0]).unwrap();
            assert_eq!(eq.matrix.diagonal, vec![5.0, 9.0]);
            assert_eq!(eq.rhs, &[4.0, 8.0][..]);
        }
        let eq = scheme.build(&k, &mass, 2.0, &[1.0, 1.0]).unwrap();
        assert_eq!(eq.matrix.diagonal, vec![2.0, 3.0]);
        assert_eq!(eq.rhs, &[1.0, 2.0][..]);
        assert_eq!(eq.solution, vec![1.0, 1.0]);
    }

    #[test]
    fn test_rejects_bad_step_and_length() {
        let portrait = Arc::new(SparsePortrait::diagonal(2));
        let m = SparseMatrix::new(Arc::clone(&portrait));
        let mut scheme = TwoLayerImplicitScheme::new(portrait);
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                scheme.build(&m, &m, dt, &[0.0, 0.0]),
                Err(BoilingError::InvalidTimeLayers(_))
            ));
        }
        assert!(matches!(
            scheme.build(&m, &m, 1.0, &[0.0]),
            Err(BoilingError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }
}
