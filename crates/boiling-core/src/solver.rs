// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Linear solver seam and the time-stepping driver.

use boiling_math::gmres::{gmres_solve, GmresConfig};
use boiling_types::config::SolverConfig;
use boiling_types::error::{BoilingError, BoilingResult};

use crate::assembler::EquationAssembler;
use crate::context::BoilingContext;
use crate::scheme::Equation;
use crate::solution::SolutionField;

/// Convergence report of one linear solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveStats {
    pub iterations: usize,
    pub residual: f64,
}

/// Turns an assembled equation into a solution written to
/// `equation.solution`.
pub trait LinearSolver {
    fn solve(&self, equation: &mut Equation<'_>) -> BoilingResult<SolveStats>;
}

/// Restarted GMRES with a Jacobi preconditioner.
///
/// A cycle budget that ends unconverged is retried once from the last
/// iterate before the step is declared diverged.
#[derive(Debug, Clone, Default)]
pub struct GmresSolver {
    config: GmresConfig,
}

impl GmresSolver {
    pub fn new(config: GmresConfig) -> Self {
        GmresSolver { config }
    }
}

impl From<&SolverConfig> for GmresSolver {
    fn from(cfg: &SolverConfig) -> Self {
        GmresSolver::new(GmresConfig::from(cfg))
    }
}

impl LinearSolver for GmresSolver {
    fn solve(&self, equation: &mut Equation<'_>) -> BoilingResult<SolveStats> {
        let mut result = gmres_solve(
            &*equation.matrix,
            &*equation.rhs,
            &mut equation.solution,
            &self.config,
        );
        if !result.converged {
            tracing::warn!(
                iterations = result.iterations,
                residual = result.residual,
                "gmres did not converge, retrying from last iterate"
            );
            let retry = gmres_solve(
                equation.matrix,
                equation.rhs,
                &mut equation.solution,
                &self.config,
            );
            result.iterations += retry.iterations;
            result.residual = retry.residual;
            result.converged = retry.converged;
        }
        if !result.converged || !result.residual.is_finite() {
            return Err(BoilingError::SolverDiverged {
                iterations: result.iterations,
                residual: result.residual,
            });
        }
        Ok(SolveStats {
            iterations: result.iterations,
            residual: result.residual,
        })
    }
}

/// Drives the whole transient solve.
#[derive(Debug, Clone, Default)]
pub struct BoilingSolver<S = GmresSolver> {
    linear: S,
}

impl<S: LinearSolver> BoilingSolver<S> {
    pub fn new(linear: S) -> Self {
        BoilingSolver { linear }
    }

    /// Assemble once, then advance layer by layer from `initial`.
    ///
    /// Any failure aborts the solve; no partial field is returned.
    pub fn solve(&self, mut ctx: BoilingContext, initial: Vec<f64>) -> BoilingResult<SolutionField> {
        ctx.set_initial(initial)?;
        let mut scheme = EquationAssembler::assemble_spatial(&mut ctx)?;

        let layers = ctx.time_layers().len();
        for layer in 1..layers {
            let mut equation = EquationAssembler::build_equation(&mut scheme, &ctx, layer)?;
            let stats = self.linear.solve(&mut equation)?;
            let solution = equation.solution;
            tracing::info!(
                layer,
                time = ctx.time_layers()[layer],
                iterations = stats.iterations,
                residual = stats.residual,
                "time layer solved"
            );
            ctx.push_solution(solution)?;
        }

        let (grid, time_layers, time_solutions) = ctx.into_parts();
        SolutionField::new(grid, time_layers, time_solutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundarySet;
    use crate::material::MaterialTable;
    use crate::velocity::UniformVelocity;
    use boiling_types::state::{Grid, Material};

    /// Solver that copies the rhs, exercising the trait seam.
    struct RhsCopy;

    impl LinearSolver for RhsCopy {
        fn solve(&self, equation: &mut Equation<'_>) -> BoilingResult<SolveStats> {
            equation.solution.copy_from_slice(equation.rhs);
            Ok(SolveStats {
                iterations: 0,
                residual: 0.0,
            })
        }
    }

    struct AlwaysFails;

    impl LinearSolver for AlwaysFails {
        fn solve(&self, _equation: &mut Equation<'_>) -> BoilingResult<SolveStats> {
            Err(BoilingError::SolverDiverged {
                iterations: 1,
                residual: 1.0,
            })
        }
    }

    fn context() -> BoilingContext {
        BoilingContext::new(
            Grid::uniform(2, 2, 0.0, 1.0, 0.0, 1.0).unwrap(),
            Box::new(MaterialTable::new(vec![Material::new(1.0, 1.0, 1.0)])),
            Box::new(UniformVelocity::default()),
            BoundarySet::new(),
            vec![0.0, 0.5, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_insulated_uniform_field_is_steady() {
        let field = BoilingSolver::<GmresSolver>::default()
            .solve(context(), vec![42.0; 9])
            .unwrap();
        assert_eq!(field.time_solutions().len(), 3);
        for layer in field.time_solutions() {
            for v in layer {
                assert!((v - 42.0).abs() < 1e-9, "{v}");
            }
        }
    }

    #[test]
    fn test_custom_linear_solver_is_used() {
        let field = BoilingSolver::new(RhsCopy).solve(context(), vec![0.0; 9]).unwrap();
        assert!(field.time_solutions()[2].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_solver_failure_aborts() {
        let err = BoilingSolver::new(AlwaysFails).solve(context(), vec![0.0; 9]);
        assert!(matches!(err, Err(BoilingError::SolverDiverged { .. })));
    }

    #[test]
    fn test_gmres_retries_once_before_diverging() {
        let solver = GmresSolver::new(GmresConfig {
            restart: 1,
            max_iter: 1,
            tol: 1e-14,
        });
        let initial: Vec<f64> = (0..9).map(|i| (i * i) as f64).collect();
        let err = BoilingSolver::new(solver).solve(context(), initial);
        match err {
            Err(BoilingError::SolverDiverged { iterations, residual }) => {
                // one Arnoldi step per attempt
                assert_eq!(iterations, 2);
                assert!(residual.is_finite() && residual > 0.0);
            }
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_length_checked() {
        let err = BoilingSolver::<GmresSolver>::default().solve(context(), vec![0.0; 2]);
        assert!(matches!(err, Err(BoilingError::DimensionMismatch { .. })));
    }
}
