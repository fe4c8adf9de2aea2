// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Equation Assembler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Two explicit phases of equation assembly.
//!
//! 1. [`EquationAssembler::assemble_spatial`] runs once per solve: every
//!    element contributes stiffness and convection to the combined operator
//!    and capacity to the mass operator. Materials and velocity are taken
//!    as time-invariant, so the result is reused for every step.
//! 2. [`EquationAssembler::build_equation`] runs once per time layer: the
//!    two-layer scheme produces the step system and the boundary conditions
//!    are applied to it.

use std::sync::Arc;

use boiling_types::error::{BoilingError, BoilingResult};

use crate::assembling::{
    ConvectionAssembler, ElementView, LocalMatrix, LocalMatrixAssembler, MassAssembler,
    StiffnessAssembler,
};
use crate::context::BoilingContext;
use crate::scheme::{Equation, TwoLayerImplicitScheme};

/// Elements between assembly progress events.
const PROGRESS_INTERVAL: usize = 100;

pub struct EquationAssembler;

impl EquationAssembler {
    /// Fill the persistent operators of `ctx` and return the time scheme
    /// bound to their portrait.
    ///
    /// The operators are cleared first, so calling this again rebuilds them
    /// from scratch.
    pub fn assemble_spatial(ctx: &mut BoilingContext) -> BoilingResult<TwoLayerImplicitScheme> {
        let parts = ctx.assembly_parts();
        let convection = ConvectionAssembler::new(parts.velocity, parts.quadrature);
        let mut local = LocalMatrix::new();
        parts.stiffness_velocity.nullify();
        parts.mass.nullify();

        let grid = parts.grid;
        let total = grid.elements.len();
        for (index, element) in grid.elements.iter().enumerate() {
            let view = ElementView::new(grid, element, parts.materials)?;

            StiffnessAssembler.assemble(&view, &mut local);
            local.scatter(parts.stiffness_velocity);

            MassAssembler.assemble(&view, &mut local);
            local.scatter(parts.mass);

            convection.assemble(&view, &mut local);
            local.scatter(parts.stiffness_velocity);

            if (index + 1) % PROGRESS_INTERVAL == 0 {
                tracing::debug!(assembled = index + 1, total, "spatial assembly");
            }
        }
        tracing::debug!(
            elements = total,
            nodes = grid.nodes_count(),
            quadrature = parts.quadrature.points(),
            "spatial operators ready"
        );

        Ok(TwoLayerImplicitScheme::new(Arc::clone(parts.mass.portrait())))
    }

    /// Step equation for time layer `layer` (≥ 1) with boundary
    /// conditions applied. Layer `layer - 1` must already be solved.
    pub fn build_equation<'s>(
        scheme: &'s mut TwoLayerImplicitScheme,
        ctx: &BoilingContext,
        layer: usize,
    ) -> BoilingResult<Equation<'s>> {
        let layers = ctx.time_layers();
        if layer == 0 || layer >= layers.len() {
            return Err(BoilingError::InvalidTimeLayers(format!(
                "layer {layer} is not a step layer of {} layers",
                layers.len()
            )));
        }
        let previous = ctx.time_solutions().get(layer - 1).ok_or_else(|| {
            BoilingError::InvalidTimeLayers(format!("layer {} has not been solved", layer - 1))
        })?;
        let dt = layers[layer] - layers[layer - 1];

        let mut equation = scheme.build(ctx.stiffness_velocity(), ctx.mass(), dt, previous)?;
        ctx.boundary().apply(ctx.grid(), &mut equation);
        Ok(equation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{BoundaryCondition, BoundarySet};
    use crate::material::MaterialTable;
    use crate::velocity::UniformVelocity;
    use boiling_types::config::ComponentType;
    use boiling_types::state::{Grid, Material, Side};

    fn context(velocity: [f64; 2], boundary: BoundarySet, grid: Grid) -> BoilingContext {
        BoilingContext::new(
            grid,
            Box::new(MaterialTable::new(vec![Material::new(1.0, 1.0, 1.0)])),
            Box::new(UniformVelocity::from(velocity)),
            boundary,
            vec![0.0, 1.0, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn test_spatial_operators_properties() {
        let grid = Grid::uniform(3, 2, 0.5, 2.0, 0.0, 1.0).unwrap();
        let mut ctx = context([0.0, 0.0], BoundarySet::new(), grid);
        EquationAssembler::assemble_spatial(&mut ctx).unwrap();

        let k = ctx.stiffness_velocity().to_dense();
        let m = ctx.mass().to_dense();
        let n = k.nrows();
        for i in 0..n {
            for j in 0..n {
                assert!((k[[i, j]] - k[[j, i]]).abs() < 1e-12);
                assert!((m[[i, j]] - m[[j, i]]).abs() < 1e-12);
            }
            let row: f64 = k.row(i).sum();
            assert!(row.abs() < 1e-12, "stiffness row {i} sum = {row}");
        }
        // Σ M = ∫∫ r dr dz over [0.5, 2] × [0, 1]
        let total: f64 = m.iter().sum();
        assert!((total - 1.875).abs() < 1e-12, "mass total = {total}");
    }

    #[test]
    fn test_reassembly_does_not_accumulate() {
        let grid = Grid::uniform(2, 2, 0.0, 1.0, 0.0, 1.0).unwrap();
        let mut ctx = context([0.1, 0.2], BoundarySet::new(), grid);
        EquationAssembler::assemble_spatial(&mut ctx).unwrap();
        let first = ctx.stiffness_velocity().to_dense();
        EquationAssembler::assemble_spatial(&mut ctx).unwrap();
        assert_eq!(first, ctx.stiffness_velocity().to_dense());
    }

    #[test]
    fn test_convection_makes_operator_nonsymmetric() {
        let grid = Grid::uniform(2, 2, 1.0, 2.0, 0.0, 1.0).unwrap();
        let mut ctx = context([0.0, 5.0], BoundarySet::new(), grid);
        EquationAssembler::assemble_spatial(&mut ctx).unwrap();
        let k = ctx.stiffness_velocity();
        assert!((k.get(3, 0) - k.get(0, 3)).abs() > 1e-6);
    }

    #[test]
    fn test_build_equation_applies_boundary_and_step() {
        let grid = Grid::uniform(1, 1, 1.0, 2.0, 0.0, 1.0).unwrap();
        let mut boundary = BoundarySet::new();
        boundary
            .push(
                &grid,
                BoundaryCondition::Second {
                    element: 0,
                    side: Side::Bottom,
                    flux: [1.0, 1.0],
                    component: ComponentType::Real,
                },
            )
            .unwrap();
        let mut ctx = context([0.0, 0.0], boundary, grid);
        let mut scheme = EquationAssembler::assemble_spatial(&mut ctx).unwrap();
        ctx.set_initial(vec![0.0; 4]).unwrap();

        let eq = EquationAssembler::build_equation(&mut scheme, &ctx, 1).unwrap();
        // Zero initial field: the rhs is the boundary flux alone
        assert!((eq.rhs.iter().sum::<f64>() - 1.5).abs() < 1e-14);
        // Δt = 1: diagonal is K + M
        let expected = ctx.stiffness_velocity().get(0, 0) + ctx.mass().get(0, 0);
        assert!((eq.matrix.get(0, 0) - expected).abs() < 1e-14);
    }

    #[test]
    fn test_build_equation_requires_previous_layer() {
        let grid = Grid::uniform(1, 1, 0.0, 1.0, 0.0, 1.0).unwrap();
        let mut ctx = context([0.0, 0.0], BoundarySet::new(), grid);
        let mut scheme = EquationAssembler::assemble_spatial(&mut ctx).unwrap();
        ctx.set_initial(vec![0.0; 4]).unwrap();
        assert!(EquationAssembler::build_equation(&mut scheme, &ctx, 0).is_err());
        assert!(EquationAssembler::build_equation(&mut scheme, &ctx, 2).is_err());
        assert!(EquationAssembler::build_equation(&mut scheme, &ctx, 3).is_err());
    }
}
