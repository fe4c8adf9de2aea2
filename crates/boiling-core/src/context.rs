// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Context
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Single-owner state of one solve.
//!
//! Holds the grid, material and velocity providers, the two persistent
//! spatial operators (stiffness + convection, and mass) on one shared
//! portrait, the boundary conditions, the time layers and the per-layer
//! nodal solutions. Stages borrow it immutably or mutably as they need.

use std::sync::Arc;

use boiling_math::quadrature::GaussLegendre;
use boiling_math::sparse::{SparseMatrix, SparsePortrait};
use boiling_types::config::BoilingConfig;
use boiling_types::error::{BoilingError, BoilingResult};
use boiling_types::state::Grid;

use crate::boundary::BoundarySet;
use crate::material::{MaterialProvider, MaterialTable};
use crate::velocity::{UniformVelocity, VelocityField};

/// Disjoint borrows used by the spatial assembly pass.
pub(crate) struct AssemblyParts<'a> {
    pub grid: &'a Grid,
    pub materials: &'a dyn MaterialProvider,
    pub velocity: &'a dyn VelocityField,
    pub quadrature: GaussLegendre,
    pub stiffness_velocity: &'a mut SparseMatrix,
    pub mass: &'a mut SparseMatrix,
}

pub struct BoilingContext {
    grid: Grid,
    materials: Box<dyn MaterialProvider>,
    velocity: Box<dyn VelocityField>,
    quadrature: GaussLegendre,
    stiffness_velocity: SparseMatrix,
    mass: SparseMatrix,
    boundary: BoundarySet,
    time_layers: Vec<f64>,
    time_solutions: Vec<Vec<f64>>,
}

impl BoilingContext {
    /// Validate inputs and allocate the empty operators.
    ///
    /// Fails if fewer than two time layers are given, if they are not
    /// strictly ascending, if an element references an unknown or
    /// non-physical material or if a boundary condition cannot be applied
    /// on `grid`.
    pub fn new(
        grid: Grid,
        materials: Box<dyn MaterialProvider>,
        velocity: Box<dyn VelocityField>,
        boundary: BoundarySet,
        time_layers: Vec<f64>,
    ) -> BoilingResult<Self> {
        check_time_layers(&time_layers)?;
        for element in &grid.elements {
            materials.get_by_id(element.material_id)?.validate()?;
        }
        boundary.validate(&grid)?;

        let portrait = Arc::new(SparsePortrait::build(&grid.elements, grid.nodes_count()));
        let stiffness_velocity = SparseMatrix::new(Arc::clone(&portrait));
        let mass = SparseMatrix::new(portrait);

        Ok(BoilingContext {
            grid,
            materials,
            velocity,
            quadrature: GaussLegendre::new(2)?,
            stiffness_velocity,
            mass,
            boundary,
            time_layers,
            time_solutions: Vec::new(),
        })
    }

    /// Build the full context described by a case configuration.
    pub fn from_config(config: &BoilingConfig) -> BoilingResult<Self> {
        config.validate()?;
        let grid = config.create_grid()?;
        let boundary = BoundarySet::from_config(&grid, &config.boundary)?;
        let materials = MaterialTable::new(config.materials.clone());
        let velocity = UniformVelocity::from(config.velocity);
        BoilingContext::new(
            grid,
            Box::new(materials),
            Box::new(velocity),
            boundary,
            config.time.layers(),
        )?
        .with_quadrature(config.quadrature_points)
    }

    /// Use an `points`-point Gauss-Legendre rule per axis for convection.
    pub fn with_quadrature(mut self, points: usize) -> BoilingResult<Self> {
        self.quadrature = GaussLegendre::new(points)?;
        Ok(self)
    }

    /// Reset the stored solutions to the initial condition at layer 0.
    pub fn set_initial(&mut self, initial: Vec<f64>) -> BoilingResult<()> {
        if initial.len() != self.grid.nodes_count() {
            return Err(BoilingError::DimensionMismatch {
                expected: self.grid.nodes_count(),
                actual: initial.len(),
            });
        }
        self.time_solutions.clear();
        self.time_solutions.push(initial);
        Ok(())
    }

    /// Store the solution of the next unsolved layer.
    pub(crate) fn push_solution(&mut self, solution: Vec<f64>) -> BoilingResult<()> {
        if self.time_solutions.len() >= self.time_layers.len() {
            return Err(BoilingError::InvalidTimeLayers(
                "all time layers are already solved".into(),
            ));
        }
        if solution.len() != self.grid.nodes_count() {
            return Err(BoilingError::DimensionMismatch {
                expected: self.grid.nodes_count(),
                actual: solution.len(),
            });
        }
        self.time_solutions.push(solution);
        Ok(())
    }

    pub(crate) fn assembly_parts(&mut self) -> AssemblyParts<'_> {
        AssemblyParts {
            grid: &self.grid,
            materials: self.materials.as_ref(),
            velocity: self.velocity.as_ref(),
            quadrature: self.quadrature,
            stiffness_velocity: &mut self.stiffness_velocity,
            mass: &mut self.mass,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stiffness_velocity(&self) -> &SparseMatrix {
        &self.stiffness_velocity
    }

    pub fn mass(&self) -> &SparseMatrix {
        &self.mass
    }

    pub fn boundary(&self) -> &BoundarySet {
        &self.boundary
    }

    pub fn time_layers(&self) -> &[f64] {
        &self.time_layers
    }

    pub fn time_solutions(&self) -> &[Vec<f64>] {
        &self.time_solutions
    }

    /// Number of layers with a stored solution.
    pub fn solved_layers(&self) -> usize {
        self.time_solutions.len()
    }

    /// Release the grid, layers and solutions for post-processing.
    pub fn into_parts(self) -> (Grid, Vec<f64>, Vec<Vec<f64>>) {
        (self.grid, self.time_layers, self.time_solutions)
    }
}

/// At least two finite, strictly ascending layers.
pub fn check_time_layers(layers: &[f64]) -> BoilingResult<()> {
    if layers.len() < 2 {
        return Err(BoilingError::InvalidTimeLayers(format!(
            "need at least 2 time layers, got {}",
            layers.len()
        )));
    }
    if layers.iter().any(|t| !t.is_finite()) {
        return Err(BoilingError::InvalidTimeLayers(
            "time layers must be finite".into(),
        ));
    }
    if let Some(k) = layers.windows(2).position(|w| w[1] <= w[0]) {
        return Err(BoilingError::InvalidTimeLayers(format!(
            "time layers must be strictly ascending: t[{}] = {} >= t[{}] = {}",
            k,
            layers[k],
            k + 1,
            layers[k + 1]
        )));
    }
    Ok(())
}
