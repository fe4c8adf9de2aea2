// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Boundary Conditions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Boundary conditions on element edges.
//!
//! Each condition targets one edge (element index + side) and mutates an
//! assembled equation in place. Within one step they are applied in the
//! order second kind, third kind, first kind, so that a prescribed value
//! always wins on shared corner nodes.
//!
//! The edge mass `E` is the 1D mass matrix of the edge with the
//! cylindrical weight: `M_R(r0, h)` on bottom/top edges, `r · M_Z(h)` on
//! left/right edges.

use boiling_math::sparse::SparseMatrix;
use boiling_math::templates::{mass_r, mass_z, Template};
use boiling_types::config::{BoundaryConfig, ComponentType};
use boiling_types::error::{BoilingError, BoilingResult};
use boiling_types::state::{Grid, Side};

use crate::scheme::Equation;

#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryCondition {
    /// Prescribed temperature on both edge nodes.
    First {
        element: usize,
        side: Side,
        value: f64,
    },
    /// Prescribed heat flux into the domain, per edge node.
    Second {
        element: usize,
        side: Side,
        flux: [f64; 2],
        component: ComponentType,
    },
    /// Convective exchange `β (T_ambient - T)`, β per edge node.
    Third {
        element: usize,
        side: Side,
        beta: [f64; 2],
        ambient: f64,
    },
}

impl BoundaryCondition {
    pub fn element(&self) -> usize {
        match *self {
            BoundaryCondition::First { element, .. }
            | BoundaryCondition::Second { element, .. }
            | BoundaryCondition::Third { element, .. } => element,
        }
    }

    pub fn side(&self) -> Side {
        match *self {
            BoundaryCondition::First { side, .. }
            | BoundaryCondition::Second { side, .. }
            | BoundaryCondition::Third { side, .. } => side,
        }
    }

    /// Position in the per-step application order.
    fn stage(&self) -> u8 {
        match self {
            BoundaryCondition::Second { .. } => 0,
            BoundaryCondition::Third { .. } => 1,
            BoundaryCondition::First { .. } => 2,
        }
    }

    /// Reject conditions that cannot be applied on `grid`.
    pub fn validate(&self, grid: &Grid) -> BoilingResult<()> {
        if self.element() >= grid.elements.len() {
            return Err(BoilingError::Boundary(format!(
                "element {} out of range (grid has {} elements)",
                self.element(),
                grid.elements.len()
            )));
        }
        match self {
            BoundaryCondition::Second {
                component: ComponentType::Imaginary,
                ..
            } => Err(BoilingError::Boundary(
                "imaginary flux component is not supported by the real-valued scheme".into(),
            )),
            BoundaryCondition::Third { beta, .. } if beta.iter().any(|b| *b < 0.0) => Err(
                BoilingError::Boundary(format!("negative exchange coefficient {beta:?}")),
            ),
            _ => Ok(()),
        }
    }

    /// Mutate `matrix` and `rhs` in place.
    pub fn apply(&self, grid: &Grid, matrix: &mut SparseMatrix, rhs: &mut [f64]) {
        let (nodes, mass) = edge_mass(grid, self.element(), self.side());
        match *self {
            BoundaryCondition::First { value, .. } => {
                for node in nodes {
                    matrix.exclude(node, value, rhs);
                }
            }
            BoundaryCondition::Second { flux, .. } => {
                for k in 0..2 {
                    rhs[nodes[k]] += mass[k][0] * flux[0] + mass[k][1] * flux[1];
                }
            }
            BoundaryCondition::Third { beta, ambient, .. } => {
                for k in 0..2 {
                    for m in 0..2 {
                        let value = mass[k][m] * 0.5 * (beta[k] + beta[m]);
                        matrix.add(nodes[k], nodes[m], value);
                        rhs[nodes[k]] += value * ambient;
                    }
                }
            }
        }
    }
}

/// Global edge nodes of `element` on `side` and the weighted edge mass.
pub fn edge_mass(grid: &Grid, element: usize, side: Side) -> ([usize; 2], Template) {
    let nodes = grid.elements[element].bound_node_indexes(side);
    let a = grid.nodes[nodes[0]];
    let b = grid.nodes[nodes[1]];
    let mass = match side {
        Side::Bottom | Side::Top => mass_r(a.r, b.r - a.r),
        Side::Left | Side::Right => {
            let m = mass_z(b.z - a.z);
            [[a.r * m[0][0], a.r * m[0][1]], [a.r * m[1][0], a.r * m[1][1]]]
        }
    };
    (nodes, mass)
}

/// All boundary conditions of one solve.
#[derive(Debug, Clone, Default)]
pub struct BoundarySet {
    conditions: Vec<BoundaryCondition>,
}

impl BoundarySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand side-wide config entries onto every boundary element.
    pub fn from_config(grid: &Grid, entries: &[BoundaryConfig]) -> BoilingResult<Self> {
        let mut set = BoundarySet::new();
        for entry in entries {
            let side = match entry {
                BoundaryConfig::First { side, .. }
                | BoundaryConfig::Second { side, .. }
                | BoundaryConfig::Third { side, .. } => *side,
            };
            for element in grid.boundary_elements(side) {
                let condition = match *entry {
                    BoundaryConfig::First { value, .. } => BoundaryCondition::First {
                        element,
                        side,
                        value,
                    },
                    BoundaryConfig::Second {
                        flux, component, ..
                    } => BoundaryCondition::Second {
                        element,
                        side,
                        flux: [flux, flux],
                        component,
                    },
                    BoundaryConfig::Third { beta, ambient, .. } => BoundaryCondition::Third {
                        element,
                        side,
                        beta: [beta, beta],
                        ambient,
                    },
                };
                set.push(grid, condition)?;
            }
        }
        Ok(set)
    }

    pub fn push(&mut self, grid: &Grid, condition: BoundaryCondition) -> BoilingResult<()> {
        condition.validate(grid)?;
        self.conditions.push(condition);
        Ok(())
    }

    pub fn validate(&self, grid: &Grid) -> BoilingResult<()> {
        self.conditions.iter().try_for_each(|c| c.validate(grid))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundaryCondition> {
        self.conditions.iter()
    }

    /// Apply every condition: second kind, then third, then first.
    pub fn apply(&self, grid: &Grid, equation: &mut Equation<'_>) {
        for stage in 0..3 {
            for condition in self.conditions.iter().filter(|c| c.stage() == stage) {
                condition.apply(grid, &mut *equation.matrix, &mut *equation.rhs);
            }
        }
    }
}
