// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Local Assembly
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-element 4×4 operators and their scatter into global matrices.
//!
//! Local node order is `[bottom-left, bottom-right, top-left, top-right]`;
//! every formula here depends on it.

mod convection;
mod mass;
mod stiffness;

pub use convection::ConvectionAssembler;
pub use mass::MassAssembler;
pub use stiffness::StiffnessAssembler;

use boiling_math::basis::BilinearBasis;
use boiling_math::sparse::SparseMatrix;
use boiling_types::error::BoilingResult;
use boiling_types::state::{Element, Grid, Material, Point};

use crate::material::MaterialProvider;

/// Nodes per element.
pub const NODES: usize = 4;

/// Fixed-size scratch for one element: dense values plus the global
/// index permutation used to scatter them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMatrix {
    pub values: [[f64; NODES]; NODES],
    pub indexes: [usize; NODES],
}

impl LocalMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the values and bind the permutation to `element`.
    #[inline]
    pub fn reset(&mut self, element: &Element) {
        self.values = [[0.0; NODES]; NODES];
        self.indexes = element.node_indexes;
    }

    /// Add the values into `matrix` at the bound global indexes.
    ///
    /// # Panics
    ///
    /// Panics if a pair of indexes is missing from the matrix portrait.
    #[inline]
    pub fn scatter(&self, matrix: &mut SparseMatrix) {
        matrix.add_local(&self.values, &self.indexes);
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..NODES).all(|i| (0..i).all(|j| (self.values[i][j] - self.values[j][i]).abs() <= tol))
    }
}

/// Geometry and material of one element, resolved once per element.
#[derive(Debug, Clone, Copy)]
pub struct ElementView<'a> {
    pub element: &'a Element,
    pub material: &'a Material,
    pub bottom_left: Point,
    pub top_right: Point,
}

impl<'a> ElementView<'a> {
    pub fn new(
        grid: &'a Grid,
        element: &'a Element,
        materials: &'a dyn MaterialProvider,
    ) -> BoilingResult<Self> {
        Ok(ElementView {
            element,
            material: materials.get_by_id(element.material_id)?,
            bottom_left: grid.nodes[element.node_indexes[0]],
            top_right: grid.nodes[element.node_indexes[3]],
        })
    }

    /// Left-edge radius, the reference radius of the R templates.
    #[inline]
    pub fn r0(&self) -> f64 {
        self.bottom_left.r
    }

    #[inline]
    pub fn basis(&self) -> BilinearBasis {
        BilinearBasis::new(self.bottom_left, self.top_right)
    }
}

/// Computes one dense element operator into reusable scratch.
pub trait LocalMatrixAssembler {
    /// Overwrite `local` with this operator on `view`.
    fn assemble(&self, view: &ElementView<'_>, local: &mut LocalMatrix);
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialTable;
    use boiling_math::sparse::SparsePortrait;
    use std::sync::Arc;

    #[test]
    fn test_reset_binds_indexes() {
        let grid = Grid::uniform(2, 1, 0.0, 2.0, 0.0, 1.0).unwrap();
        let mut local = LocalMatrix::new();
        local.values[1][2] = 5.0;
        local.reset(&grid.elements[1]);
        assert_eq!(local.indexes, [1, 2, 4, 5]);
        assert_eq!(local.values[1][2], 0.0);
    }

    #[test]
    fn test_scatter_accumulates_shared_nodes() {
        let grid = Grid::uniform(2, 1, 0.0, 2.0, 0.0, 1.0).unwrap();
        let portrait = SparsePortrait::build(&grid.elements, grid.nodes_count());
        let mut matrix = SparseMatrix::new(Arc::new(portrait));
        let mut local = LocalMatrix::new();
        for e in &grid.elements {
            local.reset(e);
            local.values = [[1.0; NODES]; NODES];
            local.scatter(&mut matrix);
        }
        // Nodes 1 and 4 are shared by both elements
        assert_eq!(matrix.get(1, 1), 2.0);
        assert_eq!(matrix.get(4, 1), 2.0);
        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(2, 0), 0.0);
    }

    #[test]
    fn test_view_resolves_material() {
        let grid = test_support::single_element(1.0, 0.5, 0.0, 0.25);
        let table = MaterialTable::new(vec![Material::new(2.0, 3.0, 4.0)]);
        let view = ElementView::new(&grid, &grid.elements[0], &table).unwrap();
        assert_eq!(view.material.capacity(), 12.0);
        assert_eq!(view.r0(), 1.0);
        assert_eq!(view.top_right, Point::new(1.5, 0.25));

        let empty = MaterialTable::default();
        assert!(ElementView::new(&grid, &grid.elements[0], &empty).is_err());
    }
}
