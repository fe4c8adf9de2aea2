// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Stiffness Assembler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use boiling_math::templates::{mass_r, mass_z, mu, nu, stiffness_r, stiffness_z};

use super::{ElementView, LocalMatrix, LocalMatrixAssembler, NODES};

/// Diffusion operator `λ (S_R ⊗ M_Z + M_R ⊗ S_Z)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StiffnessAssembler;

impl LocalMatrixAssembler for StiffnessAssembler {
    fn assemble(&self, view: &ElementView<'_>, local: &mut LocalMatrix) {
        let e = view.element;
        let sr = stiffness_r(view.r0(), e.width);
        let mr = mass_r(view.r0(), e.width);
        let sz = stiffness_z(e.length);
        let mz = mass_z(e.length);
        let lambda = view.material.lambda;

        local.reset(e);
        for i in 0..NODES {
            for j in 0..NODES {
                let (a, b) = (mu(i), mu(j));
                let (c, d) = (nu(i), nu(j));
                local.values[i][j] = lambda * (sr[a][b] * mz[c][d] + mr[a][b] * sz[c][d]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembling::test_support::single_element;
    use crate::material::MaterialTable;
    use boiling_types::state::Material;

    #[test]
    fn test_stiffness_symmetric_and_annihilates_constants() {
        let grid = single_element(0.5, 0.3, 1.0, 0.7);
        let table = MaterialTable::new(vec![Material::new(2.5, 1.0, 1.0)]);
        let view = ElementView::new(&grid, &grid.elements[0], &table).unwrap();
        let mut local = LocalMatrix::new();
        StiffnessAssembler.assemble(&view, &mut local);

        assert!(local.is_symmetric(1e-14));
        for row in &local.values {
            let sum: f64 = row.iter().sum();
            assert!(sum.abs() < 1e-12, "row sum = {sum}");
        }
        for i in 0..NODES {
            assert!(local.values[i][i] > 0.0);
        }
    }

    #[test]
    fn test_stiffness_energy_of_linear_r_field() {
        // u = r on [1,2]×[0,1]: ∫∫ |∇u|² r dr dz = ∫_1^2 r dr = 1.5
        let grid = single_element(1.0, 1.0, 0.0, 1.0);
        let table = MaterialTable::new(vec![Material::new(1.0, 1.0, 1.0)]);
        let view = ElementView::new(&grid, &grid.elements[0], &table).unwrap();
        let mut local = LocalMatrix::new();
        StiffnessAssembler.assemble(&view, &mut local);

        let u = [1.0, 2.0, 1.0, 2.0];
        let mut energy = 0.0;
        for i in 0..NODES {
            for j in 0..NODES {
                energy += u[i] * local.values[i][j] * u[j];
            }
        }
        assert!((energy - 1.5).abs() < 1e-12, "energy = {energy}");
    }
}
