// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Mass Assembler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use boiling_math::templates::{mass_r, mass_z, mu, nu};

use super::{ElementView, LocalMatrix, LocalMatrixAssembler, NODES};

/// Capacity operator `Cp ρ (M_R ⊗ M_Z)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MassAssembler;

impl LocalMatrixAssembler for MassAssembler {
    fn assemble(&self, view: &ElementView<'_>, local: &mut LocalMatrix) {
        let e = view.element;
        let mr = mass_r(view.r0(), e.width);
        let mz = mass_z(e.length);
        let capacity = view.material.capacity();

        local.reset(e);
        for i in 0..NODES {
            for j in 0..NODES {
                local.values[i][j] = capacity * mr[mu(i)][mu(j)] * mz[nu(i)][nu(j)];
            }
        }
    }
}
