// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Convection Assembler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use boiling_math::quadrature::GaussLegendre;
use boiling_types::state::Point;

use super::{ElementView, LocalMatrix, LocalMatrixAssembler, NODES};
use crate::velocity::VelocityField;

/// Convection operator
/// `A[i][j] = -Cp ρ ∫∫ (v_R ∂φi/∂R + v_Z ∂φi/∂Z) φj r dr dz`,
/// integrated with a tensor Gauss-Legendre rule. Not symmetric.
pub struct ConvectionAssembler<'v> {
    velocity: &'v dyn VelocityField,
    quadrature: GaussLegendre,
}

impl<'v> ConvectionAssembler<'v> {
    pub fn new(velocity: &'v dyn VelocityField, quadrature: GaussLegendre) -> Self {
        ConvectionAssembler {
            velocity,
            quadrature,
        }
    }
}

impl LocalMatrixAssembler for ConvectionAssembler<'_> {
    fn assemble(&self, view: &ElementView<'_>, local: &mut LocalMatrix) {
        let basis = view.basis();
        let capacity = view.material.capacity();
        let r_span = basis.r_interval();
        let z_span = basis.z_interval();

        local.reset(view.element);
        for i in 0..NODES {
            for j in 0..NODES {
                let integral = self.quadrature.integrate_2d(r_span, z_span, |r, z| {
                    let p = Point::new(r, z);
                    let [v_r, v_z] = self.velocity.velocity(p);
                    let advect = v_r * basis.d_dr(i, z) + v_z * basis.d_dz(i, r);
                    advect * basis.value(j, p) * r
                });
                local.values[i][j] = -capacity * integral;
            }
        }
    }
}
