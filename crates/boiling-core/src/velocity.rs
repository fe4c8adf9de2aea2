// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Velocity
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Prescribed convection velocity fields.

use boiling_types::state::Point;

/// `(point) -> (v_R, v_Z)`, sampled inside elements during assembly.
pub trait VelocityField {
    fn velocity(&self, point: Point) -> [f64; 2];
}

/// Spatially constant velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformVelocity {
    pub v_r: f64,
    pub v_z: f64,
}

impl UniformVelocity {
    pub fn new(v_r: f64, v_z: f64) -> Self {
        UniformVelocity { v_r, v_z }
    }
}

impl From<[f64; 2]> for UniformVelocity {
    fn from(v: [f64; 2]) -> Self {
        UniformVelocity::new(v[0], v[1])
    }
}

impl VelocityField for UniformVelocity {
    #[inline]
    fn velocity(&self, _point: Point) -> [f64; 2] {
        [self.v_r, self.v_z]
    }
}

impl<F> VelocityField for F
where
    F: Fn(Point) -> [f64; 2],
{
    #[inline]
    fn velocity(&self, point: Point) -> [f64; 2] {
        self(point)
    }
}
