// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gauss-Legendre quadrature on intervals and axis-aligned rectangles.

use boiling_types::error::{BoilingError, BoilingResult};

const MAX_POINTS: usize = 4;

/// Gauss-Legendre rule with 1 to 4 points, stored inline.
#[derive(Debug, Clone, Copy)]
pub struct GaussLegendre {
    points: usize,
    nodes: [f64; MAX_POINTS],
    weights: [f64; MAX_POINTS],
}

impl GaussLegendre {
    pub fn new(points: usize) -> BoilingResult<Self> {
        let mut nodes = [0.0; MAX_POINTS];
        let mut weights = [0.0; MAX_POINTS];
        match points {
            1 => {
                weights[0] = 2.0;
            }
            2 => {
                let x = 1.0 / 3.0_f64.sqrt();
                nodes[..2].copy_from_slice(&[-x, x]);
                weights[..2].copy_from_slice(&[1.0, 1.0]);
            }
            3 => {
                let x = (3.0_f64 / 5.0).sqrt();
                nodes[..3].copy_from_slice(&[-x, 0.0, x]);
                weights[..3].copy_from_slice(&[5.0 / 9.0, 8.0 / 9.0, 5.0 / 9.0]);
            }
            4 => {
                let (a, b) = (0.339_981_043_584_856_3, 0.861_136_311_594_052_6);
                let (wa, wb) = (0.652_145_154_862_546_1, 0.347_854_845_137_453_9);
                nodes = [-b, -a, a, b];
                weights = [wb, wa, wa, wb];
            }
            _ => {
                return Err(BoilingError::ConfigError(format!(
                    "Gauss-Legendre rule supports 1..={MAX_POINTS} points, got {points}"
                )))
            }
        }
        Ok(GaussLegendre {
            points,
            nodes,
            weights,
        })
    }

    #[inline]
    pub fn points(&self) -> usize {
        self.points
    }

    /// Highest polynomial degree integrated exactly.
    #[inline]
    pub fn exact_degree(&self) -> usize {
        2 * self.points - 1
    }

    /// `∫_a^b f(x) dx`.
    pub fn integrate<F>(&self, a: f64, b: f64, mut f: F) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        let half = 0.5 * (b - a);
        let mid = 0.5 * (a + b);
        let mut sum = 0.0;
        for k in 0..self.points {
            sum += self.weights[k] * f(mid + half * self.nodes[k]);
        }
        sum * half
    }

    /// `∫∫ f(r, z) dr dz` over `[r0, r1] × [z0, z1]` (tensor rule).
    pub fn integrate_2d<F>(&self, r: (f64, f64), z: (f64, f64), mut f: F) -> f64
    where
        F: FnMut(f64, f64) -> f64,
    {
        let hr = 0.5 * (r.1 - r.0);
        let mr = 0.5 * (r.0 + r.1);
        let hz = 0.5 * (z.1 - z.0);
        let mz = 0.5 * (z.0 + z.1);
        let mut sum = 0.0;
        for a in 0..self.points {
            let ra = mr + hr * self.nodes[a];
            for b in 0..self.points {
                let zb = mz + hz * self.nodes[b];
                sum += self.weights[a] * self.weights[b] * f(ra, zb);
            }
        }
        sum * hr * hz
    }
}
