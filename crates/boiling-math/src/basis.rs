// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Basis
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bilinear basis on an axis-aligned rectangle.
//!
//! `φ_i(r, z) = X_{i%2}(r) · Y_{i/2}(z)` with `X0 = (r1 - r)/w`,
//! `X1 = (r - r0)/w` and the same in Z, matching the element node order
//! `[bottom-left, bottom-right, top-left, top-right]`.

use boiling_types::state::Point;

#[derive(Debug, Clone, Copy)]
pub struct BilinearBasis {
    r0: f64,
    r1: f64,
    z0: f64,
    z1: f64,
    width: f64,
    length: f64,
}

impl BilinearBasis {
    /// Basis on the box spanned by the bottom-left and top-right corners.
    pub fn new(bottom_left: Point, top_right: Point) -> Self {
        BilinearBasis {
            r0: bottom_left.r,
            r1: top_right.r,
            z0: bottom_left.z,
            z1: top_right.z,
            width: top_right.r - bottom_left.r,
            length: top_right.z - bottom_left.z,
        }
    }

    #[inline]
    pub fn r_interval(&self) -> (f64, f64) {
        (self.r0, self.r1)
    }

    #[inline]
    pub fn z_interval(&self) -> (f64, f64) {
        (self.z0, self.z1)
    }

    #[inline]
    fn x(&self, k: usize, r: f64) -> f64 {
        if k == 0 {
            (self.r1 - r) / self.width
        } else {
            (r - self.r0) / self.width
        }
    }

    #[inline]
    fn y(&self, k: usize, z: f64) -> f64 {
        if k == 0 {
            (self.z1 - z) / self.length
        } else {
            (z - self.z0) / self.length
        }
    }

    #[inline]
    pub fn value(&self, i: usize, p: Point) -> f64 {
        self.x(i % 2, p.r) * self.y(i / 2, p.z)
    }

    pub fn values(&self, p: Point) -> [f64; 4] {
        [0, 1, 2, 3].map(|i| self.value(i, p))
    }

    /// `∂φ_i/∂R`, a linear function of `z` only.
    #[inline]
    pub fn d_dr(&self, i: usize, z: f64) -> f64 {
        let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
        sign * self.y(i / 2, z) / self.width
    }

    /// `∂φ_i/∂Z`, a linear function of `r` only.
    #[inline]
    pub fn d_dz(&self, i: usize, r: f64) -> f64 {
        let sign = if i / 2 == 0 { -1.0 } else { 1.0 };
        sign * self.x(i % 2, r) / self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_basis() -> BilinearBasis {
        BilinearBasis::new(Point::new(1.0, 2.0), Point::new(1.5, 2.25))
    }

    #[test]
    fn test_kronecker_at_nodes() {
        let b = unit_basis();
        let corners = [
            Point::new(1.0, 2.0),
            Point::new(1.5, 2.0),
            Point::new(1.0, 2.25),
            Point::new(1.5, 2.25),
        ];
        for (j, &c) in corners.iter().enumerate() {
            for i in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(b.value(i, c), expected, "phi_{i} at node {j}");
            }
        }
    }

    #[test]
    fn test_partition_of_unity() {
        let b = unit_basis();
        let p = Point::new(1.13, 2.21);
        let sum: f64 = b.values(p).iter().sum();
        assert!((sum - 1.0).abs() < 1e-14);
        let dr: f64 = (0..4).map(|i| b.d_dr(i, p.z)).sum();
        let dz: f64 = (0..4).map(|i| b.d_dz(i, p.r)).sum();
        assert!(dr.abs() < 1e-12 && dz.abs() < 1e-12);
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let b = unit_basis();
        let p = Point::new(1.2, 2.1);
        let eps = 1e-7;
        for i in 0..4 {
            let fd_r = (b.value(i, Point::new(p.r + eps, p.z)) - b.value(i, Point::new(p.r - eps, p.z)))
                / (2.0 * eps);
            let fd_z = (b.value(i, Point::new(p.r, p.z + eps)) - b.value(i, Point::new(p.r, p.z - eps)))
                / (2.0 * eps);
            assert!((b.d_dr(i, p.z) - fd_r).abs() < 1e-6, "d/dR phi_{i}");
            assert!((b.d_dz(i, p.r) - fd_z).abs() < 1e-6, "d/dZ phi_{i}");
        }
    }
}
