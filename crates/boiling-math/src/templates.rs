// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Templates
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form 1D template matrices for linear basis functions.
//!
//! On `[x0, x0 + h]` the basis is `ψ0 = (x0 + h - x)/h`, `ψ1 = (x - x0)/h`.
//! The R-direction templates carry the cylindrical weight `r`; the
//! Z-direction templates do not. Local 2D node `i` uses R-index `i % 2`
//! and Z-index `i / 2`.

/// 2×2 template matrix.
pub type Template = [[f64; 2]; 2];

/// `∫ ψi' ψj' r dr` over `[r0, r0 + h]`.
pub fn stiffness_r(r0: f64, h: f64) -> Template {
    let c = (2.0 * r0 + h) / (2.0 * h);
    [[c, -c], [-c, c]]
}

/// `∫ ψi ψj r dr` over `[r0, r0 + h]`.
pub fn mass_r(r0: f64, h: f64) -> Template {
    let k = h / 12.0;
    let off = k * (2.0 * r0 + h);
    [[k * (4.0 * r0 + h), off], [off, k * (4.0 * r0 + 3.0 * h)]]
}

/// `∫ ψi' ψj' dz` over an interval of length `h`.
pub fn stiffness_z(h: f64) -> Template {
    let c = 1.0 / h;
    [[c, -c], [-c, c]]
}

/// `∫ ψi ψj dz` over an interval of length `h`.
pub fn mass_z(h: f64) -> Template {
    let k = h / 6.0;
    [[2.0 * k, k], [k, 2.0 * k]]
}

/// R-template index of local node `i`.
#[inline]
pub fn mu(i: usize) -> usize {
    i % 2
}

/// Z-template index of local node `i`.
#[inline]
pub fn nu(i: usize) -> usize {
    i / 2
}
