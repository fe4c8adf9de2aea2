// ─────────────────────────────────────────────────────────────────────
// Boiling Core — GMRES
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Restarted GMRES(m) for the nonsymmetric FEM systems.
//!
//! The Krylov basis is built by Arnoldi iteration with modified
//! Gram-Schmidt, and the projected least-squares problem is solved with
//! Givens rotations on the upper Hessenberg matrix. When the basis
//! reaches size `m` without convergence the solver restarts from the
//! current approximate solution.
//!
//! A left Jacobi preconditioner is applied: instead of `A x = b` we
//! solve `D⁻¹ A x = D⁻¹ b` with `D = diag(A)`. Convergence is measured
//! on the preconditioned residual relative to the larger of the
//! preconditioned rhs and the initial residual, so a warm start close to
//! the solution is accepted without chasing round-off.

use boiling_types::config::SolverConfig;

use crate::sparse::SparseMatrix;

// ───────────────────────────── configuration ─────────────────────────

/// Configuration for the GMRES(m) solver.
#[derive(Debug, Clone)]
pub struct GmresConfig {
    /// Krylov subspace dimension before restart (default: 30).
    pub restart: usize,
    /// Maximum number of outer (restart) iterations (default: 100).
    pub max_iter: usize,
    /// Convergence tolerance on the relative residual norm (default: 1e-12).
    pub tol: f64,
}

impl Default for GmresConfig {
    fn default() -> Self {
        GmresConfig::from(&SolverConfig::default())
    }
}

impl From<&SolverConfig> for GmresConfig {
    fn from(cfg: &SolverConfig) -> Self {
        GmresConfig {
            restart: cfg.restart,
            max_iter: cfg.max_iterations,
            tol: cfg.tolerance,
        }
    }
}

/// Result of a GMRES solve.
#[derive(Debug, Clone)]
pub struct GmresResult {
    /// Inner iterations summed over all restarts.
    pub iterations: usize,
    /// Final unpreconditioned L2 residual norm.
    pub residual: f64,
    pub converged: bool,
}

// ───────────────────────── BLAS-like helpers ─────────────────────────

#[inline]
fn vec_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[inline]
fn vec_dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// `y = y + alpha * x`.
#[inline]
fn vec_axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (yi, &xi) in y.iter_mut().zip(x.iter()) {
        *yi += alpha * xi;
    }
}

/// `y = alpha * x`.
#[inline]
fn vec_scale(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (yi, &xi) in y.iter_mut().zip(x.iter()) {
        *yi = alpha * xi;
    }
}

/// `out = a - b`.
#[inline]
fn vec_sub(a: &[f64], b: &[f64], out: &mut [f64]) {
    for ((oi, &ai), &bi) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *oi = ai - bi;
    }
}

/// `v[i] *= inv_diag[i]`.
#[inline]
fn precondition(inv_diag: &[f64], v: &mut [f64]) {
    for (vi, &d) in v.iter_mut().zip(inv_diag.iter()) {
        *vi *= d;
    }
}

/// Inverse diagonal, with zero or non-finite entries left unscaled.
fn jacobi_inverse(matrix: &SparseMatrix) -> Vec<f64> {
    matrix
        .diagonal
        .iter()
        .map(|&d| {
            if d.abs() > 1e-300 && d.is_finite() {
                1.0 / d
            } else {
                1.0
            }
        })
        .collect()
}

/// `out = b - A x`.
fn residual(matrix: &SparseMatrix, rhs: &[f64], x: &[f64], scratch: &mut [f64], out: &mut [f64]) {
    matrix.multiply(x, scratch);
    vec_sub(rhs, scratch, out);
}

// ───────────────────── Givens rotation helpers ──────────────────────

/// A single Givens rotation storing (c, s) such that
/// ```text
/// | c  s | | a |   | r |
/// |-s  c | | b | = | 0 |
/// ```
#[derive(Clone, Copy)]
struct GivensRotation {
    c: f64,
    s: f64,
}

impl GivensRotation {
    fn compute(a: f64, b: f64) -> Self {
        if b.abs() < 1e-300 {
            GivensRotation { c: 1.0, s: 0.0 }
        } else if b.abs() > a.abs() {
            let tau = -a / b;
            let s = 1.0 / (1.0 + tau * tau).sqrt();
            let c = s * tau;
            GivensRotation { c, s }
        } else {
            let tau = -b / a;
            let c = 1.0 / (1.0 + tau * tau).sqrt();
            let s = c * tau;
            GivensRotation { c, s }
        }
    }

    #[inline]
    fn apply(&self, a: &mut f64, b: &mut f64) {
        let ta = *a;
        let tb = *b;
        *a = self.c * ta - self.s * tb;
        *b = self.s * ta + self.c * tb;
    }
}

// ─────────────────────────── main solver ─────────────────────────────

/// Solve `A x = rhs` with restarted GMRES(m) and a left Jacobi
/// preconditioner.
///
/// `x` is the initial guess on entry and the solution on exit.
///
/// # Panics
///
/// Panics if `rhs` or `x` do not match the matrix size.
pub fn gmres_solve(
    matrix: &SparseMatrix,
    rhs: &[f64],
    x: &mut [f64],
    config: &GmresConfig,
) -> GmresResult {
    let n = matrix.size();
    assert_eq!(rhs.len(), n, "rhs length must match the matrix size");
    assert_eq!(x.len(), n, "solution length must match the matrix size");

    if n == 0 {
        return GmresResult {
            iterations: 0,
            residual: 0.0,
            converged: true,
        };
    }

    let m = config.restart.clamp(1, n);
    let inv_diag = jacobi_inverse(matrix);

    let mut av = vec![0.0; n];
    let mut r = vec![0.0; n];

    residual(matrix, rhs, x, &mut av, &mut r);
    precondition(&inv_diag, &mut r);
    let initial_norm = vec_norm(&r);

    if initial_norm < 1e-300 {
        residual(matrix, rhs, x, &mut av, &mut r);
        return GmresResult {
            iterations: 0,
            residual: vec_norm(&r),
            converged: true,
        };
    }

    let mut scaled_rhs = rhs.to_vec();
    precondition(&inv_diag, &mut scaled_rhs);
    let abs_tol = config.tol * vec_norm(&scaled_rhs).max(initial_norm);
    let mut total_iters: usize = 0;

    let h_rows = m + 1;
    let mut v_basis: Vec<Vec<f64>> = Vec::with_capacity(m + 1);
    let mut h_store = vec![0.0; h_rows * m];
    let mut givens: Vec<GivensRotation> = Vec::with_capacity(m);
    let mut g = vec![0.0; m + 1];
    let mut w = vec![0.0; n];

    // ───── outer restart loop ─────
    for restart in 0..config.max_iter {
        residual(matrix, rhs, x, &mut av, &mut r);
        precondition(&inv_diag, &mut r);

        let beta = vec_norm(&r);
        tracing::trace!(restart, residual = beta, "gmres restart");
        if beta < abs_tol {
            residual(matrix, rhs, x, &mut av, &mut r);
            return GmresResult {
                iterations: total_iters,
                residual: vec_norm(&r),
                converged: true,
            };
        }

        v_basis.clear();
        {
            let mut v0 = vec![0.0; n];
            vec_scale(1.0 / beta, &r, &mut v0);
            v_basis.push(v0);
        }
        h_store.fill(0.0);
        givens.clear();
        g.fill(0.0);
        g[0] = beta;

        let mut converged_inner = false;
        let mut inner_iters: usize = 0;

        // ───── Arnoldi iteration ─────
        for j in 0..m {
            inner_iters = j + 1;
            total_iters += 1;

            // w = D⁻¹ A V[j]
            matrix.multiply(&v_basis[j], &mut w);
            precondition(&inv_diag, &mut w);

            for i in 0..=j {
                let h_ij = vec_dot(&w, &v_basis[i]);
                h_store[j * h_rows + i] = h_ij;
                vec_axpy(-h_ij, &v_basis[i], &mut w);
            }

            let h_next = vec_norm(&w);
            h_store[j * h_rows + (j + 1)] = h_next;

            if h_next > 1e-300 {
                let mut v_next = vec![0.0; n];
                vec_scale(1.0 / h_next, &w, &mut v_next);
                v_basis.push(v_next);
            } else {
                v_basis.push(vec![0.0; n]);
            }

            for (i, rot) in givens.iter().enumerate() {
                let mut ha = h_store[j * h_rows + i];
                let mut hb = h_store[j * h_rows + i + 1];
                rot.apply(&mut ha, &mut hb);
                h_store[j * h_rows + i] = ha;
                h_store[j * h_rows + i + 1] = hb;
            }

            let rot =
                GivensRotation::compute(h_store[j * h_rows + j], h_store[j * h_rows + (j + 1)]);
            {
                let mut ha = h_store[j * h_rows + j];
                let mut hb = h_store[j * h_rows + (j + 1)];
                rot.apply(&mut ha, &mut hb);
                h_store[j * h_rows + j] = ha;
                h_store[j * h_rows + (j + 1)] = hb;
            }
            {
                let mut ga = g[j];
                let mut gb = g[j + 1];
                rot.apply(&mut ga, &mut gb);
                g[j] = ga;
                g[j + 1] = gb;
            }
            givens.push(rot);

            if g[j + 1].abs() < abs_tol || h_next < 1e-300 {
                converged_inner = true;
                break;
            }
        }

        // ───── back-substitution H y = g ─────
        let k = inner_iters;
        let mut y = vec![0.0; k];
        for i in (0..k).rev() {
            let mut sum = g[i];
            for jj in (i + 1)..k {
                sum -= h_store[jj * h_rows + i] * y[jj];
            }
            let diag = h_store[i * h_rows + i];
            y[i] = if diag.abs() > 1e-300 { sum / diag } else { 0.0 };
        }

        for (i, &yi) in y.iter().enumerate() {
            vec_axpy(yi, &v_basis[i], x);
        }

        if converged_inner {
            residual(matrix, rhs, x, &mut av, &mut r);
            return GmresResult {
                iterations: total_iters,
                residual: vec_norm(&r),
                converged: true,
            };
        }
    }

    // Exhausted restarts
    residual(matrix, rhs, x, &mut av, &mut r);
    let true_residual = vec_norm(&r);
    precondition(&inv_diag, &mut r);
    GmresResult {
        iterations: total_iters,
        residual: true_residual,
        converged: vec_norm(&r) < abs_tol,
    }
}

// ═══════════════════════════════ tests ═══════════════════════════════
