// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Sparse
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sparse operators with a symmetric portrait.
//!
//! The portrait stores only the strict lower triangle: for row `i`,
//! `column_indexes[row_pointers[i]..row_pointers[i + 1]]` lists the columns
//! `j < i` that are coupled to `i`, ascending and unique. Values are kept in
//! three arrays:
//!
//! ```text
//! diagonal[i]  = A[i][i]
//! lower[p]     = A[i][j]      (p is the slot of (i, j) in the portrait)
//! upper[p]     = A[j][i]
//! ```
//!
//! so the portrait is symmetric while the values need not be (the
//! convection operator is not self-adjoint).

use std::collections::BTreeSet;
use std::sync::Arc;

use boiling_types::error::{BoilingError, BoilingResult};
use boiling_types::state::Element;
use ndarray::Array2;

/// Nonzero pattern shared by every operator assembled on one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparsePortrait {
    row_pointers: Vec<usize>,
    column_indexes: Vec<usize>,
}

impl SparsePortrait {
    /// Derive the portrait from element connectivity.
    ///
    /// For every element and every pair of its nodes `(i, j)` with `i > j`,
    /// `j` is recorded as a lower neighbour of `i`. Row pointers are prefix
    /// sums of the neighbour counts.
    pub fn build<'a, I>(elements: I, nodes_count: usize) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); nodes_count];

        for element in elements {
            let nodes = &element.node_indexes;
            for &current in nodes {
                for &other in nodes {
                    if current > other {
                        adjacency[current].insert(other);
                    }
                }
            }
        }

        let mut row_pointers = Vec::with_capacity(nodes_count + 1);
        row_pointers.push(0);
        let mut amount = 0;
        for set in &adjacency {
            amount += set.len();
            row_pointers.push(amount);
        }

        let column_indexes = adjacency.into_iter().flatten().collect();

        SparsePortrait {
            row_pointers,
            column_indexes,
        }
    }

    /// Wrap raw arrays after checking the portrait invariants.
    pub fn from_raw(row_pointers: Vec<usize>, column_indexes: Vec<usize>) -> BoilingResult<Self> {
        if row_pointers.first() != Some(&0) {
            return Err(BoilingError::LinAlg("row pointers must start at 0".into()));
        }
        if row_pointers.last() != Some(&column_indexes.len()) {
            return Err(BoilingError::DimensionMismatch {
                expected: column_indexes.len(),
                actual: row_pointers.last().copied().unwrap_or(0),
            });
        }
        for (i, w) in row_pointers.windows(2).enumerate() {
            if w[1] < w[0] {
                return Err(BoilingError::LinAlg(format!(
                    "row pointers decrease at row {i}"
                )));
            }
            let row = &column_indexes[w[0]..w[1]];
            if row.iter().any(|&j| j >= i) {
                return Err(BoilingError::LinAlg(format!(
                    "row {i} has a column outside the strict lower triangle"
                )));
            }
            if row.windows(2).any(|c| c[1] <= c[0]) {
                return Err(BoilingError::LinAlg(format!(
                    "row {i} columns are not ascending and unique"
                )));
            }
        }
        Ok(SparsePortrait {
            row_pointers,
            column_indexes,
        })
    }

    /// Portrait of a diagonal matrix of size `n`.
    pub fn diagonal(n: usize) -> Self {
        SparsePortrait {
            row_pointers: vec![0; n + 1],
            column_indexes: Vec::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.row_pointers.len() - 1
    }

    #[inline]
    pub fn row_pointers(&self) -> &[usize] {
        &self.row_pointers
    }

    #[inline]
    pub fn column_indexes(&self) -> &[usize] {
        &self.column_indexes
    }

    /// Number of stored off-diagonal slots (strict lower triangle).
    #[inline]
    pub fn lower_len(&self) -> usize {
        self.column_indexes.len()
    }

    /// Columns coupled to `row` below the diagonal.
    #[inline]
    pub fn row(&self, row: usize) -> &[usize] {
        &self.column_indexes[self.row_pointers[row]..self.row_pointers[row + 1]]
    }

    /// Slot of `(row, col)` for `row > col`, if present.
    #[inline]
    pub fn position(&self, row: usize, col: usize) -> Option<usize> {
        let start = self.row_pointers[row];
        self.row(row).binary_search(&col).ok().map(|k| start + k)
    }
}

/// Sparse operator over a shared [`SparsePortrait`].
#[derive(Debug, Clone)]
pub struct SparseMatrix {
    portrait: Arc<SparsePortrait>,
    pub diagonal: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl SparseMatrix {
    /// Zero operator on `portrait`.
    pub fn new(portrait: Arc<SparsePortrait>) -> Self {
        let n = portrait.size();
        let m = portrait.lower_len();
        SparseMatrix {
            portrait,
            diagonal: vec![0.0; n],
            lower: vec![0.0; m],
            upper: vec![0.0; m],
        }
    }

    #[inline]
    pub fn portrait(&self) -> &Arc<SparsePortrait> {
        &self.portrait
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.diagonal.len()
    }

    /// True when both operators have the same nonzero pattern.
    pub fn shares_portrait(&self, other: &SparseMatrix) -> bool {
        Arc::ptr_eq(&self.portrait, &other.portrait) || *self.portrait == *other.portrait
    }

    /// `A[row][col]`, zero outside the portrait.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row == col {
            self.diagonal[row]
        } else if row > col {
            self.portrait
                .position(row, col)
                .map_or(0.0, |p| self.lower[p])
        } else {
            self.portrait
                .position(col, row)
                .map_or(0.0, |p| self.upper[p])
        }
    }

    /// `A[row][col] += value`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is not part of the portrait. The portrait is
    /// built from the same connectivity that drives assembly, so a miss is
    /// a construction bug, not a runtime condition.
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if row == col {
            self.diagonal[row] += value;
            return;
        }
        let (r, c) = if row > col { (row, col) } else { (col, row) };
        let Some(p) = self.portrait.position(r, c) else {
            panic!("entry ({row}, {col}) is not in the sparse portrait");
        };
        if row > col {
            self.lower[p] += value;
        } else {
            self.upper[p] += value;
        }
    }

    /// Scatter a dense local block whose rows/columns map to `indexes`.
    pub fn add_local<const N: usize>(&mut self, values: &[[f64; N]; N], indexes: &[usize; N]) {
        for (a, row) in values.iter().enumerate() {
            for (b, &v) in row.iter().enumerate() {
                self.add(indexes[a], indexes[b], v);
            }
        }
    }

    pub fn nullify(&mut self) {
        self.diagonal.fill(0.0);
        self.lower.fill(0.0);
        self.upper.fill(0.0);
    }

    /// `self = alpha * source`.
    ///
    /// # Panics
    ///
    /// Panics if the portraits differ.
    pub fn assign_scaled(&mut self, alpha: f64, source: &SparseMatrix) {
        assert!(
            self.shares_portrait(source),
            "assign_scaled requires identical portraits"
        );
        scale_into(alpha, &source.diagonal, &mut self.diagonal);
        scale_into(alpha, &source.lower, &mut self.lower);
        scale_into(alpha, &source.upper, &mut self.upper);
    }

    /// `self += other`.
    ///
    /// # Panics
    ///
    /// Panics if the portraits differ.
    pub fn add_assign(&mut self, other: &SparseMatrix) {
        assert!(
            self.shares_portrait(other),
            "add_assign requires identical portraits"
        );
        add_into(&other.diagonal, &mut self.diagonal);
        add_into(&other.lower, &mut self.lower);
        add_into(&other.upper, &mut self.upper);
    }

    /// `out = A · x`.
    pub fn multiply(&self, x: &[f64], out: &mut [f64]) {
        let n = self.size();
        assert_eq!(x.len(), n);
        assert_eq!(out.len(), n);

        for i in 0..n {
            out[i] = self.diagonal[i] * x[i];
        }
        let rp = self.portrait.row_pointers();
        let ci = self.portrait.column_indexes();
        for i in 0..n {
            for p in rp[i]..rp[i + 1] {
                let j = ci[p];
                out[i] += self.lower[p] * x[j];
                out[j] += self.upper[p] * x[i];
            }
        }
    }

    /// Gauss exclusion of unknown `node` fixed to `value`: its row becomes
    /// the identity, its column is moved to `rhs` and then cleared.
    pub fn exclude(&mut self, node: usize, value: f64, rhs: &mut [f64]) {
        let n = self.size();
        assert_eq!(rhs.len(), n);

        let portrait = Arc::clone(&self.portrait);
        let rp = portrait.row_pointers();
        // Row `node`, columns j < node.
        for p in rp[node]..rp[node + 1] {
            let j = portrait.column_indexes()[p];
            rhs[j] -= self.upper[p] * value;
            self.lower[p] = 0.0;
            self.upper[p] = 0.0;
        }
        // Rows i > node holding column `node`.
        for i in node + 1..n {
            if let Some(p) = portrait.position(i, node) {
                rhs[i] -= self.lower[p] * value;
                self.lower[p] = 0.0;
                self.upper[p] = 0.0;
            }
        }
        self.diagonal[node] = 1.0;
        rhs[node] = value;
    }

    /// Dense copy, for inspection and small tests.
    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.size();
        let mut dense = Array2::zeros((n, n));
        for i in 0..n {
            dense[[i, i]] = self.diagonal[i];
            let start = self.portrait.row_pointers()[i];
            for (k, &j) in self.portrait.row(i).iter().enumerate() {
                dense[[i, j]] = self.lower[start + k];
                dense[[j, i]] = self.upper[start + k];
            }
        }
        dense
    }
}

#[inline]
fn scale_into(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (yi, &xi) in y.iter_mut().zip(x.iter()) {
        *yi = alpha * xi;
    }
}

#[inline]
fn add_into(x: &[f64], y: &mut [f64]) {
    for (yi, &xi) in y.iter_mut().zip(x.iter()) {
        *yi += xi;
    }
}
