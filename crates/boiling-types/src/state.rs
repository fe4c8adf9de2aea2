// ─────────────────────────────────────────────────────────────────────
// Boiling Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{BoilingError, BoilingResult};

/// Point of the (R, Z) meridional half-plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub r: f64,
    pub z: f64,
}

impl Point {
    pub fn new(r: f64, z: f64) -> Self {
        Point { r, z }
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.r
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }
}

/// Side of a rectangular element (and of the whole domain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

/// Bilinear quadrilateral element.
///
/// Node order is fixed: `[bottom-left, bottom-right, top-left, top-right]`.
/// Local node `i` sits at R-position `i % 2` and Z-position `i / 2`;
/// every local matrix relies on this.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub node_indexes: [usize; 4],
    /// R-extent.
    pub width: f64,
    /// Z-extent.
    pub length: f64,
    pub material_id: usize,
}

impl Element {
    /// The two local-order node indexes lying on `side`.
    pub fn bound_node_indexes(&self, side: Side) -> [usize; 2] {
        let n = &self.node_indexes;
        match side {
            Side::Bottom => [n[0], n[1]],
            Side::Top => [n[2], n[3]],
            Side::Left => [n[0], n[2]],
            Side::Right => [n[1], n[3]],
        }
    }
}

/// Thermophysical properties of one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Thermal conductivity λ.
    pub lambda: f64,
    /// Density ρ.
    pub rho: f64,
    /// Specific heat Cp.
    pub cp: f64,
}

impl Material {
    pub fn new(lambda: f64, rho: f64, cp: f64) -> Self {
        Material { lambda, rho, cp }
    }

    /// Volumetric heat capacity ρ·Cp.
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.rho * self.cp
    }

    /// Finite values with λ >= 0, ρ > 0 and Cp > 0.
    pub fn validate(&self) -> BoilingResult<()> {
        let finite = self.lambda.is_finite() && self.rho.is_finite() && self.cp.is_finite();
        if !finite || self.lambda < 0.0 || self.rho <= 0.0 || self.cp <= 0.0 {
            return Err(BoilingError::ConfigError(format!(
                "material needs finite lambda >= 0, rho > 0 and cp > 0, got \
                 lambda={}, rho={}, cp={}",
                self.lambda, self.rho, self.cp
            )));
        }
        Ok(())
    }
}

/// Structured, axis-aligned quadrilateral grid.
///
/// Nodes are stored row-major with R varying fastest:
/// node `(ir, iz)` has index `iz * nr + ir`. Elements follow the same
/// pattern over cells.
#[derive(Debug, Clone)]
pub struct Grid {
    pub nodes: Vec<Point>,
    pub elements: Vec<Element>,
    /// Node coordinates along R [nr], strictly ascending.
    pub r: Array1<f64>,
    /// Node coordinates along Z [nz], strictly ascending.
    pub z: Array1<f64>,
}

impl Grid {
    /// Build a grid from the node coordinates along each axis.
    /// `material_of` receives the element centre and returns its material id.
    pub fn new<F>(r: Array1<f64>, z: Array1<f64>, material_of: F) -> BoilingResult<Self>
    where
        F: Fn(Point) -> usize,
    {
        check_axis("R", &r)?;
        check_axis("Z", &z)?;

        let nr = r.len();
        let nz = z.len();

        let mut nodes = Vec::with_capacity(nr * nz);
        for iz in 0..nz {
            for ir in 0..nr {
                nodes.push(Point::new(r[ir], z[iz]));
            }
        }

        let mut elements = Vec::with_capacity((nr - 1) * (nz - 1));
        for iz in 0..nz - 1 {
            for ir in 0..nr - 1 {
                let bl = iz * nr + ir;
                let tl = (iz + 1) * nr + ir;
                let centre = Point::new(0.5 * (r[ir] + r[ir + 1]), 0.5 * (z[iz] + z[iz + 1]));
                elements.push(Element {
                    node_indexes: [bl, bl + 1, tl, tl + 1],
                    width: r[ir + 1] - r[ir],
                    length: z[iz + 1] - z[iz],
                    material_id: material_of(centre),
                });
            }
        }

        Ok(Grid {
            nodes,
            elements,
            r,
            z,
        })
    }

    /// Uniform grid with `nr_elements` × `nz_elements` cells, single material 0.
    pub fn uniform(
        nr_elements: usize,
        nz_elements: usize,
        r_min: f64,
        r_max: f64,
        z_min: f64,
        z_max: f64,
    ) -> BoilingResult<Self> {
        Grid::new(
            uniform_axis(r_min, r_max, nr_elements),
            uniform_axis(z_min, z_max, nz_elements),
            |_| 0,
        )
    }

    #[inline]
    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn elements_along_r(&self) -> usize {
        self.r.len() - 1
    }

    #[inline]
    pub fn elements_along_z(&self) -> usize {
        self.z.len() - 1
    }

    #[inline]
    pub fn element_index(&self, ir: usize, iz: usize) -> usize {
        iz * self.elements_along_r() + ir
    }

    /// Indexes of the elements touching the domain boundary on `side`,
    /// ordered along the boundary.
    pub fn boundary_elements(&self, side: Side) -> Vec<usize> {
        let ner = self.elements_along_r();
        let nez = self.elements_along_z();
        match side {
            Side::Bottom => (0..ner).map(|ir| self.element_index(ir, 0)).collect(),
            Side::Top => (0..ner).map(|ir| self.element_index(ir, nez - 1)).collect(),
            Side::Left => (0..nez).map(|iz| self.element_index(0, iz)).collect(),
            Side::Right => (0..nez).map(|iz| self.element_index(ner - 1, iz)).collect(),
        }
    }

    /// Index of the element whose box contains `point`, by binary search on
    /// each axis. Points on a shared edge resolve to the upper/right cell,
    /// except on the outer boundary.
    pub fn locate(&self, point: Point) -> Option<usize> {
        let ir = axis_cell(&self.r, point.r)?;
        let iz = axis_cell(&self.z, point.z)?;
        Some(self.element_index(ir, iz))
    }
}

/// `cells + 1` evenly spaced coordinates with both ends exact.
pub fn uniform_axis(min: f64, max: f64, cells: usize) -> Array1<f64> {
    let mut axis = Array1::linspace(min, max, cells + 1);
    if cells > 0 {
        axis[cells] = max;
    }
    axis
}

fn check_axis(name: &str, axis: &Array1<f64>) -> BoilingResult<()> {
    if axis.len() < 2 {
        return Err(BoilingError::ConfigError(format!(
            "{name} axis needs at least 2 nodes, got {}",
            axis.len()
        )));
    }
    if axis.iter().any(|v| !v.is_finite()) {
        return Err(BoilingError::ConfigError(format!(
            "{name} axis contains non-finite coordinates"
        )));
    }
    if axis.windows(2).into_iter().any(|w| w[1] <= w[0]) {
        return Err(BoilingError::ConfigError(format!(
            "{name} axis must be strictly ascending"
        )));
    }
    Ok(())
}

fn axis_cell(axis: &Array1<f64>, x: f64) -> Option<usize> {
    let n = axis.len();
    if !(x >= axis[0] && x <= axis[n - 1]) {
        return None;
    }
    let coords = axis.as_slice()?;
    let above = coords.partition_point(|&c| c <= x);
    Some(above.saturating_sub(1).min(n - 2))
}
