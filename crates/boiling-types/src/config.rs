// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{BoilingError, BoilingResult};
use crate::state::{uniform_axis, Grid, Material, Point, Side};

/// Top-level case configuration for one boiling-vessel solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoilingConfig {
    pub case_name: String,
    pub dimensions: GridDimensions,
    /// Number of elements along R and Z.
    pub grid_resolution: [usize; 2],
    pub materials: Vec<Material>,
    #[serde(default)]
    pub areas: Vec<MaterialArea>,
    #[serde(default)]
    pub default_material_id: usize,
    pub time: TimeConfig,
    #[serde(default)]
    pub initial_temperature: f64,
    /// Uniform convection velocity (v_R, v_Z).
    #[serde(default)]
    pub velocity: [f64; 2],
    /// Gauss-Legendre points per axis for the convection integrals.
    #[serde(default = "default_quadrature_points")]
    pub quadrature_points: usize,
    #[serde(default)]
    pub boundary: Vec<BoundaryConfig>,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridDimensions {
    #[serde(rename = "R_min")]
    pub r_min: f64,
    #[serde(rename = "R_max")]
    pub r_max: f64,
    #[serde(rename = "Z_min")]
    pub z_min: f64,
    #[serde(rename = "Z_max")]
    pub z_max: f64,
}

/// Rectangle of the (R, Z) plane filled with one material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialArea {
    #[serde(rename = "R_min")]
    pub r_min: f64,
    #[serde(rename = "R_max")]
    pub r_max: f64,
    #[serde(rename = "Z_min")]
    pub z_min: f64,
    #[serde(rename = "Z_max")]
    pub z_max: f64,
    pub material_id: usize,
}

impl MaterialArea {
    pub fn contains(&self, p: Point) -> bool {
        self.r_min <= p.r && p.r <= self.r_max && self.z_min <= p.z && p.z <= self.z_max
    }
}

/// Uniform time layers `start, start + dt, ..., end` (`steps + 1` values).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

impl TimeConfig {
    pub fn layers(&self) -> Vec<f64> {
        uniform_axis(self.start, self.end, self.steps).to_vec()
    }
}

/// Flux component tag carried by second-kind conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    #[default]
    Real,
    Imaginary,
}

/// Boundary condition applied to every element edge along `side`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryConfig {
    /// Prescribed temperature.
    First { side: Side, value: f64 },
    /// Prescribed heat flux into the domain.
    Second {
        side: Side,
        flux: f64,
        #[serde(default)]
        component: ComponentType,
    },
    /// Convective exchange with an ambient medium.
    Third { side: Side, beta: f64, ambient: f64 },
}

/// GMRES(m) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub restart: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            restart: 30,
            max_iterations: 100,
            tolerance: 1e-12,
        }
    }
}

/// Where and how densely to sample the solution for output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Time of the snapshot (default: last layer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    pub samples_r: usize,
    pub samples_z: usize,
}

fn default_quadrature_points() -> usize {
    2
}

impl BoilingConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> BoilingResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and cross references.
    pub fn validate(&self) -> BoilingResult<()> {
        let d = &self.dimensions;
        let finite = [d.r_min, d.r_max, d.z_min, d.z_max].iter().all(|v| v.is_finite());
        if !(finite && d.r_max > d.r_min && d.z_max > d.z_min) {
            return Err(BoilingError::ConfigError(
                "dimensions must be finite with R_max > R_min and Z_max > Z_min".into(),
            ));
        }
        if d.r_min < 0.0 {
            return Err(BoilingError::ConfigError(
                "R_min must be >= 0 in cylindrical coordinates".into(),
            ));
        }
        if self.grid_resolution.iter().any(|&n| n == 0) {
            return Err(BoilingError::ConfigError(
                "grid_resolution needs at least one element per axis".into(),
            ));
        }
        let t = &self.time;
        if !(t.steps > 0 && t.start.is_finite() && t.end.is_finite() && t.end > t.start) {
            return Err(BoilingError::InvalidTimeLayers(format!(
                "need end > start and steps >= 1, got start={}, end={}, steps={}",
                t.start, t.end, t.steps
            )));
        }
        if self.materials.is_empty() {
            return Err(BoilingError::ConfigError("no materials defined".into()));
        }
        for material in &self.materials {
            material.validate()?;
        }
        let ids = self
            .areas
            .iter()
            .map(|a| a.material_id)
            .chain(std::iter::once(self.default_material_id));
        for id in ids {
            if id >= self.materials.len() {
                return Err(BoilingError::UnknownMaterial { id });
            }
        }
        if !(1..=4).contains(&self.quadrature_points) {
            return Err(BoilingError::ConfigError(format!(
                "quadrature_points must be in 1..=4, got {}",
                self.quadrature_points
            )));
        }
        if self.solver.restart == 0 || self.solver.max_iterations == 0 {
            return Err(BoilingError::ConfigError(
                "solver restart and max_iterations must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Create the structured grid from this config's dimensions, resolution
    /// and material areas. The first matching area wins.
    pub fn create_grid(&self) -> BoilingResult<Grid> {
        let d = &self.dimensions;
        let r = uniform_axis(d.r_min, d.r_max, self.grid_resolution[0]);
        let z = uniform_axis(d.z_min, d.z_max, self.grid_resolution[1]);
        Grid::new(r, z, |centre| {
            self.areas
                .iter()
                .find(|a| a.contains(centre))
                .map_or(self.default_material_id, |a| a.material_id)
        })
    }
}
