use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoilingError {
    #[error("Unknown material id: {id}")]
    UnknownMaterial { id: usize },

    #[error("Invalid time layers: {0}")]
    InvalidTimeLayers(String),

    #[error("Point (R={r}, Z={z}) lies outside the meshed domain")]
    PointOutsideDomain { r: f64, z: f64 },

    #[error("Time {time} outside solved range [{first}, {last}]")]
    TimeOutOfRange { time: f64, first: f64, last: f64 },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Boundary condition error: {0}")]
    Boundary(String),

    #[error("Linear solver diverged after {iterations} iterations (residual {residual:e})")]
    SolverDiverged { iterations: usize, residual: f64 },

    #[error("Linear algebra error: {0}")]
    LinAlg(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BoilingResult<T> = Result<T, BoilingError>;
