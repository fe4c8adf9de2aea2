pub mod info;
pub mod run;
pub mod validate;

use anyhow::{Context, Result};
use boiling_types::config::BoilingConfig;
use std::path::Path;

/// Load and validate a case file.
pub fn load_config(path: &Path) -> Result<BoilingConfig> {
    BoilingConfig::from_file(&path.to_string_lossy())
        .with_context(|| format!("failed to load config {}", path.display()))
}
