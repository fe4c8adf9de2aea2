// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Validate Command
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use anyhow::{Context, Result};
use boiling_core::context::BoilingContext;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::load_config;

#[derive(Args)]
pub struct ValidateArgs {
    /// Case configuration (JSON)
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Parse the file and build the full context without solving, so grid,
/// materials, time layers and boundary conditions are all checked.
pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    BoilingContext::from_config(&config)
        .with_context(|| format!("case {} is not solvable", config.case_name))?;
    info!(case = %config.case_name, "configuration is valid");
    println!("{}: OK", args.config.display());
    Ok(())
}
