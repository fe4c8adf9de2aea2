// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Run Command
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Solve a case and write `r z T` rows.

use anyhow::{Context, Result};
use boiling_core::context::BoilingContext;
use boiling_core::solver::{BoilingSolver, GmresSolver};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use super::load_config;

const DEFAULT_SAMPLES: usize = 21;

#[derive(Args)]
pub struct RunArgs {
    /// Case configuration (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Snapshot time (overrides the config; default: last layer)
    #[arg(short, long)]
    pub time: Option<f64>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    info!(case = %config.case_name, "starting solve");

    let ctx = BoilingContext::from_config(&config).context("failed to set up the case")?;
    info!(
        nodes = ctx.grid().nodes_count(),
        elements = ctx.grid().elements.len(),
        layers = ctx.time_layers().len(),
        boundary_edges = ctx.boundary().len(),
        "case ready"
    );

    let initial = vec![config.initial_temperature; ctx.grid().nodes_count()];
    let started = Instant::now();
    let field = BoilingSolver::new(GmresSolver::from(&config.solver))
        .solve(ctx, initial)
        .context("solve failed")?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "solve finished");

    let output = config.output.as_ref();
    let layers = field.time_layers();
    let time = args
        .time
        .or_else(|| output.and_then(|o| o.time))
        .unwrap_or(layers[layers.len() - 1]);
    let samples_r = output.map_or(DEFAULT_SAMPLES, |o| o.samples_r);
    let samples_z = output.map_or(DEFAULT_SAMPLES, |o| o.samples_z);

    let rows = field
        .sample(time, samples_r, samples_z)
        .with_context(|| format!("failed to sample the solution at t = {time}"))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_rows(BufWriter::new(file), &rows)?;
            info!(path = %path.display(), rows = rows.len(), time, "samples written");
        }
        None => write_rows(io::stdout().lock(), &rows)?,
    }
    Ok(())
}

/// One `r z T` line per sample, space separated.
fn write_rows<W: Write>(mut out: W, rows: &[(f64, f64, f64)]) -> io::Result<()> {
    for (r, z, t) in rows {
        writeln!(out, "{r} {z} {t}")?;
    }
    out.flush()
}
