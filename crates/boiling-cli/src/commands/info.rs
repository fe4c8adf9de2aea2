// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Info Command
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use anyhow::Result;
use boiling_types::config::{BoilingConfig, BoundaryConfig};
use clap::Args;
use std::path::PathBuf;

use super::load_config;

#[derive(Args)]
pub struct InfoArgs {
    /// Case configuration (JSON)
    #[arg(short, long)]
    pub config: PathBuf,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    print!("{}", summary(&config));
    Ok(())
}

fn summary(config: &BoilingConfig) -> String {
    let d = &config.dimensions;
    let [ner, nez] = config.grid_resolution;
    let mut s = String::new();
    s.push_str(&format!("case:        {}\n", config.case_name));
    s.push_str(&format!(
        "domain:      R [{}, {}]  Z [{}, {}]\n",
        d.r_min, d.r_max, d.z_min, d.z_max
    ));
    s.push_str(&format!(
        "grid:        {ner} x {nez} elements, {} nodes\n",
        (ner + 1) * (nez + 1)
    ));
    s.push_str(&format!(
        "time:        [{}, {}] in {} steps\n",
        config.time.start, config.time.end, config.time.steps
    ));
    s.push_str(&format!(
        "velocity:    ({}, {})\n",
        config.velocity[0], config.velocity[1]
    ));
    for (id, m) in config.materials.iter().enumerate() {
        s.push_str(&format!(
            "material {id}:  lambda={} rho={} cp={}\n",
            m.lambda, m.rho, m.cp
        ));
    }
    for bc in &config.boundary {
        let line = match bc {
            BoundaryConfig::First { side, value } => format!("first  {side:?} T={value}"),
            BoundaryConfig::Second {
                side,
                flux,
                component,
            } => format!("second {side:?} q={flux} ({component:?})"),
            BoundaryConfig::Third {
                side,
                beta,
                ambient,
            } => format!("third  {side:?} beta={beta} T_amb={ambient}"),
        };
        s.push_str(&format!("boundary:    {line}\n"));
    }
    s.push_str(&format!(
        "solver:      GMRES({}) max {} cycles, tol {:e}\n",
        config.solver.restart, config.solver.max_iterations, config.solver.tolerance
    ));
    s
}
