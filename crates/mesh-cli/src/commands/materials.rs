//! mesh-gauge materials command - list densities.

use anyhow::Result;
use mesh_gauge::MATERIALS;
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct MaterialRow {
    name: &'static str,
    slug: String,
    density: f64,
}

pub fn run(cli: &Cli) -> Result<()> {
    let rows: Vec<MaterialRow> = MATERIALS
        .iter()
        .map(|m| MaterialRow {
            name: m.name,
            slug: m.slug(),
            density: m.density,
        })
        .collect();

    match cli.format {
        OutputFormat::Json => output::print(&rows, cli.format, cli.quiet)?,
        OutputFormat::Text => {
            if !cli.quiet {
                output::heading("Materials (g/cm³)");
                let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
                for row in &rows {
                    println!("  {:<width$}  {:>6.2}", row.name, row.density);
                }
            }
        }
    }

    Ok(())
}
