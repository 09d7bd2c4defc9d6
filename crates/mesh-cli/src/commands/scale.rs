//! mesh-gauge scale command - resize a model to a target weight.

use std::path::Path;

use anyhow::{Context, Result};
use mesh_gauge::{Mesh, ScaledProperties, estimate_weight, scale_for_target_weight};
use serde::Serialize;
use tracing::info;

use super::DensityArgs;
use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct ScaleOutput {
    path: String,
    material: String,
    current_grams: f64,
    target_grams: f64,
    scaled: ScaledProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

pub fn run(
    input: &Path,
    target_grams: f64,
    density: &DensityArgs,
    output_path: Option<&Path>,
    cli: &Cli,
) -> Result<()> {
    let density = density.require()?;

    let mut mesh =
        Mesh::load(input).with_context(|| format!("Failed to load mesh from {:?}", input))?;
    let report = mesh.analyze()?;

    let current = estimate_weight(report.volume, density.density);
    let factor = scale_for_target_weight(current.grams, target_grams)?;
    let scaled =
        ScaledProperties::new(&report.dimensions(), report.volume, factor).with_density(density.density);

    info!(
        factor = format!("{:.6}", factor),
        current_grams = current.grams,
        target_grams,
        "Computed scale factor"
    );

    if let Some(path) = output_path {
        mesh.scale(factor);
        mesh.save(path)
            .with_context(|| format!("Failed to save scaled mesh to {:?}", path))?;
    }

    match cli.format {
        OutputFormat::Json => {
            let out = ScaleOutput {
                path: input.display().to_string(),
                material: density.label.clone(),
                current_grams: current.grams,
                target_grams,
                scaled,
                output: output_path.map(|p| p.display().to_string()),
            };
            output::print(&out, cli.format, cli.quiet)?;
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::heading("Scale to Target Weight");
                output::field("File", input.display());
                output::field("Material", &density.label);
                output::field("Current weight", &current);
                output::field("Target weight", format!("{:.2} g", target_grams));
                output::field(
                    "Scale factor",
                    format!("{:.4} ({:+.2}%)", factor, (factor - 1.0) * 100.0),
                );
                let d = &scaled.dimensions;
                output::field(
                    "New dimensions",
                    format!("{:.2} x {:.2} x {:.2} mm", d.width, d.depth, d.height),
                );
                output::field(
                    "New volume",
                    format!("{:.2} mm³ ({:.3} cm³)", scaled.volume, scaled.volume_cm3()),
                );
                if let Some(weight) = &scaled.weight {
                    output::field("New weight", weight);
                }
                if let Some(path) = output_path {
                    output::field("Saved", path.display());
                }
            }
        }
    }

    Ok(())
}
