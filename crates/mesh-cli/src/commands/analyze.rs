//! mesh-gauge analyze command - the geometry report.

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use mesh_gauge::{AnalysisParams, GeometryReport, IssueSeverity, Mesh, Orientation};
use serde::Serialize;

use super::DensityArgs;
use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    material: Option<String>,
    volume_cm3: f64,
    surface_area_cm2: f64,
    report: &'a GeometryReport,
}

pub fn run(input: &Path, density: &DensityArgs, cli: &Cli) -> Result<()> {
    let resolved = density.resolve()?;

    let mesh =
        Mesh::load(input).with_context(|| format!("Failed to load mesh from {:?}", input))?;

    let params = match &resolved {
        Some(d) => AnalysisParams::with_density(d.density),
        None => AnalysisParams::default(),
    };
    let report = mesh_gauge::analyze(&mesh, &params)?;

    match cli.format {
        OutputFormat::Json => {
            let out = AnalyzeOutput {
                path: input.display().to_string(),
                material: resolved.as_ref().map(|d| d.label.clone()),
                volume_cm3: report.volume_cm3(),
                surface_area_cm2: report.surface_area_cm2(),
                report: &report,
            };
            output::print(&out, cli.format, cli.quiet)?;
        }
        OutputFormat::Text => {
            if !cli.quiet {
                print_text(input, &report, resolved.as_ref().map(|d| d.label.as_str()));
            }
        }
    }

    if report.has_errors() {
        let kinds: Vec<&str> = report.failures().map(|d| d.code()).collect();
        bail!(
            "{} is not watertight ({}); volume and weight are approximate",
            input.display(),
            kinds.join(", ")
        );
    }

    Ok(())
}

fn print_text(input: &Path, report: &GeometryReport, material: Option<&str>) {
    output::heading("Geometry Report");
    output::field("File", input.display());
    output::field("Vertices", report.vertex_count);
    output::field("Faces", report.face_count);

    let dims = report.dimensions();
    output::field(
        "Dimensions",
        format!(
            "{:.2} x {:.2} x {:.2} mm",
            dims.width, dims.depth, dims.height
        ),
    );
    output::field(
        "Volume",
        format!("{:.2} mm³ ({:.3} cm³)", report.volume, report.volume_cm3()),
    );
    output::field(
        "Surface area",
        format!(
            "{:.2} mm² ({:.2} cm²)",
            report.surface_area,
            report.surface_area_cm2()
        ),
    );
    output::field(
        "Center of mass",
        format!(
            "({:.3}, {:.3}, {:.3})",
            report.centroid.x, report.centroid.y, report.centroid.z
        ),
    );
    output::field("Watertight", output::yes_no(report.is_watertight));

    let orientation = report.orientation.to_string();
    let orientation = match report.orientation {
        Orientation::Inverted => orientation.as_str().yellow(),
        _ => orientation.as_str().normal(),
    };
    output::field("Orientation", orientation);

    if report.degenerate_face_count > 0 {
        output::field("Degenerate faces", report.degenerate_face_count);
    }

    if let Some(weight) = &report.weight_estimate {
        output::field(
            "Weight",
            format!("{} ({})", weight, material.unwrap_or("custom density")),
        );
    }

    if !report.diagnostics.is_empty() {
        println!();
        output::heading("Findings");
        for diagnostic in &report.diagnostics {
            let tag = match diagnostic.severity() {
                IssueSeverity::Error => "error".red().bold(),
                IssueSeverity::Warning => "warning".yellow(),
                IssueSeverity::Info => "info".normal(),
            };
            println!("  [{}] {} {}", tag, diagnostic.code().dimmed(), diagnostic);
            println!("         {}", diagnostic.suggestion().dimmed());
        }
    }
}
