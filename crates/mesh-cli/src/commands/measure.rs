//! mesh-gauge measure command - a headless ruler session.
//!
//! Activates the ruler, selects a view and feeds it two picks, exactly as an
//! interactive viewer would.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mesh_gauge::{
    MeasurementResult, Mesh, Pick, Projection, RulerConfig, RulerController, StandardView,
    Transition,
};
use nalgebra::Point3;
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct MeasureOutput<'a> {
    path: String,
    view: StandardView,
    result: &'a MeasurementResult,
}

pub fn run(
    input: &Path,
    view: StandardView,
    from: Point3<f64>,
    to: Point3<f64>,
    precision: usize,
    cli: &Cli,
) -> Result<()> {
    let mesh =
        Mesh::load(input).with_context(|| format!("Failed to load mesh from {:?}", input))?;

    let config = RulerConfig {
        label_precision: precision,
        ..Default::default()
    };
    let mut ruler = RulerController::new(config);
    ruler.set_mesh_extent(mesh.bounds());

    ruler.activate(Projection::Perspective)?;
    ruler.select_view(view)?;
    checked(ruler.on_pick(Pick::hit(from, nearest_face(&mesh, &from)))?)?;
    let transition = checked(ruler.on_pick(Pick::hit(to, nearest_face(&mesh, &to)))?)?;

    let Some(result) = transition.result else {
        bail!("ruler did not produce a measurement");
    };

    match cli.format {
        OutputFormat::Json => {
            let out = MeasureOutput {
                path: input.display().to_string(),
                view,
                result: &result,
            };
            output::print(&out, cli.format, cli.quiet)?;
        }
        OutputFormat::Text => {
            if !cli.quiet {
                let m = &result.measurement;
                output::heading("Measurement");
                output::field("File", input.display());
                output::field("View", view);
                output::field(
                    "From",
                    format!("({:.3}, {:.3}, {:.3}) on face {}", from.x, from.y, from.z, result.first.face_id),
                );
                output::field(
                    "To",
                    format!("({:.3}, {:.3}, {:.3}) on face {}", to.x, to.y, to.z, result.second.face_id),
                );
                output::field("Distance", &result.label);
                output::field(
                    "Components",
                    format!("dx {:.3}  dy {:.3}  dz {:.3}", m.dx, m.dy, m.dz),
                );
            }
        }
    }

    ruler.deactivate()?;
    Ok(())
}

/// Turn an advisory into an error; a headless session cannot retry.
fn checked(transition: Transition) -> Result<Transition> {
    match transition.advisory {
        Some(advisory) => bail!("{advisory}"),
        None => Ok(transition),
    }
}

/// Face whose centroid is closest to `point`, standing in for a viewer's hit
/// test.
pub(crate) fn nearest_face(mesh: &Mesh, point: &Point3<f64>) -> u32 {
    mesh.triangles()
        .enumerate()
        .map(|(i, tri)| (i, (tri.centroid() - point).norm_squared()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(0, |(i, _)| i as u32)
}
