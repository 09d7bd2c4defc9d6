//! mesh-gauge annotate command - list and edit a model's notes.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use mesh_gauge::{Annotation, Annotations, Mesh, annotation};
use nalgebra::Point3;
use serde::Serialize;

use super::measure::nearest_face;
use crate::{Cli, OutputFormat, output, parse_point};

/// Changes to apply before listing.
#[derive(Args, Debug, Clone, Default)]
pub struct AnnotationEdits {
    /// Pin a new note at X,Y,Z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true, requires = "text")]
    pub add: Option<Point3<f64>>,

    /// Text of the new note
    #[arg(long, requires = "add")]
    pub text: Option<String>,

    /// Mark the note with this id as read (repeatable)
    #[arg(long, value_name = "ID")]
    pub mark_read: Vec<u32>,

    /// Remove the note with this id (repeatable)
    #[arg(long, value_name = "ID")]
    pub remove: Vec<u32>,
}

impl AnnotationEdits {
    fn is_empty(&self) -> bool {
        self.add.is_none() && self.mark_read.is_empty() && self.remove.is_empty()
    }
}

#[derive(Serialize)]
struct AnnotateOutput<'a> {
    path: String,
    sidecar: String,
    unread: usize,
    annotations: Vec<&'a Annotation>,
}

pub fn run(input: &Path, edits: &AnnotationEdits, cli: &Cli) -> Result<()> {
    let mesh =
        Mesh::load(input).with_context(|| format!("Failed to load mesh from {:?}", input))?;
    let mut notes = annotation::load_annotations(input)?.unwrap_or_default();

    for &id in &edits.remove {
        if notes.remove(id).is_none() {
            bail!("no annotation with id {id}");
        }
    }
    for &id in &edits.mark_read {
        if !notes.set_read(id, true) {
            bail!("no annotation with id {id}");
        }
    }
    if let Some(point) = edits.add {
        let note = notes.add(point, Some(nearest_face(&mesh, &point)))?;
        note.text = edits.text.clone().unwrap_or_default();
    }

    if !edits.is_empty() {
        if notes.is_empty() {
            annotation::delete_annotations(input)?;
        } else {
            annotation::save_annotations(&notes, input)?;
        }
    }

    let sidecar = annotation::annotation_path(input);
    match cli.format {
        OutputFormat::Json => {
            let out = AnnotateOutput {
                path: input.display().to_string(),
                sidecar: sidecar.display().to_string(),
                unread: notes.unread_count(),
                annotations: notes.iter().collect(),
            };
            output::print(&out, cli.format, cli.quiet)?;
        }
        OutputFormat::Text => {
            if !cli.quiet {
                print_text(input, &sidecar, &notes);
            }
        }
    }

    Ok(())
}

fn print_text(input: &Path, sidecar: &Path, notes: &Annotations) {
    output::heading("Annotations");
    output::field("File", input.display());
    output::field("Sidecar", sidecar.display());
    output::field(
        "Notes",
        format!("{} ({} unread)", notes.len(), notes.unread_count()),
    );

    for note in notes.iter() {
        let status = if note.is_read {
            "read".normal()
        } else {
            "unread".cyan()
        };
        let p = &note.position;
        println!(
            "  #{:<3} [{}] ({:.3}, {:.3}, {:.3}) {}",
            note.id, status, p.x, p.y, p.z, note.text
        );
    }
}
