//! Point annotations kept beside a model in a JSON sidecar file.
//!
//! Annotations for `ring.stl` live in `ring.annotations.json`:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "model_file": "ring.stl",
//!   "annotations": [
//!     { "id": 1, "point": [1.0, 2.0, 3.0], "face_id": 17, "text": "sprue", "is_read": false }
//!   ]
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use mesh_gauge::annotation::{Annotations, load_annotations, save_annotations};
//! use nalgebra::Point3;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let model = dir.path().join("ring.stl");
//!
//! let mut notes = Annotations::new();
//! notes.add(Point3::new(1.0, 2.0, 3.0), Some(17)).unwrap().text = "sprue".into();
//! save_annotations(&notes, &model).unwrap();
//!
//! let loaded = load_annotations(&model).unwrap().unwrap();
//! assert_eq!(loaded, notes);
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{MeshError, MeshResult};
use crate::tracing_ext::log_io_operation;

/// Sidecar format version written by [`save_annotations`].
pub const SIDECAR_VERSION: &str = "1.0";

/// A note pinned to a point on the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u32,
    #[serde(rename = "point")]
    pub position: Point3<f64>,
    /// Face the point was picked on, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_id: Option<u32>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_read: bool,
}

/// The annotations of one model, in creation order.
///
/// Ids start at 1 and are never reused while the set lives, except after
/// [`Annotations::clear`].
#[derive(Debug, Clone, PartialEq)]
pub struct Annotations {
    items: Vec<Annotation>,
    next_id: u32,
}

impl Default for Annotations {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotations {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a set from stored annotations; new ids continue after the
    /// largest stored one.
    ///
    /// Fails on a repeated id or a non-finite position.
    pub fn from_vec(items: Vec<Annotation>) -> MeshResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for a in &items {
            if !seen.insert(a.id) {
                return Err(MeshError::invalid_parameter(
                    "annotations",
                    format!("id {} appears more than once", a.id),
                ));
            }
            check_position(&a.position)?;
        }
        let next_id = items.iter().map(|a| a.id).max().map_or(1, |id| id + 1);
        Ok(Self { items, next_id })
    }

    /// Add an unread, empty annotation at `position`.
    pub fn add(
        &mut self,
        position: Point3<f64>,
        face_id: Option<u32>,
    ) -> MeshResult<&mut Annotation> {
        check_position(&position)?;
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, ?position, "Annotation added");

        self.items.push(Annotation {
            id,
            position,
            face_id,
            text: String::new(),
            is_read: false,
        });
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    pub fn get(&self, id: u32) -> Option<&Annotation> {
        self.items.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Annotation> {
        self.items.iter_mut().find(|a| a.id == id)
    }

    pub fn remove(&mut self, id: u32) -> Option<Annotation> {
        let index = self.items.iter().position(|a| a.id == id)?;
        Some(self.items.remove(index))
    }

    /// Mark an annotation read or unread. Returns `false` for an unknown id.
    pub fn set_read(&mut self, id: u32, is_read: bool) -> bool {
        match self.get_mut(id) {
            Some(a) => {
                a.is_read = is_read;
                true
            }
            None => false,
        }
    }

    /// Remove everything and restart ids at 1.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_id = 1;
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|a| !a.is_read).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn check_position(position: &Point3<f64>) -> MeshResult<()> {
    if position.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(MeshError::invalid_parameter(
            "position",
            format!("annotation point must be finite, got {:?}", position),
        ))
    }
}

#[derive(Serialize, Deserialize)]
struct Sidecar {
    #[serde(default)]
    version: String,
    #[serde(default)]
    model_file: String,
    #[serde(default)]
    annotations: Vec<Annotation>,
}

/// Sidecar path for a model: the extension is replaced by
/// `.annotations.json`.
pub fn annotation_path(model_path: &Path) -> PathBuf {
    model_path.with_extension("annotations.json")
}

/// Write the sidecar for `model_path`.
///
/// An empty set writes nothing and returns `None`; an existing sidecar is
/// left alone (see [`delete_annotations`]).
pub fn save_annotations(
    annotations: &Annotations,
    model_path: &Path,
) -> MeshResult<Option<PathBuf>> {
    if annotations.is_empty() {
        debug!("No annotations to save for {:?}", model_path);
        return Ok(None);
    }

    let path = annotation_path(model_path);
    let sidecar = Sidecar {
        version: SIDECAR_VERSION.to_string(),
        model_file: model_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        annotations: annotations.items.clone(),
    };

    let write_err = |source: std::io::Error| MeshError::IoWrite {
        path: path.clone(),
        source,
    };
    let file = File::create(&path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &sidecar)
        .map_err(|e| write_err(std::io::Error::from(e)))?;
    writer.flush().map_err(write_err)?;

    info!("Saved {} annotation(s) to {:?}", annotations.len(), path);
    log_io_operation("save", &path, Some("json"), true);
    Ok(Some(path))
}

/// Read the sidecar for `model_path`; `None` when there is none.
pub fn load_annotations(model_path: &Path) -> MeshResult<Option<Annotations>> {
    let path = annotation_path(model_path);
    if !path.exists() {
        debug!("No annotation file at {:?}", path);
        return Ok(None);
    }

    let file = File::open(&path).map_err(|e| MeshError::IoRead {
        path: path.clone(),
        source: e,
    })?;
    let parse_err = |details: String| MeshError::ParseError {
        path: path.clone(),
        details,
    };

    let sidecar: Sidecar = match serde_json::from_reader(BufReader::new(file)) {
        Ok(sidecar) => sidecar,
        Err(e) => {
            log_io_operation("load", &path, Some("json"), false);
            return Err(parse_err(e.to_string()));
        }
    };
    let annotations =
        Annotations::from_vec(sidecar.annotations).map_err(|e| parse_err(e.to_string()))?;

    info!("Loaded {} annotation(s) from {:?}", annotations.len(), path);
    log_io_operation("load", &path, Some("json"), true);
    Ok(Some(annotations))
}

/// Remove the sidecar for `model_path`. Returns whether a file was removed.
pub fn delete_annotations(model_path: &Path) -> MeshResult<bool> {
    let path = annotation_path(model_path);
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&path).map_err(|e| MeshError::IoWrite {
        path: path.clone(),
        source: e,
    })?;
    info!("Deleted annotation file {:?}", path);
    Ok(true)
}
