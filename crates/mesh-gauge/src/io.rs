//! STL file I/O.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{MeshError, MeshResult};
use crate::tracing_ext::{log_io_operation, log_mesh_stats};
use crate::validate::{ValidationOptions, validate_mesh_data};
use crate::{Mesh, Triangle, Vertex};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
}

impl MeshFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "stl" => Some(MeshFormat::Stl),
                _ => None,
            })
    }

    /// Like [`MeshFormat::from_path`], but an unknown extension is an error.
    pub fn require(path: &Path) -> MeshResult<Self> {
        Self::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
            extension: path.extension().and_then(|e| e.to_str()).map(String::from),
        })
    }
}

/// Load a mesh from file, auto-detecting format from extension.
///
/// The loaded mesh is checked for out-of-range indices and non-finite
/// coordinates; a file without triangles is an [`MeshError::EmptyMesh`].
pub fn load_mesh(path: &Path) -> MeshResult<Mesh> {
    let format = MeshFormat::require(path)?;

    info!("Loading mesh from {:?} (format: {:?})", path, format);

    let mesh = match format {
        MeshFormat::Stl => load_stl(path),
    };
    let mesh = match mesh {
        Ok(mesh) => mesh,
        Err(e) => {
            log_io_operation("load", path, Some("stl"), false);
            return Err(e);
        }
    };

    if mesh.vertices.is_empty() || mesh.faces.is_empty() {
        return Err(MeshError::empty_mesh(format!(
            "{} contains no triangles",
            path.display()
        )));
    }

    validate_mesh_data(&mesh, &ValidationOptions::default())?;

    if let Some(bounds) = mesh.bounds() {
        let dims = bounds.extent();
        debug!(
            "Bounding box: [{:.1}, {:.1}, {:.1}] to [{:.1}, {:.1}, {:.1}]",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        );

        let max_dim = dims.x.max(dims.y).max(dims.z);
        if max_dim < 0.1 {
            warn!(
                "Mesh largest dimension is {:.6} - may need scaling",
                max_dim
            );
        }
    }

    log_mesh_stats(&mesh, "loaded");
    log_io_operation("load", path, Some("stl"), true);
    Ok(mesh)
}

/// Load mesh from STL file (binary or ASCII).
///
/// `stl_io` merges identical vertices into an indexed mesh. Facets that
/// collapse onto a repeated vertex after merging are dropped and counted in
/// [`Mesh::collapsed_facets`].
fn load_stl(path: &Path) -> MeshResult<Mesh> {
    let file = File::open(path).map_err(|e| MeshError::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    let stl = stl_io::read_stl(&mut reader).map_err(|e| MeshError::ParseError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    debug!(
        "STL contains {} vertices, {} triangles",
        stl.vertices.len(),
        stl.faces.len()
    );

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());

    // stl_io::Vertex is Vector<f32> with .0 being [f32; 3]
    for v in &stl.vertices {
        mesh.vertices.push(Vertex::from_coords(
            v.0[0] as f64,
            v.0[1] as f64,
            v.0[2] as f64,
        ));
    }

    for face in &stl.faces {
        let indices = [
            face.vertices[0] as u32,
            face.vertices[1] as u32,
            face.vertices[2] as u32,
        ];

        if indices[0] != indices[1] && indices[1] != indices[2] && indices[0] != indices[2] {
            mesh.faces.push(indices);
        } else {
            mesh.collapsed_facets += 1;
        }
    }

    if mesh.collapsed_facets > 0 {
        warn!(
            "Dropped {} STL facet(s) with repeated vertices",
            mesh.collapsed_facets
        );
    }

    Ok(mesh)
}

/// Save mesh to STL file (binary format).
///
/// Face normals are recomputed from the winding; degenerate faces get a
/// zero normal.
pub fn save_stl(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    let _span = crate::mesh_span!("save_stl", mesh).entered();
    info!("Saving mesh to {:?}", path);

    let file = File::create(path).map_err(|e| MeshError::IoWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    let mut triangles = Vec::with_capacity(mesh.face_count());
    for face_index in 0..mesh.face_count() {
        let tri = mesh.triangle(face_index).ok_or_else(|| {
            let [a, b, c] = mesh.faces[face_index];
            let vertex_index = [a, b, c]
                .into_iter()
                .find(|&i| i as usize >= mesh.vertex_count())
                .unwrap_or(a);
            MeshError::invalid_vertex_index(face_index, vertex_index, mesh.vertex_count())
        })?;
        triangles.push(to_stl_triangle(&tri));
    }

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| MeshError::IoWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    writer.flush().map_err(|e| MeshError::IoWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Saved {} triangles to {:?}", mesh.face_count(), path);
    log_io_operation("save", path, Some("stl"), true);

    Ok(())
}

fn to_stl_triangle(tri: &Triangle) -> stl_io::Triangle {
    let n = tri.normal().unwrap_or_else(nalgebra::Vector3::zeros);
    let vertex = |p: &nalgebra::Point3<f64>| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32]);
    stl_io::Triangle {
        normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
        vertices: [vertex(&tri.v0), vertex(&tri.v1), vertex(&tri.v2)],
    }
}

impl Mesh {
    /// Load a mesh from an STL file.
    pub fn load(path: impl AsRef<Path>) -> MeshResult<Self> {
        load_mesh(path.as_ref())
    }

    /// Save this mesh as binary STL.
    pub fn save(&self, path: impl AsRef<Path>) -> MeshResult<()> {
        MeshFormat::require(path.as_ref())?;
        save_stl(self, path.as_ref())
    }
}
