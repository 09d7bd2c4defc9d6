//! Geometry analysis and interactive measurement for triangle meshes.
//!
//! This crate loads STL models and answers the questions a print shop asks
//! before quoting a part: how big is it, how much material does it take, and
//! is the surface closed. It also provides the state machine behind an
//! interactive point-to-point ruler.
//!
//! # Features
//!
//! - **File I/O**: Load and save binary and ASCII STL
//! - **Analysis**: Volume, surface area, centroid, bounding box in one pass
//! - **Topology**: Boundary, non-manifold and inconsistently wound edges
//! - **Materials**: Density table and weight estimates
//! - **Ruler**: Orthographic view selection and two-point distance measurement
//! - **Annotations**: Notes pinned to model points, saved as a JSON sidecar
//!   (`serde` feature, on by default)
//!
//! # Units and Scale
//!
//! **This library assumes millimeter (mm) units.**
//!
//! - Volumes are in mm³ and areas in mm²; reports also expose cm³ and cm²
//! - Densities are in g/cm³, so weights come out in grams
//! - Tolerances that depend on model size scale with the bounding diagonal
//!
//! # Coordinate System
//!
//! The library uses a **right-handed coordinate system** with Z up:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside** the mesh,
//! so a correctly oriented closed mesh has positive signed volume.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh_gauge::{Material, Mesh};
//!
//! let mesh = Mesh::load("part.stl").unwrap();
//! let report = mesh.analyze().unwrap();
//!
//! println!("{}", report);
//! if let Some(resin) = Material::lookup("Standard Resin") {
//!     println!("Resin weight: {}", resin.weight_of(report.volume));
//! }
//! ```
//!
//! # Analysis Parameters
//!
//! ```
//! use mesh_gauge::{AnalysisParams, Mesh, Vertex};
//!
//! let mut mesh = Mesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(10.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 10.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! let report = mesh_gauge::analyze(&mesh, &AnalysisParams::with_density(1.24)).unwrap();
//! assert!(!report.is_watertight);
//! assert_eq!(report.topology.boundary_edges, 3);
//! assert!((report.surface_area - 50.0).abs() < 1e-9);
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return `MeshResult<T>`, which is `Result<T, MeshError>`.
//! Geometry problems that still allow an answer (open surfaces, degenerate
//! faces, inverted winding) are reported as diagnostics on the report rather
//! than as errors.
//!
//! ```
//! use mesh_gauge::{Mesh, MeshError};
//!
//! match Mesh::load("nonexistent.stl") {
//!     Ok(_) => println!("Loaded successfully"),
//!     Err(MeshError::IoRead { path, source }) => {
//!         println!("Failed to read {:?}: {}", path, source);
//!     }
//!     Err(MeshError::UnsupportedFormat { extension }) => {
//!         println!("Unsupported format: {:?}", extension);
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! # Troubleshooting
//!
//! ## "Mesh is not watertight"
//!
//! Volume, centroid and weight are still computed, but they are only
//! meaningful for closed surfaces. The report names an example boundary edge.
//!
//! ## "Orientation: INVERTED"
//!
//! Every face is wound inward. The magnitudes are still correct; flip the
//! winding to get a positive signed volume:
//! ```
//! use mesh_gauge::Mesh;
//! let mut mesh = Mesh::new();
//! // ... load or create mesh
//! mesh.flip_winding();
//! ```
//!
//! ## "Scale seems wrong"
//!
//! Check the mesh dimensions and scale if needed:
//! ```
//! use mesh_gauge::Mesh;
//! let mut mesh = Mesh::new();
//! // ... load or create mesh
//! let dims = mesh.dimensions();
//! println!("Dimensions: {:.1} x {:.1} x {:.1} mm", dims.width, dims.depth, dims.height);
//! // Models exported in meters are 1000x too small
//! mesh.scale(1000.0);
//! ```

mod error;
pub mod tracing_ext;
mod types;

#[cfg(test)]
mod fixtures;

pub mod adjacency;
pub mod analyze;
#[cfg(feature = "serde")]
pub mod annotation;
pub mod io;
pub mod material;
pub mod measure;
pub mod progress;
pub mod ruler;
pub mod validate;

// Re-export core types at crate root
pub use error::{
    AnalysisDiagnostic, ErrorCode, IssueSeverity, MeshError, MeshLocation, MeshResult,
    RecoverySuggestion, ValidationIssue,
};
pub use types::{BoundingBox, Mesh, Triangle, Vertex};

pub use adjacency::{EdgeSummary, EdgeUse, MeshAdjacency};

#[cfg(feature = "serde")]
pub use annotation::{
    Annotation, Annotations, annotation_path, delete_annotations, load_annotations,
    save_annotations,
};

pub use analyze::{
    AnalysisParams, CentroidMethod, GeometryReport, Orientation, TopologySummary, analyze,
    analyze_with_progress,
};

pub use io::{MeshFormat, load_mesh, save_stl};

pub use material::{
    MATERIALS, Material, ScaledProperties, WeightEstimate, estimate_weight, mm2_to_cm2,
    mm3_to_cm3, scale_for_target_weight,
};

pub use measure::{Dimensions, DistanceMeasurement, dimensions, measure_distance};

pub use progress::{Progress, ProgressCallback, ProgressTracker};

pub use ruler::{
    Advisory, CameraOrientation, MeasurementPoint, MeasurementResult, Pick, Projection,
    RulerCommand, RulerConfig, RulerController, RulerError, RulerEvent, RulerState, StandardView,
    Transition, Viewer,
};

pub use validate::{
    DataValidationResult, ValidationOptions, validate_mesh_data, validate_mesh_data_strict,
};

pub use tracing_ext::{OperationTimer, log_io_operation, log_mesh_stats};
