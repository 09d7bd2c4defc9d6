//! Geometry analysis: volume, surface area, centroid, bounds, watertightness
//! and weight in one linear pass over the faces.
//!
//! # Example
//!
//! ```
//! use mesh_gauge::{Mesh, Vertex, analyze::{analyze, AnalysisParams}};
//!
//! let mut mesh = Mesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
//! mesh.faces.extend([[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]]);
//!
//! let report = analyze(&mesh, &AnalysisParams::default()).unwrap();
//! assert!(report.is_watertight);
//! assert!((report.volume - 1.0 / 6.0).abs() < 1e-12);
//! ```

use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use crate::adjacency::{EdgeSummary, MeshAdjacency};
use crate::error::{AnalysisDiagnostic, IssueSeverity, MeshError, MeshResult};
use crate::material::{WeightEstimate, estimate_weight, mm2_to_cm2, mm3_to_cm3};
use crate::measure::Dimensions;
use crate::progress::{ProgressCallback, ProgressTracker};
use crate::tracing_ext::{OperationTimer, log_geometry_report};
use crate::validate::validate_mesh_data_strict;
use crate::{BoundingBox, Mesh, Triangle};

/// Parameters for geometry analysis.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisParams {
    /// Faces with area at or below `degenerate_area_epsilon × d²`, where `d`
    /// is the bounding box diagonal, are skipped in the area, volume and
    /// centroid sums (default: 1e-12).
    pub degenerate_area_epsilon: f64,

    /// The total volume counts as zero when `|V| <= volume_epsilon × d³`,
    /// where `d` is the bounding box diagonal (default: 1e-9). The centroid
    /// then falls back to the vertex mean.
    pub volume_epsilon: f64,

    /// Material density in g/cm³; when set the report carries a weight.
    pub density: Option<f64>,

    /// Faces processed between progress callbacks (default: 10 000).
    pub check_interval: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            degenerate_area_epsilon: 1e-12,
            volume_epsilon: 1e-9,
            density: None,
            check_interval: 10_000,
        }
    }
}

impl AnalysisParams {
    /// Default parameters with a material density.
    pub fn with_density(density_g_cm3: f64) -> Self {
        Self {
            density: Some(density_g_cm3),
            ..Default::default()
        }
    }

    /// Only exactly flat faces are degenerate and the zero-volume band is
    /// narrow.
    pub fn strict() -> Self {
        Self {
            degenerate_area_epsilon: 0.0,
            volume_epsilon: 1e-12,
            ..Default::default()
        }
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> MeshResult<()> {
        if !(self.degenerate_area_epsilon >= 0.0 && self.degenerate_area_epsilon.is_finite()) {
            return Err(MeshError::invalid_parameter(
                "degenerate_area_epsilon",
                format!("must be finite and >= 0, got {}", self.degenerate_area_epsilon),
            ));
        }
        if !(self.volume_epsilon >= 0.0 && self.volume_epsilon.is_finite()) {
            return Err(MeshError::invalid_parameter(
                "volume_epsilon",
                format!("must be finite and >= 0, got {}", self.volume_epsilon),
            ));
        }
        if let Some(density) = self.density {
            if !(density > 0.0 && density.is_finite()) {
                return Err(MeshError::invalid_parameter(
                    "density",
                    format!("must be positive, got {density}"),
                ));
            }
        }
        Ok(())
    }
}

/// How the centroid was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CentroidMethod {
    /// Volume-weighted tetrahedron centroids.
    Volumetric,
    /// Unweighted mean of all vertices.
    VertexMean,
}

/// Face orientation inferred from the sign of the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    /// Positive signed volume: normals point outward.
    Outward,
    /// Negative signed volume: normals point inward.
    Inverted,
    /// Volume is numerically zero.
    Indeterminate,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Outward => write!(f, "outward"),
            Orientation::Inverted => write!(f, "INVERTED"),
            Orientation::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Edge topology counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologySummary {
    /// Distinct undirected edges.
    pub edge_count: usize,
    /// Edges used by one face.
    pub boundary_edges: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edges: usize,
    /// Two-face edges whose faces walk them in the same direction.
    pub inconsistent_edges: usize,
}

impl From<&EdgeSummary> for TopologySummary {
    fn from(summary: &EdgeSummary) -> Self {
        Self {
            edge_count: summary.edge_count,
            boundary_edges: summary.boundary_edges,
            non_manifold_edges: summary.non_manifold_edges,
            inconsistent_edges: summary.inconsistent_edges,
        }
    }
}

/// Physical properties of a mesh.
///
/// Always computed in full; a failed analysis returns an error, never a
/// partial report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryReport {
    pub vertex_count: usize,
    pub face_count: usize,
    /// Raw divergence-theorem sum; negative when the mesh is inside-out.
    pub signed_volume: f64,
    /// Absolute volume in model units³.
    pub volume: f64,
    /// Total area of non-degenerate faces.
    pub surface_area: f64,
    pub bounds: BoundingBox,
    /// Center of mass assuming uniform density.
    pub centroid: Point3<f64>,
    pub centroid_method: CentroidMethod,
    /// Closed, manifold and consistently wound.
    pub is_watertight: bool,
    pub topology: TopologySummary,
    pub orientation: Orientation,
    pub degenerate_face_count: usize,
    /// Present when a density was supplied.
    pub weight_estimate: Option<WeightEstimate>,
    pub diagnostics: Vec<AnalysisDiagnostic>,
    /// The mesh had no faces; every quantity is zero.
    pub is_empty: bool,
}

impl GeometryReport {
    /// Zeroed report for a mesh without faces.
    fn empty(mesh: &Mesh) -> Self {
        let mut diagnostics = vec![AnalysisDiagnostic::EmptyMesh];
        if mesh.collapsed_facets > 0 {
            diagnostics.push(AnalysisDiagnostic::DegenerateFaces {
                count: mesh.collapsed_facets,
                first_face: None,
                collapsed_on_load: mesh.collapsed_facets,
            });
        }
        Self {
            vertex_count: mesh.vertex_count(),
            face_count: 0,
            signed_volume: 0.0,
            volume: 0.0,
            surface_area: 0.0,
            bounds: BoundingBox::zero(),
            centroid: Point3::origin(),
            centroid_method: CentroidMethod::VertexMean,
            is_watertight: false,
            topology: TopologySummary::default(),
            orientation: Orientation::Indeterminate,
            degenerate_face_count: mesh.collapsed_facets,
            weight_estimate: None,
            diagnostics,
            is_empty: true,
        }
    }

    /// Width, depth, height and related box measures.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_bounds(&self.bounds)
    }

    /// Volume in cm³, assuming millimetre units.
    pub fn volume_cm3(&self) -> f64 {
        mm3_to_cm3(self.volume)
    }

    /// Surface area in cm², assuming millimetre units.
    pub fn surface_area_cm2(&self) -> f64 {
        mm2_to_cm2(self.surface_area)
    }

    /// Whether any diagnostic makes volume and weight untrustworthy.
    pub fn has_errors(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Error-severity diagnostics: the watertightness failure kinds.
    ///
    /// For a non-empty mesh this is empty exactly when `is_watertight`.
    pub fn failures(&self) -> impl Iterator<Item = &AnalysisDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == IssueSeverity::Error)
    }
}

impl std::fmt::Display for GeometryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Geometry Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;

        let (min, max) = (self.bounds.min, self.bounds.max);
        writeln!(
            f,
            "  Bounds: [{:.2}, {:.2}, {:.2}] to [{:.2}, {:.2}, {:.2}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        )?;
        let dims = self.dimensions();
        writeln!(
            f,
            "  Dimensions: {:.2} x {:.2} x {:.2}",
            dims.width, dims.depth, dims.height
        )?;

        writeln!(
            f,
            "  Volume: {:.2} (signed: {:.2}, {:.3} cm³)",
            self.volume,
            self.signed_volume,
            self.volume_cm3()
        )?;
        writeln!(
            f,
            "  Surface Area: {:.2} ({:.2} cm²)",
            self.surface_area,
            self.surface_area_cm2()
        )?;
        writeln!(
            f,
            "  Centroid: ({:.3}, {:.3}, {:.3}){}",
            self.centroid.x,
            self.centroid.y,
            self.centroid.z,
            match self.centroid_method {
                CentroidMethod::Volumetric => "",
                CentroidMethod::VertexMean => " [vertex mean]",
            }
        )?;
        writeln!(
            f,
            "  Watertight: {} (boundary edges: {}, non-manifold edges: {}, inconsistent edges: {})",
            if self.is_watertight { "yes" } else { "NO" },
            self.topology.boundary_edges,
            self.topology.non_manifold_edges,
            self.topology.inconsistent_edges
        )?;
        writeln!(f, "  Orientation: {}", self.orientation)?;
        if self.degenerate_face_count > 0 {
            writeln!(f, "  Degenerate faces: {}", self.degenerate_face_count)?;
        }
        if let Some(weight) = &self.weight_estimate {
            writeln!(f, "  Weight: {}", weight)?;
        }
        for diagnostic in &self.diagnostics {
            writeln!(f, "  [{}] {}", diagnostic.severity(), diagnostic)?;
        }

        Ok(())
    }
}

/// Analyze a mesh.
///
/// Rejects out-of-range or repeated face indices and non-finite coordinates
/// with an error. Every other problem is reported as a diagnostic.
pub fn analyze(mesh: &Mesh, params: &AnalysisParams) -> MeshResult<GeometryReport> {
    analyze_with_progress(mesh, params, None)
}

/// Analyze a mesh, reporting progress every `params.check_interval` faces.
///
/// A callback returning `false` aborts with [`MeshError::Cancelled`].
pub fn analyze_with_progress(
    mesh: &Mesh,
    params: &AnalysisParams,
    callback: Option<&ProgressCallback>,
) -> MeshResult<GeometryReport> {
    let _timer = OperationTimer::with_context("analyze", mesh.face_count(), mesh.vertex_count());

    params.validate()?;
    validate_mesh_data_strict(mesh)?;

    if mesh.faces.is_empty() {
        debug!(target: "mesh_gauge::analysis", "Mesh has no faces, returning empty report");
        let report = GeometryReport::empty(mesh);
        log_geometry_report(&report);
        return Ok(report);
    }

    let total = mesh.face_count();
    let tracker = ProgressTracker::new(total as u64, params.check_interval as u64);
    let mut adjacency = MeshAdjacency::with_capacity(total);

    // Validation guarantees at least one vertex when there are faces.
    let bounds = mesh.bounds().unwrap_or_else(BoundingBox::zero);
    let diagonal = bounds.diagonal();
    let area_threshold = params.degenerate_area_epsilon * diagonal * diagonal;

    let mut surface_area = 0.0;
    let mut signed_volume = 0.0;
    let mut weighted_centroid = Vector3::zeros();
    let mut degenerate_face_count = mesh.collapsed_facets;
    let mut first_degenerate = None;

    for (face_index, face) in mesh.faces.iter().enumerate() {
        adjacency.insert_face(face);

        let tri = Triangle::new(
            mesh.vertices[face[0] as usize].position,
            mesh.vertices[face[1] as usize].position,
            mesh.vertices[face[2] as usize].position,
        );
        let area = tri.area();
        if area <= area_threshold {
            degenerate_face_count += 1;
            first_degenerate.get_or_insert(face_index);
        } else {
            let volume = tri.signed_volume();
            surface_area += area;
            signed_volume += volume;
            // Tetrahedron (origin, v0, v1, v2) centroid is (v0 + v1 + v2) / 4.
            weighted_centroid += (tri.v0.coords + tri.v1.coords + tri.v2.coords) * (volume / 4.0);
        }

        if !tracker.checkpoint(face_index as u64 + 1, callback, "Analyzing faces") {
            warn!(
                target: "mesh_gauge::analysis",
                processed = face_index + 1,
                total,
                "Analysis cancelled"
            );
            return Err(MeshError::Cancelled {
                processed: face_index + 1,
                total,
            });
        }
    }

    let volume_is_zero = signed_volume.abs() <= params.volume_epsilon * diagonal.powi(3);

    let mut diagnostics = Vec::new();

    let (centroid, centroid_method) = if volume_is_zero {
        diagnostics.push(AnalysisDiagnostic::CentroidFallback);
        (vertex_mean(mesh), CentroidMethod::VertexMean)
    } else {
        (
            Point3::from(weighted_centroid / signed_volume),
            CentroidMethod::Volumetric,
        )
    };

    let orientation = if volume_is_zero {
        Orientation::Indeterminate
    } else if signed_volume < 0.0 {
        diagnostics.push(AnalysisDiagnostic::InvertedOrientation { signed_volume });
        Orientation::Inverted
    } else {
        Orientation::Outward
    };

    if degenerate_face_count > 0 {
        diagnostics.push(AnalysisDiagnostic::DegenerateFaces {
            count: degenerate_face_count,
            first_face: first_degenerate,
            collapsed_on_load: mesh.collapsed_facets,
        });
    }

    let edges = adjacency.summary();
    if let Some(example) = edges.first_boundary {
        diagnostics.push(AnalysisDiagnostic::BoundaryEdges {
            count: edges.boundary_edges,
            example,
        });
    }
    if let Some(example) = edges.first_non_manifold {
        diagnostics.push(AnalysisDiagnostic::NonManifoldEdges {
            count: edges.non_manifold_edges,
            max_faces: edges.max_faces_per_edge,
            example,
        });
    }
    if edges.inconsistent_edges > 0 {
        diagnostics.push(AnalysisDiagnostic::InconsistentWinding {
            count: edges.inconsistent_edges,
        });
    }

    let volume = signed_volume.abs();
    let report = GeometryReport {
        vertex_count: mesh.vertex_count(),
        face_count: total,
        signed_volume,
        volume,
        surface_area,
        bounds,
        centroid,
        centroid_method,
        is_watertight: edges.is_watertight(),
        topology: TopologySummary::from(&edges),
        orientation,
        degenerate_face_count,
        weight_estimate: params.density.map(|d| estimate_weight(volume, d)),
        diagnostics,
        is_empty: false,
    };

    log_geometry_report(&report);
    Ok(report)
}

fn vertex_mean(mesh: &Mesh) -> Point3<f64> {
    if mesh.vertices.is_empty() {
        return Point3::origin();
    }
    let sum: Vector3<f64> = mesh.vertices.iter().map(|v| v.position.coords).sum();
    Point3::from(sum / mesh.vertices.len() as f64)
}

impl Mesh {
    /// Analyze this mesh with default parameters.
    pub fn analyze(&self) -> MeshResult<GeometryReport> {
        analyze(self, &AnalysisParams::default())
    }
}
