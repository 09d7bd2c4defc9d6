//! Error types for mesh operations with rich diagnostics.
//!
//! Two families live here:
//! - [`MeshError`]: fatal for the call that produced it (I/O, contract
//!   violations such as out-of-range indices or non-finite coordinates,
//!   cancellation).
//! - [`ValidationIssue`] and [`AnalysisDiagnostic`]: collected findings that
//!   never abort an operation on their own.
//!
//! # Error Codes
//!
//! Each error has a unique code in the format `MESH-XXXX`:
//! - `MESH-1xxx`: I/O errors (file reading, writing, parsing)
//! - `MESH-2xxx`: Input data errors (indices, coordinates)
//! - `MESH-3xxx`: Analysis errors (cancellation, parameters)
//! - `MESH-4xxx`: Format errors
//! - `MESH-5xxx`: Analysis diagnostics (non-fatal)

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Machine-readable error codes for mesh operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// MESH-1001: Failed to read file
    IoRead = 1001,
    /// MESH-1002: Failed to write file
    IoWrite = 1002,
    /// MESH-1003: Failed to parse file format
    ParseError = 1003,

    /// MESH-2001: Face references invalid vertex index
    InvalidVertexIndex = 2001,
    /// MESH-2002: Vertex has NaN or Infinity coordinate
    InvalidCoordinate = 2002,
    /// MESH-2003: Mesh has no vertices or faces
    EmptyMesh = 2003,
    /// MESH-2004: Face uses the same vertex twice
    RepeatedFaceIndex = 2004,

    /// MESH-3001: Analysis cancelled by the caller
    Cancelled = 3001,
    /// MESH-3002: Parameter outside its valid range
    InvalidParameter = 3002,

    /// MESH-4001: Unsupported file format
    UnsupportedFormat = 4001,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `MESH-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IoRead => "MESH-1001",
            ErrorCode::IoWrite => "MESH-1002",
            ErrorCode::ParseError => "MESH-1003",
            ErrorCode::InvalidVertexIndex => "MESH-2001",
            ErrorCode::InvalidCoordinate => "MESH-2002",
            ErrorCode::EmptyMesh => "MESH-2003",
            ErrorCode::RepeatedFaceIndex => "MESH-2004",
            ErrorCode::Cancelled => "MESH-3001",
            ErrorCode::InvalidParameter => "MESH-3002",
            ErrorCode::UnsupportedFormat => "MESH-4001",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recovery suggestions for mesh errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Re-export the file from the original software with different settings.
    ReexportFile { format: Option<String> },
    /// Use a different file format.
    UseDifferentFormat { suggested: Vec<String> },
    /// Check the original mesh for issues.
    CheckSourceMesh { checks: Vec<String> },
    /// Adjust parameters for the operation.
    AdjustParameters { parameters: Vec<(String, String)> },
    /// No automatic recovery available.
    None,
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverySuggestion::ReexportFile { format } => {
                if let Some(fmt) = format {
                    write!(
                        f,
                        "Try re-exporting the mesh as {} from the original software",
                        fmt
                    )
                } else {
                    write!(f, "Try re-exporting the mesh from the original software")
                }
            }
            RecoverySuggestion::UseDifferentFormat { suggested } => {
                write!(f, "Try using a different format: {}", suggested.join(", "))
            }
            RecoverySuggestion::CheckSourceMesh { checks } => {
                write!(f, "Check the source mesh for: {}", checks.join(", "))
            }
            RecoverySuggestion::AdjustParameters { parameters } => {
                let params: Vec<String> = parameters
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v))
                    .collect();
                write!(f, "Try adjusting: {}", params.join(", "))
            }
            RecoverySuggestion::None => {
                write!(f, "No automatic recovery available")
            }
        }
    }
}

/// Location information for mesh errors.
#[derive(Debug, Clone)]
pub enum MeshLocation {
    /// Error at a specific vertex.
    Vertex { index: usize },
    /// Error at a specific face.
    Face {
        index: usize,
        vertices: Option<[u32; 3]>,
    },
    /// Error at a specific edge.
    Edge { vertex_a: u32, vertex_b: u32 },
    /// Error in a file.
    File { path: PathBuf },
}

impl std::fmt::Display for MeshLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshLocation::Vertex { index } => write!(f, "vertex {}", index),
            MeshLocation::Face { index, vertices } => {
                if let Some([a, b, c]) = vertices {
                    write!(f, "face {} with vertices [{}, {}, {}]", index, a, b, c)
                } else {
                    write!(f, "face {}", index)
                }
            }
            MeshLocation::Edge { vertex_a, vertex_b } => {
                write!(f, "edge between vertices {} and {}", vertex_a, vertex_b)
            }
            MeshLocation::File { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Errors that can occur during mesh operations.
#[derive(Debug, Error, Diagnostic)]
pub enum MeshError {
    /// Error reading from a file.
    #[error("failed to read mesh from {path}")]
    #[diagnostic(
        code(mesh::io::read),
        help("Check that the file exists and is readable. Try: ls -la {}", path.display())
    )]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing to a file.
    #[error("failed to write mesh to {path}")]
    #[diagnostic(
        code(mesh::io::write),
        help("Check that the directory exists and is writable")
    )]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing mesh file format.
    #[error("failed to parse mesh from {path}: {details}")]
    #[diagnostic(
        code(mesh::parse::error),
        help("The file may be corrupted or truncated. Try re-exporting it as binary STL.")
    )]
    ParseError { path: PathBuf, details: String },

    /// Unsupported file format.
    #[error("unsupported mesh format: {extension:?}")]
    #[diagnostic(code(mesh::format::unsupported), help("Supported formats: STL"))]
    UnsupportedFormat { extension: Option<String> },

    /// Empty mesh (no vertices or faces).
    #[error("mesh is empty: {details}")]
    #[diagnostic(
        code(mesh::validation::empty),
        help("The mesh must have at least one face. Check that the file was exported correctly.")
    )]
    EmptyMesh { details: String },

    /// Invalid vertex index in face data.
    #[error(
        "invalid vertex index: face {face_index} references vertex {vertex_index}, but mesh only has {vertex_count} vertices"
    )]
    #[diagnostic(
        code(mesh::validation::vertex_index),
        help("The face list does not match the vertex list; check the loader or export settings.")
    )]
    InvalidVertexIndex {
        face_index: usize,
        vertex_index: u32,
        vertex_count: usize,
    },

    /// Invalid coordinate value (NaN or Infinity).
    #[error("invalid coordinate at vertex {vertex_index}: {coordinate} is {value}")]
    #[diagnostic(
        code(mesh::validation::coordinate),
        help(
            "Check for numerical issues in the source data. This often happens with very small or very large values."
        )
    )]
    InvalidCoordinate {
        vertex_index: usize,
        coordinate: &'static str,
        value: f64,
    },

    /// A face references the same vertex more than once.
    #[error("face {face_index} repeats a vertex: {vertices:?}")]
    #[diagnostic(
        code(mesh::validation::repeated_index),
        help("Each triangle needs three distinct vertices; re-export the mesh.")
    )]
    RepeatedFaceIndex {
        face_index: usize,
        vertices: [u32; 3],
    },

    /// The progress callback requested cancellation.
    #[error("analysis cancelled after {processed} of {total} faces")]
    #[diagnostic(code(mesh::analysis::cancelled))]
    Cancelled { processed: usize, total: usize },

    /// A numeric parameter is outside its valid range.
    #[error("invalid parameter {name}: {details}")]
    #[diagnostic(code(mesh::analysis::parameter))]
    InvalidParameter { name: &'static str, details: String },
}

impl MeshError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MeshError::IoRead { .. } => ErrorCode::IoRead,
            MeshError::IoWrite { .. } => ErrorCode::IoWrite,
            MeshError::ParseError { .. } => ErrorCode::ParseError,
            MeshError::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            MeshError::EmptyMesh { .. } => ErrorCode::EmptyMesh,
            MeshError::InvalidVertexIndex { .. } => ErrorCode::InvalidVertexIndex,
            MeshError::InvalidCoordinate { .. } => ErrorCode::InvalidCoordinate,
            MeshError::RepeatedFaceIndex { .. } => ErrorCode::RepeatedFaceIndex,
            MeshError::Cancelled { .. } => ErrorCode::Cancelled,
            MeshError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        }
    }

    /// Returns a recovery suggestion for this error.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            MeshError::IoRead { .. } => RecoverySuggestion::CheckSourceMesh {
                checks: vec!["file exists".into(), "file permissions".into()],
            },
            MeshError::IoWrite { .. } => RecoverySuggestion::CheckSourceMesh {
                checks: vec!["directory exists".into(), "write permissions".into()],
            },
            MeshError::ParseError { .. } => RecoverySuggestion::ReexportFile {
                format: Some("binary STL".into()),
            },
            MeshError::UnsupportedFormat { .. } => RecoverySuggestion::UseDifferentFormat {
                suggested: vec!["STL".into()],
            },
            MeshError::EmptyMesh { .. } => RecoverySuggestion::CheckSourceMesh {
                checks: vec!["mesh has geometry".into(), "correct export settings".into()],
            },
            MeshError::InvalidVertexIndex { .. } | MeshError::RepeatedFaceIndex { .. } => {
                RecoverySuggestion::ReexportFile { format: None }
            }
            MeshError::InvalidCoordinate { .. } => RecoverySuggestion::CheckSourceMesh {
                checks: vec!["coordinate values".into(), "export precision".into()],
            },
            MeshError::Cancelled { .. } => RecoverySuggestion::None,
            MeshError::InvalidParameter { name, .. } => RecoverySuggestion::AdjustParameters {
                parameters: vec![((*name).into(), "use a positive, finite value".into())],
            },
        }
    }

    /// Returns location information if available.
    pub fn location(&self) -> Option<MeshLocation> {
        match self {
            MeshError::InvalidVertexIndex { face_index, .. } => Some(MeshLocation::Face {
                index: *face_index,
                vertices: None,
            }),
            MeshError::RepeatedFaceIndex {
                face_index,
                vertices,
            } => Some(MeshLocation::Face {
                index: *face_index,
                vertices: Some(*vertices),
            }),
            MeshError::InvalidCoordinate { vertex_index, .. } => Some(MeshLocation::Vertex {
                index: *vertex_index,
            }),
            MeshError::ParseError { path, .. }
            | MeshError::IoRead { path, .. }
            | MeshError::IoWrite { path, .. } => Some(MeshLocation::File { path: path.clone() }),
            _ => None,
        }
    }

    /// Create an InvalidVertexIndex error.
    pub fn invalid_vertex_index(face_index: usize, vertex_index: u32, vertex_count: usize) -> Self {
        MeshError::InvalidVertexIndex {
            face_index,
            vertex_index,
            vertex_count,
        }
    }

    /// Create an InvalidCoordinate error.
    pub fn invalid_coordinate(vertex_index: usize, coordinate: &'static str, value: f64) -> Self {
        MeshError::InvalidCoordinate {
            vertex_index,
            coordinate,
            value,
        }
    }

    /// Create an EmptyMesh error.
    pub fn empty_mesh(details: impl Into<String>) -> Self {
        MeshError::EmptyMesh {
            details: details.into(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(name: &'static str, details: impl Into<String>) -> Self {
        MeshError::InvalidParameter {
            name,
            details: details.into(),
        }
    }
}

/// Input data problems found while checking a mesh against its contract.
///
/// Unlike `MeshError`, multiple issues can be collected without stopping validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// Face references a vertex index that doesn't exist.
    InvalidVertexIndex {
        face_index: usize,
        vertex_index: u32,
        vertex_count: usize,
    },
    /// Face uses the same vertex more than once.
    RepeatedFaceIndex {
        face_index: usize,
        vertices: [u32; 3],
    },
    /// Vertex has NaN coordinate.
    NaNCoordinate {
        vertex_index: usize,
        coordinate: &'static str,
    },
    /// Vertex has infinite coordinate.
    InfiniteCoordinate {
        vertex_index: usize,
        coordinate: &'static str,
        value: f64,
    },
}

impl ValidationIssue {
    /// Returns an error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::InvalidVertexIndex { .. } => "MESH-2001",
            ValidationIssue::NaNCoordinate { .. } => "MESH-2002",
            ValidationIssue::InfiniteCoordinate { .. } => "MESH-2002",
            ValidationIssue::RepeatedFaceIndex { .. } => "MESH-2004",
        }
    }

    /// Convert into the fatal error that rejects the input.
    pub fn into_error(self) -> MeshError {
        match self {
            ValidationIssue::InvalidVertexIndex {
                face_index,
                vertex_index,
                vertex_count,
            } => MeshError::invalid_vertex_index(face_index, vertex_index, vertex_count),
            ValidationIssue::RepeatedFaceIndex {
                face_index,
                vertices,
            } => MeshError::RepeatedFaceIndex {
                face_index,
                vertices,
            },
            ValidationIssue::NaNCoordinate {
                vertex_index,
                coordinate,
            } => MeshError::invalid_coordinate(vertex_index, coordinate, f64::NAN),
            ValidationIssue::InfiniteCoordinate {
                vertex_index,
                coordinate,
                value,
            } => MeshError::invalid_coordinate(vertex_index, coordinate, value),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::InvalidVertexIndex {
                face_index,
                vertex_index,
                vertex_count,
            } => {
                write!(
                    f,
                    "face {} references vertex {}, but mesh only has {} vertices",
                    face_index, vertex_index, vertex_count
                )
            }
            ValidationIssue::RepeatedFaceIndex {
                face_index,
                vertices,
            } => write!(f, "face {} repeats a vertex: {:?}", face_index, vertices),
            ValidationIssue::NaNCoordinate {
                vertex_index,
                coordinate,
            } => {
                write!(
                    f,
                    "vertex {} has NaN {} coordinate",
                    vertex_index, coordinate
                )
            }
            ValidationIssue::InfiniteCoordinate {
                vertex_index,
                coordinate,
                value,
            } => {
                write!(
                    f,
                    "vertex {} has infinite {} coordinate ({})",
                    vertex_index, coordinate, value
                )
            }
        }
    }
}

/// Severity levels for analysis diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IssueSeverity {
    /// Informational, no action needed.
    Info,
    /// Warning, results may be less meaningful.
    Warning,
    /// Error, derived physical quantities are not trustworthy.
    Error,
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueSeverity::Info => write!(f, "info"),
            IssueSeverity::Warning => write!(f, "warning"),
            IssueSeverity::Error => write!(f, "error"),
        }
    }
}

/// Non-fatal findings aggregated into a geometry report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AnalysisDiagnostic {
    /// The mesh has no faces; every quantity is zero.
    EmptyMesh,
    /// Faces with zero area were skipped in area, volume and centroid sums.
    ///
    /// `count` includes facets the loader dropped because they collapsed onto
    /// a repeated vertex. `first_face` is the first zero-area face still in
    /// the mesh, if any.
    DegenerateFaces {
        count: usize,
        first_face: Option<usize>,
        collapsed_on_load: usize,
    },
    /// Edges used by a single face: the surface is open.
    BoundaryEdges {
        count: usize,
        example: (u32, u32),
    },
    /// Edges used by more than two faces.
    NonManifoldEdges {
        count: usize,
        max_faces: usize,
        example: (u32, u32),
    },
    /// Edges traversed in the same direction by both adjacent faces.
    InconsistentWinding { count: usize },
    /// The signed volume is negative: faces point inward.
    InvertedOrientation { signed_volume: f64 },
    /// Total volume is numerically zero; the centroid is the vertex mean.
    CentroidFallback,
}

impl AnalysisDiagnostic {
    /// Returns a severity level for the diagnostic.
    pub fn severity(&self) -> IssueSeverity {
        match self {
            AnalysisDiagnostic::EmptyMesh => IssueSeverity::Info,
            AnalysisDiagnostic::DegenerateFaces { .. } => IssueSeverity::Warning,
            AnalysisDiagnostic::BoundaryEdges { .. } => IssueSeverity::Error,
            AnalysisDiagnostic::NonManifoldEdges { .. } => IssueSeverity::Error,
            AnalysisDiagnostic::InconsistentWinding { .. } => IssueSeverity::Error,
            AnalysisDiagnostic::InvertedOrientation { .. } => IssueSeverity::Warning,
            AnalysisDiagnostic::CentroidFallback => IssueSeverity::Info,
        }
    }

    /// Returns a stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisDiagnostic::EmptyMesh => "MESH-5001",
            AnalysisDiagnostic::DegenerateFaces { .. } => "MESH-5002",
            AnalysisDiagnostic::BoundaryEdges { .. } => "MESH-5003",
            AnalysisDiagnostic::NonManifoldEdges { .. } => "MESH-5004",
            AnalysisDiagnostic::InconsistentWinding { .. } => "MESH-5005",
            AnalysisDiagnostic::InvertedOrientation { .. } => "MESH-5006",
            AnalysisDiagnostic::CentroidFallback => "MESH-5007",
        }
    }

    /// Short explanation suitable for a status line.
    pub fn suggestion(&self) -> &'static str {
        match self {
            AnalysisDiagnostic::EmptyMesh => "Load a mesh with at least one triangle",
            AnalysisDiagnostic::DegenerateFaces { .. } => {
                "Zero-area triangles do not affect the totals but indicate a sloppy export"
            }
            AnalysisDiagnostic::BoundaryEdges { .. } => {
                "Open mesh: close the holes in a modelling tool before trusting volume and weight"
            }
            AnalysisDiagnostic::NonManifoldEdges { .. } => {
                "Non-manifold mesh: separate overlapping shells before trusting volume and weight"
            }
            AnalysisDiagnostic::InconsistentWinding { .. } => {
                "Some faces are flipped relative to their neighbours: recalculate normals before trusting volume and weight"
            }
            AnalysisDiagnostic::InvertedOrientation { .. } => {
                "Mesh orientation inverted: normals point inward; volume is reported as absolute"
            }
            AnalysisDiagnostic::CentroidFallback => {
                "Flat or open mesh: center of mass approximated by the vertex average"
            }
        }
    }
}

impl std::fmt::Display for AnalysisDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisDiagnostic::EmptyMesh => write!(f, "mesh has no faces"),
            AnalysisDiagnostic::DegenerateFaces {
                count,
                first_face,
                collapsed_on_load,
            } => {
                write!(f, "{} degenerate face(s) skipped", count)?;
                if let Some(face) = first_face {
                    write!(f, " (first: face {})", face)?;
                }
                if *collapsed_on_load > 0 {
                    write!(f, ", {} collapsed on load", collapsed_on_load)?;
                }
                Ok(())
            }
            AnalysisDiagnostic::BoundaryEdges { count, example } => {
                write!(
                    f,
                    "open mesh: {} boundary edge(s), e.g. ({}, {})",
                    count, example.0, example.1
                )
            }
            AnalysisDiagnostic::NonManifoldEdges {
                count,
                max_faces,
                example,
            } => {
                write!(
                    f,
                    "non-manifold: {} edge(s) shared by more than two faces (up to {}), e.g. ({}, {})",
                    count, max_faces, example.0, example.1
                )
            }
            AnalysisDiagnostic::InconsistentWinding { count } => {
                write!(f, "{} edge(s) with inconsistent winding", count)
            }
            AnalysisDiagnostic::InvertedOrientation { signed_volume } => {
                write!(
                    f,
                    "mesh orientation inverted (signed volume {:.4})",
                    signed_volume
                )
            }
            AnalysisDiagnostic::CentroidFallback => {
                write!(f, "volume is numerically zero; centroid is the vertex mean")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = MeshError::invalid_vertex_index(5, 100, 50);
        assert_eq!(err.code(), ErrorCode::InvalidVertexIndex);
        assert_eq!(err.code().as_str(), "MESH-2001");
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = MeshError::invalid_parameter("density", "must be positive");
        match err.recovery_suggestion() {
            RecoverySuggestion::AdjustParameters { parameters } => {
                assert_eq!(parameters[0].0, "density");
            }
            other => panic!("Expected AdjustParameters suggestion, got {:?}", other),
        }
    }

    #[test]
    fn test_location_info() {
        let err = MeshError::invalid_vertex_index(5, 100, 50);
        match err.location() {
            Some(MeshLocation::Face { index, .. }) => assert_eq!(index, 5),
            other => panic!("Expected Face location, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        let err = MeshError::invalid_vertex_index(5, 100, 50);
        let display = format!("{}", err);
        assert!(display.contains("face 5"));
        assert!(display.contains("vertex 100"));
        assert!(display.contains("50 vertices"));
    }

    #[test]
    fn test_validation_issue_into_error() {
        let issue = ValidationIssue::InfiniteCoordinate {
            vertex_index: 3,
            coordinate: "y",
            value: f64::INFINITY,
        };
        assert_eq!(issue.code(), "MESH-2002");
        let err = issue.into_error();
        assert_eq!(err.code(), ErrorCode::InvalidCoordinate);
    }

    #[test]
    fn test_diagnostic_severity() {
        let open = AnalysisDiagnostic::BoundaryEdges {
            count: 4,
            example: (0, 1),
        };
        assert_eq!(open.severity(), IssueSeverity::Error);
        assert!(open.to_string().contains("open mesh"));

        let inverted = AnalysisDiagnostic::InvertedOrientation { signed_volume: -1.0 };
        assert_eq!(inverted.severity(), IssueSeverity::Warning);
        assert!(inverted.suggestion().contains("inverted"));
        assert!(IssueSeverity::Error > IssueSeverity::Warning);

        let flipped = AnalysisDiagnostic::InconsistentWinding { count: 3 };
        assert_eq!(flipped.severity(), IssueSeverity::Error);
    }

    #[test]
    fn test_degenerate_display() {
        let skipped = AnalysisDiagnostic::DegenerateFaces {
            count: 2,
            first_face: Some(7),
            collapsed_on_load: 0,
        };
        assert_eq!(skipped.to_string(), "2 degenerate face(s) skipped (first: face 7)");

        let collapsed = AnalysisDiagnostic::DegenerateFaces {
            count: 1,
            first_face: None,
            collapsed_on_load: 1,
        };
        assert_eq!(
            collapsed.to_string(),
            "1 degenerate face(s) skipped, 1 collapsed on load"
        );
        assert_eq!(collapsed.severity(), IssueSeverity::Warning);
    }
}
