//! Input contract checks for mesh data.
//!
//! Analysis assumes every face index is in range, the three indices of a face
//! are distinct, and every coordinate is finite. [`validate_mesh_data`] checks
//! those assumptions in one linear pass so that a bad mesh is rejected before
//! any accumulation starts.

use tracing::{debug, warn};

use crate::Mesh;
use crate::error::{MeshResult, ValidationIssue};

/// Options for mesh data validation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationOptions {
    /// Whether to reject the mesh on finding invalid data (default: true).
    /// If false, issues are collected but validation continues.
    pub reject_on_invalid: bool,
    /// Maximum number of issues to collect before stopping (default: 100).
    pub max_issues: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            reject_on_invalid: true,
            max_issues: 100,
        }
    }
}

impl ValidationOptions {
    /// Create options that collect all issues without rejecting.
    pub fn collect_all() -> Self {
        Self {
            reject_on_invalid: false,
            max_issues: 1000,
        }
    }
}

/// Result of mesh data validation.
#[derive(Debug, Clone, Default)]
pub struct DataValidationResult {
    /// List of issues found during validation.
    pub issues: Vec<ValidationIssue>,
    /// Number of invalid vertex indices found.
    pub invalid_index_count: usize,
    /// Number of faces that repeat a vertex.
    pub repeated_index_count: usize,
    /// Number of NaN coordinates found.
    pub nan_count: usize,
    /// Number of infinite coordinates found.
    pub infinity_count: usize,
}

impl DataValidationResult {
    /// Check if validation passed with no issues.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Get total number of issues found.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    fn record(&mut self, issue: ValidationIssue, options: &ValidationOptions) -> MeshResult<()> {
        match issue {
            ValidationIssue::InvalidVertexIndex { .. } => self.invalid_index_count += 1,
            ValidationIssue::RepeatedFaceIndex { .. } => self.repeated_index_count += 1,
            ValidationIssue::NaNCoordinate { .. } => self.nan_count += 1,
            ValidationIssue::InfiniteCoordinate { .. } => self.infinity_count += 1,
        }
        if options.reject_on_invalid {
            return Err(issue.into_error());
        }
        self.issues.push(issue);
        Ok(())
    }
}

impl std::fmt::Display for DataValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "Data validation passed: no issues found")
        } else {
            writeln!(f, "Data validation found {} issue(s):", self.issue_count())?;
            if self.invalid_index_count > 0 {
                writeln!(f, "  - {} invalid vertex indices", self.invalid_index_count)?;
            }
            if self.repeated_index_count > 0 {
                writeln!(f, "  - {} faces repeating a vertex", self.repeated_index_count)?;
            }
            if self.nan_count > 0 {
                writeln!(f, "  - {} NaN coordinates", self.nan_count)?;
            }
            if self.infinity_count > 0 {
                writeln!(f, "  - {} infinite coordinates", self.infinity_count)?;
            }
            Ok(())
        }
    }
}

/// Validate mesh data for invalid indices and coordinates.
///
/// Checks that coordinates are finite, that face indices are within vertex
/// bounds, and that no face repeats a vertex.
///
/// # Returns
/// - `Ok(DataValidationResult)` - Validation completed (check `is_valid()` for result)
/// - `Err(MeshError)` - first issue found, when `reject_on_invalid` is true
///
/// # Example
/// ```
/// use mesh_gauge::{Mesh, validate::{validate_mesh_data, ValidationOptions}};
///
/// let mesh = Mesh::new();
/// let validation = validate_mesh_data(&mesh, &ValidationOptions::default()).unwrap();
/// assert!(validation.is_valid());
/// ```
pub fn validate_mesh_data(
    mesh: &Mesh,
    options: &ValidationOptions,
) -> MeshResult<DataValidationResult> {
    let mut result = DataValidationResult::default();
    let vertex_count = mesh.vertices.len();

    'vertices: for (vertex_index, vertex) in mesh.vertices.iter().enumerate() {
        let p = &vertex.position;
        for (coordinate, value) in [("x", p.x), ("y", p.y), ("z", p.z)] {
            if result.issues.len() >= options.max_issues {
                break 'vertices;
            }
            if value.is_nan() {
                result.record(
                    ValidationIssue::NaNCoordinate {
                        vertex_index,
                        coordinate,
                    },
                    options,
                )?;
            } else if value.is_infinite() {
                result.record(
                    ValidationIssue::InfiniteCoordinate {
                        vertex_index,
                        coordinate,
                        value,
                    },
                    options,
                )?;
            }
        }
    }

    'faces: for (face_index, face) in mesh.faces.iter().enumerate() {
        for &vertex_index in face {
            if result.issues.len() >= options.max_issues {
                break 'faces;
            }
            if vertex_index as usize >= vertex_count {
                result.record(
                    ValidationIssue::InvalidVertexIndex {
                        face_index,
                        vertex_index,
                        vertex_count,
                    },
                    options,
                )?;
            }
        }

        let [a, b, c] = *face;
        if (a == b || b == c || a == c) && result.issues.len() < options.max_issues {
            result.record(
                ValidationIssue::RepeatedFaceIndex {
                    face_index,
                    vertices: *face,
                },
                options,
            )?;
        }
    }

    if !result.is_valid() {
        warn!(
            "Mesh data validation found {} issue(s): {} invalid indices, {} repeated, {} NaN, {} Inf",
            result.issue_count(),
            result.invalid_index_count,
            result.repeated_index_count,
            result.nan_count,
            result.infinity_count
        );
    } else {
        debug!("Mesh data validation passed");
    }

    Ok(result)
}

/// Validate mesh data with default options (rejects on first error).
pub fn validate_mesh_data_strict(mesh: &Mesh) -> MeshResult<()> {
    validate_mesh_data(mesh, &ValidationOptions::default())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, MeshError};
    use crate::fixtures::unit_cube;
    use crate::Vertex;

    #[test]
    fn test_validate_valid_mesh_data() {
        let result = validate_mesh_data(&unit_cube(), &ValidationOptions::default()).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.issue_count(), 0);
    }

    #[test]
    fn test_validate_invalid_vertex_index_strict() {
        let mut mesh = unit_cube();
        mesh.faces.push([0, 1, 100]);

        let err = validate_mesh_data(&mesh, &ValidationOptions::default()).unwrap_err();
        match err {
            MeshError::InvalidVertexIndex {
                face_index,
                vertex_index,
                vertex_count,
            } => {
                assert_eq!(face_index, 12);
                assert_eq!(vertex_index, 100);
                assert_eq!(vertex_count, 8);
            }
            other => panic!("Expected InvalidVertexIndex, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_invalid_vertex_index_collect() {
        let mut mesh = unit_cube();
        mesh.faces.push([0, 100, 200]);

        let result = validate_mesh_data(&mesh, &ValidationOptions::collect_all()).unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.invalid_index_count, 2);
    }

    #[test]
    fn test_validate_nan_coordinate_strict() {
        let mut mesh = unit_cube();
        mesh.vertices[3].position.y = f64::NAN;

        let err = validate_mesh_data_strict(&mesh).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCoordinate);
        match err {
            MeshError::InvalidCoordinate {
                vertex_index,
                coordinate,
                ..
            } => {
                assert_eq!(vertex_index, 3);
                assert_eq!(coordinate, "y");
            }
            other => panic!("Expected InvalidCoordinate, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_infinity_collect() {
        let mut mesh = unit_cube();
        mesh.vertices[0].position.x = f64::INFINITY;
        mesh.vertices[1].position.z = f64::NEG_INFINITY;

        let result = validate_mesh_data(&mesh, &ValidationOptions::collect_all()).unwrap();
        assert_eq!(result.infinity_count, 2);
        assert_eq!(result.nan_count, 0);
    }

    #[test]
    fn test_validate_repeated_index() {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.faces.push([0, 1, 1]);

        let err = validate_mesh_data_strict(&mesh).unwrap_err();
        assert_eq!(err.code(), ErrorCode::RepeatedFaceIndex);
    }

    #[test]
    fn test_validation_options_max_issues() {
        let mut mesh = Mesh::new();
        for _ in 0..10 {
            mesh.vertices
                .push(Vertex::from_coords(f64::NAN, f64::NAN, f64::NAN));
        }
        let options = ValidationOptions {
            reject_on_invalid: false,
            max_issues: 5,
        };
        let result = validate_mesh_data(&mesh, &options).unwrap();
        assert_eq!(result.issue_count(), 5);
    }

    #[test]
    fn test_data_validation_result_display() {
        let mut mesh = unit_cube();
        mesh.faces.push([0, 0, 1]);
        let result = validate_mesh_data(&mesh, &ValidationOptions::collect_all()).unwrap();
        let text = result.to_string();
        assert!(text.contains("1 issue"));
        assert!(text.contains("repeating a vertex"));
    }
}
