//! Dimensions and point-to-point distances.
//!
//! # Example
//!
//! ```
//! use mesh_gauge::measure::measure_distance;
//! use nalgebra::Point3;
//!
//! let m = measure_distance(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0));
//! assert_eq!(m.distance, 5.0);
//! assert_eq!(m.midpoint(), Point3::new(1.5, 2.0, 0.0));
//! ```

use nalgebra::{Point3, Vector3};

use crate::{BoundingBox, Mesh};

/// Result of dimension extraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Bounding box minimum point.
    pub min: Point3<f64>,
    /// Bounding box maximum point.
    pub max: Point3<f64>,
    /// Width (X dimension).
    pub width: f64,
    /// Depth (Y dimension).
    pub depth: f64,
    /// Height (Z dimension).
    pub height: f64,
    /// Diagonal length.
    pub diagonal: f64,
    /// Volume of bounding box.
    pub bounding_volume: f64,
    /// Center of bounding box.
    pub center: Point3<f64>,
}

impl Dimensions {
    /// Dimensions of an axis-aligned box.
    pub fn from_bounds(bounds: &BoundingBox) -> Self {
        let extent = bounds.extent();
        Self {
            min: bounds.min,
            max: bounds.max,
            width: extent.x,
            depth: extent.y,
            height: extent.z,
            diagonal: extent.norm(),
            bounding_volume: extent.x * extent.y * extent.z,
            center: bounds.center(),
        }
    }

    /// All-zero dimensions at the origin.
    pub fn zero() -> Self {
        Self::from_bounds(&BoundingBox::zero())
    }

    /// Dimensions after a uniform scale about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        let (min, max) = if factor >= 0.0 {
            (self.min * factor, self.max * factor)
        } else {
            (self.max * factor, self.min * factor)
        };
        Self::from_bounds(&BoundingBox::new(min, max))
    }
}

/// Extract dimensions of a mesh. An empty mesh has zero dimensions.
pub fn dimensions(mesh: &Mesh) -> Dimensions {
    mesh.bounds()
        .map(|b| Dimensions::from_bounds(&b))
        .unwrap_or_else(Dimensions::zero)
}

/// Distance measurement result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMeasurement {
    /// Start point.
    pub from: Point3<f64>,
    /// End point.
    pub to: Point3<f64>,
    /// Euclidean distance.
    pub distance: f64,
    /// Distance along X.
    pub dx: f64,
    /// Distance along Y.
    pub dy: f64,
    /// Distance along Z.
    pub dz: f64,
}

impl DistanceMeasurement {
    /// Vector from `from` to `to`.
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.to - self.from
    }

    /// Unit direction, or `None` when the points coincide.
    pub fn direction_normalized(&self) -> Option<Vector3<f64>> {
        if self.distance > f64::EPSILON {
            Some(self.direction() / self.distance)
        } else {
            None
        }
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.from, &self.to)
    }
}

/// Measure distance between two points.
pub fn measure_distance(from: Point3<f64>, to: Point3<f64>) -> DistanceMeasurement {
    let diff = to - from;
    DistanceMeasurement {
        from,
        to,
        distance: diff.norm(),
        dx: diff.x.abs(),
        dy: diff.y.abs(),
        dz: diff.z.abs(),
    }
}

impl Mesh {
    /// Get dimensions of this mesh.
    pub fn dimensions(&self) -> Dimensions {
        dimensions(self)
    }
}
