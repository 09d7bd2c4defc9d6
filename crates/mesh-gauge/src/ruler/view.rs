//! Projection kinds and the six standard measurement views.
//!
//! The model frame is right-handed with Z up. Every view is an explicit
//! `(direction, up)` pair; none is derived from another by flipping.

use nalgebra::{Point3, Vector3};

use super::RulerError;
use crate::BoundingBox;

/// Distance from the box center to the camera, in bounding diagonals.
pub const CAMERA_DISTANCE_FACTOR: f64 = 2.0;

/// Camera projection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Projection::Perspective => write!(f, "perspective"),
            Projection::Orthographic => write!(f, "orthographic"),
        }
    }
}

/// Fixed viewpoints offered while measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StandardView {
    /// Looking along +Y.
    #[default]
    Front,
    /// Looking along -Y.
    Rear,
    /// Looking along -X; the "side" view.
    Right,
    /// Looking along +X.
    Left,
    /// Looking down along -Z.
    Top,
    /// Looking up along +Z.
    Bottom,
}

impl StandardView {
    /// Every view, in toolbar order.
    pub const ALL: [StandardView; 6] = [
        StandardView::Front,
        StandardView::Right,
        StandardView::Top,
        StandardView::Bottom,
        StandardView::Rear,
        StandardView::Left,
    ];

    /// Unit vector from the camera toward the model.
    pub fn direction(&self) -> Vector3<f64> {
        match self {
            StandardView::Front => Vector3::new(0.0, 1.0, 0.0),
            StandardView::Rear => Vector3::new(0.0, -1.0, 0.0),
            StandardView::Right => Vector3::new(-1.0, 0.0, 0.0),
            StandardView::Left => Vector3::new(1.0, 0.0, 0.0),
            StandardView::Top => Vector3::new(0.0, 0.0, -1.0),
            StandardView::Bottom => Vector3::new(0.0, 0.0, 1.0),
        }
    }

    /// Screen-up vector, perpendicular to [`StandardView::direction`].
    pub fn up(&self) -> Vector3<f64> {
        match self {
            StandardView::Front
            | StandardView::Rear
            | StandardView::Right
            | StandardView::Left => Vector3::new(0.0, 0.0, 1.0),
            StandardView::Top => Vector3::new(0.0, 1.0, 0.0),
            StandardView::Bottom => Vector3::new(0.0, -1.0, 0.0),
        }
    }

    /// Lowercase identifier.
    pub fn name(&self) -> &'static str {
        match self {
            StandardView::Front => "front",
            StandardView::Rear => "rear",
            StandardView::Right => "side",
            StandardView::Left => "left",
            StandardView::Top => "top",
            StandardView::Bottom => "bottom",
        }
    }

    /// Camera framing `bounds` from this view.
    ///
    /// The camera sits [`CAMERA_DISTANCE_FACTOR`] diagonals from the box
    /// center; a zero-size box is treated as having unit diagonal.
    pub fn camera_for(&self, bounds: &BoundingBox) -> CameraOrientation {
        let focal_point = bounds.center();
        let diagonal = bounds.diagonal();
        let reach = if diagonal > 0.0 { diagonal } else { 1.0 };
        let direction = self.direction();
        CameraOrientation {
            position: focal_point - direction * (reach * CAMERA_DISTANCE_FACTOR),
            focal_point,
            direction,
            up: self.up(),
        }
    }
}

impl std::fmt::Display for StandardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StandardView {
    type Err = RulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(StandardView::Front),
            "rear" | "back" => Ok(StandardView::Rear),
            "side" | "right" => Ok(StandardView::Right),
            "left" => Ok(StandardView::Left),
            "top" => Ok(StandardView::Top),
            "bottom" => Ok(StandardView::Bottom),
            _ => Err(RulerError::UnknownView {
                name: s.to_string(),
            }),
        }
    }
}

/// Where the viewer should put its camera.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraOrientation {
    pub position: Point3<f64>,
    pub focal_point: Point3<f64>,
    /// Unit view direction, `focal_point - position` normalized.
    pub direction: Vector3<f64>,
    pub up: Vector3<f64>,
}
