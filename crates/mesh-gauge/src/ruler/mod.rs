//! Interactive point-to-point measurement.
//!
//! [`RulerController`] is a pure state machine: it never talks to a window
//! system. A host feeds it [`RulerEvent`]s and either executes the returned
//! [`RulerCommand`]s itself or hands a [`Viewer`] to
//! [`RulerController::drive`].
//!
//! ```
//! use mesh_gauge::ruler::{Pick, Projection, RulerConfig, RulerController, RulerState};
//! use nalgebra::Point3;
//!
//! let mut ruler = RulerController::new(RulerConfig::default());
//! ruler.activate(Projection::Perspective).unwrap();
//! ruler.on_pick(Pick::hit(Point3::new(0.0, 0.0, 0.0), 0)).unwrap();
//! let t = ruler.on_pick(Pick::hit(Point3::new(3.0, 4.0, 0.0), 1)).unwrap();
//!
//! assert_eq!(t.state, RulerState::ComplianceDisplayed);
//! assert_eq!(t.result.unwrap().label, "5.00 mm");
//! ```

mod controller;
mod event;
mod view;

pub use controller::{RulerController, RulerState};
pub use event::{
    Advisory, MeasurementPoint, MeasurementResult, Pick, RulerCommand, RulerEvent, Transition,
    Viewer,
};
pub use view::{CAMERA_DISTANCE_FACTOR, CameraOrientation, Projection, StandardView};

use miette::Diagnostic;
use thiserror::Error;

use crate::BoundingBox;

/// Ruler contract violations. The controller state is unchanged when one is
/// returned.
#[derive(Debug, Error, Diagnostic)]
pub enum RulerError {
    /// A pick carried a NaN or infinite coordinate.
    #[error("picked point ({x}, {y}, {z}) is not finite")]
    #[diagnostic(
        code(mesh::ruler::non_finite_pick),
        help("The viewer reported an invalid pick position; check its ray casting.")
    )]
    NonFinitePick { x: f64, y: f64, z: f64 },

    /// A view name that is not one of the standard views.
    #[error("unknown view {name:?}")]
    #[diagnostic(
        code(mesh::ruler::unknown_view),
        help("Use one of: front, side, top, bottom, rear, left")
    )]
    UnknownView { name: String },
}

/// Ruler tolerances and label format.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulerConfig {
    /// Second pick is rejected when closer than this fraction of the model's
    /// bounding diagonal (default: 1e-4).
    pub relative_tolerance: f64,
    /// Lower bound on the rejection distance (default: 1e-9).
    pub absolute_tolerance: f64,
    /// Decimal places in labels (default: 2).
    pub label_precision: usize,
    /// Unit suffix in labels (default: `"mm"`).
    pub label_unit: String,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            relative_tolerance: 1e-4,
            absolute_tolerance: 1e-9,
            label_precision: 2,
            label_unit: "mm".to_string(),
        }
    }
}

impl RulerConfig {
    /// Minimum distance between the two points of a measurement.
    pub fn coincidence_tolerance(&self, extent: Option<&BoundingBox>) -> f64 {
        let relative = extent.map_or(0.0, |b| b.diagonal() * self.relative_tolerance);
        relative.max(self.absolute_tolerance).max(0.0)
    }

    /// Format a distance for display.
    pub fn label(&self, distance: f64) -> String {
        format!(
            "{:.*} {}",
            self.label_precision, distance, self.label_unit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_label_format() {
        let config = RulerConfig::default();
        assert_eq!(config.label(5.0), "5.00 mm");
        assert_eq!(config.label(12.3456), "12.35 mm");

        let config = RulerConfig {
            label_precision: 1,
            label_unit: "in".into(),
            ..Default::default()
        };
        assert_eq!(config.label(0.26), "0.3 in");
    }

    #[test]
    fn test_coincidence_tolerance() {
        let config = RulerConfig::default();
        assert_eq!(config.coincidence_tolerance(None), 1e-9);

        let bounds = BoundingBox::new(Point3::origin(), Point3::new(30.0, 40.0, 0.0));
        let tol = config.coincidence_tolerance(Some(&bounds));
        assert!((tol - 50.0 * 1e-4).abs() < 1e-15);
    }

    #[test]
    fn test_error_display() {
        let err = RulerError::NonFinitePick {
            x: f64::NAN,
            y: 0.0,
            z: 1.0,
        };
        assert!(err.to_string().contains("not finite"));
    }
}
