//! Events in, commands out.
//!
//! The controller consumes [`RulerEvent`]s and answers each with a
//! [`Transition`]: the new state, the [`RulerCommand`]s a viewer must carry
//! out, and optionally a finished measurement or an advisory for the user.

use nalgebra::Point3;

use super::controller::RulerState;
use super::view::{CameraOrientation, Projection, StandardView};
use crate::measure::DistanceMeasurement;

/// A pick reported by the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pick {
    /// The ray hit the model at `position` on face `face_id`.
    Hit { position: Point3<f64>, face_id: u32 },
    /// The ray missed the model.
    Miss,
}

impl Pick {
    /// A hit on face `face_id`.
    pub fn hit(position: Point3<f64>, face_id: u32) -> Self {
        Pick::Hit { position, face_id }
    }
}

/// A stored pick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementPoint {
    pub position: Point3<f64>,
    pub face_id: u32,
}

/// Two points and the distance between them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementResult {
    /// Sequence number within the ruler session, starting at 1.
    pub id: usize,
    pub first: MeasurementPoint,
    pub second: MeasurementPoint,
    pub measurement: DistanceMeasurement,
    /// Text shown at the midpoint, e.g. `"5.00 mm"`.
    pub label: String,
}

impl MeasurementResult {
    /// Euclidean distance between the two points.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.measurement.distance
    }

    /// Midpoint of the two points.
    #[inline]
    pub fn midpoint(&self) -> Point3<f64> {
        self.measurement.midpoint()
    }
}

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum RulerEvent {
    /// Ruler mode switched on while the viewer uses `current_projection`.
    Activate { current_projection: Projection },
    /// Ruler mode switched off.
    Deactivate,
    /// A toolbar view button.
    SelectView(StandardView),
    /// A click on the viewport.
    Pick(Pick),
    /// Remove all measurements.
    Clear,
    /// The user switched projection outside the controller.
    ProjectionChanged(Projection),
}

impl RulerEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            RulerEvent::Activate { .. } => "activate",
            RulerEvent::Deactivate => "deactivate",
            RulerEvent::SelectView(_) => "select_view",
            RulerEvent::Pick(_) => "pick",
            RulerEvent::Clear => "clear",
            RulerEvent::ProjectionChanged(_) => "projection_changed",
        }
    }
}

/// Requests to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum RulerCommand {
    SetProjection(Projection),
    SetView {
        view: StandardView,
        camera: CameraOrientation,
    },
    RenderMarker(Point3<f64>),
    RenderLine {
        from: Point3<f64>,
        to: Point3<f64>,
    },
    RenderLabel {
        position: Point3<f64>,
        text: String,
    },
    ClearMeasurementArtifacts,
}

impl RulerCommand {
    /// Carry out this command on `viewer`.
    pub fn apply(&self, viewer: &mut dyn Viewer) {
        match self {
            RulerCommand::SetProjection(p) => viewer.set_projection(*p),
            RulerCommand::SetView { view, camera } => viewer.set_view(*view, camera),
            RulerCommand::RenderMarker(p) => viewer.render_marker(p),
            RulerCommand::RenderLine { from, to } => viewer.render_line(from, to),
            RulerCommand::RenderLabel { position, text } => viewer.render_label(position, text),
            RulerCommand::ClearMeasurementArtifacts => viewer.clear_measurement_artifacts(),
        }
    }
}

/// The rendering side of a ruler session.
pub trait Viewer {
    fn set_projection(&mut self, projection: Projection);
    fn set_view(&mut self, view: StandardView, camera: &CameraOrientation);
    fn render_marker(&mut self, position: &Point3<f64>);
    fn render_line(&mut self, from: &Point3<f64>, to: &Point3<f64>);
    fn render_label(&mut self, position: &Point3<f64>, text: &str);
    fn clear_measurement_artifacts(&mut self);
}

/// Transient feedback for interaction faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    PickMissed,
    PickTooClose,
    PerspectiveProjection,
    RulerInactive,
    AlreadyActive,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Advisory::PickMissed => "click on the model to place a point",
            Advisory::PickTooClose => "pick a point farther from the first one",
            Advisory::PerspectiveProjection => "switch to an orthographic view to measure",
            Advisory::RulerInactive => "ruler mode is not active",
            Advisory::AlreadyActive => "ruler mode is already active",
        };
        f.write_str(text)
    }
}

/// Outcome of one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: RulerState,
    pub commands: Vec<RulerCommand>,
    pub result: Option<MeasurementResult>,
    pub advisory: Option<Advisory>,
}

impl Transition {
    pub(crate) fn to(state: RulerState, commands: Vec<RulerCommand>) -> Self {
        Self {
            state,
            commands,
            result: None,
            advisory: None,
        }
    }

    pub(crate) fn advise(state: RulerState, advisory: Advisory) -> Self {
        Self {
            state,
            commands: Vec::new(),
            result: None,
            advisory: Some(advisory),
        }
    }

    /// Whether the event changed nothing visible.
    pub fn is_noop(&self) -> bool {
        self.commands.is_empty() && self.result.is_none()
    }
}
