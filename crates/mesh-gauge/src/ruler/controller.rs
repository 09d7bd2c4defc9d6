//! The measurement state machine.

use nalgebra::Point3;

use super::event::{
    Advisory, MeasurementPoint, MeasurementResult, Pick, RulerCommand, RulerEvent, Transition,
    Viewer,
};
use super::view::{Projection, StandardView};
use super::{RulerConfig, RulerError};
use crate::BoundingBox;
use crate::measure::measure_distance;
use crate::tracing_ext::log_ruler_transition;

/// Ruler session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RulerState {
    /// Ruler mode is off.
    #[default]
    Idle,
    /// Ruler is on and a view has been chosen; nothing picked yet.
    ViewSelected,
    /// Waiting for the first point after a clear or view change.
    AwaitingFirstPoint,
    /// One point is pending.
    AwaitingSecondPoint,
    /// The latest measurement is on screen.
    ComplianceDisplayed,
}

impl RulerState {
    /// Whether ruler mode is on.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self, RulerState::Idle)
    }
}

impl std::fmt::Display for RulerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RulerState::Idle => "idle",
            RulerState::ViewSelected => "view_selected",
            RulerState::AwaitingFirstPoint => "awaiting_first_point",
            RulerState::AwaitingSecondPoint => "awaiting_second_point",
            RulerState::ComplianceDisplayed => "compliance_displayed",
        };
        f.write_str(name)
    }
}

/// Drives one ruler session.
///
/// All state lives in the instance; several controllers can run side by side.
#[derive(Debug, Clone)]
pub struct RulerController {
    config: RulerConfig,
    state: RulerState,
    view: StandardView,
    projection: Projection,
    /// Projection in effect when the ruler was activated.
    restore_projection: Option<Projection>,
    pending: Option<MeasurementPoint>,
    measurements: Vec<MeasurementResult>,
    extent: Option<BoundingBox>,
    next_id: usize,
}

impl Default for RulerController {
    fn default() -> Self {
        Self::new(RulerConfig::default())
    }
}

impl RulerController {
    pub fn new(config: RulerConfig) -> Self {
        Self {
            config,
            state: RulerState::Idle,
            view: StandardView::Front,
            projection: Projection::Perspective,
            restore_projection: None,
            pending: None,
            measurements: Vec::new(),
            extent: None,
            next_id: 1,
        }
    }

    /// Bounds of the loaded model, used for camera placement and the
    /// coincidence tolerance.
    pub fn set_mesh_extent(&mut self, extent: Option<BoundingBox>) {
        self.extent = extent;
    }

    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    pub fn state(&self) -> RulerState {
        self.state
    }

    pub fn view(&self) -> StandardView {
        self.view
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn pending_point(&self) -> Option<&MeasurementPoint> {
        self.pending.as_ref()
    }

    /// Completed measurements, oldest first.
    pub fn measurements(&self) -> &[MeasurementResult] {
        &self.measurements
    }

    /// Process one event.
    ///
    /// Returns an error only for contract violations, in which case nothing
    /// about the controller has changed.
    pub fn handle(&mut self, event: RulerEvent) -> Result<Transition, RulerError> {
        if let RulerEvent::Pick(Pick::Hit { position, .. }) = &event {
            check_finite(position)?;
        }

        let from = self.state;
        let transition = match &event {
            RulerEvent::Activate { current_projection } => self.on_activate(*current_projection),
            RulerEvent::Deactivate => self.on_deactivate(),
            RulerEvent::SelectView(view) => self.on_select_view(*view),
            RulerEvent::Pick(pick) => self.on_pick_event(pick),
            RulerEvent::Clear => self.on_clear(),
            RulerEvent::ProjectionChanged(projection) => {
                self.projection = *projection;
                Transition::to(self.state, Vec::new())
            }
        };

        debug_assert_eq!(transition.state, self.state);
        log_ruler_transition(from, &event, &transition);
        Ok(transition)
    }

    /// Handle an event, then apply its commands to `viewer`.
    pub fn drive(
        &mut self,
        event: RulerEvent,
        viewer: &mut dyn Viewer,
    ) -> Result<Transition, RulerError> {
        let transition = self.handle(event)?;
        for command in &transition.commands {
            command.apply(viewer);
        }
        Ok(transition)
    }

    pub fn activate(&mut self, current_projection: Projection) -> Result<Transition, RulerError> {
        self.handle(RulerEvent::Activate { current_projection })
    }

    pub fn deactivate(&mut self) -> Result<Transition, RulerError> {
        self.handle(RulerEvent::Deactivate)
    }

    pub fn select_view(&mut self, view: StandardView) -> Result<Transition, RulerError> {
        self.handle(RulerEvent::SelectView(view))
    }

    pub fn on_pick(&mut self, pick: Pick) -> Result<Transition, RulerError> {
        self.handle(RulerEvent::Pick(pick))
    }

    pub fn clear(&mut self) -> Result<Transition, RulerError> {
        self.handle(RulerEvent::Clear)
    }

    pub fn projection_changed(&mut self, projection: Projection) -> Result<Transition, RulerError> {
        self.handle(RulerEvent::ProjectionChanged(projection))
    }

    fn on_activate(&mut self, current_projection: Projection) -> Transition {
        if self.state.is_active() {
            return Transition::advise(self.state, Advisory::AlreadyActive);
        }

        self.restore_projection = Some(current_projection);
        self.projection = Projection::Orthographic;
        self.view = StandardView::Front;
        self.state = RulerState::ViewSelected;

        Transition::to(
            self.state,
            vec![
                RulerCommand::SetProjection(Projection::Orthographic),
                self.set_view_command(),
            ],
        )
    }

    fn on_deactivate(&mut self) -> Transition {
        if !self.state.is_active() {
            return Transition::to(self.state, Vec::new());
        }

        let mut commands = vec![RulerCommand::ClearMeasurementArtifacts];
        if let Some(previous) = self.restore_projection.take() {
            self.projection = previous;
            commands.push(RulerCommand::SetProjection(previous));
        }
        self.pending = None;
        self.measurements.clear();
        self.next_id = 1;
        self.state = RulerState::Idle;

        Transition::to(self.state, commands)
    }

    fn on_select_view(&mut self, view: StandardView) -> Transition {
        if !self.state.is_active() {
            return Transition::advise(self.state, Advisory::RulerInactive);
        }

        let mut commands = Vec::new();
        if self.has_artifacts() {
            self.pending = None;
            self.measurements.clear();
            commands.push(RulerCommand::ClearMeasurementArtifacts);
        }
        if self.projection != Projection::Orthographic {
            self.projection = Projection::Orthographic;
            commands.push(RulerCommand::SetProjection(Projection::Orthographic));
        }
        self.view = view;
        commands.push(self.set_view_command());

        if self.state != RulerState::ViewSelected {
            self.state = RulerState::AwaitingFirstPoint;
        }
        Transition::to(self.state, commands)
    }

    fn on_pick_event(&mut self, pick: &Pick) -> Transition {
        if !self.state.is_active() {
            return Transition::advise(self.state, Advisory::RulerInactive);
        }
        if self.projection != Projection::Orthographic {
            return Transition::advise(self.state, Advisory::PerspectiveProjection);
        }
        let point = match *pick {
            Pick::Hit { position, face_id } => MeasurementPoint { position, face_id },
            Pick::Miss => return Transition::advise(self.state, Advisory::PickMissed),
        };

        match self.pending {
            None => {
                self.pending = Some(point);
                self.state = RulerState::AwaitingSecondPoint;
                Transition::to(self.state, vec![RulerCommand::RenderMarker(point.position)])
            }
            Some(first) => {
                let measurement = measure_distance(first.position, point.position);
                let tolerance = self.config.coincidence_tolerance(self.extent.as_ref());
                if measurement.distance <= tolerance {
                    return Transition::advise(self.state, Advisory::PickTooClose);
                }

                let result = MeasurementResult {
                    id: self.next_id,
                    first,
                    second: point,
                    label: self.config.label(measurement.distance),
                    measurement,
                };
                self.next_id += 1;

                let commands = vec![
                    RulerCommand::RenderMarker(point.position),
                    RulerCommand::RenderLine {
                        from: first.position,
                        to: point.position,
                    },
                    RulerCommand::RenderLabel {
                        position: result.midpoint(),
                        text: result.label.clone(),
                    },
                ];

                self.pending = None;
                self.measurements.push(result.clone());
                self.state = RulerState::ComplianceDisplayed;

                Transition {
                    state: self.state,
                    commands,
                    result: Some(result),
                    advisory: None,
                }
            }
        }
    }

    fn on_clear(&mut self) -> Transition {
        if !self.state.is_active() {
            return Transition::advise(self.state, Advisory::RulerInactive);
        }

        self.pending = None;
        self.measurements.clear();
        self.state = RulerState::AwaitingFirstPoint;
        Transition::to(self.state, vec![RulerCommand::ClearMeasurementArtifacts])
    }

    fn has_artifacts(&self) -> bool {
        self.pending.is_some() || !self.measurements.is_empty()
    }

    fn set_view_command(&self) -> RulerCommand {
        let bounds = self.extent.unwrap_or_else(BoundingBox::zero);
        RulerCommand::SetView {
            view: self.view,
            camera: self.view.camera_for(&bounds),
        }
    }
}

fn check_finite(p: &Point3<f64>) -> Result<(), RulerError> {
    if p.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(RulerError::NonFinitePick {
            x: p.x,
            y: p.y,
            z: p.z,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hit(x: f64, y: f64, z: f64) -> Pick {
        Pick::hit(Point3::new(x, y, z), 0)
    }

    fn active() -> RulerController {
        let mut ruler = RulerController::default();
        ruler.activate(Projection::Perspective).unwrap();
        ruler
    }

    #[derive(Default)]
    struct RecordingViewer {
        projection: Option<Projection>,
        view: Option<StandardView>,
        markers: usize,
        lines: usize,
        labels: Vec<String>,
        clears: usize,
    }

    impl Viewer for RecordingViewer {
        fn set_projection(&mut self, projection: Projection) {
            self.projection = Some(projection);
        }
        fn set_view(&mut self, view: StandardView, _camera: &super::super::CameraOrientation) {
            self.view = Some(view);
        }
        fn render_marker(&mut self, _position: &Point3<f64>) {
            self.markers += 1;
        }
        fn render_line(&mut self, _from: &Point3<f64>, _to: &Point3<f64>) {
            self.lines += 1;
        }
        fn render_label(&mut self, _position: &Point3<f64>, text: &str) {
            self.labels.push(text.to_string());
        }
        fn clear_measurement_artifacts(&mut self) {
            self.markers = 0;
            self.lines = 0;
            self.labels.clear();
            self.clears += 1;
        }
    }

    #[test]
    fn test_activation_requests_orthographic_front() {
        let mut ruler = RulerController::default();
        let t = ruler.activate(Projection::Perspective).unwrap();

        assert_eq!(t.state, RulerState::ViewSelected);
        assert_eq!(t.commands[0], RulerCommand::SetProjection(Projection::Orthographic));
        assert!(matches!(
            t.commands[1],
            RulerCommand::SetView {
                view: StandardView::Front,
                ..
            }
        ));
        assert_eq!(ruler.projection(), Projection::Orthographic);
    }

    #[test]
    fn test_measure_three_four_five() {
        let mut ruler = active();
        let t = ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(t.state, RulerState::AwaitingSecondPoint);
        assert!(ruler.pending_point().is_some());

        let t = ruler.on_pick(hit(3.0, 4.0, 0.0)).unwrap();
        assert_eq!(t.state, RulerState::ComplianceDisplayed);
        let result = t.result.unwrap();
        assert_relative_eq!(result.distance(), 5.0);
        assert_eq!(result.midpoint(), Point3::new(1.5, 2.0, 0.0));
        assert_eq!(result.label, "5.00 mm");
        assert_eq!(result.id, 1);
        assert!(ruler.pending_point().is_none());
        assert_eq!(ruler.measurements().len(), 1);
    }

    #[test]
    fn test_coincident_second_pick_is_rejected() {
        let mut ruler = active();
        ruler.on_pick(hit(1.0, 1.0, 1.0)).unwrap();
        let t = ruler.on_pick(hit(1.0, 1.0, 1.0)).unwrap();

        assert_eq!(t.state, RulerState::AwaitingSecondPoint);
        assert_eq!(t.advisory, Some(Advisory::PickTooClose));
        assert!(t.result.is_none());
        assert!(t.commands.is_empty());
        assert_eq!(ruler.pending_point().unwrap().position, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_tolerance_scales_with_extent() {
        let mut ruler = active();
        ruler.set_mesh_extent(Some(BoundingBox::new(
            Point3::origin(),
            Point3::new(1000.0, 0.0, 0.0),
        )));
        ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        // 0.05 < 1000 × 1e-4
        let t = ruler.on_pick(hit(0.05, 0.0, 0.0)).unwrap();
        assert_eq!(t.advisory, Some(Advisory::PickTooClose));
        let t = ruler.on_pick(hit(0.5, 0.0, 0.0)).unwrap();
        assert!(t.result.is_some());
    }

    #[test]
    fn test_view_change_clears_pending_point() {
        let mut ruler = active();
        ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        let t = ruler.select_view(StandardView::Top).unwrap();

        assert_eq!(t.state, RulerState::AwaitingFirstPoint);
        assert_eq!(t.commands[0], RulerCommand::ClearMeasurementArtifacts);
        assert!(ruler.pending_point().is_none());
        assert_eq!(ruler.view(), StandardView::Top);
    }

    #[test]
    fn test_view_change_before_picking_stays_selected() {
        let mut ruler = active();
        let t = ruler.select_view(StandardView::Right).unwrap();
        assert_eq!(t.state, RulerState::ViewSelected);
        assert_eq!(t.commands.len(), 1);
    }

    #[test]
    fn test_view_change_discards_completed_measurements() {
        let mut ruler = active();
        ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        ruler.on_pick(hit(1.0, 0.0, 0.0)).unwrap();
        ruler.select_view(StandardView::Bottom).unwrap();
        assert!(ruler.measurements().is_empty());
        assert_eq!(ruler.state(), RulerState::AwaitingFirstPoint);
    }

    #[test]
    fn test_measurements_accumulate_until_clear() {
        let mut ruler = active();
        for i in 1..=3 {
            ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
            let t = ruler.on_pick(hit(i as f64, 0.0, 0.0)).unwrap();
            assert_eq!(t.result.unwrap().id, i);
        }
        assert_eq!(ruler.measurements().len(), 3);

        let t = ruler.clear().unwrap();
        assert_eq!(t.state, RulerState::AwaitingFirstPoint);
        assert!(ruler.measurements().is_empty());
    }

    #[test]
    fn test_perspective_blocks_picks() {
        let mut ruler = active();
        ruler.projection_changed(Projection::Perspective).unwrap();
        let t = ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(t.advisory, Some(Advisory::PerspectiveProjection));
        assert_eq!(t.state, RulerState::ViewSelected);

        // Choosing a view restores the orthographic projection.
        let t = ruler.select_view(StandardView::Front).unwrap();
        assert!(t.commands.contains(&RulerCommand::SetProjection(Projection::Orthographic)));
        assert!(ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap().advisory.is_none());
    }

    #[test]
    fn test_miss_is_ignored() {
        let mut ruler = active();
        let t = ruler.on_pick(Pick::Miss).unwrap();
        assert_eq!(t.advisory, Some(Advisory::PickMissed));
        assert!(t.is_noop());
        assert_eq!(ruler.state(), RulerState::ViewSelected);
    }

    #[test]
    fn test_non_finite_pick_is_an_error() {
        let mut ruler = active();
        ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        let err = ruler.on_pick(hit(f64::NAN, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, RulerError::NonFinitePick { .. }));
        assert_eq!(ruler.state(), RulerState::AwaitingSecondPoint);
        assert_eq!(ruler.pending_point().unwrap().position, Point3::origin());
    }

    #[test]
    fn test_exit_restores_projection() {
        let mut ruler = RulerController::default();
        ruler.activate(Projection::Perspective).unwrap();
        ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        let t = ruler.deactivate().unwrap();

        assert_eq!(t.state, RulerState::Idle);
        assert_eq!(
            t.commands,
            vec![
                RulerCommand::ClearMeasurementArtifacts,
                RulerCommand::SetProjection(Projection::Perspective)
            ]
        );
        assert_eq!(ruler.projection(), Projection::Perspective);
        assert!(ruler.pending_point().is_none());
    }

    #[test]
    fn test_exit_keeps_orthographic_when_it_was_active() {
        let mut ruler = RulerController::default();
        ruler.activate(Projection::Orthographic).unwrap();
        ruler.deactivate().unwrap();
        assert_eq!(ruler.projection(), Projection::Orthographic);
    }

    #[test]
    fn test_ids_restart_each_session() {
        let mut ruler = RulerController::default();
        for _ in 0..2 {
            ruler.activate(Projection::Perspective).unwrap();
            ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
            let t = ruler.on_pick(hit(1.0, 0.0, 0.0)).unwrap();
            assert_eq!(t.result.unwrap().id, 1);
            ruler.deactivate().unwrap();
        }
    }

    #[test]
    fn test_exit_from_every_active_state() {
        let reach: [fn(&mut RulerController); 4] = [
            |_| {},
            |r| {
                r.select_view(StandardView::Top).unwrap();
                r.clear().unwrap();
            },
            |r| {
                r.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
            },
            |r| {
                r.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
                r.on_pick(hit(0.0, 3.0, 0.0)).unwrap();
            },
        ];
        let expected = [
            RulerState::ViewSelected,
            RulerState::AwaitingFirstPoint,
            RulerState::AwaitingSecondPoint,
            RulerState::ComplianceDisplayed,
        ];

        for (steps, state) in reach.iter().zip(expected) {
            let mut ruler = active();
            steps(&mut ruler);
            assert_eq!(ruler.state(), state);

            let t = ruler.deactivate().unwrap();
            assert_eq!(t.state, RulerState::Idle);
            assert!(t.commands.contains(&RulerCommand::ClearMeasurementArtifacts));
            assert!(t
                .commands
                .contains(&RulerCommand::SetProjection(Projection::Perspective)));
            assert_eq!(ruler.projection(), Projection::Perspective);
            assert!(ruler.measurements().is_empty());
        }
    }

    #[test]
    fn test_idle_rejects_interaction() {
        let mut ruler = RulerController::default();
        assert_eq!(
            ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap().advisory,
            Some(Advisory::RulerInactive)
        );
        assert_eq!(ruler.clear().unwrap().advisory, Some(Advisory::RulerInactive));
        assert_eq!(
            ruler.select_view(StandardView::Top).unwrap().advisory,
            Some(Advisory::RulerInactive)
        );
        assert!(ruler.deactivate().unwrap().is_noop());
        assert_eq!(ruler.state(), RulerState::Idle);
    }

    #[test]
    fn test_double_activation() {
        let mut ruler = active();
        ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        let t = ruler.activate(Projection::Orthographic).unwrap();
        assert_eq!(t.advisory, Some(Advisory::AlreadyActive));
        assert_eq!(ruler.state(), RulerState::AwaitingSecondPoint);
    }

    #[test]
    fn test_pick_after_result_starts_new_measurement() {
        let mut ruler = active();
        ruler.on_pick(hit(0.0, 0.0, 0.0)).unwrap();
        ruler.on_pick(hit(2.0, 0.0, 0.0)).unwrap();
        let t = ruler.on_pick(hit(5.0, 5.0, 5.0)).unwrap();
        assert_eq!(t.state, RulerState::AwaitingSecondPoint);
        assert_eq!(ruler.measurements().len(), 1);
    }

    #[test]
    fn test_drive_applies_commands() {
        let mut ruler = RulerController::default();
        let mut viewer = RecordingViewer::default();

        ruler
            .drive(
                RulerEvent::Activate {
                    current_projection: Projection::Perspective,
                },
                &mut viewer,
            )
            .unwrap();
        assert_eq!(viewer.projection, Some(Projection::Orthographic));
        assert_eq!(viewer.view, Some(StandardView::Front));

        ruler.drive(RulerEvent::Pick(hit(0.0, 0.0, 0.0)), &mut viewer).unwrap();
        ruler.drive(RulerEvent::Pick(hit(3.0, 4.0, 0.0)), &mut viewer).unwrap();
        assert_eq!(viewer.markers, 2);
        assert_eq!(viewer.lines, 1);
        assert_eq!(viewer.labels, vec!["5.00 mm".to_string()]);

        ruler.drive(RulerEvent::Deactivate, &mut viewer).unwrap();
        assert_eq!(viewer.markers, 0);
        assert_eq!(viewer.clears, 1);
        assert_eq!(viewer.projection, Some(Projection::Perspective));
    }
}
