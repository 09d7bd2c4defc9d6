//! Tracing extensions for mesh analysis and ruler sessions.
//!
//! Structured events are emitted under these targets:
//!
//! - `mesh_gauge::timing`: operation start and elapsed time
//! - `mesh_gauge::mesh_state`: mesh dimensions and counts
//! - `mesh_gauge::analysis`: geometry report summaries
//! - `mesh_gauge::ruler`: measurement state machine transitions
//! - `mesh_gauge::io`: file loads and saves
//!
//! # Usage
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // RUST_LOG=mesh_gauge=debug for detailed output
//! ```

use std::time::Instant;
use tracing::{Span, debug, info, warn};

use crate::analyze::GeometryReport;
use crate::ruler::{RulerEvent, RulerState, Transition};

/// A performance timer that logs duration on drop.
///
/// ```rust,ignore
/// fn expensive_operation() {
///     let _timer = OperationTimer::new("expensive_operation");
///     // ... do work ...
/// } // logs elapsed time here
/// ```
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    /// Create a new operation timer.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!("mesh_operation", operation = name);
        debug!(target: "mesh_gauge::timing", operation = name, "Starting operation");
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Create a timer with mesh size fields.
    pub fn with_context(name: &'static str, face_count: usize, vertex_count: usize) -> Self {
        let span = tracing::info_span!(
            "mesh_operation",
            operation = name,
            faces = face_count,
            vertices = vertex_count
        );
        debug!(
            target: "mesh_gauge::timing",
            operation = name,
            faces = face_count,
            vertices = vertex_count,
            "Starting operation"
        );
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Get the elapsed time.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get the span for this timer.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        info!(
            target: "mesh_gauge::timing",
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            "Operation completed"
        );
    }
}

/// Log mesh statistics at debug level.
pub fn log_mesh_stats(mesh: &crate::Mesh, context: &str) {
    let dims = mesh
        .bounds()
        .map(|b| b.extent())
        .unwrap_or_else(nalgebra::Vector3::zeros);

    debug!(
        target: "mesh_gauge::mesh_state",
        context = context,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        dimensions = format!("{:.2} x {:.2} x {:.2}", dims.x, dims.y, dims.z),
        "Mesh state"
    );
}

/// Log a geometry report: info when clean, warn when it carries failures.
pub fn log_geometry_report(report: &GeometryReport) {
    if report.has_errors() {
        warn!(
            target: "mesh_gauge::analysis",
            is_watertight = report.is_watertight,
            boundary_edges = report.topology.boundary_edges,
            non_manifold_edges = report.topology.non_manifold_edges,
            inconsistent_edges = report.topology.inconsistent_edges,
            volume = format!("{:.4}", report.volume),
            "Mesh is not watertight; volume and weight are approximate"
        );
    } else {
        info!(
            target: "mesh_gauge::analysis",
            faces = report.face_count,
            is_watertight = report.is_watertight,
            volume = format!("{:.4}", report.volume),
            surface_area = format!("{:.4}", report.surface_area),
            orientation = %report.orientation,
            is_empty = report.is_empty,
            "Geometry analysis completed"
        );
    }

    if report.degenerate_face_count > 0 {
        debug!(
            target: "mesh_gauge::analysis",
            degenerate_faces = report.degenerate_face_count,
            "Skipped degenerate faces"
        );
    }
}

/// Log one step of the ruler state machine.
pub fn log_ruler_transition(from: RulerState, event: &RulerEvent, transition: &Transition) {
    match &transition.advisory {
        Some(advisory) => debug!(
            target: "mesh_gauge::ruler",
            event = event.name(),
            from = %from,
            to = %transition.state,
            advisory = %advisory,
            "Ruler event produced an advisory"
        ),
        None => debug!(
            target: "mesh_gauge::ruler",
            event = event.name(),
            from = %from,
            to = %transition.state,
            commands = transition.commands.len(),
            "Ruler transition"
        ),
    }

    if let Some(result) = &transition.result {
        info!(
            target: "mesh_gauge::ruler",
            distance = format!("{:.4}", result.distance()),
            "Measurement completed"
        );
    }
}

/// Log a file I/O operation.
pub fn log_io_operation(
    operation: &str,
    path: &std::path::Path,
    format: Option<&str>,
    success: bool,
) {
    if success {
        info!(
            target: "mesh_gauge::io",
            operation = operation,
            path = path.display().to_string(),
            format = format.unwrap_or("auto"),
            "I/O operation completed"
        );
    } else {
        warn!(
            target: "mesh_gauge::io",
            operation = operation,
            path = path.display().to_string(),
            format = format.unwrap_or("auto"),
            "I/O operation failed"
        );
    }
}

/// Macro for creating instrumented mesh operation spans.
///
/// Creates an info span carrying the mesh's vertex and face counts.
#[macro_export]
macro_rules! mesh_span {
    ($name:expr, $mesh:expr) => {
        tracing::info_span!(
            $name,
            vertices = $mesh.vertex_count(),
            faces = $mesh.face_count()
        )
    };
    ($name:expr, $mesh:expr, $($field:tt)*) => {
        tracing::info_span!(
            $name,
            vertices = $mesh.vertex_count(),
            faces = $mesh.face_count(),
            $($field)*
        )
    };
}
