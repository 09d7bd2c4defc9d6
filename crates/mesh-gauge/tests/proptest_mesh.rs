//! Property-based tests for geometry analysis and the ruler controller.
//!
//! These tests use proptest to generate random meshes, transforms and event
//! sequences and verify invariants.
//!
//! Run with: cargo test -p mesh-gauge -- proptest

use mesh_gauge::{
    AnalysisParams, Mesh, Pick, Projection, RulerCommand, RulerController, RulerEvent, RulerState,
    StandardView, Vertex, analyze, estimate_weight,
};
use nalgebra::{Point3, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a random vertex position in a bounded range.
fn arb_position() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-100.0..100.0f64)
}

/// Generate a random vertex with position only.
fn arb_vertex() -> impl Strategy<Value = Vertex> {
    arb_position().prop_map(|[x, y, z]| Vertex::from_coords(x, y, z))
}

/// Generate a mesh whose faces always reference three distinct, valid
/// vertices. Topology is arbitrary: most generated meshes are open.
fn arb_mesh(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = Mesh> {
    (3..=max_vertices).prop_flat_map(move |num_vertices| {
        let vertices = prop::collection::vec(arb_vertex(), num_vertices);
        let n = num_vertices as u32;
        let face = (0..n, 1..n, 1..n).prop_map(move |(a, db, dc)| {
            let b = (a + db) % n;
            let mut c = (a + dc) % n;
            if c == b {
                c = (b + 1) % n;
                if c == a {
                    c = (c + 1) % n;
                }
            }
            [a, b, c]
        });
        let faces = prop::collection::vec(face, 1..=max_faces);
        (vertices, faces).prop_map(|(vertices, faces)| Mesh {
            vertices,
            faces,
            collapsed_facets: 0,
        })
    })
}

/// A closed box with random extents and position.
fn arb_box() -> impl Strategy<Value = Mesh> {
    (
        prop::array::uniform3(0.5..50.0f64),
        prop::array::uniform3(-100.0..100.0f64),
    )
        .prop_map(|(size, origin)| box_mesh(origin, size))
}

fn box_mesh(origin: [f64; 3], size: [f64; 3]) -> Mesh {
    let mut mesh = Mesh::new();
    for i in 0..8u32 {
        let x = if matches!(i, 1 | 2 | 5 | 6) { size[0] } else { 0.0 };
        let y = if matches!(i, 2 | 3 | 6 | 7) { size[1] } else { 0.0 };
        let z = if i >= 4 { size[2] } else { 0.0 };
        mesh.vertices.push(Vertex::from_coords(
            origin[0] + x,
            origin[1] + y,
            origin[2] + z,
        ));
    }
    mesh.faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    mesh
}

fn arb_event() -> impl Strategy<Value = RulerEvent> {
    let view = prop::sample::select(StandardView::ALL.to_vec());
    let projection = prop::sample::select(vec![Projection::Perspective, Projection::Orthographic]);
    prop_oneof![
        1 => projection
            .clone()
            .prop_map(|current_projection| RulerEvent::Activate { current_projection }),
        1 => Just(RulerEvent::Deactivate),
        1 => view.prop_map(RulerEvent::SelectView),
        4 => arb_position().prop_map(|[x, y, z]| {
            RulerEvent::Pick(Pick::hit(Point3::new(x, y, z), 0))
        }),
        1 => Just(RulerEvent::Pick(Pick::Miss)),
        1 => Just(RulerEvent::Clear),
        1 => projection.prop_map(RulerEvent::ProjectionChanged),
    ]
}

// =============================================================================
// Analysis properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every valid mesh analyzes without error and reports sane magnitudes.
    #[test]
    fn proptest_analysis_is_total(mesh in arb_mesh(20, 40)) {
        let report = analyze(&mesh, &AnalysisParams::default()).unwrap();
        prop_assert!(report.volume >= 0.0);
        prop_assert!(report.surface_area >= 0.0);
        prop_assert_eq!(report.volume, report.signed_volume.abs());
        prop_assert!(report.centroid.iter().all(|c| c.is_finite()));
        prop_assert_eq!(report.face_count, mesh.face_count());
        prop_assert_eq!(report.has_errors(), !report.is_watertight);
    }

    /// Analysis is a pure function of the mesh.
    #[test]
    fn proptest_analysis_is_deterministic(mesh in arb_mesh(12, 24)) {
        let a = mesh.analyze().unwrap();
        let b = mesh.analyze().unwrap();
        prop_assert_eq!(a, b);
    }

    /// Flipping every face negates the signed volume and keeps the area.
    #[test]
    fn proptest_flip_negates_signed_volume(mesh in arb_mesh(12, 24)) {
        let before = mesh.analyze().unwrap();
        let mut flipped = mesh.clone();
        flipped.flip_winding();
        let after = flipped.analyze().unwrap();

        let tol = 1e-9 * (1.0 + before.volume);
        prop_assert!((before.signed_volume + after.signed_volume).abs() <= tol);
        prop_assert!((before.surface_area - after.surface_area).abs() <= 1e-9 * (1.0 + before.surface_area));
        prop_assert_eq!(before.is_watertight, after.is_watertight);
    }

    /// Closed boxes: exact volume, area and centroid, independent of position.
    #[test]
    fn proptest_box_properties(mesh in arb_box()) {
        let report = mesh.analyze().unwrap();
        let bounds = mesh.bounds().unwrap();
        let e = bounds.extent();
        let expected_volume = e.x * e.y * e.z;
        let expected_area = 2.0 * (e.x * e.y + e.y * e.z + e.x * e.z);

        prop_assert!(report.is_watertight);
        prop_assert!((report.volume - expected_volume).abs() <= 1e-6 * expected_volume.max(1.0));
        prop_assert!((report.surface_area - expected_area).abs() <= 1e-9 * expected_area.max(1.0));
        prop_assert!((report.centroid - bounds.center()).norm() <= 1e-6 * bounds.diagonal().max(1.0));
    }

    /// Translating a closed mesh moves its centroid and keeps its volume.
    #[test]
    fn proptest_translation_invariance(
        mesh in arb_box(),
        offset in prop::array::uniform3(-500.0..500.0f64),
    ) {
        let before = mesh.analyze().unwrap();
        let offset = Vector3::new(offset[0], offset[1], offset[2]);
        let mut moved = mesh.clone();
        moved.translate(offset);
        let after = moved.analyze().unwrap();

        let scale = before.volume.max(1.0);
        prop_assert!((before.volume - after.volume).abs() <= 1e-6 * scale);
        prop_assert!((before.surface_area - after.surface_area).abs() <= 1e-6 * before.surface_area.max(1.0));
        prop_assert!(((before.centroid + offset) - after.centroid).norm() <= 1e-6 * (1.0 + offset.norm()));
    }

    /// Uniform scaling multiplies volume by the cube of the factor and area
    /// by its square, down to micrometre-sized models.
    #[test]
    fn proptest_scale_cubes_volume(mesh in arb_box(), exponent in -6.0..1.0f64) {
        let factor = 10f64.powf(exponent);
        let before = mesh.analyze().unwrap();
        let mut scaled = mesh.clone();
        scaled.scale(factor);
        let after = scaled.analyze().unwrap();

        let expected = before.volume * factor.powi(3);
        prop_assert!((after.volume - expected).abs() <= 1e-6 * expected);
        let expected_area = before.surface_area * factor * factor;
        prop_assert!((after.surface_area - expected_area).abs() <= 1e-6 * expected_area);
        prop_assert_eq!(after.degenerate_face_count, 0);
        prop_assert!(after.is_watertight);
    }

    /// Weight is linear in volume and never negative.
    #[test]
    fn proptest_weight_linear(volume in 0.0..1e7f64, density in 0.1..25.0f64) {
        let w = estimate_weight(volume, density);
        prop_assert!(w.grams >= 0.0);
        prop_assert!((w.grams - volume / 1000.0 * density).abs() <= 1e-9 * w.grams.max(1.0));
    }
}

// =============================================================================
// Ruler properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Arbitrary event sequences keep the controller's invariants.
    #[test]
    fn proptest_ruler_invariants(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut ruler = RulerController::default();
        let mut activated_from = None;

        for event in events {
            let before = ruler.measurements().len();
            let was_active = ruler.state().is_active();
            if let RulerEvent::Activate { current_projection } = &event {
                if !was_active {
                    activated_from = Some(*current_projection);
                }
            }
            let is_exit = matches!(event, RulerEvent::Deactivate);

            let t = ruler.handle(event).unwrap();
            prop_assert_eq!(t.state, ruler.state());

            // Exit restores the projection recorded at activation.
            if is_exit && was_active {
                let restored = activated_from.take().unwrap();
                prop_assert_eq!(ruler.state(), RulerState::Idle);
                prop_assert_eq!(ruler.projection(), restored);
                prop_assert!(t.commands.contains(&RulerCommand::SetProjection(restored)));
            }

            // A pending point exists exactly while awaiting the second pick.
            prop_assert_eq!(
                ruler.pending_point().is_some(),
                ruler.state() == RulerState::AwaitingSecondPoint
            );

            if ruler.state() == RulerState::Idle {
                prop_assert!(ruler.measurements().is_empty());
            }

            if let Some(result) = &t.result {
                prop_assert!(result.distance() > 0.0);
                prop_assert_eq!(ruler.state(), RulerState::ComplianceDisplayed);
                prop_assert_eq!(ruler.measurements().len(), before + 1);
            }

            // Advisories never change anything visible.
            if t.advisory.is_some() {
                prop_assert!(t.is_noop());
            }
        }
    }

    /// Measured distance is symmetric in the pick order.
    #[test]
    fn proptest_ruler_distance_symmetric(a in arb_position(), b in arb_position()) {
        let a = Point3::new(a[0], a[1], a[2]);
        let b = Point3::new(b[0], b[1], b[2]);
        prop_assume!((a - b).norm() > 1e-6);

        let measure = |p: Point3<f64>, q: Point3<f64>| {
            let mut ruler = RulerController::default();
            ruler.activate(Projection::Orthographic).unwrap();
            ruler.on_pick(Pick::hit(p, 0)).unwrap();
            ruler.on_pick(Pick::hit(q, 0)).unwrap().result.unwrap()
        };

        let ab = measure(a, b);
        let ba = measure(b, a);
        prop_assert_eq!(ab.distance(), ba.distance());
        prop_assert_eq!(ab.label, ba.label);
    }
}
