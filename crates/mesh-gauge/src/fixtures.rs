//! Shared mesh builders for unit tests.

use crate::{Mesh, Vertex};

const CUBE_FACES: [[u32; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2], // bottom
    [4, 5, 6],
    [4, 6, 7], // top
    [0, 1, 5],
    [0, 5, 4], // front
    [3, 7, 6],
    [3, 6, 2], // back
    [0, 4, 7],
    [0, 7, 3], // left
    [1, 2, 6],
    [1, 6, 5], // right
];

/// Axis-aligned cube with corners `min` and `min + size`, outward winding.
pub(crate) fn cube(min: [f64; 3], size: f64) -> Mesh {
    let [x, y, z] = min;
    let mut mesh = Mesh::with_capacity(8, 12);
    for &(dx, dy, dz) in &[
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
        (1.0, 1.0, 1.0),
        (0.0, 1.0, 1.0),
    ] {
        mesh.vertices.push(Vertex::from_coords(
            x + dx * size,
            y + dy * size,
            z + dz * size,
        ));
    }
    mesh.faces.extend_from_slice(&CUBE_FACES);
    mesh
}

/// Unit cube spanning [0, 1]³.
pub(crate) fn unit_cube() -> Mesh {
    cube([0.0, 0.0, 0.0], 1.0)
}

/// Unit cube centered on the origin.
pub(crate) fn centered_cube() -> Mesh {
    cube([-0.5, -0.5, -0.5], 1.0)
}

/// Regular tetrahedron-ish solid with outward winding.
pub(crate) fn tetrahedron() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
    mesh.faces.extend_from_slice(&[[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]]);
    mesh
}
