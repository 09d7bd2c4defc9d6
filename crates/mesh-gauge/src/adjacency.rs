//! Edge adjacency for watertightness and manifold checks.
//!
//! Every undirected edge is keyed by its endpoint indices in ascending order,
//! so `(a, b)` and `(b, a)` land on the same entry. Alongside the face count the
//! map records how many faces traverse the edge in key order, which is enough
//! to tell opposing winding (one each way) from a flipped neighbour.

use hashbrown::HashMap;

/// Usage of a single undirected edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeUse {
    /// Number of faces containing the edge.
    pub faces: u32,
    /// Number of those faces traversing it from the smaller to the larger index.
    pub forward: u32,
}

impl EdgeUse {
    /// Edge used by exactly one face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.faces == 1
    }

    /// Edge used by more than two faces.
    #[inline]
    pub fn is_non_manifold(&self) -> bool {
        self.faces > 2
    }

    /// Two faces share the edge but walk it in the same direction.
    #[inline]
    pub fn is_inconsistent(&self) -> bool {
        self.faces == 2 && self.forward != 1
    }
}

/// Aggregate edge statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSummary {
    /// Distinct undirected edges.
    pub edge_count: usize,
    /// Edges with one face.
    pub boundary_edges: usize,
    /// Edges with more than two faces.
    pub non_manifold_edges: usize,
    /// Two-face edges with matching direction.
    pub inconsistent_edges: usize,
    /// Largest face count seen on a non-manifold edge.
    pub max_faces_per_edge: usize,
    pub first_boundary: Option<(u32, u32)>,
    pub first_non_manifold: Option<(u32, u32)>,
}

impl EdgeSummary {
    /// Every edge is shared by exactly two oppositely wound faces.
    pub fn is_watertight(&self) -> bool {
        self.edge_count > 0
            && self.boundary_edges == 0
            && self.non_manifold_edges == 0
            && self.inconsistent_edges == 0
    }
}

fn keep_min(slot: &mut Option<(u32, u32)>, edge: (u32, u32)) {
    match slot {
        Some(current) if *current <= edge => {}
        _ => *slot = Some(edge),
    }
}

/// Undirected edge map over a face list.
#[derive(Debug, Clone, Default)]
pub struct MeshAdjacency {
    /// Edge `(min, max)` to its usage.
    pub edges: HashMap<(u32, u32), EdgeUse>,
}

impl MeshAdjacency {
    /// Empty map sized for roughly `face_count` triangles.
    pub fn with_capacity(face_count: usize) -> Self {
        Self {
            edges: HashMap::with_capacity(face_count * 3 / 2),
        }
    }

    /// Build the edge map in a single pass over the faces.
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut adjacency = Self::with_capacity(faces.len());
        for face in faces {
            adjacency.insert_face(face);
        }
        adjacency
    }

    /// Record the three edges of one face.
    #[inline]
    pub fn insert_face(&mut self, face: &[u32; 3]) {
        for i in 0..3 {
            let a = face[i];
            let b = face[(i + 1) % 3];
            let (key, forward) = if a < b { ((a, b), 1) } else { ((b, a), 0) };
            let entry = self.edges.entry(key).or_default();
            entry.faces += 1;
            entry.forward += forward;
        }
    }

    /// Usage of the edge between `a` and `b`, in either order.
    pub fn edge(&self, a: u32, b: u32) -> Option<&EdgeUse> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edges.get(&key)
    }

    /// Total number of distinct edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges used by exactly one face.
    pub fn boundary_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edges
            .iter()
            .filter(|(_, u)| u.is_boundary())
            .map(|(&e, _)| e)
    }

    /// Edges used by more than two faces.
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edges
            .iter()
            .filter(|(_, u)| u.is_non_manifold())
            .map(|(&e, _)| e)
    }

    /// Number of boundary edges.
    pub fn boundary_edge_count(&self) -> usize {
        self.boundary_edges().count()
    }

    /// Number of non-manifold edges.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.non_manifold_edges().count()
    }

    /// Number of two-face edges walked in the same direction by both faces.
    pub fn inconsistent_edge_count(&self) -> usize {
        self.edges.values().filter(|u| u.is_inconsistent()).count()
    }

    /// Counts of every failure kind in one pass, with the smallest offending
    /// edge of each kind as a stable example.
    pub fn summary(&self) -> EdgeSummary {
        let mut summary = EdgeSummary {
            edge_count: self.edges.len(),
            ..EdgeSummary::default()
        };
        for (&edge, usage) in &self.edges {
            if usage.is_boundary() {
                summary.boundary_edges += 1;
                keep_min(&mut summary.first_boundary, edge);
            } else if usage.is_non_manifold() {
                summary.non_manifold_edges += 1;
                summary.max_faces_per_edge = summary.max_faces_per_edge.max(usage.faces as usize);
                keep_min(&mut summary.first_non_manifold, edge);
            } else if usage.is_inconsistent() {
                summary.inconsistent_edges += 1;
            }
        }
        summary
    }

    /// Closed, manifold and consistently wound: every edge has exactly two
    /// faces traversing it in opposite directions.
    pub fn is_watertight(&self) -> bool {
        !self.edges.is_empty()
            && self
                .edges
                .values()
                .all(|u| u.faces == 2 && u.forward == 1)
    }
}
