//! Export of the search graphs grown by the planners.
//!
//! A [`PlannerData`] is a flat graph: vertices carry a state and the index of
//! the level they were grown on, edges are `(from, to)` vertex indices. Each
//! level's planner fills its own part through
//! [`Quotient::planner_data`](crate::Quotient::planner_data); the hierarchy
//! stitches the parts together with [`PlannerData::append_level`].

use crate::state::State;

/// One exported search-graph vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerDataVertex {
    state: State,
    level: usize,
}

impl PlannerDataVertex {
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Index of the level whose planner grew this vertex.
    pub fn level(&self) -> usize {
        self.level
    }
}

/// Vertices, edges and start/goal markers of one or more search graphs.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerData {
    vertices: Vec<PlannerDataVertex>,
    edges: Vec<(usize, usize)>,
    start_vertices: Vec<usize>,
    goal_vertices: Vec<usize>,
}

impl PlannerData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex on level 0 and returns its index.
    pub fn add_vertex(&mut self, state: State) -> usize {
        self.vertices.push(PlannerDataVertex { state, level: 0 });
        self.vertices.len() - 1
    }

    /// Adds a directed edge. Returns false, adding nothing, if either end is
    /// not a vertex.
    pub fn add_edge(&mut self, from: usize, to: usize) -> bool {
        if from >= self.vertices.len() || to >= self.vertices.len() {
            return false;
        }
        self.edges.push((from, to));
        true
    }

    /// Marks `vertex` as a start vertex. Returns false if it does not exist.
    pub fn mark_start(&mut self, vertex: usize) -> bool {
        mark(&mut self.start_vertices, vertex, self.vertices.len())
    }

    /// Marks `vertex` as a goal vertex. Returns false if it does not exist.
    pub fn mark_goal(&mut self, vertex: usize) -> bool {
        mark(&mut self.goal_vertices, vertex, self.vertices.len())
    }

    /// Moves every vertex of `part` into this graph, tagged with `level`.
    ///
    /// Edge and marker indices of `part` are shifted past the vertices
    /// already present.
    pub fn append_level(&mut self, level: usize, part: PlannerData) {
        let offset = self.vertices.len();
        self.vertices.extend(
            part.vertices
                .into_iter()
                .map(|v| PlannerDataVertex { level, ..v }),
        );
        self.edges
            .extend(part.edges.into_iter().map(|(a, b)| (a + offset, b + offset)));
        self.start_vertices
            .extend(part.start_vertices.into_iter().map(|v| v + offset));
        self.goal_vertices
            .extend(part.goal_vertices.into_iter().map(|v| v + offset));
    }

    pub fn vertex(&self, index: usize) -> Option<&PlannerDataVertex> {
        self.vertices.get(index)
    }

    pub fn vertices(&self) -> &[PlannerDataVertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn start_vertices(&self) -> &[usize] {
        &self.start_vertices
    }

    pub fn goal_vertices(&self) -> &[usize] {
        &self.goal_vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of vertices grown on `level`.
    pub fn level_vertex_count(&self, level: usize) -> usize {
        self.vertices.iter().filter(|v| v.level == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.start_vertices.clear();
        self.goal_vertices.clear();
    }
}

fn mark(markers: &mut Vec<usize>, vertex: usize, vertex_count: usize) -> bool {
    if vertex >= vertex_count {
        return false;
    }
    if !markers.contains(&vertex) {
        markers.push(vertex);
    }
    true
}
