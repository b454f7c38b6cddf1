//! Arena-backed street graph

use geo::Point;

use super::annotation::BuilderAnnotation;
use super::edge::{Edge, EdgeKind};
use super::vertex::{Vertex, VertexKind};
use crate::{EdgeId, VertexId};

/// The permanent street graph.
///
/// Vertices and edges are arena vectors addressed by [`VertexId`] /
/// [`EdgeId`]; adjacency is kept as id lists on each vertex. Edges are never
/// deleted from the arena: a destructive split detaches the original edge
/// from both endpoints' adjacency lists, and [`StreetGraph::edge_is_in_graph`]
/// is the single source of truth for whether an edge is still live. Spatial
/// index entries for detached edges go stale and are filtered by consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreetGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    annotations: Vec<BuilderAnnotation>,
}

impl StreetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(
        &mut self,
        label: impl Into<String>,
        geometry: Point<f64>,
        kind: VertexKind,
    ) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex {
            label: label.into(),
            geometry,
            kind,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });
        id
    }

    /// Add an edge and wire it into both endpoints' adjacency lists.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, kind: EdgeKind) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(Edge { from, to, kind });
        self.vertices[from].outgoing.push(id);
        self.vertices[to].incoming.push(id);
        id
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().enumerate()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate()
    }

    /// An edge is in the graph while its `to` vertex still lists it as
    /// incoming.
    pub fn edge_is_in_graph(&self, id: EdgeId) -> bool {
        let edge = &self.edges[id];
        self.vertices[edge.to].incoming.contains(&id)
    }

    /// Detach an edge from both endpoints' adjacency lists. The edge stays
    /// in the arena so stale spatial index entries keep resolving to it.
    pub(crate) fn detach_edge(&mut self, id: EdgeId) {
        let (from, to) = {
            let edge = &self.edges[id];
            (edge.from, edge.to)
        };
        self.vertices[to].incoming.retain(|&e| e != id);
        self.vertices[from].outgoing.retain(|&e| e != id);
    }

    /// Record a graph-build annotation and return its formatted message for
    /// logging.
    pub fn add_builder_annotation(&mut self, annotation: BuilderAnnotation) -> String {
        let message = annotation.message(self);
        self.annotations.push(annotation);
        message
    }

    pub fn annotations(&self) -> &[BuilderAnnotation] {
        &self.annotations
    }
}
