//! Per-request temporary entities
//!
//! Origin/destination linking never mutates the permanent graph. Everything
//! it creates lands in a [`RequestScratch`] arena owned by the routing
//! request and dropped as a unit when the request completes. Scratch
//! entities may reference permanent vertices through [`VertexRef`]; the
//! permanent graph never references scratch entities.

use geo::Point;

use super::edge::StreetEdge;
use crate::{EdgeId, TempEdgeId, TempVertexId, VertexId};

/// Reference to either a permanent or a temporary vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRef {
    Graph(VertexId),
    Temporary(TempVertexId),
}

/// Arena of temporary vertices and edges created for one routing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestScratch {
    vertices: Vec<TemporaryVertex>,
    edges: Vec<TemporaryEdge>,
}

impl RequestScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(
        &mut self,
        label: impl Into<String>,
        geometry: Point<f64>,
        kind: TemporaryVertexKind,
    ) -> TempVertexId {
        let id = self.vertices.len();
        self.vertices.push(TemporaryVertex {
            label: label.into(),
            geometry,
            kind,
        });
        id
    }

    pub fn add_edge(
        &mut self,
        from: VertexRef,
        to: VertexRef,
        kind: TemporaryEdgeKind,
    ) -> TempEdgeId {
        let id = self.edges.len();
        self.edges.push(TemporaryEdge { from, to, kind });
        id
    }

    pub fn vertex(&self, id: TempVertexId) -> &TemporaryVertex {
        &self.vertices[id]
    }

    pub fn edge(&self, id: TempEdgeId) -> &TemporaryEdge {
        &self.edges[id]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = (TempVertexId, &TemporaryVertex)> {
        self.vertices.iter().enumerate()
    }

    pub fn edges(&self) -> impl Iterator<Item = (TempEdgeId, &TemporaryEdge)> {
        self.edges.iter().enumerate()
    }

    pub(crate) fn set_wheelchair_accessible(&mut self, id: TempVertexId, accessible: bool) {
        match &mut self.vertices[id].kind {
            TemporaryVertexKind::StreetLocation {
                wheelchair_accessible,
                ..
            }
            | TemporaryVertexKind::Splitter {
                wheelchair_accessible,
                ..
            } => *wheelchair_accessible = accessible,
        }
    }
}

/// A vertex that exists only for the duration of one routing request.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporaryVertex {
    pub label: String,
    pub geometry: Point<f64>,
    pub kind: TemporaryVertexKind,
}

impl TemporaryVertex {
    /// True if this vertex is the destination end of its request.
    pub fn is_end_vertex(&self) -> bool {
        match self.kind {
            TemporaryVertexKind::StreetLocation { end_vertex, .. }
            | TemporaryVertexKind::Splitter { end_vertex, .. } => end_vertex,
        }
    }

    pub fn wheelchair_accessible(&self) -> bool {
        match self.kind {
            TemporaryVertexKind::StreetLocation {
                wheelchair_accessible,
                ..
            }
            | TemporaryVertexKind::Splitter {
                wheelchair_accessible,
                ..
            } => wheelchair_accessible,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemporaryVertexKind {
    /// A user-supplied origin or destination point.
    StreetLocation {
        name: String,
        end_vertex: bool,
        wheelchair_accessible: bool,
    },
    /// A non-destructive split point on a permanent street edge.
    Splitter {
        split_from: EdgeId,
        end_vertex: bool,
        wheelchair_accessible: bool,
    },
}

/// An edge that exists only for the duration of one routing request.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporaryEdge {
    pub from: VertexRef,
    pub to: VertexRef,
    pub kind: TemporaryEdgeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemporaryEdgeKind {
    /// Zero-cost connection between an origin/destination point and its
    /// street anchor or fallback transit stop.
    Free,
    /// Half of a non-destructively split street edge.
    PartialStreet(StreetEdge),
}
