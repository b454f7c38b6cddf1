//! Spatial indexes over edges and transit stops
//!
//! Thin adapters around [`rstar::RTree`]. The edge index maps bounding
//! envelopes to edge ids; entries are never removed, so after a
//! destructive split it keeps returning the detached edge. Query results
//! are unordered and consumers must re-check
//! [`StreetGraph::edge_is_in_graph`](crate::model::StreetGraph::edge_is_in_graph).

use geo::{LineString, Point, Rect};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

use crate::model::{EdgeKind, StreetGraph, VertexKind};
use crate::{EdgeId, VertexId};

type EdgeEnvelope = GeomWithData<Rectangle<[f64; 2]>, EdgeId>;
type StopPoint = GeomWithData<[f64; 2], VertexId>;

/// Envelope index of street edge geometries.
pub struct EdgeSpatialIndex {
    tree: RTree<EdgeEnvelope>,
}

impl Default for EdgeSpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeSpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Index every street edge of the graph.
    pub fn from_graph(graph: &StreetGraph) -> Self {
        let mut index = Self::new();
        for (id, edge) in graph.edges() {
            if let EdgeKind::Street(street) = &edge.kind {
                index.insert(&street.geometry, id);
            }
        }
        index
    }

    pub fn insert(&mut self, geometry: &LineString<f64>, edge: EdgeId) {
        self.tree
            .insert(GeomWithData::new(envelope_of(geometry), edge));
    }

    /// Edges whose envelope intersects the query envelope, in no particular
    /// order, stale entries included.
    pub fn query(&self, envelope: &Rect<f64>) -> Vec<EdgeId> {
        let aabb = AABB::from_corners(
            [envelope.min().x, envelope.min().y],
            [envelope.max().x, envelope.max().y],
        );
        self.tree
            .locate_in_envelope_intersecting(&aabb)
            .map(|entry| entry.data)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

fn envelope_of(geometry: &LineString<f64>) -> Rectangle<[f64; 2]> {
    let mut min = [f64::INFINITY, f64::INFINITY];
    let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];
    for c in &geometry.0 {
        min[0] = min[0].min(c.x);
        min[1] = min[1].min(c.y);
        max[0] = max[0].max(c.x);
        max[1] = max[1].max(c.y);
    }
    Rectangle::from_corners(min, max)
}

/// Point index of transit stop vertices, used as the origin/destination
/// fallback when no street edge is in range.
pub struct TransitStopIndex {
    tree: RTree<StopPoint>,
}

impl Default for TransitStopIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitStopIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Index every transit stop vertex of the graph.
    pub fn from_graph(graph: &StreetGraph) -> Self {
        let mut index = Self::new();
        for (id, vertex) in graph.vertices() {
            if matches!(vertex.kind, VertexKind::TransitStop { .. }) {
                index.insert(vertex.geometry, id);
            }
        }
        index
    }

    pub fn insert(&mut self, location: Point<f64>, stop: VertexId) {
        self.tree
            .insert(GeomWithData::new([location.x(), location.y()], stop));
    }

    pub fn query(&self, envelope: &Rect<f64>) -> Vec<VertexId> {
        let aabb = AABB::from_corners(
            [envelope.min().x, envelope.min().y],
            [envelope.max().x, envelope.max().y],
        );
        self.tree
            .locate_in_envelope(&aabb)
            .map(|entry| entry.data)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use geo::{coord, line_string, point, Rect};

    use super::*;
    use crate::model::{ModeSet, StreetEdge};

    #[test]
    fn query_returns_stale_entries() {
        let mut graph = StreetGraph::new();
        let a = graph.add_vertex("a", point!(x: 0.0, y: 0.0), VertexKind::Street);
        let b = graph.add_vertex("b", point!(x: 1.0, y: 0.0), VertexKind::Street);
        let geometry = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let e = graph.add_edge(
            a,
            b,
            EdgeKind::Street(StreetEdge {
                geometry: geometry.clone(),
                permission: ModeSet::all_street(),
                wheelchair_accessible: false,
                elevation: None,
            }),
        );

        let index = EdgeSpatialIndex::from_graph(&graph);
        graph.detach_edge(e);

        let envelope = Rect::new(coord! { x: -0.1, y: -0.1 }, coord! { x: 1.1, y: 0.1 });
        // the index still returns the edge; liveness is the caller's check
        assert_eq!(index.query(&envelope), vec![e]);
        assert!(!graph.edge_is_in_graph(e));
    }
}
