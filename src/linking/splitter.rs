//! Edge splitting in both mutation regimes

use std::sync::RwLock;

use geo::Point;

use super::geometry::{location_coordinate, LinearLocation};
use super::index::EdgeSpatialIndex;
use crate::model::{
    EdgeKind, RequestScratch, StreetGraph, TemporaryEdgeKind, TemporaryVertexKind, VertexKind,
    VertexRef,
};
use crate::EdgeId;

/// The mutation target of a linking pass.
///
/// Destructive linking owns the graph exclusively and rewires it for good;
/// temporary linking reads the graph and writes only into the request's
/// scratch arena. Code paths that would cross the two regimes are
/// programmer errors and panic.
pub(crate) enum SplitRealm<'a> {
    Destructive(&'a mut StreetGraph),
    Temporary {
        graph: &'a StreetGraph,
        scratch: &'a mut RequestScratch,
    },
}

impl SplitRealm<'_> {
    pub fn graph(&self) -> &StreetGraph {
        match self {
            SplitRealm::Destructive(graph) => graph,
            SplitRealm::Temporary { graph, .. } => graph,
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, SplitRealm::Destructive(_))
    }

    pub fn point_of(&self, vertex: VertexRef) -> Point<f64> {
        match vertex {
            VertexRef::Graph(v) => self.graph().vertex(v).geometry,
            VertexRef::Temporary(t) => match self {
                SplitRealm::Temporary { scratch, .. } => scratch.vertex(t).geometry,
                SplitRealm::Destructive(_) => {
                    panic!("temporary vertex used in a destructive linking pass")
                }
            },
        }
    }

    pub fn is_end_vertex(&self, vertex: VertexRef) -> bool {
        match vertex {
            VertexRef::Graph(_) => false,
            VertexRef::Temporary(t) => match self {
                SplitRealm::Temporary { scratch, .. } => scratch.vertex(t).is_end_vertex(),
                SplitRealm::Destructive(_) => {
                    panic!("temporary vertex used in a destructive linking pass")
                }
            },
        }
    }
}

/// Split a street edge at an interior linear location and return the new
/// splitter vertex.
///
/// Destructively: the two half-edges replace the original in the graph and
/// are inserted into the spatial index under its write lock; the original
/// is detached but left in the index (consumers filter stale hits by the
/// in-graph check). Temporarily: a scratch splitter vertex and both partial
/// half-edges are created and the permanent graph is untouched.
pub(crate) fn split_street_edge(
    realm: &mut SplitRealm<'_>,
    edge_index: &RwLock<EdgeSpatialIndex>,
    edge_id: EdgeId,
    location: &LinearLocation,
    end_vertex: bool,
) -> VertexRef {
    match realm {
        SplitRealm::Destructive(graph) => {
            let (from, to, street) = {
                let edge = graph.edge(edge_id);
                (edge.from, edge.to, edge.street().clone())
            };
            let split_point = location_coordinate(&street.geometry, location);

            // every edge can be split at most once, so this label is unique
            let v = graph.add_vertex(
                format!("split from {edge_id}"),
                split_point.into(),
                VertexKind::Splitter {
                    split_from: edge_id,
                },
            );

            let (first, second) = street.split(location);
            let first_geometry = first.geometry.clone();
            let second_geometry = second.geometry.clone();
            let e1 = graph.add_edge(from, v, EdgeKind::Street(first));
            let e2 = graph.add_edge(v, to, EdgeKind::Street(second));

            {
                // index writes are not synchronized internally; the lock
                // covers exactly this pair of inserts
                let mut index = edge_index
                    .write()
                    .expect("spatial index lock poisoned");
                index.insert(&first_geometry, e1);
                index.insert(&second_geometry, e2);
            }

            // the original is not removed from the index; the in-graph
            // check filters it out of future queries
            graph.detach_edge(edge_id);

            VertexRef::Graph(v)
        }
        SplitRealm::Temporary { graph, scratch } => {
            let edge = graph.edge(edge_id);
            let street = edge.street();
            let split_point = location_coordinate(&street.geometry, location);

            let v = scratch.add_vertex(
                format!("split from {edge_id}"),
                split_point.into(),
                TemporaryVertexKind::Splitter {
                    split_from: edge_id,
                    end_vertex,
                    wheelchair_accessible: street.wheelchair_accessible,
                },
            );

            let (first, second) = street.split(location);
            scratch.add_edge(
                VertexRef::Graph(edge.from),
                VertexRef::Temporary(v),
                TemporaryEdgeKind::PartialStreet(first),
            );
            scratch.add_edge(
                VertexRef::Temporary(v),
                VertexRef::Graph(edge.to),
                TemporaryEdgeKind::PartialStreet(second),
            );

            VertexRef::Temporary(v)
        }
    }
}
