//! Link-edge construction
//!
//! Dispatches on the kind of the entity being linked and creates the
//! matching link edges. Permanent links are bidirectional pairs and only
//! exist in the destructive regime; temporary origin/destination points get
//! a single free edge oriented by their end-vertex flag.

use std::mem;

use log::debug;

use super::splitter::SplitRealm;
use crate::model::{
    EdgeKind, RequestScratch, StreetGraph, TemporaryEdgeKind, TemporaryVertexKind, VertexKind,
    VertexRef,
};
use crate::{TempVertexId, VertexId};

/// Create the appropriate link edges between a linked entity and its
/// street-side anchor (an existing street vertex or a fresh splitter
/// vertex).
pub(crate) fn make_link_edges(realm: &mut SplitRealm<'_>, origin: VertexRef, anchor: VertexRef) {
    match origin {
        VertexRef::Temporary(origin) => make_temporary_edges(realm, origin, anchor),
        VertexRef::Graph(origin) => {
            let graph: &mut StreetGraph = match realm {
                SplitRealm::Destructive(graph) => graph,
                SplitRealm::Temporary { .. } => {
                    panic!("permanent link edges require destructive splitting")
                }
            };
            let VertexRef::Graph(anchor) = anchor else {
                panic!("permanent link edges cannot target a temporary vertex");
            };
            match &graph.vertex(origin).kind {
                VertexKind::TransitStop {
                    wheelchair_entrance,
                    ..
                } => {
                    let kind = EdgeKind::TransitLink {
                        wheelchair_accessible: *wheelchair_entrance,
                    };
                    make_link_pair(graph, origin, anchor, kind);
                }
                VertexKind::BikeRentalStation { .. } => {
                    make_link_pair(graph, origin, anchor, EdgeKind::BikeRentalLink);
                }
                VertexKind::BikePark { .. } => {
                    make_link_pair(graph, origin, anchor, EdgeKind::BikeParkLink);
                }
                VertexKind::Street | VertexKind::Splitter { .. } => {
                    panic!("only station vertices can be linked to the street network")
                }
            }
        }
    }
}

/// Create both directions of a permanent link, unless an identical pair
/// already exists. Duplicates happen when a station links to duplicate
/// ways that share start and end vertices.
fn make_link_pair(graph: &mut StreetGraph, from: VertexId, to: VertexId, kind: EdgeKind) {
    let already_linked = graph.vertex(from).outgoing().iter().any(|&e| {
        let edge = graph.edge(e);
        edge.to == to && mem::discriminant(&edge.kind) == mem::discriminant(&kind)
    });
    if already_linked {
        return;
    }

    graph.add_edge(from, to, kind.clone());
    graph.add_edge(to, from, kind);
}

/// Connect an origin/destination point to its anchor with a single free
/// edge. A destination is entered, so its edge points at it; an origin is
/// left, so its edge points away.
fn make_temporary_edges(realm: &mut SplitRealm<'_>, origin: TempVertexId, anchor: VertexRef) {
    let scratch: &mut RequestScratch = match realm {
        SplitRealm::Temporary { scratch, .. } => scratch,
        SplitRealm::Destructive(_) => panic!("destructive splitting used on temporary edges"),
    };

    if let VertexRef::Temporary(t) = anchor {
        if let TemporaryVertexKind::Splitter {
            wheelchair_accessible,
            ..
        } = scratch.vertex(t).kind
        {
            scratch.set_wheelchair_accessible(origin, wheelchair_accessible);
        }
    }

    if scratch.vertex(origin).is_end_vertex() {
        debug!("linking end vertex, edge {anchor:?} -> temporary {origin}");
        scratch.add_edge(anchor, VertexRef::Temporary(origin), TemporaryEdgeKind::Free);
    } else {
        debug!("linking start vertex, edge temporary {origin} -> {anchor:?}");
        scratch.add_edge(VertexRef::Temporary(origin), anchor, TemporaryEdgeKind::Free);
    }
}
