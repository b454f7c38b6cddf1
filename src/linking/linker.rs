//! Linker orchestration
//!
//! [`StreetLinker`] links station vertices into the graph destructively at
//! build time and origin/destination points non-destructively at request
//! time. Only one linker should be active on a graph at any given time.

use std::sync::{Arc, RwLock};

use log::{debug, info, warn};

use super::candidates::{closest_candidate_edges, closest_candidate_stops};
use super::geometry::{
    degrees_latitude_to_meters, edge_xscale, equirectangular_xscale, LinearLocation,
};
use super::index::{EdgeSpatialIndex, TransitStopIndex};
use super::link_edges::make_link_edges;
use super::request::RoutingRequest;
use super::splitter::{split_street_edge, SplitRealm};
use crate::error::Error;
use crate::model::{
    BuilderAnnotation, ModeSet, StreetGraph, TraverseMode, VertexKind, VertexRef,
};
use crate::{EdgeId, VertexId, SNAP_FRACTION_EPSILON, WARNING_DISTANCE_METERS};

/// Links point-like entities to the nearest traversable street edges,
/// splitting edges where the projection lands in their interior.
pub struct StreetLinker {
    edge_index: Arc<RwLock<EdgeSpatialIndex>>,
    stop_index: Option<TransitStopIndex>,
}

impl StreetLinker {
    /// Build a linker with a private edge index over the graph's street
    /// edges.
    pub fn new(graph: &StreetGraph) -> Self {
        Self {
            edge_index: Arc::new(RwLock::new(EdgeSpatialIndex::from_graph(graph))),
            stop_index: None,
        }
    }

    /// Build a linker around an externally owned edge index. The linker
    /// inserts split half-edges into it but does not rebuild it.
    pub fn with_indexes(
        edge_index: Arc<RwLock<EdgeSpatialIndex>>,
        stop_index: Option<TransitStopIndex>,
    ) -> Self {
        Self {
            edge_index,
            stop_index,
        }
    }

    /// Attach a transit stop index, enabling the origin/destination
    /// fallback to direct stop links when no street edge is in range.
    pub fn with_stop_index(mut self, stop_index: TransitStopIndex) -> Self {
        self.stop_index = Some(stop_index);
        self
    }

    /// Handle to the edge index, for callers that share it across
    /// components.
    pub fn edge_index(&self) -> Arc<RwLock<EdgeSpatialIndex>> {
        Arc::clone(&self.edge_index)
    }

    /// Link every transit stop, bike-rental station and bike park to the
    /// walkable street network, permanently. Entities that cannot be
    /// linked get an annotation; the pass never aborts.
    pub fn link_all_stations(&self, graph: &mut StreetGraph) {
        let stations: Vec<VertexId> = graph
            .vertices()
            .filter(|(_, vertex)| vertex.kind.is_station())
            .map(|(id, _)| id)
            .collect();
        info!("linking {} stations to the street network", stations.len());

        for station in stations {
            if self.link_to_closest_walkable_edge(graph, station) {
                continue;
            }
            let annotation = match graph.vertex(station).kind {
                VertexKind::TransitStop { .. } => BuilderAnnotation::StopUnlinked { stop: station },
                VertexKind::BikeRentalStation { .. } => {
                    BuilderAnnotation::BikeRentalStationUnlinked { station }
                }
                VertexKind::BikePark { .. } => BuilderAnnotation::BikeParkUnlinked { park: station },
                VertexKind::Street | VertexKind::Splitter { .. } => continue,
            };
            let message = graph.add_builder_annotation(annotation);
            warn!("{message}");
        }
    }

    /// Permanently link a vertex to the closest edge walking allows.
    pub fn link_to_closest_walkable_edge(&self, graph: &mut StreetGraph, vertex: VertexId) -> bool {
        self.link_vertex(graph, vertex, TraverseMode::Walk)
    }

    /// Permanently link a vertex to the closest edge traversable under the
    /// given mode.
    pub fn link_vertex(
        &self,
        graph: &mut StreetGraph,
        vertex: VertexId,
        mode: TraverseMode,
    ) -> bool {
        let mut realm = SplitRealm::Destructive(graph);
        match self.link_to_graph(&mut realm, VertexRef::Graph(vertex), mode, None) {
            Ok(linked) => linked,
            // the trivial-path signal needs a routing request, which
            // destructive callers never pass
            Err(_) => false,
        }
    }

    /// Link a vertex to the epsilon cluster of nearest candidate edges.
    ///
    /// On a miss, request-time linking falls back to direct links to
    /// nearby transit stops when a stop index is available; build-time
    /// linking reports failure.
    pub(crate) fn link_to_graph(
        &self,
        realm: &mut SplitRealm<'_>,
        origin: VertexRef,
        mode: TraverseMode,
        options: Option<&RoutingRequest>,
    ) -> Result<bool, Error> {
        let origin_point = realm.point_of(origin);
        let xscale = equirectangular_xscale(origin_point.y());

        let mut modes = ModeSet::from_mode(mode);
        if mode == TraverseMode::Bicycle {
            // a bike can be walked to the street
            modes.walk = true;
        }

        let cluster = {
            let index = self.edge_index.read().expect("spatial index lock poisoned");
            closest_candidate_edges(realm.graph(), &index, origin_point.0, &modes, xscale)
        };

        let Some(cluster) = cluster else {
            // stop fallback exists for origin/destination linking only
            if realm.is_destructive() {
                return Ok(false);
            }
            let Some(stop_index) = &self.stop_index else {
                return Ok(false);
            };
            debug!("no street edge in range of {origin:?}, trying transit stops");
            let Some(stops) =
                closest_candidate_stops(stop_index, realm.graph(), origin_point.0, xscale)
            else {
                debug!("no transit stop in range of {origin:?} either");
                return Ok(false);
            };
            for stop in stops {
                debug!("linking {origin:?} directly to stop {stop}");
                make_link_edges(realm, origin, VertexRef::Graph(stop));
            }
            return Ok(true);
        };

        for &edge in &cluster.edges {
            self.link_to_edge(realm, origin, edge, options)?;
        }

        // a linkage was made; flag it when a transit stop ended up
        // suspiciously far from its street
        if let VertexRef::Graph(v) = origin {
            if let SplitRealm::Destructive(graph) = realm {
                if matches!(graph.vertex(v).kind, VertexKind::TransitStop { .. }) {
                    let distance_meters = degrees_latitude_to_meters(cluster.best_distance);
                    if distance_meters > WARNING_DISTANCE_METERS {
                        // recorded but not logged; large feeds produce
                        // thousands of these
                        let _ = graph.add_builder_annotation(BuilderAnnotation::StopLinkedTooFar {
                            stop: v,
                            distance_meters: distance_meters as u32,
                        });
                    }
                }
            }
        }

        Ok(true)
    }

    /// Link a vertex to one edge: snap to an endpoint when the projection
    /// falls on one, otherwise split the edge and link to the splitter
    /// vertex.
    fn link_to_edge(
        &self,
        realm: &mut SplitRealm<'_>,
        origin: VertexRef,
        edge_id: EdgeId,
        options: Option<&RoutingRequest>,
    ) -> Result<(), Error> {
        let (num_points, location, from, to) = {
            let graph = realm.graph();
            let edge = graph.edge(edge_id);
            let street = edge.street();
            let origin_point = realm.point_of(origin);
            let xscale = edge_xscale(&street.geometry);
            let location = LinearLocation::project(origin_point.0, &street.geometry, xscale);
            (street.geometry.0.len(), location, edge.from, edge.to)
        };

        // Projections landing essentially on an endpoint link to the
        // existing vertex. The epsilon is tiny: only points that project to
        // exactly the same location may share a vertex, independent of the
        // order stops are loaded in.
        if location.segment == 0 && location.fraction < SNAP_FRACTION_EPSILON {
            make_link_edges(realm, origin, VertexRef::Graph(from));
        } else if location.segment == num_points - 2
            && location.fraction > 1.0 - SNAP_FRACTION_EPSILON
        {
            make_link_edges(realm, origin, VertexRef::Graph(to));
        } else {
            // origin/destination linking checks the edge against the other
            // end of the request first
            if let Some(options) = options {
                options.can_split_edge(edge_id)?;
            }
            let end_vertex = realm.is_end_vertex(origin);
            let anchor =
                split_street_edge(realm, &self.edge_index, edge_id, &location, end_vertex);
            make_link_edges(realm, origin, anchor);
        }

        Ok(())
    }
}
