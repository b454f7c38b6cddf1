//! Candidate search and deterministic ranking
//!
//! Candidates are sorted by projected distance with the edge id as a
//! stable tie-break, then clustered: everything within the duplicate-way
//! epsilon of its predecessor joins the result. The cluster boundary is a
//! strict gap, so near-identical parallel ways (divided roads modelled as
//! paired one-ways) are linked as a unit no matter how the spatial index
//! orders its results.

use geo::{coord, Coord, Rect};
use hashbrown::HashMap;

use super::geometry::{meters_to_degrees, point_distance, point_to_line_distance};
use super::index::{EdgeSpatialIndex, TransitStopIndex};
use crate::model::{EdgeKind, ModeSet, StreetGraph};
use crate::{EdgeId, VertexId, DUPLICATE_WAY_EPSILON_METERS, MAX_SEARCH_RADIUS_METERS};

/// Epsilon cluster of candidate edges, nearest first.
pub(crate) struct EdgeCluster {
    pub edges: Vec<EdgeId>,
    /// Distance to the nearest candidate, in degrees latitude.
    pub best_distance: f64,
}

/// Envelope around a query point, widened in the longitude direction to
/// account for converging meridians.
pub(crate) fn search_envelope(point: Coord<f64>, xscale: f64, radius_deg: f64) -> Rect<f64> {
    Rect::new(
        coord! { x: point.x - radius_deg / xscale, y: point.y - radius_deg },
        coord! { x: point.x + radius_deg / xscale, y: point.y + radius_deg },
    )
}

/// Find the epsilon cluster of traversable street edges nearest to a query
/// point, or `None` when nothing lies within the search radius.
pub(crate) fn closest_candidate_edges(
    graph: &StreetGraph,
    index: &EdgeSpatialIndex,
    point: Coord<f64>,
    modes: &ModeSet,
    xscale: f64,
) -> Option<EdgeCluster> {
    let radius_deg = meters_to_degrees(MAX_SEARCH_RADIUS_METERS);
    let epsilon_deg = meters_to_degrees(DUPLICATE_WAY_EPSILON_METERS);
    let envelope = search_envelope(point, xscale, radius_deg);

    // Envelope hits are filtered cheaply first; the distance computation is
    // the expensive part and runs once per survivor.
    let mut candidates: Vec<EdgeId> = index
        .query(&envelope)
        .into_iter()
        .filter(|&id| {
            let edge = graph.edge(id);
            match &edge.kind {
                EdgeKind::Street(street) => {
                    street.can_traverse(modes) && graph.edge_is_in_graph(id)
                }
                _ => false,
            }
        })
        .collect();

    let distances: HashMap<EdgeId, f64> = candidates
        .iter()
        .map(|&id| {
            let street = graph.edge(id).street();
            (id, point_to_line_distance(point, &street.geometry, xscale))
        })
        .collect();

    candidates.sort_by(|a, b| distances[a].total_cmp(&distances[b]).then_with(|| a.cmp(b)));

    let &first = candidates.first()?;
    let best_distance = distances[&first];
    if best_distance > radius_deg {
        return None;
    }

    let mut edges = vec![first];
    for pair in candidates.windows(2) {
        if distances[&pair[1]] - distances[&pair[0]] < epsilon_deg {
            edges.push(pair[1]);
        } else {
            break;
        }
    }

    Some(EdgeCluster {
        edges,
        best_distance,
    })
}

/// Same ranking over the transit stop index, with point-to-point distance.
pub(crate) fn closest_candidate_stops(
    index: &TransitStopIndex,
    graph: &StreetGraph,
    point: Coord<f64>,
    xscale: f64,
) -> Option<Vec<VertexId>> {
    let radius_deg = meters_to_degrees(MAX_SEARCH_RADIUS_METERS);
    let epsilon_deg = meters_to_degrees(DUPLICATE_WAY_EPSILON_METERS);
    let envelope = search_envelope(point, xscale, radius_deg);

    let mut candidates = index.query(&envelope);

    let distances: HashMap<VertexId, f64> = candidates
        .iter()
        .map(|&id| (id, point_distance(point, graph.vertex(id).geometry.0, xscale)))
        .collect();

    candidates.sort_by(|a, b| distances[a].total_cmp(&distances[b]).then_with(|| a.cmp(b)));

    let &first = candidates.first()?;
    if distances[&first] > radius_deg {
        return None;
    }

    let mut stops = vec![first];
    for pair in candidates.windows(2) {
        if distances[&pair[1]] - distances[&pair[0]] < epsilon_deg {
            stops.push(pair[1]);
        } else {
            break;
        }
    }

    Some(stops)
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point};

    use super::*;
    use crate::model::{StreetEdge, TraverseMode, VertexKind};

    fn add_street(
        graph: &mut StreetGraph,
        from: (f64, f64),
        to: (f64, f64),
        permission: ModeSet,
    ) -> EdgeId {
        let a = graph.add_vertex(
            format!("v{}", graph.vertex_count()),
            point!(x: from.0, y: from.1),
            VertexKind::Street,
        );
        let b = graph.add_vertex(
            format!("v{}", graph.vertex_count()),
            point!(x: to.0, y: to.1),
            VertexKind::Street,
        );
        graph.add_edge(
            a,
            b,
            EdgeKind::Street(StreetEdge {
                geometry: line_string![(x: from.0, y: from.1), (x: to.0, y: to.1)],
                permission,
                wheelchair_accessible: false,
                elevation: None,
            }),
        )
    }

    #[test]
    fn filters_by_traversal_mode() {
        let mut graph = StreetGraph::new();
        let car_only = ModeSet::from_mode(TraverseMode::Car);
        add_street(&mut graph, (0.0, 0.0), (0.001, 0.0), car_only);
        let index = EdgeSpatialIndex::from_graph(&graph);

        let walk = ModeSet::from_mode(TraverseMode::Walk);
        let cluster = closest_candidate_edges(
            &graph,
            &index,
            coord! { x: 0.0005, y: 0.0001 },
            &walk,
            1.0,
        );
        assert!(cluster.is_none());

        let car = ModeSet::from_mode(TraverseMode::Car);
        let cluster =
            closest_candidate_edges(&graph, &index, coord! { x: 0.0005, y: 0.0001 }, &car, 1.0);
        assert!(cluster.is_some());
    }

    #[test]
    fn skips_edges_no_longer_in_the_graph() {
        let mut graph = StreetGraph::new();
        let e = add_street(
            &mut graph,
            (0.0, 0.0),
            (0.001, 0.0),
            ModeSet::all_street(),
        );
        let index = EdgeSpatialIndex::from_graph(&graph);
        graph.detach_edge(e);

        let walk = ModeSet::from_mode(TraverseMode::Walk);
        let cluster = closest_candidate_edges(
            &graph,
            &index,
            coord! { x: 0.0005, y: 0.0001 },
            &walk,
            1.0,
        );
        assert!(cluster.is_none());
    }

    #[test]
    fn clusters_parallel_ways_within_epsilon() {
        let mut graph = StreetGraph::new();
        // two overlapping one-ways a fraction of a millimetre apart
        let e1 = add_street(&mut graph, (0.0, 0.0), (0.001, 0.0), ModeSet::all_street());
        let e2 = add_street(
            &mut graph,
            (0.0, 2.0e-9),
            (0.001, 2.0e-9),
            ModeSet::all_street(),
        );
        let index = EdgeSpatialIndex::from_graph(&graph);

        let walk = ModeSet::from_mode(TraverseMode::Walk);
        let cluster = closest_candidate_edges(
            &graph,
            &index,
            coord! { x: 0.0005, y: 1.0e-9 },
            &walk,
            1.0,
        )
        .expect("edges in range");
        assert_eq!(cluster.edges, vec![e1, e2]);
    }

    #[test]
    fn a_gap_wider_than_epsilon_ends_the_cluster() {
        let mut graph = StreetGraph::new();
        let e1 = add_street(&mut graph, (0.0, 0.0), (0.001, 0.0), ModeSet::all_street());
        // 5e-8 degrees is a handful of millimetres, past the epsilon
        add_street(
            &mut graph,
            (0.0, 5.0e-8),
            (0.001, 5.0e-8),
            ModeSet::all_street(),
        );
        let index = EdgeSpatialIndex::from_graph(&graph);

        let walk = ModeSet::from_mode(TraverseMode::Walk);
        let cluster =
            closest_candidate_edges(&graph, &index, coord! { x: 0.0005, y: 0.0 }, &walk, 1.0)
                .expect("edges in range");
        assert_eq!(cluster.edges, vec![e1]);
    }
}
