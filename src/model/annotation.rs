//! Graph-build annotations
//!
//! Non-fatal findings recorded while linking stations to the street
//! network. They are kept on the graph for later reporting; the linker also
//! logs the unlinked ones.

use super::graph::StreetGraph;
use crate::VertexId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderAnnotation {
    /// No street edge within the search radius of a transit stop.
    StopUnlinked { stop: VertexId },
    /// No street edge within the search radius of a bike-rental station.
    BikeRentalStationUnlinked { station: VertexId },
    /// No street edge within the search radius of a bike park.
    BikeParkUnlinked { park: VertexId },
    /// A transit stop was linked, but the nearest street is suspiciously
    /// far away.
    StopLinkedTooFar {
        stop: VertexId,
        distance_meters: u32,
    },
}

impl BuilderAnnotation {
    pub fn message(&self, graph: &StreetGraph) -> String {
        match self {
            Self::StopUnlinked { stop } => format!(
                "stop {} is not near any streets; it will not be usable",
                graph.vertex(*stop).label
            ),
            Self::BikeRentalStationUnlinked { station } => format!(
                "bike rental station {} is not near any streets; it will not be usable",
                graph.vertex(*station).label
            ),
            Self::BikeParkUnlinked { park } => format!(
                "bike park {} is not near any streets; it will not be usable",
                graph.vertex(*park).label
            ),
            Self::StopLinkedTooFar {
                stop,
                distance_meters,
            } => format!(
                "stop {} is far from the nearest street; snap distance is {} m",
                graph.vertex(*stop).label,
                distance_meters
            ),
        }
    }
}
