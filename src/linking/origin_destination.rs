//! Origin/destination entry points

use log::{debug, warn};

use super::linker::StreetLinker;
use super::request::{GenericLocation, RoutingRequest};
use super::splitter::SplitRealm;
use crate::error::Error;
use crate::model::{RequestScratch, StreetGraph, TemporaryVertexKind, TraverseMode, VertexRef};
use crate::TempVertexId;

impl StreetLinker {
    /// Link a user-supplied location to the graph non-destructively.
    ///
    /// Creates a temporary street-location vertex in the request's scratch
    /// arena and links it to the nearest street edges (or, failing that,
    /// directly to nearby transit stops). The permanent graph is never
    /// modified. Returns the temporary vertex even when linking failed.
    ///
    /// # Errors
    ///
    /// [`Error::TrivialPath`] when this location and the other end of the
    /// same request project onto one street edge.
    pub fn link_origin_destination(
        &self,
        graph: &StreetGraph,
        scratch: &mut RequestScratch,
        location: &GenericLocation,
        options: Option<&RoutingRequest>,
        end_vertex: bool,
    ) -> Result<TempVertexId, Error> {
        if end_vertex {
            debug!("finding end vertex for {location:?}");
        } else {
            debug!("finding start vertex for {location:?}");
        }

        let name = match &location.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ if end_vertex => "Destination".to_string(),
            _ => "Origin".to_string(),
        };
        let label = format!("temporary-{}", scratch.vertex_count());
        let temporary = scratch.add_vertex(
            label,
            location.coordinate,
            TemporaryVertexKind::StreetLocation {
                name,
                end_vertex,
                wheelchair_accessible: false,
            },
        );

        let mode = non_transit_mode(options, end_vertex);

        let mut realm = SplitRealm::Temporary { graph, scratch };
        if !self.link_to_graph(&mut realm, VertexRef::Temporary(temporary), mode, options)? {
            warn!("could not link {location:?} to the street network");
        }

        Ok(temporary)
    }
}

/// Mode used to reach the street network from an origin/destination point.
/// Car wins when requested, except that park-and-ride and kiss-and-ride
/// arrive at the destination on foot; the car branch deliberately
/// short-circuits the walk and bicycle checks.
fn non_transit_mode(options: Option<&RoutingRequest>, end_vertex: bool) -> TraverseMode {
    let mut mode = TraverseMode::Walk;
    if let Some(options) = options {
        let modes = &options.modes;
        if modes.car {
            mode = if end_vertex && (options.park_and_ride || options.kiss_and_ride) {
                TraverseMode::Walk
            } else {
                TraverseMode::Car
            };
        } else if modes.walk {
            mode = TraverseMode::Walk;
        } else if modes.bicycle {
            mode = TraverseMode::Bicycle;
        }
    }
    mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModeSet;

    fn request(walk: bool, bicycle: bool, car: bool) -> RoutingRequest {
        RoutingRequest::new(ModeSet {
            walk,
            bicycle,
            car,
            transit: false,
        })
    }

    #[test]
    fn defaults_to_walk_without_options() {
        assert_eq!(non_transit_mode(None, false), TraverseMode::Walk);
        assert_eq!(non_transit_mode(None, true), TraverseMode::Walk);
    }

    #[test]
    fn car_wins_over_walk_and_bicycle() {
        let r = request(true, true, true);
        assert_eq!(non_transit_mode(Some(&r), false), TraverseMode::Car);
        assert_eq!(non_transit_mode(Some(&r), true), TraverseMode::Car);
    }

    #[test]
    fn park_and_ride_arrives_on_foot() {
        let mut r = request(false, false, true);
        r.park_and_ride = true;
        assert_eq!(non_transit_mode(Some(&r), true), TraverseMode::Walk);
        // departure still drives
        assert_eq!(non_transit_mode(Some(&r), false), TraverseMode::Car);

        let mut r = request(false, false, true);
        r.kiss_and_ride = true;
        assert_eq!(non_transit_mode(Some(&r), true), TraverseMode::Walk);
    }

    #[test]
    fn bicycle_is_used_when_neither_car_nor_walk_is_requested() {
        let r = request(false, true, false);
        assert_eq!(non_transit_mode(Some(&r), false), TraverseMode::Bicycle);
    }
}
