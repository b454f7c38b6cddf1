//! Routing-request carrier
//!
//! The slice of a routing request the linker consumes: the requested
//! traversal modes, the park-and-ride / kiss-and-ride flags that influence
//! mode choice at the destination, and the split bookkeeping that detects
//! trivial origin-to-destination paths.

use std::cell::RefCell;

use geo::Point;
use hashbrown::HashSet;

use crate::error::Error;
use crate::model::ModeSet;
use crate::EdgeId;

/// Request-scoped options for origin/destination linking.
#[derive(Debug, Default)]
pub struct RoutingRequest {
    pub modes: ModeSet,
    pub park_and_ride: bool,
    pub kiss_and_ride: bool,
    split_edges: RefCell<HashSet<EdgeId>>,
}

impl RoutingRequest {
    pub fn new(modes: ModeSet) -> Self {
        Self {
            modes,
            ..Self::default()
        }
    }

    /// Record that this request is about to split an edge. Splitting the
    /// same edge twice means origin and destination project onto one edge,
    /// which makes the street path trivial; the signal propagates to the
    /// caller uncaught.
    pub fn can_split_edge(&self, edge: EdgeId) -> Result<(), Error> {
        if self.split_edges.borrow_mut().insert(edge) {
            Ok(())
        } else {
            Err(Error::TrivialPath(edge))
        }
    }
}

/// A user-supplied location to be linked as origin or destination.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericLocation {
    pub name: Option<String>,
    pub coordinate: Point<f64>,
}

impl GenericLocation {
    pub fn new(coordinate: Point<f64>) -> Self {
        Self {
            name: None,
            coordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_split_of_the_same_edge_is_a_trivial_path() {
        let request = RoutingRequest::default();
        assert!(request.can_split_edge(7).is_ok());
        assert!(request.can_split_edge(8).is_ok());
        assert!(matches!(
            request.can_split_edge(7),
            Err(Error::TrivialPath(7))
        ));
    }
}
