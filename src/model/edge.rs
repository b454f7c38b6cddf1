//! Permanent graph edges

use geo::LineString;

use super::mode::ModeSet;
use crate::linking::geometry::{location_coordinate, LinearLocation};
use crate::VertexId;

/// A permanent directed edge of the street graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub kind: EdgeKind,
}

impl Edge {
    /// Street payload of this edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge is a link edge rather than a street edge.
    pub fn street(&self) -> &StreetEdge {
        match &self.kind {
            EdgeKind::Street(street) => street,
            other => panic!("edge is not a street edge: {other:?}"),
        }
    }
}

/// Edge variants. Link edges connect stations to the street network and are
/// always created in bidirectional pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    Street(StreetEdge),
    TransitLink { wheelchair_accessible: bool },
    BikeRentalLink,
    BikeParkLink,
}

/// Traversable street segment with a polyline geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetEdge {
    pub geometry: LineString<f64>,
    pub permission: ModeSet,
    pub wheelchair_accessible: bool,
    /// Elevation samples, one per geometry point.
    pub elevation: Option<Vec<f64>>,
}

impl StreetEdge {
    pub fn can_traverse(&self, modes: &ModeSet) -> bool {
        self.permission.intersects(modes)
    }

    /// Split this edge at a linear location in the interior of its
    /// geometry, producing the two half-edges. Elevation samples are
    /// carried over, with a sample interpolated at the split point.
    pub fn split(&self, at: &LinearLocation) -> (StreetEdge, StreetEdge) {
        let coords = &self.geometry.0;
        let split_point = location_coordinate(&self.geometry, at);

        let mut first = coords[..=at.segment].to_vec();
        first.push(split_point);
        let mut second = vec![split_point];
        second.extend_from_slice(&coords[at.segment + 1..]);

        let (first_elevation, second_elevation) = match &self.elevation {
            Some(samples) => {
                let a = samples[at.segment];
                let b = samples[at.segment + 1];
                let split_sample = a + (b - a) * at.fraction;

                let mut first = samples[..=at.segment].to_vec();
                first.push(split_sample);
                let mut second = vec![split_sample];
                second.extend_from_slice(&samples[at.segment + 1..]);
                (Some(first), Some(second))
            }
            None => (None, None),
        };

        (
            StreetEdge {
                geometry: LineString::new(first),
                permission: self.permission,
                wheelchair_accessible: self.wheelchair_accessible,
                elevation: first_elevation,
            },
            StreetEdge {
                geometry: LineString::new(second),
                permission: self.permission,
                wheelchair_accessible: self.wheelchair_accessible,
                elevation: second_elevation,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;

    fn edge_with_elevation() -> StreetEdge {
        StreetEdge {
            geometry: line_string![
                (x: 0.0, y: 0.0),
                (x: 10.0, y: 0.0),
                (x: 20.0, y: 0.0),
            ],
            permission: ModeSet::all_street(),
            wheelchair_accessible: true,
            elevation: Some(vec![100.0, 110.0, 130.0]),
        }
    }

    #[test]
    fn split_partitions_geometry_at_the_fraction() {
        let edge = edge_with_elevation();
        let (first, second) = edge.split(&LinearLocation {
            segment: 1,
            fraction: 0.5,
        });

        assert_eq!(first.geometry.0.len(), 3);
        assert_eq!(second.geometry.0.len(), 2);
        assert_eq!(first.geometry.0[2], geo::coord! { x: 15.0, y: 0.0 });
        assert_eq!(second.geometry.0[0], geo::coord! { x: 15.0, y: 0.0 });
        assert_eq!(second.geometry.0[1], geo::coord! { x: 20.0, y: 0.0 });
    }

    #[test]
    fn split_interpolates_elevation_samples() {
        let edge = edge_with_elevation();
        let (first, second) = edge.split(&LinearLocation {
            segment: 1,
            fraction: 0.5,
        });

        assert_eq!(first.elevation, Some(vec![100.0, 110.0, 120.0]));
        assert_eq!(second.elevation, Some(vec![120.0, 130.0]));
    }

    #[test]
    fn split_keeps_permission_and_accessibility() {
        let edge = edge_with_elevation();
        let (first, second) = edge.split(&LinearLocation {
            segment: 0,
            fraction: 0.25,
        });

        assert_eq!(first.permission, edge.permission);
        assert_eq!(second.permission, edge.permission);
        assert!(first.wheelchair_accessible);
        assert!(second.wheelchair_accessible);
    }
}
