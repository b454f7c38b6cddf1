//! Local planar projection and linear referencing
//!
//! All candidate distances are computed in a local equirectangular frame:
//! longitudes are scaled by the cosine of the query latitude and distances
//! come out in degrees of latitude. The approximation holds for search
//! radii of a few kilometres and, unlike a great-circle distance, is
//! monotone in the planar sense the splitter relies on.

use std::f64::consts::PI;

use geo::{coord, Coord, LineString};

const EARTH_RADIUS_METERS: f64 = 6_371_010.0;

pub(crate) fn meters_to_degrees(meters: f64) -> f64 {
    360.0 * meters / (2.0 * PI * EARTH_RADIUS_METERS)
}

pub(crate) fn degrees_latitude_to_meters(degrees: f64) -> f64 {
    2.0 * PI * EARTH_RADIUS_METERS * degrees / 360.0
}

/// Longitude scale factor of the equirectangular projection at a latitude.
pub(crate) fn equirectangular_xscale(latitude: f64) -> f64 {
    (latitude * PI / 180.0).cos()
}

/// Longitude scale factor for projecting onto an edge, derived from the
/// midpoint latitude of its geometry.
pub(crate) fn edge_xscale(geometry: &LineString<f64>) -> f64 {
    let coords = &geometry.0;
    equirectangular_xscale((coords[0].y + coords[coords.len() - 1].y) / 2.0)
}

/// A point along a polyline: segment index plus fraction within that
/// segment. The segment index ranges over `0..=n-2` for a polyline of `n`
/// points and the fraction over `[0, 1]`, so the very end of the line is
/// `(n-2, 1.0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearLocation {
    pub segment: usize,
    pub fraction: f64,
}

impl LinearLocation {
    /// Project a (lon, lat) point onto a polyline in the equirectangular
    /// frame given by `xscale`. Coordinates are scaled on the fly; nothing
    /// is allocated.
    pub fn project(point: Coord<f64>, line: &LineString<f64>, xscale: f64) -> Self {
        project_scan(point, line, xscale).0
    }
}

/// Distance in degrees latitude from a point to a polyline, both given in
/// the unprojected frame.
pub(crate) fn point_to_line_distance(
    point: Coord<f64>,
    line: &LineString<f64>,
    xscale: f64,
) -> f64 {
    project_scan(point, line, xscale).1
}

/// Distance in degrees latitude between two points.
pub(crate) fn point_distance(a: Coord<f64>, b: Coord<f64>, xscale: f64) -> f64 {
    ((a.x - b.x) * xscale).hypot(a.y - b.y)
}

/// Coordinate of a linear location in the line's own (unprojected) frame.
///
/// The projection scales longitudes uniformly per segment, so a fraction
/// found in the projected frame identifies the same point on the
/// unprojected segment.
pub(crate) fn location_coordinate(line: &LineString<f64>, location: &LinearLocation) -> Coord<f64> {
    let a = line.0[location.segment];
    let b = line.0[location.segment + 1];
    coord! {
        x: a.x + (b.x - a.x) * location.fraction,
        y: a.y + (b.y - a.y) * location.fraction,
    }
}

fn project_scan(point: Coord<f64>, line: &LineString<f64>, xscale: f64) -> (LinearLocation, f64) {
    let px = point.x * xscale;
    let py = point.y;

    let mut best = LinearLocation {
        segment: 0,
        fraction: 0.0,
    };
    let mut best_d2 = f64::INFINITY;

    for (segment, line_segment) in line.lines().enumerate() {
        let ax = line_segment.start.x * xscale;
        let ay = line_segment.start.y;
        let bx = line_segment.end.x * xscale;
        let by = line_segment.end.y;

        let dx = bx - ax;
        let dy = by - ay;
        let len2 = dx * dx + dy * dy;
        let fraction = if len2 > 0.0 {
            (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let nx = ax + fraction * dx;
        let ny = ay + fraction * dy;
        let d2 = (px - nx) * (px - nx) + (py - ny) * (py - ny);
        if d2 < best_d2 {
            best_d2 = d2;
            best = LinearLocation { segment, fraction };
        }
    }

    (best, best_d2.sqrt())
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;

    #[test]
    fn xscale_is_one_at_the_equator() {
        assert!((equirectangular_xscale(0.0) - 1.0).abs() < 1e-12);
        assert!(equirectangular_xscale(60.0) < 0.51);
    }

    #[test]
    fn meter_degree_conversions_are_inverse() {
        let degrees = meters_to_degrees(1000.0);
        assert!((degrees_latitude_to_meters(degrees) - 1000.0).abs() < 1e-9);
        // one degree of latitude is roughly 111 km
        assert!((degrees_latitude_to_meters(1.0) - 111_000.0).abs() < 500.0);
    }

    #[test]
    fn projects_onto_the_nearest_segment() {
        let line = line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ];

        let on_first = LinearLocation::project(coord! { x: 0.25, y: 0.1 }, &line, 1.0);
        assert_eq!(on_first.segment, 0);
        assert!((on_first.fraction - 0.25).abs() < 1e-12);

        let on_second = LinearLocation::project(coord! { x: 1.2, y: 0.5 }, &line, 1.0);
        assert_eq!(on_second.segment, 1);
        assert!((on_second.fraction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn projection_clamps_beyond_the_line_ends() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];

        let before = LinearLocation::project(coord! { x: -1.0, y: 0.0 }, &line, 1.0);
        assert_eq!(before.segment, 0);
        assert_eq!(before.fraction, 0.0);

        let past = LinearLocation::project(coord! { x: 2.0, y: 0.0 }, &line, 1.0);
        assert_eq!(past.segment, 0);
        assert_eq!(past.fraction, 1.0);
    }

    #[test]
    fn distance_accounts_for_the_longitude_scale() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        // pure longitude offset shrinks with the scale factor
        let d = point_to_line_distance(coord! { x: 2.0, y: 0.0 }, &line, 0.5);
        assert!((d - 0.5).abs() < 1e-12);

        let p = point_distance(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 0.0 }, 0.5);
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn location_coordinate_interpolates_in_the_unprojected_frame() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 2.0)];
        let c = location_coordinate(
            &line,
            &LinearLocation {
                segment: 0,
                fraction: 0.5,
            },
        );
        assert_eq!(c, coord! { x: 2.0, y: 1.0 });
    }
}
