//! Street-network linker
//!
//! Attaches point-like entities (transit stops, bike-rental stations, bike
//! parks and request-time origin/destination points) to the nearest
//! traversable edges of a street graph, splitting those edges at the
//! projected foot of the perpendicular when necessary.
//!
//! Linking comes in two regimes with identical geometric semantics:
//!
//! - **destructive** linking permanently rewires the graph and is used
//!   while the graph is being built ([`linking::StreetLinker::link_all_stations`]);
//! - **non-destructive** linking creates only temporary vertices and edges
//!   owned by a single routing request
//!   ([`linking::StreetLinker::link_origin_destination`]).
//!
//! Candidate selection is deterministic: candidates are ranked by projected
//! distance with stable tie-breaking, and everything within a small epsilon
//! of the best candidate is linked, so divided roads modelled as paired
//! one-way edges are always linked as a unit.

pub mod error;
pub mod linking;
pub mod model;
pub mod prelude;

pub use error::Error;

/// Permanent vertex handle in a [`model::StreetGraph`] arena.
pub type VertexId = usize;
/// Permanent edge handle in a [`model::StreetGraph`] arena.
pub type EdgeId = usize;
/// Vertex handle in a per-request [`model::RequestScratch`] arena.
pub type TempVertexId = usize;
/// Edge handle in a per-request [`model::RequestScratch`] arena.
pub type TempEdgeId = usize;

/// Candidate edges and stops beyond this radius are never linked to.
pub const MAX_SEARCH_RADIUS_METERS: f64 = 1000.0;

/// A transit stop linked farther than this gets a linked-too-far annotation.
pub const WARNING_DISTANCE_METERS: f64 = 20.0;

/// If two ways differ in distance by less than this, we link to both of them.
pub const DUPLICATE_WAY_EPSILON_METERS: f64 = 0.001;

/// Projections within this fraction of a segment endpoint snap to the
/// existing vertex instead of creating a splitter vertex.
pub const SNAP_FRACTION_EPSILON: f64 = 1e-8;
