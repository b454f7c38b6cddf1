//! Convenience re-exports of the main entry points

pub use crate::error::Error;
pub use crate::linking::{
    EdgeSpatialIndex, GenericLocation, RoutingRequest, StreetLinker, TransitStopIndex,
};
pub use crate::model::{
    BuilderAnnotation, Edge, EdgeKind, ModeSet, RequestScratch, StreetEdge, StreetGraph,
    TemporaryEdge, TemporaryEdgeKind, TemporaryVertex, TemporaryVertexKind, TraverseMode, Vertex,
    VertexKind, VertexRef,
};
pub use crate::{
    EdgeId, TempEdgeId, TempVertexId, VertexId, DUPLICATE_WAY_EPSILON_METERS,
    MAX_SEARCH_RADIUS_METERS, SNAP_FRACTION_EPSILON, WARNING_DISTANCE_METERS,
};
