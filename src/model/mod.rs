//! Street graph data model
//!
//! Permanent vertices and edges live in arena vectors owned by
//! [`StreetGraph`]; temporary request-time entities live in a
//! [`RequestScratch`] arena that is dropped as a unit when the request
//! completes.

pub mod annotation;
pub mod edge;
pub mod graph;
pub mod mode;
pub mod scratch;
pub mod vertex;

pub use annotation::BuilderAnnotation;
pub use edge::{Edge, EdgeKind, StreetEdge};
pub use graph::StreetGraph;
pub use mode::{ModeSet, TraverseMode};
pub use scratch::{
    RequestScratch, TemporaryEdge, TemporaryEdgeKind, TemporaryVertex, TemporaryVertexKind,
    VertexRef,
};
pub use vertex::{Vertex, VertexKind};
