//! BSP (Binary Space Partitioning) trees over static triangles, with
//! viewpoint-ordered traversal.

pub mod bsp;
mod cuttable;
mod error;
mod plane;
mod triangle;

pub use bsp::{
    Branch, BspBuilder, BspNode, BspTree, BspVisitor, BuildStats, CollectingVisitor,
    FirstTriangle, FnVisitor, LeastSplits, NodeId, OrderedTriangles, PlaneSelector,
    TraversalOrder,
};
pub use cuttable::Cuttable;
pub use error::BspError;
pub use plane::{Classification, PLANE_EPSILON, Plane3D, PlaneSide};
pub use triangle::Triangle;
