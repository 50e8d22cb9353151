//! Binary Space Partitioning tree for ordered triangle traversal.
//!
//! The tree recursively partitions 3D space using planes taken from the
//! input triangles. Once built it answers, for any viewpoint:
//!
//! - Back-to-front order, for painter's algorithm rendering of
//!   transparent or overlapping geometry
//! - Front-to-back order, for occlusion culling with early out
//!
//! # Example
//!
//! ```ignore
//! use painter_bsp::{BspTree, CollectingVisitor, Triangle};
//! use nalgebra::Point3;
//!
//! let triangles: Vec<Triangle> = /* create triangles */;
//! let tree = BspTree::from_triangles(triangles);
//!
//! let eye = Point3::new(0.0, 0.0, 10.0);  // The location of the viewer
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse_back_to_front(eye, &mut visitor);
//!
//! // Farthest triangles first
//! let ordered = visitor.into_triangles();
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: Owns every node and runs construction and traversal
//! - [`BspNode`]: A splitting plane plus the triangles lying on it
//! - [`PlaneSelector`]: Strategy trait for choosing splitting planes
//! - [`BspVisitor`]: Visitor trait for consuming ordered triangles

mod node;
mod selector;
mod traverse;
mod tree;
mod visitor;

pub use node::{Branch, BspNode, NodeId};
pub use selector::{FirstTriangle, LeastSplits, PlaneSelector};
pub use traverse::{OrderedTriangles, TraversalOrder};
pub use tree::{BspBuilder, BspTree, BuildStats};
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};
