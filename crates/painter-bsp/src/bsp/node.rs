//! BSP tree node implementation.

use crate::{Plane3D, Triangle};

/// Index of a node inside its owning [`BspTree`](super::BspTree).
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Which child of a node to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// The positive half-space, where the plane normal points.
    Front,
    /// The negative half-space, behind the plane.
    Back,
}

/// A node in the BSP tree.
///
/// Each node partitions space using a splitting plane and stores the
/// triangles that lie on that plane. Triangles in front of or behind the
/// plane live in the respective child subtrees.
///
/// Children are owned by the tree's node storage and referenced by
/// [`NodeId`]; `parent` is the same edge seen from below and carries no
/// ownership.
#[derive(Debug, Clone)]
pub struct BspNode {
    /// The splitting plane for this node.
    plane: Plane3D,

    /// Triangles lying on the plane. The seed triangle comes first.
    coincident: Vec<Triangle>,

    /// Subtree containing triangles in FRONT of the splitting plane.
    front: Option<NodeId>,

    /// Subtree containing triangles BEHIND the splitting plane.
    back: Option<NodeId>,

    parent: Option<NodeId>,
}

impl BspNode {
    pub(crate) fn new(plane: Plane3D, coincident: Vec<Triangle>, parent: Option<NodeId>) -> Self {
        Self {
            plane,
            coincident,
            front: None,
            back: None,
            parent,
        }
    }

    /// Returns a reference to the splitting plane.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Returns the triangles lying on this node's plane.
    #[inline]
    pub fn coincident(&self) -> &[Triangle] {
        &self.coincident
    }

    /// Returns the front child, if any.
    #[inline]
    pub fn front(&self) -> Option<NodeId> {
        self.front
    }

    /// Returns the back child, if any.
    #[inline]
    pub fn back(&self) -> Option<NodeId> {
        self.back
    }

    /// Returns the child on the given branch.
    #[inline]
    pub fn child(&self, branch: Branch) -> Option<NodeId> {
        match branch {
            Branch::Front => self.front,
            Branch::Back => self.back,
        }
    }

    /// Returns the parent node, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    pub(crate) fn set_child(&mut self, branch: Branch, child: NodeId) {
        match branch {
            Branch::Front => self.front = Some(child),
            Branch::Back => self.back = Some(child),
        }
    }
}
