//! Viewpoint-ordered traversal.

use nalgebra::Point3;

use crate::{PlaneSide, Triangle};

use super::node::NodeId;
use super::tree::BspTree;

/// Order in which triangles are emitted relative to the viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Farthest first; the painter's algorithm order.
    #[default]
    BackToFront,
    /// Nearest first; suits occlusion culling with early out.
    FrontToBack,
}

enum Step {
    Descend(NodeId),
    Emit(NodeId),
}

/// Iterator over a tree's triangles in viewpoint order.
///
/// Created by [`BspTree::iter_ordered`]. Uses an explicit stack, so deep
/// trees do not grow the call stack. Front-to-back yields exactly the
/// reverse of back-to-front for the same viewpoint.
pub struct OrderedTriangles<'a> {
    tree: &'a BspTree,
    eye: Point3<f32>,
    order: TraversalOrder,
    stack: Vec<Step>,
    pending: &'a [Triangle],
}

impl<'a> OrderedTriangles<'a> {
    pub(crate) fn new(tree: &'a BspTree, eye: Point3<f32>, order: TraversalOrder) -> Self {
        Self {
            tree,
            eye,
            order,
            stack: tree.root_id().map(Step::Descend).into_iter().collect(),
            pending: &[],
        }
    }

    /// Queues `id`'s subtrees and coincident triangles in emission order.
    fn expand(&mut self, id: NodeId) {
        let node = self.tree.node(id);
        let side = node
            .plane()
            .classify_point_with_epsilon(self.eye, self.tree.epsilon());

        // Eye on the plane is treated as in front.
        let (far, near) = match side {
            PlaneSide::Front | PlaneSide::OnPlane => (node.back(), node.front()),
            PlaneSide::Back => (node.front(), node.back()),
        };
        let (first, last) = match self.order {
            TraversalOrder::BackToFront => (far, near),
            TraversalOrder::FrontToBack => (near, far),
        };

        if let Some(last) = last {
            self.stack.push(Step::Descend(last));
        }
        self.stack.push(Step::Emit(id));
        if let Some(first) = first {
            self.stack.push(Step::Descend(first));
        }
    }
}

impl<'a> Iterator for OrderedTriangles<'a> {
    type Item = &'a Triangle;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pending = self.pending;
            let next = match self.order {
                TraversalOrder::BackToFront => pending.split_first(),
                TraversalOrder::FrontToBack => pending.split_last(),
            };
            if let Some((triangle, rest)) = next {
                self.pending = rest;
                return Some(triangle);
            }

            match self.stack.pop()? {
                Step::Descend(id) => self.expand(id),
                Step::Emit(id) => self.pending = self.tree.node(id).coincident(),
            }
        }
    }
}
