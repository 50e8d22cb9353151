//! BSP tree container and construction.

use nalgebra::Point3;

use crate::{BspError, Classification, Cuttable, PLANE_EPSILON, Plane3D, Triangle};

use super::node::{Branch, BspNode, NodeId};
use super::selector::{FirstTriangle, PlaneSelector};
use super::traverse::{OrderedTriangles, TraversalOrder};
use super::visitor::BspVisitor;

/// A Binary Space Partitioning tree for static triangles.
///
/// BSP trees recursively partition space using planes taken from the input
/// triangles, so that any viewpoint can visit them in strict back-to-front
/// (or front-to-back) order without sorting. Each node keeps the triangles
/// lying on its splitting plane; everything else lives in the front or back
/// subtree, split into fragments where it straddles the plane.
///
/// # Construction
///
/// ```ignore
/// use painter_bsp::{BspTree, LeastSplits, Triangle};
///
/// let triangles: Vec<Triangle> = /* ... */;
/// let tree = BspTree::build(triangles, &LeastSplits::default());
/// ```
///
/// # Traversal
///
/// ```ignore
/// tree.traverse_back_to_front(eye_position, &mut visitor);
/// for triangle in tree.iter_ordered(eye_position, TraversalOrder::FrontToBack) {
///     // ...
/// }
/// ```
///
/// Nodes are stored in a flat arena and refer to each other by [`NodeId`],
/// so the whole tree is dropped at once without recursion. A built tree is
/// never mutated and can be traversed from several threads concurrently.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
    root: Option<NodeId>,
    epsilon: f32,
    stats: BuildStats,
}

/// Counters collected while building a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Triangles handed to the builder.
    pub input_triangles: usize,
    /// Triangles and fragments stored in the finished tree.
    pub stored_triangles: usize,
    /// Spanning triangles that were cut.
    pub splits: usize,
    /// Nodes in the finished tree.
    pub nodes: usize,
    /// Length of the longest root-to-leaf path (0 for an empty tree).
    pub max_depth: usize,
    /// Nodes whose seed triangle had no defined normal.
    pub degenerate_seeds: usize,
}

impl Default for BspTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BspTree {
    /// Creates an empty BSP tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            epsilon: PLANE_EPSILON,
            stats: BuildStats::default(),
        }
    }

    /// Returns a builder for configuring the tolerance and plane selector.
    pub fn builder() -> BspBuilder<FirstTriangle> {
        BspBuilder::new()
    }

    /// Builds a BSP tree from a collection of triangles.
    ///
    /// Uses the provided [`PlaneSelector`] to choose splitting planes and the
    /// default [`PLANE_EPSILON`] tolerance. Triangles that span a splitting
    /// plane are split using the [`Cuttable`] trait.
    ///
    /// Returns an empty tree if the input is empty.
    pub fn build<S: PlaneSelector>(triangles: Vec<Triangle>, selector: &S) -> Self {
        build_tree(triangles, selector, PLANE_EPSILON)
    }

    /// Builds a BSP tree using the default plane selector ([`FirstTriangle`]).
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self::build(triangles, &FirstTriangle)
    }

    /// Returns `true` if the tree contains no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the id of the root node, if any.
    #[inline]
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&BspNode> {
        self.root.map(|id| self.node(id))
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &BspNode {
        &self.nodes[id.0]
    }

    /// Returns the parent of `id`, or `None` for the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    /// Walks from `id` up to the root.
    ///
    /// Yields each ancestor together with the branch taken from it on the way
    /// down to `id`.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, Branch)> + '_ {
        let mut child = id;
        std::iter::from_fn(move || {
            let parent = self.parent(child)?;
            let branch = if self.node(parent).front() == Some(child) {
                Branch::Front
            } else {
                Branch::Back
            };
            child = parent;
            Some((parent, branch))
        })
    }

    /// Iterates over all nodes with their ids, in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &BspNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of triangles and fragments in the tree.
    pub fn triangle_count(&self) -> usize {
        self.nodes.iter().map(|n| n.coincident().len()).sum()
    }

    /// Returns the maximum depth of the tree (0 for empty tree).
    #[inline]
    pub fn depth(&self) -> usize {
        self.stats.max_depth
    }

    /// Returns the classification tolerance the tree was built with.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Returns the counters recorded during construction.
    #[inline]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Returns an iterator over the triangles ordered relative to `eye`.
    pub fn iter_ordered(&self, eye: Point3<f32>, order: TraversalOrder) -> OrderedTriangles<'_> {
        OrderedTriangles::new(self, eye, order)
    }

    /// Visits every triangle once, in the given order relative to `eye`.
    pub fn traverse<V: BspVisitor>(&self, eye: Point3<f32>, order: TraversalOrder, visitor: &mut V) {
        for triangle in self.iter_ordered(eye, order) {
            visitor.visit(triangle);
        }
    }

    /// Traverses the tree back-to-front relative to the given viewpoint.
    ///
    /// This is the painter's algorithm order: the farthest triangles come
    /// first so nearer ones overpaint them.
    pub fn traverse_back_to_front<V: BspVisitor>(&self, eye: Point3<f32>, visitor: &mut V) {
        self.traverse(eye, TraversalOrder::BackToFront, visitor);
    }

    /// Traverses the tree front-to-back relative to the given viewpoint.
    ///
    /// The exact reverse of [`traverse_back_to_front`](Self::traverse_back_to_front),
    /// useful for occlusion culling that stops once the view is covered.
    pub fn traverse_front_to_back<V: BspVisitor>(&self, eye: Point3<f32>, visitor: &mut V) {
        self.traverse(eye, TraversalOrder::FrontToBack, visitor);
    }

    /// Collects all triangles in the tree into a vector.
    ///
    /// The order of triangles is not guaranteed.
    pub fn collect_triangles(&self) -> Vec<Triangle> {
        self.nodes
            .iter()
            .flat_map(|n| n.coincident().iter().cloned())
            .collect()
    }
}

/// Configures and runs BSP tree construction.
///
/// ```ignore
/// let tree = BspTree::builder()
///     .with_epsilon(1e-4)?
///     .with_selector(LeastSplits::default())
///     .build(triangles);
/// ```
#[derive(Debug, Clone)]
pub struct BspBuilder<S> {
    epsilon: f32,
    selector: S,
}

impl Default for BspBuilder<FirstTriangle> {
    fn default() -> Self {
        Self::new()
    }
}

impl BspBuilder<FirstTriangle> {
    /// Creates a builder with [`PLANE_EPSILON`] and [`FirstTriangle`].
    pub fn new() -> Self {
        Self {
            epsilon: PLANE_EPSILON,
            selector: FirstTriangle,
        }
    }
}

impl<S: PlaneSelector> BspBuilder<S> {
    /// Sets the on-plane tolerance used for building and traversal.
    ///
    /// Returns [`BspError::InvalidEpsilon`] unless `epsilon` is finite and
    /// non-negative.
    pub fn with_epsilon(mut self, epsilon: f32) -> Result<Self, BspError> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(BspError::InvalidEpsilon(epsilon));
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    /// Replaces the plane selection strategy.
    pub fn with_selector<T: PlaneSelector>(self, selector: T) -> BspBuilder<T> {
        BspBuilder {
            epsilon: self.epsilon,
            selector,
        }
    }

    /// Returns the configured tolerance.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Builds a tree, taking ownership of `triangles`.
    pub fn build(&self, triangles: Vec<Triangle>) -> BspTree {
        build_tree(triangles, &self.selector, self.epsilon)
    }
}

/// Pending subtree: the triangles it must hold and where to attach it.
struct WorkItem {
    triangles: Vec<Triangle>,
    attach: Option<(NodeId, Branch)>,
    depth: usize,
}

/// Builds the tree with an explicit work stack, one node per item.
fn build_tree<S: PlaneSelector>(triangles: Vec<Triangle>, selector: &S, epsilon: f32) -> BspTree {
    let mut tree = BspTree {
        epsilon,
        ..BspTree::new()
    };
    let mut stats = BuildStats {
        input_triangles: triangles.len(),
        ..BuildStats::default()
    };

    let mut stack = vec![WorkItem {
        triangles,
        attach: None,
        depth: 1,
    }];

    while let Some(WorkItem {
        mut triangles,
        attach,
        depth,
    }) = stack.pop()
    {
        if triangles.is_empty() {
            continue;
        }

        // Select the seed triangle and derive the plane. A degenerate seed
        // would pull every remaining triangle into this node, so it is only
        // accepted when nothing better is left.
        let seed_idx = selector
            .select(&triangles, epsilon)
            .filter(|&i| i < triangles.len() && !triangles[i].is_degenerate())
            .or_else(|| FirstTriangle.select(&triangles, epsilon))
            .unwrap_or(0);
        let seed = triangles.remove(seed_idx);
        let plane = match seed.plane() {
            Ok(plane) => plane,
            Err(err) => {
                tracing::trace!(
                    %err,
                    remaining = triangles.len(),
                    "degenerate seed, node keeps everything"
                );
                stats.degenerate_seeds += 1;
                Plane3D::degenerate()
            }
        };

        let mut coincident = vec![seed];
        let mut front_list = Vec::new();
        let mut back_list = Vec::new();

        for triangle in triangles {
            match triangle.classify_with_epsilon(&plane, epsilon) {
                Classification::Coplanar => coincident.push(triangle),
                Classification::Front => front_list.push(triangle),
                Classification::Back => back_list.push(triangle),
                Classification::Spanning => {
                    let (front_parts, back_parts) = triangle.cut(&plane, epsilon);
                    tracing::trace!(
                        front = front_parts.len(),
                        back = back_parts.len(),
                        "split spanning triangle"
                    );
                    stats.splits += 1;
                    front_list.extend(front_parts);
                    back_list.extend(back_parts);
                }
            }
        }

        let id = NodeId(tree.nodes.len());
        stats.stored_triangles += coincident.len();
        stats.max_depth = stats.max_depth.max(depth);
        tree.nodes.push(BspNode::new(plane, coincident, attach.map(|(parent, _)| parent)));

        match attach {
            Some((parent, branch)) => tree.nodes[parent.0].set_child(branch, id),
            None => tree.root = Some(id),
        }

        for (list, branch) in [(back_list, Branch::Back), (front_list, Branch::Front)] {
            stack.push(WorkItem {
                triangles: list,
                attach: Some((id, branch)),
                depth: depth + 1,
            });
        }
    }

    stats.nodes = tree.nodes.len();
    tracing::debug!(
        input = stats.input_triangles,
        stored = stats.stored_triangles,
        splits = stats.splits,
        nodes = stats.nodes,
        depth = stats.max_depth,
        degenerate_seeds = stats.degenerate_seeds,
        epsilon,
        "built bsp tree"
    );
    tree.stats = stats;
    tree
}
