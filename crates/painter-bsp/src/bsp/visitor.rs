//! Visitor pattern for BSP tree traversal.
//!
//! Visitors receive triangles in traversal order without coupling the
//! traversal logic to a particular consumer such as a renderer.

use crate::Triangle;

/// Visitor for processing triangles during BSP tree traversal.
///
/// Common uses include:
/// - Submitting draw calls in painter's order
/// - Collecting triangles in sorted order
/// - Early-out occlusion tests when walking front-to-back
pub trait BspVisitor {
    /// Called once for every stored triangle or fragment, in traversal order.
    fn visit(&mut self, triangle: &Triangle);
}

/// A simple visitor that collects all visited triangles.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Triangle>,
}

impl CollectingVisitor {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected triangles.
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.collected
    }

    /// Returns a reference to the collected triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.collected
    }
}

impl BspVisitor for CollectingVisitor {
    fn visit(&mut self, triangle: &Triangle) {
        self.collected.push(triangle.clone());
    }
}

/// A visitor that calls a closure for each triangle.
pub struct FnVisitor<F>
where
    F: FnMut(&Triangle),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&Triangle),
{
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> BspVisitor for FnVisitor<F>
where
    F: FnMut(&Triangle),
{
    fn visit(&mut self, triangle: &Triangle) {
        (self.func)(triangle);
    }
}
