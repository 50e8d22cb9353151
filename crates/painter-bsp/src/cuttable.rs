//! Triangle cutting/splitting operations for BSP trees.

use nalgebra::Point3;

use crate::plane::side_of;
use crate::{Classification, Plane3D, PlaneSide, Triangle};

/// Trait for geometry that can be cut by a plane.
pub trait Cuttable {
    /// Cuts the geometry by a plane, using `epsilon` as the on-plane tolerance.
    ///
    /// Returns `(front, back)` fragment lists:
    ///
    /// - **Front**: `([self], [])` - entire geometry is in front
    /// - **Back**: `([], [self])` - entire geometry is behind
    /// - **Coplanar**: `([self], [])` - treated as front
    /// - **Spanning**: fragments on each side, together tiling the original
    fn cut(&self, plane: &Plane3D, epsilon: f32) -> (Vec<Triangle>, Vec<Triangle>);
}

impl Cuttable for Triangle {
    fn cut(&self, plane: &Plane3D, epsilon: f32) -> (Vec<Triangle>, Vec<Triangle>) {
        match self.classify_with_epsilon(plane, epsilon) {
            Classification::Front | Classification::Coplanar => (vec![self.clone()], Vec::new()),
            Classification::Back => (Vec::new(), vec![self.clone()]),
            Classification::Spanning => split_triangle(self, plane, epsilon),
        }
    }
}

/// Splits a spanning triangle into front and back fragments.
///
/// Walks the edges Sutherland-Hodgman style, building one vertex loop per
/// side and inserting the crossing point wherever an edge goes from front to
/// back or back to front. Each loop (3 or 4 vertices) is then fanned into
/// triangles from its first vertex, which keeps the original winding.
fn split_triangle(
    triangle: &Triangle,
    plane: &Plane3D,
    epsilon: f32,
) -> (Vec<Triangle>, Vec<Triangle>) {
    let vertices = triangle.vertices();

    let mut front_verts = Vec::with_capacity(4);
    let mut back_verts = Vec::with_capacity(4);

    let distances = vertices.map(|v| plane.signed_distance(v));
    let sides = distances.map(|d| side_of(d, epsilon));

    for i in 0..3 {
        let j = (i + 1) % 3;
        let current = vertices[i];

        match sides[i] {
            PlaneSide::Front => front_verts.push(current),
            PlaneSide::Back => back_verts.push(current),
            PlaneSide::OnPlane => {
                front_verts.push(current);
                back_verts.push(current);
            }
        }

        let crosses = matches!(
            (sides[i], sides[j]),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );

        if crosses {
            let t = distances[i] / (distances[i] - distances[j]);
            let intersection = plane.project_point(lerp(current, vertices[j], t));
            front_verts.push(intersection);
            back_verts.push(intersection);
        }
    }

    (fan(&front_verts), fan(&back_verts))
}

#[inline]
fn lerp(start: Point3<f32>, end: Point3<f32>, t: f32) -> Point3<f32> {
    start + (end - start) * t
}

/// Fan-triangulates a convex vertex loop around its first vertex.
fn fan(loop_verts: &[Point3<f32>]) -> Vec<Triangle> {
    if loop_verts.len() < 3 {
        return Vec::new();
    }

    (1..loop_verts.len() - 1)
        .map(|i| Triangle::new(loop_verts[0], loop_verts[i], loop_verts[i + 1]))
        .collect()
}
