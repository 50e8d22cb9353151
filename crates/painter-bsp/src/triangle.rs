//! Triangle representation for BSP trees.

use nalgebra::{Point3, Vector3};

use crate::plane::checked_normal;
use crate::{BspError, Classification, PLANE_EPSILON, Plane3D};

/// A triangle in 3D space, defined by three vertices.
///
/// Triangles are immutable; splitting one produces new fragment triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    ///
    /// Its length is twice the triangle's area.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area). The check is
    /// relative to the edge lengths, so tiny but well-shaped triangles still
    /// have a normal.
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let [a, b, c] = self.vertices;
        checked_normal(a, b, c).map(|n| n.normalize())
    }

    /// Returns `true` if the vertices are collinear or coincident.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.unit_normal().is_none()
    }

    /// Computes the area of the triangle.
    pub fn area(&self) -> f32 {
        self.normal().norm() * 0.5
    }

    /// Returns the plane that this triangle lies on.
    pub fn plane(&self) -> Result<Plane3D, BspError> {
        let [a, b, c] = self.vertices;
        Plane3D::from_three_points(a, b, c)
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Classifies this triangle relative to a plane.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify(&self, plane: &Plane3D) -> Classification {
        self.classify_with_epsilon(plane, PLANE_EPSILON)
    }

    /// Classifies this triangle relative to a plane, with a custom epsilon.
    ///
    /// Returns:
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Front` if no vertex is behind the plane
    /// - `Back` if no vertex is in front of the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify_with_epsilon(&self, plane: &Plane3D, epsilon: f32) -> Classification {
        let sides = self
            .vertices
            .map(|v| plane.classify_point_with_epsilon(v, epsilon));
        Classification::from_sides(&sides)
    }
}

impl TryFrom<&Triangle> for Plane3D {
    type Error = BspError;

    fn try_from(triangle: &Triangle) -> Result<Self, Self::Error> {
        triangle.plane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(Point3::from(a), Point3::from(b), Point3::from(c))
    }

    #[test]
    fn normal_follows_winding() {
        let ccw = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let cw = make_triangle([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);

        assert!(ccw.normal().z > 0.0);
        assert!(cw.normal().z < 0.0);
    }

    #[test]
    fn area_of_right_triangle() {
        let tri = make_triangle([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 3.0, 0.0]);
        assert!((tri.area() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_triangles() {
        let line = make_triangle([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        let point = make_triangle([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]);

        assert!(line.is_degenerate());
        assert!(point.is_degenerate());
        assert_eq!(line.plane(), Err(BspError::DegenerateTriangle));
        assert_eq!(line.area(), 0.0);
    }

    #[test]
    fn small_triangles_are_not_degenerate() {
        // 0.2 mm legs: area 2e-8, raw normal length far below f32::EPSILON
        let tiny = make_triangle([0.0, 0.0, 0.0], [2e-4, 0.0, 0.0], [0.0, 2e-4, 0.0]);

        assert!(!tiny.is_degenerate());
        assert!(tiny.area() > 0.0);
        assert!(tiny.unit_normal().is_some_and(|n| (n - Vector3::z()).norm() < 1e-5));
        assert!(tiny.plane().is_ok());
    }

    #[test]
    fn centroid_is_vertex_average() {
        let tri = make_triangle([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 3.0, 3.0]);
        assert_eq!(tri.centroid(), Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn classify_against_plane() {
        let plane = Plane3D::new(Vector3::z(), 0.0).unwrap();

        let above = make_triangle([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 2.0]);
        let below = make_triangle([0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -2.0]);
        let on = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let touching = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 1.0]);
        let spanning = make_triangle([0.0, 0.0, -1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 0.0]);

        assert_eq!(above.classify(&plane), Classification::Front);
        assert_eq!(below.classify(&plane), Classification::Back);
        assert_eq!(on.classify(&plane), Classification::Coplanar);
        assert_eq!(touching.classify(&plane), Classification::Front);
        assert_eq!(spanning.classify(&plane), Classification::Spanning);
    }

    #[test]
    fn try_into_plane() {
        let tri = make_triangle([0.0, 0.0, 2.0], [1.0, 0.0, 2.0], [0.0, 1.0, 2.0]);
        let plane = Plane3D::try_from(&tri).unwrap();
        assert!((plane.offset() - 2.0).abs() < 1e-6);
    }
}
