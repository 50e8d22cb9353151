//! Splitting planes and point/triangle classification.

use nalgebra::{Point3, Vector3};

use crate::BspError;

/// Default epsilon for plane classification.
///
/// Points whose signed distance to a plane lies within `[-PLANE_EPSILON,
/// PLANE_EPSILON]` are considered on the plane. Distances are measured along
/// a unit normal, so this is a world-space length: raise it for scenes with
/// large coordinates, lower it for very small ones.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Sine of the corner angle at the first vertex below which three points
/// count as collinear. Relative to the edge lengths, so it holds at any scale.
const COLLINEAR_SINE: f32 = 1e-6;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of a triangle relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No vertex is behind the plane and at least one is in front
    Front,
    /// No vertex is in front of the plane and at least one is behind
    Back,
    /// All vertices are on the plane
    Coplanar,
    /// Vertices lie on both sides; the triangle must be split
    Spanning,
}

impl Classification {
    /// Combines per-vertex sides into a triangle classification.
    pub fn from_sides(sides: &[PlaneSide]) -> Self {
        let front = sides.iter().any(|s| *s == PlaneSide::Front);
        let back = sides.iter().any(|s| *s == PlaneSide::Back);

        match (front, back) {
            (false, false) => Classification::Coplanar,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (true, true) => Classification::Spanning,
        }
    }
}

/// A plane in 3D space, represented as `normal · point = offset`.
///
/// The normal is always unit length, except for the degenerate plane used
/// for seeds without a defined normal, which has a zero normal and
/// classifies every point as [`PlaneSide::OnPlane`].
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and offset.
    /// The normal (and offset) are rescaled so the normal has unit length.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Result<Self, BspError> {
        let norm = normal.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(BspError::DegenerateNormal);
        }
        Ok(Self {
            normal: normal / norm,
            offset: offset / norm,
        })
    }

    /// Creates a plane from a point on the plane and a normal vector.
    pub fn from_point_and_normal(
        point: Point3<f32>,
        normal: Vector3<f32>,
    ) -> Result<Self, BspError> {
        let norm = normal.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(BspError::DegenerateNormal);
        }
        let unit_normal = normal / norm;
        Ok(Self {
            normal: unit_normal,
            offset: unit_normal.dot(&point.coords),
        })
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Returns [`BspError::DegenerateTriangle`] if the points are collinear.
    pub fn from_three_points(
        a: Point3<f32>,
        b: Point3<f32>,
        c: Point3<f32>,
    ) -> Result<Self, BspError> {
        let normal = checked_normal(a, b, c).ok_or(BspError::DegenerateTriangle)?;
        Self::from_point_and_normal(a, normal).map_err(|_| BspError::DegenerateTriangle)
    }

    /// The plane of a seed triangle that has no defined normal.
    pub(crate) fn degenerate() -> Self {
        Self {
            normal: Vector3::zeros(),
            offset: 0.0,
        }
    }

    /// Returns `true` for the zero-normal plane that puts every point on it.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        side_of(self.signed_distance(point), epsilon)
    }

    /// Projects a point onto the plane (finds the closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: Point3<f32>) -> Point3<f32> {
        point - self.normal * self.signed_distance(point)
    }
}

/// Returns the unnormalized normal `(b - a) × (c - a)`, or `None` when the
/// points are collinear or coincident.
///
/// `|(b - a) × (c - a)| = |b - a| |c - a| sin(angle at a)`, so the test
/// compares the sine rather than the raw length, which shrinks with the
/// square of the triangle's size.
pub(crate) fn checked_normal(
    a: Point3<f32>,
    b: Point3<f32>,
    c: Point3<f32>,
) -> Option<Vector3<f32>> {
    let ab = b - a;
    let ac = c - a;
    let normal = ab.cross(&ac);
    let len = normal.norm();

    (len.is_finite() && len > COLLINEAR_SINE * ab.norm() * ac.norm()).then_some(normal)
}

/// Maps a signed distance to a side using the given tolerance.
#[inline]
pub(crate) fn side_of(distance: f32, epsilon: f32) -> PlaneSide {
    if distance > epsilon {
        PlaneSide::Front
    } else if distance < -epsilon {
        PlaneSide::Back
    } else {
        PlaneSide::OnPlane
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_normal_and_offset() {
        let plane = Plane3D::new(Vector3::new(0.0, 0.0, 2.0), 4.0).unwrap();
        assert_eq!(plane.normal(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(plane.offset(), 2.0);
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert_eq!(
            Plane3D::new(Vector3::zeros(), 1.0),
            Err(BspError::DegenerateNormal)
        );
    }

    #[test]
    fn three_points_follow_right_hand_rule() {
        let plane = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        )
        .unwrap();

        assert!((plane.normal() - Vector3::z()).norm() < 1e-6);
        assert!((plane.offset() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn collinear_points_are_rejected() {
        let result = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(result, Err(BspError::DegenerateTriangle));
    }

    #[test]
    fn classify_point_sides() {
        let plane = Plane3D::new(Vector3::y(), 0.0).unwrap();

        assert_eq!(plane.classify_point(Point3::new(0.0, 1.0, 0.0)), PlaneSide::Front);
        assert_eq!(plane.classify_point(Point3::new(0.0, -1.0, 0.0)), PlaneSide::Back);
        assert_eq!(plane.classify_point(Point3::new(5.0, 0.0, -3.0)), PlaneSide::OnPlane);
        assert_eq!(
            plane.classify_point(Point3::new(0.0, PLANE_EPSILON * 0.5, 0.0)),
            PlaneSide::OnPlane
        );
    }

    #[test]
    fn custom_epsilon_widens_on_band() {
        let plane = Plane3D::new(Vector3::y(), 0.0).unwrap();
        let point = Point3::new(0.0, 0.05, 0.0);

        assert_eq!(plane.classify_point(point), PlaneSide::Front);
        assert_eq!(plane.classify_point_with_epsilon(point, 0.1), PlaneSide::OnPlane);
    }

    #[test]
    fn degenerate_plane_puts_everything_on_plane() {
        let plane = Plane3D::degenerate();
        assert!(plane.is_degenerate());
        assert_eq!(
            plane.classify_point(Point3::new(100.0, -3.0, 7.0)),
            PlaneSide::OnPlane
        );
    }

    #[test]
    fn tiny_triangle_still_defines_plane() {
        // Legs of 0.2 mm: the cross product is 4e-8, well below f32::EPSILON
        let plane = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2e-4, 0.0, 1.0),
            Point3::new(0.0, 2e-4, 1.0),
        )
        .unwrap();

        assert!((plane.normal() - Vector3::z()).norm() < 1e-5);
        assert!((plane.offset() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn tiny_normal_is_accepted() {
        let plane = Plane3D::new(Vector3::new(0.0, 1e-9, 0.0), 2e-9).unwrap();
        assert!((plane.normal() - Vector3::y()).norm() < 1e-6);
        assert!((plane.offset() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn nearly_collinear_points_are_rejected_at_any_scale() {
        for scale in [1e-4_f32, 1.0, 1e4] {
            let result = Plane3D::from_three_points(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(scale, 0.0, 0.0),
                Point3::new(2.0 * scale, scale * 1e-8, 0.0),
            );
            assert_eq!(result, Err(BspError::DegenerateTriangle), "scale {}", scale);
        }
    }

    #[test]
    fn project_point_lands_on_plane() {
        let plane = Plane3D::new(Vector3::new(1.0, 1.0, 0.0), 1.0).unwrap();
        let projected = plane.project_point(Point3::new(4.0, -2.0, 9.0));
        assert!(plane.signed_distance(projected).abs() < 1e-5);
    }

    #[test]
    fn classification_from_sides() {
        use PlaneSide::*;

        assert_eq!(
            Classification::from_sides(&[OnPlane, OnPlane, OnPlane]),
            Classification::Coplanar
        );
        assert_eq!(
            Classification::from_sides(&[Front, OnPlane, OnPlane]),
            Classification::Front
        );
        assert_eq!(
            Classification::from_sides(&[Back, Back, OnPlane]),
            Classification::Back
        );
        assert_eq!(
            Classification::from_sides(&[Front, Back, OnPlane]),
            Classification::Spanning
        );
    }
}
