//! Plane selection strategies for BSP tree construction.
//!
//! The choice of splitting plane affects tree balance and the number of
//! triangle splits during construction. It never affects correctness of the
//! traversal order.

use crate::{Classification, Triangle};

/// Strategy for selecting which triangle's plane to use for splitting.
///
/// The selected triangle becomes the seed of a BSP node: it is removed from
/// the working set and its plane splits the rest.
pub trait PlaneSelector {
    /// Returns the index of the seed triangle in `triangles`.
    ///
    /// `epsilon` is the tolerance the tree classifies with. Returning `None`
    /// or an out-of-range index for a non-empty slice makes the builder fall
    /// back to the first triangle.
    fn select(&self, triangles: &[Triangle], epsilon: f32) -> Option<usize>;
}

/// Selects the first non-degenerate triangle in the list.
///
/// This is the simplest and fastest selector, but may produce unbalanced
/// trees depending on input order. When every triangle is degenerate the
/// first one is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTriangle;

impl PlaneSelector for FirstTriangle {
    fn select(&self, triangles: &[Triangle], _epsilon: f32) -> Option<usize> {
        if triangles.is_empty() {
            return None;
        }
        triangles
            .iter()
            .position(|t| !t.is_degenerate())
            .or(Some(0))
    }
}

/// Picks the candidate plane that causes the fewest splits while keeping
/// the two sides balanced.
///
/// Only the first `sample_size` non-degenerate triangles are tried, each
/// scored against the whole slice:
/// `split_weight * spanning + balance_weight * |front - back|`.
#[derive(Debug, Clone, Copy)]
pub struct LeastSplits {
    pub split_weight: f32,
    pub balance_weight: f32,
    pub sample_size: usize,
}

impl Default for LeastSplits {
    fn default() -> Self {
        Self {
            split_weight: 8.0,
            balance_weight: 1.0,
            sample_size: 20,
        }
    }
}

impl LeastSplits {
    fn score(&self, candidate: &Triangle, triangles: &[Triangle], epsilon: f32) -> Option<f32> {
        let plane = candidate.plane().ok()?;

        let (front, back, spanning) = triangles
            .iter()
            .map(|t| match t.classify_with_epsilon(&plane, epsilon) {
                Classification::Coplanar => (0, 0, 0),
                Classification::Front => (1, 0, 0),
                Classification::Back => (0, 1, 0),
                Classification::Spanning => (0, 0, 1),
            })
            .fold((0i64, 0i64, 0i64), |acc, x| (acc.0 + x.0, acc.1 + x.1, acc.2 + x.2));

        Some(self.split_weight * spanning as f32 + self.balance_weight * (front - back).abs() as f32)
    }
}

impl PlaneSelector for LeastSplits {
    fn select(&self, triangles: &[Triangle], epsilon: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;

        for (index, candidate) in triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_degenerate())
            .take(self.sample_size)
        {
            let Some(score) = self.score(candidate, triangles, epsilon) else {
                continue;
            };
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((index, score));
            }
        }

        best.map(|(index, _)| index)
            .or_else(|| FirstTriangle.select(triangles, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PLANE_EPSILON;
    use nalgebra::Point3;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(Point3::from(a), Point3::from(b), Point3::from(c))
    }

    #[test]
    fn first_triangle_empty_list() {
        let triangles: Vec<Triangle> = vec![];
        assert!(FirstTriangle.select(&triangles, PLANE_EPSILON).is_none());
    }

    #[test]
    fn first_triangle_multiple() {
        let tri1 = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let tri2 = make_triangle([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);

        assert_eq!(FirstTriangle.select(&[tri1, tri2], PLANE_EPSILON), Some(0));
    }

    #[test]
    fn first_triangle_skips_degenerate() {
        let line = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let tri = make_triangle([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);

        assert_eq!(FirstTriangle.select(&[line, tri], PLANE_EPSILON), Some(1));
    }

    #[test]
    fn first_triangle_all_degenerate() {
        let line = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let point = make_triangle([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]);

        assert_eq!(FirstTriangle.select(&[line, point], PLANE_EPSILON), Some(0));
    }

    #[test]
    fn least_splits_avoids_splitting_plane() {
        // A large vertical wall at x = 0 would split both floor triangles;
        // the floor at z = 0 splits nothing.
        let wall = make_triangle([0.0, -5.0, -5.0], [0.0, 5.0, -5.0], [0.0, 0.0, 5.0]);
        let floor_left = make_triangle([-3.0, -1.0, 0.0], [3.0, -1.0, 0.0], [0.0, 2.0, 0.0]);
        let floor_right = make_triangle([-3.0, 2.0, 0.0], [3.0, 2.0, 0.0], [0.0, 4.0, 0.0]);

        let triangles = vec![wall, floor_left, floor_right];
        let selected = LeastSplits::default().select(&triangles, PLANE_EPSILON);

        assert_eq!(selected, Some(1));
    }

    #[test]
    fn least_splits_empty_list() {
        assert!(LeastSplits::default().select(&[], PLANE_EPSILON).is_none());
    }
}
