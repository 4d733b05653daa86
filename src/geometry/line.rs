//! Lines and line segments.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scalar::Real;
use crate::simd::LaneSelect;
use crate::vector::Vector;

use super::Hyperplane;

/// An infinite line: `base + t * direction` with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line<T: LaneSelect<N>, const N: usize> {
    /// A point on the line.
    pub base: Vector<T, N>,
    /// Unit direction.
    pub direction: Vector<T, N>,
}

impl<T: LaneSelect<N> + Real, const N: usize> Line<T, N> {
    /// Construct from a base point and a unit direction.
    ///
    /// The direction must be normalized; this is debug-asserted.
    pub fn new(base: Vector<T, N>, direction: Vector<T, N>) -> Self {
        debug_assert!(
            (direction.length() - T::one()).abs() < T::constant(1e-4),
            "line direction must be a unit vector"
        );
        Self { base, direction }
    }

    /// Construct the line through two points.
    ///
    /// Fails with [`Error::DegenerateGeometry`](crate::Error) when the
    /// points (nearly) coincide.
    pub fn through(point1: Vector<T, N>, point2: Vector<T, N>) -> Result<Self> {
        let direction = (point2 - point1).normalized()?;
        Ok(Self {
            base: point1,
            direction,
        })
    }

    /// The point at signed distance `t` from the base.
    #[inline]
    pub fn point_at(&self, t: T) -> Vector<T, N> {
        self.base + self.direction * t
    }
}

/// A segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment<T: LaneSelect<N>, const N: usize> {
    /// Start point.
    pub start: Vector<T, N>,
    /// End point.
    pub end: Vector<T, N>,
}

impl<T: LaneSelect<N> + Real, const N: usize> LineSegment<T, N> {
    /// Construct a segment between two points.
    #[inline]
    pub fn new(start: Vector<T, N>, end: Vector<T, N>) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> T {
        self.start.distance(self.end)
    }

    /// Unit direction from start to end.
    ///
    /// Fails when the endpoints (nearly) coincide.
    #[inline]
    pub fn direction(&self) -> Result<Vector<T, N>> {
        (self.end - self.start).normalized()
    }

    /// Interpolate between the endpoints: start at `t = 0`, end at
    /// `t = 1`.
    #[inline]
    pub fn interpolate(&self, t: T) -> Vector<T, N> {
        self.start.lerp(self.end, t)
    }

    /// The interpolation parameter of the point on the carrying line
    /// closest to `point`.
    ///
    /// Fails when the segment is degenerate.
    pub fn nearest_param(&self, point: Vector<T, N>) -> Result<T> {
        let span = self.end - self.start;
        let dir = span.normalized()?;
        let len = span.length();
        Ok((point - self.start).dot(dir) / len)
    }

    /// The infinite line carrying this segment.
    ///
    /// Fails when the segment is degenerate.
    pub fn to_line(&self) -> Result<Line<T, N>> {
        Ok(Line {
            base: self.start,
            direction: self.direction()?,
        })
    }
}

/// Intersection point of a line and a hyperplane.
///
/// Returns `None` when the line is (nearly) parallel to the plane, which
/// includes the line lying inside it.
pub fn intersect_line_hyperplane<T: LaneSelect<N> + Real, const N: usize>(
    line: &Line<T, N>,
    plane: &Hyperplane<T, N>,
) -> Option<Vector<T, N>> {
    let denom = plane.normal().dot(line.direction);
    if denom.abs() <= T::epsilon() {
        return None;
    }
    let t = (plane.offset() - plane.normal().dot(line.base)) / denom;
    Some(line.point_at(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_through() {
        let line = Line::through(Vector::new([1.0f64, 0.0, 0.0]), Vector::new([3.0, 0.0, 0.0]))
            .unwrap();
        assert_eq!(line.direction.to_array(), [1.0, 0.0, 0.0]);
        assert_eq!(line.point_at(2.0).to_array(), [3.0, 0.0, 0.0]);

        let p = Vector::new([1.0f64, 2.0, 3.0]);
        assert!(Line::through(p, p).is_err());
    }

    #[test]
    fn test_segment_basics() {
        let seg = LineSegment::new(Vector::new([0.0f64, 0.0]), Vector::new([3.0, 4.0]));
        assert_eq!(seg.length(), 5.0);
        assert_eq!(seg.interpolate(0.5).to_array(), [1.5, 2.0]);
        let dir = seg.direction().unwrap();
        assert_relative_eq!(dir.x(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(dir.y(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_nearest_param() {
        let seg = LineSegment::new(Vector::new([0.0f64, 0.0]), Vector::new([10.0, 0.0]));
        assert_relative_eq!(
            seg.nearest_param(Vector::new([2.5, 7.0])).unwrap(),
            0.25,
            epsilon = 1e-12
        );
        // Points past the end extrapolate beyond [0, 1].
        assert_relative_eq!(
            seg.nearest_param(Vector::new([20.0, 0.0])).unwrap(),
            2.0,
            epsilon = 1e-12
        );

        let degenerate = LineSegment::new(Vector::new([1.0f64, 1.0]), Vector::new([1.0, 1.0]));
        assert!(degenerate.nearest_param(Vector::new([0.0, 0.0])).is_err());
    }

    #[test]
    fn test_interpolation_roundtrip() {
        let seg = LineSegment::new(Vector::new([1.0f64, 2.0, 3.0]), Vector::new([4.0, 5.0, 6.0]));
        let p = seg.interpolate(0.3);
        let t = seg.nearest_param(p).unwrap();
        assert_relative_eq!(t, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_line_plane_intersection() {
        // Plane z = 2, line along z through origin.
        let plane = Hyperplane::new(Vector::new([0.0f64, 0.0, 1.0]), 2.0);
        let line = Line::new(Vector::new([1.0f64, 1.0, 0.0]), Vector::new([0.0, 0.0, 1.0]));
        let hit = intersect_line_hyperplane(&line, &plane).unwrap();
        assert_eq!(hit.to_array(), [1.0, 1.0, 2.0]);

        // Parallel line misses.
        let parallel = Line::new(Vector::new([0.0f64, 0.0, 0.0]), Vector::new([1.0, 0.0, 0.0]));
        assert!(intersect_line_hyperplane(&parallel, &plane).is_none());
    }
}
