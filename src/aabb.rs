//! Axis-aligned bounding boxes shared by meshes and the declarative node tree.

use crate::float_types::{Real, tolerance};
use nalgebra::{Matrix4, Point3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// The degenerate box at the origin, used for empty geometry.
    pub fn empty() -> Self {
        Self::new(Point3::origin(), Point3::origin())
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.mins = aabb.mins.inf(p);
            aabb.maxs = aabb.maxs.sup(p);
        }
        Some(aabb)
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.maxs.x >= other.mins.x
            && self.mins.x <= other.maxs.x
            && self.maxs.y >= other.mins.y
            && self.mins.y <= other.maxs.y
            && self.maxs.z >= other.mins.z
            && self.mins.z <= other.maxs.z
    }

    /// Smallest box containing both boxes.
    pub fn merged(&self, other: &Self) -> Self {
        Self::new(self.mins.inf(&other.mins), self.maxs.sup(&other.maxs))
    }

    /// Overlap of both boxes, `None` when they are disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::new(self.mins.sup(&other.mins), self.maxs.inf(&other.maxs)))
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        Point3::from((self.mins.coords + self.maxs.coords) * 0.5)
    }

    /// Box around the eight transformed corners.
    pub fn transformed(&self, mat: &Matrix4<Real>) -> Self {
        let corners = [
            Point3::new(self.mins.x, self.mins.y, self.mins.z),
            Point3::new(self.maxs.x, self.mins.y, self.mins.z),
            Point3::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point3::new(self.mins.x, self.maxs.y, self.mins.z),
            Point3::new(self.mins.x, self.mins.y, self.maxs.z),
            Point3::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point3::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point3::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
        .map(|c| mat.transform_point(&c));
        Self::from_points(corners.iter()).unwrap_or_else(Self::empty)
    }

    /// True when the box is centred on the plane `coordinate[axis] = 0`,
    /// i.e. its min and max offsets from that plane are equal in magnitude.
    pub fn is_symmetric_about(&self, axis: usize) -> bool {
        (self.mins[axis] + self.maxs[axis]).abs() <= tolerance() * 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Translation3, Vector3};

    #[test]
    fn merge_and_intersect() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
        let m = a.merged(&b);
        assert_eq!(m.mins, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(m.maxs, Point3::new(3.0, 3.0, 3.0));

        let i = a.intersection(&b).expect("overlapping boxes");
        assert_eq!(i.mins, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(i.maxs, Point3::new(2.0, 2.0, 2.0));

        let far = Aabb::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
        assert!(a.intersection(&far).is_none());
    }

    #[test]
    fn transformed_translates_corners() {
        let a = Aabb::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0));
        let t = Translation3::from(Vector3::new(1.0, 0.0, 0.0)).to_homogeneous();
        let moved = a.transformed(&t);
        assert_eq!(moved.mins.x, 0.0);
        assert_eq!(moved.maxs.x, 2.0);
        assert!(a.is_symmetric_about(0));
        assert!(!moved.is_symmetric_about(0));
    }
}
