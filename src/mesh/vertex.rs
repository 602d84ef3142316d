//! Polygon corners.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A polygon corner: position plus the shading normal written to STL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex { pos, normal }
    }

    pub fn flip(&mut self) {
        self.normal.neg_mut();
    }

    /// Point a fraction `t` of the way to `other`. The normal is blended the
    /// same way and not renormalised.
    pub fn lerp(&self, other: &Vertex, t: Real) -> Vertex {
        Vertex {
            pos: self.pos.coords.lerp(&other.pos.coords, t).into(),
            normal: self.normal.lerp(&other.normal, t),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_between_corners() {
        let a = Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::x());
        let b = Vertex::new(Point3::new(4.0, 2.0, 0.0), Vector3::y());
        let mid = a.lerp(&b, 0.25);
        assert_eq!(mid.pos, Point3::new(1.0, 0.5, 0.0));
        assert_eq!(mid.normal, Vector3::new(0.75, 0.25, 0.0));

        let mut flipped = mid;
        flipped.flip();
        assert_eq!(flipped.normal, -mid.normal);
        assert!(!Vertex::new(Point3::new(Real::NAN, 0.0, 0.0), Vector3::z()).is_finite());
    }
}
