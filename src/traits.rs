use crate::aabb::Aabb;
use crate::float_types::{Real, tolerance};
use crate::mesh::plane::Plane;
use nalgebra::{Matrix3, Matrix4, Rotation3, Translation3, Vector3};

/// Boolean operations + transformations
pub trait CSG: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn difference(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Self translated so that its bounding-box center is at the origin (0,0,0).
    fn center(&self) -> Self {
        let center = self.bounding_box().center();
        self.translate(-center.x, -center.y, -center.z)
    }

    /// Translates the object so that its bottommost point(s) sit exactly at z=0.
    fn float(&self) -> Self {
        let min_z = self.bounding_box().mins.z;
        self.translate(0.0, 0.0, -min_z)
    }

    /// Rotates by x_degrees, y_degrees, z_degrees, applied about X first, then Y, then Z.
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        self.transform(&rotation_matrix(x_deg, y_deg, z_deg))
    }

    /// Scales by scale_x, scale_y, scale_z
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    /// Reflect (mirror) about an arbitrary plane `plane`.
    ///
    /// The plane is specified by:
    ///   `plane.normal` = the plane’s normal vector (need not be unit),
    ///   `plane.w`      = the dot-product with that normal for points on the plane (offset).
    ///
    /// Implementors of [`CSG::transform`] keep faces outward under reflections.
    fn mirror(&self, plane: Plane) -> Self {
        match mirror_matrix(&plane) {
            Some(mirror_mat) => self.transform(&mirror_mat),
            // Degenerate plane? Just return clone (no transform)
            None => self.clone(),
        }
    }

    /// Distribute `count` copies along a straight line (vector), each copy spaced by `spacing`.
    /// E.g. if `dir=(1.0,0.0,0.0)` and `spacing=2.0`, you get copies at x=0, x=2, x=4, ... etc.
    fn distribute_linear(&self, count: usize, dir: Vector3<Real>, spacing: Real) -> Self {
        if count < 1 {
            return self.clone();
        }
        let step = dir.normalize() * spacing;

        (1..count).fold(self.clone(), |all, i| {
            all.union(&self.translate_vector(step * (i as Real)))
        })
    }
}

/// Rotation about X, then Y, then Z (degrees).
pub fn rotation_matrix(x_deg: Real, y_deg: Real, z_deg: Real) -> Matrix4<Real> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());

    // Compose them in the desired order
    (rz * ry * rx).to_homogeneous()
}

/// Householder reflection about `plane`, `None` when the normal is degenerate.
pub fn mirror_matrix(plane: &Plane) -> Option<Matrix4<Real>> {
    let len = plane.normal().norm();
    if len < tolerance() {
        return None;
    }

    let n = plane.normal() / len;
    let w = plane.offset() / len;

    // Translate so the plane crosses the origin, reflect with R = I - 2 n n^T, translate back
    let offset = n * w;
    let t1 = Translation3::from(-offset).to_homogeneous();
    let mut reflect_4 = Matrix4::identity();
    let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
    reflect_4.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);
    let t2 = Translation3::from(offset).to_homogeneous();

    Some(t2 * reflect_4 * t1)
}
